use crate::functions::math_ast::{
  apply_function, canonical, div, negate, plus, power, times,
};
use crate::syntax::{Expr, Function};

use super::expand::{expand, multiplicative_factors};
use super::univariate::Poly;

// ─── Simplify ───────────────────────────────────────────────────────

/// General simplification: the smallest of the canonical form, its
/// expansion, the cancelled fraction and the trig-reduced forms.
pub fn simplify(expr: &Expr) -> Expr {
  if let Expr::Equation { lhs, rhs } = expr {
    return Expr::Equation {
      lhs: Box::new(simplify(lhs)),
      rhs: Box::new(simplify(rhs)),
    };
  }

  let base = canonical(expr);
  let expanded = expand(&base);
  let mut candidates = vec![
    apply_trig_identities(&base),
    apply_trig_identities(&expanded),
  ];
  if let Some(cancelled) = cancel(&base) {
    candidates.push(cancelled);
  }
  candidates.push(expanded);

  // Ties keep the earlier candidate, so the form as written wins.
  candidates
    .into_iter()
    .fold(base, |best, candidate| {
      if candidate.node_count() < best.node_count() {
        candidate
      } else {
        best
      }
    })
}

/// Split a canonical expression into numerator and denominator, bringing
/// sums over a common denominator.
pub fn numer_denom(expr: &Expr) -> (Expr, Expr) {
  if let Expr::Plus(terms) = expr {
    let parts: Vec<(Expr, Expr)> = terms.iter().map(numer_denom).collect();
    let mut denominators: Vec<Expr> = Vec::new();
    for (_, d) in &parts {
      if *d != Expr::Integer(1) && !denominators.contains(d) {
        denominators.push(d.clone());
      }
    }
    if denominators.is_empty() {
      return (expr.clone(), Expr::Integer(1));
    }
    let numerator = parts
      .into_iter()
      .map(|(n, d)| {
        let mut factors = vec![n];
        factors.extend(denominators.iter().filter(|o| **o != d).cloned());
        times(factors)
      })
      .collect();
    return (plus(numerator), times(denominators));
  }

  let mut numer = Vec::new();
  let mut denom = Vec::new();
  for factor in multiplicative_factors(expr) {
    match &factor {
      Expr::Power(base, exp)
        if exp.as_number().is_some_and(|n| n.is_negative()) =>
      {
        denom.push(power((**base).clone(), negate((**exp).clone())));
      }
      Expr::Rational(p, q) => {
        numer.push(Expr::Integer(*p));
        denom.push(Expr::Integer(*q));
      }
      _ => numer.push(factor),
    }
  }
  (times(numer), times(denom))
}

/// Cancel the polynomial gcd out of a single-variable fraction.
fn cancel(expr: &Expr) -> Option<Expr> {
  let (numer, denom) = numer_denom(expr);
  if denom == Expr::Integer(1) {
    return None;
  }
  let symbols = expr.free_symbols();
  let &[var] = symbols.as_slice() else {
    return None;
  };
  let p = Poly::from_expr(&numer, var)?;
  let q = Poly::from_expr(&denom, var)?;
  let g = p.gcd(&q)?;
  if g.degree() == 0 {
    return None;
  }
  let (p, _) = p.div_rem(&g)?;
  let (q, _) = q.div_rem(&g)?;
  Some(div(p.to_expr(var), q.to_expr(var)))
}

// ─── Trig identities ────────────────────────────────────────────────

/// Replace `c*sin(u)^2 + c*cos(u)^2` by `c` in every sum.
pub fn apply_trig_identities(expr: &Expr) -> Expr {
  match expr {
    Expr::Plus(terms) => {
      let mut terms: Vec<Expr> =
        terms.iter().map(apply_trig_identities).collect();
      let mut i = 0;
      while i < terms.len() {
        if let Some((partner, reduced)) = pythagorean_partner(&terms[i])
          && let Some(j) = terms.iter().position(|t| *t == partner)
        {
          let (hi, lo) = (i.max(j), i.min(j));
          terms.remove(hi);
          terms.remove(lo);
          terms.push(reduced);
          i = 0;
          continue;
        }
        i += 1;
      }
      plus(terms)
    }
    Expr::Times(factors) => {
      times(factors.iter().map(apply_trig_identities).collect())
    }
    Expr::Power(base, exp) => {
      power(apply_trig_identities(base), apply_trig_identities(exp))
    }
    Expr::FunctionCall { func, arg } => {
      apply_function(*func, apply_trig_identities(arg))
    }
    _ => expr.clone(),
  }
}

/// For a term `r*sin(u)^2`, the matching `r*cos(u)^2` and the reduced `r`.
fn pythagorean_partner(term: &Expr) -> Option<(Expr, Expr)> {
  let factors = multiplicative_factors(term);
  let index = factors.iter().position(|f| {
    matches!(f, Expr::Power(base, exp)
      if **exp == Expr::Integer(2)
        && matches!(**base, Expr::FunctionCall { func: Function::Sin, .. }))
  })?;
  let Expr::Power(base, _) = &factors[index] else {
    return None;
  };
  let Expr::FunctionCall { arg, .. } = &**base else {
    return None;
  };
  let mut rest = factors.clone();
  rest.remove(index);
  let mut partner = rest.clone();
  partner.push(power(
    apply_function(Function::Cos, (**arg).clone()),
    Expr::Integer(2),
  ));
  Some((times(partner), times(rest)))
}
