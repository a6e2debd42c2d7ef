use crate::functions::calculus_ast::is_constant_wrt;
use crate::functions::math_ast::{plus, power, times};
use crate::syntax::{Expr, Number, Symbol, gcd_i128};

use super::expand::{additive_terms, expand, multiplicative_factors};

// ─── Coefficients ───────────────────────────────────────────────────

/// Polynomials above this degree are not treated as polynomials.
const MAX_DEGREE: usize = 64;

/// Divisor enumeration for the rational root search stops above this.
const MAX_DIVISOR_SEARCH: i128 = 1_000_000;

/// Coefficients of `expr` as a polynomial in `var`, lowest degree first.
/// The coefficients may contain other symbols.
pub fn coefficients(expr: &Expr, var: Symbol) -> Option<Vec<Expr>> {
  let expanded = expand(expr);
  let mut grouped: Vec<Vec<Expr>> = Vec::new();
  for term in additive_terms(&expanded) {
    let (degree, coeff) = monomial(&term, var)?;
    if degree > MAX_DEGREE {
      return None;
    }
    if grouped.len() <= degree {
      grouped.resize(degree + 1, Vec::new());
    }
    grouped[degree].push(coeff);
  }
  Some(grouped.into_iter().map(plus).collect())
}

/// Split a monomial into its degree in `var` and the remaining factor.
fn monomial(term: &Expr, var: Symbol) -> Option<(usize, Expr)> {
  let mut degree = 0usize;
  let mut rest = Vec::new();
  for factor in multiplicative_factors(term) {
    match &factor {
      Expr::Symbol(s) if *s == var => degree += 1,
      Expr::Power(base, exp) if **base == Expr::Symbol(var) => match **exp {
        Expr::Integer(n) if n >= 0 => degree += usize::try_from(n).ok()?,
        _ => return None,
      },
      _ if is_constant_wrt(&factor, var) => rest.push(factor),
      _ => return None,
    }
  }
  Some((degree, times(rest)))
}

// ─── Rational polynomials ───────────────────────────────────────────

/// Dense polynomial with exact rational coefficients, lowest degree first.
#[derive(Debug, Clone, PartialEq)]
pub struct Poly {
  coeffs: Vec<Number>,
}

fn all_exact(values: &[Number]) -> bool {
  values.iter().all(|n| n.is_exact())
}

impl Poly {
  pub fn new(mut coeffs: Vec<Number>) -> Self {
    while coeffs.last().is_some_and(|c| c.is_zero()) {
      coeffs.pop();
    }
    Poly { coeffs }
  }

  /// `None` unless every coefficient is an exact number.
  pub fn from_expr(expr: &Expr, var: Symbol) -> Option<Self> {
    let coeffs = coefficients(expr, var)?
      .iter()
      .map(|c| c.as_number().filter(|n| n.is_exact()))
      .collect::<Option<Vec<_>>>()?;
    Some(Poly::new(coeffs))
  }

  pub fn coeffs(&self) -> &[Number] {
    &self.coeffs
  }

  pub fn degree(&self) -> usize {
    self.coeffs.len().saturating_sub(1)
  }

  pub fn is_zero(&self) -> bool {
    self.coeffs.is_empty()
  }

  pub fn leading(&self) -> Number {
    self.coeffs.last().copied().unwrap_or(Number::Integer(0))
  }

  pub fn to_expr(&self, var: Symbol) -> Expr {
    plus(
      self
        .coeffs
        .iter()
        .enumerate()
        .map(|(i, c)| {
          times(vec![
            Expr::from(*c),
            power(Expr::Symbol(var), Expr::Integer(i as i128)),
          ])
        })
        .collect(),
    )
  }

  /// Horner evaluation.
  pub fn eval(&self, x: Number) -> Number {
    self
      .coeffs
      .iter()
      .rev()
      .fold(Number::Integer(0), |acc, c| acc * x + *c)
  }

  pub fn div_rem(&self, divisor: &Poly) -> Option<(Poly, Poly)> {
    if divisor.is_zero() {
      return None;
    }
    if self.is_zero() || self.degree() < divisor.degree() {
      return Some((Poly::new(Vec::new()), self.clone()));
    }
    let dd = divisor.degree();
    let lead = divisor.leading();
    let mut rem = self.coeffs.clone();
    let mut quot = vec![Number::Integer(0); self.degree() - dd + 1];
    for k in (0..quot.len()).rev() {
      let c = rem[k + dd].checked_div(lead)?;
      quot[k] = c;
      for (j, d) in divisor.coeffs.iter().enumerate() {
        rem[k + j] = rem[k + j] - c * *d;
      }
    }
    rem.truncate(dd);
    if !all_exact(&quot) || !all_exact(&rem) {
      return None;
    }
    Some((Poly::new(quot), Poly::new(rem)))
  }

  /// Monic greatest common divisor.
  pub fn gcd(&self, other: &Poly) -> Option<Poly> {
    let (mut a, mut b) = (self.clone(), other.clone());
    while !b.is_zero() {
      let (_, r) = a.div_rem(&b)?;
      a = b;
      b = r;
    }
    let lead = a.leading();
    let monic = a
      .coeffs
      .iter()
      .map(|c| c.checked_div(lead))
      .collect::<Option<Vec<_>>>()?;
    Some(Poly::new(monic))
  }

  /// Divide out `(var - root)`.
  fn deflate(&self, root: Number) -> Option<Poly> {
    let linear = Poly::new(vec![-root, Number::Integer(1)]);
    self.div_rem(&linear).map(|(q, _)| q)
  }

  /// Integer multiple with coprime integer coefficients.
  fn integer_coefficients(&self) -> Option<Vec<i128>> {
    let mut lcm: i128 = 1;
    for c in &self.coeffs {
      let (_, d) = c.as_ratio()?;
      lcm = lcm.checked_mul(d / gcd_i128(lcm, d).max(1))?;
    }
    self
      .coeffs
      .iter()
      .map(|c| match *c * Number::Integer(lcm) {
        Number::Integer(n) => Some(n),
        _ => None,
      })
      .collect()
  }

  /// Rational roots with multiplicity, and the polynomial left after
  /// dividing them out.
  pub fn rational_roots(&self) -> (Vec<Number>, Poly) {
    let mut roots = Vec::new();
    let mut poly = self.clone();
    while poly.degree() > 0 && poly.coeffs[0].is_zero() {
      roots.push(Number::Integer(0));
      poly = Poly::new(poly.coeffs[1..].to_vec());
    }
    if poly.degree() == 0 {
      return (roots, poly);
    }
    let Some(ints) = poly.integer_coefficients() else {
      return (roots, poly);
    };
    let (a0, an) = (ints[0], ints[ints.len() - 1]);
    if a0.abs() > MAX_DIVISOR_SEARCH || an.abs() > MAX_DIVISOR_SEARCH {
      return (roots, poly);
    }

    let mut candidates: Vec<Number> = Vec::new();
    for p in divisors(a0) {
      for q in divisors(an) {
        for sign in [1, -1] {
          if let Some(c) = Number::rational(sign * p, q)
            && !candidates.contains(&c)
          {
            candidates.push(c);
          }
        }
      }
    }
    for candidate in candidates {
      while poly.degree() > 0 && poly.eval(candidate).is_zero() {
        match poly.deflate(candidate) {
          Some(next) => {
            roots.push(candidate);
            poly = next;
          }
          None => break,
        }
      }
    }
    (roots, poly)
  }
}

fn divisors(n: i128) -> Vec<i128> {
  let n = n.abs();
  let mut out = Vec::new();
  let mut d = 1;
  while d * d <= n {
    if n % d == 0 {
      out.push(d);
      if d != n / d {
        out.push(n / d);
      }
    }
    d += 1;
  }
  out
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::parser::parse_expression;

  fn x() -> Symbol {
    Symbol::from_name("x").unwrap()
  }

  fn poly(input: &str) -> Poly {
    Poly::from_expr(&parse_expression(input).unwrap(), x()).unwrap()
  }

  #[test]
  fn extracts_symbolic_coefficients() {
    let expr = parse_expression("a*x^2 + b*x + c").unwrap();
    let coeffs = coefficients(&expr, x()).unwrap();
    let rendered: Vec<String> = coeffs.iter().map(|c| c.to_string()).collect();
    assert_eq!(rendered, vec!["c", "b", "a"]);
  }

  #[test]
  fn non_polynomials_have_no_coefficients() {
    let expr = parse_expression("sin(x) + 1").unwrap();
    assert!(coefficients(&expr, x()).is_none());
  }

  #[test]
  fn gcd_is_monic() {
    let g = poly("2*x^2 - 2").gcd(&poly("x - 1")).unwrap();
    assert_eq!(g.to_expr(x()).to_string(), "x - 1");
  }

  #[test]
  fn finds_rational_roots_with_multiplicity() {
    let (roots, rest) = poly("x^3 - 3*x^2 + 3*x - 1").rational_roots();
    assert_eq!(roots, vec![Number::Integer(1); 3]);
    assert_eq!(rest.degree(), 0);

    let (roots, rest) = poly("2*x^3 - x^2 - 4*x + 2").rational_roots();
    assert_eq!(roots, vec![Number::Rational(1, 2)]);
    assert_eq!(rest.to_expr(x()).to_string(), "2*x**2 - 4");
  }
}
