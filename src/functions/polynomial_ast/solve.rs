use std::fmt;

use tracing::debug;

use crate::functions::calculus_ast::is_constant_wrt;
use crate::functions::math_ast::{
  apply_function, canonical, div, negate, numeric_value, plus, power,
  simplify_sqrt_parts, split_coeff, sub, times,
};
use crate::syntax::{Constant, Expr, Function, Number, Symbol, gcd_i128};

use super::expand::{additive_terms, expand, multiplicative_factors};
use super::simplify::{numer_denom, simplify};
use super::univariate::{Poly, coefficients};

// ─── Solve ──────────────────────────────────────────────────────────

/// How many function layers isolation peels off before giving up.
const MAX_ISOLATION_DEPTH: u8 = 4;

/// Residual below which a numerically checked root is accepted.
const ROOT_TOLERANCE: f64 = 1e-9;

#[derive(Debug, Clone, PartialEq)]
pub enum Solutions {
  /// Roots of an equation in a single unknown.
  Roots(Vec<Expr>),
  /// Values of one unknown, expressed through the others.
  Assignments(Vec<(Symbol, Expr)>),
}

impl Solutions {
  pub fn is_empty(&self) -> bool {
    match self {
      Solutions::Roots(roots) => roots.is_empty(),
      Solutions::Assignments(assignments) => assignments.is_empty(),
    }
  }
}

impl fmt::Display for Solutions {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let items: Vec<String> = match self {
      Solutions::Roots(roots) => roots.iter().map(|r| r.to_string()).collect(),
      Solutions::Assignments(assignments) => assignments
        .iter()
        .map(|(var, value)| format!("{{{var}: {value}}}"))
        .collect(),
    };
    write!(f, "[{}]", items.join(", "))
  }
}

/// Solve an equation, or an expression set equal to zero, for its free
/// symbols.
///
/// With several unknowns every factor of the numerator is a branch of its
/// own, solved for its first isolable symbol in scan order.
pub fn solve(expr: &Expr) -> Solutions {
  let zero_form = match expr {
    Expr::Equation { lhs, rhs } => sub(canonical(lhs), canonical(rhs)),
    other => canonical(other),
  };
  let symbols = zero_form.free_symbols();
  debug!(expr = %zero_form, unknowns = symbols.len(), "solving");

  match symbols.as_slice() {
    [] => Solutions::Roots(Vec::new()),
    &[var] => Solutions::Roots(solve_for(&zero_form, var).unwrap_or_default()),
    _ => Solutions::Assignments(solve_branches(&zero_form)),
  }
}

/// Union of the assignments of each numerator factor.
fn solve_branches(zero_form: &Expr) -> Vec<(Symbol, Expr)> {
  let (numer, denom) = numer_denom(zero_form);
  let mut assignments: Vec<(Symbol, Expr)> = Vec::new();
  for factor in multiplicative_factors(&numer) {
    for var in factor.free_symbols() {
      let roots: Vec<Expr> = solve_for(&factor, var)
        .unwrap_or_default()
        .into_iter()
        .filter(|root| !is_pole(&denom, var, root))
        .collect();
      if roots.is_empty() {
        continue;
      }
      for root in roots {
        if !assignments.iter().any(|(v, r)| *v == var && *r == root) {
          assignments.push((var, root));
        }
      }
      break;
    }
  }
  assignments
}

/// Roots of `expr = 0` in `var`, deduplicated and in ascending order when
/// they are all real numbers. `None` when no strategy applies.
pub fn solve_for(expr: &Expr, var: Symbol) -> Option<Vec<Expr>> {
  let mut roots = solve_depth(expr, var, 0)?;
  let mut unique: Vec<Expr> = Vec::with_capacity(roots.len());
  for root in roots.drain(..) {
    if !unique.contains(&root) {
      unique.push(root);
    }
  }
  let values: Option<Vec<f64>> = unique.iter().map(numeric_value).collect();
  if let Some(values) = values {
    let mut keyed: Vec<(f64, Expr)> = values.into_iter().zip(unique).collect();
    keyed.sort_by(|a, b| a.0.total_cmp(&b.0));
    return Some(keyed.into_iter().map(|(_, r)| r).collect());
  }
  Some(unique)
}

fn solve_depth(expr: &Expr, var: Symbol, depth: u8) -> Option<Vec<Expr>> {
  if depth > MAX_ISOLATION_DEPTH {
    return None;
  }
  let expr = canonical(expr);
  if is_constant_wrt(&expr, var) {
    return Some(Vec::new());
  }

  let (numer, denom) = numer_denom(&expr);
  if !is_constant_wrt(&denom, var) {
    let roots = solve_depth(&numer, var, depth + 1)?;
    return Some(
      roots
        .into_iter()
        .filter(|root| !is_pole(&denom, var, root))
        .collect(),
    );
  }

  if let Some(roots) = solve_polynomial(&numer, var) {
    return Some(roots);
  }
  let roots = isolate(&numer, var, depth)?;
  Some(
    roots
      .into_iter()
      .filter(|root| satisfies(&numer, var, root))
      .collect(),
  )
}

fn is_pole(denom: &Expr, var: Symbol, root: &Expr) -> bool {
  let value = simplify(&denom.substitute(var, root));
  value.is_zero() || matches!(value, Expr::Constant(Constant::ComplexInfinity))
}

/// Plug a candidate back in; symbolic residuals are given the benefit of
/// the doubt.
fn satisfies(expr: &Expr, var: Symbol, root: &Expr) -> bool {
  let residual = simplify(&expr.substitute(var, root));
  if residual.is_zero() {
    return true;
  }
  match numeric_value(&residual) {
    Some(value) => value.abs() < ROOT_TOLERANCE,
    None => !residual.is_number(),
  }
}

fn solve_polynomial(expr: &Expr, var: Symbol) -> Option<Vec<Expr>> {
  if let Some(poly) = Poly::from_expr(expr, var) {
    if poly.degree() == 0 {
      return Some(Vec::new());
    }
    let (roots, rest) = poly.rational_roots();
    let mut out: Vec<Expr> = roots.into_iter().map(Expr::from).collect();
    match rest.degree() {
      0 => {}
      1 | 2 => out.extend(formula_roots(
        rest.coeffs().iter().map(|c| Expr::from(*c)).collect(),
      )),
      _ => return None,
    }
    return Some(out);
  }

  let coeffs = coefficients(expr, var)?;
  match coeffs.len() {
    2 | 3 => Some(formula_roots(coeffs)),
    _ => None,
  }
}

/// Linear and quadratic formulas over coefficients listed lowest degree
/// first.
fn formula_roots(coeffs: Vec<Expr>) -> Vec<Expr> {
  match coeffs.as_slice() {
    [c0, c1] => vec![expand(&div(negate(c0.clone()), c1.clone()))],
    [c, b, a] => {
      let discriminant = expand(&sub(
        power(b.clone(), Expr::Integer(2)),
        times(vec![Expr::Integer(4), a.clone(), c.clone()]),
      ));
      let two_a = times(vec![Expr::Integer(2), a.clone()]);
      if discriminant.is_zero() {
        return vec![expand(&div(negate(b.clone()), two_a))];
      }
      let root = square_root(discriminant);
      let minus_b = negate(b.clone());
      vec![
        expand(&div(sub(minus_b.clone(), root.clone()), two_a.clone())),
        expand(&div(plus(vec![minus_b, root]), two_a)),
      ]
    }
    _ => Vec::new(),
  }
}

/// `sqrt(d)` with the square part of the integer content of a symbolic `d`
/// moved outside the root.
fn square_root(d: Expr) -> Expr {
  let half = || Expr::Rational(1, 2);
  if d.is_number() {
    return power(d, half());
  }
  let terms = additive_terms(&d);
  let mut content = 0;
  for term in &terms {
    let coeff = term.as_number().unwrap_or_else(|| split_coeff(term).0);
    let Number::Integer(n) = coeff else {
      return power(d, half());
    };
    content = gcd_i128(content, n);
  }
  let (outside, _) = simplify_sqrt_parts(content);
  if outside <= 1 {
    return power(d, half());
  }
  let square = Expr::Integer(outside * outside);
  let rest =
    plus(terms.into_iter().map(|t| div(t, square.clone())).collect());
  times(vec![Expr::Integer(outside), power(rest, half())])
}

/// Split `expr` into the single term that depends on `var` and the value
/// it must take.
fn isolate_term(expr: &Expr, var: Symbol) -> Option<(Expr, Expr)> {
  let (dependent, constant): (Vec<Expr>, Vec<Expr>) = additive_terms(expr)
    .into_iter()
    .partition(|t| !is_constant_wrt(t, var));
  let [term] = dependent.as_slice() else {
    return None;
  };
  Some((term.clone(), negate(plus(constant))))
}

fn isolate(expr: &Expr, var: Symbol, depth: u8) -> Option<Vec<Expr>> {
  let (term, target) = isolate_term(expr, var)?;

  let (dependent, constant): (Vec<Expr>, Vec<Expr>) =
    multiplicative_factors(&term)
      .into_iter()
      .partition(|f| !is_constant_wrt(f, var));
  if dependent.len() > 1 {
    if !target.is_zero() {
      return None;
    }
    // A product vanishes where any factor does.
    let mut roots = Vec::new();
    for factor in &dependent {
      roots.extend(solve_depth(factor, var, depth + 1)?);
    }
    return Some(roots);
  }
  let inner = dependent.into_iter().next()?;
  let target = canonical(&div(target, times(constant)));

  let mut roots = Vec::new();
  for (arg, value) in invert(&inner, &target, var)? {
    roots.extend(solve_depth(&sub(arg, value), var, depth + 1)?);
  }
  Some(roots)
}

fn outside_unit_interval(value: &Expr) -> bool {
  numeric_value(value).is_some_and(|v| v.abs() > 1.0)
}

/// Equations `arg = value` equivalent to `f = target`.
fn invert(f: &Expr, target: &Expr, var: Symbol) -> Option<Vec<(Expr, Expr)>> {
  let pi = || Expr::Constant(Constant::Pi);
  match f {
    Expr::Power(base, exp) if is_constant_wrt(exp, var) => {
      let base = (**base).clone();
      match **exp {
        Expr::Rational(1, 2) => {
          Some(vec![(base, power(target.clone(), Expr::Integer(2)))])
        }
        Expr::Integer(-1) => {
          if target.is_zero() {
            return Some(Vec::new());
          }
          Some(vec![(base, power(target.clone(), Expr::Integer(-1)))])
        }
        Expr::Integer(2) => {
          let root = power(target.clone(), Expr::Rational(1, 2));
          Some(vec![(base.clone(), negate(root.clone())), (base, root)])
        }
        Expr::Integer(n) if n % 2 != 0 => {
          let inverse = Number::rational(1, n)?;
          Some(vec![(base, power(target.clone(), Expr::from(inverse)))])
        }
        _ => None,
      }
    }
    Expr::Power(base, exp) if is_constant_wrt(base, var) => {
      if target.is_zero() {
        return Some(Vec::new());
      }
      let log_target = apply_function(Function::Log, target.clone());
      let value = match **base {
        Expr::Constant(Constant::E) => log_target,
        _ => div(log_target, apply_function(Function::Log, (**base).clone())),
      };
      Some(vec![((**exp).clone(), value)])
    }
    Expr::FunctionCall { func, arg } => {
      let arg = (**arg).clone();
      let call = |f: Function| apply_function(f, target.clone());
      match func {
        Function::Log => Some(vec![(arg, call(Function::Exp))]),
        Function::Exp => Some(vec![(arg, call(Function::Log))]),
        Function::Sqrt => {
          Some(vec![(arg, power(target.clone(), Expr::Integer(2)))])
        }
        Function::Sin if outside_unit_interval(target) => Some(Vec::new()),
        Function::Sin => {
          let principal = call(Function::Asin);
          Some(vec![
            (arg.clone(), principal.clone()),
            (arg, sub(pi(), principal)),
          ])
        }
        Function::Cos if outside_unit_interval(target) => Some(Vec::new()),
        Function::Cos => {
          let principal = call(Function::Acos);
          Some(vec![
            (arg.clone(), principal.clone()),
            (arg, sub(times(vec![Expr::Integer(2), pi()]), principal)),
          ])
        }
        Function::Tan => Some(vec![(arg, call(Function::Atan))]),
        _ => None,
      }
    }
    _ => None,
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::parser::parse_expression;

  fn solved(input: &str) -> String {
    solve(&parse_expression(input).unwrap()).to_string()
  }

  #[test]
  fn quadratic_with_integer_roots() {
    assert_eq!(solved("x^2 - 4 = 0"), "[-2, 2]");
    assert_eq!(solved("x^2 = 4"), "[-2, 2]");
  }

  #[test]
  fn linear_equations() {
    assert_eq!(solved("2*x + 3 = 7"), "[2]");
    assert_eq!(solved("x/3 = 1"), "[3]");
  }

  #[test]
  fn irrational_and_complex_roots() {
    assert_eq!(solved("x^2 - 2"), "[-sqrt(2), sqrt(2)]");
    assert_eq!(solved("x^2 + 1 = 0"), "[-I, I]");
  }

  #[test]
  fn higher_degree_with_rational_roots() {
    assert_eq!(solved("x^3 - 6*x^2 + 11*x - 6 = 0"), "[1, 2, 3]");
  }

  #[test]
  fn poles_are_excluded() {
    assert_eq!(solved("(x^2 - 1)/(x - 1) = 0"), "[-1]");
  }

  #[test]
  fn isolates_through_functions() {
    assert_eq!(solved("exp(x) = 1"), "[0]");
    assert_eq!(solved("sin(x) = 0"), "[0, pi]");
    assert_eq!(solved("sqrt(x) = 3"), "[9]");
    assert_eq!(solved("sqrt(x) = -3"), "[]");
  }

  #[test]
  fn several_unknowns_give_assignments() {
    assert_eq!(solved("x + y = 3"), "[{x: -y + 3}]");
  }

  #[test]
  fn every_factor_is_a_branch() {
    assert_eq!(solved("x*y = 0"), "[{x: 0}, {y: 0}]");
    assert_eq!(solved("(x - 1)*(y + 2) = 0"), "[{x: 1}, {y: -2}]");
  }

  #[test]
  fn square_content_leaves_the_root() {
    assert_eq!(
      solved("x^2 + y^2 = 1"),
      "[{x: -sqrt(-y**2 + 1)}, {x: sqrt(-y**2 + 1)}]"
    );
  }

  #[test]
  fn contradictions_have_no_roots() {
    assert!(solve(&parse_expression("2 = 3").unwrap()).is_empty());
    assert!(solve(&parse_expression("x = x + 1").unwrap()).is_empty());
  }
}
