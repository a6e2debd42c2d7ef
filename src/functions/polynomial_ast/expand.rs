use crate::functions::math_ast::{apply_function, canonical, plus, power, times};
use crate::syntax::Expr;

// ─── Expand ─────────────────────────────────────────────────────────

/// Integer powers of sums above this exponent are left unexpanded.
pub const MAX_EXPANSION_EXPONENT: i128 = 32;

/// A single distribution step never produces more terms than this.
const MAX_EXPANDED_TERMS: usize = 4096;

/// Expand products and positive integer powers of sums, then combine like
/// terms.
pub fn expand(expr: &Expr) -> Expr {
  expand_expr(&canonical(expr))
}

fn expand_expr(expr: &Expr) -> Expr {
  match expr {
    Expr::Plus(terms) => plus(terms.iter().map(expand_expr).collect()),
    Expr::Times(factors) => factors
      .iter()
      .map(expand_expr)
      .fold(Expr::Integer(1), |acc, f| distribute_product(&acc, &f)),
    Expr::Power(base, exp) => {
      let base = expand_expr(base);
      match **exp {
        Expr::Integer(n)
          if is_sum(&base) && (2..=MAX_EXPANSION_EXPONENT).contains(&n) =>
        {
          expand_power(&base, n)
        }
        _ => power(base, (**exp).clone()),
      }
    }
    Expr::FunctionCall { func, arg } => apply_function(*func, expand_expr(arg)),
    Expr::Equation { lhs, rhs } => Expr::Equation {
      lhs: Box::new(expand_expr(lhs)),
      rhs: Box::new(expand_expr(rhs)),
    },
    Expr::UnaryOp { .. } | Expr::BinaryOp { .. } => expand(expr),
    _ => expr.clone(),
  }
}

/// Check if an expression is a sum (Plus).
pub fn is_sum(expr: &Expr) -> bool {
  matches!(expr, Expr::Plus(_))
}

/// The terms of a sum, or the expression itself.
pub fn additive_terms(expr: &Expr) -> Vec<Expr> {
  match expr {
    Expr::Plus(terms) => terms.clone(),
    other => vec![other.clone()],
  }
}

/// The factors of a product, or the expression itself.
pub fn multiplicative_factors(expr: &Expr) -> Vec<Expr> {
  match expr {
    Expr::Times(factors) => factors.clone(),
    other => vec![other.clone()],
  }
}

/// Distribute the product of two expanded expressions.
/// If either is a sum, produce all cross-products.
pub fn distribute_product(left: &Expr, right: &Expr) -> Expr {
  let left_terms = additive_terms(left);
  let right_terms = additive_terms(right);
  if left_terms.len() * right_terms.len() > MAX_EXPANDED_TERMS {
    return times(vec![left.clone(), right.clone()]);
  }

  let mut result_terms = Vec::with_capacity(left_terms.len() * right_terms.len());
  for l in &left_terms {
    for r in &right_terms {
      result_terms.push(times(vec![l.clone(), r.clone()]));
    }
  }
  plus(result_terms)
}

/// Expand (sum)^n by repeated distribution.
pub fn expand_power(base: &Expr, n: i128) -> Expr {
  let width = additive_terms(base).len();
  let mut result = base.clone();
  for _ in 1..n {
    if additive_terms(&result).len() * width > MAX_EXPANDED_TERMS {
      return power(base.clone(), Expr::Integer(n));
    }
    result = distribute_product(&result, base);
  }
  result
}
