//! Symbolic differentiation and indefinite integration.
//!
//! Both work on canonical expressions and return canonical expressions.
//! Antiderivatives carry no integration constant.

use tracing::debug;

use crate::functions::math_ast::{
  apply_function, canonical, div, negate, plus, power, sub, times,
};
use crate::functions::polynomial_ast::expand::expand;
use crate::syntax::{Expr, Function, Symbol};

/// Nesting limit for the recursive integration strategies.
const MAX_INTEGRATION_DEPTH: u8 = 8;

/// Check if expression is constant with respect to a variable
pub fn is_constant_wrt(expr: &Expr, var: Symbol) -> bool {
  !expr.contains_symbol(var)
}

// ─── Differentiation ────────────────────────────────────────────────

pub fn differentiate(expr: &Expr, var: Symbol) -> Expr {
  if is_constant_wrt(expr, var) {
    return Expr::Integer(0);
  }
  match expr {
    Expr::Symbol(_) => Expr::Integer(1),
    Expr::Plus(terms) => {
      plus(terms.iter().map(|t| differentiate(t, var)).collect())
    }
    Expr::Times(factors) => {
      // Product rule: sum over each factor differentiated in turn.
      let terms = (0..factors.len())
        .filter(|&i| !is_constant_wrt(&factors[i], var))
        .map(|i| {
          let mut replaced = factors.clone();
          replaced[i] = differentiate(&factors[i], var);
          times(replaced)
        })
        .collect();
      plus(terms)
    }
    Expr::Power(base, exp) => {
      let (base, exp) = (&**base, &**exp);
      if is_constant_wrt(exp, var) {
        times(vec![
          exp.clone(),
          power(base.clone(), sub(exp.clone(), Expr::Integer(1))),
          differentiate(base, var),
        ])
      } else if is_constant_wrt(base, var) {
        times(vec![
          expr.clone(),
          apply_function(Function::Log, base.clone()),
          differentiate(exp, var),
        ])
      } else {
        // d(b^e) = b^e * (e' log(b) + e b'/b)
        let log_base = apply_function(Function::Log, base.clone());
        times(vec![
          expr.clone(),
          plus(vec![
            times(vec![differentiate(exp, var), log_base]),
            times(vec![
              exp.clone(),
              differentiate(base, var),
              power(base.clone(), Expr::Integer(-1)),
            ]),
          ]),
        ])
      }
    }
    Expr::FunctionCall { func, arg } => times(vec![
      outer_derivative(*func, arg),
      differentiate(arg, var),
    ]),
    Expr::Integral {
      integrand,
      var: bound,
    } if *bound == var => (**integrand).clone(),
    Expr::UnaryOp { .. } | Expr::BinaryOp { .. } => {
      differentiate(&canonical(expr), var)
    }
    _ => Expr::Integer(0),
  }
}

fn square(expr: Expr) -> Expr {
  power(expr, Expr::Integer(2))
}

fn one_minus_square(u: &Expr) -> Expr {
  sub(Expr::Integer(1), square(u.clone()))
}

/// Derivative of `func` evaluated at `u`, before the chain rule factor.
fn outer_derivative(func: Function, u: &Expr) -> Expr {
  let call = |f: Function| apply_function(f, u.clone());
  match func {
    Function::Sin => call(Function::Cos),
    Function::Cos => negate(call(Function::Sin)),
    Function::Tan => plus(vec![square(call(Function::Tan)), Expr::Integer(1)]),
    Function::Cot => {
      negate(plus(vec![square(call(Function::Cot)), Expr::Integer(1)]))
    }
    Function::Sec => times(vec![call(Function::Tan), call(Function::Sec)]),
    Function::Csc => {
      negate(times(vec![call(Function::Cot), call(Function::Csc)]))
    }
    Function::Asin => power(one_minus_square(u), Expr::Rational(-1, 2)),
    Function::Acos => {
      negate(power(one_minus_square(u), Expr::Rational(-1, 2)))
    }
    Function::Atan => power(
      plus(vec![square(u.clone()), Expr::Integer(1)]),
      Expr::Integer(-1),
    ),
    Function::Sinh => call(Function::Cosh),
    Function::Cosh => call(Function::Sinh),
    Function::Tanh => sub(Expr::Integer(1), square(call(Function::Tanh))),
    Function::Exp => call(Function::Exp),
    Function::Log => power(u.clone(), Expr::Integer(-1)),
    Function::Sqrt => times(vec![
      Expr::Rational(1, 2),
      power(u.clone(), Expr::Rational(-1, 2)),
    ]),
    Function::Abs => div(u.clone(), call(Function::Abs)),
  }
}

// ─── Integration ────────────────────────────────────────────────────

/// Indefinite integral; an unevaluated `Integral` when no rule applies.
pub fn integrate(expr: &Expr, var: Symbol) -> Expr {
  let expr = canonical(expr);
  match antiderivative(&expr, var, 0) {
    Some(result) => result,
    None => {
      debug!(%expr, %var, "no antiderivative found");
      Expr::Integral {
        integrand: Box::new(expr),
        var,
      }
    }
  }
}

/// `(a, c)` with `expr = a*var + c`, `a` nonzero and both free of `var`.
fn linear_parts(expr: &Expr, var: Symbol) -> Option<(Expr, Expr)> {
  let slope = differentiate(expr, var);
  if slope.is_zero() || !is_constant_wrt(&slope, var) {
    return None;
  }
  let offset = sub(expr.clone(), times(vec![slope.clone(), Expr::Symbol(var)]));
  is_constant_wrt(&offset, var).then_some((slope, offset))
}

fn is_polynomial_in(expr: &Expr, var: Symbol) -> bool {
  match expr {
    _ if is_constant_wrt(expr, var) => true,
    Expr::Symbol(_) => true,
    Expr::Plus(items) | Expr::Times(items) => {
      items.iter().all(|item| is_polynomial_in(item, var))
    }
    Expr::Power(base, exp) => {
      matches!(**exp, Expr::Integer(n) if n >= 0) && is_polynomial_in(base, var)
    }
    _ => false,
  }
}

fn antiderivative(expr: &Expr, var: Symbol, depth: u8) -> Option<Expr> {
  if depth > MAX_INTEGRATION_DEPTH {
    return None;
  }
  let x = Expr::Symbol(var);
  if is_constant_wrt(expr, var) {
    return Some(times(vec![expr.clone(), x]));
  }
  match expr {
    Expr::Symbol(_) => Some(times(vec![Expr::Rational(1, 2), square(x)])),
    Expr::Plus(terms) => {
      let parts = terms
        .iter()
        .map(|t| antiderivative(t, var, depth + 1))
        .collect::<Option<Vec<_>>>()?;
      Some(plus(parts))
    }
    Expr::Times(factors) => integrate_product(factors, var, depth),
    Expr::Power(base, exp) => integrate_power(base, exp, var, depth),
    Expr::FunctionCall { func, arg } => integrate_function(*func, arg, var),
    _ => None,
  }
}

fn integrate_product(
  factors: &[Expr],
  var: Symbol,
  depth: u8,
) -> Option<Expr> {
  let (constant, varying): (Vec<Expr>, Vec<Expr>) = factors
    .iter()
    .cloned()
    .partition(|f| is_constant_wrt(f, var));
  if !constant.is_empty() {
    let inner = antiderivative(&times(varying), var, depth + 1)?;
    return Some(times(vec![times(constant), inner]));
  }

  if let Some(result) = integrate_by_parts(&varying, var, depth) {
    return Some(result);
  }

  let product = Expr::Times(varying);
  let expanded = expand(&product);
  if expanded != product {
    return antiderivative(&expanded, var, depth + 1);
  }
  None
}

/// Functions whose repeated antiderivatives stay in the same family.
fn is_cyclic_factor(expr: &Expr, var: Symbol) -> bool {
  match expr {
    Expr::FunctionCall { func, arg } => {
      matches!(
        func,
        Function::Sin | Function::Cos | Function::Sinh | Function::Cosh
      ) && linear_parts(arg, var).is_some()
    }
    Expr::Power(base, exp) => {
      is_constant_wrt(base, var) && linear_parts(exp, var).is_some()
    }
    _ => false,
  }
}

/// Integration by parts for polynomial × {trig, hyperbolic, exponential}
/// and polynomial × log.
fn integrate_by_parts(
  factors: &[Expr],
  var: Symbol,
  depth: u8,
) -> Option<Expr> {
  let (poly, other): (Vec<Expr>, Vec<Expr>) = factors
    .iter()
    .cloned()
    .partition(|f| is_polynomial_in(f, var));
  if poly.is_empty() || other.len() != 1 {
    return None;
  }
  let p = times(poly);
  let g = &other[0];

  if is_cyclic_factor(g, var) {
    // ∫ p g = p G - ∫ p' G
    let g_int = antiderivative(g, var, depth + 1)?;
    let dp = differentiate(&p, var);
    let rest = antiderivative(&times(vec![dp, g_int.clone()]), var, depth + 1)?;
    return Some(sub(times(vec![p, g_int]), rest));
  }

  if let Expr::FunctionCall {
    func: Function::Log,
    arg,
  } = g
    && linear_parts(arg, var).is_some()
  {
    // ∫ p log(u) = P log(u) - ∫ P u'/u
    let p_int = antiderivative(&expand(&p), var, depth + 1)?;
    let quotient =
      times(vec![p_int.clone(), differentiate(arg, var), power((**arg).clone(), Expr::Integer(-1))]);
    let rest = antiderivative(&expand(&quotient), var, depth + 1)?;
    return Some(sub(times(vec![p_int, g.clone()]), rest));
  }
  None
}

fn integrate_power(
  base: &Expr,
  exp: &Expr,
  var: Symbol,
  depth: u8,
) -> Option<Expr> {
  if is_constant_wrt(exp, var) {
    if let Some((slope, _)) = linear_parts(base, var) {
      if matches!(exp, Expr::Integer(-1)) {
        return Some(div(apply_function(Function::Log, base.clone()), slope));
      }
      let raised = plus(vec![exp.clone(), Expr::Integer(1)]);
      return Some(div(
        power(base.clone(), raised.clone()),
        times(vec![raised, slope]),
      ));
    }
    if matches!(exp, Expr::Integer(2))
      && let Some(result) = integrate_trig_squared(base, var)
    {
      return Some(result);
    }
    if matches!(exp, Expr::Integer(n) if *n > 1) {
      let expanded = expand(&Expr::Power(
        Box::new(base.clone()),
        Box::new(exp.clone()),
      ));
      if !matches!(expanded, Expr::Power(..)) {
        return antiderivative(&expanded, var, depth + 1);
      }
    }
    return None;
  }

  if is_constant_wrt(base, var) {
    // ∫ b^(a x + c) = b^(a x + c) / (a log b)
    let (slope, _) = linear_parts(exp, var)?;
    let whole = power(base.clone(), exp.clone());
    let scale = times(vec![slope, apply_function(Function::Log, base.clone())]);
    return Some(div(whole, scale));
  }
  None
}

/// sin(u)^2 and cos(u)^2 through the half-angle identities.
fn integrate_trig_squared(base: &Expr, var: Symbol) -> Option<Expr> {
  let Expr::FunctionCall { func, arg } = base else {
    return None;
  };
  let (slope, _) = linear_parts(arg, var)?;
  let half = times(vec![Expr::Rational(1, 2), Expr::Symbol(var)]);
  let double = apply_function(
    Function::Sin,
    times(vec![Expr::Integer(2), (**arg).clone()]),
  );
  let correction = div(double, times(vec![Expr::Integer(4), slope]));
  match func {
    Function::Sin => Some(sub(half, correction)),
    Function::Cos => Some(plus(vec![half, correction])),
    _ => None,
  }
}

fn integrate_function(func: Function, u: &Expr, var: Symbol) -> Option<Expr> {
  let (slope, _) = linear_parts(u, var)?;
  let call = |f: Function| apply_function(f, u.clone());
  let log = |e: Expr| apply_function(Function::Log, e);
  let root = || power(one_minus_square(u), Expr::Rational(1, 2));
  let primitive = match func {
    Function::Sin => negate(call(Function::Cos)),
    Function::Cos => call(Function::Sin),
    Function::Tan => negate(log(call(Function::Cos))),
    Function::Cot => log(call(Function::Sin)),
    Function::Sinh => call(Function::Cosh),
    Function::Cosh => call(Function::Sinh),
    Function::Tanh => log(call(Function::Cosh)),
    Function::Exp => call(Function::Exp),
    Function::Log => sub(times(vec![u.clone(), call(Function::Log)]), u.clone()),
    Function::Atan => sub(
      times(vec![u.clone(), call(Function::Atan)]),
      times(vec![
        Expr::Rational(1, 2),
        log(plus(vec![square(u.clone()), Expr::Integer(1)])),
      ]),
    ),
    Function::Asin => {
      plus(vec![times(vec![u.clone(), call(Function::Asin)]), root()])
    }
    Function::Acos => {
      sub(times(vec![u.clone(), call(Function::Acos)]), root())
    }
    Function::Sec | Function::Csc | Function::Sqrt | Function::Abs => {
      return None;
    }
  };
  Some(div(primitive, slope))
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::parser::parse_expression;

  fn x() -> Symbol {
    Symbol::from_name("x").unwrap()
  }

  fn d(input: &str) -> String {
    let expr = canonical(&parse_expression(input).unwrap());
    differentiate(&expr, x()).to_string()
  }

  fn int(input: &str) -> String {
    integrate(&parse_expression(input).unwrap(), x()).to_string()
  }

  #[test]
  fn polynomial_derivatives() {
    assert_eq!(d("x**3 + 2*x"), "3*x**2 + 2");
    assert_eq!(d("5"), "0");
    assert_eq!(d("x*y"), "y");
  }

  #[test]
  fn chain_rule() {
    assert_eq!(d("sin(2*x)"), "2*cos(2*x)");
    assert_eq!(d("exp(x)"), "exp(x)");
    assert_eq!(d("log(x)"), "1/x");
    assert_eq!(d("tan(x)"), "tan(x)**2 + 1");
  }

  #[test]
  fn product_rule() {
    assert_eq!(d("x*sin(x)"), "x*cos(x) + sin(x)");
  }

  #[test]
  fn power_rule_integrals() {
    assert_eq!(int("x^2"), "x**3/3");
    assert_eq!(int("1/x"), "log(x)");
    assert_eq!(int("3"), "3*x");
  }

  #[test]
  fn integration_by_parts() {
    assert_eq!(int("x*sin(x)"), "-x*cos(x) + sin(x)");
    assert_eq!(int("log(x)"), "x*log(x) - x");
  }

  #[test]
  fn linear_arguments() {
    assert_eq!(int("cos(2*x)"), "sin(2*x)/2");
    assert_eq!(int("exp(x)"), "exp(x)");
  }

  #[test]
  fn trig_squares() {
    assert_eq!(int("sin(x)^2"), "x/2 - sin(2*x)/4");
  }

  #[test]
  fn unknown_integrand_stays_unevaluated() {
    assert_eq!(int("exp(x^2)"), "Integral(exp(x**2), x)");
  }
}
