//! Canonical arithmetic over `Expr`.
//!
//! [`canonical`] rewrites a parsed operator tree into n-ary `Plus`/`Times`
//! and `Power` nodes: numbers are folded exactly, like terms collected,
//! equal bases merged and special function values resolved. [`evalf`] does
//! the same after replacing exact numbers and constants by floats.
//!
//! None of these functions fail. Division by zero produces `zoo` and
//! indeterminate forms produce `nan`.

use std::cmp::Ordering;

use crate::syntax::{
  BinaryOperator, Constant, Expr, Function, Number, UnaryOperator,
  is_negative_term,
};

const NAN: Expr = Expr::Constant(Constant::NaN);
const ZOO: Expr = Expr::Constant(Constant::ComplexInfinity);

/// Square-free factoring is only attempted below this bound.
const SQRT_FACTOR_LIMIT: i128 = 1_000_000_000_000;

pub fn canonical(expr: &Expr) -> Expr {
  match expr {
    Expr::Integer(_)
    | Expr::Rational(..)
    | Expr::Real(_)
    | Expr::Symbol(_)
    | Expr::Constant(_) => expr.clone(),
    Expr::UnaryOp { op, operand } => {
      let inner = canonical(operand);
      match op {
        UnaryOperator::Minus => negate(inner),
        UnaryOperator::Plus => inner,
      }
    }
    Expr::BinaryOp { op, left, right } => {
      let (l, r) = (canonical(left), canonical(right));
      match op {
        BinaryOperator::Plus => plus(vec![l, r]),
        BinaryOperator::Minus => sub(l, r),
        BinaryOperator::Times => times(vec![l, r]),
        BinaryOperator::Divide => div(l, r),
        BinaryOperator::Power => power(l, r),
      }
    }
    Expr::Plus(items) => plus(items.iter().map(canonical).collect()),
    Expr::Times(items) => times(items.iter().map(canonical).collect()),
    Expr::Power(base, exp) => power(canonical(base), canonical(exp)),
    Expr::FunctionCall { func, arg } => apply_function(*func, canonical(arg)),
    Expr::Integral { integrand, var } => Expr::Integral {
      integrand: Box::new(canonical(integrand)),
      var: *var,
    },
    Expr::Equation { lhs, rhs } => Expr::Equation {
      lhs: Box::new(canonical(lhs)),
      rhs: Box::new(canonical(rhs)),
    },
  }
}

pub fn negate(expr: Expr) -> Expr {
  times(vec![Expr::Integer(-1), expr])
}

pub fn sub(a: Expr, b: Expr) -> Expr {
  plus(vec![a, negate(b)])
}

pub fn div(a: Expr, b: Expr) -> Expr {
  times(vec![a, power(b, Expr::Integer(-1))])
}

fn is_nan(expr: &Expr) -> bool {
  matches!(expr, Expr::Constant(Constant::NaN))
}

fn is_zoo(expr: &Expr) -> bool {
  matches!(expr, Expr::Constant(Constant::ComplexInfinity))
}

// ─── Plus ───────────────────────────────────────────────────────────

/// Split `c*rest` into its numeric coefficient and the remaining factors.
pub fn split_coeff(expr: &Expr) -> (Number, Expr) {
  if let Expr::Times(factors) = expr
    && let Some(c) = factors.first().and_then(Expr::as_number)
  {
    let rest = &factors[1..];
    let rest = if rest.len() == 1 {
      rest[0].clone()
    } else {
      Expr::Times(rest.to_vec())
    };
    return (c, rest);
  }
  (Number::Integer(1), expr.clone())
}

/// Inverse of [`split_coeff`] for an already canonical `rest`.
fn with_coeff(coeff: Number, rest: Expr) -> Expr {
  if coeff.is_one() {
    return rest;
  }
  let mut factors = vec![Expr::from(coeff)];
  match rest {
    Expr::Times(inner) => factors.extend(inner),
    other => factors.push(other),
  }
  Expr::Times(factors)
}

/// Total degree in the free symbols, used for term ordering.
fn degree(expr: &Expr) -> f64 {
  match expr {
    Expr::Symbol(_) => 1.0,
    Expr::Power(base, exp) => {
      exp.as_number().map_or(0.0, |n| degree(base) * n.to_f64())
    }
    Expr::Times(factors) => factors.iter().map(degree).sum(),
    _ => 0.0,
  }
}

fn compare_terms(a: &Expr, b: &Expr) -> Ordering {
  degree(b)
    .partial_cmp(&degree(a))
    .unwrap_or(Ordering::Equal)
    .then_with(|| {
      let (_, ra) = split_coeff(a);
      let (_, rb) = split_coeff(b);
      rb.node_count()
        .cmp(&ra.node_count())
        .then_with(|| ra.to_string().cmp(&rb.to_string()))
    })
}

pub fn plus(terms: Vec<Expr>) -> Expr {
  let mut flat = Vec::with_capacity(terms.len());
  for term in terms {
    match term {
      Expr::Plus(inner) => flat.extend(inner),
      other => flat.push(other),
    }
  }

  if flat.iter().any(is_nan) {
    return NAN;
  }
  match flat.iter().filter(|t| is_zoo(t)).count() {
    0 => {}
    1 => return ZOO,
    _ => return NAN,
  }

  let mut number = Number::Integer(0);
  let mut collected: Vec<(Expr, Number)> = Vec::new();
  for term in flat {
    if let Some(n) = term.as_number() {
      number = number + n;
      continue;
    }
    let (coeff, rest) = split_coeff(&term);
    match collected.iter_mut().find(|(r, _)| *r == rest) {
      Some(slot) => slot.1 = slot.1 + coeff,
      None => collected.push((rest, coeff)),
    }
  }

  let mut out: Vec<Expr> = collected
    .into_iter()
    .filter(|(_, c)| !c.is_zero())
    .map(|(rest, c)| with_coeff(c, rest))
    .collect();
  out.sort_by(compare_terms);
  if !number.is_zero() {
    out.push(Expr::from(number));
  }

  match out.len() {
    0 => Expr::Integer(0),
    1 => out.remove(0),
    _ => Expr::Plus(out),
  }
}

// ─── Times ──────────────────────────────────────────────────────────

fn factor_rank(factor: &Expr) -> u8 {
  match factor {
    Expr::Power(base, _) if base.is_number() => 0,
    Expr::Constant(Constant::I) => 1,
    Expr::Constant(_) => 2,
    Expr::Symbol(_) => 3,
    Expr::Power(base, _) if matches!(**base, Expr::Symbol(_)) => 3,
    Expr::FunctionCall { .. } => 4,
    Expr::Power(base, _)
      if matches!(**base, Expr::FunctionCall { .. } | Expr::Constant(_)) =>
    {
      4
    }
    Expr::Plus(_) | Expr::Power(..) => 5,
    _ => 6,
  }
}

fn factor_base(factor: &Expr) -> &Expr {
  match factor {
    Expr::Power(base, _) => base,
    other => other,
  }
}

fn compare_factors(a: &Expr, b: &Expr) -> Ordering {
  factor_rank(a).cmp(&factor_rank(b)).then_with(|| {
    factor_base(a)
      .to_string()
      .cmp(&factor_base(b).to_string())
      .then_with(|| a.to_string().cmp(&b.to_string()))
  })
}

pub fn times(factors: Vec<Expr>) -> Expr {
  times_with(factors, true)
}

fn times_with(factors: Vec<Expr>, regroup: bool) -> Expr {
  let mut flat = Vec::with_capacity(factors.len());
  for factor in factors {
    match factor {
      Expr::Times(inner) => flat.extend(inner),
      other => flat.push(other),
    }
  }

  if flat.iter().any(is_nan) {
    return NAN;
  }

  let mut coeff = Number::Integer(1);
  let mut bases: Vec<(Expr, Expr)> = Vec::new();
  for factor in flat {
    if let Some(n) = factor.as_number() {
      coeff = coeff * n;
      continue;
    }
    let (base, exp) = match factor {
      Expr::Power(base, exp) => (*base, *exp),
      other => (other, Expr::Integer(1)),
    };
    match bases.iter_mut().find(|(b, _)| *b == base) {
      Some(slot) => slot.1 = plus(vec![slot.1.clone(), exp]),
      None => bases.push((base, exp)),
    }
  }

  if bases.iter().any(|(b, _)| is_zoo(b)) {
    return if coeff.is_zero() { NAN } else { ZOO };
  }
  if coeff.is_zero() {
    return Expr::Integer(0);
  }

  let mut rest = Vec::with_capacity(bases.len());
  let mut needs_regroup = false;
  for (base, exp) in bases {
    match power(base, exp) {
      Expr::Times(inner) => {
        needs_regroup = true;
        for f in inner {
          match f.as_number() {
            Some(n) => coeff = coeff * n,
            None => rest.push(f),
          }
        }
      }
      other => match other.as_number() {
        Some(n) => coeff = coeff * n,
        None if is_zoo(&other) => return ZOO,
        None if is_nan(&other) => return NAN,
        None => rest.push(other),
      },
    }
  }

  if needs_regroup && regroup {
    let mut again = vec![Expr::from(coeff)];
    again.extend(rest);
    return times_with(again, false);
  }
  if coeff.is_zero() {
    return Expr::Integer(0);
  }

  rest.sort_by(compare_factors);
  if rest.is_empty() {
    return Expr::from(coeff);
  }
  if coeff.is_one() && rest.len() == 1 {
    return rest.remove(0);
  }
  if rest.len() == 1
    && let Expr::Plus(terms) = &rest[0]
  {
    return plus(
      terms
        .iter()
        .map(|t| times(vec![Expr::from(coeff), t.clone()]))
        .collect(),
    );
  }
  let mut out = Vec::with_capacity(rest.len() + 1);
  if !coeff.is_one() {
    out.push(Expr::from(coeff));
  }
  out.extend(rest);
  Expr::Times(out)
}

// ─── Power ──────────────────────────────────────────────────────────

pub fn power(base: Expr, exp: Expr) -> Expr {
  if is_nan(&base) || is_nan(&exp) {
    return NAN;
  }
  match exp {
    Expr::Integer(0) => return Expr::Integer(1),
    Expr::Integer(1) => return base,
    _ => {}
  }
  if matches!(base, Expr::Integer(1)) {
    return Expr::Integer(1);
  }
  if is_zoo(&base) {
    return match exp.as_number() {
      Some(n) if n.is_negative() => Expr::Integer(0),
      Some(_) => ZOO,
      None => Expr::Power(Box::new(base), Box::new(exp)),
    };
  }

  if let (Some(b), Some(e)) = (base.as_number(), exp.as_number()) {
    return power_numbers(b, e);
  }

  match (&base, &exp) {
    (Expr::Constant(Constant::I), Expr::Integer(n)) => {
      match n.rem_euclid(4) {
        0 => Expr::Integer(1),
        1 => base,
        2 => Expr::Integer(-1),
        _ => Expr::Times(vec![Expr::Integer(-1), base]),
      }
    }
    (
      Expr::Constant(Constant::E),
      Expr::FunctionCall {
        func: Function::Log,
        arg,
      },
    ) => (**arg).clone(),
    (Expr::Power(inner_base, inner_exp), Expr::Integer(_)) => power(
      (**inner_base).clone(),
      times(vec![(**inner_exp).clone(), exp.clone()]),
    ),
    (Expr::Times(factors), Expr::Integer(_)) => times(
      factors
        .iter()
        .map(|f| power(f.clone(), exp.clone()))
        .collect(),
    ),
    _ => Expr::Power(Box::new(base), Box::new(exp)),
  }
}

fn power_numbers(base: Number, exp: Number) -> Expr {
  if base.is_zero() {
    return if exp.is_negative() {
      ZOO
    } else {
      Expr::Integer(0)
    };
  }

  if let Number::Integer(n) = exp {
    return base.pow_int(n).map_or(ZOO, Expr::from);
  }

  let (p, q) = match exp {
    Number::Rational(p, q) if base.is_exact() => (p, q),
    _ => {
      let (b, e) = (base.to_f64(), exp.to_f64());
      if b < 0.0 {
        if e == 0.5 {
          return times(vec![
            Expr::Constant(Constant::I),
            Expr::Real((-b).sqrt()),
          ]);
        }
        if e.fract() == 0.0 {
          return Expr::Real(b.powf(e));
        }
        // Principal value: |b|^e * (cos(pi*e) + I*sin(pi*e)).
        let magnitude = (-b).powf(e);
        let angle = std::f64::consts::PI * e;
        return plus(vec![
          Expr::Real(magnitude * angle.cos()),
          times(vec![
            Expr::Real(magnitude * angle.sin()),
            Expr::Constant(Constant::I),
          ]),
        ]);
      }
      return Expr::Real(b.powf(e));
    }
  };

  let n = match base {
    Number::Integer(n) => n,
    Number::Rational(num, den) => {
      return times(vec![
        power(Expr::Integer(num), Expr::from(exp)),
        power(Expr::Integer(den), Expr::from(-exp)),
      ]);
    }
    Number::Real(_) => return Expr::Real(base.to_f64().powf(exp.to_f64())),
  };

  let raw = || Expr::Power(Box::new(Expr::Integer(n)), Box::new(Expr::from(exp)));

  if n < 0 {
    if q == 2 {
      return times(vec![
        power(Expr::Constant(Constant::I), Expr::Integer(p)),
        power(Expr::from(-Number::Integer(n)), Expr::from(exp)),
      ]);
    }
    return raw();
  }

  if let Some(root) = u32::try_from(q).ok().and_then(|q| integer_root(n, q))
  {
    return Number::Integer(root).pow_int(p).map_or(ZOO, Expr::from);
  }

  if q != 2 {
    return raw();
  }
  let (outside, inside) = simplify_sqrt_parts(n);
  let whole = p.div_euclid(2);
  if outside == 1 && whole == 0 {
    return raw();
  }
  let scale = Number::Integer(n)
    .pow_int(whole)
    .map_or(ZOO, Expr::from);
  let mut factors = vec![scale, Expr::Integer(outside)];
  if inside != 1 {
    factors.push(Expr::Power(
      Box::new(Expr::Integer(inside)),
      Box::new(Expr::Rational(1, 2)),
    ));
  }
  times(factors)
}

/// Exact `q`-th root of a non-negative integer, if there is one.
fn integer_root(n: i128, q: u32) -> Option<i128> {
  if n < 0 || q == 0 {
    return None;
  }
  let estimate = (n as f64).powf(1.0 / q as f64).round() as i128;
  (estimate.saturating_sub(1)..=estimate.saturating_add(1))
    .filter(|r| *r >= 0)
    .find(|r| r.checked_pow(q) == Some(n))
}

/// Split `n` into `(outside, inside)` with `sqrt(n) = outside*sqrt(inside)`
/// and `inside` square free.
pub fn simplify_sqrt_parts(n: i128) -> (i128, i128) {
  if !(1..=SQRT_FACTOR_LIMIT).contains(&n) {
    return (1, n);
  }
  let mut outside = 1;
  let mut inside = n;
  let mut f: i128 = 2;
  while f * f <= inside {
    while inside % (f * f) == 0 {
      inside /= f * f;
      outside *= f;
    }
    f += 1;
  }
  (outside, inside)
}

// ─── Functions ──────────────────────────────────────────────────────

/// Rational multiple of pi, if `expr` is one.
fn pi_multiple(expr: &Expr) -> Option<(i128, i128)> {
  match expr {
    Expr::Constant(Constant::Pi) => Some((1, 1)),
    Expr::Times(factors) if factors.len() == 2 => {
      match (&factors[0], &factors[1]) {
        (Expr::Integer(n), Expr::Constant(Constant::Pi)) => Some((*n, 1)),
        (Expr::Rational(p, q), Expr::Constant(Constant::Pi)) => Some((*p, *q)),
        _ => None,
      }
    }
    _ => None,
  }
}

fn half_sqrt(n: i128) -> Expr {
  times(vec![
    Expr::Rational(1, 2),
    power(Expr::Integer(n), Expr::Rational(1, 2)),
  ])
}

/// `sin(p/q * pi)` for the angles with a closed form.
fn sin_pi_fraction(p: i128, q: i128) -> Option<Expr> {
  let period = q.checked_mul(2)?;
  let mut p = p.rem_euclid(period);
  let negative = p >= q;
  if negative {
    p -= q;
  }
  // Fold into [0, pi/2].
  if p > q - p {
    p = q - p;
  }
  let r = Number::rational(p, q)?;
  let value = match r {
    Number::Integer(0) => Expr::Integer(0),
    Number::Rational(1, 6) => Expr::Rational(1, 2),
    Number::Rational(1, 4) => half_sqrt(2),
    Number::Rational(1, 3) => half_sqrt(3),
    Number::Rational(1, 2) => Expr::Integer(1),
    _ => return None,
  };
  Some(if negative { negate(value) } else { value })
}

fn cos_pi_fraction(p: i128, q: i128) -> Option<Expr> {
  let shifted = Number::rational(p, q)? + Number::Rational(1, 2);
  let (p, q) = shifted.as_ratio()?;
  sin_pi_fraction(p, q)
}

fn trig_at_pi_multiple(func: Function, p: i128, q: i128) -> Option<Expr> {
  let sin = || sin_pi_fraction(p, q);
  let cos = || cos_pi_fraction(p, q);
  match func {
    Function::Sin => sin(),
    Function::Cos => cos(),
    Function::Tan => Some(div(sin()?, cos()?)),
    Function::Cot => Some(div(cos()?, sin()?)),
    Function::Sec => Some(div(Expr::Integer(1), cos()?)),
    Function::Csc => Some(div(Expr::Integer(1), sin()?)),
    _ => None,
  }
}

fn is_odd(func: Function) -> bool {
  matches!(
    func,
    Function::Sin
      | Function::Tan
      | Function::Cot
      | Function::Csc
      | Function::Asin
      | Function::Atan
      | Function::Sinh
      | Function::Tanh
  )
}

fn is_even(func: Function) -> bool {
  matches!(func, Function::Cos | Function::Sec | Function::Cosh)
}

fn eval_real(func: Function, x: f64) -> f64 {
  match func {
    Function::Sin => x.sin(),
    Function::Cos => x.cos(),
    Function::Tan => x.tan(),
    Function::Cot => 1.0 / x.tan(),
    Function::Sec => 1.0 / x.cos(),
    Function::Csc => 1.0 / x.sin(),
    Function::Asin => x.asin(),
    Function::Acos => x.acos(),
    Function::Atan => x.atan(),
    Function::Sinh => x.sinh(),
    Function::Cosh => x.cosh(),
    Function::Tanh => x.tanh(),
    Function::Exp => x.exp(),
    Function::Log => x.ln(),
    Function::Sqrt => x.sqrt(),
    Function::Abs => x.abs(),
  }
}

fn pi_times(p: i128, q: i128) -> Expr {
  times(vec![
    Number::rational(p, q).map_or(NAN, Expr::from),
    Expr::Constant(Constant::Pi),
  ])
}

fn special_value(func: Function, arg: &Expr) -> Option<Expr> {
  if let Some((p, q)) = pi_multiple(arg) {
    return trig_at_pi_multiple(func, p, q);
  }
  let value = arg.as_number()?;
  if !value.is_exact() {
    return None;
  }
  let exact = match (func, value) {
    (Function::Sin | Function::Tan | Function::Sinh | Function::Tanh, n)
      if n.is_zero() =>
    {
      Expr::Integer(0)
    }
    (Function::Cos | Function::Sec | Function::Cosh, n) if n.is_zero() => {
      Expr::Integer(1)
    }
    (Function::Cot | Function::Csc, n) if n.is_zero() => ZOO,
    (Function::Asin | Function::Atan, n) if n.is_zero() => Expr::Integer(0),
    (Function::Asin, Number::Integer(1)) => pi_times(1, 2),
    (Function::Asin, Number::Rational(1, 2)) => pi_times(1, 6),
    (Function::Acos, Number::Integer(1)) => Expr::Integer(0),
    (Function::Acos, Number::Integer(0)) => pi_times(1, 2),
    (Function::Acos, Number::Integer(-1)) => Expr::Constant(Constant::Pi),
    (Function::Acos, Number::Rational(1, 2)) => pi_times(1, 3),
    (Function::Acos, Number::Rational(-1, 2)) => pi_times(2, 3),
    (Function::Atan, Number::Integer(1)) => pi_times(1, 4),
    (Function::Log, Number::Integer(1)) => Expr::Integer(0),
    (Function::Log, Number::Integer(0)) => ZOO,
    _ => return None,
  };
  Some(exact)
}

pub fn apply_function(func: Function, arg: Expr) -> Expr {
  if is_nan(&arg) {
    return NAN;
  }
  match func {
    Function::Exp => return power(Expr::Constant(Constant::E), arg),
    Function::Sqrt => return power(arg, Expr::Rational(1, 2)),
    _ => {}
  }

  if let Some(value) = special_value(func, &arg) {
    return value;
  }

  match (func, &arg) {
    (Function::Log, Expr::Constant(Constant::E)) => return Expr::Integer(1),
    (Function::Log, Expr::Power(base, exp))
      if matches!(**base, Expr::Constant(Constant::E)) && exp.is_number() =>
    {
      return (**exp).clone();
    }
    (Function::Abs, _) if arg.is_number() => {
      let n = arg.as_number().unwrap_or(Number::Integer(0));
      return Expr::from(if n.is_negative() { -n } else { n });
    }
    (Function::Abs, Expr::Constant(Constant::I)) => return Expr::Integer(1),
    _ => {}
  }

  if let Expr::Real(x) = arg {
    let value = eval_real(func, x);
    if value.is_finite() {
      return Expr::Real(value);
    }
    return Expr::call(func, arg);
  }

  if is_negative_term(&arg) {
    if is_odd(func) {
      return negate(apply_function(func, negate(arg)));
    }
    if is_even(func) || func == Function::Abs {
      return apply_function(func, negate(arg));
    }
  }

  Expr::call(func, arg)
}

// ─── Numeric evaluation ─────────────────────────────────────────────

/// Replace exact numbers and real constants by floats and recombine.
pub fn evalf(expr: &Expr) -> Expr {
  match expr {
    Expr::Integer(_) | Expr::Rational(..) => {
      Expr::Real(expr.as_number().map_or(f64::NAN, Number::to_f64))
    }
    Expr::Real(_) | Expr::Symbol(_) => expr.clone(),
    Expr::Constant(Constant::Pi) => Expr::Real(std::f64::consts::PI),
    Expr::Constant(Constant::E) => Expr::Real(std::f64::consts::E),
    Expr::Constant(_) => expr.clone(),
    Expr::UnaryOp { .. } | Expr::BinaryOp { .. } => evalf(&canonical(expr)),
    Expr::Plus(items) => plus(items.iter().map(evalf).collect()),
    Expr::Times(items) => times(items.iter().map(evalf).collect()),
    Expr::Power(base, exp) => {
      let base = evalf(base);
      // Integer exponents on symbolic bases stay exact.
      let exp = match (**exp).clone() {
        Expr::Integer(n) if !base.is_number() => Expr::Integer(n),
        other => evalf(&other),
      };
      power(base, exp)
    }
    Expr::FunctionCall { func, arg } => apply_function(*func, evalf(arg)),
    Expr::Integral { integrand, var } => Expr::Integral {
      integrand: Box::new(evalf(integrand)),
      var: *var,
    },
    Expr::Equation { lhs, rhs } => Expr::Equation {
      lhs: Box::new(evalf(lhs)),
      rhs: Box::new(evalf(rhs)),
    },
  }
}

/// Numeric value of an expression free of symbols, if it is real.
pub fn numeric_value(expr: &Expr) -> Option<f64> {
  match evalf(expr) {
    Expr::Real(x) if x.is_finite() => Some(x),
    Expr::Integer(n) => Some(n as f64),
    _ => None,
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::parser::parse_expression;

  fn canon(input: &str) -> String {
    canonical(&parse_expression(input).unwrap()).to_string()
  }

  #[test]
  fn folds_numbers_exactly() {
    assert_eq!(canon("1/2 + 1/3"), "5/6");
    assert_eq!(canon("2^10"), "1024");
    assert_eq!(canon("2/4"), "1/2");
  }

  #[test]
  fn collects_like_terms() {
    assert_eq!(canon("x + x"), "2*x");
    assert_eq!(canon("x - x"), "0");
    assert_eq!(canon("x*x*x"), "x**3");
    assert_eq!(canon("3*x^2 + 2 - x^2"), "2*x**2 + 2");
  }

  #[test]
  fn distributes_numeric_coefficients() {
    assert_eq!(canon("x - (x + 1)"), "-1");
    assert_eq!(canon("2*(x + 1)"), "2*x + 2");
  }

  #[test]
  fn simplifies_square_roots() {
    assert_eq!(canon("sqrt(8)"), "2*sqrt(2)");
    assert_eq!(canon("sqrt(4)"), "2");
    assert_eq!(canon("sqrt(-4)"), "2*I");
    assert_eq!(canon("sqrt(2)*sqrt(2)"), "2");
    assert_eq!(canon("sqrt(8)*sqrt(2)"), "4");
  }

  #[test]
  fn special_trig_values() {
    assert_eq!(canon("cos(pi)"), "-1");
    assert_eq!(canon("sin(pi/6)"), "1/2");
    assert_eq!(canon("sin(pi/4)"), "sqrt(2)/2");
    assert_eq!(canon("cos(0)"), "1");
    assert_eq!(canon("sin(-x)"), "-sin(x)");
    assert_eq!(canon("cos(-x)"), "cos(x)");
  }

  #[test]
  fn undefined_arithmetic_does_not_fail() {
    assert_eq!(canon("1/0"), "zoo");
    assert_eq!(canon("0/0"), "nan");
    assert_eq!(canon("x/0"), "zoo");
  }

  #[test]
  fn imaginary_unit_cycles() {
    assert_eq!(canon("i^2"), "-1");
    assert_eq!(canon("i^4"), "1");
  }

  #[test]
  fn exp_and_log_cancel() {
    assert_eq!(canon("exp(log(x))"), "x");
    assert_eq!(canon("log(exp(2))"), "2");
    assert_eq!(canon("log(1)"), "0");
  }

  #[test]
  fn evalf_uses_floats() {
    let value = evalf(&parse_expression("cos(pi)").unwrap());
    assert_eq!(value, Expr::Real(-1.0));
    assert_eq!(evalf(&Expr::Integer(5)).to_string(), "5.00000000000000");
    assert_eq!(
      evalf(&parse_expression("x^2").unwrap()).to_string(),
      "x**2"
    );
  }

  #[test]
  fn evalf_takes_principal_roots_of_negative_bases() {
    assert_eq!(
      evalf(&parse_expression("(-8)^(1/3)").unwrap()).to_string(),
      "1.73205080756888*I + 1.00000000000000"
    );
  }
}
