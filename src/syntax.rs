//! Expression tree, exact numbers, the fixed symbol set and the printer.
//!
//! Parsed input is kept as `BinaryOp`/`UnaryOp` nodes so that nothing is
//! computed while reading it. The algebra in [`crate::functions`] rewrites
//! those trees into the canonical n-ary `Plus`/`Times`/`Power` forms.

use std::fmt;

/// Free variables accepted in user input, in scan order.
pub const SYMBOL_NAMES: [&str; 18] = [
  "x", "y", "z", "t", "a", "b", "c", "d", "k", "m", "n", "p", "q", "r", "s",
  "u", "v", "w",
];

/// A member of the fixed symbol set.
///
/// Symbols are indices into [`SYMBOL_NAMES`], so equal names are always the
/// same symbol and `Ord` follows scan order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol(u8);

impl Symbol {
  pub fn from_name(name: &str) -> Option<Self> {
    SYMBOL_NAMES
      .iter()
      .position(|candidate| *candidate == name)
      .map(|index| Symbol(index as u8))
  }

  pub fn name(self) -> &'static str {
    SYMBOL_NAMES[self.0 as usize]
  }

  /// Every symbol, in scan order.
  pub fn all() -> impl Iterator<Item = Symbol> {
    (0..SYMBOL_NAMES.len() as u8).map(Symbol)
  }
}

impl fmt::Display for Symbol {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Constant {
  Pi,
  E,
  I,
  ComplexInfinity,
  NaN,
}

impl Constant {
  /// Constants that may be written in input. Matching ignores case because
  /// the math path lowercases everything it reads.
  pub fn from_name(name: &str) -> Option<Self> {
    match name.to_ascii_lowercase().as_str() {
      "pi" => Some(Constant::Pi),
      "e" => Some(Constant::E),
      "i" => Some(Constant::I),
      _ => None,
    }
  }

  pub fn name(self) -> &'static str {
    match self {
      Constant::Pi => "pi",
      Constant::E => "E",
      Constant::I => "I",
      Constant::ComplexInfinity => "zoo",
      Constant::NaN => "nan",
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Function {
  Sin,
  Cos,
  Tan,
  Cot,
  Sec,
  Csc,
  Asin,
  Acos,
  Atan,
  Sinh,
  Cosh,
  Tanh,
  Exp,
  Log,
  Sqrt,
  Abs,
}

impl Function {
  pub fn from_name(name: &str) -> Option<Self> {
    let function = match name.to_ascii_lowercase().as_str() {
      "sin" => Function::Sin,
      "cos" => Function::Cos,
      "tan" => Function::Tan,
      "cot" => Function::Cot,
      "sec" => Function::Sec,
      "csc" => Function::Csc,
      "asin" => Function::Asin,
      "acos" => Function::Acos,
      "atan" => Function::Atan,
      "sinh" => Function::Sinh,
      "cosh" => Function::Cosh,
      "tanh" => Function::Tanh,
      "exp" => Function::Exp,
      "log" | "ln" => Function::Log,
      "sqrt" => Function::Sqrt,
      "abs" => Function::Abs,
      _ => return None,
    };
    Some(function)
  }

  pub fn name(self) -> &'static str {
    match self {
      Function::Sin => "sin",
      Function::Cos => "cos",
      Function::Tan => "tan",
      Function::Cot => "cot",
      Function::Sec => "sec",
      Function::Csc => "csc",
      Function::Asin => "asin",
      Function::Acos => "acos",
      Function::Atan => "atan",
      Function::Sinh => "sinh",
      Function::Cosh => "cosh",
      Function::Tanh => "tanh",
      Function::Exp => "exp",
      Function::Log => "log",
      Function::Sqrt => "sqrt",
      Function::Abs => "Abs",
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
  Plus,
  Minus,
  Times,
  Divide,
  Power,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
  Minus,
  Plus,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
  Integer(i128),
  /// Reduced fraction with a denominator greater than one.
  Rational(i128, i128),
  Real(f64),
  Symbol(Symbol),
  Constant(Constant),
  UnaryOp {
    op: UnaryOperator,
    operand: Box<Expr>,
  },
  BinaryOp {
    op: BinaryOperator,
    left: Box<Expr>,
    right: Box<Expr>,
  },
  Plus(Vec<Expr>),
  Times(Vec<Expr>),
  Power(Box<Expr>, Box<Expr>),
  FunctionCall {
    func: Function,
    arg: Box<Expr>,
  },
  /// An antiderivative that could not be found.
  Integral {
    integrand: Box<Expr>,
    var: Symbol,
  },
  Equation {
    lhs: Box<Expr>,
    rhs: Box<Expr>,
  },
}

impl From<Number> for Expr {
  fn from(number: Number) -> Self {
    match number {
      Number::Integer(n) => Expr::Integer(n),
      Number::Rational(n, d) => Expr::Rational(n, d),
      Number::Real(f) => Expr::Real(f),
    }
  }
}

impl From<Symbol> for Expr {
  fn from(symbol: Symbol) -> Self {
    Expr::Symbol(symbol)
  }
}

impl Expr {
  pub fn call(func: Function, arg: Expr) -> Self {
    Expr::FunctionCall {
      func,
      arg: Box::new(arg),
    }
  }

  pub fn binary(op: BinaryOperator, left: Expr, right: Expr) -> Self {
    Expr::BinaryOp {
      op,
      left: Box::new(left),
      right: Box::new(right),
    }
  }

  pub fn as_number(&self) -> Option<Number> {
    match self {
      Expr::Integer(n) => Some(Number::Integer(*n)),
      Expr::Rational(n, d) => Some(Number::Rational(*n, *d)),
      Expr::Real(f) => Some(Number::Real(*f)),
      _ => None,
    }
  }

  pub fn is_number(&self) -> bool {
    self.as_number().is_some()
  }

  pub fn is_zero(&self) -> bool {
    self.as_number().is_some_and(Number::is_zero)
  }

  pub fn contains_symbol(&self, symbol: Symbol) -> bool {
    match self {
      Expr::Symbol(s) => *s == symbol,
      Expr::Integer(_)
      | Expr::Rational(..)
      | Expr::Real(_)
      | Expr::Constant(_) => false,
      Expr::UnaryOp { operand, .. } => operand.contains_symbol(symbol),
      Expr::BinaryOp { left, right, .. } => {
        left.contains_symbol(symbol) || right.contains_symbol(symbol)
      }
      Expr::Plus(items) | Expr::Times(items) => {
        items.iter().any(|item| item.contains_symbol(symbol))
      }
      Expr::Power(base, exp) => {
        base.contains_symbol(symbol) || exp.contains_symbol(symbol)
      }
      Expr::FunctionCall { arg, .. } => arg.contains_symbol(symbol),
      Expr::Integral { integrand, var } => {
        *var != symbol && integrand.contains_symbol(symbol)
      }
      Expr::Equation { lhs, rhs } => {
        lhs.contains_symbol(symbol) || rhs.contains_symbol(symbol)
      }
    }
  }

  /// Free symbols in scan order.
  pub fn free_symbols(&self) -> Vec<Symbol> {
    Symbol::all()
      .filter(|symbol| self.contains_symbol(*symbol))
      .collect()
  }

  /// Replace every free occurrence of `symbol` by `value`.
  pub fn substitute(&self, symbol: Symbol, value: &Expr) -> Expr {
    let sub = |e: &Expr| Box::new(e.substitute(symbol, value));
    match self {
      Expr::Symbol(s) if *s == symbol => value.clone(),
      Expr::UnaryOp { op, operand } => Expr::UnaryOp {
        op: *op,
        operand: sub(operand),
      },
      Expr::BinaryOp { op, left, right } => Expr::BinaryOp {
        op: *op,
        left: sub(left),
        right: sub(right),
      },
      Expr::Plus(items) => Expr::Plus(
        items
          .iter()
          .map(|item| item.substitute(symbol, value))
          .collect(),
      ),
      Expr::Times(items) => Expr::Times(
        items
          .iter()
          .map(|item| item.substitute(symbol, value))
          .collect(),
      ),
      Expr::Power(base, exp) => Expr::Power(sub(base), sub(exp)),
      Expr::FunctionCall { func, arg } => Expr::FunctionCall {
        func: *func,
        arg: sub(arg),
      },
      Expr::Integral { integrand, var } if *var != symbol => Expr::Integral {
        integrand: sub(integrand),
        var: *var,
      },
      Expr::Equation { lhs, rhs } => Expr::Equation {
        lhs: sub(lhs),
        rhs: sub(rhs),
      },
      _ => self.clone(),
    }
  }

  /// Number of nodes in the tree, used to rank simplification candidates.
  pub fn node_count(&self) -> usize {
    1 + match self {
      Expr::UnaryOp { operand, .. } => operand.node_count(),
      Expr::BinaryOp { left, right, .. } => {
        left.node_count() + right.node_count()
      }
      Expr::Plus(items) | Expr::Times(items) => {
        items.iter().map(Expr::node_count).sum()
      }
      Expr::Power(base, exp) => base.node_count() + exp.node_count(),
      Expr::FunctionCall { arg, .. } => arg.node_count(),
      Expr::Integral { integrand, .. } => integrand.node_count() + 1,
      Expr::Equation { lhs, rhs } => lhs.node_count() + rhs.node_count(),
      _ => 0,
    }
  }
}

// ─── Numbers ────────────────────────────────────────────────────────

/// Exact integers and fractions, with floats for inexact input.
///
/// Exact arithmetic that overflows `i128` degrades to `Real`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
  Integer(i128),
  Rational(i128, i128),
  Real(f64),
}

pub fn gcd_i128(a: i128, b: i128) -> i128 {
  let (mut a, mut b) = (a.unsigned_abs(), b.unsigned_abs());
  while b != 0 {
    (a, b) = (b, a % b);
  }
  i128::try_from(a).unwrap_or(i128::MAX)
}

impl Number {
  /// Build a reduced fraction. `None` when the denominator is zero or the
  /// sign cannot be normalised without overflow.
  pub fn rational(num: i128, den: i128) -> Option<Self> {
    if den == 0 {
      return None;
    }
    let (num, den) = if den < 0 {
      (num.checked_neg()?, den.checked_neg()?)
    } else {
      (num, den)
    };
    let g = gcd_i128(num, den).max(1);
    let (num, den) = (num / g, den / g);
    if den == 1 {
      Some(Number::Integer(num))
    } else {
      Some(Number::Rational(num, den))
    }
  }

  /// Numerator and denominator of an exact number.
  pub fn as_ratio(self) -> Option<(i128, i128)> {
    match self {
      Number::Integer(n) => Some((n, 1)),
      Number::Rational(n, d) => Some((n, d)),
      Number::Real(_) => None,
    }
  }

  pub fn to_f64(self) -> f64 {
    match self {
      Number::Integer(n) => n as f64,
      Number::Rational(n, d) => n as f64 / d as f64,
      Number::Real(f) => f,
    }
  }

  pub fn is_zero(self) -> bool {
    match self {
      Number::Integer(n) => n == 0,
      Number::Rational(..) => false,
      Number::Real(f) => f == 0.0,
    }
  }

  pub fn is_one(self) -> bool {
    matches!(self, Number::Integer(1))
  }

  pub fn is_negative(self) -> bool {
    match self {
      Number::Integer(n) | Number::Rational(n, _) => n < 0,
      Number::Real(f) => f < 0.0,
    }
  }

  pub fn is_exact(self) -> bool {
    !matches!(self, Number::Real(_))
  }

  pub fn checked_div(self, rhs: Self) -> Option<Self> {
    if rhs.is_zero() {
      return None;
    }
    let exact = self.as_ratio().zip(rhs.as_ratio()).and_then(
      |((an, ad), (bn, bd))| {
        Number::rational(an.checked_mul(bd)?, ad.checked_mul(bn)?)
      },
    );
    Some(exact.unwrap_or(Number::Real(self.to_f64() / rhs.to_f64())))
  }

  /// Integer power. `None` for zero raised to a negative power.
  pub fn pow_int(self, exp: i128) -> Option<Self> {
    if exp == 0 {
      return Some(Number::Integer(1));
    }
    if self.is_zero() {
      return if exp > 0 { Some(self) } else { None };
    }
    let inexact = Number::Real(self.to_f64().powf(exp as f64));
    let Some((num, den)) = self.as_ratio() else {
      return Some(inexact);
    };
    let exact = u32::try_from(exp.unsigned_abs()).ok().and_then(|e| {
      let (n, d) = (num.checked_pow(e)?, den.checked_pow(e)?);
      if exp > 0 {
        Number::rational(n, d)
      } else {
        Number::rational(d, n)
      }
    });
    Some(exact.unwrap_or(inexact))
  }
}

impl std::ops::Add for Number {
  type Output = Self;

  fn add(self, rhs: Self) -> Self {
    let exact = self.as_ratio().zip(rhs.as_ratio()).and_then(
      |((an, ad), (bn, bd))| {
        let num = an.checked_mul(bd)?.checked_add(bn.checked_mul(ad)?)?;
        Number::rational(num, ad.checked_mul(bd)?)
      },
    );
    exact.unwrap_or(Number::Real(self.to_f64() + rhs.to_f64()))
  }
}

impl std::ops::Mul for Number {
  type Output = Self;

  fn mul(self, rhs: Self) -> Self {
    let exact = self.as_ratio().zip(rhs.as_ratio()).and_then(
      |((an, ad), (bn, bd))| {
        Number::rational(an.checked_mul(bn)?, ad.checked_mul(bd)?)
      },
    );
    exact.unwrap_or(Number::Real(self.to_f64() * rhs.to_f64()))
  }
}

impl std::ops::Neg for Number {
  type Output = Self;

  fn neg(self) -> Self {
    match self {
      Number::Integer(n) => n
        .checked_neg()
        .map_or(Number::Real(-(n as f64)), Number::Integer),
      Number::Rational(n, d) => n
        .checked_neg()
        .map_or(Number::Real(-(n as f64) / d as f64), |n| {
          Number::Rational(n, d)
        }),
      Number::Real(f) => Number::Real(-f),
    }
  }
}

impl std::ops::Sub for Number {
  type Output = Self;

  fn sub(self, rhs: Self) -> Self {
    self + (-rhs)
  }
}

impl std::iter::Sum for Number {
  fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
    iter.fold(Number::Integer(0), |a, b| a + b)
  }
}

impl std::iter::Product for Number {
  fn product<I: Iterator<Item = Self>>(iter: I) -> Self {
    iter.fold(Number::Integer(1), |a, b| a * b)
  }
}

impl fmt::Display for Number {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Number::Integer(n) => write!(f, "{n}"),
      Number::Rational(n, d) => write!(f, "{n}/{d}"),
      Number::Real(x) => f.write_str(&format_real(*x)),
    }
  }
}

/// Render a float with 15 significant digits.
pub fn format_real(value: f64) -> String {
  if value.is_nan() {
    return "nan".to_string();
  }
  if value.is_infinite() {
    return if value > 0.0 { "oo" } else { "-oo" }.to_string();
  }
  if value == 0.0 {
    return "0".to_string();
  }
  // The exponent is read after rounding so 0.99999999999999989 counts as 1.
  let scientific = format!("{value:.14e}");
  let Some((mantissa, exp)) = scientific.split_once('e') else {
    return scientific;
  };
  let exponent = exp.parse::<i32>().unwrap_or(0);
  if (-5..15).contains(&exponent) {
    let decimals = (14 - exponent) as usize;
    return format!("{value:.decimals$}");
  }
  let sign = if exponent < 0 { '-' } else { '+' };
  format!("{mantissa}e{sign}{:02}", exponent.abs())
}

// ─── Printer ────────────────────────────────────────────────────────

const PREC_EQUATION: u8 = 0;
const PREC_ADD: u8 = 10;
const PREC_MUL: u8 = 20;
const PREC_POW: u8 = 30;
const PREC_ATOM: u8 = 40;

fn is_negative_number(expr: &Expr) -> bool {
  expr.as_number().is_some_and(Number::is_negative)
}

/// Terms that print with a leading minus sign.
pub fn is_negative_term(expr: &Expr) -> bool {
  match expr {
    Expr::Times(factors) => factors.first().is_some_and(is_negative_number),
    _ => is_negative_number(expr),
  }
}

/// Flip the sign of a term that [`is_negative_term`] accepted, without
/// going through the algebra.
fn negate_for_display(expr: &Expr) -> Expr {
  match expr {
    Expr::Times(factors) => {
      let Some(coeff) = factors.first().and_then(Expr::as_number) else {
        return expr.clone();
      };
      let coeff = -coeff;
      let rest = &factors[1..];
      match (coeff.is_one(), rest.len()) {
        (true, 1) => rest[0].clone(),
        (true, _) => Expr::Times(rest.to_vec()),
        (false, _) => {
          let mut flipped = vec![Expr::from(coeff)];
          flipped.extend_from_slice(rest);
          Expr::Times(flipped)
        }
      }
    }
    _ => match expr.as_number() {
      Some(n) => Expr::from(-n),
      None => expr.clone(),
    },
  }
}

fn power_renders_as_call(base: &Expr, exp: &Expr) -> bool {
  matches!(exp, Expr::Rational(1, 2))
    || matches!(base, Expr::Constant(Constant::E))
}

fn power_renders_as_reciprocal(exp: &Expr) -> bool {
  matches!(exp, Expr::Integer(-1) | Expr::Rational(-1, 2))
}

fn precedence(expr: &Expr) -> u8 {
  match expr {
    Expr::Integer(_) | Expr::Real(_) if is_negative_number(expr) => PREC_ADD,
    Expr::Rational(..) if is_negative_number(expr) => PREC_ADD,
    Expr::Rational(..) => PREC_MUL,
    Expr::Integer(_)
    | Expr::Real(_)
    | Expr::Symbol(_)
    | Expr::Constant(_)
    | Expr::FunctionCall { .. }
    | Expr::Integral { .. } => PREC_ATOM,
    Expr::Plus(_) | Expr::UnaryOp { .. } => PREC_ADD,
    Expr::Times(_) if is_negative_term(expr) => PREC_ADD,
    Expr::Times(_) => PREC_MUL,
    Expr::Power(base, exp) => {
      if power_renders_as_call(base, exp) {
        PREC_ATOM
      } else if power_renders_as_reciprocal(exp) {
        PREC_MUL
      } else {
        PREC_POW
      }
    }
    Expr::BinaryOp { op, .. } => match op {
      BinaryOperator::Plus | BinaryOperator::Minus => PREC_ADD,
      BinaryOperator::Times | BinaryOperator::Divide => PREC_MUL,
      BinaryOperator::Power => PREC_POW,
    },
    Expr::Equation { .. } => PREC_EQUATION,
  }
}

fn parenthesize(expr: &Expr, min_prec: u8) -> String {
  if precedence(expr) < min_prec {
    format!("({expr})")
  } else {
    expr.to_string()
  }
}

fn fmt_times(factors: &[Expr], f: &mut fmt::Formatter<'_>) -> fmt::Result {
  let (coeff, rest) = match factors.first().and_then(Expr::as_number) {
    Some(c) => (c, &factors[1..]),
    None => (Number::Integer(1), factors),
  };
  let negative = coeff.is_negative();
  let coeff = if negative { -coeff } else { coeff };

  let mut numer: Vec<String> = Vec::new();
  let mut denom: Vec<String> = Vec::new();
  match coeff {
    Number::Integer(1) => {}
    Number::Integer(n) => numer.push(n.to_string()),
    Number::Rational(n, d) => {
      if n != 1 {
        numer.push(n.to_string());
      }
      denom.push(d.to_string());
    }
    Number::Real(x) => numer.push(format_real(x)),
  }
  for factor in rest {
    match factor {
      Expr::Power(base, exp) if is_negative_number(exp) => {
        let flipped = exp.as_number().map(|e| Expr::from(-e));
        match flipped {
          Some(Expr::Integer(1)) => denom.push(parenthesize(base, PREC_MUL)),
          Some(e) => denom.push(parenthesize(
            &Expr::Power(base.clone(), Box::new(e)),
            PREC_MUL,
          )),
          None => numer.push(parenthesize(factor, PREC_MUL)),
        }
      }
      _ => numer.push(parenthesize(factor, PREC_MUL)),
    }
  }

  let numerator = if numer.is_empty() {
    "1".to_string()
  } else {
    numer.join("*")
  };
  if negative {
    f.write_str("-")?;
  }
  match denom.len() {
    0 => f.write_str(&numerator),
    1 => write!(f, "{numerator}/{}", denom[0]),
    _ => write!(f, "{numerator}/({})", denom.join("*")),
  }
}

fn fmt_power(
  base: &Expr,
  exp: &Expr,
  f: &mut fmt::Formatter<'_>,
) -> fmt::Result {
  match (base, exp) {
    (_, Expr::Rational(1, 2)) => write!(f, "sqrt({base})"),
    (_, Expr::Rational(-1, 2)) => write!(f, "1/sqrt({base})"),
    (Expr::Constant(Constant::E), _) => write!(f, "exp({exp})"),
    (_, Expr::Integer(-1)) => write!(f, "1/{}", parenthesize(base, PREC_ATOM)),
    _ => write!(
      f,
      "{}**{}",
      parenthesize(base, PREC_POW + 1),
      parenthesize(exp, PREC_ATOM)
    ),
  }
}

impl fmt::Display for Expr {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Expr::Integer(_) | Expr::Rational(..) | Expr::Real(_) => {
        match self.as_number() {
          Some(n) => write!(f, "{n}"),
          None => Ok(()),
        }
      }
      Expr::Symbol(s) => write!(f, "{s}"),
      Expr::Constant(c) => f.write_str(c.name()),
      Expr::UnaryOp { op, operand } => {
        let sign = match op {
          UnaryOperator::Minus => "-",
          UnaryOperator::Plus => "+",
        };
        write!(f, "{sign}{}", parenthesize(operand, PREC_MUL))
      }
      Expr::BinaryOp { op, left, right } => {
        let (symbol, left_prec, right_prec) = match op {
          BinaryOperator::Plus => (" + ", PREC_ADD, PREC_ADD),
          BinaryOperator::Minus => (" - ", PREC_ADD, PREC_ADD + 1),
          BinaryOperator::Times => ("*", PREC_MUL, PREC_MUL),
          BinaryOperator::Divide => ("/", PREC_MUL, PREC_MUL + 1),
          BinaryOperator::Power => ("**", PREC_POW + 1, PREC_POW),
        };
        write!(
          f,
          "{}{symbol}{}",
          parenthesize(left, left_prec),
          parenthesize(right, right_prec)
        )
      }
      Expr::Plus(terms) => {
        for (i, term) in terms.iter().enumerate() {
          if i == 0 {
            write!(f, "{term}")?;
          } else if is_negative_term(term) {
            write!(
              f,
              " - {}",
              parenthesize(&negate_for_display(term), PREC_ADD + 1)
            )?;
          } else {
            write!(f, " + {}", parenthesize(term, PREC_ADD + 1))?;
          }
        }
        Ok(())
      }
      Expr::Times(factors) => fmt_times(factors, f),
      Expr::Power(base, exp) => fmt_power(base, exp, f),
      Expr::FunctionCall { func, arg } => write!(f, "{}({arg})", func.name()),
      Expr::Integral { integrand, var } => {
        write!(f, "Integral({integrand}, {var})")
      }
      Expr::Equation { lhs, rhs } => write!(f, "Eq({lhs}, {rhs})"),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn x() -> Expr {
    Expr::Symbol(Symbol::from_name("x").unwrap())
  }

  #[test]
  fn symbols_are_interned_by_name() {
    assert_eq!(Symbol::from_name("x"), Symbol::from_name("x"));
    assert!(Symbol::from_name("x") < Symbol::from_name("y"));
    assert_eq!(Symbol::from_name("xy"), None);
    assert_eq!(Symbol::all().count(), SYMBOL_NAMES.len());
  }

  #[test]
  fn rational_normalises_sign_and_gcd() {
    assert_eq!(Number::rational(4, -6), Some(Number::Rational(-2, 3)));
    assert_eq!(Number::rational(6, 3), Some(Number::Integer(2)));
    assert_eq!(Number::rational(1, 0), None);
  }

  #[test]
  fn exact_arithmetic_overflows_to_real() {
    let big = Number::Integer(i128::MAX);
    assert!(matches!(big + Number::Integer(1), Number::Real(_)));
    assert_eq!(
      Number::Rational(1, 2) + Number::Rational(1, 3),
      Number::Rational(5, 6)
    );
    assert_eq!(Number::Integer(2).pow_int(-2), Some(Number::Rational(1, 4)));
    assert_eq!(Number::Integer(0).pow_int(-1), None);
  }

  #[test]
  fn reals_use_fifteen_significant_digits() {
    assert_eq!(format_real(5.0), "5.00000000000000");
    assert_eq!(format_real(-1.0), "-1.00000000000000");
    assert_eq!(format_real(1024.0), "1024.00000000000");
    assert_eq!(format_real(0.5), "0.500000000000000");
    assert_eq!(format_real(1e20), "1.00000000000000e+20");
    assert_eq!(format_real(0.9999999999999999), "1.00000000000000");
  }

  #[test]
  fn prints_products_with_denominators() {
    let third_cube = Expr::Times(vec![
      Expr::Rational(1, 3),
      Expr::Power(Box::new(x()), Box::new(Expr::Integer(3))),
    ]);
    assert_eq!(third_cube.to_string(), "x**3/3");

    let neg = Expr::Times(vec![
      Expr::Integer(-1),
      x(),
      Expr::call(Function::Cos, x()),
    ]);
    assert_eq!(neg.to_string(), "-x*cos(x)");
  }

  #[test]
  fn prints_sums_with_subtraction() {
    let sum = Expr::Plus(vec![
      Expr::Times(vec![Expr::Integer(-1), x(), Expr::call(Function::Cos, x())]),
      Expr::call(Function::Sin, x()),
    ]);
    assert_eq!(sum.to_string(), "-x*cos(x) + sin(x)");

    let poly = Expr::Plus(vec![
      Expr::Power(Box::new(x()), Box::new(Expr::Integer(2))),
      Expr::Integer(-4),
    ]);
    assert_eq!(poly.to_string(), "x**2 - 4");
  }

  #[test]
  fn prints_roots_and_reciprocals() {
    let root = Expr::Power(Box::new(Expr::Integer(2)), Box::new(Expr::Rational(1, 2)));
    assert_eq!(root.to_string(), "sqrt(2)");
    let recip = Expr::Power(
      Box::new(Expr::Plus(vec![x(), Expr::Integer(1)])),
      Box::new(Expr::Integer(-1)),
    );
    assert_eq!(recip.to_string(), "1/(x + 1)");
    let grouped = Expr::Power(
      Box::new(Expr::Plus(vec![x(), Expr::Integer(1)])),
      Box::new(Expr::Integer(2)),
    );
    assert_eq!(grouped.to_string(), "(x + 1)**2");
  }

  #[test]
  fn prints_unevaluated_operators() {
    let expr = Expr::binary(
      BinaryOperator::Minus,
      x(),
      Expr::binary(BinaryOperator::Plus, x(), Expr::Integer(1)),
    );
    assert_eq!(expr.to_string(), "x - (x + 1)");
  }
}
