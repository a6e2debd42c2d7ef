//! Structural parsing of the residual text into an unevaluated [`Expr`].
//!
//! Operators become `BinaryOp`/`UnaryOp` nodes exactly as written; the only
//! folding done here is a sign applied directly to a numeric literal, so
//! `-2` is the literal minus two rather than `-(2)`.

use pest::Parser;
use pest::iterators::Pair;
use tracing::debug;

use crate::syntax::{
  BinaryOperator, Constant, Expr, Function, Symbol, UnaryOperator,
};
use crate::{MathParser, ParseError, Rule};

/// Parse a math expression or a single equation.
pub fn parse_expression(input: &str) -> Result<Expr, ParseError> {
  let program = MathParser::parse(Rule::Program, input)
    .map_err(Box::new)?
    .next()
    .ok_or(ParseError::EmptyInput)?;

  let mut sides = Vec::new();
  for pair in program.into_inner() {
    if pair.as_rule() == Rule::Expression {
      sides.push(build_expression(pair)?);
    }
  }

  let expr = match sides.len() {
    1 => sides.remove(0),
    2 => {
      let rhs = sides.remove(1);
      let lhs = sides.remove(0);
      Expr::Equation {
        lhs: Box::new(lhs),
        rhs: Box::new(rhs),
      }
    }
    _ => return Err(ParseError::ChainedEquation),
  };
  debug!(%expr, "parsed expression");
  Ok(expr)
}

fn build_expression(pair: Pair<Rule>) -> Result<Expr, ParseError> {
  let mut inner = pair.into_inner();
  let mut acc = match inner.next() {
    Some(first) => build_term(first)?,
    None => return Err(ParseError::EmptyInput),
  };
  while let (Some(op), Some(term)) = (inner.next(), inner.next()) {
    let op = match op.as_str() {
      "-" => BinaryOperator::Minus,
      _ => BinaryOperator::Plus,
    };
    acc = Expr::binary(op, acc, build_term(term)?);
  }
  Ok(acc)
}

fn build_term(pair: Pair<Rule>) -> Result<Expr, ParseError> {
  let mut inner = pair.into_inner();
  let mut acc = match inner.next() {
    Some(first) => build_factor(first)?,
    None => return Err(ParseError::EmptyInput),
  };
  while let (Some(op), Some(factor)) = (inner.next(), inner.next()) {
    let op = match op.as_str() {
      "/" => BinaryOperator::Divide,
      _ => BinaryOperator::Times,
    };
    acc = Expr::binary(op, acc, build_factor(factor)?);
  }
  Ok(acc)
}

fn build_factor(pair: Pair<Rule>) -> Result<Expr, ParseError> {
  let mut negative = false;
  let mut power = None;
  for child in pair.into_inner() {
    match child.as_rule() {
      Rule::Sign => negative ^= child.as_str() == "-",
      Rule::Power => power = Some(build_power(child)?),
      _ => {}
    }
  }
  let power = power.ok_or(ParseError::EmptyInput)?;
  if !negative {
    return Ok(power);
  }
  // A sign in front of a bare literal is part of the literal.
  Ok(match power.as_number() {
    Some(n) => Expr::from(-n),
    None => Expr::UnaryOp {
      op: UnaryOperator::Minus,
      operand: Box::new(power),
    },
  })
}

fn build_power(pair: Pair<Rule>) -> Result<Expr, ParseError> {
  let mut inner = pair.into_inner();
  let base = match inner.next() {
    Some(atom) => build_atom(atom)?,
    None => return Err(ParseError::EmptyInput),
  };
  // Skip the operator token.
  match (inner.next(), inner.next()) {
    (Some(_), Some(exponent)) => Ok(Expr::binary(
      BinaryOperator::Power,
      base,
      build_factor(exponent)?,
    )),
    _ => Ok(base),
  }
}

fn build_atom(pair: Pair<Rule>) -> Result<Expr, ParseError> {
  match pair.as_rule() {
    Rule::Number => parse_number(pair.as_str()),
    Rule::Identifier => resolve_identifier(pair.as_str()),
    Rule::Call => build_call(pair),
    Rule::Expression => build_expression(pair),
    _ => Err(ParseError::UnknownIdentifier(pair.as_str().to_string())),
  }
}

fn parse_number(text: &str) -> Result<Expr, ParseError> {
  if text.contains(['.', 'e', 'E']) {
    text
      .parse::<f64>()
      .ok()
      .filter(|value| value.is_finite())
      .map(Expr::Real)
      .ok_or_else(|| ParseError::InvalidNumber(text.to_string()))
  } else {
    text
      .parse::<i128>()
      .map(Expr::Integer)
      .map_err(|_| ParseError::InvalidNumber(text.to_string()))
  }
}

fn resolve_identifier(name: &str) -> Result<Expr, ParseError> {
  if let Some(symbol) = Symbol::from_name(name) {
    return Ok(Expr::Symbol(symbol));
  }
  if let Some(constant) = Constant::from_name(name) {
    return Ok(Expr::Constant(constant));
  }
  Err(ParseError::UnknownIdentifier(name.to_string()))
}

fn build_call(pair: Pair<Rule>) -> Result<Expr, ParseError> {
  let mut inner = pair.into_inner();
  let name = inner.next().map(|p| p.as_str()).unwrap_or_default();
  let func = Function::from_name(name)
    .ok_or_else(|| ParseError::UnknownFunction(name.to_string()))?;
  let mut args = inner.map(build_expression).collect::<Result<Vec<_>, _>>()?;

  match (func, args.len()) {
    (_, 1) => Ok(Expr::call(func, args.remove(0))),
    // log(x, b) is the logarithm of x in base b.
    (Function::Log, 2) => {
      let base = args.remove(1);
      let value = args.remove(0);
      Ok(Expr::binary(
        BinaryOperator::Divide,
        Expr::call(Function::Log, value),
        Expr::call(Function::Log, base),
      ))
    }
    (_, got) => Err(ParseError::WrongArity {
      name: func.name().to_string(),
      expected: 1,
      got,
    }),
  }
}
