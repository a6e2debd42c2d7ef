//! Math dispatch: route a parsed expression to the matching algebra
//! operation and classify the outcome.

use std::fmt;

use tracing::debug;

use crate::MathError;
use crate::command::Command;
use crate::functions::calculus_ast::{differentiate, integrate};
use crate::functions::math_ast::evalf;
use crate::functions::polynomial_ast::{Solutions, simplify, solve};
use crate::syntax::{BinaryOperator, Expr, Symbol};

/// Result of one math turn.
#[derive(Debug)]
pub enum Outcome {
  Success(Answer),
  EmptyExpression,
  Error(MathError),
}

/// A computed value. Diagnostics are answers too: they are shown to the
/// user like any other result.
#[derive(Debug, Clone, PartialEq)]
pub enum Answer {
  Value(Expr),
  Solutions(Solutions),
  Diagnostic(Diagnostic),
}

impl fmt::Display for Answer {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Answer::Value(expr) => write!(f, "{expr}"),
      Answer::Solutions(solutions) => write!(f, "{solutions}"),
      Answer::Diagnostic(diagnostic) => write!(f, "{diagnostic}"),
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Diagnostic {
  Unsolvable,
  NoDerivativeVariable,
  NoIntegralVariable,
}

impl Diagnostic {
  pub fn message(self) -> &'static str {
    match self {
      Diagnostic::Unsolvable => {
        "نتوانستم این معادله را حل کنم. شاید خیلی پیچیده بود یا فرمت صحیحی نداشت."
      }
      Diagnostic::NoDerivativeVariable => {
        "برای مشتق‌گیری نیاز به یک متغیر دارم (مثل x)."
      }
      Diagnostic::NoIntegralVariable => {
        "برای انتگرال‌گیری نیاز به یک متغیر دارم (مثل x)."
      }
    }
  }
}

impl fmt::Display for Diagnostic {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.message())
  }
}

/// First symbol of the fixed set that occurs free in `expr`.
pub fn first_free_symbol(expr: &Expr) -> Option<Symbol> {
  Symbol::all().find(|s| expr.contains_symbol(*s))
}

/// Numeric evaluation applies only when the top-level node is a number
/// literal or a power.
fn is_numeric_literal_or_power(expr: &Expr) -> bool {
  matches!(
    expr,
    Expr::Integer(_)
      | Expr::Rational(..)
      | Expr::Real(_)
      | Expr::Power(..)
      | Expr::BinaryOp {
        op: BinaryOperator::Power,
        ..
      }
  )
}

fn reject_equation(command: Command, expr: &Expr) -> Result<(), MathError> {
  if matches!(expr, Expr::Equation { .. }) {
    return Err(MathError::Unsupported(format!(
      "{command} of an equation"
    )));
  }
  Ok(())
}

pub fn dispatch(command: Command, expr: &Expr) -> Result<Answer, MathError> {
  debug!(%command, %expr, "dispatching");
  let answer = match command {
    Command::Solve => {
      let solutions = solve(expr);
      if solutions.is_empty() {
        Answer::Diagnostic(Diagnostic::Unsolvable)
      } else {
        Answer::Solutions(solutions)
      }
    }
    Command::Derivative => {
      reject_equation(command, expr)?;
      match first_free_symbol(expr) {
        Some(var) => Answer::Value(differentiate(expr, var)),
        None => Answer::Diagnostic(Diagnostic::NoDerivativeVariable),
      }
    }
    Command::Integral => {
      reject_equation(command, expr)?;
      match first_free_symbol(expr) {
        Some(var) => Answer::Value(integrate(expr, var)),
        None => Answer::Diagnostic(Diagnostic::NoIntegralVariable),
      }
    }
    Command::Simplify => Answer::Value(simplify(expr)),
    Command::Evaluate => {
      if is_numeric_literal_or_power(expr) {
        Answer::Value(evalf(expr))
      } else {
        Answer::Value(simplify(expr))
      }
    }
  };
  Ok(answer)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::parser::parse_expression;

  fn run(command: Command, input: &str) -> String {
    let expr = parse_expression(input).unwrap();
    dispatch(command, &expr).unwrap().to_string()
  }

  #[test]
  fn variable_selection_follows_symbol_order() {
    let expr = parse_expression("a*y + x").unwrap();
    assert_eq!(first_free_symbol(&expr), Symbol::from_name("x"));
    let expr = parse_expression("b*t").unwrap();
    assert_eq!(first_free_symbol(&expr), Symbol::from_name("t"));
  }

  #[test]
  fn differentiates_in_first_symbol() {
    assert_eq!(run(Command::Derivative, "a*y^2 + y"), "2*a*y + 1");
  }

  #[test]
  fn constant_input_needs_a_variable() {
    assert_eq!(
      run(Command::Derivative, "5"),
      Diagnostic::NoDerivativeVariable.message()
    );
    assert_eq!(
      run(Command::Integral, "pi"),
      Diagnostic::NoIntegralVariable.message()
    );
  }

  #[test]
  fn evaluate_numeric_literals_and_powers() {
    assert_eq!(run(Command::Evaluate, "5"), "5.00000000000000");
    assert_eq!(run(Command::Evaluate, "2^10"), "1024.00000000000");
  }

  #[test]
  fn evaluate_other_shapes_simplifies() {
    assert_eq!(run(Command::Evaluate, "x + x"), "2*x");
    assert_eq!(run(Command::Evaluate, "1 + 2"), "3");
  }

  #[test]
  fn calculus_on_equations_is_unsupported() {
    let expr = parse_expression("x = 2").unwrap();
    assert!(matches!(
      dispatch(Command::Derivative, &expr),
      Err(MathError::Unsupported(_))
    ));
  }

  #[test]
  fn unsolvable_is_a_diagnostic() {
    let expr = parse_expression("2 = 3").unwrap();
    assert_eq!(
      dispatch(Command::Solve, &expr).unwrap(),
      Answer::Diagnostic(Diagnostic::Unsolvable)
    );
  }
}
