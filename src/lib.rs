use pest_derive::Parser;
use thiserror::Error;
use tracing::{debug, warn};

pub mod classifier;
pub mod command;
pub mod conversation;
pub mod dispatch;
pub mod functions;
pub mod normalizer;
pub mod parser;
pub mod repl;
pub mod responses;
pub mod session;
pub mod syntax;

use command::{ParsedRequest, detect, extract_expression};
use dispatch::{Outcome, dispatch};
use responses::Composer;
use session::Session;

#[derive(Parser)]
#[grammar = "math.pest"]
pub struct MathParser;

#[derive(Error, Debug)]
pub enum ParseError {
  #[error("Syntax error: {0}")]
  Syntax(#[from] Box<pest::error::Error<Rule>>),
  #[error("Empty input")]
  EmptyInput,
  #[error("Unknown identifier: {0}")]
  UnknownIdentifier(String),
  #[error("Unknown function: {0}")]
  UnknownFunction(String),
  #[error("Invalid number: {0}")]
  InvalidNumber(String),
  #[error("{name} expects {expected} argument(s), got {got}")]
  WrongArity {
    name: String,
    expected: usize,
    got: usize,
  },
  #[error("More than one '=' in an equation")]
  ChainedEquation,
}

#[derive(Error, Debug)]
pub enum MathError {
  #[error(transparent)]
  Parse(#[from] ParseError),
  #[error("Unsupported operation: {0}")]
  Unsupported(String),
}

#[derive(Error, Debug)]
pub enum ResourceError {
  #[error("Cannot read {path}: {source}")]
  Io {
    path: String,
    #[source]
    source: std::io::Error,
  },
  #[error("Malformed {path}: {source}")]
  Json {
    path: String,
    #[source]
    source: serde_json::Error,
  },
}

/// The math core: one user turn in, one friendly sentence out.
pub struct Professor {
  composer: Composer,
}

impl Professor {
  pub fn new(composer: Composer) -> Self {
    Professor { composer }
  }

  pub fn composer_mut(&mut self) -> &mut Composer {
    &mut self.composer
  }

  /// Run the math pipeline on raw user text without composing a reply.
  pub fn solve_turn(&self, input: &str) -> Outcome {
    let text = normalizer::normalize_command(input);
    let request = detect(&text);
    run_request(&request)
  }

  /// Answer a math turn with a templated sentence.
  pub fn math_reply(&mut self, input: &str, session: &Session) -> String {
    let outcome = self.solve_turn(input);
    self.composer.compose(&outcome, session)
  }
}

/// Extract, parse and dispatch the expression of a detected request.
pub fn run_request(request: &ParsedRequest) -> Outcome {
  let expression = extract_expression(&request.raw_expression_text);
  debug!(command = ?request.command, %expression, "detected request");
  if expression.is_empty() {
    return Outcome::EmptyExpression;
  }

  let result = parser::parse_expression(&expression)
    .map_err(MathError::from)
    .and_then(|expr| dispatch(request.command, &expr));
  match result {
    Ok(answer) => Outcome::Success(answer),
    Err(err) => {
      warn!(%expression, "math error: {err}");
      Outcome::Error(err)
    }
  }
}
