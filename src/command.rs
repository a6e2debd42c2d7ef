//! Command detection: trigger phrases map a normalized utterance onto one
//! of the math operations and the text that follows the trigger.

use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
  Solve,
  Derivative,
  Integral,
  Simplify,
  Evaluate,
}

impl Command {
  /// Detection priority.
  pub const ALL: [Command; 5] = [
    Command::Solve,
    Command::Derivative,
    Command::Integral,
    Command::Simplify,
    Command::Evaluate,
  ];

  pub fn name(self) -> &'static str {
    match self {
      Command::Solve => "solve",
      Command::Derivative => "derivative",
      Command::Integral => "integral",
      Command::Simplify => "simplify",
      Command::Evaluate => "evaluate",
    }
  }

  fn pattern(self) -> &'static Regex {
    match self {
      Command::Solve => &SOLVE,
      Command::Derivative => &DERIVATIVE,
      Command::Integral => &INTEGRAL,
      Command::Simplify => &SIMPLIFY,
      Command::Evaluate => &EVALUATE,
    }
  }
}

impl fmt::Display for Command {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}

static SOLVE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"(حل کن|جواب بده|پیدا کن|معادله)\s*(.*)").unwrap()
});
static DERIVATIVE: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"(مشتق)\s*(.*)").unwrap());
static INTEGRAL: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"(انتگرال)\s*(.*)").unwrap());
static SIMPLIFY: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"(ساده کن|ساده سازی)\s*(.*)").unwrap());
static EVALUATE: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"(مقدار|چی میشه)\s*(.*)").unwrap());

/// Separators that never belong to an expression.
const SEPARATORS: &[char] = &[':', '،', '؛', '؟', '?', '!'];

/// A detected command and the text after its trigger phrase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRequest {
  pub command: Command,
  pub raw_expression_text: String,
}

/// First command whose trigger matches wins; without a trigger the whole
/// text is an expression to evaluate.
pub fn detect(text: &str) -> ParsedRequest {
  for command in Command::ALL {
    if let Some(caps) = command.pattern().captures(text) {
      let rest = caps.get(2).map_or("", |m| m.as_str());
      return ParsedRequest {
        command,
        raw_expression_text: rest.trim().to_string(),
      };
    }
  }
  ParsedRequest {
    command: Command::Evaluate,
    raw_expression_text: text.to_string(),
  }
}

/// Whether the text carries any math trigger phrase.
pub fn has_trigger(text: &str) -> bool {
  Command::ALL.iter().any(|c| c.pattern().is_match(text))
}

/// Words that surround an expression in a request ("... رو بگیر",
/// "... رو حساب کن") and never belong to it.
const FILLER_WORDS: &[&str] = &[
  "رو", "را", "بگیر", "حساب", "کن", "بکن", "حل", "بده", "لطفا", "عبارت",
  "معادله", "تابع", "چیه", "چنده",
];

/// Drop filler words and separators around an expression, leaving the
/// math. Any other word is kept for the parser to reject.
pub fn extract_expression(residual: &str) -> String {
  let spaced: String = residual
    .chars()
    .map(|c| if SEPARATORS.contains(&c) { ' ' } else { c })
    .collect();
  spaced
    .split_whitespace()
    .filter(|word| !FILLER_WORDS.contains(word))
    .collect::<Vec<_>>()
    .join(" ")
}

#[cfg(test)]
mod tests {
  use super::*;
  use proptest::prelude::*;

  #[test]
  fn detects_each_command() {
    let cases = [
      ("معادله x^2 - 4 = 0 رو حل کن", Command::Solve, "x^2 - 4 = 0 رو حل کن"),
      ("مشتق x**3 + 2*x رو بگیر", Command::Derivative, "x**3 + 2*x رو بگیر"),
      ("انتگرال x*sin(x)", Command::Integral, "x*sin(x)"),
      ("ساده کن: (x+y)^2", Command::Simplify, ": (x+y)^2"),
      ("مقدار cos(pi)", Command::Evaluate, "cos(pi)"),
    ];
    for (text, command, rest) in cases {
      let request = detect(text);
      assert_eq!(request.command, command, "{text}");
      assert_eq!(request.raw_expression_text, rest, "{text}");
    }
  }

  #[test]
  fn solve_wins_over_later_commands() {
    let request = detect("مقدار x رو پیدا کن x + 1 = 3");
    assert_eq!(request.command, Command::Solve);
    assert_eq!(request.raw_expression_text, "x + 1 = 3");
  }

  #[test]
  fn trigger_alone_leaves_empty_residual() {
    assert_eq!(detect("مشتق").raw_expression_text, "");
  }

  #[test]
  fn extraction_drops_filler_and_separators() {
    assert_eq!(extract_expression("x**3 + 2*x رو بگیر"), "x**3 + 2*x");
    assert_eq!(extract_expression(": (x+y)^2"), "(x+y)^2");
    assert_eq!(extract_expression("رو حساب کن؟"), "");
  }

  #[test]
  fn extraction_keeps_other_words() {
    assert_eq!(extract_expression("رو نسبت به y بگیر"), "نسبت به y");
    assert_eq!(extract_expression("سلام"), "سلام");
  }

  proptest! {
    #[test]
    fn untriggered_text_is_evaluated_whole(s in "[a-z0-9+*/^() =-]{0,30}") {
      let request = detect(&s);
      prop_assert_eq!(request.command, Command::Evaluate);
      prop_assert_eq!(request.raw_expression_text, s);
    }
  }
}
