//! Read-eval-print loops for the math and chat modes.

use std::io::{self, BufRead, Write};

use crate::Professor;
use crate::classifier::IntentClassifier;
use crate::conversation::Chat;
use crate::responses::{FAREWELLS, GREETINGS};
use crate::session::Session;

/// Inputs that end a loop, compared case-insensitively.
pub const EXIT_TOKENS: [&str; 4] = ["خداحافظ", "بای", "exit", "quit"];

pub const USER_PROMPT: &str = "\nشما: ";
pub const REPLY_PREFIX: &str = "پروفسور بامزه: ";

const USAGE: &str = "می‌تونی بپرسی: 'معادله x^2 - 4 = 0 رو حل کن', 'مشتق x**3 + 2*x رو بگیر', 'انتگرال x*sin(x) رو حساب کن'\n\
همچنین می‌تونی عبارات رو ساده کنی: 'ساده کن: (x+y)^2' یا 'مقدار cos(pi)'\n\
برای خروج بنویس 'خداحافظ' یا 'بای'.";

pub fn is_exit(line: &str) -> bool {
  let line = line.trim().to_lowercase();
  EXIT_TOKENS.contains(&line.as_str())
}

/// Prompt and read one line; `None` at end of input.
fn read_turn<R: BufRead, W: Write>(
  input: &mut R,
  output: &mut W,
) -> io::Result<Option<String>> {
  write!(output, "{USER_PROMPT}")?;
  output.flush()?;
  let mut line = String::new();
  if input.read_line(&mut line)? == 0 {
    return Ok(None);
  }
  Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}

/// The math loop: every line is a math request.
pub fn run_math<R: BufRead, W: Write>(
  professor: &mut Professor,
  mut input: R,
  mut output: W,
) -> io::Result<()> {
  let session = Session::new();
  let greeting = professor.composer_mut().pick(GREETINGS, &session);
  writeln!(output, "{greeting}")?;
  writeln!(output, "{USAGE}")?;

  while let Some(line) = read_turn(&mut input, &mut output)? {
    if is_exit(&line) {
      let farewell = professor.composer_mut().pick(FAREWELLS, &session);
      writeln!(output, "{farewell}")?;
      break;
    }
    let reply = professor.math_reply(&line, &session);
    writeln!(output, "{REPLY_PREFIX}{reply}")?;
  }
  Ok(())
}

/// The conversational loop: intents first, math when a trigger is present.
pub fn run_chat<C: IntentClassifier, R: BufRead, W: Write>(
  chat: &mut Chat<C>,
  mut input: R,
  mut output: W,
) -> io::Result<()> {
  let session = chat.session().clone();
  let greeting = chat.professor_mut().composer_mut().pick(GREETINGS, &session);
  writeln!(output, "{greeting}")?;

  while let Some(line) = read_turn(&mut input, &mut output)? {
    if is_exit(&line) {
      let session = chat.session().clone();
      let farewell =
        chat.professor_mut().composer_mut().pick(FAREWELLS, &session);
      writeln!(output, "{farewell}")?;
      break;
    }
    let reply = chat.respond(&line);
    writeln!(output, "{REPLY_PREFIX}{reply}")?;
  }
  Ok(())
}
