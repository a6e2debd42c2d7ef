//! Canned response templates and the composer that turns a math outcome
//! into a sentence.

use std::collections::HashMap;
use std::path::Path;

use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;
use serde::Deserialize;
use tracing::warn;

use crate::ResourceError;
use crate::dispatch::Outcome;
use crate::session::Session;

pub const GREETINGS: &str = "greetings";
pub const FAREWELLS: &str = "farewells";
pub const POSITIVE_FEEDBACK: &str = "positive_feedback";
pub const ERROR_MESSAGES: &str = "error_messages";
pub const RESULT_PREFIXES: &str = "result_prefixes";
pub const INTRO_COMMANDS: &str = "intro_commands";

/// Placeholder replaced by the remembered user name.
pub const NAME_PLACEHOLDER: &str = "{name}";

/// Reply for a category with no templates.
pub const NOT_SURE: &str = "I'm not sure how to respond to that.";

/// Appended to the error template when no expression was found.
pub const CLARIFY_SUFFIX: &str = " (لطفاً سوالتو واضح بگو!)";

/// Category name → templates, read once at startup.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct ResponseBank {
  categories: HashMap<String, Vec<String>>,
}

impl ResponseBank {
  pub fn from_json(text: &str, path: &Path) -> Result<Self, ResourceError> {
    serde_json::from_str(text).map_err(|source| ResourceError::Json {
      path: path.display().to_string(),
      source,
    })
  }

  pub fn load(path: &Path) -> Result<Self, ResourceError> {
    let text =
      std::fs::read_to_string(path).map_err(|source| ResourceError::Io {
        path: path.display().to_string(),
        source,
      })?;
    Self::from_json(&text, path)
  }

  /// A missing file falls back to [`ResponseBank::fallback`] with a
  /// warning; any other failure is returned.
  pub fn load_or_fallback(path: &Path) -> Result<Self, ResourceError> {
    match Self::load(path) {
      Err(ResourceError::Io { source, .. })
        if source.kind() == std::io::ErrorKind::NotFound =>
      {
        warn!(
          "Error: {} not found. Using default responses.",
          path.display()
        );
        Ok(Self::fallback())
      }
      other => other,
    }
  }

  pub fn fallback() -> Self {
    let entries = [
      (GREETINGS, "Hello!"),
      (FAREWELLS, "Goodbye!"),
      (POSITIVE_FEEDBACK, "Amazing!"),
      (ERROR_MESSAGES, "Oops, I didn't get that."),
      (RESULT_PREFIXES, "The answer is: "),
      (INTRO_COMMANDS, "solve"),
    ];
    ResponseBank {
      categories: entries
        .into_iter()
        .map(|(k, v)| (k.to_string(), vec![v.to_string()]))
        .collect(),
    }
  }

  pub fn templates(&self, category: &str) -> &[String] {
    self
      .categories
      .get(category)
      .map(Vec::as_slice)
      .unwrap_or(&[])
  }
}

/// Substitute the remembered name into a template. Without a name the
/// placeholder is left as written.
pub fn fill_name(template: &str, session: &Session) -> String {
  if !template.contains(NAME_PLACEHOLDER) {
    return template.to_string();
  }
  match session.name() {
    Some(name) => template.replace(NAME_PLACEHOLDER, name),
    None => {
      warn!(template, "no remembered name for placeholder");
      template.to_string()
    }
  }
}

/// Picks templates at random and assembles replies.
pub struct Composer {
  bank: ResponseBank,
  rng: ChaCha8Rng,
}

impl Composer {
  pub fn new(bank: ResponseBank) -> Self {
    Composer {
      bank,
      rng: ChaCha8Rng::from_entropy(),
    }
  }

  /// Deterministic template choice.
  pub fn with_seed(bank: ResponseBank, seed: u64) -> Self {
    Composer {
      bank,
      rng: ChaCha8Rng::seed_from_u64(seed),
    }
  }

  /// A random template from `templates`, or the "not sure" text.
  pub fn choose(&mut self, templates: &[String], session: &Session) -> String {
    match templates.choose(&mut self.rng) {
      Some(template) => fill_name(template, session),
      None => NOT_SURE.to_string(),
    }
  }

  /// A random template of a bank category.
  pub fn pick(&mut self, category: &str, session: &Session) -> String {
    let templates = self.bank.templates(category).to_vec();
    self.choose(&templates, session)
  }

  pub fn compose(&mut self, outcome: &Outcome, session: &Session) -> String {
    match outcome {
      Outcome::Success(answer) => {
        let prefix = self.pick(RESULT_PREFIXES, session);
        let feedback = self.pick(POSITIVE_FEEDBACK, session);
        format!("{prefix}{answer}! {feedback}")
      }
      Outcome::EmptyExpression => {
        let message = self.pick(ERROR_MESSAGES, session);
        format!("{message}{CLARIFY_SUFFIX}")
      }
      Outcome::Error(_) => self.pick(ERROR_MESSAGES, session),
    }
  }
}
