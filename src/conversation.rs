//! Conversational mode: intent replies, name memory and math hand-off.

use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, info};

use crate::Professor;
use crate::classifier::{IntentClassifier, IntentDataset};
use crate::command::has_trigger;
use crate::normalizer::normalize_command;
use crate::responses::ERROR_MESSAGES;
use crate::session::Session;

/// Tag whose utterances carry the user's name.
pub const INTRODUCTION_TAG: &str = "introduction";

static NAME_IS: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"(?:اسم من|اسمم)\s+(\S+)").unwrap());
static I_AM: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"من\s+(\S+)\s+هستم").unwrap());

/// The name in "اسم من X" or "من X هستم".
pub fn extract_name(text: &str) -> Option<String> {
  let text = normalize_command(text);
  [&*NAME_IS, &*I_AM].into_iter().find_map(|re| {
    let raw = re.captures(&text)?.get(1)?.as_str();
    let name = raw.trim_matches(|c: char| !c.is_alphanumeric());
    (!name.is_empty()).then(|| name.to_string())
  })
}

/// One conversation: classifier-driven replies over a single session.
pub struct Chat<C> {
  classifier: C,
  dataset: IntentDataset,
  professor: Professor,
  session: Session,
}

impl<C: IntentClassifier> Chat<C> {
  pub fn new(
    classifier: C,
    dataset: IntentDataset,
    professor: Professor,
  ) -> Self {
    Chat {
      classifier,
      dataset,
      professor,
      session: Session::new(),
    }
  }

  pub fn session(&self) -> &Session {
    &self.session
  }

  pub fn professor_mut(&mut self) -> &mut Professor {
    &mut self.professor
  }

  pub fn respond(&mut self, input: &str) -> String {
    if has_trigger(&normalize_command(input)) {
      return self.professor.math_reply(input, &self.session);
    }

    let Some(tag) = self.classifier.classify(input) else {
      debug!(input, "no intent");
      return self
        .professor
        .composer_mut()
        .pick(ERROR_MESSAGES, &self.session);
    };

    if tag == INTRODUCTION_TAG
      && let Some(name) = extract_name(input)
    {
      info!(%name, "remembering name");
      self.session.remember_name(name);
    }

    let templates = self.dataset.responses(&tag);
    let composer = self.professor.composer_mut();
    if templates.is_empty() {
      composer.pick(ERROR_MESSAGES, &self.session)
    } else {
      composer.choose(templates, &self.session)
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn extracts_names() {
    assert_eq!(extract_name("سلام، اسم من علی است"), Some("علی".into()));
    assert_eq!(extract_name("اسمم سارا!"), Some("سارا".into()));
    assert_eq!(extract_name("من رضا هستم"), Some("رضا".into()));
    assert_eq!(extract_name("اسم من"), None);
    assert_eq!(extract_name("خوبم"), None);
  }
}
