use super::*;
use ostad::classifier::{IntentClassifier, IntentDataset, TfIdfClassifier};
use ostad::conversation::Chat;
use std::path::Path;

const INTENTS: &str = r#"{
  "intents": [
    { "tag": "greeting", "patterns": ["سلام", "درود"],
      "responses": ["درود {name}!"] },
    { "tag": "introduction", "patterns": ["اسم من علی است", "من سارا هستم"],
      "responses": ["خوشبختم {name}!"] },
    { "tag": "thanks", "patterns": ["مرسی", "ممنون"], "responses": [] }
  ]
}"#;

fn chat() -> Chat<TfIdfClassifier> {
  let dataset =
    IntentDataset::from_json(INTENTS, Path::new("intents.json")).unwrap();
  let classifier = TfIdfClassifier::train(&dataset);
  Chat::new(classifier, dataset, professor())
}

#[test]
fn name_is_remembered_after_introduction() {
  let mut chat = chat();
  assert_eq!(chat.respond("سلام"), "درود {name}!");
  assert_eq!(chat.respond("من مریم هستم"), "خوشبختم مریم!");
  assert_eq!(chat.session().name(), Some("مریم"));
  assert_eq!(chat.respond("سلام"), "درود مریم!");
}

#[test]
fn math_requests_are_handed_off() {
  let mut chat = chat();
  assert_eq!(
    chat.respond("مشتق x**2 رو بگیر"),
    "The answer is: 2*x! Amazing!"
  );
}

#[test]
fn unknown_input_gets_an_error_template() {
  let mut chat = chat();
  assert_eq!(chat.respond("کتابخانه"), "Oops, I didn't get that.");
  assert_eq!(chat.respond("مرسی"), "Oops, I didn't get that.");
}

#[test]
fn bundled_dataset_covers_basic_intents() {
  let dataset = IntentDataset::load(Path::new("data/intents.json")).unwrap();
  let classifier = TfIdfClassifier::train(&dataset);
  assert_eq!(classifier.classify("سلام"), Some("greeting".to_string()));
  assert_eq!(classifier.classify("خیلی ممنون"), Some("thanks".to_string()));
  assert_eq!(
    classifier.classify("اسم من علی است"),
    Some("introduction".to_string())
  );
}
