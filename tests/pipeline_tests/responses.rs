use super::*;
use ostad::ResourceError;
use ostad::responses::{GREETINGS, NOT_SURE};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

fn bank_file(json: &str) -> NamedTempFile {
  let mut file = NamedTempFile::new().unwrap();
  file.write_all(json.as_bytes()).unwrap();
  file
}

const SINGLE_TEMPLATES: &str = r#"{
  "greetings": ["سلام!"],
  "farewells": ["خداحافظ!"],
  "positive_feedback": ["آفرین!"],
  "error_messages": ["نفهمیدم."],
  "result_prefixes": ["{name} جان، جواب: "]
}"#;

fn professor_with(json: &str) -> Professor {
  let file = bank_file(json);
  let bank = ResponseBank::load(file.path()).unwrap();
  Professor::new(Composer::with_seed(bank, 11))
}

#[test]
fn success_reply_wraps_the_result() {
  let mut professor = professor_with(SINGLE_TEMPLATES);
  let mut session = Session::new();
  session.remember_name("علی");
  assert_eq!(
    professor.math_reply("مشتق x**2 رو بگیر", &session),
    "علی جان، جواب: 2*x! آفرین!"
  );
}

#[test]
fn placeholder_stays_without_a_name() {
  let mut professor = professor_with(SINGLE_TEMPLATES);
  assert_eq!(
    professor.math_reply("مشتق x**2", &Session::new()),
    "{name} جان، جواب: 2*x! آفرین!"
  );
}

#[test]
fn empty_and_error_replies() {
  let mut professor = professor_with(SINGLE_TEMPLATES);
  let session = Session::new();
  assert_eq!(
    professor.math_reply("مشتق", &session),
    "نفهمیدم. (لطفاً سوالتو واضح بگو!)"
  );
  assert_eq!(professor.math_reply("مشتق (x", &session), "نفهمیدم.");
}

#[test]
fn missing_file_uses_fallback() {
  let dir = tempfile::tempdir().unwrap();
  let bank =
    ResponseBank::load_or_fallback(&dir.path().join("missing.json")).unwrap();
  assert_eq!(bank.templates(GREETINGS), ["Hello!"]);
  assert_eq!(bank.templates("intro_commands"), ["solve"]);
}

#[test]
fn malformed_file_is_an_error() {
  let file = bank_file("{ \"greetings\": [");
  assert!(matches!(
    ResponseBank::load_or_fallback(file.path()),
    Err(ResourceError::Json { .. })
  ));
}

#[test]
fn missing_category_is_not_sure() {
  let mut professor = professor_with(r#"{ "greetings": ["سلام"] }"#);
  assert_eq!(
    professor.math_reply("مقدار 1 + 1", &Session::new()),
    format!("{NOT_SURE}2! {NOT_SURE}")
  );
}

#[test]
fn bundled_templates_always_carry_the_result() {
  let bank = ResponseBank::load(Path::new("data/responses.json")).unwrap();
  for seed in 0..20 {
    let mut professor = Professor::new(Composer::with_seed(bank.clone(), seed));
    for (input, result) in [
      ("مشتق x**3 + 2*x", "3*x**2 + 2"),
      ("معادله x^2 - 4 = 0", "[-2, 2]"),
      ("مقدار cos(pi)", "-1"),
    ] {
      let reply = professor.math_reply(input, &Session::new());
      assert!(reply.contains(result), "{reply}");
    }
  }
}
