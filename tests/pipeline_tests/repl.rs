use super::*;
use ostad::repl::{REPLY_PREFIX, run_math};
use std::io::Cursor;

fn transcript(input: &str) -> String {
  let mut professor = professor();
  let mut output = Vec::new();
  run_math(&mut professor, Cursor::new(input), &mut output).unwrap();
  String::from_utf8(output).unwrap()
}

#[test]
fn greets_answers_and_says_goodbye() {
  let out = transcript("مشتق x**2\nبای\nمقدار 1\n");
  assert!(out.starts_with("Hello!\n"));
  assert!(out.contains(&format!("{REPLY_PREFIX}The answer is: 2*x! Amazing!")));
  assert!(out.trim_end().ends_with("Goodbye!"));
  assert!(!out.contains("1.00000000000000"));
}

#[test]
fn end_of_input_stops_quietly() {
  let out = transcript("مقدار 2^3");
  assert!(out.contains("8.00000000000000"));
  assert!(!out.contains("Goodbye!"));
}
