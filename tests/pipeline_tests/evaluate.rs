use super::*;

#[test]
fn cos_pi_is_minus_one() {
  assert_eq!(answer("مقدار cos(pi)"), "-1");
}

#[test]
fn numeric_literals_and_powers_are_evaluated() {
  assert_eq!(answer("مقدار 5"), "5.00000000000000");
  assert_eq!(answer("چی میشه ۲^۱۰"), "1024.00000000000");
  assert_eq!(answer("مقدار 2**0.5"), "1.41421356237310");
}

#[test]
fn negative_bases_evaluate_to_principal_values() {
  assert_eq!(
    answer("مقدار (-8)^(1/3)"),
    "1.73205080756888*I + 1.00000000000000"
  );
}

#[test]
fn other_shapes_are_simplified() {
  assert_eq!(answer("مقدار 1 + 2"), "3");
  assert_eq!(answer("مقدار 2*pi"), "2*pi");
}

#[test]
fn untriggered_input_is_evaluated() {
  assert_eq!(answer("2/3"), "2/3");
  assert_eq!(answer("x + x"), "2*x");
}

#[test]
fn undefined_arithmetic_does_not_fail() {
  assert_eq!(answer("1/0"), "zoo");
  assert_eq!(answer("0/0"), "nan");
}

#[test]
fn blank_input_is_empty() {
  assert!(is_empty_expression(""));
  assert!(is_empty_expression("مقدار؟"));
}

#[test]
fn words_outside_the_input_language_are_errors() {
  assert!(is_error("سلام"));
  assert!(is_error("مقدار عدد پی"));
}
