use super::*;

mod equations {
  use super::*;

  #[test]
  fn quadratic_with_trigger_first() {
    assert_eq!(answer("معادله x^2 - 4 = 0 رو حل کن"), "[-2, 2]");
  }

  #[test]
  fn trigger_variants() {
    assert_eq!(answer("حل کن 2*x + 3 = 7"), "[2]");
    assert_eq!(answer("جواب بده: x^2 = 4"), "[-2, 2]");
    assert_eq!(answer("پیدا کن x^3 - 6*x^2 + 11*x - 6 = 0"), "[1, 2, 3]");
  }

  #[test]
  fn persian_digits_and_operators() {
    assert_eq!(answer("حل کن ۲×x = ۸"), "[4]");
  }

  #[test]
  fn expression_without_equals_is_set_to_zero() {
    assert_eq!(answer("معادله x^2 - 2"), "[-sqrt(2), sqrt(2)]");
  }

  #[test]
  fn complex_roots() {
    assert_eq!(answer("معادله x^2 + 1 = 0"), "[-I, I]");
  }

  #[test]
  fn several_unknowns() {
    assert_eq!(answer("حل کن x + y = 3"), "[{x: -y + 3}]");
  }

  #[test]
  fn product_of_unknowns_keeps_every_branch() {
    assert_eq!(answer("حل کن x*y = 0"), "[{x: 0}, {y: 0}]");
  }
}

mod failures {
  use super::*;

  #[test]
  fn no_solution_is_a_diagnostic() {
    assert_eq!(diagnostic("حل کن 2 = 3"), Diagnostic::Unsolvable);
    assert_eq!(diagnostic("حل کن sqrt(x) = -3"), Diagnostic::Unsolvable);
  }

  #[test]
  fn chained_equals_is_an_error() {
    assert!(is_error("حل کن x = 1 = 2"));
  }

  #[test]
  fn text_before_the_trigger_is_not_the_expression() {
    assert!(is_empty_expression("x^2 = 4 رو حل کن"));
  }

  #[test]
  fn unknown_words_are_errors() {
    assert!(is_error("حل کن foo = 2"));
  }
}
