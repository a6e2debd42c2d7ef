use super::*;

mod derivative {
  use super::*;

  #[test]
  fn polynomial() {
    assert_eq!(answer("مشتق x**3 + 2*x رو بگیر"), "3*x**2 + 2");
  }

  #[test]
  fn chain_rule() {
    assert_eq!(answer("مشتق sin(2*x)"), "2*cos(2*x)");
  }

  #[test]
  fn picks_first_symbol_in_order() {
    assert_eq!(answer("مشتق a*y^2 + y"), "2*a*y + 1");
  }

  #[test]
  fn constant_needs_a_variable() {
    assert_eq!(diagnostic("مشتق 5"), Diagnostic::NoDerivativeVariable);
  }

  #[test]
  fn trigger_alone_is_empty() {
    assert!(is_empty_expression("مشتق"));
    assert!(is_empty_expression("مشتق رو بگیر"));
  }

  #[test]
  fn persian_words_reach_the_parser() {
    assert!(is_error("مشتق رو نسبت به y بگیر"));
  }
}

mod integral {
  use super::*;

  #[test]
  fn by_parts() {
    assert_eq!(
      answer("انتگرال x*sin(x) رو حساب کن"),
      "-x*cos(x) + sin(x)"
    );
  }

  #[test]
  fn power_rule() {
    assert_eq!(answer("انتگرال x^2"), "x**3/3");
    assert_eq!(answer("انتگرال 1/x"), "log(x)");
  }

  #[test]
  fn unsupported_integrand_stays_unevaluated() {
    assert_eq!(answer("انتگرال exp(x^2)"), "Integral(exp(x**2), x)");
  }

  #[test]
  fn constant_needs_a_variable() {
    assert_eq!(diagnostic("انتگرال pi"), Diagnostic::NoIntegralVariable);
  }

  #[test]
  fn equation_is_an_error() {
    assert!(is_error("انتگرال x = 1"));
  }
}
