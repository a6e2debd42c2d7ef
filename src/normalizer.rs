//! Persian text normalization.
//!
//! [`normalize`] is the strict form fed to the intent classifier: letters
//! only. [`normalize_command`] keeps digits, Latin identifiers and operators
//! so the math pipeline can still find an expression in the text.

const ZERO_WIDTH_NON_JOINER: char = '\u{200C}';
const TATWEEL: char = '\u{0640}';

/// Map Arabic look-alike glyphs onto their Persian forms.
fn unify(c: char) -> char {
  match c {
    'ي' | 'ى' => 'ی',
    'ك' => 'ک',
    'ة' | 'ۀ' => 'ه',
    'أ' | 'إ' | 'ٱ' => 'ا',
    'ؤ' => 'و',
    _ => c,
  }
}

/// Harakat, tanwin, superscript alef and friends.
fn is_diacritic(c: char) -> bool {
  matches!(c, '\u{064B}'..='\u{065F}' | '\u{0670}' | '\u{06D6}'..='\u{06ED}')
}

fn is_persian_letter(c: char) -> bool {
  ('\u{0600}'..='\u{06FF}').contains(&c) && c.is_alphabetic()
}

/// Persian (۰-۹) and Arabic-Indic (٠-٩) digits as ASCII.
fn ascii_digit(c: char) -> Option<char> {
  let offset = match c {
    '۰'..='۹' => c as u32 - '۰' as u32,
    '٠'..='٩' => c as u32 - '٠' as u32,
    _ => return None,
  };
  char::from_digit(offset, 10)
}

fn collapse_whitespace(text: &str) -> String {
  text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Unify look-alike glyphs, drop everything that is not a Persian letter or
/// whitespace (digits included), collapse whitespace and trim.
pub fn normalize(text: &str) -> String {
  let mut out = String::with_capacity(text.len());
  for c in text.chars() {
    if is_diacritic(c) || c == TATWEEL {
      continue;
    }
    let c = unify(c);
    if c == ZERO_WIDTH_NON_JOINER || c.is_whitespace() {
      out.push(' ');
    } else if is_persian_letter(c) {
      out.push(c);
    }
  }
  collapse_whitespace(&out)
}

/// Normalization for the math path: glyph unification, ASCII digits and
/// operators, lowercase Latin text, collapsed whitespace.
pub fn normalize_command(text: &str) -> String {
  let mut out = String::with_capacity(text.len());
  for c in text.chars() {
    if is_diacritic(c) || c == TATWEEL {
      continue;
    }
    if let Some(digit) = ascii_digit(c) {
      out.push(digit);
      continue;
    }
    match unify(c) {
      ZERO_WIDTH_NON_JOINER => out.push(' '),
      '×' => out.push('*'),
      '÷' => out.push('/'),
      '−' | '–' => out.push('-'),
      '٫' => out.push('.'),
      c => out.push(c.to_ascii_lowercase()),
    }
  }
  collapse_whitespace(&out)
}

#[cfg(test)]
mod tests {
  use super::*;
  use proptest::prelude::*;

  #[test]
  fn unifies_arabic_glyphs() {
    assert_eq!(normalize("علي كتاب"), "علی کتاب");
    assert_eq!(normalize("مدرسة"), "مدرسه");
  }

  #[test]
  fn strips_digits_punctuation_and_latin() {
    assert_eq!(normalize("سلام! ۱۲۳ hello  دوست"), "سلام دوست");
    assert_eq!(normalize("چطوری؟"), "چطوری");
  }

  #[test]
  fn splits_on_zero_width_non_joiner() {
    assert_eq!(normalize("می\u{200C}خواهم"), "می خواهم");
  }

  #[test]
  fn drops_diacritics_and_tatweel() {
    assert_eq!(normalize("سَلامـــ"), "سلام");
  }

  #[test]
  fn command_form_keeps_math() {
    assert_eq!(
      normalize_command("مشتق  X**۳ + ۲×x رو بگیر"),
      "مشتق x**3 + 2*x رو بگیر"
    );
    assert_eq!(normalize_command("۱٫۵ ÷ ٣"), "1.5 / 3");
  }

  proptest! {
    #[test]
    fn normalize_is_idempotent(s in "\\PC{0,40}") {
      let once = normalize(&s);
      prop_assert_eq!(normalize(&once), once);
    }

    #[test]
    fn persian_text_is_idempotent(s in "[آ-ی ۰-۹يكة\u{200C}a-z!؟]{0,40}") {
      let once = normalize(&s);
      prop_assert_eq!(normalize(&once), once);
    }

    #[test]
    fn command_normalization_is_idempotent(s in "[آ-ی x-z0-9۰-۹+*/^()=×÷]{0,40}") {
      let once = normalize_command(&s);
      prop_assert_eq!(normalize_command(&once), once);
    }
  }
}
