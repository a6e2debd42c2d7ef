//! Intent classification for the conversational mode.
//!
//! The dataset lists intents with example phrases and reply templates. The
//! bundled classifier compares TF-IDF vectors of the normalized input
//! against every example phrase and takes the closest one.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::ResourceError;
use crate::normalizer::normalize;

/// Below this cosine similarity nothing is recognised.
const MIN_SIMILARITY: f64 = 0.3;

#[derive(Debug, Clone, Deserialize)]
pub struct Intent {
  pub tag: String,
  #[serde(default)]
  pub patterns: Vec<String>,
  #[serde(default)]
  pub responses: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct IntentDataset {
  pub intents: Vec<Intent>,
}

impl IntentDataset {
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

  pub fn intent(&self, tag: &str) -> Option<&Intent> {
    self.intents.iter().find(|intent| intent.tag == tag)
  }

  pub fn responses(&self, tag: &str) -> &[String] {
    self
      .intent(tag)
      .map(|intent| intent.responses.as_slice())
      .unwrap_or(&[])
  }
}

/// Maps an utterance onto an intent tag.
pub trait IntentClassifier {
  fn classify(&self, text: &str) -> Option<String>;
}

type SparseVector = HashMap<String, f64>;

/// Nearest example phrase by TF-IDF cosine similarity.
#[derive(Debug, Clone)]
pub struct TfIdfClassifier {
  idf: HashMap<String, f64>,
  examples: Vec<(String, SparseVector)>,
}

fn tokens(text: &str) -> Vec<String> {
  normalize(text)
    .split_whitespace()
    .map(str::to_string)
    .collect()
}

fn cosine(a: &SparseVector, b: &SparseVector) -> f64 {
  let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };
  small
    .iter()
    .filter_map(|(term, weight)| large.get(term).map(|w| w * weight))
    .sum()
}

impl TfIdfClassifier {
  pub fn train(dataset: &IntentDataset) -> Self {
    let documents: Vec<(String, Vec<String>)> = dataset
      .intents
      .iter()
      .flat_map(|intent| {
        intent
          .patterns
          .iter()
          .map(|pattern| (intent.tag.clone(), tokens(pattern)))
      })
      .filter(|(_, terms)| !terms.is_empty())
      .collect();

    let mut document_frequency: HashMap<String, usize> = HashMap::new();
    for (_, terms) in &documents {
      let mut seen: Vec<&String> = Vec::new();
      for term in terms {
        if !seen.contains(&term) {
          seen.push(term);
          *document_frequency.entry(term.clone()).or_default() += 1;
        }
      }
    }

    // Smoothed idf: ln((1 + n) / (1 + df)) + 1.
    let n = documents.len() as f64;
    let idf = document_frequency
      .into_iter()
      .map(|(term, df)| (term, ((1.0 + n) / (1.0 + df as f64)).ln() + 1.0))
      .collect();

    let mut classifier = TfIdfClassifier {
      idf,
      examples: Vec::new(),
    };
    classifier.examples = documents
      .into_iter()
      .map(|(tag, terms)| {
        let vector = classifier.vectorize(&terms);
        (tag, vector)
      })
      .collect();
    debug!(examples = classifier.examples.len(), "trained classifier");
    classifier
  }

  /// L2-normalised TF-IDF vector; unknown terms are ignored.
  fn vectorize(&self, terms: &[String]) -> SparseVector {
    let mut vector = SparseVector::new();
    for term in terms {
      if let Some(idf) = self.idf.get(term) {
        *vector.entry(term.clone()).or_default() += idf;
      }
    }
    let norm = vector.values().map(|w| w * w).sum::<f64>().sqrt();
    if norm > 0.0 {
      for weight in vector.values_mut() {
        *weight /= norm;
      }
    }
    vector
  }
}

impl IntentClassifier for TfIdfClassifier {
  fn classify(&self, text: &str) -> Option<String> {
    let query = self.vectorize(&tokens(text));
    if query.is_empty() {
      return None;
    }
    let (tag, score) = self
      .examples
      .iter()
      .map(|(tag, example)| (tag, cosine(&query, example)))
      .max_by(|a, b| a.1.total_cmp(&b.1))?;
    debug!(%tag, score, "classified");
    (score >= MIN_SIMILARITY).then(|| tag.clone())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn dataset() -> IntentDataset {
    let json = r#"{
      "intents": [
        { "tag": "greeting", "patterns": ["سلام", "سلام خوبی", "درود"],
          "responses": ["سلام!"] },
        { "tag": "goodbye", "patterns": ["خداحافظ", "فعلا خداحافظ"],
          "responses": ["به امید دیدار"] },
        { "tag": "introduction", "patterns": ["اسم من علی است", "من سارا هستم"],
          "responses": ["خوشبختم {name}"] }
      ]
    }"#;
    IntentDataset::from_json(json, Path::new("intents.json")).unwrap()
  }

  #[test]
  fn classifies_close_phrases() {
    let classifier = TfIdfClassifier::train(&dataset());
    assert_eq!(classifier.classify("سلام!"), Some("greeting".to_string()));
    assert_eq!(
      classifier.classify("خداحافظ دوست من"),
      Some("goodbye".to_string())
    );
    assert_eq!(
      classifier.classify("اسم من رضا است"),
      Some("introduction".to_string())
    );
  }

  #[test]
  fn unknown_words_are_unclassified() {
    let classifier = TfIdfClassifier::train(&dataset());
    assert_eq!(classifier.classify("hello world"), None);
    assert_eq!(classifier.classify("کتابخانه"), None);
  }

  #[test]
  fn responses_by_tag() {
    let dataset = dataset();
    assert_eq!(dataset.responses("goodbye"), ["به امید دیدار"]);
    assert!(dataset.responses("missing").is_empty());
  }
}
