/// State carried across the turns of one conversation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
  name: Option<String>,
}

impl Session {
  pub fn new() -> Self {
    Self::default()
  }

  /// The name the user introduced themselves with, if any.
  pub fn name(&self) -> Option<&str> {
    self.name.as_deref()
  }

  pub fn remember_name(&mut self, name: impl Into<String>) {
    self.name = Some(name.into());
  }
}
