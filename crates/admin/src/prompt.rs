//! The confirmation capability destructive admin actions go through.

/// Asks the operator before anything irreversible happens.
///
/// The CLI backs this with terminal prompts; tests use [`StaticPrompt`].
pub trait Prompt: Send + Sync {
    /// Yes/no question. `false` aborts the action with no request sent.
    fn confirm(&self, question: &str) -> bool;

    /// Free-text question. `None` aborts the action.
    fn input(&self, question: &str) -> Option<String>;
}

/// A prompt with scripted answers.
#[derive(Debug, Clone, Default)]
pub struct StaticPrompt {
    pub confirm_answer: bool,
    pub input_answer: Option<String>,
}

impl StaticPrompt {
    /// A prompt that approves everything and answers `text` to questions.
    #[must_use]
    pub fn approving(text: &str) -> Self {
        Self {
            confirm_answer: true,
            input_answer: Some(text.to_owned()),
        }
    }

    /// A prompt that declines everything.
    #[must_use]
    pub const fn declining() -> Self {
        Self {
            confirm_answer: false,
            input_answer: None,
        }
    }
}

impl Prompt for StaticPrompt {
    fn confirm(&self, _question: &str) -> bool {
        self.confirm_answer
    }

    fn input(&self, _question: &str) -> Option<String> {
        self.input_answer.clone()
    }
}
