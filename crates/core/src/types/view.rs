//! Screen state shared by every view model.

/// The three mutually exclusive states a screen renders.
///
/// Every view model owns exactly one of these per fetch lifecycle; the
/// variants make "loading spinner alongside stale data" unrepresentable.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ViewState<T> {
    /// Fetch in flight (or not yet started).
    #[default]
    Loading,
    /// Fetch failed; the message is shown in place of content.
    Error(String),
    /// Fetch succeeded.
    Ready(T),
}

impl<T> ViewState<T> {
    /// The ready value, if the fetch has succeeded.
    pub const fn ready(&self) -> Option<&T> {
        match self {
            Self::Ready(value) => Some(value),
            _ => None,
        }
    }

    /// The error message, if the fetch has failed.
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Error(message) => Some(message),
            _ => None,
        }
    }

    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Collapse into a `Result` for callers that render once and exit,
    /// such as one-shot terminal commands.
    ///
    /// # Errors
    ///
    /// Returns the error message; a still-loading state reports itself.
    pub fn into_result(self) -> Result<T, String> {
        match self {
            Self::Ready(value) => Ok(value),
            Self::Error(message) => Err(message),
            Self::Loading => Err("still loading".to_owned()),
        }
    }
}
