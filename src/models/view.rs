/// State machine for one fetched view. Exactly one tag is live at a time and
/// transitions are monotonic within a fetch cycle: `Loading` settles into one
/// of the other three, and only an explicit retry restarts at `Loading`.
///
/// `SessionExpired` is terminal for the current credential: unlike `Error` it
/// is not retryable, the user has to authenticate again.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState<T> {
    Loading,
    Error(String),
    SessionExpired,
    Ready(T),
}

impl<T> ViewState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Loading)
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, ViewState::Ready(_))
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            ViewState::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ViewState::Error(message) => Some(message),
            _ => None,
        }
    }
}
