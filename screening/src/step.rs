//! Conversation position of one user.

use serde::Serialize;
use std::fmt;

/// Where a user is in the conversation. `Question(i)` is zero-based; it is shown as `Q{i + 1}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Step {
    /// Waiting for the user to agree to start.
    #[default]
    OptIn,
    /// Zero-based question index. The enum does not know the question count; `transition`
    /// checks the index against the config and answers an out-of-range index with the fallback.
    Question(usize),
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::OptIn => f.write_str("OPT_IN"),
            Step::Question(index) => write!(f, "Q{}", index + 1),
        }
    }
}

/// Transient per-user progress. While at `Question(i)`, `answers.len() == i`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Session {
    pub step: Step,
    /// Risk codes of the questions answered so far, in order.
    pub answers: Vec<u8>,
}

impl Session {
    /// Fresh session waiting for opt-in.
    pub fn opt_in() -> Self {
        Self::default()
    }

    /// Session at the first question with no answers recorded.
    pub fn at_first_question() -> Self {
        Self {
            step: Step::Question(0),
            answers: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_display() {
        assert_eq!(Step::OptIn.to_string(), "OPT_IN");
        assert_eq!(Step::Question(0).to_string(), "Q1");
        assert_eq!(Step::Question(4).to_string(), "Q5");
    }

    #[test]
    fn test_default_session_is_opt_in() {
        let session = Session::opt_in();
        assert_eq!(session.step, Step::OptIn);
        assert!(session.answers.is_empty());
    }
}
