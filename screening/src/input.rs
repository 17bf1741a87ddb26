//! Inbound text normalisation.

use std::fmt;

/// Commands honoured in every state, before any state-dependent logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Delete the session and unsubscribe.
    Stop,
    /// Static resource menu.
    Help,
    /// Static clinic contact list.
    Clinic,
    /// Restart the screening at the first question.
    Screen,
}

impl Command {
    fn from_normalized(text: &str) -> Option<Self> {
        match text {
            "stop" => Some(Command::Stop),
            "help" => Some(Command::Help),
            "clinic" => Some(Command::Clinic),
            "screen" => Some(Command::Screen),
            _ => None,
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Command::Stop => "STOP",
            Command::Help => "HELP",
            Command::Clinic => "CLINIC",
            Command::Screen => "SCREEN",
        };
        f.write_str(name)
    }
}

/// A recognised yes/no reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Answer {
    Yes,
    No,
}

impl Answer {
    /// Risk coding of the answer: "no" indicates risk.
    pub fn risk_code(self) -> u8 {
        match self {
            Answer::Yes => 0,
            Answer::No => 1,
        }
    }
}

/// One inbound message after trimming and lowercasing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Command(Command),
    Answer(Answer),
    /// Anything else, normalised.
    Text(String),
}

impl Input {
    pub fn parse(raw: &str) -> Self {
        let normalized = raw.trim().to_lowercase();
        if let Some(command) = Command::from_normalized(&normalized) {
            return Input::Command(command);
        }
        match normalized.as_str() {
            "yes" => Input::Answer(Answer::Yes),
            "no" => Input::Answer(Answer::No),
            _ => Input::Text(normalized),
        }
    }
}
