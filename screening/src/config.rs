//! Screening configuration: questions, risk threshold, clinic contacts and reply texts.
//!
//! Every field has a default (the reference five-question screening), so a TOML file only needs
//! the values it changes:
//!
//! ```toml
//! risk_threshold = 3
//! clinics = ["Clinic Y in Kumasi: +233 YYY YYY YYY"]
//!
//! [messages]
//! help = "Call 112 in an emergency."
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::transition::Reply;

pub const DEFAULT_RISK_THRESHOLD: u32 = 2;

const DEFAULT_QUESTIONS: [&str; 5] = [
    "Does your child enjoy being swung, bounced on your knee, or any playful rough-and-tumble activity?",
    "Does your child take an interest in other children, for example playing or talking with them?",
    "Does your child point with one finger to ask for something (like a toy or snack)?",
    "Does your child point with one finger to share interest (for example, showing you a bird or car)?",
    "Does your child respond when you call their name, even if they're not looking at you?",
];

const DEFAULT_CLINIC: &str = "Clinic X in Accra: +233 XXX XXX XXX";

/// Errors loading or validating a [`ScreeningConfig`].
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read screening config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse screening config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid screening config: {0}")]
    Invalid(String),
}

/// User-facing reply texts.
///
/// `opt_in` may contain `{count}` (number of questions); `concern` may contain `{clinic}`
/// (primary clinic contact).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Messages {
    pub opt_in: String,
    pub unsubscribed: String,
    pub help: String,
    pub clinic_header: String,
    pub invalid_answer: String,
    pub concern: String,
    pub reassurance: String,
    pub fallback: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            opt_in: "Hi! Reply YES to begin the {count}-question check, or STOP to cancel."
                .to_string(),
            unsubscribed: "You've unsubscribed. Reply YES anytime to restart.".to_string(),
            help: "Resources:\n\
                   - Reply SCREEN to start a new check\n\
                   - Reply CLINIC for clinic contacts\n\
                   - Reply STOP to unsubscribe"
                .to_string(),
            clinic_header: "Clinics you can contact:".to_string(),
            invalid_answer: "Please reply YES or NO.".to_string(),
            concern: "Thank you. Some responses suggest developmental concerns.\n\
                      Please call {clinic}"
                .to_string(),
            reassurance: "Thanks! Your child's responses don't indicate immediate concerns.\n\
                          Feel free to re-check anytime or reply HELP for resources."
                .to_string(),
            fallback: "Sorry, I didn't get that. Reply YES to start or STOP to cancel.".to_string(),
        }
    }
}

/// Static configuration of one screening questionnaire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreeningConfig {
    /// Question texts in order; rendered as `Q{n}: {text} (YES/NO)`.
    pub questions: Vec<String>,
    /// A completed screening is a concern when its risk count reaches this value.
    pub risk_threshold: u32,
    /// Clinic contact lines; the first one is named in the concern reply.
    pub clinics: Vec<String>,
    pub messages: Messages,
}

impl Default for ScreeningConfig {
    fn default() -> Self {
        Self {
            questions: DEFAULT_QUESTIONS.iter().map(|q| q.to_string()).collect(),
            risk_threshold: DEFAULT_RISK_THRESHOLD,
            clinics: vec![DEFAULT_CLINIC.to_string()],
            messages: Messages::default(),
        }
    }
}

impl ScreeningConfig {
    /// Parses and validates a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.questions.is_empty() {
            return Err(ConfigError::Invalid("at least one question is required".into()));
        }
        if let Some(pos) = self.questions.iter().position(|q| q.trim().is_empty()) {
            return Err(ConfigError::Invalid(format!("question {} is blank", pos + 1)));
        }
        if self.clinics.iter().all(|c| c.trim().is_empty()) {
            return Err(ConfigError::Invalid("at least one clinic contact is required".into()));
        }
        Ok(())
    }

    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    /// Prompt for question `index` (zero-based), or `None` past the last question.
    pub fn prompt(&self, index: usize) -> Option<String> {
        self.questions
            .get(index)
            .map(|q| format!("Q{}: {} (YES/NO)", index + 1, q))
    }

    pub fn primary_clinic(&self) -> &str {
        self.clinics
            .iter()
            .find(|c| !c.trim().is_empty())
            .map(String::as_str)
            .unwrap_or_default()
    }

    pub fn is_concern(&self, risk_count: u32) -> bool {
        risk_count >= self.risk_threshold
    }

    /// Renders a reply to the text sent to the user.
    pub fn render(&self, reply: &Reply) -> String {
        let m = &self.messages;
        match reply {
            Reply::Unsubscribed => m.unsubscribed.clone(),
            Reply::Help => m.help.clone(),
            Reply::ClinicList => {
                let mut text = m.clinic_header.clone();
                for clinic in self.clinics.iter().filter(|c| !c.trim().is_empty()) {
                    text.push_str("\n- ");
                    text.push_str(clinic);
                }
                text
            }
            Reply::OptInInvite => m
                .opt_in
                .replace("{count}", &self.question_count().to_string()),
            Reply::Prompt(index) => self.prompt(*index).unwrap_or_else(|| m.fallback.clone()),
            Reply::InvalidAnswer(index) => match self.prompt(*index) {
                Some(prompt) => format!("{}\n{}", m.invalid_answer, prompt),
                None => m.fallback.clone(),
            },
            Reply::Concern => m.concern.replace("{clinic}", self.primary_clinic()),
            Reply::Reassurance => m.reassurance.clone(),
            Reply::Fallback => m.fallback.clone(),
        }
    }
}
