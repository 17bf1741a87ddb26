//! ConversationEngine: applies transitions to the session store and emits completed screenings.

use std::sync::Arc;

use storage::{RecordSink, ScreeningRecord};
use tracing::{error, info, instrument, warn};

use crate::config::ScreeningConfig;
use crate::input::Input;
use crate::session_store::SessionStore;
use crate::step::{Session, Step};
use crate::transition::{transition, Completion};

/// What happened to the completion record of a turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordStatus {
    /// The turn did not complete a screening.
    NotEmitted,
    Saved,
    /// The sink rejected the record; the user still received their result.
    Failed(String),
}

/// Result of handling one inbound message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    pub reply: String,
    /// Step after the turn; `None` when the user has no session.
    pub step: Option<Step>,
    pub record: RecordStatus,
}

/// Drives every user through the screening. Safe to share across tasks.
pub struct ConversationEngine {
    config: Arc<ScreeningConfig>,
    sessions: SessionStore,
    sink: Arc<dyn RecordSink>,
}

impl ConversationEngine {
    pub fn new(config: ScreeningConfig, sink: Arc<dyn RecordSink>) -> Self {
        Self {
            config: Arc::new(config),
            sessions: SessionStore::new(),
            sink,
        }
    }

    pub fn config(&self) -> &ScreeningConfig {
        &self.config
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    /// Current session of `user_id`, if any.
    pub async fn session(&self, user_id: &str) -> Option<Session> {
        self.sessions.get(user_id).await
    }

    /// Handles one message of `user_id` and returns the reply.
    ///
    /// Turns of the same user are serialised; the user's slot stays locked until the completion
    /// record (if any) has been written. A failed write is logged and reported in
    /// [`Turn::record`]; it never changes the reply.
    #[instrument(skip(self, user_id, text), fields(user_id = %user_id))]
    pub async fn handle(&self, user_id: &str, text: &str) -> Turn {
        let input = Input::parse(text);
        let slot = self.sessions.slot(user_id);
        let mut current = slot.lock().await;

        let before = current.as_ref().map(|s| s.step);
        let outcome = transition(&self.config, current.as_ref(), &input);
        if let Some(anomaly) = &outcome.anomaly {
            warn!(anomaly = %anomaly, "Unknown conversation state, replying with fallback");
        }

        let reply = self.config.render(&outcome.reply);
        *current = outcome.session;
        let step = current.as_ref().map(|s| s.step);
        info!(
            from = ?before,
            to = ?step,
            reply = ?outcome.reply,
            "step: turn applied"
        );

        let record = match outcome.completion {
            Some(completion) => self.emit(user_id, completion).await,
            None => RecordStatus::NotEmitted,
        };

        Turn {
            reply,
            step,
            record,
        }
    }

    async fn emit(&self, user_id: &str, completion: Completion) -> RecordStatus {
        info!(
            risk_count = completion.risk_count,
            outcome = ?completion.outcome,
            "Screening completed"
        );
        let record = ScreeningRecord::new(user_id, completion.answers);
        match self.sink.append(&record).await {
            Ok(()) => RecordStatus::Saved,
            Err(e) => {
                error!(
                    error = %e,
                    user_id = %user_id,
                    record_id = %record.id,
                    answers = ?record.answers,
                    "Failed to persist screening record"
                );
                RecordStatus::Failed(e.to_string())
            }
        }
    }

    /// Releases slots of users without a session. See [`SessionStore::prune_idle`].
    pub fn prune_idle_sessions(&self) -> usize {
        self.sessions.prune_idle()
    }
}
