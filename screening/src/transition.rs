//! Pure transition function of the screening conversation.
//!
//! `transition` has no side effects: the engine applies the returned session, renders the reply
//! and persists the completion.

use crate::config::ScreeningConfig;
use crate::input::{Answer, Command, Input};
use crate::step::{Session, Step};

/// What to say back, before rendering to text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Unsubscribed,
    Help,
    ClinicList,
    OptInInvite,
    /// Prompt of question `i` (zero-based).
    Prompt(usize),
    /// Validation notice followed by the prompt of question `i`.
    InvalidAnswer(usize),
    Concern,
    Reassurance,
    /// Generic guidance for a session in a state the machine does not recognise.
    Fallback,
}

/// Result class of a completed screening.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Concern,
    Reassurance,
}

impl From<Outcome> for Reply {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Concern => Reply::Concern,
            Outcome::Reassurance => Reply::Reassurance,
        }
    }
}

/// A finished screening, to be written to the record sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub answers: Vec<u8>,
    pub risk_count: u32,
    pub outcome: Outcome,
}

/// Outcome of one inbound message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    /// Session after the turn; `None` means the user has no session.
    pub session: Option<Session>,
    pub reply: Reply,
    pub completion: Option<Completion>,
    /// Description of an unrecognised session state, when the fallback branch was taken.
    pub anomaly: Option<String>,
}

impl Transition {
    fn to(session: Option<Session>, reply: Reply) -> Self {
        Self {
            session,
            reply,
            completion: None,
            anomaly: None,
        }
    }
}

/// Decides the next session and reply for `input` given the user's `current` session.
///
/// Commands are checked first in every state. Without a session, non-command input is handled
/// as if the user were at opt-in.
pub fn transition(config: &ScreeningConfig, current: Option<&Session>, input: &Input) -> Transition {
    if let Input::Command(command) = input {
        return apply_command(current, *command);
    }

    let session = current.cloned().unwrap_or_default();
    match session.step {
        Step::OptIn => opt_in(session, input),
        Step::Question(index) => answer_question(config, session, index, input),
    }
}

fn apply_command(current: Option<&Session>, command: Command) -> Transition {
    match command {
        Command::Stop => Transition::to(None, Reply::Unsubscribed),
        Command::Help => Transition::to(current.cloned(), Reply::Help),
        Command::Clinic => Transition::to(current.cloned(), Reply::ClinicList),
        Command::Screen => Transition::to(Some(Session::at_first_question()), Reply::Prompt(0)),
    }
}

fn opt_in(session: Session, input: &Input) -> Transition {
    match input {
        Input::Answer(Answer::Yes) => {
            Transition::to(Some(Session::at_first_question()), Reply::Prompt(0))
        }
        _ => Transition::to(Some(session), Reply::OptInInvite),
    }
}

fn answer_question(
    config: &ScreeningConfig,
    mut session: Session,
    index: usize,
    input: &Input,
) -> Transition {
    let total = config.question_count();
    if index >= total || session.answers.len() != index {
        let anomaly = format!(
            "step {} with {} recorded answers in a {}-question screening",
            session.step,
            session.answers.len(),
            total
        );
        return Transition {
            session: Some(session),
            reply: Reply::Fallback,
            completion: None,
            anomaly: Some(anomaly),
        };
    }

    let answer = match input {
        Input::Answer(answer) => *answer,
        _ => return Transition::to(Some(session), Reply::InvalidAnswer(index)),
    };
    session.answers.push(answer.risk_code());

    let next = index + 1;
    if next < total {
        session.step = Step::Question(next);
        return Transition::to(Some(session), Reply::Prompt(next));
    }

    let risk_count: u32 = session.answers.iter().map(|&a| u32::from(a)).sum();
    let outcome = if config.is_concern(risk_count) {
        Outcome::Concern
    } else {
        Outcome::Reassurance
    };
    Transition {
        session: None,
        reply: outcome.into(),
        completion: Some(Completion {
            answers: session.answers,
            risk_count,
            outcome,
        }),
        anomaly: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ScreeningConfig {
        ScreeningConfig::default()
    }

    fn at(index: usize, answers: Vec<u8>) -> Session {
        Session {
            step: Step::Question(index),
            answers,
        }
    }

    #[test]
    fn test_no_session_yes_starts_first_question() {
        let t = transition(&config(), None, &Input::parse("yes"));
        assert_eq!(t.session, Some(Session::at_first_question()));
        assert_eq!(t.reply, Reply::Prompt(0));
    }

    #[test]
    fn test_no_session_other_text_creates_opt_in_session() {
        let t = transition(&config(), None, &Input::parse("hello"));
        assert_eq!(t.session, Some(Session::opt_in()));
        assert_eq!(t.reply, Reply::OptInInvite);
    }

    #[test]
    fn test_opt_in_no_stays_at_opt_in() {
        let t = transition(&config(), Some(&Session::opt_in()), &Input::parse("no"));
        assert_eq!(t.session, Some(Session::opt_in()));
        assert_eq!(t.reply, Reply::OptInInvite);
    }

    #[test]
    fn test_stop_without_session() {
        let t = transition(&config(), None, &Input::parse("STOP"));
        assert_eq!(t.session, None);
        assert_eq!(t.reply, Reply::Unsubscribed);
    }

    #[test]
    fn test_help_and_clinic_keep_state() {
        let mid = at(2, vec![1, 0]);
        let t = transition(&config(), Some(&mid), &Input::parse("help"));
        assert_eq!(t.session, Some(mid.clone()));
        assert_eq!(t.reply, Reply::Help);

        let t = transition(&config(), None, &Input::parse("clinic"));
        assert_eq!(t.session, None);
        assert_eq!(t.reply, Reply::ClinicList);
    }

    #[test]
    fn test_screen_resets_mid_screening() {
        let t = transition(&config(), Some(&at(3, vec![1, 1, 1])), &Input::parse("SCREEN"));
        assert_eq!(t.session, Some(Session::at_first_question()));
        assert_eq!(t.reply, Reply::Prompt(0));
    }

    #[test]
    fn test_invalid_answer_keeps_session() {
        let mid = at(1, vec![0]);
        let t = transition(&config(), Some(&mid), &Input::parse("maybe"));
        assert_eq!(t.session, Some(mid));
        assert_eq!(t.reply, Reply::InvalidAnswer(1));
        assert!(t.completion.is_none());
    }

    #[test]
    fn test_valid_answer_advances_with_risk_code() {
        let t = transition(&config(), Some(&at(1, vec![0])), &Input::parse("no"));
        assert_eq!(t.session, Some(at(2, vec![0, 1])));
        assert_eq!(t.reply, Reply::Prompt(2));
    }

    #[test]
    fn test_last_answer_completes_and_removes_session() {
        let t = transition(&config(), Some(&at(4, vec![1, 1, 0, 0])), &Input::parse("yes"));
        assert_eq!(t.session, None);
        assert_eq!(t.reply, Reply::Concern);
        assert_eq!(
            t.completion,
            Some(Completion {
                answers: vec![1, 1, 0, 0, 0],
                risk_count: 2,
                outcome: Outcome::Concern,
            })
        );
    }

    #[test]
    fn test_below_threshold_is_reassurance() {
        let t = transition(&config(), Some(&at(4, vec![1, 0, 0, 0])), &Input::parse("yes"));
        assert_eq!(t.reply, Reply::Reassurance);
        assert_eq!(t.completion.unwrap().risk_count, 1);
    }

    #[test]
    fn test_out_of_range_step_falls_back() {
        let broken = at(7, vec![0; 7]);
        let t = transition(&config(), Some(&broken), &Input::parse("yes"));
        assert_eq!(t.session, Some(broken));
        assert_eq!(t.reply, Reply::Fallback);
        assert!(t.anomaly.is_some());
    }

    #[test]
    fn test_answer_count_mismatch_falls_back() {
        let broken = at(2, vec![0]);
        let t = transition(&config(), Some(&broken), &Input::parse("no"));
        assert_eq!(t.session, Some(broken));
        assert_eq!(t.reply, Reply::Fallback);
    }

    #[test]
    fn test_stop_overrides_broken_state() {
        let t = transition(&config(), Some(&at(9, vec![])), &Input::parse("stop"));
        assert_eq!(t.session, None);
        assert_eq!(t.reply, Reply::Unsubscribed);
    }
}
