//! Property-based tests for the transition function.
//!
//! These tests verify the conversation invariants across generated inputs and sessions.

use proptest::prelude::*;

use crate::config::ScreeningConfig;
use crate::input::{Answer, Input};
use crate::step::{Session, Step};
use crate::transition::{transition, Reply};

const QUESTIONS: usize = 5;

// ============================================================================
// Generators
// ============================================================================

/// Free text that never parses as a command or a yes/no answer.
fn arb_other_text() -> impl Strategy<Value = String> {
    "[ a-zA-Z0-9?!.]{0,12}".prop_filter("must not be a command or answer", |s| {
        matches!(Input::parse(s), Input::Text(_))
    })
}

fn arb_answer() -> impl Strategy<Value = Answer> {
    prop_oneof![Just(Answer::Yes), Just(Answer::No)]
}

/// A well-formed session at some question with matching answer count.
fn arb_question_session() -> impl Strategy<Value = Session> {
    (0..QUESTIONS).prop_flat_map(|index| {
        proptest::collection::vec(0u8..=1, index).prop_map(move |answers| Session {
            step: Step::Question(index),
            answers,
        })
    })
}

fn arb_any_session() -> impl Strategy<Value = Option<Session>> {
    prop_oneof![
        Just(None),
        Just(Some(Session::opt_in())),
        arb_question_session().prop_map(Some),
    ]
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    /// Opt-in only advances on "yes".
    #[test]
    fn opt_in_is_kept_for_non_yes(text in arb_other_text()) {
        let config = ScreeningConfig::default();
        let t = transition(&config, Some(&Session::opt_in()), &Input::parse(&text));
        prop_assert_eq!(t.session, Some(Session::opt_in()));
        prop_assert_eq!(t.reply, Reply::OptInInvite);
    }

    /// Invalid input at a question changes nothing and always gives the same reply.
    #[test]
    fn invalid_answer_is_idempotent(
        session in arb_question_session(),
        first in arb_other_text(),
        second in arb_other_text(),
    ) {
        let config = ScreeningConfig::default();
        let a = transition(&config, Some(&session), &Input::parse(&first));
        let b = transition(&config, a.session.as_ref(), &Input::parse(&second));

        prop_assert_eq!(a.session.as_ref(), Some(&session));
        prop_assert_eq!(b.session.as_ref(), Some(&session));
        prop_assert_eq!(config.render(&a.reply), config.render(&b.reply));
        prop_assert!(a.completion.is_none());
    }

    /// Answers grow by exactly one per valid answer and stay equal to the step index.
    #[test]
    fn answers_track_step(session in arb_question_session(), answer in arb_answer()) {
        let config = ScreeningConfig::default();
        let before = session.answers.len();
        let t = transition(&config, Some(&session), &Input::Answer(answer));
        match t.session {
            Some(next) => {
                prop_assert_eq!(next.answers.len(), before + 1);
                prop_assert_eq!(next.step, Step::Question(before + 1));
            }
            None => {
                let completion = t.completion.expect("last answer completes");
                prop_assert_eq!(completion.answers.len(), QUESTIONS);
            }
        }
    }

    /// SCREEN always lands on the first question with no answers.
    #[test]
    fn screen_always_resets(session in arb_any_session()) {
        let config = ScreeningConfig::default();
        let t = transition(&config, session.as_ref(), &Input::parse("SCREEN"));
        prop_assert_eq!(t.session, Some(Session::at_first_question()));
        prop_assert_eq!(t.reply, Reply::Prompt(0));
    }

    /// STOP always removes the session.
    #[test]
    fn stop_always_clears(session in arb_any_session()) {
        let config = ScreeningConfig::default();
        let t = transition(&config, session.as_ref(), &Input::parse(" stop "));
        prop_assert_eq!(t.session, None);
        prop_assert_eq!(t.reply, Reply::Unsubscribed);
    }
}

/// Every one of the 2^N answer combinations: concern iff at least two "no" answers.
#[test]
fn threshold_law_holds_for_all_combinations() {
    let config = ScreeningConfig::default();
    for mask in 0u32..(1 << QUESTIONS) {
        let mut session = Some(Session::at_first_question());
        let mut last = None;
        for q in 0..QUESTIONS {
            let answer = if mask & (1 << q) != 0 { Answer::No } else { Answer::Yes };
            let t = transition(&config, session.as_ref(), &Input::Answer(answer));
            session = t.session.clone();
            last = Some(t);
        }
        let t = last.unwrap();
        let risk = mask.count_ones();
        let expected = if risk >= 2 { Reply::Concern } else { Reply::Reassurance };
        assert_eq!(t.reply, expected, "mask {:05b}", mask);
        assert!(session.is_none());
        assert_eq!(t.completion.unwrap().risk_count, risk);
    }
}
