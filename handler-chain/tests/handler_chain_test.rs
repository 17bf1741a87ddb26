//! Integration tests for [`handler_chain::HandlerChain`].
//!
//! Covers: before/handle/after ordering, before stopping the chain, Reply ending the handle phase
//! and reaching `after`, and `dispatch` delivering exactly one reply through the bot.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use handler_chain::HandlerChain;
use screen_core::{Bot, Chat, Handler, HandlerResponse, Message, Result, User};

fn create_test_message(content: &str) -> Message {
    Message::incoming(User::with_id("user-123"), Chat::private(456), content)
}

/// Records the order in which chain phases run.
struct TraceHandler {
    label: &'static str,
    trace: Arc<Mutex<Vec<String>>>,
    response: HandlerResponse,
}

impl TraceHandler {
    fn new(label: &'static str, trace: Arc<Mutex<Vec<String>>>, response: HandlerResponse) -> Self {
        Self {
            label,
            trace,
            response,
        }
    }

    fn push(&self, phase: &str) {
        self.trace
            .lock()
            .unwrap()
            .push(format!("{}:{}", self.label, phase));
    }
}

#[async_trait]
impl Handler for TraceHandler {
    async fn before(&self, _message: &Message) -> Result<bool> {
        self.push("before");
        Ok(true)
    }

    async fn handle(&self, _message: &Message) -> Result<HandlerResponse> {
        self.push("handle");
        Ok(self.response.clone())
    }

    async fn after(&self, _message: &Message, _response: &HandlerResponse) -> Result<()> {
        self.push("after");
        Ok(())
    }
}

/// Bot that records every outbound text.
#[derive(Default)]
struct RecordingBot {
    sent: Mutex<Vec<(i64, String)>>,
}

#[async_trait]
impl Bot for RecordingBot {
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()> {
        self.sent.lock().unwrap().push((chat.id, text.to_string()));
        Ok(())
    }
}

/// **Test: Phases run before (in order) → handle (until Reply) → after (reverse).**
///
/// **Setup:** handler `a` continues, handler `b` replies, handler `c` would reply too.
/// **Action:** `chain.handle(&message)`.
/// **Expected:** c's handle never runs; after runs c, b, a; response is b's Reply.
#[tokio::test]
async fn test_handler_chain_phase_order() {
    let trace = Arc::new(Mutex::new(Vec::new()));
    let chain = HandlerChain::new()
        .add_handler(Arc::new(TraceHandler::new(
            "a",
            trace.clone(),
            HandlerResponse::Continue,
        )))
        .add_handler(Arc::new(TraceHandler::new(
            "b",
            trace.clone(),
            HandlerResponse::Reply("from b".to_string()),
        )))
        .add_handler(Arc::new(TraceHandler::new(
            "c",
            trace.clone(),
            HandlerResponse::Reply("from c".to_string()),
        )));

    let result = chain.handle(&create_test_message("yes")).await.unwrap();

    assert_eq!(result, HandlerResponse::Reply("from b".to_string()));
    assert_eq!(
        *trace.lock().unwrap(),
        vec![
            "a:before", "b:before", "c:before", "a:handle", "b:handle", "c:after", "b:after",
            "a:after",
        ]
    );
}

/// **Test: before returning false stops the chain; handle is not run.**
///
/// **Setup:** One blocking handler (before returns false), one counting handler.
/// **Action:** `chain.handle(&message)`.
/// **Expected:** result is Stop; handle_count=0.
#[tokio::test]
async fn test_handler_stops_chain() {
    struct BlockingHandler;

    #[async_trait]
    impl Handler for BlockingHandler {
        async fn before(&self, _message: &Message) -> Result<bool> {
            Ok(false)
        }
    }

    struct CountingHandler(Arc<AtomicUsize>);

    #[async_trait]
    impl Handler for CountingHandler {
        async fn handle(&self, _message: &Message) -> Result<HandlerResponse> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(HandlerResponse::Continue)
        }
    }

    let handle_count = Arc::new(AtomicUsize::new(0));
    let chain = HandlerChain::new()
        .add_handler(Arc::new(BlockingHandler))
        .add_handler(Arc::new(CountingHandler(handle_count.clone())));

    let result = chain.handle(&create_test_message("stop")).await.unwrap();

    assert_eq!(result, HandlerResponse::Stop);
    assert_eq!(handle_count.load(Ordering::SeqCst), 0);
}

/// **Test: dispatch sends the Reply text to the message's chat exactly once.**
///
/// **Setup:** Chain with one replying handler; RecordingBot.
/// **Action:** `chain.dispatch(&message, &bot)`.
/// **Expected:** bot received one message for chat 456 with the reply text.
#[tokio::test]
async fn test_dispatch_delivers_reply() {
    let trace = Arc::new(Mutex::new(Vec::new()));
    let chain = HandlerChain::new().add_handler(Arc::new(TraceHandler::new(
        "screen",
        trace,
        HandlerResponse::Reply("Q1: ready? (YES/NO)".to_string()),
    )));
    let bot = RecordingBot::default();

    chain
        .dispatch(&create_test_message("yes"), &bot)
        .await
        .unwrap();

    assert_eq!(
        *bot.sent.lock().unwrap(),
        vec![(456, "Q1: ready? (YES/NO)".to_string())]
    );
}

/// **Test: dispatch sends nothing when no handler replies.**
///
/// **Setup:** Empty chain.
/// **Action:** `chain.dispatch(&message, &bot)`.
/// **Expected:** response Continue; bot received nothing.
#[tokio::test]
async fn test_dispatch_without_reply_sends_nothing() {
    let chain = HandlerChain::new();
    assert!(chain.is_empty());
    let bot = RecordingBot::default();

    let result = chain
        .dispatch(&create_test_message("hello"), &bot)
        .await
        .unwrap();

    assert_eq!(result, HandlerResponse::Continue);
    assert!(bot.sent.lock().unwrap().is_empty());
}
