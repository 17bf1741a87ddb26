//! Per-user message queues: messages of one user are dispatched one at a time, in arrival order,
//! while different users proceed in parallel.

use std::sync::Arc;

use dashmap::DashMap;
use handler_chain::HandlerChain;
use screen_core::{Bot as CoreBot, Message};
use tokio::sync::mpsc;
use tracing::{debug, error, info};

/// Sender to one user's processing queue.
type QueueSender = mpsc::UnboundedSender<Message>;

/// Routes inbound messages to a per-user worker that runs `chain.dispatch` serially.
///
/// A worker is spawned on a user's first message and lives for the rest of the process, like
/// the user's session slot.
#[derive(Clone)]
pub struct UserQueues {
    chain: HandlerChain,
    reply_bot: Arc<dyn CoreBot>,
    queues: Arc<DashMap<String, QueueSender>>,
}

impl UserQueues {
    pub fn new(chain: HandlerChain, reply_bot: Arc<dyn CoreBot>) -> Self {
        Self {
            chain,
            reply_bot,
            queues: Arc::new(DashMap::new()),
        }
    }

    /// Queues `message` behind earlier messages of the same user. Must run inside a tokio
    /// runtime.
    pub fn enqueue(&self, message: Message) {
        let user_id = message.user.id.clone();
        let mut entry = self
            .queues
            .entry(user_id.clone())
            .or_insert_with(|| self.spawn_worker(user_id.clone()));

        if let Err(mpsc::error::SendError(message)) = entry.send(message) {
            // Worker task panicked; start a fresh one.
            error!(user_id = %user_id, "User queue closed, restarting worker");
            let tx = self.spawn_worker(user_id.clone());
            if tx.send(message).is_err() {
                error!(user_id = %user_id, "Failed to queue message");
            }
            *entry = tx;
        }
    }

    /// Number of users with a worker.
    pub fn len(&self) -> usize {
        self.queues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queues.is_empty()
    }

    fn spawn_worker(&self, user_id: String) -> QueueSender {
        let (tx, rx) = mpsc::unbounded_channel::<Message>();
        debug!(user_id = %user_id, "Starting user queue");
        tokio::spawn(Self::process_queue_loop(
            rx,
            self.chain.clone(),
            self.reply_bot.clone(),
            user_id,
        ));
        tx
    }

    async fn process_queue_loop(
        mut rx: mpsc::UnboundedReceiver<Message>,
        chain: HandlerChain,
        reply_bot: Arc<dyn CoreBot>,
        user_id: String,
    ) {
        while let Some(message) = rx.recv().await {
            info!(
                user_id = %user_id,
                message_id = %message.id,
                "step: processing queued message"
            );
            if let Err(e) = chain.dispatch(&message, reply_bot.as_ref()).await {
                error!(error = %e, user_id = %user_id, "Handler chain failed");
            }
        }
    }
}
