//! Console transport: one terminal user, replies printed to stdout.

use async_trait::async_trait;
use screen_core::{Bot, Chat, Result, ScreenError};
use std::io::Write;
use std::sync::Mutex;

/// [`Bot`] that writes every reply to a writer (stdout by default), one block per reply.
pub struct ConsoleBot<W: Write + Send = std::io::Stdout> {
    out: Mutex<W>,
}

impl ConsoleBot {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write + Send> ConsoleBot<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    pub fn into_inner(self) -> W {
        match self.out.into_inner() {
            Ok(out) => out,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

#[async_trait]
impl<W: Write + Send> Bot for ConsoleBot<W> {
    async fn send_message(&self, _chat: &Chat, text: &str) -> Result<()> {
        let mut out = self
            .out
            .lock()
            .map_err(|_| ScreenError::Bot("console writer poisoned".to_string()))?;
        writeln!(out, "{}\n", text)?;
        out.flush()?;
        Ok(())
    }
}
