//! Post-run commentary
//!
//! After a crash the driver asks a commentary source for one short line about
//! the run. The request runs on its own thread and the simulation never waits
//! on it: the result lands in a channel the driver polls once per frame, and
//! it only ever updates a display-only string. A failed or slow source
//! degrades to a fixed fallback line.

use std::sync::Arc;
use std::sync::mpsc::{Receiver, TryRecvError, channel};
use std::thread;

use thiserror::Error;

/// Shown whenever the source fails
pub const FALLBACK_LINE: &str = "What a run!";

#[derive(Debug, Error)]
pub enum CommentaryError {
    #[error("commentary service unavailable: {0}")]
    Unavailable(String),
}

/// Something that can quip about a finished run. Implementations may block;
/// the client keeps them off the simulation thread.
pub trait CommentarySource: Send + Sync + 'static {
    fn comment(&self, score: u32, difficulty: &str) -> Result<String, CommentaryError>;
}

/// A local source with a few canned lines, for running without a service
pub struct CannedCommentary;

impl CommentarySource for CannedCommentary {
    fn comment(&self, score: u32, difficulty: &str) -> Result<String, CommentaryError> {
        let line = match score {
            0 => format!("Not a single gate on {difficulty}? Brutal."),
            1..=4 => format!("{score} gates down. The {difficulty} tier bites back."),
            5..=9 => format!("{score} gates! The boss was almost in sight."),
            _ => format!("{score} on {difficulty}. A run to remember."),
        };
        Ok(line)
    }
}

/// Fire-and-forget client. Holds at most one in-flight request; a new request
/// replaces the previous channel so a stale result is simply dropped.
pub struct CommentaryClient {
    source: Arc<dyn CommentarySource>,
    pending: Option<Receiver<String>>,
}

impl CommentaryClient {
    pub fn new(source: Arc<dyn CommentarySource>) -> Self {
        Self {
            source,
            pending: None,
        }
    }

    /// Kick off a request on a worker thread. Returns immediately.
    pub fn request(&mut self, score: u32, difficulty: &str) {
        let (tx, rx) = channel();
        let source = Arc::clone(&self.source);
        let difficulty = difficulty.to_owned();
        thread::spawn(move || {
            let line = match source.comment(score, &difficulty) {
                Ok(line) => line,
                Err(err) => {
                    log::warn!("Commentary failed: {err}");
                    FALLBACK_LINE.to_owned()
                }
            };
            // Receiver may be gone if a newer request replaced it
            let _ = tx.send(line);
        });
        self.pending = Some(rx);
    }

    /// Non-blocking: the finished line, if one arrived since the last poll
    pub fn poll(&mut self) -> Option<String> {
        let rx = self.pending.as_ref()?;
        match rx.try_recv() {
            Ok(line) => {
                self.pending = None;
                Some(line)
            }
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                self.pending = None;
                Some(FALLBACK_LINE.to_owned())
            }
        }
    }
}
