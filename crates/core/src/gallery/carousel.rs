//! Async driver that runs a [`Gallery`] for the lifetime of a view.
//!
//! A single task owns the gallery and its [`AutoAdvance`] schedule. User
//! actions arrive as commands over a channel, the current state leaves through a
//! `watch` channel. Because only that task ever touches the state there is
//! nothing to lock.
//!
//! The task is tied to its [`Carousel`] handle: dropping the handle cancels
//! the task before any pending automatic advance can fire.

use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tokio_util::sync::{CancellationToken, DropGuard};

use super::{AutoAdvance, Gallery, GallerySnapshot};
use crate::error::CoreError;

/// User actions forwarded to the carousel task.
#[derive(Debug)]
enum Command {
    Next,
    Previous,
    GoTo {
        index: usize,
        reply: oneshot::Sender<Result<Option<usize>, CoreError>>,
    },
    SetAutoAdvance(bool),
}

// ---------------------------------------------------------------------------
// Carousel (handle)
// ---------------------------------------------------------------------------

/// Handle to a running gallery.
///
/// Dropping the handle stops the task and revokes its timer.
pub struct Carousel {
    commands: mpsc::UnboundedSender<Command>,
    snapshots: watch::Receiver<GallerySnapshot>,
    task: JoinHandle<()>,
    cancel: DropGuard,
}

impl Carousel {
    /// Start driving `gallery` on the current tokio runtime.
    ///
    /// The first automatic advance, if enabled, is due one full interval
    /// from now.
    pub fn spawn<T>(gallery: Gallery<T>, mut auto: AutoAdvance) -> Self
    where
        T: Send + 'static,
    {
        auto.rearm(Instant::now(), gallery.can_advance());

        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (snapshot_tx, snapshot_rx) = watch::channel(snapshot(&gallery, &auto));
        let cancel = CancellationToken::new();

        let worker = Worker {
            gallery,
            auto,
            commands: command_rx,
            snapshots: snapshot_tx,
        };
        let task = tokio::spawn(worker.run(cancel.clone()));

        Self {
            commands: command_tx,
            snapshots: snapshot_rx,
            task,
            cancel: cancel.drop_guard(),
        }
    }

    pub fn next(&self) {
        self.send(Command::Next);
    }

    pub fn previous(&self) {
        self.send(Command::Previous);
    }

    /// Jump to `index`, waiting for the task to apply it.
    ///
    /// Fails with [`CoreError::OutOfRange`] for an index past the end.
    pub async fn go_to(&self, index: usize) -> Result<Option<usize>, CoreError> {
        let (reply, response) = oneshot::channel();
        self.send(Command::GoTo { index, reply });
        response
            .await
            .map_err(|_| CoreError::Internal("carousel task has stopped".into()))?
    }

    pub fn set_auto_advance(&self, enabled: bool) {
        self.send(Command::SetAutoAdvance(enabled));
    }

    /// Latest state published by the task.
    pub fn snapshot(&self) -> GallerySnapshot {
        *self.snapshots.borrow()
    }

    /// Receiver that wakes on every state change.
    pub fn subscribe(&self) -> watch::Receiver<GallerySnapshot> {
        self.snapshots.clone()
    }

    /// Stop the task and wait for it to finish.
    pub async fn shutdown(self) {
        let Self { task, cancel, .. } = self;
        drop(cancel);
        if let Err(e) = task.await {
            tracing::warn!(error = %e, "Carousel task ended abnormally");
        }
    }

    fn send(&self, command: Command) {
        if self.commands.send(command).is_err() {
            tracing::debug!("Carousel task has stopped, dropping command");
        }
    }
}

// ---------------------------------------------------------------------------
// Worker (task)
// ---------------------------------------------------------------------------

struct Worker<T> {
    gallery: Gallery<T>,
    auto: AutoAdvance,
    commands: mpsc::UnboundedReceiver<Command>,
    snapshots: watch::Sender<GallerySnapshot>,
}

impl<T> Worker<T> {
    async fn run(mut self, cancel: CancellationToken) {
        loop {
            let deadline = self.auto.deadline();

            tokio::select! {
                // Cancellation wins over a timer that is due at the same instant.
                biased;

                () = cancel.cancelled() => {
                    tracing::debug!("Carousel cancelled");
                    break;
                }
                command = self.commands.recv() => match command {
                    Some(command) => self.apply(command),
                    None => break,
                },
                () = sleep_until(deadline) => {
                    let index = self.gallery.next();
                    tracing::trace!(?index, "Carousel auto-advanced");
                    self.transitioned();
                }
            }
        }

        self.auto.cancel();
    }

    fn apply(&mut self, command: Command) {
        match command {
            Command::Next => {
                self.gallery.next();
                self.transitioned();
            }
            Command::Previous => {
                self.gallery.previous();
                self.transitioned();
            }
            Command::GoTo { index, reply } => {
                let result = self.gallery.go_to(index);
                if result.is_ok() {
                    self.transitioned();
                }
                // The caller may have stopped waiting.
                let _ = reply.send(result);
            }
            Command::SetAutoAdvance(enabled) => {
                self.auto
                    .set_enabled(enabled, Instant::now(), self.gallery.can_advance());
                self.publish();
            }
        }
    }

    /// Every index change restarts the countdown.
    fn transitioned(&mut self) {
        self.auto.rearm(Instant::now(), self.gallery.can_advance());
        self.publish();
    }

    fn publish(&self) {
        self.snapshots
            .send_replace(snapshot(&self.gallery, &self.auto));
    }
}

fn snapshot<T>(gallery: &Gallery<T>, auto: &AutoAdvance) -> GallerySnapshot {
    GallerySnapshot {
        state: gallery.state(),
        is_auto_advancing: auto.is_enabled(),
    }
}

/// Sleep until `deadline`, or forever when nothing is armed.
async fn sleep_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
