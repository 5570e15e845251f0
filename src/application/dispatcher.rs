//! Serialized task dispatcher
//!
//! A single named worker thread owns a piece of state and applies queued
//! closures to it one at a time, in submission order. Callers on any thread
//! only ever hold the sending half of the channel.

use std::thread::{self, JoinHandle};

use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, warn};

/// A unit of work applied to the dispatcher-owned state
pub type Task<S> = Box<dyn FnOnce(&mut S) + Send + 'static>;

/// Dispatcher errors
#[derive(Debug, Error)]
pub enum DispatcherError {
    #[error("Failed to spawn dispatcher thread '{name}': {source}")]
    Spawn {
        name: String,
        #[source]
        source: std::io::Error,
    },
}

/// Single-consumer FIFO executor bound to one worker thread
pub struct Dispatcher<S: Send + 'static> {
    name: String,
    sender: Option<mpsc::UnboundedSender<Task<S>>>,
    worker: Option<JoinHandle<()>>,
}

impl<S: Send + 'static> Dispatcher<S> {
    /// Start the worker thread, moving `state` into it
    pub fn spawn(name: impl Into<String>, state: S) -> Result<Self, DispatcherError> {
        let name = name.into();
        let (sender, mut receiver) = mpsc::unbounded_channel::<Task<S>>();

        let thread_name = name.clone();
        let worker = thread::Builder::new()
            .name(name.clone())
            .spawn(move || {
                let mut state = state;
                // Returns None only once every sender is gone and the queue is empty.
                while let Some(task) = receiver.blocking_recv() {
                    task(&mut state);
                }
                debug!(dispatcher = %thread_name, "dispatcher drained");
            })
            .map_err(|source| DispatcherError::Spawn {
                name: name.clone(),
                source,
            })?;

        debug!(dispatcher = %name, "dispatcher started");

        Ok(Self {
            name,
            sender: Some(sender),
            worker: Some(worker),
        })
    }

    /// Dispatcher (and worker thread) name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether tasks are still accepted
    pub fn is_running(&self) -> bool {
        self.sender.as_ref().is_some_and(|s| !s.is_closed())
    }

    /// Queue a task. Returns false if the dispatcher has shut down.
    pub fn enqueue<F>(&self, task: F) -> bool
    where
        F: FnOnce(&mut S) + Send + 'static,
    {
        let Some(sender) = self.sender.as_ref() else {
            warn!(dispatcher = %self.name, "task rejected after shutdown");
            return false;
        };

        if sender.send(Box::new(task)).is_err() {
            warn!(dispatcher = %self.name, "task rejected, worker has stopped");
            return false;
        }

        true
    }

    /// Queue a read of the state and receive its result.
    ///
    /// The closure runs after everything queued before it, so awaiting the
    /// receiver also waits for those tasks. The receiver errors if the
    /// dispatcher has shut down.
    pub fn query<F, R>(&self, f: F) -> oneshot::Receiver<R>
    where
        F: FnOnce(&S) -> R + Send + 'static,
        R: Send + 'static,
    {
        let (tx, rx) = oneshot::channel();
        self.enqueue(move |state: &mut S| {
            let _ = tx.send(f(state));
        });
        rx
    }

    /// Stop accepting tasks, run everything already queued, join the worker.
    ///
    /// Safe to call more than once.
    pub fn shutdown(&mut self) {
        // Dropping the only sender closes the channel; the worker drains it.
        if self.sender.take().is_none() && self.worker.is_none() {
            return;
        }

        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                warn!(dispatcher = %self.name, "dispatcher worker panicked");
            }
        }

        debug!(dispatcher = %self.name, "dispatcher stopped");
    }
}

impl<S: Send + 'static> Drop for Dispatcher<S> {
    fn drop(&mut self) {
        self.shutdown();
    }
}
