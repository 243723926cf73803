use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use futures::future::{AbortHandle, Abortable, Either, LocalBoxFuture, select};
use futures::stream::{FuturesUnordered, StreamExt};
use futures::FutureExt;
use tracing::debug;

/// Sleep primitive: browser timers in the app, tokio in tests.
pub trait Timer {
    fn sleep(&self, period: Duration) -> LocalBoxFuture<'static, ()>;
}

/// Stops one polling loop. Cancelling drops the loop together with any
/// fetch still in flight, so a late result is never applied.
#[derive(Debug, Clone)]
pub struct PollHandle {
    abort: AbortHandle,
}

impl PollHandle {
    pub fn cancel(&self) {
        self.abort.abort();
    }

    pub fn is_cancelled(&self) -> bool {
        self.abort.is_aborted()
    }
}

/// The loop future returned by [`Poller::start`]; spawn it on the local
/// executor. It resolves once cancelled.
pub type PollTask = LocalBoxFuture<'static, ()>;

/// Owns at most one active polling loop.
pub struct Poller<T> {
    timer: T,
    active: Arc<Mutex<Option<PollHandle>>>,
}

impl<T> Poller<T>
where
    T: Timer + Clone + 'static,
{
    pub fn new(timer: T) -> Self {
        Self {
            timer,
            active: Arc::new(Mutex::new(None)),
        }
    }

    /// Runs `action` now and then every `period` until cancelled.
    ///
    /// Ticks are not held back by a slow action: a new one starts on each
    /// tick even if the previous one is still pending. Starting again
    /// cancels the loop started before.
    pub fn start<F, Fut>(&self, period: Duration, mut action: F) -> (PollHandle, PollTask)
    where
        F: FnMut() -> Fut + 'static,
        Fut: Future<Output = ()> + 'static,
    {
        let (abort, registration) = AbortHandle::new_pair();
        let handle = PollHandle { abort };

        if let Ok(mut active) = self.active.lock() {
            if let Some(previous) = active.replace(handle.clone()) {
                previous.cancel();
            }
        }

        let timer = self.timer.clone();
        let run = async move {
            let mut in_flight = FuturesUnordered::new();
            in_flight.push(action().boxed_local());

            loop {
                let mut tick = timer.sleep(period);
                // Drive pending actions while waiting for the next tick.
                loop {
                    if in_flight.is_empty() {
                        (&mut tick).await;
                        break;
                    }
                    match select(&mut tick, in_flight.next()).await {
                        Either::Left(_) => break,
                        Either::Right(_) => continue,
                    }
                }
                in_flight.push(action().boxed_local());
            }
        };

        let task = Abortable::new(run, registration)
            .map(|_: Result<(), _>| debug!("polling stopped"))
            .boxed_local();

        (handle, task)
    }

    /// Stops the active loop, if any.
    pub fn cancel(&self) {
        if let Some(handle) = self.active.lock().ok().and_then(|mut a| a.take()) {
            handle.cancel();
        }
    }

    /// A `Send + Sync` closure that stops the active loop; meant for view
    /// teardown hooks.
    pub fn canceller(&self) -> impl Fn() + Send + Sync + 'static {
        let active = Arc::clone(&self.active);
        move || {
            if let Some(handle) = active.lock().ok().and_then(|mut a| a.take()) {
                handle.cancel();
            }
        }
    }

    pub fn is_running(&self) -> bool {
        self.active
            .lock()
            .map(|a| a.as_ref().is_some_and(|h| !h.is_cancelled()))
            .unwrap_or(false)
    }
}
