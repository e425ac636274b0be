//! Process-wide quit request and resize notifications.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};

use crate::lock_or_recover;

/// Idempotent cancellation shared by every loop and the input listener.
///
/// Waiters select on [`CancelToken::receiver`]; it becomes ready (disconnected)
/// once the token fires and stays ready afterwards.
#[derive(Debug, Clone)]
pub struct CancelToken {
    inner: Arc<CancelInner>,
}

#[derive(Debug)]
struct CancelInner {
    cancelled: AtomicBool,
    trigger: Mutex<Option<Sender<()>>>,
    wait: Receiver<()>,
}

impl CancelToken {
    pub fn new() -> Self {
        let (trigger, wait) = bounded(0);
        Self {
            inner: Arc::new(CancelInner {
                cancelled: AtomicBool::new(false),
                trigger: Mutex::new(Some(trigger)),
                wait,
            }),
        }
    }

    /// Request cancellation. Returns `true` only for the call that fired it.
    pub fn cancel(&self) -> bool {
        if self.inner.cancelled.swap(true, Ordering::SeqCst) {
            return false;
        }
        lock_or_recover(&self.inner.trigger, "cancel trigger").take();
        tracing::debug!("cancellation requested");
        true
    }

    pub fn is_cancelled(&self) -> bool {
        self.inner.cancelled.load(Ordering::SeqCst)
    }

    pub fn receiver(&self) -> &Receiver<()> {
        &self.inner.wait
    }
}

impl Default for CancelToken {
    fn default() -> Self {
        Self::new()
    }
}

/// Event sources every loop observes besides its own cadence.
#[derive(Debug, Clone)]
pub struct Signals {
    pub cancel: CancelToken,
    pub resize: Receiver<()>,
}

impl Signals {
    pub fn new(cancel: CancelToken, resize: Receiver<()>) -> Self {
        Self { cancel, resize }
    }
}

/// Coalescing resize channel: at most one notification is pending.
pub fn resize_channel() -> (ResizeNotifier, Receiver<()>) {
    let (tx, rx) = bounded(1);
    (ResizeNotifier { tx }, rx)
}

#[derive(Debug, Clone)]
pub struct ResizeNotifier {
    tx: Sender<()>,
}

impl ResizeNotifier {
    /// Returns `false` once nobody listens any more.
    pub fn notify(&self) -> bool {
        !matches!(self.tx.try_send(()), Err(TrySendError::Disconnected(_)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::{select, TryRecvError};
    use std::thread;
    use std::time::Duration;

    #[test]
    fn cancel_fires_once() {
        let token = CancelToken::new();
        assert!(!token.is_cancelled());
        assert!(token.cancel());
        assert!(!token.cancel());
        assert!(token.clone().is_cancelled());
    }

    #[test]
    fn receiver_becomes_ready_after_cancel() {
        let token = CancelToken::new();
        assert_eq!(token.receiver().try_recv(), Err(TryRecvError::Empty));
        token.cancel();
        assert_eq!(
            token.receiver().try_recv(),
            Err(TryRecvError::Disconnected)
        );
        assert_eq!(
            token.receiver().try_recv(),
            Err(TryRecvError::Disconnected)
        );
    }

    #[test]
    fn cancel_wakes_a_blocked_select() {
        let token = CancelToken::new();
        let remote = token.clone();
        let handle = thread::spawn(move || {
            thread::sleep(Duration::from_millis(20));
            remote.cancel();
        });
        let woke = select! {
            recv(token.receiver()) -> _ => true,
            default(Duration::from_secs(2)) => false,
        };
        handle.join().unwrap();
        assert!(woke);
    }

    #[test]
    fn resize_notifications_coalesce() {
        let (notifier, rx) = resize_channel();
        assert!(notifier.notify());
        assert!(notifier.notify());
        assert_eq!(rx.try_iter().count(), 1);
        drop(rx);
        assert!(!notifier.notify());
    }
}
