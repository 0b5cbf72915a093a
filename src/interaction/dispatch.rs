use crossbeam_channel::{Receiver, Sender, TryIter, unbounded};

/// Work posted from the gesture thread for the main thread to run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScrubMessage {
    Start,
    /// Clamped marker position to resolve against the host's data.
    Update { x: f64 },
    End { cancelled: bool },
}

/// Gesture-side end of the main-thread queue.
#[derive(Debug, Clone)]
pub struct MainThreadSender {
    inner: Sender<ScrubMessage>,
}

impl MainThreadSender {
    /// Posts `message`. Returns `false` once the main-thread side is gone.
    pub fn post(&self, message: ScrubMessage) -> bool {
        self.inner.send(message).is_ok()
    }
}

/// Main-thread end of the queue. Messages come out in posting order.
#[derive(Debug)]
pub struct MainThreadReceiver {
    inner: Receiver<ScrubMessage>,
}

impl MainThreadReceiver {
    pub fn drain(&self) -> TryIter<'_, ScrubMessage> {
        self.inner.try_iter()
    }

    #[must_use]
    pub fn pending(&self) -> usize {
        self.inner.len()
    }
}

#[must_use]
pub fn main_thread_channel() -> (MainThreadSender, MainThreadReceiver) {
    let (inner_tx, inner_rx) = unbounded();
    (
        MainThreadSender { inner: inner_tx },
        MainThreadReceiver { inner: inner_rx },
    )
}
