use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread::JoinHandle;
use std::time::Duration;

use tracing::{debug, warn};

use super::display::{ClockWidget, TextSlot};
use super::TimeSource;

/// Stop handle for a clock started with [`spawn`].
///
/// Dropping the handle stops the clock as well.
#[derive(Debug)]
pub struct ClockHandle<T> {
    stop: Option<Sender<()>>,
    thread: Option<JoinHandle<ClockWidget<T>>>,
}

/// Starts refreshing `widget` every `interval`.
///
/// The widget is updated once immediately, then after each interval until
/// the handle is stopped or dropped.
pub fn spawn<T, C>(mut widget: ClockWidget<T>, source: C, interval: Duration) -> ClockHandle<T>
where
    T: TextSlot + Send + 'static,
    C: TimeSource + Send + 'static,
{
    let (stop, stopped) = mpsc::channel::<()>();
    let thread = std::thread::spawn(move || {
        loop {
            widget.update(&source.now());
            match stopped.recv_timeout(interval) {
                Err(RecvTimeoutError::Timeout) => continue,
                Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
            }
        }
        debug!("clock stopped");
        widget
    });

    ClockHandle {
        stop: Some(stop),
        thread: Some(thread),
    }
}

impl<T> ClockHandle<T> {
    /// Stops the clock and hands the widget back.
    ///
    /// Returns `None` if the refresh thread panicked.
    pub fn stop(mut self) -> Option<ClockWidget<T>> {
        self.shutdown()
    }

    /// Returns `true` while the refresh thread is alive.
    pub fn is_running(&self) -> bool {
        self.thread.as_ref().is_some_and(|t| !t.is_finished())
    }

    fn shutdown(&mut self) -> Option<ClockWidget<T>> {
        if let Some(stop) = self.stop.take() {
            // The thread may already be gone; a failed send is fine.
            let _ = stop.send(());
        }
        let thread = self.thread.take()?;
        match thread.join() {
            Ok(widget) => Some(widget),
            Err(_) => {
                warn!("clock thread panicked");
                None
            }
        }
    }
}

impl<T> Drop for ClockHandle<T> {
    fn drop(&mut self) {
        self.shutdown();
    }
}
