//! Small helpers shared across modules.

use crate::{Error, Result};
use std::{sync::mpsc, thread, time::Duration};

/// Run a possibly slow, blocking job on a helper thread and give up after
/// `timeout`. The helper thread is detached on timeout; its result is dropped.
///
/// # Errors
///
/// Returns the job's own error, or `on_timeout` when the deadline passes
pub fn run_with_timeout<T, F>(job: F, timeout: Duration, on_timeout: Error) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T> + Send + 'static,
{
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        // Receiver may be gone after a timeout
        let _ = tx.send(job());
    });

    match rx.recv_timeout(timeout) {
        Ok(result) => result,
        Err(mpsc::RecvTimeoutError::Timeout) => Err(on_timeout),
        Err(mpsc::RecvTimeoutError::Disconnected) => {
            Err(Error::InvalidInput("Background job ended without a result".to_string()))
        }
    }
}

/// Clamp `value` to `[-limit, limit]`, mapping NaN to zero
#[must_use]
pub fn clamp_symmetric(value: f64, limit: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(-limit, limit)
    }
}
