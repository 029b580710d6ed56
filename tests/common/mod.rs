//! Common test utilities and helpers

#![allow(dead_code)] // Test utilities may not all be used in every test file

use cellmon_rs::backend::{BackendMessage, FrontendReceiver};
use std::time::{Duration, Instant};

/// Generous deadline for waiting on worker messages
pub fn test_timeout() -> Duration {
    Duration::from_secs(2)
}

/// Receive messages until one matches the predicate, or the timeout passes
pub fn recv_matching<F>(
    frontend: &FrontendReceiver,
    timeout: Duration,
    pred: F,
) -> Option<BackendMessage>
where
    F: Fn(&BackendMessage) -> bool,
{
    let deadline = Instant::now() + timeout;
    while let Some(remaining) = deadline.checked_duration_since(Instant::now()) {
        match frontend.receiver.recv_timeout(remaining) {
            Ok(msg) if pred(&msg) => return Some(msg),
            Ok(_) => continue,
            Err(_) => break,
        }
    }
    None
}
