/// Minimum spacing between two dispatched alerts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ThrottlePolicy {
    pub throttle_seconds: u64,
}

impl ThrottlePolicy {
    pub fn new(throttle_seconds: u64) -> Self {
        Self { throttle_seconds }
    }

    /// A clock that went backwards yields a negative elapsed time, which stays suppressed.
    pub fn allows(&self, last_alert: i64, now: i64) -> bool {
        let elapsed = now.saturating_sub(last_alert);
        elapsed >= 0 && elapsed as u64 >= self.throttle_seconds
    }
}
