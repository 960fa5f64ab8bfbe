/// Seconds before a persistent histogram length mismatch becomes a visible
/// warning.
pub const MISMATCH_WARN_DELAY: f64 = 1.0;

/// One-shot countdown with replace-on-rearm semantics: arming while armed
/// restarts the countdown, it never stacks. Deadline-based so the owning
/// event loop (or a test) drives it with its own clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct WarnTimer {
    deadline: Option<f64>,
}

impl WarnTimer {
    pub fn arm(&mut self, now: f64, delay: f64) {
        self.deadline = Some(now + delay);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn expired(&self, now: f64) -> bool {
        matches!(self.deadline, Some(deadline) if now >= deadline)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arms_and_expires() {
        let mut timer = WarnTimer::default();
        assert!(!timer.is_armed());
        timer.arm(10.0, MISMATCH_WARN_DELAY);
        assert!(timer.is_armed());
        assert!(!timer.expired(10.5));
        assert!(timer.expired(11.0));
    }

    #[test]
    fn rearm_replaces_previous_countdown() {
        let mut timer = WarnTimer::default();
        timer.arm(10.0, MISMATCH_WARN_DELAY);
        timer.arm(10.8, MISMATCH_WARN_DELAY);
        assert!(!timer.expired(11.0));
        assert!(timer.expired(11.8));
    }

    #[test]
    fn cancel_disarms() {
        let mut timer = WarnTimer::default();
        timer.arm(0.0, MISMATCH_WARN_DELAY);
        timer.cancel();
        assert!(!timer.expired(100.0));
    }
}
