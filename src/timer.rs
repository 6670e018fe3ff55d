//! Solve timer driven by caller-supplied timestamps.

/// Tracks how long the current attempt has been running.
///
/// Timestamps are seconds on any monotonic clock the caller chooses.
#[derive(Clone, Copy, Debug, Default)]
pub struct SolveTimer {
    started_at: Option<f64>,
}

impl SolveTimer {
    /// Starts (or restarts) timing at `now`.
    pub fn start(&mut self, now: f64) {
        self.started_at = Some(now);
    }

    pub fn stop(&mut self) {
        self.started_at = None;
    }

    pub fn is_running(&self) -> bool {
        self.started_at.is_some()
    }

    /// Seconds since the timer started, zero when stopped.
    pub fn elapsed(&self, now: f64) -> f64 {
        self.started_at
            .map_or(0.0, |started_at| (now - started_at).max(0.0))
    }

    /// Elapsed time as `m:ss`.
    pub fn display(&self, now: f64) -> String {
        format_clock(self.elapsed(now))
    }
}

/// Formats seconds as `m:ss`, truncating fractions.
pub fn format_clock(seconds: f64) -> String {
    let whole = seconds.max(0.0) as u64;
    format!("{}:{:02}", whole / 60, whole % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stopped_timer_shows_zero() {
        let timer = SolveTimer::default();
        assert!(!timer.is_running());
        assert_eq!(timer.display(100.0), "0:00");
    }

    #[test]
    fn test_elapsed_and_display() {
        let mut timer = SolveTimer::default();
        timer.start(10.0);
        assert!(timer.is_running());
        assert_eq!(timer.elapsed(12.5), 2.5);
        assert_eq!(timer.display(12.5), "0:02");
        assert_eq!(timer.display(10.0 + 61.9), "1:01");
        assert_eq!(timer.display(10.0 + 600.0), "10:00");
        timer.stop();
        assert_eq!(timer.display(1000.0), "0:00");
    }

    #[test]
    fn test_clock_before_start_is_zero() {
        let mut timer = SolveTimer::default();
        timer.start(5.0);
        assert_eq!(timer.elapsed(4.0), 0.0);
    }
}
