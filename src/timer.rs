use log::{debug, info};
use std::time::Duration;
use tokio::time::{interval, MissedTickBehavior};

use crate::timing::DetectedTime;

/// A countdown timer for one step of a recipe
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KitchenTimer {
    name: String,
    total_seconds: u32,
    remaining_seconds: u32,
    running: bool,
    completed: bool,
}

impl KitchenTimer {
    /// Create a stopped timer. A zero duration is not a timer.
    pub fn new(name: impl Into<String>, total_seconds: u32) -> Option<Self> {
        if total_seconds == 0 {
            return None;
        }
        Some(Self {
            name: name.into(),
            total_seconds,
            remaining_seconds: total_seconds,
            running: false,
            completed: false,
        })
    }

    /// Timer for a numbered step, preset to the duration found in its text
    pub fn for_step(step_number: u32, detected: &DetectedTime) -> Option<Self> {
        Self::new(format!("Step {step_number} Timer"), detected.total_seconds)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn total_seconds(&self) -> u32 {
        self.total_seconds
    }

    pub fn remaining_seconds(&self) -> u32 {
        self.remaining_seconds
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn start(&mut self) {
        if self.remaining_seconds > 0 {
            self.running = true;
            self.completed = false;
        }
    }

    pub fn pause(&mut self) {
        self.running = false;
    }

    /// Back to the full duration, stopped
    pub fn reset(&mut self) {
        self.remaining_seconds = self.total_seconds;
        self.running = false;
        self.completed = false;
    }

    /// Advance one second. Returns true on the tick that finishes the timer.
    pub fn tick(&mut self) -> bool {
        if !self.running || self.remaining_seconds == 0 {
            return false;
        }

        self.remaining_seconds -= 1;
        if self.remaining_seconds == 0 {
            self.running = false;
            self.completed = true;
            return true;
        }
        false
    }

    /// Elapsed share of the duration, 0 to 100
    pub fn progress(&self) -> f64 {
        let elapsed = self.total_seconds - self.remaining_seconds;
        f64::from(elapsed) / f64::from(self.total_seconds) * 100.0
    }

    /// Remaining time as `M:SS`
    pub fn display(&self) -> String {
        format!(
            "{}:{:02}",
            self.remaining_seconds / 60,
            self.remaining_seconds % 60
        )
    }
}

/// Start `timer` and tick it once a second until it completes.
///
/// `on_tick` sees the timer after every tick.
pub async fn run_countdown<F>(timer: &mut KitchenTimer, mut on_tick: F)
where
    F: FnMut(&KitchenTimer),
{
    timer.start();
    debug!("Starting '{}' for {}s", timer.name, timer.remaining_seconds);

    let mut ticker = interval(Duration::from_secs(1));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The first tick of an interval fires immediately
    ticker.tick().await;

    while timer.is_running() {
        ticker.tick().await;
        let finished = timer.tick();
        on_tick(timer);
        if finished {
            info!("Timer complete: {}", timer.name);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timing::detect_timing_in_text;

    #[test]
    fn test_zero_duration_is_rejected() {
        assert!(KitchenTimer::new("Nothing", 0).is_none());
    }

    #[test]
    fn test_for_step_uses_detected_time() {
        let detected = detect_timing_in_text("Simmer 15 minutes").unwrap();
        let timer = KitchenTimer::for_step(3, &detected).unwrap();

        assert_eq!(timer.name(), "Step 3 Timer");
        assert_eq!(timer.total_seconds(), 900);
        assert_eq!(timer.display(), "15:00");
        assert!(!timer.is_running());
    }

    #[test]
    fn test_tick_only_while_running() {
        let mut timer = KitchenTimer::new("Eggs", 3).unwrap();
        assert!(!timer.tick());
        assert_eq!(timer.remaining_seconds(), 3);

        timer.start();
        assert!(!timer.tick());
        timer.pause();
        assert!(!timer.tick());
        assert_eq!(timer.remaining_seconds(), 2);
    }

    #[test]
    fn test_completion_and_reset() {
        let mut timer = KitchenTimer::new("Toast", 2).unwrap();
        timer.start();
        assert!(!timer.tick());
        assert!(timer.tick());

        assert!(timer.is_completed());
        assert!(!timer.is_running());
        assert_eq!(timer.progress(), 100.0);
        assert_eq!(timer.display(), "0:00");

        // a finished timer cannot be restarted without a reset
        timer.start();
        assert!(!timer.is_running());

        timer.reset();
        assert_eq!(timer.remaining_seconds(), 2);
        assert!(!timer.is_completed());
        assert_eq!(timer.progress(), 0.0);
    }

    #[test]
    fn test_display_pads_seconds() {
        let timer = KitchenTimer::new("Rice", 65).unwrap();
        assert_eq!(timer.display(), "1:05");
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_countdown_ticks_to_completion() {
        let mut timer = KitchenTimer::new("Tea", 3).unwrap();
        let mut seen = Vec::new();

        run_countdown(&mut timer, |t| seen.push(t.remaining_seconds())).await;

        assert_eq!(seen, vec![2, 1, 0]);
        assert!(timer.is_completed());
    }
}
