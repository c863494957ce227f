//! Cosmetic analysis progress animation.
//!
//! The bar is perceived-responsiveness only: it is never sampled from the
//! real request. It runs as its own cancellable state stream; when the real
//! completion event arrives (or the view is reset) the owner calls `cancel`
//! instead of letting the animation run to exhaustion.

use std::time::{Duration, Instant};

pub const TICK_INTERVAL: Duration = Duration::from_millis(200);
pub const MAX_TICK_INCREMENT: f32 = 15.0;

/// Progress percentages at which the three ordered loading steps activate.
/// Activation is monotonic: once a step lights up it stays lit until reset.
const STEP_THRESHOLDS: [f32; 3] = [30.0, 70.0, 100.0];

#[derive(Debug, Clone)]
pub struct AnalysisProgress {
    value: f32,
    steps: [bool; 3],
    running: bool,
    last_tick: Option<Instant>,
}

impl Default for AnalysisProgress {
    fn default() -> Self {
        Self::idle()
    }
}

impl AnalysisProgress {
    pub fn idle() -> Self {
        Self {
            value: 0.0,
            steps: [false; 3],
            running: false,
            last_tick: None,
        }
    }

    pub fn start(&mut self, now: Instant) {
        *self = Self::idle();
        self.running = true;
        self.last_tick = Some(now);
    }

    /// Stops the animation without touching the displayed value or steps.
    /// The view that pre-empts the animation repaints over it anyway.
    pub fn cancel(&mut self) {
        self.running = false;
        self.last_tick = None;
    }

    pub fn reset(&mut self) {
        *self = Self::idle();
    }

    /// Advances the animation against the wall clock, applying one random
    /// increment per elapsed tick interval.
    pub fn tick(&mut self, now: Instant) {
        while self.running {
            let Some(last) = self.last_tick else { break };
            if now.duration_since(last) < TICK_INTERVAL {
                break;
            }
            self.last_tick = Some(last + TICK_INTERVAL);
            self.apply_increment(rand::random_range(0.0..MAX_TICK_INCREMENT));
        }
    }

    /// One animation step. Separate from `tick` so tests can drive the
    /// animation deterministically.
    pub fn apply_increment(&mut self, increment: f32) {
        if !self.running {
            return;
        }
        self.value = (self.value + increment).min(100.0);
        for (step, threshold) in self.steps.iter_mut().zip(STEP_THRESHOLDS) {
            if self.value >= threshold {
                *step = true;
            }
        }
        if self.value >= 100.0 {
            self.running = false;
            self.last_tick = None;
        }
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn fraction(&self) -> f32 {
        self.value / 100.0
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn step_active(&self, index: usize) -> bool {
        self.steps.get(index).copied().unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steps_activate_monotonically_at_thresholds() {
        let mut progress = AnalysisProgress::idle();
        progress.start(Instant::now());

        progress.apply_increment(29.9);
        assert!(!progress.step_active(0));

        progress.apply_increment(0.1);
        assert!(progress.step_active(0));
        assert!(!progress.step_active(1));

        progress.apply_increment(40.0);
        assert!(progress.step_active(0));
        assert!(progress.step_active(1));
        assert!(!progress.step_active(2));

        progress.apply_increment(30.0);
        assert!(progress.step_active(2));
    }

    #[test]
    fn stops_and_caps_at_one_hundred() {
        let mut progress = AnalysisProgress::idle();
        progress.start(Instant::now());

        progress.apply_increment(250.0);
        assert_eq!(progress.value(), 100.0);
        assert!(!progress.is_running());

        // Further increments are inert once stopped.
        progress.apply_increment(15.0);
        assert_eq!(progress.value(), 100.0);
    }

    #[test]
    fn cancel_freezes_the_animation_but_keeps_displayed_state() {
        let mut progress = AnalysisProgress::idle();
        progress.start(Instant::now());
        progress.apply_increment(45.0);

        progress.cancel();
        assert!(!progress.is_running());
        assert_eq!(progress.value(), 45.0);
        assert!(progress.step_active(0));

        progress.apply_increment(30.0);
        assert_eq!(progress.value(), 45.0);
    }

    #[test]
    fn reset_returns_to_initial_state() {
        let mut progress = AnalysisProgress::idle();
        progress.start(Instant::now());
        progress.apply_increment(80.0);

        progress.reset();
        assert_eq!(progress.value(), 0.0);
        assert!(!progress.is_running());
        assert!(!progress.step_active(0));
        assert!(!progress.step_active(1));
        assert!(!progress.step_active(2));
    }

    #[test]
    fn tick_applies_one_increment_per_elapsed_interval() {
        let start = Instant::now();
        let mut progress = AnalysisProgress::idle();
        progress.start(start);

        progress.tick(start + Duration::from_millis(100));
        assert_eq!(progress.value(), 0.0);

        progress.tick(start + Duration::from_millis(450));
        // Two full intervals elapsed; increments are random but nonnegative
        // and capped, so the value stays within two ticks' worth.
        assert!(progress.value() <= 2.0 * MAX_TICK_INCREMENT);
        assert!(progress.is_running());
    }
}
