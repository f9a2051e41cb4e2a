use crate::map::LevelStatus;

/// Level countdown. Only runs while the level is [`LevelStatus::Running`].
///
/// Elapsed time is summed in `f64` and compared in whole milliseconds, so a
/// limit of N seconds expires after N seconds of frame deltas whatever the
/// frame rate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CountDownTimer {
    start: f32,
    elapsed: f64,
}

impl CountDownTimer {
    /// A timer holding `start` seconds; negative values clamp to zero.
    pub fn new(start: f32) -> Self {
        Self {
            start: start.max(0.0),
            elapsed: 0.0,
        }
    }

    /// Seconds left, never below zero.
    pub fn remaining(&self) -> f32 {
        if self.expired() {
            0.0
        } else {
            (f64::from(self.start) - self.elapsed) as f32
        }
    }

    /// The time limit the level started with.
    pub fn start(&self) -> f32 {
        self.start
    }

    /// Seconds used so far.
    pub fn elapsed(&self) -> f32 {
        self.elapsed.min(f64::from(self.start)) as f32
    }

    fn expired(&self) -> bool {
        (self.elapsed * 1000.0).round() >= (f64::from(self.start) * 1000.0).round()
    }

    /// Count down by `dt` seconds. Reaching zero clamps the timer and loses a
    /// running level; once the level has left Running this is a no-op.
    pub fn tick(&mut self, dt: f32, status: &mut LevelStatus) {
        if *status != LevelStatus::Running {
            return;
        }
        self.elapsed += f64::from(dt.max(0.0));
        if self.expired() {
            *status = LevelStatus::Lost;
        }
    }

    /// Back to the full time limit.
    pub fn reset(&mut self) {
        self.elapsed = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runs_out_after_start_value_of_simulated_time() {
        let mut timer = CountDownTimer::new(50.0);
        let mut status = LevelStatus::Running;
        // 50 000 ms in 250 ms frames
        for _ in 0..200 {
            assert_eq!(status, LevelStatus::Running);
            timer.tick(0.25, &mut status);
        }
        assert_eq!(timer.remaining(), 0.0);
        assert_eq!(status, LevelStatus::Lost);
    }

    #[test]
    fn runs_out_at_real_frame_rates() {
        for (dt, frames) in [(1.0 / 60.0, 3000), (0.016, 3125), (0.1, 500)] {
            let mut timer = CountDownTimer::new(50.0);
            let mut status = LevelStatus::Running;
            for _ in 0..frames {
                timer.tick(dt, &mut status);
            }
            assert_eq!(timer.remaining(), 0.0, "dt = {dt}");
            assert_eq!(status, LevelStatus::Lost, "dt = {dt}");
            assert_eq!(timer.elapsed(), 50.0, "dt = {dt}");
        }
    }

    #[test]
    fn still_running_one_frame_before_the_limit() {
        let mut timer = CountDownTimer::new(50.0);
        let mut status = LevelStatus::Running;
        for _ in 0..2999 {
            timer.tick(1.0 / 60.0, &mut status);
        }
        assert_eq!(status, LevelStatus::Running);
        assert!(timer.remaining() > 0.016 && timer.remaining() < 0.017);
    }

    #[test]
    fn monotonic_and_clamped() {
        let mut timer = CountDownTimer::new(1.0);
        let mut status = LevelStatus::Running;
        let mut last = timer.remaining();
        for _ in 0..10 {
            timer.tick(0.3, &mut status);
            assert!(timer.remaining() <= last);
            assert!(timer.remaining() >= 0.0);
            last = timer.remaining();
        }
        assert_eq!(status, LevelStatus::Lost);
        assert_eq!(timer.remaining(), 0.0);
    }

    #[test]
    fn frozen_outside_running() {
        let mut timer = CountDownTimer::new(5.0);
        let mut status = LevelStatus::Won;
        timer.tick(10.0, &mut status);
        assert_eq!(timer.remaining(), 5.0);
        assert_eq!(status, LevelStatus::Won);
    }

    #[test]
    fn reset_restores_start() {
        let mut timer = CountDownTimer::new(3.0);
        let mut status = LevelStatus::Running;
        timer.tick(2.5, &mut status);
        assert_eq!(timer.elapsed(), 2.5);
        timer.reset();
        assert_eq!(timer.remaining(), 3.0);
    }
}
