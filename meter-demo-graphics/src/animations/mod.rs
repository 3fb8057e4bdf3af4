//! Clock driven value animation.

mod path;

pub use path::{Easing, PROGRESS_MAX};

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AnimationError {
    #[error("animation end value {end} is below start value {start}")]
    InvalidRange { start: i32, end: i32 },
    #[error("animation duration must be at least 1ms")]
    ZeroDuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Repeat {
    Infinite,
    /// Total number of cycles, `Count(0)` runs once like `Count(1)`.
    Count(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationConfig {
    pub start: i32,
    pub end: i32,
    pub duration_ms: u32,
    pub playback_ms: u32,
    pub playback_delay_ms: u32,
    pub repeat_delay_ms: u32,
    pub repeat: Repeat,
    pub easing: Easing,
}

impl AnimationConfig {
    pub fn needle_sweep() -> Self {
        Self {
            start: 0,
            end: 100,
            duration_ms: 500,
            playback_ms: 500,
            playback_delay_ms: 100,
            repeat_delay_ms: 100,
            repeat: Repeat::Infinite,
            easing: Easing::Linear,
        }
    }

    pub fn validate(&self) -> Result<(), AnimationError> {
        if self.end < self.start {
            return Err(AnimationError::InvalidRange {
                start: self.start,
                end: self.end,
            });
        }
        if self.duration_ms == 0 {
            return Err(AnimationError::ZeroDuration);
        }
        Ok(())
    }

    fn run_ms(&self) -> u64 {
        let mut run = self.duration_ms as u64;
        if self.playback_ms > 0 {
            run += self.playback_delay_ms as u64 + self.playback_ms as u64;
        }
        run
    }
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self::needle_sweep()
    }
}

#[derive(Debug, Clone)]
pub struct ValueAnimation {
    config: AnimationConfig,
    started_at_ms: u32,
}

impl ValueAnimation {
    pub fn start(config: AnimationConfig, clock_ms: u32) -> Result<Self, AnimationError> {
        config.validate()?;
        Ok(Self {
            config,
            started_at_ms: clock_ms,
        })
    }

    pub fn period_ms(&self) -> u64 {
        self.config.run_ms() + self.config.repeat_delay_ms as u64
    }

    fn total_ms(&self) -> Option<u64> {
        match self.config.repeat {
            Repeat::Infinite => None,
            Repeat::Count(count) => {
                let count = count.max(1) as u64;
                Some(count * self.period_ms() - self.config.repeat_delay_ms as u64)
            }
        }
    }

    pub fn is_finished(&self, clock_ms: u32) -> bool {
        let elapsed = clock_ms.saturating_sub(self.started_at_ms) as u64;
        self.total_ms().is_some_and(|total| elapsed >= total)
    }

    pub fn value_at(&self, clock_ms: u32) -> i32 {
        let AnimationConfig {
            start,
            end,
            duration_ms,
            playback_ms,
            playback_delay_ms,
            easing,
            ..
        } = self.config;

        if self.is_finished(clock_ms) {
            return if playback_ms > 0 { start } else { end };
        }

        let elapsed = clock_ms.saturating_sub(self.started_at_ms) as u64;
        let t = elapsed % self.period_ms();
        let duration = duration_ms as u64;

        if t < duration {
            return interpolate(start, end, t, duration, easing);
        }
        if playback_ms == 0 {
            return end;
        }

        let back_from = duration + playback_delay_ms as u64;
        if t < back_from {
            end
        } else if t < back_from + playback_ms as u64 {
            interpolate(end, start, t - back_from, playback_ms as u64, easing)
        } else {
            start
        }
    }
}

fn interpolate(from: i32, to: i32, t: u64, duration: u64, easing: Easing) -> i32 {
    let progress = (t * PROGRESS_MAX as u64 / duration) as i32;
    let eased = easing.apply(progress) as i64;
    let span = to as i64 - from as i64;
    (from as i64 + span * eased / PROGRESS_MAX as i64) as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn without_delays() -> AnimationConfig {
        AnimationConfig {
            playback_delay_ms: 0,
            repeat_delay_ms: 0,
            ..AnimationConfig::needle_sweep()
        }
    }

    #[test]
    fn samples_start_end_and_back() {
        let anim = ValueAnimation::start(without_delays(), 0).unwrap();
        assert_eq!(anim.value_at(0), 0);
        assert_eq!(anim.value_at(250), 50);
        assert_eq!(anim.value_at(500), 100);
        assert_eq!(anim.value_at(750), 50);
        assert_eq!(anim.value_at(1000), 0);
    }

    #[test]
    fn default_sweep_holds_during_delays() {
        let anim = ValueAnimation::start(AnimationConfig::needle_sweep(), 0).unwrap();
        assert_eq!(anim.period_ms(), 1200);
        for t in 500..600 {
            assert_eq!(anim.value_at(t), 100, "t={t}");
        }
        assert_eq!(anim.value_at(850), 50);
        for t in 1100..1200 {
            assert_eq!(anim.value_at(t), 0, "t={t}");
        }
        assert_eq!(anim.value_at(1200), 0);
        assert_eq!(anim.value_at(1450), 50);
    }

    #[test]
    fn full_cycle_returns_to_start() {
        let anim = ValueAnimation::start(AnimationConfig::needle_sweep(), 0).unwrap();
        let period = anim.period_ms() as u32;
        for cycle in 0..5 {
            assert_eq!(anim.value_at(cycle * period), 0);
        }
    }

    #[test]
    fn value_stays_in_range() {
        for easing in [Easing::Linear, Easing::EaseIn, Easing::EaseOut, Easing::EaseInOut] {
            let config = AnimationConfig {
                easing,
                ..AnimationConfig::needle_sweep()
            };
            let anim = ValueAnimation::start(config, 7).unwrap();
            for t in 0..5000 {
                let v = anim.value_at(t);
                assert!((0..=100).contains(&v), "{easing:?} t={t} v={v}");
            }
        }
    }

    #[test]
    fn clock_before_start_reads_start_value() {
        let anim = ValueAnimation::start(AnimationConfig::needle_sweep(), 1000).unwrap();
        assert_eq!(anim.value_at(10), 0);
        assert_eq!(anim.value_at(1250), 50);
    }

    #[test]
    fn rejects_inverted_range() {
        let config = AnimationConfig {
            start: 100,
            end: 0,
            ..AnimationConfig::needle_sweep()
        };
        assert_eq!(
            ValueAnimation::start(config, 0).unwrap_err(),
            AnimationError::InvalidRange { start: 100, end: 0 }
        );
    }

    #[test]
    fn rejects_zero_duration() {
        let config = AnimationConfig {
            duration_ms: 0,
            ..AnimationConfig::needle_sweep()
        };
        assert_eq!(
            ValueAnimation::start(config, 0).unwrap_err(),
            AnimationError::ZeroDuration
        );
    }

    #[test]
    fn finite_repeat_settles() {
        let config = AnimationConfig {
            repeat: Repeat::Count(2),
            ..AnimationConfig::needle_sweep()
        };
        let anim = ValueAnimation::start(config, 0).unwrap();
        // two runs of 1100ms with one 100ms repeat delay between them
        assert!(!anim.is_finished(2299));
        assert!(anim.is_finished(2300));
        assert_eq!(anim.value_at(1450), 50);
        assert_eq!(anim.value_at(10_000), 0);
    }

    #[test]
    fn without_playback_restarts_from_start() {
        let config = AnimationConfig {
            playback_ms: 0,
            ..AnimationConfig::needle_sweep()
        };
        let anim = ValueAnimation::start(config, 0).unwrap();
        assert_eq!(anim.period_ms(), 600);
        assert_eq!(anim.value_at(550), 100);
        assert_eq!(anim.value_at(600), 0);
        assert_eq!(anim.value_at(850), 50);
    }

    #[test]
    fn single_run_without_playback_holds_end() {
        let config = AnimationConfig {
            playback_ms: 0,
            repeat: Repeat::Count(1),
            ..AnimationConfig::needle_sweep()
        };
        let anim = ValueAnimation::start(config, 0).unwrap();
        assert!(anim.is_finished(500));
        assert_eq!(anim.value_at(499), 99);
        assert_eq!(anim.value_at(5000), 100);
    }

    #[test]
    fn step_jumps_at_end_of_run() {
        let config = AnimationConfig {
            easing: Easing::Step,
            ..without_delays()
        };
        let anim = ValueAnimation::start(config, 0).unwrap();
        assert_eq!(anim.value_at(499), 0);
        assert_eq!(anim.value_at(500), 100);
        assert_eq!(anim.value_at(999), 100);
        assert_eq!(anim.value_at(1000), 0);
    }
}
