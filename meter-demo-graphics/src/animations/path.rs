pub const PROGRESS_MAX: i32 = 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    #[default]
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
    /// Holds the start value for the whole run, then jumps to the end.
    Step,
}

impl Easing {
    pub fn apply(self, progress: i32) -> i32 {
        let p = progress.clamp(0, PROGRESS_MAX);
        match self {
            Easing::Linear => p,
            Easing::EaseIn => p * p / PROGRESS_MAX,
            Easing::EaseOut => {
                let rest = PROGRESS_MAX - p;
                PROGRESS_MAX - rest * rest / PROGRESS_MAX
            }
            Easing::EaseInOut => {
                if p < PROGRESS_MAX / 2 {
                    2 * p * p / PROGRESS_MAX
                } else {
                    let rest = PROGRESS_MAX - p;
                    PROGRESS_MAX - 2 * rest * rest / PROGRESS_MAX
                }
            }
            Easing::Step => {
                if p >= PROGRESS_MAX {
                    PROGRESS_MAX
                } else {
                    0
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Easing; 5] = [
        Easing::Linear,
        Easing::EaseIn,
        Easing::EaseOut,
        Easing::EaseInOut,
        Easing::Step,
    ];

    #[test]
    fn endpoints_are_fixed() {
        for easing in ALL {
            assert_eq!(easing.apply(0), 0, "{easing:?}");
            assert_eq!(easing.apply(PROGRESS_MAX), PROGRESS_MAX, "{easing:?}");
        }
    }

    #[test]
    fn curves_are_monotonic_and_bounded() {
        for easing in ALL {
            let mut last = 0;
            for p in 0..=PROGRESS_MAX {
                let v = easing.apply(p);
                assert!((0..=PROGRESS_MAX).contains(&v), "{easing:?} at {p}");
                assert!(v >= last, "{easing:?} decreased at {p}");
                last = v;
            }
        }
    }

    #[test]
    fn ease_in_starts_slow_and_ease_out_starts_fast() {
        assert!(Easing::EaseIn.apply(256) < 256);
        assert!(Easing::EaseOut.apply(256) > 256);
        assert_eq!(Easing::EaseInOut.apply(512), 512);
    }
}
