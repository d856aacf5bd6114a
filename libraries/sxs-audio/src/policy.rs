/// Two-tier duration policy
use sxs_core::limits::{HARD_FLOOR_SECS, RECOMMENDED_MIN_SECS};
use sxs_core::ValidationIssue;

/// Outcome of applying the duration policy
#[derive(Debug, Clone, PartialEq)]
pub enum DurationVerdict {
    /// Below the hard floor; the issue is fatal
    Rejected(ValidationIssue),
    /// Usable, possibly with an advisory
    Accepted(Option<ValidationIssue>),
}

impl DurationVerdict {
    /// Whether the duration passed the hard floor
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted(_))
    }
}

/// Hard floor and recommended minimum, in seconds
///
/// Independent of how the duration was measured.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DurationPolicy {
    pub hard_floor_secs: f64,
    pub recommended_min_secs: f64,
}

impl Default for DurationPolicy {
    fn default() -> Self {
        Self {
            hard_floor_secs: HARD_FLOOR_SECS,
            recommended_min_secs: RECOMMENDED_MIN_SECS,
        }
    }
}

impl DurationPolicy {
    /// Classify a duration
    ///
    /// Durations that are not finite never pass.
    pub fn evaluate(&self, duration: f64) -> DurationVerdict {
        if !duration.is_finite() || duration < self.hard_floor_secs {
            return DurationVerdict::Rejected(ValidationIssue::ShortDuration {
                duration,
                floor: self.hard_floor_secs,
            });
        }

        if duration < self.recommended_min_secs {
            return DurationVerdict::Accepted(Some(ValidationIssue::ShortDurationWarning {
                duration,
                recommended: self.recommended_min_secs,
            }));
        }

        DurationVerdict::Accepted(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn below_floor_is_rejected() {
        let verdict = DurationPolicy::default().evaluate(0.5);
        assert_eq!(
            verdict,
            DurationVerdict::Rejected(ValidationIssue::ShortDuration {
                duration: 0.5,
                floor: 1.0
            })
        );
    }

    #[test]
    fn floor_itself_is_accepted_with_warning() {
        let verdict = DurationPolicy::default().evaluate(1.0);
        assert!(verdict.is_accepted());
        assert!(matches!(verdict, DurationVerdict::Accepted(Some(_))));
    }

    #[test]
    fn thirty_seconds_warns_with_both_values() {
        match DurationPolicy::default().evaluate(30.0) {
            DurationVerdict::Accepted(Some(issue)) => {
                let text = issue.to_string();
                assert!(text.contains("30.0"), "{text}");
                assert!(text.contains("60.0"), "{text}");
            }
            other => panic!("unexpected verdict: {other:?}"),
        }
    }

    #[test]
    fn recommended_minimum_and_above_are_clean() {
        let policy = DurationPolicy::default();
        assert_eq!(policy.evaluate(60.0), DurationVerdict::Accepted(None));
        assert_eq!(policy.evaluate(120.0), DurationVerdict::Accepted(None));
    }

    #[test]
    fn non_finite_durations_are_rejected() {
        let policy = DurationPolicy::default();
        assert!(!policy.evaluate(f64::NAN).is_accepted());
        assert!(!policy.evaluate(f64::INFINITY).is_accepted());
    }

    proptest! {
        /// Property: anything under the floor is rejected with a fatal issue
        #[test]
        fn under_floor_always_rejected(duration in 0.0f64..1.0) {
            match DurationPolicy::default().evaluate(duration) {
                DurationVerdict::Rejected(issue) => prop_assert!(issue.is_fatal()),
                other => prop_assert!(false, "accepted {duration}: {other:?}"),
            }
        }

        /// Property: between the thresholds there is exactly one advisory
        #[test]
        fn between_thresholds_warns(duration in 1.0f64..60.0) {
            match DurationPolicy::default().evaluate(duration) {
                DurationVerdict::Accepted(Some(issue)) => prop_assert!(!issue.is_fatal()),
                other => prop_assert!(false, "{duration}: {other:?}"),
            }
        }

        /// Property: at or above the recommended minimum nothing is reported
        #[test]
        fn long_files_are_clean(duration in 60.0f64..86_400.0) {
            prop_assert_eq!(DurationPolicy::default().evaluate(duration), DurationVerdict::Accepted(None));
        }
    }
}
