//! Repeatability harness.
//!
//! The engine keeps no caches: every observation of a configuration is a
//! full recompute. These helpers run an observation several times on
//! independently built inputs and check that every run agrees.

use std::fmt::Debug;

/// Outcome of repeated observations.
#[derive(Debug, Clone, PartialEq)]
pub struct RepeatResult<T> {
    /// Observation from each run, in order.
    pub observations: Vec<T>,
}

impl<T: PartialEq + Debug> RepeatResult<T> {
    /// Whether all runs observed the same value.
    #[must_use]
    pub fn is_repeatable(&self) -> bool {
        self.observations.windows(2).all(|w| w[0] == w[1])
    }

    /// Assert that all runs agreed.
    ///
    /// # Panics
    ///
    /// Panics with every observation if the runs diverged.
    pub fn assert_repeatable(&self) {
        if !self.is_repeatable() {
            panic!(
                "Observations diverged!\n\
                 Runs: {}\n\
                 All observations: {:#?}",
                self.observations.len(),
                self.observations
            );
        }
    }
}

/// Build a fresh input for each run and observe it.
///
/// # Example
///
/// ```ignore
/// use armorsmith_test_utils::fixtures::{grenadiers, standard_catalog};
/// use armorsmith_test_utils::repeatability::verify_repeatable;
///
/// let catalog = standard_catalog();
/// let result = verify_repeatable(
///     3,
///     || grenadiers(&catalog),
///     |config| armorsmith_core::scoring::score(config, &catalog).unwrap(),
/// );
/// result.assert_repeatable();
/// ```
pub fn verify_repeatable<S, T, Setup, Observe>(
    runs: usize,
    setup: Setup,
    observe: Observe,
) -> RepeatResult<T>
where
    Setup: Fn() -> S,
    Observe: Fn(&S) -> T,
    T: PartialEq + Debug,
{
    let observations: Vec<T> = (0..runs).map(|_| observe(&setup())).collect();
    let result = RepeatResult { observations };
    if !result.is_repeatable() {
        tracing::warn!(runs, "Repeated observations diverged");
    }
    result
}

/// Observe the same input repeatedly, allowing the observation to mutate
/// it between runs. Used to check that refresh and validate are
/// idempotent.
pub fn verify_idempotent<S, T, Observe>(state: &mut S, runs: usize, observe: Observe) -> RepeatResult<T>
where
    Observe: Fn(&mut S) -> T,
    T: PartialEq + Debug,
{
    let observations: Vec<T> = (0..runs).map(|_| observe(state)).collect();
    RepeatResult { observations }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeatable_counter() {
        let result = verify_repeatable(4, || 21, |n| n * 2);
        assert!(result.is_repeatable());
        assert_eq!(result.observations, vec![42; 4]);
    }

    #[test]
    fn test_divergence_detected() {
        let mut counter = 0;
        let result = verify_idempotent(&mut counter, 3, |n| {
            *n += 1;
            *n
        });
        assert!(!result.is_repeatable());
    }

    #[test]
    #[should_panic(expected = "Observations diverged")]
    fn test_assert_panics_on_divergence() {
        RepeatResult {
            observations: vec![1, 2],
        }
        .assert_repeatable();
    }
}
