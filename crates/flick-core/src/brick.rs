//! Self-verification for widgets.
//!
//! Every [`Widget`](crate::Widget) is also a [`Brick`]: it declares the
//! assertions that must hold for its current state and can check them on
//! demand. Test harnesses verify bricks after each simulated interaction so
//! that a widget showing a state it does not hold fails loudly.

use std::time::{Duration, Instant};

/// A falsifiable claim about a widget's state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrickAssertion {
    /// Text content must be visible (non-empty)
    TextVisible,
    /// Maximum render latency in milliseconds
    MaxLatencyMs(u32),
    /// Widget-specific assertion identified by name
    Custom(&'static str),
}

/// Performance budget for a brick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrickBudget {
    /// Maximum time for measure phase
    pub measure_ms: u32,
    /// Maximum time for layout phase
    pub layout_ms: u32,
    /// Maximum time for paint phase
    pub paint_ms: u32,
    /// Total budget (may be less than sum of phases)
    pub total_ms: u32,
}

impl BrickBudget {
    /// Create a budget with equal distribution across phases
    #[must_use]
    pub const fn uniform(total_ms: u32) -> Self {
        let phase_ms = total_ms / 3;
        Self {
            measure_ms: phase_ms,
            layout_ms: phase_ms,
            paint_ms: phase_ms,
            total_ms,
        }
    }

    /// Convert to Duration
    #[must_use]
    pub const fn as_duration(&self) -> Duration {
        Duration::from_millis(self.total_ms as u64)
    }
}

impl Default for BrickBudget {
    fn default() -> Self {
        // 16ms total for 60fps
        Self::uniform(16)
    }
}

/// Result of verifying brick assertions
#[derive(Debug, Clone)]
pub struct BrickVerification {
    /// All assertions that passed
    pub passed: Vec<BrickAssertion>,
    /// All assertions that failed with reasons
    pub failed: Vec<(BrickAssertion, String)>,
    /// Time taken to verify
    pub verification_time: Duration,
}

impl BrickVerification {
    /// Run `check` for every assertion, timing the whole pass.
    ///
    /// `check` returns `Err(reason)` for a failed assertion.
    pub fn run<F>(assertions: &[BrickAssertion], mut check: F) -> Self
    where
        F: FnMut(&BrickAssertion) -> Result<(), String>,
    {
        let start = Instant::now();
        let mut passed = Vec::new();
        let mut failed = Vec::new();
        for assertion in assertions {
            match check(assertion) {
                Ok(()) => passed.push(assertion.clone()),
                Err(reason) => failed.push((assertion.clone(), reason)),
            }
        }
        Self {
            passed,
            failed,
            verification_time: start.elapsed(),
        }
    }

    /// Check if all assertions passed
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.failed.is_empty()
    }

    /// Get the falsification score (passed / total)
    #[must_use]
    pub fn score(&self) -> f32 {
        let total = self.passed.len() + self.failed.len();
        if total == 0 {
            1.0
        } else {
            self.passed.len() as f32 / total as f32
        }
    }
}

/// Assertions and budget a widget declares about itself.
pub trait Brick: Send + Sync {
    /// Get the brick's type name
    fn brick_name(&self) -> &'static str;

    /// Get all assertions for this brick
    fn assertions(&self) -> &[BrickAssertion];

    /// Get the performance budget
    fn budget(&self) -> BrickBudget {
        BrickBudget::default()
    }

    /// Verify all assertions against current state
    fn verify(&self) -> BrickVerification;

    /// Check if this brick can be rendered (all assertions pass)
    fn can_render(&self) -> bool {
        self.verify().is_valid()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_brick_budget_uniform() {
        let b = BrickBudget::uniform(16);
        assert_eq!(b.total_ms, 16);
        assert_eq!(b.measure_ms, 5);
        assert_eq!(b.as_duration(), Duration::from_millis(16));
    }

    #[test]
    fn test_brick_budget_default() {
        assert_eq!(BrickBudget::default(), BrickBudget::uniform(16));
    }

    #[test]
    fn test_verification_run_splits_results() {
        let assertions = [BrickAssertion::TextVisible, BrickAssertion::Custom("even")];
        let v = BrickVerification::run(&assertions, |a| match a {
            BrickAssertion::TextVisible => Ok(()),
            _ => Err("odd".into()),
        });
        assert!(!v.is_valid());
        assert_eq!(v.passed, vec![BrickAssertion::TextVisible]);
        assert_eq!(v.failed[0].1, "odd");
        assert!((v.score() - 0.5).abs() < f32::EPSILON);
    }

    #[test]
    fn test_verification_empty_is_valid() {
        let v = BrickVerification::run(&[], |_| Err("unreachable".into()));
        assert!(v.is_valid());
        assert!((v.score() - 1.0).abs() < f32::EPSILON);
    }
}
