//! Status lifecycle rules.
//!
//! Every status enum declares the targets reachable from each value. Handlers
//! check the table before writing, so a record can never jump to a status its
//! lifecycle does not allow.

use std::fmt;

/// A status enum with an explicit transition table.
pub trait Lifecycle: Copy + Eq + fmt::Display + fmt::Debug + 'static {
    /// Statuses reachable from `self` in one step.
    fn allowed_targets(self) -> &'static [Self];

    /// Validate whether a transition from `self` to `target` is allowed.
    ///
    /// No-op transitions are rejected so callers notice redundant writes.
    fn can_transition_to(self, target: Self) -> Result<(), InvalidTransition<Self>> {
        if self == target {
            return Err(InvalidTransition {
                from: self,
                to: target,
                reason: "no-op transition is not allowed",
            });
        }

        if self.allowed_targets().contains(&target) {
            Ok(())
        } else {
            Err(InvalidTransition {
                from: self,
                to: target,
                reason: "transition not allowed by lifecycle rules",
            })
        }
    }

    /// True when nothing can follow this status.
    fn is_terminal(self) -> bool {
        self.allowed_targets().is_empty()
    }
}

/// Error returned when a status transition is invalid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidTransition<S> {
    pub from: S,
    pub to: S,
    pub reason: &'static str,
}

impl<S: fmt::Display> fmt::Display for InvalidTransition<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' -> '{}': {}", self.from, self.to, self.reason)
    }
}
