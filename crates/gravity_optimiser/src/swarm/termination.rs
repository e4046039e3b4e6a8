//! Run state and cooperative cancellation.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Why a swarm run stopped, or `Running` while it has not.
///
/// Transitions only go from `Running` to one of the terminal states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TerminationReason {
    /// Still iterating.
    #[default]
    Running,
    /// Global best score exceeded the score threshold.
    ConvergedByScore,
    /// Largest velocity component fell below the velocity threshold.
    ConvergedByVelocity,
    /// The iteration budget ran out.
    ExhaustedIterations,
    /// A [`CancellationToken`] was triggered.
    Cancelled,
    /// The wall-clock budget ran out.
    TimedOut,
}

impl TerminationReason {
    /// Whether the run has stopped.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Running)
    }

    /// Whether the run stopped on one of its convergence criteria.
    pub fn is_converged(&self) -> bool {
        matches!(self, Self::ConvergedByScore | Self::ConvergedByVelocity)
    }
}

impl fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Running => "running",
            Self::ConvergedByScore => "converged (score)",
            Self::ConvergedByVelocity => "converged (velocity)",
            Self::ExhaustedIterations => "iteration limit",
            Self::Cancelled => "cancelled",
            Self::TimedOut => "timed out",
        };
        f.write_str(label)
    }
}

/// Shared flag for stopping a run from another thread.
///
/// Clones observe the same flag. Runs check it between iterations.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    /// A fresh, untriggered token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_running_is_not_terminal() {
        assert!(!TerminationReason::Running.is_terminal());
        assert_eq!(TerminationReason::default(), TerminationReason::Running);
        for reason in [
            TerminationReason::ConvergedByScore,
            TerminationReason::ConvergedByVelocity,
            TerminationReason::ExhaustedIterations,
            TerminationReason::Cancelled,
            TerminationReason::TimedOut,
        ] {
            assert!(reason.is_terminal());
        }
    }

    #[test]
    fn test_converged_states() {
        assert!(TerminationReason::ConvergedByScore.is_converged());
        assert!(TerminationReason::ConvergedByVelocity.is_converged());
        assert!(!TerminationReason::ExhaustedIterations.is_converged());
        assert!(!TerminationReason::Cancelled.is_converged());
    }

    #[test]
    fn test_display() {
        assert_eq!(TerminationReason::ExhaustedIterations.to_string(), "iteration limit");
        assert_eq!(TerminationReason::TimedOut.to_string(), "timed out");
    }

    #[test]
    fn test_token_shared_between_clones() {
        let token = CancellationToken::new();
        let other = token.clone();
        assert!(!other.is_cancelled());
        token.cancel();
        assert!(other.is_cancelled());
    }

    #[test]
    fn test_token_across_threads() {
        let token = CancellationToken::new();
        let remote = token.clone();
        std::thread::spawn(move || remote.cancel())
            .join()
            .unwrap();
        assert!(token.is_cancelled());
    }
}
