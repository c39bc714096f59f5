use thiserror::Error;

/// The volatility update failed to converge.
///
/// This does not happen for realistic inputs. It indicates a violated
/// precondition, for example absurd ratings or a negative deviation, and
/// should not be retried with the same inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConvergenceError {
    #[error("no sign change found while widening the volatility bracket after {steps} steps")]
    BracketSearchExhausted { steps: u32 },
    #[error("volatility root finding did not converge within {iterations} iterations")]
    RootIterationExhausted { iterations: u32 },
}
