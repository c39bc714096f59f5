//! Volatility update, step 5 of Glickman's paper.
//!
//! The new volatility is `exp(x / 2)` where `x` is the root of `f` (see
//! [`VolatilityProblem::f`]). The root is bracketed and then narrowed with a
//! modified regula falsi (Illinois) iteration, which is numerically stable
//! where plain Newton iteration is not.

use tracing::{trace, warn};

use crate::{ConvergenceError, Volatility};

/// Default cutoff for the width of the bracket around the root.
pub const DEFAULT_CONVERGENCE_TOLERANCE: f64 = 1e-6;

/// Default maximum number of bracket narrowing iterations.
pub const DEFAULT_MAX_ITERATIONS: u32 = 100;

/// Default maximum number of steps when widening the initial bracket
/// downward.
pub const DEFAULT_MAX_BRACKET_STEPS: u32 = 10_000;

#[derive(Debug, Copy, Clone, PartialEq)]
pub(crate) struct SolverLimits {
    pub tolerance: f64,
    pub max_iterations: u32,
    pub max_bracket_steps: u32,
}

impl Default for SolverLimits {
    fn default() -> SolverLimits {
        SolverLimits {
            tolerance: DEFAULT_CONVERGENCE_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            max_bracket_steps: DEFAULT_MAX_BRACKET_STEPS,
        }
    }
}

/// All inputs of the volatility update, on the internal scale.
#[derive(Debug, Copy, Clone, PartialEq)]
pub(crate) struct VolatilityProblem {
    /// Volatility before the rating period.
    pub sigma: f64,
    /// Deviation before the rating period.
    pub phi: f64,
    /// Estimated variance based on game outcomes.
    pub v: f64,
    /// Estimated improvement based on game outcomes.
    pub delta: f64,
    /// System constant.
    pub tau: f64,
}

/// Like [`f64::signum`], but `0.0` for zero.
fn sign(x: f64) -> f64 {
    if x < 0.0 {
        -1.0
    } else if x > 0.0 {
        1.0
    } else {
        0.0
    }
}

impl VolatilityProblem {
    /// `ln(sigma^2)`, the starting point of the search.
    fn a(&self) -> f64 {
        (self.sigma * self.sigma).ln()
    }

    pub fn f(&self, x: f64) -> f64 {
        let ex = x.exp();
        let phi2 = self.phi * self.phi;
        let d2 = self.delta * self.delta;
        let a2 = phi2 + self.v + ex;
        let p2 = (x - self.a()) / (self.tau * self.tau);
        let p1 = (ex * (d2 - phi2 - self.v - ex)) / (2.0 * a2 * a2);
        p1 - p2
    }

    /// Finds the other end of the initial bracket `[a, b]`.
    fn bracket(&self, a: f64, limits: &SolverLimits) -> Result<f64, ConvergenceError> {
        let excess = self.delta * self.delta - self.phi * self.phi - self.v;
        if excess > 0.0 {
            return Ok(excess.ln());
        }

        for k in 1..=limits.max_bracket_steps {
            let b = a - f64::from(k) * self.tau;
            if self.f(b) >= 0.0 {
                trace!(steps = k, b, "found lower volatility bracket");
                return Ok(b);
            }
        }

        warn!(
            sigma = self.sigma,
            phi = self.phi,
            v = self.v,
            delta = self.delta,
            tau = self.tau,
            "volatility bracket search exhausted"
        );
        Err(ConvergenceError::BracketSearchExhausted {
            steps: limits.max_bracket_steps,
        })
    }

    pub fn solve(&self, limits: &SolverLimits) -> Result<Volatility, ConvergenceError> {
        let mut a = self.a();
        let mut b = self.bracket(a, limits)?;

        let mut fa = self.f(a);
        let mut fb = self.f(b);

        for iteration in 0..limits.max_iterations {
            if (b - a).abs() <= limits.tolerance {
                return Ok(Volatility((a / 2.0).exp()));
            }

            let c = (a + b) * 0.5;
            let fc = self.f(c);
            let d = c + (c - a) * (sign(fa - fb) * fc) / (fc * fc - fa * fb).sqrt();
            let fd = self.f(d);

            trace!(iteration, a, b, c, d, "narrowing volatility bracket");

            if sign(fd) != sign(fc) {
                a = c;
                b = d;
                fa = fc;
                fb = fd;
            } else if sign(fd) != sign(fa) {
                b = d;
                fb = fd;
            } else {
                a = d;
                fa = fd;
            }
        }

        warn!(
            sigma = self.sigma,
            phi = self.phi,
            v = self.v,
            delta = self.delta,
            tau = self.tau,
            a,
            b,
            "volatility root finding did not converge"
        );
        Err(ConvergenceError::RootIterationExhausted {
            iterations: limits.max_iterations,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn glickman_problem() -> VolatilityProblem {
        VolatilityProblem {
            sigma: 0.06,
            phi: 1.1512924985234674,
            v: 1.7789770897239976,
            delta: -0.4839332609836549,
            tau: 0.5,
        }
    }

    #[test]
    fn test_sign() {
        assert_eq!(sign(-3.0), -1.0);
        assert_eq!(sign(0.0), 0.0);
        assert_eq!(sign(-0.0), 0.0);
        assert_eq!(sign(2.5), 1.0);
    }

    #[test]
    fn test_glickman_example() {
        let Volatility(sigma) = glickman_problem()
            .solve(&SolverLimits::default())
            .expect("converges");
        assert!((sigma - 0.059995984286488495).abs() < 1e-8);
    }

    #[test]
    fn test_f_negative_at_start_without_surprise() {
        let problem = glickman_problem();
        assert!(problem.f(problem.a()) < 0.0);
    }

    #[test]
    fn test_large_surprise_increases_volatility() {
        let problem = VolatilityProblem {
            sigma: 0.06,
            phi: 0.5,
            v: 1.0,
            delta: 3.0,
            tau: 0.5,
        };
        let Volatility(sigma) = problem.solve(&SolverLimits::default()).expect("converges");
        assert!(sigma > 0.06);
        assert!(problem.f(2.0 * sigma.ln()).abs() < 1e-4);
    }

    #[test]
    fn test_bracket_search_exhausted() {
        let limits = SolverLimits {
            max_bracket_steps: 0,
            ..SolverLimits::default()
        };
        assert_eq!(
            glickman_problem().solve(&limits),
            Err(ConvergenceError::BracketSearchExhausted { steps: 0 })
        );
    }

    #[test]
    fn test_root_iteration_exhausted() {
        let limits = SolverLimits {
            max_iterations: 0,
            ..SolverLimits::default()
        };
        assert_eq!(
            glickman_problem().solve(&limits),
            Err(ConvergenceError::RootIterationExhausted { iterations: 0 })
        );
    }

    #[test]
    fn test_undefined_statistics_are_an_error() {
        // What an empty rating period would produce.
        let problem = VolatilityProblem {
            v: f64::INFINITY,
            delta: f64::NAN,
            ..glickman_problem()
        };
        assert!(problem.solve(&SolverLimits::default()).is_err());
    }
}
