use tracing::{debug, trace};

use crate::{
    internal_rating::InternalRating,
    opponent::{self, expected_score},
    volatility::{
        SolverLimits, VolatilityProblem, DEFAULT_CONVERGENCE_TOLERANCE, DEFAULT_MAX_BRACKET_STEPS,
        DEFAULT_MAX_ITERATIONS,
    },
    ConvergenceError, Encounter, Rating, RatingDifference, RatingScalar, Score, Volatility,
};

#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RatingSystemBuilder {
    default_rating: f64,
    default_deviation: f64,
    default_volatility: f64,

    tau: f64,

    convergence_tolerance: f64,
    max_iterations: u32,
    max_bracket_steps: u32,
}

impl Default for RatingSystemBuilder {
    fn default() -> RatingSystemBuilder {
        RatingSystemBuilder::new()
    }
}

impl RatingSystemBuilder {
    pub fn new() -> RatingSystemBuilder {
        RatingSystemBuilder {
            default_rating: 1500.0,
            default_deviation: 350.0,
            default_volatility: 0.06,

            tau: 0.5,

            convergence_tolerance: DEFAULT_CONVERGENCE_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            max_bracket_steps: DEFAULT_MAX_BRACKET_STEPS,
        }
    }

    pub fn default_rating(&mut self, default_rating: f64) -> &mut Self {
        assert!(default_rating.is_finite());
        self.default_rating = default_rating;
        self
    }

    pub fn default_deviation(&mut self, default_deviation: f64) -> &mut Self {
        assert!(default_deviation >= 0.0);
        self.default_deviation = default_deviation;
        self
    }

    pub fn default_volatility(&mut self, default_volatility: f64) -> &mut Self {
        assert!(default_volatility > 0.0);
        self.default_volatility = default_volatility;
        self
    }

    /// Constrains the change in volatility over time. Reasonable choices are
    /// between `0.3` and `1.2`. Smaller values prevent volatility from
    /// changing by large amounts.
    pub fn tau(&mut self, tau: f64) -> &mut Self {
        assert!(tau > 0.0);
        self.tau = tau;
        self
    }

    pub fn convergence_tolerance(&mut self, convergence_tolerance: f64) -> &mut Self {
        assert!(convergence_tolerance > 0.0);
        self.convergence_tolerance = convergence_tolerance;
        self
    }

    pub fn max_iterations(&mut self, max_iterations: u32) -> &mut Self {
        assert!(max_iterations > 0);
        self.max_iterations = max_iterations;
        self
    }

    pub fn max_bracket_steps(&mut self, max_bracket_steps: u32) -> &mut Self {
        assert!(max_bracket_steps > 0);
        self.max_bracket_steps = max_bracket_steps;
        self
    }

    pub fn build(&self) -> RatingSystem {
        // Values may also come from deserialization, bypassing the setters.
        assert!(self.default_rating.is_finite());
        assert!(self.default_deviation >= 0.0);
        assert!(self.default_volatility > 0.0);
        assert!(self.tau > 0.0);
        assert!(self.convergence_tolerance > 0.0);
        assert!(self.max_iterations > 0);
        assert!(self.max_bracket_steps > 0);

        RatingSystem {
            default_rating: self.default_rating,
            default_deviation: self.default_deviation,
            default_volatility: self.default_volatility,

            tau: self.tau,

            limits: SolverLimits {
                tolerance: self.convergence_tolerance,
                max_iterations: self.max_iterations,
                max_bracket_steps: self.max_bracket_steps,
            },
        }
    }
}

/// A configured Glicko-2 rating system. Ratings of players that should be
/// compared with each other must be computed by the same system.
#[derive(Debug, Clone)]
pub struct RatingSystem {
    default_rating: f64,
    default_deviation: f64,
    default_volatility: f64,

    tau: f64,

    limits: SolverLimits,
}

impl Default for RatingSystem {
    fn default() -> RatingSystem {
        RatingSystem::new()
    }
}

impl RatingSystem {
    pub fn builder() -> RatingSystemBuilder {
        RatingSystemBuilder::default()
    }

    pub fn new() -> RatingSystem {
        RatingSystem::builder().build()
    }

    pub fn default_rating(&self) -> f64 {
        self.default_rating
    }

    pub fn default_deviation(&self) -> f64 {
        self.default_deviation
    }

    pub fn default_volatility(&self) -> f64 {
        self.default_volatility
    }

    pub fn tau(&self) -> f64 {
        self.tau
    }

    pub fn convergence_tolerance(&self) -> f64 {
        self.limits.tolerance
    }

    pub fn max_iterations(&self) -> u32 {
        self.limits.max_iterations
    }

    pub fn max_bracket_steps(&self) -> u32 {
        self.limits.max_bracket_steps
    }

    /// Rating for a player without any games.
    pub fn new_rating(&self) -> Rating {
        Rating {
            rating: RatingScalar(self.default_rating),
            deviation: RatingDifference(self.default_deviation),
            volatility: Volatility(self.default_volatility),
        }
    }

    /// Expected score of `first` in a game against `second`, taking the
    /// uncertainty of both ratings into account.
    pub fn expected_score(&self, first: &Rating, second: &Rating) -> Score {
        let first = InternalRating::scale(first.rating, first.deviation);
        let second = InternalRating::scale(second.rating, second.deviation);
        Score(expected_score(
            first.mu,
            second.mu,
            first.phi.hypot(second.phi),
        ))
    }

    /// Rating after a rating period in which the player did not compete.
    /// Only the deviation increases.
    pub fn idle_rating(&self, rating: &Rating) -> Rating {
        let InternalRating { mu, phi } = InternalRating::scale(rating.rating, rating.deviation);
        let phi_star = (phi * phi + rating.volatility.sq()).sqrt();
        let (_, deviation) = InternalRating { mu, phi: phi_star }.unscale();
        Rating {
            deviation,
            ..rating.clone()
        }
    }

    /// Rating after a rating period with the given game results.
    ///
    /// Opponent ratings must be taken as of the start of the rating period.
    /// At least one encounter is required, use
    /// [`RatingSystem::idle_rating()`] for players that did not compete.
    /// Without encounters this panics in debug builds and otherwise fails
    /// with [`ConvergenceError::BracketSearchExhausted`].
    ///
    /// # Errors
    ///
    /// Fails if the volatility update does not converge, which indicates
    /// unrealistic inputs.
    pub fn update_rating(
        &self,
        rating: &Rating,
        encounters: &[Encounter],
    ) -> Result<Rating, ConvergenceError> {
        debug_assert!(!encounters.is_empty(), "rating period without encounters");

        let InternalRating { mu, phi } = InternalRating::scale(rating.rating, rating.deviation);

        let opponents = opponent::project(mu, encounters);
        for o in &opponents {
            trace!(
                mu_j = o.mu,
                phi_j = o.phi,
                g = o.g,
                expected = o.expected,
                score = o.score,
                "projected opponent"
            );
        }

        let v = opponent::variance(&opponents);
        let delta = opponent::delta(v, &opponents);

        let volatility = VolatilityProblem {
            sigma: rating.volatility.into(),
            phi,
            v,
            delta,
            tau: self.tau,
        }
        .solve(&self.limits)?;

        debug!(v, delta, volatility = volatility.0, "updated volatility");

        let phi_star = (phi * phi + volatility.sq()).sqrt();
        let phi_prime = 1.0 / (1.0 / (phi_star * phi_star) + 1.0 / v).sqrt();
        let mu_prime = mu + phi_prime * phi_prime * opponent::performance(&opponents);

        let (rating, deviation) = InternalRating {
            mu: mu_prime,
            phi: phi_prime,
        }
        .unscale();

        Ok(Rating {
            rating,
            deviation,
            volatility,
        })
    }
}
