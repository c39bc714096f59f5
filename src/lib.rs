//! Rating period updates for the [Glicko-2](http://www.glicko.net/glicko/glicko2.pdf)
//! rating system.
//!
//! Given a player's rating, rating deviation and volatility at the start of
//! a rating period, and the results of all games played during that period,
//! computes the rating at the end of the period.
//!
//! ```
//! use glicko2_period::{Encounter, Rating, RatingSystem};
//!
//! let rating_system = RatingSystem::builder().tau(0.5).build();
//!
//! let player = Rating::new(1500.0, 200.0, 0.06);
//! let encounters = [
//!     Encounter::win(&Rating::new(1400.0, 30.0, 0.06)),
//!     Encounter::loss(&Rating::new(1550.0, 100.0, 0.06)),
//!     Encounter::loss(&Rating::new(1700.0, 300.0, 0.06)),
//! ];
//!
//! let updated = rating_system.update_rating(&player, &encounters)?;
//! assert!((updated.rating.0 - 1464.05).abs() < 0.01);
//! assert!((updated.deviation.0 - 151.52).abs() < 0.01);
//! # Ok::<_, glicko2_period::ConvergenceError>(())
//! ```
//!
//! All computations are pure. Rating periods of different players can be
//! computed independently, as long as every update uses opponent ratings
//! from the start of the period.

mod encounter;
mod error;
mod internal_rating;
mod opponent;
mod rating;
mod rating_system;
mod score;
mod volatility;

pub use encounter::Encounter;
pub use error::ConvergenceError;
pub use internal_rating::{INTERNAL_RATING_SCALE, RATING_CENTER};
pub use rating::{Rating, RatingDifference, RatingScalar, Volatility};
pub use rating_system::{RatingSystem, RatingSystemBuilder};
pub use score::Score;
pub use volatility::{
    DEFAULT_CONVERGENCE_TOLERANCE, DEFAULT_MAX_BRACKET_STEPS, DEFAULT_MAX_ITERATIONS,
};
