use crate::rating::{RatingDifference, RatingScalar};

/// Ratio between the conventional rating scale and the internal Glicko-2
/// scale. See steps 2 and 8 of Glickman's paper.
pub const INTERNAL_RATING_SCALE: f64 = 173.7178;

/// Conventional rating that maps to `0.0` on the internal scale.
pub const RATING_CENTER: f64 = 1500.0;

/// Rating and deviation on the internal, dimensionless scale (`mu`, `phi`).
#[derive(Debug, Copy, Clone, PartialEq)]
pub(crate) struct InternalRating {
    pub mu: f64,
    pub phi: f64,
}

impl InternalRating {
    /// Precondition: `deviation >= 0`. Not checked.
    pub fn scale(
        RatingScalar(rating): RatingScalar,
        RatingDifference(deviation): RatingDifference,
    ) -> InternalRating {
        InternalRating {
            mu: (rating - RATING_CENTER) / INTERNAL_RATING_SCALE,
            phi: deviation / INTERNAL_RATING_SCALE,
        }
    }

    pub fn unscale(self) -> (RatingScalar, RatingDifference) {
        (
            RatingScalar(INTERNAL_RATING_SCALE * self.mu + RATING_CENTER),
            RatingDifference(INTERNAL_RATING_SCALE * self.phi),
        )
    }
}
