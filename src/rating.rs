use std::ops::{Add, Sub};

/// Number representing playing strength on the conventional scale centered
/// at `1500.0`. Higher is better.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct RatingScalar(pub f64);

impl From<RatingScalar> for f64 {
    #[inline]
    fn from(RatingScalar(rating): RatingScalar) -> f64 {
        rating
    }
}

impl From<f64> for RatingScalar {
    #[inline]
    fn from(rating: f64) -> RatingScalar {
        RatingScalar(rating)
    }
}

impl Sub<RatingScalar> for RatingScalar {
    type Output = RatingDifference;

    #[inline]
    fn sub(self, rhs: RatingScalar) -> RatingDifference {
        RatingDifference(self.0 - rhs.0)
    }
}

impl Add<RatingDifference> for RatingScalar {
    type Output = RatingScalar;

    #[inline]
    fn add(self, RatingDifference(difference): RatingDifference) -> RatingScalar {
        RatingScalar(self.0 + difference)
    }
}

impl Sub<RatingDifference> for RatingScalar {
    type Output = RatingScalar;

    #[inline]
    fn sub(self, RatingDifference(difference): RatingDifference) -> RatingScalar {
        RatingScalar(self.0 - difference)
    }
}

/// A difference between two ratings. Also used for rating deviations.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct RatingDifference(pub f64);

impl From<RatingDifference> for f64 {
    #[inline]
    fn from(RatingDifference(difference): RatingDifference) -> f64 {
        difference
    }
}

impl From<f64> for RatingDifference {
    #[inline]
    fn from(difference: f64) -> RatingDifference {
        RatingDifference(difference)
    }
}

impl RatingDifference {
    #[inline]
    pub fn abs(self) -> RatingDifference {
        RatingDifference(self.0.abs())
    }
}

/// Number indicating the degree of expected fluctuation in a rating.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Volatility(pub f64);

impl Volatility {
    #[inline]
    pub(crate) fn sq(self) -> f64 {
        self.0 * self.0
    }
}

impl From<Volatility> for f64 {
    #[inline]
    fn from(Volatility(volatility): Volatility) -> f64 {
        volatility
    }
}

impl From<f64> for Volatility {
    #[inline]
    fn from(volatility: f64) -> Volatility {
        Volatility(volatility)
    }
}

/// A snapshot of a player's rating, as owned by the caller.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rating {
    /// Number indicating playing strength. Higher is better.
    pub rating: RatingScalar,
    /// Uncertainty in the rating. A range from rating minus twice the deviation
    /// to rating plus twice the deviation approximately represents a 95%
    /// confidence interval. Must not be negative.
    pub deviation: RatingDifference,
    /// Number indicating the degree of expected fluctuation in the rating.
    pub volatility: Volatility,
}

impl Rating {
    pub fn new(rating: f64, deviation: f64, volatility: f64) -> Rating {
        Rating {
            rating: RatingScalar(rating),
            deviation: RatingDifference(deviation),
            volatility: Volatility(volatility),
        }
    }

    /// Approximate 95% confidence interval of the rating.
    pub fn confidence_interval(&self) -> (RatingScalar, RatingScalar) {
        let spread = RatingDifference(2.0 * self.deviation.abs().0);
        (self.rating - spread, self.rating + spread)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_arithmetic() {
        let diff = RatingScalar(1550.0) - RatingScalar(1500.0);
        assert_eq!(diff, RatingDifference(50.0));
        assert_eq!(RatingScalar(1500.0) + diff, RatingScalar(1550.0));
        assert_eq!(RatingScalar(1500.0) - diff, RatingScalar(1450.0));
    }

    #[test]
    fn test_confidence_interval() {
        let rating = Rating::new(1500.0, 200.0, 0.06);
        assert_eq!(
            rating.confidence_interval(),
            (RatingScalar(1100.0), RatingScalar(1900.0))
        );
    }
}
