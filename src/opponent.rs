use std::f64::consts::PI;

use crate::{internal_rating::InternalRating, Encounter};

/// Impact factor that discounts opponents with uncertain ratings. In
/// `(0, 1]`, with `g(0) = 1`.
#[inline]
pub(crate) fn g(phi: f64) -> f64 {
    1.0 / (1.0 + 3.0 * phi * phi / (PI * PI)).sqrt()
}

/// Expected score of a player at `mu` against an opponent at `mu_j` with
/// deviation `phi_j`.
#[inline]
pub(crate) fn expected_score(mu: f64, mu_j: f64, phi_j: f64) -> f64 {
    1.0 / (1.0 + (-g(phi_j) * (mu - mu_j)).exp())
}

/// An opponent seen from the player being rated, on the internal scale.
#[derive(Debug, Copy, Clone, PartialEq)]
pub(crate) struct ProjectedOpponent {
    pub mu: f64,
    pub phi: f64,
    pub g: f64,
    pub expected: f64,
    pub score: f64,
}

/// Projects each encounter relative to a player at `mu`, preserving order.
pub(crate) fn project(mu: f64, encounters: &[Encounter]) -> Vec<ProjectedOpponent> {
    encounters
        .iter()
        .map(|encounter| {
            let InternalRating { mu: mu_j, phi: phi_j } =
                InternalRating::scale(encounter.opponent_rating, encounter.opponent_deviation);
            ProjectedOpponent {
                mu: mu_j,
                phi: phi_j,
                g: g(phi_j),
                expected: expected_score(mu, mu_j, phi_j),
                score: encounter.score.value(),
            }
        })
        .collect()
}

/// Estimated variance `v` of the player's rating based only on game
/// outcomes. Infinite if `opponents` is empty.
pub(crate) fn variance(opponents: &[ProjectedOpponent]) -> f64 {
    let information: f64 = opponents
        .iter()
        .map(|o| o.g * o.g * o.expected * (1.0 - o.expected))
        .sum();
    1.0 / information
}

/// Sum of impact weighted surprises, `sum g_j (s_j - E_j)`.
pub(crate) fn performance(opponents: &[ProjectedOpponent]) -> f64 {
    opponents.iter().map(|o| o.g * (o.score - o.expected)).sum()
}

/// Estimated improvement `delta` in rating, given the variance `v`.
pub(crate) fn delta(v: f64, opponents: &[ProjectedOpponent]) -> f64 {
    v * performance(opponents)
}

#[cfg(test)]
pub(crate) mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::{Rating, Score};

    pub(crate) fn glickman_encounters() -> Vec<Encounter> {
        vec![
            Encounter::new(&Rating::new(1400.0, 30.0, 0.06), Score::WIN),
            Encounter::new(&Rating::new(1550.0, 100.0, 0.06), Score::LOSS),
            Encounter::new(&Rating::new(1700.0, 300.0, 0.06), Score::LOSS),
        ]
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-12,
            "{actual} is not close to {expected}"
        );
    }

    #[test]
    fn test_project() {
        let projected = project(0.0, &glickman_encounters());
        assert_eq!(projected.len(), 3);

        assert_close(projected[0].mu, -0.5756462492617337);
        assert_close(projected[0].phi, 0.1726938747785201);
        assert_close(projected[0].g, 0.9954980064506083);
        assert_close(projected[0].expected, 0.6394677305521533);
        assert_eq!(projected[0].score, 1.0);

        assert_close(projected[1].mu, 0.28782312463086684);
        assert_close(projected[1].phi, 0.5756462492617337);
        assert_close(projected[1].g, 0.9531489778689763);
        assert_close(projected[1].expected, 0.4318423561076679);
        assert_eq!(projected[1].score, 0.0);

        assert_close(projected[2].mu, 1.1512924985234674);
        assert_close(projected[2].phi, 1.726938747785201);
        assert_close(projected[2].g, 0.7242354780877526);
        assert_close(projected[2].expected, 0.30284072909521925);
        assert_eq!(projected[2].score, 0.0);
    }

    #[test]
    fn test_variance() {
        let projected = project(0.0, &glickman_encounters());
        assert_close(variance(&projected), 1.7789770897239976);
    }

    #[test]
    fn test_delta() {
        let projected = project(0.0, &glickman_encounters());
        assert_close(delta(1.7789770897239976, &projected), -0.4839332609836549);
    }

    #[test]
    fn test_g_at_zero() {
        assert_eq!(g(0.0), 1.0);
    }

    proptest! {
        #[test]
        fn test_g_decreasing(phi in 0.0..100.0f64, step in 1e-3..10.0f64) {
            prop_assert!(g(phi) <= 1.0);
            prop_assert!(g(phi) > 0.0);
            prop_assert!(g(phi + step) < g(phi));
            prop_assert_eq!(g(-phi), g(phi));
        }

        #[test]
        fn test_expected_score_even(mu in -20.0..20.0f64, phi in 0.0..10.0f64) {
            prop_assert_eq!(expected_score(mu, mu, phi), 0.5);
        }

        #[test]
        fn test_expected_score_interior(mu in -5.0..5.0f64, mu_j in -5.0..5.0f64, phi in 0.0..5.0f64) {
            let e = expected_score(mu, mu_j, phi);
            prop_assert!(e > 0.0 && e < 1.0);
        }
    }
}
