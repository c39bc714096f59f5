#![no_main]

use arbitrary::Arbitrary;
use glicko2_period::{Encounter, Rating, RatingSystem, Score};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct ArbitraryRating {
    rating: f64,
    deviation: f64,
    volatility: f64,
}

impl ArbitraryRating {
    fn into_clamped(self) -> Option<Rating> {
        if self.rating.is_nan() || self.deviation.is_nan() || self.volatility.is_nan() {
            None
        } else {
            Some(Rating::new(
                self.rating.clamp(-10000.0, 10000.0),
                self.deviation.clamp(0.0, 1000.0),
                self.volatility.clamp(0.001, 1.0),
            ))
        }
    }
}

#[derive(Arbitrary, Debug)]
struct RatingPeriod {
    player: ArbitraryRating,
    encounters: Vec<(ArbitraryRating, u8)>,
    tau: f64,
}

fn assert_rating(rating: &Rating) {
    assert!(!rating.rating.0.is_nan());
    assert!(!rating.deviation.0.is_nan());
    assert!(!rating.volatility.0.is_nan());
}

fuzz_target!(|period: RatingPeriod| {
    let Some(player) = period.player.into_clamped() else {
        return;
    };
    let mut encounters = Vec::new();
    for (opponent, score) in period.encounters {
        let Some(opponent) = opponent.into_clamped() else {
            return;
        };
        encounters.push(Encounter::new(&opponent, Score(f64::from(score % 3) / 2.0)));
    }
    if encounters.is_empty() || period.tau.is_nan() {
        return;
    }

    let rating_system = RatingSystem::builder()
        .tau(period.tau.clamp(0.1, 2.0))
        .build();

    assert_rating(&rating_system.idle_rating(&player));

    // Convergence errors are acceptable, garbage ratings are not.
    if let Ok(updated) = rating_system.update_rating(&player, &encounters) {
        assert_rating(&updated);
    }
});
