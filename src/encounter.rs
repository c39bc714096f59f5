use crate::{Rating, RatingDifference, RatingScalar, Score};

/// The result of a single game against an opponent, from the point of view
/// of the player being rated.
///
/// Only the opponent's rating and deviation as of the start of the rating
/// period are relevant. Ratings updated in the middle of a period must not
/// be used.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Encounter {
    pub opponent_rating: RatingScalar,
    pub opponent_deviation: RatingDifference,
    pub score: Score,
}

impl Encounter {
    pub fn new(opponent: &Rating, score: Score) -> Encounter {
        Encounter {
            opponent_rating: opponent.rating,
            opponent_deviation: opponent.deviation,
            score,
        }
    }

    pub fn win(opponent: &Rating) -> Encounter {
        Encounter::new(opponent, Score::WIN)
    }

    pub fn draw(opponent: &Rating) -> Encounter {
        Encounter::new(opponent, Score::DRAW)
    }

    pub fn loss(opponent: &Rating) -> Encounter {
        Encounter::new(opponent, Score::LOSS)
    }
}
