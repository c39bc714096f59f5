/// A score or expectation value in the range `0.0..=1.0`, where `0.0` is a
/// loss and `1.0` is a win.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Score(pub f64);

impl From<Score> for f64 {
    fn from(Score(score): Score) -> f64 {
        score
    }
}

impl Score {
    pub const LOSS: Score = Score(0.0);
    pub const DRAW: Score = Score(0.5);
    pub const WIN: Score = Score(1.0);

    /// The score from the point of view of the opponent.
    pub fn opposite(self) -> Score {
        Score(1.0 - self.0)
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposite() {
        assert_eq!(Score::WIN.opposite(), Score::LOSS);
        assert_eq!(Score::LOSS.opposite(), Score::WIN);
        assert_eq!(Score::DRAW.opposite(), Score::DRAW);
    }
}
