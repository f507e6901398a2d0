use serde::{Deserialize, Serialize};

/// A continuous score was supplied outside the 1.0-5.0 scale. This indicates
/// a bug upstream; scores are never clamped into range.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
#[error("score {0} is outside the 1.0-5.0 scale")]
pub struct OutOfRangeError(pub f64);

/// Difficulty bracket for staged question groups.
///
/// The nine labels are immutable constants on the half-point scale. They
/// serialize as the storage keys used by the question catalogs
/// (`score_1` .. `score_5`).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Bracket {
    #[serde(rename = "score_1")]
    B1_0,
    #[serde(rename = "score_1_5")]
    B1_5,
    #[serde(rename = "score_2")]
    B2_0,
    #[serde(rename = "score_2_5")]
    B2_5,
    #[serde(rename = "score_3")]
    B3_0,
    #[serde(rename = "score_3_5")]
    B3_5,
    #[serde(rename = "score_4")]
    B4_0,
    #[serde(rename = "score_4_5")]
    B4_5,
    #[serde(rename = "score_5")]
    B5_0,
}

impl Bracket {
    /// Brackets in ascending order.
    pub const ALL: [Bracket; 9] = [
        Bracket::B1_0,
        Bracket::B1_5,
        Bracket::B2_0,
        Bracket::B2_5,
        Bracket::B3_0,
        Bracket::B3_5,
        Bracket::B4_0,
        Bracket::B4_5,
        Bracket::B5_0,
    ];

    pub const fn value(self) -> f64 {
        match self {
            Bracket::B1_0 => 1.0,
            Bracket::B1_5 => 1.5,
            Bracket::B2_0 => 2.0,
            Bracket::B2_5 => 2.5,
            Bracket::B3_0 => 3.0,
            Bracket::B3_5 => 3.5,
            Bracket::B4_0 => 4.0,
            Bracket::B4_5 => 4.5,
            Bracket::B5_0 => 5.0,
        }
    }

    /// Storage key for the bracket's question-group catalog.
    pub const fn label(self) -> &'static str {
        match self {
            Bracket::B1_0 => "score_1",
            Bracket::B1_5 => "score_1_5",
            Bracket::B2_0 => "score_2",
            Bracket::B2_5 => "score_2_5",
            Bracket::B3_0 => "score_3",
            Bracket::B3_5 => "score_3_5",
            Bracket::B4_0 => "score_4",
            Bracket::B4_5 => "score_4_5",
            Bracket::B5_0 => "score_5",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Bracket::ALL
            .into_iter()
            .find(|bracket| bracket.label() == label)
    }

    /// Map a continuous score to the nearest bracket at or below it.
    ///
    /// Rounding down guarantees a user cannot skip a bracket's question
    /// groups on a score that merely rounds up to the next label.
    pub fn resolve(score: f64) -> Result<Self, OutOfRangeError> {
        if !score.is_finite() || !(1.0..=5.0).contains(&score) {
            return Err(OutOfRangeError(score));
        }
        let half_steps = (score * 2.0).floor() as usize;
        Ok(Bracket::ALL[half_steps - 2])
    }

    /// The next higher bracket, or `None` at the 5.0 terminal.
    pub fn next(self) -> Option<Self> {
        let position = Bracket::ALL
            .iter()
            .position(|bracket| *bracket == self)
            .expect("bracket is one of the enumerated labels");
        Bracket::ALL.get(position + 1).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_down_to_the_lower_bracket() {
        assert_eq!(Bracket::resolve(2.3).unwrap(), Bracket::B2_0);
        assert_eq!(Bracket::resolve(1.49).unwrap(), Bracket::B1_0);
        assert_eq!(Bracket::resolve(4.99).unwrap(), Bracket::B4_5);
    }

    #[test]
    fn exact_boundaries_map_to_themselves() {
        for bracket in Bracket::ALL {
            assert_eq!(Bracket::resolve(bracket.value()).unwrap(), bracket);
        }
    }

    #[test]
    fn never_resolves_above_the_input() {
        let mut score = 1.0;
        while score <= 5.0 {
            let bracket = Bracket::resolve(score).unwrap();
            assert!(bracket.value() <= score + 1e-12, "{score}");
            score += 0.07;
        }
    }

    #[test]
    fn out_of_range_scores_are_rejected() {
        assert_eq!(Bracket::resolve(0.99).unwrap_err(), OutOfRangeError(0.99));
        assert_eq!(Bracket::resolve(5.01).unwrap_err(), OutOfRangeError(5.01));
        assert!(Bracket::resolve(f64::NAN).is_err());
    }

    #[test]
    fn next_walks_the_ladder_and_terminates() {
        assert_eq!(Bracket::B1_0.next(), Some(Bracket::B1_5));
        assert_eq!(Bracket::B4_5.next(), Some(Bracket::B5_0));
        assert_eq!(Bracket::B5_0.next(), None);
    }

    #[test]
    fn labels_round_trip_through_serde() {
        let json = serde_json::to_string(&Bracket::B2_5).unwrap();
        assert_eq!(json, "\"score_2_5\"");
        let parsed: Bracket = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, Bracket::B2_5);
        assert_eq!(Bracket::from_label("score_4_5"), Some(Bracket::B4_5));
    }
}
