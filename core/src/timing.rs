use crate::error::Result;
use crate::types::{Boundary, MorseSymbol, TimingConfig};
use std::fmt;

/// Threshold ordering problems in a [`TimingConfig`].
///
/// None of these are rejected; they make classification ambiguous.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimingIssue {
    /// A threshold is zero, negative or not finite.
    NonPositive(&'static str),
    /// `dot_max >= letter_gap`
    DotOverlapsLetterGap,
    /// `letter_gap > word_gap`, so letter boundaries can never be seen.
    LetterGapAboveWordGap,
}

impl fmt::Display for TimingIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimingIssue::NonPositive(name) => write!(f, "{name} should be a positive number"),
            TimingIssue::DotOverlapsLetterGap => write!(f, "dot_max is not below letter_gap"),
            TimingIssue::LetterGapAboveWordGap => write!(f, "letter_gap is above word_gap"),
        }
    }
}

impl TimingConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Classify a press duration. The boundary itself counts as a dot.
    pub fn classify_press(&self, duration: f64) -> MorseSymbol {
        if duration <= self.dot_max {
            MorseSymbol::Dot
        } else {
            MorseSymbol::Dash
        }
    }

    /// Classify an idle gap. The word threshold takes precedence.
    pub fn classify_idle(&self, gap: f64) -> Boundary {
        if gap >= self.word_gap {
            Boundary::Word
        } else if gap >= self.letter_gap {
            Boundary::Letter
        } else {
            Boundary::None
        }
    }

    /// List the ways this configuration breaks `dot_max < letter_gap <= word_gap`.
    pub fn check(&self) -> Vec<TimingIssue> {
        let mut issues = Vec::new();

        for (name, value) in [
            ("dot_max", self.dot_max),
            ("letter_gap", self.letter_gap),
            ("word_gap", self.word_gap),
            ("poll_interval", self.poll_interval),
        ] {
            if !(value.is_finite() && value > 0.0) {
                issues.push(TimingIssue::NonPositive(name));
            }
        }

        if self.dot_max >= self.letter_gap {
            issues.push(TimingIssue::DotOverlapsLetterGap);
        }
        if self.letter_gap > self.word_gap {
            issues.push(TimingIssue::LetterGapAboveWordGap);
        }

        issues
    }
}
