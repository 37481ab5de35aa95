//! Vote submission rules.
//!
//! A [`VoteSubmission`] is the raw client payload; [`VoteSubmission::into_valid`]
//! turns it into a [`ValidVote`], the only shape the storage layer accepts.

use std::fmt;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

use crate::error::CoreError;
use crate::types::Timestamp;

/// Upper bound on round, restaurant and voter identifiers.
pub const MAX_ID_LEN: u64 = 128;

// ---------------------------------------------------------------------------
// Score
// ---------------------------------------------------------------------------

/// Preference strength on the 3-point scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(into = "i16")]
pub enum Score {
    No = 0,
    Ok = 1,
    Top = 2,
}

impl Score {
    /// Storage value (`votes.score`).
    pub fn value(self) -> i16 {
        self as i16
    }

    pub fn label(self) -> &'static str {
        match self {
            Score::No => "No",
            Score::Ok => "OK",
            Score::Top => "Top choice",
        }
    }

    /// Parse a JSON number. Only the integers 0, 1 and 2 are accepted.
    pub fn from_number(n: f64) -> Result<Self, CoreError> {
        if n.fract() != 0.0 {
            return Err(CoreError::Validation(format!(
                "score must be an integer between 0 and 2, got {n}"
            )));
        }
        Self::try_from(n as i64)
    }
}

impl TryFrom<i64> for Score {
    type Error = CoreError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Score::No),
            1 => Ok(Score::Ok),
            2 => Ok(Score::Top),
            other => Err(CoreError::Validation(format!(
                "score must be between 0 and 2, got {other}"
            ))),
        }
    }
}

impl From<Score> for i16 {
    fn from(score: Score) -> Self {
        score.value()
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Submission
// ---------------------------------------------------------------------------

/// Body of `POST /api/vote`. Every field is optional at the serde level so a
/// missing field surfaces as a validation error instead of a decode failure.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct VoteSubmission {
    #[validate(required, length(min = 1, max = MAX_ID_LEN))]
    pub round_id: Option<String>,
    #[validate(required, length(min = 1, max = MAX_ID_LEN))]
    pub restaurant_id: Option<String>,
    #[validate(required, length(min = 1, max = MAX_ID_LEN))]
    pub user_id: Option<String>,
    #[validate(required, range(min = 0.0, max = 2.0))]
    pub score: Option<f64>,
}

impl VoteSubmission {
    /// Check every field and produce a [`ValidVote`].
    pub fn into_valid(self) -> Result<ValidVote, CoreError> {
        self.validate()
            .map_err(|errors| CoreError::Validation(describe(&errors)))?;

        let (Some(round_id), Some(restaurant_id), Some(user_id), Some(score)) =
            (self.round_id, self.restaurant_id, self.user_id, self.score)
        else {
            return Err(CoreError::Validation("missing field".into()));
        };

        Ok(ValidVote {
            round_id,
            restaurant_id,
            user_id,
            score: Score::from_number(score)?,
        })
    }
}

fn describe(errors: &ValidationErrors) -> String {
    let mut fields: Vec<String> = errors
        .field_errors()
        .into_keys()
        .map(|field| field.to_string())
        .collect();
    fields.sort();
    format!("invalid or missing field(s): {}", fields.join(", "))
}

/// A vote that passed validation. Fields are private so the only way to get
/// one is through [`VoteSubmission::into_valid`] or [`ValidVote::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidVote {
    round_id: String,
    restaurant_id: String,
    user_id: String,
    score: Score,
}

impl ValidVote {
    pub fn new(
        round_id: impl Into<String>,
        restaurant_id: impl Into<String>,
        user_id: impl Into<String>,
        score: Score,
    ) -> Result<Self, CoreError> {
        VoteSubmission {
            round_id: Some(round_id.into()),
            restaurant_id: Some(restaurant_id.into()),
            user_id: Some(user_id.into()),
            score: Some(f64::from(score.value())),
        }
        .into_valid()
    }

    pub fn round_id(&self) -> &str {
        &self.round_id
    }

    pub fn restaurant_id(&self) -> &str {
        &self.restaurant_id
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn score(&self) -> Score {
        self.score
    }
}

/// Reject submissions once the configured closing time has passed.
pub fn ensure_open(closes_at: Option<Timestamp>, now: Timestamp) -> Result<(), CoreError> {
    match closes_at {
        Some(closes_at) if now > closes_at => Err(CoreError::PollClosed { closes_at }),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use chrono::{Duration, Utc};

    use super::*;

    fn submission(score: f64) -> VoteSubmission {
        VoteSubmission {
            round_id: Some("round-1".into()),
            restaurant_id: Some("r1".into()),
            user_id: Some("device-a".into()),
            score: Some(score),
        }
    }

    // -----------------------------------------------------------------------
    // Score
    // -----------------------------------------------------------------------

    #[test]
    fn score_accepts_scale_values() {
        assert_eq!(Score::from_number(0.0).unwrap(), Score::No);
        assert_eq!(Score::from_number(1.0).unwrap(), Score::Ok);
        assert_eq!(Score::from_number(2.0).unwrap(), Score::Top);
    }

    #[test]
    fn score_rejects_out_of_range() {
        assert_matches!(Score::from_number(3.0), Err(CoreError::Validation(_)));
        assert_matches!(Score::from_number(-1.0), Err(CoreError::Validation(_)));
    }

    #[test]
    fn score_rejects_fractions() {
        assert_matches!(Score::from_number(1.5), Err(CoreError::Validation(_)));
    }

    #[test]
    fn score_serializes_as_integer() {
        assert_eq!(serde_json::to_value(Score::Top).unwrap(), 2);
    }

    // -----------------------------------------------------------------------
    // Submission
    // -----------------------------------------------------------------------

    #[test]
    fn valid_submission_converts() {
        let vote = submission(2.0).into_valid().unwrap();
        assert_eq!(vote.round_id(), "round-1");
        assert_eq!(vote.restaurant_id(), "r1");
        assert_eq!(vote.user_id(), "device-a");
        assert_eq!(vote.score(), Score::Top);
    }

    #[test]
    fn rejects_score_above_scale() {
        assert_matches!(submission(3.0).into_valid(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn rejects_negative_score() {
        assert_matches!(submission(-1.0).into_valid(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn rejects_missing_fields_and_names_them() {
        let mut input = submission(1.0);
        input.user_id = None;
        input.score = None;

        let err = input.into_valid().unwrap_err();
        assert_matches!(&err, CoreError::Validation(msg) if msg.contains("user_id") && msg.contains("score"));
    }

    #[test]
    fn rejects_empty_identifier() {
        let mut input = submission(1.0);
        input.restaurant_id = Some(String::new());
        assert_matches!(input.into_valid(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn rejects_overlong_identifier() {
        let mut input = submission(1.0);
        input.round_id = Some("x".repeat(MAX_ID_LEN as usize + 1));
        assert_matches!(input.into_valid(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn identifiers_are_kept_verbatim() {
        let mut input = submission(1.0);
        input.round_id = Some(" ".into());
        input.user_id = Some("x".repeat(MAX_ID_LEN as usize));
        let vote = input.into_valid().unwrap();
        assert_eq!(vote.round_id(), " ");
        assert_eq!(vote.user_id().len() as u64, MAX_ID_LEN);
    }

    #[test]
    fn deserializes_camel_case_payload() {
        let input: VoteSubmission = serde_json::from_value(serde_json::json!({
            "roundId": "round-2",
            "restaurantId": "r4",
            "userId": "u1",
            "score": 0
        }))
        .unwrap();
        assert_eq!(input.into_valid().unwrap().score(), Score::No);
    }

    #[test]
    fn valid_vote_new_checks_identifiers() {
        assert!(ValidVote::new("r", "a", "u", Score::Ok).is_ok());
        assert!(ValidVote::new("", "a", "u", Score::Ok).is_err());
    }

    // -----------------------------------------------------------------------
    // Closing time
    // -----------------------------------------------------------------------

    #[test]
    fn open_without_closing_time() {
        assert!(ensure_open(None, Utc::now()).is_ok());
    }

    #[test]
    fn open_before_closing_time() {
        let now = Utc::now();
        assert!(ensure_open(Some(now + Duration::hours(1)), now).is_ok());
    }

    #[test]
    fn closed_after_closing_time() {
        let now = Utc::now();
        assert_matches!(
            ensure_open(Some(now - Duration::minutes(1)), now),
            Err(CoreError::PollClosed { .. })
        );
    }
}
