//! Ratings left by the parties to a completed match.

use serde::{Deserialize, Serialize};

use super::ports::{MatchQuery, RatingQuery};
use super::{Error, ErrorCode, MatchId, MatchStatus, UserId};

/// Lowest accepted score.
pub const RATING_MIN: u8 = 1;
/// Highest accepted score.
pub const RATING_MAX: u8 = 5;
/// Longest accepted comment, in characters.
pub const RATING_COMMENT_MAX: usize = 500;

/// Score in [`RATING_MIN`]..=[`RATING_MAX`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct RatingScore(u8);

impl RatingScore {
    /// Validate a raw score.
    pub fn new(score: u8) -> Result<Self, Error> {
        if !(RATING_MIN..=RATING_MAX).contains(&score) {
            return Err(Error::new(
                ErrorCode::InvalidRatingScore,
                format!("rating must be between {RATING_MIN} and {RATING_MAX}"),
            ));
        }
        Ok(Self(score))
    }

    #[must_use]
    pub fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for RatingScore {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<RatingScore> for u8 {
    fn from(value: RatingScore) -> Self {
        value.0
    }
}

/// A rating about to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RatingDraft {
    pub rater_id: UserId,
    pub ratee_id: UserId,
    pub score: RatingScore,
    pub comment: Option<String>,
}

/// Checks run before a rating is persisted.
///
/// The match must exist and be completed, both parties must belong to it,
/// nobody may rate themselves, and each rater gets one rating per match.
pub async fn assert_can_rate(
    draft: &RatingDraft,
    match_id: &MatchId,
    matches: &dyn MatchQuery,
    ratings: &dyn RatingQuery,
) -> Result<(), Error> {
    if draft
        .comment
        .as_deref()
        .is_some_and(|comment| comment.chars().count() > RATING_COMMENT_MAX)
    {
        return Err(Error::new(
            ErrorCode::RatingCommentTooLong,
            format!("comment must be at most {RATING_COMMENT_MAX} characters"),
        ));
    }
    let Some(match_record) = matches.find_match(match_id).await? else {
        return Err(Error::new(ErrorCode::MatchNotFound, "match does not exist"));
    };
    if match_record.status != MatchStatus::Completed {
        return Err(Error::new(
            ErrorCode::MatchNotCompleted,
            "only completed matches can be rated",
        ));
    }
    if draft.rater_id == draft.ratee_id {
        return Err(Error::new(
            ErrorCode::SelfRating,
            "users cannot rate themselves",
        ));
    }
    if !match_record.involves(&draft.rater_id) || !match_record.involves(&draft.ratee_id) {
        return Err(Error::new(
            ErrorCode::NotMatchParticipant,
            "only the shipper and transporter on a match can rate each other",
        ));
    }
    if ratings.has_rated(&match_record.id, &draft.rater_id).await? {
        return Err(Error::new(
            ErrorCode::DuplicateRating,
            "this match has already been rated by the user",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ports::{LookupError, MockMatchQuery, MockRatingQuery};
    use crate::domain::{MatchRecord, ShipmentId};
    use rstest::{fixture, rstest};

    #[fixture]
    fn completed_match() -> MatchRecord {
        MatchRecord {
            id: MatchId::random(),
            shipment_id: ShipmentId::random(),
            shipper_id: UserId::random(),
            transporter_id: UserId::random(),
            status: MatchStatus::Completed,
        }
    }

    fn stored(record: &MatchRecord) -> MockMatchQuery {
        let record = record.clone();
        let mut matches = MockMatchQuery::new();
        matches
            .expect_find_match()
            .withf({
                let id = record.id;
                move |m| *m == id
            })
            .returning(move |_| Ok(Some(record.clone())));
        matches
    }

    fn not_yet_rated() -> MockRatingQuery {
        let mut ratings = MockRatingQuery::new();
        ratings.expect_has_rated().returning(|_, _| Ok(false));
        ratings
    }

    fn shipper_rates_transporter(record: &MatchRecord, score: u8) -> RatingDraft {
        RatingDraft {
            rater_id: record.shipper_id,
            ratee_id: record.transporter_id,
            score: RatingScore::new(score).expect("valid score"),
            comment: None,
        }
    }

    #[rstest]
    #[case(RATING_MIN)]
    #[case(3)]
    #[case(RATING_MAX)]
    fn scores_in_range_are_accepted(#[case] score: u8) {
        assert_eq!(RatingScore::new(score).expect("in range").value(), score);
    }

    #[rstest]
    #[case(0)]
    #[case(6)]
    #[case(u8::MAX)]
    fn scores_out_of_range_are_rejected(#[case] score: u8) {
        let err = RatingScore::new(score).expect_err("out of range must fail");
        assert_eq!(err.code(), ErrorCode::InvalidRatingScore);
    }

    #[rstest]
    fn deserialising_enforces_bounds() {
        assert!(serde_json::from_str::<RatingScore>("5").is_ok());
        assert!(serde_json::from_str::<RatingScore>("0").is_err());
    }

    #[rstest]
    #[tokio::test]
    async fn participant_can_rate_completed_match(completed_match: MatchRecord) {
        let draft = shipper_rates_transporter(&completed_match, 5);
        let result = assert_can_rate(
            &draft,
            &completed_match.id,
            &stored(&completed_match),
            &not_yet_rated(),
        )
        .await;
        assert!(result.is_ok());
    }

    #[rstest]
    #[tokio::test]
    async fn second_rating_by_same_rater_is_rejected(completed_match: MatchRecord) {
        let rater = completed_match.shipper_id;
        let match_id = completed_match.id;
        let mut ratings = MockRatingQuery::new();
        ratings
            .expect_has_rated()
            .withf(move |m, r| *m == match_id && *r == rater)
            .returning(|_, _| Ok(true));

        let draft = shipper_rates_transporter(&completed_match, 4);
        let err = assert_can_rate(
            &draft,
            &completed_match.id,
            &stored(&completed_match),
            &ratings,
        )
        .await
        .expect_err("duplicate must fail");
        assert_eq!(err.code(), ErrorCode::DuplicateRating);
    }

    #[rstest]
    #[case(MatchStatus::Proposed)]
    #[case(MatchStatus::Accepted)]
    #[case(MatchStatus::Cancelled)]
    #[tokio::test]
    async fn unfinished_match_cannot_be_rated(
        completed_match: MatchRecord,
        #[case] status: MatchStatus,
    ) {
        let record = MatchRecord {
            status,
            ..completed_match
        };
        let draft = shipper_rates_transporter(&record, 3);
        let err = assert_can_rate(&draft, &record.id, &stored(&record), &not_yet_rated())
            .await
            .expect_err("unfinished match must fail");
        assert_eq!(err.code(), ErrorCode::MatchNotCompleted);
    }

    #[rstest]
    #[tokio::test]
    async fn outsider_cannot_rate(completed_match: MatchRecord) {
        let draft = RatingDraft {
            rater_id: UserId::random(),
            ..shipper_rates_transporter(&completed_match, 1)
        };
        let err = assert_can_rate(
            &draft,
            &completed_match.id,
            &stored(&completed_match),
            &not_yet_rated(),
        )
        .await
        .expect_err("outsider must fail");
        assert_eq!(err.code(), ErrorCode::NotMatchParticipant);
    }

    #[rstest]
    #[tokio::test]
    async fn self_rating_is_rejected(completed_match: MatchRecord) {
        let draft = RatingDraft {
            ratee_id: completed_match.shipper_id,
            ..shipper_rates_transporter(&completed_match, 5)
        };
        let err = assert_can_rate(
            &draft,
            &completed_match.id,
            &stored(&completed_match),
            &not_yet_rated(),
        )
        .await
        .expect_err("self rating must fail");
        assert_eq!(err.code(), ErrorCode::SelfRating);
    }

    #[rstest]
    #[tokio::test]
    async fn overlong_comment_is_rejected(completed_match: MatchRecord) {
        let draft = RatingDraft {
            comment: Some("a".repeat(RATING_COMMENT_MAX + 1)),
            ..shipper_rates_transporter(&completed_match, 5)
        };
        let err = assert_can_rate(
            &draft,
            &completed_match.id,
            &stored(&completed_match),
            &not_yet_rated(),
        )
        .await
        .expect_err("long comment must fail");
        assert_eq!(err.code(), ErrorCode::RatingCommentTooLong);
    }

    #[rstest]
    #[tokio::test]
    async fn missing_match_cannot_be_rated(completed_match: MatchRecord) {
        let mut matches = MockMatchQuery::new();
        matches.expect_find_match().returning(|_| Ok(None));
        let mut ratings = MockRatingQuery::new();
        ratings.expect_has_rated().never();

        let draft = shipper_rates_transporter(&completed_match, 4);
        let err = assert_can_rate(&draft, &completed_match.id, &matches, &ratings)
            .await
            .expect_err("missing match must fail");
        assert_eq!(err.code(), ErrorCode::MatchNotFound);
        assert_eq!(err.message(), "match does not exist");
    }

    #[rstest]
    #[tokio::test]
    async fn match_lookup_failure_is_internal(completed_match: MatchRecord) {
        let mut matches = MockMatchQuery::new();
        matches
            .expect_find_match()
            .returning(|_| Err(LookupError::connection("pool closed")));

        let draft = shipper_rates_transporter(&completed_match, 4);
        let err = assert_can_rate(&draft, &completed_match.id, &matches, &not_yet_rated())
            .await
            .expect_err("lookup failure must propagate");
        assert_eq!(err.code(), ErrorCode::InternalError);
    }
}
