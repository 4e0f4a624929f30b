//! Generic review protocol
//!
//! Both oversight hierarchies run the same review concept: a field actor
//! submits work, an overseer renders a decision that is either terminal for
//! the cycle or regresses the work for resubmission. The hierarchies differ
//! only in outcome cardinality and regression target, so the protocol is one
//! policy table per context rather than two duplicated state machines.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::WorkflowError;
use crate::identifiers::ActorId;

/// Decision rendered by an overseer on submitted work
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewDecision {
    /// Accept the completion of a visit
    Accept,
    /// Decline the completion, regressing the visit for resubmission
    Decline,
    /// Approve a report
    Approve,
    /// Reject a report
    Reject,
    /// Request a revised report
    RequestRevision,
}

/// Policy row for one allowed outcome of a protocol
#[derive(Debug, Clone, Copy)]
pub struct OutcomeRule {
    pub decision: ReviewDecision,
    /// Declines and rejections must carry feedback; approvals may omit it
    pub requires_feedback: bool,
    /// Whether the decision moves the work backward for resubmission
    pub regressive: bool,
}

/// A review protocol: the set of outcomes an overseer may choose from
#[derive(Debug, Clone, Copy)]
pub struct ReviewProtocol {
    pub name: &'static str,
    pub rules: &'static [OutcomeRule],
}

/// Binary accept/decline applied to a completed visit
pub const VISIT_COMPLETION_REVIEW: ReviewProtocol = ReviewProtocol {
    name: "visit_completion",
    rules: &[
        OutcomeRule {
            decision: ReviewDecision::Accept,
            requires_feedback: false,
            regressive: false,
        },
        OutcomeRule {
            decision: ReviewDecision::Decline,
            requires_feedback: true,
            regressive: true,
        },
    ],
};

/// Ternary approve/reject/revision applied to a submitted report
pub const REPORT_REVIEW: ReviewProtocol = ReviewProtocol {
    name: "report",
    rules: &[
        OutcomeRule {
            decision: ReviewDecision::Approve,
            requires_feedback: false,
            regressive: false,
        },
        OutcomeRule {
            decision: ReviewDecision::Reject,
            requires_feedback: true,
            regressive: false,
        },
        OutcomeRule {
            decision: ReviewDecision::RequestRevision,
            requires_feedback: true,
            regressive: false,
        },
    ],
};

/// Approve/revision applied to a submitted monthly report
pub const MONTHLY_REVIEW: ReviewProtocol = ReviewProtocol {
    name: "monthly_report",
    rules: &[
        OutcomeRule {
            decision: ReviewDecision::Approve,
            requires_feedback: false,
            regressive: false,
        },
        OutcomeRule {
            decision: ReviewDecision::RequestRevision,
            requires_feedback: true,
            regressive: false,
        },
    ],
};

/// The recorded outcome of a review
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewVerdict {
    pub decision: ReviewDecision,
    pub reviewer: ActorId,
    pub feedback: Option<String>,
    pub regressive: bool,
    pub decided_at: DateTime<Utc>,
}

impl ReviewProtocol {
    /// Validates a decision against this protocol's policy table
    ///
    /// Exactly one decision may be recorded per submission cycle: a second
    /// attempt fails with `AlreadyReviewed` rather than silently re-applying,
    /// which keeps notifications and aggregates single-counted.
    pub fn decide(
        &self,
        decision: ReviewDecision,
        reviewer: ActorId,
        feedback: Option<String>,
        already_decided: bool,
    ) -> Result<ReviewVerdict, WorkflowError> {
        if already_decided {
            return Err(WorkflowError::AlreadyReviewed);
        }

        let rule = self
            .rules
            .iter()
            .find(|rule| rule.decision == decision)
            .ok_or_else(|| {
                WorkflowError::Validation(format!(
                    "decision {decision:?} is not part of the {} protocol",
                    self.name
                ))
            })?;

        let feedback = feedback.filter(|text| !text.trim().is_empty());
        if rule.requires_feedback && feedback.is_none() {
            return Err(WorkflowError::FeedbackRequired);
        }

        Ok(ReviewVerdict {
            decision,
            reviewer,
            feedback,
            regressive: rule.regressive,
            decided_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reviewer() -> ActorId {
        ActorId::new()
    }

    #[test]
    fn test_accept_without_feedback() {
        let verdict = VISIT_COMPLETION_REVIEW
            .decide(ReviewDecision::Accept, reviewer(), None, false)
            .unwrap();
        assert!(!verdict.regressive);
        assert!(verdict.feedback.is_none());
    }

    #[test]
    fn test_decline_requires_feedback() {
        let result =
            VISIT_COMPLETION_REVIEW.decide(ReviewDecision::Decline, reviewer(), None, false);
        assert!(matches!(result, Err(WorkflowError::FeedbackRequired)));

        let result = VISIT_COMPLETION_REVIEW.decide(
            ReviewDecision::Decline,
            reviewer(),
            Some("   ".to_string()),
            false,
        );
        assert!(matches!(result, Err(WorkflowError::FeedbackRequired)));
    }

    #[test]
    fn test_decline_is_regressive() {
        let verdict = VISIT_COMPLETION_REVIEW
            .decide(
                ReviewDecision::Decline,
                reviewer(),
                Some("needs detail".to_string()),
                false,
            )
            .unwrap();
        assert!(verdict.regressive);
    }

    #[test]
    fn test_second_decision_rejected() {
        let result =
            VISIT_COMPLETION_REVIEW.decide(ReviewDecision::Accept, reviewer(), None, true);
        assert!(matches!(result, Err(WorkflowError::AlreadyReviewed)));
    }

    #[test]
    fn test_foreign_decision_rejected() {
        let result = REPORT_REVIEW.decide(ReviewDecision::Decline, reviewer(), None, false);
        assert!(matches!(result, Err(WorkflowError::Validation(_))));
    }

    #[test]
    fn test_report_protocol_feedback_rules() {
        let ok = REPORT_REVIEW.decide(ReviewDecision::Approve, reviewer(), None, false);
        assert!(ok.is_ok());

        let missing = REPORT_REVIEW.decide(ReviewDecision::Reject, reviewer(), None, false);
        assert!(matches!(missing, Err(WorkflowError::FeedbackRequired)));

        let missing =
            REPORT_REVIEW.decide(ReviewDecision::RequestRevision, reviewer(), None, false);
        assert!(matches!(missing, Err(WorkflowError::FeedbackRequired)));
    }
}
