//! Report aggregate

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::review::{ReviewDecision, ReviewVerdict, REPORT_REVIEW};
use core_kernel::{ActorId, Rating, ReportId, VisitId, WorkflowError};

/// Overseer review status of a report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewStatus {
    /// Awaiting overseer review
    Pending,
    /// Approved
    Approved,
    /// Rejected
    Rejected,
    /// A revised report is expected
    RevisionNeeded,
}

impl std::fmt::Display for ReviewStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ReviewStatus::Pending => "pending",
            ReviewStatus::Approved => "approved",
            ReviewStatus::Rejected => "rejected",
            ReviewStatus::RevisionNeeded => "revision_needed",
        };
        write!(f, "{name}")
    }
}

/// Structured criterion scores, each on the 1-5 scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportScores {
    pub teaching_quality: Rating,
    pub lesson_planning: Rating,
    pub student_engagement: Rating,
    pub classroom_management: Rating,
    pub content_knowledge: Rating,
    pub resource_use: Rating,
}

impl ReportScores {
    /// Mean of the six criteria
    pub fn overall(&self) -> Rating {
        let sum: Decimal = [
            self.teaching_quality,
            self.lesson_planning,
            self.student_engagement,
            self.classroom_management,
            self.content_knowledge,
            self.resource_use,
        ]
        .iter()
        .map(|r| r.value())
        .sum();
        // The mean of values in [1,5] is itself in [1,5]
        Rating::new((sum / Decimal::from(6)).round_dp(2))
            .expect("mean of bounded ratings is bounded")
    }
}

/// The structured write-up produced after a completed visit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    /// Unique identifier
    pub id: ReportId,
    /// Visit this report documents
    pub visit_id: VisitId,
    /// Author
    pub field_actor: ActorId,
    /// Teacher observed
    pub subject: ActorId,
    /// Overall visit summary
    pub summary: String,
    /// Detailed observation notes
    pub observations: String,
    /// Identified strengths
    pub strengths: String,
    /// Areas for improvement
    pub improvement_points: String,
    /// Recommendations for professional development
    pub recommendations: String,
    /// Criterion scorecard
    pub scores: ReportScores,
    /// Overall rating, bounded to [1, 5]
    pub final_rating: Rating,
    /// Whether a follow-up visit is needed
    pub follow_up_required: bool,
    /// Target date for the follow-up
    pub follow_up_date: Option<NaiveDate>,
    /// Review state
    pub review_status: ReviewStatus,
    /// Overseer who rendered the decision
    pub reviewer: Option<ActorId>,
    /// Overseer feedback
    pub feedback: Option<String>,
    /// When the decision was rendered
    pub reviewed_at: Option<DateTime<Utc>>,
    /// Optimistic concurrency version
    pub version: u64,
    /// Submission timestamp
    pub submitted_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

/// Fields required to submit a report
#[derive(Debug, Clone)]
pub struct SubmitReport {
    pub visit_id: VisitId,
    pub field_actor: ActorId,
    pub subject: ActorId,
    pub summary: String,
    pub observations: String,
    pub strengths: String,
    pub improvement_points: String,
    pub recommendations: String,
    pub scores: ReportScores,
    pub final_rating: Rating,
    pub follow_up_required: bool,
    pub follow_up_date: Option<NaiveDate>,
}

impl Report {
    /// Creates a newly submitted report awaiting review
    pub fn submit(details: SubmitReport) -> Result<Self, WorkflowError> {
        if details.summary.trim().is_empty() {
            return Err(WorkflowError::ReportRequired);
        }

        let now = Utc::now();
        Ok(Self {
            id: ReportId::new_v7(),
            visit_id: details.visit_id,
            field_actor: details.field_actor,
            subject: details.subject,
            summary: details.summary,
            observations: details.observations,
            strengths: details.strengths,
            improvement_points: details.improvement_points,
            recommendations: details.recommendations,
            scores: details.scores,
            final_rating: details.final_rating,
            follow_up_required: details.follow_up_required,
            follow_up_date: details.follow_up_date,
            review_status: ReviewStatus::Pending,
            reviewer: None,
            feedback: None,
            reviewed_at: None,
            version: 1,
            submitted_at: now,
            updated_at: now,
        })
    }

    /// Overseer renders a decision: approve, reject, or request revision
    ///
    /// All three outcomes require the report to still be pending and are
    /// terminal for this submission attempt; the report itself never
    /// regresses. A revision arrives as a new report on the same visit.
    pub fn review(
        &mut self,
        decision: ReviewDecision,
        reviewer: ActorId,
        feedback: Option<String>,
    ) -> Result<ReviewVerdict, WorkflowError> {
        let verdict = REPORT_REVIEW.decide(
            decision,
            reviewer,
            feedback,
            self.review_status != ReviewStatus::Pending,
        )?;

        self.review_status = match verdict.decision {
            ReviewDecision::Approve => ReviewStatus::Approved,
            ReviewDecision::Reject => ReviewStatus::Rejected,
            ReviewDecision::RequestRevision => ReviewStatus::RevisionNeeded,
            // the protocol table only admits the three outcomes above
            _ => return Err(WorkflowError::Validation("unreachable decision".into())),
        };
        self.reviewer = Some(reviewer);
        self.feedback = verdict.feedback.clone();
        self.reviewed_at = Some(verdict.decided_at);
        self.updated_at = verdict.decided_at;
        Ok(verdict)
    }

    /// True once a decision has been recorded
    pub fn is_reviewed(&self) -> bool {
        self.review_status != ReviewStatus::Pending
    }

    /// True if this report may be superseded by a revised submission
    pub fn awaiting_revision(&self) -> bool {
        self.review_status == ReviewStatus::RevisionNeeded
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn scores(value: u8) -> ReportScores {
        let rating = Rating::from_score(value).unwrap();
        ReportScores {
            teaching_quality: rating,
            lesson_planning: rating,
            student_engagement: rating,
            classroom_management: rating,
            content_knowledge: rating,
            resource_use: rating,
        }
    }

    fn submitted_report() -> Report {
        Report::submit(SubmitReport {
            visit_id: VisitId::new(),
            field_actor: ActorId::new(),
            subject: ActorId::new(),
            summary: "Solid lesson overall".to_string(),
            observations: String::new(),
            strengths: "Clear explanations".to_string(),
            improvement_points: "Pacing".to_string(),
            recommendations: String::new(),
            scores: scores(4),
            final_rating: Rating::new(dec!(4.0)).unwrap(),
            follow_up_required: false,
            follow_up_date: None,
        })
        .unwrap()
    }

    #[test]
    fn test_submit_requires_summary() {
        let mut details = SubmitReport {
            visit_id: VisitId::new(),
            field_actor: ActorId::new(),
            subject: ActorId::new(),
            summary: "  ".to_string(),
            observations: String::new(),
            strengths: String::new(),
            improvement_points: String::new(),
            recommendations: String::new(),
            scores: scores(3),
            final_rating: Rating::from_score(3).unwrap(),
            follow_up_required: false,
            follow_up_date: None,
        };
        assert!(matches!(
            Report::submit(details.clone()),
            Err(WorkflowError::ReportRequired)
        ));

        details.summary = "ok".to_string();
        assert!(Report::submit(details).is_ok());
    }

    #[test]
    fn test_scores_overall_mean() {
        let mut s = scores(4);
        s.teaching_quality = Rating::from_score(2).unwrap();
        // (2 + 4*5) / 6 = 3.67
        assert_eq!(s.overall().value(), dec!(3.67));
    }

    #[test]
    fn test_review_outcomes_are_mutually_exclusive() {
        for decision in [
            ReviewDecision::Approve,
            ReviewDecision::Reject,
            ReviewDecision::RequestRevision,
        ] {
            let mut report = submitted_report();
            report
                .review(decision, ActorId::new(), Some("noted".to_string()))
                .unwrap();
            assert!(report.is_reviewed());

            for second in [
                ReviewDecision::Approve,
                ReviewDecision::Reject,
                ReviewDecision::RequestRevision,
            ] {
                let result = report.review(second, ActorId::new(), Some("again".to_string()));
                assert!(matches!(result, Err(WorkflowError::AlreadyReviewed)));
            }
        }
    }

    #[test]
    fn test_reject_requires_feedback() {
        let mut report = submitted_report();
        let result = report.review(ReviewDecision::Reject, ActorId::new(), None);
        assert!(matches!(result, Err(WorkflowError::FeedbackRequired)));
        assert_eq!(report.review_status, ReviewStatus::Pending);
    }

    #[test]
    fn test_approve_feedback_optional() {
        let mut report = submitted_report();
        report
            .review(ReviewDecision::Approve, ActorId::new(), None)
            .unwrap();
        assert_eq!(report.review_status, ReviewStatus::Approved);
        assert!(report.feedback.is_none());
        assert!(report.reviewed_at.is_some());
    }

    #[test]
    fn test_visit_decisions_rejected_for_reports() {
        let mut report = submitted_report();
        let result = report.review(
            ReviewDecision::Decline,
            ActorId::new(),
            Some("wrong protocol".to_string()),
        );
        assert!(matches!(result, Err(WorkflowError::Validation(_))));
    }
}
