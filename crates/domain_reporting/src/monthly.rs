//! Monthly report aggregate

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::review::{ReviewDecision, ReviewVerdict, MONTHLY_REVIEW};
use core_kernel::{ActorId, MonthlyReportId, ReportingMonth, WorkflowError};

use crate::statistics::MonthlyStatistics;

/// Monthly report status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MonthlyReportStatus {
    /// Being assembled by the field actor
    Draft,
    /// Submitted to the overseer
    Submitted,
    /// Approved by the overseer
    Approved,
    /// Overseer asked for changes
    RevisionNeeded,
}

impl std::fmt::Display for MonthlyReportStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            MonthlyReportStatus::Draft => "draft",
            MonthlyReportStatus::Submitted => "submitted",
            MonthlyReportStatus::Approved => "approved",
            MonthlyReportStatus::RevisionNeeded => "revision_needed",
        };
        write!(f, "{name}")
    }
}

/// Qualitative sections written by the field actor
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyNarrative {
    /// Common problems identified across visits
    pub recurring_issues: String,
    /// Positive developments observed
    pub positive_trends: String,
    /// Recommendations for regional improvement
    pub recommendations: String,
    /// Challenges encountered during the month
    pub challenges: String,
}

/// One roll-up report per (field actor, calendar month)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlyReport {
    /// Unique identifier
    pub id: MonthlyReportId,
    /// Author
    pub field_actor: ActorId,
    /// The month being reported
    pub month: ReportingMonth,
    /// Regenerated counts and rating distribution
    pub statistics: MonthlyStatistics,
    /// Qualitative analysis
    pub narrative: MonthlyNarrative,
    /// Status
    pub status: MonthlyReportStatus,
    /// Overseer who reviewed
    pub reviewer: Option<ActorId>,
    /// Overseer feedback
    pub feedback: Option<String>,
    /// When the review was rendered
    pub reviewed_at: Option<DateTime<Utc>>,
    /// Optimistic concurrency version
    pub version: u64,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Submission timestamp
    pub submitted_at: Option<DateTime<Utc>>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl MonthlyReport {
    /// Creates an empty draft for the month
    pub fn draft(field_actor: ActorId, month: ReportingMonth) -> Self {
        let now = Utc::now();
        Self {
            id: MonthlyReportId::new_v7(),
            field_actor,
            month,
            statistics: MonthlyStatistics::default(),
            narrative: MonthlyNarrative::default(),
            status: MonthlyReportStatus::Draft,
            reviewer: None,
            feedback: None,
            reviewed_at: None,
            version: 1,
            created_at: now,
            submitted_at: None,
            updated_at: now,
        }
    }

    /// Replaces the statistics with a freshly recomputed set
    ///
    /// Statistics are only ever replaced wholesale after a complete scan, so
    /// a failed scan never leaves a partially updated row behind.
    pub fn apply_statistics(&mut self, statistics: MonthlyStatistics) {
        self.statistics = statistics;
        self.updated_at = Utc::now();
    }

    /// Updates the qualitative sections; only drafts and reports sent back
    /// for revision may be edited
    pub fn edit_narrative(&mut self, narrative: MonthlyNarrative) -> Result<(), WorkflowError> {
        match self.status {
            MonthlyReportStatus::Draft | MonthlyReportStatus::RevisionNeeded => {
                self.narrative = narrative;
                self.updated_at = Utc::now();
                Ok(())
            }
            _ => Err(WorkflowError::invalid_state("edit_narrative", self.status)),
        }
    }

    /// Submits the report for overseer review; valid only from draft
    pub fn submit(&mut self) -> Result<(), WorkflowError> {
        if self.status != MonthlyReportStatus::Draft {
            return Err(WorkflowError::invalid_state("submit", self.status));
        }
        let now = Utc::now();
        self.status = MonthlyReportStatus::Submitted;
        self.submitted_at = Some(now);
        self.updated_at = now;
        Ok(())
    }

    /// Overseer approves or requests revision; valid only once per submission
    pub fn review(
        &mut self,
        decision: ReviewDecision,
        reviewer: ActorId,
        feedback: Option<String>,
    ) -> Result<ReviewVerdict, WorkflowError> {
        if self.status == MonthlyReportStatus::Draft {
            return Err(WorkflowError::invalid_state("review", self.status));
        }

        let verdict = MONTHLY_REVIEW.decide(
            decision,
            reviewer,
            feedback,
            self.status != MonthlyReportStatus::Submitted,
        )?;

        self.status = match verdict.decision {
            ReviewDecision::Approve => MonthlyReportStatus::Approved,
            ReviewDecision::RequestRevision => MonthlyReportStatus::RevisionNeeded,
            _ => return Err(WorkflowError::Validation("unreachable decision".into())),
        };
        self.reviewer = Some(reviewer);
        self.feedback = verdict.feedback.clone();
        self.reviewed_at = Some(verdict.decided_at);
        self.updated_at = verdict.decided_at;
        Ok(verdict)
    }
}
