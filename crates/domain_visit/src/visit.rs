//! Visit aggregate

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::review::{ReviewDecision, ReviewVerdict, VISIT_COMPLETION_REVIEW};
use core_kernel::{ActorId, ComplaintId, RegionId, VisitId, WorkflowError};

use crate::events::VisitEvent;

/// Visit status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VisitStatus {
    /// Scheduled, field work not yet begun
    Scheduled,
    /// Field actor is on site
    InProgress,
    /// Field actor has submitted the completion report
    Completed,
    /// Called off before completion
    Cancelled,
}

impl std::fmt::Display for VisitStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            VisitStatus::Scheduled => "scheduled",
            VisitStatus::InProgress => "in_progress",
            VisitStatus::Completed => "completed",
            VisitStatus::Cancelled => "cancelled",
        };
        write!(f, "{name}")
    }
}

/// Why the visit is taking place
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VisitPurpose {
    /// Classroom observation
    ClassObservation,
    /// Follow-up on a previous visit
    FollowUp,
    /// Triggered by a complaint
    ComplaintInvestigation,
    /// Periodic evaluation renewal
    EvaluationRenewal,
    /// Routine inspection
    Routine,
}

impl std::fmt::Display for VisitPurpose {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            VisitPurpose::ClassObservation => "classroom observation",
            VisitPurpose::FollowUp => "follow-up visit",
            VisitPurpose::ComplaintInvestigation => "complaint investigation",
            VisitPurpose::EvaluationRenewal => "evaluation renewal",
            VisitPurpose::Routine => "routine inspection",
        };
        write!(f, "{label}")
    }
}

/// An overseer's sign-off on one lifecycle point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verification {
    pub by: ActorId,
    pub at: DateTime<Utc>,
}

/// A scheduled observation of a subject by a field actor, reviewed by an
/// overseer
///
/// One model serves both oversight hierarchies; which roles fill the actor
/// slots is an access-policy concern.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Visit {
    /// Unique identifier
    pub id: VisitId,
    /// Teacher being observed
    pub subject: ActorId,
    /// Actor conducting the visit
    pub field_actor: ActorId,
    /// Actor who schedules and reviews the work
    pub overseer: ActorId,
    /// Region the subject belongs to, when regional routing applies
    pub region: Option<RegionId>,
    /// Set when this visit investigates a complaint; informational only
    pub related_complaint: Option<ComplaintId>,
    /// Scheduled date
    pub scheduled_date: NaiveDate,
    /// Scheduled time, if fixed
    pub scheduled_time: Option<NaiveTime>,
    /// Expected duration in minutes
    pub duration_minutes: u32,
    /// Purpose/type of the visit
    pub purpose: VisitPurpose,
    /// Objectives for the visit
    pub objectives: String,
    /// Notes recorded before or at the start of the visit
    pub opening_notes: String,
    /// Report body submitted by the field actor on completion
    pub field_notes: String,
    /// Reason given when cancelling
    pub cancellation_reason: Option<String>,
    /// Status
    pub status: VisitStatus,
    /// When the field actor started
    pub started_at: Option<DateTime<Utc>>,
    /// When the field actor completed; cleared again by a decline
    pub completed_at: Option<DateTime<Utc>>,
    /// When the visit was cancelled
    pub cancelled_at: Option<DateTime<Utc>>,
    /// Overseer verification of the start
    pub start_verified: Option<Verification>,
    /// Overseer verification of the completion (set by accept)
    pub completion_verified: Option<Verification>,
    /// Append-only lifecycle history
    pub history: Vec<VisitEvent>,
    /// Optimistic concurrency version
    pub version: u64,
    /// Actor who created the record
    pub created_by: ActorId,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

/// Fields required to schedule a visit
#[derive(Debug, Clone)]
pub struct ScheduleVisit {
    pub subject: ActorId,
    pub field_actor: ActorId,
    pub overseer: ActorId,
    pub region: Option<RegionId>,
    pub related_complaint: Option<ComplaintId>,
    pub scheduled_date: NaiveDate,
    pub scheduled_time: Option<NaiveTime>,
    pub duration_minutes: u32,
    pub purpose: VisitPurpose,
    pub objectives: String,
    pub opening_notes: String,
}

impl Visit {
    /// Creates a new scheduled visit
    pub fn schedule(details: ScheduleVisit, created_by: ActorId) -> Self {
        let now = Utc::now();
        let id = VisitId::new_v7();

        Self {
            id,
            subject: details.subject,
            field_actor: details.field_actor,
            overseer: details.overseer,
            region: details.region,
            related_complaint: details.related_complaint,
            scheduled_date: details.scheduled_date,
            scheduled_time: details.scheduled_time,
            duration_minutes: details.duration_minutes,
            purpose: details.purpose,
            objectives: details.objectives,
            opening_notes: details.opening_notes,
            field_notes: String::new(),
            cancellation_reason: None,
            status: VisitStatus::Scheduled,
            started_at: None,
            completed_at: None,
            cancelled_at: None,
            start_verified: None,
            completion_verified: None,
            history: vec![VisitEvent::Scheduled {
                by: created_by,
                at: now,
            }],
            version: 1,
            created_by,
            created_at: now,
            updated_at: now,
        }
    }

    /// Field actor starts the visit
    ///
    /// The idempotency guard fires before the state guard: a visit that
    /// already carries a start timestamp reports `AlreadyStarted` no matter
    /// what its status is.
    pub fn start(&mut self, notes: impl Into<String>) -> Result<(), WorkflowError> {
        if self.started_at.is_some() {
            return Err(WorkflowError::AlreadyStarted);
        }
        if self.status != VisitStatus::Scheduled {
            return Err(WorkflowError::invalid_state("start", self.status));
        }

        let now = Utc::now();
        let notes = notes.into();
        self.status = VisitStatus::InProgress;
        self.started_at = Some(now);
        if !notes.is_empty() {
            self.opening_notes = notes;
        }
        self.history.push(VisitEvent::Started { at: now });
        self.touch(now);
        Ok(())
    }

    /// Field actor completes the visit, submitting the report body
    pub fn complete(&mut self, report: impl Into<String>) -> Result<(), WorkflowError> {
        if self.completed_at.is_some() {
            return Err(WorkflowError::AlreadyCompleted);
        }
        if self.status != VisitStatus::InProgress {
            return Err(WorkflowError::invalid_state("complete", self.status));
        }
        let report = report.into();
        if report.trim().is_empty() {
            return Err(WorkflowError::ReportRequired);
        }

        let now = Utc::now();
        self.status = VisitStatus::Completed;
        self.completed_at = Some(now);
        self.field_notes = report;
        self.history.push(VisitEvent::Completed { at: now });
        self.touch(now);
        Ok(())
    }

    /// Cancels the visit
    ///
    /// Allowed from any non-terminal state; completed work cannot be undone
    /// by cancellation.
    pub fn cancel(&mut self, reason: impl Into<String>) -> Result<(), WorkflowError> {
        match self.status {
            VisitStatus::Completed => return Err(WorkflowError::CannotCancelCompleted),
            VisitStatus::Cancelled => {
                return Err(WorkflowError::invalid_state("cancel", self.status))
            }
            VisitStatus::Scheduled | VisitStatus::InProgress => {}
        }

        let now = Utc::now();
        let reason = reason.into();
        self.status = VisitStatus::Cancelled;
        self.cancelled_at = Some(now);
        self.cancellation_reason = Some(reason.clone());
        self.history.push(VisitEvent::Cancelled { at: now, reason });
        self.touch(now);
        Ok(())
    }

    /// Overseer verifies that the visit actually started
    ///
    /// Independent of completion verification; requires the field actor's
    /// start timestamp to exist and is settable exactly once.
    pub fn verify_start(&mut self, by: ActorId) -> Result<(), WorkflowError> {
        if self.started_at.is_none() {
            return Err(WorkflowError::invalid_state("verify_start", self.status));
        }
        if self.start_verified.is_some() {
            return Err(WorkflowError::AlreadyReviewed);
        }

        let now = Utc::now();
        self.start_verified = Some(Verification { by, at: now });
        self.history.push(VisitEvent::StartVerified { by, at: now });
        self.touch(now);
        Ok(())
    }

    /// Overseer reviews the completion report: accept or decline
    ///
    /// Accept verifies the completion exactly once and is terminal for the
    /// cycle. Decline requires feedback, regresses the visit to in-progress,
    /// and clears the completion timestamp so the field actor can complete
    /// again; there is no cap on decline/resubmit cycles.
    pub fn review_completion(
        &mut self,
        decision: ReviewDecision,
        reviewer: ActorId,
        feedback: Option<String>,
    ) -> Result<ReviewVerdict, WorkflowError> {
        if self.status != VisitStatus::Completed {
            return Err(WorkflowError::invalid_state(
                "review_completion",
                self.status,
            ));
        }

        let verdict = VISIT_COMPLETION_REVIEW.decide(
            decision,
            reviewer,
            feedback,
            self.completion_verified.is_some(),
        )?;

        if verdict.regressive {
            self.status = VisitStatus::InProgress;
            self.completed_at = None;
            self.history.push(VisitEvent::CompletionDeclined {
                by: reviewer,
                at: verdict.decided_at,
                feedback: verdict.feedback.clone().unwrap_or_default(),
            });
        } else {
            self.completion_verified = Some(Verification {
                by: reviewer,
                at: verdict.decided_at,
            });
            self.history.push(VisitEvent::CompletionAccepted {
                by: reviewer,
                at: verdict.decided_at,
                feedback: verdict.feedback.clone(),
            });
        }
        self.touch(verdict.decided_at);
        Ok(verdict)
    }

    /// True while an overseer verification is outstanding
    pub fn pending_verification(&self) -> bool {
        (self.started_at.is_some() && self.start_verified.is_none())
            || (self.completed_at.is_some() && self.completion_verified.is_none())
    }

    /// True once no further transition can succeed
    pub fn is_terminal(&self) -> bool {
        match self.status {
            VisitStatus::Cancelled => true,
            VisitStatus::Completed => self.completion_verified.is_some(),
            _ => false,
        }
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scheduled_visit() -> Visit {
        let overseer = ActorId::new();
        Visit::schedule(
            ScheduleVisit {
                subject: ActorId::new(),
                field_actor: ActorId::new(),
                overseer,
                region: None,
                related_complaint: None,
                scheduled_date: NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
                scheduled_time: None,
                duration_minutes: 60,
                purpose: VisitPurpose::ClassObservation,
                objectives: "Observe lesson delivery".to_string(),
                opening_notes: String::new(),
            },
            overseer,
        )
    }

    #[test]
    fn test_schedule_defaults() {
        let visit = scheduled_visit();
        assert_eq!(visit.status, VisitStatus::Scheduled);
        assert!(visit.started_at.is_none());
        assert!(visit.completed_at.is_none());
        assert_eq!(visit.version, 1);
        assert_eq!(visit.history.len(), 1);
    }

    #[test]
    fn test_start_twice_fails_and_keeps_timestamp() {
        let mut visit = scheduled_visit();
        visit.start("arrived").unwrap();
        let first = visit.started_at;

        let result = visit.start("again");
        assert!(matches!(result, Err(WorkflowError::AlreadyStarted)));
        assert_eq!(visit.started_at, first);
    }

    #[test]
    fn test_complete_requires_report() {
        let mut visit = scheduled_visit();
        visit.start("").unwrap();

        let result = visit.complete("  ");
        assert!(matches!(result, Err(WorkflowError::ReportRequired)));
        assert_eq!(visit.status, VisitStatus::InProgress);
    }

    #[test]
    fn test_complete_from_scheduled_is_invalid() {
        let mut visit = scheduled_visit();
        let result = visit.complete("report");
        assert!(matches!(result, Err(WorkflowError::InvalidState { .. })));
    }

    #[test]
    fn test_cancel_completed_fails() {
        let mut visit = scheduled_visit();
        visit.start("").unwrap();
        visit.complete("all good").unwrap();

        let result = visit.cancel("no longer needed");
        assert!(matches!(result, Err(WorkflowError::CannotCancelCompleted)));
    }

    #[test]
    fn test_cancelled_is_terminal() {
        let mut visit = scheduled_visit();
        visit.cancel("snow day").unwrap();
        assert!(visit.is_terminal());

        assert!(visit.start("").is_err());
        assert!(visit.complete("r").is_err());
        assert!(visit.cancel("again").is_err());
    }

    #[test]
    fn test_verify_start_needs_timestamp() {
        let mut visit = scheduled_visit();
        let overseer = visit.overseer;

        assert!(matches!(
            visit.verify_start(overseer),
            Err(WorkflowError::InvalidState { .. })
        ));

        visit.start("").unwrap();
        visit.verify_start(overseer).unwrap();
        assert!(matches!(
            visit.verify_start(overseer),
            Err(WorkflowError::AlreadyReviewed)
        ));
    }

    #[test]
    fn test_decline_regresses_and_clears_completion() {
        let mut visit = scheduled_visit();
        let overseer = visit.overseer;
        visit.start("").unwrap();
        visit.complete("first draft").unwrap();

        let missing = visit.review_completion(ReviewDecision::Decline, overseer, None);
        assert!(matches!(missing, Err(WorkflowError::FeedbackRequired)));

        visit
            .review_completion(
                ReviewDecision::Decline,
                overseer,
                Some("needs detail".to_string()),
            )
            .unwrap();
        assert_eq!(visit.status, VisitStatus::InProgress);
        assert!(visit.completed_at.is_none());
        assert!(visit.completion_verified.is_none());

        // resubmission opens a fresh review cycle
        visit.complete("second draft").unwrap();
        visit
            .review_completion(ReviewDecision::Accept, overseer, Some("good".to_string()))
            .unwrap();
        assert!(visit.completion_verified.is_some());
        assert!(visit.is_terminal());
    }

    #[test]
    fn test_accept_twice_fails_with_already_reviewed() {
        let mut visit = scheduled_visit();
        let overseer = visit.overseer;
        visit.start("").unwrap();
        visit.complete("ok").unwrap();

        visit
            .review_completion(ReviewDecision::Accept, overseer, None)
            .unwrap();
        let verified = visit.completion_verified;

        let result = visit.review_completion(ReviewDecision::Accept, overseer, None);
        assert!(matches!(result, Err(WorkflowError::AlreadyReviewed)));
        assert_eq!(visit.completion_verified, verified);
    }

    #[test]
    fn test_pending_verification() {
        let mut visit = scheduled_visit();
        let overseer = visit.overseer;
        assert!(!visit.pending_verification());

        visit.start("").unwrap();
        assert!(visit.pending_verification());

        visit.verify_start(overseer).unwrap();
        assert!(!visit.pending_verification());

        visit.complete("ok").unwrap();
        assert!(visit.pending_verification());

        visit
            .review_completion(ReviewDecision::Accept, overseer, None)
            .unwrap();
        assert!(!visit.pending_verification());
    }
}
