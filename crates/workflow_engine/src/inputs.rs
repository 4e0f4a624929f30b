//! Validated operation payloads
//!
//! These mirror the JSON bodies of the transport layer (which lives outside
//! this workspace). Shape validation happens here; state-machine guards and
//! rating bounds stay with the aggregates.

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::Deserialize;
use validator::Validate;

use core_kernel::{ActorId, ComplaintId, Rating, RegionId, VisitId, WorkflowError};
use domain_complaint::ComplaintSeverity;
use domain_report::ReportScores;
use domain_visit::VisitPurpose;

pub(crate) fn validated<T: Validate>(input: &T) -> Result<(), WorkflowError> {
    input
        .validate()
        .map_err(|err| WorkflowError::Validation(err.to_string()))
}

/// Payload for scheduling a visit
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ScheduleVisitInput {
    pub subject: ActorId,
    pub field_actor: ActorId,
    pub overseer: ActorId,
    pub region: Option<RegionId>,
    pub related_complaint: Option<ComplaintId>,
    pub scheduled_date: NaiveDate,
    pub scheduled_time: Option<NaiveTime>,
    #[validate(range(min = 15, max = 480))]
    pub duration_minutes: u32,
    pub purpose: VisitPurpose,
    #[validate(length(min = 1))]
    pub objectives: String,
    #[serde(default)]
    pub opening_notes: String,
}

/// Criterion scores as submitted, integer 1-5 each
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ReportScoresInput {
    pub teaching_quality: u8,
    pub lesson_planning: u8,
    pub student_engagement: u8,
    pub classroom_management: u8,
    pub content_knowledge: u8,
    pub resource_use: u8,
}

impl ReportScoresInput {
    /// Converts to bounded ratings, rejecting anything off the scale
    pub fn into_scores(self) -> Result<ReportScores, WorkflowError> {
        Ok(ReportScores {
            teaching_quality: Rating::from_score(self.teaching_quality)?,
            lesson_planning: Rating::from_score(self.lesson_planning)?,
            student_engagement: Rating::from_score(self.student_engagement)?,
            classroom_management: Rating::from_score(self.classroom_management)?,
            content_knowledge: Rating::from_score(self.content_knowledge)?,
            resource_use: Rating::from_score(self.resource_use)?,
        })
    }
}

/// Payload for submitting a report against a completed visit
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitReportInput {
    pub visit_id: VisitId,
    pub summary: String,
    #[serde(default)]
    pub observations: String,
    #[serde(default)]
    pub strengths: String,
    #[serde(default)]
    pub improvement_points: String,
    #[serde(default)]
    pub recommendations: String,
    pub scores: ReportScoresInput,
    pub final_rating: Decimal,
    #[serde(default)]
    pub follow_up_required: bool,
    pub follow_up_date: Option<NaiveDate>,
}

/// Payload for filing a complaint
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct FileComplaintInput {
    pub subject: ActorId,
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    #[validate(length(min = 1))]
    pub description: String,
    pub category: Option<String>,
    pub evidence: Option<String>,
    pub severity: ComplaintSeverity,
}

/// Payload for assigning a field actor to a region or subject
#[derive(Debug, Clone, Deserialize)]
pub struct CreateAssignmentInput {
    pub field_actor: ActorId,
    pub scope: domain_assignment::AssignmentScope,
    pub notes: Option<String>,
}
