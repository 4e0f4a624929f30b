//! Visit operations

use chrono::NaiveDate;

use core_kernel::review::ReviewDecision;
use core_kernel::{
    Action, ActorId, EntityKind, EntityRef, Notification, NotificationKind, VisitId,
    WorkflowError,
};
use domain_assignment::AssignmentFilter;
use domain_visit::visit::ScheduleVisit;
use domain_visit::{Visit, VisitFilter, VisitStatus};

use crate::engine::WorkflowEngine;
use crate::inputs::{validated, ScheduleVisitInput};

fn visit_ref(id: VisitId) -> EntityRef {
    EntityRef::new(EntityKind::Visit, *id.as_uuid())
}

impl WorkflowEngine {
    /// Schedules a visit
    ///
    /// The field actor must hold an active assignment covering the subject
    /// (or its region); deactivated assignments authorize nothing new.
    pub async fn schedule_visit(
        &self,
        actor: ActorId,
        input: ScheduleVisitInput,
    ) -> Result<Visit, WorkflowError> {
        validated(&input)?;
        let target = EntityRef::new(EntityKind::Actor, *input.subject.as_uuid());
        self.authorize(actor, Action::ScheduleVisit, &target).await?;

        let assignments = self
            .svc
            .assignments
            .find(&AssignmentFilter::for_field_actor(input.field_actor).active())
            .await?;
        if !assignments
            .iter()
            .any(|a| a.covers(input.subject, input.region))
        {
            return Err(WorkflowError::Validation(
                "field actor has no active assignment covering this subject".to_string(),
            ));
        }

        let visit = Visit::schedule(
            ScheduleVisit {
                subject: input.subject,
                field_actor: input.field_actor,
                overseer: input.overseer,
                region: input.region,
                related_complaint: input.related_complaint,
                scheduled_date: input.scheduled_date,
                scheduled_time: input.scheduled_time,
                duration_minutes: input.duration_minutes,
                purpose: input.purpose,
                objectives: input.objectives,
                opening_notes: input.opening_notes,
            },
            actor,
        );
        let visit = self.svc.visits.insert(&visit).await?;
        tracing::info!(visit = %visit.id, "visit scheduled");

        self.emit(Notification::new(
            visit.subject,
            NotificationKind::VisitScheduled,
            "Inspection Scheduled",
            format!(
                "You have a {} scheduled for {}. Objectives: {}",
                visit.purpose, visit.scheduled_date, visit.objectives
            ),
            Some(visit_ref(visit.id)),
        ))
        .await;
        self.emit(Notification::new(
            visit.field_actor,
            NotificationKind::VisitScheduled,
            "Inspection Assignment",
            format!(
                "You have been assigned a {} on {}. Objectives: {}",
                visit.purpose, visit.scheduled_date, visit.objectives
            ),
            Some(visit_ref(visit.id)),
        ))
        .await;

        Ok(visit)
    }

    /// Field actor reports starting the visit
    pub async fn start_visit(
        &self,
        actor: ActorId,
        visit_id: VisitId,
        notes: Option<String>,
    ) -> Result<Visit, WorkflowError> {
        self.authorize(actor, Action::StartVisit, &visit_ref(visit_id))
            .await?;

        let mut visit = self.svc.visits.get(visit_id).await?;
        if visit.field_actor != actor {
            return Err(WorkflowError::forbidden(actor, Action::StartVisit));
        }

        visit.start(notes.unwrap_or_default())?;
        let visit = self.svc.visits.update(&visit).await?;
        tracing::info!(visit = %visit.id, "visit started");

        self.emit(Notification::new(
            visit.overseer,
            NotificationKind::VisitStarted,
            "Inspection Started",
            format!(
                "The {} for {} scheduled on {} has started.",
                visit.purpose, visit.subject, visit.scheduled_date
            ),
            Some(visit_ref(visit.id)),
        ))
        .await;
        self.emit(Notification::new(
            visit.subject,
            NotificationKind::VisitStarted,
            "Your Inspection Has Started",
            format!("Your {} has started.", visit.purpose),
            Some(visit_ref(visit.id)),
        ))
        .await;

        Ok(visit)
    }

    /// Field actor completes the visit and submits the report body
    pub async fn complete_visit(
        &self,
        actor: ActorId,
        visit_id: VisitId,
        report: String,
    ) -> Result<Visit, WorkflowError> {
        self.authorize(actor, Action::CompleteVisit, &visit_ref(visit_id))
            .await?;

        let mut visit = self.svc.visits.get(visit_id).await?;
        if visit.field_actor != actor {
            return Err(WorkflowError::forbidden(actor, Action::CompleteVisit));
        }

        visit.complete(report)?;
        let visit = self.svc.visits.update(&visit).await?;
        tracing::info!(visit = %visit.id, "visit completed");

        self.emit(Notification::new(
            visit.overseer,
            NotificationKind::VisitCompleted,
            "Inspection Report Submitted",
            format!(
                "The {} for {} is complete and its report awaits your review.",
                visit.purpose, visit.subject
            ),
            Some(visit_ref(visit.id)),
        ))
        .await;
        self.emit(Notification::new(
            visit.subject,
            NotificationKind::VisitCompleted,
            "Your Inspection Has Been Completed",
            format!(
                "Your {} has been completed. Awaiting overseer review.",
                visit.purpose
            ),
            Some(visit_ref(visit.id)),
        ))
        .await;

        Ok(visit)
    }

    /// Cancels a visit before completion
    pub async fn cancel_visit(
        &self,
        actor: ActorId,
        visit_id: VisitId,
        reason: String,
    ) -> Result<Visit, WorkflowError> {
        self.authorize(actor, Action::CancelVisit, &visit_ref(visit_id))
            .await?;

        let mut visit = self.svc.visits.get(visit_id).await?;
        if visit.overseer != actor && visit.field_actor != actor {
            return Err(WorkflowError::forbidden(actor, Action::CancelVisit));
        }

        visit.cancel(reason)?;
        let visit = self.svc.visits.update(&visit).await?;
        tracing::info!(visit = %visit.id, "visit cancelled");

        self.emit(Notification::new(
            visit.subject,
            NotificationKind::VisitCancelled,
            "Inspection Cancelled",
            format!(
                "The {} scheduled for {} has been cancelled.",
                visit.purpose, visit.scheduled_date
            ),
            Some(visit_ref(visit.id)),
        ))
        .await;
        self.emit(Notification::new(
            visit.field_actor,
            NotificationKind::VisitCancelled,
            "Inspection Cancelled",
            format!(
                "The {} scheduled for {} has been cancelled.",
                visit.purpose, visit.scheduled_date
            ),
            Some(visit_ref(visit.id)),
        ))
        .await;

        Ok(visit)
    }

    /// Overseer verifies the visit actually started
    pub async fn verify_visit_start(
        &self,
        actor: ActorId,
        visit_id: VisitId,
    ) -> Result<Visit, WorkflowError> {
        self.authorize(actor, Action::VerifyVisitStart, &visit_ref(visit_id))
            .await?;

        let mut visit = self.svc.visits.get(visit_id).await?;
        if visit.overseer != actor {
            return Err(WorkflowError::forbidden(actor, Action::VerifyVisitStart));
        }

        visit.verify_start(actor)?;
        let visit = self.svc.visits.update(&visit).await?;
        Ok(visit)
    }

    /// Overseer accepts the completion report; terminal for the cycle
    pub async fn accept_completion(
        &self,
        actor: ActorId,
        visit_id: VisitId,
        feedback: Option<String>,
    ) -> Result<Visit, WorkflowError> {
        let visit = self
            .review_completion(actor, visit_id, ReviewDecision::Accept, feedback.clone())
            .await?;

        self.emit(Notification::new(
            visit.field_actor,
            NotificationKind::CompletionAccepted,
            "Inspection Report Accepted",
            match &feedback {
                Some(text) => format!(
                    "Your report for the {} of {} was accepted. Feedback: {text}",
                    visit.purpose, visit.subject
                ),
                None => format!(
                    "Your report for the {} of {} was accepted.",
                    visit.purpose, visit.subject
                ),
            },
            Some(visit_ref(visit.id)),
        ))
        .await;
        self.emit(Notification::new(
            visit.subject,
            NotificationKind::CompletionAccepted,
            "Inspection Report Approved",
            "The inspection report has been approved by your overseer.".to_string(),
            Some(visit_ref(visit.id)),
        ))
        .await;

        Ok(visit)
    }

    /// Overseer declines the completion report; the visit regresses to
    /// in-progress for resubmission
    pub async fn decline_completion(
        &self,
        actor: ActorId,
        visit_id: VisitId,
        feedback: Option<String>,
    ) -> Result<Visit, WorkflowError> {
        let visit = self
            .review_completion(actor, visit_id, ReviewDecision::Decline, feedback.clone())
            .await?;

        // only the field actor hears about a decline
        self.emit(Notification::new(
            visit.field_actor,
            NotificationKind::CompletionDeclined,
            "Inspection Report Declined",
            format!(
                "Your report for the {} of {} was declined. Feedback: {}. Please revise and resubmit.",
                visit.purpose,
                visit.subject,
                feedback.unwrap_or_default()
            ),
            Some(visit_ref(visit.id)),
        ))
        .await;

        Ok(visit)
    }

    async fn review_completion(
        &self,
        actor: ActorId,
        visit_id: VisitId,
        decision: ReviewDecision,
        feedback: Option<String>,
    ) -> Result<Visit, WorkflowError> {
        self.authorize(actor, Action::ReviewVisitCompletion, &visit_ref(visit_id))
            .await?;

        let mut visit = self.svc.visits.get(visit_id).await?;
        if visit.overseer != actor {
            return Err(WorkflowError::forbidden(
                actor,
                Action::ReviewVisitCompletion,
            ));
        }

        let verdict = visit.review_completion(decision, actor, feedback)?;
        let visit = self.svc.visits.update(&visit).await?;
        tracing::info!(visit = %visit.id, decision = ?verdict.decision, "completion reviewed");
        Ok(visit)
    }

    /// Scheduled visits dated today or later for one field actor
    pub async fn upcoming_visits(
        &self,
        field_actor: ActorId,
        today: NaiveDate,
    ) -> Result<Vec<Visit>, WorkflowError> {
        let mut visits = self
            .svc
            .visits
            .find(
                &VisitFilter::for_field_actor(field_actor)
                    .with_status(VisitStatus::Scheduled)
                    .on_or_after(today),
            )
            .await?;
        visits.sort_by_key(|v| (v.scheduled_date, v.scheduled_time));
        Ok(visits)
    }

    /// Completed visits awaiting the overseer's accept/decline
    pub async fn visits_pending_review(
        &self,
        overseer: ActorId,
    ) -> Result<Vec<Visit>, WorkflowError> {
        let visits = self
            .svc
            .visits
            .find(&VisitFilter {
                overseer: Some(overseer),
                status: Some(VisitStatus::Completed),
                ..VisitFilter::default()
            })
            .await?;
        Ok(visits
            .into_iter()
            .filter(|v| v.completion_verified.is_none())
            .collect())
    }

    /// Visits with an outstanding start or completion verification
    pub async fn visits_pending_verification(
        &self,
        field_actor: ActorId,
    ) -> Result<Vec<Visit>, WorkflowError> {
        let visits = self
            .svc
            .visits
            .find(&VisitFilter::for_field_actor(field_actor))
            .await?;
        Ok(visits
            .into_iter()
            .filter(|v| v.pending_verification())
            .collect())
    }
}
