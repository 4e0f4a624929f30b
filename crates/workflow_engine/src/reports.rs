//! Report operations

use core_kernel::review::ReviewDecision;
use core_kernel::{
    Action, ActorId, EntityKind, EntityRef, Notification, NotificationKind, Rating, ReportId,
    WorkflowError,
};
use domain_report::report::SubmitReport;
use domain_report::{Report, ReportFilter, ReviewStatus};
use domain_visit::VisitStatus;

use crate::engine::WorkflowEngine;
use crate::inputs::SubmitReportInput;

fn report_ref(id: ReportId) -> EntityRef {
    EntityRef::new(EntityKind::Report, *id.as_uuid())
}

impl WorkflowEngine {
    /// Submits a structured report against a completed visit
    ///
    /// A visit carries at most one active report. A successor submission is
    /// only allowed while the current active report is in revision_needed;
    /// the superseded report stays behind as the record of that attempt.
    pub async fn submit_report(
        &self,
        actor: ActorId,
        input: SubmitReportInput,
    ) -> Result<Report, WorkflowError> {
        let visit_target = EntityRef::new(EntityKind::Visit, *input.visit_id.as_uuid());
        self.authorize(actor, Action::SubmitReport, &visit_target)
            .await?;

        let visit = self.svc.visits.get(input.visit_id).await?;
        if visit.field_actor != actor {
            return Err(WorkflowError::forbidden(actor, Action::SubmitReport));
        }
        if visit.status != VisitStatus::Completed {
            return Err(WorkflowError::invalid_state("submit_report", visit.status));
        }

        // newest report for the visit is the active one
        let existing = self
            .svc
            .reports
            .find(&ReportFilter::for_visit(visit.id))
            .await?;
        if let Some(active) = existing.first() {
            if !active.awaiting_revision() {
                return Err(WorkflowError::invalid_state(
                    "submit_report",
                    active.review_status,
                ));
            }
        }

        let report = Report::submit(SubmitReport {
            visit_id: visit.id,
            field_actor: actor,
            subject: visit.subject,
            summary: input.summary,
            observations: input.observations,
            strengths: input.strengths,
            improvement_points: input.improvement_points,
            recommendations: input.recommendations,
            scores: input.scores.into_scores()?,
            final_rating: Rating::new(input.final_rating)?,
            follow_up_required: input.follow_up_required,
            follow_up_date: input.follow_up_date,
        })?;
        let report = self.svc.reports.insert(&report).await?;
        tracing::info!(report = %report.id, visit = %visit.id, "report submitted");

        self.emit(Notification::new(
            visit.overseer,
            NotificationKind::ReportSubmitted,
            "Report Submitted",
            format!(
                "A report on the {} of {} has been submitted for review.",
                visit.purpose, visit.subject
            ),
            Some(report_ref(report.id)),
        ))
        .await;

        Ok(report)
    }

    /// Overseer renders a decision on a pending report
    pub async fn review_report(
        &self,
        actor: ActorId,
        report_id: ReportId,
        decision: ReviewDecision,
        feedback: Option<String>,
    ) -> Result<Report, WorkflowError> {
        self.authorize(actor, Action::ReviewReport, &report_ref(report_id))
            .await?;

        let mut report = self.svc.reports.get(report_id).await?;
        let verdict = report.review(decision, actor, feedback)?;
        let report = self.svc.reports.update(&report).await?;
        tracing::info!(report = %report.id, decision = ?verdict.decision, "report reviewed");

        let (title, outcome) = match report.review_status {
            ReviewStatus::Approved => ("Report Approved", "approved"),
            ReviewStatus::Rejected => ("Report Rejected", "rejected"),
            ReviewStatus::RevisionNeeded => ("Report Revision Requested", "sent back for revision"),
            ReviewStatus::Pending => ("Report Reviewed", "reviewed"),
        };
        self.emit(Notification::new(
            report.field_actor,
            NotificationKind::ReportReviewed,
            title,
            match &report.feedback {
                Some(text) => format!("Your report was {outcome}. Feedback: {text}"),
                None => format!("Your report was {outcome}."),
            },
            Some(report_ref(report.id)),
        ))
        .await;

        Ok(report)
    }

    /// All reports still awaiting an overseer decision
    pub async fn reports_pending_review(&self) -> Result<Vec<Report>, WorkflowError> {
        Ok(self
            .svc
            .reports
            .find(&ReportFilter::default().with_status(ReviewStatus::Pending))
            .await?)
    }

    /// A subject's report history, newest first
    pub async fn reports_for_subject(
        &self,
        subject: ActorId,
    ) -> Result<Vec<Report>, WorkflowError> {
        Ok(self
            .svc
            .reports
            .find(&ReportFilter::for_subject(subject))
            .await?)
    }
}
