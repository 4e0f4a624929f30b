//! Monthly reports and aggregation queries

use chrono::NaiveDate;

use core_kernel::review::ReviewDecision;
use core_kernel::{
    Action, ActorId, EntityKind, EntityRef, MonthlyReportId, Notification, NotificationKind,
    ReportingMonth, WorkflowError,
};
use domain_assignment::AssignmentFilter;
use domain_report::ReportFilter;
use domain_reporting::monthly::MonthlyNarrative;
use domain_reporting::{
    compute_dashboard, compute_monthly_statistics, subject_performance, FieldActorDashboard,
    MonthlyReport, MonthlyStatistics, SubjectPerformance,
};
use domain_visit::VisitFilter;

use crate::engine::WorkflowEngine;

fn monthly_ref(id: MonthlyReportId) -> EntityRef {
    EntityRef::new(EntityKind::MonthlyReport, *id.as_uuid())
}

impl WorkflowEngine {
    /// Returns the field actor's report for the month, creating a draft on
    /// first access
    pub async fn monthly_report_draft(
        &self,
        actor: ActorId,
        month: ReportingMonth,
    ) -> Result<MonthlyReport, WorkflowError> {
        let target = EntityRef::new(EntityKind::Actor, *actor.as_uuid());
        self.authorize(actor, Action::SubmitMonthlyReport, &target)
            .await?;

        if let Some(existing) = self.svc.monthly.find_for_month(actor, month).await? {
            return Ok(existing);
        }
        let draft = MonthlyReport::draft(actor, month);
        Ok(self.svc.monthly.insert(&draft).await?)
    }

    /// Recomputes the month's statistics from a full scan
    ///
    /// The scan completes before anything is written; a failed read leaves
    /// the stored report untouched. Running this twice with no intervening
    /// data change yields identical statistics.
    pub async fn regenerate_statistics(
        &self,
        actor: ActorId,
        report_id: MonthlyReportId,
    ) -> Result<MonthlyReport, WorkflowError> {
        let mut report = self.svc.monthly.get(report_id).await?;
        self.authorize_monthly_access(actor, &report).await?;

        let statistics = self.scan_month(report.field_actor, report.month).await?;
        report.apply_statistics(statistics);
        Ok(self.svc.monthly.update(&report).await?)
    }

    /// Updates the qualitative sections of a draft or revision
    pub async fn edit_monthly_narrative(
        &self,
        actor: ActorId,
        report_id: MonthlyReportId,
        narrative: MonthlyNarrative,
    ) -> Result<MonthlyReport, WorkflowError> {
        let mut report = self.svc.monthly.get(report_id).await?;
        let target = monthly_ref(report.id);
        self.authorize(actor, Action::SubmitMonthlyReport, &target)
            .await?;
        if report.field_actor != actor {
            return Err(WorkflowError::forbidden(actor, Action::SubmitMonthlyReport));
        }

        report.edit_narrative(narrative)?;
        Ok(self.svc.monthly.update(&report).await?)
    }

    /// Submits the monthly report, refreshing its statistics first
    ///
    /// Regeneration and submission land in one write, so the submitted
    /// snapshot always reflects the data at submission time.
    pub async fn submit_monthly_report(
        &self,
        actor: ActorId,
        report_id: MonthlyReportId,
    ) -> Result<MonthlyReport, WorkflowError> {
        let mut report = self.svc.monthly.get(report_id).await?;
        let target = monthly_ref(report.id);
        self.authorize(actor, Action::SubmitMonthlyReport, &target)
            .await?;
        if report.field_actor != actor {
            return Err(WorkflowError::forbidden(actor, Action::SubmitMonthlyReport));
        }

        let statistics = self.scan_month(report.field_actor, report.month).await?;
        report.apply_statistics(statistics);
        report.submit()?;
        let report = self.svc.monthly.update(&report).await?;
        tracing::info!(report = %report.id, month = %report.month, "monthly report submitted");
        Ok(report)
    }

    /// Overseer approves or sends the monthly report back for revision
    pub async fn review_monthly_report(
        &self,
        actor: ActorId,
        report_id: MonthlyReportId,
        decision: ReviewDecision,
        feedback: Option<String>,
    ) -> Result<MonthlyReport, WorkflowError> {
        self.authorize(actor, Action::ReviewMonthlyReport, &monthly_ref(report_id))
            .await?;

        let mut report = self.svc.monthly.get(report_id).await?;
        report.review(decision, actor, feedback)?;
        let report = self.svc.monthly.update(&report).await?;

        self.emit(Notification::new(
            report.field_actor,
            NotificationKind::MonthlyReportReviewed,
            "Monthly Report Reviewed",
            match &report.feedback {
                Some(text) => format!(
                    "Your monthly report for {} is {}. Feedback: {text}",
                    report.month, report.status
                ),
                None => format!(
                    "Your monthly report for {} is {}.",
                    report.month, report.status
                ),
            },
            Some(monthly_ref(report.id)),
        ))
        .await;

        Ok(report)
    }

    /// Dashboard overview for one field actor
    pub async fn field_actor_dashboard(
        &self,
        field_actor: ActorId,
        today: NaiveDate,
    ) -> Result<FieldActorDashboard, WorkflowError> {
        let assignments = self
            .svc
            .assignments
            .find(&AssignmentFilter::for_field_actor(field_actor))
            .await?;
        let visits = self
            .svc
            .visits
            .find(&VisitFilter::for_field_actor(field_actor))
            .await?;
        let reports = self
            .svc
            .reports
            .find(&ReportFilter::for_field_actor(field_actor))
            .await?;
        Ok(compute_dashboard(today, &assignments, &visits, &reports))
    }

    /// Performance snapshot for one subject
    pub async fn subject_performance(
        &self,
        subject: ActorId,
        today: NaiveDate,
    ) -> Result<SubjectPerformance, WorkflowError> {
        let visits = self
            .svc
            .visits
            .find(&VisitFilter::for_subject(subject))
            .await?;
        let reports = self
            .svc
            .reports
            .find(&ReportFilter::for_subject(subject))
            .await?;
        Ok(subject_performance(
            today,
            &self.svc.thresholds,
            &visits,
            &reports,
        ))
    }

    async fn scan_month(
        &self,
        field_actor: ActorId,
        month: ReportingMonth,
    ) -> Result<MonthlyStatistics, WorkflowError> {
        let visits = self
            .svc
            .visits
            .find(&VisitFilter::for_field_actor(field_actor).in_month(month))
            .await?;
        let reports = self
            .svc
            .reports
            .find(&ReportFilter::for_field_actor(field_actor))
            .await?;
        Ok(compute_monthly_statistics(month, &visits, &reports))
    }

    /// The author may refresh their own report; overseers may refresh any
    async fn authorize_monthly_access(
        &self,
        actor: ActorId,
        report: &MonthlyReport,
    ) -> Result<(), WorkflowError> {
        let target = monthly_ref(report.id);
        if report.field_actor == actor {
            return self
                .authorize(actor, Action::SubmitMonthlyReport, &target)
                .await;
        }
        self.authorize(actor, Action::ReviewMonthlyReport, &target)
            .await
    }
}
