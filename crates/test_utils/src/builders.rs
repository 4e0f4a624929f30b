//! Test data builders
//!
//! Builder patterns with sensible defaults so tests specify only the fields
//! they care about.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use core_kernel::{ActorId, Rating, RegionId, ReportingMonth, VisitId};
use domain_assignment::{Assignment, AssignmentScope};
use domain_complaint::complaint::FileComplaint;
use domain_complaint::{Complaint, ComplaintSeverity};
use domain_report::report::SubmitReport;
use domain_report::{Report, ReportScores};
use domain_reporting::MonthlyReport;
use domain_visit::visit::ScheduleVisit;
use domain_visit::{Visit, VisitPurpose};

use crate::fixtures;

/// Builder for visits
pub struct VisitBuilder {
    subject: ActorId,
    field_actor: ActorId,
    overseer: ActorId,
    region: Option<RegionId>,
    scheduled_date: NaiveDate,
    purpose: VisitPurpose,
    objectives: String,
}

impl Default for VisitBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl VisitBuilder {
    pub fn new() -> Self {
        Self {
            subject: ActorId::new(),
            field_actor: ActorId::new(),
            overseer: ActorId::new(),
            region: None,
            scheduled_date: fixtures::today(),
            purpose: VisitPurpose::ClassObservation,
            objectives: fixtures::objectives(),
        }
    }

    pub fn with_subject(mut self, subject: ActorId) -> Self {
        self.subject = subject;
        self
    }

    pub fn with_field_actor(mut self, field_actor: ActorId) -> Self {
        self.field_actor = field_actor;
        self
    }

    pub fn with_overseer(mut self, overseer: ActorId) -> Self {
        self.overseer = overseer;
        self
    }

    pub fn with_region(mut self, region: RegionId) -> Self {
        self.region = Some(region);
        self
    }

    pub fn with_scheduled_date(mut self, date: NaiveDate) -> Self {
        self.scheduled_date = date;
        self
    }

    pub fn with_purpose(mut self, purpose: VisitPurpose) -> Self {
        self.purpose = purpose;
        self
    }

    /// Builds a scheduled visit
    pub fn build(self) -> Visit {
        let overseer = self.overseer;
        Visit::schedule(
            ScheduleVisit {
                subject: self.subject,
                field_actor: self.field_actor,
                overseer,
                region: self.region,
                related_complaint: None,
                scheduled_date: self.scheduled_date,
                scheduled_time: None,
                duration_minutes: 60,
                purpose: self.purpose,
                objectives: self.objectives,
                opening_notes: String::new(),
            },
            overseer,
        )
    }

    /// Builds a visit already in progress
    pub fn build_in_progress(self) -> Visit {
        let mut visit = self.build();
        visit.start("on site").expect("fresh visit starts");
        visit
    }

    /// Builds a completed visit awaiting review
    pub fn build_completed(self) -> Visit {
        let mut visit = self.build_in_progress();
        visit
            .complete("observation complete")
            .expect("in-progress visit completes");
        visit
    }
}

/// Builder for reports
pub struct ReportBuilder {
    visit_id: VisitId,
    field_actor: ActorId,
    subject: ActorId,
    summary: String,
    score: u8,
    final_rating: Decimal,
}

impl Default for ReportBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportBuilder {
    pub fn new() -> Self {
        Self {
            visit_id: VisitId::new(),
            field_actor: ActorId::new(),
            subject: ActorId::new(),
            summary: fixtures::report_summary(),
            score: 4,
            final_rating: dec!(4),
        }
    }

    pub fn for_visit(mut self, visit: &Visit) -> Self {
        self.visit_id = visit.id;
        self.field_actor = visit.field_actor;
        self.subject = visit.subject;
        self
    }

    pub fn with_score(mut self, score: u8) -> Self {
        self.score = score;
        self
    }

    pub fn with_final_rating(mut self, rating: Decimal) -> Self {
        self.final_rating = rating;
        self
    }

    pub fn build(self) -> Report {
        let score = Rating::from_score(self.score).expect("builder score on scale");
        Report::submit(SubmitReport {
            visit_id: self.visit_id,
            field_actor: self.field_actor,
            subject: self.subject,
            summary: self.summary,
            observations: String::new(),
            strengths: String::new(),
            improvement_points: String::new(),
            recommendations: String::new(),
            scores: ReportScores {
                teaching_quality: score,
                lesson_planning: score,
                student_engagement: score,
                classroom_management: score,
                content_knowledge: score,
                resource_use: score,
            },
            final_rating: Rating::new(self.final_rating).expect("builder rating on scale"),
            follow_up_required: false,
            follow_up_date: None,
        })
        .expect("builder report is well-formed")
    }
}

/// Builder for complaints
pub struct ComplaintBuilder {
    subject: ActorId,
    filed_by: ActorId,
    severity: ComplaintSeverity,
}

impl Default for ComplaintBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ComplaintBuilder {
    pub fn new() -> Self {
        Self {
            subject: ActorId::new(),
            filed_by: ActorId::new(),
            severity: ComplaintSeverity::Medium,
        }
    }

    pub fn with_subject(mut self, subject: ActorId) -> Self {
        self.subject = subject;
        self
    }

    pub fn with_filed_by(mut self, filed_by: ActorId) -> Self {
        self.filed_by = filed_by;
        self
    }

    pub fn with_severity(mut self, severity: ComplaintSeverity) -> Self {
        self.severity = severity;
        self
    }

    pub fn build(self) -> Complaint {
        Complaint::file(FileComplaint {
            subject: self.subject,
            filed_by: self.filed_by,
            title: "Concern raised".to_string(),
            description: fixtures::report_summary(),
            category: None,
            evidence: None,
            severity: self.severity,
        })
    }
}

/// Builder for assignments
pub struct AssignmentBuilder {
    field_actor: ActorId,
    scope: AssignmentScope,
    assigned_by: ActorId,
}

impl Default for AssignmentBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl AssignmentBuilder {
    pub fn new() -> Self {
        Self {
            field_actor: ActorId::new(),
            scope: AssignmentScope::Subject {
                subject: ActorId::new(),
            },
            assigned_by: ActorId::new(),
        }
    }

    pub fn with_field_actor(mut self, field_actor: ActorId) -> Self {
        self.field_actor = field_actor;
        self
    }

    pub fn covering_subject(mut self, subject: ActorId) -> Self {
        self.scope = AssignmentScope::Subject { subject };
        self
    }

    pub fn covering_region(mut self, region: RegionId) -> Self {
        self.scope = AssignmentScope::Region { region };
        self
    }

    pub fn build(self) -> Assignment {
        Assignment::new(self.field_actor, self.scope, self.assigned_by, None)
    }
}

/// Builder for monthly reports
pub struct MonthlyReportBuilder {
    field_actor: ActorId,
    month: ReportingMonth,
}

impl Default for MonthlyReportBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl MonthlyReportBuilder {
    pub fn new() -> Self {
        Self {
            field_actor: ActorId::new(),
            month: fixtures::this_month(),
        }
    }

    pub fn with_field_actor(mut self, field_actor: ActorId) -> Self {
        self.field_actor = field_actor;
        self
    }

    pub fn with_month(mut self, month: ReportingMonth) -> Self {
        self.month = month;
        self
    }

    pub fn build(self) -> MonthlyReport {
        MonthlyReport::draft(self.field_actor, self.month)
    }
}
