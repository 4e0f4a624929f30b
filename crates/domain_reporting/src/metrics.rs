//! Subject performance metrics

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::rating::average_rating;
use core_kernel::ReportingThresholds;
use domain_report::Report;
use domain_visit::{Visit, VisitStatus};

/// Three-bucket performance classification
///
/// Derived from a single scalar (visit completion rate) against two
/// configured cutoffs. Deliberately simplistic: this is a triage signal, not
/// a time-series model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PerformanceTrend {
    Improving,
    Stable,
    Declining,
}

/// Performance snapshot for one subject
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectPerformance {
    /// Average final rating across the subject's history; 0 with none
    pub average_rating: Decimal,
    /// Completion rate across all non-cancelled visits, in percent
    pub completion_rate: Decimal,
    /// Most recent recorded activity (visit update or report submission)
    pub last_activity: Option<NaiveDate>,
    /// Low average or prolonged inactivity
    pub needs_attention: bool,
    /// Trend bucket
    pub trend: PerformanceTrend,
}

/// Computes the performance snapshot for one subject
///
/// `visits` and `reports` must already be scoped to the subject.
pub fn subject_performance(
    today: NaiveDate,
    thresholds: &ReportingThresholds,
    visits: &[Visit],
    reports: &[Report],
) -> SubjectPerformance {
    let ratings: Vec<_> = reports.iter().map(|r| r.final_rating).collect();
    let average = average_rating(&ratings);

    // cancelled visits say nothing about the subject
    let considered = visits
        .iter()
        .filter(|v| v.status != VisitStatus::Cancelled)
        .count();
    let completed = visits
        .iter()
        .filter(|v| v.status == VisitStatus::Completed)
        .count();
    let completion_rate = if considered == 0 {
        Decimal::ZERO
    } else {
        (Decimal::from(completed) * Decimal::from(100) / Decimal::from(considered)).round_dp(2)
    };

    let last_activity = visits
        .iter()
        .map(|v| v.updated_at.date_naive())
        .chain(reports.iter().map(|r| r.submitted_at.date_naive()))
        .max();

    let idle_days = last_activity
        .map(|date| (today - date).num_days())
        .unwrap_or(i64::MAX);
    let needs_attention =
        average < thresholds.attention_rating_floor || idle_days > thresholds.attention_idle_days;

    let trend = if considered == 0 {
        PerformanceTrend::Stable
    } else if completion_rate >= thresholds.trend_improving_min {
        PerformanceTrend::Improving
    } else if completion_rate < thresholds.trend_declining_max {
        PerformanceTrend::Declining
    } else {
        PerformanceTrend::Stable
    };

    SubjectPerformance {
        average_rating: average,
        completion_rate,
        last_activity,
        needs_attention,
        trend,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::{ActorId, Rating};
    use domain_report::{ReportScores, SubmitReport};
    use domain_visit::visit::ScheduleVisit;
    use domain_visit::VisitPurpose;
    use rust_decimal_macros::dec;

    fn visit_for(subject: ActorId) -> Visit {
        let overseer = ActorId::new();
        Visit::schedule(
            ScheduleVisit {
                subject,
                field_actor: ActorId::new(),
                overseer,
                region: None,
                related_complaint: None,
                scheduled_date: NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
                scheduled_time: None,
                duration_minutes: 60,
                purpose: VisitPurpose::Routine,
                objectives: "routine".to_string(),
                opening_notes: String::new(),
            },
            overseer,
        )
    }

    fn completed_visit_for(subject: ActorId) -> Visit {
        let mut visit = visit_for(subject);
        visit.start("").unwrap();
        visit.complete("done").unwrap();
        visit
    }

    fn report_rated(subject: ActorId, rating: Decimal) -> Report {
        let score = Rating::from_score(3).unwrap();
        Report::submit(SubmitReport {
            visit_id: core_kernel::VisitId::new(),
            field_actor: ActorId::new(),
            subject,
            summary: "summary".to_string(),
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
            final_rating: Rating::new(rating).unwrap(),
            follow_up_required: false,
            follow_up_date: None,
        })
        .unwrap()
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 15).unwrap()
    }

    #[test]
    fn test_low_average_needs_attention() {
        let subject = ActorId::new();
        let visits = vec![completed_visit_for(subject)];
        let reports = vec![report_rated(subject, dec!(1.5))];

        let snapshot =
            subject_performance(today(), &ReportingThresholds::default(), &visits, &reports);
        assert!(snapshot.needs_attention);
        assert_eq!(snapshot.average_rating, dec!(1.5));
    }

    #[test]
    fn test_healthy_subject() {
        let subject = ActorId::new();
        let visits = vec![completed_visit_for(subject)];
        let reports = vec![report_rated(subject, dec!(4.5))];

        let snapshot =
            subject_performance(today(), &ReportingThresholds::default(), &visits, &reports);
        assert!(!snapshot.needs_attention);
        assert_eq!(snapshot.trend, PerformanceTrend::Improving);
        assert_eq!(snapshot.completion_rate, dec!(100));
    }

    #[test]
    fn test_idle_subject_needs_attention() {
        let subject = ActorId::new();
        let visits = vec![completed_visit_for(subject)];
        let reports = vec![report_rated(subject, dec!(4.5))];

        let far_future = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let snapshot = subject_performance(
            far_future,
            &ReportingThresholds::default(),
            &visits,
            &reports,
        );
        assert!(snapshot.needs_attention);
    }

    #[test]
    fn test_no_history_is_stable_and_flagged() {
        let snapshot =
            subject_performance(today(), &ReportingThresholds::default(), &[], &[]);
        assert_eq!(snapshot.trend, PerformanceTrend::Stable);
        assert_eq!(snapshot.average_rating, Decimal::ZERO);
        assert!(snapshot.needs_attention);
        assert!(snapshot.last_activity.is_none());
    }

    #[test]
    fn test_low_completion_rate_declines() {
        let subject = ActorId::new();
        let visits = vec![
            completed_visit_for(subject),
            visit_for(subject),
            visit_for(subject),
            visit_for(subject),
        ];
        let reports = vec![report_rated(subject, dec!(4))];

        let snapshot =
            subject_performance(today(), &ReportingThresholds::default(), &visits, &reports);
        assert_eq!(snapshot.completion_rate, dec!(25));
        assert_eq!(snapshot.trend, PerformanceTrend::Declining);
    }

    #[test]
    fn test_cancelled_visits_excluded_from_rate() {
        let subject = ActorId::new();
        let mut cancelled = visit_for(subject);
        cancelled.cancel("strike day").unwrap();
        let visits = vec![completed_visit_for(subject), cancelled];

        let snapshot = subject_performance(
            today(),
            &ReportingThresholds::default(),
            &visits,
            &[report_rated(subject, dec!(4))],
        );
        assert_eq!(snapshot.completion_rate, dec!(100));
    }
}
