//! Monthly statistics recomputation
//!
//! Statistics are always rebuilt from a full scan of the month's visits and
//! reports rather than maintained as running counters. Two scans over
//! unchanged data produce identical output, which is what lets the same code
//! serve both live dashboard refresh and the submission snapshot.

use serde::{Deserialize, Serialize};

use core_kernel::{RatingHistogram, ReportingMonth};
use domain_report::Report;
use domain_visit::{Visit, VisitStatus};

/// Counts and rating distribution for one (field actor, month) window
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyStatistics {
    pub total_visits: u32,
    pub completed_visits: u32,
    pub cancelled_visits: u32,
    pub pending_visits: u32,
    pub rating_distribution: RatingHistogram,
}

/// Recomputes statistics for the given month
///
/// `visits` should be the field actor's visits scheduled in the month;
/// anything outside the window is ignored, so callers may pass a broader
/// slice. The histogram covers final ratings of reports whose parent visit is
/// completed and inside the window.
pub fn compute_monthly_statistics(
    month: ReportingMonth,
    visits: &[Visit],
    reports: &[Report],
) -> MonthlyStatistics {
    let in_month: Vec<&Visit> = visits
        .iter()
        .filter(|v| month.contains(v.scheduled_date))
        .collect();

    let mut stats = MonthlyStatistics {
        total_visits: in_month.len() as u32,
        ..MonthlyStatistics::default()
    };

    for visit in &in_month {
        match visit.status {
            VisitStatus::Completed => stats.completed_visits += 1,
            VisitStatus::Cancelled => stats.cancelled_visits += 1,
            VisitStatus::Scheduled => stats.pending_visits += 1,
            VisitStatus::InProgress => {}
        }
    }

    for report in reports {
        let parent_completed = in_month
            .iter()
            .any(|v| v.id == report.visit_id && v.status == VisitStatus::Completed);
        if parent_completed {
            stats.rating_distribution.record(report.final_rating);
        }
    }

    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use core_kernel::{ActorId, Rating};
    use domain_report::{ReportScores, SubmitReport};
    use domain_visit::visit::ScheduleVisit;
    use domain_visit::VisitPurpose;
    use rust_decimal_macros::dec;

    fn visit_on(date: NaiveDate) -> Visit {
        let overseer = ActorId::new();
        Visit::schedule(
            ScheduleVisit {
                subject: ActorId::new(),
                field_actor: ActorId::new(),
                overseer,
                region: None,
                related_complaint: None,
                scheduled_date: date,
                scheduled_time: None,
                duration_minutes: 60,
                purpose: VisitPurpose::Routine,
                objectives: "routine".to_string(),
                opening_notes: String::new(),
            },
            overseer,
        )
    }

    fn completed_visit_on(date: NaiveDate) -> Visit {
        let mut visit = visit_on(date);
        visit.start("").unwrap();
        visit.complete("done").unwrap();
        visit
    }

    fn report_for(visit: &Visit, rating: Rating) -> Report {
        let score = Rating::from_score(3).unwrap();
        Report::submit(SubmitReport {
            visit_id: visit.id,
            field_actor: visit.field_actor,
            subject: visit.subject,
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
            final_rating: rating,
            follow_up_required: false,
            follow_up_date: None,
        })
        .unwrap()
    }

    fn march() -> ReportingMonth {
        ReportingMonth::new(2025, 3).unwrap()
    }

    #[test]
    fn test_counts_by_status() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 12).unwrap();
        let scheduled = visit_on(date);
        let completed = completed_visit_on(date);
        let mut cancelled = visit_on(date);
        cancelled.cancel("sick").unwrap();
        let outside = visit_on(NaiveDate::from_ymd_opt(2025, 4, 1).unwrap());

        let stats =
            compute_monthly_statistics(march(), &[scheduled, completed, cancelled, outside], &[]);

        assert_eq!(stats.total_visits, 3);
        assert_eq!(stats.completed_visits, 1);
        assert_eq!(stats.cancelled_visits, 1);
        assert_eq!(stats.pending_visits, 1);
    }

    #[test]
    fn test_histogram_covers_completed_visits_only() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 12).unwrap();
        let completed = completed_visit_on(date);
        let scheduled = visit_on(date);

        let counted = report_for(&completed, Rating::new(dec!(4.2)).unwrap());
        let uncounted = report_for(&scheduled, Rating::from_score(1).unwrap());

        let stats = compute_monthly_statistics(
            march(),
            &[completed, scheduled],
            &[counted, uncounted],
        );

        assert_eq!(stats.rating_distribution.total(), 1);
        assert_eq!(stats.rating_distribution.count(4), 1);
    }

    #[test]
    fn test_recomputation_is_idempotent() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 5).unwrap();
        let completed = completed_visit_on(date);
        let report = report_for(&completed, Rating::new(dec!(3.5)).unwrap());
        let visits = vec![completed, visit_on(date)];
        let reports = vec![report];

        let first = compute_monthly_statistics(march(), &visits, &reports);
        let second = compute_monthly_statistics(march(), &visits, &reports);

        assert_eq!(first, second);
        // byte-identical, not just structurally equal
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn test_empty_window() {
        let stats = compute_monthly_statistics(march(), &[], &[]);
        assert_eq!(stats, MonthlyStatistics::default());
        assert!(stats.rating_distribution.is_empty());
    }
}
