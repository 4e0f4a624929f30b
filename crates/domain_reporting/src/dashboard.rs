//! Per-field-actor dashboard statistics

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::rating::average_rating;
use core_kernel::ReportingMonth;
use domain_assignment::Assignment;
use domain_report::Report;
use domain_visit::{Visit, VisitStatus};

/// Dashboard overview for one field actor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldActorDashboard {
    /// Active region/subject assignments
    pub active_assignments: u32,
    /// Scheduled visits dated today or later
    pub upcoming_visits: u32,
    /// Visits completed in the current calendar month
    pub completed_this_month: u32,
    /// Scheduled or in-progress visits
    pub open_visits: u32,
    /// Visits with an outstanding overseer verification
    pub pending_verification: u32,
    /// Average final rating over reports of completed visits; 0 with none
    pub average_rating: Decimal,
}

/// Computes dashboard statistics for one field actor
///
/// `visits` and `reports` must already be scoped to the actor; `today`
/// anchors the upcoming and current-month windows.
pub fn compute_dashboard(
    today: NaiveDate,
    assignments: &[Assignment],
    visits: &[Visit],
    reports: &[Report],
) -> FieldActorDashboard {
    let current_month = ReportingMonth::from_date(today);

    let active_assignments = assignments.iter().filter(|a| a.is_active).count() as u32;

    let upcoming_visits = visits
        .iter()
        .filter(|v| v.status == VisitStatus::Scheduled && v.scheduled_date >= today)
        .count() as u32;

    let completed_this_month = visits
        .iter()
        .filter(|v| v.status == VisitStatus::Completed && current_month.contains(v.scheduled_date))
        .count() as u32;

    let open_visits = visits
        .iter()
        .filter(|v| matches!(v.status, VisitStatus::Scheduled | VisitStatus::InProgress))
        .count() as u32;

    let pending_verification = visits.iter().filter(|v| v.pending_verification()).count() as u32;

    let completed_ratings: Vec<_> = reports
        .iter()
        .filter(|r| {
            visits
                .iter()
                .any(|v| v.id == r.visit_id && v.status == VisitStatus::Completed)
        })
        .map(|r| r.final_rating)
        .collect();

    FieldActorDashboard {
        active_assignments,
        upcoming_visits,
        completed_this_month,
        open_visits,
        pending_verification,
        average_rating: average_rating(&completed_ratings),
    }
}
