//! Engine assembly

use std::sync::Arc;

use core_kernel::notify::{NotificationDispatcher, NotificationStore};
use core_kernel::{AccessPolicy, Action, ActorId, EntityRef, ReportingThresholds, WorkflowError};
use domain_assignment::AssignmentStore;
use domain_complaint::ComplaintStore;
use domain_report::ReportStore;
use domain_reporting::MonthlyReportStore;
use domain_visit::VisitStore;

/// External collaborators the engine runs over
#[derive(Clone)]
pub struct EngineServices {
    pub visits: Arc<dyn VisitStore>,
    pub reports: Arc<dyn ReportStore>,
    pub complaints: Arc<dyn ComplaintStore>,
    pub assignments: Arc<dyn AssignmentStore>,
    pub monthly: Arc<dyn MonthlyReportStore>,
    pub inbox: Arc<dyn NotificationStore>,
    pub policy: Arc<dyn AccessPolicy>,
    pub dispatcher: Arc<dyn NotificationDispatcher>,
    pub thresholds: ReportingThresholds,
}

/// The stateless workflow engine
pub struct WorkflowEngine {
    pub(crate) svc: EngineServices,
}

impl WorkflowEngine {
    /// Creates an engine over the given services
    pub fn new(svc: EngineServices) -> Self {
        Self { svc }
    }

    /// Gate every mutating operation through the access policy
    pub(crate) async fn authorize(
        &self,
        actor: ActorId,
        action: Action,
        target: &EntityRef,
    ) -> Result<(), WorkflowError> {
        if self.svc.policy.can(actor, action, target).await {
            Ok(())
        } else {
            Err(WorkflowError::forbidden(actor, action))
        }
    }
}
