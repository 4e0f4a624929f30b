//! Ready-wired engine harness

use std::sync::Arc;

use core_kernel::{ActorId, ReportingThresholds};
use infra_memory::{
    InboxDispatcher, MemoryAssignmentStore, MemoryComplaintStore, MemoryMonthlyReportStore,
    MemoryReportStore, MemoryVisitStore, Role, RoleBook,
};
use workflow_engine::{EngineServices, WorkflowEngine};

/// Engine over in-memory adapters with a standard cast of actors
///
/// The field actor starts with an active assignment covering the subject, so
/// scheduling works out of the box.
pub struct TestHarness {
    pub engine: WorkflowEngine,
    pub overseer: ActorId,
    pub field_actor: ActorId,
    pub subject: ActorId,
    /// Registered under no role; everything is Forbidden for them
    pub outsider: ActorId,
    pub visits: Arc<MemoryVisitStore>,
    pub reports: Arc<MemoryReportStore>,
    pub complaints: Arc<MemoryComplaintStore>,
    pub assignments: Arc<MemoryAssignmentStore>,
    pub monthly: Arc<MemoryMonthlyReportStore>,
    pub inbox: Arc<InboxDispatcher>,
    pub policy: Arc<RoleBook>,
}

impl TestHarness {
    /// Builds the harness and seeds the subject assignment
    pub async fn new() -> Self {
        let visits = Arc::new(MemoryVisitStore::new());
        let reports = Arc::new(MemoryReportStore::new());
        let complaints = Arc::new(MemoryComplaintStore::new());
        let assignments = Arc::new(MemoryAssignmentStore::new());
        let monthly = Arc::new(MemoryMonthlyReportStore::new());
        let inbox = Arc::new(InboxDispatcher::new());
        let policy = Arc::new(RoleBook::new());

        let overseer = ActorId::new();
        let field_actor = ActorId::new();
        let subject = ActorId::new();
        let outsider = ActorId::new();
        policy.register(overseer, Role::Overseer);
        policy.register(field_actor, Role::FieldActor);
        policy.register(subject, Role::Subject);

        let engine = WorkflowEngine::new(EngineServices {
            visits: visits.clone(),
            reports: reports.clone(),
            complaints: complaints.clone(),
            assignments: assignments.clone(),
            monthly: monthly.clone(),
            inbox: inbox.clone(),
            policy: policy.clone(),
            dispatcher: inbox.clone(),
            thresholds: ReportingThresholds::default(),
        });

        let harness = Self {
            engine,
            overseer,
            field_actor,
            subject,
            outsider,
            visits,
            reports,
            complaints,
            assignments,
            monthly,
            inbox,
            policy,
        };
        harness.assign_subject_to_field_actor().await;
        harness
    }

    async fn assign_subject_to_field_actor(&self) {
        use domain_assignment::AssignmentScope;
        self.engine
            .create_assignment(
                self.overseer,
                workflow_engine::CreateAssignmentInput {
                    field_actor: self.field_actor,
                    scope: AssignmentScope::Subject {
                        subject: self.subject,
                    },
                    notes: None,
                },
            )
            .await
            .expect("seeding the standard assignment succeeds");
    }
}
