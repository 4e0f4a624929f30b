//! Assignment operations

use core_kernel::{
    Action, ActorId, AssignmentId, EntityKind, EntityRef, Notification, NotificationKind,
    WorkflowError,
};
use domain_assignment::{Assignment, AssignmentFilter, AssignmentScope};

use crate::engine::WorkflowEngine;
use crate::inputs::CreateAssignmentInput;

fn assignment_ref(id: AssignmentId) -> EntityRef {
    EntityRef::new(EntityKind::Assignment, *id.as_uuid())
}

impl WorkflowEngine {
    /// Binds a field actor to a region or subject
    pub async fn create_assignment(
        &self,
        actor: ActorId,
        input: CreateAssignmentInput,
    ) -> Result<Assignment, WorkflowError> {
        let target = EntityRef::new(EntityKind::Actor, *input.field_actor.as_uuid());
        self.authorize(actor, Action::ManageAssignment, &target)
            .await?;

        let assignment =
            Assignment::new(input.field_actor, input.scope, actor, input.notes);
        let assignment = self.svc.assignments.insert(&assignment).await?;
        tracing::info!(assignment = %assignment.id, "assignment created");

        let scope_text = match assignment.scope {
            AssignmentScope::Region { region } => format!("region {region}"),
            AssignmentScope::Subject { subject } => format!("teacher {subject}"),
        };
        self.emit(Notification::new(
            assignment.field_actor,
            NotificationKind::AssignmentCreated,
            "New Assignment",
            format!("You have been assigned to {scope_text}."),
            Some(assignment_ref(assignment.id)),
        ))
        .await;

        Ok(assignment)
    }

    /// Deactivates an assignment; past visits remain valid
    pub async fn deactivate_assignment(
        &self,
        actor: ActorId,
        assignment_id: AssignmentId,
    ) -> Result<Assignment, WorkflowError> {
        self.authorize(actor, Action::ManageAssignment, &assignment_ref(assignment_id))
            .await?;

        let mut assignment = self.svc.assignments.get(assignment_id).await?;
        assignment.deactivate()?;
        Ok(self.svc.assignments.update(&assignment).await?)
    }

    /// Reactivates a previously deactivated assignment
    pub async fn reactivate_assignment(
        &self,
        actor: ActorId,
        assignment_id: AssignmentId,
    ) -> Result<Assignment, WorkflowError> {
        self.authorize(actor, Action::ManageAssignment, &assignment_ref(assignment_id))
            .await?;

        let mut assignment = self.svc.assignments.get(assignment_id).await?;
        assignment.reactivate()?;
        Ok(self.svc.assignments.update(&assignment).await?)
    }

    /// Active assignments for one field actor
    pub async fn active_assignments(
        &self,
        field_actor: ActorId,
    ) -> Result<Vec<Assignment>, WorkflowError> {
        Ok(self
            .svc
            .assignments
            .find(&AssignmentFilter::for_field_actor(field_actor).active())
            .await?)
    }
}
