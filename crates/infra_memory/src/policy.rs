//! Role-based access policy
//!
//! The engine never looks at roles; it asks `can(actor, action, target)` and
//! treats a false answer as Forbidden. This adapter answers from a static
//! role matrix. Object-level constraints (the visit's own field actor, a
//! complaint's assignee) are record identity checks the engine applies
//! itself.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use core_kernel::{AccessPolicy, Action, ActorId, EntityRef};

/// Roles recognized by the platform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Conducts visits: advisor or inspector
    FieldActor,
    /// Schedules and reviews: delegator or GPI member
    Overseer,
    /// Teacher under observation
    Subject,
    /// Ministry administrator
    Admin,
}

/// Static actor-to-role registry implementing the access policy port
#[derive(Debug, Default)]
pub struct RoleBook {
    roles: RwLock<HashMap<ActorId, Role>>,
}

impl RoleBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an actor under a role, replacing any previous role
    pub fn register(&self, actor: ActorId, role: Role) {
        if let Ok(mut roles) = self.roles.write() {
            roles.insert(actor, role);
        }
    }

    fn role_of(&self, actor: ActorId) -> Option<Role> {
        self.roles.read().ok()?.get(&actor).copied()
    }
}

fn permits(role: Role, action: Action) -> bool {
    match role {
        Role::Admin => true,
        Role::Overseer => matches!(
            action,
            Action::ScheduleVisit
                | Action::CancelVisit
                | Action::VerifyVisitStart
                | Action::ReviewVisitCompletion
                | Action::ReviewReport
                | Action::FileComplaint
                | Action::AssignComplaint
                | Action::ResolveComplaint
                | Action::ManageAssignment
                | Action::ReviewMonthlyReport
        ),
        Role::FieldActor => matches!(
            action,
            Action::StartVisit
                | Action::CompleteVisit
                | Action::CancelVisit
                | Action::SubmitReport
                | Action::FileComplaint
                | Action::ResolveComplaint
                | Action::SubmitMonthlyReport
        ),
        Role::Subject => matches!(action, Action::FileComplaint),
    }
}

#[async_trait]
impl AccessPolicy for RoleBook {
    async fn can(&self, actor: ActorId, action: Action, _target: &EntityRef) -> bool {
        match self.role_of(actor) {
            Some(role) => permits(role, action),
            // unknown actors hold no capabilities
            None => false,
        }
    }
}
