//! Complaint operations

use core_kernel::{
    Action, ActorId, ComplaintId, EntityKind, EntityRef, Notification, NotificationKind,
    WorkflowError,
};
use domain_complaint::complaint::FileComplaint;
use domain_complaint::{Complaint, ComplaintFilter};

use crate::engine::WorkflowEngine;
use crate::inputs::{validated, FileComplaintInput};

fn complaint_ref(id: ComplaintId) -> EntityRef {
    EntityRef::new(EntityKind::Complaint, *id.as_uuid())
}

impl WorkflowEngine {
    /// Files a complaint against a subject
    pub async fn file_complaint(
        &self,
        actor: ActorId,
        input: FileComplaintInput,
    ) -> Result<Complaint, WorkflowError> {
        validated(&input)?;
        let target = EntityRef::new(EntityKind::Actor, *input.subject.as_uuid());
        self.authorize(actor, Action::FileComplaint, &target).await?;

        let complaint = Complaint::file(FileComplaint {
            subject: input.subject,
            filed_by: actor,
            title: input.title,
            description: input.description,
            category: input.category,
            evidence: input.evidence,
            severity: input.severity,
        });
        let complaint = self.svc.complaints.insert(&complaint).await?;
        tracing::info!(complaint = %complaint.id, "complaint filed");
        Ok(complaint)
    }

    /// Overseer assigns a field actor to investigate
    pub async fn assign_complaint(
        &self,
        actor: ActorId,
        complaint_id: ComplaintId,
        field_actor: ActorId,
    ) -> Result<Complaint, WorkflowError> {
        self.authorize(actor, Action::AssignComplaint, &complaint_ref(complaint_id))
            .await?;

        let mut complaint = self.svc.complaints.get(complaint_id).await?;
        complaint.assign(field_actor)?;
        let complaint = self.svc.complaints.update(&complaint).await?;
        tracing::info!(complaint = %complaint.id, "complaint assigned");

        self.emit(Notification::new(
            field_actor,
            NotificationKind::ComplaintAssigned,
            "Complaint Assigned",
            format!(
                "You have been assigned to investigate the complaint \"{}\".",
                complaint.title
            ),
            Some(complaint_ref(complaint.id)),
        ))
        .await;

        Ok(complaint)
    }

    /// Closes the complaint with a resolution
    pub async fn resolve_complaint(
        &self,
        actor: ActorId,
        complaint_id: ComplaintId,
        notes: String,
    ) -> Result<Complaint, WorkflowError> {
        self.close_complaint(actor, complaint_id, notes, false).await
    }

    /// Closes the complaint without action
    pub async fn dismiss_complaint(
        &self,
        actor: ActorId,
        complaint_id: ComplaintId,
        notes: String,
    ) -> Result<Complaint, WorkflowError> {
        self.close_complaint(actor, complaint_id, notes, true).await
    }

    async fn close_complaint(
        &self,
        actor: ActorId,
        complaint_id: ComplaintId,
        notes: String,
        dismiss: bool,
    ) -> Result<Complaint, WorkflowError> {
        let target = complaint_ref(complaint_id);
        self.authorize(actor, Action::ResolveComplaint, &target)
            .await?;

        let mut complaint = self.svc.complaints.get(complaint_id).await?;
        // the assigned investigator may close; anyone else needs
        // overseer-level complaint authority
        if complaint.assigned_to != Some(actor)
            && !self
                .svc
                .policy
                .can(actor, Action::AssignComplaint, &target)
                .await
        {
            return Err(WorkflowError::forbidden(actor, Action::ResolveComplaint));
        }

        if dismiss {
            complaint.dismiss(notes)?;
        } else {
            complaint.resolve(notes)?;
        }
        let complaint = self.svc.complaints.update(&complaint).await?;
        tracing::info!(complaint = %complaint.id, status = %complaint.status, "complaint closed");

        self.emit(Notification::new(
            complaint.filed_by,
            NotificationKind::ComplaintResolved,
            if dismiss {
                "Complaint Dismissed"
            } else {
                "Complaint Resolved"
            },
            format!("Your complaint \"{}\" has been {}.", complaint.title, complaint.status),
            Some(complaint_ref(complaint.id)),
        ))
        .await;

        Ok(complaint)
    }

    /// Open complaints assigned to one field actor
    pub async fn complaints_assigned_to(
        &self,
        field_actor: ActorId,
    ) -> Result<Vec<Complaint>, WorkflowError> {
        let complaints = self
            .svc
            .complaints
            .find(&ComplaintFilter::assigned_to(field_actor))
            .await?;
        Ok(complaints.into_iter().filter(|c| !c.is_terminal()).collect())
    }

    /// A subject's complaint history, newest first
    pub async fn complaints_for_subject(
        &self,
        subject: ActorId,
    ) -> Result<Vec<Complaint>, WorkflowError> {
        Ok(self
            .svc
            .complaints
            .find(&ComplaintFilter::for_subject(subject))
            .await?)
    }
}
