//! crates/zoo_records_core/src/access.rs
//!
//! Role-based access rules for the submission workflow. Each endpoint's
//! required-role set is a constant here rather than an inline list at the
//! call site, so the full permission matrix is visible in one place.

use crate::domain::{Role, Submission, User};
use crate::ports::{PortError, PortResult};

/// Who may upload audio observations.
pub const UPLOAD_AUDIO: &[Role] = &[Role::Zookeeper];
/// Who may list their own submissions.
pub const LIST_OWN: &[Role] = &[Role::Zookeeper];
/// Who may list every submission.
pub const LIST_ALL: &[Role] = &[Role::Admin, Role::Doctor];
/// Who may comment on a submission.
pub const ADD_COMMENT: &[Role] = &[Role::Admin, Role::Doctor];

/// Passes the user through iff their role is in the allowed set.
pub fn require_role(user: &User, allowed: &[Role]) -> PortResult<()> {
    if allowed.contains(&user.role) {
        Ok(())
    } else {
        Err(PortError::Forbidden)
    }
}

/// The update rule: a zookeeper may edit only their own submission,
/// doctors and admins may edit any.
pub fn authorize_update(user: &User, submission: &Submission) -> PortResult<()> {
    match user.role {
        Role::Zookeeper if submission.user_id != user.id => Err(PortError::Forbidden),
        _ => Ok(()),
    }
}
