//! Checklist item lifecycle: `Active -> Archived -> Deleted`.

use std::fmt;

use thiserror::Error;

use crate::models::ChecklistItem;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    Active,
    Archived,
    Deleted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MutationKind {
    Create,
    Toggle,
    Edit,
    Schedule,
    Archive,
    Delete,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot {kind} a task that is {from}")]
pub struct LifecycleError {
    pub from: Lifecycle,
    pub kind: MutationKind,
}

impl Lifecycle {
    pub fn of(item: &ChecklistItem) -> Self {
        if item.archived {
            Lifecycle::Archived
        } else {
            Lifecycle::Active
        }
    }

    /// State reached by applying `kind`. Creation has no source state; new
    /// items start out `Active`.
    pub fn apply(self, kind: MutationKind) -> Result<Lifecycle, LifecycleError> {
        use Lifecycle::*;
        use MutationKind::*;

        match (self, kind) {
            (Active, Toggle | Edit | Schedule) => Ok(Active),
            (Active, Archive) => Ok(Archived),
            (Active | Archived, Delete) => Ok(Deleted),
            (from, kind) => Err(LifecycleError { from, kind }),
        }
    }
}

impl MutationKind {
    /// Text shown to the user when the server rejects the mutation.
    pub fn failure_message(&self) -> &'static str {
        match self {
            MutationKind::Create => "Failed to add task. Please try again.",
            MutationKind::Toggle => "Failed to update task status. Please try again.",
            MutationKind::Edit => "Failed to update task. Please try again.",
            MutationKind::Schedule => "Failed to schedule task. Please try again.",
            MutationKind::Archive => "Failed to archive task. Please try again.",
            MutationKind::Delete => "Failed to delete task. Please try again.",
        }
    }
}

impl fmt::Display for Lifecycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Lifecycle::Active => "active",
            Lifecycle::Archived => "archived",
            Lifecycle::Deleted => "deleted",
        })
    }
}

impl fmt::Display for MutationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MutationKind::Create => "create",
            MutationKind::Toggle => "toggle",
            MutationKind::Edit => "edit",
            MutationKind::Schedule => "schedule",
            MutationKind::Archive => "archive",
            MutationKind::Delete => "delete",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Lifecycle::*;
    use MutationKind::*;

    #[test]
    fn active_items_accept_every_mutation() {
        assert_eq!(Active.apply(Toggle), Ok(Active));
        assert_eq!(Active.apply(Edit), Ok(Active));
        assert_eq!(Active.apply(Schedule), Ok(Active));
        assert_eq!(Active.apply(Archive), Ok(Archived));
        assert_eq!(Active.apply(Delete), Ok(Deleted));
    }

    #[test]
    fn archived_items_can_only_be_deleted() {
        assert_eq!(Archived.apply(Delete), Ok(Deleted));
        for kind in [Toggle, Edit, Schedule, Archive, Create] {
            assert_eq!(Archived.apply(kind), Err(LifecycleError { from: Archived, kind }));
        }
    }

    #[test]
    fn deleted_is_terminal() {
        for kind in [Create, Toggle, Edit, Schedule, Archive, Delete] {
            assert!(Deleted.apply(kind).is_err());
        }
        assert_eq!(Active.apply(Create).unwrap_err().to_string(), "cannot create a task that is active");
    }
}
