use std::fmt;

use shared::domain::{AdminId, ProjectId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    LoggedOut,
    Authenticated(AdminId),
    ProjectContext {
        admin_id: AdminId,
        project_id: ProjectId,
    },
}

impl fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionPhase::LoggedOut => f.write_str("logged out"),
            SessionPhase::Authenticated(admin_id) => write!(f, "authenticated as admin {admin_id}"),
            SessionPhase::ProjectContext {
                admin_id,
                project_id,
            } => write!(f, "admin {admin_id} has project {project_id} selected"),
        }
    }
}

/// Position of the selected project in the cached project list.
///
/// The id is kept alongside the index so a refreshed list that moved the
/// project is detected instead of silently pointing at another record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectSelection {
    pub index: usize,
    pub project_id: ProjectId,
}

#[derive(Debug, Default)]
pub struct SessionState {
    admin_id: Option<AdminId>,
    selection: Option<ProjectSelection>,
}

impl SessionState {
    pub fn admin_id(&self) -> Option<AdminId> {
        self.admin_id
    }

    pub fn selection(&self) -> Option<ProjectSelection> {
        self.selection
    }

    pub fn is_authenticated(&self) -> bool {
        self.admin_id.is_some()
    }

    pub fn phase(&self) -> SessionPhase {
        match (self.admin_id, self.selection) {
            (None, _) => SessionPhase::LoggedOut,
            (Some(admin_id), None) => SessionPhase::Authenticated(admin_id),
            (Some(admin_id), Some(selection)) => SessionPhase::ProjectContext {
                admin_id,
                project_id: selection.project_id,
            },
        }
    }

    /// Ignores the unauthenticated sentinel.
    pub(crate) fn authenticate(&mut self, admin_id: AdminId) {
        if !admin_id.is_authenticated() {
            return;
        }
        self.admin_id = Some(admin_id);
        self.selection = None;
    }

    pub(crate) fn select(&mut self, selection: ProjectSelection) {
        if self.admin_id.is_some() {
            self.selection = Some(selection);
        }
    }

    pub(crate) fn clear_selection(&mut self) {
        self.selection = None;
    }

    pub(crate) fn reset(&mut self) {
        self.admin_id = None;
        self.selection = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phase_follows_admin_and_selection() {
        let mut session = SessionState::default();
        assert_eq!(session.phase(), SessionPhase::LoggedOut);

        session.select(ProjectSelection {
            index: 0,
            project_id: ProjectId(1),
        });
        assert_eq!(session.phase(), SessionPhase::LoggedOut);

        session.authenticate(AdminId(7));
        assert_eq!(session.phase(), SessionPhase::Authenticated(AdminId(7)));

        session.select(ProjectSelection {
            index: 0,
            project_id: ProjectId(1),
        });
        assert_eq!(
            session.phase(),
            SessionPhase::ProjectContext {
                admin_id: AdminId(7),
                project_id: ProjectId(1),
            }
        );

        session.reset();
        assert_eq!(session.phase(), SessionPhase::LoggedOut);
    }

    #[test]
    fn sentinel_admin_id_never_authenticates() {
        let mut session = SessionState::default();
        session.authenticate(AdminId::UNAUTHENTICATED);
        assert!(!session.is_authenticated());
    }
}
