use std::sync::Arc;

use chrono::NaiveDate;
use shared::{
    domain::{AdminId, Customer, CustomerId, Project, ProjectId, Task, TaskId, Team, TeamId},
    protocol::{CreateProjectRequest, CreateTaskRequest},
};
use tracing::{debug, info, warn};

use crate::{
    cache::ReferenceDataCache,
    directory::RemoteDirectory,
    error::{WorkflowError, WorkflowResult},
    forms::{Credentials, ProjectDraft, TaskDraft},
    session::{ProjectSelection, SessionPhase, SessionState},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowStep {
    Login,
    ProjectCreation,
    TaskManagement,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectCreationView {
    pub customers: Vec<Customer>,
    pub default_customer: Option<CustomerId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectCreated {
    pub project_id: ProjectId,
    pub next_step: WorkflowStep,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectDetails {
    pub project_id: ProjectId,
    pub name: String,
    pub expected_start_date: NaiveDate,
    pub expected_end_date: NaiveDate,
    pub customer_name: String,
}

impl From<&Project> for ProjectDetails {
    fn from(project: &Project) -> Self {
        Self {
            project_id: project.project_id,
            name: project.name.clone(),
            expected_start_date: project.expected_start_date,
            expected_end_date: project.expected_end_date,
            customer_name: project.customer.name.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskListView {
    pub selected_index: usize,
    pub selected: ProjectDetails,
    pub tasks: Vec<Task>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskManagementView {
    pub projects: Vec<Project>,
    pub teams: Vec<Team>,
    pub default_team: Option<TeamId>,
    pub task_list: TaskListView,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskCreated {
    pub task_id: TaskId,
    /// `None` when the task was committed but the follow-up listing failed.
    pub tasks: Option<Vec<Task>>,
}

/// Drives one admin session against the remote directory.
///
/// Each command borrows the coordinator mutably, so a session has at most one
/// round trip in flight. Separate sessions use separate coordinators; the
/// directory handle may be shared between them.
pub struct WorkflowCoordinator {
    directory: Arc<dyn RemoteDirectory>,
    session: SessionState,
    cache: ReferenceDataCache,
}

impl WorkflowCoordinator {
    pub fn new(directory: Arc<dyn RemoteDirectory>) -> Self {
        Self {
            directory,
            session: SessionState::default(),
            cache: ReferenceDataCache::default(),
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.session.phase()
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn cache(&self) -> &ReferenceDataCache {
        &self.cache
    }

    /// Steps the presentation layer may currently offer.
    pub fn available_steps(&self) -> &'static [WorkflowStep] {
        if self.session.is_authenticated() {
            &[WorkflowStep::ProjectCreation, WorkflowStep::TaskManagement]
        } else {
            &[WorkflowStep::Login]
        }
    }

    /// Resolved from the cached list on every call.
    pub fn selected_project(&self) -> Option<&Project> {
        let admin_id = self.session.admin_id()?;
        let selection = self.session.selection()?;
        self.cache
            .project_at(admin_id, selection.index)
            .filter(|project| project.project_id == selection.project_id)
    }

    pub fn tasks(&self) -> &[Task] {
        self.session
            .selection()
            .and_then(|selection| self.cache.tasks_for(selection.project_id))
            .unwrap_or_default()
    }

    pub fn default_customer(&self) -> Option<CustomerId> {
        self.cache.customers().first().map(|customer| customer.id)
    }

    pub fn default_team(&self) -> Option<TeamId> {
        self.cache.teams().first().map(|team| team.team_id)
    }

    pub fn new_project_draft(&self) -> ProjectDraft {
        ProjectDraft {
            customer: self.default_customer(),
            ..ProjectDraft::default()
        }
    }

    pub fn new_task_draft(&self) -> TaskDraft {
        TaskDraft {
            team: self.default_team(),
            ..TaskDraft::default()
        }
    }

    pub async fn submit_login(&mut self, credentials: &mut Credentials) -> WorkflowResult<AdminId> {
        const OPERATION: &str = "submit_login";
        if self.session.is_authenticated() {
            return Err(WorkflowError::InvalidState {
                operation: OPERATION,
                phase: self.phase(),
            });
        }

        let admin_id = self
            .directory
            .authenticate(&credentials.username, &credentials.password)
            .await
            .map_err(WorkflowError::Transport)?;

        if !admin_id.is_authenticated() {
            warn!(username = %credentials.username, "workflow: wrong login details");
            return Err(WorkflowError::AuthenticationFailed);
        }

        self.cache.retain_admin_scope(admin_id);
        self.session.authenticate(admin_id);
        credentials.clear();
        info!(admin_id = admin_id.0, "workflow: logged in");
        Ok(admin_id)
    }

    pub fn logout(&mut self) {
        if let Some(admin_id) = self.session.admin_id() {
            info!(admin_id = admin_id.0, "workflow: logged out");
        }
        self.session.reset();
        self.cache.invalidate_projects();
    }

    pub async fn enter_project_creation(&mut self) -> WorkflowResult<ProjectCreationView> {
        self.require_admin("enter_project_creation")?;

        let customers = self.directory.list_customers().await?;
        debug!(count = customers.len(), "workflow: customers refreshed");
        self.cache.replace_customers(customers);

        Ok(ProjectCreationView {
            customers: self.cache.customers().to_vec(),
            default_customer: self.default_customer(),
        })
    }

    pub async fn submit_project_creation(
        &mut self,
        draft: &mut ProjectDraft,
    ) -> WorkflowResult<ProjectCreated> {
        let admin_id = self.require_admin("submit_project_creation")?;
        let project = draft.validate()?;

        let project_id = self
            .directory
            .create_project(CreateProjectRequest {
                name: project.name,
                expected_start_date: project.start,
                expected_end_date: project.end,
                customer_id: project.customer_id,
                admin_id,
            })
            .await
            .map_err(WorkflowError::from_submission)?;

        info!(
            admin_id = admin_id.0,
            project_id = project_id.0,
            customer_id = project.customer_id.0,
            "workflow: project created"
        );
        draft.reset(self.default_customer());
        self.session.clear_selection();
        self.cache.invalidate_projects();

        Ok(ProjectCreated {
            project_id,
            next_step: WorkflowStep::TaskManagement,
        })
    }

    pub async fn enter_task_management(&mut self) -> WorkflowResult<TaskManagementView> {
        let admin_id = self.require_admin("enter_task_management")?;

        let projects = self.directory.list_projects(admin_id).await?;
        let teams = self.directory.list_teams().await?;
        debug!(
            admin_id = admin_id.0,
            projects = projects.len(),
            teams = teams.len(),
            "workflow: task management lists refreshed"
        );

        self.session.clear_selection();
        self.cache.replace_projects(admin_id, projects);
        self.cache.replace_teams(teams);

        if self.cache.projects_for(admin_id).unwrap_or_default().is_empty() {
            warn!(admin_id = admin_id.0, "workflow: no projects exist");
            return Err(WorkflowError::NoProjectsAvailable);
        }

        let task_list = self.load_selection(admin_id, 0).await?;
        Ok(TaskManagementView {
            projects: self
                .cache
                .projects_for(admin_id)
                .unwrap_or_default()
                .to_vec(),
            teams: self.cache.teams().to_vec(),
            default_team: self.default_team(),
            task_list,
        })
    }

    pub async fn select_project(&mut self, index: usize) -> WorkflowResult<TaskListView> {
        let (admin_id, _) = self.require_project_context("select_project")?;
        self.load_selection(admin_id, index).await
    }

    pub async fn submit_task_creation(
        &mut self,
        draft: &mut TaskDraft,
    ) -> WorkflowResult<TaskCreated> {
        let (_, selection) = self.require_project_context("submit_task_creation")?;
        let task = draft.validate()?;

        let task_id = self
            .directory
            .create_task(CreateTaskRequest {
                name: task.name,
                expected_start_date: task.start,
                expected_end_date: task.end,
                team_id: task.team_id,
                project_id: selection.project_id,
            })
            .await
            .map_err(WorkflowError::from_submission)?;

        info!(
            project_id = selection.project_id.0,
            task_id = task_id.0,
            team_id = task.team_id.0,
            "workflow: task created"
        );
        draft.reset(self.default_team());
        self.cache.invalidate_tasks();

        let tasks = match self.directory.list_tasks(selection.project_id).await {
            Ok(tasks) => {
                self.cache.replace_tasks(selection.project_id, tasks);
                Some(self.tasks().to_vec())
            }
            Err(err) => {
                warn!(
                    project_id = selection.project_id.0,
                    task_id = task_id.0,
                    %err,
                    "workflow: task list refresh failed after create"
                );
                None
            }
        };
        Ok(TaskCreated { task_id, tasks })
    }

    /// Selection and task list are committed together once the fetch succeeds.
    async fn load_selection(
        &mut self,
        admin_id: AdminId,
        index: usize,
    ) -> WorkflowResult<TaskListView> {
        let (project_id, selected) = {
            let projects = self.cache.projects_for(admin_id).unwrap_or_default();
            let project = projects
                .get(index)
                .ok_or(WorkflowError::ProjectIndexOutOfRange {
                    index,
                    len: projects.len(),
                })?;
            (project.project_id, ProjectDetails::from(project))
        };

        let tasks = self.directory.list_tasks(project_id).await?;
        debug!(
            project_id = project_id.0,
            count = tasks.len(),
            "workflow: tasks refreshed"
        );

        self.session.select(ProjectSelection { index, project_id });
        self.cache.replace_tasks(project_id, tasks);
        Ok(TaskListView {
            selected_index: index,
            selected,
            tasks: self.tasks().to_vec(),
        })
    }

    fn require_admin(&self, operation: &'static str) -> WorkflowResult<AdminId> {
        self.session
            .admin_id()
            .ok_or(WorkflowError::NotAuthenticated { operation })
    }

    fn require_project_context(
        &self,
        operation: &'static str,
    ) -> WorkflowResult<(AdminId, ProjectSelection)> {
        let admin_id = self.require_admin(operation)?;
        let selection = self
            .session
            .selection()
            .ok_or(WorkflowError::InvalidState {
                operation,
                phase: self.phase(),
            })?;
        Ok((admin_id, selection))
    }
}

#[cfg(test)]
#[path = "tests/coordinator_tests.rs"]
mod tests;
