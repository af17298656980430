use admin_core::{
    Credentials, ProjectDraft, SessionPhase, TaskDraft, WorkflowCoordinator, WorkflowError,
    WorkflowStep,
};
use shared::domain::{CustomerId, TeamId};
use tracing::{debug, warn};

use crate::{
    command::{ConsoleCommand, HELP},
    render::{
        render_customers, render_error, render_project_details, render_steps, render_task_list,
        render_task_management, render_tasks,
    },
};

#[derive(Debug, Default)]
pub struct Outcome {
    pub lines: Vec<String>,
    pub quit: bool,
}

impl Outcome {
    fn lines(lines: Vec<String>) -> Self {
        Self { lines, quit: false }
    }

    fn line(line: impl Into<String>) -> Self {
        Self::lines(vec![line.into()])
    }
}

/// Maps console commands onto coordinator calls and keeps the form drafts.
pub struct Console {
    coordinator: WorkflowCoordinator,
    project_draft: ProjectDraft,
    task_draft: TaskDraft,
}

impl Console {
    pub fn new(coordinator: WorkflowCoordinator) -> Self {
        Self {
            coordinator,
            project_draft: ProjectDraft::default(),
            task_draft: TaskDraft::default(),
        }
    }

    pub fn coordinator(&self) -> &WorkflowCoordinator {
        &self.coordinator
    }

    pub async fn execute(&mut self, command: ConsoleCommand) -> Outcome {
        debug!(command = command.name(), "console: executing");
        match command {
            ConsoleCommand::Login { username, password } => {
                let mut credentials = Credentials::new(username, password);
                if credentials.is_empty() {
                    return Outcome::line("Enter a username and password");
                }
                match self.coordinator.submit_login(&mut credentials).await {
                    Ok(_) => {
                        let mut outcome = Outcome::line("Successfully logged in");
                        outcome.lines.extend(self.enter_project_creation().await.lines);
                        outcome
                    }
                    Err(err) => failure(&err),
                }
            }
            ConsoleCommand::Logout => {
                self.coordinator.logout();
                self.project_draft = ProjectDraft::default();
                self.task_draft = TaskDraft::default();
                Outcome::line("Logged out")
            }
            ConsoleCommand::EnterProjectCreation => self.enter_project_creation().await,
            ConsoleCommand::CreateProject {
                name,
                start,
                end,
                customer,
            } => {
                self.project_draft.name = name;
                self.project_draft.start = start;
                self.project_draft.end = end;
                if let Some(id) = customer {
                    self.project_draft.customer = Some(CustomerId(id));
                }
                match self
                    .coordinator
                    .submit_project_creation(&mut self.project_draft)
                    .await
                {
                    Ok(created) => {
                        let mut outcome = Outcome::line(format!(
                            "Project successfully created [{}]",
                            created.project_id
                        ));
                        if created.next_step == WorkflowStep::TaskManagement {
                            outcome.lines.extend(self.enter_task_management().await.lines);
                        }
                        outcome
                    }
                    Err(err) => failure(&err),
                }
            }
            ConsoleCommand::EnterTaskManagement => self.enter_task_management().await,
            ConsoleCommand::SelectProject(index) => {
                match self.coordinator.select_project(index).await {
                    Ok(view) => Outcome::lines(render_task_list(&view)),
                    Err(err) => failure(&err),
                }
            }
            ConsoleCommand::CreateTask {
                name,
                start,
                end,
                team,
            } => {
                self.task_draft.name = name;
                self.task_draft.start = start;
                self.task_draft.end = end;
                if let Some(id) = team {
                    self.task_draft.team = Some(TeamId(id));
                }
                match self
                    .coordinator
                    .submit_task_creation(&mut self.task_draft)
                    .await
                {
                    Ok(created) => {
                        let mut lines =
                            vec![format!("Task successfully created [{}]", created.task_id)];
                        match created.tasks {
                            Some(tasks) => {
                                lines.push("Tasks:".to_string());
                                lines.extend(render_tasks(&tasks));
                            }
                            None => lines.push(
                                "Task list could not be refreshed; run 'select' again".to_string(),
                            ),
                        }
                        Outcome::lines(lines)
                    }
                    Err(err) => failure(&err),
                }
            }
            ConsoleCommand::Status => Outcome::lines(self.status()),
            ConsoleCommand::Help => Outcome::lines(vec![
                HELP.to_string(),
                format!(
                    "available now: {}",
                    render_steps(self.coordinator.available_steps())
                ),
            ]),
            ConsoleCommand::Quit => Outcome {
                lines: Vec::new(),
                quit: true,
            },
        }
    }

    async fn enter_project_creation(&mut self) -> Outcome {
        match self.coordinator.enter_project_creation().await {
            Ok(view) => {
                self.project_draft = self.coordinator.new_project_draft();
                Outcome::lines(render_customers(&view))
            }
            Err(err) => failure(&err),
        }
    }

    async fn enter_task_management(&mut self) -> Outcome {
        let result = self.coordinator.enter_task_management().await;
        self.task_draft = self.coordinator.new_task_draft();
        match result {
            Ok(view) => Outcome::lines(render_task_management(&view)),
            Err(err) => failure(&err),
        }
    }

    fn status(&self) -> Vec<String> {
        let mut lines = vec![format!("Session: {}", self.coordinator.phase())];
        if let SessionPhase::ProjectContext { .. } = self.coordinator.phase() {
            if let Some(project) = self.coordinator.selected_project() {
                lines.extend(render_project_details(&project.into()));
                lines.push("Tasks:".to_string());
                lines.extend(render_tasks(self.coordinator.tasks()));
            }
        }
        lines
    }
}

fn failure(err: &WorkflowError) -> Outcome {
    if err.is_input_error() {
        debug!(%err, "console: command rejected");
    } else {
        warn!(%err, "console: command failed");
    }
    Outcome::line(render_error(err))
}
