use admin_core::{
    DirectoryError, ProjectCreationView, ProjectDetails, TaskListView, TaskManagementView,
    ValidationError, WorkflowError, WorkflowStep,
};
use shared::domain::Task;

const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn render_error(err: &WorkflowError) -> String {
    match err {
        WorkflowError::Validation(reason) => match reason {
            ValidationError::NameRequired => "You need to fill in the name field".to_string(),
            ValidationError::TeamRequired => "No team selected".to_string(),
            ValidationError::CustomerRequired => "No customer selected".to_string(),
            ValidationError::InvalidDate => "The date(s) are in the wrong format".to_string(),
            ValidationError::Rejected(message) => format!("Rejected by the service: {message}"),
        },
        WorkflowError::AuthenticationFailed => "Wrong login details".to_string(),
        WorkflowError::NoProjectsAvailable => {
            "No Projects Exist\nCreate a new project to proceed".to_string()
        }
        WorkflowError::Transport(cause @ DirectoryError::Unavailable(_)) => {
            format!("Service unreachable: {cause}")
        }
        WorkflowError::Transport(cause) => format!("Service error: {cause}"),
        WorkflowError::NotAuthenticated { .. } => "Log in first".to_string(),
        other => other.to_string(),
    }
}

pub fn render_steps(steps: &[WorkflowStep]) -> String {
    steps
        .iter()
        .map(|step| match step {
            WorkflowStep::Login => "login",
            WorkflowStep::ProjectCreation => "project creation",
            WorkflowStep::TaskManagement => "task management",
        })
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn render_customers(view: &ProjectCreationView) -> Vec<String> {
    if view.customers.is_empty() {
        return vec!["No customers available".to_string()];
    }
    let mut lines = vec!["Customers:".to_string()];
    for customer in &view.customers {
        let marker = if Some(customer.id) == view.default_customer {
            "*"
        } else {
            " "
        };
        lines.push(format!("{marker} [{}] {}", customer.id, customer.name));
    }
    lines
}

pub fn render_project_details(details: &ProjectDetails) -> Vec<String> {
    vec![
        format!("Project: {} [{}]", details.name, details.project_id),
        format!(
            "  Start: {}",
            details.expected_start_date.format(DATE_FORMAT)
        ),
        format!("  End: {}", details.expected_end_date.format(DATE_FORMAT)),
        format!("  Customer: {}", details.customer_name),
    ]
}

pub fn render_tasks(tasks: &[Task]) -> Vec<String> {
    if tasks.is_empty() {
        return vec!["  (no tasks)".to_string()];
    }
    tasks
        .iter()
        .map(|task| format!("  [{}] {}", task.task_id, task.name_and_status()))
        .collect()
}

pub fn render_task_list(view: &TaskListView) -> Vec<String> {
    let mut lines = render_project_details(&view.selected);
    lines.push("Tasks:".to_string());
    lines.extend(render_tasks(&view.tasks));
    lines
}

pub fn render_task_management(view: &TaskManagementView) -> Vec<String> {
    let mut lines = vec!["Projects:".to_string()];
    for (index, project) in view.projects.iter().enumerate() {
        let marker = if index == view.task_list.selected_index {
            "*"
        } else {
            " "
        };
        lines.push(format!("{marker} {index}: {}", project.name));
    }
    lines.push("Teams:".to_string());
    for team in &view.teams {
        let marker = if Some(team.team_id) == view.default_team {
            "*"
        } else {
            " "
        };
        lines.push(format!("{marker} [{}] {}", team.team_id, team.name));
    }
    lines.extend(render_task_list(&view.task_list));
    lines
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use shared::domain::{ProjectId, TaskId, TaskStatus, TeamId};

    use super::*;

    #[test]
    fn validation_errors_use_form_messages() {
        let cases = [
            (ValidationError::NameRequired, "You need to fill in the name field"),
            (ValidationError::TeamRequired, "No team selected"),
            (ValidationError::InvalidDate, "The date(s) are in the wrong format"),
        ];
        for (reason, expected) in cases {
            assert_eq!(render_error(&WorkflowError::Validation(reason)), expected);
        }
    }

    #[test]
    fn transport_errors_are_not_rendered_as_bad_credentials() {
        let rendered = render_error(&WorkflowError::Transport(DirectoryError::Unavailable(
            "connection refused".into(),
        )));
        assert!(rendered.contains("connection refused"));
        assert_ne!(rendered, render_error(&WorkflowError::AuthenticationFailed));
    }

    #[test]
    fn rejected_listing_is_a_service_error() {
        let rendered = render_error(&WorkflowError::Transport(DirectoryError::Rejected(
            shared::error::ApiError::new(shared::error::ErrorCode::NotFound, "no such project"),
        )));
        assert_eq!(
            rendered,
            "Service error: remote service rejected request: no such project"
        );
    }

    #[test]
    fn steps_render_in_order() {
        assert_eq!(
            render_steps(&[WorkflowStep::ProjectCreation, WorkflowStep::TaskManagement]),
            "project creation, task management"
        );
    }

    #[test]
    fn task_list_shows_details_and_statuses() {
        let date = |raw: &str| raw.parse::<NaiveDate>().expect("date");
        let view = TaskListView {
            selected_index: 0,
            selected: ProjectDetails {
                project_id: ProjectId(11),
                name: "Roadmap".into(),
                expected_start_date: date("2024-01-01"),
                expected_end_date: date("2024-06-01"),
                customer_name: "Acme".into(),
            },
            tasks: vec![Task {
                task_id: TaskId(21),
                name: "Design".into(),
                status: TaskStatus::Done,
                expected_start_date: date("2024-01-05"),
                expected_end_date: date("2024-02-01"),
                project_id: ProjectId(11),
                team_id: TeamId(2),
            }],
        };

        let lines = render_task_list(&view);

        assert_eq!(lines[0], "Project: Roadmap [11]");
        assert!(lines.contains(&"  Start: 2024-01-01".to_string()));
        assert!(lines.contains(&"  Customer: Acme".to_string()));
        assert_eq!(lines.last().map(String::as_str), Some("  [21] Design (done)"));
    }
}
