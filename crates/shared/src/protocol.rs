//! Request and response bodies of the project-tracking facade.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{AdminId, CustomerId, ProjectId, TaskId, TeamId};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthenticateRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthenticateResponse {
    pub admin_id: AdminId,
}

/// Query string of `GET /projects`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ListProjectsQuery {
    pub admin_id: AdminId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateProjectRequest {
    pub name: String,
    pub expected_start_date: NaiveDate,
    pub expected_end_date: NaiveDate,
    pub customer_id: CustomerId,
    pub admin_id: AdminId,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProjectResponse {
    pub project_id: ProjectId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateTaskRequest {
    pub name: String,
    pub expected_start_date: NaiveDate,
    pub expected_end_date: NaiveDate,
    pub team_id: TeamId,
    pub project_id: ProjectId,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTaskResponse {
    pub task_id: TaskId,
}
