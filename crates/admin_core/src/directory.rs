use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use shared::{
    domain::{AdminId, Customer, Project, ProjectId, Task, TaskId, Team},
    error::ApiError,
    protocol::{
        AuthenticateRequest, AuthenticateResponse, CreateProjectRequest, CreateProjectResponse,
        CreateTaskRequest, CreateTaskResponse, ListProjectsQuery,
    },
};
use tracing::{debug, info, warn};
use url::Url;

use crate::error::{DirectoryError, DirectoryResult};

/// Typed view of the project-tracking facade.
///
/// Every call is a single round trip. Implementations never retry; a
/// connectivity failure is returned to the caller as-is.
#[async_trait]
pub trait RemoteDirectory: Send + Sync {
    /// Returns [`AdminId::UNAUTHENTICATED`] when the credentials are rejected.
    async fn authenticate(&self, username: &str, password: &str) -> DirectoryResult<AdminId>;
    async fn list_customers(&self) -> DirectoryResult<Vec<Customer>>;
    async fn list_projects(&self, admin_id: AdminId) -> DirectoryResult<Vec<Project>>;
    async fn list_teams(&self) -> DirectoryResult<Vec<Team>>;
    async fn list_tasks(&self, project_id: ProjectId) -> DirectoryResult<Vec<Task>>;
    async fn create_project(&self, request: CreateProjectRequest) -> DirectoryResult<ProjectId>;
    async fn create_task(&self, request: CreateTaskRequest) -> DirectoryResult<TaskId>;
}

/// Stand-in used when the facade could not be reached at startup.
pub struct UnavailableDirectory {
    reason: String,
}

impl UnavailableDirectory {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    fn error(&self) -> DirectoryError {
        DirectoryError::Unavailable(self.reason.clone())
    }
}

#[async_trait]
impl RemoteDirectory for UnavailableDirectory {
    async fn authenticate(&self, _username: &str, _password: &str) -> DirectoryResult<AdminId> {
        Err(self.error())
    }

    async fn list_customers(&self) -> DirectoryResult<Vec<Customer>> {
        Err(self.error())
    }

    async fn list_projects(&self, _admin_id: AdminId) -> DirectoryResult<Vec<Project>> {
        Err(self.error())
    }

    async fn list_teams(&self) -> DirectoryResult<Vec<Team>> {
        Err(self.error())
    }

    async fn list_tasks(&self, _project_id: ProjectId) -> DirectoryResult<Vec<Task>> {
        Err(self.error())
    }

    async fn create_project(&self, _request: CreateProjectRequest) -> DirectoryResult<ProjectId> {
        Err(self.error())
    }

    async fn create_task(&self, _request: CreateTaskRequest) -> DirectoryResult<TaskId> {
        Err(self.error())
    }
}

#[derive(Debug, Clone)]
pub struct DirectoryOptions {
    pub service_url: String,
    pub request_timeout: Duration,
    pub connect_timeout: Duration,
}

impl DirectoryOptions {
    pub fn new(service_url: impl Into<String>) -> Self {
        Self {
            service_url: service_url.into(),
            request_timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(5),
        }
    }
}

/// [`RemoteDirectory`] over the facade's HTTP/JSON surface.
pub struct HttpDirectory {
    http: Client,
    service_url: String,
}

impl HttpDirectory {
    pub fn new(options: &DirectoryOptions) -> DirectoryResult<Self> {
        let service_url = normalize_service_url(&options.service_url)?;
        let http = Client::builder()
            .timeout(options.request_timeout)
            .connect_timeout(options.connect_timeout)
            .build()
            .map_err(|err| DirectoryError::Unavailable(err.to_string()))?;
        Ok(Self { http, service_url })
    }

    /// Builds the client and checks facade health once.
    pub async fn connect(options: &DirectoryOptions) -> DirectoryResult<Self> {
        let directory = Self::new(options)?;
        directory.health_check().await?;
        info!(service_url = %directory.service_url, "directory: connected");
        Ok(directory)
    }

    pub fn service_url(&self) -> &str {
        &self.service_url
    }

    pub async fn health_check(&self) -> DirectoryResult<()> {
        let response = self
            .http
            .get(format!("{}/healthz", self.service_url))
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(DirectoryError::Unavailable(format!(
                "health check returned {}",
                response.status()
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl RemoteDirectory for HttpDirectory {
    async fn authenticate(&self, username: &str, password: &str) -> DirectoryResult<AdminId> {
        let response = self
            .http
            .post(format!("{}/authenticate", self.service_url))
            .json(&AuthenticateRequest {
                username: username.to_string(),
                password: password.to_string(),
            })
            .send()
            .await?;

        if response.status() == StatusCode::UNAUTHORIZED {
            warn!(%username, "directory: credentials rejected");
            return Ok(AdminId::UNAUTHENTICATED);
        }
        let body: AuthenticateResponse = decode(response).await?;
        Ok(body.admin_id)
    }

    async fn list_customers(&self) -> DirectoryResult<Vec<Customer>> {
        let response = self
            .http
            .get(format!("{}/customers", self.service_url))
            .send()
            .await?;
        decode(response).await
    }

    async fn list_projects(&self, admin_id: AdminId) -> DirectoryResult<Vec<Project>> {
        let response = self
            .http
            .get(format!("{}/projects", self.service_url))
            .query(&ListProjectsQuery { admin_id })
            .send()
            .await?;
        decode(response).await
    }

    async fn list_teams(&self) -> DirectoryResult<Vec<Team>> {
        let response = self
            .http
            .get(format!("{}/teams", self.service_url))
            .send()
            .await?;
        decode(response).await
    }

    async fn list_tasks(&self, project_id: ProjectId) -> DirectoryResult<Vec<Task>> {
        let response = self
            .http
            .get(format!("{}/projects/{}/tasks", self.service_url, project_id.0))
            .send()
            .await?;
        decode(response).await
    }

    async fn create_project(&self, request: CreateProjectRequest) -> DirectoryResult<ProjectId> {
        let response = self
            .http
            .post(format!("{}/projects", self.service_url))
            .json(&request)
            .send()
            .await?;
        let body: CreateProjectResponse = decode(response).await?;
        debug!(project_id = body.project_id.0, "directory: project created");
        Ok(body.project_id)
    }

    async fn create_task(&self, request: CreateTaskRequest) -> DirectoryResult<TaskId> {
        let response = self
            .http
            .post(format!("{}/tasks", self.service_url))
            .json(&request)
            .send()
            .await?;
        let body: CreateTaskResponse = decode(response).await?;
        debug!(task_id = body.task_id.0, "directory: task created");
        Ok(body.task_id)
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> DirectoryResult<T> {
    let status = response.status();
    if status.is_success() {
        return response
            .json::<T>()
            .await
            .map_err(|err| DirectoryError::Protocol(format!("invalid response body: {err}")));
    }

    let body = response.text().await?;
    match serde_json::from_str::<ApiError>(&body) {
        Ok(api) if api.code.is_rejection() => Err(DirectoryError::Rejected(api)),
        Ok(api) => Err(DirectoryError::Protocol(format!(
            "{status}: {}",
            api.message
        ))),
        Err(_) => Err(DirectoryError::Protocol(format!(
            "unexpected status {status}"
        ))),
    }
}

fn normalize_service_url(raw: &str) -> DirectoryResult<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    let parsed = Url::parse(trimmed)
        .map_err(|err| DirectoryError::InvalidEndpoint(format!("{trimmed}: {err}")))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(DirectoryError::InvalidEndpoint(format!(
            "service_url must start with http:// or https://, got {trimmed}"
        )));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
#[path = "tests/directory_tests.rs"]
mod tests;
