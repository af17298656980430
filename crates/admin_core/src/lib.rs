//! Session and workflow core of the project-tracking admin console.
//!
//! [`WorkflowCoordinator`] owns the session state and the reference data
//! cache and talks to the facade through a [`RemoteDirectory`].

pub mod cache;
pub mod coordinator;
pub mod directory;
pub mod error;
pub mod forms;
pub mod session;

pub use cache::ReferenceDataCache;
pub use coordinator::{
    ProjectCreated, ProjectCreationView, ProjectDetails, TaskCreated, TaskListView,
    TaskManagementView, WorkflowCoordinator, WorkflowStep,
};
pub use directory::{DirectoryOptions, HttpDirectory, RemoteDirectory, UnavailableDirectory};
pub use error::{DirectoryError, ValidationError, WorkflowError, WorkflowResult};
pub use forms::{parse_date, Credentials, ProjectDraft, TaskDraft};
pub use session::{ProjectSelection, SessionPhase, SessionState};
