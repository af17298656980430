use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(pub i64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_newtype!(AdminId);
id_newtype!(CustomerId);
id_newtype!(ProjectId);
id_newtype!(TeamId);
id_newtype!(TaskId);

impl AdminId {
    /// Id the facade answers with when credentials are rejected.
    pub const UNAUTHENTICATED: AdminId = AdminId(0);

    pub fn is_authenticated(self) -> bool {
        self != Self::UNAUTHENTICATED
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub project_id: ProjectId,
    pub name: String,
    pub expected_start_date: NaiveDate,
    pub expected_end_date: NaiveDate,
    pub customer: Customer,
    pub owner_admin_id: AdminId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub team_id: TeamId,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Pending,
    InProgress,
    Done,
    #[serde(other)]
    Unknown,
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TaskStatus::Pending => "pending",
            TaskStatus::InProgress => "in progress",
            TaskStatus::Done => "done",
            TaskStatus::Unknown => "unknown",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub task_id: TaskId,
    pub name: String,
    pub status: TaskStatus,
    pub expected_start_date: NaiveDate,
    pub expected_end_date: NaiveDate,
    pub project_id: ProjectId,
    pub team_id: TeamId,
}

impl Task {
    pub fn name_and_status(&self) -> String {
        format!("{} ({})", self.name, self.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_admin_id_is_unauthenticated() {
        assert!(!AdminId(0).is_authenticated());
        assert!(AdminId(7).is_authenticated());
    }

    #[test]
    fn unknown_task_status_is_preserved_as_unknown() {
        let status: TaskStatus = serde_json::from_str("\"blocked\"").expect("status");
        assert_eq!(status, TaskStatus::Unknown);
        let status: TaskStatus = serde_json::from_str("\"in_progress\"").expect("status");
        assert_eq!(status, TaskStatus::InProgress);
    }

    #[test]
    fn task_renders_name_and_status() {
        let task = Task {
            task_id: TaskId(1),
            name: "Design".into(),
            status: TaskStatus::InProgress,
            expected_start_date: NaiveDate::from_ymd_opt(2024, 1, 5).expect("date"),
            expected_end_date: NaiveDate::from_ymd_opt(2024, 2, 1).expect("date"),
            project_id: ProjectId(1),
            team_id: TeamId(2),
        };
        assert_eq!(task.name_and_status(), "Design (in progress)");
    }
}
