//! Form inputs the presentation layer fills in before submitting a command.
//!
//! Drafts are handed to the coordinator by `&mut`; they are cleared only after
//! the remote call succeeds.

use std::fmt;

use chrono::{DateTime, NaiveDate};
use shared::domain::{CustomerId, TeamId};
use zeroize::Zeroize;

use crate::error::ValidationError;

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

pub fn parse_date(raw: &str) -> Result<NaiveDate, ValidationError> {
    let raw = raw.trim();
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(raw, format) {
            return Ok(date);
        }
    }
    DateTime::parse_from_rfc3339(raw)
        .map(|timestamp| timestamp.date_naive())
        .map_err(|_| ValidationError::InvalidDate)
}

fn required_name(raw: &str) -> Result<String, ValidationError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(ValidationError::NameRequired);
    }
    Ok(name.to_string())
}

fn date_range(start: &str, end: &str) -> Result<(NaiveDate, NaiveDate), ValidationError> {
    Ok((parse_date(start)?, parse_date(end)?))
}

#[derive(Default, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.username.is_empty() && self.password.is_empty()
    }

    pub fn clear(&mut self) {
        self.username.clear();
        self.password.zeroize();
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl Drop for Credentials {
    fn drop(&mut self) {
        self.password.zeroize();
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ValidProject {
    pub name: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub customer_id: CustomerId,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ProjectDraft {
    pub name: String,
    pub start: String,
    pub end: String,
    pub customer: Option<CustomerId>,
}

impl ProjectDraft {
    pub fn new(
        name: impl Into<String>,
        start: impl Into<String>,
        end: impl Into<String>,
        customer: Option<CustomerId>,
    ) -> Self {
        Self {
            name: name.into(),
            start: start.into(),
            end: end.into(),
            customer,
        }
    }

    /// Checks run in order: name, dates, customer.
    pub(crate) fn validate(&self) -> Result<ValidProject, ValidationError> {
        let name = required_name(&self.name)?;
        let (start, end) = date_range(&self.start, &self.end)?;
        let customer_id = self.customer.ok_or(ValidationError::CustomerRequired)?;
        Ok(ValidProject {
            name,
            start,
            end,
            customer_id,
        })
    }

    pub fn reset(&mut self, default_customer: Option<CustomerId>) {
        self.name.clear();
        self.start.clear();
        self.end.clear();
        self.customer = default_customer;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ValidTask {
    pub name: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub team_id: TeamId,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    pub name: String,
    pub start: String,
    pub end: String,
    pub team: Option<TeamId>,
}

impl TaskDraft {
    pub fn new(
        name: impl Into<String>,
        start: impl Into<String>,
        end: impl Into<String>,
        team: Option<TeamId>,
    ) -> Self {
        Self {
            name: name.into(),
            start: start.into(),
            end: end.into(),
            team,
        }
    }

    /// Checks run in order: name, team, dates.
    pub(crate) fn validate(&self) -> Result<ValidTask, ValidationError> {
        let name = required_name(&self.name)?;
        let team_id = self.team.ok_or(ValidationError::TeamRequired)?;
        let (start, end) = date_range(&self.start, &self.end)?;
        Ok(ValidTask {
            name,
            start,
            end,
            team_id,
        })
    }

    pub fn reset(&mut self, default_team: Option<TeamId>) {
        self.name.clear();
        self.start.clear();
        self.end.clear();
        self.team = default_team;
    }
}
