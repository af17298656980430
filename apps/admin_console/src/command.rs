//! Parsing of console input lines into coordinator commands.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    Login {
        username: String,
        password: String,
    },
    Logout,
    EnterProjectCreation,
    CreateProject {
        name: String,
        start: String,
        end: String,
        customer: Option<i64>,
    },
    EnterTaskManagement,
    SelectProject(usize),
    CreateTask {
        name: String,
        start: String,
        end: String,
        team: Option<i64>,
    },
    Status,
    Help,
    Quit,
}

impl ConsoleCommand {
    /// Commands carrying secrets stay out of the line-editor history.
    pub fn is_sensitive(&self) -> bool {
        matches!(self, ConsoleCommand::Login { .. })
    }

    pub fn name(&self) -> &'static str {
        match self {
            ConsoleCommand::Login { .. } => "login",
            ConsoleCommand::Logout => "logout",
            ConsoleCommand::EnterProjectCreation => "projects new",
            ConsoleCommand::CreateProject { .. } => "project",
            ConsoleCommand::EnterTaskManagement => "tasks",
            ConsoleCommand::SelectProject(_) => "select",
            ConsoleCommand::CreateTask { .. } => "task",
            ConsoleCommand::Status => "status",
            ConsoleCommand::Help => "help",
            ConsoleCommand::Quit => "quit",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("unknown command '{0}', type 'help'")]
    Unknown(String),
    #[error("usage: {0}")]
    Usage(&'static str),
    #[error("unbalanced quotes or trailing escape")]
    UnbalancedQuotes,
    #[error("'{0}' is not a number")]
    InvalidNumber(String),
}

pub const HELP: &str = "\
commands:
  login <username> <password>
  logout
  projects new                                  list customers for a new project
  project <name> <start> <end> [customer-id]    create a project
  tasks                                         list projects, teams and tasks
  select <index>                                select a project from the list
  task <name> <start> <end> [team-id]           create a task in the selected project
  status
  help
  quit
dates: YYYY-MM-DD; quote names that contain spaces";

/// Shell-style word splitting; `""` yields an empty word.
pub fn tokenize(line: &str) -> Result<Vec<String>, CommandError> {
    shlex::split(line).ok_or(CommandError::UnbalancedQuotes)
}

fn parse_id(raw: Option<&String>) -> Result<Option<i64>, CommandError> {
    raw.map(|value| {
        value
            .parse::<i64>()
            .map_err(|_| CommandError::InvalidNumber(value.clone()))
    })
    .transpose()
}

/// Blank lines parse to `None`.
pub fn parse_command(line: &str) -> Result<Option<ConsoleCommand>, CommandError> {
    let tokens = tokenize(line)?;
    let Some((head, args)) = tokens.split_first() else {
        return Ok(None);
    };

    let command = match (head.as_str(), args) {
        ("login", [username, password]) => ConsoleCommand::Login {
            username: username.clone(),
            password: password.clone(),
        },
        ("login", _) => return Err(CommandError::Usage("login <username> <password>")),
        ("logout", []) => ConsoleCommand::Logout,
        ("projects", [sub]) if sub == "new" => ConsoleCommand::EnterProjectCreation,
        ("projects", _) => return Err(CommandError::Usage("projects new")),
        ("project", [name, start, end, rest @ ..]) if rest.len() <= 1 => {
            ConsoleCommand::CreateProject {
                name: name.clone(),
                start: start.clone(),
                end: end.clone(),
                customer: parse_id(rest.first())?,
            }
        }
        ("project", _) => {
            return Err(CommandError::Usage(
                "project <name> <start> <end> [customer-id]",
            ))
        }
        ("tasks", []) => ConsoleCommand::EnterTaskManagement,
        ("select", [index]) => ConsoleCommand::SelectProject(
            index
                .parse::<usize>()
                .map_err(|_| CommandError::InvalidNumber(index.clone()))?,
        ),
        ("select", _) => return Err(CommandError::Usage("select <index>")),
        ("task", [name, start, end, rest @ ..]) if rest.len() <= 1 => ConsoleCommand::CreateTask {
            name: name.clone(),
            start: start.clone(),
            end: end.clone(),
            team: parse_id(rest.first())?,
        },
        ("task", _) => return Err(CommandError::Usage("task <name> <start> <end> [team-id]")),
        ("status", []) => ConsoleCommand::Status,
        ("help", _) => ConsoleCommand::Help,
        ("quit" | "exit", []) => ConsoleCommand::Quit,
        (other, _) => return Err(CommandError::Unknown(other.to_string())),
    };
    Ok(Some(command))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenizer_groups_quoted_words() {
        assert_eq!(
            tokenize(r#"project "Road map" 2024-01-01 2024-06-01"#).expect("tokens"),
            vec!["project", "Road map", "2024-01-01", "2024-06-01"]
        );
        assert_eq!(
            tokenize(r#"task "" 2024-01-05 2024-02-01"#).expect("tokens"),
            vec!["task", "", "2024-01-05", "2024-02-01"]
        );
        assert_eq!(tokenize(r#"login "admin"#), Err(CommandError::UnbalancedQuotes));
        assert_eq!(
            tokenize(r#"login admin pass\ word"#).expect("tokens"),
            vec!["login", "admin", "pass word"]
        );
    }

    #[test]
    fn parses_workflow_commands() {
        assert_eq!(parse_command("   "), Ok(None));
        assert_eq!(
            parse_command("login admin correctpw"),
            Ok(Some(ConsoleCommand::Login {
                username: "admin".into(),
                password: "correctpw".into(),
            }))
        );
        assert_eq!(
            parse_command("project Roadmap 2024-01-01 2024-06-01 3"),
            Ok(Some(ConsoleCommand::CreateProject {
                name: "Roadmap".into(),
                start: "2024-01-01".into(),
                end: "2024-06-01".into(),
                customer: Some(3),
            }))
        );
        assert_eq!(
            parse_command("task Design 2024-01-05 2024-02-01"),
            Ok(Some(ConsoleCommand::CreateTask {
                name: "Design".into(),
                start: "2024-01-05".into(),
                end: "2024-02-01".into(),
                team: None,
            }))
        );
        assert_eq!(
            parse_command("select 2"),
            Ok(Some(ConsoleCommand::SelectProject(2)))
        );
        assert_eq!(
            parse_command("projects new"),
            Ok(Some(ConsoleCommand::EnterProjectCreation))
        );
    }

    #[test]
    fn only_login_is_sensitive() {
        let login = parse_command("login admin correctpw").expect("parse").expect("command");
        assert!(login.is_sensitive());
        assert!(!ConsoleCommand::Status.is_sensitive());
    }

    #[test]
    fn reports_usage_and_bad_numbers() {
        assert!(matches!(
            parse_command("login admin"),
            Err(CommandError::Usage(_))
        ));
        assert_eq!(
            parse_command("select first"),
            Err(CommandError::InvalidNumber("first".into()))
        );
        assert_eq!(
            parse_command("task Design 2024-01-05 2024-02-01 two"),
            Err(CommandError::InvalidNumber("two".into()))
        );
        assert_eq!(
            parse_command("frobnicate"),
            Err(CommandError::Unknown("frobnicate".into()))
        );
    }
}
