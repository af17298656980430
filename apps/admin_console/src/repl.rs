//! Line-editor loop around [`Console`].

use std::path::PathBuf;

use admin_core::SessionPhase;
use rustyline::{error::ReadlineError, DefaultEditor};
use tracing::{debug, warn};

use crate::{command::parse_command, console::Console};

pub struct Repl {
    editor: DefaultEditor,
    console: Console,
    history_path: Option<PathBuf>,
}

impl Repl {
    pub fn new(console: Console, history_path: Option<PathBuf>) -> rustyline::Result<Self> {
        let mut editor = DefaultEditor::new()?;
        if let Some(path) = history_path.as_deref().filter(|path| path.exists()) {
            if let Err(err) = editor.load_history(path) {
                warn!(path = %path.display(), %err, "console: history not loaded");
            }
        }
        Ok(Self {
            editor,
            console,
            history_path,
        })
    }

    pub async fn run(&mut self) -> rustyline::Result<()> {
        println!("Type 'help' for commands.");

        loop {
            let prompt = prompt(&self.console.coordinator().phase());
            match self.editor.readline(&prompt) {
                Ok(line) => {
                    let command = match parse_command(&line) {
                        Ok(Some(command)) => command,
                        Ok(None) => continue,
                        Err(err) => {
                            println!("{err}");
                            continue;
                        }
                    };
                    if !command.is_sensitive() {
                        self.editor.add_history_entry(line.as_str())?;
                    }

                    let outcome = self.console.execute(command).await;
                    for line in &outcome.lines {
                        println!("{line}");
                    }
                    if outcome.quit {
                        break;
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                }
                Err(ReadlineError::Eof) => {
                    println!();
                    break;
                }
                Err(err) => return Err(err),
            }
        }

        if let Some(path) = &self.history_path {
            match self.editor.save_history(path) {
                Ok(()) => debug!(path = %path.display(), "console: history saved"),
                Err(err) => warn!(path = %path.display(), %err, "console: history not saved"),
            }
        }
        Ok(())
    }
}

fn prompt(phase: &SessionPhase) -> String {
    match phase {
        SessionPhase::LoggedOut => "admin> ".to_string(),
        SessionPhase::Authenticated(admin_id) => format!("admin #{admin_id}> "),
        SessionPhase::ProjectContext {
            admin_id,
            project_id,
        } => format!("admin #{admin_id} [project {project_id}]> "),
    }
}

#[cfg(test)]
mod tests {
    use shared::domain::{AdminId, ProjectId};

    use super::*;

    #[test]
    fn prompt_follows_session_phase() {
        assert_eq!(prompt(&SessionPhase::LoggedOut), "admin> ");
        assert_eq!(prompt(&SessionPhase::Authenticated(AdminId(7))), "admin #7> ");
        assert_eq!(
            prompt(&SessionPhase::ProjectContext {
                admin_id: AdminId(7),
                project_id: ProjectId(11),
            }),
            "admin #7 [project 11]> "
        );
    }
}
