//! Terminal presentation: turns input lines into intents and the view state
//! into text.

use std::fmt::Write;

use crate::controller::SyncController;
use crate::error::SyncError;
use crate::store::ViewState;
use crate::transport::Transport;
use crate::types::TodoId;

pub const HELP: &str = "commands: add <title> | toggle <id> | delete <id> | list | quit";

/// Something the user asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Add(String),
    Toggle(TodoId),
    Delete(TodoId),
    Reload,
    Quit,
}

impl Intent {
    /// Parse one input line. Returns `None` for blank or unknown input.
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        let (command, rest) = match line.split_once(char::is_whitespace) {
            Some((command, rest)) => (command, rest.trim()),
            None => (line, ""),
        };
        match (command, rest) {
            ("add", title) => Some(Intent::Add(title.to_string())),
            ("toggle", id) if !id.is_empty() => Some(Intent::Toggle(TodoId::from(id))),
            ("delete", id) if !id.is_empty() => Some(Intent::Delete(TodoId::from(id))),
            ("list", "") => Some(Intent::Reload),
            ("quit" | "exit", "") => Some(Intent::Quit),
            _ => None,
        }
    }
}

/// Forward an intent to the controller. `Quit` is handled by the caller.
pub async fn dispatch<T: Transport>(controller: &SyncController<T>, intent: Intent) -> Result<(), SyncError> {
    match intent {
        Intent::Add(title) => controller.create(&title).await.map(|_| ()),
        Intent::Toggle(id) => controller.toggle(&id).await.map(|_| ()),
        Intent::Delete(id) => controller.delete(&id).await,
        Intent::Reload => controller.load_all().await,
        Intent::Quit => Ok(()),
    }
}

pub fn render(view: &ViewState) -> String {
    let mut out = String::from("Todo List\n");

    if let Some(error) = &view.error {
        let _ = writeln!(out, "! {error}");
    }

    if view.todos.is_empty() {
        if view.loading {
            out.push_str("Loading todos...\n");
        } else {
            out.push_str("No todos yet. Add one above to get started!\n");
        }
        return out;
    }

    for todo in &view.todos {
        let mark = if todo.completed { 'x' } else { ' ' };
        let _ = writeln!(out, "[{mark}] {}  ({})", todo.title, todo.id);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Todo;

    #[test]
    fn parses_commands() {
        assert_eq!(
            Intent::parse("add  Buy milk "),
            Some(Intent::Add("Buy milk".into()))
        );
        assert_eq!(Intent::parse("toggle 1"), Some(Intent::Toggle("1".into())));
        assert_eq!(Intent::parse("delete abc"), Some(Intent::Delete("abc".into())));
        assert_eq!(Intent::parse("list"), Some(Intent::Reload));
        assert_eq!(Intent::parse("quit"), Some(Intent::Quit));
    }

    #[test]
    fn add_without_title_still_reaches_controller() {
        // The controller owns the empty-title rule.
        assert_eq!(Intent::parse("add"), Some(Intent::Add(String::new())));
    }

    #[test]
    fn rejects_unknown_or_incomplete_input() {
        assert_eq!(Intent::parse(""), None);
        assert_eq!(Intent::parse("toggle"), None);
        assert_eq!(Intent::parse("frobnicate 1"), None);
        assert_eq!(Intent::parse("list everything"), None);
    }

    #[test]
    fn renders_empty_and_loading_states() {
        let idle = ViewState::default();
        assert!(render(&idle).contains("No todos yet"));

        let loading = ViewState {
            loading: true,
            ..ViewState::default()
        };
        assert!(render(&loading).contains("Loading todos..."));
    }

    #[test]
    fn renders_todos_and_error() {
        let view = ViewState {
            todos: vec![
                Todo {
                    id: "1".into(),
                    title: "Learn Rust".into(),
                    completed: true,
                },
                Todo {
                    id: "2".into(),
                    title: "Build Todo App".into(),
                    completed: false,
                },
            ],
            loading: false,
            error: Some("Failed to update todo".into()),
        };
        let text = render(&view);
        assert!(text.contains("! Failed to update todo"));
        assert!(text.contains("[x] Learn Rust  (1)"));
        assert!(text.contains("[ ] Build Todo App  (2)"));
    }
}
