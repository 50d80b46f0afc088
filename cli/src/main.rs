//! Terminal front end for the todo service.
//!
//! Everything the store deliberately leaves to its caller happens here:
//! descriptions are trimmed and rejected when empty, completion is flipped
//! from the item's current state, and nothing is dispatched while the
//! matching busy token is set.

use anyhow::bail;
use clap::{Parser, Subcommand};
use todo_core::{
    ClientConfig, OperationKind, RemoteCollection, TodoCollection, TodoItem, TodoStore,
    UreqTransport,
};
use tracing_subscriber::EnvFilter;

const EMPTY_DESCRIPTION: &str = "Description cannot be empty.";

#[derive(Parser, Debug)]
#[command(name = "todo", about = "Manage todos on a remote todo service")]
struct Cli {
    /// Backend address; falls back to $TODO_API_BASE, then http://localhost:8000
    #[arg(long)]
    base_url: Option<String>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show all todos (the default)
    List,
    /// Add a todo; remaining arguments are joined with spaces
    Add {
        #[arg(required = true)]
        description: Vec<String>,
    },
    /// Flip the completion flag of a todo
    Toggle { id: String },
    /// Delete a todo
    Remove { id: String },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let base_url = cli
        .base_url
        .unwrap_or_else(|| ClientConfig::from_env().base_url);
    tracing::debug!(%base_url, "connecting");

    let store = TodoStore::mount(RemoteCollection::new(&base_url, UreqTransport::new())).await;
    run(&store, cli.command.unwrap_or(Command::List)).await?;

    print!("{}", render(&store.items()));
    if let Some(error) = store.last_error() {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
    Ok(())
}

async fn run<C: TodoCollection>(store: &TodoStore<C>, command: Command) -> anyhow::Result<()> {
    match command {
        Command::List => {}
        Command::Add { description } => {
            let description = validate_description(&description.join(" "))?;
            ensure_idle(store, OperationKind::Add)?;
            store.add_todo(&description).await;
        }
        Command::Toggle { id } => {
            let todo = find_item(store, &id)?;
            ensure_idle(store, OperationKind::Update)?;
            store.toggle_todo_completed(&todo.id, !todo.completed).await;
        }
        Command::Remove { id } => {
            ensure_idle(store, OperationKind::Delete)?;
            store.remove_todo(&id).await;
        }
    }
    Ok(())
}

/// A failed load leaves the list empty, so report why before blaming the id.
fn find_item<C: TodoCollection>(store: &TodoStore<C>, id: &str) -> anyhow::Result<TodoItem> {
    if let Some(todo) = store.item(id) {
        return Ok(todo);
    }
    match store.last_error() {
        Some(error) => bail!("could not load todos: {error}"),
        None => bail!("no todo with id {id}"),
    }
}

fn validate_description(raw: &str) -> anyhow::Result<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        bail!(EMPTY_DESCRIPTION);
    }
    Ok(trimmed.to_string())
}

fn ensure_idle<C: TodoCollection>(store: &TodoStore<C>, kind: OperationKind) -> anyhow::Result<()> {
    if store.is_busy(kind) {
        bail!("a {kind:?} operation is already in flight");
    }
    Ok(())
}

fn render(items: &[TodoItem]) -> String {
    if items.is_empty() {
        return "No todos yet. Add your first one!\n".to_string();
    }
    items
        .iter()
        .map(|t| {
            let mark = if t.completed { 'x' } else { ' ' };
            format!("[{mark}] {}  ({})\n", t.description, t.id)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    use todo_core::{ApiError, OperationResult};

    /// Backend that fails every call the way an unreachable server does.
    struct Unreachable;

    impl TodoCollection for Unreachable {
        async fn list(&self) -> OperationResult<Vec<TodoItem>> {
            Err(ApiError::transport("connection refused"))
        }

        async fn create(&self, _description: &str) -> OperationResult<TodoItem> {
            Err(ApiError::transport("connection refused"))
        }

        async fn remove(&self, _id: &str) -> OperationResult<()> {
            Err(ApiError::transport("connection refused"))
        }

        async fn set_completed(&self, _id: &str, _completed: bool) -> OperationResult<TodoItem> {
            Err(ApiError::transport("connection refused"))
        }
    }

    #[tokio::test]
    async fn toggle_after_failed_load_reports_load_error() {
        let store = TodoStore::mount(Unreachable).await;
        let err = run(&store, Command::Toggle { id: "a".to_string() })
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "could not load todos: connection refused");
    }

    #[tokio::test]
    async fn toggle_of_unknown_id_after_good_load() {
        struct Empty;

        impl TodoCollection for Empty {
            async fn list(&self) -> OperationResult<Vec<TodoItem>> {
                Ok(Vec::new())
            }

            async fn create(&self, _description: &str) -> OperationResult<TodoItem> {
                Err(ApiError::transport("unused"))
            }

            async fn remove(&self, _id: &str) -> OperationResult<()> {
                Ok(())
            }

            async fn set_completed(&self, _id: &str, _completed: bool) -> OperationResult<TodoItem> {
                Err(ApiError::transport("unused"))
            }
        }

        let store = TodoStore::mount(Empty).await;
        let err = find_item(&store, "a").unwrap_err();
        assert_eq!(err.to_string(), "no todo with id a");
    }

    #[test]
    fn description_is_trimmed() {
        assert_eq!(validate_description("  buy milk \n").unwrap(), "buy milk");
    }

    #[test]
    fn blank_description_is_rejected() {
        let err = validate_description("   ").unwrap_err();
        assert_eq!(err.to_string(), EMPTY_DESCRIPTION);
    }

    #[test]
    fn render_marks_completed_items() {
        let items = vec![
            TodoItem {
                id: "a".to_string(),
                description: "done".to_string(),
                completed: true,
            },
            TodoItem {
                id: "b".to_string(),
                description: "open".to_string(),
                completed: false,
            },
        ];
        assert_eq!(render(&items), "[x] done  (a)\n[ ] open  (b)\n");
    }

    #[test]
    fn render_empty_list() {
        assert_eq!(render(&[]), "No todos yet. Add your first one!\n");
    }

    #[test]
    fn add_joins_words() {
        let cli = Cli::parse_from(["todo", "add", "buy", "milk"]);
        match cli.command {
            Some(Command::Add { description }) => assert_eq!(description.join(" "), "buy milk"),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn no_subcommand_means_list() {
        let cli = Cli::parse_from(["todo", "--base-url", "http://h:1"]);
        assert!(cli.command.is_none());
        assert_eq!(cli.base_url.as_deref(), Some("http://h:1"));
    }
}
