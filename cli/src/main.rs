//! Terminal front end for the todo service.
//!
//! Every command goes through `TodoView`, then prints what the view renders.

mod transport;

use anyhow::Result;
use clap::{Parser, Subcommand};
use todo_core::{TodoClient, TodoView, Transport};
use tracing_subscriber::EnvFilter;

use crate::transport::UreqTransport;

#[derive(Parser, Debug)]
#[command(name = "todo", version, about = "Manage todos on a todo server")]
struct Cli {
    /// Base URL of the todo server
    #[arg(long, env = "TODO_API_URL", default_value = "http://127.0.0.1:3000")]
    url: String,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Command {
    /// Show all todos (default)
    List,
    /// Create a todo
    Add {
        /// Title words; joined with spaces
        #[arg(required = true, num_args = 1..)]
        title: Vec<String>,
    },
    /// Flip a todo between open and completed
    Toggle { id: u64 },
    /// Delete a todo
    #[command(alias = "delete")]
    Rm { id: u64 },
}

/// Run one command. Mutations refetch on success, so the view always ends
/// either populated from the server or in its error state.
fn run<T: Transport>(view: &mut TodoView<T>, command: Command) {
    let result = match command {
        Command::List => view.load(),
        Command::Add { title } => view.add(&title.join(" ")).map(drop),
        Command::Toggle { id } => view.toggle(id).map(drop),
        Command::Rm { id } => view.delete(id),
    };
    if let Err(err) = result {
        tracing::debug!(error = %err, "command failed");
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    let mut view = TodoView::new(TodoClient::new(&cli.url), UreqTransport::new());
    run(&mut view, cli.command.unwrap_or(Command::List));

    println!("{}", view.render());
    if view.is_error() {
        std::process::exit(1);
    }
    Ok(())
}
