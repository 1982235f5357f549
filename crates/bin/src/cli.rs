//! CLI argument definitions for the todokv binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Per-user todo lists in a single store file
#[derive(Parser, Debug)]
#[command(name = "todokv")]
#[command(about = "todokv: per-user todo lists in a single embedded store file")]
#[command(version)]
pub struct Cli {
    #[command(flatten)]
    pub store: StoreArgs,

    /// Print machine-readable JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a new account
    Signup(CredentialArgs),
    /// Show the account the given credentials sign in as
    Whoami(CredentialArgs),
    /// Manage the signed-in user's todos
    Todo(TodoArgs),
    /// Show store location and record counts
    Info,
}

/// Location of the store file, shared by every command
#[derive(clap::Args, Debug)]
pub struct StoreArgs {
    /// Path of the store file. Created on first use.
    #[arg(
        short = 'D',
        long = "db",
        default_value = "todos.redb",
        env = "TODOKV_DB",
        global = true
    )]
    pub db: PathBuf,
}

/// Username and password of the acting user
#[derive(clap::Args, Debug)]
pub struct CredentialArgs {
    #[arg(short, long, env = "TODOKV_USERNAME")]
    pub username: String,

    #[arg(short, long, env = "TODOKV_PASSWORD", hide_env_values = true)]
    pub password: String,
}

/// Arguments for the todo command
#[derive(clap::Args, Debug)]
pub struct TodoArgs {
    #[command(flatten)]
    pub credentials: CredentialArgs,

    #[command(subcommand)]
    pub action: TodoAction,
}

#[derive(Subcommand, Debug)]
pub enum TodoAction {
    /// Add a todo
    Add {
        title: String,

        #[arg(short, long, default_value = "")]
        description: String,

        /// Create the todo already completed
        #[arg(long)]
        completed: bool,
    },
    /// List todos, split into incomplete and complete
    List,
    /// Show one todo
    Get { id: u64 },
    /// Flip a todo between complete and incomplete
    Toggle { id: u64 },
    /// Delete a todo. Deleting a missing todo is not an error.
    Delete { id: u64 },
}
