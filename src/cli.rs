use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::model::Bucket;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "dayplan",
    version,
    about = "A local-first task tracker grouped by day.",
    after_help = "Examples:\n  dayplan add Write report --due 2024-06-10\n  dayplan add Plan trip --due fri\n  dayplan list --on 2024-06-14\n  dayplan done 3\n  dayplan delete 3 --yes"
)]
pub struct Cli {
    /// Override the data directory (defaults to platform-specific app dir)
    #[arg(long, value_name = "PATH", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Tracing filter directive (e.g. "info", "debug")
    #[arg(long = "log", value_name = "DIRECTIVE", global = true)]
    pub log_filter: Option<String>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum CliCommand {
    /// Create a task with a title and a due date
    Add(AddArgs),
    /// Toggle completion for a task by id
    Done(DoneArgs),
    /// Delete one or more tasks by id, asking for confirmation
    Delete(DeleteArgs),
    /// Show tasks grouped by Today / This week / Other
    List(ListArgs),
}

#[derive(Args, Debug, Clone)]
pub struct AddArgs {
    /// Task title
    #[arg(value_name = "TEXT", required = true)]
    pub text: Vec<String>,

    /// Due date (ISO e.g. 2024-06-10, today, tomorrow, +3d, mon)
    #[arg(long = "due", value_name = "DATE")]
    pub due: String,
}

#[derive(Args, Debug, Clone)]
pub struct DoneArgs {
    /// Task id
    #[arg(value_name = "ID")]
    pub id: u64,
}

#[derive(Args, Debug, Clone)]
pub struct DeleteArgs {
    /// Task ids to delete
    #[arg(value_name = "ID", required = true)]
    pub ids: Vec<u64>,

    /// Skip the confirmation prompt
    #[arg(long)]
    pub yes: bool,
}

#[derive(Args, Debug, Clone)]
pub struct ListArgs {
    /// Restrict output to a single bucket
    #[arg(long, value_enum, value_name = "BUCKET")]
    pub view: Option<Bucket>,

    /// Also show tasks due on this day (ISO date or today/tomorrow/+3d/mon)
    #[arg(long = "on", value_name = "DATE")]
    pub on: Option<String>,
}
