mod handlers;

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "grange", version, about = "Homestead maintenance, tracked")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Clone)]
enum Commands {
    /// Initialize the grange database
    Init,
    /// Manage farm areas
    Area {
        #[command(subcommand)]
        command: AreaCommands,
    },
    /// Add a new maintenance task
    Add {
        title: String,
        /// Recurrence interval in days
        #[arg(long, short = 'e')]
        every: i64,
        /// Area slug this task belongs to
        #[arg(long, short = 'a')]
        area: Option<String>,
        /// Explicit first due date (YYYY-MM-DD)
        #[arg(long)]
        due: Option<NaiveDate>,
        /// Mark the task as seasonal
        #[arg(long)]
        seasonal: bool,
        /// Months the task is in season (display only, e.g. "May-Sep")
        #[arg(long, requires = "seasonal")]
        months: Option<String>,
    },
    /// Record a completion for a task
    Done {
        task: String,
        /// Completion date (defaults to today)
        #[arg(long)]
        on: Option<NaiveDate>,
        #[arg(long)]
        note: Option<String>,
        /// Require exact ID or slug (no fuzzy matching)
        #[arg(long)]
        strict: bool,
    },
    /// Set or clear a one-cycle manual due date
    Defer {
        task: String,
        /// New due date (YYYY-MM-DD)
        #[arg(long, conflicts_with = "clear")]
        until: Option<NaiveDate>,
        /// Remove an existing override
        #[arg(long)]
        clear: bool,
        /// Require exact ID or slug (no fuzzy matching)
        #[arg(long)]
        strict: bool,
    },
    /// List all tasks with their derived status
    List {
        /// Only show tasks in this area
        #[arg(long, short = 'a')]
        area: Option<String>,
    },
    /// Show tasks that are overdue or due soon
    Due {
        #[arg(long)]
        json: bool,
    },
    /// Show an overview of the whole grange
    Status {
        #[arg(long)]
        json: bool,
    },
    /// Explain how a task's status was derived
    Why {
        task: String,
    },
    /// Show the chronological completion log
    History {
        /// Number of entries to show
        #[arg(long, default_value = "20")]
        limit: usize,
    },
    /// Import tasks from a JSON file of boundary records
    Import {
        file: PathBuf,
    },
    /// Export all tasks as boundary records to stdout
    Export,
}

#[derive(Subcommand, Clone)]
enum AreaCommands {
    /// Add a new farm area
    Add { name: String },
    /// List all areas
    List,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Init
        | Commands::Area { .. }
        | Commands::Add { .. }
        | Commands::Done { .. }
        | Commands::Defer { .. }
        | Commands::Import { .. } => dispatch_write_ops(cli.command),
        Commands::List { .. }
        | Commands::Due { .. }
        | Commands::Status { .. }
        | Commands::Why { .. }
        | Commands::History { .. }
        | Commands::Export => dispatch_read_ops(cli.command),
    }
}

fn dispatch_write_ops(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Init => handlers::init::handle(),
        Commands::Area { command } => match command {
            AreaCommands::Add { name } => handlers::area::handle_add(&name),
            AreaCommands::List => handlers::area::handle_list(),
        },
        Commands::Add {
            title,
            every,
            area,
            due,
            seasonal,
            months,
        } => handlers::add::handle(&title, every, area.as_deref(), due, seasonal, months.as_deref()),
        Commands::Done {
            task,
            on,
            note,
            strict,
        } => handlers::done::handle(&task, on, note.as_deref(), strict),
        Commands::Defer {
            task,
            until,
            clear,
            strict,
        } => handlers::defer::handle(&task, until, clear, strict),
        Commands::Import { file } => handlers::import::handle(&file),
        _ => unreachable!("Invalid write command dispatch"),
    }
}

fn dispatch_read_ops(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::List { area } => handlers::list::handle(area.as_deref()),
        Commands::Due { json } => handlers::due::handle(json),
        Commands::Status { json } => handlers::status::handle(json),
        Commands::Why { task } => handlers::why::handle(&task),
        Commands::History { limit } => handlers::history::handle(limit),
        Commands::Export => handlers::export::handle(),
        _ => unreachable!("Invalid read command dispatch"),
    }
}
