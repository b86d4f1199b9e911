use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand, ValueEnum};
use colored::{ColoredString, Colorize};
use eyre::Result;
use std::path::PathBuf;
use std::process;
use todolist::{DEFAULT_FILE_NAME, Priority, Status, StoreError, Task, TaskPatch, TaskStore, parse};
use tracing::Level;

#[derive(Parser)]
#[command(name = "todolist")]
#[command(about = "Todolist CLI - Track tasks in a local JSON file")]
#[command(version)]
struct Cli {
    /// Path to the task file
    #[arg(short, long, default_value = DEFAULT_FILE_NAME)]
    file: PathBuf,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a task (due today and MEDIUM priority unless given)
    Add {
        #[arg(value_parser = non_blank_title)]
        title: String,

        #[arg(short, long, default_value = "")]
        description: String,

        /// Due date, YYYY-MM-DD
        #[arg(long, value_parser = parse::required_date)]
        due: Option<NaiveDate>,

        /// LOW, MEDIUM or HIGH
        #[arg(short, long)]
        priority: Option<Priority>,
    },

    /// Edit a task; omitted fields keep their value
    Edit {
        #[arg(value_parser = parse::parse_id)]
        id: u64,

        #[arg(long, value_parser = non_blank_title)]
        title: Option<String>,

        #[arg(long)]
        description: Option<String>,

        #[arg(long, value_parser = parse::required_date)]
        due: Option<NaiveDate>,

        #[arg(long)]
        priority: Option<Priority>,

        /// TODO, IN_PROGRESS or DONE
        #[arg(long)]
        status: Option<Status>,
    },

    /// Delete a task
    Delete {
        #[arg(value_parser = parse::parse_id)]
        id: u64,
    },

    /// List all tasks
    List {
        /// Order the listing without saving it
        #[arg(long)]
        sort: Option<SortKey>,
    },

    /// List tasks past their due date that are not done
    Overdue,

    /// List done tasks
    Done,

    /// Search title and description, or match a priority or status name
    Search { keyword: String },

    /// Sort tasks and save the new order
    Sort { by: SortKey },
}

#[derive(Clone, Copy, ValueEnum)]
enum SortKey {
    Date,
    Priority,
}

fn non_blank_title(input: &str) -> Result<String, String> {
    parse::non_blank(input).ok_or_else(|| "Task title cannot be empty".to_string())
}

fn main() {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .init();

    if let Err(e) = run(cli) {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut store = TaskStore::open(&cli.file);
    report_warnings(&mut store);

    let outcome = execute(&mut store, cli.command);
    report_warnings(&mut store);
    outcome
}

fn execute(store: &mut TaskStore, command: Commands) -> Result<()> {
    match command {
        Commands::Add {
            title,
            description,
            due,
            priority,
        } => {
            let due = due.unwrap_or_else(|| Local::now().date_naive());
            let priority = priority.unwrap_or(Priority::Medium);
            let task = store.add(&title, &description, due, priority)?;
            println!("{} Added task {}", "✓".green(), task.id());
            println!("{}", paint(&task));
        }
        Commands::Edit {
            id,
            title,
            description,
            due,
            priority,
            status,
        } => {
            let patch = TaskPatch {
                title,
                description,
                due_date: due,
                priority,
                status,
            };
            let unchanged = patch.is_empty();
            let task = store.edit(id, patch)?;
            if unchanged {
                println!("Nothing to change for task {}", task.id());
                return Ok(());
            }
            println!("{} Updated task {}", "✓".green(), task.id());
            println!("{}", paint(&task));
        }
        Commands::Delete { id } => {
            let task = store.delete(id)?;
            println!("{} Deleted task {}", "✓".green(), task.id());
        }
        Commands::List { sort } => {
            if let Some(key) = sort {
                sort_store(store, key);
            }
            print_tasks(store.list(), "No tasks");
        }
        Commands::Overdue => print_tasks(&store.list_overdue(), "No overdue tasks"),
        Commands::Done => print_tasks(&store.list_done(), "No done tasks"),
        Commands::Search { keyword } => print_tasks(&store.search(&keyword)?, "Nothing found"),
        Commands::Sort { by } => {
            sort_store(store, by);
            store.save()?;
            print_tasks(store.list(), "No tasks");
        }
    }

    Ok(())
}

fn sort_store(store: &mut TaskStore, key: SortKey) {
    match key {
        SortKey::Date => store.sort_by_date(),
        SortKey::Priority => store.sort_by_priority(),
    }
}

fn print_tasks(tasks: &[Task], empty_message: &str) {
    if tasks.is_empty() {
        println!("{empty_message}");
        return;
    }
    for task in tasks {
        println!("{}\n", paint(task));
    }
}

fn paint(task: &Task) -> ColoredString {
    let text = task.to_string();
    match task.priority {
        Priority::High => text.as_str().red(),
        Priority::Medium => text.as_str().yellow(),
        Priority::Low => text.as_str().green(),
    }
}

fn report_warnings(store: &mut TaskStore) {
    for warning in store.take_warnings() {
        let kind = match warning {
            StoreError::DataIntegrity { .. } => "Data integrity",
            _ => "Warning",
        };
        eprintln!("{} {}", format!("{kind}:").as_str().yellow(), warning);
    }
}
