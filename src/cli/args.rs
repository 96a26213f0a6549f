use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use serde::{Deserialize, Serialize};

use crate::config::HOME_ENV;
use crate::features::projects::{Priority, TaskStatus};
use crate::features::timelog::ChartPeriod;
use crate::features::timer::TimerMode;

#[derive(Parser)]
#[command(name = "quickdev")]
#[command(about = "A pomodoro work timer that logs time against your projects and tasks")]
#[command(long_about = "quickdev - a developer work timer

Run pomodoros in the terminal and log the time you spend on projects and
tasks. Time logs can be listed, summarised and charted afterwards.

QUICK START:
  quickdev project add \"Dashboard\"        Create a project
  quickdev timer --project Dashboard      Start the interactive timer
  quickdev log list                       Show logged time by day
  quickdev summary                        Totals for today and this week

OUTPUT FORMATS:
  --output pretty    Human-readable colored output (default)
  --output json      Machine-readable JSON for scripting

For more information on a specific command, run:
  quickdev <command> --help")]
#[command(version, propagate_version = true)]
pub struct Cli {
    /// Output format for command results
    ///
    /// Use 'pretty' for human-readable colored output, or 'json' for
    /// machine-readable output suitable for scripting. Defaults to the
    /// `general.default_output` config setting.
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Data directory holding config.yaml and quickdev.db
    #[arg(long, env = HOME_ENV, global = true)]
    pub home: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for command results.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable colored output.
    #[default]
    Pretty,
    /// Machine-readable JSON output.
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the interactive work timer
    ///
    /// Opens a full-screen pomodoro timer. Work time accrues while a
    /// pomodoro runs and is logged when you reset it or quit.
    ///
    /// # Keys
    ///
    ///   space/s    Start or pause
    ///   r          Reset (logs the accrued time)
    ///   1/2/3      Pomodoro / short break / long break
    ///   p/t        Cycle project / task
    ///   q/Esc      Quit
    ///
    /// # Examples
    ///
    ///   quickdev timer
    ///   quickdev timer --project Dashboard --task 1a2b3c4d
    ///   quickdev timer --mode short
    #[command(alias = "t")]
    Timer(TimerArgs),

    /// Manage projects
    #[command(alias = "p")]
    Project(ProjectArgs),

    /// Manage tasks within projects
    Task(TaskArgs),

    /// List, add and remove time logs
    #[command(alias = "l")]
    Log(LogArgs),

    /// Show logged time for today, this week and per project
    ///
    /// Weeks start on Sunday. Time logged against deleted projects is
    /// listed as "Unknown Project".
    #[command(alias = "s")]
    Summary,

    /// Draw a bar chart of work hours
    ///
    /// # Examples
    ///
    ///   quickdev chart                 Last 7 days by weekday
    ///   quickdev chart --period month  Last 30 days by day of month
    ///   quickdev chart -p year         Last 12 months by month
    Chart {
        /// Period to chart (week, month, year)
        #[arg(long, short = 'p', default_value = "week")]
        period: ChartPeriod,
    },

    /// Show or create the configuration file
    Config(ConfigArgs),

    /// Generate shell completions
    ///
    /// Outputs a completion script for the specified shell.
    ///
    /// Example: quickdev completions bash > ~/.bash_completion.d/quickdev
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,

        /// Show installation instructions instead of the script
        #[arg(long, short = 'i')]
        install: bool,
    },
}

/// Arguments for the interactive timer.
#[derive(Args, Debug, Default)]
pub struct TimerArgs {
    /// Project to log time against (ID, ID prefix or name)
    #[arg(long, short = 'p')]
    pub project: Option<String>,

    /// Task to log time against (ID or ID prefix)
    #[arg(long, short = 't')]
    pub task: Option<String>,

    /// Notes stored with each time log
    #[arg(long, short = 'n')]
    pub notes: Option<String>,

    /// Mode to start in (pomodoro, short, long)
    #[arg(long, short = 'm')]
    pub mode: Option<TimerMode>,
}

#[derive(Args)]
pub struct ProjectArgs {
    #[command(subcommand)]
    pub command: ProjectCommands,
}

#[derive(Subcommand)]
pub enum ProjectCommands {
    /// List all projects with their logged time
    ///
    /// Most recently opened projects come first.
    List,

    /// Add a new project
    ///
    /// # Examples
    ///
    ///   quickdev project add "Dashboard"
    ///   quickdev project add "Docs site" --color "#10b981" --description "Public docs"
    Add(AddProjectArgs),

    /// Show a project with its tasks and progress
    Show {
        /// Project ID, ID prefix or name
        id: String,
    },

    /// Change a project's details
    ///
    /// Inactive projects are hidden from the timer unless selected with
    /// --project.
    ///
    /// # Examples
    ///
    ///   quickdev project edit Dashboard --name "Admin dashboard"
    ///   quickdev project edit Docs --inactive
    Edit(EditProjectArgs),

    /// Delete a project and its tasks
    ///
    /// Time logs keep pointing at the removed project and are reported
    /// as "Unknown Project".
    Remove {
        /// Project ID, ID prefix or name
        id: String,
    },
}

#[derive(Args)]
pub struct AddProjectArgs {
    /// Project name
    pub name: String,

    /// Short description
    #[arg(short, long, default_value = "")]
    pub description: String,

    /// Color as #rgb or #rrggbb
    #[arg(short, long)]
    pub color: Option<String>,

    /// Icon name or emoji
    #[arg(short, long, default_value = "")]
    pub icon: String,
}

#[derive(Args)]
pub struct EditProjectArgs {
    /// Project ID, ID prefix or name
    pub id: String,

    /// New name
    #[arg(long)]
    pub name: Option<String>,

    /// New description
    #[arg(short, long)]
    pub description: Option<String>,

    /// New color as #rgb or #rrggbb
    #[arg(short, long)]
    pub color: Option<String>,

    /// New icon name or emoji
    #[arg(short, long)]
    pub icon: Option<String>,

    /// Show the project in the timer again
    #[arg(long, conflicts_with = "inactive")]
    pub active: bool,

    /// Hide the project from the timer
    #[arg(long)]
    pub inactive: bool,
}

#[derive(Args)]
pub struct TaskArgs {
    #[command(subcommand)]
    pub command: TaskCommands,
}

#[derive(Subcommand)]
pub enum TaskCommands {
    /// List tasks in board order
    List {
        /// Only tasks of this project (ID, ID prefix or name)
        #[arg(long, short = 'p')]
        project: Option<String>,

        /// Include completed tasks
        #[arg(long, short = 'a')]
        all: bool,
    },

    /// Add a task at the end of a project
    ///
    /// # Examples
    ///
    ///   quickdev task add "Login form" --project Dashboard
    ///   quickdev task add "Release notes" -p Docs --priority high --due tomorrow
    Add(AddTaskArgs),

    /// Show a task
    Show {
        /// Task ID or ID prefix
        id: String,
    },

    /// Change a task's title, description, priority or due date
    ///
    /// # Examples
    ///
    ///   quickdev task edit 1a2b3c4d --title "Login and signup"
    ///   quickdev task edit 1a2b3c4d --priority low --no-due
    Edit(EditTaskArgs),

    /// Change a task's status (not-started, in-progress, completed)
    Status {
        /// Task ID or ID prefix
        id: String,

        /// New status
        status: TaskStatus,
    },

    /// Move a task to a position within its project (0 is first)
    Move {
        /// Task ID or ID prefix
        id: String,

        /// New position
        position: u32,
    },

    /// Delete a task
    Remove {
        /// Task ID or ID prefix
        id: String,
    },
}

#[derive(Args)]
pub struct AddTaskArgs {
    /// Task title
    pub title: String,

    /// Project the task belongs to (ID, ID prefix or name)
    #[arg(long, short = 'p')]
    pub project: String,

    /// Priority (low, medium, high)
    #[arg(long, default_value = "medium")]
    pub priority: Priority,

    /// Due date (YYYY-MM-DD, today, tomorrow, in 3 days)
    #[arg(long)]
    pub due: Option<String>,

    /// Longer description
    #[arg(long, short = 'd', default_value = "")]
    pub description: String,
}

#[derive(Args)]
pub struct EditTaskArgs {
    /// Task ID or ID prefix
    pub id: String,

    /// New title
    #[arg(long)]
    pub title: Option<String>,

    /// New description
    #[arg(long, short = 'd')]
    pub description: Option<String>,

    /// New priority (low, medium, high)
    #[arg(long)]
    pub priority: Option<Priority>,

    /// New due date (YYYY-MM-DD, today, tomorrow, in 3 days)
    #[arg(long, conflicts_with = "no_due")]
    pub due: Option<String>,

    /// Clear the due date
    #[arg(long)]
    pub no_due: bool,
}

#[derive(Args)]
pub struct LogArgs {
    #[command(subcommand)]
    pub command: LogCommands,
}

#[derive(Subcommand)]
pub enum LogCommands {
    /// List time logs grouped by day, newest first
    List {
        /// Maximum number of logs to show
        #[arg(long, short = 'n', default_value = "50")]
        limit: usize,

        /// Only logs of this project (ID, ID prefix or name)
        #[arg(long, short = 'p')]
        project: Option<String>,
    },

    /// Log time by hand
    ///
    /// # Examples
    ///
    ///   quickdev log add --project Dashboard --duration 25m
    ///   quickdev log add -p Docs -d 1h30m --start "2024-03-15 09:00" --notes "Outline"
    Add(AddLogArgs),

    /// Delete a time log
    Remove {
        /// Time log ID or ID prefix
        id: String,
    },
}

#[derive(Args)]
pub struct AddLogArgs {
    /// Project the time was spent on (ID, ID prefix or name)
    #[arg(long, short = 'p')]
    pub project: String,

    /// Task the time was spent on (ID or ID prefix)
    #[arg(long, short = 't')]
    pub task: Option<String>,

    /// Duration (25m, 1h30m, 90s; a bare number means minutes)
    #[arg(long, short = 'd')]
    pub duration: String,

    /// Start time (RFC 3339 or "YYYY-MM-DD HH:MM" local); defaults to ending now
    #[arg(long, short = 's')]
    pub start: Option<String>,

    /// Notes
    #[arg(long, short = 'n', default_value = "")]
    pub notes: String,
}

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the effective configuration
    Show,

    /// Print the configuration file path
    Path,

    /// Write the default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long, short = 'f')]
        force: bool,
    },
}
