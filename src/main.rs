use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use log::{debug, LevelFilter};

use quickdev::cli::args::{Cli, Commands};
use quickdev::cli::commands;
use quickdev::config::{ColorSetting, Config, Paths};

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {:#}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp_secs()
        .init();
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let paths = match cli.home {
        Some(root) => Paths::with_root(root),
        None => Paths::new()?,
    };
    debug!("Using data directory {}", paths.root.display());

    let config = Config::load(&paths)?;
    match config.general.color {
        ColorSetting::Always => colored::control::set_override(true),
        ColorSetting::Never => colored::control::set_override(false),
        ColorSetting::Auto => {}
    }
    let format = cli.output.unwrap_or(config.general.default_output);

    let output = match cli.command {
        Commands::Timer(args) => {
            // stderr belongs to the TUI while it runs.
            if std::env::var_os("RUST_LOG").is_none() {
                log::set_max_level(LevelFilter::Off);
            }
            commands::timer(&paths, &config, &args, format)?
        }
        Commands::Project(args) => commands::project(&paths, args.command, format)?,
        Commands::Task(args) => commands::task(&paths, args.command, format)?,
        Commands::Log(args) => commands::log(&paths, args.command, format)?,
        Commands::Summary => commands::summary(&paths, format)?,
        Commands::Chart { period } => commands::chart(&paths, period, format)?,
        Commands::Config(args) => commands::config(&paths, args.command, format)?,
        Commands::Completions { shell, install } => commands::completions(shell, install)?,
    };

    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}
