mod commands;
mod logging;
mod render;

use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use birthcal_core::Config;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "birthcal", version)]
#[command(about = "Turn solar and lunar birthdays into an all-day .ics calendar")]
struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Config file (defaults to ~/.config/birthcal/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write every birthday occurrence to an .ics file
    Generate {
        /// Output file (overrides `output` from config)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Parse the configured birthdays and print how they were understood
    Check {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the occurrences of one person
    Show {
        name: String,

        /// First year to list
        #[arg(long)]
        from: Option<i32>,

        /// Last year to list
        #[arg(long)]
        to: Option<i32>,
    },
    /// Birthdays coming up from today
    Upcoming {
        /// How many days ahead to look
        #[arg(short, long, default_value_t = 30)]
        days: i64,
    },
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = load_config(cli.config)?;

    match cli.command {
        Commands::Generate { output } => commands::generate::run(&config, output),
        Commands::Check { json } => commands::check::run(&config, json),
        Commands::Show { name, from, to } => commands::show::run(&config, &name, from, to),
        Commands::Upcoming { days } => commands::upcoming::run(&config, days),
    }
}

fn load_config(path: Option<PathBuf>) -> Result<Config> {
    let path = match path {
        Some(path) => path,
        None => Config::default_path()?,
    };

    Config::load(&path).with_context(|| format!("Failed to load config from {}", path.display()))
}
