//! Minefield - Entry Point
//!
//! Loads a scenario, starts a mission and reads operator commands from
//! stdin (or a script file) until the operator quits.

use clap::Parser;
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use minefield::command::{help_text, parse_command, CommandExecutor, MissionCommand};
use minefield::core::config::SessionSettings;
use minefield::core::error::Result;
use minefield::mission::{FileLog, LogSink, Mission, TracingLog};

/// Minefield clearance training mission
#[derive(Parser, Debug)]
#[command(name = "minefield")]
#[command(about = "Run a minefield clearance mission from a JSON scenario")]
struct Args {
    /// Scenario JSON file
    scenario: PathBuf,

    /// Session settings TOML (log directory, log filter)
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Write the mission log to this file instead of a timestamped one
    #[arg(long, conflicts_with = "no_log_file")]
    log_file: Option<PathBuf>,

    /// Send mission log lines to tracing only and write no log file
    #[arg(long)]
    no_log_file: bool,

    /// Read commands from a file instead of stdin
    #[arg(long)]
    script: Option<PathBuf>,

    /// Print the final mission state as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let settings = match &args.settings {
        Some(path) => SessionSettings::load(path)?,
        None => SessionSettings::default(),
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&settings.log_filter)),
        )
        .with_writer(io::stderr)
        .init();

    let sink: Box<dyn LogSink> = match &args.log_file {
        _ if args.no_log_file => Box::new(TracingLog::new()),
        Some(path) => Box::new(FileLog::open(path)?),
        None => Box::new(FileLog::create_in(&settings.log_dir)?),
    };

    let mut mission = Mission::from_file(&args.scenario, sink)?;
    tracing::info!("Scenario {:?} loaded", args.scenario);

    println!("\n=== MINEFIELD ===");
    println!("{}", mission.details());
    println!();

    match &args.script {
        Some(path) => {
            let script = fs::read_to_string(path)?;
            for line in script.lines() {
                let line = line.trim();
                if line.is_empty() || line.starts_with('#') {
                    continue;
                }
                println!("> {}", line);
                if !handle_line(&mut mission, line, settings.echo) {
                    break;
                }
            }
        }
        None => {
            println!("{}", help_text());
            println!();
            let stdin = io::stdin();
            loop {
                print!("> ");
                io::stdout().flush()?;

                let mut input = String::new();
                if stdin.lock().read_line(&mut input)? == 0 {
                    break;
                }
                let input = input.trim();
                if input.is_empty() {
                    continue;
                }
                if !handle_line(&mut mission, input, true) {
                    break;
                }
            }
        }
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&mission.snapshot())?);
    } else {
        display_status(&mission);
    }

    Ok(())
}

/// Run one input line. Returns false when the operator asked to quit.
fn handle_line(mission: &mut Mission, line: &str, echo: bool) -> bool {
    let command = match parse_command(line) {
        Ok(command) => command,
        Err(e) => {
            println!("{}", e);
            return true;
        }
    };

    match command {
        MissionCommand::Quit => return false,
        MissionCommand::Help => println!("{}", help_text()),
        MissionCommand::Status => display_status(mission),
        _ => {
            let result = CommandExecutor::execute(mission, &command);
            if echo {
                if let Some(message) = result.message {
                    println!("{}", message);
                }
                println!("Total: {}", mission.total());
            }
        }
    }

    true
}

fn display_status(mission: &Mission) {
    println!("--- Mission status ---");
    println!("Route: {} -> {}", mission.start(), mission.end());
    println!("UGV: {}", mission.ugv_location());
    for scout in mission.scouts() {
        println!("{}: {}", scout.id, scout.location);
    }
    match mission.selected_unit() {
        Some(unit) => println!(
            "Selected: {} ({}, {:?})",
            unit.key,
            unit.terrain,
            unit.state()
        ),
        None => println!("Selected: none"),
    }
    println!("Total: {}", mission.total());
    if mission.is_complete() {
        println!("Mission complete.");
    }
}
