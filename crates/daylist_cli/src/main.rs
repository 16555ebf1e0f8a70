//! Terminal host for `daylist_core`.
//!
//! # Responsibility
//! - Wire the core controller to a SQLite store file and stdin prompts.
//! - Print the list as plain terminal text so core wiring can be checked
//!   without a GUI.

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use daylist_core::quote::today;
use daylist_core::render::due_date_label;
use daylist_core::{
    filter_tasks, init_logging, CategoryFilter, ConfirmationProvider, CoreConfig, Counters,
    Effect, InteractionController, QuoteBanner, SqliteStore, Task, TextInputProvider,
};
use std::io::{self, BufRead, Write};
use std::path::Path;
use std::process::ExitCode;

struct StdinConfirm;

impl ConfirmationProvider for StdinConfirm {
    fn confirm(&mut self, message: &str) -> bool {
        matches!(
            read_line(&format!("{message} [y/N] ")).as_deref(),
            Some("y" | "Y" | "yes")
        )
    }
}

struct StdinPrompt;

impl TextInputProvider for StdinPrompt {
    fn prompt(&mut self, message: &str, default: &str) -> Option<String> {
        read_line(&format!("{message}\n[{default}] > "))
    }
}

/// Reads one line; `None` on end of input.
fn read_line(question: &str) -> Option<String> {
    print!("{question}");
    io::stdout().flush().ok()?;
    let mut line = String::new();
    match io::stdin().lock().read_line(&mut line) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(line.trim_end_matches(['\r', '\n']).to_string()),
    }
}

fn main() -> ExitCode {
    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    println!("daylist_core ping={}", daylist_core::ping());
    println!("daylist_core version={}", daylist_core::core_version());

    let Some(store_path) = cli.store else {
        return Ok(());
    };

    let config = load_config(cli.config.as_deref())?;
    if let Some(log_dir) = &cli.log_dir {
        if let Err(err) = init_logging(&config.log_level, log_dir) {
            eprintln!("logging disabled: {err}");
        }
    }

    let store = SqliteStore::open(&store_path)
        .with_context(|| format!("cannot open store `{}`", store_path.display()))?;
    let mut controller =
        InteractionController::start(store, StdinConfirm, StdinPrompt, &config, today);

    let command = cli.command.unwrap_or(Command::Show);
    if command == Command::Categories {
        for option in controller.filter_options() {
            println!("{option}");
        }
        return Ok(());
    }

    if let Some(event) = command.into_event() {
        let outcome = controller.handle(event).context("store write failed")?;
        match outcome.effect {
            Effect::Rejected(message) => eprintln!("{message}"),
            Effect::Cancelled => eprintln!("cancelled"),
            Effect::Ignored => eprintln!("nothing changed"),
            Effect::Applied | Effect::ClearInputs => {}
        }
    }

    print_banner(controller.banner());
    let tasks = controller.repository().tasks();
    for line in list_lines(tasks, controller.active_filter(), controller.query()) {
        println!("{line}");
    }
    Ok(())
}

/// Defaults when no file is given; a given file must parse.
fn load_config(path: Option<&Path>) -> Result<CoreConfig> {
    let Some(path) = path else {
        return Ok(CoreConfig::default());
    };
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read config `{}`", path.display()))?;
    CoreConfig::from_json(&raw).with_context(|| format!("invalid config `{}`", path.display()))
}

fn print_banner(banner: QuoteBanner) {
    if let Some(message) = banner.message() {
        println!("\n  {message}\n");
    }
}

/// Visible tasks as raw text, then the counters over the whole list.
fn list_lines(tasks: &[Task], filter: &CategoryFilter, query: &str) -> Vec<String> {
    let mut lines = Vec::new();
    for task in filter_tasks(tasks, filter, query) {
        let mark = if task.completed { "x" } else { " " };
        lines.push(format!(
            "[{mark}] {}  ({} | {})  id={}",
            task.text,
            task.category,
            due_date_label(task.due_date.as_deref()),
            task.id
        ));
        if task.has_note() {
            lines.push(format!("      {}", task.note));
        }
    }

    let counters = Counters::count(tasks);
    lines.push(format!(
        "{}  {}",
        counters.pending_label(),
        counters.completed_label()
    ));
    lines
}
