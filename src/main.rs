//! jobtrack - Terminal client for a personal job-application tracker

mod api;
mod display;
mod filter;
mod models;
mod tui;

use std::io::{self, IsTerminal, Write};
use std::thread;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use crossterm::{
    cursor::{Hide, Show},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen},
};
use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};
use indicatif::{ProgressBar, ProgressStyle};
use tokio::runtime::Runtime;

use api::ApiClient;
use filter::StatusFilter;
use models::{parse_form_date, AppConfig, ApplicationStatus, JobApplication, JobDraft};

#[derive(Parser)]
#[command(name = "jobtrack")]
#[command(about = "Terminal client for a personal job-application tracker", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List tracked applications
    List {
        /// Filter by free text (matches company, title, location)
        #[arg(short, long)]
        query: Option<String>,

        /// Filter by status (APPLIED, INTERVIEW, OFFERED, REJECTED or "all")
        #[arg(short, long)]
        status: Option<String>,

        /// Watch mode: refresh every N seconds
        #[arg(short, long, value_name = "SECONDS", default_value = "0")]
        watch: f64,
    },

    /// Add a new application (prompts for missing required fields)
    Add {
        /// Company name
        #[arg(short, long)]
        company: Option<String>,

        /// Job title
        #[arg(short, long)]
        title: Option<String>,

        /// Application date (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<String>,

        /// Status (APPLIED, INTERVIEW, OFFERED, REJECTED)
        #[arg(short, long)]
        status: Option<String>,

        /// Location
        #[arg(short, long)]
        location: Option<String>,

        /// Free-form notes
        #[arg(short, long)]
        notes: Option<String>,
    },

    /// Edit an existing application by id
    Edit {
        /// Id of the application to edit
        id: u64,

        /// New company name
        #[arg(short, long)]
        company: Option<String>,

        /// New job title
        #[arg(short, long)]
        title: Option<String>,

        /// New application date (YYYY-MM-DD, empty string clears it)
        #[arg(short, long)]
        date: Option<String>,

        /// New status (APPLIED, INTERVIEW, OFFERED, REJECTED)
        #[arg(short, long)]
        status: Option<String>,

        /// New location
        #[arg(short, long)]
        location: Option<String>,

        /// New notes
        #[arg(short, long)]
        notes: Option<String>,

        /// Prompt for every field, pre-filled with current values
        #[arg(short, long)]
        interactive: bool,
    },

    /// Delete an application by id
    Delete {
        /// Id of the application to delete
        id: u64,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Launch interactive TUI mode
    #[command(alias = "ui")]
    Tui,
}

fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let (config, config_warnings) = AppConfig::load();

    // TUI mode shows warnings in its own status bar; CLI mode prints them
    if matches!(cli.command, Some(Commands::Tui) | None) {
        return tui::run(config, config_warnings);
    }
    for warning in &config_warnings {
        eprintln!("Warning: {}", warning);
    }

    let rt = Runtime::new()?;
    let client = ApiClient::new(&config.backend.base_url);

    match cli.command {
        Some(Commands::List { query, status, watch }) => {
            let status_filter = parse_status_filter(status.as_deref())?;
            if watch > 0.0 {
                watch_loop(watch, || {
                    handle_list_command(&rt, &client, query.as_deref(), &status_filter)
                })?;
            } else {
                let output =
                    handle_list_command(&rt, &client, query.as_deref(), &status_filter)?;
                println!("{}", output);
            }
        }
        Some(Commands::Add {
            company,
            title,
            date,
            status,
            location,
            notes,
        }) => {
            handle_add_command(&rt, &client, company, title, date, status, location, notes)?;
        }
        Some(Commands::Edit {
            id,
            company,
            title,
            date,
            status,
            location,
            notes,
            interactive,
        }) => {
            handle_edit_command(
                &rt, &client, id, company, title, date, status, location, notes, interactive,
            )?;
        }
        Some(Commands::Delete { id, yes }) => {
            handle_delete_command(&rt, &client, &config, id, yes)?;
        }
        Some(Commands::Tui) | None => unreachable!("handled above"),
    }

    Ok(())
}

/// Route tracing output to a file when JOBTRACK_LOG names one. Keeping the
/// subscriber off stdout/stderr avoids corrupting tables and the TUI.
fn init_tracing() {
    if let Ok(path) = std::env::var("JOBTRACK_LOG")
        && !path.is_empty()
        && let Ok(file) = std::fs::File::create(&path)
    {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_writer(file)
            .with_ansi(false)
            .try_init();
    }
}

/// Parse the --status argument for list filtering.
fn parse_status_filter(arg: Option<&str>) -> Result<StatusFilter> {
    let Some(raw) = arg else {
        return Ok(StatusFilter::All);
    };
    if raw.eq_ignore_ascii_case("all") {
        return Ok(StatusFilter::All);
    }
    Ok(StatusFilter::Only(parse_status(raw)?))
}

/// Parse a status argument for mutations; only the four known values are
/// accepted from the command line.
fn parse_status(raw: &str) -> Result<ApplicationStatus> {
    let status = ApplicationStatus::from(raw.to_string());
    if !status.is_known() {
        bail!(
            "invalid status '{}' (expected APPLIED, INTERVIEW, OFFERED or REJECTED)",
            raw
        );
    }
    Ok(status)
}

/// Fetch the full collection, with a spinner on interactive terminals.
fn fetch_all(rt: &Runtime, client: &ApiClient, message: &str) -> Result<Vec<JobApplication>> {
    let spinner = start_spinner(message)?;
    let result = rt.block_on(client.list());
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }
    result.context("failed to load applications")
}

fn start_spinner(message: &str) -> Result<Option<ProgressBar>> {
    if !io::stderr().is_terminal() {
        return Ok(None);
    }
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .context("Failed to set spinner template")?,
    );
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    Ok(Some(spinner))
}

fn handle_list_command(
    rt: &Runtime,
    client: &ApiClient,
    query: Option<&str>,
    status: &StatusFilter,
) -> Result<String> {
    let applications = fetch_all(rt, client, "Loading applications...")?;

    let visible: Vec<JobApplication> = filter::filter_indices(
        &applications,
        query.unwrap_or(""),
        status,
    )
    .into_iter()
    .map(|i| applications[i].clone())
    .collect();

    Ok(display::format_applications(&visible))
}

#[allow(clippy::too_many_arguments)]
fn handle_add_command(
    rt: &Runtime,
    client: &ApiClient,
    company: Option<String>,
    title: Option<String>,
    date: Option<String>,
    status: Option<String>,
    location: Option<String>,
    notes: Option<String>,
) -> Result<()> {
    let status = status.as_deref().map(parse_status).transpose()?;
    let application_date = date.as_deref().map(parse_form_date).transpose()?.flatten();

    let mut draft = JobDraft {
        company_name: company.unwrap_or_default(),
        job_title: title.unwrap_or_default(),
        application_date,
        status: status.unwrap_or_default(),
        location: location.filter(|s| !s.trim().is_empty()),
        notes: notes.filter(|s| !s.trim().is_empty()),
    };

    // Prompt for anything still missing when a human is attached
    if draft.validate().is_err() && io::stderr().is_terminal() {
        draft = prompt_draft(draft)?;
    }
    draft.validate()?;

    let spinner = start_spinner("Creating application...")?;
    let result = rt.block_on(client.create(&draft));
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }
    result.context("failed to create application")?;

    // Reload so the output reflects the backend's state, id included
    let applications = fetch_all(rt, client, "Reloading...")?;
    println!("Created application for {}", draft.company_name);
    println!("{}", display::format_applications(&applications));
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn handle_edit_command(
    rt: &Runtime,
    client: &ApiClient,
    id: u64,
    company: Option<String>,
    title: Option<String>,
    date: Option<String>,
    status: Option<String>,
    location: Option<String>,
    notes: Option<String>,
    interactive: bool,
) -> Result<()> {
    let applications = fetch_all(rt, client, "Loading applications...")?;
    let existing = applications
        .iter()
        .find(|app| app.id == id)
        .with_context(|| format!("no application with id {}", id))?;

    let mut draft = JobDraft::from_application(existing);

    if let Some(company) = company {
        draft.company_name = company;
    }
    if let Some(title) = title {
        draft.job_title = title;
    }
    if let Some(date) = date {
        draft.application_date = parse_form_date(&date)?;
    }
    if let Some(status) = status {
        draft.status = parse_status(&status)?;
    }
    if let Some(location) = location {
        draft.location = Some(location).filter(|s| !s.trim().is_empty());
    }
    if let Some(notes) = notes {
        draft.notes = Some(notes).filter(|s| !s.trim().is_empty());
    }

    if interactive {
        draft = prompt_draft(draft)?;
    }
    draft.validate()?;

    let spinner = start_spinner("Updating application...")?;
    // The update always targets the id the record was loaded with
    let result = rt.block_on(client.update(id, &draft));
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }
    result.with_context(|| format!("failed to update application {}", id))?;

    let applications = fetch_all(rt, client, "Reloading...")?;
    match applications.iter().find(|app| app.id == id) {
        Some(updated) => println!("Updated {}", display::format_application_line(updated)),
        None => println!("Updated application #{}", id),
    }
    println!("{}", display::format_applications(&applications));
    Ok(())
}

fn handle_delete_command(
    rt: &Runtime,
    client: &ApiClient,
    config: &AppConfig,
    id: u64,
    yes: bool,
) -> Result<()> {
    let applications = fetch_all(rt, client, "Loading applications...")?;
    let existing = applications
        .iter()
        .find(|app| app.id == id)
        .with_context(|| format!("no application with id {}", id))?;

    if !yes && config.behavior.confirm_delete {
        if !io::stderr().is_terminal() {
            bail!("refusing to delete without confirmation (pass --yes)");
        }
        let confirmed = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(format!(
                "Delete application #{} ({})?",
                id, existing.company_name
            ))
            .default(false)
            .interact()?;
        if !confirmed {
            println!("Aborted.");
            return Ok(());
        }
    }

    let spinner = start_spinner("Deleting application...")?;
    let result = rt.block_on(client.remove(id));
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }
    result.with_context(|| format!("failed to delete application {}", id))?;

    let applications = fetch_all(rt, client, "Reloading...")?;
    println!("Deleted application #{}", id);
    println!("{}", display::format_applications(&applications));
    Ok(())
}

/// Interactive prompts for every draft field, pre-filled with the current
/// values. Used by `add` for missing fields and by `edit --interactive`.
fn prompt_draft(initial: JobDraft) -> Result<JobDraft> {
    let theme = ColorfulTheme::default();

    let company_name: String = Input::with_theme(&theme)
        .with_prompt("Company")
        .with_initial_text(initial.company_name.clone())
        .interact_text()?;

    let job_title: String = Input::with_theme(&theme)
        .with_prompt("Job title")
        .with_initial_text(initial.job_title.clone())
        .interact_text()?;

    let date_initial = initial
        .application_date
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default();
    let date_input: String = Input::with_theme(&theme)
        .with_prompt("Application date (YYYY-MM-DD, empty for none)")
        .with_initial_text(date_initial)
        .allow_empty(true)
        .validate_with(|input: &String| {
            parse_form_date(input).map(|_| ()).map_err(|e| e.to_string())
        })
        .interact_text()?;

    let status_options = ApplicationStatus::KNOWN;
    let status_labels: Vec<&str> = status_options.iter().map(|s| s.label()).collect();
    let default_status = status_options
        .iter()
        .position(|s| *s == initial.status)
        .unwrap_or(0);
    let status_selection = Select::with_theme(&theme)
        .with_prompt("Status")
        .items(&status_labels)
        .default(default_status)
        .interact()?;

    let location: String = Input::with_theme(&theme)
        .with_prompt("Location (empty for none)")
        .with_initial_text(initial.location.clone().unwrap_or_default())
        .allow_empty(true)
        .interact_text()?;

    let notes: String = Input::with_theme(&theme)
        .with_prompt("Notes (empty for none)")
        .with_initial_text(initial.notes.clone().unwrap_or_default())
        .allow_empty(true)
        .interact_text()?;

    Ok(JobDraft {
        company_name,
        job_title,
        application_date: parse_form_date(&date_input)?,
        status: status_options[status_selection].clone(),
        location: Some(location).filter(|s| !s.trim().is_empty()),
        notes: Some(notes).filter(|s| !s.trim().is_empty()),
    })
}

/// Watch loop that repeatedly executes a command with flicker-free updates
fn watch_loop<F>(interval: f64, command: F) -> Result<()>
where
    F: Fn() -> Result<String>,
{
    // Set up Ctrl+C handler
    let running = std::sync::Arc::new(std::sync::atomic::AtomicBool::new(true));
    let r = running.clone();

    ctrlc::set_handler(move || {
        r.store(false, std::sync::atomic::Ordering::SeqCst);
    })
    .context("Error setting Ctrl-C handler")?;

    // Enter alternate screen buffer and hide cursor for clean display
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, Hide)?;

    // Ensure we clean up on exit
    let cleanup = || -> Result<()> {
        let mut stdout = io::stdout();
        execute!(stdout, Show, LeaveAlternateScreen)?;
        Ok(())
    };

    let result = (|| -> Result<()> {
        while running.load(std::sync::atomic::Ordering::SeqCst) {
            // Get current timestamp
            let now = chrono::Local::now();
            let timestamp = now.format("%Y-%m-%d %H:%M:%S");

            // Execute the command and capture output
            let output = match command() {
                Ok(s) => s,
                Err(e) => format!("Error: {}", e),
            };

            // Build complete screen content in memory
            let screen_content = format!(
                "{}\n\nLast updated: {} | Refreshing every {}s | Press Ctrl+C to exit",
                output, timestamp, interval
            );

            // Write everything at once with synchronized update (DEC private mode)
            // This prevents the terminal from rendering until the full frame is written
            write!(stdout, "\x1B[?2026h")?; // Begin synchronized update
            write!(stdout, "\x1B[H{}\x1B[J", screen_content)?;
            write!(stdout, "\x1B[?2026l")?; // End synchronized update
            stdout.flush()?;

            // Sleep for the specified interval
            thread::sleep(Duration::from_secs_f64(interval));
        }
        Ok(())
    })();

    // Always clean up terminal state
    cleanup()?;

    // Print exit message on main screen
    println!("Watch mode stopped.");

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_status_filter() {
        assert_eq!(parse_status_filter(None).unwrap(), StatusFilter::All);
        assert_eq!(parse_status_filter(Some("all")).unwrap(), StatusFilter::All);
        assert_eq!(
            parse_status_filter(Some("rejected")).unwrap(),
            StatusFilter::Only(ApplicationStatus::Rejected)
        );
        assert!(parse_status_filter(Some("ghosted")).is_err());
    }

    #[test]
    fn test_parse_status_rejects_unknown() {
        assert!(parse_status("APPLIED").is_ok());
        assert!(parse_status("interview").is_ok());
        assert!(parse_status("NO_SUCH_STATUS").is_err());
    }

    #[test]
    fn test_cli_parses_subcommands() {
        let cli = Cli::parse_from(["jobtrack", "list", "--query", "acme", "--status", "all"]);
        assert!(matches!(cli.command, Some(Commands::List { .. })));

        let cli = Cli::parse_from(["jobtrack", "delete", "7", "--yes"]);
        match cli.command {
            Some(Commands::Delete { id, yes }) => {
                assert_eq!(id, 7);
                assert!(yes);
            }
            _ => panic!("expected delete command"),
        }

        let cli = Cli::parse_from(["jobtrack", "ui"]);
        assert!(matches!(cli.command, Some(Commands::Tui)));

        let cli = Cli::parse_from(["jobtrack"]);
        assert!(cli.command.is_none());
    }
}
