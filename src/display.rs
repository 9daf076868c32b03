//! Table output for the non-interactive CLI commands.

use owo_colors::OwoColorize;
use tabled::{
    settings::{object::Rows, Alignment, Modify, Style, Width},
    Table, Tabled,
};

use crate::models::{ApplicationStatus, JobApplication};

/// Table row for application display
#[derive(Tabled)]
struct ApplicationRow {
    #[tabled(rename = "ID")]
    id: u64,

    #[tabled(rename = "Company")]
    company: String,

    #[tabled(rename = "Title")]
    title: String,

    #[tabled(rename = "Date")]
    date: String,

    #[tabled(rename = "Status")]
    status: String,

    #[tabled(rename = "Location")]
    location: String,
}

/// Format a status with its pipeline color; unknown statuses stay uncolored.
pub fn format_status(status: &ApplicationStatus) -> String {
    match status {
        ApplicationStatus::Applied => status.as_str().blue().to_string(),
        ApplicationStatus::Interview => status.as_str().yellow().to_string(),
        ApplicationStatus::Offered => status.as_str().green().to_string(),
        ApplicationStatus::Rejected => status.as_str().red().to_string(),
        ApplicationStatus::Other(_) => status.as_str().white().to_string(),
    }
}

/// Display applications in a table format
pub fn format_applications(apps: &[JobApplication]) -> String {
    if apps.is_empty() {
        return "No applications found".yellow().to_string();
    }

    let rows: Vec<ApplicationRow> = apps
        .iter()
        .map(|app| ApplicationRow {
            id: app.id,
            company: app.company_name.clone(),
            title: app.job_title.clone(),
            date: app.date_display(),
            status: format_status(&app.status),
            location: app.location_display().to_string(),
        })
        .collect();

    let mut table = Table::new(rows);
    table
        .with(Style::rounded())
        .with(Width::wrap(160).keep_words(true))
        .with(Modify::new(Rows::first()).with(Alignment::center()));

    table.to_string()
}

/// One-record summary for mutation confirmations ("Created", "Updated", ...).
pub fn format_application_line(app: &JobApplication) -> String {
    let mut line = format!(
        "#{} {} - {} [{}]",
        app.id,
        app.company_name,
        app.job_title,
        app.status.as_str()
    );
    if let Some(location) = &app.location {
        line.push_str(&format!(" ({})", location));
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::JobApplication;

    fn make_app(id: u64, company: &str) -> JobApplication {
        JobApplication {
            id,
            company_name: company.to_string(),
            job_title: "Eng".to_string(),
            application_date: None,
            status: ApplicationStatus::Applied,
            location: None,
            notes: None,
        }
    }

    #[test]
    fn test_empty_list_placeholder() {
        let output = format_applications(&[]);
        assert!(output.contains("No applications found"));
    }

    #[test]
    fn test_table_contains_fields() {
        let apps = vec![make_app(1, "Acme"), make_app(2, "Initech")];
        let output = format_applications(&apps);
        assert!(output.contains("Acme"));
        assert!(output.contains("Initech"));
        assert!(output.contains("Company"));
        assert!(output.contains("Status"));
    }

    #[test]
    fn test_status_coloring_keeps_text() {
        for status in ApplicationStatus::KNOWN {
            assert!(format_status(&status).contains(status.as_str()));
        }
        let other = ApplicationStatus::Other("GHOSTED".to_string());
        assert!(format_status(&other).contains("GHOSTED"));
    }

    #[test]
    fn test_application_line() {
        let mut app = make_app(7, "Acme");
        app.location = Some("Berlin".to_string());
        let line = format_application_line(&app);
        assert_eq!(line, "#7 Acme - Eng [APPLIED] (Berlin)");
    }
}
