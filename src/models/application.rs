//! Job application records and form payloads.
//!
//! `JobApplication` mirrors the backend's JSON shape (camelCase field names,
//! server-assigned numeric id). `JobDraft` is the mutable form payload sent
//! on create/update; the id never travels in the body, only in the URL path.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::status::ApplicationStatus;

/// A single tracked job application, as returned by `GET /jobs`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobApplication {
    pub id: u64,
    pub company_name: String,
    pub job_title: String,
    #[serde(
        default,
        deserialize_with = "deserialize_date",
        serialize_with = "serialize_date"
    )]
    pub application_date: Option<NaiveDate>,
    #[serde(default)]
    pub status: ApplicationStatus,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl JobApplication {
    /// Date column content; absent dates render as empty (not "null").
    #[must_use]
    pub fn date_display(&self) -> String {
        self.application_date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn location_display(&self) -> &str {
        self.location.as_deref().unwrap_or("")
    }
}

/// Form payload for `POST /jobs` and `PUT /jobs/{id}`.
///
/// Edit always submits the entire payload; the client never diffs fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobDraft {
    pub company_name: String,
    pub job_title: String,
    #[serde(serialize_with = "serialize_date")]
    pub application_date: Option<NaiveDate>,
    pub status: ApplicationStatus,
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl JobDraft {
    /// Pre-fill a draft from an existing record for editing.
    #[must_use]
    pub fn from_application(app: &JobApplication) -> Self {
        Self {
            company_name: app.company_name.clone(),
            job_title: app.job_title.clone(),
            application_date: app.application_date,
            status: app.status.clone(),
            location: app.location.clone(),
            notes: app.notes.clone(),
        }
    }

    /// Required-field check, applied before any request is built.
    ///
    /// Everything beyond presence of company and title (uniqueness, date
    /// sanity, status legality) is the backend's responsibility.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.company_name.trim().is_empty() {
            return Err(ValidationError::MissingField("company name"));
        }
        if self.job_title.trim().is_empty() {
            return Err(ValidationError::MissingField("job title"));
        }
        Ok(())
    }
}

/// Client-side rejection of a form submission; no request is sent.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("invalid date '{0}' (expected YYYY-MM-DD)")]
    InvalidDate(String),
}

/// Parse a date as typed into the form. Empty input means no date.
pub fn parse_form_date(input: &str) -> Result<Option<NaiveDate>, ValidationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| ValidationError::InvalidDate(trimmed.to_string()))
}

/// Accept either a bare ISO date or a full ISO datetime from the backend.
///
/// The historical front-end truncated whatever came back with
/// `toISOString().split('T')[0]`; keeping the first ten characters matches
/// that behavior. Unparseable values are treated as absent rather than
/// failing the whole list fetch.
fn deserialize_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_date_lenient))
}

fn parse_date_lenient(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let date_part = trimmed.get(..10).unwrap_or(trimmed);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

fn serialize_date<S>(date: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match date {
        Some(d) => serializer.serialize_str(&d.format("%Y-%m-%d").to_string()),
        None => serializer.serialize_none(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_application() -> JobApplication {
        JobApplication {
            id: 7,
            company_name: "Acme".to_string(),
            job_title: "Eng".to_string(),
            application_date: NaiveDate::from_ymd_opt(2025, 3, 14),
            status: ApplicationStatus::Applied,
            location: Some("Berlin".to_string()),
            notes: None,
        }
    }

    #[test]
    fn test_deserialize_camel_case() {
        let json = r#"{
            "id": 1,
            "companyName": "Acme",
            "jobTitle": "Eng",
            "applicationDate": "2025-03-14",
            "status": "APPLIED",
            "location": "Berlin"
        }"#;
        let app: JobApplication = serde_json::from_str(json).unwrap();
        assert_eq!(app.company_name, "Acme");
        assert_eq!(app.application_date, NaiveDate::from_ymd_opt(2025, 3, 14));
        assert_eq!(app.status, ApplicationStatus::Applied);
        assert_eq!(app.notes, None);
    }

    #[test]
    fn test_deserialize_datetime_keeps_date_part() {
        let json = r#"{
            "id": 2,
            "companyName": "Acme",
            "jobTitle": "Eng",
            "applicationDate": "2025-03-14T09:30:00.000Z",
            "status": "INTERVIEW"
        }"#;
        let app: JobApplication = serde_json::from_str(json).unwrap();
        assert_eq!(app.application_date, NaiveDate::from_ymd_opt(2025, 3, 14));
    }

    #[test]
    fn test_deserialize_missing_and_null_date() {
        let json = r#"{"id": 3, "companyName": "A", "jobTitle": "B", "status": "APPLIED", "applicationDate": null}"#;
        let app: JobApplication = serde_json::from_str(json).unwrap();
        assert_eq!(app.application_date, None);
        assert_eq!(app.date_display(), "");

        let json = r#"{"id": 4, "companyName": "A", "jobTitle": "B", "status": "APPLIED"}"#;
        let app: JobApplication = serde_json::from_str(json).unwrap();
        assert_eq!(app.application_date, None);
    }

    #[test]
    fn test_unparseable_date_treated_as_absent() {
        let json = r#"{"id": 5, "companyName": "A", "jobTitle": "B", "status": "APPLIED", "applicationDate": "soon"}"#;
        let app: JobApplication = serde_json::from_str(json).unwrap();
        assert_eq!(app.application_date, None);
    }

    #[test]
    fn test_draft_serializes_camel_case_with_null_date() {
        let draft = JobDraft {
            company_name: "Acme".to_string(),
            job_title: "Eng".to_string(),
            application_date: None,
            status: ApplicationStatus::Applied,
            location: Some("Berlin".to_string()),
            notes: None,
        };
        let value = serde_json::to_value(&draft).unwrap();
        assert_eq!(value["companyName"], "Acme");
        assert_eq!(value["jobTitle"], "Eng");
        assert!(value["applicationDate"].is_null());
        assert_eq!(value["status"], "APPLIED");
        // notes is omitted entirely when absent
        assert!(value.get("notes").is_none());
    }

    #[test]
    fn test_validate_requires_company_and_title() {
        let mut draft = JobDraft::from_application(&sample_application());
        assert!(draft.validate().is_ok());

        draft.company_name = "   ".to_string();
        assert_eq!(
            draft.validate(),
            Err(ValidationError::MissingField("company name"))
        );

        draft.company_name = "Acme".to_string();
        draft.job_title = String::new();
        assert_eq!(
            draft.validate(),
            Err(ValidationError::MissingField("job title"))
        );
    }

    #[test]
    fn test_parse_form_date() {
        assert_eq!(parse_form_date(""), Ok(None));
        assert_eq!(parse_form_date("  "), Ok(None));
        assert_eq!(
            parse_form_date("2025-03-14"),
            Ok(NaiveDate::from_ymd_opt(2025, 3, 14))
        );
        assert!(matches!(
            parse_form_date("14.03.2025"),
            Err(ValidationError::InvalidDate(_))
        ));
    }

    #[test]
    fn test_draft_from_application_prefills_all_fields() {
        let app = sample_application();
        let draft = JobDraft::from_application(&app);
        assert_eq!(draft.company_name, app.company_name);
        assert_eq!(draft.job_title, app.job_title);
        assert_eq!(draft.application_date, app.application_date);
        assert_eq!(draft.status, app.status);
        assert_eq!(draft.location, app.location);
    }
}
