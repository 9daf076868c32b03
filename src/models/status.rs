//! Application status enumeration.
//!
//! The backend stores the status as an uppercase string. The UI layer only
//! knows the four canonical values; anything else the backend hands back is
//! preserved verbatim in `Other` and rendered with the fallback style.

use serde::{Deserialize, Serialize};

/// Canonical pipeline statuses, plus a carrier for values the backend
/// accepts that the client does not enumerate.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ApplicationStatus {
    #[default]
    Applied,
    Interview,
    Offered,
    Rejected,
    Other(String),
}

impl ApplicationStatus {
    /// The four statuses the UI offers for selection, in pipeline order.
    pub const KNOWN: [ApplicationStatus; 4] = [
        ApplicationStatus::Applied,
        ApplicationStatus::Interview,
        ApplicationStatus::Offered,
        ApplicationStatus::Rejected,
    ];

    /// Wire representation (uppercase, matching the backend enumeration).
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            ApplicationStatus::Applied => "APPLIED",
            ApplicationStatus::Interview => "INTERVIEW",
            ApplicationStatus::Offered => "OFFERED",
            ApplicationStatus::Rejected => "REJECTED",
            ApplicationStatus::Other(raw) => raw,
        }
    }

    /// Human-readable label for tables and menus.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            ApplicationStatus::Applied => "Applied",
            ApplicationStatus::Interview => "Interview",
            ApplicationStatus::Offered => "Offered",
            ApplicationStatus::Rejected => "Rejected",
            ApplicationStatus::Other(raw) => raw,
        }
    }

    #[must_use]
    pub fn is_known(&self) -> bool {
        !matches!(self, ApplicationStatus::Other(_))
    }

    /// Next known status in pipeline order, wrapping. Used by the form's
    /// status field; `Other` re-enters the cycle at `Applied`.
    #[must_use]
    pub fn cycle(&self) -> ApplicationStatus {
        match self {
            ApplicationStatus::Applied => ApplicationStatus::Interview,
            ApplicationStatus::Interview => ApplicationStatus::Offered,
            ApplicationStatus::Offered => ApplicationStatus::Rejected,
            ApplicationStatus::Rejected | ApplicationStatus::Other(_) => {
                ApplicationStatus::Applied
            }
        }
    }

    /// Previous known status in pipeline order, wrapping.
    #[must_use]
    pub fn cycle_back(&self) -> ApplicationStatus {
        match self {
            ApplicationStatus::Applied | ApplicationStatus::Other(_) => {
                ApplicationStatus::Rejected
            }
            ApplicationStatus::Interview => ApplicationStatus::Applied,
            ApplicationStatus::Offered => ApplicationStatus::Interview,
            ApplicationStatus::Rejected => ApplicationStatus::Offered,
        }
    }
}

impl From<String> for ApplicationStatus {
    fn from(raw: String) -> Self {
        // Tolerate casing differences between the two historical front-ends;
        // the canonical wire format is uppercase.
        match raw.trim().to_uppercase().as_str() {
            "APPLIED" => ApplicationStatus::Applied,
            "INTERVIEW" => ApplicationStatus::Interview,
            "OFFERED" => ApplicationStatus::Offered,
            "REJECTED" => ApplicationStatus::Rejected,
            _ => ApplicationStatus::Other(raw),
        }
    }
}

impl From<ApplicationStatus> for String {
    fn from(status: ApplicationStatus) -> Self {
        status.as_str().to_string()
    }
}

impl std::fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_canonical_values() {
        assert_eq!(
            ApplicationStatus::from("APPLIED".to_string()),
            ApplicationStatus::Applied
        );
        assert_eq!(
            ApplicationStatus::from("REJECTED".to_string()),
            ApplicationStatus::Rejected
        );
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(
            ApplicationStatus::from("interview".to_string()),
            ApplicationStatus::Interview
        );
        assert_eq!(
            ApplicationStatus::from("Offered".to_string()),
            ApplicationStatus::Offered
        );
    }

    #[test]
    fn test_unknown_value_preserved() {
        let status = ApplicationStatus::from("GHOSTED".to_string());
        assert_eq!(status, ApplicationStatus::Other("GHOSTED".to_string()));
        assert_eq!(status.as_str(), "GHOSTED");
        assert!(!status.is_known());
    }

    #[test]
    fn test_serde_round_trip() {
        let json = serde_json::to_string(&ApplicationStatus::Interview).unwrap();
        assert_eq!(json, "\"INTERVIEW\"");

        let back: ApplicationStatus = serde_json::from_str("\"OFFERED\"").unwrap();
        assert_eq!(back, ApplicationStatus::Offered);

        // Unknown values survive a round trip unchanged
        let other: ApplicationStatus = serde_json::from_str("\"WITHDRAWN\"").unwrap();
        assert_eq!(serde_json::to_string(&other).unwrap(), "\"WITHDRAWN\"");
    }

    #[test]
    fn test_cycle_wraps() {
        let mut status = ApplicationStatus::Applied;
        for _ in 0..4 {
            status = status.cycle();
        }
        assert_eq!(status, ApplicationStatus::Applied);

        assert_eq!(
            ApplicationStatus::Applied.cycle_back(),
            ApplicationStatus::Rejected
        );
        assert_eq!(
            ApplicationStatus::Other("GHOSTED".into()).cycle(),
            ApplicationStatus::Applied
        );
    }
}
