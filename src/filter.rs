//! Client-side filtering of the cached application list.
//!
//! Filtering is pure: it derives a view over the list and never mutates the
//! cache. A record matches the text filter when the case-insensitive
//! concatenation of company name, job title, and location contains the
//! trimmed query as a substring; the empty query matches everything. The
//! status filter is an exact match or the "all" sentinel. Both predicates
//! are ANDed.

use crate::models::{ApplicationStatus, JobApplication};

/// Status selector: everything, or exactly one known status.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(ApplicationStatus),
}

impl StatusFilter {
    /// Selector entries offered in the UI, in menu order.
    #[must_use]
    pub fn options() -> Vec<StatusFilter> {
        let mut options = vec![StatusFilter::All];
        options.extend(
            ApplicationStatus::KNOWN
                .iter()
                .cloned()
                .map(StatusFilter::Only),
        );
        options
    }

    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            StatusFilter::All => "All statuses",
            StatusFilter::Only(status) => status.label(),
        }
    }

    #[must_use]
    pub fn matches(&self, app: &JobApplication) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(status) => app.status == *status,
        }
    }
}

/// Check the free-text query against a single record.
#[must_use]
pub fn matches_query(app: &JobApplication, query: &str) -> bool {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }

    let haystack = format!(
        "{} {} {}",
        app.company_name,
        app.job_title,
        app.location_display()
    )
    .to_lowercase();

    haystack.contains(&needle)
}

/// Combined predicate: text AND status.
#[must_use]
pub fn matches(app: &JobApplication, query: &str, status: &StatusFilter) -> bool {
    matches_query(app, query) && status.matches(app)
}

/// Indices of visible records, preserving list order.
#[must_use]
pub fn filter_indices(
    apps: &[JobApplication],
    query: &str,
    status: &StatusFilter,
) -> Vec<usize> {
    apps.iter()
        .enumerate()
        .filter(|(_, app)| matches(app, query, status))
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_app(id: u64, company: &str, title: &str, status: ApplicationStatus) -> JobApplication {
        JobApplication {
            id,
            company_name: company.to_string(),
            job_title: title.to_string(),
            application_date: None,
            status,
            location: None,
            notes: None,
        }
    }

    fn sample_list() -> Vec<JobApplication> {
        vec![
            make_app(1, "Acme", "Eng", ApplicationStatus::Applied),
            make_app(2, "Initech", "Backend Dev", ApplicationStatus::Interview),
            JobApplication {
                location: Some("Berlin".to_string()),
                ..make_app(3, "Globex", "SRE", ApplicationStatus::Offered)
            },
        ]
    }

    #[test]
    fn test_query_matches_company() {
        let list = sample_list();
        let visible = filter_indices(&list, "acme", &StatusFilter::All);
        assert_eq!(visible, vec![0]);
    }

    #[test]
    fn test_query_no_match() {
        let list = sample_list();
        let visible = filter_indices(&list, "zzz", &StatusFilter::All);
        assert!(visible.is_empty());
    }

    #[test]
    fn test_empty_query_matches_all() {
        let list = sample_list();
        assert_eq!(filter_indices(&list, "", &StatusFilter::All).len(), 3);
        // Whitespace-only queries are trimmed to empty
        assert_eq!(filter_indices(&list, "   ", &StatusFilter::All).len(), 3);
    }

    #[test]
    fn test_query_matches_title_and_location() {
        let list = sample_list();
        assert_eq!(filter_indices(&list, "backend", &StatusFilter::All), vec![1]);
        assert_eq!(filter_indices(&list, "BERLIN", &StatusFilter::All), vec![2]);
    }

    #[test]
    fn test_status_filter_exact_match() {
        let list = sample_list();
        let visible = filter_indices(
            &list,
            "",
            &StatusFilter::Only(ApplicationStatus::Interview),
        );
        assert_eq!(visible, vec![1]);
    }

    #[test]
    fn test_status_filter_no_rejected_records() {
        let list = sample_list();
        let visible = filter_indices(
            &list,
            "",
            &StatusFilter::Only(ApplicationStatus::Rejected),
        );
        assert!(visible.is_empty());
    }

    #[test]
    fn test_predicates_are_anded() {
        let list = sample_list();
        // "e" appears in all three records, but only one is OFFERED
        let visible = filter_indices(&list, "e", &StatusFilter::Only(ApplicationStatus::Offered));
        assert_eq!(visible, vec![2]);
        // Matching status but non-matching text yields nothing
        let visible = filter_indices(
            &list,
            "zzz",
            &StatusFilter::Only(ApplicationStatus::Offered),
        );
        assert!(visible.is_empty());
    }

    #[test]
    fn test_filtering_is_idempotent_and_pure() {
        let list = sample_list();
        let first = filter_indices(&list, "e", &StatusFilter::All);
        let second = filter_indices(&list, "e", &StatusFilter::All);
        assert_eq!(first, second);
        // The cache itself is untouched
        assert_eq!(list.len(), 3);
        assert_eq!(list[0].company_name, "Acme");
    }

    #[test]
    fn test_status_options_order() {
        let options = StatusFilter::options();
        assert_eq!(options.len(), 5);
        assert_eq!(options[0], StatusFilter::All);
        assert_eq!(
            options[1],
            StatusFilter::Only(ApplicationStatus::Applied)
        );
        assert_eq!(
            options[4],
            StatusFilter::Only(ApplicationStatus::Rejected)
        );
    }

    #[test]
    fn test_other_status_only_visible_under_all() {
        let mut list = sample_list();
        list.push(make_app(
            4,
            "Umbrella",
            "Ops",
            ApplicationStatus::Other("GHOSTED".to_string()),
        ));
        assert_eq!(filter_indices(&list, "", &StatusFilter::All).len(), 4);
        assert!(filter_indices(
            &list,
            "",
            &StatusFilter::Only(ApplicationStatus::Applied)
        )
        .iter()
        .all(|&i| i != 3));
    }
}
