//! Data models for the job-application tracker.
//!
//! This module provides the record and payload types exchanged with the
//! backend, the status enumeration, and configuration types.

mod application;
mod config;
mod status;

pub use application::{parse_form_date, JobApplication, JobDraft, ValidationError};
pub use config::{AppConfig, BackendConfig, BehaviorConfig, DisplayConfig, RefreshConfig};
pub use status::ApplicationStatus;
