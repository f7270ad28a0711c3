//! Run configuration, populated once from command-line flags.

use std::path::PathBuf;

use crate::error::{ReportError, Result};

/// Read-only scope for Directory API users.
pub const SCOPE_DIRECTORY_USER_READONLY: &str =
    "https://www.googleapis.com/auth/admin.directory.user.readonly";

/// Read-only scope for Directory API groups and memberships.
pub const SCOPE_DIRECTORY_GROUP_READONLY: &str =
    "https://www.googleapis.com/auth/admin.directory.group.readonly";

/// Scopes requested when impersonating the admin user.
pub const REPORT_SCOPES: [&str; 2] = [SCOPE_DIRECTORY_USER_READONLY, SCOPE_DIRECTORY_GROUP_READONLY];

/// Default destination for the CSV report.
pub const DEFAULT_OUTPUT_FILE: &str = "report.csv";

/// Everything one report run needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportConfig {
    /// Service account key JSON downloaded from Google Cloud.
    pub credentials_file: PathBuf,
    /// Admin user the service account impersonates.
    pub impersonated_email: String,
    /// Workspace domain whose groups are listed.
    pub domain: String,
    pub output_file: PathBuf,
}

impl ReportConfig {
    /// Validate that no required field is blank.
    ///
    /// The impersonated email is not checked for format; a bad value shows up
    /// as an authorization failure on the first API call.
    pub fn validate(&self) -> Result<()> {
        if self.credentials_file.as_os_str().is_empty() {
            return Err(ReportError::Config(
                "credentials-file must not be empty".into(),
            ));
        }

        if self.impersonated_email.trim().is_empty() {
            return Err(ReportError::Config(
                "impersonated-email must not be empty".into(),
            ));
        }

        if self.domain.trim().is_empty() {
            return Err(ReportError::Config("domain must not be empty".into()));
        }

        if self.output_file.as_os_str().is_empty() {
            return Err(ReportError::Config("output-file must not be empty".into()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_config() -> ReportConfig {
        ReportConfig {
            credentials_file: PathBuf::from("key.json"),
            impersonated_email: "admin@example.com".into(),
            domain: "example.com".into(),
            output_file: PathBuf::from(DEFAULT_OUTPUT_FILE),
        }
    }

    #[test]
    fn validate_accepts_complete_config() {
        sample_config().validate().unwrap();
    }

    #[test]
    fn validate_requires_domain() {
        let mut cfg = sample_config();
        cfg.domain = "   ".into();
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("domain"));
    }

    #[test]
    fn validate_requires_impersonated_email() {
        let mut cfg = sample_config();
        cfg.impersonated_email = String::new();
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("impersonated-email"));
    }

    #[test]
    fn validate_requires_credentials_file() {
        let mut cfg = sample_config();
        cfg.credentials_file = PathBuf::new();
        let err = cfg.validate().unwrap_err();
        assert!(matches!(err, ReportError::Config(_)));
    }

    #[test]
    fn validate_does_not_check_email_format() {
        let mut cfg = sample_config();
        cfg.impersonated_email = "not-an-email".into();
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn report_scopes_are_readonly() {
        assert!(REPORT_SCOPES.iter().all(|s| s.ends_with(".readonly")));
    }
}
