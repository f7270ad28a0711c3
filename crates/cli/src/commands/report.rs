use anyhow::Context;
use gmr_core::config::{ReportConfig, REPORT_SCOPES};
use gmr_core::report::write_report_file;
use gmr_directory::auth::GoogleAuth;
use gmr_directory::client::DirectoryClient;
use gmr_directory::membership::fetch_domain_memberships;
use tracing::info;

/// Counts from a completed report run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportSummary {
    pub groups: usize,
    pub rows: usize,
}

/// Run the report: load credentials, fetch every group and its members, then write the CSV.
///
/// The output file is only touched after all fetching has succeeded.
pub async fn run(config: &ReportConfig) -> anyhow::Result<ReportSummary> {
    config.validate()?;

    let auth = GoogleAuth::from_service_account_file(
        &config.credentials_file,
        &config.impersonated_email,
        &REPORT_SCOPES,
    )
    .context("could not load credentials")?;

    let client = DirectoryClient::new(auth);
    generate(&client, config).await
}

async fn generate(
    client: &DirectoryClient,
    config: &ReportConfig,
) -> anyhow::Result<ReportSummary> {
    info!(
        domain = %config.domain,
        impersonated_email = %config.impersonated_email,
        "Starting report generation"
    );

    let fetched = fetch_domain_memberships(client, &config.domain)
        .await
        .context("error fetching group memberships")?;

    write_report_file(&config.output_file, &fetched.rows)
        .with_context(|| format!("error writing csv file {}", config.output_file.display()))?;

    let summary = ReportSummary {
        groups: fetched.group_count,
        rows: fetched.rows.len(),
    };

    info!(
        groups = summary.groups,
        rows = summary.rows,
        output = %config.output_file.display(),
        "Complete"
    );

    Ok(summary)
}
