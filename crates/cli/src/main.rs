use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use gmr_core::config::{ReportConfig, DEFAULT_OUTPUT_FILE};
use tracing::error;
use tracing_subscriber::EnvFilter;

mod commands;

/// Git revision injected at build time, falling back to the crate version.
const VERSION: &str = match option_env!("GIT_VERSION") {
    Some(version) => version,
    None => env!("CARGO_PKG_VERSION"),
};

#[derive(Parser)]
#[command(
    name = "group_members_report",
    about = "Write a CSV of every Google Workspace group in a domain and its members",
    version = VERSION
)]
struct Cli {
    /// The json file from Google that contains the service account private material
    #[arg(long)]
    credentials_file: PathBuf,

    /// The admin user email to impersonate for access
    #[arg(long)]
    impersonated_email: String,

    /// The domain to query for groups
    #[arg(long)]
    domain: String,

    /// The csv file to write out
    #[arg(long, default_value = DEFAULT_OUTPUT_FILE)]
    output_file: PathBuf,
}

impl Cli {
    fn into_config(self) -> ReportConfig {
        ReportConfig {
            credentials_file: self.credentials_file,
            impersonated_email: self.impersonated_email,
            domain: self.domain,
            output_file: self.output_file,
        }
    }
}

/// `--help` and `--version` succeed; every other parse failure is a usage error.
fn parse_exit_status(err: &clap::Error) -> u8 {
    if err.use_stderr() {
        1
    } else {
        0
    }
}

/// Report a fatal run error with its stage context. Written to `out`
/// directly so a `RUST_LOG` filter cannot hide it.
fn report_failure<W: Write>(out: &mut W, err: &anyhow::Error) {
    error!("{err:#}");
    let _ = writeln!(out, "Error: {err:#}");
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return ExitCode::from(parse_exit_status(&e));
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match commands::report::run(&cli.into_config()).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            report_failure(&mut std::io::stderr(), &e);
            ExitCode::FAILURE
        }
    }
}
