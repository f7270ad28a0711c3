//! CSV report writer: one `group,email` row per group membership.

use std::io::Write;
use std::path::Path;

use crate::error::{ReportError, Result};

/// Header written as the first record of every report.
pub const REPORT_HEADER: [&str; 2] = ["group", "email"];

/// A single (group email, member email) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    pub group: String,
    pub email: String,
}

impl ReportRow {
    pub fn new(group: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            email: email.into(),
        }
    }
}

/// Write the header and every row, in order, to `writer`.
///
/// Fields are quoted only when they contain the delimiter, a quote or a
/// line break.
pub fn write_report<W: Write>(writer: W, rows: &[ReportRow]) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    wtr.write_record(REPORT_HEADER).map_err(csv_error)?;
    for row in rows {
        wtr.write_record([row.group.as_str(), row.email.as_str()])
            .map_err(csv_error)?;
    }

    wtr.flush()?;
    Ok(())
}

/// Create (or truncate) `path` and write the full report to it.
///
/// A failure mid-write can leave a truncated file behind.
pub fn write_report_file(path: &Path, rows: &[ReportRow]) -> Result<()> {
    let file = std::fs::File::create(path)?;
    write_report(std::io::BufWriter::new(file), rows)
}

fn csv_error(e: csv::Error) -> ReportError {
    match e.into_kind() {
        csv::ErrorKind::Io(io) => ReportError::Io(io),
        other => ReportError::Serialization(format!("CSV write error: {other:?}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(rows: &[ReportRow]) -> String {
        let mut buf = Vec::new();
        write_report(&mut buf, rows).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn empty_report_is_header_only() {
        assert_eq!(render(&[]), "group,email\n");
    }

    #[test]
    fn rows_follow_input_order() {
        let rows = vec![
            ReportRow::new("eng@example.com", "a@example.com"),
            ReportRow::new("eng@example.com", "b@example.com"),
        ];
        assert_eq!(
            render(&rows),
            "group,email\neng@example.com,a@example.com\neng@example.com,b@example.com\n"
        );
    }

    #[test]
    fn fields_with_special_characters_are_quoted() {
        let rows = vec![
            ReportRow::new("a,b@example.com", "say \"hi\"@example.com"),
            ReportRow::new("multi\nline@example.com", "plain@example.com"),
        ];
        assert_eq!(
            render(&rows),
            "group,email\n\"a,b@example.com\",\"say \"\"hi\"\"@example.com\"\n\"multi\nline@example.com\",plain@example.com\n"
        );
    }

    #[test]
    fn empty_member_email_is_written_as_empty_field() {
        let rows = vec![ReportRow::new("eng@example.com", "")];
        assert_eq!(render(&rows), "group,email\neng@example.com,\n");
    }

    #[test]
    fn write_report_file_truncates_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.csv");
        std::fs::write(&path, "stale content that is much longer than the new report\n").unwrap();

        write_report_file(&path, &[ReportRow::new("g@example.com", "m@example.com")]).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "group,email\ng@example.com,m@example.com\n");
    }

    #[test]
    fn write_report_file_fails_for_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("report.csv");

        let err = write_report_file(&path, &[]).unwrap_err();
        assert!(matches!(err, ReportError::Io(_)));
    }
}
