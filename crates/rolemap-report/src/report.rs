//! CSV report serialization.
//!
//! Turns accumulated [`AssignmentRecord`]s into the fixed-column CSV table.
//! Column order and header names are an external contract consumed by
//! downstream tooling and must not change:
//! `Account,Organization,Project,RoleAssignment,PrincipalType,PrincipalName,ResourceGroupIdentifier`.
//!
//! Sentinel text for unresolved principals is produced here, at
//! serialization time, from the structured [`ResolvedName`] carried by the
//! record.

use crate::crawl::AssignmentRecord;
use crate::resolve::{ResolveFailure, ResolvedName};
use std::io::Write;
use std::path::Path;

/// Default output filename.
pub const DEFAULT_REPORT_FILENAME: &str = "role_assignments_summary.csv";

/// Placeholder for absent org/project/resource-group values.
const NOT_APPLICABLE: &str = "N/A";

/// One row of the report, flattened for CSV export.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ReportRow {
    /// Account identifier.
    #[serde(rename = "Account")]
    pub account: String,

    /// Organization identifier, or `N/A` for account-level rows.
    #[serde(rename = "Organization")]
    pub organization: String,

    /// Project identifier, or `N/A` for account- and org-level rows.
    #[serde(rename = "Project")]
    pub project: String,

    /// Role identifier.
    #[serde(rename = "RoleAssignment")]
    pub role_assignment: String,

    /// Principal type in wire form.
    #[serde(rename = "PrincipalType")]
    pub principal_type: String,

    /// Resolved display name, or a sentinel describing the failure.
    #[serde(rename = "PrincipalName")]
    pub principal_name: String,

    /// Resource group identifier, or `N/A`.
    #[serde(rename = "ResourceGroupIdentifier")]
    pub resource_group_identifier: String,
}

impl From<&AssignmentRecord> for ReportRow {
    fn from(record: &AssignmentRecord) -> Self {
        Self {
            account: record.scope.account.clone(),
            organization: record
                .scope
                .org
                .clone()
                .unwrap_or_else(|| NOT_APPLICABLE.to_string()),
            project: record
                .scope
                .project
                .clone()
                .unwrap_or_else(|| NOT_APPLICABLE.to_string()),
            role_assignment: record.role_identifier.clone(),
            principal_type: record.principal_type.to_string(),
            principal_name: principal_name_text(&record.principal_name),
            resource_group_identifier: record
                .resource_group_identifier
                .clone()
                .unwrap_or_else(|| NOT_APPLICABLE.to_string()),
        }
    }
}

/// The PrincipalName column text for a resolution outcome.
fn principal_name_text(name: &ResolvedName) -> String {
    match name {
        ResolvedName::Named(name) | ResolvedName::Builtin(name) => name.clone(),
        ResolvedName::Failed(ResolveFailure::UnrecognizedType(_)) => {
            "Unknown Principal Type".to_string()
        }
        ResolvedName::Failed(ResolveFailure::FetchFailed) => "Details Fetch Failed".to_string(),
        ResolvedName::Failed(ResolveFailure::MissingName) => "Unknown".to_string(),
        ResolvedName::Failed(ResolveFailure::MalformedResponse) => "Details Not Found".to_string(),
    }
}

/// Serialize the records to CSV, header first, one row per record, in
/// record order.
pub fn write_report<W: Write>(records: &[AssignmentRecord], writer: W) -> Result<(), csv::Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for record in records {
        csv_writer.serialize(ReportRow::from(record))?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Serialize the records to a CSV file at `path`.
pub fn write_report_file(
    records: &[AssignmentRecord],
    path: impl AsRef<Path>,
) -> Result<(), csv::Error> {
    let mut csv_writer = csv::Writer::from_path(path)?;
    for record in records {
        csv_writer.serialize(ReportRow::from(record))?;
    }
    csv_writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rolemap_api::{PrincipalType, Scope};

    fn record(scope: Scope, name: ResolvedName) -> AssignmentRecord {
        AssignmentRecord {
            scope,
            role_identifier: "_account_viewer".to_string(),
            principal_type: PrincipalType::User,
            principal_name: name,
            resource_group_identifier: Some("_all_resources".to_string()),
        }
    }

    fn csv_string(records: &[AssignmentRecord]) -> String {
        let mut buf = Vec::new();
        write_report(records, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_header_is_exact_contract() {
        let output = csv_string(&[]);
        assert_eq!(
            output,
            "Account,Organization,Project,RoleAssignment,PrincipalType,PrincipalName,ResourceGroupIdentifier\n"
        );
    }

    #[test]
    fn test_account_level_row_uses_na() {
        let output = csv_string(&[record(
            Scope::account("acct"),
            ResolvedName::Named("Alice".to_string()),
        )]);
        let data_row = output.lines().nth(1).unwrap();
        assert_eq!(
            data_row,
            "acct,N/A,N/A,_account_viewer,USER,Alice,_all_resources"
        );
    }

    #[test]
    fn test_project_level_row_carries_org_and_project() {
        let output = csv_string(&[record(
            Scope::project("acct", "org1", "proj1"),
            ResolvedName::Named("Alice".to_string()),
        )]);
        let data_row = output.lines().nth(1).unwrap();
        assert_eq!(
            data_row,
            "acct,org1,proj1,_account_viewer,USER,Alice,_all_resources"
        );
    }

    #[test]
    fn test_missing_resource_group_is_na() {
        let mut rec = record(
            Scope::org("acct", "org1"),
            ResolvedName::Named("Alice".to_string()),
        );
        rec.resource_group_identifier = None;
        let output = csv_string(&[rec]);
        assert!(output.lines().nth(1).unwrap().ends_with(",N/A"));
    }

    #[test]
    fn test_sentinel_text_per_failure() {
        assert_eq!(
            principal_name_text(&ResolvedName::Failed(ResolveFailure::FetchFailed)),
            "Details Fetch Failed"
        );
        assert_eq!(
            principal_name_text(&ResolvedName::Failed(ResolveFailure::UnrecognizedType(
                "ROBOT".to_string()
            ))),
            "Unknown Principal Type"
        );
        assert_eq!(
            principal_name_text(&ResolvedName::Failed(ResolveFailure::MissingName)),
            "Unknown"
        );
        assert_eq!(
            principal_name_text(&ResolvedName::Failed(ResolveFailure::MalformedResponse)),
            "Details Not Found"
        );
    }

    #[test]
    fn test_builtin_name_verbatim() {
        assert_eq!(
            principal_name_text(&ResolvedName::Builtin("_account_all_users".to_string())),
            "_account_all_users"
        );
    }

    #[test]
    fn test_write_report_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_REPORT_FILENAME);
        let records = vec![record(
            Scope::account("acct"),
            ResolvedName::Named("Alice".to_string()),
        )];

        write_report_file(&records, &path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents.lines().count(), 2);
        assert!(contents.starts_with("Account,Organization,Project,"));
    }

    #[test]
    fn test_one_row_per_record() {
        let records = vec![
            record(Scope::account("acct"), ResolvedName::Named("A".to_string())),
            record(
                Scope::org("acct", "org1"),
                ResolvedName::Failed(ResolveFailure::FetchFailed),
            ),
            record(
                Scope::project("acct", "org1", "proj1"),
                ResolvedName::Builtin("_b".to_string()),
            ),
        ];
        let output = csv_string(&records);
        // Header plus one line per record.
        assert_eq!(output.lines().count(), 4);
    }
}
