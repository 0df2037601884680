//! Scope enumeration and the sequential crawl.
//!
//! Walks the hierarchy top-down in a fixed order: account-scope role
//! assignments first, then for each organization (in listing order) the
//! org-scope assignments, then each of its projects (in listing order).
//! Every assignment is resolved and appended to the accumulator in the
//! order it was listed, which makes the report deterministic for an
//! unchanged backend.
//!
//! Listing failures are never fatal: a failed call is logged and treated
//! as an empty result for that scope, and the crawl moves on.

use crate::resolve::{resolve_principal, ResolvedName};
use rolemap_api::{Organization, PlatformClient, PrincipalType, Project, Scope};
use tracing::{info, warn};

/// One processed role assignment: the scope it was observed at plus the
/// resolved principal. Exactly one record exists per listed assignment.
#[derive(Debug, Clone)]
pub struct AssignmentRecord {
    /// Scope the assignment was listed at.
    pub scope: Scope,

    /// Role identifier.
    pub role_identifier: String,

    /// Principal type, as reported by the service.
    pub principal_type: PrincipalType,

    /// Resolution outcome for the principal.
    pub principal_name: ResolvedName,

    /// Resource group the role applies to, when present.
    pub resource_group_identifier: Option<String>,
}

/// Crawl the full hierarchy and return one record per role assignment.
pub async fn crawl(client: &PlatformClient) -> Vec<AssignmentRecord> {
    let account = client.config().account_identifier.clone();
    let mut records = Vec::new();

    collect_scope(client, Scope::account(&account), &mut records).await;

    for org in list_organizations(client).await {
        info!(org = %org.identifier, name = %org.name, "Analyzing organization");
        collect_scope(client, Scope::org(&account, &org.identifier), &mut records).await;

        for project in list_projects(client, &org.identifier).await {
            info!(
                org = %org.identifier,
                project = %project.identifier,
                name = %project.name,
                "Analyzing project"
            );
            collect_scope(
                client,
                Scope::project(&account, &org.identifier, &project.identifier),
                &mut records,
            )
            .await;
        }
    }

    records
}

/// List organizations, treating any failure as an empty result.
async fn list_organizations(client: &PlatformClient) -> Vec<Organization> {
    match client.list_organizations().await {
        Ok(orgs) => orgs,
        Err(err) => {
            warn!(error = %err, "Failed to list organizations");
            Vec::new()
        }
    }
}

/// List an organization's projects, treating any failure as an empty result.
async fn list_projects(client: &PlatformClient, org_id: &str) -> Vec<Project> {
    match client.list_projects(org_id).await {
        Ok(projects) => projects,
        Err(err) => {
            warn!(org = %org_id, error = %err, "Failed to list projects");
            Vec::new()
        }
    }
}

/// Fetch one scope's role assignments, resolve each principal, and append
/// the records in listing order. A listing failure leaves the accumulator
/// untouched.
async fn collect_scope(client: &PlatformClient, scope: Scope, records: &mut Vec<AssignmentRecord>) {
    let assignments = match client.list_role_assignments(&scope).await {
        Ok(assignments) => assignments,
        Err(err) => {
            warn!(
                org = ?scope.org,
                project = ?scope.project,
                error = %err,
                "Failed to list role assignments, treating scope as empty"
            );
            return;
        }
    };

    for assignment in assignments {
        let principal_name = resolve_principal(client, &assignment.principal, &scope).await;
        records.push(AssignmentRecord {
            scope: scope.clone(),
            role_identifier: assignment.role_identifier,
            principal_type: assignment.principal.principal_type,
            principal_name,
            resource_group_identifier: assignment.resource_group_identifier,
        });
    }
}
