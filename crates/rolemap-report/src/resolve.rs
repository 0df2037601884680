//! Principal resolution.
//!
//! Maps a role assignment's principal to a display name by dispatching on
//! the principal type (which selects the lookup endpoint) and the
//! principal's scope level (which selects the scope parameters sent with
//! the lookup). Resolution is best-effort: every failure mode produces a
//! [`ResolvedName::Failed`] value instead of an error, so the caller always
//! gets one result per principal.

use rolemap_api::{ApiError, PlatformClient, Principal, PrincipalType, Scope, ScopeLevel};
use tracing::{debug, warn};

/// Identifiers starting with this prefix denote built-in/system principals
/// that have no resolvable profile; they are reported verbatim without a
/// lookup call.
pub const BUILTIN_PREFIX: char = '_';

/// The outcome of resolving one principal.
///
/// The report writer turns `Failed` variants into sentinel text at
/// serialization time; no sentinel string is embedded in data earlier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedName {
    /// The lookup succeeded and returned a display name.
    Named(String),

    /// Built-in principal; the identifier stands in for the name.
    Builtin(String),

    /// Resolution failed; the reason selects the sentinel text.
    Failed(ResolveFailure),
}

/// Why a principal could not be resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveFailure {
    /// The principal type has no lookup endpoint; no call was made.
    UnrecognizedType(String),

    /// The lookup request failed (non-success status or transport error).
    FetchFailed,

    /// The lookup succeeded but the envelope carried no name.
    MissingName,

    /// The lookup succeeded but the body did not match the expected shape.
    MalformedResponse,
}

/// Resolve a principal observed at `scope` to a display name.
///
/// `scope` is the scope the role assignment was listed at; the principal's
/// own scope level decides how much of it accompanies the lookup:
///
/// | scope level       | parameters sent                 |
/// |-------------------|---------------------------------|
/// | account (default) | account only                    |
/// | organization      | account + org                   |
/// | project           | account + org + project         |
/// | unrecognized      | account only, with a diagnostic |
pub async fn resolve_principal(
    client: &PlatformClient,
    principal: &Principal,
    scope: &Scope,
) -> ResolvedName {
    if principal.identifier.starts_with(BUILTIN_PREFIX) {
        debug!(
            identifier = %principal.identifier,
            "Built-in principal, skipping lookup"
        );
        return ResolvedName::Builtin(principal.identifier.clone());
    }

    let lookup_scope = lookup_scope(principal, scope);

    let result = match &principal.principal_type {
        PrincipalType::User => client.user_name(&principal.identifier, &lookup_scope).await,
        PrincipalType::UserGroup => {
            client
                .user_group_name(&principal.identifier, &lookup_scope)
                .await
        }
        PrincipalType::ServiceAccount => {
            client
                .service_account_name(&principal.identifier, &lookup_scope)
                .await
        }
        PrincipalType::Unrecognized(raw) => {
            warn!(
                principal_type = %raw,
                identifier = %principal.identifier,
                "Unrecognized principal type, no lookup endpoint"
            );
            return ResolvedName::Failed(ResolveFailure::UnrecognizedType(raw.clone()));
        }
    };

    match result {
        Ok(Some(name)) => ResolvedName::Named(name),
        Ok(None) => {
            warn!(
                identifier = %principal.identifier,
                principal_type = %principal.principal_type,
                "Lookup returned no display name"
            );
            ResolvedName::Failed(ResolveFailure::MissingName)
        }
        Err(ApiError::Decode { url, message }) => {
            warn!(url = %url, message = %message, "Malformed lookup response");
            ResolvedName::Failed(ResolveFailure::MalformedResponse)
        }
        Err(err) => {
            warn!(
                identifier = %principal.identifier,
                principal_type = %principal.principal_type,
                error = %err,
                "Principal lookup failed"
            );
            ResolvedName::Failed(ResolveFailure::FetchFailed)
        }
    }
}

/// The scope parameters to send with a lookup, driven by the principal's
/// scope level. An unrecognized level falls back to an account-only lookup
/// with a diagnostic; the assignment is still resolved best-effort.
fn lookup_scope(principal: &Principal, observed: &Scope) -> Scope {
    match principal.scope_level() {
        ScopeLevel::Account => Scope::account(&observed.account),
        ScopeLevel::Organization => match &observed.org {
            Some(org) => Scope::org(&observed.account, org),
            // An org-level principal on an account-level assignment has no
            // org to scope the lookup with.
            None => Scope::account(&observed.account),
        },
        ScopeLevel::Project => match (&observed.org, &observed.project) {
            (Some(org), Some(project)) => Scope::project(&observed.account, org, project),
            (Some(org), None) => Scope::org(&observed.account, org),
            _ => Scope::account(&observed.account),
        },
        ScopeLevel::Unrecognized(raw) => {
            warn!(
                scope_level = %raw,
                identifier = %principal.identifier,
                "Unrecognized principal scope level, falling back to account-level lookup"
            );
            Scope::account(&observed.account)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rolemap_api::ApiConfig;

    fn principal(principal_type: &str, identifier: &str, scope_level: Option<&str>) -> Principal {
        Principal {
            principal_type: PrincipalType::from(principal_type.to_string()),
            identifier: identifier.to_string(),
            scope_level: scope_level.map(|s| s.to_string()),
        }
    }

    fn offline_client() -> PlatformClient {
        // Points at nothing; tests using it must not issue requests.
        PlatformClient::new(ApiConfig::new("http://127.0.0.1:1", "key", "acct")).unwrap()
    }

    #[tokio::test]
    async fn test_builtin_prefix_skips_lookup() {
        let client = offline_client();
        let scope = Scope::account("acct");
        let result = resolve_principal(
            &client,
            &principal("USER_GROUP", "_account_all_users", Some("account")),
            &scope,
        )
        .await;
        assert_eq!(
            result,
            ResolvedName::Builtin("_account_all_users".to_string())
        );
    }

    #[tokio::test]
    async fn test_unrecognized_type_skips_lookup() {
        let client = offline_client();
        let scope = Scope::account("acct");
        let result = resolve_principal(&client, &principal("ROBOT", "r2", None), &scope).await;
        assert_eq!(
            result,
            ResolvedName::Failed(ResolveFailure::UnrecognizedType("ROBOT".to_string()))
        );
    }

    #[tokio::test]
    async fn test_transport_failure_maps_to_fetch_failed() {
        let client = offline_client();
        let scope = Scope::account("acct");
        let result = resolve_principal(&client, &principal("USER", "u1", None), &scope).await;
        assert_eq!(result, ResolvedName::Failed(ResolveFailure::FetchFailed));
    }

    #[test]
    fn test_lookup_scope_account_level_default() {
        let observed = Scope::project("acct", "org1", "proj1");
        let scope = lookup_scope(&principal("USER", "u1", None), &observed);
        assert_eq!(scope, Scope::account("acct"));
    }

    #[test]
    fn test_lookup_scope_org_level() {
        let observed = Scope::project("acct", "org1", "proj1");
        let scope = lookup_scope(&principal("USER", "u1", Some("organization")), &observed);
        assert_eq!(scope, Scope::org("acct", "org1"));
    }

    #[test]
    fn test_lookup_scope_project_level() {
        let observed = Scope::project("acct", "org1", "proj1");
        let scope = lookup_scope(&principal("USER", "u1", Some("project")), &observed);
        assert_eq!(scope, Scope::project("acct", "org1", "proj1"));
    }

    #[test]
    fn test_lookup_scope_unrecognized_falls_back_to_account() {
        let observed = Scope::project("acct", "org1", "proj1");
        let scope = lookup_scope(&principal("USER", "u1", Some("galaxy")), &observed);
        assert_eq!(scope, Scope::account("acct"));
    }

    #[test]
    fn test_lookup_scope_org_level_without_observed_org() {
        let observed = Scope::account("acct");
        let scope = lookup_scope(&principal("USER", "u1", Some("organization")), &observed);
        assert_eq!(scope, Scope::account("acct"));
    }
}
