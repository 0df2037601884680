//! Domain and wire types for the access-control API.
//!
//! This module provides the scope hierarchy, the closed principal-type and
//! scope-level enumerations, and tolerant serde models for the service's
//! JSON envelopes. Wire fields are camelCase; every envelope level is
//! optional so a partial body decodes instead of failing the request.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A position in the account → organization → project hierarchy.
///
/// Scopes are used only as request parameters. A project scope always
/// carries its owning organization; the constructors make a
/// project-without-org scope unrepresentable.
///
/// # Examples
///
/// ```
/// use rolemap_api::Scope;
///
/// let scope = Scope::project("acct", "org1", "proj1");
/// assert_eq!(
///     scope.query_params(),
///     vec![
///         ("accountIdentifier", "acct".to_string()),
///         ("orgIdentifier", "org1".to_string()),
///         ("projectIdentifier", "proj1".to_string()),
///     ]
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scope {
    /// Account identifier (always present).
    pub account: String,

    /// Organization identifier, if the scope is at or below org level.
    pub org: Option<String>,

    /// Project identifier, if the scope is at project level.
    pub project: Option<String>,
}

impl Scope {
    /// Account-level scope.
    pub fn account(account: impl Into<String>) -> Self {
        Self {
            account: account.into(),
            org: None,
            project: None,
        }
    }

    /// Organization-level scope.
    pub fn org(account: impl Into<String>, org: impl Into<String>) -> Self {
        Self {
            account: account.into(),
            org: Some(org.into()),
            project: None,
        }
    }

    /// Project-level scope. A project always implies its owning org.
    pub fn project(
        account: impl Into<String>,
        org: impl Into<String>,
        project: impl Into<String>,
    ) -> Self {
        Self {
            account: account.into(),
            org: Some(org.into()),
            project: Some(project.into()),
        }
    }

    /// Query parameters identifying this scope.
    ///
    /// `accountIdentifier` is always emitted; `orgIdentifier` and
    /// `projectIdentifier` only when the scope includes them.
    pub fn query_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![("accountIdentifier", self.account.clone())];
        if let Some(ref org) = self.org {
            params.push(("orgIdentifier", org.clone()));
        }
        if let Some(ref project) = self.project {
            params.push(("projectIdentifier", project.clone()));
        }
        params
    }
}

/// The scope level a principal was granted at.
///
/// Parsed case-insensitively from the wire value; an absent or null value
/// defaults to account level. Unrecognized values are preserved for
/// diagnostics rather than rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScopeLevel {
    /// Account-level principal (the default when the field is absent).
    Account,

    /// Organization-level principal.
    Organization,

    /// Project-level principal.
    Project,

    /// A value this client does not recognize, kept verbatim.
    Unrecognized(String),
}

impl ScopeLevel {
    /// Parse a wire scope level. `None` defaults to `Account`.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            None => Self::Account,
            Some(value) => match value.to_ascii_lowercase().as_str() {
                "" | "account" => Self::Account,
                "organization" => Self::Organization,
                "project" => Self::Project,
                _ => Self::Unrecognized(value.to_string()),
            },
        }
    }
}

/// The kind of identity a role assignment is granted to.
///
/// Closed enumeration over the wire values `USER`, `USER_GROUP`, and
/// `SERVICE_ACCOUNT`, with an explicit fallback variant so an unknown type
/// flows through the pipeline instead of failing deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PrincipalType {
    /// A human user.
    User,

    /// A user group.
    UserGroup,

    /// A service account.
    ServiceAccount,

    /// A type this client does not recognize, kept verbatim.
    Unrecognized(String),
}

impl From<String> for PrincipalType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "USER" => Self::User,
            "USER_GROUP" => Self::UserGroup,
            "SERVICE_ACCOUNT" => Self::ServiceAccount,
            _ => Self::Unrecognized(value),
        }
    }
}

impl From<PrincipalType> for String {
    fn from(value: PrincipalType) -> Self {
        value.to_string()
    }
}

impl fmt::Display for PrincipalType {
    /// Reproduces the wire form (`USER`, `USER_GROUP`, `SERVICE_ACCOUNT`,
    /// or the unrecognized value verbatim).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User => f.write_str("USER"),
            Self::UserGroup => f.write_str("USER_GROUP"),
            Self::ServiceAccount => f.write_str("SERVICE_ACCOUNT"),
            Self::Unrecognized(raw) => f.write_str(raw),
        }
    }
}

/// An organization visible to the calling credential.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Organization {
    /// Organization identifier.
    pub identifier: String,

    /// Human-readable name.
    #[serde(default)]
    pub name: String,
}

/// Wire envelope for the organization listing: `[{ "org": {...} }]`.
#[derive(Debug, Clone, Deserialize)]
pub struct OrgListItem {
    /// The wrapped organization.
    pub org: Organization,
}

/// A project under an organization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    /// Project identifier.
    pub identifier: String,

    /// Human-readable name.
    #[serde(default)]
    pub name: String,

    /// Owning organization identifier, when the service includes it.
    #[serde(rename = "orgIdentifier", default)]
    pub org_identifier: Option<String>,
}

/// Wire envelope for the project listing: `[{ "project": {...} }]`.
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectListItem {
    /// The wrapped project.
    pub project: Project,
}

/// The principal a role assignment is granted to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Principal {
    /// Principal type.
    #[serde(rename = "type")]
    pub principal_type: PrincipalType,

    /// Principal identifier.
    pub identifier: String,

    /// Scope level the principal lives at, as sent by the service.
    /// Parse with [`ScopeLevel::parse`]; absent means account level.
    #[serde(rename = "scopeLevel", default)]
    pub scope_level: Option<String>,
}

impl Principal {
    /// The principal's scope level as a closed enum.
    pub fn scope_level(&self) -> ScopeLevel {
        ScopeLevel::parse(self.scope_level.as_deref())
    }
}

/// A binding of a role and resource group to a principal at a scope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleAssignment {
    /// Role identifier.
    #[serde(rename = "roleIdentifier")]
    pub role_identifier: String,

    /// Resource group the role's permissions apply to, when present.
    #[serde(rename = "resourceGroupIdentifier", default)]
    pub resource_group_identifier: Option<String>,

    /// Principal the role is granted to.
    pub principal: Principal,
}

/// Wire envelope wrapping a single role assignment in a listing page.
#[derive(Debug, Clone, Deserialize)]
pub struct RoleAssignmentItem {
    /// The wrapped role assignment.
    #[serde(rename = "roleAssignment")]
    pub role_assignment: RoleAssignment,
}

/// Page envelope for the role-assignment listing:
/// `{ "data": { "content": [...] } }`. Every level is optional so a
/// partial body decodes as an empty page.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RoleAssignmentPage {
    /// Page payload.
    #[serde(default)]
    pub data: Option<RoleAssignmentContent>,
}

/// Content of a role-assignment page.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RoleAssignmentContent {
    /// The assignments on this page, in listing order.
    #[serde(default)]
    pub content: Vec<RoleAssignmentItem>,
}

impl RoleAssignmentPage {
    /// Flatten the envelope into the assignments it carries.
    pub fn into_assignments(self) -> Vec<RoleAssignment> {
        self.data
            .map(|data| {
                data.content
                    .into_iter()
                    .map(|item| item.role_assignment)
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Envelope for the user aggregate lookup: `{ "data": { "user": { "name" } } }`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserAggregateResponse {
    /// Lookup payload.
    #[serde(default)]
    pub data: Option<UserAggregate>,
}

/// Payload of a user aggregate lookup.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserAggregate {
    /// Nested user object.
    #[serde(default)]
    pub user: Option<UserInfo>,
}

/// The user object inside a user aggregate.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserInfo {
    /// Display name.
    #[serde(default)]
    pub name: Option<String>,
}

impl UserAggregateResponse {
    /// Extract the display name, if the envelope carries one.
    pub fn name(self) -> Option<String> {
        self.data?.user?.name
    }
}

/// Envelope for the user-group lookup: `{ "data": { "name" } }`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserGroupResponse {
    /// Lookup payload.
    #[serde(default)]
    pub data: Option<UserGroupInfo>,
}

/// Payload of a user-group lookup.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserGroupInfo {
    /// Display name.
    #[serde(default)]
    pub name: Option<String>,
}

impl UserGroupResponse {
    /// Extract the display name, if the envelope carries one.
    pub fn name(self) -> Option<String> {
        self.data?.name
    }
}

/// Envelope for the service-account aggregate lookup:
/// `{ "data": { "serviceAccount": { "name" } } }`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServiceAccountAggregateResponse {
    /// Lookup payload.
    #[serde(default)]
    pub data: Option<ServiceAccountAggregate>,
}

/// Payload of a service-account aggregate lookup.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServiceAccountAggregate {
    /// Nested service-account object.
    #[serde(rename = "serviceAccount", default)]
    pub service_account: Option<ServiceAccountInfo>,
}

/// The service-account object inside the aggregate.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServiceAccountInfo {
    /// Display name.
    #[serde(default)]
    pub name: Option<String>,
}

impl ServiceAccountAggregateResponse {
    /// Extract the display name, if the envelope carries one.
    pub fn name(self) -> Option<String> {
        self.data?.service_account?.name
    }
}
