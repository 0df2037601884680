//! Access-control service client.
//!
//! HTTP client for the Harness-style access-control API. Provides the
//! listing calls the crawl needs (organizations, projects, role-assignment
//! pages) and the per-principal lookup calls (user, user-group,
//! service-account profiles).
//!
//! Every request attaches the two fixed authentication headers and the
//! query parameters of the scope it targets. Calls are sequential and
//! blocking from the caller's perspective; the client performs no retries
//! and no caching.

use crate::config::{ApiConfig, ACCOUNT_HEADER, API_KEY_HEADER};
use crate::types::{
    OrgListItem, Organization, Project, ProjectListItem, RoleAssignment, RoleAssignmentPage, Scope,
    ServiceAccountAggregateResponse, UserAggregateResponse, UserGroupResponse,
};
use reqwest::Client;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, instrument, warn};

/// Role-assignment pages are requested at a fixed size.
pub const PAGE_SIZE: u32 = 50;

/// Only the first page is requested; the service's later pages are not
/// iterated (baseline behavior for scopes with more than [`PAGE_SIZE`]
/// assignments).
pub const PAGE_INDEX: u32 = 0;

/// Client errors.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport-level failure (connect, DNS, timeout, TLS).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The service returned a non-success status. The request URL and
    /// response body are captured so callers can log them.
    #[error("API error ({status}) for {url}: {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Request URL.
        url: String,
        /// Response body.
        body: String,
    },

    /// The response body did not match the expected shape.
    #[error("Invalid API response from {url}: {message}")]
    Decode {
        /// Request URL.
        url: String,
        /// Decode error message.
        message: String,
    },
}

/// Client for the access-control service.
///
/// Holds one `reqwest::Client` and the configuration, both shared by
/// reference across the whole run.
#[derive(Clone)]
pub struct PlatformClient {
    /// HTTP client instance.
    client: Client,

    /// Service configuration.
    config: ApiConfig,
}

impl PlatformClient {
    /// Create a new client from the given configuration.
    pub fn new(config: ApiConfig) -> Result<Self, ApiError> {
        let client = Client::builder().timeout(config.timeout()).build()?;
        Ok(Self { client, config })
    }

    /// The configuration this client was built with.
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// List the organizations visible to the calling credential.
    #[instrument(skip(self))]
    pub async fn list_organizations(&self) -> Result<Vec<Organization>, ApiError> {
        debug!("Listing organizations");

        let url = self.config.url("/v1/orgs");
        let response = self.get(&url).send().await?;
        let items: Vec<OrgListItem> = self.handle_response(response).await?;
        Ok(items.into_iter().map(|item| item.org).collect())
    }

    /// List the projects under an organization.
    #[instrument(skip(self), fields(org_id = %org_id))]
    pub async fn list_projects(&self, org_id: &str) -> Result<Vec<Project>, ApiError> {
        debug!("Listing projects");

        let url = self.config.url(&format!("/v1/orgs/{}/projects", org_id));
        let response = self.get(&url).send().await?;
        let items: Vec<ProjectListItem> = self.handle_response(response).await?;
        Ok(items.into_iter().map(|item| item.project).collect())
    }

    /// List the first page of role assignments at a scope.
    ///
    /// A missing `data` or `content` in the envelope decodes as an empty
    /// page rather than an error.
    #[instrument(skip(self), fields(org = ?scope.org, project = ?scope.project))]
    pub async fn list_role_assignments(
        &self,
        scope: &Scope,
    ) -> Result<Vec<RoleAssignment>, ApiError> {
        debug!("Listing role assignments");

        let url = self.config.url("/authz/api/roleassignments");
        let response = self
            .get(&url)
            .query(&scope.query_params())
            .query(&[("pageIndex", PAGE_INDEX), ("pageSize", PAGE_SIZE)])
            .send()
            .await?;
        let page: RoleAssignmentPage = self.handle_response(response).await?;
        Ok(page.into_assignments())
    }

    /// Look up a user's display name.
    ///
    /// `Ok(None)` means the lookup succeeded but the envelope carried no
    /// name.
    #[instrument(skip(self), fields(user_id = %user_id))]
    pub async fn user_name(
        &self,
        user_id: &str,
        scope: &Scope,
    ) -> Result<Option<String>, ApiError> {
        let url = self.config.url(&format!("/ng/api/user/aggregate/{}", user_id));
        let response = self.get(&url).query(&scope.query_params()).send().await?;
        let envelope: UserAggregateResponse = self.handle_response(response).await?;
        Ok(envelope.name())
    }

    /// Look up a user group's display name.
    #[instrument(skip(self), fields(group_id = %group_id))]
    pub async fn user_group_name(
        &self,
        group_id: &str,
        scope: &Scope,
    ) -> Result<Option<String>, ApiError> {
        let url = self.config.url(&format!("/ng/api/user-groups/{}", group_id));
        let response = self.get(&url).query(&scope.query_params()).send().await?;
        let envelope: UserGroupResponse = self.handle_response(response).await?;
        Ok(envelope.name())
    }

    /// Look up a service account's display name.
    #[instrument(skip(self), fields(service_account_id = %service_account_id))]
    pub async fn service_account_name(
        &self,
        service_account_id: &str,
        scope: &Scope,
    ) -> Result<Option<String>, ApiError> {
        let url = self
            .config
            .url(&format!("/ng/api/serviceaccount/aggregate/{}", service_account_id));
        let response = self.get(&url).query(&scope.query_params()).send().await?;
        let envelope: ServiceAccountAggregateResponse = self.handle_response(response).await?;
        Ok(envelope.name())
    }

    /// Build a GET request with the fixed authentication headers.
    fn get(&self, url: &str) -> reqwest::RequestBuilder {
        self.client
            .get(url)
            .header(API_KEY_HEADER, &self.config.api_key)
            .header(ACCOUNT_HEADER, &self.config.account_identifier)
    }

    /// Handle an API response: capture URL and body on non-success,
    /// decode JSON on success.
    async fn handle_response<T>(&self, response: reqwest::Response) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        let status = response.status();
        let url = response.url().to_string();

        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            warn!(status = status.as_u16(), url = %url, "API request failed");
            return Err(ApiError::Api {
                status: status.as_u16(),
                url,
                body,
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| ApiError::Decode {
            url,
            message: e.to_string(),
        })
    }
}
