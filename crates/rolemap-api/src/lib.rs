//! # Rolemap API Client
//!
//! This crate provides a typed HTTP client for Harness-style access-control
//! APIs, covering the three endpoint families the role-assignment report
//! needs:
//!
//! - **Resource listing**: organizations (`/v1/orgs`) and projects
//!   (`/v1/orgs/{org}/projects`)
//! - **Authorization**: role-assignment pages (`/authz/api/roleassignments`)
//! - **Principal lookup**: user, user-group, and service-account profiles
//!   (`/ng/api/...`)
//!
//! ## Overview
//!
//! The rolemap-api crate handles:
//! - **Configuration**: base URL, API key, and account identifier, built once
//!   at startup and passed by reference (no global mutable state)
//! - **Scopes**: positions in the account → organization → project hierarchy,
//!   encoded as query parameters on every request
//! - **Wire types**: tolerant serde models for the service's JSON envelopes
//! - **Errors**: a closed error taxonomy distinguishing transport failures,
//!   non-2xx responses, and malformed bodies
//!
//! ## Usage
//!
//! ```rust,no_run
//! use rolemap_api::{ApiConfig, PlatformClient, Scope};
//!
//! async fn example() -> Result<(), rolemap_api::ApiError> {
//!     let config = ApiConfig::new("https://app.harness.io", "my-key", "my-account");
//!     let client = PlatformClient::new(config)?;
//!
//!     let orgs = client.list_organizations().await?;
//!     for org in &orgs {
//!         let scope = Scope::org("my-account", &org.identifier);
//!         let assignments = client.list_role_assignments(&scope).await?;
//!         println!("{}: {} assignments", org.identifier, assignments.len());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! Every request carries the service's two fixed authentication headers
//! (`x-api-key` and `Harness-Account`). All methods are async and block the
//! caller until the response arrives; the crate performs no retries, no
//! caching, and no concurrent fan-out.

pub mod client;
pub mod config;
pub mod types;

// Re-export main types for convenience
pub use client::{ApiError, PlatformClient, PAGE_INDEX, PAGE_SIZE};
pub use config::ApiConfig;
pub use types::{
    Organization, Principal, PrincipalType, Project, RoleAssignment, Scope, ScopeLevel,
};
