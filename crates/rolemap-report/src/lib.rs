//! # Rolemap Report
//!
//! This crate implements the role-assignment crawl and report on top of
//! [`rolemap_api`]: it walks the account → organization → project hierarchy,
//! lists the role assignments at every scope, resolves each assignment's
//! principal to a display name, and serializes the result as a CSV table.
//!
//! ## Pipeline
//!
//! ```text
//! crawl (scope enumeration)
//!   ├─ account scope ──────────────┐
//!   ├─ per org: org scope ─────────┤  list_role_assignments
//!   └─ per org, per project ───────┘
//!          │
//!          ▼ per assignment
//!   resolve (principal → ResolvedName)
//!          │
//!          ▼ once, at end of run
//!   report (AssignmentRecord → CSV rows)
//! ```
//!
//! Execution is strictly sequential: organizations in listing order,
//! projects within an organization in listing order, assignments within a
//! scope in listing order. Output row order follows directly, so two runs
//! against an unchanged backend produce byte-identical reports.
//!
//! ## Failure policy
//!
//! Listing failures are logged and treated as empty results; principal
//! lookup failures are logged and recorded as [`resolve::ResolvedName::Failed`]
//! so the row is still emitted with a sentinel name. No failure short of a
//! catastrophic transport error aborts the run.

pub mod crawl;
pub mod report;
pub mod resolve;

// Re-export main types
pub use crawl::{crawl, AssignmentRecord};
pub use report::{write_report, write_report_file, ReportRow, DEFAULT_REPORT_FILENAME};
pub use resolve::{resolve_principal, ResolveFailure, ResolvedName, BUILTIN_PREFIX};
