//! # MandatoPro Core - access control for the constituent-management app
//!
//! Decides who may see and change what in MandatoPro: voter and leadership
//! registries, staff, service requests, budget earmarks, finance, messaging.
//! Web handlers and UI code call into this crate; it owns no storage and
//! talks to no network.
//!
//! ## Core Principle
//!
//! **Fail closed**: an unknown role, module or capability, a missing cell in
//! the matrix, or a record without ownership fields always resolves to a
//! denial (`false`, an empty list), never to an error a caller might swallow.
//!
//! ## Key Features
//!
//! - Static Module → Role → capability matrix, built once and shared
//! - Sensitive field policy (identity numbers, birth dates, salaries)
//! - Record ownership filtering for leadership and operator profiles
//! - Portuguese denial messages for the presentation layer
//! - Optional JSONL audit log of access decisions
//!
//! ## Architecture
//!
//! ```text
//!   identity provider          record store
//!   (role, userId, ...)        (rows with criadoPor / liderancaId)
//!           │                          │
//!           ▼                          ▼
//!     ┌──────────┐   predicates  ┌───────────┐
//!     │ Session  │──────────────▶│   rbac    │◀── PermissionMatrix (static)
//!     └──────────┘               └───────────┘◀── sensitive field map
//!           │
//!           ▼
//!     AuditedAccess ──▶ audit log (JSONL)
//! ```

pub mod audit;
pub mod config;
pub mod errors;
pub mod rbac;
pub mod session;

pub use audit::{AccessDecision, AuditLogger, AuditedAccess};
pub use config::MandatoConfig;
pub use errors::{MandatoError, Result};
pub use rbac::{
    Capability, Module, OwnedRecord, PermissionMatrix, PermissionSet, PolicyKey, RecordOwnership,
    RecordType, Role,
};
pub use session::Session;
