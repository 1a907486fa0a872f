//! Audit log for access decisions
//!
//! Provides:
//! - JSONL audit log of permission checks (grants and denials)
//! - Size-based log rotation
//! - `AuditedAccess`, a session wrapper that checks, traces and records
//!
//! # Example
//!
//! ```rust,no_run
//! use mandato_core::audit::{AuditLogger, AuditedAccess};
//! use mandato_core::{Capability, Module, Session};
//! use std::path::PathBuf;
//!
//! let logger = AuditLogger::new(PathBuf::from("/var/log/mandato/access.log"));
//! let access = AuditedAccess::new(Session::new("OPERADOR", 10, None), logger);
//! let allowed = access.check(Module::Cadastros, Capability::Delete);
//! assert!(!allowed);
//! ```

use crate::errors::{MandatoError, Result};
use crate::rbac::{Capability, Module, PolicyKey};
use crate::session::Session;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use uuid::Uuid;

pub const DEFAULT_MAX_LOG_SIZE: u64 = 10_000_000;

/// Audit logger for recording access decisions
#[derive(Debug, Clone)]
pub struct AuditLogger {
    log_path: PathBuf,
    max_log_size: u64, // bytes
}

/// One evaluated permission check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessDecision {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub role: String,
    pub user_id: i64,
    /// Module key as received; unknown modules are kept verbatim
    pub module: Option<String>,
    /// Capability key as received, same as `module`
    pub action: Option<String>,
    pub granted: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl AccessDecision {
    pub fn new(
        session: &Session,
        module: impl PolicyKey<Module>,
        action: impl PolicyKey<Capability>,
        granted: bool,
    ) -> Self {
        AccessDecision {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            role: session.role.clone(),
            user_id: session.user_id,
            module: module.key(),
            action: action.key(),
            granted,
            detail: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

impl AuditLogger {
    pub fn new(log_path: PathBuf) -> Self {
        Self {
            log_path,
            max_log_size: DEFAULT_MAX_LOG_SIZE,
        }
    }

    pub fn with_max_log_size(mut self, max_log_size: u64) -> Self {
        self.max_log_size = max_log_size;
        self
    }

    pub fn log_path(&self) -> &Path {
        &self.log_path
    }

    pub fn record(&self, decision: &AccessDecision) -> Result<()> {
        self.rotate_if_needed()?;
        self.write_entry(decision)
    }

    /// Rotate log file if it exceeds max size
    pub fn rotate_if_needed(&self) -> Result<bool> {
        if !self.log_path.exists() {
            return Ok(false);
        }

        let metadata = fs::metadata(&self.log_path)
            .map_err(|e| MandatoError::IoError(format!("Failed to read log metadata: {}", e)))?;

        if metadata.len() <= self.max_log_size {
            return Ok(false);
        }

        let timestamp = Utc::now().format("%Y%m%d-%H%M%S%.3f");
        let rotated_path = self.log_path.with_extension(format!("log.{}", timestamp));

        fs::rename(&self.log_path, &rotated_path)
            .map_err(|e| MandatoError::IoError(format!("Failed to rotate log: {}", e)))?;

        tracing::info!(rotated = %rotated_path.display(), "audit log rotated");
        Ok(true)
    }

    /// Load every decision from the current log file
    pub fn read_entries(&self) -> Result<Vec<AccessDecision>> {
        if !self.log_path.exists() {
            return Ok(Vec::new());
        }

        let file = fs::File::open(&self.log_path)
            .map_err(|e| MandatoError::IoError(format!("Failed to open log file: {}", e)))?;

        let mut entries = Vec::new();
        for line in BufReader::new(file).lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let entry = serde_json::from_str(&line)
                .map_err(|e| MandatoError::ParseError(format!("Invalid audit entry: {}", e)))?;
            entries.push(entry);
        }

        Ok(entries)
    }

    fn write_entry(&self, decision: &AccessDecision) -> Result<()> {
        if let Some(parent) = self.log_path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                MandatoError::IoError(format!("Failed to create log directory: {}", e))
            })?;
        }

        let json = serde_json::to_string(decision).map_err(|e| {
            MandatoError::SerializationError(format!("Failed to serialize audit entry: {}", e))
        })?;

        let mut file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .map_err(|e| MandatoError::IoError(format!("Failed to open log file: {}", e)))?;

        writeln!(file, "{}", json)
            .map_err(|e| MandatoError::IoError(format!("Failed to write log entry: {}", e)))?;

        Ok(())
    }
}

/// Session bound to an audit log
///
/// The authorization answer never depends on whether the audit write
/// succeeded; write failures are reported through `tracing` only.
#[derive(Debug, Clone)]
pub struct AuditedAccess {
    session: Session,
    logger: AuditLogger,
}

impl AuditedAccess {
    pub fn new(session: Session, logger: AuditLogger) -> Self {
        Self { session, logger }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Evaluate and record; unknown keys are logged as the caller spelled them
    pub fn check(
        &self,
        module: impl PolicyKey<Module>,
        capability: impl PolicyKey<Capability>,
    ) -> bool {
        let granted = self.session.can(&module, &capability);
        let decision = AccessDecision::new(&self.session, &module, &capability, granted);

        let role = &self.session.role;
        let user_id = self.session.user_id;
        let (module, action) = (&decision.module, &decision.action);
        if granted {
            tracing::debug!(%role, user_id, ?module, ?action, "access granted");
        } else {
            tracing::warn!(%role, user_id, ?module, ?action, "access denied");
        }

        if let Err(e) = self.logger.record(&decision) {
            tracing::error!(error = %e, "failed to record access decision");
        }

        granted
    }

    /// Guard form: records the decision and returns the denial as an error
    pub fn require(
        &self,
        module: impl PolicyKey<Module>,
        capability: impl PolicyKey<Capability>,
    ) -> Result<()> {
        if self.check(&module, &capability) {
            Ok(())
        } else {
            self.session.require(module, capability)
        }
    }

    /// Instance delete check, recorded with the record id
    pub fn check_delete_record(&self, module: Module, record_id: i64) -> bool {
        let granted = self.session.can_delete_record();

        let decision = AccessDecision::new(&self.session, module, Capability::Delete, granted)
            .with_detail(format!("record {}", record_id));
        if let Err(e) = self.logger.record(&decision) {
            tracing::error!(error = %e, "failed to record access decision");
        }

        granted
    }
}
