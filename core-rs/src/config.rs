/**
 * config.rs
 * Parser for .mandato.yaml files
 *
 * Format:
 * ```yaml
 * apiVersion: mandatopro/v1
 * kind: AccessPolicy
 * metadata:
 *   name: gabinete-centro
 * spec:
 *   session:
 *     role: LIDERANCA
 *     userId: 20
 *     liderancaId: 7
 *   audit:
 *     enabled: true
 *     path: logs/access.log
 *     maxLogSize: 10000000
 *   logging:
 *     level: info
 * ```
 *
 * The permission matrix itself is compiled in and is not configurable here.
 */

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::audit::{AuditLogger, DEFAULT_MAX_LOG_SIZE};
use crate::errors::MandatoError;
use crate::session::Session;

pub const API_VERSION: &str = "mandatopro/v1";
pub const KIND: &str = "AccessPolicy";
pub const CONFIG_FILE_NAME: &str = ".mandato.yaml";

/// .mandato.yaml file structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MandatoConfig {
    pub api_version: String,
    pub kind: String,
    pub metadata: Metadata,
    #[serde(default)]
    pub spec: Spec,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Metadata {
    pub name: String,
}

/// Access decision audit settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AuditConfig {
    #[serde(default)]
    pub enabled: bool,
    pub path: PathBuf,
    #[serde(default = "default_max_log_size")]
    pub max_log_size: u64,
}

fn default_max_log_size() -> u64 {
    DEFAULT_MAX_LOG_SIZE
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    /// `tracing` filter directive, e.g. `info` or `mandato_core=debug`
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: "warn".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Spec {
    /// Default caller for local tooling
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session: Option<Session>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audit: Option<AuditConfig>,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl MandatoConfig {
    pub fn new(name: impl Into<String>) -> Self {
        MandatoConfig {
            api_version: API_VERSION.to_string(),
            kind: KIND.to_string(),
            metadata: Metadata { name: name.into() },
            spec: Spec::default(),
        }
    }

    /// Load .mandato.yaml from specified path
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, MandatoError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(MandatoError::FileNotFound(path.to_string_lossy().to_string()));
        }

        let content = fs::read_to_string(path).map_err(|e| {
            MandatoError::IoError(format!("Failed to read {}: {}", CONFIG_FILE_NAME, e))
        })?;

        let config: MandatoConfig = serde_yaml::from_str(&content).map_err(|e| {
            MandatoError::ParseError(format!("Invalid {} YAML: {}", CONFIG_FILE_NAME, e))
        })?;

        config.validate()?;

        Ok(config)
    }

    /// Load .mandato.yaml from a directory
    pub fn load_from_dir<P: AsRef<Path>>(dir: P) -> Result<Self, MandatoError> {
        Self::load(dir.as_ref().join(CONFIG_FILE_NAME))
    }

    /// Ensures:
    /// - apiVersion is "mandatopro/v1"
    /// - kind is "AccessPolicy"
    /// - metadata.name is non-empty
    /// - audit.path is non-empty when audit is enabled
    pub fn validate(&self) -> Result<(), MandatoError> {
        if self.api_version != API_VERSION {
            return Err(MandatoError::ValidationError(format!(
                "Invalid apiVersion: expected '{}', got '{}'",
                API_VERSION, self.api_version
            )));
        }

        if self.kind != KIND {
            return Err(MandatoError::ValidationError(format!(
                "Invalid kind: expected '{}', got '{}'",
                KIND, self.kind
            )));
        }

        if self.metadata.name.is_empty() {
            return Err(MandatoError::ValidationError(
                "metadata.name cannot be empty".to_string(),
            ));
        }

        if let Some(audit) = &self.spec.audit {
            if audit.enabled && audit.path.as_os_str().is_empty() {
                return Err(MandatoError::ValidationError(
                    "spec.audit.path cannot be empty when audit is enabled".to_string(),
                ));
            }
        }

        Ok(())
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), MandatoError> {
        let yaml = serde_yaml::to_string(self).map_err(|e| {
            MandatoError::SerializationError(format!(
                "Failed to serialize {}: {}",
                CONFIG_FILE_NAME, e
            ))
        })?;

        fs::write(path.as_ref(), yaml).map_err(|e| {
            MandatoError::IoError(format!("Failed to write {}: {}", CONFIG_FILE_NAME, e))
        })?;

        Ok(())
    }

    /// Audit logger when auditing is enabled; relative paths resolve against `base_dir`
    pub fn audit_logger(&self, base_dir: &Path) -> Option<AuditLogger> {
        let audit = self.spec.audit.as_ref().filter(|a| a.enabled)?;
        let path = if audit.path.is_absolute() {
            audit.path.clone()
        } else {
            base_dir.join(&audit.path)
        };
        Some(AuditLogger::new(path).with_max_log_size(audit.max_log_size))
    }
}

impl Default for MandatoConfig {
    fn default() -> Self {
        MandatoConfig::new("mandatopro")
    }
}
