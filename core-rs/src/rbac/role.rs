//! Caller roles
//!
//! The three profiles a MandatoPro user can hold. Wire keys match the
//! values stored by the identity provider (`ADMINISTRADOR`, `LIDERANCA`,
//! `OPERADOR`).

use crate::errors::MandatoError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// User profile that drives every authorization decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Administrador,
    Lideranca,
    Operador,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Administrador, Role::Lideranca, Role::Operador];

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Administrador => "ADMINISTRADOR",
            Role::Lideranca => "LIDERANCA",
            Role::Operador => "OPERADOR",
        }
    }

    /// Human-readable name shown in denial messages and the UI
    pub fn display_name(self) -> &'static str {
        match self {
            Role::Administrador => "Administrador",
            Role::Lideranca => "Liderança",
            Role::Operador => "Operador",
        }
    }

    /// Fail-closed parse for untyped input: anything but an exact key is `None`.
    pub fn parse(value: &str) -> Option<Role> {
        value.parse().ok()
    }
}

impl AsRef<str> for Role {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = MandatoError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "ADMINISTRADOR" => Ok(Role::Administrador),
            "LIDERANCA" => Ok(Role::Lideranca),
            "OPERADOR" => Ok(Role::Operador),
            other => Err(MandatoError::UnknownRole(other.to_string())),
        }
    }
}
