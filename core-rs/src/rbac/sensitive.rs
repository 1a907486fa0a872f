//! Sensitive field map
//!
//! Record types whose fields need `editSensitive` before a non-administrator
//! may write them. Record type names match case-insensitively; field names
//! match exactly.

use crate::errors::MandatoError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordType {
    /// Voter
    Eleitores,
    /// Leadership
    Liderancas,
    /// Staff
    Equipe,
    /// Service record
    Atendimentos,
}

impl RecordType {
    pub const ALL: [RecordType; 4] = [
        RecordType::Eleitores,
        RecordType::Liderancas,
        RecordType::Equipe,
        RecordType::Atendimentos,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            RecordType::Eleitores => "eleitores",
            RecordType::Liderancas => "liderancas",
            RecordType::Equipe => "equipe",
            RecordType::Atendimentos => "atendimentos",
        }
    }

    pub fn sensitive_fields(self) -> &'static [&'static str] {
        match self {
            RecordType::Eleitores => &["cpf", "rg", "tituloEleitor", "dataNascimento"],
            RecordType::Liderancas => &["cpf", "rg", "dataNascimento"],
            RecordType::Equipe => &["cpf", "rg", "dataNascimento", "salario"],
            RecordType::Atendimentos => &["status", "prioridade"],
        }
    }

    pub fn is_sensitive(self, field_name: &str) -> bool {
        self.sensitive_fields().iter().any(|field| *field == field_name)
    }

    /// Case-insensitive lookup; unknown names yield `None`
    pub fn parse(value: &str) -> Option<RecordType> {
        value.parse().ok()
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordType {
    type Err = MandatoError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let lowered = value.to_lowercase();
        RecordType::ALL
            .into_iter()
            .find(|record_type| record_type.as_str() == lowered)
            .ok_or_else(|| MandatoError::UnknownRecordType(value.to_string()))
    }
}

pub fn is_sensitive_field(record_type: &str, field_name: &str) -> bool {
    RecordType::parse(record_type)
        .map(|record_type| record_type.is_sensitive(field_name))
        .unwrap_or(false)
}

/// Sensitive keys present on a JSON record, in the map's iteration order
pub fn sensitive_fields_in(record_type: &str, record: &Map<String, Value>) -> Vec<String> {
    match RecordType::parse(record_type) {
        Some(record_type) => record
            .keys()
            .filter(|key| record_type.is_sensitive(key))
            .cloned()
            .collect(),
        None => Vec::new(),
    }
}
