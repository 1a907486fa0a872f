//! Named capabilities stored in a permission cell

use crate::errors::MandatoError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Capability {
    View,
    Create,
    Edit,
    Delete,
    ViewAll,
    /// Write identity numbers, birth dates, salaries and similar fields
    EditSensitive,
    /// Send a message blast to many recipients at once
    SendMass,
}

impl Capability {
    pub const ALL: [Capability; 7] = [
        Capability::View,
        Capability::Create,
        Capability::Edit,
        Capability::Delete,
        Capability::ViewAll,
        Capability::EditSensitive,
        Capability::SendMass,
    ];

    /// Capabilities every permission cell carries
    pub const UNIVERSAL: [Capability; 5] = [
        Capability::View,
        Capability::Create,
        Capability::Edit,
        Capability::Delete,
        Capability::ViewAll,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Capability::View => "view",
            Capability::Create => "create",
            Capability::Edit => "edit",
            Capability::Delete => "delete",
            Capability::ViewAll => "viewAll",
            Capability::EditSensitive => "editSensitive",
            Capability::SendMass => "sendMass",
        }
    }

    pub fn parse(value: &str) -> Option<Capability> {
        value.parse().ok()
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Capability {
    type Err = MandatoError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Capability::ALL
            .into_iter()
            .find(|capability| capability.as_str() == value)
            .ok_or_else(|| MandatoError::UnknownCapability(value.to_string()))
    }
}
