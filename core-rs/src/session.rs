//! Caller session
//!
//! The identity tuple handed over by the auth provider. The role stays a raw
//! string so that a profile this build does not know about still flows
//! through the predicates and is denied, rather than failing deserialization.

use crate::errors::Result;
use crate::rbac::{self, Capability, Module, OwnedRecord, PolicyKey, Role};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub role: String,
    pub user_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lideranca_id: Option<i64>,
}

impl Session {
    pub fn new(role: impl Into<String>, user_id: i64, lideranca_id: Option<i64>) -> Self {
        Session {
            role: role.into(),
            user_id,
            lideranca_id,
        }
    }

    /// Typed role, `None` when the provider sent something unrecognized
    pub fn role(&self) -> Option<Role> {
        Role::parse(&self.role)
    }

    pub fn can(
        &self,
        module: impl PolicyKey<Module>,
        capability: impl PolicyKey<Capability>,
    ) -> bool {
        rbac::has_permission(&self.role, module, capability)
    }

    pub fn require(
        &self,
        module: impl PolicyKey<Module>,
        capability: impl PolicyKey<Capability>,
    ) -> Result<()> {
        rbac::require_permission(self.role.as_str(), module, capability)
    }

    pub fn can_delete_record(&self) -> bool {
        rbac::can_delete_record(&self.role)
    }

    pub fn visible_records<'a, R: OwnedRecord>(
        &self,
        records: &'a [R],
        module: impl PolicyKey<Module>,
    ) -> Vec<&'a R> {
        rbac::filter_records_by_role(records, &self.role, self.user_id, self.lideranca_id, module)
    }

    pub fn modules(&self) -> Vec<Module> {
        rbac::accessible_modules(&self.role)
    }

    pub fn denied_message(&self, action: Option<&str>) -> String {
        rbac::get_access_denied_message(&self.role, action)
    }
}
