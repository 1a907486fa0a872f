//! Access control predicates
//!
//! Pure functions over the static [`PermissionMatrix`] and the sensitive field
//! map. Every predicate is expressed through [`has_permission`], and every
//! unrecognized or missing input resolves to the least-privileged answer:
//! `false`, an empty list, or a generic message. Nothing here panics or
//! returns an error, except the explicit guard [`require_permission`].

use super::key::PolicyKey;
use super::matrix::PermissionMatrix;
use super::sensitive;
use super::{Capability, Module, Role};
use crate::errors::{MandatoError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

const DEFAULT_ACTION: &str = "acessar";

pub fn has_module_access(role: impl PolicyKey<Role>, module: impl PolicyKey<Module>) -> bool {
    has_permission(role, module, Capability::View)
}

/// Matrix lookup with default `false` for an unknown role, module, capability
/// or a cell that lacks the capability key.
pub fn has_permission(
    role: impl PolicyKey<Role>,
    module: impl PolicyKey<Module>,
    action: impl PolicyKey<Capability>,
) -> bool {
    match (role.resolve(), module.resolve(), action.resolve()) {
        (Some(role), Some(module), Some(capability)) => {
            PermissionMatrix::global().allows(role, module, capability)
        }
        _ => false,
    }
}

pub fn can_view_all(role: impl PolicyKey<Role>, module: impl PolicyKey<Module>) -> bool {
    has_permission(role, module, Capability::ViewAll)
}

pub fn can_create(role: impl PolicyKey<Role>, module: impl PolicyKey<Module>) -> bool {
    has_permission(role, module, Capability::Create)
}

pub fn can_edit(role: impl PolicyKey<Role>, module: impl PolicyKey<Module>) -> bool {
    has_permission(role, module, Capability::Edit)
}

pub fn can_delete(role: impl PolicyKey<Role>, module: impl PolicyKey<Module>) -> bool {
    has_permission(role, module, Capability::Delete)
}

pub fn can_edit_sensitive(role: impl PolicyKey<Role>, module: impl PolicyKey<Module>) -> bool {
    has_permission(role, module, Capability::EditSensitive)
}

pub fn can_send_mass(role: impl PolicyKey<Role>, module: impl PolicyKey<Module>) -> bool {
    has_permission(role, module, Capability::SendMass)
}

/// Instance-level delete authority: administrator only, whatever the module.
///
/// Kept apart from the matrix `delete` capability on purpose; the two agree
/// today, but this rule does not follow matrix edits.
pub fn can_delete_record(role: impl PolicyKey<Role>) -> bool {
    matches!(role.resolve(), Some(Role::Administrador))
}

pub fn is_sensitive_field(record_type: &str, field_name: &str) -> bool {
    sensitive::is_sensitive_field(record_type, field_name)
}

/// Whether the role may write `field_name` on a record of `record_type`
/// inside `module`: plain fields pass, sensitive ones need `editSensitive`.
pub fn can_write_field(
    role: impl PolicyKey<Role>,
    module: impl PolicyKey<Module>,
    record_type: &str,
    field_name: &str,
) -> bool {
    !is_sensitive_field(record_type, field_name) || can_edit_sensitive(role, module)
}

/// Remove sensitive keys from a write payload the role may not set.
///
/// Returns the removed keys. Roles holding `editSensitive` keep the payload intact.
pub fn strip_sensitive_fields(
    role: impl PolicyKey<Role>,
    module: impl PolicyKey<Module>,
    record_type: &str,
    record: &mut Map<String, Value>,
) -> Vec<String> {
    if can_edit_sensitive(role, module) {
        return Vec::new();
    }

    let removed = sensitive::sensitive_fields_in(record_type, record);
    for field in &removed {
        record.remove(field);
    }
    removed
}

/// Modules the role can open, in menu order; empty for unknown roles.
pub fn accessible_modules(role: impl PolicyKey<Role>) -> Vec<Module> {
    match role.resolve() {
        Some(role) => PermissionMatrix::global().modules_for(role),
        None => Vec::new(),
    }
}

/// Ownership attributes read by [`filter_records_by_role`]
pub trait OwnedRecord {
    /// Identity of the user who created the record
    fn criado_por(&self) -> Option<i64>;

    /// Identity of the owning leadership group
    fn lideranca_id(&self) -> Option<i64>;
}

impl OwnedRecord for Map<String, Value> {
    fn criado_por(&self) -> Option<i64> {
        self.get("criadoPor").and_then(Value::as_i64)
    }

    fn lideranca_id(&self) -> Option<i64> {
        self.get("liderancaId").and_then(Value::as_i64)
    }
}

impl OwnedRecord for Value {
    fn criado_por(&self) -> Option<i64> {
        self.as_object().and_then(|map| map.criado_por())
    }

    fn lideranca_id(&self) -> Option<i64> {
        self.as_object().and_then(|map| map.lideranca_id())
    }
}

impl<T: OwnedRecord + ?Sized> OwnedRecord for &T {
    fn criado_por(&self) -> Option<i64> {
        (**self).criado_por()
    }

    fn lideranca_id(&self) -> Option<i64> {
        (**self).lideranca_id()
    }
}

/// Typed ownership header for records deserialized from the store
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordOwnership {
    #[serde(default)]
    pub criado_por: Option<i64>,
    #[serde(default)]
    pub lideranca_id: Option<i64>,
}

impl OwnedRecord for RecordOwnership {
    fn criado_por(&self) -> Option<i64> {
        self.criado_por
    }

    fn lideranca_id(&self) -> Option<i64> {
        self.lideranca_id
    }
}

/// Subsequence of `records` visible to the caller, order preserved.
///
/// Precedence: `viewAll` on the module returns everything; a leadership sees
/// what it created, what belongs to it, and what belongs to its own group; an
/// operator sees what it created; any other role sees nothing. A missing
/// ownership value never matches, not even a missing `user_lideranca_id`.
pub fn filter_records_by_role<'a, R: OwnedRecord>(
    records: &'a [R],
    role: impl PolicyKey<Role>,
    user_id: i64,
    user_lideranca_id: Option<i64>,
    module: impl PolicyKey<Module>,
) -> Vec<&'a R> {
    let role = role.resolve();

    if can_view_all(role, module) {
        return records.iter().collect();
    }

    match role {
        Some(Role::Lideranca) => records
            .iter()
            .filter(|record| {
                let lideranca_id = record.lideranca_id();
                record.criado_por() == Some(user_id)
                    || lideranca_id == Some(user_id)
                    || (lideranca_id.is_some() && lideranca_id == user_lideranca_id)
            })
            .collect(),
        Some(Role::Operador) => records
            .iter()
            .filter(|record| record.criado_por() == Some(user_id))
            .collect(),
        _ => Vec::new(),
    }
}

/// Denial message for the presentation layer.
///
/// `action` defaults to "acessar". Unknown roles are rendered by their raw key.
pub fn get_access_denied_message(role: impl AsRef<str>, action: Option<&str>) -> String {
    let key = role.as_ref();
    let display = Role::parse(key).map(Role::display_name).unwrap_or(key);
    let action = action.unwrap_or(DEFAULT_ACTION);

    format!(
        "Acesso negado. O perfil {} não tem permissão para {}.",
        display, action
    )
}

fn action_phrase(capability: Option<Capability>, module: Option<Module>) -> String {
    let verb = match capability {
        Some(Capability::View) => DEFAULT_ACTION,
        Some(Capability::Create) => "criar registros",
        Some(Capability::Edit) => "editar registros",
        Some(Capability::Delete) => "excluir registros",
        Some(Capability::ViewAll) => "visualizar todos os registros",
        Some(Capability::EditSensitive) => "editar dados sensíveis",
        Some(Capability::SendMass) => "enviar mensagens em massa",
        None => "executar esta ação",
    };

    match module {
        Some(module) => format!("{} em {}", verb, module.label()),
        None => verb.to_string(),
    }
}

/// Guard form of [`has_permission`] for request handlers about to mutate data
pub fn require_permission<R>(
    role: R,
    module: impl PolicyKey<Module>,
    action: impl PolicyKey<Capability>,
) -> Result<()>
where
    R: PolicyKey<Role> + AsRef<str>,
{
    let module = module.resolve();
    let capability = action.resolve();

    if has_permission(&role, module, capability) {
        return Ok(());
    }

    let phrase = action_phrase(capability, module);
    let message = get_access_denied_message(role.as_ref(), Some(phrase.as_str()));
    tracing::debug!(role = role.as_ref(), ?module, ?capability, "permission denied");
    Err(MandatoError::AccessDenied(message))
}
