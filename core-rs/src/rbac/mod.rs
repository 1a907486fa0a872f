//! RBAC (Role-Based Access Control) module
//!
//! Role/module permission matrix, sensitive-field policy and record
//! ownership filtering for MandatoPro.

pub mod access_control;
pub mod capability;
pub mod key;
pub mod matrix;
pub mod module;
pub mod role;
pub mod sensitive;

pub use access_control::{
    accessible_modules, can_create, can_delete, can_delete_record, can_edit, can_edit_sensitive,
    can_send_mass, can_view_all, can_write_field, filter_records_by_role, get_access_denied_message,
    has_module_access, has_permission, is_sensitive_field, require_permission,
    strip_sensitive_fields, OwnedRecord, RecordOwnership,
};
pub use capability::Capability;
pub use key::PolicyKey;
pub use matrix::{PermissionMatrix, PermissionSet};
pub use module::Module;
pub use role::Role;
pub use sensitive::{sensitive_fields_in, RecordType};
