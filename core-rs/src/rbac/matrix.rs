//! Permission matrix: Module → Role → PermissionSet
//!
//! The table is compiled in and materialized once behind a `Lazy` static.
//! Nothing hands out a mutable reference to it.
//!
//! | Module          | LIDERANCA                         | OPERADOR                          |
//! |-----------------|-----------------------------------|-----------------------------------|
//! | DASHBOARD       | view                              | view                              |
//! | EQUIPE          | -                                 | -                                 |
//! | CADASTROS       | view create edit                  | view create edit                  |
//! | EMENDAS         | view                              | (all false)                       |
//! | FINANCEIRO      | -                                 | -                                 |
//! | GEOLOCALIZACAO  | view                              | view                              |
//! | MENSAGENS       | view create                       | view                              |
//! | AGENDA          | view create edit                  | view create                       |
//! | ANIVERSARIANTES | view                              | view                              |
//! | DOCUMENTOS      | view create                       | view                              |
//! | ATENDIMENTOS    | view create edit                  | view create edit                  |
//! | USUARIOS        | -                                 | -                                 |
//! | JURIDICO        | -                                 | -                                 |
//! | DISPARO_MASSA   | -                                 | -                                 |
//!
//! `-` means the role has no cell for the module. ADMINISTRADOR holds every
//! capability on every module, including `editSensitive` on CADASTROS and
//! `sendMass` on MENSAGENS; non-administrators carry those keys as `false`.

use super::{Capability, Module, Role};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

static PERMISSION_MATRIX: Lazy<PermissionMatrix> = Lazy::new(PermissionMatrix::build);

/// Capabilities granted to one role on one module
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionSet {
    pub view: bool,
    pub create: bool,
    pub edit: bool,
    pub delete: bool,
    pub view_all: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edit_sensitive: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub send_mass: Option<bool>,
}

impl PermissionSet {
    pub const NONE: PermissionSet = PermissionSet::new(false, false, false, false, false);
    pub const FULL: PermissionSet = PermissionSet::new(true, true, true, true, true);
    pub const VIEW: PermissionSet = PermissionSet::new(true, false, false, false, false);
    pub const VIEW_CREATE: PermissionSet = PermissionSet::new(true, true, false, false, false);
    pub const VIEW_CREATE_EDIT: PermissionSet = PermissionSet::new(true, true, true, false, false);

    pub const fn new(view: bool, create: bool, edit: bool, delete: bool, view_all: bool) -> Self {
        PermissionSet {
            view,
            create,
            edit,
            delete,
            view_all,
            edit_sensitive: None,
            send_mass: None,
        }
    }

    pub const fn with_edit_sensitive(self, granted: bool) -> Self {
        PermissionSet {
            edit_sensitive: Some(granted),
            ..self
        }
    }

    pub const fn with_send_mass(self, granted: bool) -> Self {
        PermissionSet {
            send_mass: Some(granted),
            ..self
        }
    }

    /// Stored value for a capability; `None` when the key is absent from the cell.
    pub fn get(&self, capability: Capability) -> Option<bool> {
        match capability {
            Capability::View => Some(self.view),
            Capability::Create => Some(self.create),
            Capability::Edit => Some(self.edit),
            Capability::Delete => Some(self.delete),
            Capability::ViewAll => Some(self.view_all),
            Capability::EditSensitive => self.edit_sensitive,
            Capability::SendMass => self.send_mass,
        }
    }

    pub fn allows(&self, capability: Capability) -> bool {
        self.get(capability).unwrap_or(false)
    }

    /// Capabilities present in this cell, granted or not
    pub fn keys(&self) -> impl Iterator<Item = Capability> + '_ {
        Capability::ALL.into_iter().filter(move |c| self.get(*c).is_some())
    }
}

/// Module-specific extras layered onto a base cell
fn extras(module: Module, set: PermissionSet, granted: bool) -> PermissionSet {
    match module {
        Module::Cadastros => set.with_edit_sensitive(granted),
        Module::Mensagens => set.with_send_mass(granted),
        _ => set,
    }
}

const LIDERANCA_CELLS: &[(Module, PermissionSet)] = &[
    (Module::Dashboard, PermissionSet::VIEW),
    (Module::Cadastros, PermissionSet::VIEW_CREATE_EDIT),
    (Module::Emendas, PermissionSet::VIEW),
    (Module::Geolocalizacao, PermissionSet::VIEW),
    (Module::Mensagens, PermissionSet::VIEW_CREATE),
    (Module::Agenda, PermissionSet::VIEW_CREATE_EDIT),
    (Module::Aniversariantes, PermissionSet::VIEW),
    (Module::Documentos, PermissionSet::VIEW_CREATE),
    (Module::Atendimentos, PermissionSet::VIEW_CREATE_EDIT),
];

const OPERADOR_CELLS: &[(Module, PermissionSet)] = &[
    (Module::Dashboard, PermissionSet::VIEW),
    (Module::Cadastros, PermissionSet::VIEW_CREATE_EDIT),
    (Module::Emendas, PermissionSet::NONE),
    (Module::Geolocalizacao, PermissionSet::VIEW),
    (Module::Mensagens, PermissionSet::VIEW),
    (Module::Agenda, PermissionSet::VIEW_CREATE),
    (Module::Aniversariantes, PermissionSet::VIEW),
    (Module::Documentos, PermissionSet::VIEW),
    (Module::Atendimentos, PermissionSet::VIEW_CREATE_EDIT),
];

/// Static authorization table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermissionMatrix {
    cells: BTreeMap<Module, BTreeMap<Role, PermissionSet>>,
}

impl PermissionMatrix {
    /// Process-wide matrix, built on first use
    pub fn global() -> &'static PermissionMatrix {
        &PERMISSION_MATRIX
    }

    fn build() -> Self {
        let mut cells: BTreeMap<Module, BTreeMap<Role, PermissionSet>> = BTreeMap::new();

        for module in Module::ALL {
            cells
                .entry(module)
                .or_default()
                .insert(Role::Administrador, extras(module, PermissionSet::FULL, true));
        }

        let tables = [(Role::Lideranca, LIDERANCA_CELLS), (Role::Operador, OPERADOR_CELLS)];
        for (role, table) in tables {
            for (module, set) in table {
                cells
                    .entry(*module)
                    .or_default()
                    .insert(role, extras(*module, *set, false));
            }
        }

        PermissionMatrix { cells }
    }

    pub fn cell(&self, module: Module, role: Role) -> Option<&PermissionSet> {
        self.cells.get(&module).and_then(|roles| roles.get(&role))
    }

    /// Lookup-with-default: a missing cell or a missing capability key is a denial.
    pub fn allows(&self, role: Role, module: Module, capability: Capability) -> bool {
        self.cell(module, role)
            .map(|set| set.allows(capability))
            .unwrap_or(false)
    }

    /// Every defined cell, ordered by module then role
    pub fn cells(&self) -> impl Iterator<Item = (Module, Role, &PermissionSet)> + '_ {
        self.cells
            .iter()
            .flat_map(|(module, roles)| roles.iter().map(move |(role, set)| (*module, *role, set)))
    }

    /// Modules the role may open, in menu order
    pub fn modules_for(&self, role: Role) -> Vec<Module> {
        Module::ALL
            .into_iter()
            .filter(|module| self.allows(role, *module, Capability::View))
            .collect()
    }

    /// Sub-matrix for one role, as shipped to a client session
    pub fn for_role(&self, role: Role) -> BTreeMap<Module, PermissionSet> {
        self.cells
            .iter()
            .filter_map(|(module, roles)| roles.get(&role).map(|set| (*module, *set)))
            .collect()
    }
}
