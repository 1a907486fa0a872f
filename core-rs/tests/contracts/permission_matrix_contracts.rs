// Permission Matrix Contract Tests
//
// These tests verify INVARIANTS of the authorization policy that MUST NEVER BREAK.
// The matrix is a security boundary: a regression here grants access silently.
//
// **Problem**: A refactor of the lookup "simplifies" a default or merges two cells
// **Solution**: Contract tests that state what each invariant protects

use mandato_core::rbac::{
    can_delete, can_delete_record, has_module_access, has_permission, is_sensitive_field,
    PermissionMatrix,
};
use mandato_core::{Capability, Module, Role};

/// WHY: Unknown or missing keys must resolve to denial
/// REASON: Keys arrive as raw strings from sessions and request bodies
/// BREAKS: Any handler that forwards an unvalidated role or module
/// SACRIFICES: If this fails, a typo in a role name becomes an access grant
#[test]
fn unknown_inputs_fail_closed() {
    let bogus_roles = ["", "admin", "Administrador", "SUPERUSER", "ADMINISTRADOR "];
    for role in bogus_roles {
        for module in Module::ALL {
            assert!(!has_module_access(role, module), "role {:?} on {}", role, module);
            for capability in Capability::ALL {
                assert!(!has_permission(role, module, capability));
            }
        }
    }

    for role in Role::ALL {
        assert!(!has_module_access(role, "CONFIGURACOES"));
        assert!(!has_permission(role, "CADASTROS", "approve"));
        assert!(!has_permission(role, None::<&str>, "view"));
    }
}

/// WHY: Every lookup must return exactly the stored cell value
/// REASON: The matrix is the single source of truth for authorization
/// BREAKS: UI gating and handler checks disagreeing with the documented policy
#[test]
fn lookup_matches_stored_cells() {
    let matrix = PermissionMatrix::global();

    for module in Module::ALL {
        for role in Role::ALL {
            for capability in Capability::ALL {
                let expected = matrix
                    .cell(module, role)
                    .and_then(|set| set.get(capability))
                    .unwrap_or(false);

                assert_eq!(
                    has_permission(role, module, capability),
                    expected,
                    "{} {} {}",
                    module,
                    role,
                    capability
                );
                assert_eq!(
                    has_permission(role.as_str(), module.as_str(), capability.as_str()),
                    expected,
                    "string form of {} {} {}",
                    module,
                    role,
                    capability
                );
            }
        }
    }
}

/// WHY: Absent capability keys are denials even when other keys are granted
/// REASON: Extras (editSensitive, sendMass) exist only on their own modules
#[test]
fn absent_capability_key_is_false() {
    let matrix = PermissionMatrix::global();

    for (module, role, set) in matrix.cells() {
        for capability in Capability::ALL {
            if set.get(capability).is_none() {
                assert!(
                    !has_permission(role, module, capability),
                    "{} {} {}",
                    module,
                    role,
                    capability
                );
            }
        }
    }

    let dashboard = matrix.cell(Module::Dashboard, Role::Administrador).unwrap();
    assert!(dashboard.view);
    assert_eq!(dashboard.get(Capability::SendMass), None);
}

/// WHY: No two (module, role) cells may be conflated by the lookup
/// REASON: Each cell is an independent policy decision
/// BREAKS: Policy edits leaking into neighbouring modules or roles
#[test]
fn cells_are_distinguishable() {
    let matrix = PermissionMatrix::global();
    let cells: Vec<_> = matrix.cells().collect();

    // Every defined cell is reachable through has_permission with its own answers.
    for (module, role, set) in &cells {
        let observed: Vec<bool> = Capability::ALL
            .iter()
            .map(|c| has_permission(*role, *module, *c))
            .collect();
        let stored: Vec<bool> = Capability::ALL.iter().map(|c| set.allows(*c)).collect();
        assert_eq!(observed, stored);
    }

    // Each (module, role) pair appears once.
    let mut keys: Vec<(Module, Role)> = cells.iter().map(|(m, r, _)| (*m, *r)).collect();
    let total = keys.len();
    keys.sort();
    keys.dedup();
    assert_eq!(keys.len(), total);

    // Cells that differ in storage differ in observation.
    assert_ne!(
        has_permission(Role::Lideranca, Module::Emendas, Capability::View),
        has_permission(Role::Operador, Module::Emendas, Capability::View)
    );
}

/// WHY: Instance deletes are administrator-only, independent of the module
/// REASON: Product rule layered on top of the module-level delete capability
/// SACRIFICES: If this fails, leaderships can delete voters they do not own
#[test]
fn delete_record_is_admin_only() {
    assert!(can_delete_record(Role::Administrador));
    assert!(can_delete_record("ADMINISTRADOR"));

    for role in ["LIDERANCA", "OPERADOR", "", "administrador", "ROOT"] {
        assert!(!can_delete_record(role), "{:?}", role);
    }
    assert!(!can_delete_record(None::<Role>));

    // Module-level delete agrees today: administrator only, everywhere.
    for module in Module::ALL {
        assert!(can_delete(Role::Administrador, module));
        assert!(!can_delete(Role::Lideranca, module));
        assert!(!can_delete(Role::Operador, module));
    }
}

/// WHY: Record type lookup ignores case, field lookup does not
#[test]
fn sensitive_field_lookup_contract() {
    assert!(is_sensitive_field("ELEITORES", "cpf"));
    assert!(is_sensitive_field("eleitores", "cpf"));
    assert!(!is_sensitive_field("eleitores", "nome"));
    assert!(!is_sensitive_field("eleitores", "Cpf"));
    assert!(!is_sensitive_field("visitantes", "cpf"));
}

/// WHY: Only administrators may write sensitive data or send message blasts
#[test]
fn privileged_extras_are_admin_only() {
    for role in [Role::Lideranca, Role::Operador] {
        assert!(!has_permission(role, Module::Cadastros, Capability::EditSensitive));
        assert!(!has_permission(role, Module::Mensagens, Capability::SendMass));
        assert!(!has_module_access(role, Module::DisparoMassa));
        assert!(!has_module_access(role, Module::Usuarios));
    }

    assert!(has_permission(Role::Administrador, Module::Cadastros, Capability::EditSensitive));
    assert!(has_permission(Role::Administrador, Module::Mensagens, Capability::SendMass));
}
