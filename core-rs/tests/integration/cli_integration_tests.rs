//! Integration tests for the mandato CLI
//!
//! Each test runs the built binary inside a scratch directory so that no
//! stray .mandato.yaml from the developer's machine is picked up.

use std::fs;
use std::process::{Command, Output};
use tempfile::TempDir;

fn mandato(dir: &TempDir, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_mandato"))
        .args(args)
        .current_dir(dir.path())
        .env("NO_COLOR", "1")
        .env_remove("MANDATO_LOG")
        .output()
        .expect("Failed to run mandato")
}

fn write_config(dir: &TempDir, spec: &str) {
    let header = "apiVersion: mandatopro/v1\nkind: AccessPolicy\nmetadata:\n  name: test\nspec:\n";
    fs::write(dir.path().join(".mandato.yaml"), format!("{}{}", header, spec)).unwrap();
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

#[test]
fn test_check_granted() {
    let dir = TempDir::new().unwrap();
    let output = mandato(&dir, &["check", "LIDERANCA", "AGENDA", "edit"]);

    assert!(output.status.success());
    assert!(stdout(&output).contains("LIDERANCA may edit on AGENDA"));
}

#[test]
fn test_check_denied_exits_with_1() {
    let dir = TempDir::new().unwrap();
    let output = mandato(&dir, &["check", "OPERADOR", "CADASTROS", "delete"]);

    assert_eq!(output.status.code(), Some(1));
    let out = stdout(&output);
    assert!(out.contains("Acesso negado"));
    assert!(out.contains("Operador"));
}

#[test]
fn test_check_unknown_role_denied() {
    let dir = TempDir::new().unwrap();
    let output = mandato(&dir, &["check", "ROOT", "DASHBOARD", "view"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains("ROOT"));
}

#[test]
fn test_matrix_json_export() {
    let dir = TempDir::new().unwrap();
    let output = mandato(&dir, &["matrix", "--format", "json"]);
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["MENSAGENS"]["ADMINISTRADOR"]["sendMass"], true);
    assert!(json["USUARIOS"].get("OPERADOR").is_none());
}

#[test]
fn test_matrix_json_for_role() {
    let dir = TempDir::new().unwrap();
    let output = mandato(&dir, &["matrix", "--format", "json", "--role", "OPERADOR"]);
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["EMENDAS"]["view"], false);
    assert!(json.get("FINANCEIRO").is_none());
}

#[test]
fn test_matrix_rejects_unknown_role() {
    let dir = TempDir::new().unwrap();
    let output = mandato(&dir, &["matrix", "--role", "ROOT"]);
    assert!(!output.status.success());
}

#[test]
fn test_sensitive_command() {
    let dir = TempDir::new().unwrap();
    let output = mandato(&dir, &["sensitive", "EQUIPE", "salario"]);
    assert!(stdout(&output).contains("equipe.salario is sensitive"));

    let output = mandato(&dir, &["sensitive", "equipe", "nome"]);
    assert!(stdout(&output).contains("is not sensitive"));
}

#[test]
fn test_filter_with_flags() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("records.json"),
        r#"[
            {"id": 1, "criadoPor": 10},
            {"id": 2, "criadoPor": 20, "liderancaId": 5},
            {"id": 3, "liderancaId": 7}
        ]"#,
    )
    .unwrap();

    let output = mandato(
        &dir,
        &[
            "filter",
            "records.json",
            "--module",
            "CADASTROS",
            "--role",
            "LIDERANCA",
            "--user-id",
            "20",
            "--lideranca-id",
            "7",
        ],
    );
    assert!(output.status.success());

    let rows: Vec<serde_json::Value> = serde_json::from_str(&stdout(&output)).unwrap();
    let ids: Vec<i64> = rows.iter().map(|r| r["id"].as_i64().unwrap()).collect();
    assert_eq!(ids, vec![2, 3]);
}

#[test]
fn test_filter_uses_config_session() {
    let dir = TempDir::new().unwrap();
    write_config(&dir, "  session:\n    role: OPERADOR\n    userId: 10\n");
    fs::write(
        dir.path().join("records.json"),
        r#"[{"id":1,"criadoPor":10},{"id":2,"criadoPor":20}]"#,
    )
    .unwrap();

    let output = mandato(&dir, &["filter", "records.json", "--module", "CADASTROS"]);
    assert!(output.status.success());

    let rows: Vec<serde_json::Value> = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["id"], 1);
}

#[test]
fn test_filter_without_session_fails() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("records.json"), "[]").unwrap();

    let output = mandato(&dir, &["filter", "records.json", "--module", "CADASTROS"]);
    assert!(!output.status.success());
}

#[test]
fn test_check_writes_audit_log_when_enabled() {
    let dir = TempDir::new().unwrap();
    write_config(&dir, "  audit:\n    enabled: true\n    path: logs/access.log\n");

    let output = mandato(&dir, &["check", "OPERADOR", "FINANCEIRO", "view", "--user-id", "10"]);
    assert_eq!(output.status.code(), Some(1));

    let log = fs::read_to_string(dir.path().join("logs/access.log")).unwrap();
    assert!(log.contains("\"granted\":false"));
    assert!(log.contains("\"module\":\"FINANCEIRO\""));
    assert!(log.contains("\"userId\":10"));
}

#[test]
fn test_audit_path_resolves_against_config_dir() {
    let config_dir = TempDir::new().unwrap();
    let work_dir = TempDir::new().unwrap();
    write_config(&config_dir, "  audit:\n    enabled: true\n    path: logs/access.log\n");

    let config_path = config_dir.path().join(".mandato.yaml");
    let config_arg = config_path.to_str().unwrap();
    let output = mandato(
        &work_dir,
        &["--config", config_arg, "check", "OPERADOR", "FINANCEIRO", "view"],
    );
    assert_eq!(output.status.code(), Some(1));

    assert!(config_dir.path().join("logs/access.log").exists());
    assert!(!work_dir.path().join("logs").exists());
}

#[test]
fn test_check_unknown_keys_logged_verbatim() {
    let dir = TempDir::new().unwrap();
    write_config(&dir, "  audit:\n    enabled: true\n    path: access.log\n");

    let output = mandato(&dir, &["check", "ROOT", "PIX", "fly"]);
    assert_eq!(output.status.code(), Some(1));

    let log = fs::read_to_string(dir.path().join("access.log")).unwrap();
    assert!(log.contains("\"module\":\"PIX\""));
    assert!(log.contains("\"action\":\"fly\""));
}

#[test]
fn test_matrix_yaml_export() {
    let dir = TempDir::new().unwrap();
    let output = mandato(&dir, &["matrix", "--format", "yaml", "--role", "LIDERANCA"]);
    assert!(output.status.success());

    let yaml: serde_yaml::Value = serde_yaml::from_str(&stdout(&output)).unwrap();
    assert_eq!(yaml["EMENDAS"]["view"], serde_yaml::Value::Bool(true));
    assert_eq!(yaml["CADASTROS"]["editSensitive"], serde_yaml::Value::Bool(false));
    assert!(yaml.get("JURIDICO").is_none());
}

#[test]
fn test_deny_and_modules_commands() {
    let dir = TempDir::new().unwrap();

    let output = mandato(&dir, &["deny", "OPERADOR", "excluir este registro"]);
    assert!(stdout(&output).contains("excluir este registro"));

    let output = mandato(&dir, &["modules", "OPERADOR"]);
    let out = stdout(&output);
    assert!(out.contains("CADASTROS"));
    assert!(!out.contains("FINANCEIRO"));

    let output = mandato(&dir, &["modules", "ROOT"]);
    assert!(stdout(&output).contains("(no modules)"));
}
