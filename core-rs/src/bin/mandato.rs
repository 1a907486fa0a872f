//! mandato - MandatoPro access policy CLI
//!
//! Inspect and evaluate the compiled-in permission matrix from a terminal or
//! a deployment script.

use anyhow::{bail, Context};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use mandato_core::audit::AuditedAccess;
use mandato_core::config::CONFIG_FILE_NAME;
use mandato_core::rbac::{self, Capability, Module, PermissionMatrix, PermissionSet, Role};
use mandato_core::{MandatoConfig, MandatoError, Session};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "mandato")]
#[command(version)]
#[command(about = "MandatoPro access policy tool", long_about = None)]
struct Cli {
    /// Path to the config file (defaults to ./.mandato.yaml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate one permission (exit code 1 when denied)
    Check {
        /// Role key (ADMINISTRADOR, LIDERANCA, OPERADOR)
        role: String,
        /// Module key (e.g. CADASTROS)
        module: String,
        /// Capability (view, create, edit, delete, viewAll, editSensitive, sendMass)
        action: String,
        /// Caller id recorded in the audit log
        #[arg(long, default_value_t = 0)]
        user_id: i64,
    },
    /// Print the permission matrix
    Matrix {
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
        /// Only show cells for this role
        #[arg(long)]
        role: Option<String>,
    },
    /// Tell whether a field is sensitive for a record type
    Sensitive {
        /// Record type (eleitores, liderancas, equipe, atendimentos)
        record_type: String,
        /// Field name
        field: String,
    },
    /// Filter a JSON array of records down to what a caller may see
    Filter {
        /// JSON file containing an array of records
        records: PathBuf,
        /// Module the records belong to
        #[arg(long)]
        module: String,
        /// Caller role (falls back to the config session)
        #[arg(long)]
        role: Option<String>,
        /// Caller id (falls back to the config session)
        #[arg(long)]
        user_id: Option<i64>,
        /// Caller leadership group id
        #[arg(long)]
        lideranca_id: Option<i64>,
    },
    /// Print the access denied message for a role
    Deny {
        role: String,
        /// Action phrase (defaults to "acessar")
        action: Option<String>,
    },
    /// List the modules a role can open
    Modules { role: String },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Yaml,
}

/// Config plus the directory its relative paths resolve against
struct LoadedConfig {
    config: MandatoConfig,
    base_dir: PathBuf,
}

fn load_config(explicit: Option<&Path>) -> anyhow::Result<Option<LoadedConfig>> {
    match explicit {
        Some(path) => {
            let config = MandatoConfig::load(path)
                .with_context(|| format!("loading {}", path.display()))?;
            let base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
            Ok(Some(LoadedConfig { config, base_dir }))
        }
        None => match MandatoConfig::load(CONFIG_FILE_NAME) {
            Ok(config) => Ok(Some(LoadedConfig {
                config,
                base_dir: PathBuf::from("."),
            })),
            Err(MandatoError::FileNotFound(_)) => Ok(None),
            Err(e) => Err(e).context("loading ./.mandato.yaml"),
        },
    }
}

fn init_tracing(verbose: bool, default_level: &str) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env("MANDATO_LOG").unwrap_or_else(|_| EnvFilter::new(default_level))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn mark(value: Option<bool>) -> String {
    match value {
        Some(true) => "✓".green().to_string(),
        Some(false) => "✗".red().to_string(),
        None => "-".dimmed().to_string(),
    }
}

fn print_matrix_table(cells: &[(Module, Role, PermissionSet)]) {
    print!("{:<18} {:<15}", "MODULE".bold(), "ROLE".bold());
    for capability in Capability::ALL {
        print!(" {:>13}", capability.as_str().bold());
    }
    println!();

    for (module, role, set) in cells {
        print!("{:<18} {:<15}", module.as_str(), role.as_str());
        for capability in Capability::ALL {
            // pad manually: colored strings carry escape codes
            print!(" {:>12}{}", "", mark(set.get(capability)));
        }
        println!();
    }
}

fn handle_matrix(format: OutputFormat, role: Option<&str>) -> anyhow::Result<()> {
    let matrix = PermissionMatrix::global();
    let role = match role {
        Some(raw) => Some(raw.parse::<Role>()?),
        None => None,
    };

    match format {
        OutputFormat::Table => {
            let cells: Vec<(Module, Role, PermissionSet)> = matrix
                .cells()
                .filter(|(_, r, _)| role.map_or(true, |wanted| wanted == *r))
                .map(|(m, r, s)| (m, r, *s))
                .collect();
            print_matrix_table(&cells);
        }
        OutputFormat::Json => match role {
            Some(role) => println!("{}", serde_json::to_string_pretty(&matrix.for_role(role))?),
            None => println!("{}", serde_json::to_string_pretty(matrix)?),
        },
        OutputFormat::Yaml => match role {
            Some(role) => print!("{}", serde_yaml::to_string(&matrix.for_role(role))?),
            None => print!("{}", serde_yaml::to_string(matrix)?),
        },
    }

    Ok(())
}

fn handle_check(
    loaded: Option<&LoadedConfig>,
    role: String,
    module: &str,
    action: &str,
    user_id: i64,
) -> anyhow::Result<()> {
    let session = Session::new(role, user_id, None);

    let granted = match loaded.and_then(|l| l.config.audit_logger(&l.base_dir)) {
        Some(logger) => AuditedAccess::new(session.clone(), logger).check(module, action),
        None => session.can(module, action),
    };

    if granted {
        println!("{} {} may {} on {}", "✓".green(), session.role, action, module);
        return Ok(());
    }

    let capability = Capability::parse(action);
    let module_key = Module::parse(module);
    if capability.is_none() {
        eprintln!("{} unknown capability '{}'", "warning:".yellow(), action);
    }
    if module_key.is_none() {
        eprintln!("{} unknown module '{}'", "warning:".yellow(), module);
    }

    let message = match session.require(module_key, capability) {
        Err(MandatoError::AccessDenied(message)) => message,
        _ => session.denied_message(None),
    };
    println!("{} {}", "✗".red(), message);
    std::process::exit(1);
}

fn handle_filter(
    config: Option<&MandatoConfig>,
    records: &Path,
    module: &str,
    role: Option<String>,
    user_id: Option<i64>,
    lideranca_id: Option<i64>,
) -> anyhow::Result<()> {
    let fallback = config.and_then(|c| c.spec.session.clone());

    let role = match role.or_else(|| fallback.as_ref().map(|s| s.role.clone())) {
        Some(role) => role,
        None => bail!("no role given and no session in {}", CONFIG_FILE_NAME),
    };
    let user_id = match user_id.or_else(|| fallback.as_ref().map(|s| s.user_id)) {
        Some(id) => id,
        None => bail!("no user id given and no session in {}", CONFIG_FILE_NAME),
    };
    let lideranca_id = lideranca_id.or_else(|| fallback.as_ref().and_then(|s| s.lideranca_id));

    let content = std::fs::read_to_string(records)
        .with_context(|| format!("reading {}", records.display()))?;
    let rows: Vec<serde_json::Value> = serde_json::from_str(&content)
        .with_context(|| format!("{} must contain a JSON array", records.display()))?;

    let session = Session::new(role, user_id, lideranca_id);
    let visible = session.visible_records(&rows, module);
    tracing::info!(
        total = rows.len(),
        visible = visible.len(),
        role = %session.role,
        "records filtered"
    );

    println!("{}", serde_json::to_string_pretty(&visible)?);
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let loaded = load_config(cli.config.as_deref())?;
    let config = loaded.as_ref().map(|l| &l.config);
    let default_level = config
        .map(|c| c.spec.logging.level.clone())
        .unwrap_or_else(|| "warn".to_string());
    init_tracing(cli.verbose, &default_level);

    match cli.command {
        Commands::Check { role, module, action, user_id } => {
            handle_check(loaded.as_ref(), role, &module, &action, user_id)?;
        }
        Commands::Matrix { format, role } => {
            handle_matrix(format, role.as_deref())?;
        }
        Commands::Sensitive { record_type, field } => {
            if rbac::is_sensitive_field(&record_type, &field) {
                println!("{} {}.{} is sensitive", "!".yellow(), record_type.to_lowercase(), field);
            } else {
                println!("{}.{} is not sensitive", record_type.to_lowercase(), field);
            }
        }
        Commands::Filter { records, module, role, user_id, lideranca_id } => {
            handle_filter(config, &records, &module, role, user_id, lideranca_id)?;
        }
        Commands::Deny { role, action } => {
            println!("{}", rbac::get_access_denied_message(&role, action.as_deref()));
        }
        Commands::Modules { role } => {
            let modules = rbac::accessible_modules(role.as_str());
            if modules.is_empty() {
                println!("{}", "(no modules)".dimmed());
            }
            for module in modules {
                println!("{:<16} {}", module.as_str(), module.label());
            }
        }
    }

    Ok(())
}
