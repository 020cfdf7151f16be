//! Subcommand implementations

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use daytoken_core::{
    line_direction, AuthorizationWorkflow, ClockSource, CredentialRegistry, DecisionSink,
    IdentifierKind, LineDirection, Operation, RandTokenGenerator, SystemClock,
    TokenGenerator, TokenLifecycleEngine,
};
use daytoken_service::{ServiceConfig, TokenTicker};

use crate::DecisionArg;

/// Run the ticker and display the rotating credential until Ctrl-C
pub async fn show(
    cycle: Option<f64>,
    interval_ms: Option<u64>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let mut config = match config_path {
        Some(path) => ServiceConfig::load(&path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => {
            let path = ServiceConfig::default_path();
            if path.exists() {
                ServiceConfig::load(&path)?
            } else {
                ServiceConfig::default()
            }
        }
    };
    if let Some(cycle) = cycle {
        config.cycle_secs = cycle;
    }
    if let Some(interval_ms) = interval_ms {
        config.tick_interval_ms = interval_ms;
    }

    let engine = Arc::new(TokenLifecycleEngine::with_config(
        RandTokenGenerator,
        SystemClock,
        config.engine_config(),
    )?);
    let ticker = TokenTicker::spawn(engine, config.tick_interval())?;
    let mut rx = ticker.subscribe();

    println!("Press Ctrl-C to stop");
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);
    loop {
        tokio::select! {
            _ = &mut ctrl_c => break,
            changed = rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let snapshot = rx.borrow_and_update().clone();
                if snapshot.rotated {
                    println!();
                }
                print!(
                    "\r{}  {:5.1} s remaining [{:3.0}%]",
                    snapshot.credential.value(),
                    snapshot.remaining_secs,
                    snapshot.progress * 100.0
                );
                std::io::stdout().flush().ok();
            }
        }
    }
    println!();

    ticker.shutdown().await?;
    Ok(())
}

/// Generate one token value and exit
pub fn generate(width: usize) -> Result<()> {
    let mut generator = RandTokenGenerator;
    let value = generator.generate(width)?;
    println!("{}", value);
    Ok(())
}

/// Sink that hands terminal decisions to the host's reporting channels
struct LoggingSink;

impl DecisionSink for LoggingSink {
    fn on_authorized(&mut self, operation: &Operation) {
        info!("Dispatching operation {} for execution", operation.id);
    }

    fn on_cancelled(&mut self, operation: &Operation) {
        info!("Operation {} cancelled", operation.id);
    }

    fn on_reported(&mut self, operation: &Operation) {
        info!("Filing fraud report for operation {}", operation.id);
    }
}

/// Apply one decision to a pending operation
pub fn authorize(operation: Operation, decision: DecisionArg) -> Result<()> {
    println!("{}", operation.title);
    println!("  Debit account: {}", operation.debit_account);
    println!("  Beneficiary:   {}", operation.beneficiary);
    println!("  {}", operation.bank_line);
    println!("  Amount:        {}", operation.amount);

    let mut workflow = AuthorizationWorkflow::new(operation, LoggingSink);
    let outcome = match decision {
        DecisionArg::Authorize => workflow.authorize()?,
        DecisionArg::Cancel => workflow.cancel()?,
        DecisionArg::Report => workflow.report()?,
    };
    println!("Operation {}: {}", workflow.operation().id, outcome);
    Ok(())
}

/// List enrolled identifiers
pub fn credential_list() -> Result<()> {
    let registry = load_registry(&registry_path())?;
    if registry.is_empty() {
        println!("No identifiers enrolled");
        return Ok(());
    }

    for entry in registry.entries() {
        let enrolled = chrono::DateTime::from_timestamp(entry.enrolled_at as i64, 0)
            .map(|dt| dt.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{}  {}  Token ending *{}  enrolled {}",
            entry.identifier, entry.kind, entry.token_suffix, enrolled
        );
    }
    Ok(())
}

/// Enroll an identifier
pub fn credential_enroll(
    identifier: String,
    kind: IdentifierKind,
    token_suffix: String,
) -> Result<()> {
    let path = registry_path();
    let mut registry = load_registry(&path)?;
    registry.enroll(identifier.clone(), kind, token_suffix, SystemClock.now_unix())?;
    save_registry(&path, &registry)?;
    println!("Enrolled {} ({})", identifier, kind);
    Ok(())
}

/// Remove an enrolled identifier
pub fn credential_remove(identifier: String, kind: IdentifierKind) -> Result<()> {
    let path = registry_path();
    let mut registry = load_registry(&path)?;
    let removed = registry.remove(&identifier, kind)?;
    save_registry(&path, &registry)?;
    println!("Removed {} ({})", removed.identifier, removed.kind);
    Ok(())
}

/// Print the status history with timeline connectors
pub fn history(path: Option<PathBuf>) -> Result<()> {
    let entries = match path {
        Some(path) => daytoken_service::load_from_file(&path)
            .with_context(|| format!("failed to load history from {}", path.display()))?,
        None => daytoken_service::sample_feed(),
    };

    for (index, entry) in entries.iter().enumerate() {
        if matches!(
            line_direction(index, entries.len()),
            LineDirection::Top | LineDirection::Both
        ) {
            println!("  |");
        }
        let dot = if entry.is_current { "*" } else { "o" };
        let marker = if entry.is_current { "  (current)" } else { "" };
        println!("  {} {}  {}{}", dot, entry.title, entry.date_string, marker);
    }
    Ok(())
}

fn registry_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("daytoken")
        .join("registry.json")
}

fn load_registry(path: &Path) -> Result<CredentialRegistry> {
    if !path.exists() {
        return Ok(CredentialRegistry::new());
    }
    let content = std::fs::read_to_string(path)?;
    let registry = serde_json::from_str(&content)
        .with_context(|| format!("malformed registry file {}", path.display()))?;
    Ok(registry)
}

fn save_registry(path: &Path, registry: &CredentialRegistry) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let content = serde_json::to_string_pretty(registry)?;
    std::fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("registry.json");

        let mut registry = load_registry(&path).unwrap();
        assert!(registry.is_empty());

        registry
            .enroll("012.345.678-90", IdentifierKind::NationalId, "1234", 100)
            .unwrap();
        save_registry(&path, &registry).unwrap();

        let loaded = load_registry(&path).unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded.entries()[0].token_suffix, "1234");
    }

    #[test]
    fn test_malformed_registry_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("registry.json");
        std::fs::write(&path, b"not json").unwrap();

        assert!(load_registry(&path).is_err());
    }
}
