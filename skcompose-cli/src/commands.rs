//! CLI subcommand handlers.

use crate::{Commands, ConfigAction};
use anyhow::Context;
use serde::Serialize;
use skcompose_core::{
    ColumnTransformerDocument, ComposeConfig, ConsumptionRecord, Feature, Field, FieldRegistry,
    SessionRegistry,
};
use std::path::Path;

/// Output of `skcompose resolve`.
#[derive(Debug, Serialize)]
pub(crate) struct ResolveReport {
    pub features: Vec<Feature>,
    pub fields: Vec<Field>,
    pub consumed: Vec<ConsumptionRecord>,
}

/// Handle a CLI subcommand.
pub(crate) fn handle_command(
    command: Commands,
    workspace: &Path,
    config: ComposeConfig,
) -> anyhow::Result<()> {
    match command {
        Commands::Resolve { document, context } => {
            let report = resolve(&document, &context, config)?;
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(())
        }
        Commands::Config { action } => handle_config(action, workspace, &config),
    }
}

pub(crate) fn resolve(
    document: &Path,
    context: &[String],
    config: ComposeConfig,
) -> anyhow::Result<ResolveReport> {
    let doc = ColumnTransformerDocument::load(document)
        .with_context(|| format!("Failed to load {}", document.display()))?;
    let transformer = doc.into_transformer(&config)?;
    tracing::debug!(
        document = %document.display(),
        entries = transformer.entries().len(),
        context = context.len(),
        "Loaded column transformer"
    );

    let mut registry = SessionRegistry::with_config(&config);
    let context: Vec<Feature> = context
        .iter()
        .map(|name| Feature::wildcard(name.clone(), registry.create_field(name)))
        .collect();

    let features = transformer.resolve_features(&context, &mut registry)?;
    Ok(ResolveReport {
        features,
        fields: registry.fields().to_vec(),
        consumed: registry.consumption_log().to_vec(),
    })
}

fn handle_config(
    action: ConfigAction,
    workspace: &Path,
    config: &ComposeConfig,
) -> anyhow::Result<()> {
    match action {
        ConfigAction::Show => {
            println!("{}", toml::to_string_pretty(config)?);
            Ok(())
        }
        ConfigAction::Init => {
            let config_dir = workspace.join(".skcompose");
            std::fs::create_dir_all(&config_dir)?;

            let config_path = config_dir.join("config.toml");
            if config_path.exists() {
                println!(
                    "Configuration file already exists at: {}",
                    config_path.display()
                );
                return Ok(());
            }

            let toml_str = toml::to_string_pretty(&ComposeConfig::default())?;
            std::fs::write(&config_path, &toml_str)?;
            println!(
                "Created default configuration at: {}",
                config_path.display()
            );
            Ok(())
        }
    }
}
