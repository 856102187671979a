//! Configuration management commands.

use std::fs;

use anyhow::{bail, Result};
use serde_json::json;

use super::{ConfigArgs, ConfigCommand};
use crate::config::generate_default_config;
use crate::context::{Context, CONFIG_NAMES};

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Init {
            base_url,
            api_path,
            force,
        } => init_config(&base_url, api_path, force, ctx),
        ConfigCommand::Validate => validate_config(ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    let source = ctx
        .config_path
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "(none, using environment)".to_string());
    let resolved = ctx.api_config();

    if ctx.output.is_json() {
        let api = resolved.as_ref().ok().map(|api| {
            json!({
                "base_url": api.base_url,
                "api_path": api.api_path,
                "timeout_secs": api.timeout.as_secs(),
                "api_root": api.api_root(),
            })
        });
        ctx.output.json(&json!({
            "source": source,
            "file": ctx.config,
            "resolved": api,
        }));
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    ctx.output.kv("file", &source);

    ctx.output.info("[api]");
    match resolved {
        Ok(api) => {
            ctx.output.kv("base_url", &api.base_url);
            ctx.output.kv("api_path", &api.api_path);
            ctx.output.kv("timeout", &format!("{}s", api.timeout.as_secs()));
            ctx.output.kv("api_root", &api.api_root());
        }
        Err(e) => ctx.output.warn(&format!("{:#}", e)),
    }

    ctx.output.info("[log]");
    ctx.output.kv("filter", &ctx.config.log.filter);
    Ok(())
}

fn init_config(base_url: &str, api_path: Option<String>, force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.resolve_path(CONFIG_NAMES[0]);

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    let api_path = match api_path {
        Some(path) => path,
        None => ctx
            .cwd
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("my-store")
            .to_string(),
    };

    fs::write(&config_path, generate_default_config(base_url, &api_path))?;
    ctx.output.success(&format!("Created: {}", config_path.display()));
    Ok(())
}

fn validate_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Validating configuration");

    let mut warnings: Vec<String> = Vec::new();

    if ctx.config_path.is_none() {
        warnings.push(format!(
            "no config file found (looked for {})",
            CONFIG_NAMES.join(", ")
        ));
    }
    if let Some(0) = ctx.config.api.timeout_secs {
        warnings.push("api.timeout_secs is 0".to_string());
    }
    if ctx.config.log.filter.trim().is_empty() {
        warnings.push("log.filter is empty; nothing will be logged".to_string());
    }

    for warning in &warnings {
        ctx.output.warn(&format!("Warning: {}", warning));
    }

    let api = ctx.api_config()?;
    ctx.output.debug(&format!("API root: {}", api.api_root()));

    if warnings.is_empty() {
        ctx.output.success("Configuration is valid");
    } else {
        ctx.output.success("Configuration is valid (with warnings)");
    }
    Ok(())
}
