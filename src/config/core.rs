use super::{DiffConfig, SortOrder, WalkConfig};
use crate::finder::WalkOptions;
use crate::parallel::ParallelConfig;
use anyhow::{Context, Result};
use figment::{
    Figment,
    providers::{Env, Format, Json, Toml, Yaml},
};
use git2::Sort;
use serde::{Deserialize, Serialize};
use std::path::Path;

// Embed the default config at compile time
const DEFAULT_CONFIG: &str = include_str!("../../default-config.toml");

/// Fully merged gitsieve configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SieveConfig {
    pub walk: WalkConfig,
    pub diff: DiffConfig,
    pub parallel: ParallelConfig,
}

impl SieveConfig {
    pub fn load(custom_config: Option<&str>) -> Result<Self> {
        Self::figment(custom_config)
            .extract()
            .context("Failed to load configuration")
    }

    /// Layered provider chain; later layers win
    pub fn figment(custom_config: Option<&str>) -> Figment {
        tracing::trace!("CONFIG LOAD: Starting");

        let mut figment = Figment::new()
            .merge(Toml::string(DEFAULT_CONFIG))
            .merge(Toml::file(Self::user_config_path()))
            .merge(Toml::file("gitsieve.toml"));

        if let Some(path) = custom_config {
            tracing::trace!("CONFIG LOAD: Custom config {}", path);
            figment = match Path::new(path).extension().and_then(|ext| ext.to_str()) {
                Some("json") => figment.merge(Json::file(path)),
                Some("yaml") | Some("yml") => figment.merge(Yaml::file(path)),
                _ => figment.merge(Toml::file(path)),
            };
        }

        // Environment variables always have highest priority
        figment.merge(Env::prefixed("GITSIEVE_").split("__"))
    }

    /// Render the merged configuration back to TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize configuration")
    }

    pub fn walk_options(&self) -> WalkOptions {
        let mut sorting = match self.walk.sorting {
            SortOrder::Topological => Sort::TOPOLOGICAL | Sort::TIME,
            SortOrder::Time => Sort::TIME,
            SortOrder::None => Sort::NONE,
        };
        if self.walk.reverse {
            sorting |= Sort::REVERSE;
        }

        WalkOptions {
            sorting,
            ..WalkOptions::default()
        }
    }

    fn user_config_path() -> String {
        match std::env::var("HOME") {
            Ok(home) => format!("{home}/.config/gitsieve/config.toml"),
            Err(_) => "~/.config/gitsieve/config.toml".to_string(),
        }
    }
}
