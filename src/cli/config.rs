//! Configuration management for docsift
//!
//! Provides TOML-based configuration with defaults and validation.
//! Location: ~/.docsift/config.toml

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::embedding::engine::{ModelSource, DEFAULT_MODEL_ID, DEFAULT_REVISION};
use crate::errors::{Result, SiftError};
use crate::ranking::{KeywordMatcher, RankingParams};
use crate::sections::SectionLimits;

const DEFAULT_KEYWORDS: &[&str] = &[
    "onboarding form",
    "employee form",
    "compliance",
    "HR policy",
    "acknowledgment",
    "fill out",
    "employee details",
    "benefits enrollment",
    "direct deposit",
    "contract",
    "EEO",
    "anti-harassment",
    "tax form",
    "employment eligibility",
    "checklist",
];

const DEFAULT_SUBQUERIES: &[&str] = &[
    "fillable onboarding forms",
    "HR compliance checklists",
    "employee data collection forms",
    "policy acknowledgment forms",
    "employment contract and benefits info",
];

/// Complete configuration for docsift
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub ranking: RankingConfig,
    pub vocabulary: VocabularyConfig,
    pub queries: QueriesConfig,
    pub model: ModelConfig,
    pub paths: PathsConfig,
}

/// Scoring and truncation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankingConfig {
    pub keyword_boost: f64,
    pub top_k: usize,
    pub title_max_len: usize,
    pub snippet_max_len: usize,
}

/// Terms that earn a section the keyword boost
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VocabularyConfig {
    pub keywords: Vec<String>,
}

/// Task-framing probes; the persona+job query is appended at run time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueriesConfig {
    pub subqueries: Vec<String>,
}

/// Embedding model location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub model_id: String,
    pub revision: String,
    /// Directory with pre-downloaded model files; skips the hub when set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub local_path: Option<String>,
}

/// Input and output locations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    pub input_dir: String,
    pub output_dir: String,
    /// Defaults to persona.json inside input_dir
    #[serde(skip_serializing_if = "Option::is_none")]
    pub persona_file: Option<String>,
}

impl Default for RankingConfig {
    fn default() -> Self {
        let params = RankingParams::default();
        let limits = SectionLimits::default();
        Self {
            keyword_boost: params.keyword_boost,
            top_k: params.top_k,
            title_max_len: limits.title_max_len,
            snippet_max_len: limits.snippet_max_len,
        }
    }
}

impl Default for VocabularyConfig {
    fn default() -> Self {
        Self {
            keywords: DEFAULT_KEYWORDS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Default for QueriesConfig {
    fn default() -> Self {
        Self {
            subqueries: DEFAULT_SUBQUERIES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            model_id: DEFAULT_MODEL_ID.to_string(),
            revision: DEFAULT_REVISION.to_string(),
            local_path: None,
        }
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            input_dir: "input".to_string(),
            output_dir: "output".to_string(),
            persona_file: None,
        }
    }
}

impl Config {
    /// Load configuration from file or use defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(config_path) = path {
            Self::load_from_file(config_path)
        } else {
            Self::load_default()
        }
    }

    /// Load configuration from specific file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            SiftError::ConfigError(format!("Failed to read config {}: {}", path.display(), e))
        })?;

        let config: Config = toml::from_str(&contents)
            .map_err(|e| SiftError::ConfigError(format!("Failed to parse config: {}", e)))?;

        config.validate()?;
        log::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Load default configuration from standard location or use built-in defaults
    pub fn load_default() -> Result<Self> {
        if let Some(config_path) = Self::default_path() {
            if config_path.exists() {
                return Self::load_from_file(&config_path);
            }
        }

        Ok(Config::default())
    }

    /// Standard configuration file location
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".docsift").join("config.toml"))
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        let boost = self.ranking.keyword_boost;
        if !boost.is_finite() || boost < 0.0 {
            return Err(SiftError::ConfigError(format!(
                "keyword_boost must be a non-negative number, got {}",
                boost
            )));
        }

        if self.ranking.title_max_len == 0 {
            return Err(SiftError::ConfigError(
                "title_max_len must be greater than 0".to_string(),
            ));
        }

        if self.ranking.snippet_max_len == 0 {
            return Err(SiftError::ConfigError(
                "snippet_max_len must be greater than 0".to_string(),
            ));
        }

        if self.model.local_path.is_none() && self.model.model_id.trim().is_empty() {
            return Err(SiftError::ConfigError(
                "model_id must be set when no local_path is given".to_string(),
            ));
        }

        Ok(())
    }

    /// Save configuration to file
    pub fn save(&self, path: &Path) -> Result<()> {
        let contents = self.to_toml()?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                SiftError::ConfigError(format!("Failed to create config dir: {}", e))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| SiftError::ConfigError(format!("Failed to write config: {}", e)))?;

        Ok(())
    }

    /// Render as pretty TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| SiftError::ConfigError(format!("Failed to serialize config: {}", e)))
    }

    pub fn ranking_params(&self) -> RankingParams {
        RankingParams {
            keyword_boost: self.ranking.keyword_boost,
            top_k: self.ranking.top_k,
        }
    }

    pub fn section_limits(&self) -> SectionLimits {
        SectionLimits {
            title_max_len: self.ranking.title_max_len,
            snippet_max_len: self.ranking.snippet_max_len,
        }
    }

    pub fn keyword_matcher(&self) -> KeywordMatcher {
        KeywordMatcher::new(&self.vocabulary.keywords)
    }

    pub fn model_source(&self) -> ModelSource {
        match &self.model.local_path {
            Some(dir) => ModelSource::Local(Self::expand_path(dir)),
            None => ModelSource::Hub {
                model_id: self.model.model_id.clone(),
                revision: self.model.revision.clone(),
            },
        }
    }

    pub fn input_dir(&self) -> PathBuf {
        Self::expand_path(&self.paths.input_dir)
    }

    pub fn output_dir(&self) -> PathBuf {
        Self::expand_path(&self.paths.output_dir)
    }

    pub fn persona_file(&self) -> PathBuf {
        match &self.paths.persona_file {
            Some(file) => Self::expand_path(file),
            None => self.input_dir().join("persona.json"),
        }
    }

    /// Expand tilde in paths
    pub fn expand_path(path: &str) -> PathBuf {
        if let Some(rest) = path.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(rest);
            }
        }
        PathBuf::from(path)
    }
}
