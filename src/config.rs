use crate::core::value::FieldValue;
use crate::form::{FormField, FormState};
use crate::task::{ConcurrencyPolicy, DEFAULT_ENDPOINT};
use crate::transport::HttpTransport;
use serde::Deserialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config {path}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("invalid base url '{0}': expected http:// or https://")]
    InvalidBaseUrl(String),
    #[error("duplicate field name '{0}'")]
    DuplicateField(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FieldConfig {
    pub name: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub default: Option<String>,
}

impl FieldConfig {
    pub fn new(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: Some(label.into()),
            default: None,
        }
    }

    fn to_field(&self) -> FormField {
        let label = self.label.clone().unwrap_or_else(|| self.name.clone());
        let field = FormField::text(self.name.clone(), label);
        match &self.default {
            Some(default) => field.with_default(FieldValue::from(default.as_str())),
            None => field,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClientConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    #[serde(default = "default_form_id")]
    pub form_id: String,

    #[serde(default = "default_submit_id")]
    pub submit_id: String,

    #[serde(default)]
    pub timeout_ms: Option<u64>,

    #[serde(default)]
    pub concurrency: ConcurrencyPolicy,

    #[serde(default = "default_log_filter")]
    pub log_filter: String,

    #[serde(default = "default_log_file")]
    pub log_file: PathBuf,

    #[serde(default = "default_fields")]
    pub fields: Vec<FieldConfig>,
}

fn default_base_url() -> String {
    "http://127.0.0.1:8000".to_string()
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_form_id() -> String {
    "workoutForm".to_string()
}

fn default_submit_id() -> String {
    "workoutForm-submit".to_string()
}

fn default_log_filter() -> String {
    "info".to_string()
}

fn default_log_file() -> PathBuf {
    PathBuf::from("workout-form.log")
}

fn default_fields() -> Vec<FieldConfig> {
    vec![
        FieldConfig::new("user_id", "User id"),
        FieldConfig::new("date", "Date"),
        FieldConfig::new("workout_type", "Workout type"),
        FieldConfig::new("duration_minutes", "Duration (min)"),
        FieldConfig::new("calories_burned", "Calories burned"),
        FieldConfig::new("notes", "Notes"),
    ]
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            endpoint: default_endpoint(),
            form_id: default_form_id(),
            submit_id: default_submit_id(),
            timeout_ms: None,
            concurrency: ConcurrencyPolicy::default(),
            log_filter: default_log_filter(),
            log_file: default_log_file(),
            fields: default_fields(),
        }
    }
}

impl ClientConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_yaml(&content).map_err(|source| ConfigError::Yaml {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ConfigError::InvalidBaseUrl(self.base_url.clone()));
        }
        for (idx, field) in self.fields.iter().enumerate() {
            if field.name.is_empty() {
                continue;
            }
            if self.fields[..idx].iter().any(|other| other.name == field.name) {
                return Err(ConfigError::DuplicateField(field.name.clone()));
            }
        }
        Ok(())
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }

    pub fn build_form(&self) -> FormState {
        self.fields
            .iter()
            .fold(FormState::new(self.form_id.as_str()), |form, field| {
                form.with_field(field.to_field())
            })
    }

    pub fn transport(&self) -> HttpTransport {
        HttpTransport::new(self.base_url.as_str(), self.timeout())
    }
}
