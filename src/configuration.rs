//! src/configuration.rs
use serde_aux::field_attributes::deserialize_number_from_string;
use std::path::Path;

#[derive(serde::Deserialize, Clone, Debug)]
pub struct Settings {
    pub telemetry: TelemetrySettings,
    pub reducer: ReducerSettings,
    pub output: OutputSettings,
}

#[derive(serde::Deserialize, Clone, Debug)]
pub struct TelemetrySettings {
    /// Default filter directive, used when `RUST_LOG` is not set.
    pub level: String,
}

#[derive(serde::Deserialize, Clone, Debug)]
pub struct ReducerSettings {
    pub missing_separator: MissingSeparatorPolicy,
}

#[derive(serde::Deserialize, Clone, Debug)]
pub struct OutputSettings {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub buffer_capacity: usize,
}

/// What the reducer does with a line that has no tab.
#[derive(serde::Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum MissingSeparatorPolicy {
    /// Log a warning and move on to the next line.
    #[default]
    Skip,
    /// Fail the stage.
    Abort,
}

/// Reads `configuration/base.yaml` from the working directory if present,
/// then `WORDCOUNT_*` environment variables (`__` separates nested keys,
/// e.g. `WORDCOUNT_REDUCER__MISSING_SEPARATOR=abort`).
pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    let base_path = std::env::current_dir()
        .map_err(|e| config::ConfigError::Foreign(Box::new(e)))?;
    load(&base_path.join("configuration"), environment())
}

fn environment() -> config::Environment {
    config::Environment::with_prefix("WORDCOUNT")
        .prefix_separator("_")
        .separator("__")
}

fn load(
    config_dir: &Path,
    environment: config::Environment,
) -> Result<Settings, config::ConfigError> {
    let settings = config::Config::builder()
        .set_default("telemetry.level", "info")?
        .set_default("reducer.missing_separator", "skip")?
        .set_default(
            "output.buffer_capacity",
            crate::emitter::DEFAULT_BUFFER_CAPACITY as u64,
        )?
        .add_source(config::File::from(config_dir.join("base.yaml")).required(false))
        .add_source(environment)
        .build()?;
    settings.try_deserialize::<Settings>()
}
