use config::{Config, ConfigError, Environment, File as ConfigFile};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Extraction pool size. `None` or `0` uses the host's available parallelism.
    pub worker_threads: Option<usize>,
    /// Order groups by device key before rendering instead of scan-completion order.
    pub sort_groups: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            worker_threads: None,
            sort_groups: true,
        }
    }
}

impl AppConfig {
    pub fn effective_worker_threads(&self) -> usize {
        match self.worker_threads {
            Some(n) if n > 0 => n,
            _ => std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1),
        }
    }
}

/// `FRAMELINE_*` variables, e.g. `FRAMELINE_WORKER_THREADS=4`.
fn environment() -> Environment {
    Environment::with_prefix("FRAMELINE").try_parsing(true)
}

fn load_from(environment: Environment) -> Result<AppConfig, ConfigError> {
    let builder = Config::builder()
        .add_source(ConfigFile::with_name("Config").required(false))
        .add_source(environment)
        .build()?;
    builder.try_deserialize::<AppConfig>()
}

/// Optional `Config` file in the working directory, overridden by the environment.
pub fn load_configuration() -> Result<AppConfig, ConfigError> {
    load_from(environment())
}
