use std::path::Path;

use seolens_lib::{Config, SeoError};
use tracing_subscriber::{fmt, EnvFilter};

pub fn load_config(path: Option<&Path>) -> Result<Config, SeoError> {
    let cfg = if let Some(p) = path {
        Config::from_toml_file(p).map_err(|e| {
            SeoError::Config(format!("Failed to read config {}: {}", p.display(), e))
        })?
    } else {
        Config::default()
    };

    cfg.validate()
        .map_err(|e| SeoError::Config(format!("Invalid config: {}", e)))?;
    Ok(cfg)
}

/// True when `flag` was given explicitly, as `--flag value` or `--flag=value`.
pub fn flag_present(args: &[String], flag: &str) -> bool {
    args.iter()
        .any(|arg| arg == flag || arg.starts_with(&format!("{flag}=")))
}

/// Log to stderr so stdout stays machine-readable. `RUST_LOG` wins over
/// `--verbose`.
pub fn init_tracing(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("warn,seolens={level},seolens_lib={level}")));

    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
