//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.neural-contact/config.toml`. If missing on first run,
//! a commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::gateway::emailjs::{DEFAULT_EMAILJS_BASE_URL, EmailJsSettings};

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ContactConfig {
    #[serde(default)]
    pub emailjs: EmailJsConfig,
    #[serde(default)]
    pub contact: RecipientConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct EmailJsConfig {
    pub service_id: Option<String>,
    pub template_id: Option<String>,
    pub public_key: Option<String>,
    pub private_key: Option<String>,
    pub base_url: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct RecipientConfig {
    pub to_email: Option<String>,
}

// ============================================================================
// Resolved Config (concrete values where a default exists)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub emailjs: EmailJsSettings,
    pub emailjs_base_url: String,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.neural-contact/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".neural-contact").join("config.toml"))
}

/// Load config from `cli_path`, falling back to `~/.neural-contact/config.toml`.
///
/// If the default file doesn't exist, generates a commented-out default and
/// returns `ContactConfig::default()`. An explicit path that doesn't exist is
/// an I/O error. A file that exists but is malformed returns
/// `ConfigError::Parse`.
pub fn load_config(cli_path: Option<&Path>) -> Result<ContactConfig, ConfigError> {
    if let Some(path) = cli_path {
        return load_config_from(path);
    }

    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(ContactConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(ContactConfig::default());
    }

    load_config_from(&path)
}

/// Reads and parses a config file at an exact path.
pub fn load_config_from(path: &Path) -> Result<ContactConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: ContactConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config sections present: emailjs.service_id={}, contact.to_email={}",
        config.emailjs.service_id.is_some(),
        config.contact.to_email.is_some()
    );
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# Neural Contact Configuration
# All settings are optional — defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags
# (--service-id, --template-id, --public-key, --to-email, --base-url).

# [emailjs]
# service_id = "service_..."          # Or set EMAILJS_SERVICE_ID env var
# template_id = "template_..."        # Or set EMAILJS_TEMPLATE_ID env var
# public_key = "..."                  # Or set EMAILJS_PUBLIC_KEY env var
# private_key = "..."                 # Or set EMAILJS_PRIVATE_KEY env var
# base_url = "https://api.emailjs.com/api/v1.0"

# [contact]
# to_email = "you@example.com"        # Or set CONTACT_EMAIL env var
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Settings given on the command line (None = flag not passed).
///
/// The private key has no flag so it never shows up in process listings.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub service_id: Option<String>,
    pub template_id: Option<String>,
    pub public_key: Option<String>,
    pub to_email: Option<String>,
    pub base_url: Option<String>,
}

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &ContactConfig, cli: &CliOverrides) -> ResolvedConfig {
    resolve_with(config, cli, |key| std::env::var(key).ok())
}

/// Same as [`resolve`], reading env vars through `env` so tests don't
/// touch the process environment.
pub fn resolve_with(
    config: &ContactConfig,
    cli: &CliOverrides,
    env: impl Fn(&str) -> Option<String>,
) -> ResolvedConfig {
    // Each setting: CLI → env → config
    let pick = |flag: &Option<String>, key: &str, fallback: &Option<String>| {
        flag.clone()
            .or_else(|| env(key))
            .or_else(|| fallback.clone())
    };

    let emailjs = EmailJsSettings {
        service_id: pick(&cli.service_id, "EMAILJS_SERVICE_ID", &config.emailjs.service_id),
        template_id: pick(&cli.template_id, "EMAILJS_TEMPLATE_ID", &config.emailjs.template_id),
        public_key: pick(&cli.public_key, "EMAILJS_PUBLIC_KEY", &config.emailjs.public_key),
        private_key: pick(&None, "EMAILJS_PRIVATE_KEY", &config.emailjs.private_key),
        to_email: pick(&cli.to_email, "CONTACT_EMAIL", &config.contact.to_email),
    };

    // Base URL: CLI → env → config → default
    let emailjs_base_url = pick(&cli.base_url, "EMAILJS_BASE_URL", &config.emailjs.base_url)
        .unwrap_or_else(|| DEFAULT_EMAILJS_BASE_URL.to_string());

    let missing = emailjs.missing();
    if !missing.is_empty() {
        warn!(
            "EmailJS not fully configured (missing: {}); transmissions will fail",
            missing.join(", ")
        );
    }

    ResolvedConfig {
        emailjs,
        emailjs_base_url,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_resolve_uses_defaults_when_empty() {
        let config = ContactConfig::default();
        let resolved = resolve_with(&config, &CliOverrides::default(), no_env);
        assert_eq!(resolved.emailjs_base_url, DEFAULT_EMAILJS_BASE_URL);
        assert!(resolved.emailjs.service_id.is_none());
        assert_eq!(resolved.emailjs.missing().len(), 3);
    }

    #[test]
    fn test_env_wins_over_file() {
        let config = ContactConfig {
            emailjs: EmailJsConfig {
                service_id: Some("from-file".to_string()),
                template_id: Some("template-file".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        let env: HashMap<&str, &str> = HashMap::from([
            ("EMAILJS_SERVICE_ID", "from-env"),
            ("EMAILJS_BASE_URL", "http://localhost:8080"),
        ]);
        let resolved = resolve_with(&config, &CliOverrides::default(), |k| env.get(k).map(|v| v.to_string()));

        assert_eq!(resolved.emailjs.service_id.as_deref(), Some("from-env"));
        assert_eq!(resolved.emailjs.template_id.as_deref(), Some("template-file"));
        assert_eq!(resolved.emailjs_base_url, "http://localhost:8080");
    }

    #[test]
    fn test_cli_wins_over_env_and_file() {
        let config = ContactConfig {
            emailjs: EmailJsConfig {
                service_id: Some("from-file".to_string()),
                public_key: Some("pk-file".to_string()),
                ..Default::default()
            },
            contact: RecipientConfig {
                to_email: Some("file@example.com".to_string()),
            },
        };
        let env: HashMap<&str, &str> = HashMap::from([
            ("EMAILJS_SERVICE_ID", "from-env"),
            ("EMAILJS_BASE_URL", "http://env.invalid"),
            ("EMAILJS_PRIVATE_KEY", "secret-env"),
        ]);
        let cli = CliOverrides {
            service_id: Some("from-cli".to_string()),
            to_email: Some("cli@example.com".to_string()),
            base_url: Some("http://localhost:9090".to_string()),
            ..Default::default()
        };
        let resolved = resolve_with(&config, &cli, |k| env.get(k).map(|v| v.to_string()));

        assert_eq!(resolved.emailjs.service_id.as_deref(), Some("from-cli"));
        assert_eq!(resolved.emailjs.to_email.as_deref(), Some("cli@example.com"));
        assert_eq!(resolved.emailjs_base_url, "http://localhost:9090");
        // Unflagged settings fall through to env, then file
        assert_eq!(resolved.emailjs.private_key.as_deref(), Some("secret-env"));
        assert_eq!(resolved.emailjs.public_key.as_deref(), Some("pk-file"));
    }

    #[test]
    fn test_toml_round_trip() {
        let toml_str = r#"
[emailjs]
service_id = "service_abc"
template_id = "template_def"
public_key = "pk_123"

[contact]
to_email = "owner@example.com"
"#;
        let config: ContactConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.emailjs.service_id.as_deref(), Some("service_abc"));
        assert!(config.emailjs.private_key.is_none());
        assert_eq!(config.contact.to_email.as_deref(), Some("owner@example.com"));

        let resolved = resolve_with(&config, &CliOverrides::default(), no_env);
        assert!(resolved.emailjs.missing().is_empty());
    }

    #[test]
    fn test_sparse_toml_parses() {
        // Only override one thing — everything else stays default
        let toml_str = r#"
[contact]
to_email = "me@example.com"
"#;
        let config: ContactConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.contact.to_email.as_deref(), Some("me@example.com"));
        assert!(config.emailjs.service_id.is_none());
        assert!(config.emailjs.base_url.is_none());
    }

    #[test]
    fn test_malformed_toml_is_parse_error() {
        let path = std::env::temp_dir().join(format!("neural-contact-{}.toml", uuid::Uuid::new_v4()));
        fs::write(&path, "[emailjs\nservice_id = ").unwrap();
        let result = load_config_from(&path);
        let _ = fs::remove_file(&path);
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_explicit_missing_path_is_io_error() {
        let path = std::env::temp_dir().join(format!("neural-contact-missing-{}.toml", uuid::Uuid::new_v4()));
        assert!(matches!(load_config(Some(&path)), Err(ConfigError::Io(_))));
    }
}
