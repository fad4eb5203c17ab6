use garde::Validate;
use paperdesk_core::config::{validate_section, ConfigError, ConfigProperties, ConfigValidationDetail};
use paperdesk_core::{LogFormat, PaperdeskConfig};
use paperdesk_data_sqlx::PoolSettings;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://paperdesk.db?mode=rwc";

#[derive(Debug, Clone, Validate)]
pub struct ServerSection {
    #[garde(length(min = 1))]
    pub host: String,
    #[garde(range(min = 1))]
    pub port: u16,
}

#[derive(Debug, Clone, Validate)]
pub struct DatabaseSection {
    #[garde(length(min = 1))]
    pub url: String,
    #[garde(range(min = 1, max = 100))]
    pub max_connections: u32,
}

impl DatabaseSection {
    pub fn pool_settings(&self) -> PoolSettings {
        PoolSettings {
            max_connections: self.max_connections,
            ..PoolSettings::default()
        }
    }
}

/// Typed application settings.
#[derive(Debug, Clone, Validate)]
pub struct AppConfig {
    #[garde(dive)]
    pub server: ServerSection,
    #[garde(dive)]
    pub database: DatabaseSection,
    #[garde(skip)]
    pub log_format: LogFormat,
}

impl AppConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl ConfigProperties for AppConfig {
    fn from_config(config: &PaperdeskConfig) -> Result<Self, ConfigError> {
        let format: String = config.get_or("logging.format", "pretty".to_string())?;
        let log_format = format.parse::<LogFormat>().map_err(|message| {
            ConfigError::Validation(vec![ConfigValidationDetail {
                key: "logging.format".into(),
                message,
            }])
        })?;

        let app = AppConfig {
            server: ServerSection {
                host: config.get_or("server.host", "0.0.0.0".to_string())?,
                port: config.get_or("server.port", 3000u16)?,
            },
            database: DatabaseSection {
                url: config.get_or("database.url", DEFAULT_DATABASE_URL.to_string())?,
                max_connections: config.get_or("database.max_connections", 5u32)?,
            },
            log_format,
        };
        validate_section(&app)?;
        Ok(app)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use paperdesk_core::ConfigValue;

    #[test]
    fn defaults_when_empty() {
        let config = PaperdeskConfig::empty().with_typed::<AppConfig>().unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.database.url, DEFAULT_DATABASE_URL);
        assert_eq!(config.database.max_connections, 5);
        assert_eq!(config.log_format, LogFormat::Pretty);
        assert_eq!(config.bind_address(), "0.0.0.0:3000");
    }

    #[test]
    fn yaml_overrides_defaults() {
        let yaml = "server:\n  port: 8080\ndatabase:\n  url: \"sqlite::memory:\"\nlogging:\n  format: json\n";
        let config = PaperdeskConfig::from_yaml_str(yaml, "test")
            .unwrap()
            .with_typed::<AppConfig>()
            .unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.database.url, "sqlite::memory:");
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn out_of_range_pool_size_is_rejected() {
        let mut raw = PaperdeskConfig::empty();
        raw.set("database.max_connections", ConfigValue::Integer(0));
        let err = raw.with_typed::<AppConfig>().unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)), "{err}");
    }

    #[test]
    fn unknown_log_format_is_rejected() {
        let mut raw = PaperdeskConfig::empty();
        raw.set("logging.format", ConfigValue::String("xml".into()));
        let err = raw.with_typed::<AppConfig>().unwrap_err();
        match err {
            ConfigError::Validation(details) => assert_eq!(details[0].key, "logging.format"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn empty_database_url_is_rejected() {
        let mut raw = PaperdeskConfig::empty();
        raw.set("database.url", ConfigValue::String(String::new()));
        assert!(raw.with_typed::<AppConfig>().is_err());
    }
}
