use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub fixtures: FixtureConfig,
    #[serde(default)]
    pub rules: ConsoleRules,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

/// Where mock data comes from. Without a directory the embedded set is used.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct FixtureConfig {
    pub dir: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ConsoleRules {
    #[serde(default = "default_max_note_chars")]
    pub max_note_chars: usize,
}

impl Default for ConsoleRules {
    fn default() -> Self {
        Self {
            max_note_chars: default_max_note_chars(),
        }
    }
}

fn default_max_note_chars() -> usize { 2000 }

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            .set_default("server.port", 8080)?
            .add_source(config::File::with_name("config/default").required(false))
            // per-environment overrides, optional
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // untracked local overrides
            .add_source(config::File::with_name("config/local").required(false))
            // CONCIERGE_SERVER__PORT=9000 sets server.port
            .add_source(config::Environment::with_prefix("CONCIERGE").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rules_default_when_missing() {
        let config: Config = serde_json::from_value(serde_json::json!({
            "server": { "port": 9000 }
        }))
        .unwrap();

        assert_eq!(config.server.port, 9000);
        assert_eq!(config.rules.max_note_chars, 2000);
        assert!(config.fixtures.dir.is_none());
    }
}
