//! Intake configuration, loadable from TOML.

use std::time::Duration;

use serde::Deserialize;

use crate::dialogue::DialogueConfig;
use crate::error::IntakeResult;
use crate::inference::ollama::OllamaConfig;
use crate::session::DEFAULT_MINIMUM_VIABLE;
use crate::slots::Topic;
use crate::translator::TranslatorConfig;

/// Top-level intake configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IntakeConfig {
    /// Local Ollama extraction settings. Optional, defaults to enabled.
    #[serde(default)]
    pub ollama: OllamaConfig,
    #[serde(default)]
    pub dialogue: DialogueSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DialogueSettings {
    /// Topic names that make a session ready to calculate.
    #[serde(default = "default_minimum_viable")]
    pub minimum_viable: Vec<String>,
    /// Per-call extraction deadline in seconds.
    #[serde(default = "default_extraction_timeout")]
    pub extraction_timeout_secs: u64,
}

fn default_minimum_viable() -> Vec<String> {
    DEFAULT_MINIMUM_VIABLE
        .iter()
        .map(|t| t.as_str().to_string())
        .collect()
}

fn default_extraction_timeout() -> u64 {
    5
}

impl Default for DialogueSettings {
    fn default() -> Self {
        Self {
            minimum_viable: default_minimum_viable(),
            extraction_timeout_secs: default_extraction_timeout(),
        }
    }
}

impl IntakeConfig {
    /// Load config from a TOML file path.
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Dialogue settings with topic names resolved.
    pub fn dialogue_config(&self) -> IntakeResult<DialogueConfig> {
        let minimum_viable = self
            .dialogue
            .minimum_viable
            .iter()
            .map(|name| name.parse::<Topic>())
            .collect::<IntakeResult<Vec<_>>>()?;
        Ok(DialogueConfig {
            minimum_viable,
            extraction_timeout: self.extraction_timeout(),
        })
    }

    pub fn translator_config(&self) -> TranslatorConfig {
        TranslatorConfig {
            timeout: self.extraction_timeout(),
        }
    }

    fn extraction_timeout(&self) -> Duration {
        Duration::from_secs(self.dialogue.extraction_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::IntakeError;

    #[test]
    fn empty_config_uses_defaults() {
        let config: IntakeConfig = toml::from_str("").unwrap();
        assert_eq!(config.ollama.model, "phi3:mini");
        assert!(config.ollama.enabled);
        let dialogue = config.dialogue_config().unwrap();
        assert_eq!(dialogue.minimum_viable, DEFAULT_MINIMUM_VIABLE.to_vec());
        assert_eq!(dialogue.extraction_timeout, Duration::from_secs(5));
    }

    #[test]
    fn custom_dialogue_settings() {
        let toml = r#"
[ollama]
host = "http://10.0.0.5:11434"
enabled = false

[dialogue]
minimum_viable = ["event_type", "attendance", "crew travel"]
extraction_timeout_secs = 2
"#;
        let config: IntakeConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.ollama.host, "http://10.0.0.5:11434");
        assert!(!config.ollama.enabled);

        let dialogue = config.dialogue_config().unwrap();
        assert_eq!(
            dialogue.minimum_viable,
            vec![Topic::EventType, Topic::Attendance, Topic::CrewTravel]
        );
        assert_eq!(config.translator_config().timeout, Duration::from_secs(2));
    }

    #[test]
    fn unknown_topic_rejected() {
        let toml = r#"
[dialogue]
minimum_viable = ["event_type", "fireworks"]
"#;
        let config: IntakeConfig = toml::from_str(toml).unwrap();
        assert_eq!(
            config.dialogue_config().unwrap_err(),
            IntakeError::UnknownTopic("fireworks".into())
        );
    }
}
