use crate::config::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::env;
use std::str::FromStr;

/// Environment variable selecting the untyped parameter policy
pub const UNTYPED_PARAMETERS_VAR: &str = "KILN_UNTYPED_PARAMETERS";

/// Environment variable holding `id=target` alias pairs, comma separated
pub const ALIASES_VAR: &str = "KILN_ALIASES";

/// What to do with a constructor parameter that has no declared type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UntypedParameterPolicy {
    /// Fail resolution with `UnresolvableParameter`
    #[default]
    Reject,
    /// Leave the slot out of the argument list
    Skip,
}

impl FromStr for UntypedParameterPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "reject" => Ok(UntypedParameterPolicy::Reject),
            "skip" => Ok(UntypedParameterPolicy::Skip),
            _ => Err(ConfigError::invalid_value(
                "untyped_parameters",
                s,
                "reject or skip",
            )),
        }
    }
}

impl std::fmt::Display for UntypedParameterPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let policy = match self {
            UntypedParameterPolicy::Reject => "reject",
            UntypedParameterPolicy::Skip => "skip",
        };
        write!(f, "{}", policy)
    }
}

/// Container configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContainerConfig {
    pub untyped_parameters: UntypedParameterPolicy,
    /// Alias bindings applied when the container is created
    pub aliases: BTreeMap<String, String>,
}

impl ContainerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_untyped_parameters(mut self, policy: UntypedParameterPolicy) -> Self {
        self.untyped_parameters = policy;
        self
    }

    pub fn with_alias(mut self, id: impl Into<String>, target: impl Into<String>) -> Self {
        self.aliases.insert(id.into(), target.into());
        self
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::new();

        if let Ok(policy) = env::var(UNTYPED_PARAMETERS_VAR) {
            config.untyped_parameters = policy.parse()?;
        }

        if let Ok(aliases) = env::var(ALIASES_VAR) {
            config.aliases = parse_aliases(&aliases)?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a YAML document
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a JSON document
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (id, target) in &self.aliases {
            if id.trim().is_empty() {
                return Err(ConfigError::validation_failed(
                    "alias identifiers must not be empty",
                ));
            }
            if target.trim().is_empty() {
                return Err(ConfigError::validation_failed(format!(
                    "alias '{}' has an empty target",
                    id
                )));
            }
        }
        Ok(())
    }
}

fn parse_aliases(raw: &str) -> Result<BTreeMap<String, String>, ConfigError> {
    let mut aliases = BTreeMap::new();

    for pair in raw.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let (id, target) = pair
            .split_once('=')
            .ok_or_else(|| ConfigError::invalid_value("aliases", pair, "id=target"))?;
        aliases.insert(id.trim().to_string(), target.trim().to_string());
    }

    Ok(aliases)
}
