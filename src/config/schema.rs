use serde::Deserialize;

/// TOML-deserializable config file. All fields are Option for layered merging.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    #[serde(default)]
    pub defaults: DefaultsFileConfig,
    #[serde(default)]
    pub output: OutputFileConfig,
    #[serde(default)]
    pub behavior: BehaviorFileConfig,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct DefaultsFileConfig {
    pub remote: Option<String>,
    pub branch: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct OutputFileConfig {
    pub plain: Option<bool>,
    pub quiet: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct BehaviorFileConfig {
    pub lenient_exit: Option<bool>,
}

impl FileConfig {
    /// Parse a TOML string into a FileConfig.
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }
}
