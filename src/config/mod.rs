pub mod toml_config;

#[cfg(feature = "cli")]
use clap::{Parser, ValueEnum};
#[cfg(feature = "cli")]
use std::path::PathBuf;

pub use toml_config::{
    FixtureConfig, IndentConfig, JsonFormatting, JsonOptions, JsonValueOptions, TestkitConfig,
    TomlOptions, XmlOptions,
};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DocumentFormat {
    Json,
    JsonValue,
    Toml,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "roundtrip-check")]
#[command(about = "Checks that a serialized document survives a round trip unchanged")]
pub struct CliConfig {
    /// Serialized document to check
    pub file: PathBuf,

    #[arg(long, value_enum, default_value = "json")]
    pub format: DocumentFormat,

    /// TOML file with codec settings
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Use indented output (overrides the config file)
    #[arg(long)]
    pub indented: bool,

    /// Also compare the first re-serialization against the file content
    #[arg(long)]
    pub compare_original: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// Loads the optional config file and applies the command-line overrides.
    pub fn testkit_config(&self) -> crate::utils::error::Result<TestkitConfig> {
        let mut config = match &self.config {
            Some(path) => TestkitConfig::from_file(path)?,
            None => TestkitConfig::default(),
        };
        if self.indented {
            config.json.formatting = JsonFormatting::Indented;
            config.toml.pretty = true;
            if config.json_value.indent.is_none() {
                config.json_value.indent = Some("  ".to_string());
            }
        }
        config.compare_original_text |= self.compare_original;
        Ok(config)
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;

    #[test]
    fn test_cli_overrides() {
        let cli = CliConfig::parse_from([
            "roundtrip-check",
            "doc.json",
            "--format",
            "json-value",
            "--indented",
            "--compare-original",
        ]);
        assert_eq!(cli.format, DocumentFormat::JsonValue);

        let config = cli.testkit_config().unwrap();
        assert!(config.compare_original_text);
        assert_eq!(config.json.formatting, JsonFormatting::Indented);
        assert_eq!(config.json_value.indent.as_deref(), Some("  "));
        assert!(config.toml.pretty);
    }
}
