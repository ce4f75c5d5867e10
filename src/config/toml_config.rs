use crate::core::codecs::{JsonCodec, JsonValueCodec, TomlCodec, XmlCodec};
use crate::utils::error::{Result, TestkitError};
use crate::utils::fixtures::FixtureLoader;
use crate::utils::validation::{
    validate_non_empty_string, validate_path, validate_range, validate_whitespace, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const MAX_INDENT_SIZE: usize = 16;
const MAX_PARENT_DIR_DEPTH: usize = 16;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TestkitConfig {
    pub compare_original_text: bool,
    pub fixtures: FixtureConfig,
    pub xml: XmlOptions,
    pub json: JsonOptions,
    pub json_value: JsonValueOptions,
    pub toml: TomlOptions,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FixtureConfig {
    /// Defaults to `CARGO_MANIFEST_DIR`, or the working directory outside cargo.
    pub base_dir: Option<PathBuf>,
    /// Number of `..` components inserted between the base dir and the fixture path.
    pub parent_dir_depth: usize,
}

/// Writer settings for `XmlCodec`. Reading has no settings: text content is
/// always trimmed at both ends.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct XmlOptions {
    pub indent: Option<IndentConfig>,
    /// Root element name; the serde type name is used when unset.
    pub root_tag: Option<String>,
    /// Prefix output with an `<?xml ...?>` declaration.
    pub declaration: bool,
    /// Write `<Tag></Tag>` instead of `<Tag/>`.
    pub expand_empty_elements: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndentConfig {
    pub char: char,
    pub size: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JsonFormatting {
    #[default]
    Compact,
    Indented,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JsonOptions {
    pub formatting: JsonFormatting,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JsonValueOptions {
    /// Indent unit for pretty output; compact when unset.
    pub indent: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlOptions {
    pub pretty: bool,
}

impl TestkitConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        tracing::debug!("Loading testkit config from {}", path.as_ref().display());
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| TestkitError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${CARGO_MANIFEST_DIR})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| TestkitError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.into_owned())
    }

    pub fn xml_codec(&self) -> XmlCodec {
        XmlCodec::new(self.xml.clone())
    }

    pub fn json_codec(&self) -> JsonCodec {
        JsonCodec::new(self.json.formatting)
    }

    pub fn json_value_codec(&self) -> JsonValueCodec {
        JsonValueCodec::new(self.json_value.clone())
    }

    pub fn toml_codec(&self) -> TomlCodec {
        TomlCodec::new(self.toml)
    }

    pub fn fixture_loader(&self) -> FixtureLoader {
        let loader = match &self.fixtures.base_dir {
            Some(dir) => FixtureLoader::new(dir.clone()),
            None => FixtureLoader::from_env(),
        };
        loader.with_parent_dir_depth(self.fixtures.parent_dir_depth)
    }
}

impl Validate for TestkitConfig {
    fn validate(&self) -> Result<()> {
        if let Some(dir) = &self.fixtures.base_dir {
            validate_path("fixtures.base_dir", &dir.to_string_lossy())?;
        }
        validate_range(
            "fixtures.parent_dir_depth",
            self.fixtures.parent_dir_depth,
            0,
            MAX_PARENT_DIR_DEPTH,
        )?;
        self.xml.validate()?;
        self.json_value.validate()
    }
}

impl Validate for XmlOptions {
    fn validate(&self) -> Result<()> {
        if let Some(indent) = &self.indent {
            validate_range("xml.indent.size", indent.size, 1, MAX_INDENT_SIZE)?;
            validate_whitespace("xml.indent.char", &indent.char.to_string())?;
        }
        if let Some(tag) = &self.root_tag {
            validate_non_empty_string("xml.root_tag", tag)?;
        }
        Ok(())
    }
}

impl Validate for JsonValueOptions {
    fn validate(&self) -> Result<()> {
        match &self.indent {
            Some(indent) => validate_whitespace("json_value.indent", indent),
            None => Ok(()),
        }
    }
}
