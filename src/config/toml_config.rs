use crate::config::{DumpSettings, OutputFormat};
use crate::utils::error::{Result, SampleError};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DumpConfig {
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InputConfig {
    pub class_path: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: Option<String>,
    pub show_constant_pool: Option<bool>,
    pub show_members: Option<bool>,
    pub show_attributes: Option<bool>,
}

impl DumpConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content =
            std::fs::read_to_string(&path).map_err(|e| SampleError::ConfigError {
                message: format!(
                    "cannot read config file '{}': {}",
                    path.as_ref().display(),
                    e
                ),
            })?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;
        let config = toml::from_str(&processed_content)?;
        Ok(config)
    }

    /// 替換環境變數 (例如 ${CLASS_DIR})，未設定的保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| SampleError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn format(&self) -> Result<OutputFormat> {
        match &self.output.format {
            Some(name) => OutputFormat::from_name("output.format", name),
            None => Ok(OutputFormat::default()),
        }
    }

    pub fn show_constant_pool(&self) -> bool {
        self.output.show_constant_pool.unwrap_or(true)
    }

    pub fn show_members(&self) -> bool {
        self.output.show_members.unwrap_or(true)
    }

    pub fn show_attributes(&self) -> bool {
        self.output.show_attributes.unwrap_or(false)
    }

    /// Settings taken from this file alone.
    pub fn to_settings(&self) -> Result<DumpSettings> {
        let class_path = validation::validate_required_field("input.class_path", &self.input.class_path)?;
        let settings = DumpSettings {
            class_path: class_path.clone(),
            format: self.format()?,
            show_constant_pool: self.show_constant_pool(),
            show_members: self.show_members(),
            show_attributes: self.show_attributes(),
        };
        settings.validate()?;
        Ok(settings)
    }
}

impl Validate for DumpConfig {
    fn validate(&self) -> Result<()> {
        if let Some(path) = &self.input.class_path {
            validation::validate_path("input.class_path", path)?;
        }
        self.format()?;
        Ok(())
    }
}
