use crate::config::toml_config::DumpConfig;
use crate::config::DumpSettings;
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "class_dump")]
#[command(about = "Prints the structure of a compiled class file")]
pub struct DumpArgs {
    /// Path to the .class file (overrides input.class_path)
    pub class_path: Option<String>,

    /// Path to TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Output format: text or json (overrides output.format)
    #[arg(long)]
    pub format: Option<String>,

    /// Hide the constant pool listing
    #[arg(long)]
    pub no_constant_pool: bool,

    /// Show attribute names
    #[arg(long)]
    pub attributes: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl DumpArgs {
    /// Loads the TOML file if one was given and applies command-line overrides.
    pub fn resolve(&self) -> Result<DumpSettings> {
        let file_config = match &self.config {
            Some(path) => {
                tracing::info!("📁 Loading configuration from: {}", path);
                DumpConfig::from_file(path)?
            }
            None => DumpConfig::default(),
        };
        self.merge(file_config)
    }

    /// 命令列參數優先於 TOML 設定
    pub fn merge(&self, mut file_config: DumpConfig) -> Result<DumpSettings> {
        if let Some(path) = &self.class_path {
            file_config.input.class_path = Some(path.clone());
        }
        if let Some(format) = &self.format {
            file_config.output.format = Some(format.clone());
        }
        if self.no_constant_pool {
            file_config.output.show_constant_pool = Some(false);
        }
        if self.attributes {
            file_config.output.show_attributes = Some(true);
        }

        file_config.validate()?;
        file_config.to_settings()
    }
}
