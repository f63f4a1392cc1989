#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use clap::Parser;
use serde::{Deserialize, Serialize};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "classfile-sample")]
#[command(about = "Runs the sample program and prints its result")]
#[command(disable_help_flag = true, disable_version_flag = true)]
pub struct CliConfig {
    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Write logs as JSON lines")]
    pub json_logs: bool,

    /// Extra arguments are accepted and ignored
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// Parses the argument vector without ever rejecting it. Tokens clap
    /// cannot place end up in `args`.
    pub fn parse_lenient<I, T>(argv: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString>,
    {
        let argv: Vec<std::ffi::OsString> = argv.into_iter().map(Into::into).collect();
        if let Ok(config) = Self::try_parse_from(&argv) {
            return config;
        }

        let mut config = Self {
            verbose: false,
            json_logs: false,
            args: Vec::new(),
        };
        for arg in argv.iter().skip(1).map(|arg| arg.to_string_lossy()) {
            match arg.as_ref() {
                "--verbose" => config.verbose = true,
                "--json-logs" => config.json_logs = true,
                _ => config.args.push(arg.into_owned()),
            }
        }
        config
    }
}

/// How `class_dump` renders a parsed class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl OutputFormat {
    pub const NAMES: [&'static str; 2] = ["text", "json"];

    pub fn from_name(field_name: &str, name: &str) -> crate::Result<Self> {
        crate::utils::validation::validate_non_empty_string(field_name, name)?;
        crate::utils::validation::validate_one_of(field_name, name, &Self::NAMES)?;
        Ok(match name {
            "json" => OutputFormat::Json,
            _ => OutputFormat::Text,
        })
    }
}

/// Settings `class_dump` runs with after merging the TOML file and flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DumpSettings {
    pub class_path: String,
    pub format: OutputFormat,
    pub show_constant_pool: bool,
    pub show_members: bool,
    pub show_attributes: bool,
}

impl crate::utils::validation::Validate for DumpSettings {
    fn validate(&self) -> crate::Result<()> {
        crate::utils::validation::validate_path("input.class_path", &self.class_path)
    }
}
