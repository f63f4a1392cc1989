pub mod classfile;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{cli::DumpArgs, CliConfig};

pub use config::{DumpSettings, OutputFormat};
pub use crate::core::{
    report::dump_class,
    sample::{add, SampleProgram},
};
pub use domain::{model::StubSource, ports::TextSource};
pub use utils::error::{Result, SampleError};
