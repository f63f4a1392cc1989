pub mod report;
pub mod sample;

pub use crate::domain::model::{RunReport, StubSource};
pub use crate::domain::ports::TextSource;
pub use crate::utils::error::Result;
