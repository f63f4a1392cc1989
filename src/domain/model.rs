use crate::domain::ports::TextSource;
use serde::Serialize;

/// Text source with nothing to yield. Always returns a usable, empty iterator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StubSource;

impl TextSource for StubSource {
    type Iter = std::iter::Empty<String>;

    fn iterator(&self) -> Self::Iter {
        std::iter::empty()
    }
}

/// What a single run of the sample observed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RunReport {
    pub sum: f64,
    pub branch_taken: bool,
    pub accumulator: i64,
    pub printed: i64,
}
