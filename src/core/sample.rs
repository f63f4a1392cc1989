use crate::core::{Result, RunReport, StubSource, TextSource};
use std::io::Write;

pub const FIRST_OPERAND: i32 = 10;
pub const SECOND_OPERAND: i64 = 20;
pub const EXPECTED_SUM: f64 = 30.0;
pub const ACCUMULATOR_ON_MATCH: i64 = 10;

/// Sum of an `i32` and an `i64`, widened to `f64`.
pub fn add(a: i32, b: i64) -> f64 {
    (i64::from(a) + b) as f64
}

pub struct SampleProgram<S: TextSource> {
    source: S,
}

impl SampleProgram<StubSource> {
    pub fn new() -> Self {
        Self { source: StubSource }
    }
}

impl Default for SampleProgram<StubSource> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: TextSource> SampleProgram<S> {
    pub fn with_source(source: S) -> Self {
        Self { source }
    }

    /// Runs the sample and writes its single output line to `out`.
    pub fn run<W: Write>(&self, out: &mut W) -> Result<RunReport> {
        let mut accumulator: i64 = 0;

        let sum = add(FIRST_OPERAND, SECOND_OPERAND);
        let branch_taken = sum == EXPECTED_SUM;
        if branch_taken {
            accumulator = ACCUMULATOR_ON_MATCH;
        }
        tracing::debug!(sum, branch_taken, accumulator, "Evaluated comparison");

        // 只呼叫，不使用結果
        let _ = self.source.iterator();

        let printed = accumulator + accumulator;
        writeln!(out, "{}", printed)?;
        out.flush()?;

        Ok(RunReport {
            sum,
            branch_taken,
            accumulator,
            printed,
        })
    }
}
