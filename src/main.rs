use anyhow::Context;
use classfile_sample::utils::logger;
use classfile_sample::{CliConfig, SampleProgram};

fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse_lenient(std::env::args_os());

    // 初始化日誌
    if config.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::debug!("CLI config: {:?}", config);
    if !config.args.is_empty() {
        tracing::debug!("Ignoring {} extra argument(s)", config.args.len());
    }

    let program = SampleProgram::new();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    let report = match program.run(&mut out) {
        Ok(report) => report,
        Err(e) => {
            tracing::error!("❌ Sample run failed: {}", e);
            std::process::exit(e.exit_code());
        }
    };

    tracing::debug!(
        "Run report: {}",
        serde_json::to_string(&report).context("serializing run report")?
    );
    Ok(())
}
