use clap::Parser;
use classfile_sample::utils::logger;
use classfile_sample::{dump_class, DumpArgs};

fn main() {
    let args = DumpArgs::parse();

    // 初始化日誌
    logger::init_cli_logger(args.verbose);

    let settings = match args.resolve() {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!("❌ Configuration validation failed: {}", e);
            eprintln!("❌ {}", e);
            std::process::exit(e.exit_code());
        }
    };
    tracing::debug!("Dump settings: {:?}", settings);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if let Err(e) = dump_class(&settings, &mut out) {
        tracing::error!("❌ Failed to dump '{}': {}", settings.class_path, e);
        eprintln!("❌ {}: {}", settings.class_path, e);
        std::process::exit(e.exit_code());
    }
}
