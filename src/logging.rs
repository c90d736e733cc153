use flexi_logger::{
    colored_default_format, opt_format, Cleanup, Criterion, Duplicate, FileSpec, FlexiLoggerError,
    Logger, LoggerHandle, Naming,
};

/// Starts the global logger. `RUST_LOG` overrides the `info` default.
///
/// Without a directory, logs go to stderr in colour. With one, they go to
/// rotating files there and warnings are duplicated to stderr. Keep the
/// returned handle alive for as long as logging is needed.
pub fn setup_logging(log_dir: Option<&str>) -> Result<LoggerHandle, FlexiLoggerError> {
    let logger = Logger::try_with_env_or_str("info")?;

    match log_dir {
        Some(dir) => logger
            .log_to_file(FileSpec::default().directory(dir).basename("twenty48"))
            .format(opt_format)
            .duplicate_to_stderr(Duplicate::Warn)
            .rotate(
                Criterion::Size(10 * 1024 * 1024), // 10 MB per file
                Naming::Numbers,
                Cleanup::KeepLogFiles(3),
            )
            .start(),
        None => logger.format(colored_default_format).start(),
    }
}
