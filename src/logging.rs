use flexi_logger::{opt_format, Cleanup, Criterion, FileSpec, Logger, Naming};

/// Starts file-backed logging for the CLI binaries. Library consumers that
/// embed the core directly are expected to set up their own `log` backend;
/// this is only wired into `src/bin/*`.
pub fn setup_logging() {
    Logger::try_with_env_or_str("info")
        .unwrap()
        .log_to_file(FileSpec::default().directory("/var/log/tile_match_core/"))
        .format(opt_format)
        .rotate(
            Criterion::Size(10 * 1024 * 1024),
            Naming::Numbers,
            Cleanup::KeepLogFiles(5),
        )
        .start()
        .unwrap();
}
