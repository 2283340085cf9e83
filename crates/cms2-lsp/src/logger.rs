//! Stderr logging via `fern`, mirroring the common `log::Dispatch`-to-stderr
//! setup used across the wider CMS-2 tooling.

/// Install the stderr logger. `cli_level` (the binary's `--log-level` flag)
/// takes precedence over the `CMS2_LSP_LOG` environment variable when
/// present; absent both, logging is off.
pub fn init_with_override(cli_level: Option<log::LevelFilter>) -> Result<(), log::SetLoggerError> {
    let level = cli_level
        .or_else(|| std::env::var("CMS2_LSP_LOG").ok().and_then(|s| s.parse().ok()))
        .unwrap_or(log::LevelFilter::Off);

    fern::Dispatch::new()
        .format(|out, message, record| out.finish(format_args!("[{}] {}", record.level(), message)))
        .level(level)
        .chain(std::io::stderr())
        .apply()
}
