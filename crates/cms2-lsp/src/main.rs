use clap::Parser;

/// CMS-2 Language Server.
///
/// Speaks LSP over stdio; there is only one mode, so the CLI surface is
/// just a log-level override and a version flag.
#[derive(Debug, Parser)]
#[command(name = "cms2-lsp")]
#[command(about = "CMS-2 language server", long_about = None, version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    /// Override the log level (also settable via CMS2_LSP_LOG).
    #[arg(long)]
    log_level: Option<log::LevelFilter>,
}

fn main() {
    let cli = Cli::parse();
    let _ = cms2_lsp::logger::init_with_override(cli.log_level);
    cms2_lsp::run();
}
