#![forbid(unsafe_code)]

use clap::Parser;

fn main() {
    let cli = panelkit_cli::Cli::parse();
    let default_filter = if cli.verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
    log::info!("Starting panelkit");

    let stdout = std::io::stdout();
    if let Err(error) = panelkit_cli::run(cli, &mut stdout.lock()) {
        eprintln!("{error}");
        std::process::exit(error.exit_code());
    }
}
