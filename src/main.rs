//! Feedcraft CLI: RSS 2.0 feed parsing.

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "feedcraft",
    version,
    about = "RSS 2.0 feed parsing — strict channel models, lenient element recovery, RFC 822 dates"
)]
struct Cli {
    #[command(subcommand)]
    command: feedcraft::cli::Commands,
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = feedcraft::cli::dispatch(cli.command) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
