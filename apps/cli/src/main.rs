use clap::Parser;
use cloze_cli::Cli;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    cloze_cli::init_tracing();

    if let Err(e) = cloze_cli::run(cli).await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
