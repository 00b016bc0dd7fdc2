mod cli;
mod commands;
mod formatting;
mod settings;

use std::process::ExitCode;

use cli::Commands;

#[tokio::main]
async fn main() -> ExitCode {
    run().await
}

async fn run() -> ExitCode {
    let raw_args: Vec<String> = std::env::args().collect();
    let args = cli::parse();
    settings::init_tracing(args.verbose);

    match args.command {
        Commands::Analyze(analyze) => {
            commands::run_analyze(&raw_args, args.config, analyze).await
        }
    }
}
