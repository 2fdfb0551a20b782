use clap::Parser;
use opc_skills::{batch_generate, cli::BatchArgs, GeminiConfig, ImageClient, TokioPacer};
use std::process;

#[tokio::main]
async fn main() {
    let env_loaded = dotenv::dotenv().is_ok();
    if let Err(e) = opc_skills::logger::init() {
        eprintln!("{}", e);
    }
    if !env_loaded {
        log::debug!("No .env file found, using system environment variables");
    }

    let args = BatchArgs::parse();
    let options = args.into_options();

    let client = match ImageClient::new(GeminiConfig::from_env()) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };
    log::info!("Using model {}", client.model());

    let mut stdout = std::io::stdout();
    match batch_generate(&client, &TokioPacer, &options, &mut stdout).await {
        Ok(run) => process::exit(run.exit_code()),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}
