use clap::Parser;
use opc_skills::{cli::OverviewArgs, domain_overview, DataForSeoClient, DataForSeoConfig};
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

    let args = OverviewArgs::parse();
    let query = args.query();

    let client = match DataForSeoClient::new(DataForSeoConfig::from_env()) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    let mut stdout = std::io::stdout();
    if let Err(e) = domain_overview(&client, &query, &mut stdout).await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
