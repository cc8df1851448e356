use clap::Parser;
use pokedex::app::App;
use pokedex::cli::Args;
use pokedex::logging::setup_logging;
use std::process::ExitCode;
use tracing::info;

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let args = Args::parse();

    // Load config and setup logging before App::new() so startup logs are never silently dropped
    let early_config = {
        use figment::Figment;
        use figment::providers::Env;
        Figment::new()
            .merge(Env::raw())
            .extract::<pokedex::config::Config>()
            .expect("Failed to load config for logging setup")
    };
    setup_logging(&early_config, args.tracing);

    let app = App::new().await.expect("Failed to initialize application");

    info!(
        version = env!("CARGO_PKG_VERSION"),
        environment = if cfg!(debug_assertions) {
            "development"
        } else {
            "production"
        },
        "starting pokedex"
    );

    app.run(args.command).await
}
