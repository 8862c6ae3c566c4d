use clap::Parser;
use course_content_api::cli::ServerArgs;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up MONGO_URI etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug")),
        )
        .init();

    let args = ServerArgs::parse();

    if let Err(e) = course_content_api::cli::run(args).await {
        tracing::error!("Server error: {e:?}");
        std::process::exit(1);
    }

    Ok(())
}
