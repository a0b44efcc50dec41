use clap::Parser;
use realtor_gateway::api::{AppState, create_router};
use realtor_gateway::config::CONFIG;
use realtor_gateway::routes::ROUTE_TABLE;

#[derive(Debug, Parser)]
#[command(name = "realtor-gateway", about = "Real-estate assistant API gateway")]
struct Args {
    /// Address to listen on (overrides GATEWAY_BIND_ADDR)
    #[arg(long)]
    bind: Option<String>,

    /// Directory of static UI assets (overrides GATEWAY_STATIC_DIR)
    #[arg(long)]
    static_dir: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_target(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Bridge log crate -> tracing (so log::info! etc. work)
    tracing_log::LogTracer::init()?;

    let args = Args::parse();
    let mut config = CONFIG.clone();
    if let Some(bind) = args.bind {
        config.bind_addr = bind;
    }
    if let Some(static_dir) = args.static_dir {
        config.static_dir = static_dir;
    }

    if config.zillow_api_key.is_empty() {
        tracing::warn!("ZILLOW_RAPIDAPI_KEY is not set; provider calls will be rejected upstream");
    }

    for spec in ROUTE_TABLE {
        tracing::info!(route = spec.path, upstream = %spec.url(&config), "forwarding");
    }

    let bind_addr = config.bind_addr.clone();
    let app = create_router(AppState::new(config));

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
