use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use weather_dashboard::{serve, DashboardConfig, DEFAULT_DATA_PATH};

/// Serve the weather dashboard over HTTP.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
struct Args {
    /// CSV dataset to render.
    #[arg(short, long, default_value = DEFAULT_DATA_PATH)]
    data: PathBuf,

    /// Address to listen on.
    #[arg(short, long, default_value = "127.0.0.1:8501")]
    addr: SocketAddr,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    // Set RUST_LOG=info (or debug) to see each rerun
    env_logger::init();

    let args = Args::parse();
    let config = DashboardConfig::builder().data_path(args.data).build();
    serve(args.addr, config).await
}
