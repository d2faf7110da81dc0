use anyhow::Result;
use tokio::net::TcpListener;
use todo_server::ServerConfig;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("todo_server=info,tower_http=info")),
        )
        .init();

    let config = ServerConfig::from_env()?;
    let listener = TcpListener::bind(config.addr()).await?;
    todo_server::run(listener).await?;
    Ok(())
}
