use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tokio::task::JoinSet;

use crate::config::Config;
use crate::error::Error;

pub(super) async fn serve(config: Arc<Config>, app: Router) -> Result<(), Error> {
    let mut set = JoinSet::new();
    for addr in config.server.http_addrs() {
        set.spawn(http(addr, app.clone()));
    }
    while let Some(result) = set.join_next().await {
        match result {
            Ok(Ok(())) => (),
            Ok(Err(err)) => tracing::error!(%err, "Server stopped"),
            Err(err) => tracing::error!(%err, "Server task failed"),
        }
    }
    Ok(())
}

async fn http(addr: SocketAddr, app: Router) -> Result<(), Error> {
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "Listening");
    axum::serve(listener, app).await?;
    Ok(())
}
