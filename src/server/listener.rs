use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{error, info, warn};

use crate::bait::BaitStore;
use crate::config::Config;
use crate::session::Session;

/// A run of accept failures this long, with no successful accept in
/// between, is treated as a dead listener rather than a noisy network.
const MAX_ACCEPT_FAILURES: u32 = 5;

/// Binds the configured address and serves until a fatal listener error.
pub async fn run(cfg: &Config, store: BaitStore) -> anyhow::Result<()> {
    let listener = TcpListener::bind(&cfg.server.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", cfg.server.listen_addr))?;
    info!("Listening on {}", cfg.server.listen_addr);

    serve(listener, store, cfg.bait.threshold).await
}

/// Accept loop over an already-bound listener.
///
/// Every accepted connection gets its own task and its own [`Session`] with
/// a fresh attempt counter; the loop never waits on a session. A session
/// failing, or panicking, takes down only its own task.
pub async fn serve(listener: TcpListener, store: BaitStore, threshold: i64) -> anyhow::Result<()> {
    let mut accept_failures: u32 = 0;

    loop {
        match listener.accept().await {
            Ok((socket, peer)) => {
                accept_failures = 0;
                info!("Accepted connection from {}", peer);

                let store = store.clone();
                tokio::spawn(async move {
                    let mut session = Session::new(socket, peer, store, threshold);
                    if let Err(e) = session.run().await {
                        error!("Session error from {}: {:#}", peer, e);
                    }
                });
            }

            Err(e) => {
                accept_failures += 1;
                if accept_failures >= MAX_ACCEPT_FAILURES {
                    return Err(e).context("listener failing repeatedly, giving up");
                }
                warn!("Accept failed ({} in a row): {}", accept_failures, e);
            }
        }
    }
}
