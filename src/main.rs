use snare::bait::BaitStore;
use snare::config::Config;
use snare::server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    let cfg = Config::load();
    tracing::info!(
        "Starting decoy: listen={} threshold={} records={}",
        cfg.server.listen_addr,
        cfg.bait.threshold,
        cfg.bait.records_path
    );

    // No records, no deception: refuse to start before anything binds.
    let store = BaitStore::load(&cfg.bait.records_path).map_err(|e| {
        anyhow::anyhow!("cannot load bait records from {}: {}", cfg.bait.records_path, e)
    })?;
    tracing::info!("Loaded {} fabricated records", store.len());

    tokio::select! {
        res = server::listener::run(&cfg, store) => {
            res?;
        }

        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    Ok(())
}
