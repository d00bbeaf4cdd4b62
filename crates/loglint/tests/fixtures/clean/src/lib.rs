use tracing::{info, warn};

const READY: &str = "worker pool ready";

pub fn start(port: u16, workers: usize) {
    log::info!("listening on port {}", port);
    info!(workers, "starting workers");
    info!("{}", READY);
    warn!(retry = 3, "upstream slow, retrying");
    tracing::debug!(target: "net", "connection accepted");
}
