use actix_web::dev::ServerHandle;
use tokio::signal;
use tracing::{info, warn};

/// 等待 Ctrl+C，然后优雅停止 HTTP worker（处理中的请求会先完成）
pub async fn listen_for_shutdown(handle: ServerHandle) {
    match signal::ctrl_c().await {
        Ok(()) => {
            info!("Shutdown signal received, stopping HTTP workers...");
        }
        Err(e) => {
            warn!(
                "Failed to listen for Ctrl+C: {}. Proceeding with shutdown anyway.",
                e
            );
        }
    }

    handle.stop(true).await;
    info!("HTTP server stopped");
}
