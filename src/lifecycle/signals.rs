//! OS signal handling.

/// Resolve when the process receives Ctrl+C (SIGINT).
///
/// If the handler cannot be installed this never resolves; shutdown then
/// relies on the broadcast coordinator alone.
pub async fn ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
}
