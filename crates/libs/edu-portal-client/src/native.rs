//! Timer backend for native targets

use std::time::Duration;

pub(crate) async fn sleep(duration: Duration) {
    tokio::time::sleep(duration).await;
}
