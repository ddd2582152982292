//! Timer backend for the browser, driven by `setTimeout`

use std::time::Duration;

pub(crate) async fn sleep(duration: Duration) {
    gloo_timers::future::sleep(duration).await;
}
