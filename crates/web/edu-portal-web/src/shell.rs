//! Controller host backed by the browser window.

use edu_portal_controllers::{Locale, Notice, Route, Shell};
use tracing::{debug, error};

pub struct BrowserShell {
    locale: Locale,
}

impl BrowserShell {
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }
}

impl Shell for BrowserShell {
    fn navigate(&self, route: Route) {
        let href = route.path();
        debug!(%href, "Navigating");
        if let Err(err) = gloo_utils::window().location().set_href(&href) {
            error!(?err, %href, "Navigation failed");
        }
    }

    fn notify(&self, notice: Notice) {
        if let Err(err) = gloo_utils::window().alert_with_message(notice.text(self.locale)) {
            error!(?err, ?notice, "Failed to show alert");
        }
    }

    fn prompt(&self, notice: Notice) -> Option<String> {
        gloo_utils::window()
            .prompt_with_message(notice.text(self.locale))
            .unwrap_or_else(|err| {
                error!(?err, "Failed to show prompt");
                None
            })
    }
}
