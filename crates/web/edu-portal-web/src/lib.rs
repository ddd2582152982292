//! Browser front-end of the educational portal.
//!
//! The same module serves both pages. On start it reads the optional
//! embedded [`WebConfig`], then mounts the auth page or, when a session
//! token is stored, the dashboard.

#[macro_use]
extern crate dominator;

pub mod config;
pub mod logging;
pub mod pages;
pub mod shell;
pub mod storage;

use config::WebConfig;
use edu_portal_client::{ClientError, PortalClient};
use edu_portal_controllers::{AuthController, DashboardController, Session, Shell, StoreError};
use pages::Page;
use pages::auth::AuthPage;
use pages::dashboard::DashboardPage;
use shell::BrowserShell;
use std::rc::Rc;
use storage::LocalStorageTokenStore;
use thiserror::Error;
use tracing::{error, info, warn};
use wasm_bindgen::JsValue;
use wasm_bindgen::prelude::wasm_bindgen;

#[derive(Debug, Error)]
pub enum StartError {
    #[error("Invalid client configuration: {0}")]
    Client(#[from] ClientError),

    #[error(transparent)]
    Storage(#[from] StoreError),

    #[error("Browser API failure: {0}")]
    Browser(String),
}

impl StartError {
    fn browser(err: JsValue) -> Self {
        Self::Browser(format!("{err:?}"))
    }
}

#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();

    let config = WebConfig::embedded_json().map(|json| WebConfig::from_json(&json));
    let filter = match &config {
        Some(Ok(config)) => config.log_filter.as_str(),
        _ => "info",
    };
    logging::init(filter);

    let config = match config {
        Some(Ok(config)) => config,
        Some(Err(err)) => {
            warn!(error = %err, "Ignoring invalid embedded config");
            WebConfig::default()
        }
        None => WebConfig::default(),
    };

    if let Err(err) = start(&config) {
        error!(error = %err, "Failed to start the portal");
    }
}

fn start(config: &WebConfig) -> Result<(), StartError> {
    let location = gloo_utils::window().location();
    let origin = location.origin().map_err(StartError::browser)?;
    let path = location.pathname().map_err(StartError::browser)?;

    let client = PortalClient::new(config.client_config(&origin))?;
    let session = Session::new(LocalStorageTokenStore::new()?);
    let shell: Rc<dyn Shell> = Rc::new(BrowserShell::new(config.locale));

    match Page::from_path(&path) {
        Page::Entry => {
            info!("Mounting auth page");
            let page = AuthPage::new(AuthController::new(client, session, shell), config.locale);
            dominator::append_dom(&dominator::body(), AuthPage::render(page));
        }
        Page::Dashboard => {
            let controller = DashboardController::new(client, session, shell);
            if controller.guard().is_err() {
                return Ok(());
            }
            info!("Mounting dashboard page");
            let page = DashboardPage::new(controller, config.locale);
            dominator::append_dom(&dominator::body(), DashboardPage::render(page.clone()));
            DashboardPage::load(&page);
        }
    }

    Ok(())
}
