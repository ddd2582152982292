//! Session handling and page controllers for the educational portal.
//!
//! The controllers hold no platform code. A host (the browser shell, the
//! terminal client, a test) supplies:
//!
//! - a [`TokenStore`] wrapped in a [`Session`]
//! - a [`Shell`] for navigation, notices and prompts
//! - a configured [`PortalClient`](edu_portal_client::PortalClient)
//!
//! State that a view renders lives in `futures-signals` models
//! ([`AuthModel`], [`DashboardModel`]) so any host can observe it.

pub mod auth;
pub mod dashboard;
pub mod session;
pub mod shell;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use auth::{AuthController, AuthError, AuthModel, Credentials, FormView, Registration};
pub use dashboard::{
    DashboardController, DashboardError, DashboardModel, Panel, WorkItemAction, WorkItemView,
};
#[cfg(not(target_arch = "wasm32"))]
pub use session::FileTokenStore;
pub use session::{MemoryTokenStore, Session, StoreError, StoreResult, TOKEN_KEY, TokenStore};
pub use shell::{Locale, Notice, Route, Severity, Shell};
