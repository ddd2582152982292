//! Cross-platform HTTP client for the educational portal API
//!
//! The client wraps `reqwest` and works on both native and WASM targets. It
//! adds what the plain browser `fetch` calls lacked:
//!
//! - A timeout on every attempt (raced against a runtime timer)
//! - Bounded retries with exponential backoff for idempotent GET requests
//! - Error classification separating authentication failures (401) from
//!   transient failures (network, timeout, 5xx) and everything else
//!
//! # Examples
//!
//! ```rust,no_run
//! use edu_portal_client::{ClientConfig, PortalClient};
//! use edu_portal_api::LoginForm;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = PortalClient::new(ClientConfig::new("http://localhost:8000"))?;
//!
//!     let token = client
//!         .login(&LoginForm {
//!             username: "student@example.com".to_string(),
//!             password: "secret".to_string(),
//!         })
//!         .await?;
//!
//!     let user = client.current_user(&token.access_token).await?;
//!     println!("Logged in as {}", user.email);
//!
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod error;

#[cfg(not(target_arch = "wasm32"))]
mod native;
#[cfg(not(target_arch = "wasm32"))]
pub(crate) use native::sleep;

#[cfg(target_arch = "wasm32")]
mod wasm;
#[cfg(target_arch = "wasm32")]
pub(crate) use wasm::sleep;

pub use client::PortalClient;
pub use config::{ClientConfig, RetryConfig};
pub use error::{ClientError, ClientResult};
