//! Login / registration page controller.

use crate::session::{Session, StoreError};
use crate::shell::{Notice, Route, Shell};
use edu_portal_api::{LoginForm, RegisterRequest};
use edu_portal_client::{ClientError, PortalClient};
use futures_signals::signal::Mutable;
use std::rc::Rc;
use thiserror::Error;
use tracing::{error, info, warn};

/// Which of the two forms is visible. Exactly one always is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormView {
    #[default]
    Login,
    Register,
}

impl FormView {
    pub fn shows_login(self) -> bool {
        self == FormView::Login
    }

    pub fn shows_register(self) -> bool {
        self == FormView::Register
    }
}

#[derive(Debug, Clone, Default)]
pub struct AuthModel {
    pub view: Mutable<FormView>,
    /// A submission is in flight.
    pub busy: Mutable<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub email: String,
    pub password: String,
    pub is_teacher: bool,
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("A submission is already in progress")]
    Busy,

    #[error(transparent)]
    Request(#[from] ClientError),

    #[error(transparent)]
    Storage(#[from] StoreError),
}

struct BusyGuard(Mutable<bool>);

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.0.set_neq(false);
    }
}

#[derive(Clone)]
pub struct AuthController {
    client: PortalClient,
    session: Session,
    shell: Rc<dyn Shell>,
    model: AuthModel,
}

impl AuthController {
    pub fn new(client: PortalClient, session: Session, shell: Rc<dyn Shell>) -> Self {
        Self {
            client,
            session,
            shell,
            model: AuthModel::default(),
        }
    }

    pub fn model(&self) -> &AuthModel {
        &self.model
    }

    pub fn view(&self) -> FormView {
        self.model.view.get()
    }

    pub fn show_register(&self) {
        self.model.view.set_neq(FormView::Register);
    }

    pub fn show_login(&self) {
        self.model.view.set_neq(FormView::Login);
    }

    fn begin_submission(&self) -> Result<BusyGuard, AuthError> {
        let mut busy = self.model.busy.lock_mut();
        if *busy {
            return Err(AuthError::Busy);
        }
        *busy = true;
        Ok(BusyGuard(self.model.busy.clone()))
    }

    /// Exchange credentials for a token, store it and go to the dashboard.
    ///
    /// Values are sent as entered. Any failure shows a single
    /// [`Notice::LoginFailed`] and leaves the stored token untouched.
    pub async fn submit_login(&self, credentials: Credentials) -> Result<(), AuthError> {
        let _busy = self.begin_submission()?;
        info!(email = %credentials.email, "Submitting login");

        let form = LoginForm {
            username: credentials.email,
            password: credentials.password,
        };

        let token = match self.client.login(&form).await {
            Ok(token) => token,
            Err(err) => {
                warn!(error = %err, "Login failed");
                self.shell.notify(Notice::LoginFailed);
                return Err(err.into());
            }
        };

        if let Err(err) = self.session.begin(&token.access_token) {
            error!(error = %err, "Failed to persist session token");
            self.shell.notify(Notice::LoginFailed);
            return Err(err.into());
        }

        info!("Login succeeded");
        self.shell.navigate(Route::Dashboard);
        Ok(())
    }

    /// Create an account; on success switch back to the login form.
    pub async fn submit_registration(&self, registration: Registration) -> Result<(), AuthError> {
        let _busy = self.begin_submission()?;
        info!(
            email = %registration.email,
            is_teacher = registration.is_teacher,
            "Submitting registration"
        );

        let body = RegisterRequest {
            email: registration.email,
            password: registration.password,
            is_teacher: registration.is_teacher,
        };

        match self.client.register(&body).await {
            Ok(()) => {
                info!("Registration succeeded");
                self.shell.notify(Notice::Registered);
                self.show_login();
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "Registration failed");
                let notice = if err.status() == Some(400) {
                    Notice::EmailTaken
                } else {
                    Notice::RegistrationFailed
                };
                self.shell.notify(notice);
                Err(err.into())
            }
        }
    }
}
