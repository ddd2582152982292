use crate::config::CliConfig;
use crate::error::CliError;
use crate::render;
use crate::shell::TerminalShell;
use clap::{Parser, Subcommand};
use edu_portal_client::PortalClient;
use edu_portal_controllers::{
    AuthController, Credentials, DashboardController, FileTokenStore, MemoryTokenStore,
    Registration, Route, Session, Shell, WorkItemAction,
};
use std::path::PathBuf;
use std::rc::Rc;
use tracing::{debug, info};

/// Terminal client for the educational portal
#[derive(Parser, Debug)]
#[command(name = "edu-portal")]
#[command(about = "Log in, browse assignments and submit answers from the terminal")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Configuration file (TOML)
    #[arg(short, long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Portal API base URL, overriding the configuration
    #[arg(short, long, value_name = "URL", global = true)]
    pub server_url: Option<String>,

    /// Keep the session token in memory only
    #[arg(long, global = true)]
    pub ephemeral: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Log in and show the dashboard
    Login {
        #[arg(short, long)]
        email: String,

        /// Read from the terminal when omitted
        #[arg(long, env = "EDU_PORTAL_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
    /// Create an account
    Register {
        #[arg(short, long)]
        email: String,

        #[arg(long, env = "EDU_PORTAL_PASSWORD", hide_env_values = true)]
        password: Option<String>,

        /// Register as a teacher
        #[arg(long)]
        teacher: bool,
    },
    /// Forget the stored session token
    Logout,
    /// Show the panel for the logged-in user
    Dashboard,
    /// Submit an answer to an assignment
    SubmitAnswer {
        #[arg(short, long, value_name = "ID")]
        assignment: i64,

        /// Prompted for when omitted
        #[arg(long)]
        content: Option<String>,
    },
    /// List notifications
    Notifications,
    /// Mark a notification as read
    ReadNotification {
        #[arg(value_name = "ID")]
        id: i64,
    },
    /// Grade a submitted answer (teachers)
    Grade {
        #[arg(short, long, value_name = "ID")]
        answer: i64,

        #[arg(short, long)]
        grade: i32,
    },
    /// List comments on an answer
    Comments {
        #[arg(value_name = "ANSWER_ID")]
        answer: i64,
    },
    /// Comment on an answer
    Comment {
        #[arg(short, long, value_name = "ID")]
        answer: i64,

        #[arg(long)]
        content: String,
    },
}

fn read_password(given: &Option<String>) -> Result<String, CliError> {
    match given {
        Some(password) => Ok(password.clone()),
        None => Ok(rpassword::prompt_password("Password: ")?),
    }
}

impl Args {
    pub fn load_config(&self) -> Result<CliConfig, CliError> {
        let mut config = CliConfig::load(self.config.as_deref())?;
        if let Some(url) = &self.server_url {
            config.server_url = url.clone();
            config.client_config().validate()?;
        }
        Ok(config)
    }

    pub async fn run(&self) -> Result<(), CliError> {
        let config = self.load_config()?;
        debug!(server_url = %config.server_url, "Configuration loaded");

        let client = PortalClient::new(config.client_config())?;
        let session = if self.ephemeral {
            Session::new(MemoryTokenStore::new())
        } else {
            Session::new(FileTokenStore::new(config.token_path()?))
        };
        let shell = Rc::new(TerminalShell::new(config.locale));
        let host: Rc<dyn Shell> = shell.clone();

        let dashboard = DashboardController::new(client.clone(), session.clone(), host.clone());
        let mut out = std::io::stdout();

        match &self.command {
            Command::Login { email, password } => {
                let auth = AuthController::new(client, session, host);
                let credentials = Credentials {
                    email: email.clone(),
                    password: read_password(password)?,
                };
                auth.submit_login(credentials).await?;

                if shell.last_route() == Some(Route::Dashboard) {
                    dashboard.load_dashboard().await?;
                    render::write_dashboard(&mut out, dashboard.model(), config.locale)?;
                }
            }
            Command::Register {
                email,
                password,
                teacher,
            } => {
                let auth = AuthController::new(client, session, host);
                let registration = Registration {
                    email: email.clone(),
                    password: read_password(password)?,
                    is_teacher: *teacher,
                };
                auth.submit_registration(registration).await?;
            }
            Command::Logout => dashboard.logout(),
            Command::Dashboard => {
                dashboard.load_dashboard().await?;
                render::write_dashboard(&mut out, dashboard.model(), config.locale)?;
            }
            Command::SubmitAnswer {
                assignment,
                content,
            } => match content {
                Some(content) => dashboard.submit_answer(*assignment, content.clone()).await?,
                None => dashboard.perform(WorkItemAction::SubmitAnswer(*assignment)).await?,
            },
            Command::Notifications => {
                let count = dashboard.load_notifications().await?;
                info!(count, "Notifications loaded");
                render::write_notifications(&mut out, dashboard.model())?;
            }
            Command::ReadNotification { id } => dashboard.mark_notification_read(*id).await?,
            Command::Grade { answer, grade } => dashboard.grade_answer(*answer, *grade).await?,
            Command::Comments { answer } => {
                let comments = dashboard.answer_comments(*answer).await?;
                render::write_comments(&mut out, &comments, config.locale)?;
            }
            Command::Comment { answer, content } => {
                dashboard.add_comment(*answer, content.clone()).await?;
            }
        }

        Ok(())
    }
}
