//! Dashboard page controller.
//!
//! Loading is gated on a stored token, then branches on the fetched user's
//! role. A 401 on any request ends the session, as does any HTTP error
//! status from `/users/me`. A 403 means the role forbids the action and keeps
//! the session, as do network failures and timeouts.

use crate::session::Session;
use crate::shell::{Locale, Notice, Route, Shell};
use edu_portal_api::{
    AnswerRequest, Assignment, Comment, CommentRequest, Notification, Role, Task, User,
};
use edu_portal_client::{ClientError, PortalClient};
use futures_signals::signal::Mutable;
use futures_signals::signal_vec::MutableVec;
use std::rc::Rc;
use thiserror::Error;
use tracing::{debug, error, info, warn};

/// Mutually exclusive dashboard sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Teacher,
    Student,
}

impl From<Role> for Panel {
    fn from(role: Role) -> Self {
        match role {
            Role::Teacher => Panel::Teacher,
            Role::Student => Panel::Student,
        }
    }
}

/// What a list entry's button does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkItemAction {
    ViewAnswers(i64),
    SubmitAnswer(i64),
}

impl WorkItemAction {
    /// The panel whose list carries this action.
    pub fn panel(&self) -> Panel {
        match self {
            WorkItemAction::ViewAnswers(_) => Panel::Teacher,
            WorkItemAction::SubmitAnswer(_) => Panel::Student,
        }
    }

    pub fn label(&self, locale: Locale) -> &'static str {
        match (self, locale) {
            (WorkItemAction::ViewAnswers(_), Locale::Ru) => "Просмотреть ответы",
            (WorkItemAction::ViewAnswers(_), Locale::En) => "View answers",
            (WorkItemAction::SubmitAnswer(_), Locale::Ru) => "Отправить ответ",
            (WorkItemAction::SubmitAnswer(_), Locale::En) => "Submit answer",
        }
    }
}

/// One rendered entry of the teacher or student list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkItemView {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub action: WorkItemAction,
}

impl From<Assignment> for WorkItemView {
    fn from(assignment: Assignment) -> Self {
        Self {
            id: assignment.id,
            title: assignment.title,
            description: assignment.description,
            action: WorkItemAction::ViewAnswers(assignment.id),
        }
    }
}

impl From<Task> for WorkItemView {
    fn from(task: Task) -> Self {
        Self {
            id: task.id,
            title: task.title,
            description: task.description,
            action: WorkItemAction::SubmitAnswer(task.id),
        }
    }
}

#[derive(Clone)]
pub struct DashboardModel {
    pub user: Mutable<Option<User>>,
    pub panel: Mutable<Option<Panel>>,
    pub items: MutableVec<WorkItemView>,
    pub notifications: MutableVec<Notification>,
    pub loading: Mutable<bool>,
}

impl Default for DashboardModel {
    fn default() -> Self {
        Self {
            user: Mutable::new(None),
            panel: Mutable::new(None),
            items: MutableVec::new(),
            notifications: MutableVec::new(),
            loading: Mutable::new(false),
        }
    }
}

impl DashboardModel {
    fn reset(&self) {
        self.user.set(None);
        self.panel.set(None);
        self.items.lock_mut().clear();
        self.notifications.lock_mut().clear();
        self.loading.set_neq(false);
    }
}

#[derive(Debug, Error)]
pub enum DashboardError {
    /// No token was stored; the user has been sent to the entry page.
    #[error("No session token")]
    NoSession,

    /// The server rejected the token; it has been cleared.
    #[error("Session rejected by the server")]
    SessionExpired,

    #[error(transparent)]
    Request(#[from] ClientError),
}

struct LoadingGuard(Mutable<bool>);

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        self.0.set_neq(false);
    }
}

#[derive(Clone)]
pub struct DashboardController {
    client: PortalClient,
    session: Session,
    shell: Rc<dyn Shell>,
    model: DashboardModel,
}

impl DashboardController {
    pub fn new(client: PortalClient, session: Session, shell: Rc<dyn Shell>) -> Self {
        Self {
            client,
            session,
            shell,
            model: DashboardModel::default(),
        }
    }

    pub fn model(&self) -> &DashboardModel {
        &self.model
    }

    /// The stored token, or a redirect to the entry page when there is none.
    pub fn guard(&self) -> Result<String, DashboardError> {
        match self.session.token() {
            Some(token) => Ok(token),
            None => {
                info!("No session token, redirecting to entry page");
                self.shell.navigate(Route::Entry);
                Err(DashboardError::NoSession)
            }
        }
    }

    /// Clear the token locally and return to the entry page.
    pub fn logout(&self) {
        info!("Logging out");
        self.session.end();
        self.model.reset();
        self.shell.navigate(Route::Entry);
    }

    fn expire(&self, err: &ClientError, notice: Notice) -> DashboardError {
        warn!(error = %err, "Session rejected, logging out");
        self.shell.notify(notice);
        self.session.end();
        self.model.reset();
        self.shell.navigate(Route::Entry);
        DashboardError::SessionExpired
    }

    fn fail(&self, err: ClientError, notice: Notice) -> DashboardError {
        if err.is_auth_failure() {
            self.expire(&err, Notice::SessionExpired)
        } else {
            error!(error = %err, ?notice, "Dashboard request failed");
            self.shell.notify(notice);
            DashboardError::Request(err)
        }
    }

    /// Any HTTP error status here means the token no longer names a user, so
    /// the session ends. Network failures keep it for a later retry.
    pub async fn fetch_current_user(&self) -> Result<User, DashboardError> {
        let token = self.guard()?;

        match self.client.current_user(&token).await {
            Ok(user) => {
                debug!(
                    email = %user.email,
                    is_teacher = user.is_teacher,
                    "Fetched current user"
                );
                self.model.user.set(Some(user.clone()));
                Ok(user)
            }
            Err(err) if err.is_auth_failure() => Err(self.expire(&err, Notice::SessionExpired)),
            Err(err) if err.status().is_some() => {
                Err(self.expire(&err, Notice::DashboardLoadFailed))
            }
            Err(err) => Err(self.fail(err, Notice::DashboardLoadFailed)),
        }
    }

    fn replace_items(&self, items: Vec<WorkItemView>) -> usize {
        let count = items.len();
        self.model.items.lock_mut().replace_cloned(items);
        count
    }

    pub async fn load_teacher_assignments(&self) -> Result<usize, DashboardError> {
        let token = self.guard()?;

        match self.client.assignments(&token).await {
            Ok(assignments) => {
                let count =
                    self.replace_items(assignments.into_iter().map(WorkItemView::from).collect());
                debug!(count, "Loaded teacher assignments");
                Ok(count)
            }
            Err(err) => Err(self.fail(err, Notice::ListLoadFailed)),
        }
    }

    pub async fn load_student_tasks(&self) -> Result<usize, DashboardError> {
        let token = self.guard()?;

        match self.client.my_assignments(&token).await {
            Ok(tasks) => {
                let count = self.replace_items(tasks.into_iter().map(WorkItemView::from).collect());
                debug!(count, "Loaded student tasks");
                Ok(count)
            }
            Err(err) => Err(self.fail(err, Notice::ListLoadFailed)),
        }
    }

    /// Fetch the user, reveal the matching panel, then load its list.
    ///
    /// Each failing step has already notified the user once by the time the
    /// error is returned.
    pub async fn load_dashboard(&self) -> Result<Panel, DashboardError> {
        self.model.loading.set_neq(true);
        let _loading = LoadingGuard(self.model.loading.clone());

        let user = self.fetch_current_user().await?;
        let panel = Panel::from(user.role());
        info!(?panel, "Showing dashboard panel");
        self.model.panel.set_neq(Some(panel));

        match panel {
            Panel::Teacher => self.load_teacher_assignments().await?,
            Panel::Student => self.load_student_tasks().await?,
        };

        Ok(panel)
    }

    /// Refresh the notification list. Failures other than an expired session
    /// are logged only.
    pub async fn load_notifications(&self) -> Result<usize, DashboardError> {
        let token = self.guard()?;

        match self.client.notifications(&token).await {
            Ok(notifications) => {
                let count = notifications.len();
                self.model.notifications.lock_mut().replace_cloned(notifications);
                Ok(count)
            }
            Err(err) if err.is_auth_failure() => Err(self.fail(err, Notice::RequestFailed)),
            Err(err) => {
                warn!(error = %err, "Failed to load notifications");
                Err(err.into())
            }
        }
    }

    pub async fn mark_notification_read(&self, notification_id: i64) -> Result<(), DashboardError> {
        let token = self.guard()?;

        if let Err(err) = self
            .client
            .mark_notification_read(&token, notification_id)
            .await
        {
            return Err(self.fail(err, Notice::RequestFailed));
        }

        let mut notifications = self.model.notifications.lock_mut();
        if let Some(index) = notifications
            .iter()
            .position(|n| n.id == Some(notification_id))
        {
            let mut notification = notifications[index].clone();
            notification.is_read = true;
            notifications.set_cloned(index, notification);
        }
        Ok(())
    }

    /// Run the action behind a list entry's button.
    pub async fn perform(&self, action: WorkItemAction) -> Result<(), DashboardError> {
        match action {
            WorkItemAction::ViewAnswers(assignment_id) => {
                self.shell.navigate(Route::AssignmentAnswers(assignment_id));
                Ok(())
            }
            WorkItemAction::SubmitAnswer(assignment_id) => {
                match self.shell.prompt(Notice::AnswerPrompt) {
                    Some(content) if !content.trim().is_empty() => {
                        self.submit_answer(assignment_id, content).await
                    }
                    _ => {
                        debug!(assignment_id, "Answer submission cancelled");
                        Ok(())
                    }
                }
            }
        }
    }

    pub async fn submit_answer(
        &self,
        assignment_id: i64,
        content: String,
    ) -> Result<(), DashboardError> {
        let token = self.guard()?;
        let body = AnswerRequest {
            content,
            assignment_id,
        };

        match self.client.submit_answer(&token, &body).await {
            Ok(_) => {
                info!(assignment_id, "Answer submitted");
                self.shell.notify(Notice::AnswerSubmitted);
                Ok(())
            }
            Err(err) => Err(self.fail(err, Notice::AnswerSubmitFailed)),
        }
    }

    pub async fn grade_answer(&self, answer_id: i64, grade: i32) -> Result<(), DashboardError> {
        let token = self.guard()?;

        match self.client.grade_answer(&token, answer_id, grade).await {
            Ok(_) => {
                info!(answer_id, grade, "Answer graded");
                self.shell.notify(Notice::AnswerGraded);
                Ok(())
            }
            Err(err) => Err(self.fail(err, Notice::RequestFailed)),
        }
    }

    pub async fn answer_comments(&self, answer_id: i64) -> Result<Vec<Comment>, DashboardError> {
        let token = self.guard()?;

        self.client
            .comments(&token, answer_id)
            .await
            .map_err(|err| self.fail(err, Notice::RequestFailed))
    }

    /// Comment on an answer as the current user.
    pub async fn add_comment(
        &self,
        answer_id: i64,
        content: String,
    ) -> Result<Comment, DashboardError> {
        let is_teacher = match self.model.user.get_cloned() {
            Some(user) => user.is_teacher,
            None => self.fetch_current_user().await?.is_teacher,
        };
        let token = self.guard()?;
        let body = CommentRequest {
            content,
            answer_id,
            is_teacher,
        };

        match self.client.create_comment(&token, &body).await {
            Ok(comment) => {
                info!(answer_id, "Comment added");
                self.shell.notify(Notice::CommentAdded);
                Ok(comment)
            }
            Err(err) => Err(self.fail(err, Notice::RequestFailed)),
        }
    }
}
