//! Shell double that records what the controllers asked for.

use crate::shell::{Notice, Route, Shell};
use std::cell::RefCell;
use std::collections::VecDeque;

#[derive(Default)]
pub struct RecordingShell {
    pub routes: RefCell<Vec<Route>>,
    pub notices: RefCell<Vec<Notice>>,
    /// Replies handed out by `prompt`, oldest first; `None` cancels.
    pub answers: RefCell<VecDeque<Option<String>>>,
}

impl RecordingShell {
    pub fn routes(&self) -> Vec<Route> {
        self.routes.borrow().clone()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.notices.borrow().clone()
    }

    pub fn queue_answers(&self, answers: impl IntoIterator<Item = Option<String>>) {
        self.answers.borrow_mut().extend(answers);
    }
}

impl Shell for RecordingShell {
    fn navigate(&self, route: Route) {
        self.routes.borrow_mut().push(route);
    }

    fn notify(&self, notice: Notice) {
        self.notices.borrow_mut().push(notice);
    }

    fn prompt(&self, _notice: Notice) -> Option<String> {
        self.answers.borrow_mut().pop_front().flatten()
    }
}
