//! Controller host for the terminal.

use edu_portal_controllers::{Locale, Notice, Route, Severity, Shell};
use std::cell::RefCell;
use std::io::{BufRead, Write};
use tracing::{debug, warn};

/// Prints notices, answers prompts from an input stream and remembers
/// where the controllers asked to navigate.
pub struct TerminalShell {
    locale: Locale,
    input: RefCell<Box<dyn BufRead>>,
    routes: RefCell<Vec<Route>>,
}

impl TerminalShell {
    pub fn new(locale: Locale) -> Self {
        Self::with_input(locale, std::io::BufReader::new(std::io::stdin()))
    }

    pub fn with_input(locale: Locale, input: impl BufRead + 'static) -> Self {
        Self {
            locale,
            input: RefCell::new(Box::new(input)),
            routes: RefCell::new(Vec::new()),
        }
    }

    pub fn last_route(&self) -> Option<Route> {
        self.routes.borrow().last().copied()
    }

    pub fn routes(&self) -> Vec<Route> {
        self.routes.borrow().clone()
    }
}

impl Shell for TerminalShell {
    fn navigate(&self, route: Route) {
        debug!(path = %route.path(), "Navigation requested");
        self.routes.borrow_mut().push(route);
    }

    fn notify(&self, notice: Notice) {
        let text = notice.text(self.locale);
        match notice.severity() {
            Severity::Info => println!("{text}"),
            Severity::Error => eprintln!("{text}"),
        }
    }

    fn prompt(&self, notice: Notice) -> Option<String> {
        print!("{} ", notice.text(self.locale));
        if let Err(err) = std::io::stdout().flush() {
            warn!(error = %err, "Failed to flush prompt");
        }

        let mut line = String::new();
        match self.input.borrow_mut().read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => Some(line.trim_end_matches(['\r', '\n']).to_string()),
            Err(err) => {
                warn!(error = %err, "Failed to read answer");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_prompt_reads_one_line_per_call() {
        let shell = TerminalShell::with_input(Locale::En, Cursor::new("first answer\r\nsecond\n"));
        assert_eq!(
            shell.prompt(Notice::AnswerPrompt).as_deref(),
            Some("first answer")
        );
        assert_eq!(shell.prompt(Notice::AnswerPrompt).as_deref(), Some("second"));
        assert_eq!(shell.prompt(Notice::AnswerPrompt), None);
    }

    #[test]
    fn test_navigation_is_recorded() {
        let shell = TerminalShell::with_input(Locale::Ru, Cursor::new(""));
        assert_eq!(shell.last_route(), None);

        shell.navigate(Route::Dashboard);
        shell.navigate(Route::Entry);
        assert_eq!(shell.last_route(), Some(Route::Entry));
        assert_eq!(shell.routes(), vec![Route::Dashboard, Route::Entry]);
    }
}
