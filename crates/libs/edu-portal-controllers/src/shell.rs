//! Everything a controller needs from its host: navigation, user-facing
//! notices and simple prompts.

use serde::{Deserialize, Serialize};

/// Pages the controllers can send the user to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Login / registration page.
    Entry,
    Dashboard,
    /// Answers submitted for one assignment (teacher view).
    AssignmentAnswers(i64),
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::Entry => "index.html".to_string(),
            Route::Dashboard => "dashboard.html".to_string(),
            Route::AssignmentAnswers(id) => format!("answers.html?assignment={id}"),
        }
    }
}

/// Language of user-facing text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Ru,
    En,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Error,
}

/// Messages shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    LoginFailed,
    Registered,
    RegistrationFailed,
    /// Registration rejected with 400, which the server uses for a taken email.
    EmailTaken,
    SessionExpired,
    DashboardLoadFailed,
    ListLoadFailed,
    AnswerPrompt,
    AnswerSubmitted,
    AnswerSubmitFailed,
    AnswerGraded,
    CommentAdded,
    RequestFailed,
}

impl Notice {
    pub fn severity(&self) -> Severity {
        match self {
            Notice::Registered
            | Notice::AnswerPrompt
            | Notice::AnswerSubmitted
            | Notice::AnswerGraded
            | Notice::CommentAdded => Severity::Info,
            _ => Severity::Error,
        }
    }

    pub fn text(&self, locale: Locale) -> &'static str {
        match locale {
            Locale::Ru => match self {
                Notice::LoginFailed => "Ошибка входа. Проверьте email и пароль.",
                Notice::Registered => "Регистрация успешна! Теперь войдите.",
                Notice::RegistrationFailed => "Ошибка регистрации. Попробуйте позже.",
                Notice::EmailTaken => "Ошибка регистрации. Возможно, email уже занят.",
                Notice::SessionExpired => "Сессия истекла. Пожалуйста, войдите снова.",
                Notice::DashboardLoadFailed => "Ошибка при загрузке данных",
                Notice::ListLoadFailed => "Ошибка при загрузке заданий",
                Notice::AnswerPrompt => "Введите ваш ответ:",
                Notice::AnswerSubmitted => "Ответ отправлен.",
                Notice::AnswerSubmitFailed => "Не удалось отправить ответ.",
                Notice::AnswerGraded => "Оценка сохранена.",
                Notice::CommentAdded => "Комментарий добавлен.",
                Notice::RequestFailed => "Не удалось выполнить запрос.",
            },
            Locale::En => match self {
                Notice::LoginFailed => "Login failed. Check your email and password.",
                Notice::Registered => "Registration successful! Please log in.",
                Notice::RegistrationFailed => "Registration failed. Please try again later.",
                Notice::EmailTaken => "Registration failed. This email may already be in use.",
                Notice::SessionExpired => "Your session has expired. Please log in again.",
                Notice::DashboardLoadFailed => "Failed to load data",
                Notice::ListLoadFailed => "Failed to load assignments",
                Notice::AnswerPrompt => "Enter your answer:",
                Notice::AnswerSubmitted => "Answer submitted.",
                Notice::AnswerSubmitFailed => "Failed to submit the answer.",
                Notice::AnswerGraded => "Grade saved.",
                Notice::CommentAdded => "Comment added.",
                Notice::RequestFailed => "The request could not be completed.",
            },
        }
    }
}

/// Host environment of a controller (browser window, terminal, test double).
pub trait Shell {
    fn navigate(&self, route: Route);

    fn notify(&self, notice: Notice);

    /// Ask the user for free text; `None` when cancelled.
    fn prompt(&self, notice: Notice) -> Option<String>;
}
