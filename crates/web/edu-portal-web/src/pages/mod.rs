//! Page views rendered with `dominator`.
//!
//! Element ids follow the existing HTML/CSS contract of the portal.

pub mod auth;
pub mod dashboard;

use edu_portal_controllers::Locale;

/// Which page a document path belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Entry,
    Dashboard,
}

impl Page {
    pub fn from_path(path: &str) -> Self {
        let file = path.rsplit('/').next().unwrap_or_default();
        if file == "dashboard.html" || file == "dashboard" {
            Page::Dashboard
        } else {
            Page::Entry
        }
    }
}

/// Static UI text.
pub struct Labels {
    pub login_title: &'static str,
    pub register_title: &'static str,
    pub email: &'static str,
    pub password: &'static str,
    pub is_teacher: &'static str,
    pub login_button: &'static str,
    pub register_button: &'static str,
    pub to_register: &'static str,
    pub to_login: &'static str,
    pub logout: &'static str,
    pub loading: &'static str,
    pub teacher_title: &'static str,
    pub student_title: &'static str,
    pub notifications_title: &'static str,
    pub mark_read: &'static str,
}

const RU: Labels = Labels {
    login_title: "Вход",
    register_title: "Регистрация",
    email: "Email",
    password: "Пароль",
    is_teacher: "Я учитель",
    login_button: "Войти",
    register_button: "Зарегистрироваться",
    to_register: "Нет аккаунта? Зарегистрируйтесь",
    to_login: "Уже есть аккаунт? Войдите",
    logout: "Выйти",
    loading: "Загрузка...",
    teacher_title: "Мои задания",
    student_title: "Задания",
    notifications_title: "Уведомления",
    mark_read: "Прочитано",
};

const EN: Labels = Labels {
    login_title: "Log in",
    register_title: "Sign up",
    email: "Email",
    password: "Password",
    is_teacher: "I am a teacher",
    login_button: "Log in",
    register_button: "Sign up",
    to_register: "No account yet? Sign up",
    to_login: "Already registered? Log in",
    logout: "Log out",
    loading: "Loading...",
    teacher_title: "My assignments",
    student_title: "Assignments",
    notifications_title: "Notifications",
    mark_read: "Mark as read",
};

pub fn labels(locale: Locale) -> &'static Labels {
    match locale {
        Locale::Ru => &RU,
        Locale::En => &EN,
    }
}
