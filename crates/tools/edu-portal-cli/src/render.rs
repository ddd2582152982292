//! Plain-text rendering of the dashboard model.

use edu_portal_api::Comment;
use edu_portal_controllers::{DashboardModel, Locale, Panel};
use std::io::{self, Write};

fn panel_title(panel: Panel, locale: Locale) -> &'static str {
    match (panel, locale) {
        (Panel::Teacher, Locale::Ru) => "Мои задания",
        (Panel::Teacher, Locale::En) => "My assignments",
        (Panel::Student, Locale::Ru) => "Задания",
        (Panel::Student, Locale::En) => "Assignments",
    }
}

pub fn write_dashboard(out: &mut impl Write, model: &DashboardModel, locale: Locale) -> io::Result<()> {
    if let Some(user) = model.user.lock_ref().as_ref() {
        writeln!(out, "{}", user.email)?;
    }

    let Some(panel) = model.panel.get() else {
        return Ok(());
    };
    writeln!(out, "== {} ==", panel_title(panel, locale))?;

    for item in model.items.lock_ref().iter() {
        writeln!(out, "[{}] {}", item.id, item.title)?;
        if !item.description.is_empty() {
            writeln!(out, "    {}", item.description)?;
        }
        writeln!(out, "    > {}", item.action.label(locale))?;
    }
    Ok(())
}

pub fn write_notifications(out: &mut impl Write, model: &DashboardModel) -> io::Result<()> {
    for notification in model.notifications.lock_ref().iter() {
        let marker = if notification.is_read { ' ' } else { '*' };
        match notification.id {
            Some(id) => writeln!(out, "{marker} [{id}] {}", notification.message)?,
            None => writeln!(out, "{marker} {}", notification.message)?,
        }
    }
    Ok(())
}

fn author(is_teacher: bool, locale: Locale) -> &'static str {
    match (is_teacher, locale) {
        (true, Locale::Ru) => "Преподаватель",
        (true, Locale::En) => "Teacher",
        (false, Locale::Ru) => "Студент",
        (false, Locale::En) => "Student",
    }
}

pub fn write_comments(out: &mut impl Write, comments: &[Comment], locale: Locale) -> io::Result<()> {
    for comment in comments {
        writeln!(out, "{}: {}", author(comment.is_teacher, locale), comment.content)?;
    }
    Ok(())
}
