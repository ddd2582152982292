//! Dashboard page: role panels, work item lists and notifications.

use super::{Labels, labels};
use dominator::{Dom, events};
use edu_portal_api::Notification;
use edu_portal_controllers::{DashboardController, Locale, Panel, WorkItemView};
use futures_signals::signal::SignalExt;
use futures_signals::signal_vec::SignalVecExt;
use std::rc::Rc;
use tracing::debug;
use wasm_bindgen_futures::spawn_local;

pub struct DashboardPage {
    controller: DashboardController,
    locale: Locale,
    labels: &'static Labels,
}

impl DashboardPage {
    pub fn new(controller: DashboardController, locale: Locale) -> Rc<Self> {
        Rc::new(Self {
            controller,
            locale,
            labels: labels(locale),
        })
    }

    /// Load the user, the panel list and then the notifications.
    pub fn load(page: &Rc<Self>) {
        spawn_local(clone!(page => async move {
            match page.controller.load_dashboard().await {
                Ok(panel) => {
                    debug!(?panel, "Dashboard loaded");
                    if let Err(err) = page.controller.load_notifications().await {
                        debug!(error = %err, "Notifications unavailable");
                    }
                }
                Err(err) => debug!(error = %err, "Dashboard not loaded"),
            }
        }));
    }

    pub fn render(page: Rc<Self>) -> Dom {
        let labels = page.labels;
        let model = page.controller.model();

        html!("div", {
            .class("dashboard")
            .child(html!("header", {
                .child(html!("span", {
                    .class("user-email")
                    .text_signal(model.user.signal_ref(|user| {
                        user.as_ref().map(|u| u.email.clone()).unwrap_or_default()
                    }))
                }))
                .child(html!("button", {
                    .attr("id", "logoutBtn")
                    .text(labels.logout)
                    .event(clone!(page => move |_: events::Click| {
                        page.controller.logout();
                    }))
                }))
            }))
            .child(html!("p", {
                .class("loading")
                .visible_signal(model.loading.signal())
                .text(labels.loading)
            }))
            .child(Self::render_panel(&page, Panel::Teacher, "teacherPanel", "assignmentsList", labels.teacher_title))
            .child(Self::render_panel(&page, Panel::Student, "studentPanel", "tasksList", labels.student_title))
            .child(Self::render_notifications(&page))
        })
    }

    fn render_panel(
        page: &Rc<Self>,
        panel: Panel,
        panel_id: &'static str,
        list_id: &'static str,
        title: &'static str,
    ) -> Dom {
        let model = page.controller.model();

        html!("section", {
            .attr("id", panel_id)
            .visible_signal(model.panel.signal().map(move |shown| shown == Some(panel)))
            .child(html!("h2", { .text(title) }))
            .child(html!("div", {
                .attr("id", list_id)
                .children_signal_vec(model.items.signal_vec_cloned()
                    .filter(move |item| item.action.panel() == panel)
                    .map(clone!(page => move |item| Self::render_item(&page, item))))
            }))
        })
    }

    /// Item text is inserted as text nodes, never parsed as markup.
    fn render_item(page: &Rc<Self>, item: WorkItemView) -> Dom {
        let action = item.action;

        html!("div", {
            .class("assignment")
            .child(html!("h3", { .text(&item.title) }))
            .child(html!("p", { .text(&item.description) }))
            .child(html!("button", {
                .text(action.label(page.locale))
                .event(clone!(page => move |_: events::Click| {
                    spawn_local(clone!(page => async move {
                        if let Err(err) = page.controller.perform(action).await {
                            debug!(error = %err, ?action, "Action not completed");
                        }
                    }));
                }))
            }))
        })
    }

    fn render_notifications(page: &Rc<Self>) -> Dom {
        let model = page.controller.model();

        html!("section", {
            .attr("id", "notifications")
            .visible_signal(model.notifications.signal_vec_cloned().is_empty().map(|empty| !empty))
            .child(html!("h2", { .text(page.labels.notifications_title) }))
            .child(html!("ul", {
                .attr("id", "notificationsList")
                .children_signal_vec(model.notifications.signal_vec_cloned()
                    .map(clone!(page => move |notification| Self::render_notification(&page, notification))))
            }))
        })
    }

    fn render_notification(page: &Rc<Self>, notification: Notification) -> Dom {
        let unread_id = notification.id.filter(|_| !notification.is_read);

        html!("li", {
            .class(if notification.is_read { "read" } else { "unread" })
            .text(&notification.message)
            .apply(|dom| match unread_id {
                Some(id) => dom.child(html!("button", {
                    .text(page.labels.mark_read)
                    .event(clone!(page => move |_: events::Click| {
                        spawn_local(clone!(page => async move {
                            if let Err(err) = page.controller.mark_notification_read(id).await {
                                debug!(error = %err, id, "Notification not marked read");
                            }
                        }));
                    }))
                })),
                None => dom,
            })
        })
    }
}
