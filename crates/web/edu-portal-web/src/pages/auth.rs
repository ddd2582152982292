//! Entry page: login and registration forms.

use super::{Labels, labels};
use dominator::{Dom, EventOptions, events};
use edu_portal_controllers::{AuthController, Credentials, FormView, Locale, Registration};
use futures_signals::signal::{Mutable, SignalExt};
use std::rc::Rc;
use tracing::debug;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;

pub struct AuthPage {
    controller: AuthController,
    labels: &'static Labels,
    email: Mutable<String>,
    password: Mutable<String>,
    reg_email: Mutable<String>,
    reg_password: Mutable<String>,
    is_teacher: Mutable<bool>,
}

impl AuthPage {
    pub fn new(controller: AuthController, locale: Locale) -> Rc<Self> {
        Rc::new(Self {
            controller,
            labels: labels(locale),
            email: Mutable::new(String::new()),
            password: Mutable::new(String::new()),
            reg_email: Mutable::new(String::new()),
            reg_password: Mutable::new(String::new()),
            is_teacher: Mutable::new(false),
        })
    }

    fn submit_login(page: &Rc<Self>) {
        let credentials = Credentials {
            email: page.email.get_cloned(),
            password: page.password.get_cloned(),
        };
        spawn_local(clone!(page => async move {
            if let Err(err) = page.controller.submit_login(credentials).await {
                debug!(error = %err, "Login not completed");
            }
        }));
    }

    fn submit_registration(page: &Rc<Self>) {
        let registration = Registration {
            email: page.reg_email.get_cloned(),
            password: page.reg_password.get_cloned(),
            is_teacher: page.is_teacher.get(),
        };
        spawn_local(clone!(page => async move {
            match page.controller.submit_registration(registration).await {
                Ok(()) => {
                    page.reg_password.set(String::new());
                    page.is_teacher.set_neq(false);
                }
                Err(err) => debug!(error = %err, "Registration not completed"),
            }
        }));
    }

    pub fn render(page: Rc<Self>) -> Dom {
        let labels = page.labels;
        let view = page.controller.model().view.clone();

        html!("div", {
            .class("auth-container")
            .child(html!("section", {
                .attr("id", "loginForm")
                .visible_signal(view.signal().map(FormView::shows_login))
                .child(html!("h2", { .text(labels.login_title) }))
                .child(html!("form", {
                    .class("form")
                    .event_with_options(&EventOptions::preventable(), clone!(page => move |event: events::Submit| {
                        event.prevent_default();
                        Self::submit_login(&page);
                    }))
                    .child(text_input("email", "email", labels.email, &page.email))
                    .child(text_input("password", "password", labels.password, &page.password))
                    .child(Self::submit_button(&page, labels.login_button))
                }))
                .child(switch_link("registerLink", labels.to_register, clone!(page => move || {
                    page.controller.show_register();
                })))
            }))
            .child(html!("section", {
                .attr("id", "registerForm")
                .visible_signal(view.signal().map(FormView::shows_register))
                .child(html!("h2", { .text(labels.register_title) }))
                .child(html!("form", {
                    .class("form")
                    .event_with_options(&EventOptions::preventable(), clone!(page => move |event: events::Submit| {
                        event.prevent_default();
                        Self::submit_registration(&page);
                    }))
                    .child(text_input("regEmail", "email", labels.email, &page.reg_email))
                    .child(text_input("regPassword", "password", labels.password, &page.reg_password))
                    .child(html!("label", {
                        .child(html!("input" => HtmlInputElement, {
                            .attr("id", "isTeacher")
                            .attr("type", "checkbox")
                            .prop_signal("checked", page.is_teacher.signal())
                            .with_node!(element => {
                                .event(clone!(page => move |_: events::Change| {
                                    page.is_teacher.set_neq(element.checked());
                                }))
                            })
                        }))
                        .text(labels.is_teacher)
                    }))
                    .child(Self::submit_button(&page, labels.register_button))
                }))
                .child(switch_link("loginLink", labels.to_login, clone!(page => move || {
                    page.controller.show_login();
                })))
            }))
        })
    }

    /// Submits the enclosing form, so Enter in a field works too.
    fn submit_button(page: &Rc<Self>, text: &'static str) -> Dom {
        html!("button", {
            .attr("type", "submit")
            .attr_signal("disabled", page.controller.model().busy.signal().map(|busy| {
                if busy { Some("") } else { None }
            }))
            .text(text)
        })
    }
}

fn text_input(id: &'static str, kind: &'static str, placeholder: &'static str, value: &Mutable<String>) -> Dom {
    html!("input" => HtmlInputElement, {
        .attr("id", id)
        .attr("type", kind)
        .attr("placeholder", placeholder)
        .attr("required", "")
        .prop_signal("value", value.signal_cloned())
        .with_node!(element => {
            .event(clone!(value => move |_: events::Input| {
                value.set_neq(element.value());
            }))
        })
    })
}

fn switch_link<F>(id: &'static str, text: &'static str, on_click: F) -> Dom
where
    F: Fn() + 'static,
{
    html!("a", {
        .attr("id", id)
        .attr("href", "#")
        .text(text)
        .event_with_options(&EventOptions::preventable(), move |event: events::Click| {
            event.prevent_default();
            on_click();
        })
    })
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use edu_portal_client::{ClientConfig, PortalClient, RetryConfig};
    use edu_portal_controllers::test_support::RecordingShell;
    use edu_portal_controllers::{MemoryTokenStore, Session};
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_forms_submit_on_enter() {
        let config = ClientConfig::builder()
            .base_url("http://127.0.0.1:9")
            .retry(RetryConfig::disabled())
            .build();
        let controller = AuthController::new(
            PortalClient::new(config).unwrap(),
            Session::new(MemoryTokenStore::new()),
            Rc::new(RecordingShell::default()),
        );
        let page = AuthPage::new(controller, Locale::En);
        dominator::append_dom(&dominator::body(), AuthPage::render(page));

        let document = gloo_utils::document();
        for section in ["#loginForm", "#registerForm"] {
            let button = document
                .query_selector(&format!("{section} form button[type=submit]"))
                .unwrap();
            assert!(button.is_some(), "{section} has no submit button inside a form");
        }
    }
}
