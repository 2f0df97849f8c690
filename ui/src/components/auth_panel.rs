use dioxus::prelude::*;
use tracing::warn;

use crate::core::session::{use_backend, use_current_user};
use crate::t;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AuthMode {
    SignIn,
    SignUp,
}

/// Session controls for the navbar: the signed-in email with a sign-out
/// button, or sign-in / sign-up buttons that open a credentials dialog.
#[component]
pub fn AuthPanel() -> Element {
    let backend = use_backend();
    let user = use_current_user();

    let mut open = use_signal(|| false);
    let mut mode = use_signal(|| AuthMode::SignIn);
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut busy = use_signal(|| false);
    let mut error = use_signal(|| Option::<String>::None);
    let mut info = use_signal(|| Option::<String>::None);

    let mut show = move |next: AuthMode| {
        mode.set(next);
        error.set(None);
        info.set(None);
        open.set(true);
    };

    let mut close = move || {
        open.set(false);
        error.set(None);
        info.set(None);
    };

    let on_submit = {
        let backend = backend.clone();
        move |evt: FormEvent| {
            evt.prevent_default();
            if busy() {
                return;
            }
            busy.set(true);
            error.set(None);
            info.set(None);

            let outcome = match mode() {
                AuthMode::SignUp => backend
                    .sign_up(&email(), &password())
                    .map(|_| Some(t!("auth-account-created"))),
                AuthMode::SignIn => backend.sign_in(&email(), &password()).map(|_| None),
            };

            match outcome {
                Ok(message) => {
                    password.set(String::new());
                    info.set(message);
                    open.set(false);
                }
                Err(err) => {
                    warn!(error = %err, "authentication failed");
                    error.set(Some(err.to_string()));
                }
            }
            busy.set(false);
        }
    };

    let on_sign_out = {
        let backend = backend.clone();
        move |_| {
            if let Err(err) = backend.sign_out() {
                warn!(error = %err, "sign-out failed");
            }
        }
    };

    let signing_up = mode() == AuthMode::SignUp;
    let title = if signing_up {
        t!("auth-create-account")
    } else {
        t!("auth-sign-in")
    };
    let submit_label = match (busy(), signing_up) {
        (true, true) => t!("auth-creating"),
        (true, false) => t!("auth-signing-in"),
        (false, true) => t!("auth-create-account"),
        (false, false) => t!("auth-sign-in"),
    };
    let toggle_label = if signing_up {
        t!("auth-have-account")
    } else {
        t!("auth-need-account")
    };
    let password_autocomplete = if signing_up {
        "new-password"
    } else {
        "current-password"
    };

    rsx! {
        div { class: "auth",
            if let Some(current) = user() {
                span { class: "auth__email", "{current.email}" }
                button {
                    r#type: "button",
                    class: "button button--ghost button--small",
                    onclick: on_sign_out,
                    {t!("auth-sign-out")}
                }
            } else {
                button {
                    r#type: "button",
                    class: "button button--primary button--small",
                    onclick: move |_| show(AuthMode::SignIn),
                    {t!("auth-sign-in")}
                }
                button {
                    r#type: "button",
                    class: "button button--small",
                    onclick: move |_| show(AuthMode::SignUp),
                    {t!("auth-sign-up")}
                }
            }
        }

        if open() {
            div { class: "modal",
                div { class: "modal__backdrop", onclick: move |_| close() }
                div {
                    class: "modal__dialog",
                    role: "dialog",
                    aria_modal: "true",
                    div { class: "modal__header",
                        h2 { "{title}" }
                        button {
                            r#type: "button",
                            class: "modal__close",
                            aria_label: t!("auth-close"),
                            onclick: move |_| close(),
                            "✕"
                        }
                    }
                    form { class: "modal__form", onsubmit: on_submit,
                        label { class: "field",
                            span { class: "field__label", {t!("auth-email")} }
                            input {
                                class: "field__input",
                                r#type: "email",
                                required: true,
                                autocomplete: "email",
                                value: "{email}",
                                oninput: move |evt: FormEvent| email.set(evt.value()),
                            }
                        }
                        label { class: "field",
                            span { class: "field__label", {t!("auth-password")} }
                            input {
                                class: "field__input",
                                r#type: "password",
                                required: true,
                                autocomplete: password_autocomplete,
                                value: "{password}",
                                oninput: move |evt: FormEvent| password.set(evt.value()),
                            }
                        }
                        if let Some(message) = error() {
                            p { class: "status status--error", "{message}" }
                        }
                        div { class: "modal__actions",
                            button {
                                r#type: "submit",
                                class: "button button--primary",
                                disabled: busy(),
                                "{submit_label}"
                            }
                            button {
                                r#type: "button",
                                class: "link-button",
                                onclick: move |_| {
                                    let next = if signing_up { AuthMode::SignIn } else { AuthMode::SignUp };
                                    mode.set(next);
                                    error.set(None);
                                },
                                "{toggle_label}"
                            }
                        }
                    }
                }
            }
        }

        if let Some(message) = info() {
            if !open() {
                span { class: "auth__info", "{message}" }
            }
        }
    }
}
