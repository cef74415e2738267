use dioxus::core::spawn_forever;
use dioxus::prelude::*;

use crate::actions::ActionError;
use crate::icons::{FaCircleCheck, FaCircleExclamation};
use crate::platform::sleep_ms;
use crate::Icon;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub message: String,
}

/// Handle for raising transient notices. Copy it freely into handlers.
#[derive(Clone, Copy, PartialEq)]
pub struct Toasts {
    list: Signal<Vec<Toast>>,
    next_id: Signal<u64>,
    duration_ms: u32,
}

impl Toasts {
    pub fn success(&self, message: impl Into<String>) {
        self.push(ToastKind::Success, message.into());
    }

    pub fn error(&self, message: impl Into<String>) {
        self.push(ToastKind::Error, message.into());
    }

    /// Surface a failed handler, unless its notice was already raised.
    pub fn failure(&self, error: &ActionError, fallback: &str) {
        if let Some(message) = error.notice(fallback) {
            self.error(message);
        }
    }

    fn push(&self, kind: ToastKind, message: String) {
        let mut list = self.list;
        let mut next_id = self.next_id;
        let id = next_id();
        next_id.set(id + 1);
        match kind {
            ToastKind::Success => tracing::info!("{message}"),
            ToastKind::Error => tracing::warn!("{message}"),
        }
        list.write().push(Toast { id, kind, message });

        let duration_ms = self.duration_ms;
        spawn_forever(async move {
            sleep_ms(duration_ms).await;
            list.write().retain(|t| t.id != id);
        });
    }
}

pub fn use_toasts() -> Toasts {
    use_context::<Toasts>()
}

/// Provides [`Toasts`] to its children and renders the stack of live notices.
#[component]
pub fn ToastProvider(#[props(default = 3000)] duration_ms: u32, children: Element) -> Element {
    let list = use_signal(Vec::<Toast>::new);
    let next_id = use_signal(|| 0u64);
    use_context_provider(|| Toasts {
        list,
        next_id,
        duration_ms,
    });

    rsx! {
        {children}
        div {
            class: "toast-stack",
            for toast in list() {
                div {
                    key: "{toast.id}",
                    class: match toast.kind {
                        ToastKind::Success => "toast toast-success",
                        ToastKind::Error => "toast toast-error",
                    },
                    match toast.kind {
                        ToastKind::Success => rsx! { Icon { width: 16, height: 16, icon: FaCircleCheck } },
                        ToastKind::Error => rsx! { Icon { width: 16, height: 16, icon: FaCircleExclamation } },
                    }
                    span { "{toast.message}" }
                }
            }
        }
    }
}
