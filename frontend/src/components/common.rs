use ammowatch_shared::Identity;
use leptos::prelude::*;

/// Avatar initial plus name and email of the signed-in user.
#[component]
pub fn IdentityBadge(identity: ReadSignal<Option<Identity>>) -> impl IntoView {
    move || {
        identity.get().map(|user| {
            view! {
                <div class="hidden md:flex items-center gap-3 px-3">
                    <div class="avatar placeholder">
                        <div class="bg-primary text-primary-content rounded-full w-10">
                            <span>{user.initial()}</span>
                        </div>
                    </div>
                    <div class="text-sm">
                        <p class="font-medium">{user.name.clone()}</p>
                        <p class="text-xs opacity-70">{user.email.clone()}</p>
                    </div>
                </div>
            }
        })
    }
}

/// Inline error or success banner; renders nothing while the message is `None`.
#[component]
pub fn Banner(
    message: ReadSignal<Option<String>>,
    #[prop(optional)] success: bool,
) -> impl IntoView {
    let class = if success {
        "alert alert-success text-sm py-2"
    } else {
        "alert alert-error text-sm py-2"
    };
    move || {
        message.get().map(|text| {
            view! {
                <div role="alert" class=class>
                    <span>{text}</span>
                </div>
            }
        })
    }
}

#[component]
pub fn Spinner(#[prop(optional, into)] label: String) -> impl IntoView {
    view! {
        <div class="flex flex-col items-center justify-center py-16 gap-3">
            <span class="loading loading-spinner loading-lg text-primary"></span>
            <p class="text-base-content/70">{label}</p>
        </div>
    }
}
