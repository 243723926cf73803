use ammowatch::ClientError;
use ammowatch_shared::{SignupForm, View};
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::auth::{redirect_if_logged_in, use_app};
use crate::components::Banner;
use crate::web::dialog;
use crate::web::router::{Link, use_router};

/// Pause on the success message before moving to the login page.
const SUCCESS_DELAY_MS: u32 = 1_500;

#[component]
pub fn SignupPage() -> impl IntoView {
    let app = use_app();
    let router = use_router();
    redirect_if_logged_in(&app, router);

    let (name, set_name) = signal(String::new());
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (confirm, set_confirm) = signal(String::new());
    let (is_submitting, set_is_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(None::<String>);
    let (success_msg, set_success_msg) = signal(None::<String>);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let form = SignupForm {
            name: name.get(),
            email: email.get(),
            password: password.get(),
            confirm_password: confirm.get(),
        };
        set_error_msg.set(None);
        set_success_msg.set(None);

        // Rejected locally without a round trip.
        if let Err(e) = form.validate() {
            set_error_msg.set(Some(e.to_string()));
            return;
        }

        set_is_submitting.set(true);
        let app = app.clone();
        spawn_local(async move {
            match app.api().signup(&form).await {
                Ok(_) => {
                    set_success_msg.set(Some("Account created successfully! Please log in.".into()));
                    TimeoutFuture::new(SUCCESS_DELAY_MS).await;
                    router.navigate(View::Login);
                }
                Err(e) => {
                    if matches!(e, ClientError::Transport(_)) {
                        dialog::alert("Unable to reach the server. Please check your connection.");
                    }
                    set_error_msg.set(Some(e.user_message()));
                }
            }
            set_is_submitting.set(false);
        });
    };

    let field = move |id: &'static str,
                      label: &'static str,
                      kind: &'static str,
                      value: ReadSignal<String>,
                      set: WriteSignal<String>| {
        view! {
            <div class="form-control">
                <label class="label" for=id>
                    <span class="label-text">{label}</span>
                </label>
                <input
                    id=id
                    type=kind
                    on:input=move |ev| set.set(event_target_value(&ev))
                    prop:value=value
                    class="input input-bordered"
                    required
                />
            </div>
        }
    };

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <div class="text-center mb-4">
                    <h1 class="text-3xl font-bold">"Create an account"</h1>
                    <p class="text-base-content/70">"Report ammonia incidents in your area"</p>
                </div>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        <Banner message=error_msg />
                        <Banner message=success_msg success=true />

                        {field("name", "Full name", "text", name, set_name)}
                        {field("email", "Email", "email", email, set_email)}
                        {field("password", "Password", "password", password, set_password)}
                        {field("confirm", "Confirm password", "password", confirm, set_confirm)}

                        <div class="form-control mt-6">
                            <button class="btn btn-primary" disabled=move || is_submitting.get()>
                                {move || if is_submitting.get() {
                                    view! { <span class="loading loading-spinner"></span> "Creating account..." }.into_any()
                                } else {
                                    "Sign up".into_any()
                                }}
                            </button>
                        </div>
                        <p class="text-center text-sm mt-2">
                            "Already have an account? "
                            <Link to=View::Login class="link link-primary">"Log in"</Link>
                        </p>
                    </form>
                </div>
            </div>
        </div>
    }
}
