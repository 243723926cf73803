use ammowatch_shared::{ManualReportForm, View};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::auth::{use_app, use_gate};
use crate::components::{Banner, IdentityBadge, Spinner};
use crate::web::geo;
use crate::web::router::use_router;

#[component]
pub fn AlertFormPage() -> impl IntoView {
    let app = StoredValue::new(use_app());
    let router = use_router();

    let (name, set_name) = signal(String::new());
    let (email, set_email) = signal(String::new());
    let (latitude, set_latitude) = signal(String::new());
    let (longitude, set_longitude) = signal(String::new());
    let (comments, set_comments) = signal(String::new());
    let (locating, set_locating) = signal(false);
    let (is_submitting, set_is_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(None::<String>);
    let (success_msg, set_success_msg) = signal(None::<String>);

    let gate = use_gate(View::AlertForm, move |user| {
        set_name.set(user.name);
        set_email.set(user.email);
    });

    let on_locate = move |_| {
        set_locating.set(true);
        set_error_msg.set(None);
        spawn_local(async move {
            match geo::current_position().await {
                Ok((lat, lon)) => {
                    set_latitude.set(format!("{:.6}", lat));
                    set_longitude.set(format!("{:.6}", lon));
                }
                Err(reason) => {
                    tracing::warn!(%reason, "geolocation failed");
                    set_error_msg.set(Some(format!("Unable to retrieve your location: {}", reason)));
                }
            }
            set_locating.set(false);
        });
    };

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let form = ManualReportForm {
            name: name.get(),
            email: email.get(),
            latitude: latitude.get(),
            longitude: longitude.get(),
            comments: comments.get(),
        };
        set_error_msg.set(None);
        set_success_msg.set(None);
        set_is_submitting.set(true);

        let app = app.get_value();
        spawn_local(async move {
            match app.api().submit_manual_report(&form).await {
                Ok(ack) => {
                    let text = ack
                        .message
                        .unwrap_or_else(|| "Report submitted successfully".to_string());
                    set_success_msg.set(Some(text));
                    set_latitude.set(String::new());
                    set_longitude.set(String::new());
                    set_comments.set(String::new());
                }
                Err(e) if e.is_unauthenticated() => router.redirect(View::Login),
                Err(e) => set_error_msg.set(Some(e.user_message())),
            }
            set_is_submitting.set(false);
        });
    };

    let back = move |_| {
        let target = gate
            .identity
            .with(|i| i.as_ref().map(|i| i.role.landing()))
            .unwrap_or(View::Dashboard);
        router.navigate(target);
    };

    view! {
        <Show when=move || gate.granted() fallback=|| view! { <Spinner label="Verifying access..." /> }>
            <div class="min-h-screen bg-base-200 p-4 md:p-8">
                <div class="max-w-2xl mx-auto space-y-6">
                    <div class="navbar bg-base-100 rounded-box shadow-xl">
                        <div class="flex-1 flex-col items-start">
                            <h1 class="text-2xl font-bold">"Report an Ammonia Incident"</h1>
                            <p class="text-base-content/70 text-sm">"Your report is sent to the monitoring team"</p>
                        </div>
                        <div class="flex-none gap-2">
                            <IdentityBadge identity=gate.identity />
                            <button class="btn btn-ghost" on:click=back>"Back"</button>
                        </div>
                    </div>

                    <div class="card bg-base-100 shadow-xl">
                        <form class="card-body" on:submit=on_submit>
                            <Banner message=error_msg />
                            <Banner message=success_msg success=true />

                            <div class="grid grid-cols-1 md:grid-cols-2 gap-4">
                                <div class="form-control">
                                    <label class="label" for="name"><span class="label-text">"Name"</span></label>
                                    <input
                                        id="name"
                                        type="text"
                                        class="input input-bordered"
                                        on:input=move |ev| set_name.set(event_target_value(&ev))
                                        prop:value=name
                                    />
                                </div>
                                <div class="form-control">
                                    <label class="label" for="email"><span class="label-text">"Email"</span></label>
                                    <input
                                        id="email"
                                        type="email"
                                        class="input input-bordered"
                                        on:input=move |ev| set_email.set(event_target_value(&ev))
                                        prop:value=email
                                    />
                                </div>
                                <div class="form-control">
                                    <label class="label" for="latitude"><span class="label-text">"Latitude"</span></label>
                                    <input
                                        id="latitude"
                                        type="text"
                                        inputmode="decimal"
                                        class="input input-bordered"
                                        on:input=move |ev| set_latitude.set(event_target_value(&ev))
                                        prop:value=latitude
                                    />
                                </div>
                                <div class="form-control">
                                    <label class="label" for="longitude"><span class="label-text">"Longitude"</span></label>
                                    <input
                                        id="longitude"
                                        type="text"
                                        inputmode="decimal"
                                        class="input input-bordered"
                                        on:input=move |ev| set_longitude.set(event_target_value(&ev))
                                        prop:value=longitude
                                    />
                                </div>
                            </div>

                            <button
                                type="button"
                                class="btn btn-outline btn-sm mt-2 self-start"
                                disabled=move || locating.get()
                                on:click=on_locate
                            >
                                {move || if locating.get() { "Locating..." } else { "Use my current location" }}
                            </button>

                            <div class="form-control">
                                <label class="label" for="comments"><span class="label-text">"Comments"</span></label>
                                <textarea
                                    id="comments"
                                    class="textarea textarea-bordered h-28"
                                    placeholder="Describe what you noticed"
                                    on:input=move |ev| set_comments.set(event_target_value(&ev))
                                    prop:value=comments
                                ></textarea>
                            </div>

                            <div class="form-control mt-4">
                                <button class="btn btn-primary" disabled=move || is_submitting.get()>
                                    {move || if is_submitting.get() {
                                        view! { <span class="loading loading-spinner"></span> "Submitting..." }.into_any()
                                    } else {
                                        "Submit report".into_any()
                                    }}
                                </button>
                            </div>
                        </form>
                    </div>
                </div>
            </div>
        </Show>
    }
}
