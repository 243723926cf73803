use ammowatch_shared::View;
use leptos::prelude::*;

use crate::auth::{logout, use_app, use_gate};
use crate::components::{IdentityBadge, Spinner};
use crate::web::router::{Link, use_router};

#[component]
pub fn UserLandingPage() -> impl IntoView {
    let app = use_app();
    let router = use_router();
    let gate = use_gate(View::UserLanding, |_| {});

    let first_name = move || {
        gate.identity.with(|i| {
            i.as_ref()
                .and_then(|i| i.name.split_whitespace().next().map(str::to_string))
                .unwrap_or_default()
        })
    };

    view! {
        <Show when=move || gate.granted() fallback=|| view! { <Spinner label="Verifying access..." /> }>
            <div class="min-h-screen bg-base-200 p-4 md:p-8">
                <div class="max-w-3xl mx-auto space-y-8">
                    <div class="navbar bg-base-100 rounded-box shadow-xl">
                        <div class="flex-1">
                            <span class="text-xl font-bold px-2">"AmmoWatch"</span>
                        </div>
                        <div class="flex-none gap-2">
                            <IdentityBadge identity=gate.identity />
                            <button class="btn btn-outline btn-error" on:click={
                                let app = app.clone();
                                move |_| logout(app.clone(), router)
                            }>
                                "Logout"
                            </button>
                        </div>
                    </div>

                    <div class="card bg-base-100 shadow-xl">
                        <div class="card-body items-center text-center">
                            <h1 class="text-3xl font-bold">{move || format!("Welcome, {}!", first_name())}</h1>
                            <p class="text-base-content/70">
                                "Noticed a strong ammonia smell or a leak? Tell us where it is and our team will follow up."
                            </p>
                            <div class="card-actions mt-4 gap-4">
                                <Link to=View::AlertForm class="btn btn-primary">"Report an incident"</Link>
                                <Link to=View::Dashboard class="btn btn-outline">"View live readings"</Link>
                            </div>
                        </div>
                    </div>
                </div>
            </div>
        </Show>
    }
}
