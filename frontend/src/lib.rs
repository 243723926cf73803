//! AmmoWatch web frontend
//!
//! Context-driven layout on top of the `ammowatch` client core:
//! - `web::route`: path <-> view mapping
//! - `web::router`: history-API router service
//! - `auth`: app context and the per-page auth gate
//! - `components`: pages

mod auth;
pub mod logging;
mod components {
    mod common;
    pub mod admin_manage;
    pub mod alert_form;
    pub mod dashboard;
    pub mod home;
    pub mod login;
    pub mod reports;
    pub mod signup;
    pub mod user_landing;

    pub use common::{Banner, IdentityBadge, Spinner};
}

use crate::auth::AppContext;
use crate::components::admin_manage::AdminManagePage;
use crate::components::alert_form::AlertFormPage;
use crate::components::dashboard::DashboardPage;
use crate::components::home::HomePage;
use crate::components::login::LoginPage;
use crate::components::reports::ReportsPage;
use crate::components::signup::SignupPage;
use crate::components::user_landing::UserLandingPage;

use ammowatch_shared::View;
use leptos::prelude::*;

// Thin wrappers over browser APIs (fetch, storage, timers, history, dialogs,
// geolocation) so the rest of the crate never touches web_sys directly.
pub(crate) mod web {
    pub mod dialog;
    pub mod geo;
    mod http;
    pub mod route;
    pub mod router;
    mod storage;
    mod timer;

    pub use http::FetchClient;
    pub use storage::BrowserStorage;
    pub use timer::BrowserTimer;
}

use web::route::AppRoute;
use web::router::{Link, Router, RouterOutlet};

fn route_matcher(route: AppRoute) -> AnyView {
    let Some(view) = route.view() else {
        return view! {
            <div class="flex items-center justify-center min-h-screen bg-base-200">
                <div class="text-center">
                    <h1 class="text-6xl font-bold text-error">"404"</h1>
                    <p class="text-xl mt-4">"Page not found"</p>
                    <Link to=View::Home class="btn btn-primary mt-6">"Back to home"</Link>
                </div>
            </div>
        }
        .into_any();
    };

    match view {
        View::Home => view! { <HomePage /> }.into_any(),
        View::Login => view! { <LoginPage /> }.into_any(),
        View::Signup => view! { <SignupPage /> }.into_any(),
        View::Dashboard => view! { <DashboardPage /> }.into_any(),
        View::AlertForm => view! { <AlertFormPage /> }.into_any(),
        View::Reports => view! { <ReportsPage /> }.into_any(),
        View::AdminManage => view! { <AdminManagePage /> }.into_any(),
        View::UserLanding => view! { <UserLandingPage /> }.into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    let app = AppContext::load();
    tracing::info!(api = %app.config.api_base, "ammowatch frontend starting");
    provide_context(app);

    view! {
        <Router>
            <RouterOutlet matcher=route_matcher />
        </Router>
    }
}
