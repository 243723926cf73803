//! App-wide context and the per-page auth gate.
//!
//! Nothing auth-related lives in signals: the session is read from storage
//! on every use, so pages always see what the last login/verify wrote.

use ammowatch::config::VAR_API_URL;
use ammowatch::{
    Admission, AmmoniaApi, AuthGateway, ClientConfig, KeyValueStore, PersistentSessionStore,
    ReportDesk, SensorFeed, SessionStore, StaffDesk, ViewScope,
};
use ammowatch_shared::{Identity, Session, View};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::web::router::{RouterService, use_router};
use crate::web::{BrowserStorage, FetchClient};

/// localStorage key that overrides the build-time API base URL.
const STORAGE_API_URL_KEY: &str = "ammowatch_api_url";

pub type BrowserSession = PersistentSessionStore<BrowserStorage>;
pub type BrowserApi = AmmoniaApi<FetchClient, BrowserSession>;

/// Settings baked in at build time (`AMMOWATCH_*` variables).
fn build_var(name: &str) -> Option<String> {
    let value = match name {
        "AMMOWATCH_API_URL" => option_env!("AMMOWATCH_API_URL"),
        "AMMOWATCH_POLL_SECS" => option_env!("AMMOWATCH_POLL_SECS"),
        "AMMOWATCH_ACTIVITY_LOG_LIMIT" => option_env!("AMMOWATCH_ACTIVITY_LOG_LIMIT"),
        _ => None,
    };
    value.map(str::to_string)
}

#[derive(Clone)]
pub struct AppContext {
    pub config: ClientConfig,
}

impl AppContext {
    pub fn load() -> Self {
        let mut config = ClientConfig::from_source(&build_var);
        if let Some(url) = BrowserStorage.get(STORAGE_API_URL_KEY) {
            tracing::info!(var = VAR_API_URL, %url, "api base overridden from storage");
            config = config.with_api_base(&url);
        }
        Self { config }
    }

    pub fn api(&self) -> BrowserApi {
        AmmoniaApi::new(
            FetchClient,
            PersistentSessionStore::new(BrowserStorage, &self.config),
            &self.config,
        )
    }

    pub fn session(&self) -> Option<Session> {
        PersistentSessionStore::new(BrowserStorage, &self.config).get()
    }

    pub fn sensor_feed(&self) -> SensorFeed<FetchClient, BrowserSession> {
        SensorFeed::new(self.api())
    }

    pub fn report_desk(&self) -> ReportDesk<FetchClient, BrowserSession> {
        ReportDesk::new(self.api())
    }

    pub fn staff_desk(&self) -> StaffDesk<FetchClient, BrowserSession> {
        StaffDesk::new(self.api(), self.config.activity_log_limit)
    }
}

/// # Panics
/// Outside `<App>`.
pub fn use_app() -> AppContext {
    use_context::<AppContext>().expect("AppContext should be provided")
}

/// Identity of a page that passed the gate.
#[derive(Clone, Copy)]
pub struct Gate {
    pub identity: ReadSignal<Option<Identity>>,
}

impl Gate {
    pub fn granted(&self) -> bool {
        self.identity.with(Option::is_some)
    }
}

/// Runs the auth gateway for `view` on mount.
///
/// On admission the identity signal is filled and `on_granted` runs once;
/// otherwise the router redirects. Nothing is applied after the page
/// unmounts.
pub fn use_gate<F>(view: View, on_granted: F) -> Gate
where
    F: FnOnce(Identity) + 'static,
{
    let app = use_app();
    let router = use_router();
    let (identity, set_identity) = signal(None::<Identity>);
    let scope = ViewScope::new();

    let teardown = scope.clone();
    on_cleanup(move || teardown.unmount());

    spawn_local(async move {
        let api = app.api();
        let admission = AuthGateway::new(&api).admit(view).await;
        let Some(admission) = scope.keep(admission) else {
            return;
        };
        match admission {
            Admission::Granted(user) => {
                set_identity.set(Some(user.clone()));
                on_granted(user);
            }
            Admission::Redirect(target) => router.redirect(target),
        }
    });

    Gate { identity }
}

/// Where a visitor holding a stored session goes instead of login/signup.
fn stored_session_target(session: Option<&Session>) -> Option<View> {
    session.map(|_| View::Dashboard)
}

/// Sends a visitor that still holds a token from login/signup to the
/// dashboard, where the token is verified. Runs as an effect so the route
/// only changes once the page has mounted.
pub fn redirect_if_logged_in(app: &AppContext, router: RouterService) {
    let app = app.clone();
    Effect::new(move |_| {
        if let Some(target) = stored_session_target(app.session().as_ref()) {
            router.redirect(target);
        }
    });
}

/// Best-effort server logout, then back to the login page.
pub fn logout(app: AppContext, router: RouterService) {
    spawn_local(async move {
        app.api().logout().await;
        router.navigate(View::Login);
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use ammowatch_shared::Role;

    #[test]
    fn test_stored_session_target() {
        assert_eq!(stored_session_target(None), None);

        let session = Session::new(
            "tok",
            Identity {
                name: "Asha".into(),
                email: "asha@example.com".into(),
                role: Role::User,
            },
        );
        assert_eq!(stored_session_target(Some(&session)), Some(View::Dashboard));
    }
}
