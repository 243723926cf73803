//! History-API router.
//!
//! All access to `window.history` is kept here. The router only maps paths
//! to pages; whether a visitor may stay on a page is decided by the auth
//! gateway when that page mounts.

use ammowatch_shared::View;
use leptos::prelude::*;
use tracing::{debug, warn};
use wasm_bindgen::prelude::*;

use super::route::AppRoute;

fn location_route() -> AppRoute {
    let path = web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_default();
    AppRoute::from_path(&path)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HistoryMode {
    Push,
    /// Redirects replace the entry so that "back" skips the refused page.
    Replace,
}

fn write_history(route: AppRoute, mode: HistoryMode) {
    let Some(history) = web_sys::window().and_then(|w| w.history().ok()) else {
        return;
    };
    let url = Some(route.to_path());
    let written = match mode {
        HistoryMode::Push => history.push_state_with_url(&JsValue::NULL, "", url),
        HistoryMode::Replace => history.replace_state_with_url(&JsValue::NULL, "", url),
    };
    if written.is_err() {
        warn!(%route, ?mode, "history update failed");
    }
}

#[derive(Clone, Copy)]
pub struct RouterService {
    current_route: ReadSignal<AppRoute>,
    set_route: WriteSignal<AppRoute>,
}

impl RouterService {
    fn new() -> Self {
        let (current_route, set_route) = signal(location_route());
        Self {
            current_route,
            set_route,
        }
    }

    pub fn current_route(&self) -> ReadSignal<AppRoute> {
        self.current_route
    }

    fn go(&self, view: View, mode: HistoryMode) {
        let route = AppRoute::from(view);
        debug!(%route, ?mode, "route change");
        write_history(route, mode);
        self.set_route.set(route);
    }

    /// User navigation: adds a history entry.
    pub fn navigate(&self, view: View) {
        self.go(view, HistoryMode::Push);
    }

    /// Gateway redirect: replaces the current history entry.
    pub fn redirect(&self, view: View) {
        self.go(view, HistoryMode::Replace);
    }

    /// Back/forward buttons only move the route signal.
    fn follow_browser_history(&self) {
        let set_route = self.set_route;
        // Kept for the lifetime of the page.
        let _listener = window_event_listener(leptos::ev::popstate, move |_| {
            set_route.set(location_route());
        });
    }
}

fn provide_router() -> RouterService {
    let router = RouterService::new();
    router.follow_browser_history();
    provide_context(router);
    router
}

/// # Panics
/// Outside a `<Router>`.
pub fn use_router() -> RouterService {
    use_context::<RouterService>()
        .expect("RouterService not found in context. Ensure Router is provided.")
}

// ============================================================================
// Components
// ============================================================================

#[component]
pub fn Router(children: Children) -> impl IntoView {
    provide_router();
    children()
}

/// Renders the page of the current route.
#[component]
pub fn RouterOutlet(matcher: fn(AppRoute) -> AnyView) -> impl IntoView {
    let router = use_router();
    move || matcher(router.current_route().get())
}

/// In-app link that goes through the router instead of reloading.
#[component]
pub fn Link(to: View, #[prop(optional, into)] class: String, children: Children) -> impl IntoView {
    let router = use_router();
    let href = AppRoute::from(to).to_path();
    let on_click = move |ev: web_sys::MouseEvent| {
        ev.prevent_default();
        router.navigate(to);
    };

    view! {
        <a href=href class=class on:click=on_click>
            {children()}
        </a>
    }
}
