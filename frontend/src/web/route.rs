//! URL paths of the application.
//!
//! Pure mapping between browser paths and [`View`]s; access rules live in
//! the shared crate and are enforced by the auth gateway on mount.

use std::fmt::Display;

use ammowatch_shared::View;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppRoute {
    #[default]
    Home,
    Page(View),
    NotFound,
}

impl AppRoute {
    /// Case-insensitive; a trailing slash is ignored.
    pub fn from_path(path: &str) -> Self {
        let path = path.trim_end_matches('/').to_ascii_lowercase();
        let view = match path.as_str() {
            "" => return Self::Home,
            "/auth/login" => View::Login,
            "/auth/signup" => View::Signup,
            "/dashboard" => View::Dashboard,
            "/alertform" => View::AlertForm,
            "/reportspage" => View::Reports,
            "/admin/manage" => View::AdminManage,
            "/user-landing" => View::UserLanding,
            _ => return Self::NotFound,
        };
        Self::Page(view)
    }

    pub fn to_path(&self) -> &'static str {
        match self {
            Self::Home | Self::Page(View::Home) => "/",
            Self::Page(View::Login) => "/auth/Login",
            Self::Page(View::Signup) => "/auth/Signup",
            Self::Page(View::Dashboard) => "/dashboard",
            Self::Page(View::AlertForm) => "/AlertForm",
            Self::Page(View::Reports) => "/ReportsPage",
            Self::Page(View::AdminManage) => "/admin/manage",
            Self::Page(View::UserLanding) => "/user-landing",
            Self::NotFound => "/404",
        }
    }

    pub fn view(&self) -> Option<View> {
        match self {
            Self::Home => Some(View::Home),
            Self::Page(view) => Some(*view),
            Self::NotFound => None,
        }
    }
}

impl From<View> for AppRoute {
    fn from(view: View) -> Self {
        match view {
            View::Home => Self::Home,
            other => Self::Page(other),
        }
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_map_back_to_views() {
        let views = [
            View::Home,
            View::Login,
            View::Signup,
            View::Dashboard,
            View::AlertForm,
            View::Reports,
            View::AdminManage,
            View::UserLanding,
        ];
        for view in views {
            let route = AppRoute::from(view);
            assert_eq!(AppRoute::from_path(route.to_path()).view(), Some(view));
        }
    }

    #[test]
    fn test_unknown_and_trailing_slash() {
        assert_eq!(AppRoute::from_path("/ReportsPage/"), AppRoute::Page(View::Reports));
        assert_eq!(AppRoute::from_path("/auth/login"), AppRoute::Page(View::Login));
        assert_eq!(AppRoute::from_path("/nope"), AppRoute::NotFound);
        assert_eq!(AppRoute::from_path("/"), AppRoute::Home);
    }
}
