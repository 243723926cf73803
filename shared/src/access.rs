//! View catalogue and the role capability table.
//!
//! Authorization is decided here and nowhere else: pages ask
//! [`can_access`] instead of comparing role strings.

use crate::Role;

/// Every screen of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    Home,
    Login,
    Signup,
    Dashboard,
    AlertForm,
    Reports,
    AdminManage,
    UserLanding,
}

impl View {
    /// Whether the view sits behind the auth gateway.
    pub fn requires_auth(&self) -> bool {
        !matches!(self, View::Home | View::Login | View::Signup)
    }

    /// Roles allowed on the view. An empty slice means any authenticated role.
    pub fn allowed_roles(&self) -> &'static [Role] {
        match self {
            View::Reports => &[Role::Admin, Role::Worker],
            View::AdminManage => &[Role::Admin],
            View::UserLanding => &[Role::User],
            View::Home
            | View::Login
            | View::Signup
            | View::Dashboard
            | View::AlertForm => &[],
        }
    }

    /// Where a verified visitor whose role is refused on this view is sent.
    ///
    /// Plain users bounced off the reports list land on the incident form
    /// (the one staff-facing action they do have); everyone else goes to the
    /// landing view of their role.
    pub fn denied_redirect(&self, role: Role) -> View {
        match (self, role) {
            (View::Reports, Role::User) => View::AlertForm,
            _ => role.landing(),
        }
    }
}

impl Role {
    /// First view shown after login.
    pub fn landing(&self) -> View {
        match self {
            Role::Admin | Role::Worker => View::Dashboard,
            Role::User => View::UserLanding,
        }
    }
}

/// Capability check used by the auth gateway and by role-conditional UI.
pub fn can_access(view: View, role: Role) -> bool {
    let allowed = view.allowed_roles();
    allowed.is_empty() || allowed.contains(&role)
}
