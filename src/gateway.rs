use ammowatch_shared::{Identity, View, can_access};
use tracing::{debug, info, warn};

use crate::api::AmmoniaApi;
use crate::error::ClientError;
use crate::session::SessionStore;
use crate::transport::HttpClient;

/// Outcome of gating a view mount.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Admission {
    /// The view may fetch and render for this (freshly verified) identity.
    Granted(Identity),
    Redirect(View),
}

/// Runs the per-mount access procedure for protected views.
pub struct AuthGateway<'a, C, S> {
    api: &'a AmmoniaApi<C, S>,
}

impl<'a, C: HttpClient, S: SessionStore> AuthGateway<'a, C, S> {
    pub fn new(api: &'a AmmoniaApi<C, S>) -> Self {
        Self { api }
    }

    /// Steps run strictly in order; the first failing one decides:
    /// local token, remote verification, identity refresh, role check.
    pub async fn admit(&self, view: View) -> Admission {
        let session = self.api.session();

        if session.token().is_none() {
            debug!(?view, "no token, redirecting to login");
            return Admission::Redirect(View::Login);
        }

        let identity = match self.api.verify().await {
            Ok(identity) => identity,
            Err(e) => {
                // An unreachable server counts as a rejected token: keeping
                // the session would bounce login straight back here.
                match &e {
                    ClientError::Transport(_) => warn!(error = %e, "token verification unreachable"),
                    _ => info!(error = %e, "token verification failed"),
                }
                session.clear();
                return Admission::Redirect(View::Login);
            }
        };

        session.set_identity(&identity);

        if !can_access(view, identity.role) {
            let target = view.denied_redirect(identity.role);
            debug!(?view, role = %identity.role, ?target, "role not allowed");
            return Admission::Redirect(target);
        }

        Admission::Granted(identity)
    }
}

#[cfg(test)]
mod tests;
