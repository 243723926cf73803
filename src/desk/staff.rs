use ammowatch_shared::{ActivityLogEntry, AppUser, Worker, WorkerForm};
use futures::future::try_join3;
use tracing::info;

use crate::api::AmmoniaApi;
use crate::error::{ClientError, ClientResult};
use crate::session::SessionStore;
use crate::transport::HttpClient;

/// The three lists of the admin console.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdminSnapshot {
    pub workers: Vec<Worker>,
    pub users: Vec<AppUser>,
    pub logs: Vec<ActivityLogEntry>,
}

pub struct StaffDesk<C, S> {
    api: AmmoniaApi<C, S>,
    log_limit: u32,
}

impl<C: HttpClient, S: SessionStore> StaffDesk<C, S> {
    pub fn new(api: AmmoniaApi<C, S>, log_limit: u32) -> Self {
        Self { api, log_limit }
    }

    pub fn api(&self) -> &AmmoniaApi<C, S> {
        &self.api
    }

    /// Loads workers, users and the activity log concurrently. The first
    /// failure wins.
    pub async fn load_all(&self) -> ClientResult<AdminSnapshot> {
        let (workers, users, logs) = try_join3(
            self.api.list_workers(),
            self.api.list_users(),
            self.api.list_activity_logs(self.log_limit),
        )
        .await?;
        Ok(AdminSnapshot {
            workers,
            users,
            logs,
        })
    }

    /// Creates or updates depending on `form.id`, then reloads. A failed
    /// reload after a successful save is [`ClientError::ReloadFailed`].
    pub async fn save_worker(&self, form: &WorkerForm) -> ClientResult<AdminSnapshot> {
        let payload = form.validate()?;
        match &form.id {
            Some(id) => {
                self.api.update_worker(id, payload).await?;
                info!(id = %id, "worker updated");
            }
            None => {
                self.api.create_worker(payload).await?;
                info!("worker created");
            }
        }
        self.load_all().await.map_err(ClientError::after_mutation)
    }

    pub async fn delete_worker(&self, id: &str) -> ClientResult<AdminSnapshot> {
        self.api.delete_worker(id).await?;
        info!(id, "worker deleted");
        self.load_all().await.map_err(ClientError::after_mutation)
    }
}
