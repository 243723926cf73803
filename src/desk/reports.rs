use std::cell::{Cell, RefCell};

use ammowatch_shared::protocol::ListReportsRequest;
use ammowatch_shared::reports::sort_newest_first;
use ammowatch_shared::{Report, ReportFilters, ReportScope};
use tracing::{debug, warn};

use crate::api::AmmoniaApi;
use crate::error::{ClientError, ClientResult};
use crate::session::SessionStore;
use crate::transport::HttpClient;

/// Which mutation to run against a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportAction {
    Delete,
    Deactivate,
}

/// Reports page fetcher: current scope + filters, and the two mutations.
///
/// Every method that changes the query issues exactly one list fetch.
pub struct ReportDesk<C, S> {
    api: AmmoniaApi<C, S>,
    query: RefCell<ListReportsRequest>,
    generation: Cell<u64>,
}

impl<C: HttpClient, S: SessionStore> ReportDesk<C, S> {
    pub fn new(api: AmmoniaApi<C, S>) -> Self {
        Self {
            api,
            query: RefCell::new(ListReportsRequest::default()),
            generation: Cell::new(0),
        }
    }

    pub fn api(&self) -> &AmmoniaApi<C, S> {
        &self.api
    }

    pub fn query(&self) -> ListReportsRequest {
        self.query.borrow().clone()
    }

    pub fn scope(&self) -> ReportScope {
        self.query.borrow().scope
    }

    /// Fetches the list for the current query, newest first.
    ///
    /// Only the latest fetch counts: one that was overtaken by a newer call
    /// while in flight returns [`ClientError::Superseded`], whatever the
    /// server answered.
    pub async fn refresh(&self) -> ClientResult<Vec<Report>> {
        let generation = self.generation.get() + 1;
        self.generation.set(generation);
        let query = self.query();

        let fetched = self.api.list_reports(&query).await;
        if self.generation.get() != generation {
            debug!(scope = ?query.scope, "dropping superseded report fetch");
            return Err(ClientError::Superseded);
        }
        let mut reports = fetched?;
        if let Err(e) = sort_newest_first(&mut reports) {
            warn!(error = %e, "keeping reports in fetch order");
        }
        debug!(scope = ?query.scope, count = reports.len(), "reports fetched");
        Ok(reports)
    }

    /// Switches collection, keeping the filters.
    pub async fn set_scope(&self, scope: ReportScope) -> ClientResult<Vec<Report>> {
        self.query.borrow_mut().scope = scope;
        self.refresh().await
    }

    pub async fn toggle_scope(&self) -> ClientResult<Vec<Report>> {
        let next = match self.scope() {
            ReportScope::Active => ReportScope::Deactivated,
            ReportScope::Deactivated => ReportScope::Active,
        };
        self.set_scope(next).await
    }

    pub async fn apply_filters(&self, filters: ReportFilters) -> ClientResult<Vec<Report>> {
        self.query.borrow_mut().filters = filters;
        self.refresh().await
    }

    pub async fn clear_filters(&self) -> ClientResult<Vec<Report>> {
        self.apply_filters(ReportFilters::default()).await
    }

    /// Runs the mutation, then re-reads the list once. On failure nothing is
    /// refetched and the caller keeps its current list. A failed re-read
    /// after a successful mutation comes back as
    /// [`ClientError::ReloadFailed`].
    pub async fn mutate(&self, report: &Report, action: ReportAction) -> ClientResult<Vec<Report>> {
        let key = report.mutation_key().ok_or(ClientError::MissingReportKey)?;
        if report.uses_fallback_key() {
            warn!(key, "report has no id, addressing it by timestamp");
        }

        match action {
            ReportAction::Delete => self.api.delete_report(key).await?,
            ReportAction::Deactivate => self.api.deactivate_report(key).await?,
        };
        self.refresh().await.map_err(ClientError::after_mutation)
    }

    pub async fn delete(&self, report: &Report) -> ClientResult<Vec<Report>> {
        self.mutate(report, ReportAction::Delete).await
    }

    pub async fn deactivate(&self, report: &Report) -> ClientResult<Vec<Report>> {
        self.mutate(report, ReportAction::Deactivate).await
    }
}
