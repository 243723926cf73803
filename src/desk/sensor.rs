use ammowatch_shared::stats::{RECENT_READINGS, recent};
use ammowatch_shared::{ReadingStats, SensorReading};
use tracing::debug;

use crate::api::AmmoniaApi;
use crate::error::ClientResult;
use crate::session::SessionStore;
use crate::transport::HttpClient;

/// Everything the dashboard renders from one poll.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedSnapshot {
    /// Oldest first, as delivered; feeds the trend chart.
    pub readings: Vec<SensorReading>,
    pub stats: Option<ReadingStats>,
    /// Newest first, for the table.
    pub recent: Vec<SensorReading>,
}

impl FeedSnapshot {
    pub fn from_readings(readings: Vec<SensorReading>) -> Self {
        Self {
            stats: ReadingStats::from_readings(&readings),
            recent: recent(&readings, RECENT_READINGS),
            readings,
        }
    }
}

pub struct SensorFeed<C, S> {
    api: AmmoniaApi<C, S>,
}

impl<C: HttpClient, S: SessionStore> SensorFeed<C, S> {
    pub fn new(api: AmmoniaApi<C, S>) -> Self {
        Self { api }
    }

    pub fn api(&self) -> &AmmoniaApi<C, S> {
        &self.api
    }

    pub async fn refresh(&self) -> ClientResult<FeedSnapshot> {
        let readings = self.api.list_readings().await?;
        debug!(count = readings.len(), "sensor readings fetched");
        Ok(FeedSnapshot::from_readings(readings))
    }
}
