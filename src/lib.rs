//! Client core of AmmoWatch.
//!
//! Target independent: the browser supplies an [`transport::HttpClient`],
//! a [`session::KeyValueStore`] and a [`poller::Timer`]; tests supply mocks.

pub mod api;
pub mod config;
pub mod desk;
pub mod error;
pub mod gateway;
pub mod poller;
pub mod scope;
pub mod session;
pub mod transport;

pub use ammowatch_shared as shared;

pub use api::AmmoniaApi;
pub use config::{ClientConfig, ConfigSource};
pub use desk::{AdminSnapshot, FeedSnapshot, ReportDesk, SensorFeed, StaffDesk};
pub use error::{ClientError, ClientResult};
pub use gateway::{Admission, AuthGateway};
pub use poller::{PollHandle, PollTask, Poller, Timer};
pub use scope::ViewScope;
pub use session::{KeyValueStore, MemorySessionStore, PersistentSessionStore, SessionStore};
pub use transport::{HttpClient, HttpRequest, HttpResponse};
