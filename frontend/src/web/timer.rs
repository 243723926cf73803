//! Browser sleep for the polling controller.

use std::time::Duration;

use ammowatch::Timer;
use futures::FutureExt;
use futures::future::LocalBoxFuture;
use gloo_timers::future::TimeoutFuture;

/// `setTimeout`-based [`Timer`]. Dropping the future clears the timeout.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserTimer;

impl Timer for BrowserTimer {
    fn sleep(&self, period: Duration) -> LocalBoxFuture<'static, ()> {
        let millis = u32::try_from(period.as_millis()).unwrap_or(u32::MAX);
        TimeoutFuture::new(millis).boxed_local()
    }
}
