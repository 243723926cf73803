use std::rc::Rc;

use ammowatch::{FeedSnapshot, Poller};
use ammowatch_shared::date::{format_clock, format_display};
use ammowatch_shared::stats::AMMONIA_THRESHOLD_PPM;
use ammowatch_shared::{AlertLevel, SensorReading, View, can_access};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::auth::{logout, use_app, use_gate};
use crate::components::IdentityBadge;
use crate::web::BrowserTimer;
use crate::web::router::use_router;

const CHART_WIDTH: f64 = 600.0;
const CHART_HEIGHT: f64 = 200.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Connection {
    Connecting,
    Connected,
    Disconnected,
}

impl Connection {
    fn label(&self) -> &'static str {
        match self {
            Connection::Connecting => "connecting",
            Connection::Connected => "connected",
            Connection::Disconnected => "disconnected",
        }
    }

    fn dot_class(&self) -> &'static str {
        match self {
            Connection::Connecting => "badge badge-warning badge-xs",
            Connection::Connected => "badge badge-success badge-xs animate-pulse",
            Connection::Disconnected => "badge badge-error badge-xs",
        }
    }
}

fn level_class(level: AlertLevel) -> &'static str {
    match level {
        AlertLevel::High => "badge badge-error",
        AlertLevel::Medium => "badge badge-warning",
        AlertLevel::Low => "badge badge-success",
    }
}

/// SVG polyline points for the ppm trend, oldest reading on the left.
/// The y axis tops out at the alert threshold or the series max, whichever
/// is higher.
fn trend_points(readings: &[SensorReading], width: f64, height: f64) -> String {
    if readings.is_empty() {
        return String::new();
    }
    let top = readings
        .iter()
        .map(|r| r.ammonia_ppm)
        .fold(AMMONIA_THRESHOLD_PPM, f64::max);
    let step = if readings.len() > 1 {
        width / (readings.len() - 1) as f64
    } else {
        0.0
    };

    readings
        .iter()
        .enumerate()
        .map(|(i, r)| {
            let x = i as f64 * step;
            let y = height - (r.ammonia_ppm.max(0.0) / top) * height;
            format!("{:.1},{:.1}", x, y)
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let app = use_app();
    let router = use_router();

    let (snapshot, set_snapshot) = signal(None::<FeedSnapshot>);
    let (connection, set_connection) = signal(Connection::Connecting);
    let (error, set_error) = signal(None::<String>);

    let poller = Poller::new(BrowserTimer);
    on_cleanup(poller.canceller());

    let period = app.config.poll_interval;
    let feed_app = app.clone();
    let gate = use_gate(View::Dashboard, move |_| {
        let feed = Rc::new(feed_app.sensor_feed());
        let (_handle, task) = poller.start(period, move || {
            let feed = Rc::clone(&feed);
            async move {
                match feed.refresh().await {
                    Ok(snap) => {
                        set_snapshot.set(Some(snap));
                        set_connection.set(Connection::Connected);
                        set_error.set(None);
                    }
                    Err(e) if e.is_unauthenticated() => router.redirect(View::Login),
                    Err(e) => {
                        set_connection.set(Connection::Disconnected);
                        set_error.set(Some(e.user_message()));
                    }
                }
            }
        });
        spawn_local(task);
    });

    let role = move || gate.identity.with(|i| i.as_ref().map(|i| i.role));
    let stats = move || snapshot.with(|s| s.as_ref().and_then(|s| s.stats.clone()));

    view! {
        <Show
            when=move || gate.granted()
            fallback=|| view! {
                <div class="flex flex-col items-center justify-center min-h-screen gap-4">
                    <span class="loading loading-spinner loading-lg text-primary"></span>
                    <h2 class="text-2xl font-bold">"Verifying Access"</h2>
                </div>
            }
        >
            <div class="min-h-screen bg-base-200 p-4 md:p-8">
                <div class="max-w-7xl mx-auto space-y-8">
                    <div class="navbar bg-base-100 rounded-box shadow-xl">
                        <div class="flex-1 flex-col items-start">
                            <h1 class="text-3xl font-bold">"IoT Dashboard"</h1>
                            <p class="text-base-content/70">"Real-Time Environmental Monitoring"</p>
                            <div class="flex items-center gap-2 mt-1">
                                <span class=move || connection.get().dot_class()></span>
                                <span class="text-sm capitalize">{move || connection.get().label()}</span>
                            </div>
                        </div>
                        <div class="flex-none gap-2">
                            <IdentityBadge identity=gate.identity />
                            <Show when=move || role().is_some_and(|r| can_access(View::Reports, r))>
                                <button class="btn btn-secondary" on:click=move |_| router.navigate(View::Reports)>
                                    "Reports"
                                </button>
                            </Show>
                            <Show when=move || role().is_some_and(|r| can_access(View::AdminManage, r))>
                                <button class="btn btn-accent" on:click=move |_| router.navigate(View::AdminManage)>
                                    "Manage"
                                </button>
                            </Show>
                            <button class="btn btn-outline btn-error" on:click={
                                let app = app.clone();
                                move |_| logout(app.clone(), router)
                            }>
                                "Logout"
                            </button>
                        </div>
                    </div>

                    <Show when=move || error.get().is_some()>
                        <div role="alert" class="alert alert-error">
                            <span>{move || error.get().unwrap_or_default()}</span>
                        </div>
                    </Show>

                    <Show
                        when=move || snapshot.with(Option::is_some)
                        fallback=|| view! {
                            <div class="flex flex-col items-center py-20">
                                <span class="loading loading-spinner loading-lg"></span>
                                <p class="text-xl mt-4">"Loading sensor data..."</p>
                            </div>
                        }
                    >
                        {move || stats().map(|s| view! {
                            <div class="stats stats-vertical md:stats-horizontal shadow w-full bg-base-100">
                                <div class="stat">
                                    <div class="stat-title">"Ammonia Level"</div>
                                    <div class="stat-value">{format!("{:.2}", s.latest.ammonia_ppm)}</div>
                                    <div class="stat-desc">
                                        {format!("ppm • Threshold: {} ppm", AMMONIA_THRESHOLD_PPM)}
                                    </div>
                                    <div class=level_class(s.alert_level)>{s.alert_level.label()}</div>
                                    <progress class="progress w-full" value=s.gauge_percent.to_string() max="100"></progress>
                                </div>
                                <div class="stat">
                                    <div class="stat-title">"Temperature"</div>
                                    <div class="stat-value">{format!("{:.1}°C", s.latest.temperature)}</div>
                                </div>
                                <div class="stat">
                                    <div class="stat-title">"Humidity"</div>
                                    <div class="stat-value">{format!("{:.1}%", s.latest.humidity)}</div>
                                </div>
                                <div class="stat">
                                    <div class="stat-title">"Session Average"</div>
                                    <div class="stat-value">{format!("{:.2}", s.average_ppm)}</div>
                                    <div class="stat-desc">{format!("max {:.2} ppm over {} readings", s.max_ppm, s.count)}</div>
                                </div>
                            </div>

                            <div class="grid grid-cols-1 lg:grid-cols-3 gap-6">
                                <div class="card bg-base-100 shadow-xl lg:col-span-2">
                                    <div class="card-body">
                                        <h2 class="card-title">"Ammonia Trend Analysis"</h2>
                                        <svg
                                            viewBox=format!("0 0 {} {}", CHART_WIDTH, CHART_HEIGHT)
                                            class="w-full h-64"
                                            preserveAspectRatio="none"
                                        >
                                            <polyline
                                                fill="none"
                                                stroke="currentColor"
                                                stroke-width="2"
                                                points=move || snapshot.with(|s| {
                                                    s.as_ref()
                                                        .map(|s| trend_points(&s.readings, CHART_WIDTH, CHART_HEIGHT))
                                                        .unwrap_or_default()
                                                })
                                            />
                                        </svg>
                                    </div>
                                </div>
                                <div class="card bg-base-100 shadow-xl">
                                    <div class="card-body">
                                        <h2 class="card-title">"Alert Distribution"</h2>
                                        <p class="text-sm text-base-content/70">"Safety level analysis"</p>
                                        {[AlertLevel::Low, AlertLevel::Medium, AlertLevel::High]
                                            .into_iter()
                                            .zip(s.distribution)
                                            .map(|(level, n)| {
                                                let pct = if s.count == 0 { 0.0 } else { n as f64 / s.count as f64 * 100.0 };
                                                view! {
                                                    <div class="flex justify-between text-sm">
                                                        <span>{level.band()}</span>
                                                        <span>{n}</span>
                                                    </div>
                                                    <progress class="progress w-full" value=pct.to_string() max="100"></progress>
                                                }
                                            })
                                            .collect_view()}
                                    </div>
                                </div>
                            </div>
                        })}

                        <div class="card bg-base-100 shadow-xl">
                            <div class="card-body p-0">
                                <div class="p-6 pb-2">
                                    <h2 class="card-title">"Recent Sensor Readings"</h2>
                                    <p class="text-base-content/70 text-sm">
                                        {format!("Live data updates every {} seconds", period.as_secs())}
                                    </p>
                                </div>
                                <div class="overflow-x-auto">
                                    <table class="table table-zebra w-full">
                                        <thead>
                                            <tr>
                                                <th>"Timestamp"</th>
                                                <th>"Ammonia (ppm)"</th>
                                                <th>"Temperature (°C)"</th>
                                                <th>"Humidity (%)"</th>
                                                <th>"Status"</th>
                                            </tr>
                                        </thead>
                                        <tbody>
                                            {move || snapshot.with(|s| {
                                                s.as_ref().map(|s| s.recent.clone()).unwrap_or_default()
                                            })
                                            .into_iter()
                                            .map(|r| {
                                                let level = AlertLevel::from_ppm(r.ammonia_ppm);
                                                view! {
                                                    <tr>
                                                        <td title=format_display(&r.timestamp)>{format_clock(&r.timestamp)}</td>
                                                        <td>{format!("{:.2}", r.ammonia_ppm)}</td>
                                                        <td>{format!("{:.1}", r.temperature)}</td>
                                                        <td>{format!("{:.1}", r.humidity)}</td>
                                                        <td><span class=level_class(level)>{level.band()}</span></td>
                                                    </tr>
                                                }
                                            })
                                            .collect_view()}
                                        </tbody>
                                    </table>
                                </div>
                            </div>
                        </div>
                    </Show>
                </div>
            </div>
        </Show>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading(ppm: f64) -> SensorReading {
        SensorReading {
            ammonia_ppm: ppm,
            temperature: 25.0,
            humidity: 50.0,
            timestamp: "2025-10-14T10:00:00Z".into(),
        }
    }

    #[test]
    fn test_trend_points_scale_to_threshold() {
        let points = trend_points(&[reading(0.0), reading(7.5), reading(15.0)], 100.0, 50.0);
        assert_eq!(points, "0.0,50.0 50.0,25.0 100.0,0.0");
    }

    #[test]
    fn test_trend_points_rescale_above_threshold() {
        let points = trend_points(&[reading(30.0), reading(15.0)], 10.0, 10.0);
        assert_eq!(points, "0.0,0.0 10.0,5.0");
        assert!(trend_points(&[], 10.0, 10.0).is_empty());
    }
}
