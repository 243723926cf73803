use std::rc::Rc;

use ammowatch::{ClientResult, ViewScope};
use ammowatch::desk::reports::ReportAction;
use ammowatch_shared::date::format_display;
use ammowatch_shared::{Report, ReportFilters, ReportScope, ReportStatus, View};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::auth::{logout, use_app, use_gate};
use crate::components::{Banner, IdentityBadge, Spinner};
use crate::web::dialog;
use crate::web::router::use_router;

fn location_text(report: &Report) -> String {
    let summary = report.location.summary();
    if summary.is_empty() {
        format!("{:.4}, {:.4}", report.latitude, report.longitude)
    } else {
        summary
    }
}

fn map_link(report: &Report) -> String {
    format!(
        "https://www.google.com/maps?q={},{}",
        report.latitude, report.longitude
    )
}

fn confirm_text(action: ReportAction) -> &'static str {
    match action {
        ReportAction::Delete => "Are you sure you want to delete this report? This cannot be undone.",
        ReportAction::Deactivate => "Deactivate this report? It will move to the deactivated list.",
    }
}

#[component]
pub fn ReportsPage() -> impl IntoView {
    let app = use_app();
    let router = use_router();
    let desk = StoredValue::new_local(Rc::new(app.report_desk()));

    let (reports, set_reports) = signal(Vec::<Report>::new());
    let (scope, set_scope) = signal(ReportScope::Active);
    let (loading, set_loading) = signal(true);
    let (error_msg, set_error_msg) = signal(None::<String>);
    let (selected, set_selected) = signal(None::<Report>);

    let (city, set_city) = signal(String::new());
    let (postcode, set_postcode) = signal(String::new());
    let (date_from, set_date_from) = signal(String::new());
    let (date_to, set_date_to) = signal(String::new());

    let view_scope = ViewScope::new();
    let teardown = view_scope.clone();
    on_cleanup(move || teardown.unmount());
    let view_scope = StoredValue::new(view_scope);

    // Every desk call ends here. A fetch overtaken by a newer one leaves the
    // page alone; the newer one settles it.
    let settle = move |result: ClientResult<Vec<Report>>| {
        let mounted = view_scope
            .try_with_value(ViewScope::is_mounted)
            .unwrap_or(false);
        if !mounted {
            return;
        }
        match result {
            Err(e) if e.is_superseded() => return,
            Ok(list) => {
                set_reports.set(list);
                set_error_msg.set(None);
            }
            Err(e) if e.is_unauthenticated() => {
                router.redirect(View::Login);
                return;
            }
            // Includes a mutation whose re-read failed: the old list stays.
            Err(e) => set_error_msg.set(Some(e.user_message())),
        }
        set_scope.set(desk.get_value().scope());
        set_loading.set(false);
    };

    let gate = use_gate(View::Reports, move |_| {
        let desk = desk.get_value();
        spawn_local(async move { settle(desk.refresh().await) });
    });

    let on_toggle = move |_| {
        let desk = desk.get_value();
        set_loading.set(true);
        spawn_local(async move { settle(desk.toggle_scope().await) });
    };

    let on_apply = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let filters = ReportFilters {
            city: city.get(),
            postcode: postcode.get(),
            date_from: date_from.get(),
            date_to: date_to.get(),
        };
        let desk = desk.get_value();
        set_loading.set(true);
        spawn_local(async move { settle(desk.apply_filters(filters).await) });
    };

    let on_clear = move |_| {
        set_city.set(String::new());
        set_postcode.set(String::new());
        set_date_from.set(String::new());
        set_date_to.set(String::new());
        let desk = desk.get_value();
        set_loading.set(true);
        spawn_local(async move { settle(desk.clear_filters().await) });
    };

    let run_action = move |report: Report, action: ReportAction| {
        if !dialog::confirm(confirm_text(action)) {
            return;
        }
        set_selected.set(None);
        let desk = desk.get_value();
        set_loading.set(true);
        spawn_local(async move { settle(desk.mutate(&report, action).await) });
    };

    let app = StoredValue::new(app);
    let filter_input = move |label: &'static str,
                             kind: &'static str,
                             value: ReadSignal<String>,
                             set: WriteSignal<String>| {
        view! {
            <label class="form-control">
                <div class="label"><span class="label-text">{label}</span></div>
                <input
                    type=kind
                    class="input input-bordered input-sm"
                    on:input=move |ev| set.set(event_target_value(&ev))
                    prop:value=value
                />
            </label>
        }
    };

    view! {
        <Show when=move || gate.granted() fallback=|| view! { <Spinner label="Verifying access..." /> }>
            <div class="min-h-screen bg-base-200 p-4 md:p-8">
                <div class="max-w-7xl mx-auto space-y-6">
                    <div class="navbar bg-base-100 rounded-box shadow-xl">
                        <div class="flex-1 flex-col items-start">
                            <h1 class="text-3xl font-bold">
                                {move || match scope.get() {
                                    ReportScope::Active => "Manual Reports",
                                    ReportScope::Deactivated => "Deactivated Reports",
                                }}
                            </h1>
                            <p class="text-base-content/70">
                                {move || format!("{} report(s)", reports.with(Vec::len))}
                            </p>
                        </div>
                        <div class="flex-none gap-2">
                            <IdentityBadge identity=gate.identity />
                            <button class="btn btn-ghost" on:click=move |_| router.navigate(View::Dashboard)>
                                "Dashboard"
                            </button>
                            <button class="btn btn-outline btn-error" on:click=move |_| logout(app.get_value(), router)>
                                "Logout"
                            </button>
                        </div>
                    </div>

                    <div class="card bg-base-100 shadow-xl">
                        <form class="card-body" on:submit=on_apply>
                            <div class="grid grid-cols-1 md:grid-cols-4 gap-4">
                                {filter_input("City", "text", city, set_city)}
                                {filter_input("Postcode", "text", postcode, set_postcode)}
                                {filter_input("From", "date", date_from, set_date_from)}
                                {filter_input("To", "date", date_to, set_date_to)}
                            </div>
                            <div class="card-actions justify-between items-center mt-2">
                                <label class="label cursor-pointer gap-2">
                                    <input
                                        type="checkbox"
                                        class="toggle toggle-sm"
                                        prop:checked=move || scope.get() == ReportScope::Deactivated
                                        on:change=on_toggle
                                    />
                                    <span class="label-text">"Show deactivated"</span>
                                </label>
                                <div class="flex gap-2">
                                    <button type="button" class="btn btn-ghost btn-sm" on:click=on_clear>"Clear"</button>
                                    <button type="submit" class="btn btn-primary btn-sm">"Apply filters"</button>
                                </div>
                            </div>
                        </form>
                    </div>

                    <Banner message=error_msg />

                    <Show when=move || !loading.get() fallback=|| view! { <Spinner label="Loading reports..." /> }>
                        <div class="card bg-base-100 shadow-xl">
                            <div class="overflow-x-auto">
                                <table class="table table-zebra w-full">
                                    <thead>
                                        <tr>
                                            <th>"Reported"</th>
                                            <th>"Name"</th>
                                            <th>"Location"</th>
                                            <th>"Comments"</th>
                                            <th></th>
                                        </tr>
                                    </thead>
                                    <tbody>
                                        <Show when=move || reports.with(Vec::is_empty)>
                                            <tr>
                                                <td colspan="5" class="text-center text-base-content/60 py-8">
                                                    "No reports found"
                                                </td>
                                            </tr>
                                        </Show>
                                        <For
                                            each=move || reports.get().into_iter().enumerate()
                                            key=|(i, r)| format!("{}-{}", i, r.mutation_key().unwrap_or_default())
                                            children=move |(_, report)| {
                                                let deactivatable = report.status != Some(ReportStatus::Deactivated)
                                                    && scope.get_untracked() == ReportScope::Active;
                                                let for_view = report.clone();
                                                let for_deactivate = report.clone();
                                                let for_delete = report.clone();
                                                view! {
                                                    <tr>
                                                        <td class="whitespace-nowrap">{format_display(&report.timestamp)}</td>
                                                        <td>
                                                            <div class="font-medium">{report.name.clone()}</div>
                                                            <div class="text-xs opacity-60">{report.email.clone()}</div>
                                                        </td>
                                                        <td>{location_text(&report)}</td>
                                                        <td class="max-w-xs truncate">{report.comments.clone()}</td>
                                                        <td class="flex gap-1 justify-end">
                                                            <button class="btn btn-ghost btn-xs" on:click=move |_| set_selected.set(Some(for_view.clone()))>
                                                                "View"
                                                            </button>
                                                            <Show when=move || deactivatable>
                                                                <button class="btn btn-warning btn-xs" on:click={
                                                                    let report = for_deactivate.clone();
                                                                    move |_| run_action(report.clone(), ReportAction::Deactivate)
                                                                }>
                                                                    "Deactivate"
                                                                </button>
                                                            </Show>
                                                            <button class="btn btn-error btn-xs" on:click=move |_| run_action(for_delete.clone(), ReportAction::Delete)>
                                                                "Delete"
                                                            </button>
                                                        </td>
                                                    </tr>
                                                }
                                            }
                                        />
                                    </tbody>
                                </table>
                            </div>
                        </div>
                    </Show>

                    {move || selected.get().map(|report| {
                        let for_delete = report.clone();
                        view! {
                            <div class="modal modal-open">
                                <div class="modal-box max-w-2xl">
                                    <h3 class="font-bold text-lg">"Report details"</h3>
                                    <div class="py-4 space-y-2 text-sm">
                                        <p><span class="font-semibold">"Name: "</span>{report.name.clone()}</p>
                                        <p><span class="font-semibold">"Email: "</span>{report.email.clone()}</p>
                                        <p><span class="font-semibold">"Reported: "</span>{format_display(&report.timestamp)}</p>
                                        <p><span class="font-semibold">"Location: "</span>{location_text(&report)}</p>
                                        <p>
                                            <span class="font-semibold">"Coordinates: "</span>
                                            <a class="link link-primary" href=map_link(&report) target="_blank" rel="noopener">
                                                {format!("{:.6}, {:.6}", report.latitude, report.longitude)}
                                            </a>
                                        </p>
                                        <p><span class="font-semibold">"Comments: "</span>{report.comments.clone()}</p>
                                        {report.deactivated_by.clone().map(|by| view! {
                                            <p><span class="font-semibold">"Deactivated by: "</span>{by}</p>
                                        })}
                                        {report.deactivated_at.clone().map(|at| view! {
                                            <p><span class="font-semibold">"Deactivated at: "</span>{format_display(&at)}</p>
                                        })}
                                    </div>
                                    <div class="modal-action">
                                        <button class="btn btn-error" on:click=move |_| run_action(for_delete.clone(), ReportAction::Delete)>
                                            "Delete"
                                        </button>
                                        <button class="btn" on:click=move |_| set_selected.set(None)>"Close"</button>
                                    </div>
                                </div>
                                <div class="modal-backdrop" on:click=move |_| set_selected.set(None)></div>
                            </div>
                        }
                    })}
                </div>
            </div>
        </Show>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ammowatch_shared::Location;

    fn report(city: &str) -> Report {
        Report {
            name: "Asha".into(),
            email: "asha@example.com".into(),
            latitude: 19.07601,
            longitude: 72.87771,
            location: Location {
                city: city.into(),
                country: if city.is_empty() { String::new() } else { "India".into() },
                ..Location::default()
            },
            comments: String::new(),
            timestamp: "2025-10-14T10:00:00Z".into(),
            id: None,
            status: None,
            deactivated_by: None,
            deactivated_at: None,
        }
    }

    #[test]
    fn test_location_falls_back_to_coordinates() {
        assert_eq!(location_text(&report("Mumbai")), "Mumbai, India");
        assert_eq!(location_text(&report("")), "19.0760, 72.8777");
    }

    #[test]
    fn test_map_link() {
        assert_eq!(
            map_link(&report("")),
            "https://www.google.com/maps?q=19.07601,72.87771"
        );
    }
}
