use std::rc::Rc;

use ammowatch::{AdminSnapshot, ClientResult, ViewScope};
use ammowatch_shared::date::format_display;
use ammowatch_shared::{ActivityLogEntry, View, Worker, WorkerForm};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::auth::{logout, use_app, use_gate};
use crate::components::{Banner, IdentityBadge, Spinner};
use crate::web::dialog;
use crate::web::router::use_router;

/// One-line rendering of a log entry's free-form `details`.
fn log_details(entry: &ActivityLogEntry) -> String {
    match &entry.details {
        None | Some(serde_json::Value::Null) => String::new(),
        Some(serde_json::Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

#[component]
pub fn AdminManagePage() -> impl IntoView {
    let app = use_app();
    let router = use_router();
    let desk = StoredValue::new_local(Rc::new(app.staff_desk()));
    let app = StoredValue::new(app);

    let (snapshot, set_snapshot) = signal(AdminSnapshot::default());
    let (loading, set_loading) = signal(true);
    let (saving, set_saving) = signal(false);
    let (error_msg, set_error_msg) = signal(None::<String>);
    let (notice, set_notice) = signal(None::<String>);

    let (editing, set_editing) = signal(None::<String>);
    let (name, set_name) = signal(String::new());
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());

    let reset_form = move || {
        set_editing.set(None);
        set_name.set(String::new());
        set_email.set(String::new());
        set_password.set(String::new());
    };

    let view_scope = ViewScope::new();
    let teardown = view_scope.clone();
    on_cleanup(move || teardown.unmount());
    let view_scope = StoredValue::new(view_scope);

    let settle = move |result: ClientResult<AdminSnapshot>, done: Option<&'static str>| {
        let mounted = view_scope
            .try_with_value(ViewScope::is_mounted)
            .unwrap_or(false);
        if !mounted {
            return;
        }
        match result {
            Ok(snap) => {
                set_snapshot.set(snap);
                set_error_msg.set(None);
                if let Some(text) = done {
                    set_notice.set(Some(text.to_string()));
                    reset_form();
                }
            }
            Err(e) if e.is_unauthenticated() => router.redirect(View::Login),
            // The write went through; only the tables are stale.
            Err(e) if e.mutation_applied() => {
                if let Some(text) = done {
                    set_notice.set(Some(text.to_string()));
                    reset_form();
                }
                set_error_msg.set(Some(e.user_message()));
            }
            Err(e) => set_error_msg.set(Some(e.user_message())),
        }
        set_loading.set(false);
        set_saving.set(false);
    };

    let gate = use_gate(View::AdminManage, move |_| {
        let desk = desk.get_value();
        spawn_local(async move { settle(desk.load_all().await, None) });
    });

    let on_save = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let form = WorkerForm {
            id: editing.get(),
            name: name.get(),
            email: email.get(),
            password: password.get(),
        };
        let done = if form.is_edit() {
            "Worker updated successfully"
        } else {
            "Worker created successfully"
        };
        set_notice.set(None);
        set_saving.set(true);
        let desk = desk.get_value();
        spawn_local(async move { settle(desk.save_worker(&form).await, Some(done)) });
    };

    let on_edit = move |worker: Worker| {
        set_notice.set(None);
        set_error_msg.set(None);
        set_editing.set(Some(worker.id));
        set_name.set(worker.name);
        set_email.set(worker.email);
        set_password.set(String::new());
    };

    let on_delete = move |worker: Worker| {
        if !dialog::confirm(&format!("Delete worker {}?", worker.name)) {
            return;
        }
        set_notice.set(None);
        set_loading.set(true);
        let desk = desk.get_value();
        spawn_local(async move {
            settle(desk.delete_worker(&worker.id).await, Some("Worker deleted successfully"))
        });
    };

    view! {
        <Show when=move || gate.granted() fallback=|| view! { <Spinner label="Verifying access..." /> }>
            <div class="min-h-screen bg-base-200 p-4 md:p-8">
                <div class="max-w-7xl mx-auto space-y-6">
                    <div class="navbar bg-base-100 rounded-box shadow-xl">
                        <div class="flex-1 flex-col items-start">
                            <h1 class="text-3xl font-bold">"Admin Console"</h1>
                            <p class="text-base-content/70">"Workers, users and recent activity"</p>
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

                    <Banner message=error_msg />
                    <Banner message=notice success=true />

                    <div class="grid grid-cols-1 lg:grid-cols-3 gap-6">
                        <div class="card bg-base-100 shadow-xl">
                            <form class="card-body" on:submit=on_save>
                                <h2 class="card-title">
                                    {move || if editing.with(Option::is_some) { "Edit Worker" } else { "Add Worker" }}
                                </h2>
                                <label class="form-control">
                                    <div class="label"><span class="label-text">"Name"</span></div>
                                    <input
                                        type="text"
                                        class="input input-bordered"
                                        on:input=move |ev| set_name.set(event_target_value(&ev))
                                        prop:value=name
                                    />
                                </label>
                                <label class="form-control">
                                    <div class="label"><span class="label-text">"Email"</span></div>
                                    <input
                                        type="email"
                                        class="input input-bordered"
                                        on:input=move |ev| set_email.set(event_target_value(&ev))
                                        prop:value=email
                                    />
                                </label>
                                <label class="form-control">
                                    <div class="label">
                                        <span class="label-text">
                                            {move || if editing.with(Option::is_some) {
                                                "Password (leave blank to keep)"
                                            } else {
                                                "Password"
                                            }}
                                        </span>
                                    </div>
                                    <input
                                        type="password"
                                        class="input input-bordered"
                                        on:input=move |ev| set_password.set(event_target_value(&ev))
                                        prop:value=password
                                    />
                                </label>
                                <div class="card-actions justify-end mt-4">
                                    <Show when=move || editing.with(Option::is_some)>
                                        <button type="button" class="btn btn-ghost" on:click=move |_| reset_form()>
                                            "Cancel"
                                        </button>
                                    </Show>
                                    <button type="submit" class="btn btn-primary" disabled=move || saving.get()>
                                        {move || if saving.get() { "Saving..." } else { "Save" }}
                                    </button>
                                </div>
                            </form>
                        </div>

                        <div class="card bg-base-100 shadow-xl lg:col-span-2">
                            <div class="card-body">
                                <h2 class="card-title">"Workers"</h2>
                                <Show when=move || !loading.get() fallback=|| view! { <Spinner /> }>
                                    <div class="overflow-x-auto">
                                        <table class="table table-zebra w-full">
                                            <thead>
                                                <tr><th>"Name"</th><th>"Email"</th><th></th></tr>
                                            </thead>
                                            <tbody>
                                                <For
                                                    each=move || snapshot.with(|s| s.workers.clone())
                                                    key=|w| w.id.clone()
                                                    children=move |worker| {
                                                        let for_edit = worker.clone();
                                                        let for_delete = worker.clone();
                                                        view! {
                                                            <tr>
                                                                <td>{worker.name.clone()}</td>
                                                                <td>{worker.email.clone()}</td>
                                                                <td class="flex gap-1 justify-end">
                                                                    <button class="btn btn-ghost btn-xs" on:click=move |_| on_edit(for_edit.clone())>
                                                                        "Edit"
                                                                    </button>
                                                                    <button class="btn btn-error btn-xs" on:click=move |_| on_delete(for_delete.clone())>
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
                                </Show>
                            </div>
                        </div>
                    </div>

                    <div class="grid grid-cols-1 lg:grid-cols-2 gap-6">
                        <div class="card bg-base-100 shadow-xl">
                            <div class="card-body">
                                <h2 class="card-title">"Registered Users"</h2>
                                <ul class="divide-y divide-base-200">
                                    <For
                                        each=move || snapshot.with(|s| s.users.clone())
                                        key=|u| u.id.clone()
                                        children=|user| view! {
                                            <li class="py-2">
                                                <p class="font-medium">{user.name}</p>
                                                <p class="text-xs opacity-60">{user.email}</p>
                                            </li>
                                        }
                                    />
                                </ul>
                            </div>
                        </div>

                        <div class="card bg-base-100 shadow-xl">
                            <div class="card-body">
                                <h2 class="card-title">"Activity Log"</h2>
                                <div class="overflow-x-auto max-h-96">
                                    <table class="table table-xs">
                                        <thead>
                                            <tr><th>"When"</th><th>"Event"</th><th>"Actor"</th><th>"Details"</th></tr>
                                        </thead>
                                        <tbody>
                                            <For
                                                each=move || snapshot.with(|s| s.logs.clone())
                                                key=|l| l.id.clone()
                                                children=|entry| {
                                                    let details = log_details(&entry);
                                                    view! {
                                                        <tr>
                                                            <td class="whitespace-nowrap">{format_display(&entry.timestamp)}</td>
                                                            <td><span class="badge badge-ghost badge-sm">{entry.event_type}</span></td>
                                                            <td>{entry.actor.unwrap_or_default()}</td>
                                                            <td class="max-w-xs truncate" title=details.clone()>{details.clone()}</td>
                                                        </tr>
                                                    }
                                                }
                                            />
                                        </tbody>
                                    </table>
                                </div>
                            </div>
                        </div>
                    </div>
                </div>
            </div>
        </Show>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(details: Option<serde_json::Value>) -> ActivityLogEntry {
        ActivityLogEntry {
            id: "l1".into(),
            event_type: "login".into(),
            actor: None,
            timestamp: "2025-10-14T10:00:00Z".into(),
            details,
        }
    }

    #[test]
    fn test_log_details_rendering() {
        assert_eq!(log_details(&entry(None)), "");
        assert_eq!(log_details(&entry(Some(serde_json::Value::Null))), "");
        assert_eq!(log_details(&entry(Some(serde_json::json!("from web")))), "from web");
        assert_eq!(
            log_details(&entry(Some(serde_json::json!({ "ip": "10.0.0.1" })))),
            r#"{"ip":"10.0.0.1"}"#
        );
    }
}
