use ammowatch_shared::View;
use ammowatch_shared::stats::AMMONIA_THRESHOLD_PPM;
use leptos::prelude::*;

use crate::web::router::Link;

#[component]
pub fn HomePage() -> impl IntoView {
    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content text-center">
                <div class="max-w-lg">
                    <h1 class="text-5xl font-bold">"AmmoWatch"</h1>
                    <p class="py-6 text-base-content/70">
                        {format!(
                            "Live ammonia monitoring from field sensors. Levels above {} ppm raise an alert, and anyone can file a report of a leak or strong smell.",
                            AMMONIA_THRESHOLD_PPM,
                        )}
                    </p>
                    <div class="flex justify-center gap-4">
                        <Link to=View::Login class="btn btn-primary">"Log in"</Link>
                        <Link to=View::Signup class="btn btn-outline">"Sign up"</Link>
                    </div>
                </div>
            </div>
        </div>
    }
}
