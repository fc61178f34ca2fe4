use leptos::prelude::*;

use crate::components::icons::BugIcon;
use crate::web::router::Link;

#[component]
pub fn NotFoundPage(#[prop(into)] path: String) -> impl IntoView {
    view! {
        <div class="flex flex-col items-center justify-center gap-4 py-24 text-center">
            <BugIcon attr:class="h-16 w-16 text-base-content/20" />
            <h1 class="text-4xl font-bold">"404"</h1>
            <p class="text-base-content/60">
                "Page not found: " <code class="font-mono">{path}</code>
            </p>
            <Link to="/dashboard" class="btn btn-primary btn-sm">"Back to Dashboard"</Link>
        </div>
    }
}
