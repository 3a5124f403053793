//! Dashboard summary page

use crate::api::{get_json, SummaryResponse};
use crate::components::stat_card::StatCard;
use leptos::logging::warn;
use leptos::prelude::*;

/// Fetches /api/dashboard on mount and whenever refresh is pressed.
///
/// A failed fetch is logged and leaves the card row empty.
#[component]
pub fn DashboardPage() -> impl IntoView {
    let (reload, set_reload) = signal(0u32);
    let summary = LocalResource::new(move || {
        reload.track();
        async move { get_json::<SummaryResponse>("/api/dashboard").await }
    });

    view! {
        <section>
            <div style="display: flex; align-items: center; gap: 1rem;">
                <h2>"Dashboard"</h2>
                <button aria-label="refresh list" style="border: none; background: none; cursor: pointer;"
                    on:click=move |_| set_reload.update(|n| *n += 1)>
                    <i class="material-icons">"refresh"</i>
                </button>
            </div>
            <Suspense fallback=move || view! { <p>"Loading dashboard..."</p> }>
                {move || {
                    summary.get().map(|result| match result {
                        Ok(data) => view! {
                            <div style="display: flex; flex-wrap: wrap;">
                                {data.cards.into_iter().map(|card| view! { <StatCard card=card /> }).collect::<Vec<_>>()}
                            </div>
                        }.into_any(),
                        Err(e) => {
                            warn!("Dashboard unavailable: {}", e);
                            ().into_any()
                        }
                    })
                }}
            </Suspense>
        </section>
    }
}
