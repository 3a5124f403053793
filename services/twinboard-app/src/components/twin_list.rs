//! Twin list page: the floors, rooms and devices pages

use crate::api::{get_json, post_json, PageResponse};
use crate::components::edit_modal::EditModal;
use crate::components::twin_card::TwinCard;
use leptos::logging::warn;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_params_map;
use serde_json::json;

/// Loads `/api/pages/{page}` on mount and on refresh, and hosts the edit modal.
///
/// A failed load is logged and the last list stays on screen.
#[component]
pub fn TwinListPage() -> impl IntoView {
    let params = use_params_map();
    let slug = move || params.read().get("page").unwrap_or_default();

    let page = RwSignal::new(None::<PageResponse>);
    let (reload, set_reload) = signal(0u32);

    Effect::new(move |_| {
        reload.track();
        let url = format!("/api/pages/{}", slug());
        spawn_local(async move {
            match get_json::<PageResponse>(&url).await {
                Ok(data) => page.set(Some(data)),
                Err(e) => warn!("Failed to load twins: {}", e),
            }
        });
    });

    // The modal remounts only when a different twin opens, not on every
    // page update.
    let open_twin = Memo::new(move |_| {
        page.with(|p| {
            p.as_ref()
                .and_then(|p| p.edit.open_twin_id().map(str::to_string))
        })
    });

    let on_update = Callback::new(move |data: PageResponse| page.set(Some(data)));
    let on_edit = Callback::new(move |twin_id: String| {
        let url = format!("/api/pages/{}/edit", slug());
        spawn_local(async move {
            match post_json::<_, PageResponse>(&url, &json!({ "twin_id": twin_id })).await {
                Ok(data) => page.set(Some(data)),
                Err(e) => warn!("Error opening edit: {}", e),
            }
        });
    });

    view! {
        <section>
            <div style="display: flex; align-items: center; gap: 1rem;">
                <h2>{move || page.with(|p| p.as_ref().map(|p| p.title.clone()).unwrap_or_default())}</h2>
                <button aria-label="refresh list" style="border: none; background: none; cursor: pointer;"
                    on:click=move |_| set_reload.update(|n| *n += 1)>
                    <i class="material-icons">"refresh"</i>
                </button>
            </div>
            {move || match page.with(|p| p.as_ref().map(|p| p.twins.clone())) {
                None => view! { <p>"Loading twins..."</p> }.into_any(),
                Some(twins) => view! {
                    <div style="display: flex; flex-wrap: wrap;">
                        {twins.into_iter().map(|card| view! { <TwinCard card=card on_edit=on_edit /> }).collect::<Vec<_>>()}
                    </div>
                }.into_any(),
            }}
            {move || open_twin.get().and_then(|_| {
                page.get_untracked().map(|data| view! {
                    <EditModal edit=data.edit slug=data.slug on_update=on_update />
                })
            })}
        </section>
    }
}
