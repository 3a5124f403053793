//! Edit modal component

use crate::api::{post_json, EditDraft, EditResponse, PageResponse, SaveResponse};
use leptos::logging::warn;
use leptos::prelude::*;
use leptos::task::spawn_local;
use serde_json::json;

/// Edit form for a twin's display fields.
///
/// Typing only touches the modal's own signals. Save sends the four fields
/// to the server's scratch copy in order, then saves; the returned page
/// state is handed to `on_update`. Failures are logged and the modal keeps
/// what was typed.
#[component]
pub fn EditModal(
    edit: EditResponse,
    slug: String,
    on_update: Callback<PageResponse>,
) -> impl IntoView {
    let base = format!("/api/pages/{}/edit", slug);
    let draft = EditDraft::from_fields(&edit.fields);
    let title = draft.name.clone();

    let name = RwSignal::new(draft.name);
    let color = RwSignal::new(draft.color);
    let icon = RwSignal::new(draft.icon);
    let order = RwSignal::new(draft.order);
    let saving = RwSignal::new(edit.is_saving());

    let field_input = move |label: &'static str, field: &'static str, value: RwSignal<String>| {
        view! {
            <div style="margin-bottom: 1rem;">
                <label for=field style="display: block; margin-bottom: 0.25rem;">{label}</label>
                <input type="text" id=field name=field
                    style="width: 100%; padding: 0.5rem; font-size: 1.1rem; box-sizing: border-box;"
                    prop:value=move || value.get()
                    on:input=move |ev| value.set(event_target_value(&ev)) />
            </div>
        }
    };

    let input_url = format!("{}/input", base);
    let save_url = format!("{}/save", base);
    let on_save = move |_| {
        if saving.get_untracked() {
            return;
        }
        saving.set(true);
        let draft = EditDraft {
            name: name.get_untracked(),
            color: color.get_untracked(),
            icon: icon.get_untracked(),
            order: order.get_untracked(),
        };
        let input_url = input_url.clone();
        let save_url = save_url.clone();
        spawn_local(async move {
            for body in draft.input_requests() {
                if let Err(e) = post_json::<_, PageResponse>(&input_url, &body).await {
                    warn!("Error updating twin: {}", e);
                    saving.set(false);
                    return;
                }
            }
            match post_json::<_, SaveResponse>(&save_url, &json!({})).await {
                Ok(saved) => {
                    if saved.result.outcome != "saved" {
                        warn!("Error updating twin: {:?}", saved.result);
                    }
                    saving.set(false);
                    on_update.run(saved.page);
                }
                Err(e) => {
                    warn!("Error updating twin: {}", e);
                    saving.set(false);
                }
            }
        });
    };

    let cancel_url = format!("{}/cancel", base);
    let on_cancel = move |_| {
        let url = cancel_url.clone();
        spawn_local(async move {
            match post_json::<_, PageResponse>(&url, &json!({})).await {
                Ok(page) => on_update.run(page),
                Err(e) => warn!("Error closing edit: {}", e),
            }
        });
    };

    view! {
        <div style="position: fixed; inset: 0; background: rgba(0,0,0,0.5); display: flex; align-items: center; justify-content: center;">
            <div role="dialog" style="background: #fff; border-radius: 6px; width: 640px; max-width: 95vw; padding: 1.5rem;">
                <h3 style="margin-top: 0;">{title}</h3>
                {field_input("Display Name", "modalName", name)}
                {field_input("Color", "modalColor", color)}
                {field_input("Icon", "modalIcon", icon)}
                {field_input("Order", "modalOrder", order)}
                <div style="display: flex; justify-content: flex-end; gap: 0.5rem;">
                    <button style="background: #ff9800; color: #fff; border: none; padding: 0.5rem 1rem; border-radius: 3px;"
                        on:click=on_cancel>"Cancel"</button>
                    <button disabled=move || saving.get() style="background: #9c27b0; color: #fff; border: none; padding: 0.5rem 1rem; border-radius: 3px;"
                        on:click=on_save>"Save Changes"</button>
                </div>
            </div>
        </div>
    }
}
