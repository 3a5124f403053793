//! Twin card component

use crate::api::TwinCardResponse;
use crate::components::card_colors;
use leptos::prelude::*;

fn reading(value: Option<i64>) -> String {
    value.map_or_else(|| "–".to_string(), |v| v.to_string())
}

/// A twin's readings under its display icon, with an edit button in the footer
#[component]
pub fn TwinCard(card: TwinCardResponse, on_edit: Callback<String>) -> impl IntoView {
    let (from, to) = card_colors(card.display.color.as_deref().unwrap_or_default());
    let icon_style = format!(
        "float: left; padding: 15px; margin-top: -20px; margin-right: 15px; border-radius: 3px; \
         background: linear-gradient(60deg, {}, {}); color: #fff;",
        from, to
    );
    let twin_id = card.name.clone();

    view! {
        <div style="width: 320px; background: #fff; border-radius: 6px; margin: 1.5rem 1rem 0 0; padding: 0 15px; box-shadow: 0 1px 4px rgba(0,0,0,0.14);">
            <div style="overflow: hidden; padding-top: 10px; text-align: right;">
                <div style=icon_style>
                    <i class="material-icons" style="font-size: 36px;">{card.display.icon.unwrap_or_default()}</i>
                </div>
                <h1 style="color: #999; margin: 0; font-size: 24px;">{card.name}</h1>
                <h3 style="color: #3C4858; margin: 0 0 3px 0; font-weight: normal;">
                    {reading(card.temperature)} " °F" <br />
                    {reading(card.humidity)} "% Humidity"
                </h3>
            </div>
            <div style="display: flex; justify-content: space-between; align-items: center; border-top: 1px solid #eee; margin-top: 10px; padding: 10px 0; color: #999; font-size: 13px;">
                <span>{card.last_updated_display}</span>
                <button aria-label="edit twin" style="border: none; background: none; cursor: pointer;"
                    on:click=move |_| on_edit.run(twin_id.clone())>
                    <i class="material-icons">"mode_edit"</i>
                </button>
            </div>
        </div>
    }
}
