//! Dashboard stat card component

use crate::api::StatCardResponse;
use crate::components::card_colors;
use leptos::prelude::*;

/// A headline number with an icon header and a footer line
#[component]
pub fn StatCard(card: StatCardResponse) -> impl IntoView {
    let (from, to) = card_colors(&card.color);
    let icon_style = format!(
        "float: left; padding: 15px; margin-top: -20px; margin-right: 15px; border-radius: 3px; \
         background: linear-gradient(60deg, {}, {}); color: #fff;",
        from, to
    );

    view! {
        <div style="width: 320px; background: #fff; border-radius: 6px; margin: 1.5rem 1rem 0 0; padding: 0 15px; box-shadow: 0 1px 4px rgba(0,0,0,0.14);">
            <div style="overflow: hidden; padding-top: 10px; text-align: right;">
                <div style=icon_style>
                    <i class="material-icons" style="font-size: 36px;">{card.icon}</i>
                </div>
                <h1 style="color: #999; margin: 0; font-size: 24px;">{card.title}</h1>
                <h3 style="color: #3C4858; margin: 0 0 3px 0; font-size: 40px; font-weight: normal;">{card.value}</h3>
            </div>
            <div style="border-top: 1px solid #eee; margin-top: 10px; padding: 10px 0; color: #999; font-size: 13px;">
                {card.footer}
            </div>
        </div>
    }
}
