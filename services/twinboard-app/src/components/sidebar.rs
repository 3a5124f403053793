//! Navigation sidebar component

use crate::api::{get_json, RouteResponse};
use leptos::prelude::*;

/// Fetches /api/routes and lists the admin pages
#[component]
pub fn Sidebar() -> impl IntoView {
    let routes = LocalResource::new(|| async move {
        get_json::<Vec<RouteResponse>>("/api/routes")
            .await
            .unwrap_or_default()
    });

    view! {
        <nav style="width: 240px; background: #fff; padding: 1rem; box-shadow: 0 0 10px rgba(0,0,0,0.2);">
            <h2 style="margin: 0 0 1rem 0; color: #3c4858;">"Twinboard"</h2>
            <Suspense fallback=move || view! { <p>"Loading..."</p> }>
                <ul style="padding: 0; margin: 0;">
                    {move || {
                        routes.get().map(|data| {
                            data.into_iter().map(|route| {
                                let href = route.href();
                                view! {
                                    <li style="list-style: none; margin: 0.25rem 0;">
                                        <a href=href style="display: flex; align-items: center; gap: 0.75rem; padding: 0.6rem 1rem; color: #3c4858; text-decoration: none;">
                                            <i class="material-icons">{route.icon}</i>
                                            <span>{route.name}</span>
                                        </a>
                                    </li>
                                }
                            }).collect::<Vec<_>>()
                        })
                    }}
                </ul>
            </Suspense>
        </nav>
    }
}
