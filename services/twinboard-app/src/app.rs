//! Main App component

use crate::components::dashboard_page::DashboardPage;
use crate::components::sidebar::Sidebar;
use crate::components::twin_list::TwinListPage;
use leptos::prelude::*;
use leptos_meta::{provide_meta_context, Stylesheet, Title};
use leptos_router::components::{Redirect, Route, Router, Routes};
use leptos_router::path;

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    view! {
        <Title text="Twinboard" />
        <Stylesheet href="https://fonts.googleapis.com/icon?family=Material+Icons" />
        <Router>
            <div style="font-family: 'Roboto', 'Helvetica', 'Arial', sans-serif; display: flex; background: #eee; min-height: 100vh;">
                <Sidebar />
                <main style="flex: 1; padding: 1.5rem;">
                    <Routes fallback=|| view! { <p>"Page not found."</p> }>
                        <Route path=path!("/") view=|| view! { <Redirect path="/admin/dashboard" /> } />
                        <Route path=path!("/admin/dashboard") view=DashboardPage />
                        <Route path=path!("/admin/:page") view=TwinListPage />
                    </Routes>
                </main>
            </div>
        </Router>
    }
}
