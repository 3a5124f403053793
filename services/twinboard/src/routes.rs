//! Admin route table

use serde::Serialize;

pub const ADMIN_LAYOUT: &str = "/admin";

/// One entry of the admin navigation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Route {
    pub path: &'static str,
    pub name: &'static str,
    pub icon: &'static str,
    pub layout: &'static str,
}

impl Route {
    /// Layout-prefixed path, e.g. `/admin/location`
    pub fn href(&self) -> String {
        format!("{}{}", self.layout, self.path)
    }
}

pub static ADMIN_ROUTES: [Route; 5] = [
    Route {
        path: "/dashboard",
        name: "Dashboard",
        icon: "dashboard",
        layout: ADMIN_LAYOUT,
    },
    Route {
        path: "/location",
        name: "Floors",
        icon: "house",
        layout: ADMIN_LAYOUT,
    },
    Route {
        path: "/rooms",
        name: "Rooms",
        icon: "room",
        layout: ADMIN_LAYOUT,
    },
    Route {
        path: "/devices",
        name: "Devices",
        icon: "devices",
        layout: ADMIN_LAYOUT,
    },
    Route {
        path: "/settings",
        name: "Settings",
        icon: "settings",
        layout: ADMIN_LAYOUT,
    },
];

/// Where `/` sends the browser
pub fn landing_href() -> String {
    ADMIN_ROUTES[0].href()
}

pub fn find_by_href(href: &str) -> Option<&'static Route> {
    ADMIN_ROUTES.iter().find(|route| route.href() == href)
}
