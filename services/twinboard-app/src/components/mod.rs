//! UI components

pub mod dashboard_page;
pub mod edit_modal;
pub mod sidebar;
pub mod stat_card;
pub mod twin_card;
pub mod twin_list;

/// Header gradient for a card color name
pub fn card_colors(color: &str) -> (&'static str, &'static str) {
    match color {
        "primary" => ("#ab47bc", "#8e24aa"),
        "info" => ("#26c6da", "#00acc1"),
        "success" => ("#66bb6a", "#43a047"),
        "warning" => ("#ffa726", "#fb8c00"),
        "danger" => ("#ef5350", "#e53935"),
        "rose" => ("#ec407a", "#d81b60"),
        _ => ("#9e9e9e", "#757575"),
    }
}
