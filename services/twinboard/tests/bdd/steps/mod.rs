//! BDD step definitions for twinboard service

pub mod dashboard_steps;
pub mod edit_steps;
pub mod mapping_steps;
pub mod page_steps;

/// Split a comma separated feature-file list, e.g. `"F1, F2"`
pub fn split_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(|item| item.trim().to_string())
        .filter(|item| !item.is_empty())
        .collect()
}
