//! Display primitives shared by command output: tables, detail views and colors.

pub mod detail;
pub mod table;

pub use detail::DetailView;
pub use table::{list_table, render_list};

use console::{style, StyledObject};

/// Render a success action result.
pub fn action_success(message: &str) -> String {
    format!("{} {}", style("\u{2713}").green().bold(), message)
}

/// Render a warning action result.
pub fn action_warning(message: &str) -> String {
    format!("{} {}", style("!").yellow().bold(), message)
}

/// Check mark for done items, an empty box otherwise.
pub fn check(done: bool) -> StyledObject<&'static str> {
    if done {
        style("[x]").green()
    } else {
        style("[ ]").dim()
    }
}

/// Delivery status colored by outcome.
pub fn colorize_delivery_status(status: &str) -> StyledObject<&str> {
    match status.to_lowercase().as_str() {
        "delivered" | "opened" | "sent" => style(status).green(),
        "bounced" | "failed" => style(status).red().bold(),
        "pending" | "scheduled" => style(status).blue(),
        _ => style(status),
    }
}

pub fn money(amount: f64) -> String {
    format!("${amount:.2}")
}

pub fn money_opt(amount: Option<f64>) -> String {
    amount.map_or_else(|| "-".to_string(), money)
}

pub fn or_dash(value: Option<&str>) -> String {
    value.unwrap_or("-").to_string()
}
