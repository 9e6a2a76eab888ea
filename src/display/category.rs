//! Category display formatting
//!
//! Formats categories for terminal output in list and detail views.

use crate::models::Category;

/// Format a list of categories as a table
pub fn format_category_list(categories: &[Category]) -> String {
    if categories.is_empty() {
        return "No categories found.".to_string();
    }

    let name_width = categories
        .iter()
        .map(|c| c.name.len())
        .max()
        .unwrap_or(4)
        .max(4);

    let mut output = String::new();
    output.push_str(&format!("{:<name_width$}\n", "Name", name_width = name_width));
    output.push_str(&format!("{:-<name_width$}\n", "", name_width = name_width));

    for category in categories {
        let marker = if category.is_default() {
            "  (default)"
        } else {
            ""
        };
        output.push_str(&format!(
            "{:<name_width$}{}\n",
            category.name,
            marker,
            name_width = name_width,
        ));
    }

    let count = categories.len();
    let noun = if count == 1 { "category" } else { "categories" };
    output.push_str(&format!("\n{} {}\n", count, noun));

    output
}

/// Format a single category's details
pub fn format_category_details(category: &Category) -> String {
    let mut output = String::new();

    output.push_str(&format!("Category: {}\n", category.name));
    output.push_str(&format!("  ID:      {}\n", category.id));
    output.push_str(&format!(
        "  Default: {}\n",
        if category.is_default() { "Yes" } else { "No" }
    ));
    output.push_str(&format!(
        "  Created: {}\n",
        category.created_at.format("%Y-%m-%d %H:%M UTC")
    ));

    output
}
