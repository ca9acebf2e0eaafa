//! Handler for the `departments` command
//!
//! Prints the fixed department table so kiosk and dashboard setups can
//! copy the slugs and prefixes without reading source.

use crate::cli::OutputFormatter;
use crate::core::Department;
use crate::error::Result;
use serde_json::json;

/// Handler for the `departments` command
///
/// # Errors
///
/// Returns an error only when JSON output cannot be rendered.
pub fn handle_departments(output: &OutputFormatter) -> Result<()> {
    if output.is_json() {
        let rows: Vec<_> = Department::ALL
            .iter()
            .map(|d| {
                json!({
                    "prefix": d.prefix().to_string(),
                    "slug": d.slug(),
                    "name": d.display_name(),
                })
            })
            .collect();
        return output.print_json(&rows);
    }

    output.info("Departments:");
    for department in Department::ALL {
        output.info(&format!(
            "  {}  {:<10} {}",
            department.prefix(),
            department.slug(),
            department.display_name()
        ));
    }
    Ok(())
}
