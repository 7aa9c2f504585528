//! CLI output formatting utilities.
//!
//! - Placement tables for the arrange command
//! - JSON syntax highlighting

use std::fmt::Write;

use colored::Colorize;
use expose_layout::{Arrangement, Placement};
use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

/// One row of the placement table.
#[derive(Tabled)]
struct PlacementRow {
    #[tabled(rename = "Window")]
    id: String,
    #[tabled(rename = "Position")]
    position: String,
    #[tabled(rename = "Size")]
    size: String,
}

/// One row of the page table.
#[derive(Tabled)]
struct PageRow {
    #[tabled(rename = "Desktop")]
    desktop: usize,
    #[tabled(rename = "Position")]
    position: String,
    #[tabled(rename = "Size")]
    size: String,
}

impl From<&Placement> for PlacementRow {
    fn from(placement: &Placement) -> Self {
        let frame = placement.frame;
        Self {
            id: placement.id.to_string(),
            position: format!("{}, {}", frame.x, frame.y),
            size: format!("{}x{}", frame.width, frame.height),
        }
    }
}

/// Renders the placements of an arrangement as a table.
#[must_use]
pub fn placements_table(arrangement: &Arrangement) -> String {
    let rows: Vec<PlacementRow> = arrangement.placements.iter().map(PlacementRow::from).collect();
    Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::new(1..3)).with(Alignment::right()))
        .to_string()
}

/// One-line summary printed above the table.
#[must_use]
pub fn summary(arrangement: &Arrangement) -> String {
    let size = arrangement.size();
    let mut line = format!(
        "Layout {}x{} at {:.3}x, offset {}, {} ({} windows, {} iterations)",
        size.width,
        size.height,
        arrangement.fit.scale,
        arrangement.fit.x_offset,
        arrangement.fit.y_offset,
        arrangement.placements.len(),
        arrangement.report.iterations
    );
    if !arrangement.pages.is_empty() {
        let _ = write!(line, ", {} pages", arrangement.pages.len());
    }
    line
}

/// Renders the pages of a paging arrangement as a table.
#[must_use]
pub fn pages_table(arrangement: &Arrangement) -> String {
    let rows: Vec<PageRow> = arrangement
        .pages
        .iter()
        .enumerate()
        .map(|(desktop, page)| PageRow {
            desktop,
            position: format!("{}, {}", page.x, page.y),
            size: format!("{}x{}", page.width, page.height),
        })
        .collect();
    Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::new(1..3)).with(Alignment::right()))
        .to_string()
}

/// Prints JSON with syntax highlighting.
///
/// Colors:
/// - Keys: Cyan
/// - Strings: Green
/// - Numbers: Yellow
/// - Booleans/Null: Magenta
/// - Brackets/Braces: White (bold)
pub fn print_highlighted_json(value: &serde_json::Value) {
    let mut out = String::new();
    highlight(value, 0, &mut out);
    println!("{out}");
}

const INDENT: &str = "  ";

/// Appends a pretty-printed, colored rendering of `value` to `out`.
fn highlight(value: &serde_json::Value, depth: usize, out: &mut String) {
    use serde_json::Value;

    match value {
        Value::Null => out.push_str(&"null".magenta().to_string()),
        Value::Bool(b) => out.push_str(&b.to_string().magenta().to_string()),
        Value::Number(n) => out.push_str(&n.to_string().yellow().to_string()),
        Value::String(s) => out.push_str(&quoted(s).green().to_string()),
        Value::Array(items) => {
            if items.is_empty() {
                out.push_str(&"[]".white().bold().to_string());
                return;
            }
            out.push_str(&"[".white().bold().to_string());
            for (n, item) in items.iter().enumerate() {
                separator(n, depth + 1, out);
                highlight(item, depth + 1, out);
            }
            close(']', depth, out);
        }
        Value::Object(map) => {
            if map.is_empty() {
                out.push_str(&"{}".white().bold().to_string());
                return;
            }
            out.push_str(&"{".white().bold().to_string());
            for (n, (key, item)) in map.iter().enumerate() {
                separator(n, depth + 1, out);
                out.push_str(&quoted(key).cyan().to_string());
                out.push_str(&":".white().to_string());
                out.push(' ');
                highlight(item, depth + 1, out);
            }
            close('}', depth, out);
        }
    }
}

fn quoted(s: &str) -> String { serde_json::Value::String(s.to_owned()).to_string() }

fn separator(n: usize, depth: usize, out: &mut String) {
    if n > 0 {
        out.push_str(&",".white().to_string());
    }
    out.push('\n');
    out.push_str(&INDENT.repeat(depth));
}

fn close(bracket: char, depth: usize, out: &mut String) {
    out.push('\n');
    out.push_str(&INDENT.repeat(depth));
    out.push_str(&bracket.to_string().white().bold().to_string());
}

#[cfg(test)]
mod tests {
    use expose_layout::{Fit, LayoutReport, Rect, Size, WindowId};

    use super::*;

    fn arrangement() -> Arrangement {
        Arrangement {
            report: LayoutReport { size: Size::new(1200, 800), iterations: 7 },
            fit: Fit { scale: 0.5, x_offset: 660, y_offset: 340 },
            placements: vec![Placement { id: WindowId(0x2a), frame: Rect::new(660, 340, 300, 200) }],
            pages: Vec::new(),
        }
    }

    fn plain(value: &serde_json::Value) -> String {
        colored::control::set_override(false);
        let mut out = String::new();
        highlight(value, 0, &mut out);
        out
    }

    #[test]
    fn test_placements_table_lists_windows() {
        let table = placements_table(&arrangement());
        assert!(table.contains("Window"));
        assert!(table.contains("0x2a"));
        assert!(table.contains("660, 340"));
        assert!(table.contains("300x200"));
    }

    #[test]
    fn test_summary() {
        let summary = summary(&arrangement());
        assert!(summary.starts_with("Layout 1200x800 at 0.500x"));
        assert!(summary.contains("1 windows, 7 iterations"));
    }

    #[test]
    fn test_paging_summary_and_pages_table() {
        let mut arrangement = arrangement();
        arrangement.pages = vec![Rect::new(660, 340, 480, 270), Rect::new(1152, 340, 480, 270)];

        assert!(summary(&arrangement).ends_with("7 iterations), 2 pages"));
        let table = pages_table(&arrangement);
        assert!(table.contains("Desktop"));
        assert!(table.contains("1152, 340"));
        assert!(table.contains("480x270"));
    }

    #[test]
    fn test_highlight_matches_pretty_json() {
        let value = serde_json::json!({
            "name": "a \"quoted\" name",
            "list": [1, 2.5, true, null],
            "empty": {},
            "none": []
        });
        assert_eq!(plain(&value), serde_json::to_string_pretty(&value).unwrap());
    }
}
