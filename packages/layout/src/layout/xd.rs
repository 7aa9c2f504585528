//! Row packing layout ("xd").
//!
//! Windows are first stacked into vertical slots no taller than the tallest
//! window, then the slots are laid out left to right in rows. A row closes
//! once it grows wider than `sqrt(sum_of_widths * max_height)`, which keeps
//! the result roughly square. Finally every row is centered horizontally.
//!
//! The layout is fast and deterministic, and the result depends only on the
//! order the windows are handed in.

use super::{LayoutParams, LayoutReport, participants};
use crate::geometry::Size;
use crate::window::Window;

/// Row packing layout.
///
/// # Arguments
///
/// * `windows` - Windows in processing order (placeholders are skipped)
/// * `params` - Spacing between windows; the container size is not used
///
/// # Returns
///
/// The bounding size of the packed rows.
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
pub fn layout(windows: &mut [&mut Window], params: &LayoutParams) -> LayoutReport {
    let mut windows = participants(windows);
    if windows.is_empty() {
        return LayoutReport::default();
    }

    let distance = params.distance;
    let sum_w: i64 = windows.iter().map(|w| i64::from(w.width())).sum();
    let max_h = windows.iter().map(|w| w.height()).max().unwrap_or(0);

    let slots = build_slots(&windows, max_h, distance);
    let max_row_w = (sum_w as f64 * f64::from(max_h)).sqrt() as i32;

    let mut rows: Vec<Vec<usize>> = vec![Vec::new()];
    let (mut row_y, mut x, mut row_h) = (0, 0, 0);
    let (mut total_w, mut total_h) = (0, 0);

    for slot in &slots {
        let slot_max_w = slot.iter().map(|&i| windows[i].width()).max().unwrap_or(0);

        let mut y = row_y;
        for &i in slot {
            let window = &mut windows[i];
            window.position.x = x + (slot_max_w - window.width()) / 2;
            window.position.y = y;
            y += window.height() + distance;
            if let Some(row) = rows.last_mut() {
                row.push(i);
            }
        }

        row_h = row_h.max(y - row_y);
        total_h = total_h.max(y);
        x += slot_max_w + distance;
        total_w = total_w.max(x);

        if x > max_row_w {
            x = 0;
            row_y += row_h;
            row_h = 0;
            rows.push(Vec::new());
        }
    }

    total_w -= distance;
    total_h -= distance;

    for row in &rows {
        let row_w = row.iter().map(|&i| windows[i].frame().right()).max().unwrap_or(0);
        let x_offset = (total_w - row_w) / 2;
        for &i in row {
            windows[i].position.x += x_offset;
        }
    }

    tracing::debug!(
        "xd: {} windows in {} slots, {} rows",
        windows.len(),
        slots.len(),
        rows.iter().filter(|row| !row.is_empty()).count()
    );

    LayoutReport::sized(Size::new(total_w, total_h))
}

/// Groups windows into vertical stacks that stay under `max_h`.
///
/// Each window goes into the first slot (in creation order) that can take it;
/// otherwise it opens a new slot.
fn build_slots(windows: &[&mut Window], max_h: i32, distance: i32) -> Vec<Vec<usize>> {
    let mut slots: Vec<Vec<usize>> = Vec::new();

    for (index, window) in windows.iter().enumerate() {
        let fits = slots.iter_mut().find(|slot| {
            let slot_h: i32 =
                slot.iter().map(|&i| windows[i].height() + distance).sum::<i32>() - distance;
            slot_h + distance + window.height() < max_h
        });

        match fits {
            Some(slot) => slot.push(index),
            None => slots.push(vec![index]),
        }
    }

    slots
}
