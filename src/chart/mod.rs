//! Chart Layout Engine
//!
//! Pure text layout for the North Indian diamond chart. Twelve houses
//! occupy fixed positions: 12 and 1 across the top, 10/2 and 8/6 on the
//! sides, 4 at the bottom, with 11, 7, 9 and 5 on the inner diamond and
//! the lagna (ascendant) centered. Layout is deterministic: identical
//! input produces byte-identical output, and every line of the diagram
//! has the same character width regardless of house content.

use crate::models::HouseMap;

/// Content width of one house cell, excluding the `[NN] ` label.
pub const CELL_WIDTH: usize = 12;

/// Token rendered for a vacant or missing house. A visible placeholder
/// keeps the borders aligned; a blank would not.
pub const EMPTY_HOUSE: &str = "Empty";

/// Fallback when the lagna rashi is absent.
const UNKNOWN_LAGNA: &str = "N/A";

// One slot is `[NN] ` (5 chars) plus CELL_WIDTH of content.
const SLOT: usize = CELL_WIDTH + 5;

/// Fit content into `CELL_WIDTH` columns: left-aligned, right-padded.
/// Overflow is truncated to `CELL_WIDTH - 1` characters plus an ellipsis
/// rather than allowed to push the borders out of alignment.
fn fit(content: &str) -> String {
    let count = content.chars().count();
    if count <= CELL_WIDTH {
        format!("{content:<width$}", width = CELL_WIDTH)
    } else {
        let truncated: String = content.chars().take(CELL_WIDTH - 1).collect();
        format!("{truncated}…")
    }
}

/// Render one labelled house slot, `[NN] content....` at fixed width.
fn house_slot(houses: &HouseMap, number: u8) -> String {
    let content = houses
        .get(&number)
        .and_then(|value| value.display())
        .unwrap_or_else(|| EMPTY_HOUSE.to_string());
    format!("[{number:>2}] {}", fit(&content))
}

/// Center text inside a slot-wide field, truncating like a house cell.
fn center_slot(content: &str) -> String {
    format!("{:^width$}", fit(content).trim_end(), width = SLOT)
}

/// Lay the twelve houses onto the fixed diamond diagram.
///
/// Missing houses render as [`EMPTY_HOUSE`]; nothing here can fail. The
/// output is suitable for snapshot comparison.
pub fn layout(houses: &HouseMap, lagna_rashi: &str) -> String {
    let h = |n: u8| house_slot(houses, n);
    let lagna = if lagna_rashi.trim().is_empty() {
        UNKNOWN_LAGNA
    } else {
        lagna_rashi
    };

    let gap = " ".repeat(SLOT + 3);
    let bar = "─".repeat(SLOT + 2);
    let blank = " ".repeat(SLOT);

    let mut lines = Vec::with_capacity(16);
    lines.push(format!("{gap}┌{bar}┐{gap}"));
    lines.push(format!("{gap}│ {} │{gap}", h(12)));
    lines.push(format!("┌{bar}┼{bar}┼{bar}┐"));
    lines.push(format!("│ {} │ {} │ {} │", h(11), center_slot("LAGNA"), h(1)));
    lines.push(format!(
        "│ {blank} │ {} │ {blank} │",
        center_slot(&format!("({lagna})"))
    ));
    lines.push(format!("├{bar}┼{bar}┼{bar}┤"));
    lines.push(format!("│ {} │ {blank} │ {} │", h(10), h(2)));
    lines.push(format!("└{bar}┼{bar}┼{bar}┘"));
    lines.push(format!("{gap}│ {} │{gap}", h(7)));
    lines.push(format!("┌{bar}┼{bar}┼{bar}┐"));
    lines.push(format!("│ {} │ {blank} │ {} │", h(8), h(6)));
    lines.push(format!("├{bar}┼{bar}┼{bar}┤"));
    lines.push(format!("│ {} │ {blank} │ {} │", h(9), h(5)));
    lines.push(format!("└{bar}┼{bar}┼{bar}┘"));
    lines.push(format!("{gap}│ {} │{gap}", h(4)));
    lines.push(format!("{gap}└{bar}┘{gap}"));

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::HouseValue;
    use std::collections::BTreeMap;

    fn houses(entries: &[(u8, &str)]) -> HouseMap {
        entries
            .iter()
            .map(|(n, text)| (*n, HouseValue::Text(text.to_string())))
            .collect()
    }

    fn line_widths(diagram: &str) -> Vec<usize> {
        diagram.lines().map(|l| l.chars().count()).collect()
    }

    #[test]
    fn test_all_lines_share_one_width() {
        let diagram = layout(&houses(&[(1, "Sun"), (7, "Moon, Mars, Venus")]), "Aries");
        let widths = line_widths(&diagram);
        assert!(widths.windows(2).all(|w| w[0] == w[1]), "{widths:?}");
    }

    #[test]
    fn test_width_constant_across_inputs() {
        let empty = layout(&BTreeMap::new(), "Leo");
        let sparse = layout(&houses(&[(3, "Ju")]), "Leo");
        let crowded = layout(
            &houses(&[
                (1, "Sun, Moon, Mars, Mercury, Jupiter"),
                (12, "Venus, Saturn, Rahu, Ketu"),
            ]),
            "Sagittarius",
        );
        assert_eq!(line_widths(&empty), line_widths(&sparse));
        assert_eq!(line_widths(&empty), line_widths(&crowded));
    }

    #[test]
    fn test_missing_house_renders_placeholder() {
        let diagram = layout(&BTreeMap::new(), "Leo");
        assert!(diagram.contains("[ 4] Empty"));
        assert!(diagram.contains("[12] Empty"));
    }

    #[test]
    fn test_vacant_marker_renders_placeholder() {
        let diagram = layout(&houses(&[(4, "-")]), "Leo");
        assert!(diagram.contains("[ 4] Empty"));
    }

    #[test]
    fn test_overflow_is_truncated_with_ellipsis() {
        let diagram = layout(&houses(&[(1, "Sun, Moon, Mars, Mercury")]), "Leo");
        assert!(diagram.contains("[ 1] Sun, Moon, …"));
    }

    #[test]
    fn test_lagna_is_centered_in_diagram() {
        let diagram = layout(&BTreeMap::new(), "Aries");
        assert!(diagram.contains("LAGNA"));
        assert!(diagram.contains("(Aries)"));
    }

    #[test]
    fn test_blank_lagna_falls_back() {
        let diagram = layout(&BTreeMap::new(), "  ");
        assert!(diagram.contains("(N/A)"));
    }

    #[test]
    fn test_layout_is_deterministic() {
        let map = houses(&[(1, "Sun"), (2, "Moon"), (9, "Ketu")]);
        assert_eq!(layout(&map, "Virgo"), layout(&map, "Virgo"));
    }

    #[test]
    fn test_all_twelve_houses_appear() {
        let diagram = layout(&BTreeMap::new(), "Leo");
        for n in 1..=12u8 {
            let label = format!("[{n:>2}]");
            assert!(diagram.contains(&label), "missing house {n}");
        }
    }
}
