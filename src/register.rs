//! Issues register: a summary slide inserted at the front of the deck.
//!
//! The layout is fixed geometry in points, not measured from the deck:
//!
//! ```text
//! ┌────────────────────────────────────────────┐  brand band (0,0) 720×54
//! │ <Brand> Issues Register                    │  title
//! └────────────────────────────────────────────┘
//!   Focus: <mode summary>                         subtitle
//!   Generated: ... | Showing n of m | Source: ... metadata
//!  ┌──┬───────┬──────────────────────┬────────┐   table, ≤8 rows + header
//!  │# │Slide  │Issue Register Entry  │Owner / │
//!  └──┴───────┴──────────────────────┴────────┘
//!   Status cadence: ...                           footer
//! ```
//!
//! The whole slide is one batch, so it either appears complete or not at all.

use jiff::Timestamp;
use uuid::Uuid;

use crate::model::{
    Dimension, ElementProperties, OpaqueColor, Outline, PropertyState, Request, RgbColor,
    ShapeBackgroundFill, ShapeProperties, ShapeType, SolidFill, TableCellLocation,
    TableColumnProperties, TextRange, TextStyle,
};
use crate::modes::{Branding, ModeBundle};

/// Most issues the register table shows.
pub const MAX_ROWS: usize = 8;

/// Character budget for one register entry, ellipsis included.
pub const ENTRY_CHAR_LIMIT: usize = 125;

/// Category used when a comment has no `[TAG]` prefix.
pub const DEFAULT_CATEGORY: &str = "ISSUE";

const COLUMNS: u32 = 4;
const COLUMN_WIDTHS: [f64; COLUMNS as usize] = [32.0, 82.0, 470.0, 116.0];
const HEADERS: [&str; COLUMNS as usize] = ["#", "Slide", "Issue Register Entry", "Owner / Status"];
const ELLIPSIS: &str = "...";

const BRAND_RED: RgbColor = RgbColor {
    red: 0.8,
    green: 0.0,
    blue: 0.15,
};
const CHARCOAL: RgbColor = RgbColor {
    red: 0.14,
    green: 0.16,
    blue: 0.19,
};
const MUTED: RgbColor = RgbColor {
    red: 0.34,
    green: 0.37,
    blue: 0.41,
};
const WHITE: RgbColor = RgbColor {
    red: 1.0,
    green: 1.0,
    blue: 1.0,
};

/// A register slide ready to submit.
#[derive(Debug, Clone)]
pub struct RegisterSlide {
    pub slide_id: String,
    pub requests: Vec<Request>,
}

/// Build the batch that creates the register slide at index 0.
pub fn build(mode: &ModeBundle, branding: &Branding, generated_at: Timestamp) -> RegisterSlide {
    let slide_id = new_object_id("issues_register");
    let rows = rows(mode, branding);
    let mut requests = vec![Request::CreateSlide {
        object_id: slide_id.clone(),
        insertion_index: 0,
    }];

    let band_id = new_object_id("issues_top_bar");
    requests.push(Request::CreateShape {
        object_id: band_id.clone(),
        shape_type: ShapeType::Rectangle,
        element_properties: ElementProperties::at(&slide_id, 0.0, 0.0, 720.0, 54.0),
    });
    requests.push(Request::UpdateShapeProperties {
        object_id: band_id,
        shape_properties: ShapeProperties {
            shape_background_fill: ShapeBackgroundFill {
                solid_fill: SolidFill {
                    color: OpaqueColor {
                        rgb_color: BRAND_RED,
                    },
                    alpha: 1.0,
                },
            },
            outline: Outline {
                property_state: PropertyState::NotRendered,
            },
        },
        fields: "shapeBackgroundFill.solidFill.color,shapeBackgroundFill.solidFill.alpha,\
                 outline.propertyState"
            .to_string(),
    });

    text_box(
        &mut requests,
        ElementProperties::at(&slide_id, 24.0, 12.0, 640.0, 30.0),
        "issues_title",
        format!("{} Issues Register", branding.name),
        style(Some(true), 20.0, WHITE),
    );
    text_box(
        &mut requests,
        ElementProperties::at(&slide_id, 24.0, 62.0, 672.0, 20.0),
        "issues_subtitle",
        format!("Focus: {}", mode.register_summary),
        style(Some(true), 11.0, CHARCOAL),
    );
    text_box(
        &mut requests,
        ElementProperties::at(&slide_id, 24.0, 80.0, 672.0, 16.0),
        "issues_meta",
        format!(
            "Generated: {} | Showing {} of {} issues | Source: {}",
            generated_at.strftime("%d %b %Y %H:%M UTC"),
            rows.len(),
            mode.issues.len(),
            branding.source_tag,
        ),
        style(None, 9.0, MUTED),
    );

    table(&mut requests, &slide_id, &rows);

    text_box(
        &mut requests,
        ElementProperties::at(&slide_id, 24.0, 356.0, 672.0, 22.0),
        "issues_footer",
        branding.footer.clone(),
        style(None, 9.0, MUTED),
    );

    RegisterSlide { slide_id, requests }
}

/// Table rows: index, slide reference, truncated entry, owner/status.
fn rows(mode: &ModeBundle, branding: &Branding) -> Vec<[String; 4]> {
    mode.issues
        .iter()
        .take(MAX_ROWS)
        .enumerate()
        .map(|(i, issue)| {
            let (category, text) = split_category(&issue.comment);
            [
                (i + 1).to_string(),
                issue.location_ref.clone(),
                truncate(&format!("[{category}] {text}"), ENTRY_CHAR_LIMIT),
                branding.owner_status.clone(),
            ]
        })
        .collect()
}

fn table(requests: &mut Vec<Request>, slide_id: &str, rows: &[[String; 4]]) {
    let table_id = new_object_id("issues_table");
    let row_count = u32::try_from(rows.len() + 1).unwrap_or(u32::MAX);

    requests.push(Request::CreateTable {
        object_id: table_id.clone(),
        rows: row_count,
        columns: COLUMNS,
        element_properties: ElementProperties::at(slide_id, 10.0, 104.0, 700.0, 242.0),
    });
    for (column, width) in (0..COLUMNS).zip(COLUMN_WIDTHS) {
        requests.push(Request::UpdateTableColumnProperties {
            object_id: table_id.clone(),
            column_indices: vec![column],
            table_column_properties: TableColumnProperties {
                column_width: Dimension::pt(width),
            },
            fields: "columnWidth".to_string(),
        });
    }

    let header = HEADERS.map(String::from);
    let cells = std::iter::once((&header, style(Some(true), 9.0, BRAND_RED)))
        .chain(rows.iter().map(|row| (row, style(None, 8.0, CHARCOAL))));

    for (row_index, (row, cell_style)) in (0..).zip(cells) {
        for (column_index, value) in (0..).zip(row) {
            let location = Some(TableCellLocation {
                row_index,
                column_index,
            });
            requests.push(Request::InsertText {
                object_id: table_id.clone(),
                cell_location: location,
                insertion_index: 0,
                text: value.clone(),
            });
            requests.push(Request::UpdateTextStyle {
                object_id: table_id.clone(),
                cell_location: location,
                text_range: TextRange::all(),
                fields: cell_style.field_mask(),
                style: cell_style.clone(),
            });
        }
    }
}

/// Create a text box, fill it, and style all of its text.
fn text_box(
    requests: &mut Vec<Request>,
    frame: ElementProperties,
    prefix: &str,
    text: String,
    text_style: TextStyle,
) {
    let id = new_object_id(prefix);
    requests.push(Request::CreateShape {
        object_id: id.clone(),
        shape_type: ShapeType::TextBox,
        element_properties: frame,
    });
    requests.push(Request::insert_text(&id, text));
    requests.push(Request::style_text(&id, text_style));
}

fn style(bold: Option<bool>, size: f64, color: RgbColor) -> TextStyle {
    TextStyle {
        bold,
        font_size: Some(Dimension::pt(size)),
        foreground_color: Some(color.into()),
    }
}

/// `<prefix>_<10 hex chars>`, unique per call.
fn new_object_id(prefix: &str) -> String {
    let hex = Uuid::new_v4().simple().to_string();
    format!("{prefix}_{}", &hex[..10])
}

/// Split `"[TONE] text"` into `("TONE", "text")`.
///
/// Without a leading bracketed tag the whole (trimmed) comment is the text
/// and the category is [`DEFAULT_CATEGORY`].
pub fn split_category(comment: &str) -> (&str, &str) {
    let stripped = comment.trim();
    if let Some(rest) = stripped.strip_prefix('[')
        && let Some(end) = rest.find(']')
    {
        let category = rest[..end].trim();
        let category = if category.is_empty() {
            DEFAULT_CATEGORY
        } else {
            category
        };
        return (category, rest[end + 1..].trim());
    }
    (DEFAULT_CATEGORY, stripped)
}

/// Hard-truncate to `limit` characters, replacing the tail with `...`.
///
/// Counts characters, not bytes.
pub fn truncate(value: &str, limit: usize) -> String {
    if value.chars().count() <= limit {
        return value.to_string();
    }
    let kept: String = value.chars().take(limit.saturating_sub(ELLIPSIS.len())).collect();
    kept + ELLIPSIS
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::modes::Issue;

    fn branding() -> Branding {
        Branding {
            name: "Acme".into(),
            owner_status: "BD lead | Open".into(),
            source_tag: "demo comments".into(),
            footer: "Status cadence: Open -> Done".into(),
        }
    }

    fn mode_with_issues(count: usize) -> ModeBundle {
        ModeBundle {
            id: "test_mode".into(),
            label: "Test".into(),
            persona: String::new(),
            style: String::new(),
            register_summary: "numbers first".into(),
            focus: vec![],
            issues: (1..=count)
                .map(|n| Issue {
                    location_ref: format!("Slide {n}"),
                    comment: format!("[NUMBERS] issue {n}"),
                })
                .collect(),
        }
    }

    fn generated_at() -> Timestamp {
        "2026-03-04T05:06:07Z".parse().unwrap()
    }

    fn inserted_texts(requests: &[Request]) -> Vec<&str> {
        requests
            .iter()
            .filter_map(|r| match r {
                Request::InsertText {
                    cell_location: None,
                    text,
                    ..
                } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    fn cell_texts(requests: &[Request]) -> Vec<((u32, u32), &str)> {
        requests
            .iter()
            .filter_map(|r| match r {
                Request::InsertText {
                    cell_location: Some(loc),
                    text,
                    ..
                } => Some(((loc.row_index, loc.column_index), text.as_str())),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn slide_is_created_first_at_index_zero() {
        let slide = build(&mode_with_issues(2), &branding(), generated_at());

        assert_eq!(
            slide.requests[0],
            Request::CreateSlide {
                object_id: slide.slide_id.clone(),
                insertion_index: 0,
            }
        );
        assert!(slide.slide_id.starts_with("issues_register_"));
        assert_eq!(slide.slide_id.len(), "issues_register_".len() + 10);
    }

    #[test]
    fn table_has_header_plus_one_row_per_issue() {
        let slide = build(&mode_with_issues(2), &branding(), generated_at());

        let table = slide
            .requests
            .iter()
            .find_map(|r| match r {
                Request::CreateTable { rows, columns, .. } => Some((*rows, *columns)),
                _ => None,
            })
            .unwrap();
        assert_eq!(table, (3, 4));

        let cells = cell_texts(&slide.requests);
        assert_eq!(cells.len(), 12);
        assert_eq!(cells[0], ((0, 0), "#"));
        assert_eq!(cells[3], ((0, 3), "Owner / Status"));
        assert_eq!(cells[4], ((1, 0), "1"));
        assert_eq!(cells[5], ((1, 1), "Slide 1"));
        assert_eq!(cells[6], ((1, 2), "[NUMBERS] issue 1"));
        assert_eq!(cells[11], ((2, 3), "BD lead | Open"));
    }

    #[test]
    fn every_cell_insert_is_followed_by_its_style() {
        let slide = build(&mode_with_issues(3), &branding(), generated_at());

        for pair in slide.requests.windows(2) {
            if let Request::InsertText {
                cell_location: Some(loc),
                ..
            } = &pair[0]
            {
                assert!(matches!(
                    &pair[1],
                    Request::UpdateTextStyle { cell_location: Some(l), .. } if l == loc
                ));
            }
        }
    }

    #[test]
    fn rows_are_capped_and_metadata_reports_both_counts() {
        let slide = build(&mode_with_issues(15), &branding(), generated_at());

        let rows = slide.requests.iter().find_map(|r| match r {
            Request::CreateTable { rows, .. } => Some(*rows),
            _ => None,
        });
        assert_eq!(rows, Some(9));

        let texts = inserted_texts(&slide.requests);
        assert_eq!(
            texts,
            [
                "Acme Issues Register",
                "Focus: numbers first",
                "Generated: 04 Mar 2026 05:06 UTC | Showing 8 of 15 issues | Source: demo comments",
                "Status cadence: Open -> Done",
            ]
        );
    }

    #[test]
    fn column_widths_are_fixed() {
        let slide = build(&mode_with_issues(1), &branding(), generated_at());

        let widths: Vec<f64> = slide
            .requests
            .iter()
            .filter_map(|r| match r {
                Request::UpdateTableColumnProperties {
                    table_column_properties,
                    ..
                } => Some(table_column_properties.column_width.magnitude),
                _ => None,
            })
            .collect();
        assert_eq!(widths, [32.0, 82.0, 470.0, 116.0]);
    }

    #[test]
    fn every_reference_is_created_earlier_in_the_batch() {
        let slide = build(&mode_with_issues(4), &branding(), generated_at());
        let mut created = HashSet::new();

        for request in &slide.requests {
            if request.creates_object() {
                assert!(created.insert(request.object_id().to_string()), "duplicate id");
            } else {
                assert!(created.contains(request.object_id()), "{request:?}");
            }
            if let Request::CreateShape {
                element_properties, ..
            }
            | Request::CreateTable {
                element_properties, ..
            } = request
            {
                assert_eq!(element_properties.page_object_id, slide.slide_id);
            }
        }
    }

    #[test]
    fn split_category_extracts_bracketed_tag() {
        assert_eq!(split_category("[TONE] foo"), ("TONE", "foo"));
        assert_eq!(split_category("  [ LOGIC ]bar  "), ("LOGIC", "bar"));
        assert_eq!(split_category("[] empty tag"), ("ISSUE", "empty tag"));
    }

    #[test]
    fn split_category_defaults_without_brackets() {
        assert_eq!(split_category("no brackets"), ("ISSUE", "no brackets"));
        assert_eq!(split_category("[unclosed tag"), ("ISSUE", "[unclosed tag"));
        assert_eq!(split_category("a [B] c"), ("ISSUE", "a [B] c"));
    }

    #[test]
    fn truncate_leaves_short_strings_alone() {
        let short = "x".repeat(125);
        assert_eq!(truncate(&short, 125), short);
        assert_eq!(truncate("abc", 125), "abc");
    }

    #[test]
    fn truncate_long_strings_to_exact_budget() {
        let long = "word ".repeat(60);
        let result = truncate(&long, 125);

        assert_eq!(result.chars().count(), 125);
        assert!(result.ends_with("..."));
        assert!(long.starts_with(&result[..122]));
    }

    #[test]
    fn truncate_counts_characters() {
        let long = "é".repeat(200);
        let result = truncate(&long, 125);

        assert_eq!(result.chars().count(), 125);
    }

    #[test]
    fn long_comments_are_truncated_in_rows() {
        let mut mode = mode_with_issues(1);
        mode.issues[0].comment = format!("[PRECEDENT] {}", "z".repeat(300));

        let rows = rows(&mode, &branding());

        assert_eq!(rows[0][2].chars().count(), 125);
        assert!(rows[0][2].starts_with("[PRECEDENT] zzz"));
    }
}
