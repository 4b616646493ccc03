//! Requests: declarative edits submitted to `presentations.batchUpdate`.
//!
//! Each variant serializes to exactly one Slides API request object,
//! e.g. `{"insertText": {"objectId": "...", "insertionIndex": 0, "text": "..."}}`.
//! A batch is applied in array order, atomically, by the remote service.

use serde::Serialize;

/// A single edit against the presentation.
///
/// Every object id a request references must already exist in the deck
/// or be created by an earlier request in the same batch.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Request {
    CreateSlide {
        object_id: String,
        insertion_index: u32,
    },

    CreateShape {
        object_id: String,
        shape_type: ShapeType,
        element_properties: ElementProperties,
    },

    UpdateShapeProperties {
        object_id: String,
        shape_properties: ShapeProperties,
        fields: String,
    },

    CreateTable {
        object_id: String,
        rows: u32,
        columns: u32,
        element_properties: ElementProperties,
    },

    UpdateTableColumnProperties {
        object_id: String,
        column_indices: Vec<u32>,
        table_column_properties: TableColumnProperties,
        fields: String,
    },

    /// Insert text into a shape, or into a table cell when `cell_location` is set.
    InsertText {
        object_id: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        cell_location: Option<TableCellLocation>,
        insertion_index: u32,
        text: String,
    },

    UpdateTextStyle {
        object_id: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        cell_location: Option<TableCellLocation>,
        text_range: TextRange,
        style: TextStyle,
        fields: String,
    },

    DeleteText {
        object_id: String,
        text_range: TextRange,
    },
}

impl Request {
    /// The object this request addresses.
    #[cfg(test)]
    pub fn object_id(&self) -> &str {
        match self {
            Self::CreateSlide { object_id, .. }
            | Self::CreateShape { object_id, .. }
            | Self::UpdateShapeProperties { object_id, .. }
            | Self::CreateTable { object_id, .. }
            | Self::UpdateTableColumnProperties { object_id, .. }
            | Self::InsertText { object_id, .. }
            | Self::UpdateTextStyle { object_id, .. }
            | Self::DeleteText { object_id, .. } => object_id,
        }
    }

    /// Whether this request brings `object_id` into existence.
    #[cfg(test)]
    pub fn creates_object(&self) -> bool {
        matches!(
            self,
            Self::CreateSlide { .. } | Self::CreateShape { .. } | Self::CreateTable { .. }
        )
    }

    /// Insert text at the start of a shape.
    pub fn insert_text(object_id: &str, text: impl Into<String>) -> Self {
        Self::InsertText {
            object_id: object_id.to_string(),
            cell_location: None,
            insertion_index: 0,
            text: text.into(),
        }
    }

    /// Style all text of a shape.
    pub fn style_text(object_id: &str, style: TextStyle) -> Self {
        let fields = style.field_mask();
        Self::UpdateTextStyle {
            object_id: object_id.to_string(),
            cell_location: None,
            text_range: TextRange::all(),
            style,
            fields,
        }
    }

    /// Delete every character of a shape's text body.
    pub fn clear_text(object_id: &str) -> Self {
        Self::DeleteText {
            object_id: object_id.to_string(),
            text_range: TextRange::all(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShapeType {
    Rectangle,
    TextBox,
}

/// Placement of a new element: which page, how big, and where.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementProperties {
    pub page_object_id: String,
    pub size: Size,
    pub transform: AffineTransform,
}

impl ElementProperties {
    /// An unscaled element of `width`×`height` points with its
    /// top-left corner at (`x`, `y`) points.
    pub fn at(page_object_id: &str, x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            page_object_id: page_object_id.to_string(),
            size: Size {
                height: Dimension::pt(height),
                width: Dimension::pt(width),
            },
            transform: AffineTransform {
                scale_x: 1.0,
                scale_y: 1.0,
                translate_x: x,
                translate_y: y,
                unit: Unit::Pt,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Size {
    pub height: Dimension,
    pub width: Dimension,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AffineTransform {
    pub scale_x: f64,
    pub scale_y: f64,
    pub translate_x: f64,
    pub translate_y: f64,
    pub unit: Unit,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Dimension {
    pub magnitude: f64,
    pub unit: Unit,
}

impl Dimension {
    pub fn pt(magnitude: f64) -> Self {
        Self {
            magnitude,
            unit: Unit::Pt,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Unit {
    Pt,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RgbColor {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OpaqueColor {
    pub rgb_color: RgbColor,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionalColor {
    pub opaque_color: OpaqueColor,
}

impl From<RgbColor> for OptionalColor {
    fn from(rgb_color: RgbColor) -> Self {
        Self {
            opaque_color: OpaqueColor { rgb_color },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeProperties {
    pub shape_background_fill: ShapeBackgroundFill,
    pub outline: Outline,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeBackgroundFill {
    pub solid_fill: SolidFill,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SolidFill {
    pub color: OpaqueColor,
    pub alpha: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Outline {
    pub property_state: PropertyState,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PropertyState {
    NotRendered,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableColumnProperties {
    pub column_width: Dimension,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableCellLocation {
    pub row_index: u32,
    pub column_index: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TextRange {
    #[serde(rename = "type")]
    pub kind: RangeType,
}

impl TextRange {
    pub fn all() -> Self {
        Self {
            kind: RangeType::All,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RangeType {
    All,
}

/// Character styling. Only the fields that are set are sent, and the
/// field mask names exactly those.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bold: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<Dimension>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub foreground_color: Option<OptionalColor>,
}

impl TextStyle {
    pub fn field_mask(&self) -> String {
        [
            self.bold.map(|_| "bold"),
            self.font_size.map(|_| "fontSize"),
            self.foreground_color.map(|_| "foregroundColor"),
        ]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(",")
    }
}
