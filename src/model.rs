//! Core data model for the slide reviewer.
//!
//! Three families of types: what we read from the deck, what we ask the
//! deck to do, and what we report back when the run is over.

mod deck;
mod request;
mod review;

pub use deck::Presentation;
#[cfg(test)]
pub use deck::{
    NotesPage, NotesProperties, PageElement, Placeholder, Shape, Slide, SlideProperties,
    TextContent, TextElement, TextRun,
};
pub use request::{
    Dimension, ElementProperties, OpaqueColor, Outline, PropertyState, Request, RgbColor,
    ShapeBackgroundFill, ShapeProperties, ShapeType, SolidFill, TableCellLocation,
    TableColumnProperties, TextRange, TextStyle,
};
pub use review::{
    CreatedComment, ErrorResult, ModeListing, ModeSummary, ReviewResult, SlideAction, Stage,
    Status, UpdatedSlide,
};
