//! Deck: the subset of the Slides `Presentation` resource the reviewer reads.
//!
//! A snapshot is a point-in-time read. Inserting a slide changes every
//! later slide's position, so callers re-fetch instead of reusing one.

use serde::{Deserialize, Serialize};

/// A full read of the target presentation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Presentation {
    #[serde(default)]
    pub presentation_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Slides in deck order.
    #[serde(default)]
    pub slides: Vec<Slide>,
}

/// One slide and the elements drawn on it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slide {
    pub object_id: String,

    #[serde(default)]
    pub page_elements: Vec<PageElement>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slide_properties: Option<SlideProperties>,
}

impl Slide {
    /// The notes page attached to this slide, if the deck exposes one.
    pub fn notes_page(&self) -> Option<&NotesPage> {
        self.slide_properties.as_ref()?.notes_page.as_ref()
    }

    /// Object id of the shape holding this slide's speaker notes.
    pub fn speaker_notes_object_id(&self) -> Option<&str> {
        self.notes_page()?
            .notes_properties
            .as_ref()?
            .speaker_notes_object_id
            .as_deref()
    }

    /// Whether the speaker notes shape already carries visible text.
    ///
    /// A notes shape with no text body, or one we can't find, counts as empty.
    pub fn has_speaker_notes_text(&self) -> bool {
        let (Some(page), Some(id)) = (self.notes_page(), self.speaker_notes_object_id()) else {
            return false;
        };
        page.page_elements
            .iter()
            .find(|e| e.object_id == id)
            .and_then(|e| e.shape.as_ref())
            .is_some_and(|s| !s.plain_text().is_empty())
    }

    /// Resolve a human title for the slide.
    ///
    /// Prefers the first title placeholder with text, then the first line of
    /// any text-bearing shape. Returns `None` when the slide has no text at all.
    pub fn title(&self) -> Option<String> {
        let shapes = || self.page_elements.iter().filter_map(|e| e.shape.as_ref());

        let placeholder_title = shapes()
            .filter(|s| s.is_title_placeholder())
            .map(Shape::plain_text)
            .find(|t| !t.is_empty());
        if placeholder_title.is_some() {
            return placeholder_title;
        }

        shapes()
            .map(Shape::plain_text)
            .find(|t| !t.is_empty())
            .and_then(|t| t.lines().next().map(|l| l.trim().to_string()))
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlideProperties {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes_page: Option<NotesPage>,
}

/// The notes page behind a slide. Speaker notes live in one of its shapes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotesPage {
    #[serde(default)]
    pub object_id: String,

    #[serde(default)]
    pub page_elements: Vec<PageElement>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes_properties: Option<NotesProperties>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotesProperties {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speaker_notes_object_id: Option<String>,
}

/// A visual element on a page. Only shapes matter here; tables, images,
/// and lines deserialize with `shape: None`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageElement {
    pub object_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shape: Option<Shape>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shape {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<Placeholder>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<TextContent>,
}

impl Shape {
    /// Concatenated text runs, trimmed.
    pub fn plain_text(&self) -> String {
        let Some(text) = &self.text else {
            return String::new();
        };
        text.text_elements
            .iter()
            .filter_map(|e| e.text_run.as_ref()?.content.as_deref())
            .collect::<String>()
            .trim()
            .to_string()
    }

    fn is_title_placeholder(&self) -> bool {
        self.placeholder
            .as_ref()
            .and_then(|p| p.kind.as_deref())
            .is_some_and(|k| matches!(k, "TITLE" | "CENTERED_TITLE"))
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Placeholder {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextContent {
    #[serde(default)]
    pub text_elements: Vec<TextElement>,
}

/// One element of a text body. Paragraph markers and auto-text carry no run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextElement {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_run: Option<TextRun>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TextRun {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl TextContent {
    /// A text body holding a single run.
    #[cfg(test)]
    pub fn from_run(content: impl Into<String>) -> Self {
        Self {
            text_elements: vec![TextElement {
                text_run: Some(TextRun {
                    content: Some(content.into()),
                }),
            }],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_shape(text: &str, placeholder: Option<&str>) -> PageElement {
        PageElement {
            object_id: format!("shape_{text}"),
            shape: Some(Shape {
                placeholder: placeholder.map(|k| Placeholder {
                    kind: Some(k.to_string()),
                }),
                text: Some(TextContent::from_run(text)),
            }),
        }
    }

    #[test]
    fn title_prefers_title_placeholder() {
        let slide = Slide {
            object_id: "s1".into(),
            page_elements: vec![
                text_shape("Body copy", Some("BODY")),
                text_shape("Market Overview\n", Some("TITLE")),
            ],
            slide_properties: None,
        };

        assert_eq!(slide.title().as_deref(), Some("Market Overview"));
    }

    #[test]
    fn title_accepts_centered_title() {
        let slide = Slide {
            object_id: "s1".into(),
            page_elements: vec![text_shape("Cover", Some("CENTERED_TITLE"))],
            slide_properties: None,
        };

        assert_eq!(slide.title().as_deref(), Some("Cover"));
    }

    #[test]
    fn title_falls_back_to_first_line_of_any_shape() {
        let slide = Slide {
            object_id: "s1".into(),
            page_elements: vec![
                text_shape("", Some("TITLE")),
                text_shape("First line\nSecond line", None),
            ],
            slide_properties: None,
        };

        assert_eq!(slide.title().as_deref(), Some("First line"));
    }

    #[test]
    fn title_is_none_without_text() {
        let slide = Slide {
            object_id: "s1".into(),
            page_elements: vec![PageElement {
                object_id: "img".into(),
                shape: None,
            }],
            slide_properties: None,
        };

        assert!(slide.title().is_none());
    }

    #[test]
    fn deserializes_slides_api_shape() {
        let json = r#"{
            "presentationId": "deck1",
            "title": "Pitch",
            "slides": [{
                "objectId": "p1",
                "pageElements": [{
                    "objectId": "t1",
                    "shape": {
                        "placeholder": {"type": "TITLE"},
                        "text": {"textElements": [
                            {"paragraphMarker": {}},
                            {"textRun": {"content": "Hello\n", "style": {}}}
                        ]}
                    }
                }, {
                    "objectId": "tbl",
                    "table": {"rows": 2, "columns": 2}
                }],
                "slideProperties": {
                    "notesPage": {
                        "objectId": "p1_notes",
                        "pageElements": [{
                            "objectId": "p1_speaker",
                            "shape": {"text": {"textElements": [
                                {"textRun": {"content": "old notes\n"}}
                            ]}}
                        }],
                        "notesProperties": {"speakerNotesObjectId": "p1_speaker"}
                    }
                }
            }]
        }"#;

        let deck: Presentation = serde_json::from_str(json).unwrap();

        assert_eq!(deck.title.as_deref(), Some("Pitch"));
        let slide = &deck.slides[0];
        assert_eq!(slide.title().as_deref(), Some("Hello"));
        assert_eq!(slide.speaker_notes_object_id(), Some("p1_speaker"));
        assert!(slide.has_speaker_notes_text());
        assert!(slide.page_elements[1].shape.is_none());
    }

    #[test]
    fn empty_notes_shape_has_no_text() {
        let slide = Slide {
            object_id: "s1".into(),
            page_elements: vec![],
            slide_properties: Some(SlideProperties {
                notes_page: Some(NotesPage {
                    object_id: "n1".into(),
                    page_elements: vec![PageElement {
                        object_id: "n1_speaker".into(),
                        shape: Some(Shape::default()),
                    }],
                    notes_properties: Some(NotesProperties {
                        speaker_notes_object_id: Some("n1_speaker".into()),
                    }),
                }),
            }),
        };

        assert!(!slide.has_speaker_notes_text());
    }
}
