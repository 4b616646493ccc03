//! In-memory document session for workflow tests.
//!
//! Models just enough of the Slides service to observe a review run:
//! slide insertion, speaker-notes text, object-id bookkeeping, atomic
//! batches, and comments. Failures can be injected per call.

use std::{
    cell::{Cell, RefCell},
    collections::HashSet,
};

use crate::model::{
    NotesPage, NotesProperties, PageElement, Placeholder, Presentation, Request, Shape, Slide,
    SlideProperties, TextContent, TextElement, TextRun,
};

use super::{DocumentSession, RemoteComment, RemoteError};

pub struct FakeSession {
    deck: RefCell<Presentation>,
    batches: RefCell<Vec<Vec<Request>>>,
    comments: RefCell<Vec<String>>,
    fetches: Cell<usize>,
    batch_calls: Cell<usize>,
    comment_calls: Cell<usize>,
    fail_fetch: bool,
    fail_batch_at: Option<usize>,
    fail_comment_at: Option<usize>,
}

impl FakeSession {
    /// A deck of `count` titled slides, each with an empty notes shape.
    pub fn with_slides(count: usize) -> Self {
        let slides = (1..=count)
            .map(|n| {
                let id = format!("slide_{n}");
                let mut slide = blank_slide(&id);
                slide.page_elements.push(PageElement {
                    object_id: format!("{id}_title"),
                    shape: Some(Shape {
                        placeholder: Some(Placeholder {
                            kind: Some("TITLE".into()),
                        }),
                        text: Some(TextContent::from_run(format!("Slide {n} title\n"))),
                    }),
                });
                slide
            })
            .collect();

        Self {
            deck: RefCell::new(Presentation {
                presentation_id: "deck1".into(),
                title: Some("Demo deck".into()),
                slides,
            }),
            batches: RefCell::new(Vec::new()),
            comments: RefCell::new(Vec::new()),
            fetches: Cell::new(0),
            batch_calls: Cell::new(0),
            comment_calls: Cell::new(0),
            fail_fetch: false,
            fail_batch_at: None,
            fail_comment_at: None,
        }
    }

    /// Fail every `fetch_document` call.
    pub fn failing_fetch(mut self) -> Self {
        self.fail_fetch = true;
        self
    }

    /// Fail the `call`-th (0-based) `apply_batch` call.
    pub fn failing_batch(mut self, call: usize) -> Self {
        self.fail_batch_at = Some(call);
        self
    }

    /// Fail the `call`-th (0-based) `create_comment` call.
    pub fn failing_comment(mut self, call: usize) -> Self {
        self.fail_comment_at = Some(call);
        self
    }

    /// Clear the presentation title.
    pub fn untitled(self) -> Self {
        self.deck.borrow_mut().title = None;
        self
    }

    /// Remove the notes page from the slide at `index`.
    pub fn without_notes(self, index: usize) -> Self {
        self.deck.borrow_mut().slides[index].slide_properties = None;
        self
    }

    /// Replace one slide's speaker notes text.
    pub fn set_notes(&self, index: usize, text: &str) {
        let mut deck = self.deck.borrow_mut();
        if let Some(shape) = speaker_shape_mut(&mut deck.slides[index]) {
            shape.text = Some(TextContent::from_run(text));
        }
    }

    /// Current speaker notes text of the slide at deck `index`.
    pub fn notes_text(&self, index: usize) -> String {
        let deck = self.deck.borrow();
        let slide = &deck.slides[index];
        let Some(id) = slide.speaker_notes_object_id() else {
            return String::new();
        };
        slide
            .notes_page()
            .and_then(|p| p.page_elements.iter().find(|e| e.object_id == id))
            .and_then(|e| e.shape.as_ref())
            .map(Shape::plain_text)
            .unwrap_or_default()
    }

    pub fn deck(&self) -> Presentation {
        self.deck.borrow().clone()
    }

    pub fn comments(&self) -> Vec<String> {
        self.comments.borrow().clone()
    }

    pub fn batches(&self) -> Vec<Vec<Request>> {
        self.batches.borrow().clone()
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.get()
    }
}

impl DocumentSession for FakeSession {
    fn fetch_document(&self, presentation_id: &str) -> Result<Presentation, RemoteError> {
        self.fetches.set(self.fetches.get() + 1);
        if self.fail_fetch {
            return Err(RemoteError::new("The caller does not have permission"));
        }
        let deck = self.deck.borrow();
        if deck.presentation_id != presentation_id {
            return Err(RemoteError::new("Requested entity was not found."));
        }
        Ok(deck.clone())
    }

    fn apply_batch(&self, presentation_id: &str, requests: &[Request]) -> Result<(), RemoteError> {
        let call = self.batch_calls.get();
        self.batch_calls.set(call + 1);
        if self.fail_batch_at == Some(call) {
            return Err(RemoteError::new("Internal error encountered."));
        }
        if self.deck.borrow().presentation_id != presentation_id {
            return Err(RemoteError::new("Requested entity was not found."));
        }

        // Apply to a copy so a rejected batch leaves the deck untouched.
        let mut deck = self.deck.borrow().clone();
        let mut known = known_ids(&deck);

        for (i, request) in requests.iter().enumerate() {
            let id = request.object_id();
            if request.creates_object() {
                if !known.insert(id.to_string()) {
                    return Err(RemoteError::new(format!(
                        "Invalid requests[{i}]: The object ID ({id}) should be unique."
                    )));
                }
            } else if !known.contains(id) {
                return Err(RemoteError::new(format!(
                    "Invalid requests[{i}]: The object ({id}) could not be found."
                )));
            }
            apply(&mut deck, &mut known, request);
        }

        *self.deck.borrow_mut() = deck;
        self.batches.borrow_mut().push(requests.to_vec());
        Ok(())
    }

    fn create_comment(
        &self,
        presentation_id: &str,
        content: &str,
    ) -> Result<RemoteComment, RemoteError> {
        let call = self.comment_calls.get();
        self.comment_calls.set(call + 1);
        if self.fail_comment_at == Some(call) {
            return Err(RemoteError::new("Rate Limit Exceeded"));
        }
        if self.deck.borrow().presentation_id != presentation_id {
            return Err(RemoteError::new("File not found."));
        }

        self.comments.borrow_mut().push(content.to_string());
        Ok(RemoteComment {
            id: format!("comment_{call}"),
            content: content.to_string(),
            created_time: format!("2026-01-01T00:00:{call:02}Z"),
        })
    }
}

fn blank_slide(id: &str) -> Slide {
    let speaker_id = format!("{id}_speaker");
    Slide {
        object_id: id.to_string(),
        page_elements: Vec::new(),
        slide_properties: Some(SlideProperties {
            notes_page: Some(NotesPage {
                object_id: format!("{id}_notes"),
                page_elements: vec![PageElement {
                    object_id: speaker_id.clone(),
                    shape: Some(Shape::default()),
                }],
                notes_properties: Some(NotesProperties {
                    speaker_notes_object_id: Some(speaker_id),
                }),
            }),
        }),
    }
}

fn known_ids(deck: &Presentation) -> HashSet<String> {
    let mut ids = HashSet::new();
    for slide in &deck.slides {
        ids.insert(slide.object_id.clone());
        ids.extend(slide.page_elements.iter().map(|e| e.object_id.clone()));
        if let Some(page) = slide.notes_page() {
            ids.insert(page.object_id.clone());
            ids.extend(page.page_elements.iter().map(|e| e.object_id.clone()));
        }
    }
    ids
}

fn apply(deck: &mut Presentation, known: &mut HashSet<String>, request: &Request) {
    match request {
        Request::CreateSlide {
            object_id,
            insertion_index,
        } => {
            let slide = blank_slide(object_id);
            known.extend(known_ids(&Presentation {
                slides: vec![slide.clone()],
                ..Presentation::default()
            }));
            let at = (*insertion_index as usize).min(deck.slides.len());
            deck.slides.insert(at, slide);
        }
        Request::InsertText {
            object_id,
            cell_location: None,
            text,
            ..
        } => {
            if let Some(shape) = find_speaker_shape(deck, object_id) {
                let body = shape.text.get_or_insert_with(TextContent::default);
                body.text_elements.insert(
                    0,
                    TextElement {
                        text_run: Some(TextRun {
                            content: Some(text.clone()),
                        }),
                    },
                );
            }
        }
        Request::DeleteText { object_id, .. } => {
            if let Some(shape) = find_speaker_shape(deck, object_id) {
                shape.text = None;
            }
        }
        // Register decoration isn't modelled beyond id bookkeeping.
        _ => {}
    }
}

fn find_speaker_shape<'a>(deck: &'a mut Presentation, object_id: &str) -> Option<&'a mut Shape> {
    deck.slides
        .iter_mut()
        .find(|s| s.speaker_notes_object_id() == Some(object_id))
        .and_then(speaker_shape_mut)
}

fn speaker_shape_mut(slide: &mut Slide) -> Option<&mut Shape> {
    let id = slide.speaker_notes_object_id()?.to_string();
    slide
        .slide_properties
        .as_mut()?
        .notes_page
        .as_mut()?
        .page_elements
        .iter_mut()
        .find(|e| e.object_id == id)?
        .shape
        .as_mut()
}
