//! Lessondeck turns a structured lesson, given as a JSON document, into a paginated slide deck
//! which is saved as a PDF document.
//!
//! Every slide carries a page number in its footer and the agenda refers to sections by the page
//! they start on, so the numbering is decided once, ahead of drawing, by the `SlidePlan` of the
//! `pagination` module. The section builders then only place their content, each of them starting
//! on the page the plan assigned to it.

/// This module contains the `ContextError` type which is the error type used throughout this library.
///
/// Every error carries a context describing what failed, the optional message of the error which
/// caused it and an `ErrorKind` so that callers can tell a rejected output path apart from an
/// invalid lesson or a failed write.
pub mod error;

/// The deck configuration: slide geometry, theme and palette, and the output directory policy.
/// It can be loaded from a JSON file and every one of its fields has a default.
pub mod configuration;

/// The labels of the generated headings and captions, in every supported language.
pub mod localization;

/// The lesson input model.
///
/// Lessons are read from JSON documents which are first validated structurally, then deserialized
/// with defaults for every missing field and finally normalized to the NFC form.
pub mod lesson;

/// Text utilities: title cleanup, detection of the facilitation and learning objective markers,
/// bullet level detection, text height estimation and word wrapping.
pub mod text;

/// Counting and planning of the slides.
///
/// # Introduction
///
/// The entry point of this module is the `SlidePlan` struct, which records how many slides every
/// section renders and the page number each of them starts on. The agenda is laid out by the same
/// greedy planner that counts its slides, so that the two can never disagree.
pub mod pagination;

/// The in-memory deck: slides made of text boxes, shapes and tables positioned in inches.
///
/// The deck is the contract between the section builders and the drawing backend. The cosmetic
/// effects the backend does not support are downgraded when the elements are inserted.
pub mod deck;

/// One builder per slide type, they run in the fixed order of the sections.
pub mod sections;

/// The assembly of the deck and the external entry points, which check the output path before
/// anything is rendered.
pub mod builder;

/// The module were the `PdfDocument` interface for working with PDF documents is presented.
///
/// # Introduction
///
/// The main component of this module is the struct `PdfDocument`, which offers convenience functions
/// such as `add_page_with_layer`, `write_text_to_layer_in_page`, `draw_path_to_layer_in_page`,
/// `write_all` and `save_to_bytes`. The function `render_deck` converts a whole deck into a document,
/// one page per slide, using the standard Helvetica fonts so that no font needs to be embedded.
pub mod pdf;

pub use builder::{build_deck, create_presentation, create_presentation_from_path};
pub use pagination::{count_total_slides, SlidePlan};
