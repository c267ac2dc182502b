use std::path::{Component, Path, PathBuf};

use crate::configuration::DeckConfiguration;
use crate::deck::{Capabilities, Deck};
use crate::error::{ContextError, ErrorKind};
use crate::lesson::Lesson;
use crate::localization::Language;
use crate::pagination::{Section, SlidePlan};
use crate::pdf;
use crate::sections::{builder_for, BuildContext};

/// Builds the whole deck for the lesson, running the section builders in the rendering order.
///
/// Every section starts on the page the plan assigned to it. The facilitation summary is the
/// only section allowed to emit more slides than planned: its continuation slides are appended
/// after it and the closing slide keeps its planned number. The plan already charges the summary
/// one slide when a facilitation marker is present, so that is what pushes the closing number
/// out by one.
pub fn build_deck(
    lesson: &Lesson,
    language: Language,
    configuration: &DeckConfiguration,
) -> Result<Deck, ContextError> {
    build_deck_with(lesson, language, configuration, Capabilities::PDF)
}

/// Same as [`build_deck`], for a drawing backend with the given capabilities.
pub fn build_deck_with(
    lesson: &Lesson,
    language: Language,
    configuration: &DeckConfiguration,
    capabilities: Capabilities,
) -> Result<Deck, ContextError> {
    let labels = language.labels();
    let plan = SlidePlan::new(lesson, labels, &configuration.geometry);
    let context = BuildContext {
        lesson,
        labels,
        configuration,
        plan: &plan,
    };

    let mut deck = Deck::new(&configuration.geometry, capabilities);
    deck.title = context.presentation_title().to_string();
    let mut overflow_slides = 0;

    for section in Section::RENDERING_ORDER {
        debug_assert_eq!(
            deck.len() + 1,
            plan.first_page(section) + overflow_slides,
            "The section {:?} does not start on its planned page",
            section
        );
        let emitted = builder_for(section)(&mut deck, &context);
        let planned = plan.slide_count(section);

        if section == Section::Facilitation {
            debug_assert!(emitted >= planned, "The facilitation summary lost slides");
            overflow_slides += emitted.saturating_sub(planned);
        } else if emitted != planned {
            return Err(ContextError::render(format!(
                "The section {:?} emitted {} slides instead of the {} planned",
                section, emitted, planned
            )));
        }
        log::debug!(
            "Section {:?} emitted {} slides from page {}",
            section,
            emitted,
            plan.first_page(section)
        );
    }

    log::info!(
        "Built {} slides for {:?} ({} counted, {} facilitation overflow)",
        deck.len(),
        deck.title,
        plan.counted_total(),
        overflow_slides
    );
    Ok(deck)
}

/// Removes the `.` and `..` components of the path without touching the file system.
fn normalize_lexically(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => (),
            Component::ParentDir => {
                // Going above the root stays at the root
                if !normalized.pop() && !normalized.has_root() {
                    normalized.push(component);
                }
            }
            _ => normalized.push(component),
        }
    }
    normalized
}

/// Resolves the output path against the working directory and accepts it only when it lies
/// under one of the allowed output directories.
pub fn resolve_output_path(
    output_path: &Path,
    configuration: &DeckConfiguration,
) -> Result<PathBuf, ContextError> {
    let absolute_path = if output_path.is_absolute() {
        output_path.to_path_buf()
    } else {
        std::env::current_dir()
            .map_err(|error| {
                ContextError::with_error(
                    ErrorKind::Io,
                    "Failed to determine the working directory",
                    &error,
                )
            })?
            .join(output_path)
    };
    let resolved_path = normalize_lexically(&absolute_path);

    let is_allowed = configuration
        .allowed_output_roots()
        .iter()
        .map(|root| normalize_lexically(root))
        .any(|root| resolved_path.starts_with(&root) && resolved_path != root);
    if !is_allowed {
        log::warn!("Rejected the output path {:?}", output_path);
        return Err(ContextError::security(format!(
            "Output path {:?} must be in the allowed directories",
            output_path
        )));
    }

    Ok(resolved_path)
}

/// Renders the lesson to a PDF deck written at the output path, returning the path written to.
/// The output path is checked before anything is rendered.
pub fn create_presentation(
    lesson: &Lesson,
    output_path: &Path,
    language: Language,
    configuration: &DeckConfiguration,
) -> Result<PathBuf, ContextError> {
    let resolved_path = resolve_output_path(output_path, configuration)?;

    let deck = build_deck(lesson, language, configuration)?;
    let pdf_document = pdf::render_deck(&deck, configuration)?;
    let pdf_bytes = pdf_document.save_to_bytes()?;

    if let Some(parent_directory) = resolved_path.parent() {
        std::fs::create_dir_all(parent_directory).map_err(|error| {
            ContextError::with_error(
                ErrorKind::Io,
                format!("Failed to create the directory {:?}", parent_directory),
                &error,
            )
        })?;
    }
    std::fs::write(&resolved_path, pdf_bytes).map_err(|error| {
        ContextError::with_error(
            ErrorKind::Io,
            format!("Failed to write the presentation {:?}", resolved_path),
            &error,
        )
    })?;
    log::info!("Saved the presentation to the path: {:?}", resolved_path);

    Ok(resolved_path)
}

/// Reads the JSON lesson at `content_path` and renders it with [`create_presentation`].
pub fn create_presentation_from_path(
    content_path: &Path,
    output_path: &Path,
    language: Language,
    configuration: &DeckConfiguration,
) -> Result<PathBuf, ContextError> {
    // Rejecting the path first spares reading the lesson
    resolve_output_path(output_path, configuration)?;
    let lesson = Lesson::from_path(content_path)?;
    create_presentation(&lesson, output_path, language, configuration)
}
