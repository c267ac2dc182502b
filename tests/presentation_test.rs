use lessondeck::{
    build_deck,
    configuration::{DeckConfiguration, OutputPolicy},
    create_presentation, create_presentation_from_path,
    error::ErrorKind,
    lesson::Lesson,
    localization::Language,
    pdf::render_deck,
};
use std::path::{Path, PathBuf};

mod common;

fn fixture_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

/// A configuration writing under a fresh directory of the temp directory only.
fn sandboxed_configuration(test_name: &str) -> (DeckConfiguration, PathBuf) {
    let output_directory = std::env::temp_dir()
        .join("lessondeck-tests")
        .join(test_name);
    let _ = std::fs::remove_dir_all(&output_directory);
    let configuration = DeckConfiguration {
        output: OutputPolicy {
            output_directory: output_directory.clone(),
            allow_temp_directory: false,
        },
        creation_timestamp: Some(1_700_000_000),
        ..DeckConfiguration::default()
    };
    (configuration, output_directory)
}

#[test]
fn presentation_round_trips_through_a_pdf_reader() {
    let (configuration, output_directory) = sandboxed_configuration("round_trip");
    let lesson = Lesson::from_path(&fixture_path("photosynthesis.json")).unwrap();
    let deck = build_deck(&lesson, Language::En, &configuration).unwrap();

    let saved_path = create_presentation(
        &lesson,
        &output_directory.join("decks/photosynthesis.pdf"),
        Language::En,
        &configuration,
    )
    .unwrap();
    assert!(saved_path.ends_with("decks/photosynthesis.pdf"));

    let pdf_bytes = std::fs::read(&saved_path).unwrap();
    let document = lopdf::Document::load_mem(&pdf_bytes).unwrap();
    let pages = document.get_pages();
    assert_eq!(pages.len(), deck.len());

    let annotated_pages = pages
        .values()
        .filter(|page_id| {
            let page = document.get_dictionary(**page_id).unwrap();
            !page.get(b"Annots").unwrap().as_array().unwrap().is_empty()
        })
        .count();
    let slides_with_notes = deck
        .slides()
        .iter()
        .filter(|slide| slide.notes().is_some())
        .count();
    assert_eq!(annotated_pages, slides_with_notes);
    assert!(slides_with_notes >= 3);
}

#[test]
fn output_outside_the_allowed_directories_is_rejected_before_rendering() {
    let (configuration, output_directory) = sandboxed_configuration("rejected");

    for rejected_path in [
        output_directory.join("../escaped.pdf"),
        PathBuf::from("/etc/lessondeck.pdf"),
        output_directory.clone(),
    ] {
        let error = create_presentation_from_path(
            &fixture_path("photosynthesis.json"),
            &rejected_path,
            Language::En,
            &configuration,
        )
        .unwrap_err();
        assert_eq!(error.kind, ErrorKind::SecurityViolation);
        assert!(!rejected_path.is_file());
    }

    // The path is checked before the lesson is even read
    let error = create_presentation_from_path(
        Path::new("/nonexistent/lesson.json"),
        Path::new("/etc/lessondeck.pdf"),
        Language::En,
        &configuration,
    )
    .unwrap_err();
    assert!(error.is_security_violation());
}

#[test]
fn invalid_lessons_name_the_offending_field() {
    let (configuration, output_directory) = sandboxed_configuration("invalid");

    let error = create_presentation_from_path(
        &fixture_path("invalid_instructions.json"),
        &output_directory.join("broken.pdf"),
        Language::En,
        &configuration,
    )
    .unwrap_err();
    assert_eq!(error.kind, ErrorKind::ContentValidation);
    assert!(
        error.to_string().contains("activities[1].instructions"),
        "{}",
        error
    );
    assert!(!output_directory.join("broken.pdf").exists());
}

#[test]
fn missing_lessons_are_reported_as_io_errors() {
    let (configuration, output_directory) = sandboxed_configuration("missing");

    let error = create_presentation_from_path(
        &fixture_path("does_not_exist.json"),
        &output_directory.join("missing.pdf"),
        Language::En,
        &configuration,
    )
    .unwrap_err();
    assert_eq!(error.kind, ErrorKind::Io);
}

fn rendered_text(fixture: &str) -> Vec<Vec<String>> {
    let configuration = DeckConfiguration {
        creation_timestamp: Some(1_700_000_000),
        ..DeckConfiguration::default()
    };
    let lesson = Lesson::from_path(&fixture_path(fixture)).unwrap();
    let deck = build_deck(&lesson, Language::En, &configuration).unwrap();
    let pdf_bytes = render_deck(&deck, &configuration)
        .unwrap()
        .save_to_bytes()
        .unwrap();
    common::shown_text_per_page(&pdf_bytes)
}

#[test]
fn agenda_items_keep_their_bullet_in_the_pdf() {
    let pages = rendered_text("intro_to_x.json");
    let agenda = &pages[1];
    for expected in [
        "Introduction",
        "– Learning Outcomes",
        "– Key Terms & Concepts",
        "Main Content",
        "– Overview",
    ] {
        assert!(
            agenda.iter().any(|text| text == expected),
            "{:?} is missing from {:?}",
            expected,
            agenda
        );
    }

    let content = pages
        .iter()
        .find(|page| page.iter().any(|text| text == "Overview"))
        .unwrap();
    assert!(content.iter().any(|text| text == "Point A"), "{:?}", content);
    assert!(content.iter().any(|text| text == "– Sub B"), "{:?}", content);

    for text in pages.iter().flatten() {
        assert!(!text.contains('?'), "{:?} was not encodable", text);
    }
}

#[test]
fn typographic_characters_reach_the_pdf() {
    let pages = rendered_text("typography.json");
    let page_texts: Vec<String> = pages.iter().map(|page| page.join(" ")).collect();
    for expected in [
        "Café “culture” – basics",
        "Crème brûlée",
        "Caramel",
        "– Sugar…",
        "– Heat to 170 °C",
        "Name the “five” sauces",
    ] {
        assert!(
            page_texts.iter().any(|text| text.contains(expected)),
            "{:?} is missing from the rendered pages",
            expected
        );
    }
    for text in pages.iter().flatten() {
        assert!(!text.contains('?'), "{:?} was not encodable", text);
    }
}
