use lessondeck::{
    build_deck,
    configuration::DeckConfiguration,
    count_total_slides,
    deck::Deck,
    lesson::{
        Activity, AssessmentIdea, ContentItem, ContentSlide, FurtherReading, KeyTerm, Lesson,
        Question,
    },
    localization::Language,
    pagination::Section,
    pdf::{encode_win_ansi, render_deck},
    SlidePlan,
};
use rand::{distributions::Alphanumeric, rngs::StdRng, Rng, SeedableRng as _};
use std::ops::Range;

mod common;

struct RandomLessonConfiguration {
    lessons_to_generate: u64,
    list_length_range: Range<usize>,
    maximum_words: usize,
    maximum_word_length: usize,
    non_ascii_probability: f64,
}

const CONFIGURATION: RandomLessonConfiguration = RandomLessonConfiguration {
    lessons_to_generate: 120,
    list_length_range: 0..9,
    maximum_words: 60,
    maximum_word_length: 12,
    non_ascii_probability: 0.3,
};

/// Typography that is common in lessons and has a WinAnsi code.
const TYPOGRAPHIC_CHARACTERS: [char; 9] = ['“', '”', '‘', '’', '–', '—', '…', '€', '•'];

fn random_character(rng: &mut StdRng) -> char {
    if !rng.gen_bool(CONFIGURATION.non_ascii_probability) {
        return char::from(rng.sample(Alphanumeric));
    }
    match rng.gen_range(0..3) {
        // Latin-1 letters and symbols, past the no-break space
        0 => rng.gen_range('\u{A1}'..='\u{FF}'),
        1 => TYPOGRAPHIC_CHARACTERS[rng.gen_range(0..TYPOGRAPHIC_CHARACTERS.len())],
        // CJK ideographs, which the standard fonts cannot show
        _ => rng.gen_range('\u{4E00}'..='\u{4E40}'),
    }
}

fn random_word(rng: &mut StdRng) -> String {
    let length = rng.gen_range(1..=CONFIGURATION.maximum_word_length);
    (0..length).map(|_| random_character(rng)).collect()
}

fn random_text(rng: &mut StdRng) -> String {
    let words = rng.gen_range(0..CONFIGURATION.maximum_words);
    (0..words)
        .map(|_| random_word(rng))
        .collect::<Vec<_>>()
        .join(" ")
}

fn random_list<T>(rng: &mut StdRng, mut generate: impl FnMut(&mut StdRng) -> T) -> Vec<T> {
    let length = rng.gen_range(CONFIGURATION.list_length_range.clone());
    (0..length).map(|_| generate(rng)).collect()
}

fn random_description(rng: &mut StdRng) -> String {
    let mut description = random_text(rng);
    if rng.gen_bool(0.2) {
        description.push_str(" Learning Objective: ");
        description.push_str(&random_text(rng));
    }
    if rng.gen_bool(0.35) {
        let marker = ["Facilitation notes:", "Facilitator guidance:", "Catatan fasilitasi:"]
            [rng.gen_range(0..3)];
        description.push(' ');
        description.push_str(marker);
        description.push(' ');
        // Long notes make the summary spill over onto continuation slides
        let repetitions = rng.gen_range(1..6);
        for _ in 0..repetitions {
            description.push_str(&random_text(rng));
            description.push(' ');
        }
    }
    description
}

fn random_question(rng: &mut StdRng) -> Question {
    Question {
        question: random_text(rng),
        options: if rng.gen_bool(0.7) {
            random_list(rng, random_word)
        } else {
            Vec::new()
        },
        correct_answer: if rng.gen_bool(0.5) {
            random_text(rng)
        } else {
            String::new()
        },
        explanation: random_text(rng),
    }
}

fn random_lesson(rng: &mut StdRng) -> Lesson {
    let idea_types = ["Quiz", "Discussion", "Quiz and discussion", "Reflection", "quiz"];
    Lesson {
        title: random_text(rng),
        slides: random_list(rng, |rng| ContentSlide {
            title: format!("Slide {}: {}", rng.gen_range(1..20), random_word(rng)),
            content: random_list(rng, |rng| {
                let prefix = ["", "• ", "- ", "  ", "* "][rng.gen_range(0..5)];
                ContentItem::Text(format!("{}{}", prefix, random_text(rng)))
            }),
            notes: random_text(rng),
        }),
        activities: random_list(rng, |rng| Activity {
            title: random_text(rng),
            description: random_description(rng),
            activity_type: random_word(rng),
            duration: format!("{} minutes", rng.gen_range(5..60)),
            instructions: random_list(rng, random_text),
            materials: random_list(rng, random_word),
        }),
        assessment_ideas: random_list(rng, |rng| AssessmentIdea {
            idea_type: idea_types[rng.gen_range(0..idea_types.len())].to_string(),
            example_questions: random_list(rng, random_question),
        }),
        key_terms: random_list(rng, |rng| KeyTerm {
            term: random_word(rng),
            definition: random_text(rng),
        }),
        further_readings: random_list(rng, |rng| FurtherReading {
            title: random_text(rng),
            author: random_word(rng),
            reading_description: random_text(rng),
        }),
        learning_outcomes: random_list(rng, random_text),
        ..Lesson::default()
    }
}

/// Checks the numbering of a deck against its plan and returns the number of facilitation
/// continuation slides.
fn check_numbering(lesson: &Lesson, deck: &Deck) -> usize {
    let plan = SlidePlan::new(
        lesson,
        Language::En.labels(),
        &DeckConfiguration::default().geometry,
    );
    let facilitation_slides = deck
        .slides()
        .iter()
        .filter(|slide| slide.section() == Section::Facilitation)
        .count();
    assert!(facilitation_slides >= plan.slide_count(Section::Facilitation));
    let overflow_slides = facilitation_slides - plan.slide_count(Section::Facilitation);

    let skipped_slides = usize::from(lesson.slides.len() >= 2);
    assert_eq!(
        deck.len(),
        plan.counted_total() - skipped_slides + overflow_slides
    );
    assert_eq!(deck.len(), plan.rendered_total() + overflow_slides);
    assert_eq!(count_total_slides(lesson), plan.counted_total());

    for (index, slide) in deck.slides().iter().enumerate() {
        match slide.section() {
            Section::Title => assert_eq!(slide.page_number(), None),
            // The closing slide does not account for the continuation slides
            Section::Closing => {
                assert_eq!(slide.page_number(), Some(index + 1 - overflow_slides));
                assert_eq!(slide.page_number(), Some(plan.first_page(Section::Closing)));
            }
            _ => assert_eq!(slide.page_number(), Some(index + 1), "slide {}", index),
        }
    }
    overflow_slides
}

#[test]
fn random_lessons_are_numbered_consistently() {
    let mut lessons_with_overflow = 0;
    for seed in 0..CONFIGURATION.lessons_to_generate {
        let mut rng = StdRng::seed_from_u64(seed);
        let lesson = random_lesson(&mut rng);
        let deck = build_deck(&lesson, Language::En, &DeckConfiguration::default())
            .unwrap_or_else(|error| panic!("Lesson {} failed to build: {}", seed, error));

        if check_numbering(&lesson, &deck) > 0 {
            lessons_with_overflow += 1;
        }
    }
    log::info!(
        "{} random lessons spilled the facilitation summary",
        lessons_with_overflow
    );
}

#[test]
fn random_lessons_build_identically_twice() {
    let configuration = DeckConfiguration {
        creation_timestamp: Some(1_700_000_000),
        ..DeckConfiguration::default()
    };
    for seed in 0..CONFIGURATION.lessons_to_generate / 4 {
        let mut rng = StdRng::seed_from_u64(seed);
        let lesson = random_lesson(&mut rng);

        let first = build_deck(&lesson, Language::Id, &configuration).unwrap();
        let second = build_deck(&lesson, Language::Id, &configuration).unwrap();
        assert_eq!(first, second);

        let first_bytes = render_deck(&first, &configuration)
            .unwrap()
            .save_to_bytes()
            .unwrap();
        let second_bytes = render_deck(&second, &configuration)
            .unwrap()
            .save_to_bytes()
            .unwrap();
        assert!(first_bytes == second_bytes, "Lesson {} rendered differently", seed);
    }
}

#[test]
fn random_lessons_survive_a_json_round_trip() {
    for seed in 0..CONFIGURATION.lessons_to_generate / 4 {
        let mut rng = StdRng::seed_from_u64(seed);
        let lesson = random_lesson(&mut rng);

        let lesson_json = serde_json::to_string(&lesson).unwrap();
        let reloaded = Lesson::from_json_str(&lesson_json).unwrap();
        assert_eq!(count_total_slides(&reloaded), count_total_slides(&lesson));
    }
}

/// The characters of the text as the PDF shows them, whitespace aside, sorted.
fn shown_characters<'a>(texts: impl Iterator<Item = &'a String>) -> Vec<char> {
    let mut characters: Vec<char> = texts
        .flat_map(|text| text.chars())
        .filter(|character| !character.is_whitespace())
        .collect();
    characters.sort_unstable();
    characters
}

#[test]
fn random_lessons_show_their_text_in_the_pdf() {
    let configuration = DeckConfiguration {
        creation_timestamp: Some(1_700_000_000),
        ..DeckConfiguration::default()
    };
    for seed in 0..CONFIGURATION.lessons_to_generate / 4 {
        let mut rng = StdRng::seed_from_u64(seed);
        let lesson = random_lesson(&mut rng);
        let deck = build_deck(&lesson, Language::En, &configuration).unwrap();
        let pdf_bytes = render_deck(&deck, &configuration)
            .unwrap()
            .save_to_bytes()
            .unwrap();
        let pages = common::shown_text_per_page(&pdf_bytes);
        assert_eq!(pages.len(), deck.len());

        for (index, (slide, page)) in deck.slides().iter().zip(&pages).enumerate() {
            // Each character is either shown as is or replaced by a single '?'
            let expected: Vec<String> = slide
                .text_content()
                .iter()
                .map(|text| {
                    text.chars()
                        .filter(|character| !character.is_whitespace())
                        .map(|character| {
                            let encoded = encode_win_ansi(&character.to_string());
                            if encoded == [b'?'] {
                                '?'
                            } else {
                                character
                            }
                        })
                        .collect()
                })
                .collect();
            similar_asserts::assert_eq!(
                shown_characters(page.iter()),
                shown_characters(expected.iter()),
                "lesson {} slide {}",
                seed,
                index
            );
        }

        let all_shown: String = pages.iter().flatten().cloned().collect();
        for character in lesson.title.chars() {
            if character != '?' && encode_win_ansi(&character.to_string()) != [b'?'] {
                assert!(
                    character.is_whitespace() || all_shown.contains(character),
                    "lesson {} lost {:?}",
                    seed,
                    character
                );
            }
        }
    }
}
