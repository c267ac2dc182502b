use crate::deck::{add_title_band, Deck, Frame, Shape, ShapeKind, Slide, TextBox, TextStyle};
use crate::pagination::Section;
use crate::sections::BuildContext;
use crate::text::{estimate_text_height, extract_facilitation_content};

const ENTRIES_START_Y: f64 = 1.2;
const NOTES_MIN_HEIGHT: f64 = 0.6;

/// An activity listed on the summary, with the notes pulled out of its description.
struct SummaryEntry<'a> {
    title: &'a str,
    notes: String,
}

impl SummaryEntry<'_> {
    fn notes_height(&self) -> f64 {
        estimate_text_height(&self.notes, 14.0, 8.3).max(NOTES_MIN_HEIGHT)
    }

    /// Title row, notes and the gap below them.
    fn height(&self) -> f64 {
        0.5 + self.notes_height() + 0.2
    }
}

/// Collects the facilitation notes of every activity on a summary slide. The summary spills over
/// onto continuation slides when the notes do not fit above the footer. Emits nothing unless an
/// activity description carries a facilitation marker.
pub fn build(deck: &mut Deck, context: &BuildContext) -> usize {
    if !context.plan.has_facilitation() {
        return 0;
    }
    let geometry = context.geometry();
    let palette = context.palette();
    let entries: Vec<SummaryEntry> = context
        .lesson
        .activities
        .iter()
        .filter_map(|activity| {
            let notes = extract_facilitation_content(&activity.description);
            notes.has_facilitation_marker.then(|| SummaryEntry {
                title: activity.title.as_str(),
                notes: notes.facilitation_notes,
            })
        })
        .collect();

    let bottom_limit = geometry.footer_y - 0.5;
    let mut emitted = 0;
    let mut slide = start_page(deck, context, emitted);
    let mut y = ENTRIES_START_Y;
    let mut entries_on_page = 0;

    for (entry_index, entry) in entries.iter().enumerate() {
        if entries_on_page > 0 && y + entry.height() > bottom_limit {
            slide.add_text_box(TextBox::new(
                Frame::new(0.9, (y - 0.3).min(bottom_limit), 8.3, 0.3),
                context.labels.continued_next_slide,
                TextStyle::new(12.0, palette.text_muted).italic(),
            ));
            context.add_footer(slide, context.page_number(Section::Facilitation, emitted));
            emitted += 1;
            log::debug!(
                "Facilitation summary continues on page {}",
                context.page_number(Section::Facilitation, emitted)
            );
            slide = start_page(deck, context, emitted);
            y = ENTRIES_START_Y;
            entries_on_page = 0;
        }

        slide.add_shape(Shape::filled(
            ShapeKind::Rectangle,
            Frame::new(0.7, y, 0.1, 0.4),
            palette.activity_green,
        ));
        slide.add_text_box(TextBox::new(
            Frame::new(0.9, y, 8.3, 0.4),
            entry.title,
            TextStyle::new(18.0, palette.primary).bold(),
        ));
        y += 0.5;
        let notes_height = entry.notes_height();
        slide.add_text_box(TextBox::new(
            Frame::new(0.9, y, 8.3, notes_height),
            entry.notes.as_str(),
            TextStyle::new(14.0, palette.text),
        ));
        y += notes_height + 0.2;
        entries_on_page += 1;

        if entry_index + 1 < entries.len() {
            slide.add_shape(
                Shape::filled(
                    ShapeKind::Rectangle,
                    Frame::new(0.7, y, 8.5, 0.01),
                    palette.primary_light,
                )
                .with_opacity(0.5),
            );
            y += 0.3;
        }
    }

    context.add_footer(slide, context.page_number(Section::Facilitation, emitted));
    emitted + 1
}

/// Appends a summary slide with its title band and content box.
fn start_page<'d>(
    deck: &'d mut Deck,
    context: &BuildContext,
    page_index: usize,
) -> &'d mut Slide {
    let geometry = context.geometry();
    let palette = context.palette();
    let slide = deck.add_slide(Section::Facilitation);

    let mut title = context.labels.facilitation_notes_summary.to_string();
    if page_index > 0 {
        title.push_str(context.labels.continued);
    }
    add_title_band(slide, geometry, palette, palette.primary, &title, 32.0);
    slide.add_shape(
        Shape::filled(
            ShapeKind::RoundedRectangle,
            Frame::new(0.5, 1.0, 9.0, geometry.footer_y - 1.2),
            palette.light_alt,
        )
        .with_outline(palette.primary_light, 1.0)
        .with_shadow(),
    );
    slide
}

#[cfg(test)]
mod tests {
    use crate::lesson::{Activity, Lesson};
    use crate::pagination::Section;
    use crate::sections::test_support::build_section;

    fn activity(title: &str, description: &str) -> Activity {
        Activity {
            title: title.into(),
            description: description.into(),
            activity_type: "Pairs".into(),
            duration: "5 minutes".into(),
            instructions: Vec::new(),
            materials: Vec::new(),
        }
    }

    #[test]
    fn summary_is_skipped_without_markers() {
        let lesson = Lesson {
            activities: vec![activity("Quiet", "No annotations here.")],
            ..Lesson::default()
        };
        let (deck, emitted) = build_section(&lesson, Section::Facilitation);

        assert_eq!(emitted, 0);
        assert!(deck.is_empty());
    }

    #[test]
    fn summary_lists_only_annotated_activities() {
        let lesson = Lesson {
            activities: vec![
                activity("Warm up", "Stretch. Facilitator notes: keep it light"),
                activity("Quiet", "No annotations here."),
                activity("Debate", "Argue. Facilitation Notes: split the room"),
            ],
            ..Lesson::default()
        };
        let (deck, emitted) = build_section(&lesson, Section::Facilitation);

        assert_eq!(emitted, 1);
        let texts = deck.slides()[0].text_content();
        assert_eq!(texts[0], "Facilitation Notes Summary");
        assert_eq!(
            &texts[1..5],
            &["Warm up", "keep it light", "Debate", "split the room"]
        );
        assert!(!texts.contains(&"Quiet".to_string()));
    }

    #[test]
    fn long_summaries_continue_on_extra_slides() {
        let notes = "note ".repeat(80);
        let lesson = Lesson {
            activities: (0..4)
                .map(|index| {
                    activity(
                        &format!("Activity {}", index),
                        &format!("Do it. Facilitation notes: {}", notes),
                    )
                })
                .collect(),
            ..Lesson::default()
        };
        let (deck, emitted) = build_section(&lesson, Section::Facilitation);

        assert!(emitted > 1);
        assert_eq!(deck.len(), emitted);
        let first_page = deck.slides()[0].page_number().unwrap();
        for (index, slide) in deck.slides().iter().enumerate() {
            let texts = slide.text_content();
            assert_eq!(slide.page_number(), Some(first_page + index));
            if index > 0 {
                assert_eq!(texts[0], "Facilitation Notes Summary (continued)");
            }
            let has_hint = texts.contains(&"Continued on next slide...".to_string());
            assert_eq!(has_hint, index + 1 < emitted);
        }

        let listed: usize = deck
            .slides()
            .iter()
            .map(|slide| {
                slide
                    .text_content()
                    .iter()
                    .filter(|text| text.starts_with("Activity "))
                    .count()
            })
            .sum();
        assert_eq!(listed, 4);
    }
}
