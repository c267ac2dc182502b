use crate::deck::{add_title_band, Deck, Frame, Paragraph, Shape, ShapeKind, TextBox, TextStyle};
use crate::pagination::{AgendaPlacement, Section, AGENDA_HEADER_HEIGHT, AGENDA_ITEM_HEIGHT};
use crate::sections::BuildContext;

/// Vertical position of the first agenda entry on every agenda slide.
const AGENDA_START_Y: f64 = 1.0;

/// Lays the agenda out exactly as planned: one slide per page of the agenda plan.
pub fn build(deck: &mut Deck, context: &BuildContext) -> usize {
    let geometry = context.geometry();
    let palette = context.palette();
    let sections = context.plan.agenda_sections();
    let pages = &context.plan.agenda().pages;

    for (page_index, page) in pages.iter().enumerate() {
        let slide = deck.add_slide(Section::Agenda);
        let mut title = context.labels.agenda.to_string();
        if page_index > 0 {
            title.push_str(&context.labels.agenda_continued(page_index + 1, pages.len()));
        }
        add_title_band(slide, geometry, palette, palette.primary, &title, 36.0);
        slide.add_shape(
            Shape::filled(
                ShapeKind::RoundedRectangle,
                Frame::new(0.3, 0.9, 9.4, geometry.footer_y - 1.1),
                palette.light,
            )
            .with_opacity(0.9)
            .with_outline(palette.primary_light, 1.0),
        );

        let mut y = AGENDA_START_Y;
        for placement in &page.placements {
            match *placement {
                AgendaPlacement::Header { section } => {
                    slide.add_text_box(TextBox::new(
                        Frame::new(0.7, y, 8.5, AGENDA_HEADER_HEIGHT),
                        sections[section].title.as_str(),
                        TextStyle::new(24.0, palette.primary).bold(),
                    ));
                    y += AGENDA_HEADER_HEIGHT;
                }
                AgendaPlacement::Item { section, item } => {
                    slide.add_text_box(TextBox::with_paragraphs(
                        Frame::new(1.0, y, 8.0, AGENDA_ITEM_HEIGHT),
                        vec![Paragraph::new(
                            sections[section].items[item].as_str(),
                            TextStyle::new(18.0, palette.text),
                        )
                        .bulleted(1)],
                    ));
                    y += AGENDA_ITEM_HEIGHT;
                }
            }
        }

        context.add_footer(slide, context.page_number(Section::Agenda, page_index));
    }

    pages.len()
}

#[cfg(test)]
mod tests {
    use crate::lesson::{ContentSlide, Lesson};
    use crate::pagination::Section;
    use crate::sections::test_support::build_section;

    #[test]
    fn long_agenda_is_continued() {
        let lesson = Lesson {
            slides: (1..=14)
                .map(|index| ContentSlide {
                    title: format!("Slide {}: Topic {}", index, index),
                    content: Vec::new(),
                    notes: String::new(),
                })
                .collect(),
            ..Lesson::default()
        };
        let (deck, emitted) = build_section(&lesson, Section::Agenda);

        assert_eq!(emitted, 2);
        let first_slide = deck.slides()[0].text_content();
        let second_slide = deck.slides()[1].text_content();
        assert_eq!(first_slide[0], "Agenda");
        assert_eq!(second_slide[0], "Agenda (continued 2/2)");
        assert_eq!(deck.page_numbers(), vec![Some(2), Some(3)]);

        // Items carry the literal sub level bullet, none is lost or repeated
        let topics: Vec<String> = first_slide
            .iter()
            .chain(second_slide.iter())
            .filter(|text| text.starts_with("– Topic"))
            .cloned()
            .collect();
        let expected: Vec<String> = (1..=14).map(|index| format!("– Topic {}", index)).collect();
        assert_eq!(topics, expected);
        assert!(!second_slide.contains(&"Main Content".to_string()));
    }
}
