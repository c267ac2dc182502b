use crate::deck::{add_title_band, Deck, Frame, Shape, ShapeKind, TextBox, TextStyle};
use crate::pagination::{Section, READINGS_PER_SLIDE};
use crate::sections::BuildContext;
use crate::text::estimate_text_height;

const DESCRIPTION_MIN_HEIGHT: f64 = 0.6;

/// The further readings, two per slide, each with its author and description.
pub fn build(deck: &mut Deck, context: &BuildContext) -> usize {
    let geometry = context.geometry();
    let palette = context.palette();
    let labels = context.labels;
    let mut emitted = 0;

    for (slide_index, readings) in context
        .lesson
        .further_readings
        .chunks(READINGS_PER_SLIDE)
        .enumerate()
    {
        let slide = deck.add_slide(Section::Readings);
        let mut title = labels.further_readings.to_string();
        if slide_index > 0 {
            title.push_str(labels.continued);
        }
        add_title_band(slide, geometry, palette, palette.primary, &title, 32.0);

        if context.theme().content_box_shadow {
            slide.add_shape(
                Shape::filled(
                    ShapeKind::RoundedRectangle,
                    Frame::new(0.3, 1.0, 9.4, geometry.footer_y - 1.2),
                    palette.light_alt,
                )
                .with_opacity(0.7)
                .with_outline(palette.primary_light, 1.0)
                .with_shadow(),
            );
        }

        let mut y = 1.2;
        for (reading_index, reading) in readings.iter().enumerate() {
            if reading_index > 0 {
                slide.add_shape(
                    Shape::filled(
                        ShapeKind::Rectangle,
                        Frame::new(0.7, y, 8.5, 0.01),
                        palette.primary_light,
                    )
                    .with_opacity(0.5),
                );
                y += 0.2;
            }

            let reading_title = non_empty_or(&reading.title, labels.untitled_reading);
            slide.add_shape(Shape::filled(
                ShapeKind::Rectangle,
                Frame::new(0.7, y, 0.1, 0.4),
                palette.primary,
            ));
            slide.add_text_box(TextBox::new(
                Frame::new(0.9, y, 8.3, 0.4),
                reading_title,
                TextStyle::new(20.0, palette.primary).bold(),
            ));
            y += 0.5;

            slide.add_text_box(TextBox::new(
                Frame::new(0.9, y, 8.3, 0.3),
                format!(
                    "{} {}",
                    labels.author,
                    non_empty_or(&reading.author, labels.unknown_author)
                ),
                TextStyle::new(16.0, palette.primary).italic(),
            ));
            y += 0.4;

            let description_height = estimate_text_height(&reading.reading_description, 16.0, 8.3)
                .max(DESCRIPTION_MIN_HEIGHT);
            slide.add_text_box(TextBox::new(
                Frame::new(0.9, y, 8.3, description_height),
                reading.reading_description.as_str(),
                TextStyle::new(16.0, palette.text),
            ));
            y += description_height + 0.2;
        }

        context.add_footer(slide, context.page_number(Section::Readings, slide_index));
        emitted += 1;
    }

    emitted
}

fn non_empty_or<'a>(text: &'a str, fallback: &'a str) -> &'a str {
    if text.trim().is_empty() {
        fallback
    } else {
        text
    }
}
