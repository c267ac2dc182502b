use crate::deck::{
    Alignment, Color, Deck, Frame, Paragraph, Shape, ShapeKind, Slide, TextBox, TextStyle,
    VerticalAnchor,
};
use crate::lesson::Activity;
use crate::pagination::Section;
use crate::sections::BuildContext;
use crate::text::{clean_title, extract_facilitation_content, ActivityNotes, TitleKeyword};

/// Every activity expands into a main slide with its instructions followed by a
/// materials slide. Both share the header, the badges and the notes.
pub fn build(deck: &mut Deck, context: &BuildContext) -> usize {
    let mut emitted = 0;

    for (activity_index, activity) in context.lesson.activities.iter().enumerate() {
        let notes = extract_facilitation_content(&activity.description);
        let heading = context.labels.activity(
            activity_index + 1,
            &clean_title(&activity.title, TitleKeyword::Activity),
        );

        let main_slide = deck.add_slide(Section::Activities);
        draw_activity_frame(main_slide, context, activity, &notes, &heading);
        draw_list(
            main_slide,
            context,
            context.labels.instructions,
            context.palette().activity_blue,
            activity
                .instructions
                .iter()
                .enumerate()
                .map(|(index, instruction)| format!("{}. {}", index + 1, instruction)),
        );
        context.add_footer(
            main_slide,
            context.page_number(Section::Activities, activity_index * 2),
        );

        let materials_slide = deck.add_slide(Section::Activities);
        let materials_heading = format!("{} {}", heading, context.labels.materials_suffix);
        draw_activity_frame(materials_slide, context, activity, &notes, &materials_heading);
        draw_list(
            materials_slide,
            context,
            context.labels.materials_needed,
            context.palette().activity_green,
            activity
                .materials
                .iter()
                .map(|material| format!("• {}", material)),
        );
        context.add_footer(
            materials_slide,
            context.page_number(Section::Activities, activity_index * 2 + 1),
        );

        emitted += 2;
    }

    emitted
}

/// The facilitation notes and learning objective combined for the notes channel.
fn combined_notes(notes: &ActivityNotes, context: &BuildContext) -> String {
    let mut parts = Vec::new();
    if !notes.facilitation_notes.is_empty() {
        parts.push(format!(
            "{} {}",
            context.labels.facilitation_notes_label, notes.facilitation_notes
        ));
    }
    if !notes.learning_objectives.is_empty() {
        parts.push(format!(
            "{} {}",
            context.labels.learning_objective_label, notes.learning_objectives
        ));
    }
    parts.join("\n\n")
}

fn draw_activity_frame(
    slide: &mut Slide,
    context: &BuildContext,
    activity: &Activity,
    notes: &ActivityNotes,
    heading: &str,
) {
    let geometry = context.geometry();
    let palette = context.palette();

    slide.add_shape(Shape::filled(
        ShapeKind::Rectangle,
        Frame::new(0.0, 0.0, geometry.slide_width, 0.8),
        palette.activity_blue,
    ));
    slide.add_text_box(TextBox::new(
        Frame::new(0.5, 0.07, 9.0, 0.6),
        heading,
        TextStyle::new(22.0, palette.text_light).bold(),
    ));

    slide.add_shape(Shape::filled(
        ShapeKind::RoundedRectangle,
        Frame::new(0.5, 0.9, 5.0, 0.5),
        palette.activity_purple,
    ));
    slide.add_text_box(
        TextBox::new(
            Frame::new(0.6, 0.9, 4.8, 0.5),
            format!(
                "{}: {} | {}: {}",
                context.labels.activity_type,
                activity.activity_type,
                context.labels.duration,
                activity.duration
            ),
            TextStyle::new(16.0, palette.text_light).italic(),
        )
        .anchored(VerticalAnchor::Middle),
    );

    slide.add_shape(
        Shape::filled(
            ShapeKind::RoundedRectangle,
            Frame::new(0.5, 1.5, 9.0, 3.5),
            palette.background,
        )
        .with_outline(palette.activity_purple, 1.0),
    );
    slide.add_text_box(TextBox::new(
        Frame::new(0.7, 1.7, 8.6, 0.6),
        notes.description.as_str(),
        TextStyle::new(20.0, palette.text),
    ));

    slide.set_notes(combined_notes(notes, context));
    if !notes.facilitation_notes.is_empty() {
        slide.add_shape(Shape::filled(
            ShapeKind::RoundedRectangle,
            Frame::new(8.5, 0.9, 1.0, 0.5),
            palette.activity_green,
        ));
        slide.add_text_box(TextBox::new(
            Frame::new(8.6, 0.95, 0.8, 0.4),
            context.labels.notes_available,
            TextStyle::new(12.0, palette.text_light)
                .bold()
                .aligned(Alignment::Center),
        ));
    }

    slide.add_shape(Shape::filled(
        ShapeKind::RightTriangle,
        Frame::new(0.0, geometry.slide_height - 1.5, 1.5, 1.5),
        palette.activity_orange,
    ));
}

fn draw_list<I>(
    slide: &mut Slide,
    context: &BuildContext,
    caption: &str,
    accent: Color,
    entries: I,
) where
    I: Iterator<Item = String>,
{
    let palette = context.palette();
    let list_y = 2.4;

    slide.add_shape(Shape::filled(
        ShapeKind::Rectangle,
        Frame::new(0.7, list_y + 0.1, 0.1, 2.0),
        accent,
    ));
    slide.add_text_box(TextBox::new(
        Frame::new(0.9, list_y, 8.3, 0.4),
        caption,
        TextStyle::new(22.0, palette.text).bold(),
    ));

    let paragraphs: Vec<Paragraph> = entries
        .map(|entry| Paragraph::new(entry, TextStyle::new(16.0, palette.text)))
        .collect();
    if !paragraphs.is_empty() {
        slide.add_text_box(TextBox::with_paragraphs(
            Frame::new(0.9, list_y + 0.5, 8.3, 1.5),
            paragraphs,
        ));
    }
}
