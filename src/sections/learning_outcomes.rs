use crate::deck::{
    add_title_band, Deck, Frame, Shape, ShapeKind, TextBox, TextStyle, VerticalAnchor,
};
use crate::pagination::Section;
use crate::sections::BuildContext;
use crate::text::strip_outcome_numbering;

pub fn build(deck: &mut Deck, context: &BuildContext) -> usize {
    let geometry = context.geometry();
    let palette = context.palette();
    let slide = deck.add_slide(Section::LearningOutcomes);

    add_title_band(
        slide,
        geometry,
        palette,
        palette.primary,
        context.labels.learning_outcomes,
        36.0,
    );
    slide.add_text_box(TextBox::new(
        Frame::new(0.5, 1.0, 9.0, 0.5),
        context.labels.by_the_end(context.lesson.content_type),
        TextStyle::new(20.0, palette.dark).italic(),
    ));
    slide.add_shape(
        Shape::filled(
            ShapeKind::RoundedRectangle,
            Frame::new(0.3, 1.7, 9.4, 3.0),
            palette.light,
        )
        .with_opacity(0.9)
        .with_outline(palette.primary_light, 1.0),
    );

    let marker_colors = [palette.emerald, palette.medium_purple, palette.emerald];
    let mut y = 2.0;
    for (index, outcome) in context.lesson.learning_outcomes.iter().enumerate() {
        slide.add_shape(Shape::filled(
            ShapeKind::Rectangle,
            Frame::new(0.7, y, 0.15, 0.15),
            marker_colors[index % marker_colors.len()],
        ));
        slide.add_text_box(
            TextBox::new(
                Frame::new(1.0, y - 0.125, 8.5, 0.4),
                strip_outcome_numbering(outcome),
                TextStyle::new(20.0, palette.text),
            )
            .anchored(VerticalAnchor::Middle),
        );
        y += 0.6;
    }

    context.add_footer(slide, context.page_number(Section::LearningOutcomes, 0));
    1
}

#[cfg(test)]
mod tests {
    use crate::lesson::Lesson;
    use crate::pagination::Section;
    use crate::sections::test_support::build_section;

    #[test]
    fn outcomes_lose_their_enumeration() {
        let lesson = Lesson {
            learning_outcomes: vec!["1. Explain osmosis".into(), "Draw a cell".into()],
            ..Lesson::default()
        };
        let (deck, emitted) = build_section(&lesson, Section::LearningOutcomes);

        assert_eq!(emitted, 1);
        let texts = deck.slides()[0].text_content();
        assert_eq!(texts[1], "By the end of this lecture, you will be able to:");
        assert_eq!(texts[2], "Explain osmosis");
        assert_eq!(texts[3], "Draw a cell");
        assert_eq!(deck.slides()[0].page_number(), Some(3));
    }
}
