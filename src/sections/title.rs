use crate::deck::{
    corner_accent, gradient_background, Alignment, Corner, Deck, Frame, Shape, ShapeKind,
    Slide, TextBox, TextStyle,
};
use crate::pagination::Section;
use crate::sections::BuildContext;

/// The opening slide: lesson title over the theme background, with the content type and
/// difficulty as subtitle. It carries no footer.
pub fn build(deck: &mut Deck, context: &BuildContext) -> usize {
    let palette = context.palette();
    let slide = deck.add_slide(Section::Title);

    draw_backdrop(slide, context);

    slide.add_text_box(
        TextBox::new(
            Frame::new(0.5, 1.5, 9.0, 1.5),
            context.presentation_title(),
            TextStyle::new(48.0, palette.text_light)
                .bold()
                .aligned(Alignment::Center),
        )
        .with_shadow(),
    );

    let subtitle = format!(
        "{} | {}",
        context.labels.content_type_name(context.lesson.content_type),
        context.labels.difficulty_name(context.lesson.difficulty_level)
    );
    let line_y = 3.2;
    slide.add_shape(Shape::filled(
        ShapeKind::Rectangle,
        Frame::new(3.5, line_y, 3.0, 0.02),
        palette.accent2,
    ));
    slide.add_text_box(TextBox::new(
        Frame::new(0.5, line_y + 0.2, 9.0, 0.5),
        subtitle,
        TextStyle::new(28.0, palette.text_light)
            .italic()
            .aligned(Alignment::Center),
    ));

    1
}

/// The full-bleed background and corner accents shared by the opening and closing slides.
pub(crate) fn draw_backdrop(slide: &mut Slide, context: &BuildContext) {
    let geometry = context.geometry();
    let theme = context.theme();
    let palette = context.palette();

    if theme.use_gradients {
        slide.add_shape(gradient_background(
            geometry,
            palette.gradient_start,
            palette.gradient_end,
            135.0,
        ));
    } else {
        slide.add_shape(Shape::filled(
            ShapeKind::Rectangle,
            Frame::new(0.0, 0.0, geometry.slide_width, geometry.slide_height),
            palette.primary_dark,
        ));
    }
    if theme.corner_accent {
        slide.add_shape(corner_accent(geometry, palette.accent1, 2.0, Corner::TopRight));
        slide.add_shape(corner_accent(geometry, palette.accent2, 1.5, Corner::BottomLeft));
    }
}

#[cfg(test)]
mod tests {
    use crate::lesson::{ContentType, DifficultyLevel, Lesson};
    use crate::pagination::Section;
    use crate::sections::test_support::build_section;

    #[test]
    fn title_slide_shows_the_lesson_kind() {
        let lesson = Lesson {
            title: "Photosynthesis".into(),
            content_type: ContentType::Workshop,
            difficulty_level: DifficultyLevel::Advanced,
            ..Lesson::default()
        };
        let (deck, emitted) = build_section(&lesson, Section::Title);

        assert_eq!(emitted, 1);
        assert_eq!(
            deck.slides()[0].text_content(),
            vec!["Photosynthesis", "Workshop | Advanced Level"]
        );
        assert_eq!(deck.slides()[0].page_number(), None);
    }
}
