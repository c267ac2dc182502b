use crate::deck::{Alignment, Deck, Frame, Shape, ShapeKind, TextBox, TextStyle};
use crate::pagination::Section;
use crate::sections::title::draw_backdrop;
use crate::sections::BuildContext;

/// The final slide thanking the audience. Its number comes from the plan, which charges the
/// facilitation summary a single slide however many pages it actually spans.
pub fn build(deck: &mut Deck, context: &BuildContext) -> usize {
    let palette = context.palette();
    let slide = deck.add_slide(Section::Closing);

    draw_backdrop(slide, context);
    slide.add_text_box(
        TextBox::new(
            Frame::new(0.5, 1.5, 9.0, 1.5),
            context.labels.thank_you,
            TextStyle::new(48.0, palette.text_light)
                .bold()
                .aligned(Alignment::Center),
        )
        .with_shadow(),
    );

    let line_y = 3.2;
    slide.add_shape(Shape::filled(
        ShapeKind::Rectangle,
        Frame::new(3.5, line_y, 3.0, 0.02),
        palette.accent2,
    ));
    slide.add_text_box(TextBox::new(
        Frame::new(0.5, line_y + 0.2, 9.0, 0.5),
        format!(
            "{} {}",
            context.labels.presentation,
            context.presentation_title()
        ),
        TextStyle::new(28.0, palette.text_light)
            .italic()
            .aligned(Alignment::Center),
    ));

    context.add_footer(slide, context.page_number(Section::Closing, 0));
    1
}
