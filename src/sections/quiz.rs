use crate::deck::{
    Alignment, Deck, Frame, Shape, ShapeKind, Slide, TextBox, TextStyle, VerticalAnchor,
};
use crate::lesson::Question;
use crate::pagination::Section;
use crate::sections::BuildContext;

const OPTIONS_PER_ROW: usize = 2;
const OPTION_WIDTH: f64 = 4.3;
const OPTION_GAP: f64 = 0.4;
const OPTIONS_START_Y: f64 = 2.2;
/// Vertical distance between two option rows when there is room for it.
const OPTION_ROW_PITCH: f64 = 1.4;

/// A question slide with the lettered options, followed by its answer slide.
pub fn build(deck: &mut Deck, context: &BuildContext) -> usize {
    let mut emitted = 0;

    for (question_index, question) in context.lesson.quiz_questions() {
        let question_slide = deck.add_slide(Section::Quiz);
        draw_question(question_slide, context, question_index, question);
        context.add_footer(question_slide, context.page_number(Section::Quiz, emitted));
        emitted += 1;

        let answer_slide = deck.add_slide(Section::Quiz);
        draw_answer(answer_slide, context, question_index, question);
        context.add_footer(answer_slide, context.page_number(Section::Quiz, emitted));
        emitted += 1;
    }

    emitted
}

/// The badge letter of the n-th option: A, B, C and so on, wrapping after Z.
fn option_letter(index: usize) -> char {
    (b'A' + (index % 26) as u8) as char
}

fn draw_question(
    slide: &mut Slide,
    context: &BuildContext,
    question_index: usize,
    question: &Question,
) {
    let geometry = context.geometry();
    let palette = context.palette();

    slide.add_shape(Shape::filled(
        ShapeKind::Rectangle,
        Frame::new(0.0, 0.0, geometry.slide_width, 1.0),
        palette.primary,
    ));
    slide.add_text_box(
        TextBox::new(
            Frame::new(0.5, 0.2, 9.0, 0.6),
            context.labels.quiz_question(question_index + 1),
            TextStyle::new(36.0, palette.text_light)
                .bold()
                .aligned(Alignment::Center),
        )
        .anchored(VerticalAnchor::Middle),
    );
    slide.add_shape(
        Shape::filled(
            ShapeKind::RoundedRectangle,
            Frame::new(0.5, 1.1, 9.0, 0.8),
            palette.light,
        )
        .with_outline(palette.light, 1.0),
    );
    slide.add_text_box(TextBox::new(
        Frame::new(0.7, 1.2, 8.6, 0.6),
        question.question.as_str(),
        TextStyle::new(20.0, palette.text).bold(),
    ));

    // Rows are squeezed when the options would otherwise run into the footer
    let rows = question.options.len().div_ceil(OPTIONS_PER_ROW);
    let available_height = geometry.footer_y - 0.2 - OPTIONS_START_Y;
    let row_pitch = OPTION_ROW_PITCH.min(available_height / rows.max(1) as f64);
    let option_height = row_pitch * (1.0 / OPTION_ROW_PITCH);
    let badge_size = (option_height * 0.6).min(0.6);

    for (option_index, option) in question.options.iter().enumerate() {
        let row = option_index / OPTIONS_PER_ROW;
        let column = option_index % OPTIONS_PER_ROW;
        let option_x = 0.5 + column as f64 * (OPTION_WIDTH + OPTION_GAP);
        let option_y = OPTIONS_START_Y + row as f64 * row_pitch;

        slide.add_shape(
            Shape::filled(
                ShapeKind::RoundedRectangle,
                Frame::new(option_x, option_y, OPTION_WIDTH, option_height),
                palette.light,
            )
            .with_outline(palette.light, 1.0),
        );
        let badge_x = option_x + 0.2;
        let badge_y = option_y + (option_height - badge_size) / 2.0;
        slide.add_shape(Shape::filled(
            ShapeKind::Oval,
            Frame::new(badge_x, badge_y, badge_size, badge_size),
            palette.primary,
        ));
        slide.add_text_box(
            TextBox::new(
                Frame::new(badge_x, badge_y, badge_size, badge_size),
                option_letter(option_index).to_string(),
                TextStyle::new(24.0, palette.text_light)
                    .bold()
                    .aligned(Alignment::Center),
            )
            .anchored(VerticalAnchor::Middle),
        );
        let text_x = badge_x + badge_size + 0.2;
        slide.add_text_box(
            TextBox::new(
                Frame::new(
                    text_x,
                    option_y,
                    OPTION_WIDTH - (text_x - option_x) - 0.2,
                    option_height,
                ),
                option.as_str(),
                TextStyle::new(18.0, palette.text).aligned(Alignment::Center),
            )
            .anchored(VerticalAnchor::Middle),
        );
    }
}

fn draw_answer(
    slide: &mut Slide,
    context: &BuildContext,
    question_index: usize,
    question: &Question,
) {
    let geometry = context.geometry();
    let palette = context.palette();

    slide.add_shape(Shape::filled(
        ShapeKind::Rectangle,
        Frame::new(0.0, 0.0, geometry.slide_width, 1.2),
        palette.primary,
    ));
    slide.add_text_box(
        TextBox::new(
            Frame::new(0.5, 0.3, 9.0, 0.6),
            context.labels.quiz_answer(question_index + 1),
            TextStyle::new(40.0, palette.text_light)
                .bold()
                .aligned(Alignment::Center),
        )
        .anchored(VerticalAnchor::Middle),
    );
    slide.add_shape(
        Shape::filled(
            ShapeKind::RoundedRectangle,
            Frame::new(0.5, 1.4, 9.0, 0.8),
            palette.light,
        )
        .with_outline(palette.light, 1.0),
    );
    slide.add_text_box(TextBox::new(
        Frame::new(0.7, 1.5, 8.6, 0.6),
        context.labels.question(&question.question),
        TextStyle::new(18.0, palette.text).italic(),
    ));

    if !question.correct_answer.is_empty() {
        slide.add_shape(
            Shape::filled(
                ShapeKind::RoundedRectangle,
                Frame::new(0.5, 2.4, 9.0, 1.0),
                palette.dark_alt,
            )
            .with_outline(palette.success, 3.0),
        );
        slide.add_text_box(TextBox::new(
            Frame::new(0.7, 2.5, 8.6, 0.4),
            context.labels.correct_answer,
            TextStyle::new(20.0, palette.warning).bold(),
        ));
        slide.add_text_box(TextBox::new(
            Frame::new(0.7, 2.9, 8.6, 0.4),
            question.correct_answer.as_str(),
            TextStyle::new(18.0, palette.text_light),
        ));
    }

    if !question.explanation.is_empty() {
        slide.add_shape(
            Shape::filled(
                ShapeKind::RoundedRectangle,
                Frame::new(0.5, 3.6, 9.0, 1.4),
                palette.light,
            )
            .with_outline(palette.primary_light, 1.0),
        );
        slide.add_shape(Shape::filled(
            ShapeKind::Rectangle,
            Frame::new(0.7, 3.7, 0.1, 1.2),
            palette.primary,
        ));
        slide.add_text_box(TextBox::new(
            Frame::new(0.9, 3.7, 8.5, 0.4),
            context.labels.explanation,
            TextStyle::new(20.0, palette.text).bold(),
        ));
        slide.add_text_box(TextBox::new(
            Frame::new(0.9, 4.2, 8.5, 0.7),
            question.explanation.as_str(),
            TextStyle::new(16.0, palette.text),
        ));
    }
}
