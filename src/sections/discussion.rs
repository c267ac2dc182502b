use crate::deck::{add_title_band, Deck, Frame, Shape, ShapeKind, Slide, TextBox, TextStyle};
use crate::lesson::Question;
use crate::pagination::Section;
use crate::sections::BuildContext;
use crate::text::estimate_text_height;

/// Every discussion question gets a slide for the class and a guidance slide for the facilitator.
pub fn build(deck: &mut Deck, context: &BuildContext) -> usize {
    let mut emitted = 0;

    for (question_index, question) in context.lesson.discussion_questions() {
        let question_slide = deck.add_slide(Section::Discussion);
        draw_question(question_slide, context, question_index, question);
        context.add_footer(
            question_slide,
            context.page_number(Section::Discussion, emitted),
        );
        emitted += 1;

        let guidance_slide = deck.add_slide(Section::Discussion);
        draw_guidance(guidance_slide, context, question_index, question);
        context.add_footer(
            guidance_slide,
            context.page_number(Section::Discussion, emitted),
        );
        emitted += 1;
    }

    emitted
}

fn question_height(question: &Question) -> f64 {
    estimate_text_height(&question.question, 20.0, 8.6)
}

fn draw_question(
    slide: &mut Slide,
    context: &BuildContext,
    question_index: usize,
    question: &Question,
) {
    let palette = context.palette();

    add_title_band(
        slide,
        context.geometry(),
        palette,
        palette.primary,
        &context.labels.discussion_question(question_index + 1),
        32.0,
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

    let next_y = 1.2 + question_height(question) + 1.2;
    slide.add_shape(Shape::filled(
        ShapeKind::Rectangle,
        Frame::new(0.7, next_y, 0.1, 0.4),
        palette.primary,
    ));
    slide.add_text_box(TextBox::new(
        Frame::new(0.9, next_y, 8.3, 0.4),
        context.labels.group_discussion,
        TextStyle::new(20.0, palette.primary).bold(),
    ));
    slide.add_text_box(TextBox::new(
        Frame::new(0.9, next_y + 0.5, 8.3, 0.8),
        context.labels.group_instruction,
        TextStyle::new(18.0, palette.text),
    ));
}

fn draw_guidance(
    slide: &mut Slide,
    context: &BuildContext,
    question_index: usize,
    question: &Question,
) {
    let palette = context.palette();

    add_title_band(
        slide,
        context.geometry(),
        palette,
        palette.primary,
        &context.labels.facilitator_guidance(question_index + 1),
        32.0,
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
        context.labels.question(&question.question),
        TextStyle::new(18.0, palette.text).italic(),
    ));

    // Discussion ideas carry their guidance in the answer field
    let guidance = question.correct_answer.as_str();
    if guidance.is_empty() {
        return;
    }
    let guidance_y = 1.2 + question_height(question) + 0.7;
    slide.add_shape(
        Shape::filled(
            ShapeKind::RoundedRectangle,
            Frame::new(0.5, guidance_y, 9.0, 2.8),
            palette.light,
        )
        .with_outline(palette.accent2, 2.0),
    );
    slide.add_shape(Shape::filled(
        ShapeKind::Rectangle,
        Frame::new(0.7, guidance_y + 0.1, 0.1, 2.5),
        palette.accent2,
    ));
    slide.add_text_box(TextBox::new(
        Frame::new(0.9, guidance_y + 0.1, 8.3, 0.4),
        context.labels.facilitator_guidance_caption(),
        TextStyle::new(20.0, palette.accent2).bold(),
    ));
    slide.add_text_box(TextBox::new(
        Frame::new(0.9, guidance_y + 0.6, 8.3, 1.5),
        guidance,
        TextStyle::new(16.0, palette.text),
    ));
}

#[cfg(test)]
mod tests {
    use crate::lesson::Lesson;
    use crate::pagination::Section;
    use crate::sections::test_support::build_section;

    #[test]
    fn every_discussion_question_gets_a_guidance_slide() {
        let lesson = Lesson::from_json_str(
            r#"{ "assessmentIdeas": [
                { "type": "Quiz", "exampleQuestions": [{ "question": "Q", "options": ["a"] }] },
                { "type": "Class discussion", "exampleQuestions": [
                    { "question": "Why do leaves fall?", "correctAnswer": "Steer towards seasons" },
                    { "question": "What next?" }
                ] }
            ] }"#,
        )
        .unwrap();
        let (deck, emitted) = build_section(&lesson, Section::Discussion);

        assert_eq!(emitted, 4);
        let first_page = deck.slides()[0].page_number().unwrap();
        assert_eq!(
            deck.page_numbers(),
            (0..4).map(|offset| Some(first_page + offset)).collect::<Vec<_>>()
        );

        let question = deck.slides()[0].text_content();
        assert_eq!(question[0], "Discussion Question 1");
        assert!(question.contains(&"Group Discussion".to_string()));

        let guidance = deck.slides()[1].text_content();
        assert_eq!(guidance[0], "Facilitator Guidance: Question 1");
        assert!(guidance.contains(&"Question: Why do leaves fall?".to_string()));
        assert!(guidance.contains(&"Facilitator Guidance:".to_string()));
        assert!(guidance.contains(&"Steer towards seasons".to_string()));

        let bare_guidance = deck.slides()[3].text_content();
        assert_eq!(bare_guidance[0], "Facilitator Guidance: Question 2");
        assert!(!bare_guidance.contains(&"Facilitator Guidance:".to_string()));
    }

    #[test]
    fn quiz_ideas_mentioning_discussion_stay_quizzes() {
        let lesson = Lesson::from_json_str(
            r#"{ "assessmentIdeas": [
                { "type": "Quiz and discussion", "exampleQuestions": [{ "question": "Q" }] }
            ] }"#,
        )
        .unwrap();
        let (deck, emitted) = build_section(&lesson, Section::Discussion);

        assert_eq!(emitted, 0);
        assert!(deck.is_empty());
    }
}
