use crate::deck::{
    corner_accent, gradient_background, Corner, Deck, Frame, Paragraph, Shape, ShapeKind, TextBox,
    TextStyle,
};
use crate::pagination::Section;
use crate::sections::BuildContext;
use crate::text::{clean_title, detect_bullet_level, TitleKeyword};

/// Index of the content slide which is never rendered.
const SKIPPED_CONTENT_SLIDE: usize = 1;

/// One slide per content entry except the second one. Page numbers follow the rendered slides.
pub fn build(deck: &mut Deck, context: &BuildContext) -> usize {
    let geometry = context.geometry();
    let theme = context.theme();
    let palette = context.palette();
    let mut emitted = 0;

    for (slide_index, content_slide) in context.lesson.slides.iter().enumerate() {
        if slide_index == SKIPPED_CONTENT_SLIDE {
            log::debug!(
                "Skipping the content slide {:?}",
                content_slide.title.as_str()
            );
            continue;
        }
        let slide = deck.add_slide(Section::Content);

        if theme.use_gradients {
            slide.add_shape(gradient_background(
                geometry,
                palette.primary,
                palette.primary_dark,
                0.0,
            ));
            slide.add_shape(
                Shape::filled(
                    ShapeKind::Rectangle,
                    Frame::new(0.0, 0.8, geometry.slide_width, geometry.slide_height - 0.8),
                    palette.background,
                )
                .with_opacity(0.9),
            );
        } else {
            slide.add_shape(Shape::filled(
                ShapeKind::Rectangle,
                Frame::new(0.0, 0.0, geometry.slide_width, 0.8),
                palette.royal_blue,
            ));
        }
        if theme.corner_accent {
            let accent = [palette.accent1, palette.accent2, palette.accent3][slide_index % 3];
            slide.add_shape(corner_accent(geometry, accent, 1.0, Corner::BottomRight));
        }

        slide.add_text_box(TextBox::new(
            Frame::new(0.5, 0.1, 9.0, 0.6),
            clean_title(&content_slide.title, TitleKeyword::Slide),
            TextStyle::new(32.0, palette.text_light).bold(),
        ));

        if theme.content_box_shadow {
            slide.add_shape(
                Shape::filled(
                    ShapeKind::RoundedRectangle,
                    Frame::new(
                        0.3,
                        geometry.content_start_y - 0.1,
                        9.4,
                        geometry.footer_y - geometry.content_start_y - 0.2,
                    ),
                    palette.light_alt,
                )
                .with_opacity(0.7)
                .with_outline(palette.primary_light, 1.0)
                .with_shadow(),
            );
        }

        let lines: Vec<String> = content_slide
            .content
            .iter()
            .map(|item| item.to_text())
            .collect();
        slide.add_text_box(TextBox::with_paragraphs(
            Frame::new(
                geometry.main_bullet_indent,
                geometry.content_start_y,
                9.0 - geometry.main_bullet_indent,
                geometry.footer_y - geometry.content_start_y - 0.3,
            ),
            bullet_paragraphs(&lines, context),
        ));
        slide.set_notes(content_slide.notes.as_str());

        context.add_footer(slide, context.page_number(Section::Content, emitted));
        emitted += 1;
    }

    emitted
}

/// Turns the content lines into paragraphs. When no line is nested, plain lines become
/// top-level bullets, otherwise they are kept as bold lead-ins.
fn bullet_paragraphs(lines: &[String], context: &BuildContext) -> Vec<Paragraph> {
    let palette = context.palette();
    let bullet_lines: Vec<_> = lines.iter().map(|line| detect_bullet_level(line)).collect();
    let has_sub_bullets = bullet_lines
        .iter()
        .any(|line| line.is_bullet && line.level > 0);

    bullet_lines
        .into_iter()
        .map(|line| {
            let is_bullet = line.is_bullet || !has_sub_bullets;
            let font_size = if line.level == 0 { 18.0 } else { 16.0 };
            let mut style = TextStyle::new(font_size, palette.text);
            style.bold = !is_bullet && line.level == 0;
            let paragraph = Paragraph::new(line.text, style);
            match (is_bullet, context.theme().modern_bullets) {
                (true, true) => paragraph.bulleted(line.level),
                (true, false) => Paragraph {
                    level: line.level,
                    ..paragraph
                },
                (false, _) => paragraph,
            }
        })
        .collect()
}
