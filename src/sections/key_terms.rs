use crate::deck::{
    corner_accent, gradient_background, Alignment, Corner, Deck, Frame, Shape, ShapeKind, Table,
    TableCell, TextBox, TextStyle,
};
use crate::pagination::{Section, KEY_TERMS_PER_SLIDE};
use crate::sections::BuildContext;

/// A two column table of terms and definitions, four terms per slide.
pub fn build(deck: &mut Deck, context: &BuildContext) -> usize {
    let geometry = context.geometry();
    let palette = context.palette();
    let mut emitted = 0;

    for (slide_index, terms) in context
        .lesson
        .key_terms
        .chunks(KEY_TERMS_PER_SLIDE)
        .enumerate()
    {
        let slide = deck.add_slide(Section::KeyTerms);
        slide.add_shape(gradient_background(
            geometry,
            palette.primary,
            palette.primary_dark,
            0.0,
        ));
        slide.add_shape(corner_accent(geometry, palette.accent3, 1.0, Corner::BottomLeft));

        let mut title = context.labels.key_terms.to_string();
        if slide_index > 0 {
            title.push_str(context.labels.continued);
        }
        slide.add_text_box(TextBox::new(
            Frame::new(0.5, 0.1, 9.0, 0.6),
            title,
            TextStyle::new(36.0, palette.text_light).bold(),
        ));

        let table_height = (0.8 * (terms.len() + 1) as f64).min(3.5);
        if context.theme().content_box_shadow {
            slide.add_shape(
                Shape::filled(
                    ShapeKind::Rectangle,
                    Frame::new(0.4, 0.9, 9.2, table_height + 0.2),
                    palette.light_alt,
                )
                .with_shadow(),
            );
        }

        let header_style = TextStyle::new(18.0, palette.text_light)
            .bold()
            .aligned(Alignment::Center);
        let mut rows = vec![vec![
            TableCell {
                text: context.labels.term.to_string(),
                style: header_style,
                background: palette.royal_blue,
            },
            TableCell {
                text: context.labels.definition.to_string(),
                style: header_style,
                background: palette.royal_blue,
            },
        ]];
        for (row_index, key_term) in terms.iter().enumerate() {
            let background = if row_index % 2 == 0 {
                palette.background
            } else {
                palette.light
            };
            rows.push(vec![
                TableCell {
                    text: key_term.term.clone(),
                    style: TextStyle::new(16.0, palette.primary_dark).bold(),
                    background,
                },
                TableCell {
                    text: key_term.definition.clone(),
                    style: TextStyle::new(14.0, palette.text),
                    background,
                },
            ]);
        }
        slide.add_table(Table {
            frame: Frame::new(0.5, 1.0, 9.0, table_height),
            column_weights: vec![1.0, 2.0],
            rows,
            border: Some(palette.primary_light),
        });

        context.add_footer(slide, context.page_number(Section::KeyTerms, slide_index));
        emitted += 1;
    }

    emitted
}
