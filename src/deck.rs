use serde::{Deserialize, Serialize};

use crate::configuration::{DeckConfiguration, FooterStyle, Geometry, Palette};
use crate::error::{ContextError, ErrorKind};
use crate::pagination::Section;

/// An opaque RGB color, serialized as a `#RRGGBB` string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(0xFF, 0xFF, 0xFF);
    pub const BLACK: Color = Color::rgb(0x00, 0x00, 0x00);

    pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Color { red, green, blue }
    }

    /// The color components scaled to the unit interval, as PDF color operators expect them.
    pub fn to_unit_components(self) -> [f32; 3] {
        [
            self.red as f32 / 255.0,
            self.green as f32 / 255.0,
            self.blue as f32 / 255.0,
        ]
    }
}

impl TryFrom<String> for Color {
    type Error = ContextError;

    fn try_from(hexadecimal: String) -> Result<Self, Self::Error> {
        let invalid_color = || {
            ContextError::with_context(
                ErrorKind::Configuration,
                format!("The color {:?} is not of the form #RRGGBB", hexadecimal),
            )
        };
        let digits = hexadecimal.strip_prefix('#').ok_or_else(invalid_color)?;
        if digits.len() != 6 || !digits.chars().all(|digit| digit.is_ascii_hexdigit()) {
            return Err(invalid_color());
        }
        let component = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16).map_err(|_| invalid_color())
        };

        Ok(Color::rgb(component(0..2)?, component(2..4)?, component(4..6)?))
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        format!("#{:02X}{:02X}{:02X}", color.red, color.green, color.blue)
    }
}

/// Position and size of an element on the slide, in inches from the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Frame {
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Frame {
            left,
            top,
            width,
            height,
        }
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum VerticalAnchor {
    #[default]
    Top,
    Middle,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    /// Font size in points.
    pub font_size: f64,
    pub bold: bool,
    pub italic: bool,
    pub color: Color,
    pub alignment: Alignment,
}

impl TextStyle {
    pub fn new(font_size: f64, color: Color) -> Self {
        TextStyle {
            font_size,
            bold: false,
            italic: false,
            color,
            alignment: Alignment::Left,
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    pub fn aligned(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }
}

/// A native list bullet, which backends without list support replace by a literal glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Bullet {
    Disc,
    Circle,
}

impl Bullet {
    pub fn for_level(level: u8) -> Self {
        if level == 0 {
            Bullet::Disc
        } else {
            Bullet::Circle
        }
    }

    /// The literal glyph standing in for the bullet. Backends limited to the WinAnsi
    /// character set get an en dash for the sub level.
    pub fn glyph(self, unicode_text: bool) -> &'static str {
        match (self, unicode_text) {
            (Bullet::Disc, _) => "• ",
            (Bullet::Circle, true) => "◦ ",
            (Bullet::Circle, false) => "– ",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paragraph {
    pub text: String,
    pub style: TextStyle,
    /// Nesting level, each level is indented further.
    pub level: u8,
    pub bullet: Option<Bullet>,
}

impl Paragraph {
    pub fn new<S: Into<String>>(text: S, style: TextStyle) -> Self {
        Paragraph {
            text: text.into(),
            style,
            level: 0,
            bullet: None,
        }
    }

    pub fn bulleted(mut self, level: u8) -> Self {
        self.level = level;
        self.bullet = Some(Bullet::for_level(level));
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextBox {
    pub frame: Frame,
    pub paragraphs: Vec<Paragraph>,
    pub vertical_anchor: VerticalAnchor,
    pub background: Option<Color>,
    pub shadow: bool,
}

impl TextBox {
    /// A text box holding a single paragraph.
    pub fn new<S: Into<String>>(frame: Frame, text: S, style: TextStyle) -> Self {
        TextBox::with_paragraphs(frame, vec![Paragraph::new(text, style)])
    }

    pub fn with_paragraphs(frame: Frame, paragraphs: Vec<Paragraph>) -> Self {
        TextBox {
            frame,
            paragraphs,
            vertical_anchor: VerticalAnchor::Top,
            background: None,
            shadow: false,
        }
    }

    pub fn anchored(mut self, vertical_anchor: VerticalAnchor) -> Self {
        self.vertical_anchor = vertical_anchor;
        self
    }

    pub fn with_background(mut self, background: Color) -> Self {
        self.background = Some(background);
        self
    }

    pub fn with_shadow(mut self) -> Self {
        self.shadow = true;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShapeKind {
    Rectangle,
    RoundedRectangle,
    Oval,
    /// A right triangle whose right angle sits in the bottom-left corner of its frame.
    RightTriangle,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Fill {
    Solid(Color),
    Gradient {
        start: Color,
        end: Color,
        /// Direction of the gradient in degrees.
        angle: f64,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Outline {
    pub color: Color,
    /// Stroke width in points.
    pub width: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    pub kind: ShapeKind,
    pub frame: Frame,
    pub fill: Option<Fill>,
    pub outline: Option<Outline>,
    pub shadow: bool,
    /// Fill opacity from 0 (invisible) to 1 (opaque).
    pub opacity: f64,
}

impl Shape {
    pub fn new(kind: ShapeKind, frame: Frame) -> Self {
        Shape {
            kind,
            frame,
            fill: None,
            outline: None,
            shadow: false,
            opacity: 1.0,
        }
    }

    pub fn filled(kind: ShapeKind, frame: Frame, color: Color) -> Self {
        Shape::new(kind, frame).with_fill(Fill::Solid(color))
    }

    pub fn with_fill(mut self, fill: Fill) -> Self {
        self.fill = Some(fill);
        self
    }

    pub fn with_outline(mut self, color: Color, width: f64) -> Self {
        self.outline = Some(Outline { color, width });
        self
    }

    pub fn with_shadow(mut self) -> Self {
        self.shadow = true;
        self
    }

    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableCell {
    pub text: String,
    pub style: TextStyle,
    pub background: Color,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub frame: Frame,
    /// Relative widths of the columns, they are scaled to the frame width.
    pub column_weights: Vec<f64>,
    pub rows: Vec<Vec<TableCell>>,
    pub border: Option<Color>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Element {
    TextBox(TextBox),
    Shape(Shape),
    Table(Table),
}

/// The cosmetic features a drawing backend supports natively. Whatever is missing is
/// replaced by a deterministic fallback when an element is inserted into a slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capabilities {
    pub gradients: bool,
    pub shadows: bool,
    pub transparency: bool,
    pub native_bullets: bool,
    /// Whether text outside the WinAnsi character set can be drawn.
    pub unicode_text: bool,
}

impl Capabilities {
    pub const ALL: Capabilities = Capabilities {
        gradients: true,
        shadows: true,
        transparency: true,
        native_bullets: true,
        unicode_text: true,
    };

    /// What the PDF backend can draw: plain opaque fills and literal text only.
    pub const PDF: Capabilities = Capabilities {
        gradients: false,
        shadows: false,
        transparency: false,
        native_bullets: false,
        unicode_text: false,
    };
}

/// A single slide: its elements in z-order, its notes and the page number printed in its footer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slide {
    section: Section,
    capabilities: Capabilities,
    elements: Vec<Element>,
    notes: Option<String>,
    page_number: Option<usize>,
}

impl Slide {
    pub fn section(&self) -> Section {
        self.section
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    /// The number printed in the footer, `None` for slides without a footer.
    pub fn page_number(&self) -> Option<usize> {
        self.page_number
    }

    pub fn add_text_box(&mut self, mut text_box: TextBox) {
        if text_box.shadow && !self.capabilities.shadows {
            log::debug!("Dropping the unsupported shadow of a text box");
            text_box.shadow = false;
        }
        if !self.capabilities.native_bullets {
            for paragraph in text_box.paragraphs.iter_mut() {
                if let Some(bullet) = paragraph.bullet.take() {
                    let glyph = bullet.glyph(self.capabilities.unicode_text);
                    log::debug!("Replacing a native bullet with the literal {:?}", glyph);
                    paragraph.text.insert_str(0, glyph);
                }
            }
        }
        self.elements.push(Element::TextBox(text_box));
    }

    pub fn add_shape(&mut self, mut shape: Shape) {
        if let Some(Fill::Gradient { start, .. }) = shape.fill {
            if !self.capabilities.gradients {
                log::debug!("Replacing an unsupported gradient with its start color");
                shape.fill = Some(Fill::Solid(start));
            }
        }
        if shape.shadow && !self.capabilities.shadows {
            log::debug!("Dropping the unsupported shadow of a shape");
            shape.shadow = false;
        }
        if shape.opacity < 1.0 && !self.capabilities.transparency {
            log::debug!("Rendering a shape with opacity {} as opaque", shape.opacity);
            shape.opacity = 1.0;
        }
        self.elements.push(Element::Shape(shape));
    }

    pub fn add_table(&mut self, table: Table) {
        self.elements.push(Element::Table(table));
    }

    /// Routes the text to the notes channel, it is never printed on the slide.
    pub fn set_notes<S: Into<String>>(&mut self, notes: S) {
        let notes = notes.into();
        if !notes.is_empty() {
            self.notes = Some(notes);
        }
    }

    /// Draws the footer (presentation title and page number) and records the printed number.
    pub fn add_footer(
        &mut self,
        title: &str,
        page_number: usize,
        configuration: &DeckConfiguration,
    ) {
        let footer_y = configuration.geometry.footer_y;
        let palette = &configuration.theme.palette;
        let (title_color, number_color) = match configuration.theme.footer_style {
            FooterStyle::Modern => {
                self.add_shape(
                    Shape::filled(
                        ShapeKind::Rectangle,
                        Frame::new(0.5, footer_y - 0.05, 9.0, 0.01),
                        palette.primary_light,
                    )
                    .with_opacity(0.5),
                );
                (palette.primary, palette.primary)
            }
            FooterStyle::Classic => (palette.royal_blue, palette.text),
        };
        let mut title_style = TextStyle::new(10.0, title_color);
        title_style.italic = configuration.theme.footer_style == FooterStyle::Modern;

        self.add_text_box(TextBox::new(
            Frame::new(0.5, footer_y, 8.5, 0.3),
            title,
            title_style,
        ));
        self.add_text_box(TextBox::new(
            Frame::new(9.0, footer_y, 0.5, 0.3),
            page_number.to_string(),
            TextStyle::new(10.0, number_color).aligned(Alignment::Right),
        ));
        self.page_number = Some(page_number);
    }

    /// Every piece of text on the slide in z-order, table cells row by row.
    pub fn text_content(&self) -> Vec<String> {
        let mut texts = Vec::new();
        for element in &self.elements {
            match element {
                Element::TextBox(text_box) => texts.extend(
                    text_box
                        .paragraphs
                        .iter()
                        .map(|paragraph| paragraph.text.clone()),
                ),
                Element::Table(table) => texts.extend(
                    table
                        .rows
                        .iter()
                        .flat_map(|row| row.iter().map(|cell| cell.text.clone())),
                ),
                Element::Shape(_) => (),
            }
        }
        texts
    }
}

/// The in-memory slide deck the section builders append to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deck {
    /// Slide width in inches.
    pub width: f64,
    /// Slide height in inches.
    pub height: f64,
    pub title: String,
    capabilities: Capabilities,
    slides: Vec<Slide>,
}

impl Deck {
    pub fn new(geometry: &Geometry, capabilities: Capabilities) -> Self {
        Deck {
            width: geometry.slide_width,
            height: geometry.slide_height,
            title: String::new(),
            capabilities,
            slides: Vec::new(),
        }
    }

    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    /// Appends a blank slide belonging to the section and returns it for drawing.
    pub fn add_slide(&mut self, section: Section) -> &mut Slide {
        self.slides.push(Slide {
            section,
            capabilities: self.capabilities,
            elements: Vec::new(),
            notes: None,
            page_number: None,
        });
        let last_index = self.slides.len() - 1;
        &mut self.slides[last_index]
    }

    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    /// The printed footer numbers of all slides, in deck order.
    pub fn page_numbers(&self) -> Vec<Option<usize>> {
        self.slides.iter().map(Slide::page_number).collect()
    }
}

/// A gradient covering the whole slide.
pub fn gradient_background(geometry: &Geometry, start: Color, end: Color, angle: f64) -> Shape {
    Shape::new(
        ShapeKind::Rectangle,
        Frame::new(0.0, 0.0, geometry.slide_width, geometry.slide_height),
    )
    .with_fill(Fill::Gradient { start, end, angle })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

/// A translucent triangle decorating one corner of the slide.
pub fn corner_accent(geometry: &Geometry, color: Color, size: f64, corner: Corner) -> Shape {
    let (left, top) = match corner {
        Corner::TopLeft => (0.0, 0.0),
        Corner::TopRight => (geometry.slide_width - size, 0.0),
        Corner::BottomLeft => (0.0, geometry.slide_height - size),
        Corner::BottomRight => (geometry.slide_width - size, geometry.slide_height - size),
    };
    Shape::filled(
        ShapeKind::RightTriangle,
        Frame::new(left, top, size, size),
        color,
    )
    .with_opacity(0.7)
}

/// The colored band at the top of most slides holding the slide title.
pub fn add_title_band(
    slide: &mut Slide,
    geometry: &Geometry,
    palette: &Palette,
    color: Color,
    title: &str,
    font_size: f64,
) {
    slide.add_shape(Shape::filled(
        ShapeKind::Rectangle,
        Frame::new(0.0, 0.0, geometry.slide_width, 0.8),
        color,
    ));
    slide.add_text_box(TextBox::new(
        Frame::new(0.5, 0.1, 9.0, 0.6),
        title,
        TextStyle::new(font_size, palette.text_light).bold(),
    ));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slide_with(capabilities: Capabilities) -> Deck {
        let mut deck = Deck::new(&Geometry::default(), capabilities);
        deck.add_slide(Section::Content);
        deck
    }

    #[test]
    fn colors_use_the_hexadecimal_notation() {
        let color: Color = serde_json::from_str("\"#0071c5\"").unwrap();

        assert_eq!(color, Color::rgb(0x00, 0x71, 0xC5));
        assert_eq!(serde_json::to_string(&color).unwrap(), "\"#0071C5\"");
        assert!(serde_json::from_str::<Color>("\"0071C5\"").is_err());
        assert!(serde_json::from_str::<Color>("\"#00GG00\"").is_err());
        assert!(serde_json::from_str::<Color>("\"#ÿÿÿ\"").is_err());
    }

    #[test]
    fn unsupported_cosmetics_fall_back() {
        let mut deck = slide_with(Capabilities::PDF);
        let slide = &mut deck.slides[0];
        slide.add_shape(
            Shape::new(ShapeKind::Rectangle, Frame::new(0.0, 0.0, 1.0, 1.0))
                .with_fill(Fill::Gradient {
                    start: Color::BLACK,
                    end: Color::WHITE,
                    angle: 90.0,
                })
                .with_shadow()
                .with_opacity(0.3),
        );
        slide.add_text_box(TextBox::with_paragraphs(
            Frame::new(0.0, 0.0, 1.0, 1.0),
            vec![
                Paragraph::new("top", TextStyle::new(18.0, Color::BLACK)).bulleted(0),
                Paragraph::new("nested", TextStyle::new(16.0, Color::BLACK)).bulleted(1),
            ],
        ));

        let Element::Shape(shape) = &slide.elements()[0] else {
            panic!("expected a shape");
        };
        assert_eq!(shape.fill, Some(Fill::Solid(Color::BLACK)));
        assert!(!shape.shadow);
        assert_eq!(shape.opacity, 1.0);
        assert_eq!(slide.text_content(), vec!["• top", "– nested"]);
    }

    #[test]
    fn supported_cosmetics_are_kept() {
        let mut deck = slide_with(Capabilities::ALL);
        let slide = &mut deck.slides[0];
        slide.add_text_box(TextBox::with_paragraphs(
            Frame::new(0.0, 0.0, 1.0, 1.0),
            vec![Paragraph::new("top", TextStyle::new(18.0, Color::BLACK)).bulleted(0)],
        ));

        assert_eq!(slide.text_content(), vec!["top"]);
    }

    #[test]
    fn footer_records_the_page_number() {
        let mut deck = slide_with(Capabilities::PDF);
        let slide = &mut deck.slides[0];
        slide.add_footer("Intro to X", 7, &DeckConfiguration::default());

        assert_eq!(slide.page_number(), Some(7));
        assert_eq!(slide.text_content(), vec!["Intro to X", "7"]);
        assert_eq!(deck.page_numbers(), vec![Some(7)]);
    }

    #[test]
    fn empty_notes_are_not_recorded() {
        let mut deck = slide_with(Capabilities::PDF);
        deck.slides[0].set_notes("");
        assert_eq!(deck.slides[0].notes(), None);
        deck.slides[0].set_notes("Speak slowly");
        assert_eq!(deck.slides[0].notes(), Some("Speak slowly"));
    }
}
