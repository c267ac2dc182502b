use lopdf::content::Operation;
use lopdf::{Object, StringFormat};
use std::{io::BufWriter, mem};
use time::OffsetDateTime;

use crate::configuration::DeckConfiguration;
use crate::deck::{
    Alignment, Color, Deck, Element, Fill, Frame, Shape, ShapeKind, Slide, Table, TextBox,
    TextStyle, VerticalAnchor,
};
use crate::error::{ContextError, ErrorKind};
use crate::text::wrap_text;

const POINTS_PER_INCH: f32 = 72.0;
/// Control point distance of the Bézier quarter circles, relative to the radius.
const KAPPA: f32 = 0.552_284_8;
const LINE_SPACING: f32 = 1.2;
/// Distance between the border of a text box and its text, in inches.
const TEXT_INSET: f64 = 0.05;
/// Indentation of every nesting level of a paragraph, in inches.
const LEVEL_INDENT: f64 = 0.3;

/// Converts inches, the unit of the whole deck, into the points the PDF specification expects.
fn inches_to_points(inches: f64) -> f32 {
    (inches as f32) * POINTS_PER_INCH
}

/// The standard Type1 fonts the slides are written with. They are never embedded since every
/// PDF reader ships them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum StandardFont {
    Helvetica,
    HelveticaBold,
    HelveticaOblique,
    HelveticaBoldOblique,
}

impl StandardFont {
    pub const ALL: [StandardFont; 4] = [
        StandardFont::Helvetica,
        StandardFont::HelveticaBold,
        StandardFont::HelveticaOblique,
        StandardFont::HelveticaBoldOblique,
    ];

    pub fn for_style(style: &TextStyle) -> StandardFont {
        match (style.bold, style.italic) {
            (false, false) => StandardFont::Helvetica,
            (true, false) => StandardFont::HelveticaBold,
            (false, true) => StandardFont::HelveticaOblique,
            (true, true) => StandardFont::HelveticaBoldOblique,
        }
    }

    /// The name of the font in the resource dictionary of every page.
    pub fn identifier(self) -> &'static str {
        match self {
            StandardFont::Helvetica => "F1",
            StandardFont::HelveticaBold => "F2",
            StandardFont::HelveticaOblique => "F3",
            StandardFont::HelveticaBoldOblique => "F4",
        }
    }

    fn base_font(self) -> &'static str {
        match self {
            StandardFont::Helvetica => "Helvetica",
            StandardFont::HelveticaBold => "Helvetica-Bold",
            StandardFont::HelveticaOblique => "Helvetica-Oblique",
            StandardFont::HelveticaBoldOblique => "Helvetica-BoldOblique",
        }
    }

    fn is_bold(self) -> bool {
        matches!(
            self,
            StandardFont::HelveticaBold | StandardFont::HelveticaBoldOblique
        )
    }

    /// The approximate width of the text in points, it is only used to align lines.
    pub fn text_width(self, text: &str, font_size: f32) -> f32 {
        let scale = if self.is_bold() { 1.06 } else { 1.0 };
        let units: f32 = text.chars().map(helvetica_character_width).sum();
        units * scale * font_size / 1000.0
    }

    fn to_dictionary(self) -> lopdf::Dictionary {
        lopdf::Dictionary::from_iter(vec![
            ("Type", Object::Name("Font".into())),
            ("Subtype", Object::Name("Type1".into())),
            ("BaseFont", Object::Name(self.base_font().into())),
            ("Encoding", Object::Name("WinAnsiEncoding".into())),
        ])
    }
}

/// Advance widths of Helvetica for the printable ASCII range, in thousandths of an em.
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, 556, 556, 556,
    556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, 1015, 667, 667, 722, 722, 667,
    611, 778, 722, 278, 500, 667, 556, 833, 722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667,
    667, 611, 278, 278, 278, 469, 556, 333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500,
    222, 833, 556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

fn helvetica_character_width(character: char) -> f32 {
    let code = character as u32;
    if (0x20..0x7F).contains(&code) {
        f32::from(HELVETICA_WIDTHS[(code - 0x20) as usize])
    } else {
        556.0
    }
}

/// Encodes the text in the WinAnsi encoding of the standard fonts. Characters without a
/// code are replaced by a question mark.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|character| match character {
            ' '..='~' => character as u8,
            '\u{A0}'..='\u{FF}' => character as u32 as u8,
            '€' => 0x80,
            '…' => 0x85,
            '‘' => 0x91,
            '’' => 0x92,
            '“' => 0x93,
            '”' => 0x94,
            '•' => 0x95,
            '–' => 0x96,
            '—' => 0x97,
            _ => {
                log::warn!(
                    "Unable to encode the character {:?}, it is replaced by '?'",
                    character
                );
                b'?'
            }
        })
        .collect()
}

/// A PDF text string: UTF-16BE with its byte order mark, so any Unicode text survives.
fn pdf_text_string(text: &str) -> Object {
    let mut bytes = vec![0xFE, 0xFF];
    for unit in text.encode_utf16() {
        bytes.extend_from_slice(&unit.to_be_bytes());
    }
    Object::String(bytes, StringFormat::Hexadecimal)
}

/// One segment of a vector path, in page coordinates (points, origin at the bottom left).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathSegment {
    MoveTo([f32; 2]),
    LineTo([f32; 2]),
    CurveTo([f32; 2], [f32; 2], [f32; 2]),
    Close,
}

/// How a path is painted. A path with neither fill nor stroke is not drawn.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Paint {
    pub fill: Option<[f32; 3]>,
    /// The stroke color and line width in points.
    pub stroke: Option<([f32; 3], f32)>,
}

pub fn rectangle_path(x: f32, y: f32, width: f32, height: f32) -> Vec<PathSegment> {
    vec![
        PathSegment::MoveTo([x, y]),
        PathSegment::LineTo([x + width, y]),
        PathSegment::LineTo([x + width, y + height]),
        PathSegment::LineTo([x, y + height]),
        PathSegment::Close,
    ]
}

pub fn rounded_rectangle_path(
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    radius: f32,
) -> Vec<PathSegment> {
    let radius = radius.min(width / 2.0).min(height / 2.0);
    let control = radius * KAPPA;
    let (right, top) = (x + width, y + height);
    vec![
        PathSegment::MoveTo([x + radius, y]),
        PathSegment::LineTo([right - radius, y]),
        PathSegment::CurveTo(
            [right - radius + control, y],
            [right, y + radius - control],
            [right, y + radius],
        ),
        PathSegment::LineTo([right, top - radius]),
        PathSegment::CurveTo(
            [right, top - radius + control],
            [right - radius + control, top],
            [right - radius, top],
        ),
        PathSegment::LineTo([x + radius, top]),
        PathSegment::CurveTo(
            [x + radius - control, top],
            [x, top - radius + control],
            [x, top - radius],
        ),
        PathSegment::LineTo([x, y + radius]),
        PathSegment::CurveTo(
            [x, y + radius - control],
            [x + radius - control, y],
            [x + radius, y],
        ),
        PathSegment::Close,
    ]
}

/// An ellipse inscribed in the rectangle, made of four Bézier quarter arcs.
pub fn oval_path(x: f32, y: f32, width: f32, height: f32) -> Vec<PathSegment> {
    let (radius_x, radius_y) = (width / 2.0, height / 2.0);
    let (center_x, center_y) = (x + radius_x, y + radius_y);
    let (control_x, control_y) = (radius_x * KAPPA, radius_y * KAPPA);
    vec![
        PathSegment::MoveTo([center_x + radius_x, center_y]),
        PathSegment::CurveTo(
            [center_x + radius_x, center_y + control_y],
            [center_x + control_x, center_y + radius_y],
            [center_x, center_y + radius_y],
        ),
        PathSegment::CurveTo(
            [center_x - control_x, center_y + radius_y],
            [center_x - radius_x, center_y + control_y],
            [center_x - radius_x, center_y],
        ),
        PathSegment::CurveTo(
            [center_x - radius_x, center_y - control_y],
            [center_x - control_x, center_y - radius_y],
            [center_x, center_y - radius_y],
        ),
        PathSegment::CurveTo(
            [center_x + control_x, center_y - radius_y],
            [center_x + radius_x, center_y - control_y],
            [center_x + radius_x, center_y],
        ),
        PathSegment::Close,
    ]
}

/// A right triangle with the right angle in the bottom left corner of the rectangle.
pub fn right_triangle_path(x: f32, y: f32, width: f32, height: f32) -> Vec<PathSegment> {
    vec![
        PathSegment::MoveTo([x, y]),
        PathSegment::LineTo([x + width, y]),
        PathSegment::LineTo([x, y + height]),
        PathSegment::Close,
    ]
}

/// One layer of PDF content operations, it is encoded into the content stream of its page.
#[derive(Debug, Clone, Default)]
pub struct PdfLayer {
    pub(crate) operations: Vec<Operation>,
}

impl PdfLayer {
    fn encode(self) -> Result<Vec<u8>, ContextError> {
        let stream_content = lopdf::content::Content {
            operations: self.operations,
        };
        stream_content.encode().map_err(|error| {
            ContextError::with_error(ErrorKind::Render, "Failed to encode PDF layer content", &error)
        })
    }
}

/// The representation of a PDF page, its size is expressed in points.
#[derive(Debug, Clone)]
pub struct PdfPage {
    pub width: f32,
    pub height: f32,
    pub layers: Vec<PdfLayer>,
    /// Annotation dictionaries, they are written to the `Annots` array of the page.
    pub(crate) annotations: Vec<lopdf::Dictionary>,
}

/// A high-level interface over `lopdf::Document` holding the pages until `write_all` assembles
/// them into the underlying document.
pub struct PdfDocument {
    /// The underlying PDF document, only complete after `write_all`.
    pub inner_document: lopdf::Document,
    /// The identifier of the document, it is used in order to set the PDF `ID` tag.
    pub identifier: String,
    pub title: String,
    pub creation_date: OffsetDateTime,
    pub(crate) pages: Vec<PdfPage>,
}

impl PdfDocument {
    /// Create a new `PdfDocument` in version 1.5 of the PDF specification. The identifier and the
    /// creation date are given so that the same deck always produces the same bytes.
    pub fn new(identifier: String, title: String, creation_date: OffsetDateTime) -> Self {
        PdfDocument {
            inner_document: lopdf::Document::with_version("1.5"),
            identifier,
            title,
            creation_date,
            pages: Vec::new(),
        }
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Adds a page of the given size in points with an empty layer, returning the index of the
    /// page and of the layer in the page.
    pub fn add_page_with_layer(&mut self, page_width: f32, page_height: f32) -> (usize, usize) {
        self.pages.push(PdfPage {
            width: page_width,
            height: page_height,
            layers: vec![PdfLayer::default()],
            annotations: Vec::new(),
        });
        (self.pages.len() - 1, 0)
    }

    /// Writes a single line of text with its baseline starting at the caret position (in points).
    #[allow(clippy::too_many_arguments)]
    pub fn write_text_to_layer_in_page(
        &mut self,
        page_index: usize,
        layer_index: usize,
        color: [f32; 3],
        text: &str,
        font: StandardFont,
        font_size: f32,
        caret_position: [f32; 2],
    ) -> Result<(), ContextError> {
        let [red, green, blue] = color;
        let [x, y] = caret_position;
        self.add_operations_to_layer_in_page(
            layer_index,
            page_index,
            vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec![font.identifier().into(), font_size.into()]),
                Operation::new("Td", vec![x.into(), y.into()]),
                Operation::new("rg", vec![red.into(), green.into(), blue.into()]),
                Operation::new(
                    "Tj",
                    vec![Object::String(
                        encode_win_ansi(text),
                        StringFormat::Hexadecimal,
                    )],
                ),
                Operation::new("ET", vec![]),
            ],
        )
    }

    /// Fills and/or strokes the path on the given layer of the page.
    pub fn draw_path_to_layer_in_page(
        &mut self,
        page_index: usize,
        layer_index: usize,
        path: &[PathSegment],
        paint: Paint,
    ) -> Result<(), ContextError> {
        let painting_operator = match (paint.fill, paint.stroke) {
            (Some(_), Some(_)) => "B",
            (Some(_), None) => "f",
            (None, Some(_)) => "S",
            (None, None) => return Ok(()),
        };

        let mut operations = vec![Operation::new("q", vec![])];
        if let Some([red, green, blue]) = paint.fill {
            operations.push(Operation::new(
                "rg",
                vec![red.into(), green.into(), blue.into()],
            ));
        }
        if let Some(([red, green, blue], line_width)) = paint.stroke {
            operations.push(Operation::new(
                "RG",
                vec![red.into(), green.into(), blue.into()],
            ));
            operations.push(Operation::new("w", vec![line_width.into()]));
        }
        for segment in path {
            operations.push(match *segment {
                PathSegment::MoveTo([x, y]) => Operation::new("m", vec![x.into(), y.into()]),
                PathSegment::LineTo([x, y]) => Operation::new("l", vec![x.into(), y.into()]),
                PathSegment::CurveTo([x1, y1], [x2, y2], [x3, y3]) => Operation::new(
                    "c",
                    vec![
                        x1.into(),
                        y1.into(),
                        x2.into(),
                        y2.into(),
                        x3.into(),
                        y3.into(),
                    ],
                ),
                PathSegment::Close => Operation::new("h", vec![]),
            });
        }
        operations.push(Operation::new(painting_operator, vec![]));
        operations.push(Operation::new("Q", vec![]));

        self.add_operations_to_layer_in_page(layer_index, page_index, operations)
    }

    /// Attaches a closed text annotation (a sticky note) to the top right corner of the page.
    pub fn add_text_annotation(
        &mut self,
        page_index: usize,
        contents: &str,
    ) -> Result<(), ContextError> {
        let page = self.pages.get_mut(page_index).ok_or_else(|| {
            ContextError::render(format!("Failed to find the page with index {}", page_index))
        })?;
        let (right, top) = (page.width - 4.0, page.height - 4.0);
        page.annotations.push(lopdf::Dictionary::from_iter(vec![
            ("Type", Object::Name("Annot".into())),
            ("Subtype", Object::Name("Text".into())),
            (
                "Rect",
                vec![
                    (right - 20.0).into(),
                    (top - 20.0).into(),
                    right.into(),
                    top.into(),
                ]
                .into(),
            ),
            ("Contents", pdf_text_string(contents)),
            ("Name", Object::Name("Note".into())),
            ("Open", Object::Boolean(false)),
        ]));
        Ok(())
    }

    /// Write the pages so far specified into the underlying PDF document and finalize it.
    pub fn write_all(&mut self) -> Result<(), ContextError> {
        use lopdf::Object::*;

        let creation_date = String(
            to_pdf_timestamp_format(&self.creation_date).into_bytes(),
            StringFormat::Literal,
        );
        let document_info = lopdf::Dictionary::from_iter(vec![
            ("Trapped", "False".into()),
            ("CreationDate", creation_date.clone()),
            ("ModDate", creation_date),
            ("Title", pdf_text_string(&self.title)),
            ("Creator", pdf_text_string("lessondeck")),
            ("Producer", pdf_text_string("lessondeck")),
            (
                "Identifier",
                String(self.identifier.clone().into_bytes(), StringFormat::Literal),
            ),
        ]);
        let document_info_id = self.inner_document.add_object(Dictionary(document_info));

        let pages_id = self.inner_document.new_object_id();
        let catalog = lopdf::Dictionary::from_iter(vec![
            ("Type", "Catalog".into()),
            ("PageLayout", "OneColumn".into()),
            ("PageMode", "UseNone".into()),
            ("Pages", Reference(pages_id)),
        ]);
        let catalog_id = self.inner_document.add_object(catalog);

        self.inner_document
            .trailer
            .set("Root", Reference(catalog_id));
        self.inner_document
            .trailer
            .set("Info", Reference(document_info_id));
        self.inner_document.trailer.set(
            "ID",
            Array(vec![
                String(self.identifier.clone().into_bytes(), StringFormat::Literal),
                String(self.identifier.clone().into_bytes(), StringFormat::Literal),
            ]),
        );

        let fonts_dictionary = lopdf::Dictionary::from_iter(
            StandardFont::ALL
                .iter()
                .map(|font| {
                    let font_id = self.inner_document.add_object(font.to_dictionary());
                    (font.identifier(), Reference(font_id))
                })
                .collect::<Vec<_>>(),
        );
        let resources_id = self
            .inner_document
            .add_object(lopdf::Dictionary::from_iter(vec![(
                "Font",
                Dictionary(fonts_dictionary),
            )]));

        let mut page_ids = Vec::<lopdf::Object>::new();
        for page in mem::take(&mut self.pages) {
            let media_box: lopdf::Object = vec![
                Integer(0),
                Integer(0),
                page.width.into(),
                page.height.into(),
            ]
            .into();
            let mut page_dictionary = lopdf::Dictionary::from_iter(vec![
                ("Type", "Page".into()),
                ("Rotate", Integer(0)),
                ("MediaBox", media_box.clone()),
                ("TrimBox", media_box.clone()),
                ("CropBox", media_box),
                ("Parent", Reference(pages_id)),
                ("Resources", Reference(resources_id)),
            ]);

            let annotation_references: Vec<lopdf::Object> = page
                .annotations
                .into_iter()
                .map(|annotation| Reference(self.inner_document.add_object(annotation)))
                .collect();
            page_dictionary.set("Annots", annotation_references);

            // Every layer is wrapped in its own graphics state, then all of them are merged
            let mut merged_layer_streams = Vec::<u8>::new();
            for mut layer in page.layers {
                layer.operations.insert(0, Operation::new("q", vec![]));
                layer.operations.push(Operation::new("Q", vec![]));
                merged_layer_streams.append(&mut layer.encode()?);
            }
            let merged_layer_stream =
                lopdf::Stream::new(lopdf::Dictionary::new(), merged_layer_streams)
                    .with_compression(false);
            let page_content_id = self.inner_document.add_object(merged_layer_stream);
            page_dictionary.set("Contents", Reference(page_content_id));

            let page_id = self.inner_document.add_object(page_dictionary);
            page_ids.push(Reference(page_id));
        }

        let pages = lopdf::Dictionary::from_iter(vec![
            ("Type", "Pages".into()),
            ("Count", Integer(page_ids.len() as i64)),
            ("Kids", page_ids.into()),
        ]);
        self.inner_document
            .objects
            .insert(pages_id, Dictionary(pages));

        Ok(())
    }

    /// Save the `PdfDocument` to bytes in order for it to be written to a file or further processed.
    pub fn save_to_bytes(mut self) -> Result<Vec<u8>, ContextError> {
        let mut pdf_document_bytes = Vec::new();
        let mut writer = BufWriter::new(&mut pdf_document_bytes);
        self.inner_document.save_to(&mut writer).map_err(|error| {
            ContextError::with_error(
                ErrorKind::Render,
                "Error while saving the PDF document to bytes",
                &error,
            )
        })?;
        mem::drop(writer);

        Ok(pdf_document_bytes)
    }

    fn add_operations_to_layer_in_page(
        &mut self,
        layer_index: usize,
        page_index: usize,
        operations: Vec<Operation>,
    ) -> Result<(), ContextError> {
        let pdf_layer = self
            .pages
            .get_mut(page_index)
            .and_then(|page| page.layers.get_mut(layer_index))
            .ok_or_else(|| {
                ContextError::render(format!(
                    "Failed to find the layer with index {} in the page with index {}",
                    layer_index, page_index
                ))
            })?;
        pdf_layer.operations.extend(operations);

        Ok(())
    }
}

/// Formats the given time so that it matches what the PDF specification expects.
/// An example of it is the following: D:20170505150224+02'00'.
fn to_pdf_timestamp_format(date: &OffsetDateTime) -> String {
    let offset = date.offset();
    let offset_sign = if offset.is_negative() { '-' } else { '+' };
    format!(
        "D:{:04}{:02}{:02}{:02}{:02}{:02}{offset_sign}{:02}'{:02}'",
        date.year(),
        u8::from(date.month()),
        date.day(),
        date.hour(),
        date.minute(),
        date.second(),
        offset.whole_hours().abs(),
        offset.minutes_past_hour().abs(),
    )
}

const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// The 64 bits FNV-1a hash, spelled out so that identifiers never change between toolchains.
fn fnv1a<'a>(bytes: impl Iterator<Item = &'a u8>) -> u64 {
    bytes.fold(FNV_OFFSET_BASIS, |hash, byte| {
        (hash ^ u64::from(*byte)).wrapping_mul(FNV_PRIME)
    })
}

/// The content of the deck an identifier is derived from, texts are terminated by 0xFF.
fn identity_bytes(deck: &Deck) -> Vec<u8> {
    let mut bytes = Vec::new();
    bytes.extend_from_slice(deck.title.as_bytes());
    bytes.push(0xFF);
    for slide in deck.slides() {
        bytes.push(slide.section() as u8);
        for text in slide.text_content() {
            bytes.extend_from_slice(text.as_bytes());
            bytes.push(0xFF);
        }
        bytes.push(0xFE);
        match slide.notes() {
            Some(notes) => {
                bytes.push(1);
                bytes.extend_from_slice(notes.as_bytes());
                bytes.push(0xFF);
            }
            None => bytes.push(0),
        }
        let page_number = slide.page_number().map_or(0, |number| number as u64 + 1);
        bytes.extend_from_slice(&page_number.to_le_bytes());
    }
    bytes
}

/// A 32 hexadecimal digits identifier derived from the content of the deck.
fn deck_identifier(deck: &Deck) -> String {
    let bytes = identity_bytes(deck);
    format!(
        "{:016x}{:016x}",
        fnv1a(bytes.iter()),
        fnv1a(bytes.iter().rev())
    )
}

fn creation_date(configuration: &DeckConfiguration) -> Result<OffsetDateTime, ContextError> {
    match configuration.creation_timestamp {
        Some(timestamp) => OffsetDateTime::from_unix_timestamp(timestamp).map_err(|error| {
            ContextError::with_error(
                ErrorKind::Configuration,
                format!("Invalid creation timestamp {}", timestamp),
                &error,
            )
        }),
        None => Ok(OffsetDateTime::now_utc()),
    }
}

/// Converts the deck into a PDF document with one page per slide. The speaker notes of a slide
/// become a text annotation of its page.
pub fn render_deck(
    deck: &Deck,
    configuration: &DeckConfiguration,
) -> Result<PdfDocument, ContextError> {
    let mut pdf_document = PdfDocument::new(
        deck_identifier(deck),
        deck.title.clone(),
        creation_date(configuration)?,
    );
    let page_width = inches_to_points(deck.width);
    let page_height = inches_to_points(deck.height);

    for slide in deck.slides() {
        let (page_index, layer_index) = pdf_document.add_page_with_layer(page_width, page_height);
        let mut canvas = Canvas {
            document: &mut pdf_document,
            page_index,
            layer_index,
            page_height,
        };
        canvas.draw_slide(slide)?;
        if let Some(notes) = slide.notes() {
            pdf_document.add_text_annotation(page_index, notes)?;
        }
    }

    pdf_document.write_all()?;
    log::debug!(
        "Rendered {} slides into the PDF document {}",
        deck.len(),
        pdf_document.identifier
    );
    Ok(pdf_document)
}

/// A line of text ready to be placed, with its horizontal indentation in inches.
struct PlacedLine<'a> {
    text: String,
    style: &'a TextStyle,
    indent: f64,
}

/// Draws the elements of one slide onto one page, converting the slide frames (inches from the
/// top left corner) into page coordinates.
struct Canvas<'d> {
    document: &'d mut PdfDocument,
    page_index: usize,
    layer_index: usize,
    page_height: f32,
}

impl Canvas<'_> {
    fn draw_slide(&mut self, slide: &Slide) -> Result<(), ContextError> {
        for element in slide.elements() {
            match element {
                Element::Shape(shape) => self.draw_shape(shape)?,
                Element::TextBox(text_box) => self.draw_text_box(text_box)?,
                Element::Table(table) => self.draw_table(table)?,
            }
        }
        Ok(())
    }

    /// The frame in page coordinates: left, bottom, width and height in points.
    fn page_rectangle(&self, frame: &Frame) -> (f32, f32, f32, f32) {
        (
            inches_to_points(frame.left),
            self.page_height - inches_to_points(frame.bottom()),
            inches_to_points(frame.width),
            inches_to_points(frame.height),
        )
    }

    fn draw_path(&mut self, path: &[PathSegment], paint: Paint) -> Result<(), ContextError> {
        self.document
            .draw_path_to_layer_in_page(self.page_index, self.layer_index, path, paint)
    }

    fn draw_shape(&mut self, shape: &Shape) -> Result<(), ContextError> {
        let (x, y, width, height) = self.page_rectangle(&shape.frame);
        let path = match shape.kind {
            ShapeKind::Rectangle => rectangle_path(x, y, width, height),
            ShapeKind::RoundedRectangle => {
                rounded_rectangle_path(x, y, width, height, width.min(height) * 0.1)
            }
            ShapeKind::Oval => oval_path(x, y, width, height),
            ShapeKind::RightTriangle => right_triangle_path(x, y, width, height),
        };
        let fill = shape.fill.as_ref().map(|fill| match fill {
            Fill::Solid(color) => color.to_unit_components(),
            Fill::Gradient { start, .. } => start.to_unit_components(),
        });
        let stroke = shape
            .outline
            .as_ref()
            .map(|outline| (outline.color.to_unit_components(), outline.width as f32));

        self.draw_path(&path, Paint { fill, stroke })
    }

    fn draw_text_box(&mut self, text_box: &TextBox) -> Result<(), ContextError> {
        if let Some(background) = text_box.background {
            let (x, y, width, height) = self.page_rectangle(&text_box.frame);
            self.draw_path(
                &rectangle_path(x, y, width, height),
                Paint {
                    fill: Some(background.to_unit_components()),
                    stroke: None,
                },
            )?;
        }

        let available_width = text_box.frame.width - 2.0 * TEXT_INSET;
        let mut lines = Vec::new();
        for paragraph in &text_box.paragraphs {
            let indent = f64::from(paragraph.level) * LEVEL_INDENT;
            let text = match paragraph.bullet {
                Some(bullet) => format!("{}{}", bullet.glyph(false), paragraph.text),
                None => paragraph.text.clone(),
            };
            for line in wrap_text(&text, paragraph.style.font_size, available_width - indent) {
                lines.push(PlacedLine {
                    text: line,
                    style: &paragraph.style,
                    indent,
                });
            }
        }
        self.draw_lines(&lines, &text_box.frame, text_box.vertical_anchor)
    }

    fn draw_lines(
        &mut self,
        lines: &[PlacedLine],
        frame: &Frame,
        vertical_anchor: VerticalAnchor,
    ) -> Result<(), ContextError> {
        let inset = inches_to_points(TEXT_INSET);
        let (left, bottom, width, height) = self.page_rectangle(frame);
        let top = bottom + height;
        let text_height: f32 = lines
            .iter()
            .map(|line| line.style.font_size as f32 * LINE_SPACING)
            .sum();
        let mut cursor = match vertical_anchor {
            VerticalAnchor::Top => top - inset,
            VerticalAnchor::Middle => top - ((height - text_height) / 2.0).max(inset),
        };

        for line in lines {
            let font = StandardFont::for_style(line.style);
            let font_size = line.style.font_size as f32;
            let line_height = font_size * LINE_SPACING;
            let baseline = cursor - line_height + (line_height - font_size) / 2.0 + font_size * 0.2;
            let line_left = left + inset + inches_to_points(line.indent);
            let line_width = left + width - inset - line_left;
            let text_width = font.text_width(&line.text, font_size);
            let x = match line.style.alignment {
                Alignment::Left => line_left,
                Alignment::Center => line_left + ((line_width - text_width) / 2.0).max(0.0),
                Alignment::Right => line_left + (line_width - text_width).max(0.0),
            };

            self.document.write_text_to_layer_in_page(
                self.page_index,
                self.layer_index,
                line.style.color.to_unit_components(),
                &line.text,
                font,
                font_size,
                [x, baseline],
            )?;
            cursor -= line_height;
        }
        Ok(())
    }

    fn draw_table(&mut self, table: &Table) -> Result<(), ContextError> {
        if table.rows.is_empty() {
            return Ok(());
        }
        let total_weight: f64 = table.column_weights.iter().sum();
        let row_height = table.frame.height / table.rows.len() as f64;
        let border = table.border.map(|color: Color| (color.to_unit_components(), 1.0));

        for (row_index, row) in table.rows.iter().enumerate() {
            let mut cell_left = table.frame.left;
            for (column_index, cell) in row.iter().enumerate() {
                let weight = table.column_weights.get(column_index).copied().unwrap_or(1.0);
                let cell_width = if total_weight > 0.0 {
                    table.frame.width * weight / total_weight
                } else {
                    table.frame.width / row.len() as f64
                };
                let cell_frame = Frame::new(
                    cell_left,
                    table.frame.top + row_index as f64 * row_height,
                    cell_width,
                    row_height,
                );
                let (x, y, width, height) = self.page_rectangle(&cell_frame);
                self.draw_path(
                    &rectangle_path(x, y, width, height),
                    Paint {
                        fill: Some(cell.background.to_unit_components()),
                        stroke: border,
                    },
                )?;

                let lines: Vec<PlacedLine> =
                    wrap_text(&cell.text, cell.style.font_size, cell_width - 2.0 * TEXT_INSET)
                        .into_iter()
                        .map(|text| PlacedLine {
                            text,
                            style: &cell.style,
                            indent: 0.0,
                        })
                        .collect();
                self.draw_lines(&lines, &cell_frame, VerticalAnchor::Middle)?;
                cell_left += cell_width;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::{Capabilities, Paragraph};
    use crate::configuration::Geometry;
    use crate::pagination::Section;

    fn sample_deck() -> Deck {
        let mut deck = Deck::new(&Geometry::default(), Capabilities::PDF);
        deck.title = "Cells".into();
        let slide = deck.add_slide(Section::Title);
        slide.add_text_box(TextBox::with_paragraphs(
            Frame::new(0.5, 0.5, 9.0, 1.0),
            vec![Paragraph::new("Café “cells”", TextStyle::new(24.0, Color::BLACK))],
        ));
        slide.add_shape(Shape::filled(
            ShapeKind::Oval,
            Frame::new(1.0, 2.0, 1.0, 1.0),
            Color::rgb(0x00, 0x71, 0xC5),
        ));
        slide.set_notes("Speak slowly");
        deck.add_slide(Section::Closing);
        deck
    }

    fn fixed_configuration() -> DeckConfiguration {
        DeckConfiguration {
            creation_timestamp: Some(1_700_000_000),
            ..DeckConfiguration::default()
        }
    }

    #[test]
    fn win_ansi_encoding_maps_typographic_characters() {
        assert_eq!(encode_win_ansi("A•–é"), vec![b'A', 0x95, 0x96, 0xE9]);
        assert_eq!(encode_win_ansi("◦ 漢"), vec![b'?', b' ', b'?']);
    }

    #[test]
    fn timestamps_follow_the_pdf_date_format() {
        let date = OffsetDateTime::from_unix_timestamp(1_700_000_000).unwrap();
        assert_eq!(to_pdf_timestamp_format(&date), "D:20231114221320+00'00'");
    }

    #[test]
    fn identifiers_only_depend_on_the_content() {
        let deck = sample_deck();
        let identifier = deck_identifier(&deck);

        assert_eq!(identifier.len(), 32);
        assert_eq!(identifier, deck_identifier(&sample_deck()));
        assert_eq!(fnv1a(b"a".iter()), 0xaf63_dc4c_8601_ec8c);
        // Pinned, the hash is independent of the toolchain
        assert_eq!(identifier, "9283c736794a697403d5f2e796bc9184");
        let mut other_deck = sample_deck();
        other_deck.title = "Atoms".into();
        assert_ne!(identifier, deck_identifier(&other_deck));
    }

    #[test]
    fn rendering_is_reproducible_with_a_fixed_date() {
        let first = render_deck(&sample_deck(), &fixed_configuration())
            .unwrap()
            .save_to_bytes()
            .unwrap();
        let second = render_deck(&sample_deck(), &fixed_configuration())
            .unwrap()
            .save_to_bytes()
            .unwrap();

        assert!(first.starts_with(b"%PDF-1.5"));
        assert_eq!(first, second);
    }

    #[test]
    fn rendered_pages_carry_notes_as_annotations() {
        let bytes = render_deck(&sample_deck(), &fixed_configuration())
            .unwrap()
            .save_to_bytes()
            .unwrap();
        let document = lopdf::Document::load_mem(&bytes).unwrap();
        let pages = document.get_pages();
        assert_eq!(pages.len(), 2);

        let annotation_counts: Vec<usize> = pages
            .values()
            .map(|page_id| {
                let page = document.get_dictionary(*page_id).unwrap();
                page.get(b"Annots").unwrap().as_array().unwrap().len()
            })
            .collect();
        assert_eq!(annotation_counts, vec![1, 0]);
    }

    #[test]
    fn rounded_rectangles_stay_inside_their_frame() {
        let path = rounded_rectangle_path(10.0, 20.0, 100.0, 50.0, 40.0);
        for segment in path {
            let points = match segment {
                PathSegment::MoveTo(point) | PathSegment::LineTo(point) => vec![point],
                PathSegment::CurveTo(first, second, third) => vec![first, second, third],
                PathSegment::Close => vec![],
            };
            for [x, y] in points {
                assert!((10.0..=110.0).contains(&x) && (20.0..=70.0).contains(&y));
            }
        }
    }
}
