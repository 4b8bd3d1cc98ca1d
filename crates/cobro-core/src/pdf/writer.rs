//! Serializes laid out pages into a PDF document using lopdf.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream, StringFormat};
use tracing::debug;

use crate::error::RenderError;
use crate::layout::{DrawOp, Font, Page};

const FONTS: [Font; 2] = [Font::Helvetica, Font::HelveticaBold];

/// Writes [`Page`]s as a PDF using the standard Helvetica fonts.
#[derive(Debug, Clone, Default)]
pub struct PdfWriter {
    title: Option<String>,
}

impl PdfWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the document title stored in the info dictionary.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Write all pages, in order, into a single PDF.
    pub fn write(&self, pages: &[Page]) -> Result<Vec<u8>, RenderError> {
        if pages.is_empty() {
            return Err(RenderError::NoPages);
        }

        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let resources_id = add_font_resources(&mut doc);

        let mut kids = Vec::with_capacity(pages.len());
        for page in pages {
            let content = page_content(page);
            let encoded = content
                .encode()
                .map_err(|e| RenderError::Encode(e.to_string()))?;
            let content_id = doc.add_object(Stream::new(Dictionary::new(), encoded));

            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "MediaBox" => vec![0.into(), 0.into(), Object::Real(page.width), Object::Real(page.height)],
                "Contents" => content_id,
                "Resources" => resources_id,
            });
            kids.push(Object::Reference(page_id));
        }

        let count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
            }),
        );

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut info = dictionary! {
            "Producer" => Object::string_literal("cobro"),
        };
        if let Some(title) = &self.title {
            info.set("Title", Object::String(encode_win_ansi(title), StringFormat::Literal));
        }
        let info_id = doc.add_object(info);
        doc.trailer.set("Info", info_id);

        doc.compress();

        let mut buffer = Vec::new();
        doc.save_to(&mut buffer)
            .map_err(|e| RenderError::Encode(e.to_string()))?;

        debug!("Wrote PDF with {} pages ({} bytes)", count, buffer.len());
        Ok(buffer)
    }
}

fn add_font_resources(doc: &mut Document) -> ObjectId {
    let mut fonts = Dictionary::new();
    for font in FONTS {
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => font.base_name(),
            "Encoding" => "WinAnsiEncoding",
        });
        fonts.set(font.resource_name(), font_id);
    }
    doc.add_object(dictionary! {
        "Font" => fonts,
    })
}

fn page_content(page: &Page) -> Content {
    let mut operations = Vec::new();

    for op in &page.ops {
        match op {
            DrawOp::Text {
                x,
                y,
                font,
                size,
                text,
            } => {
                operations.push(Operation::new("BT", vec![]));
                operations.push(Operation::new(
                    "Tf",
                    vec![font.resource_name().into(), Object::Real(*size)],
                ));
                operations.push(Operation::new(
                    "Td",
                    vec![Object::Real(*x), Object::Real(*y)],
                ));
                operations.push(Operation::new(
                    "Tj",
                    vec![Object::String(encode_win_ansi(text), StringFormat::Literal)],
                ));
                operations.push(Operation::new("ET", vec![]));
            }
            DrawOp::Line { from, to } => {
                operations.push(Operation::new(
                    "m",
                    vec![Object::Real(from.0), Object::Real(from.1)],
                ));
                operations.push(Operation::new(
                    "l",
                    vec![Object::Real(to.0), Object::Real(to.1)],
                ));
                operations.push(Operation::new("S", vec![]));
            }
        }
    }

    Content { operations }
}

/// Encode text for a WinAnsi font. Latin-1 code points map to themselves,
/// anything else becomes `?`.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c as u32 {
            code @ (0x20..=0x7E | 0xA0..=0xFF) => code as u8,
            _ => b'?',
        })
        .collect()
}
