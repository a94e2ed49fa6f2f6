//! PDF rendering with lopdf using the standard Helvetica and Courier fonts.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream};

use super::{PdfRenderer, RenderError};

/// A4 in points.
const PAGE_WIDTH: i64 = 595;
const PAGE_HEIGHT: i64 = 842;
const MARGIN: i64 = 56;

const TITLE_SIZE: i64 = 18;
const BODY_SIZE: i64 = 11;
const LEADING: i64 = 15;

/// Characters per body line for Courier at `BODY_SIZE`.
const WRAP_COLUMNS: usize = 78;

/// Renders plain text into a paginated A4 document.
#[derive(Debug, Clone, Default)]
pub struct LopdfRenderer;

impl LopdfRenderer {
    pub fn new() -> Self {
        Self
    }

    fn lines_per_page() -> usize {
        ((PAGE_HEIGHT - 2 * MARGIN - 2 * LEADING) / LEADING) as usize
    }

    fn page_content(title: Option<&str>, lines: &[String]) -> Content {
        let mut operations = vec![
            Operation::new("BT", vec![]),
            Operation::new("Td", vec![MARGIN.into(), (PAGE_HEIGHT - MARGIN).into()]),
        ];

        if let Some(title) = title {
            operations.push(Operation::new("Tf", vec!["F1".into(), TITLE_SIZE.into()]));
            operations.push(Operation::new("Tj", vec![text_object(title)]));
            operations.push(Operation::new("Td", vec![0.into(), (-2 * LEADING).into()]));
        }

        operations.push(Operation::new("Tf", vec!["F2".into(), BODY_SIZE.into()]));
        operations.push(Operation::new("TL", vec![LEADING.into()]));
        for line in lines {
            operations.push(Operation::new("Tj", vec![text_object(line)]));
            operations.push(Operation::new("T*", vec![]));
        }
        operations.push(Operation::new("ET", vec![]));

        Content { operations }
    }
}

impl PdfRenderer for LopdfRenderer {
    fn render(&self, title: &str, body: &str) -> Result<Vec<u8>, RenderError> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let title_font = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica-Bold",
            "Encoding" => "WinAnsiEncoding",
        });
        let body_font = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Courier",
            "Encoding" => "WinAnsiEncoding",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! {
                "F1" => title_font,
                "F2" => body_font,
            },
        });

        let lines = wrap(body, WRAP_COLUMNS);
        let per_page = Self::lines_per_page();
        let mut chunks: Vec<&[String]> = lines.chunks(per_page).collect();
        if chunks.is_empty() {
            chunks.push(&[]);
        }

        let mut page_ids: Vec<ObjectId> = Vec::with_capacity(chunks.len());
        for (index, chunk) in chunks.iter().enumerate() {
            let title = (index == 0).then_some(title);
            let content = Self::page_content(title, chunk);
            let encoded = content
                .encode()
                .map_err(|e| RenderError::Encoding(e.to_string()))?;
            let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
            });
            page_ids.push(page_id);
        }

        let pages = dictionary! {
            "Type" => "Pages",
            "Count" => page_ids.len() as i64,
            "Kids" => page_ids.into_iter().map(Object::from).collect::<Vec<_>>(),
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), PAGE_WIDTH.into(), PAGE_HEIGHT.into()],
        };
        doc.objects.insert(pages_id, Object::Dictionary(pages));

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);
        doc.compress();

        let mut buffer = Vec::new();
        doc.save_to(&mut buffer)
            .map_err(|e| RenderError::Write(e.to_string()))?;
        Ok(buffer)
    }
}

/// Latin-1 bytes for the standard fonts; anything else becomes `?`.
fn text_object(text: &str) -> Object {
    let bytes: Vec<u8> = text
        .chars()
        .map(|c| u8::try_from(u32::from(c)).unwrap_or(b'?'))
        .collect();
    Object::string_literal(bytes)
}

/// Hard-wrap text on word boundaries, keeping blank lines.
fn wrap(text: &str, columns: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for raw in text.lines() {
        let mut current = String::new();
        for word in raw.split_whitespace() {
            let mut word = word.to_string();
            while word.chars().count() > columns {
                if !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                }
                let split_at = word
                    .char_indices()
                    .nth(columns)
                    .map(|(i, _)| i)
                    .unwrap_or(word.len());
                let rest = word.split_off(split_at);
                lines.push(word);
                word = rest;
            }
            let needed =
                current.chars().count() + word.chars().count() + usize::from(!current.is_empty());
            if needed > columns && !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(&word);
        }
        lines.push(current);
    }
    lines
}
