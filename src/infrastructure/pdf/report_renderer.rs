use crate::application::use_cases::report::ReportLine;
use crate::domain::error::{AppError, Result};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

// US letter, 1-inch margins, quarter-inch line step. Whole points.
const PAGE_WIDTH: i64 = 612;
const PAGE_HEIGHT: i64 = 792;
const MARGIN: i64 = 72;
const LINE_STEP: i64 = 18;
const SECTION_STEP: i64 = 36;
const FIELD_INDENT: i64 = 86;
const SUB_ITEM_INDENT: i64 = 101;

const REGULAR_FONT: &str = "F1";
const BOLD_FONT: &str = "F2";

/// Draw report lines onto letter pages, breaking to a new page when the
/// cursor passes the bottom margin. Returns the complete PDF byte stream.
pub fn render_report(lines: &[ReportLine]) -> Result<Vec<u8>> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let regular_font = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let bold_font = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica-Bold",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            REGULAR_FONT => regular_font,
            BOLD_FONT => bold_font,
        },
    });

    let mut pages: Vec<Vec<Operation>> = Vec::new();
    let mut operations: Vec<Operation> = Vec::new();
    let mut cursor = PAGE_HEIGHT - MARGIN;

    for line in lines {
        if cursor < MARGIN {
            pages.push(std::mem::take(&mut operations));
            cursor = PAGE_HEIGHT - MARGIN;
        }

        let (font, size, x, step) = match line {
            ReportLine::Title(_) => (BOLD_FONT, 16, MARGIN, SECTION_STEP),
            ReportLine::Heading(_) => (REGULAR_FONT, 12, MARGIN, SECTION_STEP),
            ReportLine::Field(_) => (REGULAR_FONT, 12, FIELD_INDENT, LINE_STEP),
            ReportLine::SubItem(_) => (REGULAR_FONT, 12, SUB_ITEM_INDENT, LINE_STEP),
        };

        push_text(&mut operations, font, size, x, cursor, line.text());
        cursor -= step;
    }
    pages.push(operations);

    let mut kids: Vec<Object> = Vec::new();
    let page_count = pages.len();
    for page_operations in pages {
        let content = Content {
            operations: page_operations,
        };
        let encoded = content
            .encode()
            .map_err(|e| AppError::Internal(format!("Failed to encode page content: {}", e)))?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));

        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "MediaBox" => vec![0.into(), 0.into(), PAGE_WIDTH.into(), PAGE_HEIGHT.into()],
            "Resources" => resources_id,
        });
        kids.push(page_id.into());
    }

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_count as i64,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.compress();

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer)
        .map_err(|e| AppError::Internal(format!("Failed to write PDF: {}", e)))?;
    Ok(buffer)
}

fn push_text(operations: &mut Vec<Operation>, font: &str, size: i64, x: i64, y: i64, text: &str) {
    operations.push(Operation::new("BT", vec![]));
    operations.push(Operation::new("Tf", vec![font.into(), size.into()]));
    operations.push(Operation::new("Td", vec![x.into(), y.into()]));
    operations.push(Operation::new("Tj", vec![Object::string_literal(text)]));
    operations.push(Operation::new("ET", vec![]));
}
