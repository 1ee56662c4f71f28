//! End-to-end assembly tests for the PDF module.

use capture::RasterImage;
use chrono::TimeZone;
use chrono::Utc;
use page_layout::PageGeometry;

use super::*;

fn band(width: u32, height: u32) -> ImageXObject {
    ImageXObject::from_raster(&RasterImage::blank(width, height)).unwrap()
}

fn test_metadata() -> DocumentMetadata {
    DocumentMetadata {
        title: "Jane Doe Progress Report".to_string(),
        subject: "Student Progress Report".to_string(),
        author: "Bright Beginnings Academy".to_string(),
        creator: "Report Studio PDF Export".to_string(),
        keywords: vec!["student".to_string(), "report".to_string()],
        creation_date: Some(Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap()),
    }
}

fn single_page_document() -> ReportDocument {
    let geometry = PageGeometry::a4();
    ReportDocument {
        geometry,
        metadata: test_metadata(),
        pages: vec![ReportPage {
            image: band(408, 200),
            x_mm: 3.0,
            y_mm: 98.5,
            width_mm: 204.0,
            height_mm: 100.0,
        }],
    }
}

#[test]
fn test_single_page_document_structure() {
    let bytes = single_page_document().to_bytes().unwrap();
    let text = String::from_utf8_lossy(&bytes);

    assert!(text.starts_with("%PDF-1.4"));
    assert!(text.contains("/Type /Catalog"));
    assert!(text.contains("/Type /Pages"));
    assert!(text.contains("/Count 1"));
    assert!(text.contains("/Type /Page"));
    assert!(text.contains("/Subtype /Image"));
    assert!(text.contains("/Filter /FlateDecode"));
    assert!(text.contains("xref"));
    assert!(text.contains("trailer"));
    assert!(text.contains("startxref"));
    assert!(text.ends_with("%%EOF\n"));
}

#[test]
fn test_metadata_embedded() {
    let bytes = single_page_document().to_bytes().unwrap();
    let text = String::from_utf8_lossy(&bytes);

    assert!(text.contains("(Jane Doe Progress Report)"));
    assert!(text.contains("(Student Progress Report)"));
    assert!(text.contains("(Bright Beginnings Academy)"));
    assert!(text.contains("(Report Studio PDF Export)"));
    assert!(text.contains("(student,report)"));
    assert!(text.contains("(D:20240301000000+00'00')"));
}

#[test]
fn test_multi_page_document() {
    let geometry = PageGeometry::a4();
    let pages: Vec<ReportPage> = (0..3)
        .map(|_| ReportPage {
            image: band(408, 582),
            x_mm: 3.0,
            y_mm: 3.0,
            width_mm: 204.0,
            height_mm: 291.0,
        })
        .collect();

    let document = ReportDocument {
        geometry,
        metadata: test_metadata(),
        pages,
    };
    let bytes = document.to_bytes().unwrap();
    let text = String::from_utf8_lossy(&bytes);

    assert!(text.contains("/Count 3"));
    assert_eq!(text.matches("/Type /Page >>").count(), 3);
    assert_eq!(text.matches("/Im0 Do").count(), 3);
}

#[test]
fn test_media_box_is_a4_points() {
    let bytes = single_page_document().to_bytes().unwrap();
    let text = String::from_utf8_lossy(&bytes);

    assert!(text.contains("/MediaBox [0.0 0.0 595.2756 841.8898]"));
}

#[test]
fn test_xref_entry_count() {
    // 3 document objects + 3 per page, plus the free entry for object 0.
    let bytes = single_page_document().to_bytes().unwrap();
    let text = String::from_utf8_lossy(&bytes);

    assert!(text.contains("xref\n0 7\n"));
}

#[test]
fn test_content_stream_places_image_at_margin() {
    let bytes = single_page_document().to_bytes().unwrap();
    let text = String::from_utf8_lossy(&bytes);

    // 204 mm wide and 100 mm tall at x = 3 mm in points.
    assert!(text.contains("578.2677 0 0 283.4646"));
    assert!(text.contains("/Im0 Do"));
}
