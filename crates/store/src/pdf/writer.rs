//! PDF file writer
//!
//! Low-level file layout (header, indirect objects, cross-reference table,
//! trailer) plus the high-level `ReportDocument` that assembles one page per
//! raster band.

use std::io::{self, Write};

use flate2::write::ZlibEncoder;
use flate2::Compression;
use page_layout::{mm_to_pt, PageGeometry};
use thiserror::Error;

use super::content::place_image;
use super::image::ImageXObject;
use super::object::{Dict, ObjId, Object};
use super::page::{catalog, page_dict, page_tree, DocumentMetadata, IMAGE_NAME};

/// Error type for PDF operations.
#[derive(Debug, Error)]
pub enum PdfError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid document: {0}")]
    InvalidDocument(String),
}

pub type Result<T> = std::result::Result<T, PdfError>;

/// Zlib-compress a byte buffer for a FlateDecode stream.
pub(crate) fn deflate(data: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    Ok(encoder.finish()?)
}

/// Low-level PDF writer tracking byte offsets for the xref table.
pub struct PdfWriter<W: Write> {
    writer: W,
    position: u64,
    offsets: Vec<(ObjId, u64)>,
    next_id: ObjId,
}

impl<W: Write> PdfWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            position: 0,
            offsets: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate the next object number.
    pub fn allocate(&mut self) -> ObjId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn write_bytes(&mut self, data: &[u8]) -> Result<()> {
        self.writer.write_all(data)?;
        self.position += data.len() as u64;
        Ok(())
    }

    /// Write the header and binary marker.
    pub fn write_header(&mut self) -> Result<()> {
        self.write_bytes(b"%PDF-1.4\n")?;
        self.write_bytes(&[b'%', 0xE2, 0xE3, 0xCF, 0xD3, b'\n'])?;
        Ok(())
    }

    /// Write an indirect object.
    pub fn write_object(&mut self, id: ObjId, object: Object) -> Result<()> {
        self.offsets.push((id, self.position));
        self.write_bytes(format!("{id} 0 obj\n").as_bytes())?;
        let mut body = Vec::new();
        object.render(&mut body);
        self.write_bytes(&body)?;
        self.write_bytes(b"\nendobj\n")?;
        Ok(())
    }

    /// Write a stream object. The caller's dictionary must already carry any
    /// `/Filter`; `/Length` is added here.
    pub fn write_stream(&mut self, id: ObjId, mut dict: Dict, data: &[u8]) -> Result<()> {
        dict.set("Length", Object::Integer(data.len() as i64));

        self.offsets.push((id, self.position));
        self.write_bytes(format!("{id} 0 obj\n").as_bytes())?;
        let mut head = Vec::new();
        dict.render(&mut head);
        self.write_bytes(&head)?;
        self.write_bytes(b"\nstream\n")?;
        self.write_bytes(data)?;
        self.write_bytes(b"\nendstream\nendobj\n")?;
        Ok(())
    }

    /// Write the cross-reference table and trailer.
    pub fn write_xref_and_trailer(&mut self, catalog_id: ObjId, info_id: ObjId) -> Result<()> {
        let xref_offset = self.position;
        self.offsets.sort_by_key(|&(id, _)| id);

        self.write_bytes(format!("xref\n0 {}\n", self.next_id).as_bytes())?;
        self.write_bytes(b"0000000000 65535 f \n")?;

        let entries = self.offsets.clone();
        let mut expected = 1;
        for (id, offset) in entries {
            while expected < id {
                self.write_bytes(b"0000000000 65535 f \n")?;
                expected += 1;
            }
            self.write_bytes(format!("{:010} 00000 n \n", offset).as_bytes())?;
            expected = id + 1;
        }

        let mut trailer = Dict::new();
        trailer.set("Size", Object::Integer(self.next_id as i64));
        trailer.set("Root", Object::Ref(catalog_id));
        trailer.set("Info", Object::Ref(info_id));

        let mut body = Vec::new();
        trailer.render(&mut body);
        self.write_bytes(b"trailer\n")?;
        self.write_bytes(&body)?;
        self.write_bytes(format!("\nstartxref\n{}\n%%EOF\n", xref_offset).as_bytes())?;
        Ok(())
    }

    /// Flush and return the inner writer.
    pub fn finish(mut self) -> Result<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}

/// One output page: an image band and its placement in millimetres.
///
/// `x_mm`/`y_mm` locate the image's top-left corner from the page's top-left
/// corner; conversion to PDF's bottom-left origin happens at write time.
#[derive(Debug, Clone)]
pub struct ReportPage {
    pub image: ImageXObject,
    pub x_mm: f64,
    pub y_mm: f64,
    pub width_mm: f64,
    pub height_mm: f64,
}

/// A complete paginated report document.
#[derive(Debug, Clone)]
pub struct ReportDocument {
    pub geometry: PageGeometry,
    pub metadata: DocumentMetadata,
    pub pages: Vec<ReportPage>,
}

impl ReportDocument {
    /// Write the document to an output.
    pub fn write<W: Write>(&self, writer: W) -> Result<()> {
        if self.pages.is_empty() {
            return Err(PdfError::InvalidDocument("no pages to export".to_string()));
        }

        let mut pdf = PdfWriter::new(writer);
        pdf.write_header()?;

        let catalog_id = pdf.allocate();
        let tree_id = pdf.allocate();
        let info_id = pdf.allocate();

        let mut page_ids = Vec::with_capacity(self.pages.len());
        let mut content_ids = Vec::with_capacity(self.pages.len());
        let mut image_ids = Vec::with_capacity(self.pages.len());
        for _ in &self.pages {
            page_ids.push(pdf.allocate());
            content_ids.push(pdf.allocate());
            image_ids.push(pdf.allocate());
        }

        pdf.write_object(catalog_id, Object::Dict(catalog(tree_id)))?;
        pdf.write_object(tree_id, Object::Dict(page_tree(&page_ids)))?;
        pdf.write_object(info_id, Object::Dict(self.metadata.to_dict()))?;

        let page_width_pt = self.geometry.page_width_pt();
        let page_height_pt = self.geometry.page_height_pt();

        for (i, page) in self.pages.iter().enumerate() {
            // Flip to PDF's bottom-left origin.
            let x_pt = mm_to_pt(page.x_mm);
            let y_pt =
                mm_to_pt(self.geometry.page_height_mm - page.y_mm - page.height_mm);

            let content = place_image(
                IMAGE_NAME,
                x_pt,
                y_pt,
                mm_to_pt(page.width_mm),
                mm_to_pt(page.height_mm),
            );
            pdf.write_stream(content_ids[i], Dict::new(), &content.into_bytes())?;

            let (image_dict, image_data) = page.image.stream_parts();
            pdf.write_stream(image_ids[i], image_dict, image_data)?;

            pdf.write_object(
                page_ids[i],
                Object::Dict(page_dict(
                    tree_id,
                    page_width_pt,
                    page_height_pt,
                    content_ids[i],
                    image_ids[i],
                )),
            )?;
        }

        pdf.write_xref_and_trailer(catalog_id, info_id)?;
        pdf.finish()?;
        Ok(())
    }

    /// Write the document into a byte vector.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        self.write(&mut buffer)?;
        Ok(buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_and_marker() {
        let mut buffer = Vec::new();
        let mut writer = PdfWriter::new(&mut buffer);
        writer.write_header().unwrap();

        assert!(buffer.starts_with(b"%PDF-1.4\n"));
        assert_eq!(buffer[9], b'%');
    }

    #[test]
    fn test_write_object_records_offset() {
        let mut buffer = Vec::new();
        let mut writer = PdfWriter::new(&mut buffer);
        writer.write_header().unwrap();

        let id = writer.allocate();
        writer.write_object(id, Object::Integer(42)).unwrap();
        assert_eq!(writer.offsets.len(), 1);
        assert_eq!(writer.offsets[0].0, 1);
        drop(writer);

        let text = String::from_utf8_lossy(&buffer);
        assert!(text.contains("1 0 obj\n42\nendobj"));
    }

    #[test]
    fn test_stream_gets_length() {
        let mut buffer = Vec::new();
        let mut writer = PdfWriter::new(&mut buffer);
        let id = writer.allocate();
        writer.write_stream(id, Dict::new(), b"q\nQ\n").unwrap();

        let text = String::from_utf8_lossy(&buffer);
        assert!(text.contains("/Length 4"));
        assert!(text.contains("stream\nq\nQ\n\nendstream"));
    }

    #[test]
    fn test_deflate_roundtrip() {
        use std::io::Read;

        let data = vec![7u8; 4096];
        let compressed = deflate(&data).unwrap();
        assert!(compressed.len() < data.len());

        let mut decoder = flate2::read::ZlibDecoder::new(compressed.as_slice());
        let mut restored = Vec::new();
        decoder.read_to_end(&mut restored).unwrap();
        assert_eq!(restored, data);
    }

    #[test]
    fn test_empty_document_rejected() {
        let document = ReportDocument {
            geometry: PageGeometry::a4(),
            metadata: DocumentMetadata::default(),
            pages: Vec::new(),
        };
        assert!(document.to_bytes().is_err());
    }
}
