//! Document structure and metadata
//!
//! Builders for the catalog, page tree, page, and info dictionaries.

use chrono::{DateTime, Utc};

use super::object::{Dict, ObjId, Object};

/// Resource name every page's single image is registered under.
pub const IMAGE_NAME: &str = "Im0";

/// Document information dictionary fields.
#[derive(Debug, Clone, Default)]
pub struct DocumentMetadata {
    pub title: String,
    pub subject: String,
    pub author: String,
    pub creator: String,
    /// Joined with commas in the info dictionary.
    pub keywords: Vec<String>,
    pub creation_date: Option<DateTime<Utc>>,
}

impl DocumentMetadata {
    pub fn to_dict(&self) -> Dict {
        let mut dict = Dict::new();
        if !self.title.is_empty() {
            dict.set("Title", Object::text(&self.title));
        }
        if !self.subject.is_empty() {
            dict.set("Subject", Object::text(&self.subject));
        }
        if !self.author.is_empty() {
            dict.set("Author", Object::text(&self.author));
        }
        if !self.creator.is_empty() {
            dict.set("Creator", Object::text(&self.creator));
        }
        if !self.keywords.is_empty() {
            dict.set("Keywords", Object::text(self.keywords.join(",")));
        }
        if let Some(date) = self.creation_date {
            dict.set("CreationDate", Object::text(pdf_date(date)));
        }
        dict
    }
}

/// Render a timestamp in PDF date format.
fn pdf_date(date: DateTime<Utc>) -> String {
    date.format("D:%Y%m%d%H%M%S+00'00'").to_string()
}

/// Document catalog pointing at the page tree.
pub fn catalog(page_tree: ObjId) -> Dict {
    let mut dict = Dict::of_type("Catalog");
    dict.set("Pages", Object::Ref(page_tree));
    dict
}

/// Page tree root over the given page objects.
pub fn page_tree(kids: &[ObjId]) -> Dict {
    let mut dict = Dict::of_type("Pages");
    dict.set(
        "Kids",
        kids.iter().map(|&id| Object::Ref(id)).collect::<Vec<_>>(),
    );
    dict.set("Count", Object::Integer(kids.len() as i64));
    dict
}

/// A page dictionary with its content stream and single image resource.
pub fn page_dict(
    parent: ObjId,
    width_pt: f64,
    height_pt: f64,
    content: ObjId,
    image: ObjId,
) -> Dict {
    let mut dict = Dict::of_type("Page");
    dict.set("Parent", Object::Ref(parent));
    dict.set(
        "MediaBox",
        vec![
            Object::Real(0.0),
            Object::Real(0.0),
            Object::Real(width_pt),
            Object::Real(height_pt),
        ],
    );
    dict.set("Contents", Object::Ref(content));

    let mut xobjects = Dict::new();
    xobjects.set(IMAGE_NAME, Object::Ref(image));

    let mut resources = Dict::new();
    resources.set("XObject", xobjects);
    resources.set(
        "ProcSet",
        vec![Object::name("PDF"), Object::name("ImageC")],
    );
    dict.set("Resources", resources);

    dict
}
