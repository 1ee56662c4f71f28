//! PDF object model
//!
//! The subset of PDF object types an image-per-page document needs.
//! Dictionaries keep their entries sorted so output is deterministic.

use std::collections::BTreeMap;
use std::io::Write as _;

/// Object number of an indirect object. Generation numbers are always 0.
pub type ObjId = u32;

/// A direct PDF object.
#[derive(Debug, Clone)]
pub enum Object {
    Integer(i64),
    Real(f64),
    /// Literal string, written escaped in parentheses.
    Text(String),
    Name(String),
    Array(Vec<Object>),
    Dict(Dict),
    Ref(ObjId),
}

impl Object {
    pub fn name(name: impl Into<String>) -> Self {
        Object::Name(name.into())
    }

    pub fn text(text: impl Into<String>) -> Self {
        Object::Text(text.into())
    }

    /// Serialize into the output buffer.
    pub fn render(&self, out: &mut Vec<u8>) {
        match self {
            Object::Integer(n) => {
                let _ = write!(out, "{n}");
            }
            Object::Real(x) => {
                let _ = write!(out, "{}", fmt_real(*x));
            }
            Object::Text(s) => render_text(s, out),
            Object::Name(n) => render_name(n, out),
            Object::Array(items) => {
                out.push(b'[');
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        out.push(b' ');
                    }
                    item.render(out);
                }
                out.push(b']');
            }
            Object::Dict(dict) => dict.render(out),
            Object::Ref(id) => {
                let _ = write!(out, "{id} 0 R");
            }
        }
    }
}

impl From<i64> for Object {
    fn from(n: i64) -> Self {
        Object::Integer(n)
    }
}

impl From<u32> for Object {
    fn from(n: u32) -> Self {
        Object::Integer(n as i64)
    }
}

impl From<f64> for Object {
    fn from(x: f64) -> Self {
        Object::Real(x)
    }
}

impl From<Dict> for Object {
    fn from(dict: Dict) -> Self {
        Object::Dict(dict)
    }
}

impl From<Vec<Object>> for Object {
    fn from(items: Vec<Object>) -> Self {
        Object::Array(items)
    }
}

/// A PDF dictionary with deterministic key order.
#[derive(Debug, Clone, Default)]
pub struct Dict {
    entries: BTreeMap<String, Object>,
}

impl Dict {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a dictionary carrying a `/Type` entry.
    pub fn of_type(type_name: &str) -> Self {
        let mut dict = Self::new();
        dict.set("Type", Object::name(type_name));
        dict
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Object>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Object> {
        self.entries.get(key)
    }

    pub fn render(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(b"<<");
        for (key, value) in &self.entries {
            out.push(b' ');
            render_name(key, out);
            out.push(b' ');
            value.render(out);
        }
        out.extend_from_slice(b" >>");
    }
}

/// Format a real number without trailing zeros.
fn fmt_real(x: f64) -> String {
    if x.fract() == 0.0 && x.abs() < 1e15 {
        return format!("{:.1}", x);
    }
    let s = format!("{:.4}", x);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    s.to_string()
}

/// Write a literal string with the required escapes.
fn render_text(s: &str, out: &mut Vec<u8>) {
    out.push(b'(');
    for byte in s.bytes() {
        match byte {
            b'(' | b')' | b'\\' => {
                out.push(b'\\');
                out.push(byte);
            }
            b'\n' => out.extend_from_slice(b"\\n"),
            b'\r' => out.extend_from_slice(b"\\r"),
            b'\t' => out.extend_from_slice(b"\\t"),
            0x20..=0x7E => out.push(byte),
            _ => {
                let _ = write!(out, "\\{:03o}", byte);
            }
        }
    }
    out.push(b')');
}

/// Write a name object, hex-escaping delimiters.
fn render_name(name: &str, out: &mut Vec<u8>) {
    out.push(b'/');
    for byte in name.bytes() {
        match byte {
            0x21..=0x7E if !b"#()<>[]{}/%".contains(&byte) => out.push(byte),
            _ => {
                let _ = write!(out, "#{:02X}", byte);
            }
        }
    }
}
