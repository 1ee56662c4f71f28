//! Page content streams
//!
//! Each report page paints a single image XObject, so the only operators
//! needed are the graphics-state pair, the transformation matrix, and `Do`.

use std::io::Write as _;

/// Builder for a page's content stream.
#[derive(Debug, Default)]
pub struct ContentStream {
    data: Vec<u8>,
}

impl ContentStream {
    pub fn new() -> Self {
        Self::default()
    }

    /// Save the graphics state (`q`).
    pub fn save_state(&mut self) -> &mut Self {
        self.data.extend_from_slice(b"q\n");
        self
    }

    /// Restore the graphics state (`Q`).
    pub fn restore_state(&mut self) -> &mut Self {
        self.data.extend_from_slice(b"Q\n");
        self
    }

    /// Concatenate a transformation matrix (`cm`).
    pub fn transform(&mut self, a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> &mut Self {
        let _ = writeln!(
            self.data,
            "{} {} {} {} {} {} cm",
            fmt_num(a),
            fmt_num(b),
            fmt_num(c),
            fmt_num(d),
            fmt_num(e),
            fmt_num(f)
        );
        self
    }

    /// Paint an XObject (`Do`).
    pub fn draw_xobject(&mut self, name: &str) -> &mut Self {
        let _ = writeln!(self.data, "/{} Do", name);
        self
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }
}

/// Content stream painting `name` over a `width x height` pt rectangle with
/// its lower-left corner at `(x, y)`.
pub fn place_image(name: &str, x: f64, y: f64, width: f64, height: f64) -> ContentStream {
    let mut content = ContentStream::new();
    content
        .save_state()
        .transform(width, 0.0, 0.0, height, x, y)
        .draw_xobject(name)
        .restore_state();
    content
}

fn fmt_num(x: f64) -> String {
    if x.fract() == 0.0 && x.abs() < 1e15 {
        return format!("{}", x as i64);
    }
    let s = format!("{:.4}", x);
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}
