//! Minimal SVG writer for traced segments.

use std::fmt::Write;

use relplot_render::{GridLines, PixelPoint, Point, Viewport};

/// Stroke colours cycled across relations.
pub const PALETTE: &[&str] = &[
    "#d62728", "#1f77b4", "#2ca02c", "#9467bd", "#ff7f0e", "#17becf", "#8c564b",
];

/// Accumulates SVG elements for one plot.
#[derive(Debug)]
pub struct SvgDocument {
    width: u32,
    height: u32,
    body: String,
}

impl SvgDocument {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            body: String::new(),
        }
    }

    /// Light grid lines with labels, plus the two axes when visible.
    pub fn grid(&mut self, viewport: &Viewport) {
        let lines = GridLines::for_range(&viewport.range);
        let (w, h) = (self.width, self.height);
        self.body.push_str("<g stroke=\"#e0e0e0\" stroke-width=\"1\">\n");
        for &x in &lines.vertical {
            let (sx, _) = viewport.math_to_screen(Point { x, y: 0.0 });
            let _ = writeln!(self.body, "<line x1=\"{sx:.1}\" y1=\"0\" x2=\"{sx:.1}\" y2=\"{h}\"/>");
        }
        for &y in &lines.horizontal {
            let (_, sy) = viewport.math_to_screen(Point { x: 0.0, y });
            let _ = writeln!(self.body, "<line x1=\"0\" y1=\"{sy:.1}\" x2=\"{w}\" y2=\"{sy:.1}\"/>");
        }
        self.body.push_str("</g>\n");

        let (ox, oy) = viewport.math_to_screen(Point { x: 0.0, y: 0.0 });
        self.body.push_str("<g stroke=\"#000000\" stroke-width=\"1\">\n");
        if (0.0..=f64::from(w)).contains(&ox) {
            let _ = writeln!(self.body, "<line x1=\"{ox:.1}\" y1=\"0\" x2=\"{ox:.1}\" y2=\"{h}\"/>");
        }
        if (0.0..=f64::from(h)).contains(&oy) {
            let _ = writeln!(self.body, "<line x1=\"0\" y1=\"{oy:.1}\" x2=\"{w}\" y2=\"{oy:.1}\"/>");
        }
        self.body.push_str("</g>\n");

        // Labels hug the axes but stay on the canvas when an axis is off-screen.
        let label_y = oy.min(f64::from(h) - 2.0).max(12.0);
        let label_x = ox.min(f64::from(w) - 40.0).max(2.0);
        self.body
            .push_str("<g font-family=\"sans-serif\" font-size=\"10\" fill=\"#606060\">\n");
        for &x in &lines.vertical {
            let (sx, _) = viewport.math_to_screen(Point { x, y: 0.0 });
            let _ = writeln!(
                self.body,
                "<text x=\"{:.1}\" y=\"{:.1}\">{}</text>",
                sx + 2.0,
                label_y - 2.0,
                lines.label(x)
            );
        }
        for &y in &lines.horizontal {
            let (_, sy) = viewport.math_to_screen(Point { x: 0.0, y });
            let _ = writeln!(
                self.body,
                "<text x=\"{:.1}\" y=\"{:.1}\">{}</text>",
                label_x + 2.0,
                sy - 2.0,
                lines.label(y)
            );
        }
        self.body.push_str("</g>\n");
    }

    /// Open a group for one relation's segments.
    pub fn begin_relation(&mut self, text: &str, color: &str) {
        let _ = writeln!(
            self.body,
            "<g stroke=\"{color}\" stroke-width=\"2\" stroke-linecap=\"round\">\n<title>{}</title>",
            escape(text)
        );
    }

    pub fn segment(&mut self, start: PixelPoint, end: PixelPoint) {
        let _ = writeln!(
            self.body,
            "<line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\"/>",
            start.x, start.y, end.x, end.y
        );
    }

    pub fn end_relation(&mut self) {
        self.body.push_str("</g>\n");
    }

    /// Complete document text.
    pub fn finish(self) -> String {
        format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">\n\
             <rect width=\"{w}\" height=\"{h}\" fill=\"#ffffff\"/>\n{body}</svg>\n",
            w = self.width,
            h = self.height,
            body = self.body
        )
    }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use relplot_render::ViewRange;

    #[test]
    fn test_relation_title_is_escaped() {
        let mut doc = SvgDocument::new(10, 10);
        doc.begin_relation("y <= x & 1", PALETTE[0]);
        doc.segment(PixelPoint::new(0, 1), PixelPoint::new(2, 3));
        doc.end_relation();
        let svg = doc.finish();
        assert!(svg.contains("<title>y &lt;= x &amp; 1</title>"));
        assert!(svg.contains("<line x1=\"0\" y1=\"1\" x2=\"2\" y2=\"3\"/>"));
        assert!(svg.starts_with("<svg "));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn test_grid_draws_axes_inside_view() {
        let viewport = Viewport::new(ViewRange::default(), 1200, 800);
        let mut doc = SvgDocument::new(1200, 800);
        doc.grid(&viewport);
        let svg = doc.finish();
        assert!(svg.contains("<line x1=\"600.0\" y1=\"0\" x2=\"600.0\" y2=\"800\"/>"));
        assert!(svg.contains(">-15</text>"));
    }
}
