//! Minimal paginated PDF writer for prediction reports
//!
//! Produces A4 portrait pages using the standard Helvetica faces with
//! WinAnsi encoding, so no fonts are embedded. Every page gets the document
//! header at the top and a "Page N" footer. Output carries no timestamps or
//! random identifiers: the same calls always produce the same bytes.

use std::fmt::Write as _;

/// Points per millimetre
const K: f64 = 72.0 / 25.4;
const PAGE_WIDTH_MM: f64 = 210.0;
const PAGE_HEIGHT_MM: f64 = 297.0;
const MARGIN_MM: f64 = 10.0;
const CELL_MARGIN_MM: f64 = 1.0;
const PAGE_BREAK_MARGIN_MM: f64 = 20.0;
const FOOTER_OFFSET_MM: f64 = 15.0;

/// Font faces available to the writer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontStyle {
    Regular,
    Bold,
    Italic,
}

impl FontStyle {
    fn resource(&self) -> &'static str {
        match self {
            FontStyle::Regular => "F1",
            FontStyle::Bold => "F2",
            FontStyle::Italic => "F3",
        }
    }

    fn base_font(&self) -> &'static str {
        match self {
            FontStyle::Regular => "Helvetica",
            FontStyle::Bold => "Helvetica-Bold",
            FontStyle::Italic => "Helvetica-Oblique",
        }
    }

    /// Advance width of a WinAnsi byte in 1/1000 em
    fn glyph_width(&self, byte: u8) -> u32 {
        let table = match self {
            FontStyle::Bold => &HELVETICA_BOLD_WIDTHS,
            FontStyle::Regular | FontStyle::Italic => &HELVETICA_WIDTHS,
        };
        match byte {
            32..=126 => u32::from(table[usize::from(byte - 32)]),
            0xB0 => 400,
            _ => 556,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Align {
    Left,
    Center,
}

// Helvetica advance widths for ASCII 32..=126
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '../
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // 0..9
    278, 278, 584, 584, 584, 556, 1015, // :..@
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, // A..M
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // N..Z
    278, 278, 278, 469, 556, 333, // [..`
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, // a..m
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, // n..z
    334, 260, 334, 584, // {..~
];

const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278, // ' '../
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // 0..9
    333, 333, 584, 584, 584, 611, 975, // :..@
    722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, // A..M
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // N..Z
    333, 278, 333, 584, 556, 333, // [..`
    556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, // a..m
    611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, // n..z
    389, 280, 389, 584, // {..~
];

/// Encode text as WinAnsi; characters outside Latin-1 become `?`
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c as u32 {
            0x20..=0x7E | 0xA0..=0xFF => c as u32 as u8,
            0x09 | 0x0A | 0x0D => b' ',
            _ => b'?',
        })
        .collect()
}

fn escape_literal(bytes: &[u8], out: &mut Vec<u8>) {
    for &b in bytes {
        if matches!(b, b'(' | b')' | b'\\') {
            out.push(b'\\');
        }
        out.push(b);
    }
}

/// Paginated document under construction
#[derive(Debug, Clone)]
pub struct PdfDocument {
    header: String,
    title: String,
    pages: Vec<Vec<u8>>,
    y: f64,
    font: FontStyle,
    font_size: f64,
}

impl PdfDocument {
    /// `header` is printed centered at the top of every page and used as the
    /// document title.
    pub fn new(header: impl Into<String>) -> Self {
        let header = header.into();
        Self {
            title: header.clone(),
            header,
            pages: Vec::new(),
            y: MARGIN_MM,
            font: FontStyle::Regular,
            font_size: 12.0,
        }
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn set_font(&mut self, style: FontStyle, size: f64) {
        self.font = style;
        self.font_size = size;
    }

    /// Start a new page, closing the current one
    pub fn add_page(&mut self) {
        if !self.pages.is_empty() {
            self.footer();
        }
        self.pages.push(Vec::new());
        self.y = MARGIN_MM;

        let (font, size) = (self.font, self.font_size);
        self.set_font(FontStyle::Bold, 14.0);
        let header = self.header.clone();
        self.write_line(10.0, &header, Align::Center);
        self.set_font(font, size);
    }

    /// One full-width, left-aligned line of height `h` mm. Text is not wrapped.
    pub fn cell(&mut self, h: f64, text: &str) {
        self.break_if_needed(h);
        self.write_line(h, text, Align::Left);
    }

    /// Left-aligned text wrapped over as many lines of height `h` as needed
    pub fn multi_cell(&mut self, h: f64, text: &str) {
        for line in self.wrap(text) {
            self.break_if_needed(h);
            self.write_line(h, &line, Align::Left);
        }
    }

    /// Close the last page and serialize the document
    pub fn finish(mut self) -> Vec<u8> {
        if self.pages.is_empty() {
            self.add_page();
        }
        self.footer();
        self.serialize()
    }

    fn footer(&mut self) {
        let (font, size, y) = (self.font, self.font_size, self.y);
        self.y = PAGE_HEIGHT_MM - FOOTER_OFFSET_MM;
        self.set_font(FontStyle::Italic, 8.0);
        let label = format!("Page {}", self.pages.len());
        self.write_line(10.0, &label, Align::Center);
        self.set_font(font, size);
        self.y = y;
    }

    fn break_if_needed(&mut self, h: f64) {
        if self.pages.is_empty() || self.y + h > PAGE_HEIGHT_MM - PAGE_BREAK_MARGIN_MM {
            self.add_page();
        }
    }

    fn text_width_mm(&self, bytes: &[u8]) -> f64 {
        let units: u32 = bytes.iter().map(|&b| self.font.glyph_width(b)).sum();
        f64::from(units) * self.font_size / 1000.0 / K
    }

    fn content_width_mm(&self) -> f64 {
        PAGE_WIDTH_MM - 2.0 * MARGIN_MM
    }

    /// Split text into lines that fit the content width, breaking on spaces
    /// and splitting words that are too long on their own
    fn wrap(&self, text: &str) -> Vec<String> {
        let max = self.content_width_mm() - 2.0 * CELL_MARGIN_MM;
        let fits = |s: &str| self.text_width_mm(&encode_win_ansi(s)) <= max;

        let mut lines = Vec::new();
        let mut current = String::new();
        for word in text.split_whitespace() {
            let candidate = if current.is_empty() {
                word.to_string()
            } else {
                format!("{} {}", current, word)
            };
            if fits(&candidate) {
                current = candidate;
                continue;
            }
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            for c in word.chars() {
                current.push(c);
                if !fits(&current) {
                    current.pop();
                    lines.push(std::mem::take(&mut current));
                    current.push(c);
                }
            }
        }
        if !current.is_empty() || lines.is_empty() {
            lines.push(current);
        }
        lines
    }

    fn write_line(&mut self, h: f64, text: &str, align: Align) {
        let bytes = encode_win_ansi(text);
        let x = match align {
            Align::Left => MARGIN_MM + CELL_MARGIN_MM,
            Align::Center => MARGIN_MM + (self.content_width_mm() - self.text_width_mm(&bytes)) / 2.0,
        };
        let size_mm = self.font_size / K;
        let baseline = self.y + 0.5 * h + 0.3 * size_mm;

        if !bytes.is_empty() {
            let mut op = Vec::with_capacity(bytes.len() + 48);
            op.extend_from_slice(
                format!(
                    "BT /{} {:.2} Tf {:.2} {:.2} Td (",
                    self.font.resource(),
                    self.font_size,
                    x * K,
                    (PAGE_HEIGHT_MM - baseline) * K
                )
                .as_bytes(),
            );
            escape_literal(&bytes, &mut op);
            op.extend_from_slice(b") Tj ET\n");
            if let Some(page) = self.pages.last_mut() {
                page.extend_from_slice(&op);
            }
        }
        self.y += h;
    }

    fn serialize(&self) -> Vec<u8> {
        const FONTS: [FontStyle; 3] = [FontStyle::Regular, FontStyle::Bold, FontStyle::Italic];
        // 1 catalog, 2 page tree, 3 info, 4..=6 fonts, then page + content pairs
        let first_page_obj = 7;
        let page_obj = |i: usize| first_page_obj + 2 * i;

        let mut out: Vec<u8> = Vec::new();
        let mut offsets: Vec<usize> = Vec::new();
        out.extend_from_slice(b"%PDF-1.4\n%\xE2\xE3\xCF\xD3\n");

        let begin = |out: &mut Vec<u8>, offsets: &mut Vec<usize>| {
            offsets.push(out.len());
            out.extend_from_slice(format!("{} 0 obj\n", offsets.len()).as_bytes());
        };

        begin(&mut out, &mut offsets);
        out.extend_from_slice(b"<< /Type /Catalog /Pages 2 0 R >>\nendobj\n");

        begin(&mut out, &mut offsets);
        let mut kids = String::new();
        for i in 0..self.pages.len() {
            let _ = write!(kids, "{} 0 R ", page_obj(i));
        }
        out.extend_from_slice(
            format!(
                "<< /Type /Pages /Kids [{}] /Count {} >>\nendobj\n",
                kids.trim_end(),
                self.pages.len()
            )
            .as_bytes(),
        );

        begin(&mut out, &mut offsets);
        out.extend_from_slice(b"<< /Title (");
        escape_literal(&encode_win_ansi(&self.title), &mut out);
        out.extend_from_slice(b") /Producer (crop-yield-backend) >>\nendobj\n");

        for font in FONTS {
            begin(&mut out, &mut offsets);
            out.extend_from_slice(
                format!(
                    "<< /Type /Font /Subtype /Type1 /BaseFont /{} /Encoding /WinAnsiEncoding >>\nendobj\n",
                    font.base_font()
                )
                .as_bytes(),
            );
        }

        for (i, content) in self.pages.iter().enumerate() {
            begin(&mut out, &mut offsets);
            out.extend_from_slice(
                format!(
                    "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {:.2} {:.2}] \
                     /Resources << /Font << /F1 4 0 R /F2 5 0 R /F3 6 0 R >> >> \
                     /Contents {} 0 R >>\nendobj\n",
                    PAGE_WIDTH_MM * K,
                    PAGE_HEIGHT_MM * K,
                    page_obj(i) + 1
                )
                .as_bytes(),
            );

            begin(&mut out, &mut offsets);
            out.extend_from_slice(format!("<< /Length {} >>\nstream\n", content.len()).as_bytes());
            out.extend_from_slice(content);
            out.extend_from_slice(b"\nendstream\nendobj\n");
        }

        let xref_offset = out.len();
        out.extend_from_slice(format!("xref\n0 {}\n", offsets.len() + 1).as_bytes());
        out.extend_from_slice(b"0000000000 65535 f \n");
        for offset in &offsets {
            out.extend_from_slice(format!("{:010} 00000 n \n", offset).as_bytes());
        }
        out.extend_from_slice(
            format!(
                "trailer\n<< /Size {} /Root 1 0 R /Info 3 0 R >>\nstartxref\n{}\n%%EOF\n",
                offsets.len() + 1,
                xref_offset
            )
            .as_bytes(),
        );
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contains(haystack: &[u8], needle: &[u8]) -> bool {
        haystack.windows(needle.len()).any(|w| w == needle)
    }

    #[test]
    fn test_empty_document_has_one_page() {
        let bytes = PdfDocument::new("Report").finish();
        assert!(bytes.starts_with(b"%PDF-1.4"));
        assert!(bytes.ends_with(b"%%EOF\n"));
        assert!(contains(&bytes, b"/Count 1"));
        assert!(contains(&bytes, b"(Page 1)"));
    }

    #[test]
    fn test_header_on_every_page() {
        let mut doc = PdfDocument::new("Crop Yield Prediction Report");
        doc.add_page();
        for i in 0..40 {
            doc.cell(10.0, &format!("Line {}", i));
        }
        assert!(doc.page_count() > 1);
        let pages = doc.page_count();
        let bytes = doc.finish();
        let headers = bytes
            .windows(b"(Crop Yield Prediction Report) Tj".len())
            .filter(|w| *w == b"(Crop Yield Prediction Report) Tj")
            .count();
        assert_eq!(headers, pages);
        assert!(contains(&bytes, format!("(Page {})", pages).as_bytes()));
    }

    #[test]
    fn test_wrap_splits_long_text() {
        let mut doc = PdfDocument::new("Report");
        doc.set_font(FontStyle::Regular, 12.0);
        let text = "word ".repeat(100);
        let lines = doc.wrap(&text);
        assert!(lines.len() > 1);
        assert!(lines.iter().all(|l| !l.starts_with(' ')));
        assert_eq!(lines.join(" ").split_whitespace().count(), 100);
    }

    #[test]
    fn test_wrap_breaks_oversized_word() {
        let doc = PdfDocument::new("Report");
        let lines = doc.wrap(&"x".repeat(400));
        assert!(lines.len() > 1);
        assert_eq!(lines.concat().len(), 400);
    }

    #[test]
    fn test_literal_escaping_and_encoding() {
        let mut out = Vec::new();
        escape_literal(&encode_win_ansi("Temp (°C) \\ ✓"), &mut out);
        assert_eq!(out, b"Temp \\(\xB0C\\) \\\\ ?".to_vec());
    }

    #[test]
    fn test_xref_offsets_point_at_objects() {
        let bytes = PdfDocument::new("Report").finish();
        let text = String::from_utf8_lossy(&bytes);
        let xref_at = text.find("xref\n").unwrap();
        let entries: Vec<usize> = text[xref_at..]
            .lines()
            .skip(3)
            .take_while(|l| l.ends_with(" n "))
            .map(|l| l[..10].parse().unwrap())
            .collect();
        assert_eq!(entries.len(), 8);
        for (i, offset) in entries.iter().enumerate() {
            let expected = format!("{} 0 obj", i + 1);
            assert!(bytes[*offset..].starts_with(expected.as_bytes()));
        }
    }
}
