use tracing::warn;

use crate::errors::ParseError;

/// Extracts text per page using `pdf-extract`.
///
/// `pdf-extract` panics on some malformed inputs; the panic is caught and
/// reported as an ordinary extraction error.
pub fn extract_pages(bytes: &[u8]) -> Result<Vec<String>, ParseError> {
    let result = std::panic::catch_unwind(|| pdf_extract::extract_text_from_mem_by_pages(bytes))
        .map_err(|_| ParseError::Pdf("pdf-extract panicked while reading document".to_string()))?;

    let pages = result.map_err(|e| ParseError::Pdf(e.to_string()))?;

    if pages.iter().all(|p| p.trim().is_empty()) {
        // Scanned/image-only PDFs have no text layer. Not an error: fields come back empty.
        warn!(
            "PDF has {} page(s) but no extractable text; OCR is not supported",
            pages.len()
        );
    }

    Ok(pages)
}

/// Builds a minimal PDF with one Helvetica text line per entry, one page per slice.
#[cfg(test)]
pub(crate) fn sample_pdf(pages: &[&[&str]]) -> Vec<u8> {
    let mut objects = vec![
        "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
        format!(
            "<< /Type /Pages /Kids [{}] /Count {} >>",
            (0..pages.len())
                .map(|i| format!("{} 0 R", 4 + 2 * i))
                .collect::<Vec<_>>()
                .join(" "),
            pages.len()
        ),
        "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>"
            .to_string(),
    ];
    for (i, lines) in pages.iter().enumerate() {
        let mut content = String::from("BT /F1 12 Tf 72 720 Td");
        for (n, line) in lines.iter().enumerate() {
            if n > 0 {
                content.push_str(" 0 -16 Td");
            }
            let escaped = line
                .replace('\\', "\\\\")
                .replace('(', "\\(")
                .replace(')', "\\)");
            content.push_str(&format!(" ({escaped}) Tj"));
        }
        content.push_str(" ET");
        objects.push(format!(
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] \
             /Resources << /Font << /F1 3 0 R >> >> /Contents {} 0 R >>",
            5 + 2 * i
        ));
        objects.push(format!(
            "<< /Length {} >>\nstream\n{content}\nendstream",
            content.len()
        ));
    }

    let mut out = String::from("%PDF-1.4\n");
    let mut offsets = Vec::with_capacity(objects.len());
    for (i, body) in objects.iter().enumerate() {
        offsets.push(out.len());
        out.push_str(&format!("{} 0 obj\n{body}\nendobj\n", i + 1));
    }
    let xref = out.len();
    out.push_str(&format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1));
    for offset in offsets {
        out.push_str(&format!("{offset:010} 00000 n \n"));
    }
    out.push_str(&format!(
        "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{xref}\n%%EOF\n",
        objects.len() + 1
    ));
    out.into_bytes()
}
