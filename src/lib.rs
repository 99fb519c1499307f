//! Paginated invoice layout and PDF rendering.
//!
//! One `InvoiceData` in, one document out: a fixed-geometry page layout with
//! overflow-driven pagination for the line-item table and notes, a footer
//! caption on every page, and two finalizations over the same engine —
//! [`save_invoice`] / [`render_invoice`] for the full document and
//! [`render_preview`] for an embeddable summary data URI.

mod error;
mod fonts;
mod model;
mod pdf;
mod style;

pub use error::Error;
pub use fonts::Font;
pub use model::{InvoiceData, LineItem, UserInfo, format_currency};
pub use pdf::layout::wrap_text;
pub use style::{DescriptionOverflow, Palette, RenderConfig, Rgb};

use std::path::{Path, PathBuf};
use std::time::Instant;

use base64::Engine as _;

/// Render the full document and return the PDF bytes, for hosts that do
/// their own persistence.
pub fn render_invoice(invoice: &InvoiceData, config: &RenderConfig) -> Result<Vec<u8>, Error> {
    let t0 = Instant::now();
    let bytes = pdf::render(invoice, config, pdf::Projection::Full)?;
    log::info!(
        "Timing: render={:.1}ms (output {} bytes)",
        t0.elapsed().as_secs_f64() * 1000.0,
        bytes.len(),
    );
    Ok(bytes)
}

/// Render the full document and write it into `out_dir` as
/// `Invoice-{invoiceNumber}.pdf` (the number sanitized for the filesystem).
/// Returns the written path.
pub fn save_invoice(
    invoice: &InvoiceData,
    config: &RenderConfig,
    out_dir: &Path,
) -> Result<PathBuf, Error> {
    let t0 = Instant::now();

    let bytes = pdf::render(invoice, config, pdf::Projection::Full)?;
    let t_render = t0.elapsed();

    let path = out_dir.join(format!(
        "Invoice-{}.pdf",
        sanitize_file_stem(&invoice.invoice_number)
    ));
    std::fs::write(&path, &bytes)?;
    let t_total = t0.elapsed();

    log::info!(
        "Timing: render={:.1}ms, write={:.1}ms, total={:.1}ms (output {} bytes)",
        t_render.as_secs_f64() * 1000.0,
        (t_total - t_render).as_secs_f64() * 1000.0,
        t_total.as_secs_f64() * 1000.0,
        bytes.len(),
    );

    Ok(path)
}

/// Render the reduced summary (title, invoice number, client name, total)
/// and return it as a self-contained `data:application/pdf;base64,…` string.
/// The reduced field set is intentional; the layout engine underneath is the
/// same one the full document uses.
pub fn render_preview(invoice: &InvoiceData, config: &RenderConfig) -> Result<String, Error> {
    let t0 = Instant::now();
    let bytes = pdf::render(invoice, config, pdf::Projection::Summary)?;

    let mut uri = String::from("data:application/pdf;base64,");
    base64::engine::general_purpose::STANDARD.encode_string(&bytes, &mut uri);

    log::info!(
        "Timing: preview={:.1}ms (payload {} chars)",
        t0.elapsed().as_secs_f64() * 1000.0,
        uri.len(),
    );
    Ok(uri)
}

/// Keep alphanumerics and `-_.`; everything else becomes `-`.
fn sanitize_file_stem(s: &str) -> String {
    s.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
                c
            } else {
                '-'
            }
        })
        .collect()
}
