mod canvas;
pub(crate) mod layout;
mod table;

use pdf_writer::{Content, Filter, Name, Pdf, Rect, Ref, TextStr};

use crate::error::Error;
use crate::fonts::Font;
use crate::model::{InvoiceData, UserInfo, format_currency, format_date};
use crate::style::{Align, RenderConfig, TextStyle};

use canvas::Canvas;
use layout::wrap_text;
use table::Columns;

const WORDMARK: &str = "Factura";
const PRODUCER: &str = concat!("factura-pdf ", env!("CARGO_PKG_VERSION"));

/// Gap between the banner's bottom edge and the first content block.
const HEADER_GAP: f32 = 18.0;
const WORDMARK_SIZE: f32 = 16.0;
const BANNER_ID_SIZE: f32 = 8.0;
const BANNER_ID_LINE_H: f32 = 9.5;

const PARTIES_LINE_H: f32 = 14.0;
const SECTION_GAP: f32 = 18.0;

const TOTALS_GAP: f32 = 10.0;
const TOTALS_LINE_H: f32 = 16.0;
const TOTALS_RULE_PAD: f32 = 4.0;

const NOTES_GAP: f32 = 14.0;
const NOTES_LABEL_H: f32 = 16.0;
const NOTES_LINE_H: f32 = 13.0;
const NOTES_SIZE: f32 = 9.5;

const FOOTER_SIZE: f32 = 8.0;

/// Which block set the pipeline renders: the whole document, or the reduced
/// preview summary. Both run through the same Canvas, footer pass, and
/// assembly, so the two outputs cannot drift apart structurally.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Projection {
    Full,
    Summary,
}

/// Render one invoice into finished PDF bytes. Byte-deterministic: the same
/// input and config always produce identical output (no timestamps).
pub(crate) fn render(
    invoice: &InvoiceData,
    cfg: &RenderConfig,
    projection: Projection,
) -> Result<Vec<u8>, Error> {
    cfg.validate()?;
    let t0 = std::time::Instant::now();

    // Phase 1: lay the blocks out against one canvas.
    let mut canvas = Canvas::new(cfg);
    match projection {
        Projection::Full => {
            draw_banner(&mut canvas, &invoice.user_info, cfg);
            draw_parties(&mut canvas, invoice, cfg);
            table::draw_items(&mut canvas, invoice, cfg);
            draw_totals(&mut canvas, invoice, cfg);
            if let Some(notes) = invoice.notes.as_deref() {
                if !notes.trim().is_empty() {
                    draw_notes(&mut canvas, notes, cfg);
                }
            }
        }
        Projection::Summary => draw_summary(&mut canvas, invoice, cfg),
    }
    let mut pages = canvas.finish();
    let t_layout = t0.elapsed();

    // Phase 2: footer caption on every finished page, preview included.
    for content in pages.iter_mut() {
        draw_footer(content, cfg);
    }
    let t_footer = t0.elapsed();

    // Phase 3: assemble the document.
    let bytes = assemble(pages, invoice, cfg);
    let t_assembly = t0.elapsed();

    log::info!(
        "Render phases: layout={:.1}ms, footer={:.1}ms, assembly={:.1}ms",
        t_layout.as_secs_f64() * 1000.0,
        (t_footer - t_layout).as_secs_f64() * 1000.0,
        (t_assembly - t_footer).as_secs_f64() * 1000.0,
    );

    Ok(bytes)
}

/// Full-bleed banner with the wordmark left and the issuer identity stacked
/// right. Fixed height; never paginates. First page only — continuation
/// pages start at the plain top margin.
fn draw_banner(canvas: &mut Canvas, user: &UserInfo, cfg: &RenderConfig) {
    canvas.fill_rect(0.0, 0.0, cfg.page_width, cfg.banner_height, cfg.palette.primary);

    let wordmark = TextStyle {
        font: Font::HelveticaBold,
        size: WORDMARK_SIZE,
        color: cfg.palette.on_primary,
    };
    let id_style = TextStyle {
        font: Font::Helvetica,
        size: BANNER_ID_SIZE,
        color: cfg.palette.on_primary,
    };

    let mid = cfg.banner_height / 2.0;
    canvas.draw_text(
        WORDMARK,
        cfg.margin_left,
        mid + WORDMARK_SIZE * 0.36,
        Align::Left,
        &wordmark,
    );

    let mut id_lines: Vec<&str> = vec![&user.name];
    if let Some(company) = user.company.as_deref() {
        id_lines.push(company);
    }
    id_lines.push(&user.email);
    let block_h = (id_lines.len() - 1) as f32 * BANNER_ID_LINE_H;
    let first = mid - block_h / 2.0 + BANNER_ID_SIZE * 0.36;
    for (i, line) in id_lines.iter().enumerate() {
        canvas.draw_text(
            line,
            cfg.page_width - cfg.margin_right,
            first + i as f32 * BANNER_ID_LINE_H,
            Align::Right,
            &id_style,
        );
    }

    canvas.advance_to(cfg.banner_height + HEADER_GAP);
}

/// Invoice metadata right, bill-to block left. The address is split on its
/// own line breaks, never reflowed.
fn draw_parties(canvas: &mut Canvas, invoice: &InvoiceData, cfg: &RenderConfig) {
    let label = TextStyle {
        font: Font::HelveticaBold,
        size: 8.0,
        color: cfg.palette.muted,
    };
    let strong = TextStyle {
        font: Font::HelveticaBold,
        size: 10.0,
        color: cfg.palette.text,
    };
    let body = TextStyle {
        font: Font::Helvetica,
        size: 10.0,
        color: cfg.palette.text,
    };
    let title = TextStyle {
        font: Font::HelveticaBold,
        size: 11.0,
        color: cfg.palette.text,
    };

    let mut left: Vec<(&str, &TextStyle)> = vec![
        ("BILL TO", &label),
        (&invoice.client_name, &strong),
        (&invoice.client_email, &body),
    ];
    for line in invoice.client_address.lines() {
        left.push((line, &body));
    }

    let number_line = format!("Invoice {}", invoice.invoice_number);
    let issued_line = format!("Issued {}", format_date(invoice.date));
    let due_line = format!("Due {}", format_date(invoice.due_date));
    let right: [(&str, &TextStyle); 3] = [
        (&number_line, &title),
        (&issued_line, &body),
        (&due_line, &body),
    ];

    let y0 = canvas.cursor();
    for (i, (text, style)) in left.iter().enumerate() {
        let baseline = y0 + (i + 1) as f32 * PARTIES_LINE_H - 3.0;
        canvas.draw_text(text, cfg.margin_left, baseline, Align::Left, style);
    }
    for (i, (text, style)) in right.iter().enumerate() {
        let baseline = y0 + (i + 1) as f32 * PARTIES_LINE_H - 3.0;
        canvas.draw_text(
            text,
            cfg.page_width - cfg.margin_right,
            baseline,
            Align::Right,
            style,
        );
    }

    let rows = left.len().max(right.len());
    canvas.advance(rows as f32 * PARTIES_LINE_H + SECTION_GAP);
}

/// Subtotal / Tax / Total flush with the table's Amount column. Measures its
/// own height and breaks to a fresh page if it would not fit — the upstream
/// implementation drew past the margin here.
fn draw_totals(canvas: &mut Canvas, invoice: &InvoiceData, cfg: &RenderConfig) {
    let body = TextStyle {
        font: Font::Helvetica,
        size: 10.0,
        color: cfg.palette.text,
    };
    let strong = TextStyle {
        font: Font::HelveticaBold,
        size: 12.0,
        color: cfg.palette.text,
    };

    let tax = invoice.tax.filter(|&t| t > 0);
    let mut lines: Vec<(&str, i64, &TextStyle)> = vec![("Subtotal", invoice.subtotal, &body)];
    if let Some(t) = tax {
        lines.push(("Tax", t, &body));
    }
    lines.push(("Total", invoice.total, &strong));

    let block_h = TOTALS_GAP + lines.len() as f32 * TOTALS_LINE_H + TOTALS_RULE_PAD;
    if block_h > canvas.remaining_height() {
        canvas.new_page();
    }
    canvas.advance(TOTALS_GAP);

    let cols = Columns::new(cfg);
    let rule_x = cols.rate_r - 60.0;
    for (label, amount, style) in lines {
        let is_total = label == "Total";
        if is_total {
            canvas.rule(
                rule_x,
                canvas.cursor(),
                cols.amount_r - rule_x,
                0.75,
                cfg.palette.muted,
            );
        }
        let baseline = canvas.cursor() + TOTALS_LINE_H - 4.0;
        canvas.draw_text(label, cols.rate_r, baseline, Align::Right, style);
        canvas.draw_text(
            &format_currency(amount, &invoice.currency),
            cols.amount_r,
            baseline,
            Align::Right,
            style,
        );
        canvas.advance(TOTALS_LINE_H);
    }
    canvas.advance(TOTALS_RULE_PAD);
}

/// Bold label, then the note reflowed to the printable width, paginating
/// per visual line.
fn draw_notes(canvas: &mut Canvas, notes: &str, cfg: &RenderConfig) {
    let label = TextStyle {
        font: Font::HelveticaBold,
        size: 10.0,
        color: cfg.palette.text,
    };
    let body = TextStyle {
        font: Font::Helvetica,
        size: NOTES_SIZE,
        color: cfg.palette.text,
    };

    if NOTES_GAP + NOTES_LABEL_H > canvas.remaining_height() {
        canvas.new_page();
    } else {
        canvas.advance(NOTES_GAP);
    }
    canvas.draw_text(
        "Notes:",
        cfg.margin_left,
        canvas.cursor() + 12.0,
        Align::Left,
        &label,
    );
    canvas.advance(NOTES_LABEL_H);

    for line in wrap_text(notes, body.font, body.size, cfg.printable_width()) {
        if NOTES_LINE_H > canvas.remaining_height() {
            canvas.new_page();
        }
        if !line.is_empty() {
            canvas.draw_text(
                &line,
                cfg.margin_left,
                canvas.cursor() + 10.0,
                Align::Left,
                &body,
            );
        }
        canvas.advance(NOTES_LINE_H);
    }
}

/// The reduced preview: title, invoice number, client name, total. One page;
/// intentionally not the full layout.
fn draw_summary(canvas: &mut Canvas, invoice: &InvoiceData, cfg: &RenderConfig) {
    let title = TextStyle {
        font: Font::HelveticaBold,
        size: 20.0,
        color: cfg.palette.primary,
    };
    let strong = TextStyle {
        font: Font::HelveticaBold,
        size: 12.0,
        color: cfg.palette.text,
    };
    let body = TextStyle {
        font: Font::Helvetica,
        size: 10.0,
        color: cfg.palette.text,
    };

    canvas.draw_text(
        "Invoice",
        cfg.margin_left,
        canvas.cursor() + 14.0,
        Align::Left,
        &title,
    );
    canvas.advance(26.0);
    canvas.draw_text(
        &invoice.invoice_number,
        cfg.margin_left,
        canvas.cursor() + 9.0,
        Align::Left,
        &strong,
    );
    canvas.advance(16.0);
    canvas.draw_text(
        &invoice.client_name,
        cfg.margin_left,
        canvas.cursor() + 8.0,
        Align::Left,
        &body,
    );
    canvas.advance(14.0);
    canvas.draw_text(
        &format!(
            "Total {}",
            format_currency(invoice.total, &invoice.currency)
        ),
        cfg.margin_left,
        canvas.cursor() + 9.0,
        Align::Left,
        &strong,
    );
    canvas.advance(16.0);
}

/// Muted oblique caption centered at a fixed offset from the page bottom.
/// Runs as a post-pass so placement is identical on every page.
fn draw_footer(content: &mut Content, cfg: &RenderConfig) {
    if cfg.footer_caption.is_empty() {
        return;
    }
    let style = TextStyle {
        font: Font::HelveticaOblique,
        size: FOOTER_SIZE,
        color: cfg.palette.muted,
    };
    Canvas::text_op(
        content,
        cfg,
        &cfg.footer_caption,
        cfg.page_width / 2.0,
        cfg.page_height - cfg.footer_margin,
        Align::Center,
        &style,
    );
}

/// Catalog, page tree, the three built-in Type1 fonts, and one
/// Flate-compressed content stream per page.
fn assemble(pages: Vec<Content>, invoice: &InvoiceData, cfg: &RenderConfig) -> Vec<u8> {
    let mut pdf = Pdf::new();
    let mut next_id = 1i32;
    let mut alloc = || {
        let r = Ref::new(next_id);
        next_id += 1;
        r
    };

    let catalog_id = alloc();
    let pages_id = alloc();

    let fonts = [Font::Helvetica, Font::HelveticaBold, Font::HelveticaOblique];
    let font_refs: Vec<Ref> = fonts
        .iter()
        .map(|font| {
            let font_ref = alloc();
            pdf.type1_font(font_ref)
                .base_font(Name(font.base_font().as_bytes()))
                .encoding_predefined(Name(b"WinAnsiEncoding"));
            font_ref
        })
        .collect();

    let n = pages.len();
    let page_ids: Vec<Ref> = (0..n).map(|_| alloc()).collect();
    let content_ids: Vec<Ref> = (0..n).map(|_| alloc()).collect();

    for (i, content) in pages.into_iter().enumerate() {
        let raw = content.finish();
        let compressed = miniz_oxide::deflate::compress_to_vec_zlib(raw.as_slice(), 6);
        pdf.stream(content_ids[i], &compressed)
            .filter(Filter::FlateDecode);
    }

    pdf.catalog(catalog_id).pages(pages_id);
    pdf.pages(pages_id)
        .kids(page_ids.iter().copied())
        .count(n as i32);

    for i in 0..n {
        let mut page = pdf.page(page_ids[i]);
        page.media_box(Rect::new(0.0, 0.0, cfg.page_width, cfg.page_height))
            .parent(pages_id)
            .contents(content_ids[i]);
        let mut resources = page.resources();
        let mut font_dict = resources.fonts();
        for (font, font_ref) in fonts.iter().zip(&font_refs) {
            font_dict.pair(Name(font.pdf_name().as_bytes()), *font_ref);
        }
    }

    // No creation date: output must be byte-deterministic.
    let info_id = alloc();
    let title = format!("Invoice {}", invoice.invoice_number);
    pdf.document_info(info_id)
        .title(TextStr(&title))
        .producer(TextStr(PRODUCER));

    pdf.finish()
}
