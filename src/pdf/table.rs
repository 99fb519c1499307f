use crate::fonts::{ASCENT, Font};
use crate::model::{InvoiceData, format_currency};
use crate::style::{Align, DescriptionOverflow, RenderConfig, TextStyle};

use super::canvas::Canvas;
use super::layout::{truncate_chars, wrap_text};

const CELL_PAD: f32 = 4.0;
const QTY_COL_W: f32 = 40.0;
const RATE_COL_W: f32 = 72.0;
const AMOUNT_COL_W: f32 = 76.0;

const HEADER_SIZE: f32 = 9.0;
const BODY_SIZE: f32 = 10.0;
/// Line pitch for wrapped descriptions inside a grown row.
const DESC_LINE_H: f32 = 12.0;
const ROW_PAD: f32 = 3.0;

/// Fixed column x-offsets, derived once from the page geometry.
/// `Description` is left-aligned at `desc_x`; the three numeric columns are
/// right-aligned to their `*_r` edges.
pub(super) struct Columns {
    pub(super) x: f32,
    pub(super) w: f32,
    pub(super) desc_x: f32,
    pub(super) desc_w: f32,
    pub(super) qty_r: f32,
    pub(super) rate_r: f32,
    pub(super) amount_r: f32,
}

impl Columns {
    pub(super) fn new(cfg: &RenderConfig) -> Self {
        let x = cfg.margin_left;
        let w = cfg.printable_width();
        let amount_r = x + w - CELL_PAD;
        let rate_r = amount_r - AMOUNT_COL_W;
        let qty_r = rate_r - RATE_COL_W;
        let desc_x = x + CELL_PAD;
        let desc_w = qty_r - QTY_COL_W - desc_x;
        Columns {
            x,
            w,
            desc_x,
            desc_w,
            qty_r,
            rate_r,
            amount_r,
        }
    }
}

/// Baseline for a vertically centered single line inside a row.
fn row_baseline(y_top: f32, row_h: f32, size: f32) -> f32 {
    y_top + (row_h + size * ASCENT) / 2.0
}

/// The pagination core: a shaded header row once at the table start, then
/// one row per line item with a fitting check *before* each row so a row is
/// never split across pages and the header is not repeated mid-table.
///
/// Shading parity is the item's ordinal index mod 2 (even indices shaded),
/// global across the whole sequence — page breaks do not reset it.
pub(super) fn draw_items(canvas: &mut Canvas, invoice: &InvoiceData, cfg: &RenderConfig) {
    let cols = Columns::new(cfg);
    let header = TextStyle {
        font: Font::HelveticaBold,
        size: HEADER_SIZE,
        color: cfg.palette.on_primary,
    };
    let body = TextStyle {
        font: Font::Helvetica,
        size: BODY_SIZE,
        color: cfg.palette.text,
    };

    // Header row. No overflow check: the table always starts with enough
    // room below the preamble blocks.
    let y0 = canvas.cursor();
    canvas.fill_rect(cols.x, y0, cols.w, cfg.row_height, cfg.palette.primary);
    let hb = row_baseline(y0, cfg.row_height, HEADER_SIZE);
    canvas.draw_text("Description", cols.desc_x, hb, Align::Left, &header);
    canvas.draw_text("Qty", cols.qty_r, hb, Align::Right, &header);
    canvas.draw_text("Rate", cols.rate_r, hb, Align::Right, &header);
    canvas.draw_text("Amount", cols.amount_r, hb, Align::Right, &header);
    canvas.advance(cfg.row_height);

    for (idx, item) in invoice.items.iter().enumerate() {
        let desc_lines: Vec<String> = match cfg.description_overflow {
            DescriptionOverflow::Truncate => {
                vec![truncate_chars(&item.description, cfg.description_budget).to_string()]
            }
            DescriptionOverflow::Wrap => {
                wrap_text(&item.description, body.font, body.size, cols.desc_w)
            }
        };
        let row_h = cfg
            .row_height
            .max(desc_lines.len() as f32 * DESC_LINE_H + 2.0 * ROW_PAD);

        if row_h > canvas.remaining_height() {
            canvas.new_page();
        }
        let y_top = canvas.cursor();
        log::trace!("row {idx}: y_top={y_top:.1} h={row_h:.1}");

        if idx % 2 == 0 {
            canvas.fill_rect(cols.x, y_top, cols.w, row_h, cfg.palette.row_shade);
        }

        let first_baseline = if desc_lines.len() == 1 {
            let b = row_baseline(y_top, row_h, BODY_SIZE);
            canvas.draw_text(&desc_lines[0], cols.desc_x, b, Align::Left, &body);
            b
        } else {
            let first = y_top + ROW_PAD + BODY_SIZE * ASCENT + 1.0;
            for (li, line) in desc_lines.iter().enumerate() {
                let b = first + li as f32 * DESC_LINE_H;
                canvas.draw_text(line, cols.desc_x, b, Align::Left, &body);
            }
            first
        };

        canvas.draw_text(
            &item.quantity.to_string(),
            cols.qty_r,
            first_baseline,
            Align::Right,
            &body,
        );
        canvas.draw_text(
            &format_currency(item.rate, &invoice.currency),
            cols.rate_r,
            first_baseline,
            Align::Right,
            &body,
        );
        canvas.draw_text(
            &format_currency(item.amount, &invoice.currency),
            cols.amount_r,
            first_baseline,
            Align::Right,
            &body,
        );

        canvas.advance(row_h);
    }
}
