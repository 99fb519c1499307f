use pdf_writer::{Content, Name, Str};

use crate::fonts::to_winansi_bytes;
use crate::style::{Align, RenderConfig, Rgb, TextStyle};

/// Mutable per-render drawing context: one content stream per page plus a
/// vertical cursor in layout space (y grows downward from the page top).
/// Coordinates are flipped to PDF space at draw time.
///
/// Owned exclusively by one render invocation; the cursor only moves down
/// within a page and resets to the top margin on [`Canvas::new_page`].
pub(crate) struct Canvas<'a> {
    cfg: &'a RenderConfig,
    done: Vec<Content>,
    page: Content,
    page_index: usize,
    y: f32,
}

impl<'a> Canvas<'a> {
    /// Assumes `cfg` has already passed [`RenderConfig::validate`].
    pub(crate) fn new(cfg: &'a RenderConfig) -> Self {
        Canvas {
            cfg,
            done: Vec::new(),
            page: Content::new(),
            page_index: 0,
            y: cfg.margin_top,
        }
    }

    pub(crate) fn cursor(&self) -> f32 {
        self.y
    }

    pub(crate) fn advance(&mut self, dy: f32) {
        self.y += dy;
    }

    /// Move the cursor down to `y`; never moves it back up.
    pub(crate) fn advance_to(&mut self, y: f32) {
        self.y = self.y.max(y);
    }

    /// Vertical space left above the bottom content margin.
    pub(crate) fn remaining_height(&self) -> f32 {
        self.cfg.content_bottom() - self.y
    }

    /// Finish the current page and reset the cursor to the top margin.
    pub(crate) fn new_page(&mut self) {
        let finished = std::mem::replace(&mut self.page, Content::new());
        self.done.push(finished);
        self.page_index += 1;
        self.y = self.cfg.margin_top;
        log::debug!(
            "page break: starting page {} (cursor reset to {:.1})",
            self.page_index + 1,
            self.y
        );
    }

    /// Filled rectangle with its top edge at layout-space `y_top`.
    /// Out-of-range coordinates are drawn as-is, never an error.
    pub(crate) fn fill_rect(&mut self, x: f32, y_top: f32, w: f32, h: f32, color: Rgb) {
        Self::rect_op(&mut self.page, self.cfg, x, y_top, w, h, color);
    }

    /// Thin horizontal separator; sugar over `fill_rect`.
    pub(crate) fn rule(&mut self, x: f32, y_top: f32, w: f32, thickness: f32, color: Rgb) {
        Self::rect_op(&mut self.page, self.cfg, x, y_top, w, thickness, color);
    }

    /// Single text line with its baseline at layout-space `baseline`.
    /// `x` is the left edge, center, or right edge depending on `align`.
    pub(crate) fn draw_text(
        &mut self,
        text: &str,
        x: f32,
        baseline: f32,
        align: Align,
        style: &TextStyle,
    ) {
        Self::text_op(&mut self.page, self.cfg, text, x, baseline, align, style);
    }

    /// All pages in order, the current one included.
    pub(crate) fn finish(mut self) -> Vec<Content> {
        self.done.push(self.page);
        self.done
    }

    // Low-level emitters, shared with the footer post-pass which draws into
    // already-finished content streams.

    pub(crate) fn rect_op(
        content: &mut Content,
        cfg: &RenderConfig,
        x: f32,
        y_top: f32,
        w: f32,
        h: f32,
        color: Rgb,
    ) {
        let [r, g, b] = color.to_unit();
        content.save_state();
        content.set_fill_rgb(r, g, b);
        content.rect(x, cfg.page_height - y_top - h, w, h);
        content.fill_nonzero();
        content.restore_state();
    }

    pub(crate) fn text_op(
        content: &mut Content,
        cfg: &RenderConfig,
        text: &str,
        x: f32,
        baseline: f32,
        align: Align,
        style: &TextStyle,
    ) {
        if text.is_empty() {
            return;
        }
        let width = style.font.text_width(text, style.size);
        let tx = match align {
            Align::Left => x,
            Align::Center => x - width / 2.0,
            Align::Right => x - width,
        };
        let [r, g, b] = style.color.to_unit();
        content.set_fill_rgb(r, g, b);
        content
            .begin_text()
            .set_font(Name(style.font.pdf_name().as_bytes()), style.size)
            .next_line(tx, cfg.page_height - baseline)
            .show(Str(&to_winansi_bytes(text)))
            .end_text();
    }
}
