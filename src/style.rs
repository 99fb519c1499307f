use crate::error::Error;
use crate::fonts::Font;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Components scaled to the 0..1 range PDF content streams use.
    pub(crate) fn to_unit(self) -> [f32; 3] {
        [
            self.0 as f32 / 255.0,
            self.1 as f32 / 255.0,
            self.2 as f32 / 255.0,
        ]
    }
}

/// Immutable per-render color set. Injected once via [`RenderConfig`];
/// individual draw calls never carry ad-hoc colors.
#[derive(Clone, Debug)]
pub struct Palette {
    /// Banner and table header fill.
    pub primary: Rgb,
    /// Text drawn on top of `primary`.
    pub on_primary: Rgb,
    /// Body text.
    pub text: Rgb,
    /// Labels and the footer caption.
    pub muted: Rgb,
    /// Alternating line-item row background.
    pub row_shade: Rgb,
}

impl Default for Palette {
    fn default() -> Self {
        Palette {
            primary: Rgb(37, 99, 235),
            on_primary: Rgb(255, 255, 255),
            text: Rgb(30, 41, 59),
            muted: Rgb(100, 116, 139),
            row_shade: Rgb(241, 245, 249),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Align {
    Left,
    Center,
    Right,
}

#[derive(Clone, Copy)]
pub(crate) struct TextStyle {
    pub(crate) font: Font,
    pub(crate) size: f32,
    pub(crate) color: Rgb,
}

/// How the table handles descriptions wider than their column.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DescriptionOverflow {
    /// Clip to [`RenderConfig::description_budget`] characters. Matches the
    /// observed upstream behavior; a documented fidelity limitation.
    #[default]
    Truncate,
    /// Wrap inside the column; the row grows taller and pagination uses the
    /// grown height.
    Wrap,
}

/// Read-only geometry and styling shared by every page of one document.
/// All lengths are PDF points. Safe to share across concurrent renders.
#[derive(Clone, Debug)]
pub struct RenderConfig {
    pub page_width: f32,
    pub page_height: f32,
    pub margin_top: f32,
    pub margin_bottom: f32,
    pub margin_left: f32,
    pub margin_right: f32,
    /// Footer baseline offset from the page bottom.
    pub footer_margin: f32,
    /// Branded banner height on the first page.
    pub banner_height: f32,
    /// Line-item row height (minimum height under `DescriptionOverflow::Wrap`).
    pub row_height: f32,
    /// Character budget for truncated descriptions.
    pub description_budget: usize,
    pub description_overflow: DescriptionOverflow,
    /// Centered caption drawn on every page.
    pub footer_caption: String,
    pub palette: Palette,
}

impl Default for RenderConfig {
    fn default() -> Self {
        // US Letter.
        RenderConfig {
            page_width: 612.0,
            page_height: 792.0,
            margin_top: 40.0,
            margin_bottom: 50.0,
            margin_left: 40.0,
            margin_right: 40.0,
            footer_margin: 30.0,
            banner_height: 40.0,
            row_height: 18.0,
            description_budget: 48,
            description_overflow: DescriptionOverflow::Truncate,
            footer_caption: "Thank you for your business".to_string(),
            palette: Palette::default(),
        }
    }
}

impl RenderConfig {
    /// Geometry check, run before any drawing. Everything past this point
    /// assumes a usable printable area.
    pub fn validate(&self) -> Result<(), Error> {
        if self.page_width <= 0.0 || self.page_height <= 0.0 {
            return Err(Error::Config(format!(
                "non-positive page dimensions: {}x{}",
                self.page_width, self.page_height
            )));
        }
        if self.margin_top < 0.0
            || self.margin_bottom < 0.0
            || self.margin_left < 0.0
            || self.margin_right < 0.0
        {
            return Err(Error::Config("negative margin".to_string()));
        }
        if self.margin_left + self.margin_right >= self.page_width {
            return Err(Error::Config(format!(
                "horizontal margins ({} + {}) exceed page width {}",
                self.margin_left, self.margin_right, self.page_width
            )));
        }
        if self.margin_top + self.margin_bottom >= self.page_height {
            return Err(Error::Config(format!(
                "vertical margins ({} + {}) exceed page height {}",
                self.margin_top, self.margin_bottom, self.page_height
            )));
        }
        if self.footer_margin < 0.0 || self.footer_margin >= self.page_height {
            return Err(Error::Config(format!(
                "footer margin {} outside page height {}",
                self.footer_margin, self.page_height
            )));
        }
        if self.row_height <= 0.0 {
            return Err(Error::Config(format!(
                "non-positive row height: {}",
                self.row_height
            )));
        }
        Ok(())
    }

    pub(crate) fn printable_width(&self) -> f32 {
        self.page_width - self.margin_left - self.margin_right
    }

    /// Lowest cursor position content may reach before pagination intervenes.
    pub(crate) fn content_bottom(&self) -> f32 {
        self.page_height - self.margin_bottom
    }
}
