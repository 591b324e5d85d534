//! Watermark stamping over RGB frames.

pub mod glyph;

use serde::Serialize;
use tracing::{debug, info, warn};
use watermark_types::{config::StampConfig, PixelBuffer, Result, Rgb};

use crate::glyph::{Glyph, GlyphTable};

/// Anything that turns one frame into another without touching the input.
pub trait FrameProcessor {
    fn process(&self, frame: &PixelBuffer) -> PixelBuffer;
}

/// Placement and colour of stamped text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StampLayout {
    pub origin_x: i32,
    pub origin_y: i32,
    pub advance: i32,
    pub color: Rgb,
}

impl Default for StampLayout {
    fn default() -> Self {
        Self {
            origin_x: 10,
            origin_y: 10,
            advance: 8,
            color: Rgb::RED,
        }
    }
}

impl StampLayout {
    /// Top-left corner of the character at `index`.
    pub fn position(&self, index: usize) -> (i32, i32) {
        let index = i32::try_from(index).unwrap_or(i32::MAX);
        (
            self.origin_x.saturating_add(index.saturating_mul(self.advance)),
            self.origin_y,
        )
    }
}

/// Summary of a single stamping pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StampReport {
    pub pts: i64,
    pub width: u32,
    pub height: u32,
    pub active: bool,
    pub glyphs_drawn: usize,
    pub skipped: usize,
    pub pixels_written: usize,
}

/// Stamps a fixed label onto copies of incoming frames while active.
#[derive(Debug, Clone)]
pub struct WatermarkStamper {
    label: String,
    active: bool,
    layout: StampLayout,
    glyphs: GlyphTable,
}

impl WatermarkStamper {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            active: false,
            layout: StampLayout::default(),
            glyphs: GlyphTable::builtin(),
        }
    }

    pub fn from_config(config: &StampConfig) -> Result<Self> {
        let glyphs = GlyphTable::with_specs(&config.glyphs)?;
        Ok(Self {
            label: config.label.clone(),
            active: false,
            layout: StampLayout {
                origin_x: config.origin_x,
                origin_y: config.origin_y,
                advance: config.advance,
                color: config.color,
            },
            glyphs,
        })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Returns `true` only when the stamper was inactive before the call.
    pub fn start(&mut self) -> bool {
        if self.active {
            return false;
        }
        self.active = true;
        info!("Watermark started.");
        true
    }

    /// Returns `true` only when the stamper was active before the call.
    pub fn stop(&mut self) -> bool {
        if !self.active {
            return false;
        }
        self.active = false;
        info!("Watermark stopped.");
        true
    }

    pub fn stamp(&self, input: &PixelBuffer) -> PixelBuffer {
        self.stamp_with_report(input).0
    }

    /// Characters are placed by `char` index, so a multi-byte character takes a
    /// single advance.
    pub fn stamp_with_report(&self, input: &PixelBuffer) -> (PixelBuffer, StampReport) {
        let mut report = StampReport {
            pts: input.pts(),
            width: input.width(),
            height: input.height(),
            active: self.active,
            ..Default::default()
        };
        if !self.active {
            warn!("Watermark is not running!");
            return (input.clone(), report);
        }

        let mut output = input.clone();
        info!("Processing image with PTS: {}", input.pts());
        info!("Adding watermark: {}", self.label);

        for (index, ch) in self.label.chars().enumerate() {
            let Some(glyph) = self.glyphs.lookup(ch) else {
                debug!("No glyph for {:?}, skipping", ch);
                report.skipped += 1;
                continue;
            };
            let (x, y) = self.layout.position(index);
            report.pixels_written += draw_glyph(&mut output, glyph, x, y, self.layout.color);
            report.glyphs_drawn += 1;
        }
        (output, report)
    }
}

impl FrameProcessor for WatermarkStamper {
    fn process(&self, frame: &PixelBuffer) -> PixelBuffer {
        self.stamp(frame)
    }
}

/// Draws the set cells of `glyph` with its top-left at (`x`, `y`) and returns
/// how many landed inside the buffer.
fn draw_glyph(buffer: &mut PixelBuffer, glyph: &Glyph, x: i32, y: i32, color: Rgb) -> usize {
    let mut written = 0;
    for (col, row) in glyph.lit() {
        let px = x.saturating_add(col as i32);
        let py = y.saturating_add(row as i32);
        if buffer.pixel(px, py).is_some() {
            written += 1;
        }
        buffer.set_pixel(px, py, color);
    }
    written
}
