//! Drawing box outlines and class labels onto a copy of the input image.
//!
//! [`annotate`] never touches its input: it converts the source to an 8-bit
//! RGB working copy (which also drops any alpha channel) and draws on that.
//! Detections are drawn in the order given, so a later box or label can cover
//! an earlier one where they overlap.

use std::fmt;
use std::path::Path;
use std::sync::OnceLock;

use ab_glyph::{FontArc, FontRef, PxScale};
use image::{DynamicImage, Rgb, RgbImage};
use imageproc::drawing::{draw_hollow_rect_mut, draw_text_mut};
use imageproc::rect::Rect;
use tracing::info;

use crate::error::CropmarkError;
use crate::ir::{PixelBox, ValidatedDetection};

pub const DEFAULT_STROKE_COLOR: Rgb<u8> = Rgb([255, 0, 0]);

pub const DEFAULT_STROKE_WIDTH: u32 = 2;

pub const DEFAULT_FONT_SIZE: f32 = 11.0;

/// DejaVu Sans, shipped with the crate so labels never depend on host fonts.
static BUNDLED_FONT_DATA: &[u8] = include_bytes!("../../assets/DejaVuSans.ttf");

/// The label font used unless a style overrides it.
pub fn bundled_font() -> FontArc {
    static FONT: OnceLock<FontArc> = OnceLock::new();
    FONT.get_or_init(|| {
        let font = FontRef::try_from_slice(BUNDLED_FONT_DATA)
            .expect("bundled DejaVu Sans is a valid TrueType font");
        FontArc::new(font)
    })
    .clone()
}

/// Fixed drawing parameters shared by every invocation.
#[derive(Clone)]
pub struct AnnotationStyle {
    /// Color of both the box outline and the label text.
    pub stroke_color: Rgb<u8>,

    /// Outline thickness in pixels, drawn inward from the box edge.
    pub stroke_width: u32,

    /// Label font, [`bundled_font`] by default.
    pub font: FontArc,

    /// Label height in pixels.
    pub font_size: f32,
}

impl Default for AnnotationStyle {
    fn default() -> Self {
        Self {
            stroke_color: DEFAULT_STROKE_COLOR,
            stroke_width: DEFAULT_STROKE_WIDTH,
            font: bundled_font(),
            font_size: DEFAULT_FONT_SIZE,
        }
    }
}

impl fmt::Debug for AnnotationStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnnotationStyle")
            .field("stroke_color", &self.stroke_color)
            .field("stroke_width", &self.stroke_width)
            .field("font", &"<font>")
            .field("font_size", &self.font_size)
            .finish()
    }
}

impl AnnotationStyle {
    /// Replaces the label font with a TrueType/OpenType file.
    pub fn with_font_path(mut self, font_path: &Path) -> Result<Self, CropmarkError> {
        let font_data = std::fs::read(font_path).map_err(CropmarkError::Io)?;
        self.font = FontArc::try_from_vec(font_data).map_err(|_| CropmarkError::FontLoad {
            path: font_path.to_path_buf(),
        })?;
        info!("Loaded label font: {}", font_path.display());
        Ok(self)
    }
}

/// Returns a copy of `image` with each detection's box and class name drawn on it.
pub fn annotate(
    image: &DynamicImage,
    detections: &[ValidatedDetection],
    style: &AnnotationStyle,
) -> RgbImage {
    let mut canvas = image.to_rgb8();

    for detection in detections {
        draw_outline(&mut canvas, &detection.bbox, style);
        draw_label(&mut canvas, detection, style);
    }

    canvas
}

/// Strokes the box edges, `x2`/`y2` inclusive, one ring per unit of width
/// working inward. Thick strokes on small boxes stop once the ring closes.
fn draw_outline(canvas: &mut RgbImage, bbox: &PixelBox, style: &AnnotationStyle) {
    let outer_w = bbox.x2() - bbox.x1() + 1;
    let outer_h = bbox.y2() - bbox.y1() + 1;

    for inset in 0..style.stroke_width {
        let (Some(w), Some(h)) = (
            outer_w.checked_sub(2 * inset).filter(|w| *w > 0),
            outer_h.checked_sub(2 * inset).filter(|h| *h > 0),
        ) else {
            break;
        };

        let rect = Rect::at((bbox.x1() + inset) as i32, (bbox.y1() + inset) as i32).of_size(w, h);
        draw_hollow_rect_mut(canvas, rect, style.stroke_color);
    }
}

/// Writes the class name with its top-left at the box's top-left, no
/// background. Glyphs past the canvas edge are clipped by the drawing routine.
fn draw_label(canvas: &mut RgbImage, detection: &ValidatedDetection, style: &AnnotationStyle) {
    draw_text_mut(
        canvas,
        style.stroke_color,
        detection.bbox.x1() as i32,
        detection.bbox.y1() as i32,
        PxScale::from(style.font_size),
        &style.font,
        &detection.class_name,
    );
}
