// Renderer that composites one frame onto a drawing surface. The pass order
// and blend modes are what turn a plain particle field into particles shaped
// like text:
//
//   1. clear
//   2. background particles, source-over
//   3. transient particles, destination-over (always behind the lattice)
//   4. filled text, destination-in (erase everything outside the glyphs)
//   5. stroked text, xor (outline)

use crate::color::Color;
use crate::config::Config;
use crate::particle::{Particle, Point};
use crate::store::ParticleStore;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Blend {
    SourceOver,
    DestinationOver,
    DestinationIn,
    Xor,
}

impl Blend {
    /// Name of the matching canvas `globalCompositeOperation`.
    pub fn as_str(self) -> &'static str {
        match self {
            Blend::SourceOver => "source-over",
            Blend::DestinationOver => "destination-over",
            Blend::DestinationIn => "destination-in",
            Blend::Xor => "xor",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TextStyle {
    pub font: String,
    pub align: &'static str,
    pub baseline: &'static str,
    pub fill_color: String,
    pub stroke_color: String,
    pub line_width: f64,
}

impl TextStyle {
    pub const ALIGN: &'static str = "left";
    pub const BASELINE: &'static str = "middle";
    pub const LINE_WIDTH: f64 = 3.0;
    /// Only the alpha of the mask fill matters.
    pub const MASK_FILL: &'static str = "black";

    pub fn from_config(config: &Config) -> TextStyle {
        TextStyle {
            font: config.font(),
            align: TextStyle::ALIGN,
            baseline: TextStyle::BASELINE,
            fill_color: TextStyle::MASK_FILL.to_owned(),
            stroke_color: config.stroke_color.clone(),
            line_width: TextStyle::LINE_WIDTH,
        }
    }
}

/// Something the renderer can draw a frame onto.
pub trait Surface {
    type Error;

    fn width(&self) -> f64;
    fn height(&self) -> f64;
    fn clear(&self);
    fn set_blend(&self, blend: Blend) -> Result<(), Self::Error>;
    fn fill_circle(&self, center: Point, radius: f64, color: Color) -> Result<(), Self::Error>;
    fn fill_text(&self, text: &str, at: Point, style: &TextStyle) -> Result<(), Self::Error>;
    fn stroke_text(&self, text: &str, at: Point, style: &TextStyle) -> Result<(), Self::Error>;
}

pub struct Renderer {
    pub text_style: TextStyle,
}

impl Renderer {
    pub fn new(config: &Config) -> Renderer {
        Renderer {
            text_style: TextStyle::from_config(config),
        }
    }

    /// Text sits on the left edge, vertically centered.
    pub fn text_anchor<S: Surface>(surface: &S) -> Point {
        [0.0, surface.height() / 2.0]
    }

    pub fn render<S: Surface>(&self, surface: &S, store: &ParticleStore, text: &str) -> Result<(), S::Error> {
        surface.clear();
        self.render_particles(surface, &store.background, Blend::SourceOver)?;
        self.render_particles(surface, &store.transient, Blend::DestinationOver)?;
        self.apply_text_mask(surface, text)?;
        self.render_text_outline(surface, text)
    }

    pub fn render_particles<S: Surface>(&self, surface: &S, particles: &[Particle], blend: Blend) -> Result<(), S::Error> {
        surface.set_blend(blend)?;
        for p in particles {
            surface.fill_circle(p.pos, p.radius, p.color)?;
        }
        Ok(())
    }

    pub fn apply_text_mask<S: Surface>(&self, surface: &S, text: &str) -> Result<(), S::Error> {
        surface.set_blend(Blend::DestinationIn)?;
        surface.fill_text(text, Renderer::text_anchor(surface), &self.text_style)
    }

    pub fn render_text_outline<S: Surface>(&self, surface: &S, text: &str) -> Result<(), S::Error> {
        surface.set_blend(Blend::Xor)?;
        surface.stroke_text(text, Renderer::text_anchor(surface), &self.text_style)
    }
}
