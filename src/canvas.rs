// Browser side of the drawing surface and frame timer: a 2d canvas context
// and window.setInterval

use crate::color::Color;
use crate::particle::Point;
use crate::renderer::{Blend, Surface, TextStyle};
use crate::scheduler::IntervalTimer;
use std::f64::consts::PI;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, Window};

pub struct CanvasSurface {
    pub canvas: HtmlCanvasElement,
    pub context: CanvasRenderingContext2d,
}

impl CanvasSurface {
    /// Grabs the 2d context and sets the canvas' backing resolution.
    pub fn new(canvas: HtmlCanvasElement, width: u32, height: u32) -> Result<CanvasSurface, JsValue> {
        let context = canvas
            .get_context("2d")?
            .ok_or("canvas has no 2d context")?
            .dyn_into::<CanvasRenderingContext2d>()?;
        canvas.set_width(width);
        canvas.set_height(height);
        Ok(CanvasSurface { canvas, context })
    }

    /// Sets the on-screen size, which is what pointer coordinates are measured in.
    pub fn set_display_size(&self, width: f64, height: f64) -> Result<(), JsValue> {
        let style = self.canvas.style();
        style.set_property("width", &format!("{}px", width))?;
        style.set_property("height", &format!("{}px", height))
    }

    /// Top-left corner of the canvas in client coordinates.
    pub fn origin(&self) -> [f64; 2] {
        let rect = self.canvas.get_bounding_client_rect();
        [rect.left(), rect.top()]
    }

    fn apply_text_style(&self, style: &TextStyle) {
        self.context.set_font(&style.font);
        self.context.set_text_align(style.align);
        self.context.set_text_baseline(style.baseline);
    }
}

impl Surface for CanvasSurface {
    type Error = JsValue;

    fn width(&self) -> f64 {
        self.canvas.width() as f64
    }

    fn height(&self) -> f64 {
        self.canvas.height() as f64
    }

    fn clear(&self) {
        self.context.clear_rect(0.0, 0.0, self.width(), self.height());
    }

    fn set_blend(&self, blend: Blend) -> Result<(), JsValue> {
        self.context.set_global_composite_operation(blend.as_str())
    }

    fn fill_circle(&self, center: Point, radius: f64, color: Color) -> Result<(), JsValue> {
        self.context.begin_path();
        self.context.arc(center[0], center[1], radius, 0.0, 2.0 * PI)?;
        self.context
            .set_fill_style(&JsValue::from_str(&color.to_hex()));
        self.context.fill();
        Ok(())
    }

    fn fill_text(&self, text: &str, at: Point, style: &TextStyle) -> Result<(), JsValue> {
        self.apply_text_style(style);
        self.context
            .set_fill_style(&JsValue::from_str(&style.fill_color));
        self.context.fill_text(text, at[0], at[1])
    }

    fn stroke_text(&self, text: &str, at: Point, style: &TextStyle) -> Result<(), JsValue> {
        self.apply_text_style(style);
        self.context
            .set_fill_style(&JsValue::from_str("transparent"));
        self.context
            .set_stroke_style(&JsValue::from_str(&style.stroke_color));
        self.context.set_line_width(style.line_width);
        self.context.stroke_text(text, at[0], at[1])
    }
}

/// A running `setInterval`. The closure has to outlive the interval, so it
/// lives here until the interval is cleared.
pub struct WindowInterval {
    id: i32,
    _tick: Closure<dyn FnMut()>,
}

pub struct WindowTimer {
    window: Window,
}

impl WindowTimer {
    pub fn new() -> Result<WindowTimer, JsValue> {
        let window = web_sys::window().ok_or("no global `window` exists")?;
        Ok(WindowTimer { window })
    }
}

impl IntervalTimer for WindowTimer {
    type Handle = WindowInterval;
    type Error = JsValue;

    fn set_interval(&mut self, period_ms: i32, tick: Box<dyn FnMut()>) -> Result<WindowInterval, JsValue> {
        let tick = Closure::wrap(tick);
        let id = self
            .window
            .set_interval_with_callback_and_timeout_and_arguments_0(tick.as_ref().unchecked_ref(), period_ms)?;
        Ok(WindowInterval { id, _tick: tick })
    }

    fn clear_interval(&mut self, handle: WindowInterval) {
        self.window.clear_interval_with_handle(handle.id);
    }
}
