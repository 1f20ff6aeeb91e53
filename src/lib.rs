mod utils;
pub mod canvas;
pub mod color;
pub mod config;
pub mod input;
pub mod logger;
pub mod particle;
pub mod physics;
pub mod renderer;
pub mod scene;
pub mod scheduler;
pub mod store;

use canvas::{CanvasSurface, WindowTimer};
use config::{Config, RESOLUTION_HEIGHT, RESOLUTION_WIDTH};
use input::PointerAdapter;
use log::{error, trace, Level, LevelFilter};
use renderer::Surface;
use scene::Scene;
use scheduler::FrameScheduler;
use std::cell::RefCell;
use std::rc::Rc;
use std::str::FromStr;
use wasm_bindgen::prelude::*;
use web_sys::{console, HtmlCanvasElement};

// When the `wee_alloc` feature is enabled, use `wee_alloc` as the global
// allocator.
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen]
pub fn initialize() {
    utils::set_panic_hook();
    // a second call finds the logger already installed, which is fine
    let _ = logger::init(LevelFilter::Info);
}

/// Accepts the usual `log` level names ("error" .. "trace", "off").
#[wasm_bindgen(js_name = setLogLevel)]
pub fn set_log_level(level: &str) -> Result<(), JsValue> {
    let level = LevelFilter::from_str(level)
        .map_err(|_| JsValue::from_str(&format!("unknown log level `{}`", level)))?;
    log::set_max_level(level);
    Ok(())
}

/// console.time/timeEnd around a scope, only while trace logging is on.
pub struct Timer<'a> {
    name: Option<&'a str>,
}

impl<'a> Timer<'a> {
    pub fn new(name: &'a str) -> Timer<'a> {
        if log::log_enabled!(Level::Trace) {
            console::time_with_label(name);
            Timer { name: Some(name) }
        } else {
            Timer { name: None }
        }
    }
}

impl<'a> Drop for Timer<'a> {
    fn drop(&mut self) {
        if let Some(name) = self.name {
            console::time_end_with_label(name);
        }
    }
}

fn parse_options(options: &JsValue) -> Result<Config, JsValue> {
    if options.is_undefined() || options.is_null() {
        return Ok(Config::default());
    }
    let json: String = js_sys::JSON::stringify(options)?.into();
    Config::from_json(&json).map_err(|err| JsValue::from_str(&err.to_string()))
}

/// Text drawn as a field of particles on a `<canvas>`.
#[wasm_bindgen]
pub struct FluidText {
    scene: Rc<RefCell<Scene<CanvasSurface>>>,
    scheduler: FrameScheduler<WindowTimer>,
    input: PointerAdapter,
}

#[wasm_bindgen]
impl FluidText {
    /// Takes over `canvas` and seeds the lattice. Nothing moves until `mount`.
    #[wasm_bindgen(constructor)]
    pub fn new(canvas: HtmlCanvasElement, text: &str, options: JsValue) -> Result<FluidText, JsValue> {
        let config = parse_options(&options)?;
        let surface = CanvasSurface::new(canvas, RESOLUTION_WIDTH as u32, RESOLUTION_HEIGHT as u32)?;
        surface.set_display_size(config.display_width, config.display_height)?;
        surface.clear();

        let input = PointerAdapter::from_config(&config);
        let mut scene = Scene::new(config, text);
        scene.attach(surface);

        Ok(FluidText {
            scene: Rc::new(RefCell::new(scene)),
            scheduler: FrameScheduler::new(WindowTimer::new()?),
            input,
        })
    }

    /// Starts (or restarts) the frame loop.
    pub fn mount(&mut self) -> Result<(), JsValue> {
        let scene = self.scene.clone();
        self.scheduler.start(Box::new(move || {
            let _timer = Timer::new("FluidText::tick");
            match scene.try_borrow_mut() {
                Ok(mut scene) => {
                    if let Err(err) = scene.tick() {
                        error!("frame failed: {:?}", err);
                    }
                }
                Err(_) => trace!("previous frame still running, skipping"),
            }
        }))
    }

    pub fn unmount(&mut self) {
        self.scheduler.stop();
    }

    /// Swapping the text resets the whole simulation and restarts a running loop.
    #[wasm_bindgen(js_name = setText)]
    pub fn set_text(&mut self, text: &str) -> Result<(), JsValue> {
        let changed = self.scene.borrow_mut().set_text(text);
        if changed && self.scheduler.is_running() {
            self.mount()?;
        }
        Ok(())
    }

    #[wasm_bindgen(js_name = onPointerMove)]
    pub fn on_pointer_move(&mut self, client_x: f64, client_y: f64) {
        let mut scene = match self.scene.try_borrow_mut() {
            Ok(scene) => scene,
            Err(_) => return,
        };
        let origin = match scene.surface() {
            Some(surface) => surface.origin(),
            None => return,
        };
        let point = self.input.to_simulation([client_x, client_y], origin);
        scene.pointer_move(point);
    }

    /// Stops the loop and lets go of the canvas. Everything after this is a no-op.
    pub fn destroy(&mut self) {
        self.scheduler.stop();
        if let Some(surface) = self.scene.borrow_mut().detach() {
            surface.clear();
        }
    }

    #[wasm_bindgen(js_name = isRunning)]
    pub fn is_running(&self) -> bool {
        self.scheduler.is_running()
    }

    #[wasm_bindgen(js_name = backgroundCount)]
    pub fn background_count(&self) -> usize {
        self.scene.borrow().simulation.store.background.len()
    }

    #[wasm_bindgen(js_name = transientCount)]
    pub fn transient_count(&self) -> usize {
        self.scene.borrow().simulation.store.transient.len()
    }

    /// Runs a single frame outside the timer.
    pub fn tick(&self) -> Result<(), JsValue> {
        self.scene.borrow_mut().tick()
    }
}
