// Everything one frame needs: the simulation state, the renderer and the
// surface it draws on. The surface is optional; until one is attached every
// frame and pointer event is a no-op.

use crate::config::{Config, RESOLUTION_HEIGHT, RESOLUTION_WIDTH};
use crate::input::SPAWN_PER_MOVE;
use crate::particle::Point;
use crate::physics::{self, EdgeColors};
use crate::renderer::{Renderer, Surface};
use crate::store::ParticleStore;
use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub struct Simulation {
    pub config: Config,
    pub text: String,
    pub store: ParticleStore,
    pub edges: EdgeColors,
}

impl Simulation {
    pub fn new(config: Config, text: &str) -> Simulation {
        let edges = EdgeColors::new(config.left_color, config.right_color);
        let mut simulation = Simulation {
            config,
            text: text.to_owned(),
            store: ParticleStore::new(),
            edges,
        };
        simulation.reset();
        simulation
    }

    /// Back to a freshly seeded lattice with no transient particles.
    pub fn reset(&mut self) {
        self.store.clear();
        self.store.seed_lattice(
            RESOLUTION_WIDTH,
            RESOLUTION_HEIGHT,
            self.config.particle_spacing,
            self.config.particle_radius,
        );
        self.edges = EdgeColors::new(self.config.left_color, self.config.right_color);
        debug!("reset simulation for {:?}", self.text);
    }

    /// Returns false, leaving everything as is, when `text` is already shown.
    pub fn set_text(&mut self, text: &str) -> bool {
        if self.text == text {
            return false;
        }
        self.text = text.to_owned();
        self.reset();
        true
    }

    /// Physics for one frame on a `width` x `height` surface.
    pub fn step(&mut self, width: f64, height: f64) {
        physics::update_background(&mut self.store.background);
        physics::update_background_colors(&mut self.store.background, &self.edges);
        physics::update_transient(&mut self.store.transient, &self.edges, width, height);
        if self.config.cycle_edge_colors {
            self.edges.cycle();
        }
    }

    pub fn pointer_move<R: Rng>(&mut self, point: Point, rng: &mut R) {
        for _ in 0..SPAWN_PER_MOVE {
            self.store
                .spawn_transient(point, self.config.transient_radius, rng);
        }
        physics::repel(&mut self.store.background, point, self.config.particle_radius);
    }
}

pub struct Scene<S: Surface> {
    pub simulation: Simulation,
    renderer: Renderer,
    surface: Option<S>,
    rng: StdRng,
}

impl<S: Surface> Scene<S> {
    pub fn new(config: Config, text: &str) -> Scene<S> {
        Scene::with_rng(config, text, StdRng::from_entropy())
    }

    pub fn with_rng(config: Config, text: &str, rng: StdRng) -> Scene<S> {
        Scene {
            renderer: Renderer::new(&config),
            simulation: Simulation::new(config, text),
            surface: None,
            rng,
        }
    }

    pub fn attach(&mut self, surface: S) {
        self.surface = Some(surface);
    }

    pub fn detach(&mut self) -> Option<S> {
        self.surface.take()
    }

    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    pub fn set_text(&mut self, text: &str) -> bool {
        self.simulation.set_text(text)
    }

    /// One frame: physics, then compositing.
    pub fn tick(&mut self) -> Result<(), S::Error> {
        let surface = match &self.surface {
            Some(surface) => surface,
            None => return Ok(()),
        };
        self.simulation.step(surface.width(), surface.height());
        self.renderer
            .render(surface, &self.simulation.store, &self.simulation.text)
    }

    /// `point` is already in simulation space.
    pub fn pointer_move(&mut self, point: Point) {
        if self.surface.is_none() {
            return;
        }
        self.simulation.pointer_move(point, &mut self.rng);
    }
}
