// Simple particle struct to keep track of individual position, velocity,
// color and age, plus the lattice point it springs back to

use crate::color::Color;
use rand::Rng;
use vecmath::Vector2;

/// A coordinate in simulation space.
pub type Point = Vector2<f64>;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Particle {
    pub pos: Point,
    pub vel: Vector2<f64>,
    pub original_point: Point,
    pub radius: f64,
    pub color: Color,
    pub age: u32,
}

impl Particle {
    /// Transient particles are removed once their age goes past this.
    pub const MAX_AGE: u32 = 50;
    pub const TRANSIENT_COLOR: Color = Color::WHITE;
    pub const BACKGROUND_COLOR: Color = Color::WHITE;
    /// Radius range used for transient particles when none is configured.
    pub const MIN_RADIUS: f64 = 1.0;
    pub const MAX_RADIUS: f64 = 4.0;

    pub fn new(pos: Point, vel: Vector2<f64>, radius: f64, color: Color) -> Particle {
        Particle {
            pos,
            vel,
            original_point: pos,
            radius,
            color,
            age: 0,
        }
    }

    /// Pointer-spawned particle drifting off in a random direction.
    pub fn transient<R: Rng>(pos: Point, radius: Option<f64>, rng: &mut R) -> Particle {
        let radius = radius.unwrap_or_else(|| {
            rng.gen::<f64>() * (Particle::MAX_RADIUS - Particle::MIN_RADIUS) + Particle::MIN_RADIUS
        });
        let vel = [rng.gen::<f64>() * 2.0 - 1.0, rng.gen::<f64>() * 2.0 - 1.0];
        Particle::new(pos, vel, radius, Particle::TRANSIENT_COLOR)
    }

    /// Lattice particle at rest on its own anchor.
    pub fn background(pos: Point, radius: f64) -> Particle {
        Particle::new(pos, [0.0, 0.0], radius, Particle::BACKGROUND_COLOR)
    }

    pub fn is_expired(&self) -> bool {
        self.age > Particle::MAX_AGE
    }

    /// Inclusive bounds check against a `width` x `height` surface.
    pub fn is_inside(&self, width: f64, height: f64) -> bool {
        let [x, y] = self.pos;
        x >= 0.0 && x <= width && y >= 0.0 && y <= height
    }
}
