// Owns both particle populations: the fixed background lattice and the
// short-lived particles spawned by pointer movement

use crate::particle::{Particle, Point};
use log::{debug, warn};
use rand::Rng;

#[derive(Clone, Debug, Default)]
pub struct ParticleStore {
    pub background: Vec<Particle>,
    pub transient: Vec<Particle>,
}

impl ParticleStore {
    pub fn new() -> ParticleStore {
        ParticleStore::default()
    }

    pub fn spawn_transient<R: Rng>(&mut self, pos: Point, radius: Option<f64>, rng: &mut R) {
        self.transient.push(Particle::transient(pos, radius, rng));
    }

    pub fn spawn_background(&mut self, pos: Point, radius: f64) {
        self.background.push(Particle::background(pos, radius));
    }

    /// Spawns a background particle on every grid point in
    /// `[0, width) x [0, height)`, column by column.
    pub fn seed_lattice(&mut self, width: f64, height: f64, spacing: f64, radius: f64) {
        if !(spacing > 0.0) || !spacing.is_finite() {
            warn!("refusing to seed lattice with spacing {}", spacing);
            return;
        }
        let columns = (width / spacing).ceil().max(0.0) as usize;
        let rows = (height / spacing).ceil().max(0.0) as usize;
        self.background.reserve(columns * rows);

        let mut x = 0.0;
        while x < width {
            let mut y = 0.0;
            while y < height {
                self.spawn_background([x, y], radius);
                y += spacing;
            }
            x += spacing;
        }
        debug!(
            "seeded {} background particles ({}x{} at spacing {})",
            self.background.len(),
            width,
            height,
            spacing
        );
    }

    pub fn clear(&mut self) {
        self.background.clear();
        self.transient.clear();
    }

    pub fn len(&self) -> usize {
        self.background.len() + self.transient.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
