// Per-frame integration for both particle populations. Background particles
// spring back to their lattice point and are heavily damped, transient
// particles drift freely, age out and fade towards the local gradient color.

use crate::color::Color;
use crate::particle::{Particle, Point};
use vecmath::{vec2_add, vec2_len, vec2_normalized, vec2_scale, vec2_sub};

pub const SPRING_CONSTANT: f64 = 0.04;
pub const BACKGROUND_DAMPING: f64 = 0.5;
pub const TRANSIENT_DAMPING: f64 = 0.99;
/// How far a transient particle's color moves towards the gradient per frame.
pub const TRANSIENT_COLOR_SHIFT: f64 = 3.0;
/// Particles within `REPEL_RADIUS_FACTOR * particle_radius` of the pointer get kicked.
pub const REPEL_RADIUS_FACTOR: f64 = 12.0;
pub const REPEL_STRENGTH: f64 = 60.0;
/// Simulation units per percent of the left-to-right gradient.
pub const GRADIENT_SCALE: f64 = 10.0;

/// The two colors the horizontal gradient runs between.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct EdgeColors {
    pub left: Color,
    pub right: Color,
}

impl EdgeColors {
    pub fn new(left: Color, right: Color) -> EdgeColors {
        EdgeColors { left, right }
    }

    /// Gradient color at simulation x coordinate `x`.
    pub fn at(&self, x: f64) -> Color {
        self.left.shift_towards(self.right, x / GRADIENT_SCALE)
    }

    /// Rotates both edges one step around the hue circle.
    pub fn cycle(&mut self) {
        self.left = self.left.colorloop();
        self.right = self.right.colorloop();
    }
}

/// Pulls `particle` towards its original point. The pull grows with
/// distance but never drops below `strength` close to the anchor.
pub fn apply_spring(particle: &mut Particle, strength: f64) {
    let to_anchor = vec2_sub(particle.original_point, particle.pos);
    let distance = vec2_len(to_anchor);
    if distance == 0.0 {
        return;
    }
    let magnitude = strength * (distance / 4.0).max(1.0);
    let force = vec2_scale(vec2_normalized(to_anchor), magnitude);
    particle.vel = vec2_add(particle.vel, force);
}

fn integrate(particle: &mut Particle, damping: f64) {
    particle.pos = vec2_add(particle.pos, particle.vel);
    particle.vel = vec2_scale(particle.vel, damping);
}

pub fn update_background(particles: &mut [Particle]) {
    for particle in particles.iter_mut() {
        apply_spring(particle, SPRING_CONSTANT);
    }
    for particle in particles.iter_mut() {
        integrate(particle, BACKGROUND_DAMPING);
    }
}

/// Background colors follow the gradient directly, with no lag.
pub fn update_background_colors(particles: &mut [Particle], edges: &EdgeColors) {
    for particle in particles.iter_mut() {
        particle.color = edges.at(particle.pos[0]);
    }
}

/// Ages, moves and recolors every transient particle, then drops the ones
/// that are too old or have left the `width` x `height` surface.
///
/// Removal happens in one `retain` pass after the scan; splicing by index
/// mid-loop would skip whichever particle slides into the removed slot.
pub fn update_transient(particles: &mut Vec<Particle>, edges: &EdgeColors, width: f64, height: f64) {
    for particle in particles.iter_mut() {
        particle.age += 1;
        integrate(particle, TRANSIENT_DAMPING);
        let target = edges.at(particle.pos[0]);
        particle.color = particle.color.shift_towards(target, TRANSIENT_COLOR_SHIFT);
    }
    particles.retain(|p| !p.is_expired() && p.is_inside(width, height));
}

/// Kicks every background particle near `pointer` directly away from it.
/// Returns how many particles were hit.
pub fn repel(particles: &mut [Particle], pointer: Point, particle_radius: f64) -> usize {
    let reach = particle_radius * REPEL_RADIUS_FACTOR;
    let mut hit = 0;
    for particle in particles.iter_mut() {
        let [dx, dy] = vec2_sub(particle.pos, pointer);
        let distance = (dx * dx + dy * dy).sqrt();
        if distance < reach {
            // atan2(0, 0) is 0, so a particle right under the pointer goes +x
            let angle = dy.atan2(dx);
            let force = REPEL_STRENGTH / distance.max(1.0);
            particle.vel = vec2_add(particle.vel, [force * angle.cos(), force * angle.sin()]);
            hit += 1;
        }
    }
    hit
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::ParticleStore;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const WIDTH: f64 = 1000.0;
    const HEIGHT: f64 = 200.0;

    fn edges() -> EdgeColors {
        EdgeColors::new(Color::from_hex("#578fb1"), Color::from_hex("#ff0000"))
    }

    #[test]
    fn resting_lattice_stays_put() {
        let mut store = ParticleStore::new();
        store.seed_lattice(30.0, 30.0, 10.0, 4.0);
        let before = store.background.clone();
        for _ in 0..10 {
            update_background(&mut store.background);
        }
        assert_eq!(store.background, before);
    }

    #[test]
    fn spring_pulls_displaced_particle_home() {
        let mut particle = Particle::background([50.0, 50.0], 4.0);
        particle.pos = [70.0, 50.0];
        let mut particles = vec![particle];
        update_background(&mut particles);
        // 0.04 * max(20 / 4, 1) towards the anchor, then half of it damped away
        assert!((particles[0].pos[0] - 69.8).abs() < 1e-9);
        assert!((particles[0].vel[0] + 0.1).abs() < 1e-9);
        for _ in 0..200 {
            update_background(&mut particles);
        }
        assert!(vec2_len(vec2_sub(particles[0].pos, [50.0, 50.0])) < 1.0);
    }

    #[test]
    fn spring_floor_applies_close_to_anchor() {
        let mut particle = Particle::background([0.0, 0.0], 4.0);
        particle.pos = [0.0, 2.0];
        apply_spring(&mut particle, SPRING_CONSTANT);
        assert!((particle.vel[1] + SPRING_CONSTANT).abs() < 1e-12);
        assert!(particle.vel[0].abs() < 1e-12);
    }

    #[test]
    fn transient_survives_exactly_fifty_ticks() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut particles = vec![Particle::transient([500.0, 100.0], None, &mut rng)];
        for tick in 1..=Particle::MAX_AGE {
            update_transient(&mut particles, &edges(), WIDTH, HEIGHT);
            assert_eq!(particles.len(), 1, "removed early at tick {}", tick);
            assert_eq!(particles[0].age, tick);
        }
        update_transient(&mut particles, &edges(), WIDTH, HEIGHT);
        assert!(particles.is_empty());
    }

    #[test]
    fn out_of_bounds_spawns_are_culled_next_step() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut particles = vec![
            Particle::transient([-1.0, 100.0], None, &mut rng),
            Particle::transient([WIDTH + 1.0, 100.0], None, &mut rng),
            Particle::transient([500.0, HEIGHT + 1.0], None, &mut rng),
            Particle::transient([500.0, -1.0], None, &mut rng),
            Particle::transient([500.0, 100.0], None, &mut rng),
        ];
        update_transient(&mut particles, &edges(), WIDTH, HEIGHT);
        assert_eq!(particles.len(), 1);
        assert_eq!(particles[0].original_point, [500.0, 100.0]);
    }

    #[test]
    fn neighbouring_expired_particles_all_go() {
        let mut particles: Vec<Particle> = (0..6)
            .map(|x| Particle::new([100.0 + x as f64, 100.0], [0.0, 0.0], 1.0, Color::WHITE))
            .collect();
        particles[2].age = Particle::MAX_AGE;
        particles[3].age = Particle::MAX_AGE;
        update_transient(&mut particles, &edges(), WIDTH, HEIGHT);
        let xs: Vec<f64> = particles.iter().map(|p| p.pos[0]).collect();
        assert_eq!(xs, vec![100.0, 101.0, 104.0, 105.0]);
    }

    #[test]
    fn transient_motion_is_damped() {
        let mut particles = vec![Particle::new([100.0, 100.0], [1.0, -0.5], 2.0, Color::WHITE)];
        update_transient(&mut particles, &edges(), WIDTH, HEIGHT);
        assert_eq!(particles[0].pos, [101.0, 99.5]);
        assert!((particles[0].vel[0] - 0.99).abs() < 1e-12);
        assert!((particles[0].vel[1] + 0.495).abs() < 1e-12);
    }

    #[test]
    fn transient_color_trails_the_gradient() {
        let edges = EdgeColors::new(Color::BLACK, Color::BLACK);
        let mut particles = vec![Particle::new([500.0, 100.0], [0.0, 0.0], 2.0, Color::WHITE)];
        update_transient(&mut particles, &edges, WIDTH, HEIGHT);
        let first = particles[0].color;
        assert!(first.luma() < Color::WHITE.luma());
        assert!(first.luma() > Color::BLACK.luma());
        for _ in 0..20 {
            update_transient(&mut particles, &edges, WIDTH, HEIGHT);
        }
        assert!(particles[0].color.luma() < first.luma());
    }

    #[test]
    fn repel_at_pointer_does_not_divide_by_zero() {
        let mut particles = vec![Particle::background([10.0, 10.0], 4.0)];
        let hit = repel(&mut particles, [10.0, 10.0], 4.0);
        assert_eq!(hit, 1);
        assert!(particles[0].vel[0].is_finite() && particles[0].vel[1].is_finite());
        assert!((particles[0].vel[0] - REPEL_STRENGTH).abs() < 1e-9);
        assert_eq!(particles[0].pos, [10.0, 10.0]);
    }

    #[test]
    fn repel_pushes_away_within_reach_only() {
        let mut particles = vec![
            Particle::background([20.0, 0.0], 4.0),
            Particle::background([0.0, 47.0], 4.0),
            Particle::background([48.0, 0.0], 4.0),
        ];
        let hit = repel(&mut particles, [0.0, 0.0], 4.0);
        assert_eq!(hit, 2);
        assert!((particles[0].vel[0] - 3.0).abs() < 1e-9);
        assert!(particles[1].vel[1] > 0.0);
        assert_eq!(particles[2].vel, [0.0, 0.0]);
    }

    #[test]
    fn lattice_gradient_darkens_to_the_left() {
        let mut store = ParticleStore::new();
        store.seed_lattice(20.0, 20.0, 10.0, 4.0);
        assert_eq!(store.background.len(), 4);
        let edges = EdgeColors::new(Color::from_hex("#000000"), Color::from_hex("#ffffff"));
        update_background_colors(&mut store.background, &edges);

        let at = |x: f64| {
            store
                .background
                .iter()
                .find(|p| p.pos == [x, 0.0])
                .map(|p| p.color)
                .unwrap()
        };
        assert_eq!(at(0.0), Color::BLACK);
        assert!(at(0.0).luma() < at(10.0).luma());
    }

    #[test]
    fn edge_cycle_rotates_both_sides() {
        let mut edges = EdgeColors::new(Color::from_hex("#ff0000"), Color::from_hex("#0000ff"));
        edges.cycle();
        assert_eq!(edges.left, Color::from_hex("#ff2a00"));
        assert_ne!(edges.right, Color::from_hex("#0000ff"));
    }
}
