// Maps pointer positions from on-screen pixels into simulation space

use crate::config::{Config, RESOLUTION_HEIGHT, RESOLUTION_WIDTH};
use crate::particle::Point;

/// Transient particles spawned per pointer move.
pub const SPAWN_PER_MOVE: usize = 5;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PointerAdapter {
    pub display: [f64; 2],
    pub resolution: [f64; 2],
}

impl PointerAdapter {
    pub fn new(display: [f64; 2], resolution: [f64; 2]) -> PointerAdapter {
        PointerAdapter { display, resolution }
    }

    pub fn from_config(config: &Config) -> PointerAdapter {
        PointerAdapter::new(
            [config.display_width, config.display_height],
            [RESOLUTION_WIDTH, RESOLUTION_HEIGHT],
        )
    }

    pub fn scale(&self) -> [f64; 2] {
        [
            self.resolution[0] / self.display[0],
            self.resolution[1] / self.display[1],
        ]
    }

    /// `client` is the pointer in page pixels, `origin` the top-left corner
    /// of the surface in the same space.
    pub fn to_simulation(&self, client: [f64; 2], origin: [f64; 2]) -> Point {
        let [sx, sy] = self.scale();
        [(client[0] - origin[0]) * sx, (client[1] - origin[1]) * sy]
    }
}
