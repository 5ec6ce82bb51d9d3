//! Shared movement contract: everything on the field moves once per tick and
//! wraps around the torus.

use multiblaster_core::components::{Body, Projectile, Ship};
use multiblaster_core::constants::{DEBRIS_TICKS, PROJECTILE_MAX_AGE, THRUST_FORCE, TURN_RATE};
use multiblaster_core::enums::HitState;
use multiblaster_core::types::{clamp_velocity, heading_vector, normalize_angle, wrap_position};

/// What the movement system must do after an entity stepped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// The entity moved and stays as it is.
    Moved,
    /// A wrecked ship finished drifting and needs a fresh spawn.
    Respawn,
    /// A projectile outlived its range.
    Expired,
}

/// Per-tick behavior of one entity kind.
pub trait Motion {
    fn step(&mut self, body: &mut Body) -> Step;
}

/// position += velocity, wrapped onto the torus.
pub fn drift(body: &mut Body) {
    body.position = wrap_position(body.position + body.velocity);
}

/// Push a body along `heading`, clamping each velocity axis.
pub fn accelerate(body: &mut Body, heading: f64, force: f64) {
    body.velocity = clamp_velocity(body.velocity + heading_vector(heading) * force);
}

impl Motion for Ship {
    fn step(&mut self, body: &mut Body) -> Step {
        match self.hit_state {
            HitState::Debris(ticks) => {
                let ticks = ticks + 1;
                if ticks > DEBRIS_TICKS {
                    return Step::Respawn;
                }
                self.hit_state = HitState::Debris(ticks);
            }
            HitState::Alive => {
                if self.thrusters.left {
                    self.heading -= TURN_RATE;
                }
                if self.thrusters.right {
                    self.heading += TURN_RATE;
                }
                if self.thrusters.forward {
                    accelerate(body, self.heading, THRUST_FORCE);
                }
            }
        }
        drift(body);
        self.heading = normalize_angle(self.heading);
        Step::Moved
    }
}

impl Motion for Projectile {
    fn step(&mut self, body: &mut Body) -> Step {
        self.age += 1;
        if self.age > PROJECTILE_MAX_AGE {
            return Step::Expired;
        }
        drift(body);
        Step::Moved
    }
}
