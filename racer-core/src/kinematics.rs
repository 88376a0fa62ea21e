//! Kinematics integrator
//!
//! Fixed-step arcade model: one call advances the car by exactly one
//! simulated frame. Distances are in arena pixels, speeds in the same 0-100
//! units as the car stats.

use crate::model::{CarProfile, InputIntentSet, Position};
use crate::units::Degrees;

/// Speed gained per frame per point of the acceleration stat
pub const ACCELERATION_SCALE: f64 = 0.1;
/// Flat speed loss per frame while braking
pub const BRAKE_DECEL: f64 = 15.0;
/// Flat speed loss per frame with no pedal input
pub const COAST_DECEL: f64 = 5.0;
/// Turn rate in degrees per frame at handling 100
pub const MAX_TURN_RATE: f64 = 3.0;
/// Distance covered per frame per unit of speed; the lap geometry depends on it
pub const DISTANCE_SCALE: f64 = 0.2;

/// Playable rectangle; the car is clamped to it
pub const ARENA_MIN_X: f64 = 50.0;
pub const ARENA_MAX_X: f64 = 750.0;
pub const ARENA_MIN_Y: f64 = 50.0;
pub const ARENA_MAX_Y: f64 = 550.0;

/// Result of one integration step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Motion {
    pub speed: f64,
    pub position: Position,
}

/// Speed after one frame of pedal input
///
/// Accelerate wins over brake when both are held.
pub fn next_speed(car: &CarProfile, speed: f64, intents: &InputIntentSet) -> f64 {
    if intents.accelerate {
        (speed + car.acceleration * ACCELERATION_SCALE).min(car.max_speed)
    } else if intents.brake {
        (speed - BRAKE_DECEL).max(0.0)
    } else {
        (speed - COAST_DECEL).max(0.0)
    }
}

/// Heading after one frame of steering
///
/// The car only turns when it is moving both entering and leaving the frame,
/// so a stopped car cannot turn in place, not even on the frame it pulls
/// away. Opposite steer intents cancel out.
pub fn next_heading(
    car: &CarProfile,
    heading: Degrees,
    speed_before: f64,
    speed_after: f64,
    intents: &InputIntentSet,
) -> Degrees {
    if speed_before <= 0.0 || speed_after <= 0.0 {
        return heading;
    }

    let turn_rate = (car.handling / 100.0) * MAX_TURN_RATE;
    let mut h = heading.0;
    if intents.steer_left {
        h -= turn_rate;
    }
    if intents.steer_right {
        h += turn_rate;
    }
    Degrees(h)
}

/// Advance speed, heading and position by one frame
///
/// The arena clamp does not cost any speed: hitting the edge just pins the
/// car there. It stands in for wall collision, which is not modeled.
pub fn advance(car: &CarProfile, speed: f64, position: Position, intents: &InputIntentSet) -> Motion {
    let speed_before = speed;
    let speed = next_speed(car, speed_before, intents);
    let heading = next_heading(car, position.heading, speed_before, speed, intents);

    let rad = heading.to_radians();
    let x = position.x + rad.sin() * speed * DISTANCE_SCALE;
    let y = position.y - rad.cos() * speed * DISTANCE_SCALE;

    Motion {
        speed,
        position: Position {
            x: x.clamp(ARENA_MIN_X, ARENA_MAX_X),
            y: y.clamp(ARENA_MIN_Y, ARENA_MAX_Y),
            heading,
        },
    }
}
