//! Pursuit AI - turn toward the target, close to standoff range, coast

use crate::components::Vec2;
use crate::constants::{
    AI_ALIGN_TOLERANCE, AI_MIN_DISTANCE, AI_STANDOFF_RANGE, AI_THRUST_CONE, AI_TURN_RATE,
};
use serde::{Deserialize, Serialize};
use std::f32::consts::{PI, TAU};

/// What the AI did on its last tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AiState {
    /// No target, or sitting on top of it
    #[default]
    Idle,
    /// Rotating toward the target
    Turning,
    /// Facing the target and thrusting toward it
    Closing,
    /// Facing the target inside standoff range, not thrusting
    Holding,
}

/// Steering decision for one tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Steering {
    pub angular_velocity: f32,
    pub thrust: bool,
    pub state: AiState,
}

/// Wrap an angle difference into `[-PI, PI]`
pub fn normalize_angle(mut angle: f32) -> f32 {
    while angle > PI {
        angle -= TAU;
    }
    while angle < -PI {
        angle += TAU;
    }
    angle
}

/// Decide how to steer toward `target`.
///
/// Returns `None` when the target is within [`AI_MIN_DISTANCE`]; the ship's
/// steering is then left untouched.
pub fn pursuit_step(position: Vec2, heading: f32, target: Vec2) -> Option<Steering> {
    let to_target = target - position;
    let distance = to_target.length();
    if distance < AI_MIN_DISTANCE {
        return None;
    }

    let diff = normalize_angle(to_target.angle() - heading);

    let angular_velocity = if diff.abs() > AI_ALIGN_TOLERANCE {
        AI_TURN_RATE * diff.signum()
    } else {
        0.0
    };

    let facing = diff.abs() < AI_THRUST_CONE;
    let thrust = facing && distance > AI_STANDOFF_RANGE;

    let state = if thrust {
        AiState::Closing
    } else if facing {
        AiState::Holding
    } else {
        AiState::Turning
    };

    Some(Steering {
        angular_velocity,
        thrust,
        state,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_angle() {
        assert!((normalize_angle(3.0 * PI / 2.0) + PI / 2.0).abs() < 1e-5);
        assert!((normalize_angle(-3.0 * PI / 2.0) - PI / 2.0).abs() < 1e-5);
        assert_eq!(normalize_angle(0.25), 0.25);
    }

    #[test]
    fn test_too_close_does_nothing() {
        assert!(pursuit_step(Vec2::ZERO, 0.0, Vec2::new(5.0, 5.0)).is_none());
    }

    #[test]
    fn test_turns_the_short_way() {
        // Target straight "down" (+y): turn positive
        let s = pursuit_step(Vec2::ZERO, 0.0, Vec2::new(0.0, 500.0)).unwrap();
        assert_eq!(s.angular_velocity, AI_TURN_RATE);
        assert!(!s.thrust);
        assert_eq!(s.state, AiState::Turning);

        // Target slightly "up": turn negative
        let s = pursuit_step(Vec2::ZERO, 0.3, Vec2::new(500.0, -200.0)).unwrap();
        assert_eq!(s.angular_velocity, -AI_TURN_RATE);

        // Heading almost a full turn round: shorter to go positive through 2π
        let s = pursuit_step(Vec2::ZERO, 6.0, Vec2::from_angle(0.2) * 500.0).unwrap();
        assert_eq!(s.angular_velocity, AI_TURN_RATE);
    }

    #[test]
    fn test_thrusts_when_aligned_and_far() {
        let s = pursuit_step(Vec2::ZERO, 0.0, Vec2::new(800.0, 0.0)).unwrap();
        assert_eq!(s.angular_velocity, 0.0);
        assert!(s.thrust);
        assert_eq!(s.state, AiState::Closing);
    }

    #[test]
    fn test_holds_inside_standoff_range() {
        let s = pursuit_step(Vec2::ZERO, 0.0, Vec2::new(200.0, 0.0)).unwrap();
        assert!(!s.thrust);
        assert_eq!(s.state, AiState::Holding);
    }

    #[test]
    fn test_thrusts_while_still_turning_inside_cone() {
        // 0.3 rad off: keeps turning but is inside the thrust cone
        let target = Vec2::from_angle(0.3) * 1000.0;
        let s = pursuit_step(Vec2::ZERO, 0.0, target).unwrap();
        assert_eq!(s.angular_velocity, AI_TURN_RATE);
        assert!(s.thrust);
    }
}
