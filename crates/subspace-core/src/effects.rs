//! Visual effect events.
//!
//! The simulation announces things a renderer may want to draw (muzzle
//! flashes, engine exhaust, explosions, sparks) through [`EffectSink`].
//! Nothing the simulation does depends on a sink; `()` discards everything.

use crate::components::{ProjectileKind, Vec2};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExplosionSize {
    Small,
    Medium,
    Large,
}

/// Receiver for fire-and-forget effect events. All methods default to no-ops.
pub trait EffectSink {
    fn on_weapon_fire(&mut self, _position: Vec2, _angle: f32, _kind: ProjectileKind) {}

    fn on_engine_thrust(&mut self, _position: Vec2, _angle: f32, _power_factor: f32) {}

    fn on_explosion(&mut self, _position: Vec2, _size: ExplosionSize) {}

    fn on_damage_sparks(&mut self, _position: Vec2) {}
}

impl EffectSink for () {}

/// A recorded effect event
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum VisualEvent {
    WeaponFire {
        position: Vec2,
        angle: f32,
        kind: ProjectileKind,
    },
    EngineThrust {
        position: Vec2,
        angle: f32,
        power_factor: f32,
    },
    Explosion {
        position: Vec2,
        size: ExplosionSize,
    },
    DamageSparks {
        position: Vec2,
    },
}

/// Sink that buffers events until a renderer drains them
#[derive(Debug, Clone, Default)]
pub struct EffectLog {
    events: Vec<VisualEvent>,
}

impl EffectLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[VisualEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Take every buffered event, oldest first
    pub fn drain(&mut self) -> Vec<VisualEvent> {
        std::mem::take(&mut self.events)
    }
}

impl EffectSink for EffectLog {
    fn on_weapon_fire(&mut self, position: Vec2, angle: f32, kind: ProjectileKind) {
        self.events.push(VisualEvent::WeaponFire {
            position,
            angle,
            kind,
        });
    }

    fn on_engine_thrust(&mut self, position: Vec2, angle: f32, power_factor: f32) {
        self.events.push(VisualEvent::EngineThrust {
            position,
            angle,
            power_factor,
        });
    }

    fn on_explosion(&mut self, position: Vec2, size: ExplosionSize) {
        self.events.push(VisualEvent::Explosion { position, size });
    }

    fn on_damage_sparks(&mut self, position: Vec2) {
        self.events.push(VisualEvent::DamageSparks { position });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_records_in_order_and_drains() {
        let mut log = EffectLog::new();
        log.on_damage_sparks(Vec2::new(1.0, 2.0));
        log.on_explosion(Vec2::ZERO, ExplosionSize::Large);

        assert_eq!(log.len(), 2);
        assert!(matches!(log.events()[0], VisualEvent::DamageSparks { .. }));

        let drained = log.drain();
        assert_eq!(drained.len(), 2);
        assert!(log.is_empty());
    }
}
