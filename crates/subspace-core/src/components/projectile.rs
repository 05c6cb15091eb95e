//! Projectiles - straight-line ballistic entities fired by weapons

use super::common::{Rect, ShipId, Vec2};
use crate::constants::{CANNON_DAMAGE, CANNON_SPEED, LASER_DAMAGE, LASER_SPEED, PROJECTILE_LIFETIME};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectileKind {
    Laser,
    Cannon,
}

impl ProjectileKind {
    pub fn damage(&self) -> i32 {
        match self {
            ProjectileKind::Laser => LASER_DAMAGE,
            ProjectileKind::Cannon => CANNON_DAMAGE,
        }
    }

    pub fn speed(&self) -> f32 {
        match self {
            ProjectileKind::Laser => LASER_SPEED,
            ProjectileKind::Cannon => CANNON_SPEED,
        }
    }
}

/// A projectile in flight
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub position: Vec2,
    pub angle: f32,
    pub speed: f32,
    pub damage: i32,
    pub kind: ProjectileKind,
    /// Ship that fired it; that ship is never hit by it
    pub owner: ShipId,
    /// Seconds left before it fizzles
    pub lifetime: f32,
    pub alive: bool,
    velocity: Vec2,
}

impl Projectile {
    pub fn new(
        position: Vec2,
        angle: f32,
        speed: f32,
        damage: i32,
        kind: ProjectileKind,
        owner: ShipId,
    ) -> Self {
        Self {
            position,
            angle,
            speed,
            damage,
            kind,
            owner,
            lifetime: PROJECTILE_LIFETIME,
            alive: true,
            velocity: Vec2::from_angle(angle) * speed,
        }
    }

    /// Projectile with the standard damage and speed of its kind
    pub fn of_kind(position: Vec2, angle: f32, kind: ProjectileKind, owner: ShipId) -> Self {
        Self::new(position, angle, kind.speed(), kind.damage(), kind, owner)
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn update(&mut self, dt: f32) {
        if !self.alive {
            return;
        }

        self.position += self.velocity * dt;
        self.lifetime -= dt;

        if self.lifetime <= 0.0 {
            self.alive = false;
        }
    }

    /// Point-in-rectangle test against an axis-aligned box
    pub fn check_collision(&self, rect: &Rect) -> bool {
        rect.contains(&self.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_projectile_moves_along_heading() {
        let mut p = Projectile::of_kind(Vec2::ZERO, 0.0, ProjectileKind::Laser, ShipId(1));
        p.update(0.1);
        assert!((p.position.x - 50.0).abs() < 1e-3);
        assert!(p.position.y.abs() < 1e-3);
        assert!(p.alive);
    }

    #[test]
    fn test_projectile_expires() {
        let mut p = Projectile::of_kind(Vec2::ZERO, 0.0, ProjectileKind::Cannon, ShipId(1));
        for _ in 0..29 {
            p.update(0.1);
        }
        assert!(p.alive);
        p.update(0.2);
        assert!(!p.alive);

        // Dead projectiles stay put
        let frozen = p.position;
        p.update(1.0);
        assert_eq!(p.position, frozen);
    }

    #[test]
    fn test_kind_stats() {
        let laser = Projectile::of_kind(Vec2::ZERO, 0.0, ProjectileKind::Laser, ShipId(0));
        assert_eq!((laser.damage, laser.speed), (10, 500.0));
        let cannon = Projectile::of_kind(Vec2::ZERO, 0.0, ProjectileKind::Cannon, ShipId(0));
        assert_eq!((cannon.damage, cannon.speed), (25, 350.0));
    }

    #[test]
    fn test_collision_ignores_rotation() {
        let rect = Rect::new(-16.0, -16.0, 32.0, 32.0);
        let inside = Projectile::of_kind(Vec2::new(10.0, 10.0), 1.0, ProjectileKind::Laser, ShipId(0));
        let outside = Projectile::of_kind(Vec2::new(20.0, 0.0), 1.0, ProjectileKind::Laser, ShipId(0));
        assert!(inside.check_collision(&rect));
        assert!(!outside.check_collision(&rect));
    }
}
