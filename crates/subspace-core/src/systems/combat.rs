//! Combat system - projectile motion, hit resolution and cleanup

use crate::components::{Projectile, ShipId, Vec2};
use crate::effects::{EffectSink, ExplosionSize};
use crate::ship::{DamageReport, Ship};
use hecs::{Entity, World};

/// A projectile that struck a ship this tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub ship: ShipId,
    pub owner: ShipId,
    pub position: Vec2,
    pub damage: i32,
    pub report: DamageReport,
}

/// Put freshly fired projectiles into the world
pub fn spawn_projectiles(world: &mut World, projectiles: Vec<Projectile>) -> usize {
    let count = projectiles.len();
    for projectile in projectiles {
        world.spawn((projectile,));
    }
    count
}

/// Move every projectile and age it
pub fn projectile_system(world: &mut World, delta_seconds: f32) {
    for (_, projectile) in world.query_mut::<&mut Projectile>() {
        projectile.update(delta_seconds);
    }
}

/// Test live projectiles against ship bounds, in roster order.
///
/// A projectile never hits the ship that fired it and is spent on the first
/// ship it damages.
pub fn collision_system(
    world: &mut World,
    roster: &[Entity],
    effects: &mut impl EffectSink,
) -> Vec<Hit> {
    let live: Vec<(Entity, Vec2, i32, ShipId)> = world
        .query::<&Projectile>()
        .iter()
        .filter(|(_, p)| p.alive)
        .map(|(entity, p)| (entity, p.position, p.damage, p.owner))
        .collect();

    let mut hits = Vec::new();
    for (projectile, position, damage, owner) in live {
        for &ship_entity in roster {
            let Ok(mut ship) = world.get::<&mut Ship>(ship_entity) else {
                continue;
            };
            if ship.id == owner || !ship.bounds().contains(&position) {
                continue;
            }

            let report = ship.take_damage(damage, position);
            effects.on_damage_sparks(position);
            hits.push(Hit {
                ship: ship.id,
                owner,
                position,
                damage,
                report,
            });
            drop(ship);

            if let Ok(mut p) = world.get::<&mut Projectile>(projectile) {
                p.alive = false;
            }
            break;
        }
    }

    hits
}

/// Despawn expired or spent projectiles. Returns how many were removed.
pub fn remove_dead_projectiles(world: &mut World) -> usize {
    let dead: Vec<Entity> = world
        .query::<&Projectile>()
        .iter()
        .filter(|(_, p)| !p.alive)
        .map(|(entity, _)| entity)
        .collect();

    for &entity in &dead {
        let _ = world.despawn(entity);
    }
    dead.len()
}

/// Despawn ships that lost their core, keeping the roster in step.
///
/// Each wreck gets a large explosion. Returns the ids removed, in roster order.
pub fn remove_destroyed_ships(
    world: &mut World,
    roster: &mut Vec<Entity>,
    effects: &mut impl EffectSink,
) -> Vec<ShipId> {
    let mut destroyed = Vec::new();

    roster.retain(|&entity| {
        let wreck = match world.get::<&Ship>(entity) {
            Ok(ship) if ship.is_destroyed() => Some((ship.id, ship.position)),
            Ok(_) => None,
            // Stale roster entry
            Err(_) => return false,
        };
        match wreck {
            Some((id, position)) => {
                effects.on_explosion(position, ExplosionSize::Large);
                destroyed.push((entity, id));
                false
            }
            None => true,
        }
    });

    destroyed
        .into_iter()
        .map(|(entity, id)| {
            let _ = world.despawn(entity);
            log::debug!("{} destroyed", id);
            id
        })
        .collect()
}
