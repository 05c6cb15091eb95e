//! Ships - a grid of components with crew, kinematics and (for AI ships) a
//! pursuit controller.
//!
//! Aggregate stats are always recomputed from scratch after anything that
//! can change them, never patched incrementally.

use crate::components::{
    Component, ComponentId, ComponentKind, Projectile, Rect, ShipFrame, ShipId, Vec2,
};
use crate::constants::{
    DEFAULT_GRID_HEIGHT, DEFAULT_GRID_WIDTH, DRAG, GRID_SIZE, MANUAL_TURN_RATE, MAX_VELOCITY,
    THRUST_EFFECT_SCALE,
};
use crate::effects::EffectSink;
use crate::generation::ShipLayout;
use crate::systems::{pursuit_step, AiState, CrewManager};
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

/// Who steers the ship
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Controller {
    Player,
    Ai,
}

/// Sums over every component currently on the ship
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ShipStats {
    pub total_health: i32,
    pub max_health: i32,
    pub power_available: i32,
    pub power_used: i32,
    pub total_thrust: f32,
}

/// Outcome of a hit on the ship
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DamageReport {
    /// Grid cell under the impact point
    pub cell: (i32, i32),
    /// Kind of the component that took the hit, if the cell was occupied
    pub hit: Option<ComponentKind>,
    /// The component was destroyed and removed
    pub destroyed: bool,
}

impl DamageReport {
    pub fn is_miss(&self) -> bool {
        self.hit.is_none()
    }
}

/// Why a component could not be placed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    /// Cell lies outside the ship grid
    OutOfBounds { x: i32, y: i32 },
    /// Cell already holds a component
    Occupied { x: i32, y: i32, kind: ComponentKind },
    /// No component to remove at this cell
    Empty { x: i32, y: i32 },
    /// Building is only allowed in build mode
    NotInBuildMode,
    /// There is no player ship to build on
    NoShip,
}

impl std::fmt::Display for BuildError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BuildError::OutOfBounds { x, y } => write!(f, "cell ({}, {}) is outside the grid", x, y),
            BuildError::Occupied { x, y, kind } => {
                write!(f, "cell ({}, {}) is already fitted with {}", x, y, kind)
            }
            BuildError::Empty { x, y } => write!(f, "cell ({}, {}) is empty", x, y),
            BuildError::NotInBuildMode => write!(f, "not in build mode"),
            BuildError::NoShip => write!(f, "no ship to build on"),
        }
    }
}

impl std::error::Error for BuildError {}

/// A modular ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ship {
    pub id: ShipId,
    pub controller: Controller,
    pub position: Vec2,
    /// Heading in radians, kept in `[0, 2π)`
    pub angle: f32,
    pub velocity: Vec2,
    pub angular_velocity: f32,
    pub grid_width: i32,
    pub grid_height: i32,
    /// Ship this one is chasing
    pub target: Option<ShipId>,
    pub ai_state: AiState,
    components: Vec<Component>,
    stats: ShipStats,
    crew: CrewManager,
    next_component_id: u32,
}

impl Ship {
    /// Empty hull with no components and no crew
    pub fn new(id: ShipId, controller: Controller, position: Vec2) -> Self {
        Self {
            id,
            controller,
            position,
            angle: 0.0,
            velocity: Vec2::ZERO,
            angular_velocity: 0.0,
            grid_width: DEFAULT_GRID_WIDTH,
            grid_height: DEFAULT_GRID_HEIGHT,
            target: None,
            ai_state: AiState::Idle,
            components: Vec::new(),
            stats: ShipStats::default(),
            crew: CrewManager::new(),
            next_component_id: 1,
        }
    }

    /// Build a ship from a layout and put `crew` idle crew aboard at its position
    pub fn from_layout(
        id: ShipId,
        controller: Controller,
        position: Vec2,
        layout: &ShipLayout,
        crew: u32,
    ) -> Self {
        let mut ship = Self::new(id, controller, position);
        ship.grid_width = layout.grid_width;
        ship.grid_height = layout.grid_height;
        for component in layout.build_components() {
            ship.add_component(component);
        }
        ship.crew.add_crew(crew, position);
        ship
    }

    pub fn is_player(&self) -> bool {
        self.controller == Controller::Player
    }

    pub fn frame(&self) -> ShipFrame {
        ShipFrame {
            position: self.position,
            angle: self.angle,
            grid_width: self.grid_width,
            grid_height: self.grid_height,
        }
    }

    pub fn components(&self) -> &[Component] {
        &self.components
    }

    pub fn stats(&self) -> &ShipStats {
        &self.stats
    }

    pub fn crew(&self) -> &CrewManager {
        &self.crew
    }

    // ── Structure ───────────────────────────────────────────────────────

    /// Append a component. It gets a fresh id that is never reused.
    pub fn add_component(&mut self, mut component: Component) -> ComponentId {
        let id = ComponentId(self.next_component_id);
        self.next_component_id += 1;
        component.id = id;
        self.components.push(component);
        self.recalculate_stats();
        id
    }

    /// Remove whatever sits at (x, y)
    pub fn remove_component(&mut self, x: i32, y: i32) -> Option<Component> {
        let idx = self.index_at(x, y)?;
        let removed = self.components.remove(idx);
        self.recalculate_stats();
        Some(removed)
    }

    pub fn component_at(&self, x: i32, y: i32) -> Option<&Component> {
        self.components.iter().find(|c| c.grid_x == x && c.grid_y == y)
    }

    pub fn component(&self, id: ComponentId) -> Option<&Component> {
        self.components.iter().find(|c| c.id == id)
    }

    pub fn in_grid(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < self.grid_width && y < self.grid_height
    }

    /// Place a new component, rejecting cells outside the grid or already taken
    pub fn try_place_component(
        &mut self,
        kind: ComponentKind,
        x: i32,
        y: i32,
    ) -> Result<ComponentId, BuildError> {
        if !self.in_grid(x, y) {
            return Err(BuildError::OutOfBounds { x, y });
        }
        if let Some(existing) = self.component_at(x, y) {
            return Err(BuildError::Occupied {
                x,
                y,
                kind: existing.kind,
            });
        }
        Ok(self.add_component(Component::new(kind, x, y)))
    }

    fn index_at(&self, x: i32, y: i32) -> Option<usize> {
        self.components
            .iter()
            .position(|c| c.grid_x == x && c.grid_y == y)
    }

    // ── Stats ───────────────────────────────────────────────────────────

    pub fn recalculate_stats(&mut self) {
        let mut stats = ShipStats::default();
        for component in &self.components {
            stats.total_health += component.stats.health;
            stats.max_health += component.stats.max_health;
            stats.power_available += component.stats.power_generation;
            stats.power_used += component.stats.power_consumption;
            stats.total_thrust += component.stats.thrust;
        }
        self.stats = stats;
    }

    /// Enough generation to cover consumption
    pub fn has_power(&self) -> bool {
        self.stats.power_available >= self.stats.power_used
    }

    /// Remaining health over max (0.0 for a ship with no max health)
    pub fn health_fraction(&self) -> f32 {
        if self.stats.max_health > 0 {
            self.stats.total_health as f32 / self.stats.max_health as f32
        } else {
            0.0
        }
    }

    /// Power used over power available (0.0 when nothing generates)
    pub fn power_load(&self) -> f32 {
        if self.stats.power_available > 0 {
            self.stats.power_used as f32 / self.stats.power_available as f32
        } else {
            0.0
        }
    }

    /// Spare generation; negative when overloaded
    pub fn power_surplus(&self) -> i32 {
        self.stats.power_available - self.stats.power_used
    }

    /// A ship without a core is dead
    pub fn is_destroyed(&self) -> bool {
        !self
            .components
            .iter()
            .any(|c| c.kind == ComponentKind::Core)
    }

    // ── Simulation ──────────────────────────────────────────────────────

    /// Advance the ship by `dt`. AI ships steer toward `target` when given one.
    pub fn update(&mut self, dt: f32, target: Option<Vec2>, effects: &mut impl EffectSink) {
        for component in &mut self.components {
            component.update(dt);
        }

        let frame = self.frame();
        self.crew.update(dt, &self.components, &frame);

        if self.controller == Controller::Ai {
            match target {
                Some(target) => {
                    if let Some(steering) = pursuit_step(self.position, self.angle, target) {
                        self.angular_velocity = steering.angular_velocity;
                        self.ai_state = steering.state;
                        if steering.thrust {
                            self.apply_thrust(dt, effects);
                        }
                    } else {
                        self.ai_state = AiState::Idle;
                    }
                }
                None => self.ai_state = AiState::Idle,
            }
        }

        self.velocity = self.velocity * DRAG;
        self.angular_velocity *= DRAG;

        let speed = self.velocity.length();
        if speed > MAX_VELOCITY {
            self.velocity = self.velocity * (MAX_VELOCITY / speed);
        }

        self.position += self.velocity * dt;
        self.angle = wrap_heading(self.angle + self.angular_velocity * dt);

        self.recalculate_stats();
    }

    /// Push the ship along its heading. Needs thrust and enough power.
    pub fn apply_thrust(&mut self, dt: f32, effects: &mut impl EffectSink) {
        if self.stats.total_thrust <= 0.0 || !self.has_power() {
            return;
        }

        self.velocity += Vec2::from_angle(self.angle) * (self.stats.total_thrust * dt);

        let frame = self.frame();
        let power_factor = self.stats.total_thrust / THRUST_EFFECT_SCALE;
        for engine in self
            .components
            .iter()
            .filter(|c| c.kind == ComponentKind::Engine && c.is_alive())
        {
            effects.on_engine_thrust(
                frame.grid_to_world(engine.grid_x, engine.grid_y),
                self.angle,
                power_factor,
            );
        }
    }

    /// Manual steering: `direction` is -1 (left), 0 or 1 (right)
    pub fn rotate(&mut self, direction: f32, dt: f32) {
        self.angular_velocity += direction * MANUAL_TURN_RATE * dt;
    }

    /// Fire every ready weapon straight ahead
    pub fn fire_weapons(&mut self, effects: &mut impl EffectSink) -> Vec<Projectile> {
        let angle = self.angle;
        self.fire_with(effects, |_| angle)
    }

    /// Fire every ready weapon, each aimed from its muzzle at `point`
    pub fn fire_weapons_at(&mut self, point: Vec2, effects: &mut impl EffectSink) -> Vec<Projectile> {
        self.fire_with(effects, |muzzle| (point - muzzle).angle())
    }

    fn fire_with(
        &mut self,
        effects: &mut impl EffectSink,
        aim: impl Fn(Vec2) -> f32,
    ) -> Vec<Projectile> {
        if !self.has_power() {
            return Vec::new();
        }

        let frame = self.frame();
        let mut projectiles = Vec::new();
        for component in self.components.iter_mut().filter(|c| c.can_fire()) {
            let Some(kind) = component.kind.projectile_kind() else {
                continue;
            };
            component.fire();

            let muzzle = frame.grid_to_world(component.grid_x, component.grid_y);
            let angle = aim(muzzle);
            effects.on_weapon_fire(muzzle, angle, kind);
            projectiles.push(Projectile::of_kind(muzzle, angle, kind, self.id));
        }
        projectiles
    }

    /// Apply `amount` damage to the component under `world_point`.
    ///
    /// An empty cell is a miss. A component brought to zero health is removed.
    pub fn take_damage(&mut self, amount: i32, world_point: Vec2) -> DamageReport {
        let cell = self.frame().world_to_grid(world_point);
        let mut report = DamageReport {
            cell,
            hit: None,
            destroyed: false,
        };

        if let Some(idx) = self.index_at(cell.0, cell.1) {
            let component = &mut self.components[idx];
            report.hit = Some(component.kind);
            report.destroyed = component.take_damage(amount);

            if report.destroyed {
                let removed = self.components.remove(idx);
                log::debug!(
                    "{}: {} at ({}, {}) destroyed",
                    self.id,
                    removed.kind,
                    removed.grid_x,
                    removed.grid_y
                );
            }
        }

        self.recalculate_stats();
        report
    }

    /// Axis-aligned box around the occupied part of the grid.
    ///
    /// Ignores the ship's heading.
    pub fn bounds(&self) -> Rect {
        let mut cells = self.components.iter().map(|c| (c.grid_x, c.grid_y));
        let Some((x0, y0)) = cells.next() else {
            return Rect::new(self.position.x, self.position.y, 1.0, 1.0);
        };
        let (min_x, max_x, min_y, max_y) = cells.fold((x0, x0, y0, y0), |acc, (x, y)| {
            (acc.0.min(x), acc.1.max(x), acc.2.min(y), acc.3.max(y))
        });

        let width = (max_x - min_x + 1) as f32 * GRID_SIZE;
        let height = (max_y - min_y + 1) as f32 * GRID_SIZE;
        let offset_x = (min_x + max_x) as f32 / 2.0 - self.grid_width as f32 / 2.0;
        let offset_y = (min_y + max_y) as f32 / 2.0 - self.grid_height as f32 / 2.0;

        Rect::new(
            self.position.x + offset_x * GRID_SIZE - width / 2.0,
            self.position.y + offset_y * GRID_SIZE - height / 2.0,
            width,
            height,
        )
    }
}

/// Wrap a heading into `[0, 2π)`. `rem_euclid` rounds tiny negative
/// inputs up to exactly `TAU`, which is folded back to zero.
fn wrap_heading(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(TAU);
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::ProjectileKind;
    use crate::effects::{EffectLog, VisualEvent};

    fn player_at_origin() -> Ship {
        Ship::from_layout(
            ShipId(1),
            Controller::Player,
            Vec2::ZERO,
            &ShipLayout::player(),
            5,
        )
    }

    fn hull(components: &[(ComponentKind, i32, i32)]) -> Ship {
        let mut ship = Ship::new(ShipId(7), Controller::Player, Vec2::ZERO);
        for &(kind, x, y) in components {
            ship.add_component(Component::new(kind, x, y));
        }
        ship
    }

    fn assert_stats_are_sums(ship: &Ship) {
        let c = ship.components();
        assert_eq!(ship.stats().total_health, c.iter().map(|c| c.stats.health).sum::<i32>());
        assert_eq!(ship.stats().max_health, c.iter().map(|c| c.stats.max_health).sum::<i32>());
        assert_eq!(
            ship.stats().power_available,
            c.iter().map(|c| c.stats.power_generation).sum::<i32>()
        );
        assert_eq!(
            ship.stats().power_used,
            c.iter().map(|c| c.stats.power_consumption).sum::<i32>()
        );
        assert_eq!(ship.stats().total_thrust, c.iter().map(|c| c.stats.thrust).sum::<f32>());
    }

    #[test]
    fn test_player_layout_stats() {
        let ship = player_at_origin();
        assert_eq!(ship.components().len(), 11);
        // core 50 + 2 reactors
        assert_eq!(ship.stats().power_available, 250);
        // 2 engines, 2 lasers, 1 cannon
        assert_eq!(ship.stats().power_used, 70);
        assert_eq!(ship.stats().total_thrust, 400.0);
        assert_eq!(ship.power_surplus(), 180);
        assert_eq!(ship.crew().total(), 5);
        assert_stats_are_sums(&ship);
    }

    #[test]
    fn test_stats_follow_every_mutation() {
        let mut ship = player_at_origin();

        ship.take_damage(30, Vec2::new(32.0, 0.0));
        assert_stats_are_sums(&ship);

        ship.remove_component(4, 6);
        assert_stats_are_sums(&ship);

        ship.try_place_component(ComponentKind::Shield, 0, 0).unwrap();
        assert_stats_are_sums(&ship);

        ship.update(0.1, None, &mut ());
        assert_stats_are_sums(&ship);
    }

    #[test]
    fn test_hit_maps_to_grid_cell() {
        let mut ship = hull(&[(ComponentKind::Core, 4, 4), (ComponentKind::Armor, 6, 5)]);

        let report = ship.take_damage(10, Vec2::new(32.0, 0.0));
        assert_eq!(report.cell, (6, 5));
        assert_eq!(report.hit, Some(ComponentKind::Armor));
        assert!(!report.destroyed);
        assert_eq!(ship.component_at(6, 5).unwrap().stats.health, 140);
    }

    #[test]
    fn test_hit_follows_heading() {
        let mut ship = hull(&[(ComponentKind::Core, 4, 4), (ComponentKind::Armor, 6, 5)]);
        ship.angle = std::f32::consts::FRAC_PI_2;

        // Cell (6,5) is one cell "ahead" in the ship frame, which now points +y
        let report = ship.take_damage(10, Vec2::new(-10.0, 40.0));
        assert_eq!(report.cell, (6, 5));
        assert_eq!(report.hit, Some(ComponentKind::Armor));
    }

    #[test]
    fn test_empty_cell_is_a_miss() {
        let mut ship = hull(&[(ComponentKind::Core, 4, 4)]);
        let before = *ship.stats();

        let report = ship.take_damage(50, Vec2::new(-150.0, -150.0));
        assert!(report.is_miss());
        assert_eq!(*ship.stats(), before);
    }

    #[test]
    fn test_destroying_core_destroys_ship() {
        let mut ship = hull(&[(ComponentKind::Core, 5, 5), (ComponentKind::Armor, 4, 4)]);
        assert!(!ship.is_destroyed());

        let report = ship.take_damage(500, Vec2::new(1.0, 1.0));
        assert_eq!(report.hit, Some(ComponentKind::Core));
        assert!(report.destroyed);
        assert!(ship.component_at(5, 5).is_none());
        assert!(ship.is_destroyed());
        assert_eq!(ship.stats().total_health, 150);
    }

    #[test]
    fn test_losing_other_parts_is_survivable() {
        let mut ship = hull(&[(ComponentKind::Core, 4, 4), (ComponentKind::Engine, 5, 5)]);
        ship.take_damage(500, Vec2::new(1.0, 1.0));
        assert!(!ship.is_destroyed());
        assert_eq!(ship.stats().total_thrust, 0.0);
    }

    #[test]
    fn test_firing_spawns_one_projectile_per_weapon() {
        let mut ship = player_at_origin();
        let mut log = EffectLog::new();

        let shots = ship.fire_weapons(&mut log);
        assert_eq!(shots.len(), 3);
        assert_eq!(shots.iter().filter(|p| p.kind == ProjectileKind::Laser).count(), 2);
        for p in &shots {
            assert_eq!(p.owner, ShipId(1));
            assert_eq!(p.angle, 0.0);
            assert_eq!(p.damage, p.kind.damage());
            assert_eq!(p.speed, p.kind.speed());
        }
        // Cannon at (4, 2) sits at local (-32, -96)
        let cannon = shots.iter().find(|p| p.kind == ProjectileKind::Cannon).unwrap();
        assert_eq!(cannon.position, Vec2::new(-32.0, -96.0));
        assert_eq!(log.len(), 3);

        // Every weapon is on cooldown now
        assert!(ship.fire_weapons(&mut ()).is_empty());
    }

    #[test]
    fn test_no_power_no_fire() {
        // Laser draws 15, nothing generates
        let mut ship = hull(&[(ComponentKind::WeaponLaser, 4, 4)]);
        assert!(!ship.has_power());
        assert!(ship.fire_weapons(&mut ()).is_empty());
        // Weapon itself is still ready
        assert!(ship.component_at(4, 4).unwrap().can_fire());
        assert_eq!(ship.power_load(), 0.0);
    }

    #[test]
    fn test_fire_at_point_aims_each_muzzle() {
        let mut ship = hull(&[(ComponentKind::Core, 5, 5), (ComponentKind::WeaponLaser, 5, 4)]);
        // Laser muzzle is at (0, -32); aim straight down from it
        let shots = ship.fire_weapons_at(Vec2::new(0.0, 100.0), &mut ());
        assert_eq!(shots.len(), 1);
        assert!((shots[0].angle - std::f32::consts::FRAC_PI_2).abs() < 1e-5);
    }

    #[test]
    fn test_thrust_needs_power_and_emits_per_engine() {
        let mut ship = player_at_origin();
        let mut log = EffectLog::new();

        ship.apply_thrust(0.1, &mut log);
        assert!((ship.velocity.x - 40.0).abs() < 1e-3);
        assert_eq!(log.len(), 2);
        match log.events()[0] {
            VisualEvent::EngineThrust { power_factor, .. } => {
                assert!((power_factor - 0.4).abs() < 1e-5)
            }
            ref other => panic!("unexpected event {:?}", other),
        }

        let mut unpowered = hull(&[(ComponentKind::Engine, 4, 4)]);
        unpowered.apply_thrust(0.1, &mut ());
        assert_eq!(unpowered.velocity, Vec2::ZERO);
    }

    #[test]
    fn test_drag_and_speed_cap() {
        let mut ship = hull(&[(ComponentKind::Core, 4, 4)]);
        ship.velocity = Vec2::new(1000.0, 0.0);
        ship.update(0.0, None, &mut ());
        assert!((ship.velocity.length() - MAX_VELOCITY).abs() < 1e-3);

        ship.velocity = Vec2::new(100.0, 0.0);
        ship.update(1.0, None, &mut ());
        assert!((ship.velocity.x - 98.0).abs() < 1e-3);
        assert!((ship.position.x - 98.0).abs() < 1e-3);
    }

    #[test]
    fn test_angle_wraps_into_range() {
        let mut ship = hull(&[(ComponentKind::Core, 4, 4)]);
        ship.angular_velocity = -1.0;
        ship.update(0.5, None, &mut ());
        assert!(ship.angle >= 0.0 && ship.angle < TAU);
        assert!((ship.angle - (TAU - 0.49)).abs() < 1e-4);
    }

    #[test]
    fn test_tiny_negative_turn_stays_below_tau() {
        let mut ship = hull(&[(ComponentKind::Core, 4, 4)]);
        ship.angular_velocity = -1e-9 / DRAG;
        ship.update(1.0, None, &mut ());
        assert!(ship.angle >= 0.0 && ship.angle < TAU, "angle {}", ship.angle);
    }

    #[test]
    fn test_core_at_one_health_survives() {
        let mut ship = hull(&[(ComponentKind::Core, 5, 5), (ComponentKind::Armor, 4, 4)]);

        let report = ship.take_damage(199, Vec2::new(1.0, 1.0));
        assert_eq!(report.hit, Some(ComponentKind::Core));
        assert!(!report.destroyed);
        assert_eq!(ship.component_at(5, 5).unwrap().stats.health, 1);
        assert!(!ship.is_destroyed());

        ship.take_damage(1, Vec2::new(1.0, 1.0));
        assert!(ship.is_destroyed());
    }

    #[test]
    fn test_manual_rotation() {
        let mut ship = hull(&[(ComponentKind::Core, 4, 4)]);
        ship.rotate(1.0, 0.5);
        assert_eq!(ship.angular_velocity, 1.5);
        ship.rotate(-1.0, 0.5);
        assert_eq!(ship.angular_velocity, 0.0);
    }

    #[test]
    fn test_ai_turns_toward_target() {
        let mut ship = Ship::from_layout(
            ShipId(2),
            Controller::Ai,
            Vec2::ZERO,
            &ShipLayout::enemy(),
            3,
        );
        ship.update(0.1, Some(Vec2::new(0.0, 500.0)), &mut ());
        assert_eq!(ship.ai_state, AiState::Turning);
        assert!(ship.angle > 0.0);

        // Players ignore targets
        let mut player = player_at_origin();
        player.update(0.1, Some(Vec2::new(0.0, 500.0)), &mut ());
        assert_eq!(player.angle, 0.0);
    }

    #[test]
    fn test_ai_closes_on_distant_target() {
        let mut ship = Ship::from_layout(
            ShipId(2),
            Controller::Ai,
            Vec2::ZERO,
            &ShipLayout::enemy(),
            3,
        );
        ship.update(0.1, Some(Vec2::new(1000.0, 0.0)), &mut ());
        assert_eq!(ship.ai_state, AiState::Closing);
        assert!(ship.velocity.x > 0.0);
    }

    #[test]
    fn test_bounds() {
        let ship = hull(&[(ComponentKind::Core, 4, 4), (ComponentKind::Armor, 5, 5)]);
        // 2x2 cells centred on grid (4.5, 4.5): offset -0.5 cells
        assert_eq!(ship.bounds(), Rect::new(-48.0, -48.0, 64.0, 64.0));

        let empty = Ship::new(ShipId(3), Controller::Ai, Vec2::new(10.0, 20.0));
        assert_eq!(empty.bounds(), Rect::new(10.0, 20.0, 1.0, 1.0));
    }

    #[test]
    fn test_build_placement_rules() {
        let mut ship = hull(&[(ComponentKind::Core, 4, 4)]);

        assert!(ship.try_place_component(ComponentKind::Armor, 0, 9).is_ok());
        assert_eq!(
            ship.try_place_component(ComponentKind::Armor, 10, 0),
            Err(BuildError::OutOfBounds { x: 10, y: 0 })
        );
        assert_eq!(
            ship.try_place_component(ComponentKind::Armor, 4, 4),
            Err(BuildError::Occupied {
                x: 4,
                y: 4,
                kind: ComponentKind::Core
            })
        );
    }

    #[test]
    fn test_component_ids_are_never_reused() {
        let mut ship = hull(&[(ComponentKind::Engine, 1, 1)]);
        let first = ship.components()[0].id();
        ship.remove_component(1, 1);
        let second = ship.try_place_component(ComponentKind::Engine, 1, 1).unwrap();
        assert_ne!(first, second);
        assert!(ship.component(first).is_none());
    }

    #[test]
    fn test_health_fraction_guards() {
        let empty = Ship::new(ShipId(3), Controller::Ai, Vec2::ZERO);
        assert_eq!(empty.health_fraction(), 0.0);
        assert_eq!(empty.power_load(), 0.0);
        assert!(empty.is_destroyed());

        let mut ship = hull(&[(ComponentKind::Core, 4, 4)]);
        ship.take_damage(100, Vec2::new(-16.0, -16.0));
        assert!((ship.health_fraction() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_crew_staff_stations_on_update() {
        let mut ship = player_at_origin();
        ship.update(0.1, None, &mut ());
        // 5 crew: 2 engines, 2 lasers, cannon get one each before the reactors
        assert!(ship.crew().members().iter().all(|m| m.target.is_some()));
        let reactor = ship.component_at(3, 5).unwrap().id();
        assert_eq!(ship.crew().staffing(reactor), 0);
        let engine = ship.component_at(4, 6).unwrap().id();
        assert_eq!(ship.crew().staffing(engine), 1);
    }
}
