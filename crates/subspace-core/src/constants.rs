//! Simulation constants shared by ships, projectiles, crew and the engine.
//!
//! Distances are in world units (one grid cell is [`GRID_SIZE`] units),
//! times in seconds, angles in radians.

// ── Grid ────────────────────────────────────────────────────────────────

/// Edge length of one grid cell in world units.
pub const GRID_SIZE: f32 = 32.0;
/// Default ship grid width in cells.
pub const DEFAULT_GRID_WIDTH: i32 = 10;
/// Default ship grid height in cells.
pub const DEFAULT_GRID_HEIGHT: i32 = 10;

// ── Kinematics ──────────────────────────────────────────────────────────

/// Linear speed cap (units per second).
pub const MAX_VELOCITY: f32 = 300.0;
/// Per-tick velocity multiplier applied to linear and angular velocity.
pub const DRAG: f32 = 0.98;
/// Turn rate added per second of manual rotation input.
pub const MANUAL_TURN_RATE: f32 = 3.0;
/// Engine effect intensity is total thrust divided by this.
pub const THRUST_EFFECT_SCALE: f32 = 1000.0;

// ── Weapons ─────────────────────────────────────────────────────────────

pub const LASER_COOLDOWN: f32 = 0.5;
pub const LASER_DAMAGE: i32 = 10;
pub const LASER_SPEED: f32 = 500.0;

pub const CANNON_COOLDOWN: f32 = 1.5;
pub const CANNON_DAMAGE: i32 = 25;
pub const CANNON_SPEED: f32 = 350.0;

/// Seconds a projectile survives after being fired.
pub const PROJECTILE_LIFETIME: f32 = 3.0;

// ── Pursuit AI ──────────────────────────────────────────────────────────

/// Below this distance the AI does nothing.
pub const AI_MIN_DISTANCE: f32 = 10.0;
/// Fixed turn rate used when the heading error exceeds the tolerance.
pub const AI_TURN_RATE: f32 = 2.0;
/// Heading error below which the AI stops turning.
pub const AI_ALIGN_TOLERANCE: f32 = 0.1;
/// Heading error below which the AI may thrust.
pub const AI_THRUST_CONE: f32 = 0.5;
/// The AI stops thrusting once it is this close to its target.
pub const AI_STANDOFF_RANGE: f32 = 300.0;

// ── Crew ────────────────────────────────────────────────────────────────

/// Walking speed inside rooms (the only speed currently applied).
pub const CREW_SPEED_ROOM: f32 = 50.0;
/// Walking speed in corridors. Not applied: crew have no corridor
/// occupancy check yet.
pub const CREW_SPEED_CORRIDOR: f32 = 100.0;
/// Distance at which a walking crew member snaps onto its target.
pub const CREW_ARRIVAL_DISTANCE: f32 = 5.0;
/// Starting crew for player ships.
pub const PLAYER_CREW: u32 = 5;
/// Starting crew for AI ships.
pub const ENEMY_CREW: u32 = 3;

// ── Battle setup ────────────────────────────────────────────────────────

pub const ARENA_WIDTH: f32 = 1280.0;
pub const ARENA_HEIGHT: f32 = 720.0;
/// Enemies spawn at least this far from the arena edge.
pub const SPAWN_MARGIN: f32 = 100.0;
pub const ENEMY_COUNT: u32 = 3;
/// Enemies spawn at least this far from the player.
pub const ENEMY_MIN_SPAWN_DISTANCE: f32 = 300.0;
/// Per-tick chance that an AI ship tries to fire.
pub const ENEMY_FIRE_CHANCE: f64 = 0.02;
