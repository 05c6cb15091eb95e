//! Battle engine - main entry point for running a battle

use hecs::{Entity, Ref, World};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::components::*;
use crate::config::BattleConfig;
use crate::effects::{EffectLog, VisualEvent};
use crate::generation::enemy_spawn_points;
use crate::persistence::{load_battle, save_battle, SaveData, SaveError, SAVE_VERSION};
use crate::ship::{BuildError, Controller, Ship};
use crate::systems::*;

/// Whether the battle is running or the player is refitting their ship
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum GameMode {
    #[default]
    Play,
    Build,
}

/// What the player wants to do this tick
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PlayerInput {
    pub thrust: bool,
    /// -1.0 turns left, 1.0 turns right
    pub rotate: f32,
    pub fire: bool,
    /// Fire at this world point instead of straight ahead
    pub aim: Option<Vec2>,
}

/// What happened during one tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    pub projectiles_fired: usize,
    pub hits: Vec<Hit>,
    pub ships_destroyed: Vec<ShipId>,
    pub projectiles_removed: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BattleOutcome {
    #[default]
    Ongoing,
    /// Every enemy destroyed
    Victory,
    /// Player ship destroyed
    Defeat,
}

/// Snapshot of the player ship for a status display
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BattleStatus {
    pub health: i32,
    pub max_health: i32,
    pub power_available: i32,
    pub power_surplus: i32,
    pub crew_total: usize,
    pub crew_idle: usize,
    pub crew_walking: usize,
    pub crew_working: usize,
    pub enemies: usize,
}

/// Main battle engine
pub struct BattleEngine {
    world: World,
    /// Ship entities in update order; the player comes first
    roster: Vec<Entity>,
    player: Option<Entity>,
    config: BattleConfig,
    rng: StdRng,
    mode: GameMode,
    paused: bool,
    /// Seconds of simulated battle
    battle_time: f64,
    tick: u64,
    next_ship_id: u32,
    effects: EffectLog,
    outcome: BattleOutcome,
}

impl BattleEngine {
    /// Create a battle and set it up from `config`
    pub fn new(config: BattleConfig) -> Self {
        let rng = StdRng::seed_from_u64(config.seed);
        let mut engine = Self {
            world: World::new(),
            roster: Vec::new(),
            player: None,
            config,
            rng,
            mode: GameMode::Play,
            paused: false,
            battle_time: 0.0,
            tick: 0,
            next_ship_id: 1,
            effects: EffectLog::new(),
            outcome: BattleOutcome::Ongoing,
        };
        engine.reset();
        engine
    }

    /// Start the battle over: fresh player ship in the middle, enemies around it
    pub fn reset(&mut self) {
        self.world.clear();
        self.roster.clear();
        self.player = None;
        self.rng = StdRng::seed_from_u64(self.config.seed);
        self.mode = GameMode::Play;
        self.paused = false;
        self.battle_time = 0.0;
        self.tick = 0;
        self.next_ship_id = 1;
        self.effects.drain();
        self.outcome = BattleOutcome::Ongoing;

        let area = self.config.spawn_area();
        let center = area.center();

        let player_id = self.allocate_ship_id();
        let player = Ship::from_layout(
            player_id,
            Controller::Player,
            center,
            &self.config.player_layout,
            self.config.player_crew,
        );
        let entity = self.world.spawn((player,));
        self.roster.push(entity);
        self.player = Some(entity);

        let spawns = enemy_spawn_points(
            &area,
            self.config.enemy_count,
            center,
            self.config.enemy_min_spawn_distance,
            &mut self.rng,
        );
        for position in spawns {
            let id = self.allocate_ship_id();
            let mut enemy = Ship::from_layout(
                id,
                Controller::Ai,
                position,
                &self.config.enemy_layout,
                self.config.enemy_crew,
            );
            enemy.target = Some(player_id);
            let entity = self.world.spawn((enemy,));
            self.roster.push(entity);
        }

        self.refresh_outcome();
        log::info!(
            "battle reset: seed {}, {} enemies, arena {}x{}",
            self.config.seed,
            self.config.enemy_count,
            self.config.arena_width,
            self.config.arena_height
        );
    }

    fn allocate_ship_id(&mut self) -> ShipId {
        let id = ShipId(self.next_ship_id);
        self.next_ship_id += 1;
        id
    }

    /// Advance the battle by `delta_seconds`. Does nothing while paused or
    /// in build mode.
    pub fn update(&mut self, delta_seconds: f32, input: &PlayerInput) -> TickReport {
        if self.paused || self.mode == GameMode::Build {
            return TickReport::default();
        }

        self.tick += 1;
        self.battle_time += delta_seconds as f64;
        let mut report = TickReport::default();

        // Player intents
        if let Some(mut player) = self.player.and_then(|e| self.world.get::<&mut Ship>(e).ok()) {
            if input.rotate != 0.0 {
                player.rotate(input.rotate.clamp(-1.0, 1.0), delta_seconds);
            }
            if input.thrust {
                player.apply_thrust(delta_seconds, &mut self.effects);
            }
        }

        // 1. Ships, in roster order
        for i in 0..self.roster.len() {
            let entity = self.roster[i];
            let target = self
                .world
                .get::<&Ship>(entity)
                .ok()
                .and_then(|ship| ship.target)
                .and_then(|id| self.ship_position(id));
            if let Ok(mut ship) = self.world.get::<&mut Ship>(entity) {
                ship.update(delta_seconds, target, &mut self.effects);
            }
        }

        // 2. Weapons
        let mut fired = Vec::new();
        for &entity in &self.roster {
            let Ok(mut ship) = self.world.get::<&mut Ship>(entity) else {
                continue;
            };
            match ship.controller {
                Controller::Player if input.fire => {
                    let shots = match input.aim {
                        Some(point) => ship.fire_weapons_at(point, &mut self.effects),
                        None => ship.fire_weapons(&mut self.effects),
                    };
                    fired.extend(shots);
                }
                Controller::Player => {}
                Controller::Ai => {
                    if self.rng.gen::<f64>() < self.config.enemy_fire_chance {
                        fired.extend(ship.fire_weapons(&mut self.effects));
                    }
                }
            }
        }
        report.projectiles_fired = spawn_projectiles(&mut self.world, fired);

        // 3. Projectile motion
        projectile_system(&mut self.world, delta_seconds);

        // 4. Hits
        report.hits = collision_system(&mut self.world, &self.roster, &mut self.effects);

        // 5. Cleanup
        report.ships_destroyed =
            remove_destroyed_ships(&mut self.world, &mut self.roster, &mut self.effects);
        report.projectiles_removed = remove_dead_projectiles(&mut self.world);
        if self.player.is_some_and(|e| !self.roster.contains(&e)) {
            self.player = None;
        }

        self.refresh_outcome();
        report
    }

    fn ship_position(&self, id: ShipId) -> Option<Vec2> {
        self.ships().find(|s| s.id == id).map(|s| s.position)
    }

    fn refresh_outcome(&mut self) {
        let outcome = if self.player.is_none() {
            BattleOutcome::Defeat
        } else if self.enemy_count() == 0 {
            BattleOutcome::Victory
        } else {
            BattleOutcome::Ongoing
        };
        if outcome != self.outcome {
            log::info!(
                "battle outcome {:?} at tick {} ({:.1}s)",
                outcome,
                self.tick,
                self.battle_time
            );
            self.outcome = outcome;
        }
    }

    // ── Modes ───────────────────────────────────────────────────────────

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
        log::info!("paused: {}", self.paused);
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn toggle_mode(&mut self) {
        let mode = match self.mode {
            GameMode::Play => GameMode::Build,
            GameMode::Build => GameMode::Play,
        };
        self.set_mode(mode);
    }

    pub fn set_mode(&mut self, mode: GameMode) {
        if mode != self.mode {
            log::info!("mode: {:?}", mode);
        }
        self.mode = mode;
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    // ── Build mode ──────────────────────────────────────────────────────

    /// Fit a component to the player ship at the cell under `point`
    pub fn build_place(&mut self, point: Vec2, kind: ComponentKind) -> Result<ComponentId, BuildError> {
        let mut ship = self.buildable_player()?;
        let (x, y) = ship.frame().world_to_grid(point);
        ship.try_place_component(kind, x, y)
    }

    /// Strip the component at the cell under `point` from the player ship
    pub fn build_remove(&mut self, point: Vec2) -> Result<Component, BuildError> {
        let mut ship = self.buildable_player()?;
        let (x, y) = ship.frame().world_to_grid(point);
        ship.remove_component(x, y).ok_or(BuildError::Empty { x, y })
    }

    fn buildable_player(&self) -> Result<hecs::RefMut<'_, Ship>, BuildError> {
        if self.mode != GameMode::Build {
            return Err(BuildError::NotInBuildMode);
        }
        self.player
            .and_then(|e| self.world.get::<&mut Ship>(e).ok())
            .ok_or(BuildError::NoShip)
    }

    // ── Queries ─────────────────────────────────────────────────────────

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn config(&self) -> &BattleConfig {
        &self.config
    }

    pub fn player(&self) -> Option<Ref<'_, Ship>> {
        self.player.and_then(|e| self.world.get::<&Ship>(e).ok())
    }

    pub fn ship(&self, id: ShipId) -> Option<Ref<'_, Ship>> {
        self.ships().find(|s| s.id == id)
    }

    /// Every ship, in update order
    pub fn ships(&self) -> impl Iterator<Item = Ref<'_, Ship>> + '_ {
        self.roster
            .iter()
            .filter_map(move |&e| self.world.get::<&Ship>(e).ok())
    }

    pub fn projectiles(&self) -> Vec<Projectile> {
        self.world
            .query::<&Projectile>()
            .iter()
            .map(|(_, p)| p.clone())
            .collect()
    }

    pub fn ship_count(&self) -> usize {
        self.roster.len()
    }

    pub fn enemy_count(&self) -> usize {
        self.ships()
            .filter(|s| s.controller == Controller::Ai)
            .count()
    }

    pub fn projectile_count(&self) -> usize {
        self.world.query::<&Projectile>().iter().count()
    }

    pub fn outcome(&self) -> BattleOutcome {
        self.outcome
    }

    /// Player ship summary, or None once it is gone
    pub fn status(&self) -> Option<BattleStatus> {
        let enemies = self.enemy_count();
        self.player().map(|ship| {
            let crew = ship.crew();
            BattleStatus {
                health: ship.stats().total_health,
                max_health: ship.stats().max_health,
                power_available: ship.stats().power_available,
                power_surplus: ship.power_surplus(),
                crew_total: crew.total(),
                crew_idle: crew.idle_count(),
                crew_walking: crew.walking_count(),
                crew_working: crew.working_count(),
                enemies,
            }
        })
    }

    /// Seconds of simulated battle
    pub fn battle_time(&self) -> f64 {
        self.battle_time
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Take the visual events produced since the last drain
    pub fn drain_effects(&mut self) -> Vec<VisualEvent> {
        self.effects.drain()
    }

    // ── Persistence ─────────────────────────────────────────────────────

    /// Save battle state to a writer
    pub fn save<W: std::io::Write>(&self, writer: W) -> Result<(), SaveError> {
        let data = SaveData {
            version: SAVE_VERSION,
            config: self.config.clone(),
            ships: self.ships().map(|s| (*s).clone()).collect(),
            player: self
                .player
                .and_then(|p| self.roster.iter().position(|&e| e == p)),
            projectiles: self.projectiles(),
            battle_time: self.battle_time,
            tick: self.tick,
            mode: self.mode,
            paused: self.paused,
            next_ship_id: self.next_ship_id,
        };
        save_battle(writer, &data)
    }

    /// Load battle state from a reader
    pub fn load<R: std::io::Read>(&mut self, reader: R) -> Result<(), SaveError> {
        let data = load_battle(reader)?;

        self.world.clear();
        self.roster.clear();
        self.player = None;
        for (idx, ship) in data.ships.into_iter().enumerate() {
            let entity = self.world.spawn((ship,));
            self.roster.push(entity);
            if data.player == Some(idx) {
                self.player = Some(entity);
            }
        }
        for projectile in data.projectiles {
            self.world.spawn((projectile,));
        }

        self.config = data.config;
        self.battle_time = data.battle_time;
        self.tick = data.tick;
        self.mode = data.mode;
        self.paused = data.paused;
        self.next_ship_id = data.next_ship_id;
        self.rng = StdRng::seed_from_u64(resume_seed(self.config.seed, self.tick));
        self.effects.drain();
        self.outcome = BattleOutcome::Ongoing;
        self.refresh_outcome();

        log::info!("battle loaded at tick {}", self.tick);
        Ok(())
    }
}

/// RNG seed for a battle resumed at `tick`
fn resume_seed(seed: u64, tick: u64) -> u64 {
    seed ^ tick.wrapping_mul(0x9E37_79B9_7F4A_7C15)
}

impl Default for BattleEngine {
    fn default() -> Self {
        Self::new(BattleConfig::default())
    }
}
