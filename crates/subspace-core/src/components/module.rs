//! Ship modules: the grid-cell components ships are built from.

use super::projectile::ProjectileKind;
use crate::constants::{CANNON_COOLDOWN, LASER_COOLDOWN};
use serde::{Deserialize, Serialize};

/// Handle to a component within one ship.
///
/// Assigned by the ship when the component is added and never reused, so
/// crew holding an id can tell when their component has been destroyed.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct ComponentId(pub u32);

/// What a grid cell is fitted with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentKind {
    Core,
    Engine,
    WeaponLaser,
    WeaponCannon,
    Armor,
    Power,
    Shield,
    CrewQuarters,
    AmmoFactory,
    Corridor,
    Structure,
    EngineRoom,
}

impl ComponentKind {
    pub const ALL: [ComponentKind; 12] = [
        ComponentKind::Core,
        ComponentKind::Engine,
        ComponentKind::WeaponLaser,
        ComponentKind::WeaponCannon,
        ComponentKind::Armor,
        ComponentKind::Power,
        ComponentKind::Shield,
        ComponentKind::CrewQuarters,
        ComponentKind::AmmoFactory,
        ComponentKind::Corridor,
        ComponentKind::Structure,
        ComponentKind::EngineRoom,
    ];

    /// Stable snake_case tag, matching the serde representation
    pub fn tag(&self) -> &'static str {
        match self {
            ComponentKind::Core => "core",
            ComponentKind::Engine => "engine",
            ComponentKind::WeaponLaser => "weapon_laser",
            ComponentKind::WeaponCannon => "weapon_cannon",
            ComponentKind::Armor => "armor",
            ComponentKind::Power => "power",
            ComponentKind::Shield => "shield",
            ComponentKind::CrewQuarters => "crew_quarters",
            ComponentKind::AmmoFactory => "ammo_factory",
            ComponentKind::Corridor => "corridor",
            ComponentKind::Structure => "structure",
            ComponentKind::EngineRoom => "engine_room",
        }
    }

    /// Fresh, full-health stats for this kind
    pub fn base_stats(&self) -> ComponentStats {
        // (name, health, power consumption, power generation, thrust)
        let (name, health, consumption, generation, thrust) = match self {
            ComponentKind::Core => ("Core", 200, 0, 50, 0.0),
            ComponentKind::Engine => ("Engine", 50, 10, 0, 200.0),
            ComponentKind::WeaponLaser => ("Laser", 40, 15, 0, 0.0),
            ComponentKind::WeaponCannon => ("Cannon", 60, 20, 0, 0.0),
            ComponentKind::Armor => ("Armor", 150, 0, 0, 0.0),
            ComponentKind::Power => ("Reactor", 80, 0, 100, 0.0),
            ComponentKind::Shield => ("Shield", 30, 25, 0, 0.0),
            ComponentKind::CrewQuarters => ("Crew Quarters", 60, 0, 0, 0.0),
            ComponentKind::AmmoFactory => ("Ammo Factory", 70, 20, 0, 0.0),
            ComponentKind::Corridor => ("Corridor", 30, 0, 0, 0.0),
            ComponentKind::Structure => ("Structure", 40, 0, 0, 0.0),
            ComponentKind::EngineRoom => ("Engine Room", 80, 15, 0, 0.0),
        };
        ComponentStats {
            name: name.to_string(),
            health,
            max_health: health,
            power_consumption: consumption,
            power_generation: generation,
            thrust,
        }
    }

    pub fn is_weapon(&self) -> bool {
        matches!(self, ComponentKind::WeaponLaser | ComponentKind::WeaponCannon)
    }

    /// Projectile fired by this kind, if it is a weapon
    pub fn projectile_kind(&self) -> Option<ProjectileKind> {
        match self {
            ComponentKind::WeaponLaser => Some(ProjectileKind::Laser),
            ComponentKind::WeaponCannon => Some(ProjectileKind::Cannon),
            _ => None,
        }
    }

    /// Seconds between shots, if this kind is a weapon
    pub fn fire_cooldown(&self) -> Option<f32> {
        match self {
            ComponentKind::WeaponLaser => Some(LASER_COOLDOWN),
            ComponentKind::WeaponCannon => Some(CANNON_COOLDOWN),
            _ => None,
        }
    }

    /// How many crew this kind needs to be fully staffed
    pub fn required_crew(&self) -> u32 {
        match self {
            ComponentKind::Power => 2,
            ComponentKind::WeaponLaser | ComponentKind::WeaponCannon | ComponentKind::Engine => 1,
            _ => 0,
        }
    }
}

impl std::fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

impl std::str::FromStr for ComponentKind {
    type Err = ParseComponentKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ComponentKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.tag() == s)
            .ok_or_else(|| ParseComponentKindError(s.to_string()))
    }
}

/// An unrecognised component tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseComponentKindError(pub String);

impl std::fmt::Display for ParseComponentKindError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown component kind: {:?}", self.0)
    }
}

impl std::error::Error for ParseComponentKindError {}

/// Live stats of a component; starts as the kind's template and takes damage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentStats {
    pub name: String,
    pub health: i32,
    pub max_health: i32,
    pub power_consumption: i32,
    pub power_generation: i32,
    pub thrust: f32,
}

/// One grid cell of a ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Component {
    pub(crate) id: ComponentId,
    pub kind: ComponentKind,
    pub grid_x: i32,
    pub grid_y: i32,
    pub stats: ComponentStats,
    /// Seconds until the weapon may fire again
    pub cooldown: f32,
    /// Cosmetic only
    pub rotation: f32,
}

impl Component {
    pub fn new(kind: ComponentKind, grid_x: i32, grid_y: i32) -> Self {
        Self {
            id: ComponentId::default(),
            kind,
            grid_x,
            grid_y,
            stats: kind.base_stats(),
            cooldown: 0.0,
            rotation: 0.0,
        }
    }

    /// Id assigned by the owning ship (zero until added to one)
    pub fn id(&self) -> ComponentId {
        self.id
    }

    /// Apply damage. Returns true when health has reached zero.
    pub fn take_damage(&mut self, amount: i32) -> bool {
        self.stats.health = (self.stats.health - amount).clamp(0, self.stats.max_health);
        self.stats.health == 0
    }

    pub fn update(&mut self, dt: f32) {
        if self.cooldown > 0.0 {
            self.cooldown -= dt;
        }
    }

    pub fn can_fire(&self) -> bool {
        self.kind.is_weapon() && self.cooldown <= 0.0 && self.stats.health > 0
    }

    /// Reset the weapon cooldown. Does nothing for non-weapons.
    pub fn fire(&mut self) {
        if let Some(cooldown) = self.kind.fire_cooldown() {
            self.cooldown = cooldown;
        }
    }

    pub fn is_alive(&self) -> bool {
        self.stats.health > 0
    }

    /// Health as a fraction of max (1.0 when max health is zero)
    pub fn health_fraction(&self) -> f32 {
        if self.stats.max_health > 0 {
            self.stats.health as f32 / self.stats.max_health as f32
        } else {
            1.0
        }
    }
}
