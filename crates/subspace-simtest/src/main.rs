//! Subspace Headless Battle Harness
//!
//! Runs seeded battles end to end and checks simulation invariants on every
//! tick. Runs entirely in-process with no rendering and no input devices.
//!
//! Usage:
//!   cargo run -p subspace-simtest
//!   cargo run -p subspace-simtest -- --verbose --seed 7 --battles 20
//!   cargo run -p subspace-simtest -- --config battle.json --json
//!
//! Set `RUST_LOG=subspace_core=debug` to see engine logs.

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use subspace_core::components::Vec2;
use subspace_core::config::{validate_config, BattleConfig};
use subspace_core::constants::MAX_VELOCITY;
use subspace_core::engine::{BattleEngine, BattleOutcome, PlayerInput};
use tracing_subscriber::filter::EnvFilter;

const DT: f32 = 1.0 / 60.0;

// ── Options ─────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "subspace-simtest")]
#[command(about = "Run seeded Subspace battles headless and check simulation invariants")]
struct Options {
    /// Seed of the first battle; later battles count up from it
    #[arg(long, default_value_t = 1)]
    seed: u64,

    /// Number of battles to run
    #[arg(long, default_value_t = 8)]
    battles: u64,

    /// Tick limit per battle
    #[arg(long, default_value_t = 3600)]
    ticks: u64,

    /// Print passing checks too
    #[arg(short, long)]
    verbose: bool,

    /// Print per-battle summaries as JSON
    #[arg(long)]
    json: bool,

    /// Battle config JSON file (defaults apply when omitted)
    #[arg(long)]
    config: Option<String>,
}

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

/// Per-battle numbers for `--json`
#[derive(Debug, Serialize)]
struct BattleSummary {
    seed: u64,
    ticks: u64,
    outcome: String,
    projectiles_fired: usize,
    hits: usize,
    ships_destroyed: usize,
    violations: Vec<String>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let options = Options::parse();
    let base = load_config(&options)?;
    println!("=== Subspace Battle Harness ===\n");

    let mut results = Vec::new();

    // 1. Configuration
    results.extend(validate_configuration(&base));

    // 2. Seeded battles with per-tick invariant checks
    let summaries = run_battles(&base, &options);
    results.extend(summaries.iter().map(|s| TestResult {
        name: format!("battle_seed_{}", s.seed),
        passed: s.violations.is_empty(),
        detail: if s.violations.is_empty() {
            format!(
                "{} after {} ticks, {} shots, {} hits, {} ships lost",
                s.outcome, s.ticks, s.projectiles_fired, s.hits, s.ships_destroyed
            )
        } else {
            s.violations.join("; ")
        },
    }));

    // 3. Determinism
    results.extend(validate_determinism(&base, &options));

    // 4. Save / load
    results.extend(validate_persistence(&base, &options)?);

    if options.json {
        println!("{}", serde_json::to_string_pretty(&summaries)?);
    }

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || options.verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if failed > 0 {
        std::process::exit(1);
    }
    Ok(())
}

fn load_config(options: &Options) -> Result<BattleConfig> {
    match &options.config {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path))?;
            BattleConfig::from_json(&json).with_context(|| format!("loading config {}", path))
        }
        None => Ok(BattleConfig::default()),
    }
}

/// Scripted player: fire constantly, weave, and aim at the nearest enemy
/// every other second.
fn scripted_input(engine: &BattleEngine, tick: u64) -> PlayerInput {
    let aim = if (tick / 60) % 2 == 1 {
        engine.player().and_then(|player| {
            engine
                .ships()
                .filter(|s| !s.is_player())
                .map(|s| s.position)
                .min_by(|a, b| {
                    a.distance(&player.position)
                        .total_cmp(&b.distance(&player.position))
                })
        })
    } else {
        None
    };

    PlayerInput {
        thrust: tick % 4 == 0,
        rotate: if (tick / 90) % 2 == 0 { 1.0 } else { -1.0 },
        fire: true,
        aim,
    }
}

// ── 1. Configuration ────────────────────────────────────────────────────

fn validate_configuration(config: &BattleConfig) -> Vec<TestResult> {
    println!("--- Configuration ---");
    let mut results = Vec::new();

    let errors = validate_config(config);
    results.push(TestResult {
        name: "config_valid".into(),
        passed: errors.is_empty(),
        detail: if errors.is_empty() {
            format!(
                "{} enemies, {:.0}x{:.0} arena",
                config.enemy_count, config.arena_width, config.arena_height
            )
        } else {
            errors
                .iter()
                .map(|e| e.to_string())
                .collect::<Vec<_>>()
                .join("; ")
        },
    });

    let engine = BattleEngine::new(config.clone());
    let expected = config.enemy_count as usize + 1;
    results.push(TestResult {
        name: "config_spawns_all_ships".into(),
        passed: engine.ship_count() == expected,
        detail: format!("{} of {} ships spawned", engine.ship_count(), expected),
    });

    let center = Vec2::new(config.arena_width / 2.0, config.arena_height / 2.0);
    let too_close = engine
        .ships()
        .filter(|s| !s.is_player())
        .filter(|s| s.position.distance(&center) < config.enemy_min_spawn_distance)
        .count();
    results.push(TestResult {
        name: "config_spawn_distance".into(),
        passed: too_close == 0,
        detail: format!("{} enemies spawned too close", too_close),
    });

    results
}

// ── 2. Battles ──────────────────────────────────────────────────────────

fn run_battles(base: &BattleConfig, options: &Options) -> Vec<BattleSummary> {
    println!("--- Battles ---");
    log::info!(
        "running {} battles from seed {}, up to {} ticks each",
        options.battles,
        options.seed,
        options.ticks
    );
    (0..options.battles)
        .map(|i| run_battle(base.clone().with_seed(options.seed + i), options.ticks))
        .collect()
}

fn run_battle(config: BattleConfig, max_ticks: u64) -> BattleSummary {
    let seed = config.seed;
    let mut engine = BattleEngine::new(config);
    let mut summary = BattleSummary {
        seed,
        ticks: 0,
        outcome: String::new(),
        projectiles_fired: 0,
        hits: 0,
        ships_destroyed: 0,
        violations: Vec::new(),
    };

    for tick in 0..max_ticks {
        let input = scripted_input(&engine, tick);
        let report = engine.update(DT, &input);
        summary.ticks = engine.tick();
        summary.projectiles_fired += report.projectiles_fired;
        summary.hits += report.hits.len();
        summary.ships_destroyed += report.ships_destroyed.len();

        for hit in &report.hits {
            if hit.ship == hit.owner {
                summary
                    .violations
                    .push(format!("tick {}: {} hit itself", tick, hit.ship));
            }
        }
        check_invariants(&engine, tick, &mut summary.violations);

        // One report per battle is plenty
        if !summary.violations.is_empty() || engine.outcome() != BattleOutcome::Ongoing {
            break;
        }
    }

    summary.outcome = format!("{:?}", engine.outcome());
    summary
}

fn check_invariants(engine: &BattleEngine, tick: u64, violations: &mut Vec<String>) {
    for ship in engine.ships() {
        if ship.is_destroyed() {
            violations.push(format!("tick {}: {} survived without a core", tick, ship.id));
        }

        let stats = ship.stats();
        let health: i32 = ship.components().iter().map(|c| c.stats.health).sum();
        let used: i32 = ship
            .components()
            .iter()
            .map(|c| c.stats.power_consumption)
            .sum();
        if stats.total_health != health || stats.power_used != used {
            violations.push(format!("tick {}: {} aggregates out of date", tick, ship.id));
        }

        for component in ship.components() {
            let health = component.stats.health;
            if health <= 0 || health > component.stats.max_health {
                violations.push(format!(
                    "tick {}: {} {} health {} out of range",
                    tick, ship.id, component.kind, health
                ));
            }
            let staffed = ship.crew().staffing(component.id());
            if staffed > component.kind.required_crew() as usize {
                violations.push(format!(
                    "tick {}: {} {} overstaffed ({})",
                    tick, ship.id, component.kind, staffed
                ));
            }
        }

        if ship.velocity.length() > MAX_VELOCITY + 1e-3 {
            violations.push(format!("tick {}: {} over the speed cap", tick, ship.id));
        }
    }

    if engine.projectiles().iter().any(|p| !p.alive) {
        violations.push(format!("tick {}: dead projectile left in world", tick));
    }
}

// ── 3. Determinism ──────────────────────────────────────────────────────

fn fingerprint(engine: &BattleEngine) -> Vec<(u32, i32, f32, f32)> {
    engine
        .ships()
        .map(|s| (s.id.0, s.stats().total_health, s.position.x, s.position.y))
        .collect()
}

fn validate_determinism(base: &BattleConfig, options: &Options) -> Vec<TestResult> {
    println!("--- Determinism ---");
    let config = base.clone().with_seed(options.seed);
    let ticks = options.ticks.min(1200);

    let run = || {
        let mut engine = BattleEngine::new(config.clone());
        for tick in 0..ticks {
            let input = scripted_input(&engine, tick);
            engine.update(DT, &input);
        }
        (fingerprint(&engine), engine.projectile_count())
    };

    let first = run();
    let second = run();
    vec![TestResult {
        name: "determinism_same_seed".into(),
        passed: first == second,
        detail: format!("{} ships after {} ticks", first.0.len(), ticks),
    }]
}

// ── 4. Persistence ──────────────────────────────────────────────────────

fn validate_persistence(base: &BattleConfig, options: &Options) -> Result<Vec<TestResult>> {
    println!("--- Persistence ---");
    let mut results = Vec::new();

    let mut engine = BattleEngine::new(base.clone().with_seed(options.seed));
    for tick in 0..options.ticks.min(300) {
        let input = scripted_input(&engine, tick);
        engine.update(DT, &input);
    }

    let mut buffer = Vec::new();
    engine.save(&mut buffer).context("saving battle")?;

    let mut loaded = BattleEngine::default();
    loaded.load(&buffer[..]).context("loading battle")?;

    results.push(TestResult {
        name: "save_load_ships".into(),
        passed: fingerprint(&engine) == fingerprint(&loaded),
        detail: format!("{} bytes, {} ships", buffer.len(), loaded.ship_count()),
    });
    results.push(TestResult {
        name: "save_load_projectiles".into(),
        passed: engine.projectile_count() == loaded.projectile_count(),
        detail: format!("{} projectiles in flight", loaded.projectile_count()),
    });
    results.push(TestResult {
        name: "save_load_clock".into(),
        passed: engine.tick() == loaded.tick() && engine.battle_time() == loaded.battle_time(),
        detail: format!("tick {}", loaded.tick()),
    });

    Ok(results)
}
