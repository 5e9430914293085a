//! Headless Swarm Runner
//!
//! Pits the horde against a scripted turret survivor on the hill top and
//! prints a JSON (or text) summary of how far it got.

use clap::Parser;
use glam::{DVec2, DVec3};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

use undead_swarm::core::config::HordeConfig;
use undead_swarm::hive::PlayerState;
use undead_swarm::physics::scatter_obstacles;
use undead_swarm::simulation::{Horde, ScoreBoard};
use undead_swarm::zombie::{Hit, SoundEffect, ZombieHooks};

const TICK_DT: f64 = 1.0 / 60.0;
const SURVIVOR_MAX_HEALTH: f64 = 100.0;
const HEALTH_REGEN_DELAY: f64 = 5.0;
const HEALTH_REGEN_RATE: f64 = 15.0;
const FIRE_INTERVAL: f64 = 0.1;
const WEAPON_RANGE: f64 = 45.0;
const HEADSHOT_CHANCE: f64 = 0.2;

/// Headless Swarm Runner - scripted survivor vs the horde
#[derive(Parser, Debug)]
#[command(name = "swarm_runner")]
#[command(about = "Run the zombie horde against a turret survivor and report the outcome")]
struct Args {
    /// Stop after this many waves are cleared
    #[arg(long, default_value_t = 3)]
    waves: u32,

    /// Maximum ticks before giving up
    #[arg(long, default_value_t = 60 * 60 * 5)]
    max_ticks: u64,

    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Number of obstacles to scatter around the map
    #[arg(long, default_value_t = 25)]
    obstacles: usize,

    /// Horde config TOML (defaults apply when omitted)
    #[arg(long)]
    config: Option<std::path::PathBuf>,

    /// Output format: json or text
    #[arg(long, default_value = "json")]
    format: String,

    /// Log wave and kill events to stderr
    #[arg(long, short = 'v')]
    verbose: bool,
}

/// Survivor side of the hooks: takes damage, keeps score, counts effects
struct Survivor {
    health: f64,
    since_damage: f64,
    score: ScoreBoard,
    sprays: u64,
    slowmo: u32,
}

impl Survivor {
    fn new() -> Self {
        Self {
            health: SURVIVOR_MAX_HEALTH,
            since_damage: 0.0,
            score: ScoreBoard::new(),
            sprays: 0,
            slowmo: 0,
        }
    }

    fn is_alive(&self) -> bool {
        self.health > 0.0
    }

    fn update(&mut self, dt: f64) {
        self.score.update(dt);
        self.since_damage += dt;
        if self.is_alive() && self.since_damage >= HEALTH_REGEN_DELAY {
            self.health = (self.health + HEALTH_REGEN_RATE * dt).min(SURVIVOR_MAX_HEALTH);
        }
    }
}

impl ZombieHooks for Survivor {
    fn play_sound(&mut self, sound: SoundEffect) {
        tracing::trace!(?sound, "sound");
    }

    fn spawn_blood_spray(&mut self, _position: DVec3, _direction: DVec3, _intensity: u32) {
        self.sprays += 1;
    }

    fn spawn_gore_chunks(&mut self, _position: DVec3, _direction: DVec3) {}

    fn spawn_blood_pool(&mut self, _position: DVec3) {}

    fn add_kill_score(&mut self, points: u32) {
        self.score.add_kill(points);
    }

    fn is_last_zombie_of_wave(&self) -> bool {
        false
    }

    fn trigger_slowmo(&mut self) {
        self.slowmo += 1;
    }

    fn damage_player(&mut self, amount: u32) {
        self.health -= amount as f64;
        self.since_damage = 0.0;
    }
}

/// JSON output structure
#[derive(Serialize)]
struct RunSummary {
    seed: u64,
    ticks: u64,
    waves_reached: u32,
    waves_cleared: u32,
    kills: u32,
    headshots: u32,
    score: u64,
    survivor_alive: bool,
    survivor_health: f64,
    zombies_remaining: usize,
    blood_sprays: u64,
    slowmo_moments: u32,
}

fn main() {
    let args = Args::parse();

    let default_filter = if args.verbose {
        "undead_swarm=debug"
    } else {
        "undead_swarm=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = match &args.config {
        Some(path) => HordeConfig::load(path).unwrap_or_else(|e| {
            eprintln!("Warning: Failed to load config '{}': {}", path.display(), e);
            eprintln!("Using default config");
            HordeConfig::default()
        }),
        None => HordeConfig::default(),
    };

    let seed = args.seed.unwrap_or_else(rand::random);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let obstacles = scatter_obstacles(args.obstacles, &config.physics, &mut rng);

    let mut horde = match Horde::new(config, obstacles, seed.wrapping_add(1)) {
        Ok(horde) => horde,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let mut survivor = Survivor::new();
    let mut player = PlayerState::idle_at(DVec2::ZERO);
    let mut fire_cooldown = 0.0;
    let mut headshots = 0;

    while survivor.is_alive()
        && horde.waves().waves_cleared() < args.waves
        && horde.current_tick() < args.max_ticks
    {
        fire_cooldown -= TICK_DT;
        player.firing = false;

        let target = horde
            .nearest_live(player.position)
            .filter(|z| z.position.distance(player.position) <= WEAPON_RANGE)
            .map(|z| (z.id(), z.position));

        if let Some((id, position)) = target {
            let to_target = position - player.position;
            if to_target.length_squared() > 1e-6 {
                player.aim = to_target.normalize();
            }
            if fire_cooldown <= 0.0 {
                fire_cooldown = FIRE_INTERVAL;
                player.firing = true;

                let hit = Hit::body(1.0);
                let outcome = if rng.gen_bool(HEADSHOT_CHANCE) {
                    horde.apply_headshot(id, &hit, &player, &mut survivor)
                } else {
                    horde.apply_hit(id, &hit, &player, &mut survivor)
                };
                match outcome {
                    Ok(outcome) if outcome.killed && outcome.headshot => {
                        // Headshot kills award their own points
                        headshots += 1;
                        survivor.add_kill_score(horde.config().combat.body_kill_score);
                    }
                    Ok(_) => {}
                    Err(e) => tracing::warn!(error = %e, "hit rejected"),
                }
            }
        }

        let report = horde.tick(TICK_DT, &player, &mut survivor);
        survivor.update(TICK_DT);

        if let Some(wave) = report.wave_cleared {
            tracing::info!(wave, score = survivor.score.score, "survivor cleared wave");
        }
    }

    let result = RunSummary {
        seed,
        ticks: horde.current_tick(),
        waves_reached: horde.waves().current_wave(),
        waves_cleared: horde.waves().waves_cleared(),
        kills: survivor.score.kills,
        headshots,
        score: survivor.score.score,
        survivor_alive: survivor.is_alive(),
        survivor_health: survivor.health.max(0.0),
        zombies_remaining: horde.live_count(),
        blood_sprays: survivor.sprays,
        slowmo_moments: survivor.slowmo,
    };

    match args.format.as_str() {
        "json" => print_json(&result),
        "text" => {
            println!("Swarm Run");
            println!("=========");
            println!("Waves cleared: {} (reached {})", result.waves_cleared, result.waves_reached);
            println!("Kills: {} ({} headshots)", result.kills, result.headshots);
            println!("Score: {}", result.score);
            println!(
                "Survivor: {} ({:.0} hp)",
                if result.survivor_alive { "alive" } else { "dead" },
                result.survivor_health
            );
            println!("Zombies remaining: {}", result.zombies_remaining);
            println!("Ticks: {}", result.ticks);
            println!("Seed: {}", result.seed);
        }
        _ => {
            eprintln!("Unknown format '{}', defaulting to json", args.format);
            print_json(&result);
        }
    }
}

fn print_json(result: &RunSummary) {
    match serde_json::to_string_pretty(result) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Error: failed to serialize summary: {}", e),
    }
}
