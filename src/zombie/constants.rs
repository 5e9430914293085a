//! Zombie AI constants - fixed behaviour numbers in one place
//!
//! Anything a level designer is expected to tune lives in `HordeConfig`
//! instead; these values define the behaviours themselves.

// Role draw thresholds (cumulative): 40% rusher, 35% flanker, 25% lurker
pub const RUSHER_SHARE: f64 = 0.40;
pub const FLANKER_CUMULATIVE: f64 = 0.75;

// Tactics tiers by wave
pub const MAX_TACTICS_WAVE: u32 = 7;
pub const SEPARATION_UNLOCK_WAVE: u32 = 3;
pub const FLANKING_UNLOCK_WAVE: u32 = 5;
pub const FULL_TACTICS_WAVE: u32 = 7;

// Separation
pub const SEPARATION_RADIUS: f64 = 3.0;
pub const SEPARATION_NEIGHBORS: usize = 3;
pub const SEPARATION_STRENGTH: f64 = 2.0;
pub const SEPARATION_BLEND: f64 = 0.4;
pub const MIN_NEIGHBOR_DIST_SQ: f64 = 0.01;

// Role steering
pub const RUSHER_SPEED: f64 = 1.1;
pub const RUSHER_FULL_TACTICS_SPEED: f64 = 1.3;
pub const RUSHER_SEEK_WEIGHT: f64 = 1.2;
pub const FLANKER_SPEED: f64 = 0.9;
pub const FLANK_FAR_DISTANCE: f64 = 10.0;
pub const FLANK_FAR_WEIGHT: f64 = 0.8;
pub const FLANK_NEAR_WEIGHT: f64 = 0.3;
pub const LURKER_SPEED: f64 = 0.7;
pub const LURKER_SEEK_WEIGHT: f64 = 0.6;
pub const LURKER_THREAT_THRESHOLD: f64 = 0.5;
/// cos(60 deg): aim this close to the lurker counts as being targeted
pub const LURKER_AIM_DOT: f64 = 0.5;
pub const LURKER_SIDESTEP: f64 = 5.0;
pub const MIN_SEEK_DIVISOR: f64 = 0.1;
pub const MIN_STEER_MAGNITUDE: f64 = 0.01;

// Stuck detection
pub const STUCK_HISTORY: usize = 8;
pub const STUCK_WINDOW: usize = 5;
pub const STUCK_DISTANCE: f64 = 0.3;
/// Per-check timer increment, assuming ~60 checks per second
pub const STUCK_TICK_ESTIMATE: f64 = 0.016;
pub const STUCK_TRIP_SECONDS: f64 = 0.5;
pub const MAX_ESCAPE_TIER: u32 = 3;

// Obstacle avoidance rays: heading offsets (radians) and weights
pub const AVOIDANCE_RAY_ANGLES: [f64; 5] = [0.0, -0.52, 0.52, -1.05, 1.05];
pub const AVOIDANCE_RAY_WEIGHTS: [f64; 5] = [1.0, 0.8, 0.8, 0.5, 0.5];
pub const AVOIDANCE_LOOKAHEAD: f64 = 2.5;
pub const AVOIDANCE_DANGER_MARGIN: f64 = 1.5;
pub const AVOIDANCE_REPULSION: f64 = 1.5;

// Combat
pub const STAGGER_MIN_SECONDS: f64 = 0.15;
pub const STAGGER_JITTER_SECONDS: f64 = 0.1;
pub const KNOCKBACK_MIN: f64 = 0.3;
pub const KNOCKBACK_JITTER: f64 = 0.2;
pub const FLINCH_RECOVERY_RATE: f64 = 10.0;
pub const BLOOD_HIT_INTENSITY: u32 = 2;
pub const BLOOD_LETHAL_INTENSITY: u32 = 4;
/// Height above the feet where body hits and death gore originate
pub const BODY_CENTER_HEIGHT: f64 = 2.0;
/// Torso blood height for a zombie whose head is already gone
pub const TORSO_HEIGHT: f64 = 1.5;
/// Head centre above the feet, before variant scale
pub const HEAD_HEIGHT: f64 = 1.85;
pub const HEADSHOT_SPRAYS: usize = 5;
pub const HEADSHOT_SPRAY_INTENSITY: u32 = 3;

// Animation
/// Walk-cycle radians advanced per unit of ground covered
pub const WALK_CYCLE_PER_UNIT: f64 = 1.2;
/// Hitbox half extents (x, y, z) before variant scale
pub const HITBOX_HALF_EXTENTS: [f64; 3] = [0.8, 2.2, 0.5];

// Bounds margin for the minimal update path
pub const MINIMAL_BOUNDS_MARGIN: f64 = 1.0;
