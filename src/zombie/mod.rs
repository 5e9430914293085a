//! Zombie agents: variants, roles, steering and combat reactions

pub mod agent;
pub mod constants;
pub mod hooks;
pub mod ragdoll;
pub mod role;
pub mod steering;
pub mod stuck;
pub mod variant;

pub use agent::{Flinch, Hit, Zombie, ZombieContext};
pub use hooks::{EventLog, HordeEvent, SoundEffect, ZombieHooks};
pub use ragdoll::{BodyPart, RagdollPart};
pub use role::{AiRole, TacticsTier};
pub use stuck::StuckDetector;
pub use variant::{pick_variant, special_variant_chance, VariantConfig, ZombieVariant};
