//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay deterministic:
//! - Seeded RNG only, owned by the session
//! - Stable iteration order (insertion order of each entity set)
//! - No rendering or platform dependencies; audio and score storage are
//!   reached only through the injected [`Hooks`]

pub mod asteroid;
pub mod circle;
pub mod collision;
pub mod particles;
pub mod player;
pub mod powerup;
pub mod state;
pub mod tick;
pub mod ufo;
pub mod wave;

pub use asteroid::{Asteroid, AsteroidSize};
pub use circle::{Bounds, Circle, collides, wrap};
pub use collision::resolve_collisions;
pub use particles::{Particle, ParticleKind};
pub use player::{Player, ShipControls};
pub use powerup::{PowerUp, PowerUpKind};
pub use state::{GamePhase, GameState, Hooks, Shot, ShotOwner};
pub use tick::{TickInput, tick};
pub use ufo::{Ufo, UfoSize, UfoSpawner};
pub use wave::{WavePlan, generate_wave};
