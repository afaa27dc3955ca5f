//! Root app shell: config, scenario scripts and the frame-driven session
//! that wires input, camera, terrain and locomotion together.

pub use input_core as input;
pub use locomotion_core as locomotion;
pub use scene_assets as assets;
pub use terrain_query as terrain;

pub mod config;
pub mod scenario;
pub mod session;

pub use session::Session;
