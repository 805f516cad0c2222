// Public modules
pub mod algorithms;
pub mod config;
pub mod error;
pub mod models;
pub mod utils;

// Re-exports for convenience
pub use algorithms::held_karp::HeldKarp;
pub use algorithms::pick_path::{PickPathGenerator, PickPathSettings};
pub use algorithms::{Tour, TspSolver};
pub use config::GeneratorConfig;
pub use error::{PickPathError, Result};
pub use models::{Book, Coordinate, PickPathFile, PickPathInformation, PickPathRecord, Warehouse};
