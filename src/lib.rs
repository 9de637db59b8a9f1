//! randonaut: Quantum Random Attractor Points
//!
//! A library and CLI tool that turns quantum random numbers into a single
//! "attractor" coordinate: the point near a starting position where randomly
//! scattered samples are densest according to a Gaussian kernel density
//! estimate.
//!
//! ## Pipeline
//!
//! - Draw unsigned 16-bit integers from a QRNG backend in batches of 1024
//! - Normalize each integer into [0, 1)
//! - Map consecutive pairs to points uniformly distributed in a circle
//! - Fit a KDE and return the densest node of a grid over the points
//!
//! ## Quick Start
//!
//! ```rust
//! use randonaut::coord::attractor::{run, AttractorRequest, PipelineSettings};
//! use randonaut::coord::Coordinates;
//! use randonaut::qrng::pseudo::SeededPseudoBackend;
//!
//! let backend = SeededPseudoBackend::new(42);
//! let request = AttractorRequest::new(Coordinates::new(40.7128, -74.0060), 1000.0, 2048);
//!
//! match run(&request, &backend, &PipelineSettings::default()) {
//!     Ok(result) => println!("Attractor: {}", result.attractor),
//!     // A raw value of 65535 cannot be normalized and aborts the run
//!     Err(e) => println!("No attractor: {}", e),
//! }
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod coord;
pub mod error;
pub mod format;
pub mod qrng;

// Re-export commonly used types
pub use config::Config;
pub use coord::attractor::{get_coordinate, AttractorRequest, AttractorResult};
pub use coord::Coordinates;
pub use error::{Error, Result};
