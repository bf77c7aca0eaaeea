//! Neural network modules, and the traits they implement.
//!
//! Modules are usually described by an architecture (like [LinearConfig]) and
//! then built on a device with [BuildModuleExt::build_module], which also
//! initializes their parameters. Plain functions become modules by wrapping
//! them in [Functional].

pub mod layers;

pub use layers::*;
pub use sinew_core::nn_traits::*;
