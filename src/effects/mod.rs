//! Decorative page effects.
//!
//! Each effect keeps its pure geometry/simulation at module level and its
//! DOM wiring in a wasm32-only `web` submodule.

pub mod glass;
pub mod neural;
pub mod scrollspy;
