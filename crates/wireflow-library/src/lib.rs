//! Built-in box kinds for wireflow.
//!
//! Each module covers one palette group and exposes a `load_*` function
//! that registers its kinds into a [`Catalog`]. [`default_catalog`]
//! assembles all of them; embedders that want a different palette call the
//! load functions they need on their own catalog.

pub mod arithmetic;
pub mod generators;
pub mod sources;

use wireflow_core::{Catalog, ParamValues, Value};

pub use arithmetic::load_arithmetic;
pub use generators::load_generators;
pub use sources::load_sources;

/// A catalog holding every built-in group.
pub fn default_catalog() -> Catalog {
    let mut catalog = Catalog::new();
    load_sources(&mut catalog).expect("built-in source kinds register cleanly");
    load_arithmetic(&mut catalog).expect("built-in arithmetic kinds register cleanly");
    load_generators(&mut catalog).expect("built-in generator kinds register cleanly");
    catalog
}

/// Numeric view of a parameter, defaulting to 0 for non-numeric values.
pub(crate) fn num(values: &ParamValues, key: &str) -> f64 {
    values.get(key).and_then(Value::as_number).unwrap_or(0.0)
}
