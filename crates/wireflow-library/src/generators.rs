//! Generator kinds: seeded random value sources.
//!
//! Outputs are reproducible -- `produce()` is a pure function of the seed
//! and range parameters, so a cascade recomputes the same value until the
//! `reseed` button advances the seed.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde_json::json;
use wireflow_core::{BoxType, Catalog, GraphError, ParamDescriptor, ParamValues, Value};

use crate::num;

fn uniform_output(values: &ParamValues) -> Value {
    let seed = match values.get("seed") {
        Some(Value::Integer(s)) => *s as u64,
        _ => 0,
    };
    let lo = num(values, "lo");
    let hi = num(values, "hi");
    if hi <= lo {
        return Value::Number(lo);
    }
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    Value::Number(rng.gen_range(lo..=hi))
}

fn uniform_display(values: &ParamValues) -> serde_json::Value {
    json!({ "value": uniform_output(values) })
}

// splitmix64 step: a full-period walk over the seed space.
fn reseed(values: &mut ParamValues) {
    let seed = match values.get("seed") {
        Some(Value::Integer(s)) => *s as u64,
        _ => 0,
    };
    let mut z = seed.wrapping_add(0x9e3779b97f4a7c15);
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58476d1ce4e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d049bb133111eb);
    z ^= z >> 31;
    values.insert("seed".to_string(), Value::Integer(z as i64));
}

/// Registers the generator kinds.
pub fn load_generators(catalog: &mut Catalog) -> Result<(), GraphError> {
    catalog.register(
        BoxType::new("UniformRandom", "generators")
            .with_param("seed", ParamDescriptor::integer(42).hidden())
            .with_param("lo", ParamDescriptor::number(0.0))
            .with_param("hi", ParamDescriptor::number(1.0))
            .with_action("reseed", reseed)
            .with_output(uniform_output)
            .with_display(uniform_display),
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        let mut catalog = Catalog::new();
        load_generators(&mut catalog).unwrap();
        catalog
    }

    #[test]
    fn produce_is_reproducible_for_a_seed() {
        let catalog = catalog();
        let g = catalog
            .instantiate("UniformRandom", "g", &ParamValues::new())
            .unwrap();
        let first = g.produce();
        assert_eq!(g.produce(), first, "same seed, same value");
        match first {
            Value::Number(v) => assert!((0.0..=1.0).contains(&v)),
            other => panic!("expected a number, got {other:?}"),
        }
    }

    #[test]
    fn reseed_changes_seed_and_output() {
        let catalog = catalog();
        let mut g = catalog
            .instantiate("UniformRandom", "g", &ParamValues::new())
            .unwrap();
        let before = g.produce();
        let seed_before = g.get("seed").cloned();

        let after_params = g.invoke("reseed").unwrap();
        assert_ne!(after_params.get("seed").cloned(), seed_before);
        assert_ne!(g.produce(), before);
    }

    #[test]
    fn reseed_is_deterministic() {
        let catalog = catalog();
        let mut a = catalog
            .instantiate("UniformRandom", "a", &ParamValues::new())
            .unwrap();
        let mut b = catalog
            .instantiate("UniformRandom", "b", &ParamValues::new())
            .unwrap();
        a.invoke("reseed").unwrap();
        b.invoke("reseed").unwrap();
        assert_eq!(a.get("seed"), b.get("seed"));
        assert_eq!(a.produce(), b.produce());
    }

    #[test]
    fn degenerate_range_collapses_to_lo() {
        let catalog = catalog();
        let delta = ParamValues::from([
            ("lo".to_string(), Value::Number(3.0)),
            ("hi".to_string(), Value::Number(3.0)),
        ]);
        let g = catalog.instantiate("UniformRandom", "g", &delta).unwrap();
        assert_eq!(g.produce(), Value::Number(3.0));
    }
}
