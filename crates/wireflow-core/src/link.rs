//! The directed wire between a box output and a named input parameter.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An ordered 4-tuple identifying a directed wire from `src`'s output to
/// `dest`'s `input` parameter.
///
/// `output` is carried but currently unused for dispatch -- boxes expose at
/// most one output. It is retained for future multi-output box types.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Link {
    pub src: String,
    pub output: String,
    pub dest: String,
    pub input: String,
}

impl Link {
    pub fn new(
        src: impl Into<String>,
        output: impl Into<String>,
        dest: impl Into<String>,
        input: impl Into<String>,
    ) -> Self {
        Link {
            src: src.into(),
            output: output.into(),
            dest: dest.into(),
            input: input.into(),
        }
    }
}

impl fmt::Display for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{} -> {}.{}", self.src, self.output, self.dest, self.input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_shows_both_endpoints() {
        let link = Link::new("osc", "", "gain", "input");
        assert_eq!(format!("{}", link), "osc. -> gain.input");
    }

    #[test]
    fn identical_tuples_are_equal() {
        let a = Link::new("a", "", "b", "x");
        let b = Link::new("a", "", "b", "x");
        assert_eq!(a, b);
        assert_ne!(a, Link::new("a", "", "b", "y"));
    }
}
