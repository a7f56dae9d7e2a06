//! FlowGraph: the reactive dataflow graph container.
//!
//! [`FlowGraph`] owns an insertion-ordered collection of [`BoxInstance`] and
//! a set of [`Link`] tuples, and implements the three pieces with real
//! invariants: structural add/remove, link validity checking, and the
//! downstream-propagation cascade that keeps every linked parameter
//! consistent after any edit.
//!
//! # Invariants
//!
//! - Box names are unique at any instant; insertion order is preserved for
//!   iteration and display.
//! - The link set is a true set: no duplicate tuple, stable insertion-order
//!   iteration (which makes cascade order reproducible).
//! - The link set is acyclic: [`add_link`](FlowGraph::add_link) rejects any
//!   edge that would close a directed cycle, so the recursive cascade always
//!   terminates.
//! - For every link, the destination parameter was last written either by a
//!   client edit or by propagation from the source's `produce()` value; the
//!   invariant is re-established synchronously by every mutating operation.
//!
//! Removing a box does *not* remove its incident links -- the command layer
//! is responsible for unlinking first. A link whose endpoint is gone is
//! treated as dead: lookups warn and move on, they never fail.

use indexmap::{IndexMap, IndexSet};
use petgraph::algo::has_path_connecting;
use petgraph::prelude::DiGraphMap;

use crate::error::GraphError;
use crate::instance::BoxInstance;
use crate::link::Link;
use crate::param::PortMode;
use crate::value::ParamValues;

/// The dataflow graph: boxes wired together by links.
#[derive(Debug, Clone, Default)]
pub struct FlowGraph {
    boxes: IndexMap<String, BoxInstance>,
    links: IndexSet<Link>,
}

impl FlowGraph {
    pub fn new() -> Self {
        FlowGraph {
            boxes: IndexMap::new(),
            links: IndexSet::new(),
        }
    }

    // -----------------------------------------------------------------------
    // Structural operations
    // -----------------------------------------------------------------------

    /// Adds a box to the graph.
    ///
    /// Fails with [`GraphError::DuplicateName`] if the name is taken; the
    /// graph is unchanged on failure.
    pub fn add_box(&mut self, instance: BoxInstance) -> Result<(), GraphError> {
        if self.boxes.contains_key(instance.name()) {
            return Err(GraphError::DuplicateName {
                name: instance.name().to_string(),
            });
        }
        self.boxes.insert(instance.name().to_string(), instance);
        Ok(())
    }

    /// Removes a box, returning it.
    ///
    /// Incident links are deliberately left in place -- the caller unlinks
    /// first, and any link it leaves behind dangles harmlessly.
    pub fn remove_box(&mut self, name: &str) -> Result<BoxInstance, GraphError> {
        self.boxes
            .shift_remove(name)
            .ok_or_else(|| GraphError::BoxNotFound {
                name: name.to_string(),
            })
    }

    /// Looks up a box by name.
    pub fn find_box(&self, name: &str) -> Option<&BoxInstance> {
        self.boxes.get(name)
    }

    /// Looks up a box by name (mutable, e.g. for action invocation).
    pub fn find_box_mut(&mut self, name: &str) -> Option<&mut BoxInstance> {
        self.boxes.get_mut(name)
    }

    /// All boxes, in insertion order.
    pub fn boxes(&self) -> impl Iterator<Item = &BoxInstance> {
        self.boxes.values()
    }

    /// All links, in insertion order.
    pub fn links(&self) -> impl Iterator<Item = &Link> {
        self.links.iter()
    }

    /// Links arriving at the named box.
    pub fn links_into<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Link> + 'a {
        self.links.iter().filter(move |l| l.dest == name)
    }

    /// Links leaving the named box.
    pub fn links_from<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Link> + 'a {
        self.links.iter().filter(move |l| l.src == name)
    }

    pub fn box_count(&self) -> usize {
        self.boxes.len()
    }

    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    // -----------------------------------------------------------------------
    // Link validity and creation
    // -----------------------------------------------------------------------

    /// Dry-run predicate: would this link be accepted?
    ///
    /// Pure -- the destination is never written. False when either endpoint
    /// is missing, the destination parameter is undeclared or hidden; true
    /// for untyped ports; otherwise the source's `produce()` value is
    /// checked against the destination descriptor.
    pub fn allowed_link(&self, link: &Link) -> bool {
        let Some(src) = self.boxes.get(&link.src) else {
            return false;
        };
        let Some(dest) = self.boxes.get(&link.dest) else {
            return false;
        };
        let Some(descriptor) = dest.params().get(&link.input) else {
            return false;
        };
        match descriptor.mode {
            PortMode::Hidden => false,
            PortMode::Untyped => true,
            PortMode::Normal => descriptor.validate(&link.input, &src.produce()).is_ok(),
        }
    }

    /// Returns `true` when inserting `candidate` would close a directed
    /// cycle, i.e. the source is already reachable from the destination.
    fn closes_cycle(&self, candidate: &Link) -> bool {
        if candidate.src == candidate.dest {
            return true;
        }
        let graph: DiGraphMap<&str, ()> = DiGraphMap::from_edges(
            self.links
                .iter()
                .map(|l| (l.src.as_str(), l.dest.as_str())),
        );
        if !graph.contains_node(candidate.dest.as_str())
            || !graph.contains_node(candidate.src.as_str())
        {
            return false;
        }
        has_path_connecting(
            &graph,
            candidate.dest.as_str(),
            candidate.src.as_str(),
            None,
        )
    }

    /// Validates and inserts a link, then propagates once by setting the
    /// destination parameter from the source's `produce()` value.
    ///
    /// Fails with [`GraphError::InvalidLink`] when the tuple already exists,
    /// an endpoint is missing, or the destination parameter rejects the
    /// source value; with [`GraphError::CycleDetected`] when the edge would
    /// close a cycle. The graph is unchanged on failure. Callers wanting the
    /// full downstream flush follow up with an empty-delta
    /// [`update_params`](Self::update_params) on the destination.
    pub fn add_link(&mut self, link: Link) -> Result<(), GraphError> {
        if self.links.contains(&link) {
            return Err(GraphError::InvalidLink {
                reason: format!("link already exists: {}", link),
            });
        }
        let Some(src) = self.boxes.get(&link.src) else {
            return Err(GraphError::InvalidLink {
                reason: format!("no source box '{}'", link.src),
            });
        };
        if !self.boxes.contains_key(&link.dest) {
            return Err(GraphError::InvalidLink {
                reason: format!("no destination box '{}'", link.dest),
            });
        }
        if self.closes_cycle(&link) {
            return Err(GraphError::CycleDetected {
                src: link.src,
                dest: link.dest,
            });
        }
        if !self.allowed_link(&link) {
            return Err(GraphError::InvalidLink {
                reason: format!("destination parameter rejects {}", link),
            });
        }

        // The one real assignment; validated above, so this cannot reject.
        let value = src.produce();
        let delta = ParamValues::from([(link.input.clone(), value)]);
        if let Some(dest) = self.boxes.get_mut(&link.dest) {
            dest.set_params(&delta)?;
        }
        self.links.insert(link);
        Ok(())
    }

    /// Removes a link and resets the destination parameter to its declared
    /// default.
    ///
    /// Fails with [`GraphError::LinkNotFound`] if the tuple is absent. A
    /// destination box that no longer exists downgrades the reset to a
    /// warning -- box removal outranks link consistency.
    pub fn remove_link(&mut self, link: &Link) -> Result<(), GraphError> {
        if !self.links.shift_remove(link) {
            return Err(GraphError::LinkNotFound { link: link.clone() });
        }
        match self.boxes.get_mut(&link.dest) {
            Some(dest) => {
                if !dest.reset_to_default(&link.input) {
                    tracing::warn!(link = %link, "removed link targeted an undeclared parameter");
                }
            }
            None => {
                tracing::warn!(link = %link, "removed link whose destination box is gone");
            }
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Downstream propagation
    // -----------------------------------------------------------------------

    /// Applies a (possibly empty) delta to the named box, then pushes its
    /// `produce()` value down every outgoing link, recursively.
    ///
    /// Returns the flat list of box names touched, parent before its own
    /// descendants, siblings in link insertion order. Diamond topologies
    /// yield one entry per distinct downstream path, so duplicates are
    /// possible; the order is reproducible because link iteration order is
    /// stable.
    ///
    /// A missing box is a warning, not an error: the name is still returned
    /// so caller logic composes uniformly. An invalid delta on the named box
    /// is an error and nothing runs. Downstream rejections (a value that
    /// drifted out of bounds after linking) halt only their own branch, at
    /// warning level -- sibling branches continue.
    ///
    /// Termination is guaranteed by the acyclic link set.
    pub fn update_params(
        &mut self,
        name: &str,
        delta: &ParamValues,
    ) -> Result<Vec<String>, GraphError> {
        let Some(instance) = self.boxes.get_mut(name) else {
            tracing::warn!(box_name = name, "update_params: no box with this name");
            return Ok(vec![name.to_string()]);
        };
        instance.set_params(delta)?;
        let value = instance.produce();

        let mut updated = vec![name.to_string()];
        let outgoing: Vec<Link> = self
            .links
            .iter()
            .filter(|l| l.src == name)
            .cloned()
            .collect();
        for link in outgoing {
            let step = ParamValues::from([(link.input.clone(), value.clone())]);
            match self.update_params(&link.dest, &step) {
                Ok(names) => updated.extend(names),
                Err(err) => {
                    tracing::warn!(link = %link, error = %err, "downstream update rejected; halting this branch");
                }
            }
        }
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use proptest::prelude::*;

    use super::*;
    use crate::boxtype::BoxType;
    use crate::param::ParamDescriptor;
    use crate::value::Value;

    // -- fixtures ----------------------------------------------------------

    fn constant_output(values: &ParamValues) -> Value {
        values["value"].clone()
    }

    fn double_output(values: &ParamValues) -> Value {
        Value::Number(values["x"].as_number().unwrap_or(0.0) * 2.0)
    }

    fn identity_output(values: &ParamValues) -> Value {
        values["x"].clone()
    }

    fn constant(name: &str, value: f64) -> BoxInstance {
        let bt = BoxType::new("Constant", "test")
            .with_param("value", ParamDescriptor::number(value).hidden())
            .with_output(constant_output);
        BoxInstance::new(Arc::new(bt), name)
    }

    fn doubler(name: &str) -> BoxInstance {
        let bt = BoxType::new("Double", "test")
            .with_param("x", ParamDescriptor::number(0.0))
            .with_output(double_output);
        BoxInstance::new(Arc::new(bt), name)
    }

    fn passthrough(name: &str) -> BoxInstance {
        let bt = BoxType::new("Identity", "test")
            .with_param("x", ParamDescriptor::number(0.0))
            .with_output(identity_output);
        BoxInstance::new(Arc::new(bt), name)
    }

    fn ratio_sink(name: &str) -> BoxInstance {
        let bt = BoxType::new("Ratio", "test")
            .with_param("ratio", ParamDescriptor::number(0.5).bounded(0.0, 1.0));
        BoxInstance::new(Arc::new(bt), name)
    }

    fn untyped_sink(name: &str) -> BoxInstance {
        let bt = BoxType::new("Anything", "test")
            .with_param("input", ParamDescriptor::number(0.0).untyped());
        BoxInstance::new(Arc::new(bt), name)
    }

    fn link(src: &str, dest: &str, input: &str) -> Link {
        Link::new(src, "", dest, input)
    }

    // -- structural --------------------------------------------------------

    #[test]
    fn find_box_returns_most_recently_added() {
        let mut g = FlowGraph::new();
        g.add_box(constant("a", 1.0)).unwrap();
        g.add_box(constant("b", 2.0)).unwrap();
        assert_eq!(g.find_box("a").unwrap().produce(), Value::Number(1.0));
        assert_eq!(g.find_box("b").unwrap().produce(), Value::Number(2.0));
        assert!(g.find_box("c").is_none());
    }

    #[test]
    fn duplicate_name_fails_without_mutating() {
        let mut g = FlowGraph::new();
        g.add_box(constant("a", 1.0)).unwrap();
        let result = g.add_box(constant("a", 9.0));
        assert!(matches!(result, Err(GraphError::DuplicateName { .. })));
        assert_eq!(g.box_count(), 1);
        // the original survives
        assert_eq!(g.find_box("a").unwrap().produce(), Value::Number(1.0));
    }

    #[test]
    fn boxes_iterate_in_insertion_order() {
        let mut g = FlowGraph::new();
        for name in ["z", "m", "a"] {
            g.add_box(constant(name, 0.0)).unwrap();
        }
        let names: Vec<&str> = g.boxes().map(|b| b.name()).collect();
        assert_eq!(names, ["z", "m", "a"]);
    }

    #[test]
    fn remove_box_leaves_links_dangling() {
        let mut g = FlowGraph::new();
        g.add_box(constant("a", 5.0)).unwrap();
        g.add_box(doubler("b")).unwrap();
        g.add_link(link("a", "b", "x")).unwrap();

        g.remove_box("a").unwrap();
        assert_eq!(g.link_count(), 1, "incident links are not auto-removed");

        // A cascade over the dead link warns and composes; nothing crashes.
        let updated = g.update_params("a", &ParamValues::new()).unwrap();
        assert_eq!(updated, vec!["a".to_string()]);
    }

    #[test]
    fn remove_missing_box_fails() {
        let mut g = FlowGraph::new();
        assert!(matches!(
            g.remove_box("ghost"),
            Err(GraphError::BoxNotFound { .. })
        ));
    }

    // -- link validity -----------------------------------------------------

    #[test]
    fn allowed_link_is_pure() {
        let mut g = FlowGraph::new();
        g.add_box(constant("big", 50.0)).unwrap();
        g.add_box(ratio_sink("r")).unwrap();

        // Rejected: 50 is outside the 0..=1 ratio bounds.
        assert!(!g.allowed_link(&link("big", "r", "ratio")));
        // The dry run must not have written anything.
        assert_eq!(g.find_box("r").unwrap().get("ratio"), Some(&Value::Number(0.5)));
    }

    #[test]
    fn rejected_link_adds_no_tuple() {
        let mut g = FlowGraph::new();
        g.add_box(constant("big", 50.0)).unwrap();
        g.add_box(ratio_sink("r")).unwrap();

        let result = g.add_link(link("big", "r", "ratio"));
        assert!(matches!(result, Err(GraphError::InvalidLink { .. })));
        assert_eq!(g.link_count(), 0);
    }

    #[test]
    fn allowed_link_respects_port_modes() {
        let mut g = FlowGraph::new();
        g.add_box(constant("c", 0.7)).unwrap();
        g.add_box(ratio_sink("r")).unwrap();
        g.add_box(untyped_sink("u")).unwrap();

        // In-range value into a normal port.
        assert!(g.allowed_link(&link("c", "r", "ratio")));
        // Hidden parameters are not ports.
        assert!(!g.allowed_link(&Link::new("r", "", "c", "value")));
        // Untyped ports take anything, including self-references.
        assert!(g.allowed_link(&Link::new("r", "", "u", "input")));
        // Undeclared parameter.
        assert!(!g.allowed_link(&link("c", "r", "volume")));
        // Missing endpoints.
        assert!(!g.allowed_link(&link("ghost", "r", "ratio")));
        assert!(!g.allowed_link(&link("c", "ghost", "ratio")));
    }

    #[test]
    fn add_link_propagates_once() {
        let mut g = FlowGraph::new();
        g.add_box(constant("a", 5.0)).unwrap();
        g.add_box(doubler("b")).unwrap();
        g.add_link(link("a", "b", "x")).unwrap();
        assert_eq!(g.find_box("b").unwrap().get("x"), Some(&Value::Number(5.0)));
    }

    #[test]
    fn duplicate_tuple_is_rejected() {
        let mut g = FlowGraph::new();
        g.add_box(constant("a", 5.0)).unwrap();
        g.add_box(doubler("b")).unwrap();
        g.add_link(link("a", "b", "x")).unwrap();
        assert!(matches!(
            g.add_link(link("a", "b", "x")),
            Err(GraphError::InvalidLink { .. })
        ));
        assert_eq!(g.link_count(), 1);
    }

    #[test]
    fn self_reference_output_feeds_untyped_port() {
        let mut g = FlowGraph::new();
        let silent = BoxType::new("Silent", "test").with_param("level", ParamDescriptor::number(0.0));
        g.add_box(BoxInstance::new(Arc::new(silent), "s")).unwrap();
        g.add_box(untyped_sink("u")).unwrap();

        g.add_link(link("s", "u", "input")).unwrap();
        assert_eq!(
            g.find_box("u").unwrap().get("input"),
            Some(&Value::BoxRef { name: "s".into() })
        );
        // The same self-reference is rejected by a typed port.
        g.add_box(ratio_sink("r")).unwrap();
        assert!(!g.allowed_link(&link("s", "r", "ratio")));
    }

    // -- cycles ------------------------------------------------------------

    #[test]
    fn cycle_closing_link_is_rejected() {
        let mut g = FlowGraph::new();
        g.add_box(passthrough("a")).unwrap();
        g.add_box(passthrough("b")).unwrap();
        g.add_box(passthrough("c")).unwrap();
        g.add_link(link("a", "b", "x")).unwrap();
        g.add_link(link("b", "c", "x")).unwrap();

        let result = g.add_link(link("c", "a", "x"));
        match result {
            Err(GraphError::CycleDetected { src, dest }) => {
                assert_eq!(src, "c");
                assert_eq!(dest, "a");
            }
            other => panic!("expected CycleDetected, got {other:?}"),
        }
        assert_eq!(g.link_count(), 2);
    }

    #[test]
    fn self_loop_is_rejected() {
        let mut g = FlowGraph::new();
        g.add_box(passthrough("a")).unwrap();
        assert!(matches!(
            g.add_link(link("a", "a", "x")),
            Err(GraphError::CycleDetected { .. })
        ));
    }

    #[test]
    fn parallel_paths_are_not_cycles() {
        let mut g = FlowGraph::new();
        g.add_box(constant("src", 1.0)).unwrap();
        g.add_box(doubler("mid")).unwrap();
        let sink = BoxType::new("Sum", "test")
            .with_param("lhs", ParamDescriptor::number(0.0))
            .with_param("rhs", ParamDescriptor::number(0.0));
        g.add_box(BoxInstance::new(Arc::new(sink), "sink")).unwrap();

        g.add_link(link("src", "mid", "x")).unwrap();
        g.add_link(link("src", "sink", "lhs")).unwrap();
        // Diamond: src -> mid -> sink and src -> sink. No cycle.
        g.add_link(link("mid", "sink", "rhs")).unwrap();
        assert_eq!(g.link_count(), 3);
    }

    // -- link removal ------------------------------------------------------

    #[test]
    fn remove_link_restores_declared_default() {
        let mut g = FlowGraph::new();
        g.add_box(constant("a", 5.0)).unwrap();
        g.add_box(doubler("b")).unwrap();
        let l = link("a", "b", "x");
        g.add_link(l.clone()).unwrap();
        assert_eq!(g.find_box("b").unwrap().get("x"), Some(&Value::Number(5.0)));

        g.remove_link(&l).unwrap();
        assert_eq!(g.link_count(), 0);
        // Declared default of Double.x is 0, regardless of the propagated 5.
        assert_eq!(g.find_box("b").unwrap().get("x"), Some(&Value::Number(0.0)));
    }

    #[test]
    fn remove_then_relink_is_idempotent() {
        let mut g = FlowGraph::new();
        g.add_box(constant("a", 5.0)).unwrap();
        g.add_box(doubler("b")).unwrap();
        let l = link("a", "b", "x");

        g.add_link(l.clone()).unwrap();
        let first = g.find_box("b").unwrap().get("x").cloned();
        g.remove_link(&l).unwrap();
        g.add_link(l.clone()).unwrap();
        assert_eq!(g.find_box("b").unwrap().get("x").cloned(), first);
    }

    #[test]
    fn remove_missing_link_fails() {
        let mut g = FlowGraph::new();
        assert!(matches!(
            g.remove_link(&link("a", "b", "x")),
            Err(GraphError::LinkNotFound { .. })
        ));
    }

    #[test]
    fn remove_link_with_dead_destination_warns_not_errors() {
        let mut g = FlowGraph::new();
        g.add_box(constant("a", 5.0)).unwrap();
        g.add_box(doubler("b")).unwrap();
        let l = link("a", "b", "x");
        g.add_link(l.clone()).unwrap();
        g.remove_box("b").unwrap();
        // Destination is gone; removal still succeeds.
        g.remove_link(&l).unwrap();
        assert_eq!(g.link_count(), 0);
    }

    // -- propagation -------------------------------------------------------

    #[test]
    fn constant_into_doubler_scenario() {
        let mut g = FlowGraph::new();
        g.add_box(constant("A", 5.0)).unwrap();
        g.add_box(doubler("B")).unwrap();
        g.add_link(link("A", "B", "x")).unwrap();

        let updated = g.update_params("A", &ParamValues::new()).unwrap();
        assert_eq!(updated, vec!["A".to_string(), "B".to_string()]);
        assert_eq!(g.find_box("B").unwrap().produce(), Value::Number(10.0));
    }

    #[test]
    fn delta_applies_before_cascade() {
        let mut g = FlowGraph::new();
        g.add_box(constant("A", 5.0)).unwrap();
        g.add_box(doubler("B")).unwrap();
        g.add_link(link("A", "B", "x")).unwrap();

        let delta = ParamValues::from([("value".to_string(), Value::Number(7.0))]);
        g.update_params("A", &delta).unwrap();
        assert_eq!(g.find_box("B").unwrap().produce(), Value::Number(14.0));
    }

    #[test]
    fn invalid_delta_is_an_error_and_nothing_runs() {
        let mut g = FlowGraph::new();
        g.add_box(ratio_sink("r")).unwrap();
        let delta = ParamValues::from([("ratio".to_string(), Value::Number(2.0))]);
        assert!(g.update_params("r", &delta).is_err());
        assert_eq!(g.find_box("r").unwrap().get("ratio"), Some(&Value::Number(0.5)));
    }

    #[test]
    fn cascade_visits_parent_before_children() {
        let mut g = FlowGraph::new();
        g.add_box(constant("root", 1.0)).unwrap();
        g.add_box(passthrough("left")).unwrap();
        g.add_box(passthrough("right")).unwrap();
        g.add_box(passthrough("leaf")).unwrap();
        g.add_link(link("root", "left", "x")).unwrap();
        g.add_link(link("root", "right", "x")).unwrap();
        g.add_link(link("left", "leaf", "x")).unwrap();

        let updated = g.update_params("root", &ParamValues::new()).unwrap();
        // Parent first, siblings in link insertion order, descendants after
        // their own parent.
        assert_eq!(updated, ["root", "left", "leaf", "right"]);
    }

    #[test]
    fn diamond_yields_one_entry_per_path() {
        let mut g = FlowGraph::new();
        g.add_box(constant("src", 1.0)).unwrap();
        g.add_box(passthrough("mid")).unwrap();
        let sum = BoxType::new("Sum", "test")
            .with_param("lhs", ParamDescriptor::number(0.0))
            .with_param("rhs", ParamDescriptor::number(0.0));
        g.add_box(BoxInstance::new(Arc::new(sum), "sink")).unwrap();
        g.add_link(link("src", "mid", "x")).unwrap();
        g.add_link(link("src", "sink", "lhs")).unwrap();
        g.add_link(link("mid", "sink", "rhs")).unwrap();

        let updated = g.update_params("src", &ParamValues::new()).unwrap();
        assert_eq!(updated, ["src", "mid", "sink", "sink"]);
    }

    #[test]
    fn out_of_bounds_downstream_halts_only_its_branch() {
        let mut g = FlowGraph::new();
        g.add_box(constant("src", 0.5)).unwrap();
        g.add_box(ratio_sink("narrow")).unwrap();
        g.add_box(doubler("wide")).unwrap();
        g.add_link(link("src", "narrow", "ratio")).unwrap();
        g.add_link(link("src", "wide", "x")).unwrap();

        // Push the source beyond the narrow sink's bounds.
        let delta = ParamValues::from([("value".to_string(), Value::Number(5.0))]);
        let updated = g.update_params("src", &delta).unwrap();
        // narrow rejected 5.0 and is absent; wide took it.
        assert_eq!(updated, ["src", "wide"]);
        assert_eq!(g.find_box("narrow").unwrap().get("ratio"), Some(&Value::Number(0.5)));
        assert_eq!(g.find_box("wide").unwrap().produce(), Value::Number(10.0));
    }

    #[test]
    fn missing_box_returns_its_own_name() {
        let mut g = FlowGraph::new();
        let updated = g.update_params("ghost", &ParamValues::new()).unwrap();
        assert_eq!(updated, vec!["ghost".to_string()]);
    }

    proptest! {
        /// A linear chain propagates the root value to the tail and visits
        /// every box exactly once, root first.
        #[test]
        fn chain_cascade_visits_reachable_set(len in 1usize..8, root in 0.0f64..100.0) {
            let mut g = FlowGraph::new();
            g.add_box(constant("c0", root)).unwrap();
            for i in 1..len {
                g.add_box(passthrough(&format!("c{i}"))).unwrap();
                g.add_link(link(&format!("c{}", i - 1), &format!("c{i}"), "x")).unwrap();
            }

            let updated = g.update_params("c0", &ParamValues::new()).unwrap();
            let expected: Vec<String> = (0..len).map(|i| format!("c{i}")).collect();
            prop_assert_eq!(updated, expected);

            let tail = g.find_box(&format!("c{}", len - 1)).unwrap();
            prop_assert_eq!(tail.produce(), Value::Number(root));
        }
    }
}
