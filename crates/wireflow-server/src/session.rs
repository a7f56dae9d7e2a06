//! The command layer: one session per connected client.
//!
//! [`CommandSession`] owns a private [`FlowGraph`] and translates inbound
//! protocol commands into graph operations, returning the ordered outbound
//! events the transport should send. Dispatch is deliberately thin -- the
//! engine holds the invariants; this layer decides which boxes to re-send
//! and turns rejections into protocol events or warnings.

use std::sync::Arc;

use indexmap::IndexSet;

use wireflow_core::{Catalog, FlowGraph, Link, ParamValues};

use crate::schema::{self, ClientCommand, ServerEvent};

/// Per-connection command dispatcher over a private graph.
pub struct CommandSession {
    catalog: Arc<Catalog>,
    graph: FlowGraph,
}

impl CommandSession {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        CommandSession {
            catalog,
            graph: FlowGraph::new(),
        }
    }

    /// Read access to the session's graph (tests, embedders).
    pub fn graph(&self) -> &FlowGraph {
        &self.graph
    }

    /// The `definitions` event pushed once on connect.
    pub fn definitions(&self) -> ServerEvent {
        ServerEvent::Definitions {
            definitions: schema::definitions(&self.catalog),
        }
    }

    /// Applies one inbound command, returning the events to send back.
    pub fn dispatch(&mut self, command: ClientCommand) -> Vec<ServerEvent> {
        match command {
            ClientCommand::AddNode {
                type_name,
                name,
                params,
            } => self.add_node(&type_name, &name, &params),
            ClientCommand::RemoveNode { name } => self.remove_node(&name),
            ClientCommand::AddEdge {
                src,
                output,
                dest,
                input,
            } => self.add_edge(Link::new(src, output, dest, input)),
            ClientCommand::RemoveEdge {
                src,
                output,
                dest,
                input,
            } => self.remove_edge(&Link::new(src, output, dest, input)),
            ClientCommand::UpdateParams { name, params } => self.update_params(&name, &params),
            ClientCommand::TriggerButton { name, button } => self.trigger_button(&name, &button),
        }
    }

    fn add_node(&mut self, type_name: &str, name: &str, params: &ParamValues) -> Vec<ServerEvent> {
        let instance = match self.catalog.instantiate(type_name, name, params) {
            Ok(instance) => instance,
            Err(err) => {
                tracing::warn!(type_name, box_name = name, %err, "add_node rejected");
                return Vec::new();
            }
        };
        if let Err(err) = self.graph.add_box(instance) {
            tracing::warn!(box_name = name, %err, "add_node rejected");
            return Vec::new();
        }
        self.value_updates([name.to_string()])
    }

    fn remove_node(&mut self, name: &str) -> Vec<ServerEvent> {
        // The engine leaves incident links dangling, so unlink here first;
        // destinations fed by the removed box fall back to their defaults
        // and need a downstream flush.
        let incident: Vec<Link> = self
            .graph
            .links()
            .filter(|l| l.src == name || l.dest == name)
            .cloned()
            .collect();
        let mut reset_dests = Vec::new();
        for link in incident {
            let feeds_downstream = link.src == name;
            if let Err(err) = self.graph.remove_link(&link) {
                tracing::warn!(link = %link, %err, "remove_node: could not unlink");
            } else if feeds_downstream {
                reset_dests.push(link.dest);
            }
        }
        if let Err(err) = self.graph.remove_box(name) {
            tracing::warn!(box_name = name, %err, "remove_node rejected");
            return Vec::new();
        }
        let mut touched = Vec::new();
        for dest in reset_dests {
            match self.graph.update_params(&dest, &ParamValues::new()) {
                Ok(names) => touched.extend(names),
                Err(err) => {
                    tracing::warn!(box_name = %dest, %err, "remove_node: downstream flush failed")
                }
            }
        }
        self.value_updates(touched)
    }

    fn add_edge(&mut self, link: Link) -> Vec<ServerEvent> {
        match self.graph.add_link(link.clone()) {
            Ok(()) => self.flush(&link.dest),
            Err(err) => {
                tracing::warn!(link = %link, %err, "proposed edge is invalid");
                vec![ServerEvent::InvalidEdge {
                    src: link.src,
                    output: link.output,
                    dest: link.dest,
                    input: link.input,
                }]
            }
        }
    }

    fn remove_edge(&mut self, link: &Link) -> Vec<ServerEvent> {
        if let Err(err) = self.graph.remove_link(link) {
            tracing::warn!(link = %link, %err, "remove_edge rejected");
            return Vec::new();
        }
        self.flush(&link.dest)
    }

    fn update_params(&mut self, name: &str, params: &ParamValues) -> Vec<ServerEvent> {
        match self.graph.update_params(name, params) {
            Ok(names) => self.value_updates(names),
            Err(err) => {
                tracing::warn!(box_name = name, %err, "update_params rejected");
                // Nothing was applied; re-send the box so the client's
                // widgets fall back to the real state.
                self.value_updates([name.to_string()])
            }
        }
    }

    fn trigger_button(&mut self, name: &str, button: &str) -> Vec<ServerEvent> {
        let Some(instance) = self.graph.find_box_mut(name) else {
            tracing::warn!(box_name = name, "trigger_button: no box with this name");
            return Vec::new();
        };
        if let Err(err) = instance.invoke(button) {
            tracing::warn!(box_name = name, button, %err, "trigger_button rejected");
            return Vec::new();
        }
        self.flush(name)
    }

    /// Empty-delta cascade from `name`, turned into value updates.
    fn flush(&mut self, name: &str) -> Vec<ServerEvent> {
        match self.graph.update_params(name, &ParamValues::new()) {
            Ok(names) => self.value_updates(names),
            Err(err) => {
                tracing::warn!(box_name = name, %err, "downstream flush failed");
                Vec::new()
            }
        }
    }

    /// One `value_update` per distinct surviving box, in visitation order.
    fn value_updates(&self, names: impl IntoIterator<Item = String>) -> Vec<ServerEvent> {
        let mut seen = IndexSet::new();
        let mut events = Vec::new();
        for name in names {
            if !seen.insert(name.clone()) {
                continue;
            }
            if let Some(instance) = self.graph.find_box(&name) {
                events.push(ServerEvent::ValueUpdate {
                    display: instance.boxtype().display(instance.values()),
                    name,
                });
            }
        }
        events
    }
}
