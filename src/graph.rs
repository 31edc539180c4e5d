use crate::app::stream::ClassEvent;
use crate::domain::dependency::DependencyKind;
use crate::domain::report::{ClassReport, ProjectReport};
use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use std::collections::HashMap;
use std::fmt::Write as _;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeRole {
    Package,
    Class,
    /// Referenced type with no compilation unit of its own in the graph
    External,
}

#[derive(Debug, Clone)]
pub struct NodeData {
    pub name: String,
    pub role: NodeRole,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeData {
    /// Package to one of its classes
    Contains,
    /// Class to a referenced type; `None` for stream imports
    DependsOn(Option<DependencyKind>),
}

/// Package / class / dependency graph, built from reports or stream events
#[derive(Debug, Default)]
pub struct DependencyGraph {
    pub graph: DiGraph<NodeData, EdgeData>,
    name_to_node: HashMap<String, NodeIndex>,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_project(report: &ProjectReport) -> Self {
        let mut graph = Self::new();
        for package in report.package_reports() {
            for class in package.class_reports() {
                graph.add_class_report(class);
            }
        }
        graph
    }

    pub fn from_events<'a>(events: impl IntoIterator<Item = &'a ClassEvent>) -> Self {
        let mut graph = Self::new();
        for event in events {
            graph.add_event(event);
        }
        graph
    }

    pub fn add_class_report(&mut self, report: &ClassReport) {
        let class = self.add_class(report.class_name());
        for dep in report.sorted_dependencies() {
            let target = self.get_or_create_node(&dep.target_type, NodeRole::External);
            self.add_edge_once(class, target, EdgeData::DependsOn(Some(dep.kind)));
        }
    }

    pub fn add_event(&mut self, event: &ClassEvent) {
        let class = self.add_class(&event.class_name);
        for import in &event.imports {
            let target = self.get_or_create_node(import, NodeRole::External);
            self.add_edge_once(class, target, EdgeData::DependsOn(None));
        }
    }

    pub fn node(&self, name: &str) -> Option<&NodeData> {
        self.name_to_node.get(name).map(|&idx| &self.graph[idx])
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Names of the types `class` depends on, sorted.
    pub fn dependencies_of(&self, class: &str) -> Vec<&str> {
        self.neighbours(class, Direction::Outgoing, |edge| {
            matches!(edge, EdgeData::DependsOn(_))
        })
    }

    /// Names of the classes that depend on `target`, sorted.
    pub fn dependents_of(&self, target: &str) -> Vec<&str> {
        self.neighbours(target, Direction::Incoming, |edge| {
            matches!(edge, EdgeData::DependsOn(_))
        })
    }

    /// Graphviz rendering; packages are boxes, external types dashed.
    pub fn to_dot(&self) -> String {
        let mut out = String::from("digraph dependencies {\n    rankdir=LR;\n");
        for idx in self.graph.node_indices() {
            let node = &self.graph[idx];
            let style = match node.role {
                NodeRole::Package => "shape=box, style=filled, fillcolor=lightgrey",
                NodeRole::Class => "shape=ellipse",
                NodeRole::External => "shape=ellipse, style=dashed",
            };
            let _ = writeln!(out, "    n{} [label=\"{}\", {style}];", idx.index(), escape(&node.name));
        }
        for edge in self.graph.edge_indices() {
            let Some((from, to)) = self.graph.edge_endpoints(edge) else {
                continue;
            };
            let attrs = match self.graph[edge] {
                EdgeData::Contains => "style=dotted, arrowhead=none".to_string(),
                EdgeData::DependsOn(Some(kind)) => format!("label=\"{kind}\""),
                EdgeData::DependsOn(None) => String::new(),
            };
            let _ = writeln!(out, "    n{} -> n{} [{attrs}];", from.index(), to.index());
        }
        out.push_str("}\n");
        out
    }

    fn add_class(&mut self, class_name: &str) -> NodeIndex {
        let package = package_of(class_name);
        let package_idx = self.get_or_create_node(package, NodeRole::Package);
        let class_idx = self.get_or_create_node(class_name, NodeRole::Class);
        // A type first seen as a dependency target becomes a class once analysed.
        self.graph[class_idx].role = NodeRole::Class;
        self.add_edge_once(package_idx, class_idx, EdgeData::Contains);
        class_idx
    }

    fn get_or_create_node(&mut self, name: &str, role: NodeRole) -> NodeIndex {
        if let Some(&idx) = self.name_to_node.get(name) {
            return idx;
        }
        let idx = self.graph.add_node(NodeData {
            name: name.to_string(),
            role,
        });
        self.name_to_node.insert(name.to_string(), idx);
        idx
    }

    fn add_edge_once(&mut self, from: NodeIndex, to: NodeIndex, data: EdgeData) {
        if from == to {
            return;
        }
        let exists = self
            .graph
            .edges_connecting(from, to)
            .any(|edge| *edge.weight() == data);
        if !exists {
            self.graph.add_edge(from, to, data);
        }
    }

    fn neighbours(
        &self,
        name: &str,
        direction: Direction,
        keep: impl Fn(&EdgeData) -> bool,
    ) -> Vec<&str> {
        let Some(&idx) = self.name_to_node.get(name) else {
            return Vec::new();
        };
        let mut names: Vec<&str> = self
            .graph
            .edges_directed(idx, direction)
            .filter(|edge| keep(edge.weight()))
            .map(|edge| {
                let other = match direction {
                    Direction::Outgoing => edge.target(),
                    Direction::Incoming => edge.source(),
                };
                self.graph[other].name.as_str()
            })
            .collect();
        names.sort_unstable();
        names.dedup();
        names
    }
}

/// Package part of a class name; `default` when unqualified.
fn package_of(class_name: &str) -> &str {
    class_name
        .rsplit_once('.')
        .map(|(package, _)| package)
        .unwrap_or("default")
}

fn escape(label: &str) -> String {
    label.replace('\\', "\\\\").replace('"', "\\\"")
}
