//! Core database trait for diagram model storage
//!
//! This trait defines the interface for storing and reading a parsed diagram
//! model. Each diagram format implements it with its own node and edge types.

use anyhow::Result;

/// Core trait for diagram databases
///
/// Nodes are the primary entities of a diagram (classes for a class
/// diagram). Edges are the relationships that survive parsing; they may be
/// stored inside their owning node rather than in a separate list.
pub trait Database: Send + Sync {
    /// The node data type for this database
    type Node: Clone + Send + Sync;

    /// The edge data type for this database
    type Edge: Clone + Send + Sync;

    /// Add a node to the database
    fn add_node(&mut self, node: Self::Node) -> Result<()>;

    /// Get a node by name
    fn get_node(&self, name: &str) -> Option<&Self::Node>;

    /// Iterate over all nodes in insertion order
    fn nodes(&self) -> impl Iterator<Item = &Self::Node>;

    /// Iterate over all edges
    fn edges(&self) -> impl Iterator<Item = &Self::Edge>;

    /// Clear all data from the database
    fn clear(&mut self);

    /// Get the number of nodes
    fn node_count(&self) -> usize;

    /// Get the number of edges
    fn edge_count(&self) -> usize;
}
