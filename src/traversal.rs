//! Depth-first counting over small static state spaces.
//!
//! Both engines walk an immutable structure and cache the count reachable from each state, so
//! overlapping branches are only explored once.

pub mod graph;
pub mod grid;

pub use graph::{Graph, GraphError, TargetedSearch};
pub use grid::{Cell, Grid, GridError, PathCounter};
