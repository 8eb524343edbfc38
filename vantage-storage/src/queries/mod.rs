//! Query modules for the mirrored graph tables.

pub mod deep_paths;
pub mod edges;
pub mod nodes;
