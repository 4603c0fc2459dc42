pub mod tables;

pub use tables::{ClusterAssignment, ClusterSpecies, NcbiMetadata};
