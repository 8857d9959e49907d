//! # tidepool-mesh
//!
//! Polygon mesh representation and the pure geometry transforms the
//! simulation needs before and after each step.
//!
//! ## Key Types
//!
//! - [`PolyMesh`]: Positions, variable-length faces, and optional
//!   texcoord/normal attributes with their own per-face index lists.
//! - [`BoundingBox`]: Axis-aligned bounds used to place a loaded mesh.
//! - [`Topology`]: Unique undirected edges (the spring network source).
//! - [`TriangleBuffers`] / [`IndexedBuffers`]: Fan-triangulated arrays
//!   handed to a renderer.
//! - Procedural generators (quad grids, welded UV spheres).

pub mod bounds;
pub mod buffers;
pub mod generators;
pub mod mesh;
pub mod normals;
pub mod topology;

pub use bounds::BoundingBox;
pub use buffers::{IndexedBuffers, TriangleBuffers};
pub use mesh::{FaceAttribute, PolyMesh};
pub use topology::Topology;
