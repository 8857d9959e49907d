//! # tidepool-io
//!
//! Input boundary of the Tidepool simulation.
//!
//! - [`obj`]: Wavefront OBJ text reader producing a [`PolyMesh`](tidepool_mesh::PolyMesh).
//! - [`contract`]: The serializable scene configuration ([`SceneConfig`]).
//! - [`validator`]: Range checks run before anything reaches a simulator.

pub mod contract;
pub mod obj;
pub mod validator;

pub use contract::{CollisionMode, SceneConfig};
pub use obj::{load_obj, parse_obj};
pub use validator::{validate_body_mesh, validate_scene};
