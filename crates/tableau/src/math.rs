//! Math types and glam re-exports.
//!
//! We re-export [glam](https://docs.rs/glam) vector types so users don't need
//! to depend on it directly. Component fields use these directly; they
//! serialize as bracketed sequences (`[x, y, z]`) in the scene format.

pub use glam::{Vec2, Vec3, Vec4};
