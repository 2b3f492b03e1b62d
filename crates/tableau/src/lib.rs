//! # Tableau — Scene Document Model for a 2D Card-Game Engine
//!
//! An in-memory scene graph (flat list of entities, each holding a set of
//! named components) plus a bidirectional codec to the engine's
//! human-readable, indentation-significant text format.
//!
//! Rendering, physics, input, and game rules live elsewhere — this crate is
//! the persistence core that an editor and a runtime share. Start with
//! `use tableau::prelude::*`, build a [`Scene`](scene::Scene), and encode it
//! through a [`ComponentRegistry`](registry::ComponentRegistry).

pub mod components;
pub mod document;
pub mod entity;
pub mod error;
pub mod math;
pub mod prelude;
pub mod project;
pub mod registry;
pub mod scene;
