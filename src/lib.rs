//! Core library for Tilemeta, a tileset metadata editor.
//! Models a sparse grid of tiles carrying typed properties and tags, keeps them in
//! line with a mutable property schema, and reads/writes the JSON document consumed
//! by level-building pipelines.

pub mod codec;
mod document;
pub mod grid;
mod property;
pub mod schema;
mod session;
pub mod statics;
pub mod tile;

pub use codec::{CodecError, CodecWarning};
pub use document::{DocumentFormat, TilesetDocument};
pub use grid::{GridColor, GridConfig, GridProfile};
pub use property::{PropertyType, PropertyValue};
pub use schema::{PropertyDefinition, PropertySchema};
pub use session::{EditorSession, ExportSink, FileSessionStore, SessionStore};
pub use tile::{TileCoord, TileMap, TileRecord};
