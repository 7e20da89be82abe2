use crate::{
    property::PropertyType,
    tile::TileMap,
};
use indexmap::IndexMap;
use serde::Deserialize;

/// One recognized property, as listed under `Properties` in a document. Two
/// definitions are equal only when name and type match.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PropertyDefinition {
    pub name: String,
    #[serde(rename = "Type")]
    pub ty: PropertyType,
}

impl PropertyDefinition {
    pub fn new(name: impl Into<String>, ty: PropertyType) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

/// The set of property names a document recognizes, in insertion order.
/// Names are unique; re-adding a name replaces its type and moves it to the end.
///
/// Tiles keep their own copies of values, so every mutation that should reach the
/// tiles takes the [`TileMap`] explicitly.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertySchema {
    definitions: IndexMap<String, PropertyType>,
}

impl PropertySchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.definitions.contains_key(name)
    }

    pub fn type_of(&self, name: &str) -> Option<PropertyType> {
        self.definitions.get(name).copied()
    }

    pub fn definitions(&self) -> impl Iterator<Item = PropertyDefinition> + '_ {
        self.definitions
            .iter()
            .map(|(name, ty)| PropertyDefinition::new(name.clone(), *ty))
    }

    /// Register `name` as `ty`. Empty names are ignored. Tiles are not touched.
    pub fn add(&mut self, name: &str, ty: PropertyType) -> bool {
        if name.is_empty() {
            return false;
        }
        self.definitions.shift_remove(name);
        self.definitions.insert(name.to_string(), ty);
        true
    }

    /// Replace `old` with `new: ty` and move every tile's `old` value under `new`.
    /// Values are not converted here; [`PropertySchema::apply_global_defaults`] does that.
    pub fn rename(&mut self, old: &str, new: &str, ty: PropertyType, tiles: &mut TileMap) -> bool {
        if new.is_empty() {
            return false;
        }
        self.definitions.shift_remove(old);
        self.definitions.shift_remove(new);
        self.definitions.insert(new.to_string(), ty);

        if old.is_empty() {
            return true;
        }
        let mut moved = 0usize;
        for tile in tiles.iter_mut() {
            if tile.rename_property(old, new) {
                moved += 1;
            }
        }
        log::debug!("renamed property {old} -> {new}: {ty}, moved on {moved} tile(s)");
        true
    }

    /// Drop `name` from the schema and from every tile, including any tag spelled
    /// the same way.
    pub fn delete(&mut self, name: &str, tiles: &mut TileMap) {
        self.definitions.shift_remove(name);
        for tile in tiles.iter_mut() {
            tile.remove(name);
            tile.tags.retain(|t| t != name);
        }
        log::debug!("deleted property {name}");
    }

    /// Bring every tile in line with the schema: each defined property is present and
    /// holds a value of the defined type. Existing values of the right type are kept.
    pub fn apply_global_defaults(&self, tiles: &mut TileMap) {
        for tile in tiles.iter_mut() {
            for (name, ty) in &self.definitions {
                tile.ensure_property(name, *ty);
            }
        }
    }
}

impl FromIterator<PropertyDefinition> for PropertySchema {
    fn from_iter<I: IntoIterator<Item = PropertyDefinition>>(iter: I) -> Self {
        let mut schema = PropertySchema::new();
        for def in iter {
            schema.add(&def.name, def.ty);
        }
        schema
    }
}
