use crate::property::{PropertyType, PropertyValue};
use indexmap::IndexMap;
use std::fmt;

/// Grid cell address. Columns grow to the right, rows grow downwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileCoord {
    pub col: i32,
    pub row: i32,
}

impl TileCoord {
    pub fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }
}

impl fmt::Display for TileCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.col, self.row)
    }
}

/// The sparse property/tag bag of one grid cell.
///
/// Each property name maps to exactly one typed value, so the type of a property on
/// this tile is always the type of the value it holds.
#[derive(Debug, Clone, PartialEq)]
pub struct TileRecord {
    pub coord: TileCoord,
    pub name: Option<String>,
    pub tags: Vec<String>,
    values: IndexMap<String, PropertyValue>,
}

impl TileRecord {
    pub fn new(coord: TileCoord) -> Self {
        Self {
            coord,
            name: None,
            tags: Vec::new(),
            values: IndexMap::new(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&PropertyValue> {
        self.values.get(name)
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<PropertyValue>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn remove(&mut self, name: &str) -> Option<PropertyValue> {
        self.values.shift_remove(name)
    }

    pub fn property_type(&self, name: &str) -> Option<PropertyType> {
        self.values.get(name).map(PropertyValue::property_type)
    }

    /// Properties in the order they were first set on this tile.
    pub fn properties(&self) -> impl Iterator<Item = (&str, &PropertyValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Move `old`'s value under `new`, keeping its position. A value already held
    /// under `new` is replaced. Returns false when the tile has no `old` entry.
    pub fn rename_property(&mut self, old: &str, new: &str) -> bool {
        if old == new {
            return self.values.contains_key(old);
        }
        if !self.values.contains_key(old) {
            return false;
        }
        self.values.shift_remove(new);
        let Some(idx) = self.values.get_index_of(old) else {
            return false;
        };
        let Some((_, value)) = self.values.shift_remove_index(idx) else {
            return false;
        };
        self.values.shift_insert(idx, new.to_string(), value);
        true
    }

    /// Make sure this tile carries `name` as a `ty` value. Missing entries get the
    /// zero value; entries of another type are coerced. Matching entries stay as-is.
    pub fn ensure_property(&mut self, name: &str, ty: PropertyType) {
        match self.values.get_mut(name) {
            Some(value) if value.property_type() == ty => {}
            Some(value) => {
                log::debug!(
                    "coercing {name} on tile {} from {} to {ty}",
                    self.coord,
                    value.property_type()
                );
                *value = value.coerce_to(ty);
            }
            None => {
                self.values.insert(name.to_string(), ty.zero_value());
            }
        }
    }

    /// True when the tile has anything worth exporting.
    pub fn has_content(&self) -> bool {
        self.name.as_deref().is_some_and(|n| !n.trim().is_empty())
            || !self.tags.is_empty()
            || self.values.values().any(|v| !v.is_default())
    }

    /// Take over `source`'s values and tags. The tile keeps its own coordinate and name.
    pub fn copy_contents_from(&mut self, source: &TileRecord) {
        self.values = source.values.clone();
        self.tags = source.tags.clone();
    }
}

/// Sparse grid of tile records, created lazily on first touch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TileMap {
    tiles: IndexMap<TileCoord, TileRecord>,
}

impl TileMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn get(&self, coord: TileCoord) -> Option<&TileRecord> {
        self.tiles.get(&coord)
    }

    pub fn get_mut(&mut self, coord: TileCoord) -> Option<&mut TileRecord> {
        self.tiles.get_mut(&coord)
    }

    pub fn get_or_create(&mut self, coord: TileCoord) -> &mut TileRecord {
        self.tiles
            .entry(coord)
            .or_insert_with(|| TileRecord::new(coord))
    }

    /// Insert `record` at its own coordinate, returning whatever was there before.
    pub fn insert(&mut self, record: TileRecord) -> Option<TileRecord> {
        self.tiles.insert(record.coord, record)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TileRecord> {
        self.tiles.values()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut TileRecord> {
        self.tiles.values_mut()
    }

    /// Every cell of the inclusive rectangle spanned by `anchor` and `target`,
    /// column by column. Missing cells are created.
    pub fn select_range(&mut self, anchor: TileCoord, target: TileCoord) -> Vec<TileCoord> {
        let (c0, c1) = (anchor.col.min(target.col), anchor.col.max(target.col));
        let (r0, r1) = (anchor.row.min(target.row), anchor.row.max(target.row));

        let mut coords = Vec::new();
        for col in c0..=c1 {
            for row in r0..=r1 {
                let coord = TileCoord::new(col, row);
                self.get_or_create(coord);
                coords.push(coord);
            }
        }
        coords
    }

    /// Content-bearing tiles sorted by row, then column.
    pub fn export_snapshot(&self) -> Vec<&TileRecord> {
        let mut tiles: Vec<&TileRecord> = self.tiles.values().filter(|t| t.has_content()).collect();
        tiles.sort_by_key(|t| (t.coord.row, t.coord.col));
        tiles
    }

    /// Batch edit: the first selected tile overwrites the values and tags of every
    /// other selected tile. Nothing is merged.
    pub fn sync_selection(&mut self, selection: &[TileCoord]) {
        let Some((first, rest)) = selection.split_first() else {
            return;
        };
        let Some(source) = self.tiles.get(first).cloned() else {
            return;
        };
        for coord in rest.iter().filter(|c| *c != first) {
            self.get_or_create(*coord).copy_contents_from(&source);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{TileCoord, TileMap, TileRecord};
    use crate::property::{PropertyType, PropertyValue};

    fn at(col: i32, row: i32) -> TileCoord {
        TileCoord::new(col, row)
    }

    #[test]
    fn get_or_create_returns_the_same_record() {
        let mut map = TileMap::new();
        map.get_or_create(at(1, 2)).set("hp", 3_i64);
        assert_eq!(map.len(), 1);
        assert_eq!(
            map.get_or_create(at(1, 2)).get("hp"),
            Some(&PropertyValue::Int(3))
        );
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn has_content_ignores_default_scaffolding() {
        let mut tile = TileRecord::new(at(0, 0));
        for ty in PropertyType::ALL {
            tile.ensure_property(ty.tag(), ty);
        }
        tile.name = Some("   ".to_string());
        assert!(!tile.has_content());

        tile.set("int", 1_i64);
        assert!(tile.has_content());

        let mut named = TileRecord::new(at(0, 0));
        named.name = Some("water".to_string());
        assert!(named.has_content());

        let mut tagged = TileRecord::new(at(0, 0));
        tagged.tags.push("solid".to_string());
        assert!(tagged.has_content());
    }

    #[test]
    fn ensure_property_fills_missing_and_keeps_existing() {
        let mut tile = TileRecord::new(at(0, 0));
        tile.set("label", "door");
        tile.ensure_property("label", PropertyType::String);
        tile.ensure_property("solid", PropertyType::Bool);
        assert_eq!(tile.get("label"), Some(&PropertyValue::from("door")));
        assert_eq!(tile.get("solid"), Some(&PropertyValue::Bool(false)));
        assert_eq!(tile.property_type("solid"), Some(PropertyType::Bool));
    }

    #[test]
    fn rename_property_keeps_position_and_replaces_target() {
        let mut tile = TileRecord::new(at(0, 0));
        tile.set("a", 1_i64);
        tile.set("score", 5_i64);
        tile.set("points", 9_i64);
        tile.set("z", 2_i64);

        assert!(tile.rename_property("score", "points"));
        let names: Vec<&str> = tile.properties().map(|(k, _)| k).collect();
        assert_eq!(names, ["a", "points", "z"]);
        assert_eq!(tile.get("points"), Some(&PropertyValue::Int(5)));
        assert!(!tile.rename_property("missing", "other"));
    }

    #[test]
    fn select_range_normalizes_and_creates_cells() {
        let mut map = TileMap::new();
        let coords = map.select_range(at(2, 3), at(1, 1));
        assert_eq!(
            coords,
            vec![at(1, 1), at(1, 2), at(1, 3), at(2, 1), at(2, 2), at(2, 3)]
        );
        assert_eq!(map.len(), 6);
    }

    #[test]
    fn export_snapshot_filters_and_sorts_by_row_then_col() {
        let mut map = TileMap::new();
        map.get_or_create(at(5, 1)).set("hp", 1_i64);
        map.get_or_create(at(0, 0)).ensure_property("hp", PropertyType::Int);
        map.get_or_create(at(3, 0)).tags.push("t".to_string());
        map.get_or_create(at(0, 1)).name = Some("n".to_string());

        let coords: Vec<TileCoord> = map.export_snapshot().iter().map(|t| t.coord).collect();
        assert_eq!(coords, vec![at(3, 0), at(0, 1), at(5, 1)]);
    }

    #[test]
    fn sync_selection_overwrites_siblings_from_first() {
        let mut map = TileMap::new();
        let a = map.get_or_create(at(0, 0));
        a.set("label", "A");
        a.tags.push("first".to_string());

        let b = map.get_or_create(at(1, 0));
        b.set("label", "B");
        b.set("extra", 7_i64);
        b.name = Some("keep".to_string());

        map.get_or_create(at(2, 0)).set("label", "C");

        map.sync_selection(&[at(0, 0), at(1, 0), at(2, 0)]);

        let first = map.get(at(0, 0)).unwrap().clone();
        for coord in [at(1, 0), at(2, 0)] {
            let tile = map.get(coord).unwrap();
            assert_eq!(tile.get("label"), Some(&PropertyValue::from("A")));
            assert_eq!(tile.get("extra"), None);
            assert_eq!(tile.tags, first.tags);
            assert_eq!(
                tile.properties().collect::<Vec<_>>(),
                first.properties().collect::<Vec<_>>()
            );
        }
        assert_eq!(map.get(at(1, 0)).unwrap().name.as_deref(), Some("keep"));
    }
}
