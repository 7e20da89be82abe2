//! Conversion between the in-memory tileset model and its JSON document.
//!
//! Writing flattens each tile's typed values into plain JSON members keyed by
//! property name. Reading goes the other way without consulting the schema: the
//! kind of each JSON literal decides the value's type, so `10` reads as an int and
//! `10.0` as a float. That is why whole floats are always written with a fraction.
//! The one exception is `-0`, which the parser only hands over as the float `-0.0`;
//! it reads as a float.
//!
//! Problems that only affect one field or one property are reported as
//! [`CodecWarning`]s (and logged); only unparsable input or a tile without a usable
//! coordinate fails the whole read.

use crate::{
    document::TilesetDocument,
    grid::{GridConfig, GridProfile},
    property::PropertyValue,
    schema::{PropertyDefinition, PropertySchema},
    statics,
    tile::{TileCoord, TileMap, TileRecord},
};
use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;

/// Fatal read failures. The caller's current model must stay untouched.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("document is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("document root must be an object, found {found}")]
    RootNotObject { found: &'static str },
    #[error("tile #{index} must be an object, found {found}")]
    TileNotObject { index: usize, found: &'static str },
    #[error("tile #{index} is missing `{field}`")]
    MissingCoordinate { index: usize, field: &'static str },
    #[error("tile #{index} has an invalid `{field}`: {found}")]
    InvalidCoordinate {
        index: usize,
        field: &'static str,
        found: String,
    },
}

/// Non-fatal problems. The affected field or property is skipped or defaulted.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CodecWarning {
    #[error("`{field}` is malformed ({found}); using the default")]
    MalformedField { field: String, found: String },
    #[error("property definition #{index} has no name; skipped")]
    UnnamedProperty { index: usize },
    #[error("property `{name}` has unknown type `{type_tag}`; skipped")]
    UnknownPropertyType { name: String, type_tag: String },
    #[error("tile {coord}: `{name}` holds a {kind}, not a property value; skipped")]
    UnsupportedValue {
        coord: TileCoord,
        name: String,
        kind: &'static str,
    },
    #[error("tile {coord}: `{name}` is {value}, which JSON cannot hold; skipped")]
    NonFiniteFloat {
        coord: TileCoord,
        name: String,
        value: f64,
    },
    #[error("tile {coord}: property `{name}` collides with a reserved key; skipped")]
    ReservedName { coord: TileCoord, name: String },
    #[error("tile {coord} appears more than once; the last one wins")]
    DuplicateTile { coord: TileCoord },
}

/// Serialized document text plus whatever was skipped while writing it.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedDocument {
    pub text: String,
    pub warnings: Vec<CodecWarning>,
}

/// A freshly read document plus whatever was skipped or defaulted while reading it.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedDocument {
    pub document: TilesetDocument,
    pub warnings: Vec<CodecWarning>,
}

fn report(warnings: &mut Vec<CodecWarning>, warning: CodecWarning) {
    log::warn!("{warning}");
    warnings.push(warning);
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

pub fn encode_document(doc: &TilesetDocument) -> EncodedDocument {
    let mut warnings = Vec::new();
    let grid = &doc.grid;

    let mut root = Map::new();
    root.insert(statics::KEY_IMAGE_FILE.into(), grid.image_file.as_str().into());
    root.insert(statics::KEY_IMAGE_WIDTH.into(), grid.image_width.into());
    root.insert(statics::KEY_IMAGE_HEIGHT.into(), grid.image_height.into());
    root.insert(statics::KEY_TILE_WIDTH.into(), grid.tile_width.into());
    root.insert(statics::KEY_TILE_HEIGHT.into(), grid.tile_height.into());
    root.insert(statics::KEY_LINK_TILE_SIZE.into(), grid.link_tile_size.into());
    root.insert(statics::KEY_TILE_GAP_WIDTH.into(), grid.tile_gap_width.into());
    root.insert(statics::KEY_TILE_GAP_HEIGHT.into(), grid.tile_gap_height.into());
    root.insert(
        statics::KEY_LINK_TILE_GAP_SIZE.into(),
        grid.link_tile_gap_size.into(),
    );
    root.insert(
        statics::KEY_GRID_COLOR_ALPHA.into(),
        grid.grid_color_alpha.into(),
    );
    root.insert(
        statics::KEY_GRID_COLOR.into(),
        grid.grid_color.to_string().into(),
    );

    let properties = doc
        .schema
        .definitions()
        .map(|def| {
            let mut obj = Map::new();
            obj.insert(statics::KEY_DEF_NAME.into(), def.name.into());
            obj.insert(statics::KEY_DEF_TYPE.into(), def.ty.tag().into());
            Value::Object(obj)
        })
        .collect();
    root.insert(statics::KEY_PROPERTIES.into(), Value::Array(properties));

    let tiles = doc
        .tiles
        .export_snapshot()
        .into_iter()
        .map(|tile| encode_tile(tile, &mut warnings))
        .collect();
    root.insert(statics::KEY_TILES.into(), Value::Array(tiles));

    // `{:#}` is serde_json's two-space pretty form.
    EncodedDocument {
        text: format!("{:#}\n", Value::Object(root)),
        warnings,
    }
}

/// One tile as a flat JSON object: coordinates, optional name, one member per
/// property, then tags.
pub fn encode_tile(tile: &TileRecord, warnings: &mut Vec<CodecWarning>) -> Value {
    let mut obj = Map::new();
    obj.insert(statics::KEY_ROW.into(), tile.coord.row.into());
    obj.insert(statics::KEY_COL.into(), tile.coord.col.into());
    if let Some(name) = &tile.name {
        obj.insert(statics::KEY_NAME.into(), name.as_str().into());
    }

    for (name, value) in tile.properties() {
        if statics::RESERVED_TILE_KEYS.contains(&name) {
            report(
                warnings,
                CodecWarning::ReservedName {
                    coord: tile.coord,
                    name: name.to_string(),
                },
            );
            continue;
        }
        let json = match value {
            PropertyValue::String(s) => Value::from(s.as_str()),
            PropertyValue::Bool(b) => Value::from(*b),
            PropertyValue::Int(v) => Value::from(*v),
            PropertyValue::Float(v) if v.is_finite() => Value::from(*v),
            PropertyValue::Float(v) => {
                report(
                    warnings,
                    CodecWarning::NonFiniteFloat {
                        coord: tile.coord,
                        name: name.to_string(),
                        value: *v,
                    },
                );
                continue;
            }
        };
        obj.insert(name.to_string(), json);
    }

    if !tile.tags.is_empty() {
        let tags = tile.tags.iter().map(|t| Value::from(t.as_str())).collect();
        obj.insert(statics::KEY_TAGS.into(), Value::Array(tags));
    }

    Value::Object(obj)
}

/// Read a whole document. Unknown top-level members are ignored; missing ones take
/// the defaults of `profile`.
pub fn decode_document(bytes: &[u8], profile: GridProfile) -> Result<DecodedDocument, CodecError> {
    let root = match serde_json::from_slice::<Value>(bytes)? {
        Value::Object(root) => root,
        other => {
            return Err(CodecError::RootNotObject {
                found: kind_of(&other),
            });
        }
    };

    let mut warnings = Vec::new();
    let grid = decode_grid(&root, profile, &mut warnings);
    let schema = decode_schema(root.get(statics::KEY_PROPERTIES), &mut warnings);

    let mut tiles = TileMap::new();
    match root.get(statics::KEY_TILES) {
        None | Some(Value::Null) => {}
        Some(Value::Array(items)) => {
            for (index, item) in items.iter().enumerate() {
                let Some(obj) = item.as_object() else {
                    return Err(CodecError::TileNotObject {
                        index,
                        found: kind_of(item),
                    });
                };
                let tile = decode_tile(obj, index, &mut warnings)?;
                let coord = tile.coord;
                if tiles.insert(tile).is_some() {
                    report(&mut warnings, CodecWarning::DuplicateTile { coord });
                }
            }
        }
        Some(other) => report(
            &mut warnings,
            CodecWarning::MalformedField {
                field: statics::KEY_TILES.to_string(),
                found: kind_of(other).to_string(),
            },
        ),
    }

    Ok(DecodedDocument {
        document: TilesetDocument {
            grid,
            schema,
            tiles,
        },
        warnings,
    })
}

/// Read one tile object. `index` is only used for error messages.
pub fn decode_tile(
    obj: &Map<String, Value>,
    index: usize,
    warnings: &mut Vec<CodecWarning>,
) -> Result<TileRecord, CodecError> {
    let row = decode_coordinate(obj, statics::KEY_ROW, index)?;
    let col = decode_coordinate(obj, statics::KEY_COL, index)?;
    let coord = TileCoord::new(col, row);
    let mut tile = TileRecord::new(coord);

    for (key, value) in obj {
        match key.as_str() {
            statics::KEY_ROW | statics::KEY_COL => {}
            statics::KEY_NAME => match value {
                Value::String(s) => tile.name = Some(s.clone()),
                Value::Null => {}
                other => report(
                    warnings,
                    CodecWarning::MalformedField {
                        field: format!("tile {coord} {}", statics::KEY_NAME),
                        found: kind_of(other).to_string(),
                    },
                ),
            },
            statics::KEY_TAGS => match value {
                Value::Array(items) => {
                    tile.tags = items
                        .iter()
                        .filter_map(|t| t.as_str().map(str::to_string))
                        .collect();
                }
                Value::Null => {}
                other => report(
                    warnings,
                    CodecWarning::MalformedField {
                        field: format!("tile {coord} {}", statics::KEY_TAGS),
                        found: kind_of(other).to_string(),
                    },
                ),
            },
            name => match property_value_from_json(value) {
                Some(v) => tile.set(name, v),
                None => report(
                    warnings,
                    CodecWarning::UnsupportedValue {
                        coord,
                        name: name.to_string(),
                        kind: kind_of(value),
                    },
                ),
            },
        }
    }

    Ok(tile)
}

/// Infer a property value from the JSON literal alone. Integer literals that fit an
/// `i64` become ints; every other number becomes a float.
fn property_value_from_json(value: &Value) -> Option<PropertyValue> {
    match value {
        Value::String(s) => Some(PropertyValue::String(s.clone())),
        Value::Bool(b) => Some(PropertyValue::Bool(*b)),
        Value::Number(n) => match n.as_i64() {
            Some(v) => Some(PropertyValue::Int(v)),
            None => n.as_f64().map(PropertyValue::Float),
        },
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn decode_coordinate(
    obj: &Map<String, Value>,
    field: &'static str,
    index: usize,
) -> Result<i32, CodecError> {
    let value = match obj.get(field) {
        None | Some(Value::Null) => {
            return Err(CodecError::MissingCoordinate { index, field });
        }
        Some(value) => value,
    };
    value
        .as_i64()
        .and_then(|v| i32::try_from(v).ok())
        .ok_or_else(|| CodecError::InvalidCoordinate {
            index,
            field,
            found: value.to_string(),
        })
}

fn decode_schema(value: Option<&Value>, warnings: &mut Vec<CodecWarning>) -> PropertySchema {
    let mut schema = PropertySchema::new();
    let entries = match value {
        None | Some(Value::Null) => return schema,
        Some(Value::Array(entries)) => entries,
        Some(other) => {
            report(
                warnings,
                CodecWarning::MalformedField {
                    field: statics::KEY_PROPERTIES.to_string(),
                    found: kind_of(other).to_string(),
                },
            );
            return schema;
        }
    };

    for (index, entry) in entries.iter().enumerate() {
        if let Ok(def) = PropertyDefinition::deserialize(entry) {
            if schema.add(&def.name, def.ty) {
                continue;
            }
        }

        // Rejected entry: say whether the name or the type was the problem.
        let name = entry
            .get(statics::KEY_DEF_NAME)
            .and_then(Value::as_str)
            .unwrap_or_default();
        if name.is_empty() {
            report(warnings, CodecWarning::UnnamedProperty { index });
            continue;
        }
        let type_tag = entry
            .get(statics::KEY_DEF_TYPE)
            .map(|t| t.as_str().map_or_else(|| t.to_string(), str::to_string))
            .unwrap_or_default();
        report(
            warnings,
            CodecWarning::UnknownPropertyType {
                name: name.to_string(),
                type_tag,
            },
        );
    }
    schema
}

fn decode_grid(
    root: &Map<String, Value>,
    profile: GridProfile,
    warnings: &mut Vec<CodecWarning>,
) -> GridConfig {
    let defaults = GridConfig::for_profile(profile);
    let mut fields = FieldReader { root, warnings };

    let grid_color = match fields.string(statics::KEY_GRID_COLOR) {
        Some(text) => match text.parse() {
            Ok(color) => color,
            Err(_) => {
                fields.malformed(statics::KEY_GRID_COLOR, format!("{text:?}"));
                defaults.grid_color
            }
        },
        None => defaults.grid_color,
    };

    GridConfig {
        image_file: fields
            .string(statics::KEY_IMAGE_FILE)
            .unwrap_or(defaults.image_file),
        image_width: fields.uint(statics::KEY_IMAGE_WIDTH, defaults.image_width),
        image_height: fields.uint(statics::KEY_IMAGE_HEIGHT, defaults.image_height),
        tile_width: fields.uint(statics::KEY_TILE_WIDTH, defaults.tile_width),
        tile_height: fields.uint(statics::KEY_TILE_HEIGHT, defaults.tile_height),
        link_tile_size: fields.boolean(statics::KEY_LINK_TILE_SIZE, defaults.link_tile_size),
        tile_gap_width: fields.uint(statics::KEY_TILE_GAP_WIDTH, defaults.tile_gap_width),
        tile_gap_height: fields.uint(statics::KEY_TILE_GAP_HEIGHT, defaults.tile_gap_height),
        link_tile_gap_size: fields.boolean(
            statics::KEY_LINK_TILE_GAP_SIZE,
            defaults.link_tile_gap_size,
        ),
        grid_color,
        grid_color_alpha: fields.alpha(statics::KEY_GRID_COLOR_ALPHA, defaults.grid_color_alpha),
    }
}

/// Lenient accessors for top-level members: absent or null means "use the default",
/// anything of the wrong shape is reported and also falls back to the default.
struct FieldReader<'a> {
    root: &'a Map<String, Value>,
    warnings: &'a mut Vec<CodecWarning>,
}

impl<'a> FieldReader<'a> {
    fn present(&self, key: &str) -> Option<&'a Value> {
        self.root.get(key).filter(|v| !v.is_null())
    }

    fn malformed(&mut self, key: &str, found: String) {
        report(
            self.warnings,
            CodecWarning::MalformedField {
                field: key.to_string(),
                found,
            },
        );
    }

    fn string(&mut self, key: &str) -> Option<String> {
        let value = self.present(key)?;
        match value.as_str() {
            Some(s) => Some(s.to_string()),
            None => {
                self.malformed(key, value.to_string());
                None
            }
        }
    }

    fn uint(&mut self, key: &str, default: u32) -> u32 {
        let Some(value) = self.present(key) else {
            return default;
        };
        match value.as_i64().and_then(|v| u32::try_from(v).ok()) {
            Some(v) => v,
            None => {
                self.malformed(key, value.to_string());
                default
            }
        }
    }

    fn alpha(&mut self, key: &str, default: u8) -> u8 {
        let Some(value) = self.present(key) else {
            return default;
        };
        match value.as_i64().and_then(|v| u8::try_from(v).ok()) {
            Some(v) => v,
            None => {
                self.malformed(key, value.to_string());
                default
            }
        }
    }

    fn boolean(&mut self, key: &str, default: bool) -> bool {
        let Some(value) = self.present(key) else {
            return default;
        };
        match value.as_bool() {
            Some(v) => v,
            None => {
                self.malformed(key, value.to_string());
                default
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{CodecError, CodecWarning, decode_document, decode_tile, encode_tile};
    use crate::{
        grid::GridProfile,
        property::{PropertyType, PropertyValue},
        tile::{TileCoord, TileRecord},
    };
    use pretty_assertions::assert_eq;
    use serde_json::Value;

    fn roundtrip(tile: &TileRecord) -> TileRecord {
        let mut warnings = Vec::new();
        let json = encode_tile(tile, &mut warnings);
        assert!(warnings.is_empty(), "{warnings:?}");
        let text = format!("{json:#}");
        let parsed: Value = serde_json::from_str(&text).unwrap();
        decode_tile(parsed.as_object().unwrap(), 0, &mut warnings).unwrap()
    }

    #[test]
    fn tile_roundtrip_preserves_values_types_and_tags() {
        let mut tile = TileRecord::new(TileCoord::new(3, 7));
        tile.name = Some("lava".to_string());
        tile.set("label", "hot");
        tile.set("solid", true);
        tile.set("damage", -4_i64);
        tile.set("speed", 4.0);
        tile.set("friction", 0.125);
        tile.tags = vec!["hazard".to_string(), "liquid".to_string()];

        let back = roundtrip(&tile);
        assert_eq!(back, tile);
        assert_eq!(back.property_type("speed"), Some(PropertyType::Float));
        assert_eq!(back.property_type("damage"), Some(PropertyType::Int));
    }

    #[test]
    fn whole_float_is_written_with_a_fraction() {
        let mut tile = TileRecord::new(TileCoord::new(0, 0));
        tile.set("f", 4.0);
        tile.set("i", 4_i64);
        tile.set("neg", -12.0);
        let text = encode_tile(&tile, &mut Vec::new()).to_string();
        assert_eq!(text, r#"{"Row":0,"Col":0,"f":4.0,"i":4,"neg":-12.0}"#);
    }

    #[test]
    fn tile_members_are_ordered_and_optional_ones_omitted() {
        let mut tile = TileRecord::new(TileCoord::new(2, 1));
        tile.set("hp", 3_i64);
        let text = encode_tile(&tile, &mut Vec::new()).to_string();
        assert_eq!(text, r#"{"Row":1,"Col":2,"hp":3}"#);

        tile.name = Some(String::new());
        tile.tags.push("t".to_string());
        let text = encode_tile(&tile, &mut Vec::new()).to_string();
        assert_eq!(text, r#"{"Row":1,"Col":2,"Name":"","hp":3,"Tags":["t"]}"#);
    }

    #[test]
    fn non_finite_float_is_skipped_but_the_rest_is_written() {
        let mut tile = TileRecord::new(TileCoord::new(0, 0));
        tile.set("bad", f64::NAN);
        tile.set("good", 1_i64);
        let mut warnings = Vec::new();
        let text = encode_tile(&tile, &mut warnings).to_string();
        assert_eq!(text, r#"{"Row":0,"Col":0,"good":1}"#);
        assert!(matches!(
            warnings.as_slice(),
            [CodecWarning::NonFiniteFloat { name, .. }] if name == "bad"
        ));
    }

    #[test]
    fn reserved_property_names_are_skipped() {
        let mut tile = TileRecord::new(TileCoord::new(0, 0));
        tile.set("Row", 99_i64);
        let mut warnings = Vec::new();
        let text = encode_tile(&tile, &mut warnings).to_string();
        assert_eq!(text, r#"{"Row":0,"Col":0}"#);
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn unknown_property_reads_by_literal_kind() {
        let doc = decode_document(
            br#"{ "Tiles": [ { "Row": 0, "Col": 1, "gold": 10.5, "count": 3, "big": 18446744073709551615 } ] }"#,
            GridProfile::Contiguous,
        )
        .unwrap()
        .document;

        assert!(doc.schema.is_empty());
        let tile = doc.tiles.get(TileCoord::new(1, 0)).unwrap();
        assert_eq!(tile.get("gold"), Some(&PropertyValue::Float(10.5)));
        assert_eq!(tile.property_type("gold"), Some(PropertyType::Float));
        assert_eq!(tile.get("count"), Some(&PropertyValue::Int(3)));
        assert_eq!(tile.property_type("big"), Some(PropertyType::Float));
    }

    #[test]
    fn negative_zero_literal_reads_as_float() {
        let doc = decode_document(
            br#"{ "Tiles": [ { "Row": 0, "Col": 0, "a": -0, "b": -0.0, "c": 0 } ] }"#,
            GridProfile::Contiguous,
        )
        .unwrap()
        .document;

        let tile = doc.tiles.get(TileCoord::new(0, 0)).unwrap();
        for name in ["a", "b"] {
            match tile.get(name) {
                Some(PropertyValue::Float(v)) => assert!(*v == 0.0 && v.is_sign_negative()),
                other => panic!("{name}: expected -0.0, got {other:?}"),
            }
        }
        assert_eq!(tile.get("c"), Some(&PropertyValue::Int(0)));
    }

    #[test]
    fn missing_fields_take_profile_defaults() {
        let decoded = decode_document(b"{}", GridProfile::Spaced).unwrap();
        let grid = &decoded.document.grid;
        assert_eq!((grid.tile_width, grid.tile_height), (16, 16));
        assert_eq!((grid.tile_gap_width, grid.tile_gap_height), (1, 1));
        assert!(grid.link_tile_size && grid.link_tile_gap_size);
        assert_eq!(grid.grid_color.to_string(), "#808080");
        assert_eq!(grid.grid_color_alpha, 128);
        assert!(decoded.document.tiles.is_empty());
        assert!(decoded.warnings.is_empty());
    }

    #[test]
    fn malformed_fields_fall_back_with_warnings() {
        let decoded = decode_document(
            br##"{
                "ImageFile": 5,
                "TileWidth": "wide",
                "ImageHeight": -3,
                "LinkTileSize": "yes",
                "GridColorAlpha": 300,
                "GridColor": "red",
                "Unrelated": { "x": 1 },
                "Tiles": [ { "Row": 0, "Col": 0, "Name": 4, "Tags": ["a", 1, "b"], "nested": [1] } ]
            }"##,
            GridProfile::Contiguous,
        )
        .unwrap();

        let grid = &decoded.document.grid;
        assert_eq!(grid.image_file, "");
        assert_eq!(grid.tile_width, 16);
        assert_eq!(grid.image_height, 0);
        assert!(grid.link_tile_size);
        assert_eq!(grid.grid_color_alpha, 128);
        assert_eq!(grid.grid_color.to_string(), "#808080");

        let tile = decoded.document.tiles.get(TileCoord::new(0, 0)).unwrap();
        assert_eq!(tile.name, None);
        assert_eq!(tile.tags, ["a", "b"]);
        assert_eq!(tile.get("nested"), None);
        assert_eq!(decoded.warnings.len(), 8);
    }

    #[test]
    fn schema_skips_unknown_types_and_unnamed_entries() {
        let decoded = decode_document(
            br#"{ "Properties": [
                { "Name": "hp", "Type": "int" },
                { "Name": "pos", "Type": "vector2" },
                { "Type": "bool" },
                { "Name": "", "Type": "bool" },
                { "Name": "label", "Type": "string", "Extra": 1 }
            ] }"#,
            GridProfile::Contiguous,
        )
        .unwrap();

        let names: Vec<String> = decoded.document.schema.definitions().map(|d| d.name).collect();
        assert_eq!(names, ["hp", "label"]);
        assert_eq!(
            decoded.warnings,
            vec![
                CodecWarning::UnknownPropertyType {
                    name: "pos".to_string(),
                    type_tag: "vector2".to_string(),
                },
                CodecWarning::UnnamedProperty { index: 2 },
                CodecWarning::UnnamedProperty { index: 3 },
            ]
        );
    }

    #[test]
    fn missing_or_invalid_coordinates_are_fatal() {
        let err = decode_document(br#"{ "Tiles": [ { "Col": 1 } ] }"#, GridProfile::Contiguous)
            .unwrap_err();
        assert!(matches!(
            err,
            CodecError::MissingCoordinate { index: 0, field: "Row" }
        ));

        let err = decode_document(
            br#"{ "Tiles": [ { "Row": 0, "Col": 0 }, { "Row": 1.5, "Col": 0 } ] }"#,
            GridProfile::Contiguous,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            CodecError::InvalidCoordinate { index: 1, field: "Row", .. }
        ));
    }

    #[test]
    fn malformed_json_is_fatal() {
        assert!(matches!(
            decode_document(b"{ \"Tiles\": [", GridProfile::Contiguous),
            Err(CodecError::Json(_))
        ));
        assert!(matches!(
            decode_document(b"[]", GridProfile::Contiguous),
            Err(CodecError::RootNotObject { found: "array" })
        ));
    }

    #[test]
    fn duplicate_tiles_keep_the_last() {
        let decoded = decode_document(
            br#"{ "Tiles": [ { "Row": 0, "Col": 0, "a": 1 }, { "Row": 0, "Col": 0, "a": 2 } ] }"#,
            GridProfile::Contiguous,
        )
        .unwrap();
        let tile = decoded.document.tiles.get(TileCoord::new(0, 0)).unwrap();
        assert_eq!(tile.get("a"), Some(&PropertyValue::Int(2)));
        assert_eq!(
            decoded.warnings,
            vec![CodecWarning::DuplicateTile {
                coord: TileCoord::new(0, 0)
            }]
        );
    }
}
