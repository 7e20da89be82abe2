// Central place for wire keys, defaults and other non-localized constants.
// Keep these out of codec.rs so the reader and writer cannot drift apart.

// Document-level keys
pub const KEY_IMAGE_FILE: &str = "ImageFile";
pub const KEY_IMAGE_WIDTH: &str = "ImageWidth";
pub const KEY_IMAGE_HEIGHT: &str = "ImageHeight";
pub const KEY_TILE_WIDTH: &str = "TileWidth";
pub const KEY_TILE_HEIGHT: &str = "TileHeight";
pub const KEY_LINK_TILE_SIZE: &str = "LinkTileSize";
pub const KEY_TILE_GAP_WIDTH: &str = "TileGapWidth";
pub const KEY_TILE_GAP_HEIGHT: &str = "TileGapHeight";
pub const KEY_LINK_TILE_GAP_SIZE: &str = "LinkTileGapSize";
pub const KEY_GRID_COLOR_ALPHA: &str = "GridColorAlpha";
pub const KEY_GRID_COLOR: &str = "GridColor";
pub const KEY_PROPERTIES: &str = "Properties";
pub const KEY_TILES: &str = "Tiles";

// Property definition keys
pub const KEY_DEF_NAME: &str = "Name";
pub const KEY_DEF_TYPE: &str = "Type";

// Tile keys. Any other key on a tile object is a property.
pub const KEY_ROW: &str = "Row";
pub const KEY_COL: &str = "Col";
pub const KEY_NAME: &str = "Name";
pub const KEY_TAGS: &str = "Tags";
pub const RESERVED_TILE_KEYS: [&str; 4] = [KEY_ROW, KEY_COL, KEY_NAME, KEY_TAGS];

// Property type tags
pub const TYPE_STRING: &str = "string";
pub const TYPE_BOOL: &str = "bool";
pub const TYPE_INT: &str = "int";
pub const TYPE_FLOAT: &str = "float";

// Grid defaults
pub const DEFAULT_TILE_SIZE: u32 = 16;
pub const DEFAULT_GRID_COLOR: &str = "#808080";
pub const DEFAULT_GRID_COLOR_ALPHA: u8 = 128;

// Session store keys / export naming
pub const STORE_KEY_DOCUMENT: &str = "TilesetProperties";
pub const STORE_KEY_IMAGE_PREFIX: &str = "image:";
pub const EXPORT_EXTENSION: &str = ".json";
pub const EXPORT_CONTENT_TYPE: &str = "text/json";
