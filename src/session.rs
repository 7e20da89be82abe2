use crate::{
    codec::{CodecError, CodecWarning},
    document::TilesetDocument,
    grid::GridProfile,
    property::{PropertyType, PropertyValue},
    statics,
    tile::{TileCoord, TileRecord},
};
use anyhow::Context;
use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

/// Key/value persistence used to bring the last session back on startup.
pub trait SessionStore {
    fn get(&self, key: &str) -> anyhow::Result<Option<Vec<u8>>>;
    fn set(&mut self, key: &str, value: &[u8]) -> anyhow::Result<()>;
}

impl SessionStore for HashMap<String, Vec<u8>> {
    fn get(&self, key: &str) -> anyhow::Result<Option<Vec<u8>>> {
        Ok(HashMap::get(self, key).cloned())
    }

    fn set(&mut self, key: &str, value: &[u8]) -> anyhow::Result<()> {
        self.insert(key.to_string(), value.to_vec());
        Ok(())
    }
}

/// One file per key inside a directory.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    dir: PathBuf,
}

impl FileSessionStore {
    pub fn open(dir: &Path) -> anyhow::Result<Self> {
        fs::create_dir_all(dir).with_context(|| format!("creating {dir:?}"))?;
        Ok(Self {
            dir: dir.to_path_buf(),
        })
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(sanitize_key(key))
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self, key: &str) -> anyhow::Result<Option<Vec<u8>>> {
        let path = self.path_for(key);
        match fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("reading {path:?}")),
        }
    }

    fn set(&mut self, key: &str, value: &[u8]) -> anyhow::Result<()> {
        let path = self.path_for(key);
        fs::write(&path, value).with_context(|| format!("writing {path:?}"))
    }
}

/// Keys are free text (image file names); keep them to a single safe path component.
/// Bytes outside `[A-Za-z0-9._-]` and a leading `.` are written as `%XX`, so two
/// different keys never share a file.
fn sanitize_key(key: &str) -> String {
    use std::fmt::Write as _;

    if key.is_empty() {
        return "%".to_string();
    }
    let mut name = String::with_capacity(key.len());
    for (i, b) in key.bytes().enumerate() {
        let safe = b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_') || (b == b'.' && i > 0);
        if safe {
            name.push(char::from(b));
        } else {
            let _ = write!(name, "%{b:02X}");
        }
    }
    name
}

/// Store key for the bytes of the image called `file_name`.
fn image_key(file_name: &str) -> String {
    format!("{}{file_name}", statics::STORE_KEY_IMAGE_PREFIX)
}

/// Where a finished export goes: the clipboard and a file download.
pub trait ExportSink {
    fn copy_to_clipboard(&mut self, text: &str) -> anyhow::Result<()>;
    fn download(&mut self, file_name: &str, content_type: &str, bytes: &[u8]) -> anyhow::Result<()>;
}

/// Editing state around one document: which tiles are selected, the last exported
/// text, and the store the document is mirrored into on every save.
///
/// The first selected tile is the one being edited; on save its values and tags are
/// copied onto every other selected tile.
#[derive(Debug)]
pub struct EditorSession<S: SessionStore> {
    document: TilesetDocument,
    profile: GridProfile,
    selection: Vec<TileCoord>,
    output: String,
    image: Option<Vec<u8>>,
    store: S,
}

impl<S: SessionStore> EditorSession<S> {
    pub fn new(store: S, profile: GridProfile) -> Self {
        Self {
            document: TilesetDocument::new(profile),
            profile,
            selection: Vec::new(),
            output: String::new(),
            image: None,
            store,
        }
    }

    /// Start from whatever the store remembers. An unreadable or broken stored
    /// document is logged and ignored.
    pub fn restore(store: S, profile: GridProfile) -> Self {
        let mut session = Self::new(store, profile);
        let stored = match session.store.get(statics::STORE_KEY_DOCUMENT) {
            Ok(stored) => stored,
            Err(e) => {
                log::warn!("could not read stored session: {e:#}");
                None
            }
        };
        if let Some(bytes) = stored {
            if let Err(e) = session.load_document(&bytes) {
                log::warn!("ignoring stored session: {e}");
            }
        }
        session
    }

    pub fn document(&self) -> &TilesetDocument {
        &self.document
    }

    pub fn selection(&self) -> &[TileCoord] {
        &self.selection
    }

    /// Text produced by the last save.
    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn image(&self) -> Option<&[u8]> {
        self.image.as_deref()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn selected_tile(&self) -> Option<&TileRecord> {
        self.selection
            .first()
            .and_then(|coord| self.document.tiles.get(*coord))
    }

    fn selected_tile_mut(&mut self) -> Option<&mut TileRecord> {
        let coord = *self.selection.first()?;
        Some(self.document.tiles.get_or_create(coord))
    }

    /// A new tileset image was picked. `width`/`height` come from the image decoder.
    pub fn set_image(
        &mut self,
        file_name: &str,
        bytes: &[u8],
        width: u32,
        height: u32,
    ) -> anyhow::Result<Vec<CodecWarning>> {
        self.store.set(&image_key(file_name), bytes)?;
        self.image = Some(bytes.to_vec());
        let grid = &mut self.document.grid;
        grid.image_file = file_name.to_string();
        grid.image_width = width;
        grid.image_height = height;
        self.apply_grid()
    }

    pub fn apply_grid(&mut self) -> anyhow::Result<Vec<CodecWarning>> {
        let grid = &mut self.document.grid;
        grid.apply_links();
        log::debug!(
            "grid {}x{} cells of {}x{} (+{}x{} gap)",
            grid.cols(),
            grid.rows(),
            grid.tile_width,
            grid.tile_height,
            grid.tile_gap_width,
            grid.tile_gap_height
        );
        self.save()
    }

    /// Select a tile. With `extend` (shift held) and exactly one tile selected, the
    /// rectangle between it and the clicked tile joins the selection instead.
    pub fn click_tile(&mut self, col: i32, row: i32, extend: bool) {
        let target = TileCoord::new(col, row);
        if extend && self.selection.len() == 1 {
            let anchor = self.selection[0];
            let range = self.document.tiles.select_range(anchor, target);
            self.selection
                .extend(range.into_iter().filter(|c| *c != anchor));
            return;
        }

        self.document.tiles.get_or_create(target);
        self.selection = vec![target];
        self.document
            .schema
            .apply_global_defaults(&mut self.document.tiles);
    }

    /// Step the single selected tile through the grid (Ctrl+arrow), saving first.
    pub fn move_selection(&mut self, dx: i32, dy: i32) -> anyhow::Result<()> {
        if self.selection.len() != 1 {
            return Ok(());
        }
        self.save()?;
        let next = self.document.grid.step(self.selection[0], dx, dy);
        self.click_tile(next.col, next.row, false);
        Ok(())
    }

    /// Add `name` to the schema, or rename `old_name` to it when an old name is given
    /// or `name` is already defined. Every tile is then brought up to date.
    pub fn commit_property(
        &mut self,
        old_name: &str,
        name: &str,
        ty: PropertyType,
    ) -> anyhow::Result<bool> {
        if name.is_empty() {
            return Ok(false);
        }
        let doc = &mut self.document;
        if !old_name.is_empty() || doc.schema.contains(name) {
            doc.schema.rename(old_name, name, ty, &mut doc.tiles);
        } else {
            doc.schema.add(name, ty);
        }
        doc.schema.apply_global_defaults(&mut doc.tiles);
        self.save()?;
        Ok(true)
    }

    pub fn delete_property(&mut self, name: &str) -> anyhow::Result<()> {
        let doc = &mut self.document;
        doc.schema.delete(name, &mut doc.tiles);
        self.save()?;
        Ok(())
    }

    /// Set a value on the edited tile. Returns false when nothing is selected.
    pub fn edit_selected(&mut self, name: &str, value: impl Into<PropertyValue>) -> bool {
        match self.selected_tile_mut() {
            Some(tile) => {
                tile.set(name, value);
                true
            }
            None => false,
        }
    }

    pub fn set_selected_name(&mut self, name: Option<String>) -> bool {
        match self.selected_tile_mut() {
            Some(tile) => {
                tile.name = name;
                true
            }
            None => false,
        }
    }

    pub fn set_selected_tags(&mut self, tags: Vec<String>) -> bool {
        match self.selected_tile_mut() {
            Some(tile) => {
                tile.tags = tags;
                true
            }
            None => false,
        }
    }

    /// Push the batch edit through, serialize and mirror the result into the store.
    pub fn save(&mut self) -> anyhow::Result<Vec<CodecWarning>> {
        self.document.tiles.sync_selection(&self.selection);
        let encoded = self.document.to_json();
        self.store
            .set(statics::STORE_KEY_DOCUMENT, encoded.text.as_bytes())
            .context("storing session")?;
        self.output = encoded.text;
        Ok(encoded.warnings)
    }

    /// Save, then copy the document to the clipboard and offer it as `<ImageFile>.json`.
    pub fn save_file(&mut self, sink: &mut impl ExportSink) -> anyhow::Result<Vec<CodecWarning>> {
        let warnings = self.save()?;
        sink.copy_to_clipboard(&self.output)?;
        sink.download(
            &self.document.export_file_name(),
            statics::EXPORT_CONTENT_TYPE,
            self.output.as_bytes(),
        )?;
        Ok(warnings)
    }

    /// Replace the document with `bytes`. On error nothing changes.
    ///
    /// A multi-tile selection collapses to its last tile, so the next save cannot
    /// copy one loaded tile over the others.
    pub fn load_document(&mut self, bytes: &[u8]) -> Result<Vec<CodecWarning>, CodecError> {
        let decoded = TilesetDocument::from_json(bytes, self.profile)?;
        self.document = decoded.document;

        self.selection = self.selection.last().copied().into_iter().collect();
        for coord in &self.selection {
            self.document.tiles.get_or_create(*coord);
        }
        self.document
            .schema
            .apply_global_defaults(&mut self.document.tiles);

        self.image = None;
        let image_file = &self.document.grid.image_file;
        if !image_file.is_empty() {
            match self.store.get(&image_key(image_file)) {
                Ok(image) => self.image = image,
                Err(e) => log::warn!("could not read image {image_file:?}: {e:#}"),
            }
        }
        Ok(decoded.warnings)
    }
}
