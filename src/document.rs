use crate::{
    codec::{self, CodecWarning, DecodedDocument, EncodedDocument},
    grid::{GridConfig, GridProfile},
    schema::PropertySchema,
    statics,
    tile::TileMap,
};
use anyhow::Context;
use flate2::{Compression, GzBuilder, read::GzDecoder};
use std::{
    fs,
    io::{Read, Write},
    path::Path,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    GzipJson,
}

impl DocumentFormat {
    pub fn for_path(path: &Path) -> Self {
        if path.extension().and_then(|e| e.to_str()) == Some("gz") {
            DocumentFormat::GzipJson
        } else {
            DocumentFormat::Json
        }
    }
}

/// Everything a tileset document holds: grid settings, the property schema and the
/// edited tiles. Tiles without content are kept in memory but never written out.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TilesetDocument {
    pub grid: GridConfig,
    pub schema: PropertySchema,
    pub tiles: TileMap,
}

impl TilesetDocument {
    pub fn new(profile: GridProfile) -> Self {
        Self {
            grid: GridConfig::for_profile(profile),
            schema: PropertySchema::new(),
            tiles: TileMap::new(),
        }
    }

    /// `<ImageFile>.json`, the name the export is offered under.
    pub fn export_file_name(&self) -> String {
        format!("{}{}", self.grid.image_file, statics::EXPORT_EXTENSION)
    }

    pub fn to_json(&self) -> EncodedDocument {
        codec::encode_document(self)
    }

    pub fn from_json(bytes: &[u8], profile: GridProfile) -> Result<DecodedDocument, codec::CodecError> {
        codec::decode_document(bytes, profile)
    }

    pub fn load_path(path: &Path) -> anyhow::Result<(Self, Vec<CodecWarning>)> {
        let bytes = fs::read(path).with_context(|| format!("reading {path:?}"))?;
        let text_bytes = match detect_format(path, &bytes) {
            DocumentFormat::Json => bytes,
            DocumentFormat::GzipJson => {
                let mut decoder = GzDecoder::new(&bytes[..]);
                let mut out = Vec::new();
                decoder.read_to_end(&mut out).context("gzip decompress")?;
                out
            }
        };

        let decoded = codec::decode_document(&text_bytes, GridProfile::default())
            .with_context(|| format!("parsing {path:?}"))?;
        log::debug!(
            "loaded {path:?}: {} properties, {} tiles, {} warning(s)",
            decoded.document.schema.len(),
            decoded.document.tiles.len(),
            decoded.warnings.len()
        );
        Ok((decoded.document, decoded.warnings))
    }

    /// Serialize for `format`. Gzip output has a zeroed mtime so identical documents
    /// produce identical bytes.
    pub fn to_bytes(&self, format: DocumentFormat) -> anyhow::Result<(Vec<u8>, Vec<CodecWarning>)> {
        let encoded = self.to_json();
        let bytes = match format {
            DocumentFormat::Json => encoded.text.into_bytes(),
            DocumentFormat::GzipJson => {
                let mut encoder = GzBuilder::new()
                    .mtime(0)
                    .write(Vec::new(), Compression::default());
                encoder
                    .write_all(encoded.text.as_bytes())
                    .context("gzip compress")?;
                encoder.finish().context("gzip finish")?
            }
        };
        Ok((bytes, encoded.warnings))
    }

    pub fn save_to_path(&self, path: &Path) -> anyhow::Result<Vec<CodecWarning>> {
        let (bytes, warnings) = self.to_bytes(DocumentFormat::for_path(path))?;
        fs::write(path, &bytes).with_context(|| format!("writing {path:?}"))?;
        log::debug!("saved {path:?} ({} bytes)", bytes.len());
        Ok(warnings)
    }
}

fn detect_format(path: &Path, bytes: &[u8]) -> DocumentFormat {
    if DocumentFormat::for_path(path) == DocumentFormat::GzipJson {
        return DocumentFormat::GzipJson;
    }
    // Gzip magic: 1F 8B
    if bytes.len() >= 2 && bytes[0] == 0x1F && bytes[1] == 0x8B {
        return DocumentFormat::GzipJson;
    }
    DocumentFormat::Json
}
