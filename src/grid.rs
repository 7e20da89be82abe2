use crate::{statics, tile::TileCoord};
use std::{fmt, str::FromStr};

/// Starting tile spacing for a fresh document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GridProfile {
    /// Tiles packed edge to edge.
    #[default]
    Contiguous,
    /// One pixel of spacing between tiles.
    Spaced,
}

impl GridProfile {
    pub fn gap(self) -> u32 {
        match self {
            GridProfile::Contiguous => 0,
            GridProfile::Spaced => 1,
        }
    }
}

/// `#RRGGBB` overlay colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Default for GridColor {
    fn default() -> Self {
        Self {
            r: 0x80,
            g: 0x80,
            b: 0x80,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("`{0}` is not a #RRGGBB colour")]
pub struct InvalidGridColor(pub String);

impl FromStr for GridColor {
    type Err = InvalidGridColor;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || InvalidGridColor(s.to_string());
        let hex = s.strip_prefix('#').ok_or_else(invalid)?;
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
        Ok(Self {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
        })
    }
}

impl fmt::Display for GridColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// Image and grid overlay settings stored at the top of a tileset document.
#[derive(Debug, Clone, PartialEq)]
pub struct GridConfig {
    pub image_file: String,
    pub image_width: u32,
    pub image_height: u32,
    pub tile_width: u32,
    pub tile_height: u32,
    pub link_tile_size: bool,
    pub tile_gap_width: u32,
    pub tile_gap_height: u32,
    pub link_tile_gap_size: bool,
    pub grid_color: GridColor,
    pub grid_color_alpha: u8,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self::for_profile(GridProfile::default())
    }
}

impl GridConfig {
    pub fn for_profile(profile: GridProfile) -> Self {
        Self {
            image_file: String::new(),
            image_width: 0,
            image_height: 0,
            tile_width: statics::DEFAULT_TILE_SIZE,
            tile_height: statics::DEFAULT_TILE_SIZE,
            link_tile_size: true,
            tile_gap_width: profile.gap(),
            tile_gap_height: profile.gap(),
            link_tile_gap_size: true,
            grid_color: GridColor::default(),
            grid_color_alpha: statics::DEFAULT_GRID_COLOR_ALPHA,
        }
    }

    /// Copy width into height (and gap width into gap height) where linked.
    pub fn apply_links(&mut self) {
        if self.link_tile_size {
            self.tile_height = self.tile_width;
        }
        if self.link_tile_gap_size {
            self.tile_gap_height = self.tile_gap_width;
        }
    }

    pub fn rows(&self) -> u32 {
        cells_along(self.image_height, self.tile_height.saturating_add(self.tile_gap_height))
    }

    pub fn cols(&self) -> u32 {
        cells_along(self.image_width, self.tile_width.saturating_add(self.tile_gap_width))
    }

    /// Move `dx` columns and `dy` rows from `from`, reading the grid like text:
    /// stepping off either end of a row continues on the neighbouring row, and
    /// stepping off the first or last row wraps around the whole grid.
    pub fn step(&self, from: TileCoord, dx: i32, dy: i32) -> TileCoord {
        let rows = i32::try_from(self.rows()).unwrap_or(i32::MAX);
        let cols = i32::try_from(self.cols()).unwrap_or(i32::MAX);
        if rows == 0 || cols == 0 {
            return from;
        }

        // Saturating: the start may lie anywhere, even outside the grid.
        let mut col = from.col.saturating_add(dx);
        let mut row = from.row.saturating_add(dy);
        if col >= cols {
            row = row.saturating_add(1);
            col = 0;
        } else if col < 0 {
            row = row.saturating_sub(1);
            col = cols - 1;
        }
        if row >= rows {
            row = 0;
            col = 0;
        } else if row < 0 {
            row = rows - 1;
            col = cols - 1;
        }
        TileCoord::new(col, row)
    }
}

fn cells_along(extent: u32, pitch: u32) -> u32 {
    if pitch == 0 {
        return 0;
    }
    extent.div_ceil(pitch)
}
