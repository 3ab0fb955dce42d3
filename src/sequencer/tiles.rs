use crate::foundation::core::{GridDims, Rect};
use crate::foundation::error::HeroResult;
use crate::host::contract::{HostSnapshot, MediaSource};
use crate::settings::model::TileOrder;

/// One zoomable grid cell.
#[derive(Clone, Debug, PartialEq)]
pub struct Tile {
    /// Position in DOM order (after dropping tiles without media).
    pub index: usize,
    /// Bounding box in host coordinates.
    pub rect: Rect,
    /// What the zoom display shows for this tile.
    pub media: MediaSource,
}

/// Tiles plus the geometry they were measured against.
#[derive(Clone, Debug, PartialEq)]
pub struct TileLayout {
    /// Host container box.
    pub container: Rect,
    /// Grid used for right-to-left ordering.
    pub grid: GridDims,
    /// Tiles in DOM order.
    pub tiles: Vec<Tile>,
}

impl TileLayout {
    /// Collect tiles from a host snapshot; tiles with neither media nor poster are skipped.
    pub fn from_snapshot(snapshot: &HostSnapshot, fallback_grid: GridDims) -> HeroResult<Self> {
        let container = snapshot.validate()?;
        let tiles = snapshot
            .tiles
            .iter()
            .filter_map(|node| Some((node.rect, node.display_media()?)))
            .enumerate()
            .map(|(index, (rect, media))| Tile { index, rect, media })
            .collect();
        Ok(Self {
            container,
            grid: snapshot.grid.unwrap_or(fallback_grid),
            tiles,
        })
    }

    /// Tiles in visiting order.
    pub fn ordered(&self, order: TileOrder) -> Vec<Tile> {
        visit_order(self.tiles.len(), order, self.grid)
            .into_iter()
            .map(|i| self.tiles[i].clone())
            .collect()
    }
}

/// Visiting order of `n` tiles laid out row-major on `grid`.
///
/// Right-to-left reverses the columns inside every row. Tiles past the last
/// grid row continue in further rows of the same width so none is dropped.
pub fn visit_order(n: usize, order: TileOrder, grid: GridDims) -> Vec<usize> {
    match order {
        TileOrder::Ltr => (0..n).collect(),
        TileOrder::Rtl => {
            let cols = grid.cols.max(1) as usize;
            let rows = n.div_ceil(cols);
            let mut out = Vec::with_capacity(n);
            for row in 0..rows {
                for col in (0..cols).rev() {
                    let i = row * cols + col;
                    if i < n {
                        out.push(i);
                    }
                }
            }
            out
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sequencer/tiles.rs"]
mod tests;
