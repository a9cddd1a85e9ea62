#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure map compiler that turns a symbol grid into a render grid and spawn records.
//!
//! Compilation validates the grid against a [`TileCatalog`], resolves complex
//! tiles to the terrain they stand on, picks autotiled sprite variants from the
//! neighbor signature of every plain tile, and extracts one [`SpawnRecord`] per
//! complex tile in row-major reading order. Nothing is produced on error.

mod autotile;
mod catalog;

pub use autotile::{NeighborSignature, ParseVariantKeyError, SpriteVariants, VariantKey};
pub use catalog::{TileCatalog, TileDescriptor};

use pirate_flow_core::{
    CollectibleKind, CompiledLevel, Facing, MapCell, MapGrid, SpawnRecord, SpriteKey, TilePosition,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use thiserror::Error;
use tracing::{debug, error, warn};

/// Number of tiles searched along each axis when inferring a turret's facing.
const FACING_SEARCH_DEPTH: i32 = 3;

/// Rectangular grid of raw level symbols, stored row by row.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RawGrid {
    rows: Vec<Vec<char>>,
}

impl RawGrid {
    /// Builds a grid from one string per row.
    #[must_use]
    pub fn from_rows<I, S>(rows: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            rows: rows
                .into_iter()
                .map(|row| row.as_ref().chars().collect())
                .collect(),
        }
    }

    /// Parses a multi-line map, ignoring blank lines before and after it.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let rows: Vec<Vec<char>> = text.lines().map(|line| line.chars().collect()).collect();
        let start = rows
            .iter()
            .position(|row| !row.is_empty())
            .unwrap_or(rows.len());
        let end = rows
            .iter()
            .rposition(|row| !row.is_empty())
            .map_or(start, |last| last + 1);

        Self {
            rows: rows[start..end].to_vec(),
        }
    }

    /// Symbol rows in reading order.
    #[must_use]
    pub fn rows(&self) -> &[Vec<char>] {
        &self.rows
    }

    /// Number of rows.
    #[must_use]
    pub fn height(&self) -> usize {
        self.rows.len()
    }
}

/// Reasons a level fails to compile.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum MapError {
    /// The grid holds no symbols.
    #[error("map grid is empty")]
    EmptyGrid,
    /// The grid dimensions exceed the addressable tile range.
    #[error("map grid of {width}x{height} tiles is too large")]
    TooLarge {
        /// Number of columns.
        width: usize,
        /// Number of rows.
        height: usize,
    },
    /// A row differs in length from the first row.
    #[error("row {row} has {found} symbols, expected {expected}")]
    MalformedGrid {
        /// Zero-based row index.
        row: usize,
        /// Length of the first row.
        expected: usize,
        /// Length of the offending row.
        found: usize,
    },
    /// A cell uses a symbol the catalog does not declare.
    #[error("symbol `{symbol}` at ({column}, {row}) is not declared")]
    UnknownSymbol {
        /// Offending symbol.
        symbol: char,
        /// Zero-based column.
        column: usize,
        /// Zero-based row.
        row: usize,
    },
    /// The default terrain symbol is missing or names a complex tile.
    #[error("default symbol `{symbol}` does not name a plain terrain tile")]
    MissingDefault {
        /// Declared default symbol.
        symbol: char,
    },
    /// A complex tile lacks an alias naming plain terrain.
    #[error("complex symbol `{symbol}` has no plain terrain alias")]
    MissingAlias {
        /// Complex symbol.
        symbol: char,
    },
    /// A complex tile name does not correspond to any entity.
    #[error("complex tile `{name}` does not name a known entity")]
    UnknownEntity {
        /// Tile name.
        name: String,
    },
    /// A turret's surroundings do not single out one facing.
    #[error("turret at ({column}, {row}) has {candidates} equally near open directions")]
    AmbiguousFacing {
        /// Zero-based column.
        column: i32,
        /// Zero-based row.
        row: i32,
        /// Number of tied directions, zero when fully enclosed.
        candidates: usize,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum EntityKind {
    Player,
    Turret,
    PatrolVessel,
    Collectible(CollectibleKind),
}

impl EntityKind {
    fn from_tile_name(name: &str) -> Option<Self> {
        match name {
            "player" => Some(Self::Player),
            "cannon" | "turret" => Some(Self::Turret),
            "ship" | "patrol" => Some(Self::PatrolVessel),
            "health" => Some(Self::Collectible(CollectibleKind::Health)),
            "treasure" | "score" => Some(Self::Collectible(CollectibleKind::Score)),
            _ => None,
        }
    }
}

/// Terrain resolved for a single cell.
#[derive(Clone, Copy, Debug)]
struct ResolvedTerrain<'a> {
    descriptor: &'a TileDescriptor,
    aliased: bool,
}

/// Terrain view of the whole grid used for probing neighbors.
#[derive(Debug)]
struct TerrainLayout<'a> {
    width: usize,
    height: usize,
    cells: Vec<ResolvedTerrain<'a>>,
    void: &'a TileDescriptor,
}

impl<'a> TerrainLayout<'a> {
    fn get(&self, position: TilePosition) -> Option<ResolvedTerrain<'a>> {
        let column = usize::try_from(position.column()).ok()?;
        let row = usize::try_from(position.row()).ok()?;
        if column >= self.width || row >= self.height {
            return None;
        }
        self.cells.get(row * self.width + column).copied()
    }

    fn passable(&self, position: TilePosition) -> bool {
        self.get(position)
            .map_or(false, |terrain| terrain.descriptor.passable())
    }

    fn initial(&self, position: TilePosition) -> char {
        self.get(position)
            .map_or(self.void, |terrain| terrain.descriptor)
            .initial()
    }

    fn signature(&self, position: TilePosition) -> NeighborSignature {
        NeighborSignature::new(
            self.initial(position.step(Facing::Left, 1)),
            self.initial(position.step(Facing::Right, 1)),
            self.initial(position.step(Facing::Up, 1)),
            self.initial(position.step(Facing::Down, 1)),
        )
    }
}

/// Compiles symbol grids into levels.
///
/// The compiler owns the random source used for patrol-vessel headings so a
/// given seed always reproduces the same level.
#[derive(Clone, Debug)]
pub struct Compiler {
    rng: ChaCha8Rng,
}

impl Compiler {
    /// Creates a compiler whose random choices derive from `seed`.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Compiles `raw` against `catalog`, selecting sprites from `variants`.
    pub fn compile<V>(
        &mut self,
        raw: &RawGrid,
        catalog: &TileCatalog,
        variants: &V,
    ) -> Result<CompiledLevel, MapError>
    where
        V: SpriteVariants + ?Sized,
    {
        let (width, height) = validate_shape(raw)?;
        let default_symbol = catalog.default_symbol();
        let default = catalog
            .get(default_symbol)
            .filter(|descriptor| !descriptor.is_complex())
            .ok_or(MapError::MissingDefault {
                symbol: default_symbol,
            })?;

        let mut cells = Vec::with_capacity(width * height);
        let mut entities = Vec::new();
        for (row, symbols) in raw.rows().iter().enumerate() {
            for (column, &symbol) in symbols.iter().enumerate() {
                let descriptor = catalog.get(symbol).ok_or(MapError::UnknownSymbol {
                    symbol,
                    column,
                    row,
                })?;

                if descriptor.is_complex() {
                    let kind = EntityKind::from_tile_name(descriptor.name()).ok_or_else(|| {
                        MapError::UnknownEntity {
                            name: descriptor.name().to_owned(),
                        }
                    })?;
                    entities.push((to_position(column, row), kind));
                    cells.push(ResolvedTerrain {
                        descriptor: resolve_alias(catalog, symbol, descriptor)?,
                        aliased: true,
                    });
                } else {
                    cells.push(ResolvedTerrain {
                        descriptor,
                        aliased: false,
                    });
                }
            }
        }

        let layout = TerrainLayout {
            width,
            height,
            cells,
            void: default,
        };

        let mut spawns = Vec::with_capacity(entities.len());
        for (cell, kind) in entities {
            spawns.push(self.spawn_record(&layout, cell, kind)?);
        }

        let render_cells = (0..height)
            .flat_map(|row| (0..width).map(move |column| to_position(column, row)))
            .map(|position| render_cell(&layout, position, default, variants))
            .collect();
        let void = MapCell::new(default.name(), SpriteKey::new(default.name()), false);
        let too_large = MapError::TooLarge { width, height };
        let grid = MapGrid::new(
            u32::try_from(width).map_err(|_| too_large.clone())?,
            u32::try_from(height).map_err(|_| too_large.clone())?,
            render_cells,
            void,
        )
        .ok_or(too_large)?;

        debug!(width, height, spawns = spawns.len(), "map_compiled");
        Ok(CompiledLevel { grid, spawns })
    }

    fn spawn_record(
        &mut self,
        layout: &TerrainLayout<'_>,
        cell: TilePosition,
        kind: EntityKind,
    ) -> Result<SpawnRecord, MapError> {
        Ok(match kind {
            EntityKind::Player => SpawnRecord::Player { cell },
            EntityKind::Turret => SpawnRecord::Turret {
                cell,
                facing: infer_turret_facing(layout, cell)?,
            },
            EntityKind::PatrolVessel => SpawnRecord::PatrolVessel {
                cell,
                facing: Facing::ALL[self.rng.gen_range(0..Facing::ALL.len())],
            },
            EntityKind::Collectible(kind) => SpawnRecord::Collectible { cell, kind },
        })
    }
}

fn validate_shape(raw: &RawGrid) -> Result<(usize, usize), MapError> {
    let width = raw.rows().first().map_or(0, Vec::len);
    if width == 0 {
        return Err(MapError::EmptyGrid);
    }

    for (row, symbols) in raw.rows().iter().enumerate() {
        if symbols.len() != width {
            return Err(MapError::MalformedGrid {
                row,
                expected: width,
                found: symbols.len(),
            });
        }
    }

    let height = raw.height();
    if i32::try_from(width).is_err() || i32::try_from(height).is_err() {
        return Err(MapError::TooLarge { width, height });
    }
    Ok((width, height))
}

// Only called once the shape has been validated to fit in `i32`.
#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
fn to_position(column: usize, row: usize) -> TilePosition {
    TilePosition::new(column as i32, row as i32)
}

fn resolve_alias<'a>(
    catalog: &'a TileCatalog,
    symbol: char,
    descriptor: &TileDescriptor,
) -> Result<&'a TileDescriptor, MapError> {
    descriptor
        .alias()
        .and_then(|alias| catalog.get(alias))
        .filter(|terrain| !terrain.is_complex())
        .ok_or(MapError::MissingAlias { symbol })
}

fn infer_turret_facing(layout: &TerrainLayout<'_>, cell: TilePosition) -> Result<Facing, MapError> {
    let mut nearest: Option<i32> = None;
    let mut candidates: Vec<Facing> = Vec::new();

    for facing in Facing::ALL {
        let Some(depth) =
            (1..=FACING_SEARCH_DEPTH).find(|depth| layout.passable(cell.step(facing, *depth)))
        else {
            continue;
        };

        match nearest {
            Some(best) if depth > best => {}
            Some(best) if depth == best => candidates.push(facing),
            _ => {
                nearest = Some(depth);
                candidates.clear();
                candidates.push(facing);
            }
        }
    }

    match candidates.as_slice() {
        [facing] => Ok(*facing),
        _ => {
            error!(
                column = cell.column(),
                row = cell.row(),
                candidates = candidates.len(),
                "turret_facing_ambiguous"
            );
            Err(MapError::AmbiguousFacing {
                column: cell.column(),
                row: cell.row(),
                candidates: candidates.len(),
            })
        }
    }
}

fn render_cell<V>(
    layout: &TerrainLayout<'_>,
    position: TilePosition,
    default: &TileDescriptor,
    variants: &V,
) -> MapCell
where
    V: SpriteVariants + ?Sized,
{
    let Some(terrain) = layout.get(position) else {
        return MapCell::new(default.name(), SpriteKey::new(default.name()), false);
    };
    let descriptor = terrain.descriptor;

    // Entity markers take the plain appearance of the terrain they stand on.
    if terrain.aliased {
        return MapCell::new(
            descriptor.name(),
            SpriteKey::new(descriptor.name()),
            descriptor.passable(),
        );
    }

    let key = VariantKey::new(descriptor.name(), layout.signature(position));
    let sprite = if variants.contains_variant(&key) {
        key.to_sprite_key()
    } else {
        if descriptor.name() != default.name() {
            warn!(
                tile = descriptor.name(),
                variant = %key,
                column = position.column(),
                row = position.row(),
                "sprite_variant_missing"
            );
        }
        SpriteKey::new(default.name())
    };

    MapCell::new(descriptor.name(), sprite, descriptor.passable())
}
