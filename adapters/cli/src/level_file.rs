//! TOML level files.
//!
//! A level file declares the default terrain symbol, the map itself and one
//! `[tiles."<symbol>"]` table per symbol used by the map:
//!
//! ```toml
//! default = "."
//! map = """
//! ##C##
//! ..P..
//! """
//!
//! [tiles."."]
//! name = "water"
//! passable = true
//!
//! [tiles."C"]
//! name = "cannon"
//! complex = true
//! act_as = "#"
//! ```
//!
//! Available autotile variants come from `[sprites] variants` and from the
//! `*.png` stems found in `[sprites] sprite_dir`, resolved relative to the
//! level file. Listed variants must read `{tile}-{signature}`; directory
//! stems that do not are plain sprites and are skipped.

use std::{
    collections::{BTreeMap, BTreeSet},
    fs,
    path::{Path, PathBuf},
};

use anyhow::{bail, Context, Result};
use pirate_flow_core::CompiledLevel;
use pirate_flow_map_compiler::{Compiler, RawGrid, TileCatalog, TileDescriptor, VariantKey};
use serde::Deserialize;
use tracing::{debug, info};

/// Parsed contents of a level file.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct LevelFile {
    default: String,
    map: String,
    tiles: BTreeMap<String, TileEntry>,
    #[serde(default)]
    sprites: SpriteSection,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TileEntry {
    name: String,
    #[serde(default)]
    passable: bool,
    #[serde(default)]
    complex: bool,
    act_as: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct SpriteSection {
    variants: Vec<String>,
    sprite_dir: Option<PathBuf>,
}

impl LevelFile {
    /// Reads and parses the level file at `path`.
    pub(crate) fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read level file {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("invalid level file {}", path.display()))
    }

    pub(crate) fn parse(text: &str) -> Result<Self> {
        toml::from_str(text).context("level file is not valid TOML")
    }

    /// Builds the tile catalog declared by the `[tiles]` tables.
    pub(crate) fn catalog(&self) -> Result<TileCatalog> {
        let mut catalog = TileCatalog::new(symbol(&self.default)?);
        for (key, entry) in &self.tiles {
            let alias = entry.act_as.as_deref().map(symbol).transpose()?;
            let descriptor =
                TileDescriptor::new(entry.name.clone(), entry.passable, entry.complex, alias);
            if catalog.insert(symbol(key)?, descriptor).is_some() {
                bail!("tile symbol `{key}` is declared twice");
            }
        }
        Ok(catalog)
    }

    /// Collects the sprite variants available to the autotiler.
    pub(crate) fn variants(&self, base: &Path) -> Result<BTreeSet<VariantKey>> {
        let mut variants = self
            .sprites
            .variants
            .iter()
            .map(|name| {
                name.parse::<VariantKey>()
                    .with_context(|| format!("invalid sprite variant `{name}`"))
            })
            .collect::<Result<BTreeSet<_>>>()?;

        if let Some(sprite_dir) = &self.sprites.sprite_dir {
            let directory = base.join(sprite_dir);
            let entries = fs::read_dir(&directory).with_context(|| {
                format!("failed to scan sprite directory {}", directory.display())
            })?;
            for entry in entries {
                let path = entry
                    .with_context(|| format!("failed to scan sprite directory {}", directory.display()))?
                    .path();
                if !path.extension().is_some_and(|extension| extension == "png") {
                    continue;
                }
                let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) else {
                    continue;
                };
                match stem.parse::<VariantKey>() {
                    Ok(key) => {
                        let _ = variants.insert(key);
                    }
                    Err(error) => debug!(%error, "sprite_skipped"),
                }
            }
        }

        Ok(variants)
    }

    /// Compiles the map, resolving the sprite directory relative to `base`.
    pub(crate) fn compile(&self, base: &Path, seed: u64) -> Result<CompiledLevel> {
        let catalog = self.catalog()?;
        let variants = self.variants(base)?;
        Compiler::with_seed(seed)
            .compile(&RawGrid::parse(&self.map), &catalog, &variants)
            .context("level map failed to compile")
    }
}

/// Loads and compiles the level file at `path`.
pub(crate) fn load_level(path: &Path, seed: u64) -> Result<CompiledLevel> {
    let file = LevelFile::load(path)?;
    let base = path.parent().unwrap_or_else(|| Path::new("."));
    let level = file
        .compile(base, seed)
        .with_context(|| format!("failed to compile level {}", path.display()))?;

    info!(
        level = %path.display(),
        width = level.grid.width(),
        height = level.grid.height(),
        spawns = level.spawns.len(),
        "level_loaded"
    );
    Ok(level)
}

fn symbol(key: &str) -> Result<char> {
    let mut chars = key.chars();
    match (chars.next(), chars.next()) {
        (Some(symbol), None) => Ok(symbol),
        _ => bail!("tile symbol `{key}` must be exactly one character"),
    }
}

#[cfg(test)]
mod tests {
    use pirate_flow_core::{Facing, SpawnRecord, TilePosition};

    use super::*;

    const COVE: &str = r##"
default = "."
map = """
##C##
#...#
..P..
"""

[tiles."."]
name = "water"
passable = true

[tiles."#"]
name = "sand"

[tiles."C"]
name = "cannon"
complex = true
act_as = "#"

[tiles."P"]
name = "player"
complex = true
act_as = "."

[sprites]
variants = ["sand-ssww"]
"##;

    #[test]
    fn cove_compiles_with_listed_variants() {
        let level = LevelFile::parse(COVE)
            .expect("cove parses")
            .compile(Path::new("."), 0)
            .expect("cove compiles");

        assert_eq!(level.grid.width(), 5);
        assert_eq!(level.grid.height(), 3);
        assert!(level.spawns.contains(&SpawnRecord::Turret {
            cell: TilePosition::new(2, 0),
            facing: Facing::Down,
        }));
        assert!(level.spawns.contains(&SpawnRecord::Player {
            cell: TilePosition::new(2, 2),
        }));
        assert_eq!(
            level.grid.cell(TilePosition::new(1, 0)).sprite().as_str(),
            "sand-ssww"
        );
    }

    #[test]
    fn multi_character_symbols_are_rejected() {
        let text = COVE.replace("[tiles.\"#\"]", "[tiles.\"##\"]");
        let error = LevelFile::parse(&text)
            .expect("still valid TOML")
            .catalog()
            .expect_err("two-character symbol");

        assert!(error.to_string().contains("exactly one character"));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let text = format!("{COVE}\n[sounds]\nhit = \"boom.wav\"\n");
        assert!(LevelFile::parse(&text).is_err());
    }

    #[test]
    fn sprite_directory_contributes_png_stems() {
        let directory = tempfile::tempdir().expect("temporary directory");
        let sprites = directory.path().join("sprites");
        fs::create_dir(&sprites).expect("sprite directory");
        for name in ["sand-wwss.png", "water.png", "notes.txt"] {
            fs::write(sprites.join(name), b"").expect("sprite file");
        }

        let text = format!("{COVE}sprite_dir = \"sprites\"\n");
        let variants = LevelFile::parse(&text)
            .expect("level parses")
            .variants(directory.path())
            .expect("sprite directory scans");

        let expected: BTreeSet<VariantKey> = ["sand-ssww", "sand-wwss"]
            .into_iter()
            .map(|name| name.parse().expect("well-formed variant"))
            .collect();
        assert_eq!(variants, expected);
    }

    #[test]
    fn malformed_listed_variant_is_rejected() {
        let text = COVE.replace("\"sand-ssww\"", "\"sand-ssw\"");
        let error = LevelFile::parse(&text)
            .expect("still valid TOML")
            .variants(Path::new("."))
            .expect_err("three-letter signature");

        assert!(format!("{error:#}").contains("invalid sprite variant `sand-ssw`"));
    }

    #[test]
    fn bundled_harbor_level_compiles() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../levels/harbor.toml");

        let level = load_level(&path, 7).expect("harbor compiles");

        let turrets = level
            .spawns
            .iter()
            .filter(|spawn| matches!(spawn, SpawnRecord::Turret { .. }))
            .count();
        assert_eq!(turrets, 5);
        assert!(level.spawns.contains(&SpawnRecord::Player {
            cell: TilePosition::new(8, 7),
        }));
    }
}
