use std::io::Write;

use anyhow::{Context, Result};
use pirate_flow_core::{ActorKind, CollectibleKind};
use pirate_flow_rendering::{RenderingBackend, Scene};

/// Draws scenes as ASCII frames.
#[derive(Debug)]
pub(crate) struct TextBackend<W> {
    out: W,
    frames: u64,
}

impl<W: Write> TextBackend<W> {
    pub(crate) fn new(out: W) -> Self {
        Self { out, frames: 0 }
    }

    pub(crate) fn frames(&self) -> u64 {
        self.frames
    }
}

impl<W: Write> RenderingBackend for TextBackend<W> {
    fn present(&mut self, scene: &Scene) -> Result<()> {
        let frame = render_frame(scene);
        self.out
            .write_all(frame.as_bytes())
            .and_then(|()| self.out.flush())
            .context("failed to write frame")?;
        self.frames += 1;
        Ok(())
    }
}

fn render_frame(scene: &Scene) -> String {
    let columns = scene.viewport.x as usize;
    let rows = scene.viewport.y as usize;
    let mut canvas = vec![vec![' '; columns]; rows];

    for tile in &scene.tiles {
        if let Some(slot) = canvas
            .get_mut(tile.row as usize)
            .and_then(|row| row.get_mut(tile.column as usize))
        {
            *slot = if tile.passable { '~' } else { '#' };
        }
    }

    // Later sprites sit on top.
    for sprite in &scene.sprites {
        let cell = sprite.position.round();
        if cell.x < 0.0 || cell.y < 0.0 {
            continue;
        }
        if let Some(slot) = canvas
            .get_mut(cell.y as usize)
            .and_then(|row| row.get_mut(cell.x as usize))
        {
            *slot = glyph(sprite.kind);
        }
    }

    let mut frame = String::with_capacity((columns + 1) * (rows + 1));
    for row in canvas {
        frame.extend(row);
        frame.push('\n');
    }

    let hud = &scene.hud;
    let status = if hud.game_over {
        "game over"
    } else if !hud.alive {
        "sinking"
    } else if !hud.started {
        "waiting"
    } else {
        "sailing"
    };
    frame.push_str(&format!(
        "score {} | energy {}/{} | achievements {} | {status}\n",
        hud.score,
        hud.energy,
        hud.max_energy,
        hud.achievements.len()
    ));
    frame
}

const fn glyph(kind: ActorKind) -> char {
    match kind {
        ActorKind::Player => '@',
        ActorKind::Turret => 'C',
        ActorKind::PatrolVessel => 'S',
        ActorKind::Projectile => '*',
        ActorKind::Collectible(CollectibleKind::Health) => '+',
        ActorKind::Collectible(CollectibleKind::Score) => '$',
        ActorKind::Explosion { .. } => 'x',
    }
}

#[cfg(test)]
mod tests {
    use glam::{UVec2, Vec2};
    use pirate_flow_core::{HudSnapshot, SpriteKey};
    use pirate_flow_rendering::{SceneSprite, SceneTile};

    use super::*;

    #[test]
    fn frame_overlays_sprites_on_terrain() {
        let scene = Scene {
            viewport: UVec2::new(3, 2),
            tiles: (0..2)
                .flat_map(|row| (0..3).map(move |column| tile(column, row, row == 1)))
                .collect(),
            sprites: vec![
                sprite(ActorKind::Player, 1.0, 1.0),
                sprite(ActorKind::Projectile, 2.2, 0.9),
                sprite(ActorKind::Turret, 7.0, 0.0),
            ],
            hud: HudSnapshot {
                score: 150,
                energy: 4,
                max_energy: 5,
                alive: true,
                started: true,
                game_over: false,
                achievements: Vec::new(),
            },
        };

        assert_eq!(
            render_frame(&scene),
            "###\n~@*\nscore 150 | energy 4/5 | achievements 0 | sailing\n"
        );
    }

    #[test]
    fn present_counts_written_frames() {
        let scene = Scene {
            viewport: UVec2::new(1, 1),
            tiles: vec![tile(0, 0, true)],
            sprites: Vec::new(),
            hud: HudSnapshot::default(),
        };
        let mut backend = TextBackend::new(Vec::new());

        backend.present(&scene).expect("in-memory writes succeed");
        backend.present(&scene).expect("in-memory writes succeed");

        assert_eq!(backend.frames(), 2);
        let written = String::from_utf8(backend.out).expect("frames are UTF-8");
        assert!(written.starts_with("~\nscore 0"));
        assert_eq!(written.matches("sinking").count(), 2);
    }

    fn tile(column: u32, row: u32, passable: bool) -> SceneTile {
        SceneTile {
            column,
            row,
            name: String::from(if passable { "water" } else { "sand" }),
            sprite: SpriteKey::new("water"),
            passable,
        }
    }

    fn sprite(kind: ActorKind, x: f32, y: f32) -> SceneSprite {
        SceneSprite {
            kind,
            sprite: SpriteKey::new("any"),
            position: Vec2::new(x, y),
            angle_degrees: 0.0,
            scale: 1.0,
        }
    }
}
