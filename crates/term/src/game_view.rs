//! GameView: maps a level snapshot and match status into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{LeaderboardEntry, LevelSnapshot, Phase};
use crate::fb::{CellStyle, FrameBuffer, Glyph, Rgb, TILE_W};

/// Rows above the board (HUD plus a gap).
const HUD_ROWS: u16 = 2;

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Everything a frame shows besides the board itself
#[derive(Debug, Clone, Copy)]
pub struct Screen<'a> {
    pub phase: Phase,
    pub snapshot: Option<&'a LevelSnapshot>,
    /// Best records, already ranked
    pub leaderboard: &'a [&'a LeaderboardEntry],
    /// Name typed so far, while a game over waits for one
    pub name_entry: Option<&'a str>,
}

const GROUND: CellStyle = CellStyle::on_field(Rgb::new(90, 90, 90));
const WALL: CellStyle = CellStyle::on_field(Rgb::new(150, 150, 160));
const BLOCK: CellStyle = CellStyle::on_field(Rgb::new(170, 120, 70));
const ITEM: CellStyle = CellStyle::on_field(Rgb::new(120, 200, 255)).bold();
const COIN: CellStyle = CellStyle::on_field(Rgb::new(255, 215, 0)).bold();
const BOMB: CellStyle = CellStyle::on_field(Rgb::new(255, 80, 60)).bold();
const ENEMY: CellStyle = CellStyle::on_field(Rgb::new(230, 60, 200)).bold();
const PLAYER: CellStyle = CellStyle::on_field(Rgb::new(255, 255, 255)).bold();
const TEXT: CellStyle = CellStyle::on_screen(Rgb::new(220, 220, 220));
const BANNER: CellStyle = CellStyle::on_screen(Rgb::new(255, 255, 0)).bold();

const WALL_GLYPH: Glyph = Glyph::solid('█');
const BLOCK_GLYPH: Glyph = Glyph::solid('▒');
const COIN_GLYPH: Glyph = Glyph::solid('$');
const BOMB_GLYPH: Glyph = Glyph::new('(', ')');
const DOOR_OPEN: Glyph = Glyph::new('[', ']');
const DOOR_SHUT: Glyph = Glyph::solid('#');

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnchorY {
    #[default]
    Center,
    Top,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct GameView {
    anchor_y: AnchorY,
}

impl GameView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Top-left terminal cell of the board, border ring included
    pub fn board_origin(&self, snap: &LevelSnapshot, viewport: Viewport) -> (u16, u16) {
        let (board_w, board_h) = board_size(snap);
        let x = viewport.width.saturating_sub(board_w) / 2;
        let y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(board_h + HUD_ROWS) / 2,
            AnchorY::Top => 0,
        };
        (x, y + HUD_ROWS)
    }

    /// Render a full frame into `fb`, resizing it to the viewport.
    pub fn render_into(&self, screen: &Screen<'_>, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(TEXT.into_cell(' '));

        match screen.snapshot {
            Some(snap) if screen.phase != Phase::Menu => {
                let origin = self.board_origin(snap, viewport);
                draw_board(fb, snap, origin);
                draw_hud(fb, snap, origin.0, origin.1 - HUD_ROWS);
                draw_overlay(fb, screen, viewport);
            }
            _ => draw_menu(fb, screen),
        }

        let help = "arrows/wasd move  space bomb  p pause  enter continue  x quit  q exit";
        fb.put_str(0, viewport.height.saturating_sub(1), help, TEXT);
    }
}

fn board_size(snap: &LevelSnapshot) -> (u16, u16) {
    let tiles_w = u16::try_from(snap.x_max + 2).unwrap_or(0);
    let tiles_h = u16::try_from(snap.y_max + 2).unwrap_or(0);
    (tiles_w * TILE_W, tiles_h)
}

/// Painter's order: later layers cover earlier ones.
fn draw_board(fb: &mut FrameBuffer, snap: &LevelSnapshot, origin: (u16, u16)) {
    for &c in &snap.ground {
        fb.put_tile(origin, c, Glyph::BLANK, GROUND);
    }
    let door = if snap.door_open { DOOR_OPEN } else { DOOR_SHUT };
    let items = [
        (snap.exit_door, door),
        (snap.bomb_power_up, Glyph::new('B', '+')),
        (snap.life_power_up, Glyph::new('L', '+')),
        (snap.invincibility_power_up, Glyph::new('I', '+')),
    ];
    for (c, glyph) in items {
        if let Some(c) = c {
            fb.put_tile(origin, c, glyph, ITEM);
        }
    }
    for &(_, c) in &snap.coins {
        fb.put_tile(origin, c, COIN_GLYPH, COIN);
    }
    for &(_, c) in &snap.blocks {
        fb.put_tile(origin, c, BLOCK_GLYPH, BLOCK);
    }
    for &c in &snap.fixed_walls {
        fb.put_tile(origin, c, WALL_GLYPH, WALL);
    }
    if let Some(c) = snap.bomb {
        fb.put_tile(origin, c, BOMB_GLYPH, BOMB);
    }
    for enemy in &snap.enemies {
        // Lower case marks an enemy on its last hit point
        let glyph = Glyph::single(if enemy.hp == 1 { 'e' } else { 'E' });
        fb.put_tile(origin, enemy.position, glyph, ENEMY);
    }
    let player = if snap.player.invincible {
        Glyph::new('@', '*')
    } else {
        Glyph::single('@')
    };
    fb.put_tile(origin, snap.player.position, player, PLAYER);
}

fn draw_hud(fb: &mut FrameBuffer, snap: &LevelSnapshot, x: u16, y: u16) {
    let p = &snap.player;
    let hud = format!(
        "LEVEL {}  SCORE {}  LIVES {}  RANGE {}{}",
        snap.level,
        p.score,
        p.health,
        p.bomb_range,
        if p.invincible { "  INVINCIBLE" } else { "" }
    );
    fb.put_str(x, y, &hud, TEXT);
}

fn draw_overlay(fb: &mut FrameBuffer, screen: &Screen<'_>, viewport: Viewport) {
    let mid = viewport.height / 2;
    match screen.phase {
        Phase::Paused => fb.put_centered(mid, " PAUSED ", BANNER),
        Phase::LevelCleared => {
            fb.put_centered(mid, " LEVEL CLEARED ", BANNER);
            if let Some(name) = screen.name_entry {
                let prompt = format!(" save as: {}_ ", name);
                fb.put_centered(mid + 1, &prompt, TEXT);
            } else {
                fb.put_centered(mid + 1, " enter: next level  x: save and quit ", TEXT);
            }
        }
        Phase::GameOver => {
            fb.put_centered(mid, " GAME OVER ", BANNER);
            if let Some(name) = screen.name_entry {
                let prompt = format!(" name: {}_ ", name);
                fb.put_centered(mid + 1, &prompt, TEXT);
            } else {
                fb.put_centered(mid + 1, " press x for the menu ", TEXT);
            }
        }
        Phase::Menu | Phase::LevelActive => {}
    }
}

fn draw_menu(fb: &mut FrameBuffer, screen: &Screen<'_>) {
    fb.put_centered(1, "B O M B E R", BANNER);
    fb.put_centered(3, "press enter to start", TEXT);

    fb.put_centered(5, "NAME      SCORE  LEVEL", TEXT);
    for (row, entry) in (6u16..).zip(screen.leaderboard.iter().take(10)) {
        let line = format!("{:<8} {:>6} {:>6}", entry.name, entry.score, entry.level);
        fb.put_centered(row, &line, TEXT);
    }
}
