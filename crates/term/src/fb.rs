//! Framebuffer of styled cells, addressed either by terminal cell or by
//! board tile.
//!
//! A board tile is [`TILE_W`] cells wide so the grid looks square on a
//! terminal whose glyphs are twice as tall as they are wide.

use crate::types::Coordinate;

/// Terminal columns per board tile
pub const TILE_W: u16 = 2;

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Background of every playfield tile
pub const FIELD_BG: Rgb = Rgb::new(30, 60, 30);

/// Background of text outside the playfield
pub const SCREEN_BG: Rgb = Rgb::new(0, 0, 0);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellStyle {
    pub fg: Rgb,
    pub bg: Rgb,
    pub bold: bool,
}

impl CellStyle {
    pub const fn new(fg: Rgb, bg: Rgb) -> Self {
        Self { fg, bg, bold: false }
    }

    /// Foreground over the playfield background
    pub const fn on_field(fg: Rgb) -> Self {
        Self::new(fg, FIELD_BG)
    }

    /// Foreground over the plain screen background
    pub const fn on_screen(fg: Rgb) -> Self {
        Self::new(fg, SCREEN_BG)
    }

    pub const fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn into_cell(self, ch: char) -> Cell {
        Cell { ch, style: self }
    }
}

impl Default for CellStyle {
    fn default() -> Self {
        Self::on_screen(Rgb::new(220, 220, 220))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub style: CellStyle,
}

impl Default for Cell {
    fn default() -> Self {
        CellStyle::default().into_cell(' ')
    }
}

/// The two characters drawn for one board tile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph(pub [char; TILE_W as usize]);

impl Glyph {
    pub const BLANK: Glyph = Glyph([' ', ' ']);

    pub const fn new(left: char, right: char) -> Self {
        Self([left, right])
    }

    /// Same character in both columns
    pub const fn solid(ch: char) -> Self {
        Self([ch, ch])
    }

    /// A single character padded with a space
    pub const fn single(ch: char) -> Self {
        Self([ch, ' '])
    }
}

impl std::fmt::Display for Glyph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.iter().try_for_each(|ch| write!(f, "{}", ch))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::default(); usize::from(width) * usize::from(height)],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Resize, keeping the allocation when possible
    pub fn resize(&mut self, width: u16, height: u16) {
        if self.width == width && self.height == height {
            return;
        }
        self.width = width;
        self.height = height;
        self.cells
            .resize(usize::from(width) * usize::from(height), Cell::default());
    }

    #[inline(always)]
    fn idx(&self, x: u16, y: u16) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(usize::from(y) * usize::from(self.width) + usize::from(x))
    }

    pub fn get(&self, x: u16, y: u16) -> Option<Cell> {
        self.idx(x, y).map(|i| self.cells[i])
    }

    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        if let Some(i) = self.idx(x, y) {
            self.cells[i] = cell;
        }
    }

    pub fn clear(&mut self, cell: Cell) {
        self.cells.fill(cell);
    }

    pub fn put_str(&mut self, x: u16, y: u16, s: &str, style: CellStyle) {
        for (dx, ch) in s.chars().enumerate() {
            let Ok(dx) = u16::try_from(dx) else {
                break;
            };
            let cx = x.saturating_add(dx);
            if cx >= self.width {
                break;
            }
            self.set(cx, y, style.into_cell(ch));
        }
    }

    /// Write `text` centered on row `y`
    pub fn put_centered(&mut self, y: u16, text: &str, style: CellStyle) {
        let len = u16::try_from(text.chars().count()).unwrap_or(u16::MAX);
        self.put_str(self.width.saturating_sub(len) / 2, y, text, style);
    }

    /// Terminal cell of the left column of `tile`, for a board whose tile
    /// (0, 0) sits at `origin`
    fn tile_cell(origin: (u16, u16), tile: Coordinate) -> Option<(u16, u16)> {
        let x = u16::try_from(tile.x).ok()?;
        let y = u16::try_from(tile.y).ok()?;
        Some((
            origin.0.checked_add(x.checked_mul(TILE_W)?)?,
            origin.1.checked_add(y)?,
        ))
    }

    /// Paint one board tile; tiles left of or above the board are skipped
    pub fn put_tile(
        &mut self,
        origin: (u16, u16),
        tile: Coordinate,
        glyph: Glyph,
        style: CellStyle,
    ) {
        let Some((x, y)) = Self::tile_cell(origin, tile) else {
            return;
        };
        for (dx, ch) in (0..TILE_W).zip(glyph.0) {
            self.set(x.saturating_add(dx), y, style.into_cell(ch));
        }
    }

    /// Glyph currently shown on `tile`, None when it is off screen
    pub fn tile_glyph(&self, origin: (u16, u16), tile: Coordinate) -> Option<Glyph> {
        let (x, y) = Self::tile_cell(origin, tile)?;
        let left = self.get(x, y)?.ch;
        let right = self.get(x.checked_add(1)?, y)?.ch;
        Some(Glyph::new(left, right))
    }

    /// Text of one row, for tests and debugging
    pub fn row_text(&self, y: u16) -> String {
        (0..self.width)
            .filter_map(|x| self.get(x, y))
            .map(|c| c.ch)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_str_clips_at_edge() {
        let mut fb = FrameBuffer::new(4, 1);
        fb.put_str(2, 0, "abc", CellStyle::default());
        assert_eq!(fb.row_text(0), "  ab");
    }

    #[test]
    fn test_out_of_bounds_is_ignored() {
        let mut fb = FrameBuffer::new(2, 2);
        fb.set(5, 5, Cell::default());
        assert_eq!(fb.get(5, 5), None);
    }

    #[test]
    fn test_resize() {
        let mut fb = FrameBuffer::new(2, 2);
        fb.resize(3, 1);
        assert_eq!((fb.width(), fb.height()), (3, 1));
        assert_eq!(fb.row_text(0), "   ");
    }

    #[test]
    fn test_tiles_are_two_columns_wide() {
        let mut fb = FrameBuffer::new(10, 3);
        let style = CellStyle::on_field(Rgb::new(255, 255, 255));
        fb.put_tile((1, 1), Coordinate::new(0, 0), Glyph::solid('#'), style);
        fb.put_tile((1, 1), Coordinate::new(2, 1), Glyph::single('@'), style);

        assert_eq!(fb.row_text(1), " ##       ");
        assert_eq!(fb.row_text(2), "     @    ");
        assert_eq!(fb.tile_glyph((1, 1), Coordinate::new(2, 1)), Some(Glyph::single('@')));
        assert_eq!(fb.get(1, 1).map(|c| c.style.bg), Some(FIELD_BG));
    }

    #[test]
    fn test_negative_and_clipped_tiles() {
        let mut fb = FrameBuffer::new(4, 1);
        fb.put_tile((0, 0), Coordinate::new(-1, 0), Glyph::solid('x'), CellStyle::default());
        fb.put_tile((0, 0), Coordinate::new(1, 0), Glyph::new('a', 'b'), CellStyle::default());
        fb.put_tile((0, 0), Coordinate::new(2, 0), Glyph::solid('z'), CellStyle::default());

        assert_eq!(fb.row_text(0), "  ab");
        assert_eq!(fb.tile_glyph((0, 0), Coordinate::new(-1, 0)), None);
        assert_eq!(fb.tile_glyph((0, 0), Coordinate::new(2, 0)), None);
    }

    #[test]
    fn test_put_centered() {
        let mut fb = FrameBuffer::new(9, 1);
        fb.put_centered(0, "abc", CellStyle::default());
        assert_eq!(fb.row_text(0), "   abc   ");
        assert_eq!(Glyph::new('[', ']').to_string(), "[]");
    }
}
