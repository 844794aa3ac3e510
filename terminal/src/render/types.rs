use ratatui::style::Style;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CharDimensions {
    pub horizontal: usize,
    pub vertical: usize,
}

impl CharDimensions {
    pub fn new(horizontal: usize, vertical: usize) -> Self {
        Self { horizontal, vertical }
    }
}

/// Tile for a pixel coordinate, or `None` when it falls off the board.
pub fn pixel_to_cell(x: f64, y: f64, tile_size: f64, grid_size: usize) -> Option<(usize, usize)> {
    let cx = (x / tile_size).floor();
    let cy = (y / tile_size).floor();
    if cx < 0.0 || cy < 0.0 || cx >= grid_size as f64 || cy >= grid_size as f64 {
        return None;
    }
    Some((cx as usize, cy as usize))
}

#[derive(Clone, Debug)]
pub struct CharGrid {
    grid: Vec<Vec<char>>,
    styles: Vec<Vec<Style>>,
    logical_width: usize,
    logical_height: usize,
    char_dims: CharDimensions,
}

impl CharGrid {
    pub fn new(logical_width: usize, logical_height: usize, char_dims: CharDimensions) -> Self {
        let physical_width = logical_width * char_dims.horizontal;
        let physical_height = logical_height * char_dims.vertical;
        Self {
            grid: vec![vec![' '; physical_width]; physical_height],
            styles: vec![vec![Style::default(); physical_width]; physical_height],
            logical_width,
            logical_height,
            char_dims,
        }
    }

    pub fn set_logical_point(&mut self, x: usize, y: usize, pattern: &CharPattern) {
        let start_x = x * self.char_dims.horizontal;
        let start_y = y * self.char_dims.vertical;

        for (dy, row) in pattern.chars.iter().enumerate() {
            for (dx, &ch) in row.iter().enumerate() {
                let (py, px) = (start_y + dy, start_x + dx);
                if let Some(cell) = self.grid.get_mut(py).and_then(|r| r.get_mut(px)) {
                    *cell = ch;
                    self.styles[py][px] = pattern.style;
                }
            }
        }
    }

    /// Glyph at a physical (character) position
    pub fn char_at(&self, px: usize, py: usize) -> Option<char> {
        self.grid.get(py).and_then(|row| row.get(px)).copied()
    }

    pub fn styled_lines(&self) -> impl Iterator<Item = (&[char], &[Style])> {
        self.grid
            .iter()
            .zip(self.styles.iter())
            .map(|(chars, styles)| (chars.as_slice(), styles.as_slice()))
    }

    pub fn into_lines(self) -> Vec<Vec<char>> {
        self.grid
    }

    pub fn physical_width(&self) -> usize {
        self.logical_width * self.char_dims.horizontal
    }

    pub fn physical_height(&self) -> usize {
        self.logical_height * self.char_dims.vertical
    }
}

#[derive(Clone, Debug)]
pub struct CharPattern {
    pub chars: Vec<Vec<char>>,
    pub style: Style,
}

impl CharPattern {
    pub fn new(chars: Vec<Vec<char>>) -> Self {
        Self { chars, style: Style::default() }
    }

    pub fn single(ch: char, dims: CharDimensions) -> Self {
        Self::new(vec![vec![ch; dims.horizontal]; dims.vertical])
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }
}
