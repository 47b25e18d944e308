use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("write origin ({x}, {y}) is outside the grid bounds")]
    OutOfBounds { x: i32, y: i32 },
}

/// Inclusive cell rectangle that drawing and movement respect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Bounds {
    /// Bounds for a render area measured in pixels, given the pixel size of one glyph.
    pub fn measure(area_width: f64, area_height: f64, cell_width: f64, line_height: f64) -> Self {
        Self {
            left: 0,
            top: 0,
            right: (area_width / cell_width).floor() as i32,
            bottom: (area_height / line_height).floor() as i32,
        }
    }

    /// Bounds covering exactly `cols` x `rows` character cells.
    pub fn from_cells(cols: u16, rows: u16) -> Self {
        Self {
            left: 0,
            top: 0,
            right: cols.saturating_sub(1) as i32,
            bottom: rows.saturating_sub(1) as i32,
        }
    }

    pub fn width(&self) -> usize {
        (self.right - self.left + 1).max(0) as usize
    }

    pub fn height(&self) -> usize {
        (self.bottom - self.top + 1).max(0) as usize
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.left && x <= self.right && y >= self.top && y <= self.bottom
    }
}

/// Receives a full frame of text whenever the grid content changes.
pub trait RenderSink {
    fn present(&mut self, frame: &str);
}

pub struct Grid {
    bounds: Bounds,
    cells: Vec<Vec<char>>,
    last_flushed: Option<String>,
}

impl Grid {
    pub fn new(bounds: Bounds) -> Self {
        Self {
            bounds,
            cells: vec![vec![' '; bounds.width()]; bounds.height()],
            last_flushed: None,
        }
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn clear(&mut self) {
        for row in &mut self.cells {
            row.fill(' ');
        }
    }

    /// Writes `text` left to right from (x, y). Characters past the right
    /// edge are dropped; only the origin has to lie inside the bounds.
    pub fn draw(&mut self, x: i32, y: i32, text: &str) -> Result<(), GridError> {
        if !self.bounds.contains(x, y) {
            return Err(GridError::OutOfBounds { x, y });
        }
        let row_idx = (y - self.bounds.top) as usize;
        let col0 = (x - self.bounds.left) as usize;
        if let Some(row) = self.cells.get_mut(row_idx) {
            for (cell, ch) in row.iter_mut().skip(col0).zip(text.chars()) {
                *cell = ch;
            }
        }
        Ok(())
    }

    pub fn draw_center(&mut self, text: &str) -> Result<(), GridError> {
        let (x, y) = self.center_origin(text);
        self.draw(x, y, text)
    }

    /// Origin `draw_center` would use for `text`.
    pub fn center_origin(&self, text: &str) -> (i32, i32) {
        let len = text.chars().count() as i32;
        let x = if (len as usize) < self.bounds.width() {
            self.bounds.right / 2 - len / 2
        } else {
            self.bounds.left
        };
        (x, self.bounds.bottom / 2)
    }

    pub fn render(&self) -> String {
        self.cells
            .iter()
            .map(|row| row.iter().collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Pushes the grid to `sink` if it differs from the last flushed frame.
    /// Returns whether the sink was written.
    pub fn flush(&mut self, sink: &mut dyn RenderSink) -> bool {
        let text = self.render();
        if self.last_flushed.as_deref() == Some(text.as_str()) {
            return false;
        }
        sink.present(&text);
        self.last_flushed = Some(text);
        true
    }

    pub fn char_at(&self, x: i32, y: i32) -> Option<char> {
        if !self.bounds.contains(x, y) {
            return None;
        }
        self.cells
            .get((y - self.bounds.top) as usize)
            .and_then(|row| row.get((x - self.bounds.left) as usize))
            .copied()
    }

    pub fn row(&self, y: i32) -> Option<String> {
        if y < self.bounds.top || y > self.bounds.bottom {
            return None;
        }
        self.cells
            .get((y - self.bounds.top) as usize)
            .map(|row| row.iter().collect())
    }
}
