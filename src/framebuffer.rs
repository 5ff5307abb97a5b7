use std::fmt;

pub const WIDTH: usize = 64;
pub const HEIGHT: usize = 32;

/// 64x32 monochrome pixels, row-major.
#[derive(Clone, PartialEq, Eq)]
pub struct Framebuffer {
    cells: [bool; WIDTH * HEIGHT],
}

impl Default for Framebuffer {
    fn default() -> Self {
        Self {
            cells: [false; WIDTH * HEIGHT],
        }
    }
}

impl Framebuffer {
    pub fn clear(&mut self) {
        self.cells = [false; WIDTH * HEIGHT];
    }

    /// Flips the pixel at (x, y). Returns true if a lit pixel was turned off.
    /// Coordinates outside the buffer are ignored.
    pub fn toggle(&mut self, x: usize, y: usize) -> bool {
        if x >= WIDTH || y >= HEIGHT {
            return false;
        }
        let cell = &mut self.cells[y * WIDTH + x];
        let collided = *cell;
        *cell ^= true;
        collided
    }

    pub fn get(&self, x: usize, y: usize) -> bool {
        x < WIDTH && y < HEIGHT && self.cells[y * WIDTH + x]
    }

    pub fn as_slice(&self) -> &[bool] {
        &self.cells
    }

    pub fn rows(&self) -> impl Iterator<Item = &[bool]> {
        self.cells.chunks_exact(WIDTH)
    }

    pub fn lit(&self) -> usize {
        self.cells.iter().filter(|&&on| on).count()
    }
}

impl fmt::Display for Framebuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            for &on in row {
                f.write_str(if on { "#" } else { "." })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Framebuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Framebuffer [lit: {}]", self.lit())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_reports_collision_only_when_turning_off() {
        let mut fb = Framebuffer::default();
        assert!(!fb.toggle(3, 4));
        assert!(fb.get(3, 4));
        assert!(fb.toggle(3, 4));
        assert!(!fb.get(3, 4));
    }

    #[test]
    fn toggle_outside_is_ignored() {
        let mut fb = Framebuffer::default();
        assert!(!fb.toggle(WIDTH, 0));
        assert!(!fb.toggle(0, HEIGHT));
        assert_eq!(fb.lit(), 0);
    }

    #[test]
    fn clear() {
        let mut fb = Framebuffer::default();
        fb.toggle(0, 0);
        fb.toggle(63, 31);
        assert_eq!(fb.lit(), 2);
        fb.clear();
        assert_eq!(fb, Framebuffer::default());
    }

    #[test]
    fn display_renders_rows() {
        let mut fb = Framebuffer::default();
        fb.toggle(1, 0);
        let text = fb.to_string();
        let first = text.lines().next().unwrap();
        assert_eq!(first.len(), WIDTH);
        assert!(first.starts_with(".#."));
        assert_eq!(text.lines().count(), HEIGHT);
    }
}
