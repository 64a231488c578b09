use super::GridBuffer;

/// Two grids playing the "current" and "next" roles.
///
/// ```text
/// slots[current]     <- read by the stencil, clamped in place
/// slots[current ^ 1] <- written by the stencil
/// ```
///
/// [`DoubleBuffer::swap`] flips the roles without touching cell data.
#[derive(Debug, Clone)]
pub struct DoubleBuffer {
    slots: [GridBuffer; 2],
    current: usize,
}

impl DoubleBuffer {
    /// `initial` becomes the current grid; the next grid is allocated zeroed.
    pub fn new(initial: GridBuffer) -> Self {
        let next = GridBuffer::new(initial.dim());

        Self {
            slots: [initial, next],
            current: 0,
        }
    }

    pub fn current(&self) -> &GridBuffer {
        &self.slots[self.current]
    }

    pub fn current_mut(&mut self) -> &mut GridBuffer {
        &mut self.slots[self.current]
    }

    /// Borrow current for reading and next for writing at the same time.
    pub fn split_mut(&mut self) -> (&GridBuffer, &mut GridBuffer) {
        let (a, b) = self.slots.split_at_mut(1);
        if self.current == 0 {
            (&a[0], &mut b[0])
        } else {
            (&b[0], &mut a[0])
        }
    }

    pub fn swap(&mut self) {
        self.current ^= 1;
    }

    pub fn into_current(self) -> GridBuffer {
        let [a, b] = self.slots;
        if self.current == 0 {
            a
        } else {
            b
        }
    }
}
