/// Row-major flat grid. `h` rows of `w` columns; segment grids use one row
/// per lateral sample and one column per longitudinal sample.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid<T> {
    pub data: Vec<T>,
    pub w: usize,
    pub h: usize,
}

impl<T: Copy + Default> Grid<T> {
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            data: vec![T::default(); w * h],
            w,
            h,
        }
    }

    pub fn from_fn(w: usize, h: usize, mut f: impl FnMut(usize, usize) -> T) -> Self {
        let mut data = Vec::with_capacity(w * h);
        for y in 0..h {
            for x in 0..w {
                data.push(f(x, y));
            }
        }
        Self { data, w, h }
    }

    #[inline]
    pub fn idx(&self, x: usize, y: usize) -> usize {
        debug_assert!(x < self.w && y < self.h);
        y * self.w + x
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> T {
        self.data[self.idx(x, y)]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, v: T) {
        let i = self.idx(x, y);
        self.data[i] = v;
    }

    /// `(rows, columns)`.
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.h, self.w)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn row(&self, y: usize) -> &[T] {
        &self.data[y * self.w..(y + 1) * self.w]
    }
}

/// Concatenate grids with equal row counts side by side.
/// Returns None when row counts differ.
pub fn stitch<T: Copy + Default>(grids: &[Grid<T>]) -> Option<Grid<T>> {
    let h = grids.first().map_or(0, |g| g.h);
    if grids.iter().any(|g| g.h != h) {
        return None;
    }
    let w = grids.iter().map(|g| g.w).sum();
    let mut data = Vec::with_capacity(w * h);
    for y in 0..h {
        for g in grids {
            data.extend_from_slice(g.row(y));
        }
    }
    Some(Grid { data, w, h })
}
