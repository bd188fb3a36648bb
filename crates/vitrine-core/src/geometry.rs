use std::ops::{Add, Mul, Sub};

/// Axis-aligned box. `y` grows downwards, as in page coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect<T> {
    pub x: T,
    pub y: T,
    pub width: T,
    pub height: T,
}

impl<T> Rect<T> {
    pub fn new(x: T, y: T, width: T, height: T) -> Self {
        Rect {
            x,
            y,
            width,
            height,
        }
    }
}

impl<T: Copy + Add<Output = T> + Sub<Output = T>> Rect<T> {
    #[inline]
    pub fn top(&self) -> T {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> T {
        self.y + self.height
    }

    /// The same box shifted up by `dy`, e.g. document space to viewport space.
    pub fn shifted_up(self, dy: T) -> Self {
        Rect {
            y: self.y - dy,
            ..self
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Size<T> {
    pub width: T,
    pub height: T,
}

impl<T> Size<T> {
    pub fn new(width: T, height: T) -> Self {
        Size { width, height }
    }

    pub fn cast<U: From<T>>(self) -> Size<U> {
        Size {
            width: U::from(self.width),
            height: U::from(self.height),
        }
    }
}

impl<T: Mul + Copy> Mul<T> for Size<T> {
    type Output = Size<<T as Mul>::Output>;

    fn mul(self, rhs: T) -> Self::Output {
        Size {
            width: self.width * rhs,
            height: self.height * rhs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_edges() {
        let rect = Rect::new(0.0, 1000.0, 200.0, 50.0);
        assert_eq!(rect.top(), 1000.0);
        assert_eq!(rect.bottom(), 1050.0);
        assert_eq!(rect.shifted_up(400.0).top(), 600.0);
    }

    #[test]
    fn test_size_cast() {
        let size: Size<f64> = Size::new(800u32, 600u32).cast();
        assert_eq!(size, Size::new(800.0, 600.0));
    }
}
