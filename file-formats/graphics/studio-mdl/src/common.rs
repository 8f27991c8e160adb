use glam::Vec3;

/// Extents below this on every axis count as "no bounds".
pub const BOUNDS_EPSILON: f32 = 0.001;

/// Axis-aligned bounding box in model space
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub min: Vec3,
    pub max: Vec3,
}

impl Bounds {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Smallest box containing every point, or a zero box at the origin when
    /// there are none.
    pub fn from_points<I: IntoIterator<Item = Vec3>>(points: I) -> Self {
        let mut iter = points.into_iter();
        let Some(first) = iter.next() else {
            return Self::default();
        };

        iter.fold(Self::new(first, first), |bounds, point| {
            Self::new(bounds.min.min(point), bounds.max.max(point))
        })
    }

    pub fn extent(&self) -> Vec3 {
        self.max - self.min
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// True when the box spans less than [`BOUNDS_EPSILON`] on every axis.
    pub fn is_degenerate(&self) -> bool {
        self.extent().abs().max_element() < BOUNDS_EPSILON
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn from_points_covers_all() {
        let bounds = Bounds::from_points([
            Vec3::new(1.0, -2.0, 3.0),
            Vec3::new(-1.0, 4.0, 0.0),
            Vec3::new(0.0, 0.0, 5.0),
        ]);
        assert_eq!(bounds.min, Vec3::new(-1.0, -2.0, 0.0));
        assert_eq!(bounds.max, Vec3::new(1.0, 4.0, 5.0));
        assert_eq!(bounds.center(), Vec3::new(0.0, 1.0, 2.5));
    }

    #[test]
    fn empty_point_set_is_degenerate() {
        let bounds = Bounds::from_points(std::iter::empty());
        assert_eq!(bounds, Bounds::default());
        assert!(bounds.is_degenerate());
    }

    #[test]
    fn one_real_axis_is_enough() {
        let flat = Bounds::new(Vec3::ZERO, Vec3::new(0.0, 0.0, 2.0));
        assert!(!flat.is_degenerate());
        let tiny = Bounds::new(Vec3::ZERO, Vec3::splat(0.0005));
        assert!(tiny.is_degenerate());
    }
}
