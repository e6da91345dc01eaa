use glam::{Vec2, Vec3};

/// Translate and scale of a unit quad centred on the origin.
///
/// Built from one of several conventions; Y grows downward.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct Quad {
    pub translate: Vec3,
    pub scale: Vec3,
}

impl Quad {
    pub fn centre_half_extents(centre: Vec2, half_extents: Vec2) -> Self {
        Self {
            translate: centre.extend(0.0),
            scale: (half_extents * 2.0).extend(1.0),
        }
    }

    /// Square variant of [`Self::centre_half_extents`].
    pub fn centre_half_extent(centre: Vec2, half_extent: f32) -> Self {
        Self::centre_half_extents(centre, Vec2::splat(half_extent))
    }

    pub fn top_left_size(top_left: Vec2, size: Vec2) -> Self {
        Self {
            translate: (top_left + size / 2.0).extend(0.0),
            scale: size.extend(1.0),
        }
    }

    /// Square variant of [`Self::top_left_size`].
    pub fn top_left_square(top_left: Vec2, size: f32) -> Self {
        Self::top_left_size(top_left, Vec2::splat(size))
    }

    pub fn top_left_bottom_right(top_left: Vec2, bottom_right: Vec2) -> Self {
        Self::top_left_size(top_left, bottom_right - top_left)
    }

    pub fn centre(&self) -> Vec2 {
        self.translate.truncate()
    }

    pub fn size(&self) -> Vec2 {
        self.scale.truncate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Vec3, b: Vec3) -> bool {
        a.abs_diff_eq(b, 1e-5)
    }

    #[test]
    fn centre_half_extents_doubles() {
        let q = Quad::centre_half_extents(Vec2::new(100.0, 50.0), Vec2::new(10.0, 20.0));
        assert!(close(q.translate, Vec3::new(100.0, 50.0, 0.0)));
        assert!(close(q.scale, Vec3::new(20.0, 40.0, 1.0)));
    }

    #[test]
    fn scalar_half_extent_is_square() {
        let q = Quad::centre_half_extent(Vec2::ZERO, 2.5);
        assert_eq!(q.size(), Vec2::new(5.0, 5.0));
        assert_eq!(q.scale.z, 1.0);
    }

    #[test]
    fn top_left_size_centres() {
        let q = Quad::top_left_size(Vec2::new(10.0, 10.0), Vec2::new(40.0, 20.0));
        assert!(close(q.translate, Vec3::new(30.0, 20.0, 0.0)));
        assert!(close(q.scale, Vec3::new(40.0, 20.0, 1.0)));
    }

    #[test]
    fn top_left_square_matches_vector_form() {
        let tl = Vec2::new(-3.0, 7.0);
        assert_eq!(Quad::top_left_square(tl, 6.0), Quad::top_left_size(tl, Vec2::splat(6.0)));
    }

    #[test]
    fn corners_delegate_to_top_left_size() {
        let tl = Vec2::new(5.0, 15.0);
        let br = Vec2::new(125.0, 95.0);
        assert_eq!(Quad::top_left_bottom_right(tl, br), Quad::top_left_size(tl, br - tl));
    }

    #[test]
    fn conventions_agree_on_same_rect() {
        let a = Quad::centre_half_extents(Vec2::new(50.0, 50.0), Vec2::new(25.0, 10.0));
        let b = Quad::top_left_bottom_right(Vec2::new(25.0, 40.0), Vec2::new(75.0, 60.0));
        assert!(close(a.translate, b.translate));
        assert!(close(a.scale, b.scale));
    }
}
