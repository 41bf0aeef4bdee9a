use super::vec::Vec2;
use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};

#[derive(Deserialize, Serialize, PartialEq, Clone, Copy, Debug, Default)]
pub struct Point2 {
    pub x: f64,
    pub y: f64,
}

impl Point2 {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, rhs: Point2) -> f64 {
        (rhs - *self).norm()
    }
}

impl Sub for Point2 {
    type Output = Vec2;

    fn sub(self, rhs: Self) -> Self::Output {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Add<Vec2> for Point2 {
    type Output = Point2;

    fn add(self, rhs: Vec2) -> Self::Output {
        Point2 {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_is_symmetric() {
        let a = Point2::new(1., 2.);
        let b = Point2::new(4., 6.);
        assert_eq!(a.distance_to(b), 5.);
        assert_eq!(b.distance_to(a), 5.);
    }

    #[test]
    fn moving_along_a_vector() {
        let p = Point2::default() + Vec2::new(0.5, -1.);
        assert_eq!(p, Point2::new(0.5, -1.));
        assert_eq!(p - Point2::new(0.5, 0.), Vec2::new(0., -1.));
    }
}
