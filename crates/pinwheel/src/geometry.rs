use crate::config::ConfigError;
use std::f64::consts::TAU;

pub const DEFAULT_OUTER_RADIUS: f64 = 200.0;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn offset(&self, angle: f64, length: f64) -> Self {
        Self::new(self.x + length * angle.cos(), self.y + length * angle.sin())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// Pointer displacement from the origin in polar form.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector {
    /// `atan2` of the displacement, in `(-PI, PI]`.
    pub angle: f64,
    pub distance: f64,
}

pub fn vector_from(origin: Point, pointer: Point) -> Vector {
    let (dx, dy) = (pointer.x - origin.x, pointer.y - origin.y);
    Vector {
        // atan2(0, 0) is 0, which is the convention for a pointer on the origin
        angle: dy.atan2(dx),
        distance: dx.hypot(dy),
    }
}

/// Maps any angle into `[0, 2PI)`.
pub fn normalize_angle(angle: f64) -> f64 {
    let normalized = angle.rem_euclid(TAU);
    // tiny negative inputs round up to exactly TAU
    if normalized >= TAU { 0.0 } else { normalized }
}

pub fn angle_step(sector_count: usize) -> f64 {
    TAU / sector_count as f64
}

/// Finds the half-open sector `[k * step, (k + 1) * step)` containing a normalized angle.
///
/// The estimate from a single division is nudged by at most one sector so that
/// an angle sitting exactly on `k * step` always lands in sector `k`. Rounding that
/// pushes past the last sector is clamped to `sector_count - 1`.
pub fn sector_index(normalized_angle: f64, sector_count: usize) -> Option<usize> {
    if sector_count == 0 || !normalized_angle.is_finite() {
        return None;
    }

    let step = angle_step(sector_count);
    let last = sector_count - 1;
    let mut idx = ((normalized_angle / step).floor().max(0.0) as usize).min(last);

    if idx < last && normalized_angle >= (idx + 1) as f64 * step {
        idx += 1;
    } else if idx > 0 && normalized_angle < idx as f64 * step {
        idx -= 1;
    }

    Some(idx)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Zone {
    Cancel,
    InRange,
    OutOfRange,
}

/// `outer` is only enforced when given; the plain selector accepts any distance
/// past the cancel zone.
pub fn classify_distance(distance: f64, inner: f64, outer: Option<f64>) -> Zone {
    if distance < inner {
        Zone::Cancel
    } else if outer.is_some_and(|outer| distance > outer) {
        Zone::OutOfRange
    } else {
        Zone::InRange
    }
}

/// Cancel-zone and wheel radii. Always `0 < inner < outer`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Radii {
    inner: f64,
    outer: f64,
}

impl Radii {
    pub fn new(inner: f64, outer: f64) -> Result<Self, ConfigError> {
        for r in [inner, outer] {
            if !r.is_finite() || r <= 0.0 {
                return Err(ConfigError::NonPositiveRadius(r));
            }
        }
        if inner >= outer {
            return Err(ConfigError::InnerNotSmaller { inner, outer });
        }
        Ok(Self { inner, outer })
    }

    /// Inner radius at half the outer one.
    pub fn from_outer(outer: f64) -> Result<Self, ConfigError> {
        Self::new(outer / 2.0, outer)
    }

    pub fn inner(&self) -> f64 {
        self.inner
    }

    pub fn outer(&self) -> f64 {
        self.outer
    }

    pub fn diameter(&self) -> f64 {
        self.outer * 2.0
    }
}

impl Default for Radii {
    fn default() -> Self {
        Self {
            inner: DEFAULT_OUTER_RADIUS / 2.0,
            outer: DEFAULT_OUTER_RADIUS,
        }
    }
}
