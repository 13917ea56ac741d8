// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Primitive geometry types and helpers.

use core::cmp::Ordering;
use core::fmt::Debug;

/// Axis along which a branch partitions its points.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CutDim {
    /// Split on x; children are ordered by `(x, y)`.
    X,
    /// Split on y; children are ordered by `(y, x)`.
    Y,
}

impl CutDim {
    /// Numeric axis index (`0` for x, `1` for y), as used in rendered output.
    pub const fn index(self) -> u8 {
        match self {
            Self::X => 0,
            Self::Y => 1,
        }
    }

    /// Pick the coordinate of `(x, y)` along this axis.
    #[inline]
    pub fn select<T>(self, x: T, y: T) -> T {
        match self {
            Self::X => x,
            Self::Y => y,
        }
    }
}

/// Axis-aligned rectangle in 2D.
///
/// Used both as the fixed extent of a tree and as the search cell threaded through
/// nearest-neighbor queries.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Aabb2D<T> {
    /// Minimum x (left)
    pub min_x: T,
    /// Minimum y (top)
    pub min_y: T,
    /// Maximum x (right)
    pub max_x: T,
    /// Maximum y (bottom)
    pub max_y: T,
}

impl<T> Aabb2D<T> {
    /// Create a new AABB from min/max corners.
    pub const fn new(min_x: T, min_y: T, max_x: T, max_y: T) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }
}

impl<T: Copy + PartialOrd> Aabb2D<T> {
    /// Degenerate rectangle covering a single point.
    pub const fn from_point(x: T, y: T) -> Self {
        Self::new(x, y, x, y)
    }

    /// Smallest rectangle containing every point, or `None` for an empty input.
    pub fn bounding<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = (T, T)>,
    {
        let mut it = points.into_iter();
        let (x, y) = it.next()?;
        Some(it.fold(Self::from_point(x, y), |acc, (x, y)| acc.union_point(x, y)))
    }

    /// Grow the rectangle to cover `(x, y)`.
    pub fn union_point(self, x: T, y: T) -> Self {
        Self {
            min_x: min_t(self.min_x, x),
            min_y: min_t(self.min_y, y),
            max_x: max_t(self.max_x, x),
            max_y: max_t(self.max_y, y),
        }
    }

    /// Whether this AABB contains the point (boundary inclusive).
    ///
    /// Always false when either coordinate is NaN.
    pub fn contains_point(&self, x: T, y: T) -> bool {
        le(self.min_x, x) && le(self.min_y, y) && le(x, self.max_x) && le(y, self.max_y)
    }

    /// The part of this rectangle on the low side of `cut` along `dim`.
    pub fn left_part(&self, dim: CutDim, cut: T) -> Self {
        let mut out = *self;
        match dim {
            CutDim::X => out.max_x = min_t(self.max_x, cut),
            CutDim::Y => out.max_y = min_t(self.max_y, cut),
        }
        out
    }

    /// The part of this rectangle on the high side of `cut` along `dim`.
    ///
    /// The boundary is kept: points sharing the cut coordinate with the splitter can
    /// still land on the right when their secondary coordinate is larger.
    pub fn right_part(&self, dim: CutDim, cut: T) -> Self {
        let mut out = *self;
        match dim {
            CutDim::X => out.min_x = max_t(self.min_x, cut),
            CutDim::Y => out.min_y = max_t(self.min_y, cut),
        }
        out
    }
}

impl<T: Scalar> Aabb2D<T> {
    /// Axis with the larger extent; ties favor x.
    pub fn wider_dim(&self) -> CutDim {
        let w = T::widen(self.max_x) - T::widen(self.min_x);
        let h = T::widen(self.max_y) - T::widen(self.min_y);
        if le(h, w) { CutDim::X } else { CutDim::Y }
    }

    /// Squared distance from `(x, y)` to the closest point of the rectangle.
    ///
    /// Zero when the point lies inside.
    pub fn distance_squared_to_point(&self, x: T, y: T) -> T::Dist {
        T::dist_add(
            axis_gap_squared(self.min_x, self.max_x, x),
            axis_gap_squared(self.min_y, self.max_y, y),
        )
    }
}

#[cfg(feature = "kurbo")]
impl From<kurbo::Rect> for Aabb2D<f64> {
    fn from(r: kurbo::Rect) -> Self {
        let r = r.abs();
        Self::new(r.x0, r.y0, r.x1, r.y1)
    }
}

#[cfg(feature = "kurbo")]
impl From<Aabb2D<f64>> for kurbo::Rect {
    fn from(a: Aabb2D<f64>) -> Self {
        Self::new(a.min_x, a.min_y, a.max_x, a.max_y)
    }
}

/// Numeric scalar abstraction for point coordinates.
///
/// Extents are measured in a widened accumulator type (e.g., f32→f64, i64→i128).
/// Squared distances use a separate non-negative type wide enough for the square of
/// any coordinate span (i32→u64, i64→u128); sums saturate instead of overflowing.
pub trait Scalar: Copy + PartialOrd + Debug {
    /// Widened accumulator type used for extents.
    type Acc: Copy + PartialOrd + core::ops::Sub<Output = Self::Acc> + Debug;

    /// Squared distance type.
    type Dist: Copy + PartialOrd + Debug;

    /// Convert a scalar to the accumulator type.
    fn widen(v: Self) -> Self::Acc;

    /// `(a - b)^2`, exact for integers.
    fn square_gap(a: Self, b: Self) -> Self::Dist;

    /// Sum of two squared terms.
    fn dist_add(a: Self::Dist, b: Self::Dist) -> Self::Dist;

    /// Zero squared distance.
    fn dist_zero() -> Self::Dist;
}

impl Scalar for f32 {
    type Acc = f64;
    type Dist = f64;

    #[inline]
    fn widen(v: Self) -> Self::Acc {
        v as f64
    }

    #[inline]
    fn square_gap(a: Self, b: Self) -> Self::Dist {
        let d = a as f64 - b as f64;
        d * d
    }

    #[inline]
    fn dist_add(a: Self::Dist, b: Self::Dist) -> Self::Dist {
        a + b
    }

    #[inline]
    fn dist_zero() -> Self::Dist {
        0.0
    }
}

impl Scalar for f64 {
    type Acc = Self;
    type Dist = Self;

    #[inline]
    fn widen(v: Self) -> Self::Acc {
        v
    }

    #[inline]
    fn square_gap(a: Self, b: Self) -> Self::Dist {
        let d = a - b;
        d * d
    }

    #[inline]
    fn dist_add(a: Self::Dist, b: Self::Dist) -> Self::Dist {
        a + b
    }

    #[inline]
    fn dist_zero() -> Self::Dist {
        0.0
    }
}

impl Scalar for i32 {
    type Acc = i64;
    type Dist = u64;

    #[inline]
    fn widen(v: Self) -> Self::Acc {
        v as i64
    }

    #[inline]
    fn square_gap(a: Self, b: Self) -> Self::Dist {
        // |a - b| < 2^32, so the square fits in u64.
        let d = u64::from(a.abs_diff(b));
        d * d
    }

    #[inline]
    fn dist_add(a: Self::Dist, b: Self::Dist) -> Self::Dist {
        a.saturating_add(b)
    }

    #[inline]
    fn dist_zero() -> Self::Dist {
        0
    }
}

impl Scalar for i64 {
    type Acc = i128;
    type Dist = u128;

    #[inline]
    fn widen(v: Self) -> Self::Acc {
        v as i128
    }

    #[inline]
    fn square_gap(a: Self, b: Self) -> Self::Dist {
        // |a - b| < 2^64, so the square fits in u128.
        let d = u128::from(a.abs_diff(b));
        d * d
    }

    #[inline]
    fn dist_add(a: Self::Dist, b: Self::Dist) -> Self::Dist {
        a.saturating_add(b)
    }

    #[inline]
    fn dist_zero() -> Self::Dist {
        0
    }
}

/// Helper alias for the widened accumulator type associated with a scalar `T`.
pub type ScalarAcc<T> = <T as Scalar>::Acc;

/// Helper alias for the squared distance type associated with a scalar `T`.
pub type ScalarDist<T> = <T as Scalar>::Dist;

/// Squared Euclidean distance between two points.
#[inline]
pub fn distance_squared<T: Scalar>(ax: T, ay: T, bx: T, by: T) -> T::Dist {
    T::dist_add(T::square_gap(ax, bx), T::square_gap(ay, by))
}

fn axis_gap_squared<T: Scalar>(lo: T, hi: T, v: T) -> T::Dist {
    if lt(v, lo) {
        T::square_gap(lo, v)
    } else if lt(hi, v) {
        T::square_gap(v, hi)
    } else {
        T::dist_zero()
    }
}

pub(crate) fn min_t<T: PartialOrd + Copy>(a: T, b: T) -> T {
    match a.partial_cmp(&b) {
        Some(Ordering::Greater) => b,
        _ => a,
    }
}

pub(crate) fn max_t<T: PartialOrd + Copy>(a: T, b: T) -> T {
    match a.partial_cmp(&b) {
        Some(Ordering::Less) => b,
        _ => a,
    }
}

pub(crate) fn le<T: PartialOrd>(a: T, b: T) -> bool {
    a.partial_cmp(&b)
        .map(|o| o != Ordering::Greater)
        .unwrap_or(false)
}

pub(crate) fn lt<T: PartialOrd>(a: T, b: T) -> bool {
    a.partial_cmp(&b)
        .map(|o| o == Ordering::Less)
        .unwrap_or(false)
}
