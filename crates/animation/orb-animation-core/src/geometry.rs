//! Closed cubic-Bézier outline through K radially offset vertices.
//!
//! Vertex `i` sits at angle `2πi/K − π/2` (vertex 0 at the top) with radius
//! `base_radius * (1 + offset_i)`. Each edge is a cubic whose control points
//! lie along the circle tangents, scaled by the standard arc approximation
//! constant `4/3 · tan(π/2K)`.

use std::f64::consts::{FRAC_PI_2, TAU};

use serde::{Deserialize, Serialize};

/// Smallest vertex count that produces a closed outline.
pub const MIN_POINTS: usize = 3;

/// Inner blob radius relative to the outer one.
pub const INNER_RADIUS_RATIO: f64 = 0.6;
/// Wobble damping applied to the inner blob's offsets.
pub const INNER_OFFSET_RATIO: f64 = 0.7;

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// `self + dir(angle) * len`
    #[inline]
    fn offset_polar(self, angle: f64, len: f64) -> Self {
        Self::new(self.x + angle.cos() * len, self.y + angle.sin() * len)
    }

    #[inline]
    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// One cubic edge; its start point is the previous segment's end (or vertex 0).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CubicSegment {
    pub control1: Point,
    pub control2: Point,
    pub end: Point,
}

impl CubicSegment {
    /// Evaluate the curve at `t` in [0, 1] given the segment's start point.
    pub fn point_at(&self, start: Point, t: f64) -> Point {
        let u = 1.0 - t;
        let (a, b, c, d) = (u * u * u, 3.0 * u * u * t, 3.0 * u * t * t, t * t * t);
        Point::new(
            a * start.x + b * self.control1.x + c * self.control2.x + d * self.end.x,
            a * start.y + b * self.control1.y + c * self.control2.y + d * self.end.y,
        )
    }
}

/// Closed path: `segments[i]` runs from `vertices[i]` to `vertices[(i + 1) % K]`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BlobPath {
    pub vertices: Vec<Point>,
    pub segments: Vec<CubicSegment>,
}

impl BlobPath {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    #[inline]
    pub fn start(&self) -> Option<Point> {
        self.vertices.first().copied()
    }

    /// Rebuild in place, reusing the allocations.
    pub fn rebuild(&mut self, center: Point, base_radius: f64, offsets: &[f64]) {
        self.vertices.clear();
        self.segments.clear();

        let k = offsets.len();
        if k < MIN_POINTS || !base_radius.is_finite() || base_radius <= 0.0 {
            return;
        }

        let angle = |i: usize| TAU * i as f64 / k as f64 - FRAC_PI_2;
        let radius = |i: usize| base_radius * (1.0 + offsets[i]);
        let coeff = tangent_coefficient(k);

        self.vertices
            .extend((0..k).map(|i| center.offset_polar(angle(i), radius(i))));
        self.segments.extend((0..k).map(|i| {
            let j = (i + 1) % k;
            CubicSegment {
                control1: self.vertices[i].offset_polar(angle(i) + FRAC_PI_2, coeff * radius(i)),
                control2: self.vertices[j].offset_polar(angle(j) - FRAC_PI_2, coeff * radius(j)),
                end: self.vertices[j],
            }
        }));
    }

    /// `samples_per_segment` points along every segment, `t` in `[0, 1)`.
    pub fn sample_points(&self, samples_per_segment: usize) -> Vec<Point> {
        let n = samples_per_segment.max(1);
        let mut out = Vec::with_capacity(self.segments.len() * n);
        for (start, seg) in self.vertices.iter().zip(&self.segments) {
            out.extend((0..n).map(|s| seg.point_at(*start, s as f64 / n as f64)));
        }
        out
    }

    /// Worst `|dist(p, center) - radius| / radius` over the sampled outline.
    /// Zero for an empty path.
    pub fn max_radial_deviation(&self, center: Point, radius: f64, samples_per_segment: usize) -> f64 {
        if radius <= 0.0 {
            return 0.0;
        }
        self.sample_points(samples_per_segment)
            .into_iter()
            .map(|p| (p.distance(center) - radius).abs() / radius)
            .fold(0.0, f64::max)
    }
}

/// `4/3 · tan(π / 2K)`
#[inline]
pub fn tangent_coefficient(point_count: usize) -> f64 {
    4.0 / 3.0 * (std::f64::consts::PI / (2.0 * point_count as f64)).tan()
}

/// Build the blob outline. Fewer than three offsets or a non-positive radius
/// yields an empty path.
pub fn build_blob_path(center: Point, base_radius: f64, offsets: &[f64]) -> BlobPath {
    let mut path = BlobPath::default();
    path.rebuild(center, base_radius, offsets);
    path
}

/// Secondary outline drawn inside the main blob: smaller and calmer.
pub fn inner_blob_path(center: Point, outer_radius: f64, offsets: &[f64]) -> BlobPath {
    let damped: Vec<f64> = offsets.iter().map(|o| o * INNER_OFFSET_RATIO).collect();
    build_blob_path(center, outer_radius * INNER_RADIUS_RATIO, &damped)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64, eps: f64) {
        assert!((a - b).abs() <= eps, "left={a} right={b} eps={eps}");
    }

    #[test]
    fn too_few_points_is_empty() {
        assert!(build_blob_path(Point::ORIGIN, 10.0, &[]).is_empty());
        assert!(build_blob_path(Point::ORIGIN, 10.0, &[0.0, 0.0]).is_empty());
        assert!(build_blob_path(Point::ORIGIN, 0.0, &[0.0; 8]).is_empty());
        assert!(build_blob_path(Point::ORIGIN, f64::NAN, &[0.0; 8]).is_empty());
    }

    #[test]
    fn first_vertex_is_at_top() {
        let c = Point::new(50.0, 50.0);
        let path = build_blob_path(c, 10.0, &[0.0; 4]);
        let v0 = path.start().unwrap();
        approx(v0.x, 50.0, 1e-9);
        approx(v0.y, 40.0, 1e-9);
        assert_eq!(path.segments.len(), 4);
        assert_eq!(path.segments[3].end, v0);
    }

    #[test]
    fn offsets_scale_vertex_radius() {
        let offsets = [0.1, 0.0, -0.2, 0.0, 0.0, 0.0];
        let path = build_blob_path(Point::ORIGIN, 10.0, &offsets);
        approx(path.vertices[0].distance(Point::ORIGIN), 11.0, 1e-9);
        approx(path.vertices[2].distance(Point::ORIGIN), 8.0, 1e-9);
    }

    #[test]
    fn segment_endpoints_match_vertices() {
        let path = build_blob_path(Point::ORIGIN, 5.0, &[0.0; 6]);
        let seg = &path.segments[0];
        assert_eq!(seg.point_at(path.vertices[0], 0.0), path.vertices[0]);
        let end = seg.point_at(path.vertices[0], 1.0);
        approx(end.x, path.vertices[1].x, 1e-12);
        approx(end.y, path.vertices[1].y, 1e-12);
    }

    #[test]
    fn rebuild_reuses_path() {
        let mut path = build_blob_path(Point::ORIGIN, 5.0, &[0.0; 8]);
        path.rebuild(Point::ORIGIN, 5.0, &[0.0; 5]);
        assert_eq!(path.vertices.len(), 5);
        path.rebuild(Point::ORIGIN, 5.0, &[0.0; 2]);
        assert!(path.is_empty());
        assert!(path.vertices.is_empty());
    }

    #[test]
    fn inner_blob_is_smaller_and_calmer() {
        let offsets = [0.1; 8];
        let inner = inner_blob_path(Point::ORIGIN, 10.0, &offsets);
        approx(inner.vertices[0].distance(Point::ORIGIN), 6.0 * 1.07, 1e-9);
    }

    #[test]
    fn coefficient_matches_quarter_circle_constant() {
        approx(tangent_coefficient(4), 0.552_284_749_8, 1e-9);
    }
}
