//! Composite curve made of consecutive segments.

use gcurve_math::Point3;
use serde::{Deserialize, Serialize};

use super::{Curve, CurveShape};

/// A sequence of curves evaluated end to end.
///
/// The global parameter `t` in `[0, 1]` is distributed by arc length: a
/// segment twice as long covers twice as much of the parameter range.
/// Within a segment the segment's own parameter is used linearly.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CurvePath {
    segments: Vec<CurveShape>,
    /// Cumulative arc lengths, one entry per segment.
    cumulative_lengths: Vec<f64>,
}

impl CurvePath {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_segments(segments: impl IntoIterator<Item = CurveShape>) -> Self {
        let mut path = Self::new();
        for s in segments {
            path.push(s);
        }
        path
    }

    pub fn push(&mut self, segment: impl Into<CurveShape>) {
        let segment = segment.into();
        let previous = self.cumulative_lengths.last().copied().unwrap_or(0.0);
        self.cumulative_lengths.push(previous + segment.length());
        self.segments.push(segment);
    }

    pub fn segments(&self) -> &[CurveShape] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn start(&self) -> Option<Point3> {
        self.segments.first().map(|s| s.point_at(s.domain().0))
    }

    pub fn end(&self) -> Option<Point3> {
        self.segments.last().map(|s| s.point_at(s.domain().1))
    }

    fn total_length(&self) -> f64 {
        self.cumulative_lengths.last().copied().unwrap_or(0.0)
    }
}

impl Curve for CurvePath {
    fn point_at(&self, t: f64) -> Point3 {
        let Some(last) = self.segments.last() else {
            return Point3::ZERO;
        };

        let total = self.total_length();
        if total <= 0.0 {
            return last.point_at(last.domain().1);
        }

        let d = t.clamp(0.0, 1.0) * total;
        let index = self
            .cumulative_lengths
            .partition_point(|&len| len < d)
            .min(self.segments.len() - 1);

        let segment = &self.segments[index];
        let seg_end = self.cumulative_lengths[index];
        let seg_start = if index == 0 {
            0.0
        } else {
            self.cumulative_lengths[index - 1]
        };
        let seg_len = seg_end - seg_start;
        let u = if seg_len > 0.0 {
            1.0 - (seg_end - d) / seg_len
        } else {
            0.0
        };

        let (u0, u1) = segment.domain();
        segment.point_at(u0 + u.clamp(0.0, 1.0) * (u1 - u0))
    }

    fn is_closed(&self) -> bool {
        match (self.start(), self.end()) {
            (Some(a), Some(b)) => self.segments.len() > 1 && a.distance(b) < 1e-9,
            _ => false,
        }
    }

    fn length(&self) -> f64 {
        self.total_length()
    }
}
