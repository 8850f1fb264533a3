use bevy::prelude::*;

use super::types::{evaluate_segment, evaluate_segment_tangent, BezierKnot, TangentMode};

/// Fraction of the chord to a neighbouring knot used for auto-smooth tangents.
const AUTO_SMOOTH_TENSION: f32 = 1.0 / 3.0;

/// A single Bézier curve: an ordered list of knots, each with a tangent mode.
///
/// Knots and tangent modes are kept in lockstep; use the accessor methods
/// rather than touching the storage directly.
#[derive(Debug, Clone, Reflect, Default)]
#[reflect(Default)]
pub struct Spline {
    knots: Vec<BezierKnot>,
    tangent_modes: Vec<TangentMode>,
    /// Whether the spline forms a closed loop.
    pub closed: bool,
}

impl Spline {
    /// Create an open spline from knots, keeping their tangents as given.
    ///
    /// Every knot starts in [`TangentMode::Broken`] so the supplied tangents
    /// are not overwritten.
    pub fn new(knots: Vec<BezierKnot>) -> Self {
        let tangent_modes = vec![TangentMode::Broken; knots.len()];
        Self {
            knots,
            tangent_modes,
            closed: false,
        }
    }

    /// Create an open, auto-smoothed spline passing through the given points.
    pub fn from_points(points: impl IntoIterator<Item = Vec3>) -> Self {
        let knots: Vec<BezierKnot> = points.into_iter().map(BezierKnot::new).collect();
        let mut spline = Self {
            tangent_modes: vec![TangentMode::AutoSmooth; knots.len()],
            knots,
            closed: false,
        };
        for i in 0..spline.knots.len() {
            spline.apply_tangent_mode(i);
        }
        spline
    }

    /// Set whether the spline is closed, builder style.
    pub fn with_closed(mut self, closed: bool) -> Self {
        self.closed = closed;
        for i in 0..self.knots.len() {
            self.apply_tangent_mode(i);
        }
        self
    }

    /// Number of knots.
    pub fn len(&self) -> usize {
        self.knots.len()
    }

    /// Whether the spline has no knots.
    pub fn is_empty(&self) -> bool {
        self.knots.is_empty()
    }

    /// All knots, in order.
    pub fn knots(&self) -> &[BezierKnot] {
        &self.knots
    }

    /// Copy of the knot at `index`.
    pub fn knot(&self, index: usize) -> Option<BezierKnot> {
        self.knots.get(index).copied()
    }

    /// Tangent mode of the knot at `index`.
    pub fn tangent_mode(&self, index: usize) -> Option<TangentMode> {
        self.tangent_modes.get(index).copied()
    }

    /// Overwrite the knot at `index`. Returns false if out of range.
    ///
    /// The knot's tangent mode is kept. Auto-smoothed knots (this one and its
    /// neighbours) have their tangents recomputed.
    pub fn set_knot(&mut self, index: usize, knot: BezierKnot) -> bool {
        let Some(slot) = self.knots.get_mut(index) else {
            return false;
        };
        *slot = knot;
        self.refresh_auto_smooth_around(index);
        true
    }

    /// Set the tangent mode of the knot at `index` and reshape its tangents.
    pub fn set_tangent_mode(&mut self, index: usize, mode: TangentMode) -> bool {
        let Some(slot) = self.tangent_modes.get_mut(index) else {
            return false;
        };
        *slot = mode;
        self.apply_tangent_mode(index);
        true
    }

    /// Append a knot with the given tangent mode.
    pub fn add_knot(&mut self, knot: BezierKnot, mode: TangentMode) {
        self.insert_knot(self.knots.len(), knot, mode);
    }

    /// Insert a knot at `index`. Does nothing if `index > len`.
    pub fn insert_knot(&mut self, index: usize, knot: BezierKnot, mode: TangentMode) {
        if index > self.knots.len() {
            return;
        }
        self.knots.insert(index, knot);
        self.tangent_modes.insert(index, mode);
        self.apply_tangent_mode(index);
        self.refresh_auto_smooth_around(index);
    }

    /// Remove the knot at `index`.
    pub fn remove_knot(&mut self, index: usize) -> Option<BezierKnot> {
        if index >= self.knots.len() {
            return None;
        }
        let knot = self.knots.remove(index);
        self.tangent_modes.remove(index);

        if !self.knots.is_empty() {
            let neighbour = index.min(self.knots.len() - 1);
            self.refresh_auto_smooth_around(neighbour);
            if let Some(prev) = self.previous_index(neighbour) {
                self.refresh_auto_smooth_around(prev);
            }
        }
        Some(knot)
    }

    /// Toggle between closed and open spline.
    pub fn toggle_closed(&mut self) {
        self.closed = !self.closed;
        for i in 0..self.knots.len() {
            if self.tangent_modes[i] == TangentMode::AutoSmooth {
                self.apply_tangent_mode(i);
            }
        }
    }

    /// Get the number of segments in this spline.
    pub fn segment_count(&self) -> usize {
        match self.knots.len() {
            0 | 1 => 0,
            n if self.closed => n,
            n => n - 1,
        }
    }

    /// Evaluate the spline at parameter t (0.0 to 1.0 across all segments).
    pub fn evaluate(&self, t: f32) -> Option<Vec3> {
        let (from, to, local_t) = self.locate(t)?;
        Some(evaluate_segment(from, to, local_t))
    }

    /// Evaluate the tangent at parameter t.
    pub fn evaluate_tangent(&self, t: f32) -> Option<Vec3> {
        let (from, to, local_t) = self.locate(t)?;
        Some(evaluate_segment_tangent(from, to, local_t))
    }

    /// Sample the spline into a series of points for rendering.
    pub fn sample(&self, samples_per_segment: usize) -> Vec<Vec3> {
        let segment_count = self.segment_count();
        if segment_count == 0 || samples_per_segment == 0 {
            return Vec::new();
        }

        let total_samples = segment_count * samples_per_segment + 1;
        let mut points = Vec::with_capacity(total_samples);

        for i in 0..total_samples {
            let t = i as f32 / (total_samples - 1) as f32;
            if let Some(point) = self.evaluate(t) {
                points.push(point);
            }
        }

        points
    }

    fn locate(&self, t: f32) -> Option<(&BezierKnot, &BezierKnot, f32)> {
        let num_segments = self.segment_count();
        if num_segments == 0 {
            return None;
        }

        let t_scaled = t.clamp(0.0, 1.0) * num_segments as f32;
        let segment = (t_scaled.floor() as usize).min(num_segments - 1);
        let local_t = t_scaled - segment as f32;

        let from = &self.knots[segment];
        let to = &self.knots[(segment + 1) % self.knots.len()];
        Some((from, to, local_t))
    }

    fn previous_index(&self, index: usize) -> Option<usize> {
        let n = self.knots.len();
        if index > 0 {
            Some(index - 1)
        } else if self.closed && n > 1 {
            Some(n - 1)
        } else {
            None
        }
    }

    fn next_index(&self, index: usize) -> Option<usize> {
        let n = self.knots.len();
        if index + 1 < n {
            Some(index + 1)
        } else if self.closed && n > 1 {
            Some(0)
        } else {
            None
        }
    }

    fn refresh_auto_smooth_around(&mut self, index: usize) {
        let neighbours = [self.previous_index(index), Some(index), self.next_index(index)];
        for i in neighbours.into_iter().flatten() {
            if self.tangent_modes[i] == TangentMode::AutoSmooth {
                self.apply_tangent_mode(i);
            }
        }
    }

    /// Reshape the tangents of knot `index` to satisfy its tangent mode.
    fn apply_tangent_mode(&mut self, index: usize) {
        let mode = self.tangent_modes[index];
        let mut knot = self.knots[index];

        match mode {
            TangentMode::Broken => return,
            TangentMode::Linear => {
                knot.tangent_in = Vec3::ZERO;
                knot.tangent_out = Vec3::ZERO;
            }
            TangentMode::Mirrored => {
                knot.tangent_in = -knot.tangent_out;
            }
            TangentMode::Continuous => {
                knot.tangent_in = -knot.tangent_out.normalize_or_zero() * knot.tangent_in.length();
            }
            TangentMode::AutoSmooth => {
                let prev = self.previous_index(index).map(|i| self.knots[i].position);
                let next = self.next_index(index).map(|i| self.knots[i].position);
                let (tangent_in, tangent_out) = auto_smooth_tangents(knot.position, prev, next);
                knot.tangent_in = tangent_in;
                knot.tangent_out = tangent_out;
            }
        }

        self.knots[index] = knot;
    }
}

/// Catmull-Rom style tangents scaled to a third of each neighbour chord.
fn auto_smooth_tangents(current: Vec3, prev: Option<Vec3>, next: Option<Vec3>) -> (Vec3, Vec3) {
    let direction = match (prev, next) {
        (Some(p), Some(n)) => (n - p).normalize_or_zero(),
        (None, Some(n)) => (n - current).normalize_or_zero(),
        (Some(p), None) => (current - p).normalize_or_zero(),
        (None, None) => Vec3::ZERO,
    };

    let in_length = prev.map_or(0.0, |p| current.distance(p)) * AUTO_SMOOTH_TENSION;
    let out_length = next.map_or(0.0, |n| current.distance(n)) * AUTO_SMOOTH_TENSION;

    (-direction * in_length, direction * out_length)
}

/// A set of splines sharing one owner transform.
///
/// Knot positions are in this entity's local space; its [`GlobalTransform`]
/// maps them to world space.
#[derive(Component, Debug, Clone, Reflect, Default)]
#[reflect(Component)]
#[require(Transform)]
pub struct SplineContainer {
    /// The splines in this container, in pick order.
    pub splines: Vec<Spline>,
}

impl SplineContainer {
    /// Create a container holding the given splines.
    pub fn new(splines: Vec<Spline>) -> Self {
        Self { splines }
    }

    /// Create a container holding a single spline.
    pub fn single(spline: Spline) -> Self {
        Self {
            splines: vec![spline],
        }
    }
}
