use bevy::prelude::*;

/// How a knot's incoming and outgoing tangents relate to each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
#[reflect(Default)]
pub enum TangentMode {
    /// Tangents are derived from the neighbouring knots.
    #[default]
    AutoSmooth,
    /// Tangents are zero; segments meet at a corner.
    Linear,
    /// Tangents are opposite and of equal length.
    Mirrored,
    /// Tangents are opposite but keep their own lengths.
    Continuous,
    /// Tangents move independently.
    Broken,
}

impl TangentMode {
    /// Get the display name for this tangent mode.
    pub fn name(&self) -> &'static str {
        match self {
            Self::AutoSmooth => "Auto Smooth",
            Self::Linear => "Linear",
            Self::Mirrored => "Mirrored",
            Self::Continuous => "Continuous",
            Self::Broken => "Broken",
        }
    }
}

/// A single knot of a Bézier spline.
///
/// Tangents are offsets from `position`, in the same local space.
/// This is a value type: edits go through a copy that is written back.
#[derive(Debug, Clone, Copy, PartialEq, Default, Reflect)]
#[reflect(Default)]
pub struct BezierKnot {
    /// Knot position in the container's local space.
    pub position: Vec3,
    /// Incoming tangent, relative to `position`.
    pub tangent_in: Vec3,
    /// Outgoing tangent, relative to `position`.
    pub tangent_out: Vec3,
}

impl BezierKnot {
    /// Create a knot with zero tangents.
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            ..default()
        }
    }

    /// Create a knot with the given tangents.
    pub fn with_tangents(position: Vec3, tangent_in: Vec3, tangent_out: Vec3) -> Self {
        Self {
            position,
            tangent_in,
            tangent_out,
        }
    }

    /// Absolute handle positions (in, out), in the same local space as `position`.
    pub fn handles(&self) -> (Vec3, Vec3) {
        (
            self.position + self.tangent_in,
            self.position + self.tangent_out,
        )
    }
}

pub(crate) fn cubic_bezier(p0: Vec3, p1: Vec3, p2: Vec3, p3: Vec3, t: f32) -> Vec3 {
    let t2 = t * t;
    let t3 = t2 * t;
    let mt = 1.0 - t;
    let mt2 = mt * mt;
    let mt3 = mt2 * mt;

    p0 * mt3 + p1 * 3.0 * mt2 * t + p2 * 3.0 * mt * t2 + p3 * t3
}

pub(crate) fn cubic_bezier_derivative(p0: Vec3, p1: Vec3, p2: Vec3, p3: Vec3, t: f32) -> Vec3 {
    let t2 = t * t;
    let mt = 1.0 - t;
    let mt2 = mt * mt;

    (p1 - p0) * 3.0 * mt2 + (p2 - p1) * 6.0 * mt * t + (p3 - p2) * 3.0 * t2
}

/// Evaluate the segment between two knots at local parameter `t`.
pub(crate) fn evaluate_segment(from: &BezierKnot, to: &BezierKnot, t: f32) -> Vec3 {
    cubic_bezier(
        from.position,
        from.position + from.tangent_out,
        to.position + to.tangent_in,
        to.position,
        t,
    )
}

pub(crate) fn evaluate_segment_tangent(from: &BezierKnot, to: &BezierKnot, t: f32) -> Vec3 {
    cubic_bezier_derivative(
        from.position,
        from.position + from.tangent_out,
        to.position + to.tangent_in,
        to.position,
        t,
    )
}
