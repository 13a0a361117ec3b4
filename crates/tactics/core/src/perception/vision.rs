use glam::Vec3;

/// Field-of-view cone and range of one observer.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VisionParams {
    /// Full cone angle in degrees; a point is inside the cone when the angle
    /// to it is at most half of this.
    pub angle_deg: f32,

    /// Maximum straight-line vision distance in world units.
    pub range: f32,
}

impl VisionParams {
    pub const DEFAULT_ANGLE_DEG: f32 = 90.0;
    pub const DEFAULT_RANGE: f32 = 8000.0;

    pub fn new(angle_deg: f32, range: f32) -> Self {
        Self { angle_deg, range }
    }
}

impl Default for VisionParams {
    fn default() -> Self {
        Self::new(Self::DEFAULT_ANGLE_DEG, Self::DEFAULT_RANGE)
    }
}

/// Angle/distance gate of the visibility test, cheap enough to run before
/// any ray query.
///
/// The direction to the point and the observer's forward vector are both
/// flattened to the horizontal plane before the angle is measured; distance
/// uses the unflattened positions.
pub(crate) fn within_cone_and_range(
    observer: Vec3,
    forward: Vec3,
    point: Vec3,
    params: &VisionParams,
) -> bool {
    if observer.distance(point) > params.range {
        return false;
    }

    let flat_forward = Vec3::new(forward.x, forward.y, 0.0);
    let flat_direction = Vec3::new(point.x - observer.x, point.y - observer.y, 0.0);
    match (
        flat_forward.try_normalize(),
        flat_direction.try_normalize(),
    ) {
        (Some(forward), Some(direction)) => {
            let angle_deg = forward.dot(direction).clamp(-1.0, 1.0).acos().to_degrees();
            angle_deg <= params.angle_deg / 2.0
        }
        // Degenerate geometry: the point coincides with the observer (or the
        // observer has no facing). A zero-length offset is always "in front".
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> VisionParams {
        VisionParams::new(90.0, 8000.0)
    }

    #[test]
    fn point_straight_ahead_is_inside_cone() {
        let observer = Vec3::ZERO;
        let forward = Vec3::X;
        assert!(within_cone_and_range(
            observer,
            forward,
            Vec3::new(100.0, 0.0, 0.0),
            &params()
        ));
    }

    #[test]
    fn point_behind_is_outside_cone() {
        assert!(!within_cone_and_range(
            Vec3::ZERO,
            Vec3::X,
            Vec3::new(-100.0, 0.0, 0.0),
            &params()
        ));
    }

    #[test]
    fn cone_edge_is_inclusive_of_half_angle() {
        // Just under 45 degrees off a 90-degree cone sits inside the edge.
        let point = Vec3::new(100.0, 99.0, 0.0);
        assert!(within_cone_and_range(Vec3::ZERO, Vec3::X, point, &params()));

        // Slightly past the half angle falls outside.
        let point = Vec3::new(100.0, 105.0, 0.0);
        assert!(!within_cone_and_range(Vec3::ZERO, Vec3::X, point, &params()));
    }

    #[test]
    fn range_gate_uses_straight_line_distance() {
        assert!(!within_cone_and_range(
            Vec3::ZERO,
            Vec3::X,
            Vec3::new(8000.1, 0.0, 0.0),
            &params()
        ));
    }

    #[test]
    fn height_difference_is_ignored_by_the_angle_gate() {
        // Point directly ahead but elevated: still inside the flattened cone.
        assert!(within_cone_and_range(
            Vec3::ZERO,
            Vec3::X,
            Vec3::new(100.0, 0.0, 50.0),
            &params()
        ));
    }
}
