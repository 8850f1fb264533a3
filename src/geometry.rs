//! Ray geometry used for picking and dragging knots.

use bevy::prelude::*;

/// Closest point to `point` on a ray that starts at its origin and extends forward.
///
/// Points behind the origin project onto the origin itself.
pub fn closest_point_on_ray(point: Vec3, ray: Ray3d) -> Vec3 {
    let v = point - ray.origin;
    let d = v.dot(*ray.direction);
    if d <= 0.0 {
        ray.origin
    } else {
        ray.origin + *ray.direction * d
    }
}

/// Euclidean distance from `point` to the ray.
///
/// The ray has a bounded start: if the point lies behind the origin, the
/// distance is measured to the origin.
pub fn distance_to_ray(point: Vec3, ray: Ray3d) -> f32 {
    point.distance(closest_point_on_ray(point, ray))
}

/// Intersect a ray with a plane, returning the hit point in front of the origin.
pub fn ray_plane_intersect(ray: Ray3d, plane_point: Vec3, plane_normal: Vec3) -> Option<Vec3> {
    let denom = plane_normal.dot(*ray.direction);
    if denom.abs() < 1e-6 {
        return None;
    }

    let t = (plane_point - ray.origin).dot(plane_normal) / denom;
    if t >= 0.0 {
        Some(ray.get_point(t))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ray(origin: Vec3, direction: Vec3) -> Ray3d {
        Ray3d::new(origin, Dir3::new(direction).unwrap())
    }

    #[test]
    fn test_distance_perpendicular() {
        let r = ray(Vec3::ZERO, Vec3::X);
        assert!((distance_to_ray(Vec3::new(3.0, 2.0, 0.0), r) - 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_distance_behind_origin_uses_origin() {
        let r = ray(Vec3::ZERO, Vec3::X);
        let p = Vec3::new(-3.0, 4.0, 0.0);
        assert!((distance_to_ray(p, r) - 5.0).abs() < 1e-5);
        assert_eq!(closest_point_on_ray(p, r), Vec3::ZERO);
    }

    #[test]
    fn test_distance_on_ray_is_zero() {
        let r = ray(Vec3::new(1.0, 0.0, -10.0), Vec3::Z);
        assert!(distance_to_ray(Vec3::new(1.0, 0.0, 0.0), r) < 1e-5);
    }

    #[test]
    fn test_unnormalized_direction() {
        let r = ray(Vec3::ZERO, Vec3::new(0.0, 0.0, 10.0));
        assert!((distance_to_ray(Vec3::new(1.0, 0.0, 5.0), r) - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_ray_plane_intersect() {
        let r = ray(Vec3::new(0.0, 5.0, 0.0), Vec3::NEG_Y);
        let hit = ray_plane_intersect(r, Vec3::ZERO, Vec3::Y).unwrap();
        assert!((hit - Vec3::ZERO).length() < 1e-5);

        // Plane behind the ray
        let r = ray(Vec3::new(0.0, 5.0, 0.0), Vec3::Y);
        assert!(ray_plane_intersect(r, Vec3::ZERO, Vec3::Y).is_none());

        // Parallel
        let r = ray(Vec3::new(0.0, 5.0, 0.0), Vec3::X);
        assert!(ray_plane_intersect(r, Vec3::ZERO, Vec3::Y).is_none());
    }
}
