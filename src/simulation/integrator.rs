//! Fixed-step time integrator
//!
//! Semi-implicit Euler: each body's velocity is advanced with the
//! acceleration computed for the current positions, then its position is
//! advanced with the new velocity. No step subdivision or error control.

use super::states::Body;

/// Advance every body by one step of size `dt`.
///
/// Assumes accelerations were computed for the current positions. The
/// velocity-before-position order is fixed for reproducibility.
pub fn advance(bodies: &mut [Body], dt: f64) {
    for b in bodies.iter_mut() {
        b.update_velocity(dt); // v_n+1 = v_n + dt a_n
        b.update_position(dt); // x_n+1 = x_n + dt v_n+1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::states::NVec3;
    use approx::assert_relative_eq;

    #[test]
    fn position_uses_updated_velocity() {
        let mut bodies = vec![Body::new("b", 0.0, 1.0, NVec3::zeros(), NVec3::new(1.0, 0.0, 0.0))
            .unwrap()
            .with_acceleration(NVec3::new(2.0, 0.0, -1.0))
            .unwrap()];

        advance(&mut bodies, 0.5);

        // v = 1 + 2 * 0.5 = 2, x = 2 * 0.5 = 1
        assert_relative_eq!(bodies[0].v, NVec3::new(2.0, 0.0, -0.5));
        assert_relative_eq!(bodies[0].x, NVec3::new(1.0, 0.0, -0.25));
    }

    #[test]
    fn empty_collection_is_a_no_op() {
        let mut bodies: Vec<Body> = Vec::new();
        advance(&mut bodies, 1.0);
        assert!(bodies.is_empty());
    }
}
