//! Force / acceleration contributors
//!
//! Defines the acceleration trait, the term collection that sums them,
//! and direct pairwise Newtonian gravity.

use crate::error::{Result, SimError};
use crate::simulation::states::{Body, NVec3};

/// Collection of acceleration terms
/// Each term implements [`Acceleration`] and their contributions are summed
/// into a single acceleration vector per body
pub struct AccelSet {
    terms: Vec<Box<dyn Acceleration + Send + Sync>>,
}

impl Default for AccelSet {
    fn default() -> Self {
        Self::new()
    }
}

impl AccelSet {
    /// Create an empty acceleration set
    pub fn new() -> Self {
        Self {
            terms: Vec::new()
        }
    }

    /// Add an acceleration term
    pub fn with<T>(mut self, term: T) -> Self
    where
        T: Acceleration + Send + Sync + 'static,
    {
        self.terms.push(Box::new(term));
        self
    }

    /// Sum every term's contribution into `out`, which is zeroed first
    pub fn accumulate_accels(&self, bodies: &[Body], out: &mut [NVec3]) -> Result<()> {
        for a in out.iter_mut() {
            *a = NVec3::zeros();
        }
        for term in &self.terms {
            term.acceleration(bodies, out)?;
        }
        Ok(())
    }

    /// Recompute every body's acceleration from scratch.
    ///
    /// Accelerations are first evaluated into a scratch buffer; bodies are
    /// only touched once every term has succeeded, so a failure leaves
    /// them as they were. Calling this twice with unchanged positions gives
    /// identical results.
    pub fn compute_accelerations(&self, bodies: &mut [Body]) -> Result<()> {
        let mut out = vec![NVec3::zeros(); bodies.len()];
        self.accumulate_accels(bodies, &mut out)?;

        for (b, a) in bodies.iter_mut().zip(out) {
            b.reset_acceleration();
            b.add_acceleration(a);
        }
        Ok(())
    }
}

/// Acceleration sources; implementations add into `out[i]` for each body
pub trait Acceleration {
    fn acceleration(&self, bodies: &[Body], out: &mut [NVec3]) -> Result<()>;
}

/// Newtonian gravity summed directly over every unordered pair, no softening
#[allow(non_snake_case)]
#[derive(Debug, Clone, Copy)]
pub struct NewtonianGravity {
    pub G: f64, // gravitational constant
}

impl NewtonianGravity {
    /// Force exerted on `bi` by `bj`; the force on `bj` is its negation.
    ///
    /// Fails with [`SimError::DegenerateConfiguration`] when the centres
    /// coincide or the force is not representable.
    pub fn pair_force(&self, bi: &Body, bj: &Body) -> Result<NVec3> {
        // r points from i to j, so i is pulled along +r
        let r = bj.x - bi.x;
        let dist = r.norm();
        if dist == 0.0 {
            return Err(degenerate(bi, bj));
        }

        // F = G m_i m_j / d^2 along r / d
        let f_mag = self.G * bi.mass() * bj.mass() / (dist * dist);
        let f = r * (f_mag / dist);
        if !f.iter().all(|c| c.is_finite()) {
            return Err(degenerate(bi, bj));
        }
        Ok(f)
    }
}

impl Acceleration for NewtonianGravity {
    fn acceleration(&self, bodies: &[Body], out: &mut [NVec3]) -> Result<()> {
        let n = bodies.len();

        // Loop over each unordered pair (i, j) with i < j
        for i in 0..n {
            let bi = &bodies[i];
            for j in (i + 1)..n {
                let bj = &bodies[j];

                // one evaluation per pair, applied equal and opposite
                let f = self.pair_force(bi, bj)?;
                out[i] += f / bi.mass();
                out[j] -= f / bj.mass();
            }
        }
        Ok(())
    }
}

fn degenerate(bi: &Body, bj: &Body) -> SimError {
    SimError::DegenerateConfiguration {
        first: bi.name().to_string(),
        second: bj.name().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn body(name: &str, m: f64, x: [f64; 3]) -> Body {
        Body::new(name, 0.0, m, x.into(), NVec3::zeros()).unwrap()
    }

    fn gravity(g: f64) -> AccelSet {
        AccelSet::new().with(NewtonianGravity { G: g })
    }

    #[test]
    fn pair_force_is_antisymmetric() {
        let g = NewtonianGravity { G: 6.6743e-11 };
        let a = body("a", 1e24, [0.0, 0.0, 0.0]);
        let b = body("b", 2e24, [1e10, 3e9, -2e9]);

        let f_ab = g.pair_force(&a, &b).unwrap();
        let f_ba = g.pair_force(&b, &a).unwrap();
        assert_relative_eq!(f_ab, -f_ba, max_relative = 1e-12);
    }

    #[test]
    fn pair_force_magnitude() {
        let g = NewtonianGravity { G: 6.6743e-11 };
        let a = body("a", 1e24, [0.0, 0.0, 0.0]);
        let b = body("b", 1e24, [1e10, 0.0, 0.0]);

        let f = g.pair_force(&a, &b).unwrap();
        assert_relative_eq!(f.norm(), 6.6743e17, max_relative = 1e-12);
        assert!(f.x > 0.0);
    }

    #[test]
    fn two_equal_bodies_accelerate_toward_each_other() {
        let mut bodies = vec![body("p1", 1e24, [0.0, 0.0, 0.0]), body("p2", 1e24, [1e7, 0.0, 0.0])];
        gravity(6.6743e-11).compute_accelerations(&mut bodies).unwrap();

        // G m / d^2 = 6.6743e-11 * 1e24 / 1e14
        assert_relative_eq!(bodies[0].a.x, 0.66743, max_relative = 1e-12);
        assert_relative_eq!(bodies[1].a.x, -0.66743, max_relative = 1e-12);
        assert_eq!(bodies[0].a.y, 0.0);
        assert_eq!(bodies[1].a.z, 0.0);
    }

    #[test]
    fn three_body_triangle() {
        let mut bodies = vec![
            body("p1", 1e24, [0.0, 0.0, 0.0]),
            body("p2", 1e24, [1e7, 0.0, 0.0]),
            body("p3", 1e24, [0.5e7, 1e7, 0.0]),
        ];
        gravity(6.6743e-11).compute_accelerations(&mut bodies).unwrap();

        // symmetric about x = 0.5e7
        assert_relative_eq!(bodies[0].a.x, -bodies[1].a.x, max_relative = 1e-12);
        assert_relative_eq!(bodies[0].a.y, bodies[1].a.y, max_relative = 1e-12);
        assert!(bodies[2].a.x.abs() < 1e-12);
        assert!(bodies[2].a.y < 0.0);

        // equal masses: accelerations sum to zero
        let net: NVec3 = bodies.iter().map(|b| b.a).sum();
        assert!(net.norm() < 1e-12);
    }

    #[test]
    fn lone_body_has_no_acceleration() {
        let mut bodies = vec![body("p", 1e24, [0.0, 0.0, 0.0])
            .with_acceleration(NVec3::new(100.0, 0.0, 0.0))
            .unwrap()];
        gravity(6.6743e-11).compute_accelerations(&mut bodies).unwrap();
        assert_eq!(bodies[0].a, NVec3::zeros());
    }

    #[test]
    fn coincident_centres_are_rejected_without_partial_update() {
        let stale = NVec3::new(1.0, 2.0, 3.0);
        let mut bodies = vec![
            body("a", 1.0, [0.0, 0.0, 0.0]).with_acceleration(stale).unwrap(),
            body("b", 1.0, [5.0, 0.0, 0.0]).with_acceleration(stale).unwrap(),
            body("c", 1.0, [5.0, 0.0, 0.0]).with_acceleration(stale).unwrap(),
        ];
        let err = gravity(1.0).compute_accelerations(&mut bodies).unwrap_err();
        match err {
            SimError::DegenerateConfiguration { first, second } => {
                assert_eq!(first, "b");
                assert_eq!(second, "c");
            }
            other => panic!("unexpected error {other:?}"),
        }
        assert!(bodies.iter().all(|b| b.a == stale));
    }
}
