//! Physical constants and standard body configurations.
//!
//! Constants are a plain value passed to whoever needs them, so tests can
//! swap in synthetic values.

use serde::Deserialize;

use crate::error::{Result, SimError};
use crate::simulation::states::{Body, NVec3};

/// SI constants used by the presets and the default gravity term.
#[allow(non_snake_case)]
#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct PhysicalConstants {
    pub G: f64,            // m^3 / (kg s^2)
    pub m_sun: f64,        // kg
    pub r_sun: f64,        // m
    pub m_earth: f64,      // kg
    pub r_earth: f64,      // m
    pub d_earth_sun: f64,  // mean distance, m
    pub d_earth_moon: f64, // m
    pub v_earth: f64,      // mean orbital speed, m/s
}

impl Default for PhysicalConstants {
    fn default() -> Self {
        Self {
            G: 6.6743e-11,
            m_sun: 1.9885e30,
            r_sun: 6.9551e8,
            m_earth: 5.972e24,
            r_earth: 6.371e6,
            d_earth_sun: 1.496e11,
            d_earth_moon: 3.844e8,
            v_earth: 29780.0,
        }
    }
}

/// Sun at the origin, at rest.
pub fn static_sun(name: &str, c: &PhysicalConstants) -> Result<Body> {
    Body::new(name, c.r_sun, c.m_sun, NVec3::zeros(), NVec3::zeros())
}

/// Earth at the origin, at rest.
pub fn static_earth(name: &str, c: &PhysicalConstants) -> Result<Body> {
    Body::new(name, c.r_earth, c.m_earth, NVec3::zeros(), NVec3::zeros())
}

/// Earth at the mean sun distance on +x, moving along +y at its mean orbital speed.
pub fn real_earth(name: &str, c: &PhysicalConstants) -> Result<Body> {
    Body::new(
        name,
        c.r_earth,
        c.m_earth,
        NVec3::new(c.d_earth_sun, 0.0, 0.0),
        NVec3::new(0.0, c.v_earth, 0.0),
    )
}

/// Sun with position components in ±d_earth_sun and velocity components in ±v_earth.
pub fn random_sun(name: &str, c: &PhysicalConstants, rng: &mut fastrand::Rng) -> Result<Body> {
    let (x, v) = random_state(c, rng);
    Body::new(name, c.r_sun, c.m_sun, x, v)
}

/// Earth with position components in ±d_earth_sun and velocity components in ±v_earth.
pub fn random_earth(name: &str, c: &PhysicalConstants, rng: &mut fastrand::Rng) -> Result<Body> {
    let (x, v) = random_state(c, rng);
    Body::new(name, c.r_earth, c.m_earth, x, v)
}

/// Earth-like body on a circular orbit of radius `r` around `central`.
///
/// Placed at `central.x + (r, 0, 0)` with velocity
/// `central.v + (0, sqrt(G M / r), 0)`.
pub fn circular_orbit(name: &str, central: &Body, r: f64, c: &PhysicalConstants) -> Result<Body> {
    if !(r > 0.0) || !r.is_finite() {
        return Err(SimError::invalid(
            name,
            format!("orbit radius must be positive and finite, got {r}"),
        ));
    }
    let speed = (c.G * central.mass() / r).sqrt();
    Body::new(
        name,
        c.r_earth,
        c.m_earth,
        central.x + NVec3::new(r, 0.0, 0.0),
        central.v + NVec3::new(0.0, speed, 0.0),
    )
}

// uniform in [-1, 1)
fn ran(rng: &mut fastrand::Rng) -> f64 {
    -1.0 + 2.0 * rng.f64()
}

fn random_state(c: &PhysicalConstants, rng: &mut fastrand::Rng) -> (NVec3, NVec3) {
    let x = NVec3::new(ran(rng), ran(rng), ran(rng)) * c.d_earth_sun;
    let v = NVec3::new(ran(rng), ran(rng), ran(rng)) * c.v_earth;
    (x, v)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn static_presets_sit_at_origin() {
        let c = PhysicalConstants::default();
        let sun = static_sun("sun", &c).unwrap();
        assert_eq!(sun.name(), "sun");
        assert_eq!(sun.mass(), c.m_sun);
        assert_eq!(sun.radius(), c.r_sun);
        assert_eq!(sun.x, NVec3::zeros());
        assert_eq!(sun.v, NVec3::zeros());

        let earth = static_earth("earth", &c).unwrap();
        assert_eq!(earth.mass(), c.m_earth);
        assert_eq!(earth.radius(), c.r_earth);
        assert_eq!(earth.x, NVec3::zeros());
    }

    #[test]
    fn real_earth_is_on_x_axis() {
        let c = PhysicalConstants::default();
        let earth = real_earth("earth", &c).unwrap();
        assert_eq!(earth.x, NVec3::new(1.496e11, 0.0, 0.0));
        assert_eq!(earth.v, NVec3::new(0.0, 29780.0, 0.0));
    }

    #[test]
    fn random_presets_are_seeded_and_bounded() {
        let c = PhysicalConstants::default();
        let a = random_earth("e", &c, &mut fastrand::Rng::with_seed(7)).unwrap();
        let b = random_earth("e", &c, &mut fastrand::Rng::with_seed(7)).unwrap();
        assert_eq!(a, b);

        let mut rng = fastrand::Rng::with_seed(11);
        for _ in 0..50 {
            let s = random_sun("s", &c, &mut rng).unwrap();
            assert_eq!(s.mass(), c.m_sun);
            assert!(s.x.iter().all(|p| p.abs() <= c.d_earth_sun));
            assert!(s.v.iter().all(|v| v.abs() <= c.v_earth));
        }
    }

    #[test]
    fn circular_orbit_speed() {
        let c = PhysicalConstants {
            G: 1.0,
            ..PhysicalConstants::default()
        };
        let centre = Body::new(
            "c",
            0.0,
            4.0,
            NVec3::new(1.0, 1.0, 0.0),
            NVec3::new(0.0, 0.0, 1.0),
        )
        .unwrap();
        let sat = circular_orbit("sat", &centre, 4.0, &c).unwrap();

        assert_relative_eq!(sat.x, NVec3::new(5.0, 1.0, 0.0));
        assert_relative_eq!(sat.v, NVec3::new(0.0, 1.0, 1.0));
        assert!(circular_orbit("bad", &centre, 0.0, &c).is_err());
    }
}
