//! Core state types for the simulation.
//!
//! - `Body`       one massive sphere with kinematic state
//! - `System`     the live, ordered body collection plus elapsed time `t`
//! - `Trajectory` append-only position samples for one body

use std::f64::consts::PI;
use std::fmt;

use nalgebra::Vector3;

use crate::error::{Result, SimError};

pub type NVec3 = Vector3<f64>;

#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    name: String,
    m: f64,      // mass (kg)
    radius: f64, // radius (m)
    pub x: NVec3, // position (m)
    pub v: NVec3, // velocity (m/s)
    pub a: NVec3, // acceleration (m/s^2), recomputed every step
}

impl Body {
    /// Create a body at rest with respect to acceleration.
    ///
    /// Fails with [`SimError::InvalidParameter`] if `mass <= 0`, `radius < 0`
    /// or any component is not finite.
    pub fn new(
        name: impl Into<String>,
        radius: f64,
        mass: f64,
        x: NVec3,
        v: NVec3,
    ) -> Result<Self> {
        let name = name.into();
        if !(mass > 0.0) || !mass.is_finite() {
            return Err(SimError::invalid(
                &name,
                format!("mass must be positive and finite, got {mass}"),
            ));
        }
        if !(radius >= 0.0) || !radius.is_finite() {
            return Err(SimError::invalid(
                &name,
                format!("radius must be non-negative and finite, got {radius}"),
            ));
        }
        if !x.iter().all(|c| c.is_finite()) || !v.iter().all(|c| c.is_finite()) {
            return Err(SimError::invalid(&name, "position and velocity must be finite"));
        }

        Ok(Self {
            name,
            m: mass,
            radius,
            x,
            v,
            a: NVec3::zeros(),
        })
    }

    /// Same as [`Body::new`] with an explicit starting acceleration.
    pub fn with_acceleration(mut self, a: NVec3) -> Result<Self> {
        if !a.iter().all(|c| c.is_finite()) {
            return Err(SimError::invalid(&self.name, "acceleration must be finite"));
        }
        self.a = a;
        Ok(self)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mass(&self) -> f64 {
        self.m
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn volume(&self) -> f64 {
        4.0 / 3.0 * PI * self.radius.powi(3)
    }

    /// Mean density; infinite for a point mass.
    pub fn density(&self) -> f64 {
        self.m / self.volume()
    }

    pub fn momentum(&self) -> NVec3 {
        self.v * self.m
    }

    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.m * self.v.norm_squared()
    }

    pub fn reset_acceleration(&mut self) {
        self.a = NVec3::zeros();
    }

    pub fn add_acceleration(&mut self, da: NVec3) {
        self.a += da;
    }

    /// v += a * dt
    pub fn update_velocity(&mut self, dt: f64) {
        self.v += self.a * dt;
    }

    /// x += v * dt
    pub fn update_position(&mut self, dt: f64) {
        self.x += self.v * dt;
    }

    pub fn record_position(&self, trajectory: &mut Trajectory) {
        trajectory.push(self.x);
    }

    pub(crate) fn is_finite(&self) -> bool {
        self.x.iter().chain(self.v.iter()).chain(self.a.iter()).all(|c| c.is_finite())
    }
}

impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "body {} (mass {:.4e} kg, radius {:.4e} m):", self.name, self.m, self.radius)?;
        writeln!(f, "    * position:     ({:.2}, {:.2}, {:.2})", self.x.x, self.x.y, self.x.z)?;
        writeln!(f, "    * velocity:     ({:.3}, {:.3}, {:.3})", self.v.x, self.v.y, self.v.z)?;
        write!(f, "    * acceleration: ({:.4}, {:.4}, {:.4})", self.a.x, self.a.y, self.a.z)
    }
}

/// Euclidean distance between two body centres.
pub fn distance(lhs: &Body, rhs: &Body) -> f64 {
    (rhs.x - lhs.x).norm()
}

/// Ordered position samples for one body, oldest first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Trajectory {
    name: String,
    points: Vec<NVec3>,
}

impl Trajectory {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            points: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn push(&mut self, p: NVec3) {
        self.points.push(p);
    }

    pub fn points(&self) -> &[NVec3] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn last(&self) -> Option<&NVec3> {
        self.points.last()
    }

    /// Split into per-axis series, the shape plotting front ends expect.
    pub fn axes(&self) -> (Vec<f64>, Vec<f64>, Vec<f64>) {
        let xs = self.points.iter().map(|p| p.x).collect();
        let ys = self.points.iter().map(|p| p.y).collect();
        let zs = self.points.iter().map(|p| p.z).collect();
        (xs, ys, zs)
    }

    /// Largest distance of any sample from `origin`, 0 if empty.
    pub fn max_distance_from(&self, origin: &NVec3) -> f64 {
        self.points
            .iter()
            .map(|p| (p - origin).norm())
            .fold(0.0, f64::max)
    }

    /// Smallest distance of any sample from `origin`, infinite if empty.
    pub fn min_distance_from(&self, origin: &NVec3) -> f64 {
        self.points
            .iter()
            .map(|p| (p - origin).norm())
            .fold(f64::INFINITY, f64::min)
    }
}

#[derive(Debug, Clone, Default)]
pub struct System {
    pub bodies: Vec<Body>, // live bodies, in deterministic order
    pub t: f64,            // elapsed time (s)
}

impl System {
    pub fn new(bodies: Vec<Body>) -> Self {
        Self { bodies, t: 0.0 }
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn find(&self, name: &str) -> Option<&Body> {
        self.bodies.iter().find(|b| b.name() == name)
    }

    pub fn total_mass(&self) -> f64 {
        self.bodies.iter().map(Body::mass).sum()
    }

    pub fn total_momentum(&self) -> NVec3 {
        self.bodies.iter().map(Body::momentum).sum()
    }

    /// Mass-weighted mean position; the origin for an empty system.
    pub fn center_of_mass(&self) -> NVec3 {
        let m = self.total_mass();
        if m == 0.0 {
            return NVec3::zeros();
        }
        self.bodies.iter().map(|b| b.x * b.mass()).sum::<NVec3>() / m
    }

    pub fn kinetic_energy(&self) -> f64 {
        self.bodies.iter().map(Body::kinetic_energy).sum()
    }

    /// Pairwise gravitational potential energy, -G m_i m_j / r_ij summed over i < j.
    pub fn potential_energy(&self, g: f64) -> f64 {
        let n = self.bodies.len();
        let mut u = 0.0;
        for i in 0..n {
            for j in (i + 1)..n {
                let bi = &self.bodies[i];
                let bj = &self.bodies[j];
                u -= g * bi.mass() * bj.mass() / distance(bi, bj);
            }
        }
        u
    }

    pub fn total_energy(&self, g: f64) -> f64 {
        self.kinetic_energy() + self.potential_energy(g)
    }
}

impl fmt::Display for System {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "t = {:.1} s, {} bodies", self.t, self.bodies.len())?;
        for b in &self.bodies {
            writeln!(f, "{b}")?;
        }
        Ok(())
    }
}
