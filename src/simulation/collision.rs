//! Collision detection and perfectly inelastic merging
//!
//! Overlapping bodies are replaced by one composite that conserves mass,
//! momentum and volume. Resolution runs to a fixed point: each pass scans
//! an immutable snapshot of the collection and, on the first colliding
//! pair, builds a fresh collection with the composite in place of the two
//! inputs. Every merge removes exactly one body, so at most `n - 1` passes
//! can merge anything.

use tracing::debug;

use crate::error::Result;
use crate::simulation::params::CollisionRule;
use crate::simulation::states::{distance, Body, NVec3};

/// One merge performed by [`resolve`].
#[derive(Debug, Clone, PartialEq)]
pub struct Merge {
    pub kept: String,     // name carried by the composite
    pub absorbed: String, // name that disappears
    pub mass: f64,        // composite mass
    pub position: NVec3,  // composite position
}

/// Outcome of one resolution pass over the whole collection.
#[derive(Debug, Clone, Default)]
pub struct Resolution {
    pub bodies: Vec<Body>,
    pub merges: Vec<Merge>,
}

/// Two bodies collide iff their centre distance is strictly below the
/// rule's threshold.
pub fn collides(a: &Body, b: &Body, rule: CollisionRule) -> bool {
    distance(a, b) < rule.threshold(a.radius(), b.radius())
}

/// Combine two bodies into one composite.
///
/// - mass: m_a + m_b
/// - position, velocity: mass-weighted means (momentum is conserved)
/// - radius: cbrt(r_a^3 + r_b^3), i.e. volumes add
/// - name: that of the heavier input, `a` on a tie
///
/// The composite starts with zero acceleration.
pub fn merge(a: &Body, b: &Body) -> Result<Body> {
    let m = a.mass() + b.mass();
    let x = (a.x * a.mass() + b.x * b.mass()) / m;
    let v = (a.v * a.mass() + b.v * b.mass()) / m;
    let radius = (a.radius().powi(3) + b.radius().powi(3)).cbrt();

    let name = if b.mass() > a.mass() { b.name() } else { a.name() };
    Body::new(name, radius, m, x, v)
}

/// Merge colliding bodies until no pair collides.
///
/// The input order is preserved: a composite takes the slot of the
/// earlier of its two inputs, and the later slot is dropped.
pub fn resolve(bodies: Vec<Body>, rule: CollisionRule) -> Result<Resolution> {
    let budget = bodies.len().saturating_sub(1);
    let mut current = bodies;
    let mut merges = Vec::new();

    for _ in 0..budget {
        let Some((i, j)) = first_collision(&current, rule) else {
            break;
        };

        let composite = merge(&current[i], &current[j])?;
        let absorbed = if composite.name() == current[i].name() { j } else { i };
        let record = Merge {
            kept: composite.name().to_string(),
            absorbed: current[absorbed].name().to_string(),
            mass: composite.mass(),
            position: composite.x,
        };
        debug!(
            kept = %record.kept,
            absorbed = %record.absorbed,
            mass = record.mass,
            "bodies merged"
        );
        merges.push(record);

        current = replace_pair(current, i, j, composite);
    }

    Ok(Resolution {
        bodies: current,
        merges,
    })
}

/// First colliding pair (i < j) in row-major scan order.
fn first_collision(bodies: &[Body], rule: CollisionRule) -> Option<(usize, usize)> {
    let n = bodies.len();
    for i in 0..n {
        for j in (i + 1)..n {
            if collides(&bodies[i], &bodies[j], rule) {
                return Some((i, j));
            }
        }
    }
    None
}

/// New collection with `composite` at slot `i` and slot `j` removed.
fn replace_pair(bodies: Vec<Body>, i: usize, j: usize, composite: Body) -> Vec<Body> {
    let mut next = Vec::with_capacity(bodies.len() - 1);
    let mut composite = Some(composite);
    for (k, b) in bodies.into_iter().enumerate() {
        if k == i {
            if let Some(c) = composite.take() {
                next.push(c);
            }
        } else if k != j {
            next.push(b);
        }
    }
    next
}
