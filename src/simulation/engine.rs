//! Simulation loop
//!
//! Owns the live `System` and drives each step in a fixed order:
//! gravity -> integrator -> collision resolution -> trajectory recording.
//! A step is computed on a copy of the bodies and committed only if every
//! stage succeeds and the resulting state is finite.

use std::collections::HashSet;

use tracing::{info, trace, warn};

use crate::error::{Result, SimError};
use crate::simulation::collision::{self, Merge};
use crate::simulation::forces::{AccelSet, NewtonianGravity};
use crate::simulation::integrator;
use crate::simulation::params::Parameters;
use crate::simulation::states::{Body, System, Trajectory};

/// A merge tagged with when it happened.
#[derive(Debug, Clone, PartialEq)]
pub struct MergeEvent {
    pub step: usize, // 1-based index of the step that produced it
    pub t: f64,      // elapsed time at the end of that step (s)
    pub merge: Merge,
}

/// Everything a finished run hands to its consumers. All values are
/// copies; nothing refers back into the simulation.
#[derive(Debug, Clone)]
pub struct SimulationOutput {
    /// One track per surviving body, in final body order.
    pub trajectories: Vec<Trajectory>,
    /// Tracks of bodies that were absorbed, in absorption order.
    pub absorbed: Vec<Trajectory>,
    pub final_state: System,
    pub merges: Vec<MergeEvent>,
    pub steps: usize,
}

impl SimulationOutput {
    pub fn trajectory(&self, name: &str) -> Option<&Trajectory> {
        self.trajectories.iter().find(|t| t.name() == name)
    }

    pub fn final_bodies(&self) -> &[Body] {
        &self.final_state.bodies
    }
}

pub struct Simulation {
    system: System,
    parameters: Parameters,
    forces: AccelSet,
    tracks: Vec<Trajectory>, // aligned with system.bodies
    absorbed: Vec<Trajectory>,
    merges: Vec<MergeEvent>,
    step: usize,
}

impl Simulation {
    /// Validate the parameters and body names and record the initial
    /// positions as sample 0 of every trajectory.
    pub fn new(bodies: Vec<Body>, parameters: Parameters) -> Result<Self> {
        parameters.validate()?;

        {
            let mut seen = HashSet::new();
            for b in &bodies {
                if !seen.insert(b.name()) {
                    return Err(SimError::config(format!("duplicate body name '{}'", b.name())));
                }
            }
        }

        let forces = AccelSet::new().with(NewtonianGravity { G: parameters.G });
        let tracks = bodies
            .iter()
            .map(|b| {
                let mut track = Trajectory::new(b.name());
                b.record_position(&mut track);
                track
            })
            .collect();

        Ok(Self {
            system: System::new(bodies),
            parameters,
            forces,
            tracks,
            absorbed: Vec::new(),
            merges: Vec::new(),
            step: 0,
        })
    }

    pub fn system(&self) -> &System {
        &self.system
    }

    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    pub fn elapsed(&self) -> f64 {
        self.system.t
    }

    pub fn steps_taken(&self) -> usize {
        self.step
    }

    pub fn is_finished(&self) -> bool {
        self.step >= self.parameters.steps()
    }

    /// Advance by one step of `h0`; on error nothing is applied.
    pub fn step(&mut self) -> Result<()> {
        let dt = self.parameters.h0;
        let step = self.step + 1;

        let mut bodies = self.system.bodies.clone();
        self.forces.compute_accelerations(&mut bodies)?;
        integrator::advance(&mut bodies, dt);
        let resolution = collision::resolve(bodies, self.parameters.collision)?;

        if let Some(bad) = resolution.bodies.iter().find(|b| !b.is_finite()) {
            return Err(SimError::NonFiniteState {
                step,
                body: bad.name().to_string(),
            });
        }

        // commit
        self.step = step;
        self.system.t += dt;
        self.system.bodies = resolution.bodies;

        if !resolution.merges.is_empty() {
            self.realign_tracks(&resolution.merges);
            let t = self.system.t;
            self.merges.extend(
                resolution
                    .merges
                    .into_iter()
                    .map(|merge| MergeEvent { step, t, merge }),
            );
        }
        for (b, track) in self.system.bodies.iter().zip(self.tracks.iter_mut()) {
            b.record_position(track);
        }

        trace!(step, t = self.system.t, bodies = self.system.bodies.len(), "step complete");
        Ok(())
    }

    /// Run until elapsed time reaches the horizon.
    pub fn run(mut self) -> Result<SimulationOutput> {
        let steps = self.parameters.steps();
        info!(
            bodies = self.system.bodies.len(),
            steps,
            dt = self.parameters.h0,
            horizon = self.parameters.t_end,
            "starting simulation"
        );

        while !self.is_finished() {
            if let Err(e) = self.step() {
                warn!(step = self.step + 1, error = %e, "step failed, state left at previous step");
                return Err(e);
            }
        }

        info!(
            bodies = self.system.bodies.len(),
            merges = self.merges.len(),
            t = self.system.t,
            "simulation finished"
        );

        Ok(SimulationOutput {
            trajectories: self.tracks,
            absorbed: self.absorbed,
            final_state: self.system,
            merges: self.merges,
            steps: self.step,
        })
    }

    /// Re-key trajectories after merges: a composite continues the track of
    /// the input whose name it kept, every other track is retired.
    fn realign_tracks(&mut self, merges: &[Merge]) {
        let mut old = std::mem::take(&mut self.tracks);
        let mut aligned = Vec::with_capacity(self.system.bodies.len());
        for b in &self.system.bodies {
            match old.iter().position(|t| t.name() == b.name()) {
                Some(k) => aligned.push(old.remove(k)),
                None => aligned.push(Trajectory::new(b.name())),
            }
        }
        for m in merges {
            if let Some(k) = old.iter().position(|t| t.name() == m.absorbed) {
                self.absorbed.push(old.remove(k));
            }
        }
        self.tracks = aligned;
    }
}

/// Run `initial` for `parameters.t_end` seconds in steps of `parameters.h0`.
pub fn run(initial: Vec<Body>, parameters: Parameters) -> Result<SimulationOutput> {
    Simulation::new(initial, parameters)?.run()
}
