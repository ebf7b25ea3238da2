//! Two-body orbit generator.
//!
//! Integrates the Moon around a fixed Earth with Velocity Verlet and yields
//! every position (meters) as an iterator:
//!
//! ```text
//! x₁ = x₀ + v₀·dt + ½·a₀·dt²
//! a₁ = -GM·x₁ / |x₁|³
//! v₁ = v₀ + ½·(a₀ + a₁)·dt
//! ```
//!
//! The run ends after `steps` positions, or early when the two bodies touch
//! (`|x| <= central_radius + orbiting_radius`). The touching position is not
//! yielded.

use lunarview_core::{LunarError, Result};
use nalgebra::Vector2;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Physical constants and initial conditions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbitConfig {
    /// Mass of the fixed central body (kg)
    pub central_mass_kg: f64,

    /// Gravitational constant (m³ kg⁻¹ s⁻²)
    pub gravitational_constant: f64,

    /// Central body radius (m)
    pub central_radius_m: f64,

    /// Orbiting body radius (m)
    pub orbiting_radius_m: f64,

    /// Starting position [x, y] (m)
    pub initial_position_m: [f64; 2],

    /// Direction of the initial velocity, normalized before use
    pub initial_direction: [f64; 2],

    /// Initial speed (m/s)
    pub initial_speed_ms: f64,

    /// Integration step (s)
    pub time_step_s: f64,

    /// Number of positions produced, the initial one included
    pub steps: usize,
}

impl Default for OrbitConfig {
    fn default() -> Self {
        Self {
            central_mass_kg: 5.9722e24,
            gravitational_constant: 6.67430e-11,
            central_radius_m: 6_378_137.0,
            orbiting_radius_m: 1_737_400.0,
            initial_position_m: [384_400_000.0, 0.0],
            initial_direction: [0.0, -1.0],
            initial_speed_ms: 1023.056,
            time_step_s: 10.0,
            steps: 1_000_000,
        }
    }
}

impl OrbitConfig {
    /// Validates value ranges.
    pub fn validate(&self) -> Result<()> {
        if self.steps == 0 {
            return Err(LunarError::config("steps must be > 0"));
        }
        if !(self.time_step_s > 0.0) || !self.time_step_s.is_finite() {
            return Err(LunarError::config(format!(
                "time_step_s must be finite and > 0, got {}",
                self.time_step_s
            )));
        }
        if !(self.central_mass_kg > 0.0) || !(self.gravitational_constant > 0.0) {
            return Err(LunarError::config(
                "central_mass_kg and gravitational_constant must be > 0",
            ));
        }
        if Vector2::from(self.initial_direction).norm() == 0.0 {
            return Err(LunarError::config("initial_direction must be non-zero"));
        }
        if Vector2::from(self.initial_position_m).norm() <= self.collision_radius() {
            return Err(LunarError::config(
                "initial_position_m lies inside the collision radius",
            ));
        }
        Ok(())
    }

    /// Center distance at which the two bodies touch.
    pub fn collision_radius(&self) -> f64 {
        self.central_radius_m + self.orbiting_radius_m
    }
}

/// Kinematic state of the orbiting body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitState {
    /// Position [x, y] in meters
    pub position: Vector2<f64>,

    /// Velocity [vx, vy] in m/s
    pub velocity: Vector2<f64>,

    /// Acceleration [ax, ay] in m/s²
    pub acceleration: Vector2<f64>,
}

/// Velocity Verlet integrator, one position per `next()`.
pub struct OrbitSimulator {
    /// G·M of the central body
    gm: f64,

    collision_radius: f64,
    dt: f64,
    steps: usize,

    state: OrbitState,
    emitted: usize,
    collision: Option<Vector2<f64>>,
}

impl OrbitSimulator {
    /// Creates a simulator at the configured initial conditions.
    pub fn new(config: &OrbitConfig) -> Result<Self> {
        config.validate()?;

        let gm = config.gravitational_constant * config.central_mass_kg;
        let position = Vector2::from(config.initial_position_m);
        let direction = Vector2::from(config.initial_direction).normalize();
        let velocity = direction * config.initial_speed_ms;

        Ok(Self {
            gm,
            collision_radius: config.collision_radius(),
            dt: config.time_step_s,
            steps: config.steps,
            state: OrbitState {
                position,
                velocity,
                acceleration: gravity(gm, &position),
            },
            emitted: 0,
            collision: None,
        })
    }

    pub fn state(&self) -> &OrbitState {
        &self.state
    }

    /// Simulated time of the current state (s).
    pub fn time(&self) -> f64 {
        self.emitted.saturating_sub(1) as f64 * self.dt
    }

    /// Position at which the bodies touched, if they did.
    pub fn collision(&self) -> Option<Vector2<f64>> {
        self.collision
    }

    /// Specific orbital energy `v²/2 - GM/r` (J/kg).
    pub fn specific_energy(&self) -> f64 {
        0.5 * self.state.velocity.norm_squared() - self.gm / self.state.position.norm()
    }

    fn step(&mut self) -> Option<Vector2<f64>> {
        let OrbitState {
            position,
            velocity,
            acceleration,
        } = self.state;
        let dt = self.dt;

        let next_position = position + velocity * dt + acceleration * (0.5 * dt * dt);
        if next_position.norm() <= self.collision_radius {
            warn!(
                "Bodies collide at center coordinates: {}, {}",
                next_position.x, next_position.y
            );
            self.collision = Some(next_position);
            return None;
        }

        let next_acceleration = gravity(self.gm, &next_position);
        let next_velocity = velocity + (acceleration + next_acceleration) * (0.5 * dt);

        self.state = OrbitState {
            position: next_position,
            velocity: next_velocity,
            acceleration: next_acceleration,
        };
        Some(next_position)
    }
}

impl Iterator for OrbitSimulator {
    type Item = Vector2<f64>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.emitted >= self.steps || self.collision.is_some() {
            return None;
        }
        let position = if self.emitted == 0 {
            self.state.position
        } else {
            self.step()?
        };
        self.emitted += 1;
        Some(position)
    }
}

/// Point-mass gravitational acceleration at `position`.
fn gravity(gm: f64, position: &Vector2<f64>) -> Vector2<f64> {
    let r = position.norm();
    -position * (gm / (r * r * r))
}
