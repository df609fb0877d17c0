//! Rigid-body world for the race, built on rapier2d
//!
//! We own the whole rapier pipeline and step it ourselves at a fixed rate.
//! Collisions leave through [`ContactCollector`] and are handed to the caller
//! by [`PhysicsWorld::drain_contacts`].

use std::sync::mpsc::Receiver;

use rapier2d::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::SimError;
use super::contact::{BodyKind, ContactCollector, ContactEvent};
use super::track::{Rect2, SpawnPose, TrackLayout};
use super::vehicle::{ControlOutput, VEHICLE_OUTLINE, VehicleConfig};

/// Stepping parameters
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Fixed step length in seconds
    pub timestep: f32,
    /// Upper bound on catch-up steps after a long frame
    pub max_steps_per_frame: u32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            timestep: 1.0 / 60.0,
            max_steps_per_frame: 4,
        }
    }
}

/// Position and heading of the vehicle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VehiclePose {
    pub position: [f32; 2],
    pub angle: f32,
}

/// The race's physics scene: static walls, the goal sensor and one vehicle
pub struct PhysicsWorld {
    gravity: Vector<Real>,
    integration_parameters: IntegrationParameters,
    pipeline: PhysicsPipeline,
    islands: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd_solver: CCDSolver,
    collector: ContactCollector,
    contacts: Receiver<ContactEvent>,
    vehicle: RigidBodyHandle,
    spawn: SpawnPose,
    steps: u64,
}

impl PhysicsWorld {
    /// Builds the scene for `track`
    pub fn new(
        track: &TrackLayout,
        vehicle: &VehicleConfig,
        physics: &PhysicsConfig,
    ) -> Result<Self, SimError> {
        let mut bodies = RigidBodySet::new();
        let mut colliders = ColliderSet::new();

        for wall in &track.walls {
            add_static_box(&mut bodies, &mut colliders, &wall.rect(), BodyKind::Wall, false);
        }
        add_static_box(&mut bodies, &mut colliders, &track.goal, BodyKind::Goal, true);

        let vehicle_handle = add_vehicle(&mut bodies, &mut colliders, vehicle, &track.spawn)?;

        let integration_parameters = IntegrationParameters {
            dt: physics.timestep,
            ..Default::default()
        };

        let (collector, contacts) = ContactCollector::channel();

        info!(
            walls = track.walls.len(),
            bodies = bodies.len(),
            colliders = colliders.len(),
            "Physics world built"
        );

        Ok(Self {
            gravity: vector![0.0, 0.0],
            integration_parameters,
            pipeline: PhysicsPipeline::new(),
            islands: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            bodies,
            colliders,
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            collector,
            contacts,
            vehicle: vehicle_handle,
            spawn: track.spawn,
            steps: 0,
        })
    }

    /// Advances the simulation by one fixed step
    pub fn step(&mut self) {
        self.pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.islands,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            None,
            &(),
            &self.collector,
        );
        self.steps += 1;
    }

    /// Contact transitions produced since the last drain, in order
    pub fn drain_contacts(&mut self) -> Vec<ContactEvent> {
        self.contacts.try_iter().collect()
    }

    /// Replaces last step's forces with the given controls
    pub fn apply_controls(&mut self, controls: &ControlOutput) {
        let Some(body) = self.bodies.get_mut(self.vehicle) else {
            return;
        };

        body.reset_forces(false);
        body.reset_torques(false);

        if controls.torque != 0.0 {
            body.add_torque(controls.torque, true);
        }
        if controls.thrust != 0.0 {
            let forward = body.position().rotation * vector![0.0, controls.thrust];
            body.add_force(forward, true);
        }
    }

    /// Puts the vehicle back on the spawn pose, at rest
    pub fn reset_vehicle(&mut self) {
        let Some(body) = self.bodies.get_mut(self.vehicle) else {
            return;
        };

        let [x, y] = self.spawn.position;
        body.set_position(Isometry::new(vector![x, y], self.spawn.angle), true);
        body.set_linvel(vector![0.0, 0.0], true);
        body.set_angvel(0.0, true);
        body.reset_forces(true);
        body.reset_torques(true);
        debug!("Vehicle reset to spawn");
    }

    /// Moves the vehicle without touching its velocity
    pub fn teleport_vehicle(&mut self, pose: VehiclePose) {
        if let Some(body) = self.bodies.get_mut(self.vehicle) {
            let [x, y] = pose.position;
            body.set_position(Isometry::new(vector![x, y], pose.angle), true);
        }
    }

    pub fn vehicle_pose(&self) -> VehiclePose {
        self.bodies
            .get(self.vehicle)
            .map(|body| {
                let iso = body.position();
                VehiclePose {
                    position: [iso.translation.x, iso.translation.y],
                    angle: iso.rotation.angle(),
                }
            })
            .unwrap_or(VehiclePose {
                position: self.spawn.position,
                angle: self.spawn.angle,
            })
    }

    pub fn vehicle_speed(&self) -> f32 {
        self.bodies
            .get(self.vehicle)
            .map_or(0.0, |body| body.linvel().norm())
    }

    /// Vehicle triangle in world space
    pub fn vehicle_outline(&self) -> [[f32; 2]; 3] {
        let Some(body) = self.bodies.get(self.vehicle) else {
            return VEHICLE_OUTLINE;
        };
        let iso = body.position();
        VEHICLE_OUTLINE.map(|[x, y]| {
            let p = iso * point![x, y];
            [p.x, p.y]
        })
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    pub fn collider_count(&self) -> usize {
        self.colliders.len()
    }

    /// Fixed steps taken since the world was built
    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn timestep(&self) -> f32 {
        self.integration_parameters.dt
    }
}

fn add_static_box(
    bodies: &mut RigidBodySet,
    colliders: &mut ColliderSet,
    rect: &Rect2,
    kind: BodyKind,
    sensor: bool,
) -> RigidBodyHandle {
    let [x, y] = rect.center;
    let [hx, hy] = rect.half_extents;

    let body = bodies.insert(RigidBodyBuilder::fixed().translation(vector![x, y]));
    let collider = ColliderBuilder::cuboid(hx, hy)
        .sensor(sensor)
        .user_data(kind.to_user_data());
    colliders.insert_with_parent(collider, body, bodies);
    body
}

fn add_vehicle(
    bodies: &mut RigidBodySet,
    colliders: &mut ColliderSet,
    config: &VehicleConfig,
    spawn: &SpawnPose,
) -> Result<RigidBodyHandle, SimError> {
    let [x, y] = spawn.position;
    let body = bodies.insert(
        RigidBodyBuilder::dynamic()
            .translation(vector![x, y])
            .rotation(spawn.angle)
            .linear_damping(config.linear_damping)
            .angular_damping(config.angular_damping)
            .ccd_enabled(true),
    );

    let points: Vec<Point<Real>> = VEHICLE_OUTLINE.iter().map(|[px, py]| point![*px, *py]).collect();
    let collider = ColliderBuilder::convex_hull(&points)
        .ok_or(SimError::DegenerateShape("vehicle"))?
        .density(config.density)
        .friction(config.friction)
        .active_events(ActiveEvents::COLLISION_EVENTS)
        .user_data(BodyKind::Vehicle.to_user_data());
    colliders.insert_with_parent(collider, body, bodies);

    Ok(body)
}
