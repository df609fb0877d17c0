//! Contact begin/end events coming out of the physics step
//!
//! rapier reports collisions through an [`EventHandler`] it calls during
//! `step()`. [`ContactCollector`] turns those into plain [`ContactEvent`]s and
//! sends them down a channel; the race drains the receiving end after each
//! step, so game logic never runs inside the physics pipeline.

use std::sync::mpsc::{self, Receiver, Sender};

use rapier2d::prelude::*;
use tracing::trace;

/// What a collider belongs to, stored in the collider's `user_data`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BodyKind {
    Vehicle,
    Goal,
    Wall,
}

impl BodyKind {
    pub fn to_user_data(self) -> u128 {
        match self {
            BodyKind::Vehicle => 1,
            BodyKind::Goal => 2,
            BodyKind::Wall => 3,
        }
    }

    pub fn from_user_data(data: u128) -> Option<Self> {
        match data {
            1 => Some(BodyKind::Vehicle),
            2 => Some(BodyKind::Goal),
            3 => Some(BodyKind::Wall),
            _ => None,
        }
    }
}

/// Two colliders started or stopped touching
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContactEvent {
    pub a: BodyKind,
    pub b: BodyKind,
    pub touching: bool,
}

impl ContactEvent {
    /// True if this event is between `x` and `y`, in either order
    pub fn is_between(&self, x: BodyKind, y: BodyKind) -> bool {
        (self.a == x && self.b == y) || (self.a == y && self.b == x)
    }
}

/// Physics event handler forwarding collisions to a channel
pub struct ContactCollector {
    sender: Sender<ContactEvent>,
}

impl ContactCollector {
    /// Creates the collector and the receiving end the caller drains
    pub fn channel() -> (Self, Receiver<ContactEvent>) {
        let (sender, receiver) = mpsc::channel();
        (Self { sender }, receiver)
    }

    fn kind_of(colliders: &ColliderSet, handle: ColliderHandle) -> Option<BodyKind> {
        colliders
            .get(handle)
            .and_then(|collider| BodyKind::from_user_data(collider.user_data))
    }
}

impl EventHandler for ContactCollector {
    fn handle_collision_event(
        &self,
        _bodies: &RigidBodySet,
        colliders: &ColliderSet,
        event: CollisionEvent,
        _contact_pair: Option<&ContactPair>,
    ) {
        let (h1, h2, touching) = match event {
            CollisionEvent::Started(h1, h2, _) => (h1, h2, true),
            CollisionEvent::Stopped(h1, h2, _) => (h1, h2, false),
        };

        let (Some(a), Some(b)) = (
            Self::kind_of(colliders, h1),
            Self::kind_of(colliders, h2),
        ) else {
            trace!(?event, "Ignoring contact with untagged collider");
            return;
        };

        // The receiver lives as long as the physics world that owns us
        let _ = self.sender.send(ContactEvent { a, b, touching });
    }

    fn handle_contact_force_event(
        &self,
        _dt: Real,
        _bodies: &RigidBodySet,
        _colliders: &ColliderSet,
        _contact_pair: &ContactPair,
        _total_force_magnitude: Real,
    ) {
    }
}
