//! Crew members aboard a ship

use super::common::Vec2;
use super::module::ComponentId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CrewState {
    #[default]
    Idle,
    Walking,
    Working,
}

/// One crew member. Components are referenced by id and resolved against
/// the ship every tick.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrewMember {
    pub id: u32,
    /// World position
    pub position: Vec2,
    /// Component currently being worked at
    pub assigned: Option<ComponentId>,
    /// Component being walked toward
    pub target: Option<ComponentId>,
    pub state: CrewState,
    /// Seconds spent working at the current assignment
    pub work_progress: f32,
}

impl CrewMember {
    pub fn new(id: u32, position: Vec2) -> Self {
        Self {
            id,
            position,
            assigned: None,
            target: None,
            state: CrewState::Idle,
            work_progress: 0.0,
        }
    }

    /// Send this member to a component. Takes effect on the next update.
    pub fn assign_to(&mut self, component: ComponentId) {
        self.target = Some(component);
        self.work_progress = 0.0;
    }

    /// Free for a new assignment
    pub fn is_available(&self) -> bool {
        self.state == CrewState::Idle && self.assigned.is_none() && self.target.is_none()
    }

    /// Assigned to or heading for `component`
    pub fn is_staffing(&self, component: ComponentId) -> bool {
        self.assigned == Some(component) || self.target == Some(component)
    }

    /// Drop both references and stand idle
    pub(crate) fn release(&mut self) {
        self.assigned = None;
        self.target = None;
        self.state = CrewState::Idle;
    }
}
