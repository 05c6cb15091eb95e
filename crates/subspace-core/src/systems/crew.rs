//! Crew system - walks crew to stations and hands out work
//!
//! Assignment is greedy first-fit: components are visited in the ship's
//! insertion order and each one takes idle crew until it is fully staffed.
//! Nobody already working is ever moved.

use crate::components::{Component, ComponentId, CrewMember, CrewState, ShipFrame, Vec2};
use crate::constants::{CREW_ARRIVAL_DISTANCE, CREW_SPEED_ROOM};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// All crew aboard one ship
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CrewManager {
    crew: Vec<CrewMember>,
    next_crew_id: u32,
}

impl CrewManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `count` idle crew standing at `position`
    pub fn add_crew(&mut self, count: u32, position: Vec2) {
        for _ in 0..count {
            self.crew.push(CrewMember::new(self.next_crew_id, position));
            self.next_crew_id += 1;
        }
    }

    /// Move and work every member, then hand out assignments.
    ///
    /// `components` and `frame` are a read-only view of the owning ship.
    pub fn update(&mut self, dt: f32, components: &[Component], frame: &ShipFrame) {
        for member in &mut self.crew {
            update_member(member, dt, components, frame);
        }

        self.assign_idle_crew(components);
    }

    /// Give idle crew to understaffed components. Returns how many were assigned.
    pub fn assign_idle_crew(&mut self, components: &[Component]) -> usize {
        let mut idle: VecDeque<usize> = self
            .crew
            .iter()
            .enumerate()
            .filter(|(_, member)| member.is_available())
            .map(|(idx, _)| idx)
            .collect();
        let mut assigned = 0;

        for component in components {
            let required = component.kind.required_crew() as usize;
            if required == 0 {
                continue;
            }

            let mut staffed = self.staffing(component.id());
            while staffed < required {
                let Some(idx) = idle.pop_front() else {
                    return assigned;
                };
                self.crew[idx].assign_to(component.id());
                staffed += 1;
                assigned += 1;
            }
        }

        assigned
    }

    /// Crew working at or walking to `component`
    pub fn staffing(&self, component: ComponentId) -> usize {
        self.crew.iter().filter(|m| m.is_staffing(component)).count()
    }

    pub fn members(&self) -> &[CrewMember] {
        &self.crew
    }

    pub fn total(&self) -> usize {
        self.crew.len()
    }

    pub fn idle_count(&self) -> usize {
        self.count_in(CrewState::Idle)
    }

    pub fn walking_count(&self) -> usize {
        self.count_in(CrewState::Walking)
    }

    pub fn working_count(&self) -> usize {
        self.count_in(CrewState::Working)
    }

    fn count_in(&self, state: CrewState) -> usize {
        self.crew.iter().filter(|m| m.state == state).count()
    }
}

fn find(components: &[Component], id: ComponentId) -> Option<&Component> {
    components.iter().find(|c| c.id() == id)
}

/// Advance one crew member by `dt`
fn update_member(member: &mut CrewMember, dt: f32, components: &[Component], frame: &ShipFrame) {
    // A destroyed station frees everyone tied to it
    let gone = |id: Option<ComponentId>| id.is_some_and(|id| find(components, id).is_none());
    if gone(member.assigned) || gone(member.target) {
        member.release();
    }

    match (member.target, member.assigned) {
        (Some(target), assigned) if assigned != Some(target) => {
            if let Some(component) = find(components, target) {
                let destination = frame.grid_to_world(component.grid_x, component.grid_y);
                walk_toward(member, target, destination, dt);
            }
        }
        (_, Some(assigned)) => {
            // Stay at the station while the ship moves
            if let Some(component) = find(components, assigned) {
                member.position = frame.grid_to_world(component.grid_x, component.grid_y);
            }
            member.state = CrewState::Working;
            member.work_progress += dt;
        }
        _ => member.state = CrewState::Idle,
    }
}

fn walk_toward(member: &mut CrewMember, target: ComponentId, destination: Vec2, dt: f32) {
    member.state = CrewState::Walking;

    let diff = destination - member.position;
    let distance = diff.length();
    // Corridor speed is not applied; crew always walk at room speed
    let step = CREW_SPEED_ROOM * dt;

    if distance < CREW_ARRIVAL_DISTANCE || step >= distance {
        member.position = destination;
        member.assigned = Some(target);
        member.target = None;
        member.state = CrewState::Working;
    } else {
        member.position += diff.normalize() * step;
    }
}
