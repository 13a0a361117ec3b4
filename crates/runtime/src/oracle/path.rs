//! Path follower that records what was handed to it.
use glam::Vec3;

use tactics_core::PathFollower;

/// Records committed routes instead of steering anything, for hosts that do
/// their own locomotion and for test assertions.
#[derive(Clone, Debug, Default)]
pub struct RecordingPathFollower {
    current: Option<Vec<Vec3>>,
    commits: u32,
    clears: u32,
}

impl RecordingPathFollower {
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recently committed route, if one is active.
    pub fn current_path(&self) -> Option<&[Vec3]> {
        self.current.as_deref()
    }

    pub fn commit_count(&self) -> u32 {
        self.commits
    }

    pub fn clear_count(&self) -> u32 {
        self.clears
    }
}

impl PathFollower for RecordingPathFollower {
    fn commit_path(&mut self, waypoints: &[Vec3]) {
        self.current = Some(waypoints.to_vec());
        self.commits += 1;
    }

    fn clear_path(&mut self) {
        self.current = None;
        self.clears += 1;
    }
}
