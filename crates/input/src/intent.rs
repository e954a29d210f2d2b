use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::action::Action;

/// Everything the player asked for during one tick.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Intent {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    pub sprint: bool,
    pub jump: bool,
    /// Accumulated look delta (x = yaw, y = pitch), radians.
    pub look: Vec2,
    pub collect: bool,
    /// Item names to use, in the order requested.
    pub use_items: Vec<String>,
    pub drop_oldest: bool,
    pub interact: bool,
}

impl Intent {
    pub fn idle() -> Self {
        Self::default()
    }

    /// Fold a tick's worth of actions into one intent.
    pub fn from_actions<'a>(actions: impl IntoIterator<Item = &'a Action>) -> Self {
        let mut intent = Self::default();
        for action in actions {
            intent.apply(action);
        }
        intent
    }

    pub fn apply(&mut self, action: &Action) {
        match action {
            Action::MoveForward => self.forward = true,
            Action::MoveBackward => self.backward = true,
            Action::MoveLeft => self.left = true,
            Action::MoveRight => self.right = true,
            Action::Sprint => self.sprint = true,
            Action::Jump => self.jump = true,
            Action::Look(delta) => self.look += *delta,
            Action::Collect => self.collect = true,
            Action::UseItem(name) => self.use_items.push(name.clone()),
            Action::DropOldest => self.drop_oldest = true,
            Action::Interact => self.interact = true,
            Action::Noop => {}
        }
    }

    /// True when the held movement flags produce a direction. Opposite flags
    /// cancel, so holding left and right together is not moving.
    pub fn is_moving(&self) -> bool {
        self.direction() != Vec3::ZERO
    }

    /// Local-space unit direction (x = right, z = backward), zero when idle
    /// or when opposite flags cancel out. Diagonals are normalised.
    pub fn direction(&self) -> Vec3 {
        let x = f32::from(u8::from(self.right)) - f32::from(u8::from(self.left));
        let z = f32::from(u8::from(self.backward)) - f32::from(u8::from(self.forward));
        Vec3::new(x, 0.0, z).normalize_or_zero()
    }
}
