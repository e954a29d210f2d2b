use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A discrete player action produced by whatever front end is driving the
/// session (keyboard, scripted route, test).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Action {
    MoveForward,
    MoveBackward,
    MoveLeft,
    MoveRight,
    /// Hold sprint for this tick.
    Sprint,
    Jump,
    /// Mouse-look delta in radians (x = yaw, y = pitch).
    Look(Vec2),
    /// Pick up every collectible within reach.
    Collect,
    /// Use the first held item with this name.
    UseItem(String),
    DropOldest,
    /// Activate the nearest portal within reach.
    Interact,
    /// No-op (used for bindings that haven't been mapped yet).
    Noop,
}

impl Action {
    /// Parse a single route token such as `w`, `shift`, `e`, `q`, `f`, or
    /// `use:<item name>`. Item names keep their case.
    pub fn from_key(key: &str) -> Option<Self> {
        if let Some((prefix, name)) = key.split_once(':') {
            let name = name.trim();
            if prefix.trim().eq_ignore_ascii_case("use") && !name.is_empty() {
                return Some(Self::UseItem(name.to_string()));
            }
            return None;
        }
        let action = match key.to_ascii_lowercase().as_str() {
            "w" | "forward" => Self::MoveForward,
            "s" | "back" | "backward" => Self::MoveBackward,
            "a" | "left" => Self::MoveLeft,
            "d" | "right" => Self::MoveRight,
            "shift" | "sprint" => Self::Sprint,
            "space" | "jump" => Self::Jump,
            "e" | "collect" => Self::Collect,
            "q" | "drop" => Self::DropOldest,
            "f" | "interact" => Self::Interact,
            "" | "idle" => Self::Noop,
            _ => return None,
        };
        Some(action)
    }

    pub fn is_movement(&self) -> bool {
        matches!(
            self,
            Self::MoveForward | Self::MoveBackward | Self::MoveLeft | Self::MoveRight
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_map_to_actions() {
        assert_eq!(Action::from_key("W"), Some(Action::MoveForward));
        assert_eq!(Action::from_key("shift"), Some(Action::Sprint));
        assert_eq!(Action::from_key("f"), Some(Action::Interact));
        assert_eq!(Action::from_key("idle"), Some(Action::Noop));
        assert_eq!(Action::from_key("x"), None);
    }

    #[test]
    fn use_token_names_the_item() {
        assert_eq!(
            Action::from_key("use:Energy Drink"),
            Some(Action::UseItem("Energy Drink".into()))
        );
        assert_eq!(
            Action::from_key("USE: Old Photo"),
            Some(Action::UseItem("Old Photo".into()))
        );
        assert_eq!(Action::from_key("use:"), None);
        assert_eq!(Action::from_key("take:Health Kit"), None);
    }

    #[test]
    fn movement_classification() {
        assert!(Action::MoveLeft.is_movement());
        assert!(!Action::Jump.is_movement());
        assert!(!Action::Look(Vec2::ZERO).is_movement());
    }
}
