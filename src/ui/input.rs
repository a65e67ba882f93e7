use minifb::{Key, Window};
use std::collections::HashSet;

/// A logical control, decoupled from the physical key that triggers it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Exit,
    RotateLeft,
    RotateRight,
    TiltUp,
    TiltDown,
    ZoomIn,
    ZoomOut,
    SelectRed,
    SelectGreen,
    SelectBlue,
    UsePhong,
    UseBlinnPhong,
    UseGouraud,
    Increase,
    Decrease,
}

/// The set of actions whose keys are held during one frame.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    held: HashSet<Action>,
}

impl InputSnapshot {
    pub fn from_actions(actions: impl IntoIterator<Item = Action>) -> Self {
        Self {
            held: actions.into_iter().collect(),
        }
    }

    pub fn is_held(&self, action: Action) -> bool {
        self.held.contains(&action)
    }
}

/// Physical key for every action. Each key maps to exactly one action.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    bindings: Vec<(Key, Action)>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            bindings: vec![
                (Key::Escape, Action::Exit),
                // A turns the object towards +angleY, D towards -angleY.
                (Key::D, Action::RotateLeft),
                (Key::A, Action::RotateRight),
                (Key::W, Action::TiltUp),
                (Key::S, Action::TiltDown),
                (Key::Q, Action::ZoomIn),
                (Key::E, Action::ZoomOut),
                (Key::R, Action::SelectRed),
                (Key::G, Action::SelectGreen),
                (Key::B, Action::SelectBlue),
                (Key::V, Action::UsePhong),
                (Key::M, Action::UseBlinnPhong),
                (Key::N, Action::UseGouraud),
                (Key::T, Action::Increase),
                (Key::Y, Action::Decrease),
            ],
        }
    }
}

impl KeyBindings {
    /// Reads the keys currently held in `window`.
    pub fn capture(&self, window: &Window) -> InputSnapshot {
        InputSnapshot::from_actions(
            self.bindings
                .iter()
                .filter(|(key, _)| window.is_key_down(*key))
                .map(|&(_, action)| action),
        )
    }

    /// One-line description of the controls for the startup log.
    pub fn summary(&self) -> String {
        self.bindings
            .iter()
            .map(|(key, action)| format!("{key:?}={action:?}"))
            .collect::<Vec<_>>()
            .join(", ")
    }
}
