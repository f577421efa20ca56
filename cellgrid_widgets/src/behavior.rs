// Copyright 2026 the Cellgrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Button state machine, independent of geometry and routing.
//!
//! Push and toggle buttons share the same face-swap logic and differ only in how press and
//! release change the `pressed` flag. [`ButtonKind`] selects that difference.

/// Which face a button should currently show. Drawing it is up to the caller.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Face {
    /// Idle.
    #[default]
    Released,
    /// Held down, or latched on for a toggle.
    Pressed,
    /// Pointer is over an idle button that has a hover face.
    Hover,
}

/// Notification a button emits.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ButtonEvent {
    /// A push button went down.
    Pressed,
    /// A push button came back up.
    Released,
    /// A toggle button flipped; carries the new latched state.
    Toggled(bool),
}

/// Press/release strategy.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ButtonKind {
    /// Down while held; the release ends the press wherever the pointer is.
    Push,
    /// Each press flips a latched state; release is ignored.
    Toggle,
}

/// State shared by every button kind.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ButtonState {
    /// Held (push) or latched (toggle).
    pub pressed: bool,
    /// Face to show.
    pub face: Face,
}

impl ButtonKind {
    /// Apply a press. `hit` tells whether the press landed inside the button.
    pub fn press(self, state: &mut ButtonState, hit: bool) -> Option<ButtonEvent> {
        if !hit {
            return None;
        }
        match self {
            Self::Push => {
                state.pressed = true;
                state.face = Face::Pressed;
                Some(ButtonEvent::Pressed)
            }
            Self::Toggle => {
                state.pressed = !state.pressed;
                state.face = if state.pressed {
                    Face::Pressed
                } else {
                    Face::Released
                };
                Some(ButtonEvent::Toggled(state.pressed))
            }
        }
    }

    /// Apply a release, wherever the pointer is.
    pub fn release(self, state: &mut ButtonState) -> Option<ButtonEvent> {
        match self {
            Self::Push if state.pressed => {
                state.pressed = false;
                state.face = Face::Released;
                Some(ButtonEvent::Released)
            }
            Self::Push | Self::Toggle => None,
        }
    }

    /// Apply pointer motion. Held or latched buttons keep their face.
    pub fn hover(self, state: &mut ButtonState, hit: bool, has_hover_face: bool) {
        if state.pressed {
            return;
        }
        state.face = if hit && has_hover_face {
            Face::Hover
        } else {
            Face::Released
        };
    }
}
