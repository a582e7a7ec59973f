// SPDX-License-Identifier: GPL-3.0-only

//! Camera-mode menu state machine
//!
//! The exposure panel lives inside the expanded mode menu, so it is modelled
//! as a third state rather than a separate flag: there is no way to represent
//! an open exposure panel under a collapsed menu.

/// Expansion state of the camera-mode menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MenuState {
    #[default]
    Collapsed,
    Expanded,
    /// Expanded with the exposure sub-panel open
    ExposureOpen,
}

impl MenuState {
    /// Mode button: open the menu, or close it together with the sub-panel
    pub fn toggle_mode(self) -> Self {
        match self {
            MenuState::Collapsed => MenuState::Expanded,
            MenuState::Expanded | MenuState::ExposureOpen => MenuState::Collapsed,
        }
    }

    /// Exposure button: only meaningful while the menu is expanded
    pub fn toggle_exposure(self) -> Self {
        match self {
            MenuState::Collapsed => MenuState::Collapsed,
            MenuState::Expanded => MenuState::ExposureOpen,
            MenuState::ExposureOpen => MenuState::Expanded,
        }
    }

    /// Tap outside every control surface collapses both levels at once
    pub fn tap_away(self) -> Self {
        MenuState::Collapsed
    }

    pub fn is_expanded(self) -> bool {
        !matches!(self, MenuState::Collapsed)
    }

    pub fn exposure_panel_open(self) -> bool {
        matches!(self, MenuState::ExposureOpen)
    }

    /// Target height/opacity factor of the mode menu (0 = hidden, 1 = shown)
    pub fn expansion_factor(self) -> f32 {
        if self.is_expanded() { 1.0 } else { 0.0 }
    }

    /// Target height/opacity factor of the exposure sub-panel
    pub fn exposure_panel_factor(self) -> f32 {
        if self.exposure_panel_open() { 1.0 } else { 0.0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn test_transitions() {
        let menu = MenuState::default();
        assert_eq!(menu.toggle_exposure(), MenuState::Collapsed);
        let menu = menu.toggle_mode();
        assert_eq!(menu, MenuState::Expanded);
        let menu = menu.toggle_exposure();
        assert_eq!(menu, MenuState::ExposureOpen);
        assert_eq!(menu.toggle_exposure(), MenuState::Expanded);
        assert_eq!(menu.toggle_mode(), MenuState::Collapsed);
        assert_eq!(menu.tap_away(), MenuState::Collapsed);
    }

    #[test]
    fn test_factors() {
        assert_eq!(MenuState::Collapsed.expansion_factor(), 0.0);
        assert_eq!(MenuState::Expanded.expansion_factor(), 1.0);
        assert_eq!(MenuState::Expanded.exposure_panel_factor(), 0.0);
        assert_eq!(MenuState::ExposureOpen.exposure_panel_factor(), 1.0);
    }

    #[test]
    fn test_nesting_holds_for_random_sequences() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut menu = MenuState::default();
        for _ in 0..10_000 {
            menu = match rng.gen_range(0..3) {
                0 => menu.toggle_mode(),
                1 => menu.toggle_exposure(),
                _ => menu.tap_away(),
            };
            assert!(!menu.exposure_panel_open() || menu.is_expanded());
        }
    }
}
