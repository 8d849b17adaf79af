//! Animation categories
//!
//! Every registered widget keeps independent state per category: a button
//! may fade its hover highlight while its focus frame is still fading out.

use bitflags::bitflags;

/// A single animation category
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AnimationMode {
    Hover,
    Focus,
    Enable,
    Pressed,
}

impl AnimationMode {
    /// All categories, in lookup order
    pub const ALL: [AnimationMode; 4] = [
        AnimationMode::Hover,
        AnimationMode::Focus,
        AnimationMode::Enable,
        AnimationMode::Pressed,
    ];
}

bitflags! {
    /// A set of animation categories
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct AnimationModes: u8 {
        const HOVER = 1 << 0;
        const FOCUS = 1 << 1;
        const ENABLE = 1 << 2;
        const PRESSED = 1 << 3;
    }
}

impl From<AnimationMode> for AnimationModes {
    fn from(mode: AnimationMode) -> Self {
        match mode {
            AnimationMode::Hover => AnimationModes::HOVER,
            AnimationMode::Focus => AnimationModes::FOCUS,
            AnimationMode::Enable => AnimationModes::ENABLE,
            AnimationMode::Pressed => AnimationModes::PRESSED,
        }
    }
}

impl AnimationModes {
    /// Check membership of a single category
    pub fn has(self, mode: AnimationMode) -> bool {
        self.contains(AnimationModes::from(mode))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_mask() {
        let modes = AnimationModes::HOVER | AnimationModes::PRESSED;
        assert!(modes.has(AnimationMode::Hover));
        assert!(modes.has(AnimationMode::Pressed));
        assert!(!modes.has(AnimationMode::Focus));
        assert!(!AnimationModes::empty().has(AnimationMode::Enable));
        assert!(AnimationModes::all().has(AnimationMode::Enable));
    }
}
