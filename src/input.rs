use std::collections::HashSet;

use winit::keyboard::KeyCode;

/// Keys currently held down.
#[derive(Debug, Clone)]
pub struct InputState {
    pressed: HashSet<KeyCode>,
}
impl InputState {
    pub fn new() -> Self {
        Self {
            pressed: HashSet::new(),
        }
    }

    pub fn update_key(&mut self, event: &winit::event::KeyEvent) {
        let winit::keyboard::PhysicalKey::Code(key) = event.physical_key else {
            return;
        };
        match event.state {
            winit::event::ElementState::Pressed => self.press(key),
            winit::event::ElementState::Released => self.release(key),
        }
    }
    pub fn press(&mut self, key: KeyCode) {
        self.pressed.insert(key);
    }
    pub fn release(&mut self, key: KeyCode) {
        self.pressed.remove(&key);
    }
    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.pressed.contains(&key)
    }

    /// Forget held keys, e.g. after focus is lost and releases go unseen.
    pub fn clear(&mut self) {
        self.pressed.clear();
    }
}
impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_release() {
        let mut input = InputState::new();
        assert!(!input.is_key_pressed(KeyCode::Escape));
        input.press(KeyCode::Escape);
        input.press(KeyCode::Space);
        assert!(input.is_key_pressed(KeyCode::Escape));
        input.release(KeyCode::Escape);
        assert!(!input.is_key_pressed(KeyCode::Escape));
        assert!(input.is_key_pressed(KeyCode::Space));
        input.clear();
        assert!(!input.is_key_pressed(KeyCode::Space));
    }
}
