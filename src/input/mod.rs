use glam::Vec2;
use winit::event::MouseButton;

/// Pixels per wheel notch for trackpad-style pixel deltas.
const PIXELS_PER_NOTCH: f32 = 50.0;

/// Pointer state between frames; drags and wheel motion accumulate until the
/// frame driver takes them.
#[derive(Default)]
pub struct InputState {
    pub rotating: bool,
    pub panning: bool,
    pub mouse_x: f32,
    pub mouse_y: f32,
    has_cursor: bool,
    rotate_drag: Vec2,
    pan_drag: Vec2,
    zoom_notches: f32,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle_mouse_button_press(&mut self, button: MouseButton) {
        match button {
            MouseButton::Left => self.rotating = true,
            MouseButton::Right | MouseButton::Middle => self.panning = true,
            _ => {}
        }
    }

    pub fn handle_mouse_button_release(&mut self, button: MouseButton) {
        match button {
            MouseButton::Left => self.rotating = false,
            MouseButton::Right | MouseButton::Middle => self.panning = false,
            _ => {}
        }
    }

    pub fn update_mouse_position(&mut self, x: f32, y: f32) {
        if self.has_cursor {
            let delta = Vec2::new(x - self.mouse_x, y - self.mouse_y);
            if self.rotating {
                self.rotate_drag += delta;
            } else if self.panning {
                self.pan_drag += delta;
            }
        }
        self.mouse_x = x;
        self.mouse_y = y;
        self.has_cursor = true;
    }

    pub fn handle_cursor_left(&mut self) {
        self.has_cursor = false;
        self.rotating = false;
        self.panning = false;
    }

    /// Positive `notches` scroll toward the scene.
    pub fn handle_wheel_lines(&mut self, notches: f32) {
        self.zoom_notches += notches;
    }

    pub fn handle_wheel_pixels(&mut self, pixels: f32) {
        self.zoom_notches += pixels / PIXELS_PER_NOTCH;
    }

    pub fn take_rotate_drag(&mut self) -> Vec2 {
        std::mem::take(&mut self.rotate_drag)
    }

    pub fn take_pan_drag(&mut self) -> Vec2 {
        std::mem::take(&mut self.pan_drag)
    }

    pub fn take_zoom(&mut self) -> f32 {
        std::mem::take(&mut self.zoom_notches)
    }
}
