use bevy::prelude::*;

/// Position of a fresh press in canvas space (origin top-left, y
/// down), which is also simulation space: the window's logical
/// resolution and the sim bounds are kept identical.
///
/// Mouse and touch are treated the same; browser-gesture suppression
/// is the host page's concern.
pub fn just_pressed_canvas_position(
    button_input: &Res<ButtonInput<MouseButton>>,
    touch_input: &Res<Touches>,
    windows: &Query<&Window>,
) -> Option<Vec2> {
    if button_input.just_pressed(MouseButton::Left) {
        let cursor_position = windows.single().cursor_position()?;
        Some(cursor_position)
    } else if touch_input.any_just_pressed() {
        let touch = touch_input.iter_just_pressed().next()?;
        Some(touch.position())
    } else {
        None
    }
}

/// Whether any press happened this frame, position aside. Used by the
/// tap-anywhere screens (menu, game over).
pub fn any_just_pressed(
    button_input: &Res<ButtonInput<MouseButton>>,
    touch_input: &Res<Touches>,
) -> bool {
    button_input.just_pressed(MouseButton::Left) || touch_input.any_just_pressed()
}
