/// Mouse event to action mapping
///
/// Terminals have no native drag-scroll, so left-button presses, drags and
/// releases over a strip become pointer events for the drag emulator.
/// Dragging off the strip that was pressed ends the drag like a pointer-leave.
use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

use crate::picker::PointerEvent;

use super::action::Action;
use super::app::App;

pub fn mouse_to_action(mouse: MouseEvent, app: &App) -> Option<Action> {
    let layout = app.layout()?;
    let target = layout.strip_at(mouse.column, mouse.row);

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            target.map(|(strip, x)| Action::Pointer(strip, PointerEvent::Down { x }))
        }
        MouseEventKind::Drag(MouseButton::Left) => {
            let pressed = app.pressed_strip()?;
            match target {
                Some((strip, x)) if strip == pressed => {
                    Some(Action::Pointer(strip, PointerEvent::Move { x }))
                }
                _ => Some(Action::Pointer(pressed, PointerEvent::Leave)),
            }
        }
        MouseEventKind::Up(MouseButton::Left) => {
            let pressed = app.pressed_strip()?;
            Some(Action::Pointer(pressed, PointerEvent::Up))
        }
        _ => None,
    }
}
