use crate::picker::{PointerEvent, Strip};
use crate::range::ResolvedBounds;

use super::layout::StripLayout;

/// All state changes in the interactive picker happen through actions
///
/// Actions are dispatched from key and mouse input, from the draw pass
/// (layout changes) and from the bounds resolution task.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    Quit,
    /// Move the selection by this many days
    MoveDays(isize),
    /// Move the selection by this many months, keeping the day of month
    MoveMonths(isize),
    JumpToToday,
    /// Re-resolve bounds, bypassing the session memo
    RefreshBounds,
    BoundsResolved(ResolvedBounds),
    /// Terminal was laid out (first draw or resize)
    Layout(StripLayout),
    /// Pointer input over a strip, x relative to the strip's left edge
    Pointer(Strip, PointerEvent),
}

/// Work the event loop must perform on behalf of the app
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Request {
    ResolveBounds { refresh: bool },
}
