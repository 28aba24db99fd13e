//! Pointer-drag scrolling for hosts without native drag-scroll
//!
//! The emulator is a two-state machine. While dragging it owns the strip's
//! scroll offset and raises the shared "scrolling horizontally" flag so that
//! sibling components can hold back conflicting gestures.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::trace;

use super::viewport::HorizontalViewport;

/// Scroll travel per unit of pointer travel
pub const DEFAULT_DRAG_GAIN: f64 = 2.0;

/// What the host platform can do with a dragged strip on its own
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragCapability {
    /// Touch platforms scroll natively; no emulation
    NativeDragScroll,
    /// Mouse-only platforms need drag-to-scroll emulated
    #[default]
    PointerOnly,
}

impl DragCapability {
    pub fn from_native_flag(native_drag_scroll: bool) -> Self {
        if native_drag_scroll {
            DragCapability::NativeDragScroll
        } else {
            DragCapability::PointerOnly
        }
    }

    pub fn needs_emulation(self) -> bool {
        self == DragCapability::PointerOnly
    }
}

/// Shared "is scrolling horizontally" observer
///
/// Owned by the common ancestor of all coordinating strips and handed to each
/// of them. Only the strip that is currently dragging writes to it.
#[derive(Debug, Clone, Default)]
pub struct ScrollCoordinator {
    scrolling: Arc<AtomicBool>,
}

impl ScrollCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_scrolling_horizontally(&self, scrolling: bool) {
        self.scrolling.store(scrolling, Ordering::Release);
    }

    pub fn is_scrolling_horizontally(&self) -> bool {
        self.scrolling.load(Ordering::Acquire)
    }
}

/// Raw pointer input, in the strip's horizontal coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down { x: f64 },
    Move { x: f64 },
    Up,
    Leave,
}

/// Emulator state
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragState {
    Idle,
    Dragging { start_x: f64, offset_at_start: f64 },
}

/// Translates pointer drags into scroll offsets
#[derive(Debug, Clone)]
pub struct DragScrollEmulator {
    state: DragState,
    gain: f64,
    coordinator: ScrollCoordinator,
}

impl DragScrollEmulator {
    /// Install an emulator, or nothing when the platform scrolls natively
    pub fn install(
        capability: DragCapability,
        coordinator: ScrollCoordinator,
        gain: f64,
    ) -> Option<Self> {
        capability.needs_emulation().then(|| Self {
            state: DragState::Idle,
            gain,
            coordinator,
        })
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    pub fn gain(&self) -> f64 {
        self.gain
    }

    /// Feed one pointer event; returns `true` when the viewport offset changed
    pub fn handle(&mut self, event: PointerEvent, viewport: &mut HorizontalViewport) -> bool {
        match event {
            PointerEvent::Down { x } => {
                self.pointer_down(x, viewport);
                false
            }
            PointerEvent::Move { x } => self.pointer_move(x, viewport),
            PointerEvent::Up | PointerEvent::Leave => {
                self.release();
                false
            }
        }
    }

    /// Start dragging, capturing the pointer and the current offset
    pub fn pointer_down(&mut self, x: f64, viewport: &HorizontalViewport) {
        trace!("Drag started at x={} offset={}", x, viewport.offset());
        self.state = DragState::Dragging {
            start_x: x,
            offset_at_start: viewport.offset(),
        };
        self.coordinator.set_scrolling_horizontally(true);
    }

    /// Scroll by the amplified pointer travel since the drag started
    pub fn pointer_move(&mut self, x: f64, viewport: &mut HorizontalViewport) -> bool {
        let DragState::Dragging {
            start_x,
            offset_at_start,
        } = self.state
        else {
            return false;
        };

        let delta = (x - start_x) * self.gain;
        let before = viewport.offset();
        viewport.set_offset(offset_at_start - delta);
        viewport.offset() != before
    }

    /// Stop dragging on pointer-up or pointer-leave
    pub fn release(&mut self) {
        if self.is_dragging() {
            trace!("Drag released");
            self.state = DragState::Idle;
            self.coordinator.set_scrolling_horizontally(false);
        }
    }
}
