//! Windowed date picker
//!
//! `DatePicker` owns the bounds, the selection, both windows, their
//! synchronizers and (on pointer-only hosts) their drag emulators. It is
//! driven by `PickerMsg` values and answers each one with a `PickerEffect`,
//! the same way components answer messages elsewhere in the crate.
//!
//! Selection changes requested by the user are never applied directly: they
//! come back as `PickerEffect::SelectionChange` and the owner feeds them in
//! again as `PickerMsg::SelectionChanged`.

pub mod day_window;
pub mod drag;
pub mod format;
pub mod month_window;
pub mod sync;
pub mod viewport;

use chrono::NaiveDate;
use tracing::debug;

use crate::types::Bounds;

pub use day_window::{Day, DayWindow, DEFAULT_DAY_RADIUS};
pub use drag::{
    DragCapability, DragScrollEmulator, DragState, PointerEvent, ScrollCoordinator,
    DEFAULT_DRAG_GAIN,
};
pub use format::{CalendarFormatter, EnglishFormatter};
pub use month_window::{reanchor_to_month, Month, MonthWindow, DEFAULT_MONTH_RADIUS};
pub use sync::{
    offset_for, ItemGeometry, ScrollIntent, SelectionSynchronizer, Strip, DAY_ITEM_GEOMETRY,
    MONTH_ITEM_GEOMETRY,
};
pub use viewport::HorizontalViewport;

/// Tunables for a picker instance
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickerSettings {
    pub day_radius: u32,
    pub month_radius: u32,
    pub day_geometry: ItemGeometry,
    pub month_geometry: ItemGeometry,
    pub drag_gain: f64,
    pub capability: DragCapability,
}

impl Default for PickerSettings {
    fn default() -> Self {
        Self {
            day_radius: DEFAULT_DAY_RADIUS,
            month_radius: DEFAULT_MONTH_RADIUS,
            day_geometry: DAY_ITEM_GEOMETRY,
            month_geometry: MONTH_ITEM_GEOMETRY,
            drag_gain: DEFAULT_DRAG_GAIN,
            capability: DragCapability::default(),
        }
    }
}

/// Messages handled by the picker
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PickerMsg {
    /// The owner moved the authoritative selection
    SelectionChanged(NaiveDate),
    /// Bounds were (re-)resolved
    BoundsChanged(Bounds),
    /// Viewport width of both strips
    ViewportResized(f64),
    /// User picked the day at this window index
    PickDay(usize),
    /// User picked the month at this window index
    PickMonth(usize),
    /// Raw pointer input over one strip
    Pointer(Strip, PointerEvent),
    SetDisabled(bool),
}

/// Side effects for the owner to perform
#[derive(Debug, Clone, PartialEq)]
pub enum PickerEffect {
    None,
    /// Selection-change callback: the owner should adopt this date
    SelectionChange(NaiveDate),
    /// The presentation layer should scroll a strip
    ScrollTo(ScrollIntent),
    Batch(Vec<PickerEffect>),
}

impl PickerEffect {
    /// Collapse a list of effects into the smallest equivalent effect
    pub fn batch(mut effects: Vec<PickerEffect>) -> Self {
        effects.retain(|effect| *effect != PickerEffect::None);
        match effects.len() {
            0 => PickerEffect::None,
            1 => effects.remove(0),
            _ => PickerEffect::Batch(effects),
        }
    }

    /// The date carried by the first `SelectionChange`, if any
    pub fn selection_change(&self) -> Option<NaiveDate> {
        match self {
            PickerEffect::SelectionChange(date) => Some(*date),
            PickerEffect::Batch(effects) => effects.iter().find_map(Self::selection_change),
            _ => None,
        }
    }

    /// Flatten into a list of leaf effects
    pub fn into_vec(self) -> Vec<PickerEffect> {
        match self {
            PickerEffect::None => Vec::new(),
            PickerEffect::Batch(effects) => effects.into_iter().flat_map(Self::into_vec).collect(),
            leaf => vec![leaf],
        }
    }
}

/// One scrollable strip: its viewport (once laid out) and optional drag emulator
#[derive(Debug, Clone)]
struct StripView {
    sync: SelectionSynchronizer,
    viewport: Option<HorizontalViewport>,
    drag: Option<DragScrollEmulator>,
}

impl StripView {
    fn new(strip: Strip, geometry: ItemGeometry, drag: Option<DragScrollEmulator>) -> Self {
        Self {
            sync: SelectionSynchronizer::new(strip, geometry),
            viewport: None,
            drag,
        }
    }

    fn resize(&mut self, width: f64, count: usize) {
        let content_width = self.sync.geometry().content_width(count);
        match self.viewport.as_mut() {
            Some(viewport) => {
                viewport.set_content_width(content_width);
                viewport.set_width(width);
            }
            None => self.viewport = Some(HorizontalViewport::new(0.0, width, content_width)),
        }
    }

    fn set_count(&mut self, count: usize) {
        let content_width = self.sync.geometry().content_width(count);
        if let Some(viewport) = self.viewport.as_mut() {
            viewport.set_content_width(content_width);
        }
    }

    fn intent(&self, index: Option<usize>) -> PickerEffect {
        self.viewport
            .and_then(|viewport| self.sync.intent(index, viewport.width()))
            .map_or(PickerEffect::None, PickerEffect::ScrollTo)
    }

    fn is_dragging(&self) -> bool {
        self.drag.as_ref().is_some_and(DragScrollEmulator::is_dragging)
    }
}

/// Date picker state machine
#[derive(Debug, Clone)]
pub struct DatePicker {
    selection: NaiveDate,
    bounds: Bounds,
    disabled: bool,
    days: DayWindow,
    months: MonthWindow,
    day_strip: StripView,
    month_strip: StripView,
    coordinator: ScrollCoordinator,
}

impl DatePicker {
    /// Create a picker and materialize both windows
    ///
    /// A selection outside `bounds` is clamped silently. Use [`DatePicker::mount`]
    /// to receive the clamp as a `SelectionChange`.
    pub fn new(
        selection: NaiveDate,
        bounds: Bounds,
        settings: PickerSettings,
        coordinator: ScrollCoordinator,
    ) -> Self {
        Self::mount(selection, bounds, settings, coordinator).0
    }

    /// Create a picker, returning the effect of applying the initial selection
    ///
    /// The effect carries a `SelectionChange` when `selection` was clamped into
    /// `bounds`, the same way `BoundsChanged` reports it.
    pub fn mount(
        selection: NaiveDate,
        bounds: Bounds,
        settings: PickerSettings,
        coordinator: ScrollCoordinator,
    ) -> (Self, PickerEffect) {
        let install = || {
            DragScrollEmulator::install(settings.capability, coordinator.clone(), settings.drag_gain)
        };
        let mut picker = Self {
            selection,
            bounds,
            disabled: false,
            days: DayWindow::new(settings.day_radius),
            months: MonthWindow::new(settings.month_radius),
            day_strip: StripView::new(Strip::Days, settings.day_geometry, install()),
            month_strip: StripView::new(Strip::Months, settings.month_geometry, install()),
            coordinator: coordinator.clone(),
        };
        let effect = picker.apply_selection(selection);
        (picker, effect)
    }

    /// Handle one message
    pub fn update(&mut self, msg: PickerMsg) -> PickerEffect {
        match msg {
            PickerMsg::SelectionChanged(date) => self.apply_selection(date),
            PickerMsg::BoundsChanged(bounds) => {
                debug!("Picker bounds changed to {}", bounds);
                self.bounds = bounds;
                self.apply_selection(self.selection)
            }
            PickerMsg::ViewportResized(width) => {
                self.day_strip.resize(width, self.days.len());
                self.month_strip.resize(width, self.months.len());
                self.scroll_intents()
            }
            PickerMsg::PickDay(index) => {
                if self.disabled {
                    return PickerEffect::None;
                }
                self.days
                    .get(index)
                    .map_or(PickerEffect::None, |day| PickerEffect::SelectionChange(day.date()))
            }
            PickerMsg::PickMonth(index) => {
                if self.disabled {
                    return PickerEffect::None;
                }
                self.months.get(index).map_or(PickerEffect::None, |month| {
                    PickerEffect::SelectionChange(reanchor_to_month(self.selection, month, &self.bounds))
                })
            }
            PickerMsg::Pointer(strip, event) => {
                self.handle_pointer(strip, event);
                PickerEffect::None
            }
            PickerMsg::SetDisabled(disabled) => {
                self.disabled = disabled;
                if disabled {
                    self.release_drags();
                }
                PickerEffect::None
            }
        }
    }

    /// Perform a scroll intent on its strip's viewport
    ///
    /// Ignored while that strip is being dragged, since the drag owns the offset.
    pub fn apply_scroll(&mut self, intent: &ScrollIntent) {
        let strip = self.strip_mut(intent.strip);
        if strip.is_dragging() {
            return;
        }
        if let Some(viewport) = strip.viewport.as_mut() {
            viewport.scroll_to(intent);
        }
    }

    /// Month index `steps` away from the selected month, within the window
    pub fn month_index_from_selection(&self, steps: isize) -> Option<usize> {
        let current = self.months.position(self.selection)?;
        current.checked_add_signed(steps).filter(|index| *index < self.months.len())
    }

    pub fn selection(&self) -> NaiveDate {
        self.selection
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn day_window(&self) -> &DayWindow {
        &self.days
    }

    pub fn month_window(&self) -> &MonthWindow {
        &self.months
    }

    /// Current scroll offset of a strip, once it has been laid out
    pub fn scroll_offset(&self, strip: Strip) -> Option<f64> {
        self.strip(strip).viewport.map(|viewport| viewport.offset())
    }

    pub fn geometry(&self, strip: Strip) -> ItemGeometry {
        self.strip(strip).sync.geometry()
    }

    pub fn viewport(&self, strip: Strip) -> Option<&HorizontalViewport> {
        self.strip(strip).viewport.as_ref()
    }

    /// Whether drag emulation is installed on this host
    pub fn emulates_drag(&self) -> bool {
        self.day_strip.drag.is_some()
    }

    pub fn is_scrolling_horizontally(&self) -> bool {
        self.coordinator.is_scrolling_horizontally()
    }

    pub fn coordinator(&self) -> &ScrollCoordinator {
        &self.coordinator
    }

    fn apply_selection(&mut self, requested: NaiveDate) -> PickerEffect {
        let selection = self.bounds.clamp(requested);
        self.selection = selection;

        if self.days.recompute(selection, &self.bounds) {
            self.day_strip.set_count(self.days.len());
        }
        if self.months.recompute(selection, &self.bounds) {
            self.month_strip.set_count(self.months.len());
        }

        let mut effects = Vec::new();
        if selection != requested {
            debug!("Selection {} outside {}, clamped to {}", requested, self.bounds, selection);
            effects.push(PickerEffect::SelectionChange(selection));
        }
        effects.push(self.scroll_intents());
        PickerEffect::batch(effects)
    }

    fn scroll_intents(&self) -> PickerEffect {
        PickerEffect::batch(vec![
            self.day_strip.intent(self.days.position(self.selection)),
            self.month_strip.intent(self.months.position(self.selection)),
        ])
    }

    fn handle_pointer(&mut self, strip: Strip, event: PointerEvent) {
        let disabled = self.disabled;
        let view = self.strip_mut(strip);
        // No emulator on native hosts, no viewport before first layout
        let (Some(drag), Some(viewport)) = (view.drag.as_mut(), view.viewport.as_mut()) else {
            return;
        };
        if disabled && matches!(event, PointerEvent::Down { .. }) {
            return;
        }
        drag.handle(event, viewport);
    }

    fn release_drags(&mut self) {
        for view in [&mut self.day_strip, &mut self.month_strip] {
            if let Some(drag) = view.drag.as_mut() {
                drag.release();
            }
        }
    }

    fn strip(&self, strip: Strip) -> &StripView {
        match strip {
            Strip::Days => &self.day_strip,
            Strip::Months => &self.month_strip,
        }
    }

    fn strip_mut(&mut self, strip: Strip) -> &mut StripView {
        match strip {
            Strip::Days => &mut self.day_strip,
            Strip::Months => &mut self.month_strip,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn season_picker() -> DatePicker {
        DatePicker::new(
            fixtures::create_mid_season_date(),
            fixtures::create_season_bounds(),
            PickerSettings::default(),
            ScrollCoordinator::new(),
        )
    }

    fn scroll_intents(effect: PickerEffect) -> Vec<ScrollIntent> {
        effect
            .into_vec()
            .into_iter()
            .filter_map(|effect| match effect {
                PickerEffect::ScrollTo(intent) => Some(intent),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_new_materializes_windows() {
        let picker = season_picker();

        assert_eq!(picker.day_window().len(), 61);
        assert_eq!(picker.day_window().position(picker.selection()), Some(30));
        assert_eq!(picker.month_window().len(), 9);
        assert_eq!(picker.scroll_offset(Strip::Days), None);
    }

    #[test]
    fn test_new_clamps_selection() {
        let picker = DatePicker::new(
            date(2030, 1, 1),
            fixtures::create_season_bounds(),
            PickerSettings::default(),
            ScrollCoordinator::new(),
        );
        assert_eq!(picker.selection(), date(2025, 6, 17));
        assert_eq!(picker.day_window().last().unwrap().date(), date(2025, 6, 17));
    }

    #[test]
    fn test_mount_reports_clamped_selection() {
        let (picker, effect) = DatePicker::mount(
            date(2024, 9, 1),
            fixtures::create_season_bounds(),
            PickerSettings::default(),
            ScrollCoordinator::new(),
        );

        assert_eq!(effect.selection_change(), Some(date(2024, 10, 4)));
        assert_eq!(picker.selection(), date(2024, 10, 4));
    }

    #[test]
    fn test_mount_in_bounds_reports_nothing() {
        let (_, effect) = DatePicker::mount(
            fixtures::create_mid_season_date(),
            fixtures::create_season_bounds(),
            PickerSettings::default(),
            ScrollCoordinator::new(),
        );

        assert_eq!(effect.selection_change(), None);
    }

    #[test]
    fn test_resize_emits_centering_intents() {
        let mut picker = season_picker();

        let intents = scroll_intents(picker.update(PickerMsg::ViewportResized(800.0)));

        assert_eq!(intents.len(), 2);
        assert_eq!(intents[0].strip, Strip::Days);
        assert_eq!(intents[0].offset, offset_for(30, DAY_ITEM_GEOMETRY, 800.0));
        assert_eq!(intents[1].strip, Strip::Months);
        // January 2025 is the 4th month of the season
        assert_eq!(intents[1].offset, offset_for(3, MONTH_ITEM_GEOMETRY, 800.0));
    }

    #[test]
    fn test_no_intents_before_layout() {
        let mut picker = season_picker();
        let effect = picker.update(PickerMsg::SelectionChanged(date(2025, 1, 16)));
        assert_eq!(effect, PickerEffect::None);
    }

    #[test]
    fn test_apply_scroll_moves_viewport() {
        let mut picker = season_picker();
        for intent in scroll_intents(picker.update(PickerMsg::ViewportResized(800.0))) {
            picker.apply_scroll(&intent);
        }

        let expected = offset_for(30, DAY_ITEM_GEOMETRY, 800.0);
        assert_eq!(picker.scroll_offset(Strip::Days), Some(expected));
        // 3 * 150 - 400 + 75
        assert_eq!(picker.scroll_offset(Strip::Months), Some(125.0));
    }

    #[test]
    fn test_pick_day_emits_selection_change_only() {
        let mut picker = season_picker();
        let target = picker.day_window().get(31).unwrap().date();

        let effect = picker.update(PickerMsg::PickDay(31));

        assert_eq!(effect, PickerEffect::SelectionChange(target));
        // Owner has not confirmed yet
        assert_eq!(picker.selection(), fixtures::create_mid_season_date());
    }

    #[test]
    fn test_pick_day_out_of_range_is_noop() {
        let mut picker = season_picker();
        assert_eq!(picker.update(PickerMsg::PickDay(500)), PickerEffect::None);
    }

    #[test]
    fn test_pick_month_reanchors() {
        let mut picker = DatePicker::new(
            date(2025, 1, 31),
            fixtures::create_season_bounds(),
            PickerSettings::default(),
            ScrollCoordinator::new(),
        );
        let february = picker.month_index_from_selection(1).unwrap();

        assert_eq!(
            picker.update(PickerMsg::PickMonth(february)),
            PickerEffect::SelectionChange(date(2025, 2, 28))
        );
    }

    #[test]
    fn test_pick_month_clamps_to_bounds() {
        let mut picker = season_picker();
        // October 2024 is index 0; Oct 15 is allowed
        assert_eq!(
            picker.update(PickerMsg::PickMonth(0)),
            PickerEffect::SelectionChange(date(2024, 10, 15))
        );

        let mut picker = DatePicker::new(
            date(2025, 1, 2),
            fixtures::create_season_bounds(),
            PickerSettings::default(),
            ScrollCoordinator::new(),
        );
        assert_eq!(
            picker.update(PickerMsg::PickMonth(0)),
            PickerEffect::SelectionChange(date(2024, 10, 4))
        );
    }

    #[test]
    fn test_disabled_picker_ignores_picks() {
        let mut picker = season_picker();
        picker.update(PickerMsg::SetDisabled(true));

        assert_eq!(picker.update(PickerMsg::PickDay(0)), PickerEffect::None);
        assert_eq!(picker.update(PickerMsg::PickMonth(0)), PickerEffect::None);
    }

    #[test]
    fn test_bounds_change_clamps_and_reports() {
        let mut picker = season_picker();
        picker.update(PickerMsg::ViewportResized(800.0));

        let narrowed = Bounds::spanning(date(2025, 3, 1), date(2025, 3, 31));
        let effects = picker.update(PickerMsg::BoundsChanged(narrowed)).into_vec();

        assert_eq!(effects[0], PickerEffect::SelectionChange(date(2025, 3, 1)));
        assert_eq!(picker.selection(), date(2025, 3, 1));
        assert_eq!(picker.day_window().len(), 31);
        assert_eq!(picker.month_window().len(), 1);
        assert_eq!(scroll_intents(PickerEffect::batch(effects)).len(), 2);
    }

    #[test]
    fn test_selection_inside_window_keeps_it() {
        let mut picker = season_picker();
        let before = picker.day_window().clone();

        picker.update(PickerMsg::SelectionChanged(date(2025, 1, 20)));

        assert_eq!(picker.day_window(), &before);
        assert_eq!(picker.day_window().position(date(2025, 1, 20)), Some(35));
    }

    #[test]
    fn test_drag_overrides_intents_until_release() {
        let coordinator = ScrollCoordinator::new();
        let mut picker = DatePicker::new(
            fixtures::create_mid_season_date(),
            fixtures::create_season_bounds(),
            PickerSettings::default(),
            coordinator.clone(),
        );
        picker.update(PickerMsg::ViewportResized(800.0));

        picker.update(PickerMsg::Pointer(Strip::Days, PointerEvent::Down { x: 100.0 }));
        picker.update(PickerMsg::Pointer(Strip::Days, PointerEvent::Move { x: 80.0 }));
        assert!(coordinator.is_scrolling_horizontally());
        assert_eq!(picker.scroll_offset(Strip::Days), Some(40.0));

        let intent = ScrollIntent {
            strip: Strip::Days,
            offset: 1000.0,
        };
        picker.apply_scroll(&intent);
        assert_eq!(picker.scroll_offset(Strip::Days), Some(40.0));

        picker.update(PickerMsg::Pointer(Strip::Days, PointerEvent::Up));
        assert!(!picker.is_scrolling_horizontally());
        picker.apply_scroll(&intent);
        assert_eq!(picker.scroll_offset(Strip::Days), Some(1000.0));
    }

    #[test]
    fn test_pointer_before_layout_is_noop() {
        let mut picker = season_picker();
        picker.update(PickerMsg::Pointer(Strip::Months, PointerEvent::Down { x: 10.0 }));
        assert!(!picker.is_scrolling_horizontally());
    }

    #[test]
    fn test_native_capability_has_no_emulator() {
        let settings = PickerSettings {
            capability: DragCapability::NativeDragScroll,
            ..PickerSettings::default()
        };
        let mut picker = DatePicker::new(
            fixtures::create_mid_season_date(),
            fixtures::create_season_bounds(),
            settings,
            ScrollCoordinator::new(),
        );
        picker.update(PickerMsg::ViewportResized(800.0));

        assert!(!picker.emulates_drag());
        picker.update(PickerMsg::Pointer(Strip::Days, PointerEvent::Down { x: 100.0 }));
        assert!(!picker.is_scrolling_horizontally());
        assert_eq!(picker.scroll_offset(Strip::Days), Some(0.0));
    }

    #[test]
    fn test_disabling_releases_drag() {
        let mut picker = season_picker();
        picker.update(PickerMsg::ViewportResized(800.0));
        picker.update(PickerMsg::Pointer(Strip::Months, PointerEvent::Down { x: 10.0 }));
        assert!(picker.is_scrolling_horizontally());

        picker.update(PickerMsg::SetDisabled(true));
        assert!(!picker.is_scrolling_horizontally());
    }

    #[test]
    fn test_effect_batch_collapses() {
        assert_eq!(PickerEffect::batch(vec![]), PickerEffect::None);
        assert_eq!(
            PickerEffect::batch(vec![PickerEffect::None, PickerEffect::SelectionChange(date(2025, 1, 1))]),
            PickerEffect::SelectionChange(date(2025, 1, 1))
        );
    }
}
