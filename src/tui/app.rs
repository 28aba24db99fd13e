use chrono::NaiveDate;
use tracing::debug;

use crate::config::ThemeConfig;
use crate::picker::{
    DatePicker, PickerEffect, PickerMsg, PickerSettings, PointerEvent, ScrollCoordinator, Strip,
};
use crate::range::{BoundsSource, ResolvedBounds};
use crate::types::Bounds;

use super::action::{Action, Request};
use super::layout::StripLayout;

/// A left-button press that has not been released yet
#[derive(Debug, Clone, Copy, PartialEq)]
struct Press {
    strip: Strip,
    x: f64,
    moved: bool,
}

/// Interactive picker state
///
/// Owns the authoritative selection: the picker only proposes changes
/// through `PickerEffect::SelectionChange`, which the app feeds back in.
pub struct App {
    picker: DatePicker,
    today: NaiveDate,
    theme: ThemeConfig,
    source: Option<BoundsSource>,
    layout: Option<StripLayout>,
    press: Option<Press>,
    should_quit: bool,
}

impl App {
    /// Start on `today` with open bounds, disabled until bounds are resolved
    pub fn new(today: NaiveDate, settings: PickerSettings, theme: ThemeConfig) -> Self {
        let mut picker = DatePicker::new(today, Bounds::unbounded(), settings, ScrollCoordinator::new());
        picker.update(PickerMsg::SetDisabled(true));
        Self {
            picker,
            today,
            theme,
            source: None,
            layout: None,
            press: None,
            should_quit: false,
        }
    }

    pub fn dispatch(&mut self, action: Action) -> Option<Request> {
        debug!("ACTION: {:?}", action);
        match action {
            Action::Quit => {
                self.should_quit = true;
                None
            }
            Action::RefreshBounds => {
                if self.is_loading() {
                    return None;
                }
                self.picker.update(PickerMsg::SetDisabled(true));
                Some(Request::ResolveBounds { refresh: true })
            }
            Action::BoundsResolved(resolved) => {
                self.source = Some(resolved.source);
                let effect = self.picker.update(PickerMsg::BoundsChanged(resolved.bounds));
                self.apply(effect);
                self.picker.update(PickerMsg::SetDisabled(false));
                None
            }
            Action::Layout(layout) => {
                self.layout = Some(layout);
                let effect = self.picker.update(PickerMsg::ViewportResized(layout.strip_width()));
                self.apply(effect);
                None
            }
            Action::MoveDays(steps) => {
                let index = self
                    .picker
                    .day_window()
                    .position(self.picker.selection())
                    .and_then(|current| current.checked_add_signed(steps));
                if let Some(index) = index {
                    self.send(PickerMsg::PickDay(index));
                }
                None
            }
            Action::MoveMonths(steps) => {
                if let Some(index) = self.picker.month_index_from_selection(steps) {
                    self.send(PickerMsg::PickMonth(index));
                }
                None
            }
            Action::JumpToToday => {
                if !self.picker.is_disabled() {
                    self.select(self.today);
                }
                None
            }
            Action::Pointer(strip, event) => {
                self.pointer(strip, event);
                None
            }
        }
    }

    /// Bounds the first resolution should request
    pub fn initial_request(&self) -> Request {
        Request::ResolveBounds { refresh: false }
    }

    pub fn picker(&self) -> &DatePicker {
        &self.picker
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn theme(&self) -> &ThemeConfig {
        &self.theme
    }

    pub fn source(&self) -> Option<BoundsSource> {
        self.source
    }

    pub fn layout(&self) -> Option<StripLayout> {
        self.layout
    }

    /// Strip holding the current left-button press
    pub fn pressed_strip(&self) -> Option<Strip> {
        self.press.map(|press| press.strip)
    }

    /// Bounds are being (re-)resolved
    pub fn is_loading(&self) -> bool {
        self.picker.is_disabled()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    fn send(&mut self, msg: PickerMsg) {
        let effect = self.picker.update(msg);
        self.apply(effect);
    }

    fn apply(&mut self, effect: PickerEffect) {
        for effect in effect.into_vec() {
            match effect {
                PickerEffect::SelectionChange(date) => self.select(date),
                PickerEffect::ScrollTo(intent) => self.picker.apply_scroll(&intent),
                PickerEffect::None | PickerEffect::Batch(_) => {}
            }
        }
    }

    fn select(&mut self, date: NaiveDate) {
        debug!("Selection -> {}", date);
        self.send(PickerMsg::SelectionChanged(date));
    }

    /// Track presses so that a release without movement counts as a click
    fn pointer(&mut self, strip: Strip, event: PointerEvent) {
        let mut click = None;
        match event {
            PointerEvent::Down { x } => {
                self.press = Some(Press {
                    strip,
                    x,
                    moved: false,
                })
            }
            PointerEvent::Move { x } => {
                if let Some(press) = self.press.as_mut() {
                    press.moved |= press.x != x;
                }
            }
            PointerEvent::Up => {
                click = self.press.take().filter(|press| !press.moved);
            }
            PointerEvent::Leave => self.press = None,
        }

        self.send(PickerMsg::Pointer(strip, event));

        if let Some(press) = click {
            self.click(press.strip, press.x);
        }
    }

    fn click(&mut self, strip: Strip, x: f64) {
        let Some(viewport) = self.picker.viewport(strip) else {
            return;
        };
        let Some(index) = self.picker.geometry(strip).index_at(viewport.offset() + x) else {
            return;
        };
        let msg = match strip {
            Strip::Days => PickerMsg::PickDay(index),
            Strip::Months => PickerMsg::PickMonth(index),
        };
        self.send(msg);
    }
}
