//! Geometry and gesture math for the radial rating dial.
//!
//! Angles are in degrees, measured in screen space: 0° points along +x and
//! angles grow clockwise because the y axis points down. The default track
//! starts at 135° (lower left) and sweeps 270° to 45° (lower right), leaving
//! an open gap at the bottom.
//!
//! Everything here is pure. The [`DialInput`](crate::components::DialInput)
//! component owns no value of its own; it feeds pointer offsets and key names
//! through these helpers and emits whatever they return.

use std::fmt::Write as _;

pub const DEFAULT_DIAMETER: f64 = 64.0;

/// Container widths below this get the compact dial.
pub const COMPACT_BREAKPOINT_PX: f64 = 400.0;
pub const COMPACT_DIAMETER: f64 = 44.0;
pub const GRID_DIAMETER: f64 = 56.0;

/// A dial needs a visible gap between its ends, otherwise min and max share an angle.
const MAX_SWEEP_DEG: f64 = 350.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DialConfig {
    pub min: i32,
    pub max: i32,
    pub step: i32,
    /// Angular span of the track.
    pub sweep_deg: f64,
    /// Angle of the track's `min` end.
    pub start_deg: f64,
}

impl Default for DialConfig {
    fn default() -> Self {
        Self {
            min: 1,
            max: 10,
            step: 1,
            sweep_deg: 270.0,
            start_deg: 135.0,
        }
    }
}

/// Which way a key press moves the dial.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyStep {
    Decrease,
    Increase,
    ToMin,
    ToMax,
}

impl KeyStep {
    /// Map a DOM key name (`KeyboardEvent.key`) to a step.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" | "ArrowDown" => Some(Self::Decrease),
            "ArrowRight" | "ArrowUp" => Some(Self::Increase),
            "Home" => Some(Self::ToMin),
            "End" => Some(Self::ToMax),
            _ => None,
        }
    }
}

impl DialConfig {
    pub fn new(min: i32, max: i32, step: i32) -> Self {
        Self {
            min,
            max,
            step,
            ..Self::default()
        }
        .normalized()
    }

    /// Repair nonsensical settings: `step >= 1`, `max >= min`, a finite sweep
    /// in `(0, 350]` and a start angle in `[0, 360)`.
    pub fn normalized(self) -> Self {
        let defaults = Self::default();
        let sweep_deg = if self.sweep_deg.is_finite() && self.sweep_deg > 0.0 {
            self.sweep_deg.min(MAX_SWEEP_DEG)
        } else {
            defaults.sweep_deg
        };
        let start_deg = if self.start_deg.is_finite() {
            self.start_deg.rem_euclid(360.0)
        } else {
            defaults.start_deg
        };

        Self {
            min: self.min,
            max: self.max.max(self.min),
            step: self.step.max(1),
            sweep_deg,
            start_deg,
        }
    }

    /// Largest value reachable from `min` in whole steps without passing `max`.
    pub fn max_aligned(&self) -> i32 {
        let span = (i64::from(self.max) - i64::from(self.min)).max(0);
        let step = i64::from(self.step.max(1));
        i32::try_from(i64::from(self.min) + span / step * step).unwrap_or(self.max)
    }

    /// `max - min` without overflowing on wide ranges.
    fn span(&self) -> f64 {
        f64::from(self.max) - f64::from(self.min)
    }

    /// Snap a raw value to the nearest `min + k * step` inside the range.
    pub fn snap(&self, raw: f64) -> Option<i32> {
        if !raw.is_finite() {
            return None;
        }
        let min = f64::from(self.min);
        let step = f64::from(self.step.max(1));
        let snapped = min + ((raw - min) / step).round() * step;
        Some(snapped.clamp(min, f64::from(self.max_aligned())) as i32)
    }

    /// The value used for rendering: unset reads as `min`, out-of-range values are clamped.
    pub fn display_value(&self, value: Option<i32>) -> i32 {
        value.unwrap_or(self.min).clamp(self.min, self.max)
    }

    pub fn value_to_angle(&self, value: i32) -> f64 {
        let span = self.span();
        if span <= 0.0 {
            return self.start_deg;
        }
        let percent = (f64::from(value.clamp(self.min, self.max)) - f64::from(self.min)) / span;
        self.start_deg + percent * self.sweep_deg
    }

    /// Inverse of [`value_to_angle`](Self::value_to_angle). Angles in the gap
    /// between the track's ends snap to the nearer end.
    pub fn angle_to_value(&self, angle_deg: f64) -> Option<i32> {
        self.angle_to_value_near(angle_deg, None)
    }

    /// Like [`angle_to_value`](Self::angle_to_value), but a pointer in the gap
    /// stays on the end the dial already sits on, so dragging past either end
    /// clamps instead of jumping across the gap.
    pub fn angle_to_value_near(&self, angle_deg: f64, current: Option<i32>) -> Option<i32> {
        if !angle_deg.is_finite() {
            return None;
        }

        let mut from_start = (angle_deg - self.start_deg + 360.0).rem_euclid(360.0);
        if from_start > self.sweep_deg {
            from_start = match current {
                Some(value) if value <= self.min => 0.0,
                Some(value) if value >= self.max_aligned() => self.sweep_deg,
                _ => {
                    let gap = 360.0 - self.sweep_deg;
                    if from_start - self.sweep_deg <= gap / 2.0 {
                        self.sweep_deg
                    } else {
                        0.0
                    }
                }
            };
        }

        let percent = from_start / self.sweep_deg;
        let raw = f64::from(self.min) + percent * self.span();
        self.snap(raw)
    }

    /// Value under a pointer at `(dx, dy)` from the dial center, or `None`
    /// when no angle can be derived (pointer on the center, non-finite input).
    pub fn pointer_to_value(&self, dx: f64, dy: f64, current: Option<i32>) -> Option<i32> {
        pointer_angle(dx, dy).and_then(|angle| self.angle_to_value_near(angle, current))
    }

    /// Value to emit when the pointer goes down; `None` when nothing changed.
    /// A press in the gap lands on the nearer end.
    pub fn resolve_pointer(&self, current: Option<i32>, dx: f64, dy: f64) -> Option<i32> {
        let next = self.pointer_to_value(dx, dy, None)?;
        (Some(next) != current).then_some(next)
    }

    /// Value to emit while dragging. Moving into the gap keeps the end the
    /// dial already sits on instead of jumping to the opposite end.
    pub fn resolve_drag(&self, current: Option<i32>, dx: f64, dy: f64) -> Option<i32> {
        let next = self.pointer_to_value(dx, dy, current)?;
        (Some(next) != current).then_some(next)
    }

    pub fn step_value(&self, current: Option<i32>, step: KeyStep) -> i32 {
        let current = i64::from(self.display_value(current));
        let step_size = i64::from(self.step.max(1));
        let target = match step {
            KeyStep::Decrease => current - step_size,
            KeyStep::Increase => current + step_size,
            KeyStep::ToMin => i64::from(self.min),
            KeyStep::ToMax => i64::from(self.max_aligned()),
        };
        self.snap(target as f64).unwrap_or(self.min)
    }

    /// Value to emit for a key press; `None` for unrelated keys or no change.
    pub fn resolve_key(&self, current: Option<i32>, key: &str) -> Option<i32> {
        let step = KeyStep::from_key(key)?;
        let next = self.step_value(current, step);
        (Some(next) != current).then_some(next)
    }
}

/// Pointer angle in `[0, 360)` for an offset from the dial center.
pub fn pointer_angle(dx: f64, dy: f64) -> Option<f64> {
    if !dx.is_finite() || !dy.is_finite() {
        return None;
    }
    if dx.abs() < f64::EPSILON && dy.abs() < f64::EPSILON {
        return None;
    }
    Some(dy.atan2(dx).to_degrees().rem_euclid(360.0))
}

/// Dial size for a container of the given observed width.
pub fn dial_diameter_for_width(width: f64) -> f64 {
    if width.is_finite() && width > 0.0 && width < COMPACT_BREAKPOINT_PX {
        COMPACT_DIAMETER
    } else {
        GRID_DIAMETER
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Knob {
    pub cx: f64,
    pub cy: f64,
    pub r: f64,
}

/// Drawing measurements for one dial.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DialGeometry {
    pub config: DialConfig,
    pub diameter: f64,
    pub stroke: f64,
    pub radius: f64,
    pub center: f64,
}

impl DialGeometry {
    pub fn new(config: DialConfig, diameter: f64) -> Self {
        let diameter = if diameter.is_finite() && diameter > 0.0 {
            diameter
        } else {
            DEFAULT_DIAMETER
        };
        let stroke = diameter / 8.0;
        Self {
            config: config.normalized(),
            diameter,
            stroke,
            radius: (diameter - stroke) / 2.0,
            center: diameter / 2.0,
        }
    }

    pub fn point_at(&self, angle_deg: f64) -> (f64, f64) {
        let rad = angle_deg.to_radians();
        (
            self.center + self.radius * rad.cos(),
            self.center + self.radius * rad.sin(),
        )
    }

    /// Offset of an element-relative pointer position from the dial center.
    pub fn offset_from_center(&self, x: f64, y: f64) -> (f64, f64) {
        (x - self.center, y - self.center)
    }

    pub fn track_path(&self) -> String {
        let start = self.config.start_deg;
        self.arc_path(start, start + self.config.sweep_deg)
    }

    /// Filled arc from the track start to `value`; `None` at `min`, where the arc would be empty.
    pub fn value_arc_path(&self, value: i32) -> Option<String> {
        if value <= self.config.min {
            return None;
        }
        let angle = self.config.value_to_angle(value);
        Some(self.arc_path(self.config.start_deg, angle))
    }

    pub fn knob(&self, value: i32) -> Knob {
        let (cx, cy) = self.point_at(self.config.value_to_angle(value));
        Knob {
            cx,
            cy,
            r: self.stroke / 1.5,
        }
    }

    pub fn label_y(&self) -> f64 {
        self.center + self.diameter / 18.0
    }

    pub fn label_font_size(&self) -> f64 {
        self.diameter / 3.2
    }

    fn arc_path(&self, from_deg: f64, to_deg: f64) -> String {
        let (sx, sy) = self.point_at(from_deg);
        let (ex, ey) = self.point_at(to_deg);
        let large_arc = u8::from(to_deg - from_deg > 180.0);
        let mut path = String::new();
        let _ = write!(
            path,
            "M {sx:.3} {sy:.3} A {r:.3} {r:.3} 0 {large_arc} 1 {ex:.3} {ey:.3}",
            r = self.radius
        );
        path
    }
}

/// Pointer capture bookkeeping for one dial.
///
/// Only the pointer that pressed the dial drives it. The capture ends on
/// pointer-up, cancel, lost capture or blur, and on any move that arrives
/// with no button held (the release happened somewhere the dial never saw).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DialGesture {
    captured: Option<i32>,
}

impl DialGesture {
    pub fn press(&mut self, pointer_id: i32) {
        self.captured = Some(pointer_id);
    }

    pub fn tracks(&self, pointer_id: i32) -> bool {
        self.captured == Some(pointer_id)
    }

    pub fn is_active(&self) -> bool {
        self.captured.is_some()
    }

    /// Release if `pointer_id` holds the capture. Returns whether anything was released.
    pub fn release(&mut self, pointer_id: i32) -> bool {
        if self.tracks(pointer_id) {
            self.captured = None;
            true
        } else {
            false
        }
    }

    pub fn cancel(&mut self) -> bool {
        self.captured.take().is_some()
    }

    /// Whether a move of `pointer_id` should drive the dial.
    pub fn follow(&mut self, pointer_id: i32, buttons_held: bool) -> bool {
        if !self.tracks(pointer_id) {
            return false;
        }
        if !buttons_held {
            self.captured = None;
            return false;
        }
        true
    }
}
