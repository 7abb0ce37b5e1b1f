use serde::{Deserialize, Serialize};

/// Damping and drag sensitivity for one scroll axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollConfig {
    /// Fraction of the remaining distance to the target covered each frame.
    /// Must lie in `(0, 1]`; `1` disables smoothing.
    pub ease: f32,
    /// Scroll pixels per pointer pixel while dragging.
    pub drag_multiplier: f32,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            ease: 0.1,
            drag_multiplier: 3.0,
        }
    }
}

/// Sign of the scroll motion between two frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Direction {
    Increasing,
    Decreasing,
    #[default]
    Unchanged,
}

impl Direction {
    /// Compare this frame's value against the last one.
    pub fn between(last: f32, current: f32) -> Self {
        if current > last {
            Self::Increasing
        } else if current < last {
            Self::Decreasing
        } else {
            Self::Unchanged
        }
    }

    /// Heading after observing `step`: an unchanged step keeps the previous heading.
    pub fn carry(self, step: Direction) -> Self {
        match step {
            Self::Unchanged => self,
            moved => moved,
        }
    }
}

/// Pointer state of an axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragPhase {
    #[default]
    Idle,
    Dragging,
}

/// One damped scroll dimension.
///
/// Input only ever moves `target`; `current` follows it once per frame in
/// [`ScrollAxis::update`], so the visible value never jumps.
#[derive(Debug, Clone, Default)]
pub struct ScrollAxis {
    config: ScrollConfig,
    current: f32,
    target: f32,
    /// `current` captured at drag start.
    position: f32,
    /// Pointer coordinate captured at drag start.
    start_input: f32,
    last: f32,
    heading: Direction,
    phase: DragPhase,
}

impl ScrollAxis {
    pub fn new(config: ScrollConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    pub fn config(&self) -> ScrollConfig {
        self.config
    }

    /// Smoothed scroll offset in pixels.
    pub fn current(&self) -> f32 {
        self.current
    }

    /// Raw accumulated scroll offset in pixels.
    pub fn target(&self) -> f32 {
        self.target
    }

    /// Last non-zero motion direction. `Unchanged` only before the first motion.
    pub fn direction(&self) -> Direction {
        self.heading
    }

    pub fn phase(&self) -> DragPhase {
        self.phase
    }

    pub fn is_dragging(&self) -> bool {
        self.phase == DragPhase::Dragging
    }

    /// Pointer went down at `coord`.
    pub fn press(&mut self, coord: f32) {
        self.phase = DragPhase::Dragging;
        self.position = self.current;
        self.start_input = coord;
    }

    /// Pointer moved to `coord`. Ignored unless dragging.
    pub fn drag(&mut self, coord: f32) {
        if self.phase != DragPhase::Dragging {
            return;
        }
        self.target = self.position + (self.start_input - coord) * self.config.drag_multiplier;
    }

    /// Pointer released. `target` is kept so easing carries the motion on.
    pub fn release(&mut self) {
        self.phase = DragPhase::Idle;
    }

    /// Wheel delta in pixels, applied in any phase.
    pub fn wheel(&mut self, delta: f32) {
        self.target += delta;
    }

    /// Advance one frame. Returns the raw step direction of this frame.
    pub fn update(&mut self) -> Direction {
        self.current = lerp(self.current, self.target, self.config.ease);
        let step = Direction::between(self.last, self.current);
        self.heading = self.heading.carry(step);
        self.last = self.current;
        step
    }
}

fn lerp(from: f32, to: f32, t: f32) -> f32 {
    from + (to - from) * t
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let config = ScrollConfig::default();
        assert_eq!(config.ease, 0.1);
        assert_eq!(config.drag_multiplier, 3.0);
    }

    #[test]
    fn damping_converges_without_overshoot() {
        for &target in &[-500.0_f32, 0.5, 120.0, 10_000.0] {
            for &ease in &[0.05_f32, 0.1, 0.5, 1.0] {
                let mut axis = ScrollAxis::new(ScrollConfig {
                    ease,
                    ..ScrollConfig::default()
                });
                axis.wheel(target);
                let mut prev_gap = target.abs();
                for _ in 0..400 {
                    axis.update();
                    let gap = (target - axis.current()).abs();
                    assert!(gap <= prev_gap + 1e-3, "gap grew: {prev_gap} -> {gap}");
                    if target > 0.0 {
                        assert!(axis.current() <= target + 1e-3);
                    } else {
                        assert!(axis.current() >= target - 1e-3);
                    }
                    prev_gap = gap;
                }
                assert!(prev_gap < 1e-2 * target.abs().max(1.0), "ease={ease} gap={prev_gap}");
            }
        }
    }

    #[test]
    fn ease_of_one_snaps() {
        let mut axis = ScrollAxis::new(ScrollConfig {
            ease: 1.0,
            ..ScrollConfig::default()
        });
        axis.wheel(42.0);
        axis.update();
        assert_eq!(axis.current(), 42.0);
    }

    #[test]
    fn drag_round_trip_sets_exact_target() {
        let mut axis = ScrollAxis::new(ScrollConfig::default());
        axis.wheel(100.0);
        for _ in 0..5 {
            axis.update();
        }
        let at_down = axis.current();

        axis.press(400.0);
        assert!(axis.is_dragging());
        axis.drag(390.0);
        axis.drag(350.0);
        axis.release();

        assert_eq!(axis.target(), at_down + (400.0 - 350.0) * 3.0);
        assert_eq!(axis.phase(), DragPhase::Idle);
    }

    #[test]
    fn press_does_not_move_current() {
        let mut axis = ScrollAxis::new(ScrollConfig::default());
        axis.wheel(80.0);
        axis.update();
        let before = axis.current();
        axis.press(10.0);
        assert_eq!(axis.current(), before);
    }

    #[test]
    fn move_without_press_is_ignored() {
        let mut axis = ScrollAxis::new(ScrollConfig::default());
        axis.drag(300.0);
        assert_eq!(axis.target(), 0.0);
    }

    #[test]
    fn wheel_applies_while_dragging() {
        let mut axis = ScrollAxis::new(ScrollConfig::default());
        axis.press(0.0);
        axis.drag(-10.0);
        axis.wheel(5.0);
        assert_eq!(axis.target(), 35.0);
    }

    #[test]
    fn release_keeps_momentum_target() {
        let mut axis = ScrollAxis::new(ScrollConfig::default());
        axis.press(100.0);
        axis.drag(0.0);
        axis.release();
        let target = axis.target();
        axis.update();
        axis.update();
        assert_eq!(axis.target(), target);
        assert!(axis.current() > 0.0);
    }

    #[test]
    fn direction_carries_through_rest() {
        let mut axis = ScrollAxis::new(ScrollConfig {
            ease: 1.0,
            ..ScrollConfig::default()
        });
        assert_eq!(axis.direction(), Direction::Unchanged);

        axis.wheel(10.0);
        assert_eq!(axis.update(), Direction::Increasing);
        assert_eq!(axis.direction(), Direction::Increasing);

        // Equal frame keeps the heading.
        assert_eq!(axis.update(), Direction::Unchanged);
        assert_eq!(axis.direction(), Direction::Increasing);

        axis.wheel(-3.0);
        assert_eq!(axis.update(), Direction::Decreasing);
        assert_eq!(axis.direction(), Direction::Decreasing);
    }

    #[test]
    fn direction_between_is_strict() {
        assert_eq!(Direction::between(1.0, 1.0), Direction::Unchanged);
        assert_eq!(Direction::between(1.0, 1.5), Direction::Increasing);
        assert_eq!(Direction::between(1.0, 0.5), Direction::Decreasing);
        assert_eq!(
            Direction::Decreasing.carry(Direction::Unchanged),
            Direction::Decreasing
        );
    }
}
