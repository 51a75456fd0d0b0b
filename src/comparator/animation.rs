use super::{active_subset, scale_target, ChartConfig, PriceRecord};
use log::debug;
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Moves `current` a fraction `speed` of the way toward `target`.
///
/// `speed` is clamped to `[0, 1]`, so the result never passes the target.
pub fn ease(current: f64, target: f64, speed: f64) -> f64 {
    current + (target - current) * speed.clamp(0.0, 1.0)
}

/// Vertical geometry of the bar chart, in points.
#[derive(Debug, Clone, Copy, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct ChartLayout {
    pub margin_top: f64,
    pub margin_left: f64,
    pub margin_right: f64,
    pub bar_height: f64,
    pub spacing: f64,
    /// Height of the drawable area; refreshed from the canvas every frame.
    pub visible_height: f64,
    /// Distance below the visible area where inactive bars rest.
    pub parking_offset: f64,
}

impl Default for ChartLayout {
    fn default() -> Self {
        Self {
            margin_top: 40.0,
            margin_left: 170.0,
            margin_right: 150.0,
            bar_height: 28.0,
            spacing: 12.0,
            visible_height: 600.0,
            parking_offset: 200.0,
        }
    }
}

impl ChartLayout {
    pub fn slot_y(&self, rank: usize) -> f64 {
        self.margin_top + rank as f64 * (self.bar_height + self.spacing)
    }

    /// Just below the visible area: where entering bars start from.
    pub fn entry_y(&self) -> f64 {
        self.visible_height
    }

    pub fn parked_y(&self) -> f64 {
        self.visible_height + self.parking_offset
    }
}

#[derive(Debug, Clone, Copy, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Per-bar easing factor (bounds and position).
    pub item_speed: f64,
    /// Axis easing factor; slower than the bars so rescaling stays smooth.
    pub scale_speed: f64,
    pub tick_interval_ms: u64,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            item_speed: 0.15,
            scale_speed: 0.05,
            tick_interval_ms: 16,
        }
    }
}

impl AnimationConfig {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms.max(1))
    }
}

/// Displayed values of one bar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationState {
    pub current_min: f64,
    pub current_max: f64,
    pub current_y: f64,
    pub target_y: f64,
    was_active: bool,
}

impl AnimationState {
    fn parked(y: f64) -> Self {
        Self {
            current_min: 0.0,
            current_max: 0.0,
            current_y: y,
            target_y: y,
            was_active: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleState {
    pub current_max: f64,
    pub target_max: f64,
}

/// Records, their selection and the per-bar animation table.
///
/// Every record owns exactly one [`AnimationState`] for the lifetime of the
/// chart; deselected bars are eased off-screen instead of being removed.
#[derive(Debug, Clone)]
pub struct ChartState {
    records: Vec<PriceRecord>,
    checked: Vec<bool>,
    active: Vec<usize>,
    ranks: Vec<Option<usize>>,
    states: Vec<AnimationState>,
    by_name: HashMap<String, usize>,
    scale: ScaleState,
    config: ChartConfig,
}

impl ChartState {
    /// Builds the chart with every record unchecked and parked.
    pub fn new(records: Vec<PriceRecord>, config: ChartConfig) -> Self {
        let parked = AnimationState::parked(config.layout.parked_y());
        let by_name = records
            .iter()
            .enumerate()
            .map(|(i, r)| (r.name.clone(), i))
            .collect();
        let floor = config.scale.floor;

        Self {
            checked: vec![false; records.len()],
            active: Vec::new(),
            ranks: vec![None; records.len()],
            states: vec![parked; records.len()],
            by_name,
            scale: ScaleState {
                current_max: floor,
                target_max: floor,
            },
            records,
            config,
        }
    }

    pub fn records(&self) -> &[PriceRecord] {
        &self.records
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    pub fn is_checked(&self, idx: usize) -> bool {
        self.checked.get(idx).copied().unwrap_or(false)
    }

    pub fn checked(&self) -> &[bool] {
        &self.checked
    }

    /// Active record indices in display order.
    pub fn active(&self) -> &[usize] {
        &self.active
    }

    pub fn rank(&self, idx: usize) -> Option<usize> {
        self.ranks.get(idx).copied().flatten()
    }

    pub fn state(&self, idx: usize) -> Option<&AnimationState> {
        self.states.get(idx)
    }

    pub fn state_by_name(&self, name: &str) -> Option<&AnimationState> {
        self.by_name.get(name).and_then(|&i| self.states.get(i))
    }

    pub fn scale(&self) -> ScaleState {
        self.scale
    }

    pub fn set_checked(&mut self, idx: usize, checked: bool) {
        if let Some(flag) = self.checked.get_mut(idx) {
            if *flag != checked {
                *flag = checked;
                self.refresh_selection();
            }
        }
    }

    /// Replaces the whole selection; `checked` is indexed like the records.
    pub fn set_selection(&mut self, checked: &[bool]) {
        for (i, flag) in self.checked.iter_mut().enumerate() {
            *flag = checked.get(i).copied().unwrap_or(false);
        }
        self.refresh_selection();
    }

    pub fn set_all(&mut self, checked: bool) {
        self.checked.iter_mut().for_each(|flag| *flag = checked);
        self.refresh_selection();
    }

    pub fn set_speeds(&mut self, item_speed: f64, scale_speed: f64) {
        self.config.animation.item_speed = item_speed;
        self.config.animation.scale_speed = scale_speed;
    }

    /// Resizes the drawable area.
    ///
    /// Inactive bars that are off-screen move with the bottom edge, so a
    /// taller window never uncovers parked bars.
    pub fn set_visible_height(&mut self, height: f64) {
        let height = height.max(0.0);
        let old_entry = self.config.layout.entry_y();
        let delta = height - self.config.layout.visible_height;
        self.config.layout.visible_height = height;
        if delta == 0.0 {
            return;
        }

        for (state, rank) in self.states.iter_mut().zip(&self.ranks) {
            if rank.is_none() && state.current_y >= old_entry {
                state.current_y += delta;
                state.target_y += delta;
            }
        }
    }

    /// Recomputes the active order and the axis target.
    fn refresh_selection(&mut self) {
        self.active = active_subset(&self.records, &self.checked);
        self.ranks.iter_mut().for_each(|r| *r = None);
        for (rank, &idx) in self.active.iter().enumerate() {
            self.ranks[idx] = Some(rank);
        }
        self.scale.target_max = scale_target(&self.records, &self.active, &self.config.scale);
        debug!(
            "Selection changed: {} active, scale target {:.3}",
            self.active.len(),
            self.scale.target_max
        );
    }

    /// Advances every bar and the axis by one easing step.
    pub fn tick(&mut self) {
        let layout = self.config.layout;
        let speed = self.config.animation.item_speed;

        for (idx, state) in self.states.iter_mut().enumerate() {
            let record = &self.records[idx];
            let (target_min, target_max, target_y) = match self.ranks[idx] {
                Some(rank) => (record.min, record.max, layout.slot_y(rank)),
                None => (0.0, 0.0, layout.parked_y()),
            };
            let active = self.ranks[idx].is_some();

            if active && !state.was_active && state.current_y > layout.entry_y() {
                state.current_y = layout.entry_y();
            }
            state.was_active = active;
            state.target_y = target_y;

            state.current_min = ease(state.current_min, target_min, speed);
            state.current_max = ease(state.current_max, target_max, speed);
            state.current_y = ease(state.current_y, target_y, speed);
        }

        self.scale.current_max = ease(
            self.scale.current_max,
            self.scale.target_max,
            self.config.animation.scale_speed,
        );
    }
}

/// Fixed-cadence scheduler driven from the UI's repaint callback.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Instant,
    interval: Duration,
    max_catch_up: u32,
}

impl FrameClock {
    pub fn new(interval: Duration) -> Self {
        Self::starting_at(Instant::now(), interval)
    }

    pub fn starting_at(start: Instant, interval: Duration) -> Self {
        Self {
            last: start,
            interval: interval.max(Duration::from_millis(1)),
            max_catch_up: 4,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn set_interval(&mut self, interval: Duration) {
        self.interval = interval.max(Duration::from_millis(1));
    }

    /// Number of ticks that elapsed since the previous call.
    ///
    /// A long stall is not replayed: at most `max_catch_up` ticks are returned
    /// and the clock restarts from `now`.
    pub fn due_ticks(&mut self, now: Instant) -> u32 {
        let elapsed = now.saturating_duration_since(self.last);
        let due = (elapsed.as_nanos() / self.interval.as_nanos()) as u64;
        if due > self.max_catch_up as u64 {
            self.last = now;
            return self.max_catch_up;
        }
        let due = due as u32;
        self.last += self.interval * due;
        due
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chart() -> ChartState {
        let records = vec![
            PriceRecord::new("acqua", 0.20, 1.50),
            PriceRecord::new("latte", 0.90, 2.20),
            PriceRecord::new("benzina", 1.586, 2.158),
        ];
        ChartState::new(records, ChartConfig::default())
    }

    #[test]
    fn easing_never_overshoots() {
        let cases = [(0.0, 10.0), (10.0, 0.0), (-3.0, 4.5), (7.0, 7.0), (1e6, -1e6)];
        for speed in [0.01, 0.05, 0.15, 0.5, 0.99] {
            for (start, target) in cases {
                let mut current: f64 = start;
                for _ in 0..30 {
                    let next = ease(current, target, speed);
                    if current < target {
                        assert!(next > current && next <= target);
                    } else if current > target {
                        assert!(next < current && next >= target);
                    } else {
                        assert_eq!(next, target);
                    }
                    current = next;
                }
            }
        }
    }

    #[test]
    fn starts_parked_with_floor_scale() {
        let chart = chart();
        let parked = chart.config().layout.parked_y();
        for i in 0..chart.records().len() {
            let s = chart.state(i).unwrap();
            assert_eq!(s.current_y, parked);
            assert_eq!(s.current_max, 0.0);
        }
        assert_eq!(chart.scale().current_max, 10.0);
        assert!(chart.active().is_empty());
    }

    #[test]
    fn entering_bar_snaps_below_visible_area() {
        let mut chart = chart();
        let layout = chart.config().layout;
        chart.set_checked(0, true);
        chart.tick();

        let s = chart.state(0).unwrap();
        let expected = ease(layout.entry_y(), layout.slot_y(0), 0.15);
        assert!((s.current_y - expected).abs() < 1e-9);
        assert_eq!(s.target_y, layout.slot_y(0));
    }

    #[test]
    fn visible_bar_reselected_does_not_snap() {
        let mut chart = chart();
        chart.set_all(true);
        for _ in 0..100 {
            chart.tick();
        }
        chart.set_checked(0, false);
        for _ in 0..3 {
            chart.tick();
        }
        let leaving_y = chart.state(0).unwrap().current_y;
        assert!(leaving_y < chart.config().layout.entry_y());

        chart.set_checked(0, true);
        chart.tick();
        let slot = chart.config().layout.slot_y(2);
        assert!((chart.state(0).unwrap().current_y - ease(leaving_y, slot, 0.15)).abs() < 1e-9);
    }

    #[test]
    fn taller_window_keeps_parked_bars_below_the_edge() {
        let mut chart = chart();
        chart.set_visible_height(2000.0);
        let layout = chart.config().layout;
        for i in 0..chart.records().len() {
            assert_eq!(chart.state(i).unwrap().current_y, layout.parked_y());
        }

        chart.set_checked(0, true);
        chart.tick();
        let expected = ease(2000.0, layout.slot_y(0), 0.15);
        assert!((chart.state(0).unwrap().current_y - expected).abs() < 1e-9);
    }

    #[test]
    fn shorter_window_leaves_active_bars_alone() {
        let mut chart = chart();
        chart.set_all(true);
        for _ in 0..400 {
            chart.tick();
        }
        let before = chart.state(1).unwrap().current_y;
        chart.set_visible_height(300.0);
        assert_eq!(chart.state(1).unwrap().current_y, before);
    }

    #[test]
    fn bars_settle_on_their_rank_slots() {
        let mut chart = chart();
        chart.set_all(true);
        for _ in 0..400 {
            chart.tick();
        }

        let layout = chart.config().layout;
        assert_eq!(chart.active(), &[1, 2, 0]);
        for (rank, &idx) in chart.active().iter().enumerate() {
            let s = chart.state(idx).unwrap();
            assert!((s.current_y - layout.slot_y(rank)).abs() < 1e-3);
            assert!((s.current_max - chart.records()[idx].max).abs() < 1e-3);
            assert!((s.current_min - chart.records()[idx].min).abs() < 1e-3);
        }
        assert!((chart.scale().current_max - 2.42).abs() < 1e-3);
    }

    #[test]
    fn deselected_bar_returns_to_parking() {
        let mut chart = chart();
        chart.set_all(true);
        for _ in 0..100 {
            chart.tick();
        }
        chart.set_checked(1, false);
        assert_eq!(chart.active(), &[2, 0]);
        for _ in 0..400 {
            chart.tick();
        }

        let s = chart.state_by_name("latte").unwrap();
        assert!((s.current_y - chart.config().layout.parked_y()).abs() < 1e-3);
        assert!(s.current_max.abs() < 1e-3);
        assert!(chart.rank(1).is_none());
    }

    #[test]
    fn scale_moves_slower_than_bars() {
        let mut chart = chart();
        chart.set_all(true);
        chart.tick();

        let s = chart.state(1).unwrap();
        let item_progress = s.current_max / 2.20;
        let scale = chart.scale();
        let scale_progress = (10.0 - scale.current_max) / (10.0 - scale.target_max);
        assert!(scale_progress < item_progress);
    }

    #[test]
    fn frame_clock_counts_whole_intervals() {
        let start = Instant::now();
        let mut clock = FrameClock::starting_at(start, Duration::from_millis(16));

        assert_eq!(clock.due_ticks(start + Duration::from_millis(10)), 0);
        assert_eq!(clock.due_ticks(start + Duration::from_millis(33)), 2);
        assert_eq!(clock.due_ticks(start + Duration::from_millis(48)), 1);
    }

    #[test]
    fn frame_clock_drops_long_backlog() {
        let start = Instant::now();
        let mut clock = FrameClock::starting_at(start, Duration::from_millis(16));

        assert_eq!(clock.due_ticks(start + Duration::from_secs(5)), 4);
        assert_eq!(clock.due_ticks(start + Duration::from_millis(5010)), 0);
    }
}
