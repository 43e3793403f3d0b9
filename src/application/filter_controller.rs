//! Single source of truth for the listing filters.
//!
//! [`FilterController`] owns the committed [`FilterState`] and the slider
//! [`AreaSelection`]. It is the only place either is mutated. When a
//! [`FilterStore`] is injected the controller hydrates from it at construction
//! and writes `{filters, areaValue}` back after every change; the area range is
//! never stored.

use crate::domain::entities::{
    AreaRange, AreaSelection, DEFAULT_AREA_RANGE, FilterSnapshot, FilterState, FilterUpdate,
};
use crate::domain::repositories::FilterStore;
use crate::domain::services::area_range::{self, AreaPhase};
use chrono::Utc;
use std::sync::Arc;

pub type FiltersChangeListener = Box<dyn Fn(&FilterState) + Send + Sync>;

#[derive(Default)]
pub struct FilterControllerOptions {
    initial_filters: Option<FilterUpdate>,
    on_filters_change: Option<FiltersChangeListener>,
    area_range: Option<AreaRange>,
    store: Option<Arc<dyn FilterStore>>,
}

impl FilterControllerOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn initial_filters(mut self, initial: FilterUpdate) -> Self {
        self.initial_filters = Some(initial);
        self
    }

    pub fn on_filters_change<F>(mut self, listener: F) -> Self
    where
        F: Fn(&FilterState) + Send + Sync + 'static,
    {
        self.on_filters_change = Some(Box::new(listener));
        self
    }

    pub fn area_range(mut self, range: AreaRange) -> Self {
        self.area_range = Some(range);
        self
    }

    pub fn store(mut self, store: Arc<dyn FilterStore>) -> Self {
        self.store = Some(store);
        self
    }
}

pub struct FilterController {
    filters: FilterState,
    area_value: AreaSelection,
    area_range: AreaRange,
    phase: AreaPhase,
    /// Set when the caller supplied area values; released by the first range
    /// delivery or by the user taking over the area.
    area_pinned: bool,
    on_filters_change: Option<FiltersChangeListener>,
    store: Option<Arc<dyn FilterStore>>,
}

impl FilterController {
    pub fn new(options: FilterControllerOptions) -> Self {
        let FilterControllerOptions {
            initial_filters,
            on_filters_change,
            area_range: initial_range,
            store,
        } = options;

        let mut filters = FilterState::new();
        let mut area_value = AreaSelection::default();

        if let Some(store) = &store {
            match store.load() {
                Ok(Some(snapshot)) => {
                    tracing::info!("Restored filters from store '{}'", store.namespace());
                    filters = snapshot.filters;
                    area_value = snapshot.area_value;
                }
                Ok(None) => {
                    tracing::debug!("No stored filters in '{}', using defaults", store.namespace());
                }
                Err(e) => {
                    tracing::warn!(
                        "Ignoring stored filters in '{}': {}",
                        store.namespace(),
                        e
                    );
                }
            }
        }

        let area_pinned = initial_filters
            .as_ref()
            .is_some_and(area_range::has_explicit_area);

        if let Some(initial) = &initial_filters {
            let restored_region = filters.region.clone();
            filters.merge(initial);
            // A caller-chosen region invalidates a restored location unless it names one too.
            if initial.location.is_none() && filters.region != restored_region {
                filters.location.clear();
            }
            if initial.min_area.is_some() || initial.max_area.is_some() {
                area_value = filters.area();
            }
        }

        let mut controller = Self {
            filters,
            area_value,
            area_range: DEFAULT_AREA_RANGE,
            phase: AreaPhase::Unset,
            area_pinned,
            on_filters_change,
            store,
        };

        if let Some(range) = initial_range {
            controller.reconcile_range(range);
        }
        controller.persist();
        controller
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn area_value(&self) -> AreaSelection {
        self.area_value
    }

    /// The current valid bounds; the fixed default until a range has been delivered.
    pub fn area_range(&self) -> AreaRange {
        self.area_range
    }

    pub fn area_phase(&self) -> AreaPhase {
        self.phase
    }

    pub fn snapshot(&self) -> FilterSnapshot {
        FilterSnapshot::new(self.filters.clone(), self.area_value)
    }

    /// Merges `updates` into the committed filters.
    ///
    /// Changing `region` always clears `location`, even when `updates` carries a
    /// location of its own.
    pub fn update_filters(&mut self, updates: FilterUpdate) {
        let region_changed = updates
            .region
            .as_ref()
            .is_some_and(|region| *region != self.filters.region);

        self.filters.merge(&updates);

        if region_changed {
            if !self.filters.location.is_empty() {
                tracing::debug!(
                    "Region changed to '{}', dropping location '{}'",
                    self.filters.region,
                    self.filters.location
                );
            }
            self.filters.location.clear();
        }

        tracing::info!(
            "Filters updated: {} criteria active, area [{}, {}]",
            self.filters.active_criteria_count(),
            self.filters.min_area,
            self.filters.max_area
        );
        self.commit();
    }

    /// Moves the slider and the committed area fields together. No range validation.
    pub fn update_area_value(&mut self, value: impl Into<AreaSelection>) {
        let value = value.into();
        self.area_pinned = false;
        self.area_value = value;
        self.filters.set_area(value);
        tracing::debug!("Area selection set to [{}, {}]", value.min, value.max);
        self.commit();
    }

    /// Realigns the slider with the committed `min_area`/`max_area`.
    pub fn set_area_from_filters(&mut self) {
        self.area_value = self.filters.area();
        self.persist();
    }

    pub fn clear_filters(&mut self) {
        let bounds = if self.phase.range_known() {
            self.area_range
        } else {
            DEFAULT_AREA_RANGE
        };

        self.filters = FilterState {
            min_area: bounds.min,
            max_area: bounds.max,
            ..FilterState::new()
        };
        self.area_value = bounds.as_selection();
        self.area_pinned = false;

        tracing::info!("Filters cleared, area reset to [{}, {}]", bounds.min, bounds.max);
        self.commit();
    }

    pub fn has_active_filters(&self) -> bool {
        let filters = &self.filters;
        !filters.isic.is_empty()
            || !filters.sector.is_empty()
            || !filters.region.is_empty()
            || !filters.location.is_empty()
            || filters.min_area != self.area_range.min
            || filters.max_area != self.area_range.max
    }

    /// The range-arrived path. May be called any number of times, in any order
    /// relative to user interaction.
    pub fn apply_area_range(&mut self, range: AreaRange) {
        let before = self.filters.clone();

        if !self.reconcile_range(range) {
            return;
        }

        if self.filters != before {
            self.notify();
        }
        self.persist();
    }

    /// Writes the final snapshot and releases the change listener.
    pub fn dispose(&mut self) {
        self.persist();
        self.on_filters_change = None;
        tracing::debug!("Filter controller disposed");
    }

    fn reconcile_range(&mut self, range: AreaRange) -> bool {
        let Some(range) = range.normalized() else {
            tracing::warn!(
                "Ignoring area range with non-finite bounds [{}, {}]",
                range.min,
                range.max
            );
            return false;
        };

        let next = area_range::reconcile(
            self.phase.range_known(),
            self.area_pinned,
            self.area_value,
            range,
        );

        self.area_range = range;
        self.phase = self.phase.advance();

        if self.area_pinned {
            self.area_pinned = false;
        } else {
            self.area_value = next;
            self.filters.set_area(next);
        }

        tracing::debug!(
            "Area range [{}, {}] applied ({:?}), selection now [{}, {}]",
            range.min,
            range.max,
            self.phase,
            self.area_value.min,
            self.area_value.max
        );
        true
    }

    fn commit(&self) {
        self.notify();
        self.persist();
    }

    fn notify(&self) {
        if let Some(listener) = &self.on_filters_change {
            listener(&self.filters);
        }
    }

    fn persist(&self) {
        let Some(store) = &self.store else {
            return;
        };

        let snapshot = self.snapshot().with_saved_at(Utc::now().to_rfc3339());
        if let Err(e) = store.save(&snapshot) {
            tracing::warn!("Failed to persist filters to '{}': {}", store.namespace(), e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::StoreError;
    use crate::infrastructure::MemoryFilterStore;
    use std::sync::Mutex;

    type Calls = Arc<Mutex<Vec<FilterState>>>;

    fn recording_options() -> (FilterControllerOptions, Calls) {
        let calls: Calls = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&calls);
        let options = FilterControllerOptions::new()
            .on_filters_change(move |filters| sink.lock().unwrap().push(filters.clone()));
        (options, calls)
    }

    fn sel(min: f64, max: f64) -> AreaSelection {
        AreaSelection::new(min, max)
    }

    #[test]
    fn region_change_clears_location_even_when_supplied() {
        let mut controller = FilterController::new(FilterControllerOptions::new());
        controller.update_filters(FilterUpdate::new().region("east"));
        controller.update_filters(FilterUpdate::new().location("jubail"));

        controller.update_filters(FilterUpdate::new().region("west").location("yanbu"));

        assert_eq!(controller.filters().region, "west");
        assert_eq!(controller.filters().location, "");
    }

    #[test]
    fn clearing_region_clears_location() {
        let mut controller = FilterController::new(FilterControllerOptions::new());
        controller.update_filters(FilterUpdate::new().region("east"));
        controller.update_filters(FilterUpdate::new().location("jubail"));

        controller.update_filters(FilterUpdate::new().region(""));

        assert_eq!(controller.filters().region, "");
        assert_eq!(controller.filters().location, "");
    }

    #[test]
    fn unchanged_region_preserves_location() {
        let mut controller = FilterController::new(FilterControllerOptions::new());
        controller.update_filters(FilterUpdate::new().region("east"));

        controller.update_filters(FilterUpdate::new().region("east").location("dammam"));

        assert_eq!(controller.filters().location, "dammam");
    }

    #[test]
    fn first_range_is_adopted() {
        let mut controller = FilterController::new(FilterControllerOptions::new());
        controller.apply_area_range(AreaRange::new(100.0, 50_000.0));

        assert_eq!(controller.area_value().as_array(), [100.0, 50_000.0]);
        assert_eq!(controller.filters().min_area, 100.0);
        assert_eq!(controller.filters().max_area, 50_000.0);
        assert_eq!(controller.area_phase(), AreaPhase::AdoptedFromSource);
    }

    #[test]
    fn explicit_initial_area_wins_over_first_range() {
        let mut controller = FilterController::new(
            FilterControllerOptions::new()
                .initial_filters(FilterUpdate::new().area(5_000.0, 20_000.0)),
        );

        controller.apply_area_range(AreaRange::new(100.0, 50_000.0));

        assert_eq!(controller.filters().min_area, 5_000.0);
        assert_eq!(controller.filters().max_area, 20_000.0);
        assert_eq!(controller.area_value(), sel(5_000.0, 20_000.0));
        assert_eq!(controller.area_range(), AreaRange::new(100.0, 50_000.0));
    }

    #[test]
    fn explicit_initial_area_is_clamped_by_later_ranges() {
        let mut controller = FilterController::new(
            FilterControllerOptions::new()
                .initial_filters(FilterUpdate::new().area(5_000.0, 20_000.0)),
        );
        controller.apply_area_range(AreaRange::new(100.0, 50_000.0));

        controller.apply_area_range(AreaRange::new(8_000.0, 18_000.0));

        assert_eq!(controller.area_value(), sel(8_000.0, 18_000.0));
        assert_eq!(controller.filters().area(), sel(8_000.0, 18_000.0));
    }

    #[test]
    fn cleared_explicit_area_follows_new_ranges() {
        let mut controller = FilterController::new(
            FilterControllerOptions::new()
                .initial_filters(FilterUpdate::new().area(5_000.0, 20_000.0)),
        );
        controller.apply_area_range(AreaRange::new(100.0, 50_000.0));
        controller.clear_filters();
        assert!(!controller.has_active_filters());

        controller.apply_area_range(AreaRange::new(200.0, 40_000.0));

        assert_eq!(controller.area_value(), sel(200.0, 40_000.0));
        assert_eq!(controller.filters().area(), sel(200.0, 40_000.0));
        assert!(!controller.has_active_filters());
    }

    #[test]
    fn moving_the_slider_releases_explicit_area() {
        let mut controller = FilterController::new(
            FilterControllerOptions::new()
                .initial_filters(FilterUpdate::new().area(5_000.0, 20_000.0)),
        );
        controller.update_area_value([6_000.0, 30_000.0]);

        controller.apply_area_range(AreaRange::new(100.0, 50_000.0));

        assert_eq!(controller.area_value(), sel(100.0, 50_000.0));
    }

    #[test]
    fn explicit_initial_area_wins_over_construction_range() {
        let controller = FilterController::new(
            FilterControllerOptions::new()
                .initial_filters(FilterUpdate::new().area(5_000.0, 20_000.0))
                .area_range(AreaRange::new(100.0, 50_000.0)),
        );

        assert_eq!(controller.area_value(), sel(5_000.0, 20_000.0));
        assert_eq!(controller.filters().area(), sel(5_000.0, 20_000.0));
    }

    #[test]
    fn second_range_clamps_selection() {
        let mut controller = FilterController::new(FilterControllerOptions::new());
        controller.apply_area_range(AreaRange::new(0.0, 25_000.0));
        controller.update_area_value([5_000.0, 20_000.0]);

        controller.apply_area_range(AreaRange::new(8_000.0, 18_000.0));

        assert_eq!(controller.area_value(), sel(8_000.0, 18_000.0));
        assert_eq!(controller.filters().area(), sel(8_000.0, 18_000.0));
        assert_eq!(controller.area_phase(), AreaPhase::Clamped);
    }

    #[test]
    fn disjoint_range_collapses_to_range_bounds() {
        let mut controller = FilterController::new(FilterControllerOptions::new());
        controller.apply_area_range(AreaRange::new(0.0, 25_000.0));
        controller.update_area_value([100.0, 900.0]);

        controller.apply_area_range(AreaRange::new(5_000.0, 8_000.0));

        assert_eq!(controller.area_value(), sel(5_000.0, 8_000.0));
        assert_eq!(controller.filters().area(), sel(5_000.0, 8_000.0));
    }

    #[test]
    fn reversed_range_is_swapped_and_non_finite_range_ignored() {
        let mut controller = FilterController::new(FilterControllerOptions::new());
        controller.apply_area_range(AreaRange::new(f64::NAN, 10.0));
        assert_eq!(controller.area_phase(), AreaPhase::Unset);
        assert_eq!(controller.area_value(), AreaSelection::default());

        controller.apply_area_range(AreaRange::new(50_000.0, 100.0));
        assert_eq!(controller.area_range(), AreaRange::new(100.0, 50_000.0));
        assert_eq!(controller.area_value(), sel(100.0, 50_000.0));
    }

    #[test]
    fn clear_restores_range_bounds() {
        let mut controller = FilterController::new(FilterControllerOptions::new());
        controller.apply_area_range(AreaRange::new(100.0, 50_000.0));
        controller.update_filters(
            FilterUpdate::new()
                .isic(["2410"])
                .sector("tech")
                .region("east"),
        );
        controller.update_filters(FilterUpdate::new().location("jubail"));
        controller.update_area_value([2_000.0, 3_000.0]);

        controller.clear_filters();

        let expected = FilterState {
            min_area: 100.0,
            max_area: 50_000.0,
            ..FilterState::new()
        };
        assert_eq!(controller.filters(), &expected);
        assert_eq!(controller.area_value().as_array(), [100.0, 50_000.0]);
    }

    #[test]
    fn clear_without_range_uses_defaults() {
        let mut controller = FilterController::new(
            FilterControllerOptions::new()
                .initial_filters(FilterUpdate::new().sector("tech").area(10.0, 20.0)),
        );

        controller.clear_filters();

        assert_eq!(controller.filters(), &FilterState::default());
        assert_eq!(controller.area_value(), AreaSelection::default());
    }

    #[test]
    fn clear_is_idempotent() {
        let mut controller = FilterController::new(FilterControllerOptions::new());
        controller.apply_area_range(AreaRange::new(100.0, 50_000.0));
        controller.update_filters(FilterUpdate::new().sector("tech"));

        controller.clear_filters();
        let once = (controller.filters().clone(), controller.area_value());
        controller.clear_filters();

        assert_eq!((controller.filters().clone(), controller.area_value()), once);
    }

    #[test]
    fn has_active_filters_tracks_each_field() {
        let mut controller = FilterController::new(FilterControllerOptions::new());
        controller.apply_area_range(AreaRange::new(100.0, 50_000.0));
        controller.clear_filters();
        assert!(!controller.has_active_filters());

        let divergent = [
            FilterUpdate::new().isic(["2410"]),
            FilterUpdate::new().sector("tech"),
            FilterUpdate::new().region("east"),
            FilterUpdate::new().location("jubail"),
            FilterUpdate::new().min_area(200.0),
            FilterUpdate::new().max_area(40_000.0),
        ];
        for update in divergent {
            controller.clear_filters();
            controller.update_filters(update.clone());
            assert!(controller.has_active_filters(), "{update:?} should be active");
        }
    }

    #[test]
    fn has_active_filters_follows_range_changes() {
        let mut controller = FilterController::new(FilterControllerOptions::new());
        controller.apply_area_range(AreaRange::new(100.0, 50_000.0));
        controller.clear_filters();

        controller.apply_area_range(AreaRange::new(200.0, 40_000.0));

        assert_eq!(controller.filters().area(), sel(200.0, 40_000.0));
        assert!(!controller.has_active_filters());
    }

    #[test]
    fn notifier_fires_once_with_final_state() {
        let (options, calls) = recording_options();
        let mut controller = FilterController::new(options);
        controller.update_filters(FilterUpdate::new().region("east"));
        controller.update_filters(FilterUpdate::new().location("jubail"));

        controller.update_filters(FilterUpdate::new().region("west").location("yanbu"));

        let calls = calls.lock().unwrap();
        assert_eq!(calls.len(), 3);
        let last = calls.last().unwrap();
        assert_eq!(last.region, "west");
        assert_eq!(last.location, "");
    }

    #[test]
    fn clear_notifies_once_with_cleared_state() {
        let (options, calls) = recording_options();
        let mut controller = FilterController::new(options);
        controller.update_filters(FilterUpdate::new().sector("tech"));
        calls.lock().unwrap().clear();

        controller.clear_filters();

        let calls = calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0], FilterState::default());
    }

    #[test]
    fn range_delivery_notifies_only_on_change() {
        let (options, calls) = recording_options();
        let mut controller = FilterController::new(options.area_range(AreaRange::new(0.0, 25_000.0)));
        assert!(calls.lock().unwrap().is_empty());

        controller.apply_area_range(AreaRange::new(0.0, 30_000.0));
        assert!(calls.lock().unwrap().is_empty());

        controller.apply_area_range(AreaRange::new(1_000.0, 30_000.0));
        let calls = calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].min_area, 1_000.0);
    }

    #[test]
    fn area_value_and_committed_area_move_together() {
        let mut controller = FilterController::new(FilterControllerOptions::new());

        controller.update_area_value([1_000.0, 2_000.0]);
        assert_eq!(controller.filters().area(), sel(1_000.0, 2_000.0));

        controller.update_filters(FilterUpdate::new().area(3_000.0, 4_000.0));
        assert_eq!(controller.area_value(), sel(1_000.0, 2_000.0));

        controller.set_area_from_filters();
        assert_eq!(controller.area_value(), sel(3_000.0, 4_000.0));
        assert_eq!(controller.filters().area(), sel(3_000.0, 4_000.0));
    }

    #[test]
    fn sector_region_location_scenario() {
        let mut controller = FilterController::new(FilterControllerOptions::new());
        controller.update_filters(FilterUpdate::new().sector("tech"));
        controller.update_filters(FilterUpdate::new().region("east"));
        controller.update_filters(FilterUpdate::new().location("jubail"));
        controller.update_filters(FilterUpdate::new().region("west"));

        let filters = controller.filters();
        assert_eq!(filters.sector, "tech");
        assert_eq!(filters.region, "west");
        assert_eq!(filters.location, "");
    }

    #[test]
    fn persists_filters_and_area_but_not_range() {
        let store = Arc::new(MemoryFilterStore::new("test"));
        let mut controller =
            FilterController::new(FilterControllerOptions::new().store(store.clone()));
        controller.apply_area_range(AreaRange::new(100.0, 50_000.0));
        controller.update_filters(FilterUpdate::new().sector("tech"));

        let stored = store.load().unwrap().unwrap();
        assert_eq!(stored.filters.sector, "tech");
        assert_eq!(stored.area_value, sel(100.0, 50_000.0));
        assert!(stored.saved_at.is_some());

        let json = serde_json::to_value(&stored).unwrap();
        assert!(json.get("areaRange").is_none());
    }

    #[test]
    fn hydrates_from_store_and_adopts_first_new_range() {
        let store = Arc::new(MemoryFilterStore::new("test"));
        {
            let mut controller =
                FilterController::new(FilterControllerOptions::new().store(store.clone()));
            controller.apply_area_range(AreaRange::new(100.0, 50_000.0));
            controller.update_filters(FilterUpdate::new().region("east"));
            controller.update_filters(FilterUpdate::new().location("jubail"));
            controller.update_area_value([2_000.0, 40_000.0]);
            controller.dispose();
        }

        let mut controller =
            FilterController::new(FilterControllerOptions::new().store(store.clone()));
        assert_eq!(controller.filters().location, "jubail");
        assert_eq!(controller.area_value(), sel(2_000.0, 40_000.0));
        assert_eq!(controller.area_range(), DEFAULT_AREA_RANGE);
        assert_eq!(controller.area_phase(), AreaPhase::Unset);

        controller.apply_area_range(AreaRange::new(5_000.0, 30_000.0));
        assert_eq!(controller.area_value(), sel(5_000.0, 30_000.0));
        assert_eq!(controller.filters().area(), sel(5_000.0, 30_000.0));
    }

    #[test]
    fn previous_session_range_does_not_narrow_the_next_one() {
        let store = Arc::new(MemoryFilterStore::new("test"));
        let mut first =
            FilterController::new(FilterControllerOptions::new().store(store.clone()));
        first.apply_area_range(AreaRange::new(100.0, 50_000.0));
        first.dispose();

        let mut second =
            FilterController::new(FilterControllerOptions::new().store(store.clone()));
        second.apply_area_range(AreaRange::new(0.0, 90_000.0));

        assert_eq!(second.area_value(), sel(0.0, 90_000.0));
        assert_eq!(second.filters().area(), sel(0.0, 90_000.0));
        assert!(!second.has_active_filters());
    }

    #[test]
    fn dispose_flushes_and_releases_listener() {
        let store = Arc::new(MemoryFilterStore::new("test"));
        let (options, calls) = recording_options();
        let mut controller = FilterController::new(options.store(store.clone()));
        controller.update_filters(FilterUpdate::new().sector("tech"));

        controller.dispose();
        controller.update_filters(FilterUpdate::new().sector("food"));

        assert_eq!(calls.lock().unwrap().len(), 1);
        assert_eq!(store.load().unwrap().unwrap().filters.sector, "food");
    }

    #[test]
    fn initial_region_over_restored_state_drops_restored_location() {
        let store = Arc::new(MemoryFilterStore::new("test"));
        let mut restored = FilterState::new();
        restored.region = "east".to_string();
        restored.location = "jubail".to_string();
        store
            .save(&FilterSnapshot::new(restored, AreaSelection::default()))
            .unwrap();

        let controller = FilterController::new(
            FilterControllerOptions::new()
                .store(store)
                .initial_filters(FilterUpdate::new().region("west")),
        );

        assert_eq!(controller.filters().region, "west");
        assert_eq!(controller.filters().location, "");
    }

    struct BrokenStore;

    impl FilterStore for BrokenStore {
        fn namespace(&self) -> &str {
            "broken"
        }

        fn load(&self) -> Result<Option<FilterSnapshot>, StoreError> {
            Err(StoreError::Io(std::io::Error::other("disk unavailable")))
        }

        fn save(&self, _snapshot: &FilterSnapshot) -> Result<(), StoreError> {
            Err(StoreError::Io(std::io::Error::other("disk unavailable")))
        }
    }

    #[test]
    fn store_failures_fall_back_to_defaults() {
        let mut controller =
            FilterController::new(FilterControllerOptions::new().store(Arc::new(BrokenStore)));
        assert_eq!(controller.filters(), &FilterState::default());

        controller.update_filters(FilterUpdate::new().sector("tech"));
        assert_eq!(controller.filters().sector, "tech");
    }
}
