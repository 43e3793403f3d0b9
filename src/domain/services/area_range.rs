//! Merging an externally supplied area range with the current selection.
//!
//! The rules depend on timing and caller intent:
//!
//! * explicit initial area values from the caller are never overwritten,
//! * the first range seen is adopted verbatim,
//! * every later range clamps the selection into its bounds.
//!
//! When clamping leaves nothing (the selection lies entirely outside the new
//! range) the selection collapses to the new range's full bounds.

use crate::domain::entities::{AreaRange, AreaSelection, DEFAULT_AREA_RANGE, FilterUpdate};

/// Lifecycle of the area subsystem. There is no transition back to `Unset`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AreaPhase {
    #[default]
    Unset,
    AdoptedFromSource,
    Clamped,
}

impl AreaPhase {
    /// The phase after one more range delivery.
    pub fn advance(self) -> Self {
        match self {
            AreaPhase::Unset => AreaPhase::AdoptedFromSource,
            AreaPhase::AdoptedFromSource | AreaPhase::Clamped => AreaPhase::Clamped,
        }
    }

    pub fn range_known(self) -> bool {
        self != AreaPhase::Unset
    }
}

/// Decides the next selection for a freshly delivered `new_range`.
///
/// The returned value is meant for both the slider selection and the committed
/// `min_area`/`max_area` fields.
pub fn reconcile(
    prior_range_known: bool,
    explicit_initial_area: bool,
    current: AreaSelection,
    new_range: AreaRange,
) -> AreaSelection {
    if explicit_initial_area {
        return current;
    }

    if !prior_range_known {
        return new_range.as_selection();
    }

    let next_min = current.min.max(new_range.min);
    let next_max = current.max.min(new_range.max);

    if next_min > next_max {
        tracing::debug!(
            "Selection [{}, {}] is disjoint from range [{}, {}], collapsing to range bounds",
            current.min,
            current.max,
            new_range.min,
            new_range.max
        );
        return new_range.as_selection();
    }

    AreaSelection::new(next_min, next_max)
}

/// Whether a construction-time update carries area values that differ from the defaults.
pub fn has_explicit_area(initial: &FilterUpdate) -> bool {
    let min_given = initial
        .min_area
        .is_some_and(|min| min != DEFAULT_AREA_RANGE.min);
    let max_given = initial
        .max_area
        .is_some_and(|max| max != DEFAULT_AREA_RANGE.max);
    min_given || max_given
}
