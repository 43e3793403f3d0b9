use crate::domain::entities::{
    AreaRange, AreaSelection, CatalogEntry, FilterOptions, FilterState, FilterUpdate,
};
use egui::{ComboBox, RichText, ScrollArea, Slider};
use std::collections::BTreeSet;

pub enum FilterAction {
    Update(FilterUpdate),
    SetArea(AreaSelection),
    ResetSlider,
    Clear,
}

/// Read-only view of what the filter widgets need for one frame.
pub struct FilterPanelView<'a> {
    pub filters: &'a FilterState,
    pub area_value: AreaSelection,
    pub area_range: AreaRange,
    pub options: &'a FilterOptions,
    pub cities: &'a [CatalogEntry],
    pub has_active_filters: bool,
}

pub struct FilterPanel;

impl FilterPanel {
    pub fn show(ui: &mut egui::Ui, view: FilterPanelView<'_>) -> Vec<FilterAction> {
        let mut actions = Vec::new();
        let filters = view.filters;

        ui.heading("Filters");
        ui.separator();

        if let Some(sector) = Self::combo(
            ui,
            "Sector",
            &filters.sector,
            &view.options.sectors,
        ) {
            actions.push(FilterAction::Update(FilterUpdate::new().sector(sector)));
        }

        if let Some(region) = Self::combo(
            ui,
            "Region",
            &filters.region,
            &view.options.regions,
        ) {
            actions.push(FilterAction::Update(FilterUpdate::new().region(region)));
        }

        ui.add_enabled_ui(!filters.region.is_empty(), |ui| {
            if let Some(location) = Self::combo(ui, "Location", &filters.location, view.cities) {
                actions.push(FilterAction::Update(FilterUpdate::new().location(location)));
            }
        });

        ui.add_space(8.0);
        ui.label(RichText::new("Industry (ISIC)").strong());
        ScrollArea::vertical()
            .id_salt("isic_codes")
            .max_height(160.0)
            .show(ui, |ui| {
                for entry in &view.options.isic_codes {
                    let mut checked = filters.isic.contains(&entry.code);
                    let text = format!("{} {}", entry.code, entry.label);
                    if ui.checkbox(&mut checked, text).changed() {
                        let codes = Self::toggled(&filters.isic, &entry.code, checked);
                        actions.push(FilterAction::Update(FilterUpdate::new().isic(codes)));
                    }
                }
            });

        ui.add_space(8.0);
        ui.label(RichText::new("Area (m²)").strong());
        if let Some(area) = Self::area_sliders(ui, view.area_value, view.area_range) {
            actions.push(FilterAction::SetArea(area));
        }
        ui.label(
            RichText::new(format!(
                "Available: {} – {}",
                view.area_range.min, view.area_range.max
            ))
            .small(),
        );

        ui.add_space(8.0);
        ui.horizontal(|ui| {
            if ui.button("Reset slider").clicked() {
                actions.push(FilterAction::ResetSlider);
            }
            if ui
                .add_enabled(view.has_active_filters, egui::Button::new("Clear filters"))
                .clicked()
            {
                actions.push(FilterAction::Clear);
            }
        });

        actions
    }

    /// Returns the newly picked code, if it differs from `current`.
    fn combo(
        ui: &mut egui::Ui,
        label: &str,
        current: &str,
        entries: &[CatalogEntry],
    ) -> Option<String> {
        let mut selected = current.to_string();
        let selected_text = FilterOptions::label_for(entries, current)
            .unwrap_or(if current.is_empty() { "Any" } else { current })
            .to_string();

        ComboBox::from_label(label)
            .selected_text(selected_text)
            .show_ui(ui, |ui| {
                ui.selectable_value(&mut selected, String::new(), "Any");
                for entry in entries {
                    ui.selectable_value(&mut selected, entry.code.clone(), entry.label.as_str());
                }
            });

        (selected != current).then_some(selected)
    }

    fn toggled(codes: &BTreeSet<String>, code: &str, checked: bool) -> BTreeSet<String> {
        let mut codes = codes.clone();
        if checked {
            codes.insert(code.to_string());
        } else {
            codes.remove(code);
        }
        codes
    }

    /// Two sliders bounded by the range; the handles never cross.
    fn area_sliders(
        ui: &mut egui::Ui,
        value: AreaSelection,
        range: AreaRange,
    ) -> Option<AreaSelection> {
        let mut min = value.min.clamp(range.min, range.max);
        let mut max = value.max.clamp(range.min, range.max);
        let mut changed = false;

        changed |= ui
            .add(Slider::new(&mut min, range.min..=range.max).text("min"))
            .changed();
        changed |= ui
            .add(Slider::new(&mut max, range.min..=range.max).text("max"))
            .changed();

        if !changed {
            return None;
        }
        if min > max {
            min = max;
        }
        Some(AreaSelection::new(min, max))
    }
}
