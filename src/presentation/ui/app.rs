use crate::application::{FilterController, FilterControllerOptions, UseCaseContainer};
use crate::domain::entities::{
    AppConfig, CatalogEntry, DEFAULT_AREA_RANGE, FilterOptions, FilterState,
};
use crate::domain::repositories::FilterStore;
use crate::infrastructure::{JsonFilterStore, MemoryFilterStore};
use crate::presentation::components::{
    FilterAction, FilterPanel, FilterPanelView, LogEntry, LogManager,
};
use crate::presentation::services::{AsyncExecutor, CatalogEvent, CatalogTasks};
use anyhow::Result;
use eframe::egui;
use std::sync::Arc;
use std::sync::mpsc::{Receiver, channel};

pub struct SitescopeApp {
    controller: FilterController,
    tasks: CatalogTasks,
    filter_changes: Receiver<FilterState>,

    options: FilterOptions,
    cities: Vec<CatalogEntry>,
    cities_region: String,
    range_criteria: Option<FilterState>,

    log_manager: LogManager,
    log_rx: Receiver<LogEntry>,

    initialized: bool,
    status_message: String,
}

impl SitescopeApp {
    pub fn new(
        use_cases: Arc<UseCaseContainer>,
        config: &AppConfig,
        log_rx: Receiver<LogEntry>,
    ) -> Result<Self> {
        let store: Arc<dyn FilterStore> = if config.persist_filters {
            Arc::new(JsonFilterStore::new(config.storage_namespace.clone()))
        } else {
            Arc::new(MemoryFilterStore::new(config.storage_namespace.clone()))
        };
        Self::with_store(use_cases, store, log_rx)
    }

    pub fn with_store(
        use_cases: Arc<UseCaseContainer>,
        store: Arc<dyn FilterStore>,
        log_rx: Receiver<LogEntry>,
    ) -> Result<Self> {
        let executor = AsyncExecutor::new()?;

        let (change_tx, filter_changes) = channel();
        let controller = FilterController::new(
            FilterControllerOptions::new()
                .store(store)
                .on_filters_change(move |filters| {
                    let _ = change_tx.send(filters.clone());
                }),
        );

        Ok(Self {
            controller,
            tasks: CatalogTasks::new(use_cases, executor),
            filter_changes,
            options: FilterOptions::default(),
            cities: Vec::new(),
            cities_region: String::new(),
            range_criteria: None,
            log_manager: LogManager::new(),
            log_rx,
            initialized: false,
            status_message: String::new(),
        })
    }

    /// Area bounds depend on every criterion except the area itself.
    fn range_criteria(filters: &FilterState) -> FilterState {
        FilterState {
            min_area: DEFAULT_AREA_RANGE.min,
            max_area: DEFAULT_AREA_RANGE.max,
            ..filters.clone()
        }
    }

    fn refresh_dependent_data(&mut self) {
        let filters = self.controller.filters().clone();

        if filters.region != self.cities_region {
            self.cities_region = filters.region.clone();
            self.cities.clear();
            if !filters.region.is_empty() {
                self.tasks.load_cities(filters.region.clone());
            }
        }

        let criteria = Self::range_criteria(&filters);
        if self.range_criteria.as_ref() != Some(&criteria) {
            self.range_criteria = Some(criteria.clone());
            self.tasks.fetch_area_range(criteria);
        }
    }

    fn apply_action(&mut self, action: FilterAction) {
        match action {
            FilterAction::Update(update) => self.controller.update_filters(update),
            FilterAction::SetArea(area) => self.controller.update_area_value(area),
            FilterAction::ResetSlider => self.controller.set_area_from_filters(),
            FilterAction::Clear => {
                self.controller.clear_filters();
                self.status_message = "Filters cleared".to_string();
            }
        }
    }

    fn poll_catalog(&mut self) {
        for event in self.tasks.poll() {
            match event {
                CatalogEvent::OptionsLoaded(options) => {
                    self.options = options;
                }
                CatalogEvent::CitiesLoaded { region, cities } => {
                    if region == self.controller.filters().region {
                        self.cities = cities;
                    }
                }
                CatalogEvent::AreaRangeLoaded { range, .. } => {
                    self.controller.apply_area_range(range);
                }
                CatalogEvent::Failed { task, message, .. } => {
                    tracing::error!("Catalog task '{}' failed: {}", task, message);
                    self.status_message = format!("Could not {task}");
                }
            }
        }
    }

    fn poll_filter_changes(&mut self) -> bool {
        let mut changed = false;
        while let Ok(filters) = self.filter_changes.try_recv() {
            tracing::trace!("Committed filters: {:?}", filters);
            changed = true;
        }
        changed
    }

    fn poll_logs(&mut self) {
        while let Ok(entry) = self.log_rx.try_recv() {
            self.log_manager.push(entry);
        }
    }

    fn show_summary(&self, ui: &mut egui::Ui) {
        let filters = self.controller.filters();
        let range = self.controller.area_range();

        ui.heading("Current search");
        ui.separator();

        egui::Grid::new("summary_grid")
            .num_columns(2)
            .striped(true)
            .show(ui, |ui| {
                ui.label("Active filters");
                ui.label(if self.controller.has_active_filters() {
                    format!("yes ({} criteria)", filters.active_criteria_count())
                } else {
                    "none".to_string()
                });
                ui.end_row();

                ui.label("Area selection");
                let area = self.controller.area_value();
                ui.label(format!("{} – {}", area.min, area.max));
                ui.end_row();

                ui.label("Valid area range");
                ui.label(format!(
                    "{} – {} ({:?})",
                    range.min,
                    range.max,
                    self.controller.area_phase()
                ));
                ui.end_row();
            });

        ui.add_space(10.0);
        ui.label(egui::RichText::new("Committed filters").strong());
        let committed = serde_json::to_string_pretty(filters)
            .unwrap_or_else(|e| format!("<unserializable: {e}>"));
        ui.monospace(committed);
    }

    fn show_log_panel(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let mut show_debug = self.log_manager.show_debug();
            if ui.checkbox(&mut show_debug, "Show debug").changed() {
                self.log_manager.set_show_debug(show_debug);
            }
            if ui.button("Clear log").clicked() {
                self.log_manager.clear();
            }
        });

        ui.separator();

        egui::ScrollArea::vertical()
            .auto_shrink([false; 2])
            .stick_to_bottom(true)
            .show(ui, |ui| {
                for entry in self.log_manager.filtered_logs() {
                    ui.horizontal(|ui| {
                        ui.label(
                            egui::RichText::new(format!("[{}]", entry.format_timestamp()))
                                .color(egui::Color32::GRAY)
                                .monospace(),
                        );
                        ui.monospace(format!("{:>5} {}", entry.level, entry.message));
                    });
                }
            });
    }
}

impl eframe::App for SitescopeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_logs();
        self.poll_catalog();

        if !self.initialized {
            self.initialized = true;
            self.tasks.load_options();
            self.refresh_dependent_data();
        }

        if self.poll_filter_changes() {
            self.refresh_dependent_data();
        }

        if self.tasks.is_busy() {
            ctx.request_repaint();
        }

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Sitescope");
                ui.label(format!("v{}", env!("CARGO_PKG_VERSION")));
                ui.separator();
                if self.tasks.is_busy() {
                    ui.spinner();
                    ui.label("Loading catalog...");
                } else {
                    ui.label(self.status_message.as_str());
                }
            });
        });

        egui::TopBottomPanel::bottom("log_panel")
            .resizable(true)
            .default_height(180.0)
            .show(ctx, |ui| self.show_log_panel(ui));

        let mut actions = Vec::new();
        egui::SidePanel::left("filter_panel")
            .resizable(true)
            .default_width(320.0)
            .show(ctx, |ui| {
                actions = FilterPanel::show(
                    ui,
                    FilterPanelView {
                        filters: self.controller.filters(),
                        area_value: self.controller.area_value(),
                        area_range: self.controller.area_range(),
                        options: &self.options,
                        cities: &self.cities,
                        has_active_filters: self.controller.has_active_filters(),
                    },
                );
            });

        if !actions.is_empty() {
            for action in actions {
                self.apply_action(action);
            }
            ctx.request_repaint();
        }

        egui::CentralPanel::default().show(ctx, |ui| self.show_summary(ui));
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.controller.dispose();
    }
}
