use std::path::Path;
use std::sync::Arc;

use dioxus::prelude::*;
use tracing::{error, info};

use crate::domain::entities::report::{
    AttainmentRow, DealDetail, LossReasonRow, PipelineRcaRow, ReportData, SourceAttainmentRow,
};
use crate::domain::tables::{
    attainment_default_order, deal_default_order, loss_reason_default_order,
    pipeline_default_order, source_default_order,
};
use crate::engine::{ViewController, ALL};
use crate::infra::import::report_source_for;
use crate::platform::desktop::blocking::run_blocking;
use crate::ui::components::table::use_table_view;
use crate::usecase::ports::report_source::ReportError;
use crate::usecase::services::report_service::ReportService;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Attainment,
    Sources,
    Pipeline,
    LossReasons,
    Deals,
}

impl Section {
    pub const ALL: &'static [Section] = &[
        Section::Attainment,
        Section::Sources,
        Section::Pipeline,
        Section::LossReasons,
        Section::Deals,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Section::Attainment => "Attainment",
            Section::Sources => "Source Attainment",
            Section::Pipeline => "Pipeline RCA",
            Section::LossReasons => "Loss Reasons",
            Section::Deals => "Deals",
        }
    }
}

#[derive(Clone, Copy)]
pub struct AppState {
    pub report: Signal<Option<Arc<ReportData>>>,
    pub section: Signal<Section>,
    pub attainment: Signal<ViewController<AttainmentRow>>,
    pub sources: Signal<ViewController<SourceAttainmentRow>>,
    pub pipeline: Signal<ViewController<PipelineRcaRow>>,
    pub loss_reasons: Signal<ViewController<LossReasonRow>>,
    pub deals: Signal<ViewController<DealDetail>>,
    pub service: Signal<ReportService>,
    pub busy: Signal<bool>,
    pub status: Signal<String>,
}

impl AppState {
    pub fn new(items_per_page: usize) -> Self {
        Self {
            report: use_signal(|| None::<Arc<ReportData>>),
            section: use_signal(|| Section::Attainment),
            attainment: use_table_view(|| {
                ViewController::new(Vec::new())
                    .with_default_order(attainment_default_order)
                    .with_items_per_page(items_per_page)
            }),
            sources: use_table_view(|| {
                ViewController::new(Vec::new())
                    .with_default_order(source_default_order)
                    .with_items_per_page(items_per_page)
            }),
            pipeline: use_table_view(|| {
                ViewController::new(Vec::new())
                    .with_default_order(pipeline_default_order)
                    .with_items_per_page(items_per_page)
            }),
            loss_reasons: use_table_view(|| {
                ViewController::new(Vec::new())
                    .with_default_order(loss_reason_default_order)
                    .with_items_per_page(items_per_page)
            }),
            deals: use_table_view(|| {
                ViewController::new(Vec::new())
                    .with_default_order(deal_default_order)
                    .with_items_per_page(items_per_page)
            }),
            service: use_signal(ReportService::default),
            busy: use_signal(|| false),
            status: use_signal(|| "Ready".to_string()),
        }
    }

    /// Pushes a freshly loaded report into every table. Filters and sort
    /// carry over from the previous report.
    pub fn apply_report(&mut self, report: Arc<ReportData>) {
        self.attainment
            .write()
            .set_dataset(report.attainment_detail.select(ALL).into_owned());
        self.sources
            .write()
            .set_dataset(report.source_attainment.select(ALL).into_owned());
        self.pipeline
            .write()
            .set_dataset(report.pipeline_rca.select(ALL).into_owned());
        self.loss_reasons
            .write()
            .set_dataset(report.loss_reason_rca.select(ALL).into_owned());
        self.deals.write().set_dataset(report.all_deals());
        // Flat exports carry no deal sections.
        if !report.has_deals() && *self.section.peek() == Section::Deals {
            self.section.set(Section::Attainment);
        }
        self.report.set(Some(report));
    }

    pub fn open_report(&mut self, path: &Path) -> Result<(), ReportError> {
        self.busy.set(true);
        self.status.set(format!("Loading {}", path.display()));

        let mut service = self.service;
        let result = report_source_for(path).and_then(|source| {
            let mut service = service.write();
            service.set_source(source);
            run_blocking("load report", || service.load())
        });
        let outcome = self.finish_load(result);
        self.busy.set(false);
        outcome
    }

    /// Re-reads the current source. A failed reload keeps the tables as
    /// they were.
    pub fn reload_report(&mut self) -> Result<(), ReportError> {
        self.busy.set(true);
        self.status.set("Reloading report".to_string());

        let mut service = self.service;
        let result = run_blocking("reload report", || service.write().reload());
        let outcome = self.finish_load(result);
        self.busy.set(false);
        outcome
    }

    fn finish_load(&mut self, result: Result<Arc<ReportData>, ReportError>) -> Result<(), ReportError> {
        match result {
            Ok(report) => {
                let label = self
                    .service
                    .peek()
                    .source_label()
                    .unwrap_or_else(|| "report".to_string());
                info!(source = %label, report_date = %report.report_date, "report applied");
                self.status.set(format!("Loaded {label}"));
                self.apply_report(report);
                Ok(())
            }
            Err(err) => {
                error!(error = %err, "report load failed");
                self.status.set(format!("Failed to load report: {err}"));
                Err(err)
            }
        }
    }
}
