//! Batch export
//!
//! Reports are exported strictly one after another: each capture needs
//! exclusive use of the rendering surface, so there is nothing to gain from
//! overlap. One failing item never stops the rest.

use capture::RenderRegion;

use crate::{ExportOptions, ExportOutcome, NoticeLevel, ReportExporter};

/// One entry of a batch export.
pub struct BatchItem {
    pub region: Box<dyn RenderRegion>,
    pub options: ExportOptions,
}

impl BatchItem {
    pub fn new(region: Box<dyn RenderRegion>, options: ExportOptions) -> Self {
        Self { region, options }
    }
}

/// Per-item outcomes of a batch export, in input order.
#[derive(Debug)]
pub struct BatchReport {
    pub outcomes: Vec<ExportOutcome>,
}

impl BatchReport {
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn success_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.success).count()
    }

    pub fn all_succeeded(&self) -> bool {
        self.success_count() == self.len()
    }
}

impl ReportExporter {
    /// Export a list of reports in order, aggregating per-item outcomes and
    /// announcing the overall count at the end.
    pub fn export_batch(&self, items: &mut [BatchItem]) -> BatchReport {
        let mut outcomes = Vec::with_capacity(items.len());
        for item in items.iter_mut() {
            outcomes.push(self.export(item.region.as_mut(), &item.options));
        }

        let report = BatchReport { outcomes };
        tracing::info!(
            total = report.len(),
            succeeded = report.success_count(),
            "batch export finished"
        );
        self.notifier().notify(
            NoticeLevel::Info,
            &format!("Exported {} of {} reports", report.success_count(), report.len()),
        );
        report
    }
}
