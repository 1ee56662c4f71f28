//! Single-report export pipeline
//!
//! The pipeline is strictly sequential: validate the region, capture it
//! under the compact-layout scope, paginate the raster, assemble the PDF,
//! deliver it. Any error is caught at the top, logged, reported through the
//! notifier, and returned as a failed outcome; the compact-layout
//! adjustment is reverted on every path.

use capture::{CompactLayoutScope, RasterImage, RenderRegion};
use chrono::{NaiveDate, NaiveTime, Utc};
use page_layout::{PageGeometry, PaginationPlan};
use serde::Serialize;
use store::pdf::{DocumentMetadata, ImageXObject, ReportDocument, ReportPage};
use store::{AppSettings, OutputSink};

use crate::{
    report_file_name, ExportError, ExportOptions, NoticeLevel, Notifier, Result,
    DEFAULT_SUBJECT, PDF_CREATOR,
};

/// Result of one export call.
///
/// Failures carry a human-readable description only; no structured error
/// crosses this boundary.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportOutcome {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ExportOutcome {
    pub(crate) fn succeeded(file_name: String) -> Self {
        Self {
            success: true,
            file_name: Some(file_name),
            error: None,
        }
    }

    pub(crate) fn failed(error: &ExportError) -> Self {
        Self {
            success: false,
            file_name: None,
            error: Some(error.to_string()),
        }
    }
}

/// Exports report regions as paginated A4 PDFs.
pub struct ReportExporter {
    settings: AppSettings,
    geometry: PageGeometry,
    sink: Box<dyn OutputSink>,
    notifier: Box<dyn Notifier>,
    export_date: NaiveDate,
}

impl ReportExporter {
    pub fn new(
        settings: AppSettings,
        sink: Box<dyn OutputSink>,
        notifier: Box<dyn Notifier>,
    ) -> Self {
        Self {
            settings,
            geometry: PageGeometry::a4(),
            sink,
            notifier,
            export_date: Utc::now().date_naive(),
        }
    }

    /// Pin the date used in filenames and document metadata.
    pub fn with_export_date(mut self, date: NaiveDate) -> Self {
        self.export_date = date;
        self
    }

    pub(crate) fn notifier(&self) -> &dyn Notifier {
        self.notifier.as_ref()
    }

    /// Export one report region.
    pub fn export(&self, region: &mut dyn RenderRegion, options: &ExportOptions) -> ExportOutcome {
        match self.run(region, options) {
            Ok(file_name) => {
                tracing::info!(student = %options.student_name, file = %file_name, "report exported");
                self.notifier.notify(
                    NoticeLevel::Success,
                    &format!("Report exported as {file_name}"),
                );
                ExportOutcome::succeeded(file_name)
            }
            Err(err) => {
                tracing::error!(student = %options.student_name, "report export failed: {err}");
                self.notifier.notify(
                    NoticeLevel::Error,
                    "Report export failed. Please try again.",
                );
                ExportOutcome::failed(&err)
            }
        }
    }

    fn run(&self, region: &mut dyn RenderRegion, options: &ExportOptions) -> Result<String> {
        let (width, height) = region.dimensions();
        if !region.is_attached() || width == 0 || height == 0 {
            return Err(ExportError::InvalidInput);
        }

        // The region is captured under the compact-layout scope and released
        // as soon as the raster exists; assembly works on the copy.
        let raster = {
            let mut scope = CompactLayoutScope::enter(region)?;
            scope.region().rasterize(options.tier.scale())?
        };

        let plan = PaginationPlan::compute(raster.width(), raster.height(), &self.geometry)?;
        let document = self.assemble(&raster, &plan, options)?;
        let bytes = document.to_bytes()?;

        let file_name = report_file_name(&options.student_name, options.tier, self.export_date);
        self.sink.deliver(&file_name, &bytes)?;
        Ok(file_name)
    }

    fn assemble(
        &self,
        raster: &RasterImage,
        plan: &PaginationPlan,
        options: &ExportOptions,
    ) -> Result<ReportDocument> {
        let title = options
            .title
            .clone()
            .unwrap_or_else(|| format!("{} Progress Report", options.student_name));
        let author = options
            .author
            .clone()
            .unwrap_or_else(|| self.settings.organization.name.clone());
        let subject = options
            .subject
            .clone()
            .unwrap_or_else(|| DEFAULT_SUBJECT.to_string());

        let metadata = DocumentMetadata {
            title,
            subject,
            author,
            creator: PDF_CREATOR.to_string(),
            keywords: options.keywords(),
            creation_date: Some(
                self.export_date.and_time(NaiveTime::MIN).and_utc(),
            ),
        };

        let (x_mm, y_mm) = plan.origin_mm(&self.geometry);
        let mut pages = Vec::with_capacity(plan.page_count());
        for slice in &plan.slices {
            let band = raster.slice_rows(slice.source_top, slice.source_height)?;
            pages.push(ReportPage {
                image: ImageXObject::from_raster(&band)?,
                x_mm,
                y_mm,
                width_mm: plan.placement.target_width_mm,
                height_mm: slice.height_mm,
            });
        }

        Ok(ReportDocument {
            geometry: self.geometry,
            metadata,
            pages,
        })
    }
}
