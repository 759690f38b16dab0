//! Raw CSV export straight from the analysis service.

use bytes::Bytes;
use log::{error, info, warn};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use wqr_core::repository::SampleRepository;

use crate::cancel::until_cancelled;
use crate::delivery::{FileSink, CSV_MIME};
use crate::error::ExportError;
use crate::notify::{Notification, Notifier};

/// Filename of the tabular export.
pub const CSV_FILENAME: &str = "Water_Analysis_Data.csv";

/// Fetches the CSV export and saves it unchanged.
pub struct TabularExporter {
    repository: Arc<dyn SampleRepository>,
    sink: Arc<dyn FileSink>,
    notifier: Arc<dyn Notifier>,
}

impl TabularExporter {
    pub fn new(
        repository: Arc<dyn SampleRepository>,
        sink: Arc<dyn FileSink>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            repository,
            sink,
            notifier,
        }
    }

    pub async fn export_csv(
        &self,
        filename: &str,
        cancel: &CancellationToken,
    ) -> Result<(), ExportError> {
        self.notifier.notify(Notification::info(
            "Exporting Data",
            "Preparing CSV file...",
        ));
        match self.fetch_and_deliver(filename, cancel).await {
            Ok(()) => {
                self.notifier.notify(Notification::info(
                    "CSV Exported",
                    "Your data has been downloaded.",
                ));
                Ok(())
            }
            Err(e) => {
                error!("CSV export {} failed: {}", filename, e);
                self.notifier.notify(Notification::error(
                    "Export Failed",
                    format!("Could not export CSV: {}", e),
                ));
                Err(e)
            }
        }
    }

    async fn fetch_and_deliver(
        &self,
        filename: &str,
        cancel: &CancellationToken,
    ) -> Result<(), ExportError> {
        let contents = until_cancelled(cancel, self.repository.export_csv()).await??;
        match count_rows(&contents) {
            Some(rows) => info!("CSV export holds {} rows", rows),
            None => warn!("CSV export is not well-formed, saving it unchanged"),
        }
        if cancel.is_cancelled() {
            return Err(ExportError::Cancelled);
        }
        self.sink
            .deliver(filename, CSV_MIME, contents)
            .await
            .map_err(|source| ExportError::Delivery {
                filename: filename.to_string(),
                source,
            })?;
        Ok(())
    }
}

/// Data rows in a CSV body with a header line, or `None` when it does not parse.
fn count_rows(contents: &Bytes) -> Option<usize> {
    let mut reader = csv::Reader::from_reader(contents.as_ref());
    let mut rows = 0;
    for record in reader.records() {
        record.ok()?;
        rows += 1;
    }
    Some(rows)
}
