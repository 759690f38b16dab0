use std::future::Future;
use tokio_util::sync::CancellationToken;

use crate::error::ExportError;

/// Drive `work` to completion unless `cancel` fires first.
pub(crate) async fn until_cancelled<F: Future>(
    cancel: &CancellationToken,
    work: F,
) -> Result<F::Output, ExportError> {
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(ExportError::Cancelled),
        output = work => Ok(output),
    }
}
