//! Test data upload.

use tracing::{debug, error, info, warn};

use pt_client::{CompositionService, IngestionService, UploadFile};
use pt_core::CurveDataset;

use crate::composer::ComparisonComposer;
use crate::error::{WorkflowError, WorkflowResult};
use crate::feedback::{Feedback, NO_FILE_SELECTED, Notice, UPLOAD_DONE, UPLOAD_ERROR, UPLOAD_FAILED};
use crate::presenter::RenderSurface;
use crate::state::ActionKind;
use crate::workflow::Context;

pub struct TestDataImporter<I> {
    service: I,
}

impl<I: IngestionService> TestDataImporter<I> {
    pub fn new(service: I) -> Self {
        Self { service }
    }

    pub fn service(&self) -> &I {
        &self.service
    }

    /// Upload the selected file and refresh the comparison with the parsed curve.
    ///
    /// `None` means no file was selected: that fails locally, before any request.
    pub async fn import_file<S, F, M>(
        &self,
        file: Option<&UploadFile>,
        ctx: Context<'_, S, F>,
        composer: &ComparisonComposer<M>,
    ) -> WorkflowResult<CurveDataset>
    where
        S: RenderSurface,
        F: Feedback,
        M: CompositionService,
    {
        let Some(file) = file else {
            warn!("upload requested without a file");
            ctx.feedback.notify(Notice::error(NO_FILE_SELECTED));
            return Err(WorkflowError::LocalValidation(NO_FILE_SELECTED.to_string()));
        };

        let token = ctx.state.borrow_mut().issue(ActionKind::Import);
        debug!(seq = token.seq(), file = %file.file_name, "test file submitted");

        let result = self
            .service
            .upload_test_file(file)
            .await
            .map_err(WorkflowError::from);

        if !ctx.state.borrow().is_latest(token) {
            debug!(seq = token.seq(), "dropping superseded upload result");
            return Err(WorkflowError::Stale(ActionKind::Import));
        }

        match result {
            Ok(dataset) => {
                ctx.state.borrow_mut().record_test_import(dataset.clone());
                info!(seq = token.seq(), samples = dataset.len(), "test data imported");
                ctx.feedback.notify(Notice::info(UPLOAD_DONE));
                composer.refresh(ctx).await;
                Ok(dataset)
            }
            Err(err) => {
                match &err {
                    WorkflowError::RemoteRejection { .. } => warn!(error = %err, "upload rejected"),
                    _ => error!(error = %err, "upload request failed"),
                }
                ctx.feedback.notify(Notice::failure(
                    UPLOAD_FAILED,
                    err.server_message(),
                    UPLOAD_ERROR,
                ));
                Err(err)
            }
        }
    }
}
