//! Backend commands queued from UI to backend worker.

use std::path::PathBuf;

use shared::domain::AttemptId;

pub enum BackendCommand {
    LoadPreview {
        attempt: AttemptId,
        path: PathBuf,
    },
    SubmitAssessment {
        attempt: AttemptId,
        path: PathBuf,
        filename: String,
        mime_type: String,
        server_url: String,
    },
    FetchResultImage {
        attempt: AttemptId,
        public_path: String,
        server_url: String,
    },
}
