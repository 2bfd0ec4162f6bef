use async_trait::async_trait;
use medialib_entity::sea_orm_active_enums::{ParserStep, TaskStatus};
use medialib_errors::ParserError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceName {
    MetadataExtraction,
    MetadataAnalysis,
    Linking,
}

impl ServiceName {
    pub fn step(self) -> ParserStep {
        match self {
            Self::MetadataExtraction => ParserStep::MetadataExtraction,
            Self::MetadataAnalysis => ParserStep::MetadataAnalysis,
            Self::Linking => ParserStep::Linking,
        }
    }
}

/// One named service in the pipeline (§4.4). Implementations are injected
/// by the host (`add_parser_service`); this crate ships none, matching the
/// Non-goal that concrete decoders/extractors are external collaborators.
#[async_trait]
pub trait ParserService: Send + Sync {
    fn name(&self) -> ServiceName;

    /// Declared native thread count, clamped by the pipeline to hardware
    /// parallelism.
    fn worker_count(&self) -> usize {
        1
    }

    /// Runs this service's step against one (media, file) pair. Must
    /// respect the wall-clock timeout contract (§5): long-running external
    /// calls (decoders, thumbnailers) should return `TemporaryUnavailable`
    /// rather than block indefinitely.
    async fn run(&self, media_id: i32, file_id: i32) -> Result<TaskStatus, ParserError>;
}
