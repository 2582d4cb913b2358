/// Pipeline processing stage, used for progress reporting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PipelineStage {
    Demuxing,
    Enhancing,
    Remuxing,
}

impl std::fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Demuxing => write!(f, "Decoding frames"),
            Self::Enhancing => write!(f, "Enhancing frames"),
            Self::Remuxing => write!(f, "Encoding output"),
        }
    }
}

/// Receives progress from a running enhancement.
///
/// `advance` is called from rayon workers when frames are enhanced in
/// parallel, so implementations must tolerate concurrent calls and counts
/// that arrive slightly out of order.
pub trait ProgressReporter: Send + Sync {
    /// `total_items` is the frame count when the stage knows it up front.
    fn begin_stage(&self, _stage: PipelineStage, _total_items: Option<usize>) {}

    /// Running count of frames finished in the current stage.
    fn advance(&self, _items_done: usize) {}

    fn finish_stage(&self) {}
}

/// Reporter that discards everything.
pub struct NoOpReporter;
impl ProgressReporter for NoOpReporter {}
