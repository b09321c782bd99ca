use crate::app::state::log::LogLine;

/// Transcript rows already wrapped for one console width. Valid while both the width and the
/// transcript version match.
pub struct WrappedLogCache {
    pub width: usize,
    pub log_version: u64,
    pub wrapped: Vec<LogLine>,
}

impl WrappedLogCache {
    pub fn is_valid_for(&self, width: usize, log_version: u64) -> bool {
        self.width == width && self.log_version == log_version
    }
}
