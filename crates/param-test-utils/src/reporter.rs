//! Reporter recording notices in memory

use std::sync::Mutex;

use param_alias::{DeprecationNotice, DeprecationReporter};

/// Collects every notice it receives.
#[derive(Debug, Default)]
pub struct RecordingReporter {
    notices: Mutex<Vec<DeprecationNotice>>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the notices received so far.
    pub fn notices(&self) -> Vec<DeprecationNotice> {
        self.notices.lock().expect("reporter mutex poisoned").clone()
    }

    /// Rendered messages of the notices received so far.
    pub fn messages(&self) -> Vec<String> {
        self.notices().iter().map(ToString::to_string).collect()
    }

    pub fn len(&self) -> usize {
        self.notices.lock().expect("reporter mutex poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl DeprecationReporter for RecordingReporter {
    fn report(&self, notice: &DeprecationNotice) {
        self.notices
            .lock()
            .expect("reporter mutex poisoned")
            .push(notice.clone());
    }
}
