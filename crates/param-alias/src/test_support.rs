use std::sync::Mutex;

use crate::notice::{DeprecationNotice, DeprecationReporter};

/// Reporter collecting notices for assertions.
#[derive(Default)]
pub(crate) struct Collect(Mutex<Vec<DeprecationNotice>>);

impl Collect {
    pub(crate) fn notices(&self) -> Vec<DeprecationNotice> {
        self.0.lock().unwrap().clone()
    }
}

impl DeprecationReporter for Collect {
    fn report(&self, notice: &DeprecationNotice) {
        self.0.lock().unwrap().push(notice.clone());
    }
}
