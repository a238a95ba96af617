use std::{
    collections::HashMap,
    sync::{Arc, Mutex as StdMutex},
};

use tokio::sync::Mutex;

/// One async mutex per project name.
///
/// Submissions that resolve to the same project run their stage-and-check
/// section to completion before the next begins; submissions for
/// different projects proceed independently.
#[derive(Default)]
pub struct ProjectLocks {
    inner: StdMutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl ProjectLocks {
    #[must_use]
    pub fn lock_for(&self, project: &str) -> Arc<Mutex<()>> {
        let mut map = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        Arc::clone(map.entry(project.to_string()).or_default())
    }
}
