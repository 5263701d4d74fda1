//! Projects that have been shown to the user, keyed by identifier.
//!
//! Anything listed on screen can be reopened in a detail view even when the
//! query that produced it is no longer reproducible. Entries live until the
//! cache is cleared; there is no eviction.

use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::domain::foundation::ProjectId;
use crate::domain::salic::ReferenceProject;

#[derive(Debug, Default)]
pub struct RecentlyDisplayed {
    entries: RwLock<HashMap<ProjectId, ReferenceProject>>,
}

impl RecentlyDisplayed {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, id: &ProjectId) -> Option<ReferenceProject> {
        self.entries.read().await.get(id).cloned()
    }

    pub async fn insert(&self, project: ReferenceProject) {
        self.entries.write().await.insert(project.id.clone(), project);
    }

    pub async fn insert_all(&self, projects: &[ReferenceProject]) {
        let mut entries = self.entries.write().await;
        for project in projects {
            entries.insert(project.id.clone(), project.clone());
        }
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }
}
