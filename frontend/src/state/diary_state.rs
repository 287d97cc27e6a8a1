//! # Diary State Module
//!
//! The diary list with its inline edit and add drafts.
//!
//! Only one entry is edited at a time. Local state changes only after the
//! service accepts a mutation, so a failed save or delete leaves the list as
//! it was.

use shared::{Diary, DiaryDraft};
use tracing::{error, info, warn};

use crate::error::ApiError;
use crate::services::api::PregnancyApi;
use crate::services::session::SessionContext;

/// Draft for the entry currently being edited
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditDraft {
    pub id: String,
    pub title: String,
    pub content: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DiaryState {
    pub diaries: Vec<Diary>,
    pub editing: Option<EditDraft>,
    pub is_adding: bool,
    pub new_title: String,
    pub new_content: String,
}

impl DiaryState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the list with the service's copy; failures leave it empty
    pub async fn load(&mut self, api: &dyn PregnancyApi, session: &SessionContext) {
        self.diaries = match session.require_token().await {
            Ok(token) => match api.diaries(&token).await {
                Ok(diaries) => {
                    info!("📔 Loaded {} diary entries", diaries.len());
                    diaries
                }
                Err(e) => {
                    error!("Failed to load diaries: {}", e);
                    Vec::new()
                }
            },
            Err(e) => {
                warn!("Cannot load diaries: {}", e);
                Vec::new()
            }
        };
    }

    pub fn find(&self, id: &str) -> Option<&Diary> {
        self.diaries.iter().find(|d| d.id == id)
    }

    pub fn is_editing(&self, id: &str) -> bool {
        self.editing.as_ref().map(|d| d.id == id).unwrap_or(false)
    }

    /// Start editing an entry, replacing any other open edit. Returns false
    /// when the id is unknown.
    pub fn begin_edit(&mut self, id: &str) -> bool {
        match self.find(id) {
            Some(diary) => {
                self.editing = Some(EditDraft {
                    id: diary.id.clone(),
                    title: diary.title.clone(),
                    content: diary.content.clone(),
                });
                true
            }
            None => false,
        }
    }

    pub fn set_edit_title(&mut self, title: impl Into<String>) {
        if let Some(draft) = self.editing.as_mut() {
            draft.title = title.into();
        }
    }

    pub fn set_edit_content(&mut self, content: impl Into<String>) {
        if let Some(draft) = self.editing.as_mut() {
            draft.content = content.into();
        }
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    /// Send the open edit. On success the entry takes the draft's title and
    /// content and the edit closes; on failure the draft stays open.
    pub async fn save_edit(
        &mut self,
        api: &dyn PregnancyApi,
        session: &SessionContext,
    ) -> Result<(), ApiError> {
        let Some(draft) = self.editing.clone() else {
            return Ok(());
        };

        let token = session.require_token().await?;
        let body = DiaryDraft {
            title: draft.title.clone(),
            content: draft.content.clone(),
        };
        if let Err(e) = api.update_diary(&token, &draft.id, &body).await {
            error!("Failed to update diary {}: {}", draft.id, e);
            return Err(e);
        }

        if let Some(entry) = self.diaries.iter_mut().find(|d| d.id == draft.id) {
            entry.title = draft.title;
            entry.content = draft.content;
        }
        self.editing = None;
        Ok(())
    }

    pub async fn delete(
        &mut self,
        api: &dyn PregnancyApi,
        session: &SessionContext,
        id: &str,
    ) -> Result<(), ApiError> {
        let token = session.require_token().await?;
        if let Err(e) = api.delete_diary(&token, id).await {
            error!("Failed to delete diary {}: {}", id, e);
            return Err(e);
        }

        info!("🗑️ Deleted diary {}", id);
        self.diaries.retain(|d| d.id != id);
        if self.is_editing(id) {
            self.editing = None;
        }
        Ok(())
    }

    pub fn begin_add(&mut self) {
        self.is_adding = true;
    }

    pub fn cancel_add(&mut self) {
        self.is_adding = false;
        self.new_title.clear();
        self.new_content.clear();
    }

    /// Create an entry from the add draft. Blank titles or contents are
    /// ignored and return `Ok(None)`.
    pub async fn add(
        &mut self,
        api: &dyn PregnancyApi,
        session: &SessionContext,
    ) -> Result<Option<Diary>, ApiError> {
        if self.new_title.trim().is_empty() || self.new_content.trim().is_empty() {
            return Ok(None);
        }

        let token = session.require_token().await?;
        let draft = DiaryDraft {
            title: self.new_title.clone(),
            content: self.new_content.clone(),
        };
        let created = match api.create_diary(&token, &draft).await {
            Ok(created) => created,
            Err(e) => {
                error!("Failed to add diary: {}", e);
                return Err(e);
            }
        };

        self.diaries.insert(0, created.clone());
        self.cancel_add();
        Ok(Some(created))
    }
}
