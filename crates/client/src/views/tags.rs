//! Tag management view.

use thoughtcache_core::fields::normalize_optional_text;
use thoughtcache_core::tags::{normalize_tag_name, validate_color, validate_tag_name};
use thoughtcache_core::types::DbId;

use crate::error::ClientError;
use crate::session::Session;
use crate::types::{Tag, TagChanges};

#[derive(Debug, Default)]
pub struct TagsView {
    tags: Vec<Tag>,
}

impl TagsView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    pub async fn refresh(&mut self, session: &Session) -> Result<(), ClientError> {
        match session.api().list_tags().await {
            Ok(tags) => {
                self.tags = tags;
                Ok(())
            }
            Err(e) => {
                session.report("load tags", &e);
                Err(e)
            }
        }
    }

    /// Create a tag, then reload the list from the server.
    ///
    /// Blank names are rejected without a request.
    pub async fn create(
        &mut self,
        session: &Session,
        name: &str,
        color: Option<&str>,
    ) -> Result<Tag, ClientError> {
        let result = async {
            let name = normalize_tag_name(name);
            if name.is_empty() {
                return Err(ClientError::Validation("Please enter a tag name".into()));
            }
            validate_tag_name(&name)?;
            let color = normalize_optional_text(color);
            if let Some(color) = &color {
                validate_color(color)?;
            }
            let tag = session.api().create_tag(&name, color.as_deref()).await?;
            Ok::<_, ClientError>(tag)
        }
        .await;

        match result {
            Ok(tag) => {
                session.notify_success("Tag created successfully!");
                self.refresh(session).await?;
                Ok(tag)
            }
            Err(e) => {
                session.report("create tag", &e);
                Err(e)
            }
        }
    }

    pub async fn rename(
        &mut self,
        session: &Session,
        id: DbId,
        name: &str,
    ) -> Result<Tag, ClientError> {
        let name = normalize_tag_name(name);
        if let Err(e) = validate_tag_name(&name) {
            let err = ClientError::from(e);
            session.report("rename tag", &err);
            return Err(err);
        }

        let changes = TagChanges {
            name: Some(name),
            color: None,
        };
        match session.api().update_tag(id, &changes).await {
            Ok(tag) => {
                self.refresh(session).await?;
                Ok(tag)
            }
            Err(e) => {
                session.report("rename tag", &e);
                Err(e)
            }
        }
    }

    pub async fn delete(&mut self, session: &Session, id: DbId) -> Result<(), ClientError> {
        match session.api().delete_tag(id).await {
            Ok(()) => {
                session.notify_success("Tag deleted");
                self.refresh(session).await
            }
            Err(e) => {
                session.report("delete tag", &e);
                Err(e)
            }
        }
    }
}
