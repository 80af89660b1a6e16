//! Create, edit and trash transitions
//!
//! Every transition converts repository faults into one display string.
//! Nothing is retried here; calling a transition again after a failure
//! repeats the request.

use serde::Serialize;
use thiserror::Error;

use crate::article::{Article, ArticleFields, ArticleId, ArticleStatus};
use crate::repository::{ArticleRepository, RepositoryError};
use crate::validation::{validate, ArticleForm, ValidationResult};

pub const CREATE_FAILED_MESSAGE: &str = "Failed to create article";
pub const UPDATE_FAILED_MESSAGE: &str = "Failed to update article";
pub const TRASH_FAILED_MESSAGE: &str = "Failed to move article to trash";

/// Question asked before an article is moved to the trash
pub const TRASH_CONFIRMATION_PROMPT: &str = "Are you sure you want to move this article to trash?";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkflowError {
    /// Field validation failed; nothing was sent
    #[error("{0}")]
    Validation(ValidationResult),

    /// The repository rejected or never answered the request
    #[error("{0}")]
    Repository(String),

    /// The edit flow was entered without an article to edit
    #[error("No article selected for editing")]
    MissingArticle,

    /// New articles start as a draft or published, never in the trash
    #[error("An article cannot be created with status {0}")]
    InvalidCreateStatus(ArticleStatus),
}

impl WorkflowError {
    fn from_repository(err: RepositoryError, fallback: &str) -> Self {
        log::warn!("{fallback}: {err}");
        WorkflowError::Repository(
            err.reported_message()
                .map(str::to_string)
                .unwrap_or_else(|| fallback.to_string()),
        )
    }
}

/// Result of a successful create or update
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkflowOutcome {
    pub title: String,
    pub status: ArticleStatus,
    pub message: String,
    /// The stored article, when the API echoed it back
    pub article: Option<Article>,
}

/// Answer to the trash confirmation prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Confirmed,
    Declined,
}

impl From<bool> for Confirmation {
    fn from(confirmed: bool) -> Self {
        if confirmed {
            Confirmation::Confirmed
        } else {
            Confirmation::Declined
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrashOutcome {
    /// The article was moved; the caller must refresh its article set
    Trashed(ArticleId),
    /// The user declined; nothing was sent
    Cancelled,
}

/// Confirmation text shown after a create
pub fn created_message(title: &str, status: ArticleStatus) -> String {
    let verb = match status {
        ArticleStatus::Publish => "published",
        _ => "saved as draft",
    };
    format!("Article \"{title}\" has been {verb} successfully!")
}

/// Confirmation text shown after an update, whatever the status
pub fn updated_message(title: &str) -> String {
    format!("Article \"{title}\" has been updated successfully!")
}

fn gate(fields: &ArticleFields) -> Result<(), WorkflowError> {
    let result = validate(fields);
    if result.is_valid() {
        Ok(())
    } else {
        Err(WorkflowError::Validation(result))
    }
}

/// Validate and create a new article
pub async fn create<R>(
    repository: &R,
    fields: &ArticleFields,
    status: ArticleStatus,
) -> Result<WorkflowOutcome, WorkflowError>
where
    R: ArticleRepository + ?Sized,
{
    if status == ArticleStatus::Thrash {
        return Err(WorkflowError::InvalidCreateStatus(status));
    }
    gate(fields)?;

    let payload = fields.clone().into_payload(status);
    let article = repository
        .create(&payload)
        .await
        .map_err(|err| WorkflowError::from_repository(err, CREATE_FAILED_MESSAGE))?;

    log::debug!("Created article {:?} as {status}", payload.title);

    Ok(WorkflowOutcome {
        message: created_message(&payload.title, status),
        title: payload.title,
        status,
        article,
    })
}

/// Validate and replace an existing article
pub async fn update<R>(
    repository: &R,
    id: ArticleId,
    fields: &ArticleFields,
    status: ArticleStatus,
) -> Result<WorkflowOutcome, WorkflowError>
where
    R: ArticleRepository + ?Sized,
{
    gate(fields)?;

    let payload = fields.clone().into_payload(status);
    let article = repository
        .update(id, &payload)
        .await
        .map_err(|err| WorkflowError::from_repository(err, UPDATE_FAILED_MESSAGE))?;

    log::debug!("Updated article {id} as {status}");

    Ok(WorkflowOutcome {
        message: updated_message(&payload.title),
        title: payload.title,
        status,
        article,
    })
}

/// Move an article to the trash
///
/// No field changes, so no validation: the stored record is sent back with
/// only its status replaced.
pub async fn trash<R>(
    repository: &R,
    article: &Article,
    confirmation: Confirmation,
) -> Result<TrashOutcome, WorkflowError>
where
    R: ArticleRepository + ?Sized,
{
    if confirmation == Confirmation::Declined {
        return Ok(TrashOutcome::Cancelled);
    }

    repository
        .update(article.id, &article.with_status(ArticleStatus::Thrash))
        .await
        .map_err(|err| WorkflowError::from_repository(err, TRASH_FAILED_MESSAGE))?;

    log::debug!("Moved article {} to trash", article.id);

    Ok(TrashOutcome::Trashed(article.id))
}

/// An article opened for editing
#[derive(Debug, Clone)]
pub struct EditSession {
    article: Article,
    form: ArticleForm,
}

impl EditSession {
    /// Start editing the selected article
    ///
    /// Without a selected article there is nothing to edit; callers redirect
    /// to the listing on `MissingArticle`.
    pub fn open(selected: Option<Article>) -> Result<Self, WorkflowError> {
        let article = selected.ok_or(WorkflowError::MissingArticle)?;
        Ok(Self {
            form: ArticleForm::from_article(&article),
            article,
        })
    }

    pub fn article(&self) -> &Article {
        &self.article
    }

    pub fn form(&self) -> &ArticleForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut ArticleForm {
        &mut self.form
    }

    /// Submit the form as an update of the selected article
    ///
    /// On any failure the form keeps the typed values.
    pub async fn submit<R>(
        &mut self,
        repository: &R,
        status: ArticleStatus,
    ) -> Result<WorkflowOutcome, WorkflowError>
    where
        R: ArticleRepository + ?Sized,
    {
        let payload = self
            .form
            .submit(status)
            .map_err(WorkflowError::Validation)?;
        let fields = ArticleFields::new(payload.title, payload.content, payload.category);
        update(repository, self.article.id, &fields, status).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::memory::{create_test_article, Call, MemoryRepository};
    use crate::validation::{Field, ValidationErrorKind};

    fn valid_fields() -> ArticleFields {
        ArticleFields::new("A".repeat(20), "B".repeat(200), "News")
    }

    #[tokio::test]
    async fn test_create_publish_sends_exact_fields() {
        let repo = MemoryRepository::default();

        let outcome = create(&repo, &valid_fields(), ArticleStatus::Publish)
            .await
            .unwrap();

        let calls = repo.calls();
        assert_eq!(calls.len(), 1);
        let Call::Create(payload) = &calls[0] else {
            panic!("expected a create call, got {:?}", calls[0]);
        };
        assert_eq!(payload.title, "A".repeat(20));
        assert_eq!(payload.content, "B".repeat(200));
        assert_eq!(payload.category, "News");
        assert_eq!(payload.status, ArticleStatus::Publish);
        assert!(outcome.message.contains("published successfully"));
        assert!(outcome.article.is_some());
    }

    #[tokio::test]
    async fn test_create_draft_message() {
        let repo = MemoryRepository::default();

        let outcome = create(&repo, &valid_fields(), ArticleStatus::Draft)
            .await
            .unwrap();

        assert!(outcome.message.contains("saved as draft"));
        assert_eq!(outcome.status, ArticleStatus::Draft);
    }

    #[tokio::test]
    async fn test_create_rejects_thrash_status() {
        let repo = MemoryRepository::default();

        let err = create(&repo, &valid_fields(), ArticleStatus::Thrash)
            .await
            .unwrap_err();

        assert_eq!(err, WorkflowError::InvalidCreateStatus(ArticleStatus::Thrash));
        assert!(repo.calls().is_empty());
    }

    #[tokio::test]
    async fn test_create_invalid_makes_no_call() {
        let repo = MemoryRepository::default();
        let fields = ArticleFields::new("Short", "c".repeat(200), "Tech");

        let err = create(&repo, &fields, ArticleStatus::Publish)
            .await
            .unwrap_err();

        let WorkflowError::Validation(result) = err else {
            panic!("expected a validation error");
        };
        assert_eq!(
            result.get(Field::Title).map(|e| e.kind),
            Some(ValidationErrorKind::TooShort)
        );
        assert!(result.content.is_none());
        assert!(result.category.is_none());
        assert!(repo.calls().is_empty());
    }

    #[tokio::test]
    async fn test_create_surfaces_reported_message() {
        let repo = MemoryRepository::failing(RepositoryError::Api {
            status: 400,
            message: Some("Invalid request data".to_string()),
        });

        let err = create(&repo, &valid_fields(), ArticleStatus::Draft)
            .await
            .unwrap_err();

        assert_eq!(
            err,
            WorkflowError::Repository("Invalid request data".to_string())
        );
    }

    #[tokio::test]
    async fn test_create_falls_back_to_generic_message() {
        let repo = MemoryRepository::failing(RepositoryError::Transport("refused".to_string()));

        let err = create(&repo, &valid_fields(), ArticleStatus::Draft)
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), CREATE_FAILED_MESSAGE);
    }

    #[tokio::test]
    async fn test_create_is_not_retried() {
        let repo = MemoryRepository::failing(RepositoryError::Transport("refused".to_string()));

        let _ = create(&repo, &valid_fields(), ArticleStatus::Draft).await;
        let _ = create(&repo, &valid_fields(), ArticleStatus::Draft).await;

        assert_eq!(repo.calls().len(), 2);
    }

    #[tokio::test]
    async fn test_update_message_ignores_status() {
        let repo =
            MemoryRepository::with_articles(vec![create_test_article(3, ArticleStatus::Draft)]);

        let outcome = update(&repo, ArticleId(3), &valid_fields(), ArticleStatus::Publish)
            .await
            .unwrap();

        assert_eq!(
            outcome.message,
            format!("Article \"{}\" has been updated successfully!", "A".repeat(20))
        );
        assert_eq!(
            repo.calls(),
            vec![Call::Update(
                ArticleId(3),
                valid_fields().into_payload(ArticleStatus::Publish)
            )]
        );
    }

    #[tokio::test]
    async fn test_update_validation_gate() {
        let repo =
            MemoryRepository::with_articles(vec![create_test_article(3, ArticleStatus::Draft)]);
        let fields = ArticleFields::new("A".repeat(20), "B".repeat(200), "ab");

        let err = update(&repo, ArticleId(3), &fields, ArticleStatus::Draft)
            .await
            .unwrap_err();

        assert!(matches!(err, WorkflowError::Validation(_)));
        assert!(repo.calls().is_empty());
    }

    #[tokio::test]
    async fn test_update_failure_fallback() {
        let repo = MemoryRepository::failing(RepositoryError::Api {
            status: 500,
            message: None,
        });

        let err = update(&repo, ArticleId(3), &valid_fields(), ArticleStatus::Draft)
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), UPDATE_FAILED_MESSAGE);
    }

    #[tokio::test]
    async fn test_trash_draft_keeps_fields() {
        let article = create_test_article(8, ArticleStatus::Draft);
        let repo = MemoryRepository::with_articles(vec![article.clone()]);

        let outcome = trash(&repo, &article, Confirmation::Confirmed)
            .await
            .unwrap();

        assert_eq!(outcome, TrashOutcome::Trashed(ArticleId(8)));
        let calls = repo.calls();
        let Call::Update(id, payload) = &calls[0] else {
            panic!("expected an update call, got {:?}", calls[0]);
        };
        assert_eq!(*id, ArticleId(8));
        assert_eq!(payload.title, article.title);
        assert_eq!(payload.content, article.content);
        assert_eq!(payload.category, article.category);
        assert_eq!(payload.status, ArticleStatus::Thrash);
    }

    #[tokio::test]
    async fn test_trash_skips_validation() {
        let mut article = create_test_article(9, ArticleStatus::Publish);
        article.title = "tiny".to_string();
        let repo = MemoryRepository::with_articles(vec![article.clone()]);

        let outcome = trash(&repo, &article, Confirmation::Confirmed)
            .await
            .unwrap();

        assert_eq!(outcome, TrashOutcome::Trashed(ArticleId(9)));
        assert_eq!(repo.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_trash_declined_sends_nothing() {
        let article = create_test_article(8, ArticleStatus::Draft);
        let repo = MemoryRepository::with_articles(vec![article.clone()]);

        let outcome = trash(&repo, &article, Confirmation::from(false))
            .await
            .unwrap();

        assert_eq!(outcome, TrashOutcome::Cancelled);
        assert!(repo.calls().is_empty());
    }

    #[tokio::test]
    async fn test_trash_failure_message() {
        let article = create_test_article(8, ArticleStatus::Draft);
        let repo = MemoryRepository::failing(RepositoryError::Transport("reset".to_string()));

        let err = trash(&repo, &article, Confirmation::Confirmed)
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), TRASH_FAILED_MESSAGE);
    }

    #[test]
    fn test_edit_session_requires_article() {
        assert_eq!(
            EditSession::open(None).unwrap_err(),
            WorkflowError::MissingArticle
        );
    }

    #[tokio::test]
    async fn test_edit_session_submit() {
        let article = create_test_article(4, ArticleStatus::Draft);
        let repo = MemoryRepository::with_articles(vec![article.clone()]);
        let mut session = EditSession::open(Some(article.clone())).unwrap();
        assert_eq!(session.form().fields(), &article.fields());

        session.form_mut().edit(Field::Category, "Announcements");
        let outcome = session
            .submit(&repo, ArticleStatus::Publish)
            .await
            .unwrap();

        assert!(outcome.message.contains("updated successfully"));
        let stored = repo.articles.lock().unwrap()[0].clone();
        assert_eq!(stored.category, "Announcements");
        assert_eq!(stored.status, ArticleStatus::Publish);
    }

    #[tokio::test]
    async fn test_edit_session_keeps_form_on_failure() {
        let article = create_test_article(4, ArticleStatus::Draft);
        let repo = MemoryRepository::failing(RepositoryError::Api {
            status: 404,
            message: Some("Post not found".to_string()),
        });
        let mut session = EditSession::open(Some(article)).unwrap();
        session.form_mut().edit(Field::Title, "A brand new title for the post");

        let err = session
            .submit(&repo, ArticleStatus::Draft)
            .await
            .unwrap_err();

        assert_eq!(err, WorkflowError::Repository("Post not found".to_string()));
        assert_eq!(
            session.form().fields().title,
            "A brand new title for the post"
        );
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            created_message("Hello", ArticleStatus::Publish),
            "Article \"Hello\" has been published successfully!"
        );
        assert_eq!(
            created_message("Hello", ArticleStatus::Draft),
            "Article \"Hello\" has been saved as draft successfully!"
        );
    }
}
