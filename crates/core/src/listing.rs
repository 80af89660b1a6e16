//! Management listing: status tabs, tab counts and the article snapshot
//!
//! Tab counts must reflect every known article, so they are always computed
//! from the full snapshot, never from a filtered view of it.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::article::{Article, ArticleId, ArticleStatus};
use crate::repository::ArticleRepository;

/// How many articles the management view fetches to obtain "all" of them
pub const MANAGEMENT_FETCH_LIMIT: usize = 100;

/// Message shown when the snapshot cannot be loaded
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch articles";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Tab {
    #[default]
    Published,
    Draft,
    Thrash,
    All,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Published, Tab::Draft, Tab::Thrash, Tab::All];

    pub fn as_str(&self) -> &'static str {
        match self {
            Tab::Published => "published",
            Tab::Draft => "draft",
            Tab::Thrash => "thrash",
            Tab::All => "all",
        }
    }

    /// Status shown by this tab; `None` for the unfiltered tab
    pub fn status(&self) -> Option<ArticleStatus> {
        match self {
            Tab::Published => Some(ArticleStatus::Publish),
            Tab::Draft => Some(ArticleStatus::Draft),
            Tab::Thrash => Some(ArticleStatus::Thrash),
            Tab::All => None,
        }
    }

    pub fn matches(&self, article: &Article) -> bool {
        match self.status() {
            Some(status) => article.status == status,
            None => true,
        }
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tab {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "published" => Ok(Tab::Published),
            "draft" => Ok(Tab::Draft),
            "thrash" => Ok(Tab::Thrash),
            "all" => Ok(Tab::All),
            other => Err(format!(
                "Invalid tab: {other}. Valid tabs: published, draft, thrash, all"
            )),
        }
    }
}

/// Number of articles per status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub published: usize,
    pub draft: usize,
    pub thrash: usize,
}

impl StatusCounts {
    pub fn for_tab(&self, tab: Tab) -> usize {
        match tab {
            Tab::Published => self.published,
            Tab::Draft => self.draft,
            Tab::Thrash => self.thrash,
            Tab::All => self.total(),
        }
    }

    pub fn total(&self) -> usize {
        self.published + self.draft + self.thrash
    }
}

/// Count articles by status
pub fn classify(articles: &[Article]) -> StatusCounts {
    articles
        .iter()
        .fold(StatusCounts::default(), |mut counts, article| {
            match article.status {
                ArticleStatus::Publish => counts.published += 1,
                ArticleStatus::Draft => counts.draft += 1,
                ArticleStatus::Thrash => counts.thrash += 1,
            }
            counts
        })
}

/// Articles shown under a tab, in their original order
pub fn filter_by_tab(articles: &[Article], tab: Tab) -> Vec<Article> {
    articles
        .iter()
        .filter(|article| tab.matches(article))
        .cloned()
        .collect()
}

/// What the management view renders for one tab
#[derive(Debug, Clone, Serialize)]
pub struct ListingOutput {
    pub tab: String,
    pub counts: StatusCounts,
    pub articles: Vec<Article>,
}

/// Snapshot of the article set held by the management view
///
/// The snapshot is only ever replaced as a whole. Mutations elsewhere call
/// [`ArticleBoard::invalidate`] and the next [`ArticleBoard::refresh`] fetches
/// the current server state again.
#[derive(Debug, Clone, Default)]
pub struct ArticleBoard {
    snapshot: Option<Vec<Article>>,
}

impl ArticleBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_articles(articles: Vec<Article>) -> Self {
        Self {
            snapshot: Some(articles),
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.snapshot.is_some()
    }

    pub fn articles(&self) -> &[Article] {
        self.snapshot.as_deref().unwrap_or_default()
    }

    /// Replace the snapshot with a fresh fetch
    ///
    /// On failure the board is left empty and the fixed fetch error is
    /// returned. Calling `refresh` again is the retry.
    pub async fn refresh<R>(&mut self, repository: &R) -> Result<&[Article], String>
    where
        R: ArticleRepository + ?Sized,
    {
        self.snapshot = None;
        match repository.list(MANAGEMENT_FETCH_LIMIT, 0).await {
            Ok(articles) => {
                log::debug!("Loaded {} articles into the board", articles.len());
                let articles: &[Article] = self.snapshot.insert(articles);
                Ok(articles)
            }
            Err(err) => {
                log::warn!("Error fetching articles: {err}");
                Err(FETCH_FAILED_MESSAGE.to_string())
            }
        }
    }

    pub fn invalidate(&mut self) {
        self.snapshot = None;
    }

    pub fn counts(&self) -> StatusCounts {
        classify(self.articles())
    }

    pub fn view(&self, tab: Tab) -> Vec<Article> {
        filter_by_tab(self.articles(), tab)
    }

    pub fn find(&self, id: ArticleId) -> Option<&Article> {
        self.articles().iter().find(|article| article.id == id)
    }

    pub fn listing(&self, tab: Tab) -> ListingOutput {
        ListingOutput {
            tab: tab.to_string(),
            counts: self.counts(),
            articles: self.view(tab),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::memory::{create_test_article, Call, MemoryRepository};
    use crate::repository::RepositoryError;

    fn mixed_articles() -> Vec<Article> {
        vec![
            create_test_article(1, ArticleStatus::Publish),
            create_test_article(2, ArticleStatus::Draft),
            create_test_article(3, ArticleStatus::Publish),
            create_test_article(4, ArticleStatus::Thrash),
            create_test_article(5, ArticleStatus::Draft),
            create_test_article(6, ArticleStatus::Publish),
        ]
    }

    fn ids(articles: &[Article]) -> Vec<u64> {
        articles.iter().map(|a| a.id.0).collect()
    }

    #[test]
    fn test_classify() {
        let counts = classify(&mixed_articles());

        assert_eq!(counts.published, 3);
        assert_eq!(counts.draft, 2);
        assert_eq!(counts.thrash, 1);
        assert_eq!(counts.total(), 6);
    }

    #[test]
    fn test_classify_empty() {
        assert_eq!(classify(&[]), StatusCounts::default());
    }

    #[test]
    fn test_filter_published_preserves_order() {
        let published = filter_by_tab(&mixed_articles(), Tab::Published);
        assert_eq!(ids(&published), vec![1, 3, 6]);
    }

    #[test]
    fn test_filter_each_tab() {
        let articles = mixed_articles();
        assert_eq!(ids(&filter_by_tab(&articles, Tab::Draft)), vec![2, 5]);
        assert_eq!(ids(&filter_by_tab(&articles, Tab::Thrash)), vec![4]);
        assert_eq!(
            ids(&filter_by_tab(&articles, Tab::All)),
            vec![1, 2, 3, 4, 5, 6]
        );
    }

    #[test]
    fn test_filter_is_idempotent() {
        let once = filter_by_tab(&mixed_articles(), Tab::Published);
        let twice = filter_by_tab(&once, Tab::Published);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_tab_parse() {
        assert_eq!("published".parse::<Tab>().unwrap(), Tab::Published);
        assert_eq!("all".parse::<Tab>().unwrap(), Tab::All);
        assert!("publish".parse::<Tab>().is_err());
        assert_eq!(Tab::default(), Tab::Published);
    }

    #[test]
    fn test_counts_for_tab() {
        let counts = classify(&mixed_articles());
        assert_eq!(counts.for_tab(Tab::Published), 3);
        assert_eq!(counts.for_tab(Tab::All), 6);
    }

    #[tokio::test]
    async fn test_board_refresh_fetches_management_bound() {
        let repo = MemoryRepository::with_articles(mixed_articles());
        let mut board = ArticleBoard::new();

        let loaded = board.refresh(&repo).await.unwrap().len();

        assert_eq!(loaded, 6);
        assert_eq!(
            repo.calls(),
            vec![Call::List {
                limit: MANAGEMENT_FETCH_LIMIT,
                offset: 0
            }]
        );
    }

    #[tokio::test]
    async fn test_board_counts_use_full_snapshot() {
        let repo = MemoryRepository::with_articles(mixed_articles());
        let mut board = ArticleBoard::new();
        board.refresh(&repo).await.unwrap();

        let listing = board.listing(Tab::Draft);

        assert_eq!(listing.articles.len(), 2);
        assert_eq!(listing.counts.published, 3);
        assert_eq!(listing.counts.thrash, 1);
        assert_eq!(listing.tab, "draft");
    }

    #[tokio::test]
    async fn test_board_refresh_failure() {
        let repo = MemoryRepository::failing(RepositoryError::Transport("down".to_string()));
        let mut board = ArticleBoard::from_articles(mixed_articles());

        let err = board.refresh(&repo).await.unwrap_err();

        assert_eq!(err, FETCH_FAILED_MESSAGE);
        assert!(!board.is_loaded());
        assert!(board.articles().is_empty());
    }

    #[tokio::test]
    async fn test_board_refresh_replaces_snapshot() {
        let repo = MemoryRepository::with_articles(vec![create_test_article(
            10,
            ArticleStatus::Draft,
        )]);
        let mut board = ArticleBoard::from_articles(mixed_articles());

        board.refresh(&repo).await.unwrap();

        assert_eq!(ids(board.articles()), vec![10]);
        assert!(board.find(ArticleId(1)).is_none());
    }

    #[test]
    fn test_board_invalidate() {
        let mut board = ArticleBoard::from_articles(mixed_articles());
        assert!(board.find(ArticleId(4)).is_some());

        board.invalidate();

        assert!(!board.is_loaded());
        assert_eq!(board.counts(), StatusCounts::default());
    }
}
