//! Public preview pagination
//!
//! The article API filters nothing by status, so every batch it returns is
//! re-filtered to published articles here. The total page count comes from a
//! second, much larger fetch starting at offset 0.

use serde::Serialize;

use crate::article::{Article, ArticleStatus};
use crate::listing::FETCH_FAILED_MESSAGE;
use crate::repository::{ArticleRepository, RepositoryError};

/// Articles per preview page
pub const PREVIEW_PAGE_SIZE: usize = 5;

/// Size of the fetch used to count published articles.
///
/// Stands in for "all articles": once the backend holds more than this many
/// articles the page total undercounts.
pub const PREVIEW_COUNT_BOUND: usize = 1000;

/// Offset of the first item of a 1-indexed page
pub fn page_offset(page: usize, page_size: usize) -> usize {
    page.saturating_sub(1) * page_size
}

/// Number of pages needed for `count` items
///
/// Never returns 0: an empty collection still has one (empty) page so the
/// navigation controls stay renderable.
pub fn total_pages(count: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 1;
    }
    count.div_ceil(page_size).max(1)
}

/// Calculate slice bounds for a given page of `total_items`
///
/// Returns (start_index, end_index). Pages past the end yield an empty range.
pub fn page_bounds(total_items: usize, page: usize, page_size: usize) -> (usize, usize) {
    let start = page_offset(page, page_size).min(total_items);
    let end = (start + page_size).min(total_items);
    (start, end)
}

/// Navigation state of the preview
///
/// Every navigation action clamps to `[1, total_pages]`, so an out-of-range
/// page can never be requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pager {
    current_page: usize,
    total_pages: usize,
}

impl Pager {
    pub fn new(current_page: usize, total_pages: usize) -> Self {
        let total_pages = total_pages.max(1);
        Self {
            current_page: current_page.clamp(1, total_pages),
            total_pages,
        }
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    pub fn previous(&mut self) -> usize {
        self.jump(self.current_page.saturating_sub(1))
    }

    pub fn next(&mut self) -> usize {
        self.jump(self.current_page.saturating_add(1))
    }

    pub fn jump(&mut self, page: usize) -> usize {
        self.current_page = page.clamp(1, self.total_pages);
        self.current_page
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    /// Page numbers offered by the jump-to-page control
    pub fn pages(&self) -> std::ops::RangeInclusive<usize> {
        1..=self.total_pages
    }

    pub fn offset(&self, page_size: usize) -> usize {
        page_offset(self.current_page, page_size)
    }
}

/// Pagination metadata for the preview output
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaginationInfo {
    pub current_page: usize,
    pub total_pages: usize,
    pub total_published: usize,
    pub limit: usize,
    pub next_page_command: Option<String>,
    pub prev_page_command: Option<String>,
}

/// One page of the public preview
#[derive(Debug, Clone, Serialize)]
pub struct PreviewPage {
    pub articles: Vec<Article>,
    pub pagination: PaginationInfo,
}

fn published_only(batch: Vec<Article>) -> Vec<Article> {
    batch
        .into_iter()
        .filter(|article| article.status == ArticleStatus::Publish)
        .collect()
}

/// Build a preview page from the two batches fetched for it
///
/// `page_batch` is what the API returned for the page offset, `count_batch`
/// what it returned for the large count fetch. Both are re-filtered to
/// published articles.
pub fn build_preview_page(
    page_batch: Vec<Article>,
    count_batch: Vec<Article>,
    page: usize,
    page_size: usize,
) -> PreviewPage {
    let total_published = published_only(count_batch).len();
    let pager = Pager::new(page, total_pages(total_published, page_size));

    let next_page = pager
        .has_next()
        .then(|| format!("blogdesk preview --page {}", pager.current_page() + 1));
    let prev_page = pager
        .has_previous()
        .then(|| format!("blogdesk preview --page {}", pager.current_page() - 1));

    PreviewPage {
        articles: published_only(page_batch),
        pagination: PaginationInfo {
            current_page: pager.current_page(),
            total_pages: pager.total_pages(),
            total_published,
            limit: page_size,
            next_page_command: next_page,
            prev_page_command: prev_page,
        },
    }
}

/// Fetch one preview page
///
/// The count fetch runs first so the requested page can be clamped to the
/// known range before the page itself is requested.
pub async fn fetch_preview_page<R>(
    repository: &R,
    page: usize,
    page_size: usize,
) -> Result<PreviewPage, RepositoryError>
where
    R: ArticleRepository + ?Sized,
{
    let count_batch = repository.list(PREVIEW_COUNT_BOUND, 0).await?;
    let published = count_batch
        .iter()
        .filter(|article| article.status == ArticleStatus::Publish)
        .count();
    let pager = Pager::new(page, total_pages(published, page_size));

    let page_batch = repository
        .list(page_size, pager.offset(page_size))
        .await?;

    log::debug!(
        "Preview page {}/{}: {} items in page batch, {} in count batch",
        pager.current_page(),
        pager.total_pages(),
        page_batch.len(),
        count_batch.len()
    );

    Ok(build_preview_page(
        page_batch,
        count_batch,
        pager.current_page(),
        page_size,
    ))
}

/// Fetch one preview page for display
///
/// Any repository fault becomes the fixed fetch error, the same one the
/// management listing shows. Calling it again is the retry.
pub async fn load_preview_page<R>(
    repository: &R,
    page: usize,
    page_size: usize,
) -> Result<PreviewPage, String>
where
    R: ArticleRepository + ?Sized,
{
    fetch_preview_page(repository, page, page_size)
        .await
        .map_err(|err| {
            log::warn!("Error fetching preview page {page}: {err}");
            FETCH_FAILED_MESSAGE.to_string()
        })
}
