//! Catalog list screen: search, paging, and the pager links.

use cycle_bazaar_client::ApiClient;
use cycle_bazaar_client::types::Cycle;
use cycle_bazaar_core::ViewState;
use tracing::instrument;

/// Stable, deep-linkable pager state. Pages are 1-indexed and the page
/// count never drops below 1, even for an empty catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pager {
    pub page: u32,
    pub pages: u32,
}

impl Pager {
    #[must_use]
    pub const fn new(page: u32, pages: u32) -> Self {
        let pages = if pages == 0 { 1 } else { pages };
        let page = if page == 0 { 1 } else { page };
        Self { page, pages }
    }

    /// One link per page, in order, with the current page marked active.
    #[must_use]
    pub fn links(&self, keyword: Option<&str>) -> Vec<PageLink> {
        (1..=self.pages)
            .map(|number| PageLink {
                number,
                href: match keyword {
                    Some(keyword) => format!("/search/{keyword}/page/{number}"),
                    None => format!("/page/{number}"),
                },
                active: number == self.page,
            })
            .collect()
    }
}

/// One pager entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLink {
    pub number: u32,
    pub href: String,
    pub active: bool,
}

/// The successful state of the catalog screen.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogPage {
    pub cycles: Vec<Cycle>,
    pub pager: Pager,
}

/// Catalog list screen view model.
pub struct CatalogView {
    api: ApiClient,
    keyword: Option<String>,
    pub state: ViewState<CatalogPage>,
}

impl CatalogView {
    #[must_use]
    pub const fn new(api: ApiClient) -> Self {
        Self {
            api,
            keyword: None,
            state: ViewState::Loading,
        }
    }

    /// The keyword of the most recent load, for the heading and pager
    /// links.
    #[must_use]
    pub fn keyword(&self) -> Option<&str> {
        self.keyword.as_deref()
    }

    /// Fetch one page of the catalog. Runs on mount and on every
    /// keyword/page parameter change.
    #[instrument(skip(self))]
    pub async fn load(&mut self, keyword: Option<&str>, page_number: u32) {
        self.state = ViewState::Loading;
        self.keyword = keyword.map(ToString::to_string);

        self.state = match self.api.list_cycles(keyword, page_number.max(1)).await {
            Ok(page) => ViewState::Ready(CatalogPage {
                cycles: page.cycles,
                pager: Pager::new(page.page, page.pages),
            }),
            Err(e) => ViewState::Error(e.to_string()),
        };
    }

    /// The pager links for the current state, empty until loaded.
    #[must_use]
    pub fn page_links(&self) -> Vec<PageLink> {
        self.state
            .ready()
            .map(|page| page.pager.links(self.keyword()))
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pager_never_reports_less_than_one_page() {
        let pager = Pager::new(0, 0);
        assert_eq!(pager.page, 1);
        assert_eq!(pager.pages, 1);
        assert_eq!(pager.links(None).len(), 1);
    }

    #[test]
    fn links_are_one_indexed_and_stable() {
        let pager = Pager::new(2, 3);
        let links = pager.links(None);
        assert_eq!(links.len(), 3);
        assert_eq!(links.first().map(|l| l.href.as_str()), Some("/page/1"));
        assert_eq!(links.last().map(|l| l.href.as_str()), Some("/page/3"));
        assert_eq!(
            links.iter().filter(|l| l.active).map(|l| l.number).collect::<Vec<_>>(),
            vec![2]
        );
    }

    #[test]
    fn keyword_links_keep_the_search_path() {
        let pager = Pager::new(1, 2);
        let links = pager.links(Some("hero"));
        assert_eq!(
            links.first().map(|l| l.href.as_str()),
            Some("/search/hero/page/1")
        );
    }
}
