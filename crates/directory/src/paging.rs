//! Page-token accumulation shared by every Directory API list call.

use std::future::Future;

use gmr_core::error::Result;
use tracing::debug;

use crate::models::{DirectoryGroup, DirectoryGroupList, DirectoryMember, DirectoryMemberList};

/// One page returned by a paginated list endpoint.
pub trait Page {
    type Item;

    /// Split the page into its items, in server order, and the continuation token.
    fn into_parts(self) -> (Vec<Self::Item>, Option<String>);
}

impl Page for DirectoryGroupList {
    type Item = DirectoryGroup;

    fn into_parts(self) -> (Vec<DirectoryGroup>, Option<String>) {
        (self.groups.unwrap_or_default(), self.next_page_token)
    }
}

impl Page for DirectoryMemberList {
    type Item = DirectoryMember;

    fn into_parts(self) -> (Vec<DirectoryMember>, Option<String>) {
        (self.members.unwrap_or_default(), self.next_page_token)
    }
}

/// Call `fetch_page` until the server stops returning a continuation token,
/// concatenating every page's items.
///
/// The first call receives `None`. A missing or empty token ends the loop.
/// The first error is returned as-is and nothing fetched so far is kept.
/// Items are neither sorted nor deduplicated.
pub async fn collect_pages<P, F, Fut>(mut fetch_page: F) -> Result<Vec<P::Item>>
where
    P: Page,
    F: FnMut(Option<String>) -> Fut,
    Fut: Future<Output = Result<P>>,
{
    let mut items = Vec::new();
    let mut page_token: Option<String> = None;
    let mut pages = 0usize;

    loop {
        let page = fetch_page(page_token.take()).await?;
        pages += 1;

        let (page_items, next_token) = page.into_parts();
        debug!(page = pages, items = page_items.len(), "fetched page");
        items.extend(page_items);

        match next_token {
            Some(token) if !token.is_empty() => page_token = Some(token),
            _ => break,
        }
    }

    Ok(items)
}
