//! Typed reqwest wrapper for the Google Admin Directory groups API.

use gmr_core::error::{ReportError, Result};
use tracing::debug;

use crate::auth::GoogleAuth;
use crate::models::{DirectoryGroup, DirectoryGroupList, DirectoryMember, DirectoryMemberList};
use crate::paging::collect_pages;

const GOOGLE_ADMIN_API_BASE: &str = "https://admin.googleapis.com";

/// HTTP client for read-only Directory API group and membership listing.
pub struct DirectoryClient {
    http: reqwest::Client,
    base_url: String,
    auth: GoogleAuth,
}

impl DirectoryClient {
    /// Create a new client that authorizes every request through `auth`.
    pub fn new(auth: GoogleAuth) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: GOOGLE_ADMIN_API_BASE.to_string(),
            auth,
        }
    }

    /// Override the base URL (for testing with wiremock).
    pub fn with_base_url(mut self, url: &str) -> Self {
        self.base_url = url.to_string();
        self
    }

    fn groups_url(&self) -> String {
        format!("{}/admin/directory/v1/groups", self.base_url)
    }

    /// The group key is pushed as a single percent-encoded path segment.
    fn members_url(&self, group_key: &str) -> Result<reqwest::Url> {
        let mut url = reqwest::Url::parse(&self.base_url)
            .map_err(|e| ReportError::Config(format!("invalid base URL: {e}")))?;
        url.path_segments_mut()
            .map_err(|_| ReportError::Config(format!("invalid base URL: {}", self.base_url)))?
            .pop_if_empty()
            .extend(["admin", "directory", "v1", "groups", group_key, "members"]);
        Ok(url)
    }

    /// Fetch one page of groups belonging to `domain`.
    pub async fn list_groups(
        &self,
        domain: &str,
        page_token: Option<&str>,
    ) -> Result<DirectoryGroupList> {
        let token = self.auth.token().await?;
        let mut req = self
            .http
            .get(self.groups_url())
            .bearer_auth(token)
            .query(&[("domain", domain)]);

        if let Some(page_token) = page_token {
            req = req.query(&[("pageToken", page_token)]);
        }

        let resp = req
            .send()
            .await
            .map_err(|e| ReportError::Directory(format!("list groups request failed: {e}")))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(ReportError::Directory(format!(
                "list groups failed ({status}): {body}"
            )));
        }

        resp.json::<DirectoryGroupList>()
            .await
            .map_err(|e| ReportError::Directory(format!("list groups parse failed: {e}")))
    }

    /// Fetch one page of members of the group identified by `group_key`.
    pub async fn list_members(
        &self,
        group_key: &str,
        page_token: Option<&str>,
    ) -> Result<DirectoryMemberList> {
        let token = self.auth.token().await?;
        let url = self.members_url(group_key)?;
        let mut req = self.http.get(url).bearer_auth(token);

        if let Some(page_token) = page_token {
            req = req.query(&[("pageToken", page_token)]);
        }

        let resp = req
            .send()
            .await
            .map_err(|e| ReportError::Directory(format!("list members request failed: {e}")))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(ReportError::Directory(format!(
                "list members of {group_key} failed ({status}): {body}"
            )));
        }

        resp.json::<DirectoryMemberList>()
            .await
            .map_err(|e| ReportError::Directory(format!("list members parse failed: {e}")))
    }

    /// List every group in `domain`, following page tokens.
    pub async fn list_all_groups(&self, domain: &str) -> Result<Vec<DirectoryGroup>> {
        debug!(domain, "listing groups");
        collect_pages(|page_token: Option<String>| async move {
            self.list_groups(domain, page_token.as_deref()).await
        })
        .await
    }

    /// List every member of the group identified by `group_key`, following page tokens.
    pub async fn list_all_members(&self, group_key: &str) -> Result<Vec<DirectoryMember>> {
        debug!(group_key, "listing group members");
        collect_pages(|page_token: Option<String>| async move {
            self.list_members(group_key, page_token.as_deref()).await
        })
        .await
    }
}
