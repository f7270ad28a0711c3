//! Collects every (group, member) pair in a domain.

use gmr_core::error::Result;
use gmr_core::report::ReportRow;
use tracing::{debug, info};

use crate::client::DirectoryClient;

/// Everything fetched for one domain, ready to be written.
#[derive(Debug, Clone)]
pub struct DomainMemberships {
    pub group_count: usize,
    pub rows: Vec<ReportRow>,
}

/// List all groups in `domain`, then the members of each group, one group
/// at a time.
///
/// Rows keep group discovery order, and member order within a group. Groups
/// with no members contribute no rows. The first failed request aborts the
/// whole fetch.
pub async fn fetch_domain_memberships(
    client: &DirectoryClient,
    domain: &str,
) -> Result<DomainMemberships> {
    let groups = client.list_all_groups(domain).await?;
    info!(domain, groups = groups.len(), "fetched groups");

    let mut rows = Vec::new();
    for group in &groups {
        let members = client.list_all_members(&group.id).await?;
        debug!(group = %group.email, members = members.len(), "fetched group members");
        rows.extend(
            members
                .into_iter()
                .map(|member| ReportRow::new(group.email.clone(), member.email)),
        );
    }

    Ok(DomainMemberships {
        group_count: groups.len(),
        rows,
    })
}
