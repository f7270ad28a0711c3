//! Google Admin Directory API response structs for groups and memberships.

use serde::{Deserialize, Serialize};

/// A Google Workspace group.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryGroup {
    pub id: String,
    #[serde(default)]
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Returned by the API as a string-encoded integer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direct_members_count: Option<String>,
}

/// One page of groups.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryGroupList {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub groups: Option<Vec<DirectoryGroup>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_page_token: Option<String>,
}

/// A member of a Google Workspace group.
///
/// Members without an address (for example the whole-customer member)
/// deserialize with an empty `email`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryMember {
    #[serde(default)]
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub member_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// One page of group members.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryMemberList {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub members: Option<Vec<DirectoryMember>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_page_token: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn group_list_deserialize_from_api_format() {
        let json = r#"{
            "kind": "admin#directory#groups",
            "etag": "\"abc\"",
            "groups": [
                {
                    "kind": "admin#directory#group",
                    "id": "03x8tuzt3hqdv5v",
                    "email": "eng@example.com",
                    "name": "Engineering",
                    "directMembersCount": "12",
                    "description": "",
                    "adminCreated": true
                }
            ],
            "nextPageToken": "token123"
        }"#;
        let list: DirectoryGroupList = serde_json::from_str(json).unwrap();
        let groups = list.groups.unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].id, "03x8tuzt3hqdv5v");
        assert_eq!(groups[0].email, "eng@example.com");
        assert_eq!(groups[0].direct_members_count.as_deref(), Some("12"));
        assert_eq!(list.next_page_token.as_deref(), Some("token123"));
    }

    #[test]
    fn group_list_empty() {
        let list: DirectoryGroupList = serde_json::from_str("{}").unwrap();
        assert!(list.groups.is_none());
        assert!(list.next_page_token.is_none());
    }

    #[test]
    fn member_list_deserialize_from_api_format() {
        let json = r#"{
            "kind": "admin#directory#members",
            "members": [
                {
                    "kind": "admin#directory#member",
                    "id": "114",
                    "email": "a@example.com",
                    "role": "OWNER",
                    "type": "USER",
                    "status": "ACTIVE"
                },
                {
                    "kind": "admin#directory#member",
                    "id": "C01abc",
                    "role": "MEMBER",
                    "type": "CUSTOMER"
                }
            ]
        }"#;
        let list: DirectoryMemberList = serde_json::from_str(json).unwrap();
        let members = list.members.unwrap();
        assert_eq!(members.len(), 2);
        assert_eq!(members[0].email, "a@example.com");
        assert_eq!(members[0].member_type.as_deref(), Some("USER"));
        assert_eq!(members[1].email, "");
        assert_eq!(members[1].member_type.as_deref(), Some("CUSTOMER"));
        assert!(list.next_page_token.is_none());
    }

    #[test]
    fn member_serializes_type_field() {
        let member = DirectoryMember {
            email: "b@example.com".to_string(),
            id: None,
            role: Some("MEMBER".to_string()),
            member_type: Some("GROUP".to_string()),
            status: None,
        };
        let json = serde_json::to_string(&member).unwrap();
        assert!(json.contains("\"type\":\"GROUP\""));
        assert!(!json.contains("\"status\""));
    }
}
