//! Playback IDs and access restrictions.

use serde::{Deserialize, Serialize};

use crate::enums::{AccessPolicy, DefaultPolicy, Resolution};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaybackId {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_policy: Option<AccessPolicy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_restrictions: Option<AccessRestrictions>,
}

/// Domain and user-agent allow/deny lists of a playback ID.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessRestrictions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domains: Option<RestrictionRule>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agents: Option<RestrictionRule>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestrictionRule {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_policy: Option<DefaultPolicy>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub allow: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub deny: Vec<String>,
}

/// Body of the create-playback-ID operations (media and live streams).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePlaybackIdRequest {
    #[serde(default)]
    pub access_policy: AccessPolicy,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_restrictions: Option<AccessRestrictions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolution: Option<Resolution>,
}

impl CreatePlaybackIdRequest {
    pub fn new(access_policy: AccessPolicy) -> Self {
        Self {
            access_policy,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn restrictions_serialize_only_what_is_set() {
        let request = CreatePlaybackIdRequest {
            access_restrictions: Some(AccessRestrictions {
                domains: Some(RestrictionRule {
                    default_policy: Some(DefaultPolicy::Deny),
                    allow: vec!["example.com".to_string()],
                    deny: Vec::new(),
                }),
                user_agents: None,
            }),
            ..CreatePlaybackIdRequest::new(AccessPolicy::Private)
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "accessPolicy": "private",
                "accessRestrictions": {
                    "domains": {"defaultPolicy": "deny", "allow": ["example.com"]}
                }
            })
        );
    }
}
