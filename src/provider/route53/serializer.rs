use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::provider::ChangeInfo;
use crate::record::ProviderRecord;

const XMLNS: &str = "https://route53.amazonaws.com/doc/2013-04-01/";
const XML_DECL: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

////////////////////////////////////////////////////////////
// Request
////////////////////////////////////////////////////////////
#[derive(Debug, Serialize)]
pub(super) struct ChangeResourceRecordSetsRequest {
    #[serde(rename = "@xmlns")]
    xmlns: &'static str,
    #[serde(rename = "ChangeBatch")]
    change_batch: ChangeBatch,
}

#[derive(Debug, Serialize)]
struct ChangeBatch {
    #[serde(rename = "Comment", skip_serializing_if = "Option::is_none")]
    comment: Option<String>,
    #[serde(rename = "Changes")]
    changes: Changes,
}

#[derive(Debug, Serialize)]
struct Changes {
    #[serde(rename = "Change")]
    change: Vec<Change>,
}

#[derive(Debug, Serialize)]
struct Change {
    #[serde(rename = "Action")]
    action: &'static str,
    #[serde(rename = "ResourceRecordSet")]
    resource_record_set: ResourceRecordSet,
}

#[derive(Debug, Serialize)]
struct ResourceRecordSet {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Type")]
    r#type: String,
    #[serde(rename = "TTL")]
    ttl: u32,
    #[serde(rename = "ResourceRecords")]
    resource_records: ResourceRecords,
}

#[derive(Debug, Serialize)]
struct ResourceRecords {
    #[serde(rename = "ResourceRecord")]
    resource_record: Vec<ResourceRecord>,
}

#[derive(Debug, Serialize)]
struct ResourceRecord {
    #[serde(rename = "Value")]
    value: String,
}

impl ChangeResourceRecordSetsRequest {
    pub fn upsert(record: &ProviderRecord) -> Self {
        Self {
            xmlns: XMLNS,
            change_batch: ChangeBatch {
                comment: record.comment.clone(),
                changes: Changes {
                    change: vec![Change {
                        action: "UPSERT",
                        resource_record_set: ResourceRecordSet {
                            name: record.name.clone(),
                            r#type: record.r#type.as_str().to_string(),
                            ttl: record.ttl,
                            resource_records: ResourceRecords {
                                resource_record: vec![ResourceRecord {
                                    value: record.content.clone(),
                                }],
                            },
                        },
                    }],
                },
            },
        }
    }

    pub fn to_xml(&self) -> Result<String> {
        let body = quick_xml::se::to_string_with_root("ChangeResourceRecordSetsRequest", self)
            .map_err(|e| Error::UpdateError(format!("cannot serialize change batch: {}", e)))?;
        Ok(format!("{}{}", XML_DECL, body))
    }
}

////////////////////////////////////////////////////////////
// Response
////////////////////////////////////////////////////////////
#[derive(Debug, Deserialize)]
pub(super) struct ChangeResourceRecordSetsResponse {
    #[serde(rename = "ChangeInfo")]
    pub change_info: R53ChangeInfo,
}

#[derive(Debug, Deserialize)]
pub(super) struct R53ChangeInfo {
    #[serde(rename = "Id")]
    id: String,
    #[serde(rename = "Status")]
    status: String,
    #[serde(rename = "SubmittedAt", default)]
    submitted_at: Option<String>,
}

impl From<R53ChangeInfo> for ChangeInfo {
    fn from(info: R53ChangeInfo) -> Self {
        Self {
            id: info.id,
            status: info.status,
            submitted_at: info.submitted_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct ErrorResponse {
    #[serde(rename = "Error")]
    pub error: R53Error,
    #[serde(rename = "RequestId", default)]
    pub request_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct R53Error {
    #[serde(rename = "Code")]
    pub code: String,
    #[serde(rename = "Message", default)]
    pub message: String,
}

impl ErrorResponse {
    /// Describes a rejected request. Falls back to the raw body when it is
    /// not a standard `ErrorResponse` document.
    pub fn describe(status: u16, body: &str) -> String {
        match quick_xml::de::from_str::<ErrorResponse>(body) {
            Ok(resp) => {
                let mut msg = format!(
                    "route53 rejected change (status {}): {}: {}",
                    status, resp.error.code, resp.error.message
                );
                if let Some(id) = resp.request_id {
                    msg.push_str(&format!(" [request id {}]", id));
                }
                msg
            }
            Err(_) => format!("route53 rejected change (status {}): {}", status, body.trim()),
        }
    }
}
