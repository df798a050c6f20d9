//! Rendered news-item document model.
//!
//! Mirrors the ninjs-style JSON rendition served by the media API. Every
//! field is optional or defaulted so partial payloads still deserialize, and
//! unknown fields are ignored.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A fully rendered news item.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,

    /// Item type: `text`, `picture`, `video`, ...
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub item_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub versioncreated: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub firstcreated: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pubstatus: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub urgency: Option<u8>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    #[serde(default)]
    pub headline: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slugline: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub byline: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description_text: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body_text: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body_html5: Option<String>,

    /// Attached media items keyed by association name (`a001`, `a002`, ...).
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub associations: BTreeMap<String, Association>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub renditions: BTreeMap<String, Rendition>,
}

/// A media item attached to a document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Association {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,

    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub item_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headline: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description_text: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub byline: Option<String>,

    /// Encoded variants keyed by rendition name, iterated in key order.
    #[serde(default)]
    pub renditions: BTreeMap<String, Rendition>,
}

/// A single encoded variant of a media asset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Rendition {
    #[serde(default)]
    pub href: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mimetype: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sizeinbytes: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl Document {
    /// Decode a JSON payload into a document.
    pub fn from_slice(payload: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(payload)
    }

    /// Look up an association by key.
    pub fn association(&self, key: &str) -> Option<&Association> {
        self.associations.get(key)
    }
}

impl Association {
    pub fn has_renditions(&self) -> bool {
        !self.renditions.is_empty()
    }
}
