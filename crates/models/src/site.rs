use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Singleton site copy. Missing fields read as blank so a partially written
/// document still loads.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SiteContent {
    pub brand_name: String,
    pub tagline: String,
    pub hero_note: String,
    pub about_title: String,
    pub about_body: String,
    pub contact_title: String,
    pub contact_note: String,
    pub socials: BTreeMap<String, String>,
}
