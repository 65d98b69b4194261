use serde::{Deserialize, Serialize};

/// A keyword paired with the Wikidata entity URL recorded for it in the
/// catalog. Keywords are not unique across videos.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordWikidataLink {
    pub keyword: String,
    pub wikidata_url: String,
}

impl KeywordWikidataLink {
    pub fn new(keyword: &str, wikidata_url: &str) -> Self {
        Self {
            keyword: keyword.to_string(),
            wikidata_url: wikidata_url.to_string(),
        }
    }
}

/// One catalog row: an educational video with its grade set and the
/// space-delimited keyword string quizzes are generated from.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Video {
    pub title: String,
    pub url: String,
    pub thumbnail_url: String,
    pub grades: String,
    pub keyword: String,
    pub keyword_wikidata_links: Vec<KeywordWikidataLink>,
}

impl Video {
    pub fn new(
        title: &str,
        url: &str,
        thumbnail_url: &str,
        grades: &str,
        keyword: &str,
        keyword_wikidata_links: Vec<KeywordWikidataLink>,
    ) -> Self {
        Self {
            title: title.to_string(),
            url: url.to_string(),
            thumbnail_url: thumbnail_url.to_string(),
            grades: grades.to_string(),
            keyword: keyword.to_string(),
            keyword_wikidata_links,
        }
    }
}
