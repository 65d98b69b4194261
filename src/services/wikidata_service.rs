use std::time::Duration;

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::models::domain::{KnowledgeFact, KnowledgeRecord};

const ENTITY_DATA_URL: &str = "https://www.wikidata.org/wiki/Special:EntityData";
const WIKIPEDIA_API_URL: &str = "https://ja.wikipedia.org/w/api.php";
const USER_AGENT: &str =
    "quizgen-server/0.1 (educational quiz generator; contact@example.com)";

/// Target language for every localized field. Data missing in this
/// language is dropped, never rendered in a fallback language.
const LANG: &str = "ja";
const SITELINK: &str = "jawiki";

static ENTITY_ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^Q\d+$").expect("entity id pattern is valid"));

/// Claim kinds extracted into facts, in output order, with localized
/// display names. Kinds outside this table are skipped.
const TRACKED_PROPERTIES: &[(&str, &str)] = &[
    ("P31", "分類"),
    ("P279", "上位クラス"),
    ("P361", "一部"),
    ("P17", "国"),
    ("P276", "場所"),
    ("P580", "開始時点"),
    ("P582", "終了時点"),
    ("P585", "時点"),
    ("P571", "設立"),
    ("P569", "生年月日"),
    ("P570", "没年月日"),
];

/// Seam for the enrichment lookup. A miss is an `Option`, not an error:
/// the quiz pipeline always degrades to an unenriched prompt.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait KnowledgeSource: Send + Sync {
    async fn fetch(&self, entity_id: &str) -> Option<KnowledgeRecord>;
}

pub struct WikidataService {
    client: reqwest::Client,
    enabled: bool,
}

impl WikidataService {
    pub fn new(config: &Config) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .connect_timeout(Duration::from_secs(config.wikidata_connect_timeout_secs))
            .timeout(Duration::from_secs(config.wikidata_read_timeout_secs))
            .build()
            .map_err(|e| {
                AppError::InternalError(format!("failed to build Wikidata HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            enabled: config.enable_wikidata,
        })
    }

    /// Extract an entity id from a stored reference URL, e.g.
    /// `http://www.wikidata.org/entity/Q23718` → `Q23718`.
    ///
    /// Absence is expected and common; anything whose last segment is not
    /// `Q<digits>` yields `None`.
    pub fn extract_entity_id(url: &str) -> Option<String> {
        let last = url.rsplit('/').next()?;
        if ENTITY_ID_RE.is_match(last) {
            Some(last.to_string())
        } else {
            None
        }
    }

    /// Fetch and localize one entity. Returns `None` when the feature is
    /// disabled, the id is empty, the entity has no target-language label,
    /// or the lookup fails for any transport reason.
    pub async fn fetch_entity(&self, entity_id: &str) -> Option<KnowledgeRecord> {
        if entity_id.is_empty() {
            return None;
        }
        if !self.enabled {
            log::debug!("wikidata enrichment disabled, skipping {}", entity_id);
            return None;
        }

        let root = match self.entity_data(entity_id).await {
            Ok(root) => root,
            Err(err) => {
                log::warn!("wikidata lookup failed for {}: {}", entity_id, err);
                return None;
            }
        };

        self.decode_entity(&root, entity_id).await
    }

    async fn decode_entity(&self, root: &Value, entity_id: &str) -> Option<KnowledgeRecord> {
        let entity = &root["entities"][entity_id];

        let Some(label) = lang_value(&entity["labels"]) else {
            log::info!("no {} label for {}, dropping entity", LANG, entity_id);
            return None;
        };

        let mut record = KnowledgeRecord::new(entity_id, &label);
        record.description = lang_value(&entity["descriptions"]);
        record.aliases = lang_aliases(&entity["aliases"]);
        record.wikipedia_extract = self.wikipedia_extract(entity).await;
        record.facts = self.extract_facts(&entity["claims"], root).await;

        log::info!(
            "wikidata record for {}: label={}, {} aliases, {} facts",
            entity_id,
            record.label,
            record.aliases.len(),
            record.facts.len()
        );

        Some(record)
    }

    async fn entity_data(&self, entity_id: &str) -> Result<Value, reqwest::Error> {
        let url = format!("{}/{}.json", ENTITY_DATA_URL, entity_id);
        log::debug!("GET {}", url);

        self.client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
    }

    /// Best-effort encyclopedic extract via the entity's linked article.
    /// Every failure here is swallowed; the field is simply omitted.
    async fn wikipedia_extract(&self, entity: &Value) -> Option<String> {
        let title = entity["sitelinks"][SITELINK]["title"].as_str()?;

        match self.query_extract(title).await {
            Ok(root) => first_page_extract(&root),
            Err(err) => {
                log::warn!("wikipedia extract lookup failed for {}: {}", title, err);
                None
            }
        }
    }

    async fn query_extract(&self, title: &str) -> Result<Value, reqwest::Error> {
        self.client
            .get(WIKIPEDIA_API_URL)
            .query(&[
                ("action", "query"),
                ("prop", "extracts"),
                ("exintro", "true"),
                ("explaintext", "true"),
                ("titles", title),
                ("format", "json"),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
    }

    async fn extract_facts(&self, claims: &Value, root: &Value) -> Vec<KnowledgeFact> {
        let mut facts = Vec::new();

        for (property_id, name) in TRACKED_PROPERTIES {
            let Some(first_claim) = claims[*property_id].as_array().and_then(|c| c.first())
            else {
                continue;
            };

            if let Some(value) = self.claim_value(&first_claim["mainsnak"], root).await {
                facts.push(KnowledgeFact::new(*name, value));
            }
        }

        facts
    }

    /// Decode one claim's value by its type tag. Unrecognized tags and
    /// wrong-language branches yield `None` and the fact is skipped.
    async fn claim_value(&self, mainsnak: &Value, root: &Value) -> Option<String> {
        let datavalue = mainsnak.get("datavalue")?;
        let value = &datavalue["value"];

        match datavalue["type"].as_str()? {
            "string" | "url" | "external-id" => value.as_str().map(str::to_owned),
            "wikibase-item" => {
                let id = value["id"].as_str()?;
                self.entity_label(id, root).await
            }
            "time" => value["time"].as_str().map(format_time),
            "quantity" => value["amount"].as_str().map(str::to_owned),
            "globe-coordinate" => {
                let lat = value["latitude"].as_f64()?;
                let lon = value["longitude"].as_f64()?;
                Some(format!("緯度{:.4}, 経度{:.4}", lat, lon))
            }
            "monolingualtext" => {
                if value["language"].as_str()? == LANG {
                    value["text"].as_str().map(str::to_owned)
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    /// Target-language label of a referenced entity. Prefers the current
    /// response; one extra lookup is permitted for entities not present in
    /// it. The target-language rule is the same either way.
    async fn entity_label(&self, entity_id: &str, root: &Value) -> Option<String> {
        let entity = &root["entities"][entity_id];
        if !entity.is_null() {
            return lang_value(&entity["labels"]);
        }

        if !self.enabled {
            return None;
        }

        match self.entity_data(entity_id).await {
            Ok(fetched) => lang_value(&fetched["entities"][entity_id]["labels"]),
            Err(err) => {
                log::warn!("label lookup failed for {}: {}", entity_id, err);
                None
            }
        }
    }
}

#[async_trait]
impl KnowledgeSource for WikidataService {
    async fn fetch(&self, entity_id: &str) -> Option<KnowledgeRecord> {
        self.fetch_entity(entity_id).await
    }
}

fn lang_value(node: &Value) -> Option<String> {
    node[LANG]["value"].as_str().map(str::to_owned)
}

fn lang_aliases(node: &Value) -> Vec<String> {
    node[LANG]
        .as_array()
        .map(|aliases| {
            aliases
                .iter()
                .filter_map(|a| a["value"].as_str().map(str::to_owned))
                .collect()
        })
        .unwrap_or_default()
}

fn first_page_extract(root: &Value) -> Option<String> {
    let pages = root["query"]["pages"].as_object()?;
    let first = pages.values().next()?;
    first_paragraph(first["extract"].as_str()?)
}

fn first_paragraph(extract: &str) -> Option<String> {
    let paragraph = extract.split('\n').next()?.trim();
    if paragraph.is_empty() {
        None
    } else {
        Some(paragraph.to_string())
    }
}

/// Render a sign-prefixed ISO date like `+1582-06-21T00:00:00Z` as
/// `1582年6月21日`. A zero month truncates to the year, a zero day to
/// year and month. Unparseable input falls back to the raw date part.
fn format_time(time: &str) -> String {
    let trimmed = time.trim_start_matches('+');
    let date_only = trimmed.get(..10).unwrap_or(trimmed);
    let parts: Vec<&str> = date_only.split('-').collect();

    if parts.len() >= 3 {
        if let (Ok(year), Ok(month), Ok(day)) = (
            parts[0].parse::<i64>(),
            parts[1].parse::<u32>(),
            parts[2].parse::<u32>(),
        ) {
            return match (month, day) {
                (0, _) => format!("{}年", year),
                (_, 0) => format!("{}年{}月", year, month),
                _ => format!("{}年{}月{}日", year, month, day),
            };
        }
    }

    date_only.to_string()
}
