use serde::Serialize;

/// A single notable fact extracted from an entity's claims, with its
/// display name already localized.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KnowledgeFact {
    pub name: String,
    pub value: String,
}

impl KnowledgeFact {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Localized knowledge about one Wikidata entity, built fresh per
/// enrichment attempt. A record always carries a target-language label;
/// entities without one are discarded upstream rather than partially
/// populated.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KnowledgeRecord {
    pub entity_id: String,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wikipedia_extract: Option<String>,
    pub facts: Vec<KnowledgeFact>,
}

impl KnowledgeRecord {
    pub fn new(entity_id: &str, label: &str) -> Self {
        Self {
            entity_id: entity_id.to_string(),
            label: label.to_string(),
            description: None,
            aliases: Vec::new(),
            wikipedia_extract: None,
            facts: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_optional_fields_are_omitted_from_json() {
        let record = KnowledgeRecord::new("Q23718", "本能寺の変");
        let json = serde_json::to_value(&record).expect("record should serialize");

        assert_eq!(json["entityId"], "Q23718");
        assert_eq!(json["label"], "本能寺の変");
        assert!(json.get("description").is_none());
        assert!(json.get("aliases").is_none());
        assert!(json.get("wikipediaExtract").is_none());
    }

    #[test]
    fn populated_record_serializes_facts_in_order() {
        let mut record = KnowledgeRecord::new("Q23718", "本能寺の変");
        record.facts.push(KnowledgeFact::new("分類", "襲撃"));
        record.facts.push(KnowledgeFact::new("国", "日本"));

        let json = serde_json::to_value(&record).expect("record should serialize");
        assert_eq!(json["facts"][0]["name"], "分類");
        assert_eq!(json["facts"][1]["value"], "日本");
    }
}
