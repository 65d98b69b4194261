use crate::models::domain::KnowledgeRecord;

/// Compose the generation instruction for one keyword.
///
/// The instruction text is identical with and without reference material;
/// a resolved knowledge record only adds the delimited hint block.
pub fn build_quiz_prompt(
    keyword: &str,
    grade: &str,
    knowledge: Option<&KnowledgeRecord>,
) -> String {
    let reference = match knowledge {
        Some(record) => format!(
            "\n=== 参考情報（問題作成のヒント） ===\n{}====================================\n\n",
            format_knowledge_block(record)
        ),
        None => "\n".to_string(),
    };

    format!(
        "「{keyword}」を答えにした4択問題を1問作成してください。\n\
         対象学年：{grade}\n\
         {reference}\
         必ず次のJSON形式のみで出力してください。\n\
         短い文章にしてください。\n\
         説明文・前置き・コードブロックは禁止です。\n\n\
         {{\n\
         \x20 \"question\": \"問題文\",\n\
         \x20 \"choices\": [\"選択肢1\", \"選択肢2\", \"選択肢3\", \"選択肢4\"],\n\
         \x20 \"answerIndex\": 0\n\
         }}"
    )
}

fn format_knowledge_block(record: &KnowledgeRecord) -> String {
    let mut block = format!("名称: {}\n", record.label);

    if let Some(description) = record.description.as_deref().filter(|d| !d.is_empty()) {
        block.push_str(&format!("簡易説明: {}\n", description));
    }

    if !record.aliases.is_empty() {
        block.push_str(&format!("別名: {}\n", record.aliases.join(", ")));
    }

    if let Some(extract) = record.wikipedia_extract.as_deref().filter(|e| !e.is_empty()) {
        block.push_str(&format!("詳細定義: {}\n", extract));
    }

    if !record.facts.is_empty() {
        block.push_str("詳細情報:\n");
        for fact in &record.facts {
            block.push_str(&format!("  - {}: {}\n", fact.name, fact.value));
        }
    }

    block
}
