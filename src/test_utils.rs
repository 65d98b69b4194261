
#[cfg(test)]
mod tests {
    use super::fixtures::*;

    #[test]
    fn test_fixtures_sample_quiz() {
        let quiz = sample_quiz();
        assert_eq!(quiz.choices.len(), 4);
        assert!(quiz.answer_index < quiz.choices.len());
    }

    #[test]
    fn test_fixtures_sample_record() {
        let record = sample_record();
        assert_eq!(record.entity_id, "Q23718");
        assert_eq!(record.facts.len(), 2);
    }

    #[test]
    fn test_fixtures_sample_videos() {
        let videos = sample_videos();
        assert_eq!(videos.len(), 1);
        assert_eq!(videos[0].keyword_wikidata_links[0].keyword, "本能寺の変");
    }
}
