use crate::models::domain::Video;

/// Read-only view over the loaded video catalog. Safe to share across
/// requests without locking; nothing mutates it after startup.
pub struct VideoService {
    videos: Vec<Video>,
}

impl VideoService {
    pub fn new(videos: Vec<Video>) -> Self {
        Self { videos }
    }

    pub fn all(&self) -> &[Video] {
        &self.videos
    }

    /// Videos whose grade-set descriptor contains the requested grade.
    pub fn videos_by_grade(&self, grade: &str) -> Vec<&Video> {
        let result: Vec<&Video> = self
            .videos
            .iter()
            .filter(|v| v.grades.contains(grade))
            .collect();

        log::debug!("grade {}: {} videos", grade, result.len());

        result
    }

    pub fn search_by_title(&self, title: &str) -> Vec<&Video> {
        self.videos
            .iter()
            .filter(|v| v.title.contains(title))
            .collect()
    }

    /// Entity links recorded for `keyword` among the grade's videos, in
    /// catalog scan order.
    ///
    /// Duplicate keywords across videos yield the earliest row first; the
    /// caller takes the first link that actually resolves to an entity id.
    pub fn entity_links(&self, keyword: &str, grade: &str) -> Vec<&str> {
        let mut links = Vec::new();

        for video in self.videos_by_grade(grade) {
            if !video.keyword.contains(keyword) {
                continue;
            }
            for link in &video.keyword_wikidata_links {
                if link.keyword == keyword {
                    links.push(link.wikidata_url.as_str());
                }
            }
        }

        links
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::domain::KeywordWikidataLink;

    fn catalog() -> VideoService {
        VideoService::new(vec![
            Video::new(
                "戦国の世",
                "https://example.com/v1",
                "t1.jpg",
                "6",
                "本能寺の変 織田信長",
                vec![
                    KeywordWikidataLink::new(
                        "本能寺の変",
                        "http://www.wikidata.org/entity/Q23718",
                    ),
                    KeywordWikidataLink::new(
                        "織田信長",
                        "http://www.wikidata.org/entity/Q171977",
                    ),
                ],
            ),
            Video::new(
                "江戸のくらし",
                "https://example.com/v2",
                "t2.jpg",
                "5,6",
                "江戸幕府 織田信長",
                vec![KeywordWikidataLink::new(
                    "織田信長",
                    "http://www.wikidata.org/entity/Q999999",
                )],
            ),
        ])
    }

    #[test]
    fn filters_by_grade_membership() {
        let service = catalog();
        assert_eq!(service.videos_by_grade("6").len(), 2);
        assert_eq!(service.videos_by_grade("5").len(), 1);
        assert!(service.videos_by_grade("1").is_empty());
    }

    #[test]
    fn searches_by_title_substring() {
        let service = catalog();
        assert_eq!(service.search_by_title("江戸").len(), 1);
        assert!(service.search_by_title("明治").is_empty());
    }

    #[test]
    fn finds_link_for_exact_keyword() {
        let service = catalog();
        assert_eq!(
            service.entity_links("本能寺の変", "6"),
            vec!["http://www.wikidata.org/entity/Q23718"]
        );
    }

    #[test]
    fn duplicate_keyword_lists_first_catalog_row_first() {
        let service = catalog();
        assert_eq!(
            service.entity_links("織田信長", "6"),
            vec![
                "http://www.wikidata.org/entity/Q171977",
                "http://www.wikidata.org/entity/Q999999",
            ]
        );
    }

    #[test]
    fn unknown_keyword_has_no_links() {
        let service = catalog();
        assert!(service.entity_links("豊臣秀吉", "6").is_empty());
    }
}
