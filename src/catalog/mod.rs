use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::errors::AppResult;
use crate::models::domain::{KeywordWikidataLink, Video};

// Column layout of the exported catalog sheet. Only these columns are
// consumed; everything else in a row is ignored.
const COL_TITLE: usize = 2;
const COL_URL: usize = 5;
const COL_THUMBNAIL: usize = 6;
const COL_GRADES: usize = 7;
const COL_KEYWORD: usize = 11;
const COL_FIRST_LINK: usize = 16;
const LINK_COLUMNS: usize = 5;

/// Load the video catalog from a comma-separated export.
///
/// Rows missing a title, URL, or grade set are skipped. Keywords are split
/// on whitespace and paired positionally with the up-to-five entity link
/// columns; pairs where either side is blank are dropped.
pub fn load_videos(path: impl AsRef<Path>) -> AppResult<Vec<Video>> {
    let file = File::open(path.as_ref())?;
    parse_catalog(BufReader::new(file))
}

pub fn parse_catalog(reader: impl BufRead) -> AppResult<Vec<Video>> {
    let mut videos = Vec::new();

    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        if line_no == 0 {
            // header
            continue;
        }

        let cols: Vec<&str> = line.split(',').collect();

        let title = col(&cols, COL_TITLE);
        let url = col(&cols, COL_URL);
        let thumbnail_url = col(&cols, COL_THUMBNAIL);
        let grades = col(&cols, COL_GRADES);
        let keyword = col(&cols, COL_KEYWORD);

        if title.is_empty() || url.is_empty() || grades.is_empty() {
            continue;
        }

        if keyword.is_empty() {
            log::debug!("catalog row without keywords: {}", title);
        }

        let links = keyword_links(keyword, &cols);

        videos.push(Video::new(title, url, thumbnail_url, grades, keyword, links));
    }

    log::info!("loaded {} videos from catalog", videos.len());

    Ok(videos)
}

fn keyword_links(keyword: &str, cols: &[&str]) -> Vec<KeywordWikidataLink> {
    keyword
        .split_whitespace()
        .take(LINK_COLUMNS)
        .enumerate()
        .filter_map(|(i, kw)| {
            let link = col(cols, COL_FIRST_LINK + i);
            if link.is_empty() {
                None
            } else {
                Some(KeywordWikidataLink::new(kw, link))
            }
        })
        .collect()
}

fn col<'a>(cols: &[&'a str], index: usize) -> &'a str {
    cols.get(index).copied().unwrap_or("")
}
