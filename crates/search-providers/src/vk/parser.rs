use crate::{SearchResults, Track, MAX_SEARCH_RESULTS};
use scraper::error::SelectorErrorKind;
use scraper::{ElementRef, Html, Selector};
use serde::Deserialize;

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Invalid selector: {0}")]
    SelectorError(String),
    #[error(transparent)]
    JsonError(#[from] serde_json::Error),
}

// SelectorErrorKind borrows cssparser tokens that are neither Send nor Sync.
impl From<SelectorErrorKind<'_>> for ParseError {
    fn from(error: SelectorErrorKind<'_>) -> Self {
        ParseError::SelectorError(format!("{:?}", error))
    }
}

const AUTHORIZATION_FAILED_CODE: i64 = 5;

#[derive(Debug, Deserialize, thiserror::Error)]
#[error("VK API error {error_code}: {error_msg}")]
pub struct ApiError {
    pub error_code: i64,
    #[serde(default)]
    pub error_msg: String,
}

impl ApiError {
    pub(crate) fn is_authorization_failure(&self) -> bool {
        self.error_code == AUTHORIZATION_FAILED_CODE
    }
}

#[derive(Deserialize)]
struct ApiEnvelope {
    response: Option<AudioSearchResponse>,
    error: Option<ApiError>,
}

#[derive(Deserialize)]
struct AudioSearchResponse {
    #[serde(default)]
    items: Vec<AudioItem>,
}

#[derive(Deserialize)]
struct AudioItem {
    artist: String,
    title: String,
    url: String,
}

pub(crate) enum ApiOutcome {
    Tracks(SearchResults),
    Error(ApiError),
}

pub(crate) fn parse_audio_search_response(raw_json: &str) -> Result<ApiOutcome, ParseError> {
    let envelope: ApiEnvelope = serde_json::from_str(raw_json)?;

    if let Some(error) = envelope.error {
        return Ok(ApiOutcome::Error(error));
    }

    let tracks = envelope
        .response
        .map(|response| response.items)
        .unwrap_or_default()
        .into_iter()
        // Restricted tracks come back with an empty url
        .filter(|item| !item.url.is_empty())
        .map(|item| Track::new(&item.artist, &item.title, &item.url))
        .take(MAX_SEARCH_RESULTS)
        .collect();

    Ok(ApiOutcome::Tracks(tracks))
}

const RESULT_BLOCK_SELECTOR: &str = r#"div.audio_row[data-url], div.audioRow[data-url]"#;
const MEDIA_REF_ATTRIBUTE: &str = "data-url";

// VK renames these classes every now and then, first non-empty match wins.
const ARTIST_SELECTORS: [&str; 3] = [
    ".audio_row__performers",
    ".audioRow__performers",
    ".ai_artist",
];
const TITLE_SELECTORS: [&str; 3] = [".audio_row__title", ".audioRow__title", ".ai_title"];

fn parse_selectors(alternatives: &[&str]) -> Result<Vec<Selector>, ParseError> {
    alternatives
        .iter()
        .map(|selector| Selector::parse(selector).map_err(ParseError::from))
        .collect()
}

fn select_label(block: &ElementRef<'_>, alternatives: &[Selector]) -> Option<String> {
    alternatives.iter().find_map(|selector| {
        let label = block
            .select(selector)
            .next()?
            .text()
            .flat_map(str::split_whitespace)
            .collect::<Vec<_>>()
            .join(" ");

        if label.is_empty() {
            None
        } else {
            Some(label)
        }
    })
}

pub(crate) fn parse_mobile_search_results(raw_html: &str) -> Result<SearchResults, ParseError> {
    let html = Html::parse_document(raw_html);

    let block_selector = Selector::parse(RESULT_BLOCK_SELECTOR)?;
    let artist_selectors = parse_selectors(&ARTIST_SELECTORS)?;
    let title_selectors = parse_selectors(&TITLE_SELECTORS)?;

    let results = html
        .select(&block_selector)
        .filter_map(|block| {
            let media_ref = block.value().attr(MEDIA_REF_ATTRIBUTE)?;

            if media_ref.is_empty() {
                return None;
            }

            let artist = select_label(&block, &artist_selectors)?;
            let title = select_label(&block, &title_selectors)?;

            Some(Track::new(&artist, &title, media_ref))
        })
        .take(MAX_SEARCH_RESULTS)
        .collect();

    Ok(results)
}
