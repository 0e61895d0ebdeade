use crate::vk::parser::{parse_audio_search_response, parse_mobile_search_results, ApiOutcome};
use crate::{AccessToken, Track, VkApiClient, VkClientError, VkMobileClient, VkOAuthClient};
use std::time::Duration;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TIMEOUT: Duration = Duration::from_secs(10);

fn track(artist: &str, title: &str, media_ref: &str) -> Track {
    Track {
        artist: artist.into(),
        title: title.into(),
        media_ref: media_ref.into(),
    }
}

fn expect_tracks(outcome: ApiOutcome) -> Vec<Track> {
    match outcome {
        ApiOutcome::Tracks(tracks) => tracks,
        ApiOutcome::Error(error) => panic!("Unexpected API error: {}", error),
    }
}

#[test]
fn test_parsing_of_mobile_search_results() {
    let results = parse_mobile_search_results(include_str!("fixtures/mobile_search_results.html"))
        .expect("Expected successful parse results");

    let expected_results = vec![
        track(
            "Robert Miles",
            "Children (Dream Version)",
            "https://cs1-66v4.vkuseraudio.net/s/v1/ac/one.mp3?extra=AbC_1",
        ),
        track(
            "Robert Miles",
            "Fable",
            "https://cs1-66v4.vkuseraudio.net/s/v1/ac/two.mp3",
        ),
        track(
            "Robert Miles",
            "One and One",
            "https://cs1-66v4.vkuseraudio.net/s/v1/ac/three.mp3",
        ),
        track(
            "Robert Miles feat. Maria Nayler",
            "Freedom",
            "https://cs1-66v4.vkuseraudio.net/s/v1/ac/four.mp3",
        ),
        track(
            "Robert Miles",
            "Dreamland",
            "https://cs1-66v4.vkuseraudio.net/s/v1/ac/five.mp3",
        ),
    ];

    assert_eq!(5, results.len());
    assert_eq!(expected_results, results);
}

#[test]
fn test_mobile_blocks_missing_a_label_are_skipped() {
    let raw_html = r#"
        <div class="audio_row" data-url="https://vk.example/broken.mp3">
            <div class="audio_row__performers">Artist</div>
        </div>
        <div class="audio_row" data-url="https://vk.example/valid.mp3">
            <div class="audio_row__performers">Artist</div>
            <div class="audio_row__title">Title</div>
        </div>
    "#;

    let results = parse_mobile_search_results(raw_html).unwrap();

    assert_eq!(
        vec![track("Artist", "Title", "https://vk.example/valid.mp3")],
        results
    );
}

#[test]
fn test_mobile_labels_are_collapsed_to_single_line() {
    let raw_html = r#"
        <div class="audio_row" data-url="https://vk.example/duet.mp3">
            <div class="audio_row__performers"><a>Artist
                One</a>, <a>Two</a></div>
            <div class="audio_row__title">
                Long
                Title
            </div>
        </div>
    "#;

    let results = parse_mobile_search_results(raw_html).unwrap();

    assert_eq!(
        vec![track("Artist One, Two", "Long Title", "https://vk.example/duet.mp3")],
        results
    );
}

#[test]
fn test_mobile_blocks_without_media_ref_are_skipped() {
    let raw_html = r#"
        <div class="audio_row">
            <div class="audio_row__performers">No</div>
            <div class="audio_row__title">Attribute</div>
        </div>
        <div class="audio_row" data-url="">
            <div class="audio_row__performers">Empty</div>
            <div class="audio_row__title">Attribute</div>
        </div>
    "#;

    assert!(parse_mobile_search_results(raw_html).unwrap().is_empty());
}

#[test]
fn test_mobile_page_without_results() {
    let raw_html = "<html><body><div class=\"search_empty\">Ничего не найдено</div></body></html>";

    assert!(parse_mobile_search_results(raw_html).unwrap().is_empty());
}

#[test]
fn test_parsing_of_audio_search_response() {
    let tracks = expect_tracks(
        parse_audio_search_response(include_str!("fixtures/audio_search_response.json")).unwrap(),
    );

    assert_eq!(
        vec![
            track(
                "Robert Miles",
                "Children",
                "https://cs1-66v4.vkuseraudio.net/s/v1/ac/children.mp3?extra=x_y",
            ),
            track(
                "Robert Miles",
                "One and One",
                "https://cs1-66v4.vkuseraudio.net/s/v1/ac/one_and_one.mp3",
            ),
        ],
        tracks
    );
}

#[test]
fn test_single_item_response() {
    let tracks = expect_tracks(
        parse_audio_search_response(
            r#"{"response":{"items":[{"artist":"A","title":"T","url":"u1"}]}}"#,
        )
        .unwrap(),
    );

    assert_eq!(vec![track("A", "T", "u1")], tracks);
}

#[test]
fn test_missing_items_or_response_means_no_results() {
    for raw_json in [r#"{"response":{}}"#, r#"{}"#, r#"{"response":{"items":[]}}"#] {
        let tracks = expect_tracks(parse_audio_search_response(raw_json).unwrap());
        assert!(tracks.is_empty(), "Expected no tracks for {}", raw_json);
    }
}

#[test]
fn test_api_response_is_truncated_to_five_items() {
    let items = (1..=8)
        .map(|i| format!(r#"{{"artist":"A{i}","title":"T{i}","url":"u{i}"}}"#))
        .collect::<Vec<_>>()
        .join(",");
    let raw_json = format!(r#"{{"response":{{"items":[{}]}}}}"#, items);

    let tracks = expect_tracks(parse_audio_search_response(&raw_json).unwrap());

    let media_refs = tracks.iter().map(|t| t.media_ref.as_str()).collect::<Vec<_>>();
    assert_eq!(vec!["u1", "u2", "u3", "u4", "u5"], media_refs);
}

#[test]
fn test_api_error_envelope() {
    let outcome = parse_audio_search_response(
        r#"{"error":{"error_code":5,"error_msg":"User authorization failed: invalid access_token (4)."}}"#,
    )
    .unwrap();

    match outcome {
        ApiOutcome::Error(error) => {
            assert_eq!(5, error.error_code);
            assert!(error.is_authorization_failure());
        }
        ApiOutcome::Tracks(_) => panic!("Expected API error"),
    }
}

#[test]
fn test_malformed_json_is_a_parse_error() {
    assert!(parse_audio_search_response("<html>").is_err());
}

#[tokio::test]
async fn test_api_client_sends_search_parameters() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/method/audio.search"))
        .and(query_param("q", "Robert Miles & Children"))
        .and(query_param("access_token", "secret"))
        .and(query_param("v", "5.131"))
        .and(query_param("count", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"response":{"items":[{"artist":"A","title":"T","url":"u1"}]}}"#,
        ))
        .expect(1)
        .mount(&server)
        .await;

    let client = VkApiClient::create_with_host(&server.uri(), "5.131", TIMEOUT).unwrap();
    let tracks = client
        .search_audio(&AccessToken::from("secret"), "Robert Miles & Children")
        .await
        .unwrap();

    assert_eq!(vec![track("A", "T", "u1")], tracks);
}

#[tokio::test]
async fn test_api_client_reports_authorization_failure() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/method/audio.search"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"error":{"error_code":5,"error_msg":"User authorization failed"}}"#,
        ))
        .mount(&server)
        .await;

    let client = VkApiClient::create_with_host(&server.uri(), "5.131", TIMEOUT).unwrap();
    let error = client
        .search_audio(&AccessToken::from("expired"), "query")
        .await
        .unwrap_err();

    assert!(error.is_authorization_failure());
}

#[tokio::test]
async fn test_api_client_treats_server_error_as_failure() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let client = VkApiClient::create_with_host(&server.uri(), "5.131", TIMEOUT).unwrap();
    let result = client
        .search_audio(&AccessToken::from("secret"), "query")
        .await;

    assert!(matches!(result, Err(VkClientError::ReqwestError(_))));
}

#[tokio::test]
async fn test_api_client_connection_error() {
    // Nothing listens on the discard port
    let client = VkApiClient::create_with_host("http://127.0.0.1:9", "5.131", TIMEOUT).unwrap();
    let result = client
        .search_audio(&AccessToken::from("secret"), "query")
        .await;

    assert!(matches!(result, Err(VkClientError::ReqwestError(_))));
}

#[tokio::test]
async fn test_mobile_client_scrapes_audio_section() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("c[section]", "audio"))
        .and(query_param("q", "robert miles"))
        .and(header("cookie", "remixsid=abc"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(include_str!("fixtures/mobile_search_results.html")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client =
        VkMobileClient::create_with_host(&server.uri(), Some("remixsid=abc"), TIMEOUT).unwrap();
    let tracks = client.search_audio("robert miles").await.unwrap();

    assert_eq!(5, tracks.len());
    assert_eq!("Children (Dream Version)", tracks[0].title);
}

#[test]
fn test_mobile_client_rejects_invalid_cookie() {
    let result = VkMobileClient::create(Some("remixsid=abc\n"), TIMEOUT);

    assert!(matches!(result, Err(VkClientError::InvalidSessionCookie)));
}

#[tokio::test]
async fn test_oauth_client_obtains_token() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/access_token"))
        .and(query_param("client_id", "51234"))
        .and(query_param("client_secret", "app-secret"))
        .and(query_param("grant_type", "client_credentials"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"{"access_token":"service-token","expires_in":0}"#),
        )
        .mount(&server)
        .await;

    let client =
        VkOAuthClient::create_with_host(&server.uri(), "51234", "app-secret", "5.131", TIMEOUT)
            .unwrap();
    let token = client.obtain_access_token().await.unwrap();

    assert_eq!(AccessToken::from("service-token"), token);
}

#[tokio::test]
async fn test_oauth_client_reports_rejected_credentials() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/access_token"))
        .respond_with(ResponseTemplate::new(401).set_body_string(
            r#"{"error":"invalid_client","error_description":"client_secret is incorrect"}"#,
        ))
        .mount(&server)
        .await;

    let client =
        VkOAuthClient::create_with_host(&server.uri(), "51234", "wrong", "5.131", TIMEOUT)
            .unwrap();
    let error = client.obtain_access_token().await.unwrap_err();

    match error {
        VkClientError::OAuthError(message) => assert_eq!("client_secret is incorrect", message),
        other => panic!("Unexpected error: {:?}", other),
    }
}
