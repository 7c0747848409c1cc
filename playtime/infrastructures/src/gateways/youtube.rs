use ::async_trait::async_trait;
use ::domain::ApiKey;
use ::domain::PageToken;
use ::domain::PlaylistId;
use ::domain::VideoId;
use ::use_cases::gateways::PlaylistItemsGateway;
use ::use_cases::gateways::VideoDetailsGateway;
use ::use_cases::gateways::MAX_PAGE_SIZE;
use ::use_cases::models::descriptors::PlaylistItem;
use ::use_cases::models::descriptors::PlaylistItemsPage;
use ::use_cases::models::descriptors::VideoDetails;
use ::use_cases::models::failures::RemoteFailure;

use crate::utils::aliases::Fallible;

pub const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/youtube/v3/";

/// Client for the `playlistItems` and `videos` list endpoints of the YouTube Data API v3.
pub struct YoutubeDataApiGateway {
    client: ::reqwest::Client,
    base_url: ::url::Url,
}

#[::bon::bon]
impl YoutubeDataApiGateway {
    #[builder]
    pub fn new(
        base_url: Option<::url::Url>,
        #[builder(default = ::std::time::Duration::from_secs(30))] timeout: ::std::time::Duration,
    ) -> Fallible<Self> {
        let mut base_url = match base_url {
            Some(base_url) => base_url,
            None => ::url::Url::parse(DEFAULT_BASE_URL)?,
        };

        // `Url::join` replaces the last segment unless the path ends with a slash
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let client = ::reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self { client, base_url })
    }
}

impl YoutubeDataApiGateway {
    async fn get<Response>(&self, endpoint: &str, query: &[(&str, &str)]) -> Fallible<Response>
    where
        Response: ::serde::de::DeserializeOwned,
    {
        let url = self.base_url.join(endpoint)?;

        ::tracing::debug!(url = %url, "Sending request");

        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(transport_failure)?;

        let status = response.status();
        let body = response.text().await.map_err(transport_failure)?;

        if !status.is_success() {
            return Err(RemoteFailure::new(Some(status.as_u16()), body).into());
        }

        let response = ::serde_json::from_str(&body)
            .map_err(|err| RemoteFailure::new(Some(status.as_u16()), format!("Malformed response: {}", err)))?;

        Ok(response)
    }
}

#[async_trait]
impl PlaylistItemsGateway for YoutubeDataApiGateway {
    async fn list(
        self: ::std::sync::Arc<Self>, playlist_id: &PlaylistId, page_token: Option<&PageToken>, api_key: &ApiKey,
    ) -> Fallible<PlaylistItemsPage> {
        let max_results = MAX_PAGE_SIZE.to_string();

        let mut query = vec![
            ("part", "snippet,contentDetails"),
            ("maxResults", max_results.as_str()),
            ("playlistId", &**playlist_id),
            ("key", api_key.expose()),
        ];

        if let Some(page_token) = page_token {
            query.push(("pageToken", &**page_token));
        }

        let response: responses::PlaylistItemListResponse = self.get("playlistItems", &query).await?;

        Ok(response.into())
    }
}

#[async_trait]
impl VideoDetailsGateway for YoutubeDataApiGateway {
    async fn list(self: ::std::sync::Arc<Self>, video_ids: &[VideoId], api_key: &ApiKey) -> Fallible<Vec<VideoDetails>> {
        let ids = video_ids.join(",");

        let query = [("part", "contentDetails"), ("id", ids.as_str()), ("key", api_key.expose())];

        let response: responses::VideoListResponse = self.get("videos", &query).await?;

        Ok(response.into())
    }
}

fn transport_failure(err: ::reqwest::Error) -> RemoteFailure {
    // The request URL carries the API key.
    let err = err.without_url();

    RemoteFailure::new(err.status().map(|status| status.as_u16()), err.to_string())
}

mod responses {
    use super::*;

    #[derive(Debug, ::serde::Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub(super) struct PlaylistItemListResponse {
        #[serde(default)]
        pub items: Vec<PlaylistItemResource>,
        pub next_page_token: Option<String>,
        pub page_info: Option<PageInfo>,
    }

    #[derive(Debug, ::serde::Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub(super) struct PageInfo {
        pub total_results: Option<u64>,
    }

    #[derive(Debug, ::serde::Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub(super) struct PlaylistItemResource {
        pub snippet: Option<PlaylistItemSnippet>,
        pub content_details: Option<PlaylistItemContentDetails>,
    }

    #[derive(Debug, ::serde::Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub(super) struct PlaylistItemSnippet {
        pub title: Option<String>,
        pub resource_id: Option<ResourceId>,
    }

    #[derive(Debug, ::serde::Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub(super) struct ResourceId {
        pub video_id: Option<String>,
    }

    #[derive(Debug, ::serde::Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub(super) struct PlaylistItemContentDetails {
        pub video_id: Option<String>,
    }

    #[derive(Debug, ::serde::Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub(super) struct VideoListResponse {
        #[serde(default)]
        pub items: Vec<VideoResource>,
    }

    #[derive(Debug, ::serde::Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub(super) struct VideoResource {
        pub id: String,
        pub content_details: Option<VideoContentDetails>,
    }

    #[derive(Debug, ::serde::Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub(super) struct VideoContentDetails {
        pub duration: Option<String>,
    }

    impl From<PlaylistItemListResponse> for PlaylistItemsPage {
        fn from(response: PlaylistItemListResponse) -> Self {
            let items = response
                .items
                .into_iter()
                .filter_map(|item| {
                    let PlaylistItemResource { snippet, content_details } = item;

                    let (title, resource_video_id) = match snippet {
                        Some(PlaylistItemSnippet { title, resource_id }) => {
                            (title, resource_id.and_then(|resource_id| resource_id.video_id))
                        },
                        None => (None, None),
                    };

                    let video_id = content_details
                        .and_then(|content_details| content_details.video_id)
                        .or(resource_video_id);

                    match video_id {
                        Some(video_id) => Some(PlaylistItem::new(video_id, title.unwrap_or_default())),
                        None => {
                            ::tracing::warn!(title = ?title, "Playlist item without a video id");
                            None
                        },
                    }
                })
                .collect();

            Self {
                items,
                next_page_token: response.next_page_token.map(Into::into),
                total_results: response.page_info.and_then(|page_info| page_info.total_results),
            }
        }
    }

    impl From<VideoListResponse> for Vec<VideoDetails> {
        fn from(response: VideoListResponse) -> Self {
            response
                .items
                .into_iter()
                .map(|video| {
                    let duration = video
                        .content_details
                        .and_then(|content_details| content_details.duration)
                        .unwrap_or_default();

                    VideoDetails::new(video.id, duration)
                })
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::responses::*;
    use super::*;

    #[test]
    fn decodes_playlist_items() {
        let response: PlaylistItemListResponse = ::serde_json::from_str(
            r#"{
                "kind": "youtube#playlistItemListResponse",
                "nextPageToken": "EAAaBlBUOkNBVQ",
                "items": [
                    {
                        "snippet": { "title": "Intro", "resourceId": { "kind": "youtube#video", "videoId": "vid1" } },
                        "contentDetails": { "videoId": "vid1" }
                    },
                    {
                        "snippet": { "resourceId": { "videoId": "vid2" } }
                    },
                    {
                        "snippet": { "title": "No id at all" }
                    }
                ],
                "pageInfo": { "totalResults": 120, "resultsPerPage": 50 }
            }"#,
        )
        .unwrap();

        let page = PlaylistItemsPage::from(response);

        assert_eq!(page.items, [PlaylistItem::new("vid1", "Intro"), PlaylistItem::new("vid2", "")]);
        assert_eq!(page.next_page_token.as_deref(), Some("EAAaBlBUOkNBVQ"));
        assert_eq!(page.total_results, Some(120));
    }

    #[test]
    fn the_last_page_has_no_token() {
        let response: PlaylistItemListResponse =
            ::serde_json::from_str(r#"{ "items": [], "pageInfo": { "totalResults": 0 } }"#).unwrap();

        let page = PlaylistItemsPage::from(response);

        assert!(page.items.is_empty());
        assert!(page.next_page_token.is_none());
    }

    #[test]
    fn decodes_video_details() {
        let response: VideoListResponse = ::serde_json::from_str(
            r#"{
                "items": [
                    { "id": "vid1", "contentDetails": { "duration": "PT4M13S", "dimension": "2d" } },
                    { "id": "vid2" }
                ]
            }"#,
        )
        .unwrap();

        let details = Vec::<VideoDetails>::from(response);

        assert_eq!(details, [VideoDetails::new("vid1", "PT4M13S"), VideoDetails::new("vid2", "")]);
    }

    #[test]
    fn base_urls_gain_a_trailing_slash() {
        let gateway = YoutubeDataApiGateway::builder()
            .base_url(::url::Url::parse("http://localhost:8080/youtube/v3").unwrap())
            .build()
            .unwrap();

        assert_eq!(gateway.base_url.join("videos").unwrap().as_str(), "http://localhost:8080/youtube/v3/videos");
    }

    #[test]
    fn defaults_to_the_public_endpoint() {
        let gateway = YoutubeDataApiGateway::builder().build().unwrap();

        assert_eq!(
            gateway.base_url.join("playlistItems").unwrap().as_str(),
            "https://www.googleapis.com/youtube/v3/playlistItems"
        );
    }

    /// Answers a single request on a loopback port with a canned response.
    async fn serve_once(status: &'static str, body: &'static str) -> ::url::Url {
        use ::tokio::io::AsyncReadExt as _;
        use ::tokio::io::AsyncWriteExt as _;

        let listener = ::tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();

        ::tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();

            let mut request = Vec::new();
            let mut buffer = [0; 1024];
            while !request.windows(4).any(|window| window == b"\r\n\r\n") {
                let read = stream.read(&mut buffer).await.unwrap();
                if read == 0 {
                    break;
                }
                request.extend_from_slice(&buffer[..read]);
            }

            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            stream.write_all(response.as_bytes()).await.unwrap();
            stream.shutdown().await.unwrap();
        });

        ::url::Url::parse(&format!("http://{}/youtube/v3/", address)).unwrap()
    }

    #[tokio::test]
    async fn rejected_requests_become_remote_failures() {
        let base_url = serve_once("403 Forbidden", r#"{"error":"keyInvalid"}"#).await;
        let gateway = ::std::sync::Arc::new(YoutubeDataApiGateway::builder().base_url(base_url).build().unwrap());

        let err = PlaylistItemsGateway::list(gateway, &"PL123".into(), None, &ApiKey::new("secret"))
            .await
            .unwrap_err();

        let failure = err.downcast_ref::<RemoteFailure>().unwrap();
        assert_eq!(failure.status, Some(403));
        assert_eq!(&*failure.payload, r#"{"error":"keyInvalid"}"#);
    }

    #[tokio::test]
    async fn undecodable_bodies_become_remote_failures() {
        let base_url = serve_once("200 OK", "<html>definitely not json</html>").await;
        let gateway = ::std::sync::Arc::new(YoutubeDataApiGateway::builder().base_url(base_url).build().unwrap());

        let err = VideoDetailsGateway::list(gateway, &[VideoId::from("vid1")], &ApiKey::new("secret"))
            .await
            .unwrap_err();

        let failure = err.downcast_ref::<RemoteFailure>().unwrap();
        assert_eq!(failure.status, Some(200));
        assert!(failure.payload.starts_with("Malformed response"));
        assert!(!failure.to_string().contains("secret"));
    }

    #[test]
    fn remote_failures_keep_status_and_payload() {
        let failure = RemoteFailure::new(Some(403), r#"{"error":{"code":403,"message":"quotaExceeded"}}"#);

        assert_eq!(
            failure.to_string(),
            r#"An HTTP error 403 occurred: {"error":{"code":403,"message":"quotaExceeded"}}"#
        );
    }
}
