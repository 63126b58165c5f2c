//! reqwest-backed implementation of [`ScoringApi`].

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;

use super::error::{ApiError, Result};
use super::ScoringApi;
use super::types::{
    DailyPuzzle, DailyResponse, Leaderboard, PlayerScore, SubmissionResult, SubmitRequest,
};
use crate::config::ClientConfig;

/// HTTP client for the word hunt endpoints.
#[derive(Clone, Debug)]
pub struct HttpApi {
    base_url: String,
    http_client: reqwest::Client,
}

impl HttpApi {
    /// Create a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the underlying HTTP client cannot be built
    /// (e.g. TLS backend initialisation fails).
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            base_url: config.api_url.clone(),
            http_client,
        })
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint)
    }
}

#[async_trait]
impl ScoringApi for HttpApi {
    async fn daily(&self, date: NaiveDate, size: usize) -> Result<DailyPuzzle> {
        tracing::debug!("GET daily date={} size={}", date, size);

        let response = self
            .http_client
            .get(self.url("daily"))
            .query(&[("date", date.to_string()), ("size", size.to_string())])
            .send()
            .await?;

        let raw: DailyResponse = decode(response).await?;
        let puzzle = DailyPuzzle::from_response(date, raw)?;

        tracing::info!(
            "Loaded puzzle {}: {}x{} seed={}",
            date,
            puzzle.grid.size(),
            puzzle.grid.size(),
            puzzle.seed
        );
        Ok(puzzle)
    }

    async fn leaderboard(&self, date: NaiveDate, limit: usize) -> Result<Leaderboard> {
        tracing::debug!("GET leaderboard date={} limit={}", date, limit);

        let response = self
            .http_client
            .get(self.url("leaderboard"))
            .query(&[("date", date.to_string()), ("limit", limit.to_string())])
            .send()
            .await?;

        decode(response).await
    }

    async fn me(&self, date: NaiveDate, username: &str) -> Result<PlayerScore> {
        tracing::debug!("GET me date={} username={}", date, username);

        let response = self
            .http_client
            .get(self.url("me"))
            .query(&[("date", date.to_string()), ("username", username.to_string())])
            .send()
            .await?;

        decode(response).await
    }

    async fn submit(&self, date: NaiveDate, request: &SubmitRequest) -> Result<SubmissionResult> {
        tracing::debug!(
            "POST submit date={} username={} words={}",
            date,
            request.username,
            request.words.len()
        );

        let response = self
            .http_client
            .post(self.url("submit"))
            .query(&[("date", date.to_string())])
            .json(request)
            .send()
            .await?;

        let result: SubmissionResult = decode(response).await?;
        tracing::info!(
            "Submission {} for {}: score={} words={}",
            if result.accepted { "accepted" } else { "rejected" },
            request.username,
            result.score,
            result.words_found
        );
        Ok(result)
    }
}

/// Map status codes to [`ApiError`] and parse the JSON body.
async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    match status {
        StatusCode::UNAUTHORIZED => return Err(ApiError::Unauthenticated),
        StatusCode::NOT_FOUND => return Err(ApiError::NotFound),
        s if !s.is_success() => {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ApiError::Status { status, body });
        }
        _ => {}
    }

    // Read text first so parse failures can be logged with the raw body
    let text = response.text().await?;
    serde_json::from_str(&text).map_err(|e| {
        tracing::debug!("Unparseable response ({}): {}", e, text);
        ApiError::Decode(e)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Coord;
    use crate::session::{Command, Session, SubmitOutcome};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    const JSON: &str = "application/json";

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 14).unwrap()
    }

    /// Serve one canned HTTP response; the handle yields the raw request
    async fn serve_once(
        status: &'static str,
        content_type: &'static str,
        body: &'static str,
    ) -> (HttpApi, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let server = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let request = read_request(&mut socket).await;
            let response = format!(
                "HTTP/1.1 {status}\r\nContent-Type: {content_type}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
            request
        });

        // Bypass any proxy from the environment so requests reach the stub
        let api = HttpApi {
            base_url: format!("http://{addr}/api/wordhunt"),
            http_client: reqwest::Client::builder().no_proxy().build().unwrap(),
        };
        (api, server)
    }

    /// Read headers and a `Content-Length` body
    async fn read_request(socket: &mut tokio::net::TcpStream) -> String {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];
        loop {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);
            if let Some(end) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                let head = String::from_utf8_lossy(&buf[..end]).to_lowercase();
                let body_len = head
                    .lines()
                    .find_map(|line| line.strip_prefix("content-length:"))
                    .and_then(|v| v.trim().parse::<usize>().ok())
                    .unwrap_or(0);
                if buf.len() >= end + 4 + body_len {
                    break;
                }
            }
        }
        String::from_utf8_lossy(&buf).into_owned()
    }

    fn cat_session() -> Session {
        let grid = crate::core::Grid::new(vec![
            vec!['C', 'A', 'T'],
            vec!['X', 'X', 'X'],
            vec!['X', 'X', 'X'],
        ])
        .unwrap();
        let mut session = Session::new();
        session.load(DailyPuzzle {
            date: date(),
            seed: 1,
            grid,
        });
        for col in 0..3 {
            session.apply(Command::SelectCell(Coord::new(0, col)));
        }
        session.apply(Command::Confirm);
        session.take_events();
        session
    }

    #[tokio::test]
    async fn daily_sends_query_and_parses_grid() {
        let (api, server) = serve_once(
            "200 OK",
            JSON,
            r#"{"seed":7,"size":3,"grid":[["C","A","T"],["X","X","X"],["X","X","X"]]}"#,
        )
        .await;

        let puzzle = api.daily(date(), 3).await.unwrap();
        assert_eq!(puzzle.date, date());
        assert_eq!(puzzle.seed, 7);
        assert_eq!(puzzle.grid.spell(&[Coord::new(0, 0), Coord::new(0, 1)]), "CA");

        let request = server.await.unwrap();
        assert!(request.starts_with("GET /api/wordhunt/daily?date=2025-03-14&size=3 "));
    }

    #[tokio::test]
    async fn unauthorized_maps_to_unauthenticated() {
        let (api, _server) = serve_once("401 Unauthorized", JSON, "").await;
        let err = api.me(date(), "ana").await.unwrap_err();
        assert!(matches!(err, ApiError::Unauthenticated));
    }

    #[tokio::test]
    async fn missing_player_maps_to_not_found() {
        let (api, _server) = serve_once("404 Not Found", JSON, "").await;
        let err = api.me(date(), "ana").await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound));
    }

    #[tokio::test]
    async fn server_error_keeps_status_and_body() {
        let (api, _server) = serve_once("500 Internal Server Error", "text/plain", "boom").await;
        match api.leaderboard(date(), 10).await.unwrap_err() {
            ApiError::Status { status, body } => {
                assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
                assert_eq!(body, "boom");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn html_body_is_a_decode_error() {
        let (api, _server) = serve_once("200 OK", "text/html", "<html>login</html>").await;
        let err = api.leaderboard(date(), 10).await.unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[tokio::test]
    async fn submit_unauthorized_keeps_queue() {
        let (api, server) = serve_once("401 Unauthorized", JSON, "").await;
        let mut session = cat_session();

        let outcome = session.submit(&api, "ana", &[] as &[&str]).await.unwrap();
        assert_eq!(outcome, SubmitOutcome::Unauthenticated);
        assert_eq!(
            outcome.user_message().as_deref(),
            Some("Please sign in to submit.")
        );
        assert_eq!(session.queue().len(), 1);
        assert!(!session.submit_in_flight());

        let request = server.await.unwrap();
        assert!(request.starts_with("POST /api/wordhunt/submit?date=2025-03-14 "));
        assert!(request.ends_with(r#"{"username":"ana","words":["CAT"]}"#));
    }

    #[tokio::test]
    async fn submit_html_reply_fails_without_clearing() {
        let (api, _server) = serve_once("200 OK", "text/html", "<html>oops</html>").await;
        let mut session = cat_session();

        let outcome = session.submit(&api, "ana", &[] as &[&str]).await.unwrap();
        assert_eq!(outcome, SubmitOutcome::Failed);
        assert_eq!(session.queue().len(), 1);
    }

    #[tokio::test]
    async fn submit_accepted_clears_queue() {
        let (api, _server) = serve_once(
            "200 OK",
            JSON,
            r#"{"accepted":true,"message":"OK","score":1,"wordsFound":1}"#,
        )
        .await;
        let mut session = cat_session();

        let outcome = session.submit(&api, "ana", &[] as &[&str]).await.unwrap();
        assert!(outcome.is_accepted());
        assert!(session.queue().is_empty());
    }
}
