//! REST client implementation.

use async_trait::async_trait;
use pokearena_core::{
    ElementType, RosterStore, ServiceError, TeamCatalog, TeamId, TeamRoster, TeamSummary,
    TypeFactorOracle,
};
use reqwest::{Method, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::catalog::{PokemonRecord, PokemonUpdate};
use crate::config::ApiConfig;
use crate::error::ApiError;

/// Body of `GET /api/type-factor/{a}/{d}`.
#[derive(Debug, Deserialize)]
struct FactorResponse {
    factor: f64,
}

/// Client for the Pokearena REST API.
///
/// Cheap to clone; clones share one connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: Url,
    http_client: reqwest::Client,
}

impl ApiClient {
    /// Creates a client from `config`.
    ///
    /// # Errors
    ///
    /// [`ApiError::InvalidUrl`] if the base URL cannot be parsed or cannot
    /// take path segments; [`ApiError::Http`] if the HTTP client cannot be
    /// built.
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|err| ApiError::InvalidUrl(format!("{}: {err}", config.base_url)))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidUrl(config.base_url.clone()));
        }
        let http_client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            base_url,
            http_client,
        })
    }

    /// The base URL requests are made against.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Lists the selectable teams (`GET /api/teams`).
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the request fails or the body is malformed.
    pub async fn list_teams(&self) -> Result<Vec<TeamSummary>, ApiError> {
        self.get(&["api", "teams"]).await
    }

    /// Fetches a team and its ordered members (`GET /api/team/{id}`).
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the request fails or the body is malformed.
    pub async fn team_roster(&self, team: &TeamId) -> Result<TeamRoster, ApiError> {
        self.get(&["api", "team", team.as_str()]).await
    }

    /// Fetches the damage multiplier for `attacker` hitting `defender`
    /// (`GET /api/type-factor/{a}/{d}`).
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the request fails or the body is malformed.
    pub async fn type_factor(
        &self,
        attacker: &ElementType,
        defender: &ElementType,
    ) -> Result<f64, ApiError> {
        let response: FactorResponse = self
            .get(&["api", "type-factor", attacker.as_str(), defender.as_str()])
            .await?;
        Ok(response.factor)
    }

    /// Lists every creature in the catalog, ordered by name (`GET /api/pokemon`).
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the request fails or the body is malformed.
    pub async fn list_pokemon(&self) -> Result<Vec<PokemonRecord>, ApiError> {
        self.get(&["api", "pokemon"]).await
    }

    /// Fetches one creature (`GET /api/pokemon/{id}`).
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the request fails, the creature does not
    /// exist, or the body is malformed.
    pub async fn pokemon(&self, id: &str) -> Result<PokemonRecord, ApiError> {
        self.get(&["api", "pokemon", id]).await
    }

    /// Rewrites one creature (`PUT /api/pokemon/{id}`) and returns the stored
    /// record.
    ///
    /// # Errors
    ///
    /// [`ApiError::Invalid`] if `update` fails validation (nothing is sent);
    /// otherwise any request or decode failure.
    pub async fn update_pokemon(
        &self,
        id: &str,
        update: &PokemonUpdate,
    ) -> Result<PokemonRecord, ApiError> {
        update.validate()?;
        let url = self.endpoint(&["api", "pokemon", id])?;
        tracing::info!(%url, name = %update.name, "updating creature");
        self.send(Method::PUT, url, Some(update)).await
    }

    /// Builds the URL for `segments` below the base URL.
    ///
    /// Each segment is percent-encoded on its own, so ids and type names can
    /// never add path levels.
    ///
    /// # Errors
    ///
    /// [`ApiError::InvalidUrl`] if the base URL cannot take path segments.
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ApiError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, ApiError> {
        let url = self.endpoint(segments)?;
        self.send::<T, ()>(Method::GET, url, None).await
    }

    async fn send<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        method: Method,
        url: Url,
        body: Option<&B>,
    ) -> Result<T, ApiError> {
        tracing::debug!(%method, %url, "api request");

        let endpoint = url.path().to_owned();
        let mut request = self.http_client.request(method, url);
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request.send().await?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            tracing::debug!(%status, %endpoint, "api request failed");
            return Err(ApiError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        serde_json::from_str(&text).map_err(|err| ApiError::Decode {
            endpoint,
            reason: err.to_string(),
        })
    }
}

#[async_trait]
impl RosterStore for ApiClient {
    async fn fetch_roster(&self, team: &TeamId) -> Result<TeamRoster, ServiceError> {
        Ok(self.team_roster(team).await?)
    }
}

#[async_trait]
impl TeamCatalog for ApiClient {
    async fn list_teams(&self) -> Result<Vec<TeamSummary>, ServiceError> {
        Ok(ApiClient::list_teams(self).await?)
    }
}

#[async_trait]
impl TypeFactorOracle for ApiClient {
    async fn factor(
        &self,
        attacker: &ElementType,
        defender: &ElementType,
    ) -> Result<f64, ServiceError> {
        Ok(self.type_factor(attacker, defender).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// Serves exactly one HTTP response and returns the request head it saw.
    async fn serve_once(status: &'static str, body: &'static str) -> (ApiClient, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut received = Vec::new();
            let mut buf = [0u8; 1024];
            loop {
                if let Some(head_end) = received.windows(4).position(|w| w == b"\r\n\r\n") {
                    let head = String::from_utf8_lossy(&received[..head_end]).to_ascii_lowercase();
                    let body_len = head
                        .lines()
                        .find_map(|line| line.strip_prefix("content-length:"))
                        .map_or(0, |len| len.trim().parse::<usize>().unwrap());
                    if received.len() >= head_end + 4 + body_len {
                        break;
                    }
                }
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                received.extend_from_slice(&buf[..n]);
            }
            let response = format!(
                "HTTP/1.1 {status}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
            String::from_utf8_lossy(&received).into_owned()
        });

        let config = ApiConfig::default().with_base_url(format!("http://{addr}"));
        (ApiClient::new(&config).unwrap(), handle)
    }

    fn client(base: &str) -> ApiClient {
        ApiClient::new(&ApiConfig::default().with_base_url(base)).unwrap()
    }

    mod endpoint_tests {
        use super::*;

        #[test]
        fn appends_segments_to_base() {
            let url = client("http://arena.test").endpoint(&["api", "teams"]).unwrap();
            assert_eq!(url.as_str(), "http://arena.test/api/teams");
        }

        #[test]
        fn keeps_base_path_and_ignores_trailing_slash() {
            let url = client("http://arena.test/v2/")
                .endpoint(&["api", "team", "7"])
                .unwrap();
            assert_eq!(url.as_str(), "http://arena.test/v2/api/team/7");
        }

        #[test]
        fn escapes_segments() {
            let url = client("http://arena.test")
                .endpoint(&["api", "type-factor", "dark/ghost", "fire"])
                .unwrap();
            assert_eq!(url.path(), "/api/type-factor/dark%2Fghost/fire");
        }

        #[test]
        fn rejects_unusable_base() {
            let config = ApiConfig::default().with_base_url("mailto:trainer@arena.test");
            assert!(matches!(ApiClient::new(&config), Err(ApiError::InvalidUrl(_))));
            let config = ApiConfig::default().with_base_url("not a url");
            assert!(matches!(ApiClient::new(&config), Err(ApiError::InvalidUrl(_))));
        }
    }

    mod request_tests {
        use super::*;

        #[tokio::test]
        async fn fetches_roster() {
            let (client, server) = serve_once(
                "200 OK",
                r#"{"team": {"id": 1, "name": "Blazers"},
                    "pokemons": [{"name": "Ember", "type": "fire", "power": 50, "life": 100}]}"#,
            )
            .await;

            let roster = client.fetch_roster(&TeamId::new("1")).await.unwrap();
            assert_eq!(roster.team.name, "Blazers");
            assert_eq!(roster.members[0].power, 50);
            assert!(server.await.unwrap().starts_with("GET /api/team/1 HTTP/1.1"));
        }

        #[tokio::test]
        async fn fetches_type_factor() {
            let (client, server) = serve_once("200 OK", r#"{"factor": 0.5}"#).await;
            let factor = client
                .factor(&ElementType::new("fire"), &ElementType::new("water"))
                .await
                .unwrap();
            assert!((factor - 0.5).abs() < f64::EPSILON);
            assert!(server
                .await
                .unwrap()
                .starts_with("GET /api/type-factor/fire/water "));
        }

        #[tokio::test]
        async fn missing_team_is_not_found() {
            let (client, _server) = serve_once("404 Not Found", r#"{"message": "no team"}"#).await;
            let err = client.fetch_roster(&TeamId::new("9")).await.unwrap_err();
            assert!(matches!(err, ServiceError::NotFound(_)));
        }

        #[tokio::test]
        async fn unexpected_body_is_malformed() {
            let (client, _server) = serve_once("200 OK", r#"{"teams": []}"#).await;
            let err = TeamCatalog::list_teams(&client).await.unwrap_err();
            assert!(matches!(err, ServiceError::Malformed(msg) if msg.contains("/api/teams")));
        }

        #[tokio::test]
        async fn update_is_sent_as_put() {
            let (client, server) = serve_once(
                "200 OK",
                r#"{"id": 4, "name": "Blaze", "image": null, "power": 60,
                    "life": 90, "type": 2, "typeName": "fire"}"#,
            )
            .await;
            let update = PokemonUpdate {
                name: "Blaze".into(),
                power: 60,
                life: 90,
                type_name: "fire".into(),
                image: None,
            };

            let stored = client.update_pokemon("4", &update).await.unwrap();
            assert_eq!(stored.name, "Blaze");
            assert!(server.await.unwrap().starts_with("PUT /api/pokemon/4 HTTP/1.1"));
        }

        #[tokio::test]
        async fn invalid_update_is_never_sent() {
            let client = client("http://127.0.0.1:9");
            let update = PokemonUpdate {
                name: String::new(),
                power: 60,
                life: 90,
                type_name: "fire".into(),
                image: None,
            };
            let err = client.update_pokemon("4", &update).await.unwrap_err();
            assert!(matches!(err, ApiError::Invalid(_)));
        }
    }
}
