//! Kakao Local API geocoder.
//!
//! `GET {base_url}/v2/local/search/address.json?query=<address>` with
//! `Authorization: KakaoAK <key>`. The first matching document's `y`/`x`
//! strings are the latitude/longitude.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use crate::config::GeocoderSettings;
use crate::domain::{Coordinates, GeocodeError, Geocoder};
use crate::infrastructure::metrics;

const ADDRESS_SEARCH_PATH: &str = "/v2/local/search/address.json";

#[derive(Debug, Deserialize)]
struct AddressSearchResponse {
    #[serde(default)]
    documents: Vec<AddressDocument>,
}

#[derive(Debug, Deserialize)]
struct AddressDocument {
    /// Longitude
    x: String,
    /// Latitude
    y: String,
}

/// Geocoder backed by the Kakao Local address search.
#[derive(Debug, Clone)]
pub struct KakaoGeocoder {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl KakaoGeocoder {
    pub fn new(settings: &GeocoderSettings) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            api_key: settings.api_key.clone(),
        })
    }

    async fn search(&self, address: &str) -> Result<Coordinates, GeocodeError> {
        let response = self
            .client
            .get(format!("{}{}", self.base_url, ADDRESS_SEARCH_PATH))
            .header(reqwest::header::AUTHORIZATION, format!("KakaoAK {}", self.api_key))
            .query(&[("query", address)])
            .send()
            .await
            .map_err(|e| GeocodeError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GeocodeError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: AddressSearchResponse = response
            .json()
            .await
            .map_err(|e| GeocodeError::MalformedResponse(e.to_string()))?;

        first_match(parsed)
    }
}

fn first_match(response: AddressSearchResponse) -> Result<Coordinates, GeocodeError> {
    let document = response
        .documents
        .into_iter()
        .next()
        .ok_or(GeocodeError::NoMatch)?;

    let latitude = document
        .y
        .trim()
        .parse::<f64>()
        .map_err(|_| GeocodeError::MalformedResponse(format!("invalid latitude '{}'", document.y)))?;
    let longitude = document
        .x
        .trim()
        .parse::<f64>()
        .map_err(|_| GeocodeError::MalformedResponse(format!("invalid longitude '{}'", document.x)))?;

    let coordinates = Coordinates::new(latitude, longitude);
    if !coordinates.is_in_range() {
        return Err(GeocodeError::MalformedResponse(format!(
            "coordinates out of range: [{}, {}]",
            latitude, longitude
        )));
    }

    Ok(coordinates)
}

#[async_trait]
impl Geocoder for KakaoGeocoder {
    async fn coordinates_from_address(&self, address: &str) -> Result<Coordinates, GeocodeError> {
        let address = address.trim();
        if address.is_empty() {
            metrics::record_geocoding("rejected");
            return Err(GeocodeError::EmptyAddress);
        }

        let result = self.search(address).await;
        match &result {
            Ok(c) => {
                metrics::record_geocoding("success");
                tracing::debug!(address = %address, latitude = c.latitude, longitude = c.longitude, "Geocoded address");
            }
            Err(GeocodeError::NoMatch) => metrics::record_geocoding("no_match"),
            Err(e) => {
                metrics::record_geocoding("error");
                tracing::warn!(address = %address, error = %e, "Geocoding request failed");
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{extract::Query, http::HeaderMap, http::StatusCode, routing::get, Json, Router};
    use serde_json::{json, Value};
    use std::collections::HashMap;
    use tokio::net::TcpListener;

    async fn address_search(
        headers: HeaderMap,
        Query(params): Query<HashMap<String, String>>,
    ) -> (StatusCode, Json<Value>) {
        if headers.get("authorization").and_then(|v| v.to_str().ok()) != Some("KakaoAK test-key") {
            return (StatusCode::UNAUTHORIZED, Json(json!({ "message": "bad key" })));
        }
        match params.get("query").map(String::as_str) {
            Some("서울특별시 중구 세종대로 110") => (
                StatusCode::OK,
                Json(json!({
                    "documents": [
                        { "address_name": "서울 중구 태평로1가 31", "x": "126.978652258823", "y": "37.5667517915869" }
                    ],
                    "meta": { "total_count": 1 }
                })),
            ),
            Some("broken") => (
                StatusCode::OK,
                Json(json!({ "documents": [ { "x": "east", "y": "north" } ] })),
            ),
            _ => (StatusCode::OK, Json(json!({ "documents": [], "meta": { "total_count": 0 } }))),
        }
    }

    async fn geocoder(api_key: &str) -> KakaoGeocoder {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let app = Router::new().route(ADDRESS_SEARCH_PATH, get(address_search));
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        KakaoGeocoder::new(&GeocoderSettings {
            base_url: format!("http://{}/", addr),
            api_key: api_key.into(),
            timeout_secs: 5,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_resolves_first_document() {
        let coordinates = geocoder("test-key")
            .await
            .coordinates_from_address("서울특별시 중구 세종대로 110")
            .await
            .unwrap();

        assert!((coordinates.latitude - 37.5667517915869).abs() < 1e-9);
        assert!((coordinates.longitude - 126.978652258823).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_no_documents_is_no_match() {
        let err = geocoder("test-key")
            .await
            .coordinates_from_address("nowhere")
            .await
            .unwrap_err();
        assert!(matches!(err, GeocodeError::NoMatch));
    }

    #[tokio::test]
    async fn test_unparseable_coordinates_are_malformed() {
        let err = geocoder("test-key")
            .await
            .coordinates_from_address("broken")
            .await
            .unwrap_err();
        assert!(matches!(err, GeocodeError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn test_http_error_status_is_reported() {
        let err = geocoder("wrong-key")
            .await
            .coordinates_from_address("서울특별시 중구 세종대로 110")
            .await
            .unwrap_err();
        assert!(matches!(err, GeocodeError::Status { status: 401, .. }));
    }

    #[tokio::test]
    async fn test_blank_address_is_rejected_without_request() {
        let geocoder = KakaoGeocoder::new(&GeocoderSettings {
            base_url: "http://127.0.0.1:9".into(),
            api_key: "k".into(),
            timeout_secs: 1,
        })
        .unwrap();
        let err = geocoder.coordinates_from_address("   ").await.unwrap_err();
        assert!(matches!(err, GeocodeError::EmptyAddress));
    }

    #[test]
    fn test_out_of_range_coordinates_are_malformed() {
        let response = AddressSearchResponse {
            documents: vec![AddressDocument {
                x: "500".into(),
                y: "37.5".into(),
            }],
        };
        assert!(matches!(first_match(response), Err(GeocodeError::MalformedResponse(_))));
    }
}
