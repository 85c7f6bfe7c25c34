use crate::api::client::{ApiClient, ApiError};
use crate::api::models::{IpInfo, Location};
use crate::dispatch::LocationProvider;
use url::Url;

/// IP-based geolocation against an ipinfo-compatible endpoint.
pub struct GeoClient {
    api: ApiClient,
    endpoint: Url,
}

impl GeoClient {
    pub fn new(api: ApiClient, endpoint: &str) -> Result<Self, ApiError> {
        Ok(Self { api, endpoint: Url::parse(endpoint)? })
    }

    pub async fn lookup(&self) -> Result<Location, ApiError> {
        let resp = self.api.http.get(self.endpoint.clone()).send().await?;
        let resp = ApiClient::check(resp).await?;
        let info: IpInfo = resp.json().await?;
        let location = parse_ipinfo(info)?;
        log::info!("Located at {}", location.display());
        Ok(location)
    }
}

impl LocationProvider for GeoClient {
    async fn locate(&self) -> Result<Location, ApiError> {
        self.lookup().await
    }
}

pub(crate) fn parse_ipinfo(info: IpInfo) -> Result<Location, ApiError> {
    let loc = info
        .loc
        .as_deref()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .ok_or_else(|| ApiError::Payload("no coordinates in response".into()))?;
    let (lat, lng) = loc
        .split_once(',')
        .ok_or_else(|| ApiError::Payload(format!("malformed loc {loc:?}")))?;
    let parse = |s: &str| {
        s.trim()
            .parse::<f64>()
            .map_err(|_| ApiError::Payload(format!("malformed loc {loc:?}")))
    };
    let latitude = parse(lat)?;
    let longitude = parse(lng)?;
    if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
        return Err(ApiError::Payload(format!("coordinates out of range {loc:?}")));
    }
    Ok(Location {
        city: info.city,
        region: info.region,
        country: info.country,
        ..Location::new(latitude, longitude)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_server::{local_api, serve_once};

    #[tokio::test]
    async fn lookup_reads_ipinfo_over_http() {
        let (base, server) = serve_once(
            200,
            r#"{"ip": "203.0.113.7", "city": "Pune", "region": "Maharashtra", "country": "IN", "loc": "18.5196,73.8553"}"#,
        )
        .await;
        let geo = GeoClient::new(local_api(), &format!("{base}/json")).unwrap();

        let loc = geo.lookup().await.unwrap();
        assert_eq!(loc.display(), "Latitude: 18.5196, Longitude: 73.8553");
        assert_eq!(loc.place().as_deref(), Some("Pune, Maharashtra, IN"));
        assert_eq!(server.await.unwrap().request_line, "GET /json HTTP/1.1");
    }

    #[tokio::test]
    async fn lookup_surfaces_http_errors() {
        let (base, server) = serve_once(429, r#"{"error": "rate limit exceeded"}"#).await;
        let geo = GeoClient::new(local_api(), &format!("{base}/json")).unwrap();

        let err = geo.lookup().await.unwrap_err();
        assert!(
            matches!(&err, ApiError::Status { status: 429, message } if message == "rate limit exceeded"),
            "{err:?}"
        );
        server.await.unwrap();
    }

    fn info(json: &str) -> IpInfo {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn parses_ipinfo_payload() {
        let loc = parse_ipinfo(info(
            r#"{"ip": "8.8.8.8", "city": "Mountain View", "region": "California",
                "country": "US", "loc": "37.4056,-122.0775"}"#,
        ))
        .unwrap();
        assert_eq!(loc.latitude, 37.4056);
        assert_eq!(loc.longitude, -122.0775);
        assert_eq!(loc.city.as_deref(), Some("Mountain View"));
    }

    #[test]
    fn missing_or_malformed_loc_is_payload_error() {
        for body in [
            r#"{"ip": "10.0.0.1", "bogon": true}"#,
            r#"{"loc": ""}"#,
            r#"{"loc": "37.4"}"#,
            r#"{"loc": "north,west"}"#,
            r#"{"loc": "137.0,10.0"}"#,
        ] {
            assert!(matches!(parse_ipinfo(info(body)), Err(ApiError::Payload(_))), "{body}");
        }
    }

    #[test]
    fn rejects_bad_endpoint() {
        let api = ApiClient::new(std::time::Duration::from_secs(1)).unwrap();
        assert!(matches!(GeoClient::new(api, "not a url"), Err(ApiError::Url(_))));
    }
}
