use serde::Deserialize;

#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    pub city: Option<String>,
    pub region: Option<String>,
    pub country: Option<String>,
}

impl Location {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude, city: None, region: None, country: None }
    }

    pub fn display(&self) -> String {
        format!("Latitude: {}, Longitude: {}", self.latitude, self.longitude)
    }

    /// "City, Region, Country" from whichever parts the provider returned.
    pub fn place(&self) -> Option<String> {
        let parts: Vec<&str> = [&self.city, &self.region, &self.country]
            .into_iter()
            .filter_map(|p| p.as_deref())
            .filter(|p| !p.is_empty())
            .collect();
        if parts.is_empty() { None } else { Some(parts.join(", ")) }
    }

    pub fn maps_url(&self) -> String {
        format!("https://maps.google.com/?q={},{}", self.latitude, self.longitude)
    }
}

/// Raw ipinfo-style response; `loc` is `"lat,lng"`.
#[derive(Debug, Deserialize)]
pub struct IpInfo {
    pub loc: Option<String>,
    pub city: Option<String>,
    pub region: Option<String>,
    pub country: Option<String>,
}

/// Twilio message resource, trimmed to what we read.
#[derive(Debug, Clone, Deserialize)]
pub struct SentMessage {
    pub sid: String,
    #[serde(default)]
    pub status: Option<String>,
}
