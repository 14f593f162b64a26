//! Reverse geocoding, i.e. turning a click on the map into an address
//!
//! This is the only async part of this crate. A lookup never blocks nor fails any other operation: failures just end up as a placeholder address.

use std::error::Error;

use async_trait::async_trait;
use reqwest::header::USER_AGENT;
use serde::Deserialize;
use url::Url;

use crate::config;
use crate::traits::Geocoder;


/// A [`Geocoder`] that queries a Nominatim (OpenStreetMap) server
pub struct NominatimGeocoder {
    client: reqwest::Client,
    url: Url,
    user_agent: String,
}

impl NominatimGeocoder {
    pub fn new(url: Url, user_agent: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            url,
            user_agent,
        }
    }

    fn request_url(&self, lat: f64, lng: f64) -> Url {
        let mut url = self.url.clone();
        url.query_pairs_mut()
            .append_pair("format", "json")
            .append_pair("lat", &lat.to_string())
            .append_pair("lon", &lng.to_string());
        url
    }
}

impl Default for NominatimGeocoder {
    /// Uses the [`GEOCODING_URL`](config::GEOCODING_URL) and [`USER_AGENT`](config::USER_AGENT) settings
    fn default() -> Self {
        let url = config::GEOCODING_URL.lock().unwrap().clone();
        let user_agent = config::USER_AGENT.lock().unwrap().clone();
        Self::new(url, user_agent)
    }
}

#[derive(Deserialize)]
struct ReverseResponse {
    display_name: Option<String>,
}

#[async_trait]
impl Geocoder for NominatimGeocoder {
    async fn reverse(&self, lat: f64, lng: f64) -> Result<String, Box<dyn Error>> {
        let url = self.request_url(lat, lng);
        log::debug!("Reverse geocoding {}", url);

        let response = self.client
            .get(url)
            .header(USER_AGENT, self.user_agent.as_str())
            .send()
            .await?;

        let status = response.status();
        if status.is_success() == false {
            return Err(format!("Unexpected HTTP status: {}", status).into());
        }

        let text = response.text().await?;
        let parsed: ReverseResponse = serde_json::from_str(&text)?;
        Ok(parsed.display_name.unwrap_or_else(|| config::ADDRESS_NOT_FOUND.to_string()))
    }
}


/// Look up an address, falling back to a placeholder when the lookup fails
pub async fn resolve_address<G>(geocoder: &G, lat: f64, lng: f64) -> String
where
    G: Geocoder + ?Sized,
{
    match geocoder.reverse(lat, lng).await {
        Ok(address) => address,
        Err(err) => {
            log::warn!("Reverse geocoding of ({}, {}) failed: {}", lat, lng, err);
            config::ADDRESS_LOOKUP_FAILED.to_string()
        },
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::LocationForm;

    struct FixedGeocoder(&'static str);

    #[async_trait]
    impl Geocoder for FixedGeocoder {
        async fn reverse(&self, _lat: f64, _lng: f64) -> Result<String, Box<dyn Error>> {
            Ok(self.0.to_string())
        }
    }

    struct OfflineGeocoder;

    #[async_trait]
    impl Geocoder for OfflineGeocoder {
        async fn reverse(&self, _lat: f64, _lng: f64) -> Result<String, Box<dyn Error>> {
            Err("network is unreachable".into())
        }
    }

    #[test]
    fn nominatim_query_string() {
        let geocoder = NominatimGeocoder::new(Url::parse("https://geo.example.com/reverse").unwrap(), "test".to_string());
        let url = geocoder.request_url(28.5, 77.25);
        assert_eq!(url.as_str(), "https://geo.example.com/reverse?format=json&lat=28.5&lon=77.25");
    }

    #[tokio::test]
    async fn failure_falls_back_to_placeholder() {
        let _ = env_logger::builder().is_test(true).try_init();

        assert_eq!(resolve_address(&OfflineGeocoder, 1.0, 2.0).await, config::ADDRESS_LOOKUP_FAILED);
        assert_eq!(resolve_address(&FixedGeocoder("Lodhi Garden"), 1.0, 2.0).await, "Lodhi Garden");
    }

    #[tokio::test]
    async fn map_click_fills_the_location_form() {
        let mut form = LocationForm::new();
        form.name = "Park".to_string();
        form.pick_on_map(28.5931, 77.2215, &FixedGeocoder("Lodhi Garden, New Delhi")).await;
        assert_eq!(form.address, "Lodhi Garden, New Delhi");
        assert_eq!(form.coords(), Some((28.5931, 77.2215)));
        assert!(form.is_geocoding() == false);
        assert!(form.submit().is_some());

        let geocoder: Box<dyn Geocoder> = Box::new(OfflineGeocoder);
        form.pick_on_map(1.0, 2.0, geocoder.as_ref()).await;
        assert_eq!(form.address, config::ADDRESS_LOOKUP_FAILED);
    }
}
