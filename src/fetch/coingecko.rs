use log::debug;
use reqwest::blocking::Client;
use reqwest::header::ACCEPT;
use serde_json::Value;

use crate::config::ApiConfig;
use crate::error::FetchError;
use crate::symbol::Symbol;

use super::decode::extract_quote;
use super::QuoteSource;

const USER_AGENT: &str = concat!("crypto-tracker/", env!("CARGO_PKG_VERSION"));

/// Spot quotes from CoinGecko's `/simple/price` endpoint.
pub struct CoinGeckoClient {
    client: Client,
    endpoint: String,
    vs_currency: String,
}

impl CoinGeckoClient {
    pub fn new(config: &ApiConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(USER_AGENT)
            .build()?;
        let endpoint = format!("{}/simple/price", config.base_url.trim_end_matches('/'));

        Ok(Self {
            client,
            endpoint,
            vs_currency: config.vs_currency.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl QuoteSource for CoinGeckoClient {
    fn fetch(&self, symbol: &Symbol) -> Result<f64, FetchError> {
        debug!("Requesting {} quote for {}", self.vs_currency, symbol);

        let body: Value = self
            .client
            .get(&self.endpoint)
            .header(ACCEPT, "application/json")
            .query(&[
                ("ids", symbol.key()),
                ("vs_currencies", self.vs_currency.as_str()),
            ])
            .send()?
            .error_for_status()?
            .json()?;

        extract_quote(&body, symbol.key(), &self.vs_currency)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn config(base_url: &str) -> ApiConfig {
        ApiConfig {
            base_url: base_url.to_string(),
            vs_currency: "usd".to_string(),
            timeout: Duration::from_secs(1),
        }
    }

    #[test]
    fn builds_simple_price_endpoint() {
        let client = CoinGeckoClient::new(&config("https://api.coingecko.com/api/v3/")).unwrap();
        assert_eq!(
            client.endpoint(),
            "https://api.coingecko.com/api/v3/simple/price"
        );
    }

    #[test]
    fn unreachable_host_is_a_fetch_error() {
        // Nothing listens on port 9 locally; the connection is refused.
        let client = CoinGeckoClient::new(&config("http://127.0.0.1:9")).unwrap();
        let err = client
            .fetch(&Symbol::parse("bitcoin").unwrap())
            .expect_err("fetch should fail");
        assert!(matches!(err, FetchError::Http(_)), "got: {err}");
    }
}
