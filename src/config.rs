use crate::api::endpoints;
use crate::error::AppError;
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub region: String,
    pub match_api_url: Option<String>,
    pub league_api_url: Option<String>,
    pub static_data_url: String,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let api_key = env::var("RIOT_API_KEY").map_err(|_| {
            AppError::ConfigError("RIOT_API_KEY not found in environment or .env file".to_string())
        })?;

        let region = env::var("RIOT_REGION").unwrap_or_else(|_| "na1".to_string());

        Ok(Config {
            api_key,
            region,
            match_api_url: env::var("RIOT_MATCH_API_URL").ok(),
            league_api_url: env::var("RIOT_LEAGUE_API_URL").ok(),
            static_data_url: env::var("CDRAGON_URL")
                .unwrap_or_else(|_| endpoints::CDRAGON_TFT_DATA.to_string()),
        })
    }

    fn regional_routing(&self) -> &str {
        match self.region.as_str() {
            "na1" | "br1" | "la1" | "la2" => "americas",
            "euw1" | "eun1" | "tr1" | "ru" | "me1" => "europe",
            "kr" | "jp1" => "asia",
            "oc1" | "ph2" | "sg2" | "th2" | "tw2" | "vn2" => "sea",
            _ => "americas",
        }
    }

    /// Host serving account and match endpoints.
    pub fn match_base(&self) -> String {
        match &self.match_api_url {
            Some(url) => url.trim_end_matches('/').to_string(),
            None => format!("https://{}.api.riotgames.com", self.regional_routing()),
        }
    }

    /// Host serving league endpoints.
    pub fn league_base(&self) -> String {
        match &self.league_api_url {
            Some(url) => url.trim_end_matches('/').to_string(),
            None => format!("https://{}.api.riotgames.com", self.region),
        }
    }
}
