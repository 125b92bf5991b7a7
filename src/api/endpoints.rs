// Path templates relative to the routing/platform hosts chosen in `Config`.

pub const ACCOUNT_BY_RIOT_ID: &str = "/riot/account/v1/accounts/by-riot-id";
pub const MATCH_IDS_BY_PUUID: &str = "/tft/match/v1/matches/by-puuid";
pub const MATCH_BY_ID: &str = "/tft/match/v1/matches";
pub const LEAGUE_BY_PUUID: &str = "/tft/league/v1/by-puuid";
pub const CDRAGON_TFT_DATA: &str = "https://raw.communitydragon.org/latest/cdragon/tft/en_us.json";

pub fn account(base: &str, game_name: &str, tag_line: &str) -> String {
    format!("{}{}/{}/{}", base, ACCOUNT_BY_RIOT_ID, game_name, tag_line)
}

pub fn match_ids(base: &str, puuid: &str, count: usize) -> String {
    format!("{}{}/{}/ids?start=0&count={}", base, MATCH_IDS_BY_PUUID, puuid, count)
}

pub fn match_detail(base: &str, match_id: &str) -> String {
    format!("{}{}/{}", base, MATCH_BY_ID, match_id)
}

pub fn league_entries(base: &str, puuid: &str) -> String {
    format!("{}{}/{}", base, LEAGUE_BY_PUUID, puuid)
}
