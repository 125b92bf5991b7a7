use crate::api::models::{MatchDto, ParticipantDto, UnitDto};
use crate::domain::{MatchSummary, TraitSummary, UnitSummary};
use crate::error::AppError;
use crate::mapping::NameResolver;
use chrono::{DateTime, SecondsFormat};

pub struct MatchNormalizer;

impl MatchNormalizer {
    /// Reduces a provider match to the queried player's view of it.
    ///
    /// Pure: the same record and mapping always give the same summary.
    /// Unknown unit/trait ids fall back to the raw id; only a record that
    /// does not contain the player, or carries impossible values, is rejected.
    pub fn normalize(
        raw: &MatchDto,
        player_id: &str,
        names: &impl NameResolver,
    ) -> Result<MatchSummary, AppError> {
        let match_id = raw.metadata.match_id.as_str();

        let participant = raw
            .info
            .participants
            .iter()
            .find(|p| p.puuid == player_id)
            .ok_or_else(|| {
                integrity(match_id, format!("player {} is not a participant", player_id))
            })?;

        if !(1..=8).contains(&participant.placement) {
            return Err(integrity(
                match_id,
                format!("placement {} outside 1-8", participant.placement),
            ));
        }

        let datetime = DateTime::from_timestamp_millis(raw.info.game_datetime)
            .ok_or_else(|| integrity(match_id, format!("bad timestamp {}", raw.info.game_datetime)))?
            .to_rfc3339_opts(SecondsFormat::Millis, true);

        Ok(MatchSummary {
            match_id: match_id.to_string(),
            datetime,
            placement: participant.placement,
            level: participant.level,
            gold_left: participant.gold_left,
            last_round: participant.last_round,
            damage_dealt: participant.total_damage_to_players,
            traits: active_traits(participant, names),
            units: participant.units.iter().map(|u| unit_summary(u, names)).collect(),
        })
    }
}

fn integrity(match_id: &str, reason: String) -> AppError {
    AppError::DataIntegrity {
        match_id: match_id.to_string(),
        reason,
    }
}

fn active_traits(participant: &ParticipantDto, names: &impl NameResolver) -> Vec<TraitSummary> {
    participant
        .traits
        .iter()
        .filter(|t| t.style > 0)
        .map(|t| TraitSummary {
            name: names.resolve_trait(&t.name).unwrap_or(t.name.as_str()).to_string(),
            units: t.num_units,
        })
        .collect()
}

fn unit_summary(unit: &UnitDto, names: &impl NameResolver) -> UnitSummary {
    let (name, cost) = match names.resolve_unit(&unit.character_id) {
        Some(info) => (info.name.clone(), info.cost),
        None => (unit.character_id.clone(), 0),
    };

    // Newer payloads name items, older ones number them.
    let items = if unit.item_names.is_empty() {
        unit.items.iter().map(|id| id.to_string()).collect()
    } else {
        unit.item_names.clone()
    };

    UnitSummary {
        name,
        tier: unit.tier.filter(|&t| t > 0).unwrap_or(1),
        cost,
        items,
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::api::models::{MatchInfo, MatchMetadata, TraitDto};
    use crate::mapping::NameMapping;

    pub(crate) fn participant(puuid: &str, placement: u8) -> ParticipantDto {
        ParticipantDto {
            puuid: puuid.to_string(),
            placement,
            level: 8,
            gold_left: 12,
            last_round: 33,
            total_damage_to_players: 97,
            traits: vec![
                TraitDto {
                    name: "TFT13_Sorcerer".to_string(),
                    num_units: 4,
                    style: 2,
                },
                TraitDto {
                    name: "TFT13_Bruiser".to_string(),
                    num_units: 1,
                    style: 0,
                },
                TraitDto {
                    name: "TFT13_Mystery".to_string(),
                    num_units: 2,
                    style: 1,
                },
            ],
            units: vec![
                UnitDto {
                    character_id: "TFT13_Ahri".to_string(),
                    tier: Some(2),
                    items: vec![],
                    item_names: vec!["TFT_Item_JeweledGauntlet".to_string()],
                },
                UnitDto {
                    character_id: "TFT13_NewChamp".to_string(),
                    tier: None,
                    items: vec![44],
                    item_names: vec![],
                },
            ],
        }
    }

    pub(crate) fn raw_match(match_id: &str, participants: Vec<ParticipantDto>) -> MatchDto {
        MatchDto {
            metadata: MatchMetadata {
                match_id: match_id.to_string(),
                participants: participants.iter().map(|p| p.puuid.clone()).collect(),
            },
            info: MatchInfo {
                game_datetime: 1_700_000_000_000,
                participants,
            },
        }
    }

    pub(crate) fn mapping() -> NameMapping {
        NameMapping::new()
            .with_unit("TFT13_Ahri", "Ahri", 3)
            .with_trait("TFT13_Sorcerer", "Sorcerer")
    }

    #[test]
    fn keeps_only_active_traits_with_resolved_names() {
        let raw = raw_match("NA1_1", vec![participant("other", 1), participant("me", 3)]);
        let summary = MatchNormalizer::normalize(&raw, "me", &mapping()).unwrap();

        assert_eq!(summary.placement, 3);
        assert_eq!(
            summary.traits,
            vec![
                TraitSummary {
                    name: "Sorcerer".to_string(),
                    units: 4
                },
                TraitSummary {
                    name: "TFT13_Mystery".to_string(),
                    units: 2
                },
            ]
        );
    }

    #[test]
    fn unmapped_unit_falls_back_to_raw_id() {
        let raw = raw_match("NA1_1", vec![participant("me", 5)]);
        let summary = MatchNormalizer::normalize(&raw, "me", &mapping()).unwrap();

        assert_eq!(
            summary.units[0],
            UnitSummary {
                name: "Ahri".to_string(),
                tier: 2,
                cost: 3,
                items: vec!["TFT_Item_JeweledGauntlet".to_string()],
            }
        );
        assert_eq!(
            summary.units[1],
            UnitSummary {
                name: "TFT13_NewChamp".to_string(),
                tier: 1,
                cost: 0,
                items: vec!["44".to_string()],
            }
        );
    }

    #[test]
    fn timestamp_is_iso_utc() {
        let raw = raw_match("NA1_1", vec![participant("me", 1)]);
        let summary = MatchNormalizer::normalize(&raw, "me", &mapping()).unwrap();
        assert_eq!(summary.datetime, "2023-11-14T22:13:20.000Z");
    }

    #[test]
    fn missing_participant_is_tagged_integrity_error() {
        let raw = raw_match("NA1_9", vec![participant("someone", 1)]);
        match MatchNormalizer::normalize(&raw, "me", &mapping()) {
            Err(AppError::DataIntegrity { match_id, .. }) => assert_eq!(match_id, "NA1_9"),
            other => panic!("expected integrity error, got {:?}", other),
        }
    }

    #[test]
    fn out_of_range_placement_is_rejected() {
        let raw = raw_match("NA1_2", vec![participant("me", 0)]);
        assert!(matches!(
            MatchNormalizer::normalize(&raw, "me", &mapping()),
            Err(AppError::DataIntegrity { .. })
        ));
    }

    #[test]
    fn normalizing_twice_is_identical() {
        let raw = raw_match("NA1_3", vec![participant("me", 4)]);
        let names = mapping();
        let first = MatchNormalizer::normalize(&raw, "me", &names).unwrap();
        let second = MatchNormalizer::normalize(&raw, "me", &names).unwrap();
        assert_eq!(first, second);
    }
}
