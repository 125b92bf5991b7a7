use crate::api::models::StaticDataDto;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq)]
pub struct UnitInfo {
    pub name: String,
    pub cost: u32,
}

/// Resolves provider identifiers (`TFT13_Jinx`) into display data.
pub trait NameResolver {
    fn resolve_unit(&self, id: &str) -> Option<&UnitInfo>;
    fn resolve_trait(&self, id: &str) -> Option<&str>;
}

#[derive(Debug, Clone, Default)]
pub struct NameMapping {
    units: HashMap<String, UnitInfo>,
    traits: HashMap<String, String>,
}

impl NameMapping {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn with_unit(mut self, id: &str, name: &str, cost: u32) -> Self {
        self.units.insert(
            id.to_string(),
            UnitInfo {
                name: name.to_string(),
                cost,
            },
        );
        self
    }

    #[cfg(test)]
    pub fn with_trait(mut self, id: &str, name: &str) -> Self {
        self.traits.insert(id.to_string(), name.to_string());
        self
    }

    /// Flattens every set of the static payload. Set keys are numeric strings,
    /// so walking them in numeric order lets newer sets win on shared ids.
    pub fn from_static_data(data: StaticDataDto) -> Self {
        let mut sets: Vec<_> = data.sets.into_iter().collect();
        sets.sort_by_key(|(key, _)| key.parse::<u32>().unwrap_or(0));

        let mut mapping = NameMapping::new();
        for (_, set) in sets {
            for champion in set.champions {
                mapping.units.insert(
                    champion.api_name,
                    UnitInfo {
                        name: champion.name,
                        cost: champion.cost,
                    },
                );
            }
            for t in set.traits {
                mapping.traits.insert(t.api_name, t.name);
            }
        }
        mapping
    }

    pub fn unit_count(&self) -> usize {
        self.units.len()
    }

    pub fn trait_count(&self) -> usize {
        self.traits.len()
    }
}

impl NameResolver for NameMapping {
    fn resolve_unit(&self, id: &str) -> Option<&UnitInfo> {
        self.units.get(id)
    }

    fn resolve_trait(&self, id: &str) -> Option<&str> {
        self.traits.get(id).map(String::as_str)
    }
}
