use crate::domain::UsageCount;
use std::collections::HashMap;

/// Occurrence counter that remembers the order in which names first appeared.
#[derive(Debug, Default)]
pub struct UsageTracker {
    index: HashMap<String, usize>,
    counts: Vec<UsageCount>,
}

impl UsageTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, name: &str) {
        match self.index.get(name) {
            Some(&slot) => self.counts[slot].count += 1,
            None => {
                self.index.insert(name.to_string(), self.counts.len());
                self.counts.push(UsageCount {
                    name: name.to_string(),
                    count: 1,
                });
            }
        }
    }

    /// Highest counts first; equal counts keep first-seen order.
    pub fn top(&self, n: usize) -> Vec<UsageCount> {
        let mut ranked = self.counts.clone();
        // `sort_by` is stable, which is what keeps the tie-break deterministic.
        ranked.sort_by(|a, b| b.count.cmp(&a.count));
        ranked.truncate(n);
        ranked
    }
}
