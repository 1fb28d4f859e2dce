use crate::catalog::StatCatalog;
use crate::error::{StatsError, StatsResult};
use crate::{CategoryMatchupResult, Entity, Outcome, StatId, StatIdSet, find_entity};
use log::{debug, warn};
use std::collections::BTreeMap;

/// What to do with an eligible value that cannot be compared numerically.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MalformedPolicy {
    /// Count unparseable, unavailable or missing values as 0.0 and keep going.
    #[default]
    ZeroFill,
    /// Fail the whole computation on the first such value.
    Reject,
}

/// Head-to-head category results of one entity against the rest of a
/// collection, honoring the catalog's lower-is-better categories.
#[derive(Debug, Clone, Copy, Default)]
pub struct MatchupEngine {
    pub catalog: StatCatalog,
    pub policy: MalformedPolicy,
}

impl MatchupEngine {
    pub fn new(catalog: StatCatalog, policy: MalformedPolicy) -> Self {
        Self { catalog, policy }
    }

    /// One result per entity other than `home_name`, in collection order.
    /// Categories within a result follow ascending stat ID.
    pub fn compute(
        &self,
        home_name: &str,
        entities: &[Entity],
        eligible: &StatIdSet,
    ) -> StatsResult<Vec<CategoryMatchupResult>> {
        let (home_idx, home) = find_entity(entities, home_name)?;

        let table = entities
            .iter()
            .map(|entity| self.value_row(entity, eligible))
            .collect::<StatsResult<Vec<_>>>()?;
        let home_row = &table[home_idx];

        let results = entities
            .iter()
            .zip(&table)
            .enumerate()
            .filter(|(idx, _)| *idx != home_idx)
            .map(|(_, (away, away_row))| {
                let mut result = CategoryMatchupResult::new(&home.name, &away.name);
                for &stat_id in eligible {
                    let outcome = self.compare(stat_id, home_row[&stat_id], away_row[&stat_id]);
                    match outcome {
                        Outcome::Won => result.won.push(stat_id),
                        Outcome::Lost => result.lost.push(stat_id),
                        Outcome::Tied => result.tied.push(stat_id),
                    }
                }
                result
            })
            .collect::<Vec<_>>();

        debug!(
            "computed {} category matchups for {:?} over {} categories",
            results.len(),
            home.name,
            eligible.len()
        );
        Ok(results)
    }

    /// Outcome of one category from the home side. No epsilon: only
    /// bit-equal values tie.
    pub fn compare(&self, stat_id: StatId, home: f64, away: f64) -> Outcome {
        let (better, worse) = if self.catalog.is_inverse(stat_id) {
            (home < away, home > away)
        } else {
            (home > away, home < away)
        };
        if better {
            Outcome::Won
        } else if worse {
            Outcome::Lost
        } else {
            Outcome::Tied
        }
    }

    fn value_row(&self, entity: &Entity, eligible: &StatIdSet) -> StatsResult<BTreeMap<StatId, f64>> {
        eligible
            .iter()
            .map(|&stat_id| {
                let parsed = entity.value_of(stat_id).map(|v| v.parse());
                let value = match (parsed, self.policy) {
                    (Some(Some(Ok(v))), _) => v,
                    (None, _) => {
                        debug!("{:?} has no value for stat {stat_id}, using 0", entity.name);
                        0.0
                    }
                    (Some(None), MalformedPolicy::ZeroFill) => 0.0,
                    (Some(Some(Err(raw))), MalformedPolicy::ZeroFill) => {
                        warn!("malformed value {raw:?} for {:?} (stat {stat_id}), using 0", entity.name);
                        0.0
                    }
                    (Some(None), MalformedPolicy::Reject) => {
                        return Err(StatsError::StatUnavailable { entity: entity.name.clone(), stat_id });
                    }
                    (Some(Some(Err(raw))), MalformedPolicy::Reject) => {
                        return Err(StatsError::MalformedValue {
                            entity: entity.name.clone(),
                            stat_id,
                            value: raw.to_owned(),
                        });
                    }
                };
                Ok((stat_id, value))
            })
            .collect()
    }
}

/// Matchups with the NBA catalog and zero-fill for bad values.
pub fn compute_matchups(
    home_name: &str,
    entities: &[Entity],
    eligible: &StatIdSet,
) -> StatsResult<Vec<CategoryMatchupResult>> {
    MatchupEngine::default().compute(home_name, entities, eligible)
}
