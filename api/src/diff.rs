use crate::error::{StatsError, StatsResult};
use crate::{Entity, StatEntry, StatId, StatIdSet, StatValue, StatsDiff};
use log::debug;

/// How the second entity's value for a category is located.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Alignment {
    /// Look the value up by stat ID. Categories missing from B are skipped.
    #[default]
    ByStatId,
    /// The Nth entry of A is compared with the Nth entry of B. Vectors of
    /// different lengths, or a differing stat ID at an eligible position, are
    /// a `MisalignedVectors` error.
    Positional,
}

/// Signed stat differences between two entities. All-or-nothing: any
/// unavailable or malformed eligible value aborts the whole diff, and the
/// error reported is the first one met walking A's vector in order.
/// A stat ID repeated in A is diffed once, from its first occurrence.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiffEngine {
    pub alignment: Alignment,
}

impl DiffEngine {
    pub fn new(alignment: Alignment) -> Self {
        Self { alignment }
    }

    pub fn compute(&self, a: &Entity, b: &Entity, eligible: &StatIdSet) -> StatsResult<StatsDiff> {
        let mut diff = StatsDiff {
            entity_a: a.name.clone(),
            entity_b: b.name.clone(),
            ..Default::default()
        };

        if self.alignment == Alignment::Positional && a.stats.len() != b.stats.len() {
            let position = a.stats.len().min(b.stats.len());
            return Err(StatsError::MisalignedVectors {
                position,
                expected: a.stats.get(position).map(|e| e.stat_id),
                found: b.stats.get(position).map(|e| e.stat_id),
            });
        }

        for (position, entry) in a.stats.iter().enumerate() {
            if !eligible.contains(&entry.stat_id) || diff.diffs.contains_key(&entry.stat_id) {
                continue;
            }

            let Some(other) = self.counterpart(b, position, entry)? else {
                debug!("stat {} missing for {:?}, skipping", entry.stat_id, b.name);
                continue;
            };

            let value_a = numeric(a, entry.stat_id, &entry.value)?;
            let value_b = numeric(b, entry.stat_id, other)?;
            diff.diffs.insert(entry.stat_id, value_a - value_b);
        }

        Ok(diff)
    }

    fn counterpart<'b>(
        &self,
        b: &'b Entity,
        position: usize,
        entry: &StatEntry,
    ) -> StatsResult<Option<&'b StatValue>> {
        match self.alignment {
            Alignment::ByStatId => Ok(b.value_of(entry.stat_id)),
            Alignment::Positional => match b.stats.get(position) {
                Some(other) if other.stat_id == entry.stat_id => Ok(Some(&other.value)),
                other => Err(StatsError::MisalignedVectors {
                    position,
                    expected: Some(entry.stat_id),
                    found: other.map(|o| o.stat_id),
                }),
            },
        }
    }
}

/// Diff two entities with the default (by stat ID) alignment.
pub fn compute_diff(a: &Entity, b: &Entity, eligible: &StatIdSet) -> StatsResult<StatsDiff> {
    DiffEngine::default().compute(a, b, eligible)
}

fn numeric(entity: &Entity, stat_id: StatId, value: &StatValue) -> StatsResult<f64> {
    match value.parse() {
        None => Err(StatsError::StatUnavailable { entity: entity.name.clone(), stat_id }),
        Some(Ok(v)) => Ok(v),
        Some(Err(raw)) => Err(StatsError::MalformedValue {
            entity: entity.name.clone(),
            stat_id,
            value: raw.to_owned(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EntityKind;
    use crate::catalog::{FG_PCT, POINTS, REBOUNDS, TURNOVERS};
    use proptest::prelude::*;

    fn player(name: &str, stats: &[(u32, &str)]) -> Entity {
        stats
            .iter()
            .fold(Entity::new(EntityKind::Player, name, name), |e, (id, raw)| e.with_stat(*id, raw))
    }

    fn eligible(ids: &[u32]) -> StatIdSet {
        ids.iter().copied().collect()
    }

    #[test]
    fn fg_pct_and_turnovers_diff() {
        let a = player("A", &[(FG_PCT, "0.45"), (TURNOVERS, "3.0")]);
        let b = player("B", &[(FG_PCT, "0.40"), (TURNOVERS, "2.0")]);
        let diff = compute_diff(&a, &b, &eligible(&[FG_PCT, TURNOVERS])).unwrap();
        assert_eq!(diff.entity_a, "A");
        assert_eq!(diff.entity_b, "B");
        assert!((diff.diffs[&FG_PCT] - 0.05).abs() < 1e-12);
        assert_eq!(diff.diffs[&TURNOVERS], 1.0);
    }

    #[test]
    fn ineligible_stats_are_skipped() {
        let a = player("A", &[(POINTS, "20"), (REBOUNDS, "garbage")]);
        let b = player("B", &[(POINTS, "15"), (REBOUNDS, "-")]);
        let diff = compute_diff(&a, &b, &eligible(&[POINTS])).unwrap();
        assert_eq!(diff.diffs.len(), 1);
        assert_eq!(diff.diffs[&POINTS], 5.0);
    }

    #[test]
    fn unavailable_value_names_the_entity() {
        let a = player("A", &[(FG_PCT, "-")]);
        let b = player("B", &[(FG_PCT, "0.40")]);
        assert_eq!(
            compute_diff(&a, &b, &eligible(&[FG_PCT])),
            Err(StatsError::StatUnavailable { entity: "A".into(), stat_id: FG_PCT })
        );
        assert_eq!(
            compute_diff(&b, &a, &eligible(&[FG_PCT])),
            Err(StatsError::StatUnavailable { entity: "A".into(), stat_id: FG_PCT })
        );
    }

    #[test]
    fn unavailable_anywhere_aborts_even_after_valid_positions() {
        let a = player("A", &[(POINTS, "20"), (REBOUNDS, "8")]);
        let b = player("B", &[(POINTS, "15"), (REBOUNDS, "-")]);
        let err = compute_diff(&a, &b, &eligible(&[POINTS, REBOUNDS])).unwrap_err();
        assert_eq!(err, StatsError::StatUnavailable { entity: "B".into(), stat_id: REBOUNDS });
    }

    #[test]
    fn malformed_value_is_fatal() {
        let a = player("A", &[(POINTS, "20")]);
        let b = player("B", &[(POINTS, "twenty")]);
        assert_eq!(
            compute_diff(&a, &b, &eligible(&[POINTS])),
            Err(StatsError::MalformedValue { entity: "B".into(), stat_id: POINTS, value: "twenty".into() })
        );
    }

    #[test]
    fn by_stat_id_tolerates_reordered_vectors() {
        let a = player("A", &[(POINTS, "20"), (REBOUNDS, "8")]);
        let b = player("B", &[(REBOUNDS, "10"), (POINTS, "15")]);
        let diff = compute_diff(&a, &b, &eligible(&[POINTS, REBOUNDS])).unwrap();
        assert_eq!(diff.diffs[&POINTS], 5.0);
        assert_eq!(diff.diffs[&REBOUNDS], -2.0);
    }

    #[test]
    fn by_stat_id_skips_stats_missing_from_b() {
        let a = player("A", &[(POINTS, "20"), (REBOUNDS, "8")]);
        let b = player("B", &[(POINTS, "15")]);
        let diff = compute_diff(&a, &b, &eligible(&[POINTS, REBOUNDS])).unwrap();
        assert_eq!(diff.diffs.keys().copied().collect::<Vec<_>>(), vec![POINTS]);
    }

    #[test]
    fn positional_rejects_misaligned_vectors() {
        let engine = DiffEngine::new(Alignment::Positional);
        let a = player("A", &[(POINTS, "20"), (REBOUNDS, "8")]);
        let b = player("B", &[(REBOUNDS, "10"), (POINTS, "15")]);
        assert_eq!(
            engine.compute(&a, &b, &eligible(&[POINTS])),
            Err(StatsError::MisalignedVectors { position: 0, expected: Some(POINTS), found: Some(REBOUNDS) })
        );

        let short = player("B", &[(POINTS, "15")]);
        assert_eq!(
            engine.compute(&a, &short, &eligible(&[REBOUNDS])),
            Err(StatsError::MisalignedVectors { position: 1, expected: Some(REBOUNDS), found: None })
        );
    }

    #[test]
    fn positional_rejects_longer_b() {
        let engine = DiffEngine::new(Alignment::Positional);
        let a = player("A", &[(POINTS, "20")]);
        let b = player("B", &[(POINTS, "15"), (REBOUNDS, "-")]);
        assert_eq!(
            engine.compute(&a, &b, &eligible(&[POINTS, REBOUNDS])),
            Err(StatsError::MisalignedVectors { position: 1, expected: None, found: Some(REBOUNDS) })
        );
    }

    #[test]
    fn first_failure_in_a_order_wins() {
        let a = player("A", &[(POINTS, "twenty"), (REBOUNDS, "8")]);
        let b = player("B", &[(POINTS, "15"), (REBOUNDS, "-")]);
        assert_eq!(
            compute_diff(&a, &b, &eligible(&[POINTS, REBOUNDS])),
            Err(StatsError::MalformedValue { entity: "A".into(), stat_id: POINTS, value: "twenty".into() })
        );

        let a = player("A", &[(POINTS, "-"), (REBOUNDS, "eight")]);
        assert_eq!(
            compute_diff(&a, &b, &eligible(&[POINTS, REBOUNDS])),
            Err(StatsError::StatUnavailable { entity: "A".into(), stat_id: POINTS })
        );
    }

    #[test]
    fn repeated_stat_in_a_uses_first_occurrence() {
        let a = player("A", &[(POINTS, "20"), (POINTS, "99")]);
        let b = player("B", &[(POINTS, "15")]);
        let diff = compute_diff(&a, &b, &eligible(&[POINTS])).unwrap();
        assert_eq!(diff.diffs.len(), 1);
        assert_eq!(diff.diffs[&POINTS], 5.0);
    }

    #[test]
    fn positional_matches_aligned_vectors() {
        let engine = DiffEngine::new(Alignment::Positional);
        let a = player("A", &[(POINTS, "20"), (REBOUNDS, "8")]);
        let b = player("B", &[(POINTS, "15"), (REBOUNDS, "10")]);
        let diff = engine.compute(&a, &b, &eligible(&[POINTS, REBOUNDS])).unwrap();
        assert_eq!(diff.diffs[&REBOUNDS], -2.0);
    }

    proptest! {
        #[test]
        fn diff_is_antisymmetric(values in proptest::collection::vec((-1000i32..1000, -1000i32..1000), 1..9)) {
            let ids: Vec<u32> = (1..=values.len() as u32).collect();
            let a = ids.iter().zip(&values).fold(Entity::new(EntityKind::Player, "A", "A"), |e, (id, (va, _))| {
                e.with_stat(*id, &(*va as f64 / 10.0).to_string())
            });
            let b = ids.iter().zip(&values).fold(Entity::new(EntityKind::Player, "B", "B"), |e, (id, (_, vb))| {
                e.with_stat(*id, &(*vb as f64 / 10.0).to_string())
            });
            let set: StatIdSet = ids.iter().copied().filter(|id| id % 2 == 1).collect();

            let ab = compute_diff(&a, &b, &set).unwrap();
            let ba = compute_diff(&b, &a, &set).unwrap();
            prop_assert_eq!(ab.diffs.keys().collect::<Vec<_>>(), set.iter().collect::<Vec<_>>());
            for (id, d) in &ab.diffs {
                prop_assert_eq!(*d, -ba.diffs[id]);
            }
        }
    }
}
