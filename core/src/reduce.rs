// core/src/reduce.rs
use std::collections::HashMap;

use log::debug;

use crate::models::EffortRecord;

/// (segment-id, år) – år er tom streng når datoen mangler.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AggregationKey {
    pub segment_id: String,
    pub year: String,
}

impl AggregationKey {
    pub fn of(effort: &EffortRecord, default_segment_id: &str) -> Self {
        Self {
            segment_id: effort.segment_id(default_segment_id),
            year: effort.year(),
        }
    }
}

/// Vinneren for én nøkkel; låner effort fra input.
#[derive(Debug, Clone, PartialEq)]
pub struct BestEffort<'a> {
    pub key: AggregationKey,
    pub effort: &'a EffortRecord,
}

/// Beste (korteste) effort per segment og år.
///
/// Rekkefølgen følger første forekomst av hver nøkkel i input, ikke tid.
/// Ved lik tid beholdes den første. Efforts uten gyldig tid taper alle
/// sammenligninger, men blir stående hvis de er alene om nøkkelen.
pub fn reduce_best_efforts<'a>(
    efforts: &'a [EffortRecord],
    default_segment_id: &str,
) -> Vec<BestEffort<'a>> {
    let mut index_by_key: HashMap<AggregationKey, usize> = HashMap::new();
    let mut best: Vec<BestEffort<'a>> = Vec::new();

    for effort in efforts {
        let key = AggregationKey::of(effort, default_segment_id);
        match index_by_key.get(&key).copied() {
            None => {
                index_by_key.insert(key.clone(), best.len());
                best.push(BestEffort { key, effort });
            }
            // strengt mindre: lik tid beholder den første
            Some(i) => {
                if effort.elapsed_seconds() < best[i].effort.elapsed_seconds() {
                    best[i].effort = effort;
                }
            }
        }
    }

    debug!("{} efforts redusert til {} rader", efforts.len(), best.len());
    best
}
