//! # Caption Scoring
//!
//! Evaluation is an external collaborator: given reference captions and
//! exactly one generated caption per image, a [`CaptionScorer`] returns an
//! aggregate score and one score per image.
//!
//! [`MeteorScorer`] is the process-boundary implementation.

mod meteor;

use std::collections::BTreeMap;

pub use meteor::{MeteorScorer, MeteorScorerOptions};

use crate::{CKResult, CaptionKitError, types::ImageId};

/// The result of scoring a hypothesis set.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreReport {
    /// The corpus-level score.
    pub aggregate: f64,

    /// One score per image, in ascending image-id order.
    pub per_item: Vec<f64>,
}

/// A captioning metric.
pub trait CaptionScorer {
    /// The metric name.
    fn name(&self) -> &str;

    /// Score `hypotheses` against `references`.
    ///
    /// Both maps must have the same key set.
    fn score(
        &self,
        references: &BTreeMap<ImageId, Vec<String>>,
        hypotheses: &BTreeMap<ImageId, String>,
    ) -> CKResult<ScoreReport>;
}

/// Check that references and hypotheses cover the same images.
pub fn check_same_keys<A, B>(
    references: &BTreeMap<ImageId, A>,
    hypotheses: &BTreeMap<ImageId, B>,
) -> CKResult<()> {
    if references.keys().eq(hypotheses.keys()) {
        return Ok(());
    }

    let missing: Vec<ImageId> = references
        .keys()
        .filter(|k| !hypotheses.contains_key(*k))
        .copied()
        .collect();
    let extra: Vec<ImageId> = hypotheses
        .keys()
        .filter(|k| !references.contains_key(*k))
        .copied()
        .collect();
    Err(CaptionKitError::KeyMismatch(format!(
        "missing hypotheses for {missing:?}; no references for {extra:?}"
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct ExactMatch;

    impl CaptionScorer for ExactMatch {
        fn name(&self) -> &str {
            "EXACT"
        }

        fn score(
            &self,
            references: &BTreeMap<ImageId, Vec<String>>,
            hypotheses: &BTreeMap<ImageId, String>,
        ) -> CKResult<ScoreReport> {
            check_same_keys(references, hypotheses)?;
            let per_item: Vec<f64> = references
                .iter()
                .map(|(id, refs)| {
                    if refs.contains(&hypotheses[id]) { 1.0 } else { 0.0 }
                })
                .collect();
            let aggregate = per_item.iter().sum::<f64>() / per_item.len().max(1) as f64;
            Ok(ScoreReport {
                aggregate,
                per_item,
            })
        }
    }

    #[test]
    fn test_scorer_trait_object() {
        let scorer: Box<dyn CaptionScorer> = Box::new(ExactMatch);
        assert_eq!(scorer.name(), "EXACT");

        let refs = BTreeMap::from([
            (2, vec!["a dog".to_string()]),
            (1, vec!["a cat".to_string(), "one cat".to_string()]),
        ]);
        let hyps = BTreeMap::from([(1, "one cat".to_string()), (2, "a bird".to_string())]);

        let report = scorer.score(&refs, &hyps).unwrap();
        assert_eq!(report.per_item, vec![1.0, 0.0]);
        assert_eq!(report.aggregate, 0.5);
    }

    #[test]
    fn test_check_same_keys() {
        let refs = BTreeMap::from([(1, ()), (2, ())]);
        assert!(check_same_keys(&refs, &BTreeMap::from([(2, ()), (1, ())])).is_ok());

        let err = check_same_keys(&refs, &BTreeMap::from([(1, ()), (3, ())])).unwrap_err();
        match err {
            CaptionKitError::KeyMismatch(msg) => {
                assert_eq!(msg, "missing hypotheses for [2]; no references for [3]");
            }
            other => panic!("unexpected: {other:?}"),
        }
    }
}
