//! Serde data model for adjacency-map BQMs.
//!
//! A model is exchanged as its linear biases plus the list of interactions,
//! each interaction appearing once. Deserialization validates every
//! interaction before the model is built, so malformed input is rejected
//! with a [`BqmError`] instead of breaking the symmetry of the store.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::trace;

use crate::adjmap::AdjMapBqm;
use crate::error::{BqmError, BqmResult};
use crate::variable::{Bias, Variable};

/// Flat, order-independent description of a BQM.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "V: Deserialize<'de>, B: Deserialize<'de>"))]
pub struct BqmRecord<V, B> {
    /// Linear bias of each variable, indexed by variable.
    pub linear: Vec<B>,
    /// Interactions as `(u, v, bias)`.
    #[serde(default)]
    pub quadratic: Vec<(V, V, B)>,
}

impl<V: Variable, B: Bias> From<&AdjMapBqm<V, B>> for BqmRecord<V, B> {
    fn from(bqm: &AdjMapBqm<V, B>) -> Self {
        Self {
            linear: bqm.linear().collect(),
            quadratic: bqm.interactions().collect(),
        }
    }
}

impl<V: Variable, B: Bias> TryFrom<BqmRecord<V, B>> for AdjMapBqm<V, B> {
    type Error = BqmError;

    /// Build a model from a record.
    ///
    /// An interaction listed more than once keeps its last bias.
    fn try_from(record: BqmRecord<V, B>) -> BqmResult<Self> {
        let num_variables = record.linear.len();
        for &(u, v, _) in &record.quadratic {
            // Negative indices have no position and map past every model.
            for variable in [u, v].map(|x| x.checked_index().unwrap_or(usize::MAX)) {
                if variable >= num_variables {
                    return Err(BqmError::InvalidVariable {
                        variable,
                        num_variables,
                    });
                }
            }
            if u == v {
                return Err(BqmError::SelfLoop {
                    variable: u.index(),
                });
            }
        }

        let mut bqm = AdjMapBqm::with_capacity(num_variables);
        for bias in record.linear {
            let v = bqm.add_variable();
            bqm.set_linear(v, bias);
        }
        for (u, v, bias) in record.quadratic {
            bqm.set_quadratic(u, v, bias);
        }
        trace!(
            num_variables,
            num_interactions = bqm.num_interactions(),
            "built BQM from record"
        );
        Ok(bqm)
    }
}

impl<V, B> Serialize for AdjMapBqm<V, B>
where
    V: Variable + Serialize,
    B: Bias + Serialize,
{
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        BqmRecord::from(self).serialize(serializer)
    }
}

impl<'de, V, B> Deserialize<'de> for AdjMapBqm<V, B>
where
    V: Variable + Deserialize<'de>,
    B: Bias + Deserialize<'de>,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let record = BqmRecord::<V, B>::deserialize(deserializer)?;
        AdjMapBqm::try_from(record).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_lists_each_interaction_once() {
        let mut bqm: AdjMapBqm = AdjMapBqm::new();
        for _ in 0..3 {
            bqm.add_variable();
        }
        bqm.set_linear(1, -1.0);
        bqm.set_quadratic(2, 0, 0.5);

        let record = BqmRecord::from(&bqm);
        assert_eq!(record.linear, vec![0.0, -1.0, 0.0]);
        assert_eq!(record.quadratic, vec![(0, 2, 0.5)]);
    }

    #[test]
    fn test_record_duplicate_keeps_last() {
        let record = BqmRecord {
            linear: vec![0.0, 0.0],
            quadratic: vec![(0, 1, 1.0), (1, 0, 2.0)],
        };
        let bqm: AdjMapBqm = AdjMapBqm::try_from(record).unwrap();
        assert_eq!(bqm.get_quadratic(0, 1), Some(2.0));
        assert_eq!(bqm.num_interactions(), 1);
    }

    #[test]
    fn test_record_rejects_out_of_range() {
        let record: BqmRecord<u32, f64> = BqmRecord {
            linear: vec![0.0, 0.0],
            quadratic: vec![(0, 5, 1.0)],
        };
        assert_eq!(
            AdjMapBqm::<u32, f64>::try_from(record),
            Err(BqmError::InvalidVariable {
                variable: 5,
                num_variables: 2
            })
        );
    }

    #[test]
    fn test_record_rejects_self_loop() {
        let record: BqmRecord<u32, f64> = BqmRecord {
            linear: vec![0.0, 0.0],
            quadratic: vec![(1, 1, 1.0)],
        };
        assert_eq!(
            AdjMapBqm::<u32, f64>::try_from(record),
            Err(BqmError::SelfLoop { variable: 1 })
        );
    }

    #[test]
    fn test_json_roundtrip() {
        let mut bqm: AdjMapBqm = AdjMapBqm::new();
        for _ in 0..4 {
            bqm.add_variable();
        }
        bqm.set_linear(0, 1.5);
        bqm.set_quadratic(0, 3, -2.0);
        bqm.set_quadratic(1, 2, 0.25);

        let json = serde_json::to_string(&bqm).unwrap();
        let restored: AdjMapBqm = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, bqm);
    }

    #[test]
    fn test_json_missing_quadratic() {
        let bqm: AdjMapBqm = serde_json::from_str(r#"{"linear":[1.0,2.0]}"#).unwrap();
        assert_eq!(bqm.num_variables(), 2);
        assert_eq!(bqm.num_interactions(), 0);
    }

    #[test]
    fn test_json_negative_variable_is_error() {
        let result: Result<AdjMapBqm<i32, f64>, _> =
            serde_json::from_str(r#"{"linear":[0.0],"quadratic":[[-1,0,1.0]]}"#);
        let err = result.unwrap_err();
        assert!(err.to_string().contains("out of range"));
    }

    #[test]
    fn test_record_rejects_negative_variable() {
        let record: BqmRecord<i64, f64> = BqmRecord {
            linear: vec![0.0, 0.0],
            quadratic: vec![(1, -3, 1.0)],
        };
        assert!(matches!(
            AdjMapBqm::<i64, f64>::try_from(record),
            Err(BqmError::InvalidVariable {
                num_variables: 2,
                ..
            })
        ));
    }

    #[test]
    fn test_json_invalid_is_error() {
        let result: Result<AdjMapBqm, _> =
            serde_json::from_str(r#"{"linear":[0.0],"quadratic":[[0,0,1.0]]}"#);
        let err = result.unwrap_err();
        assert!(err.to_string().contains("Self-loop on variable 0"));
    }
}
