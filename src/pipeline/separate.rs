//! Feature / target separation

use polars::prelude::*;

use super::error::{Result, WrangleError};
use super::split::Partition;

/// Feature columns and the single target column of one dataset
#[derive(Debug, Clone)]
pub struct FeatureTarget {
    pub features: DataFrame,
    pub target: DataFrame,
}

/// Feature/target pairs for each partition, never mixing rows across them
#[derive(Debug, Clone)]
pub struct SeparatedPartitions {
    pub train: FeatureTarget,
    pub validate: FeatureTarget,
    pub test: FeatureTarget,
}

/// Split `df` into (all columns except `target`, `target` alone).
///
/// Feature column order follows the input schema.
pub fn separate_target(df: &DataFrame, target: &str) -> Result<FeatureTarget> {
    if df.column(target).is_err() {
        return Err(WrangleError::missing_column(target));
    }

    let features = df.drop(target)?;
    let target = df.select([target])?;

    Ok(FeatureTarget { features, target })
}

/// Apply [`separate_target`] to each partition independently
pub fn separate_partitions(partition: &Partition, target: &str) -> Result<SeparatedPartitions> {
    let separated = SeparatedPartitions {
        train: separate_target(&partition.train, target)?,
        validate: separate_target(&partition.validate, target)?,
        test: separate_target(&partition.test, target)?,
    };

    tracing::info!(
        target,
        features = separated.train.features.width(),
        "separated features from target"
    );

    Ok(separated)
}
