//! zwrangle: Housing-Price Dataset Preparation Library
//!
//! Column classification, sequential IQR outlier removal, seeded
//! train/validate/test partitioning, feature/target separation and a
//! min-max scaler fitted once on the training partition.

pub mod cli;
pub mod pipeline;
pub mod report;
pub mod utils;
