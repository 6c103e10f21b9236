//! Preprocessing pipeline: one-hot gender, median-imputed numerics
//!
//! Feature layout is `[gender one-hot.., age_months, height_cm]`. A
//! gender value outside the categories seen at fit time encodes as an
//! all-zero block instead of failing.

use crate::models::Record;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Preprocessor {
    /// Gender categories observed at fit time, sorted.
    pub gender_categories: Vec<String>,
    /// Median of the non-missing training ages.
    pub age_median: f64,
    /// Median of the non-missing training heights.
    pub height_median: f64,
}

impl Preprocessor {
    /// Learn categories and imputation medians from training records.
    pub fn fit(records: &[Record]) -> Self {
        let gender_categories: Vec<String> = records
            .iter()
            .map(|r| r.gender.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let age_median = median(records.iter().map(|r| r.age_months));
        let height_median = median(records.iter().map(|r| r.height_cm));
        Self {
            gender_categories,
            age_median,
            height_median,
        }
    }

    pub fn feature_len(&self) -> usize {
        self.gender_categories.len() + 2
    }

    /// Encode one record into the model's feature space.
    pub fn transform(&self, record: &Record) -> Vec<f64> {
        let mut features = Vec::with_capacity(self.feature_len());
        for category in &self.gender_categories {
            features.push(if *category == record.gender { 1.0 } else { 0.0 });
        }
        features.push(impute(record.age_months, self.age_median));
        features.push(impute(record.height_cm, self.height_median));
        features
    }
}

fn impute(value: f64, median: f64) -> f64 {
    if value.is_nan() {
        median
    } else {
        value
    }
}

/// Median of the finite values; 0.0 when nothing is finite.
fn median(values: impl Iterator<Item = f64>) -> f64 {
    let mut finite: Vec<f64> = values.filter(|v| !v.is_nan()).collect();
    if finite.is_empty() {
        return 0.0;
    }
    finite.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let mid = finite.len() / 2;
    if finite.len() % 2 == 0 {
        (finite[mid - 1] + finite[mid]) / 2.0
    } else {
        finite[mid]
    }
}
