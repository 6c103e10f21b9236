//! Core library for the stunting classifier
//!
//! This crate provides:
//! - The input data contract and alias normalization
//! - The model artifact (one-hot + median-impute pipeline, random forest)
//! - Single-record and batch prediction with a memoized model cache
//! - The offline training routine and its evaluation metrics

pub mod contract;
pub mod error;
pub mod metrics;
pub mod model;
pub mod models;
pub mod predictor;
pub mod table;
pub mod training;

pub use error::{Error, Result};
pub use models::{PredictionResult, Record, LABEL_NOT_STUNTED, LABEL_STUNTED};
pub use predictor::{ModelCache, Predictor};
pub use table::Table;
