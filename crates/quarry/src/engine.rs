use quarry_ast::AnalyticFunction;
use quarry_executor::{compute_with, AnalyticOptions, RecordEvaluator};
use quarry_view::View;
use tracing::debug;

use crate::config::EngineConfig;
use crate::error::Result;

/// Applies analytic functions to views under one configuration.
#[derive(Debug, Clone, Default)]
pub struct Engine {
    evaluator: RecordEvaluator,
    options: AnalyticOptions,
}

impl Engine {
    pub fn new(config: &EngineConfig) -> Result<Self> {
        let location = config.location_offset()?;
        let options = AnalyticOptions {
            nulls: config.nulls.into(),
        };
        debug!(location = %location, nulls = ?options.nulls, "engine configured");
        Ok(Self {
            evaluator: RecordEvaluator::new(location),
            options,
        })
    }

    pub fn evaluator(&self) -> &RecordEvaluator {
        &self.evaluator
    }

    pub fn options(&self) -> &AnalyticOptions {
        &self.options
    }

    /// Append the column for one analytic function. On error `view` is
    /// unchanged.
    pub fn analyze(&self, view: &mut View, function: &AnalyticFunction) -> Result<()> {
        compute_with(view, function, &self.evaluator, &self.options)?;
        Ok(())
    }

    /// Append one column per function, in order. Later functions see the
    /// columns added by earlier ones. Either every column is appended or
    /// `view` is unchanged.
    pub fn analyze_all(&self, view: &mut View, functions: &[AnalyticFunction]) -> Result<()> {
        let mut working = view.clone();
        for function in functions {
            compute_with(&mut working, function, &self.evaluator, &self.options)?;
        }
        *view = working;
        Ok(())
    }
}
