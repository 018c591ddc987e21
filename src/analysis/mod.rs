//! Analysis options and the JSON request/response envelope shared by the
//! HTTP server and the WASM bindings

use serde::{Deserialize, Serialize};

use crate::error::PlateResult;
use crate::math::LoadIntegration;
use crate::model::PlateModel;
use crate::results::PlateResults;

/// Options for plate analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisOptions {
    /// Gauss rule at which the pressure load is sampled
    pub load_integration: LoadIntegration,
    /// Compute element matrices on the rayon thread pool (`parallel` feature)
    pub parallel: bool,
    /// Recover bending moments and shear forces at element centroids
    pub compute_resultants: bool,
    /// Keep the assembled, unconstrained stiffness matrix and force vector
    pub retain_system: bool,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            load_integration: LoadIntegration::ShearRule,
            parallel: false,
            compute_resultants: true,
            retain_system: false,
        }
    }
}

impl AnalysisOptions {
    /// Compute element matrices in parallel
    pub fn with_parallel(mut self) -> Self {
        self.parallel = true;
        self
    }

    /// Sample the pressure load at the full 2x2 rule
    pub fn with_full_load_integration(mut self) -> Self {
        self.load_integration = LoadIntegration::FullRule;
        self
    }

    /// Keep the unconstrained global system in the results
    pub fn with_system(mut self) -> Self {
        self.retain_system = true;
        self
    }

    /// Skip stress resultant recovery
    pub fn without_resultants(mut self) -> Self {
        self.compute_resultants = false;
        self
    }
}

/// Analysis request: a plate model plus optional options
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub model: PlateModel,
    #[serde(default)]
    pub options: Option<AnalysisOptions>,
}

impl AnalysisRequest {
    /// Decode a request from JSON
    pub fn from_json(json: &str) -> PlateResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Run the requested analysis
    pub fn run(&self) -> PlateResult<PlateResults> {
        let options = self.options.clone().unwrap_or_default();
        self.model.analyze(&options)
    }
}

/// Analysis response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub results: Option<PlateResults>,
    /// Timing information in milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ms_elapsed: Option<u64>,
}

impl AnalysisResponse {
    /// Failed response carrying an error message
    pub fn failure(error: impl ToString) -> Self {
        Self {
            success: false,
            error: Some(error.to_string()),
            results: None,
            ms_elapsed: None,
        }
    }

    /// Encode the response as JSON
    pub fn to_json(&self) -> PlateResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

impl From<PlateResult<PlateResults>> for AnalysisResponse {
    fn from(result: PlateResult<PlateResults>) -> Self {
        match result {
            Ok(results) => Self {
                success: true,
                error: None,
                results: Some(results),
                ms_elapsed: None,
            },
            Err(e) => Self::failure(e),
        }
    }
}
