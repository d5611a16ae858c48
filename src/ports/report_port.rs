//! Report output port trait.

use crate::domain::analysis::AnalysisResult;
use crate::domain::error::FearcrossError;

/// Port for rendering an analysis result.
pub trait ReportPort {
    fn write(&self, result: &AnalysisResult) -> Result<(), FearcrossError>;
}
