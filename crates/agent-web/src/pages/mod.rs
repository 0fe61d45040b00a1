//! Page Components

mod analysis;

pub use analysis::AnalysisPage;
