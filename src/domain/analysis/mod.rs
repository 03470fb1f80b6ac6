pub mod dto;
pub mod error;
pub mod service;
pub mod state;

pub use dto::{
    AnalyzeRequest, AnalyzeResponse, CheckReviewsResponse, ExtractReviewsResponse,
    ProcessReviewsRequest, ProcessReviewsResponse, ProductPageResponse,
};
pub use error::AnalysisServiceError;
pub use service::{AnalysisService, AnalysisServiceApi, HistoryLimits};
pub use state::AnalysisState;
