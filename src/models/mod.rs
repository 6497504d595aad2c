mod summary;

pub use summary::{Summary, SummaryPayload, SummaryResponse, SummaryUpdatePayload};
