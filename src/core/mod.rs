pub mod classifier;
pub mod client;
pub mod emptiness;
pub mod error_shape;
pub mod normalizer;

pub use crate::domain::model::{ClassifiedResponse, OutcomeKind, RawApiResponse};
pub use crate::domain::ports::{ConfigProvider, GraphqlTransport};
pub use crate::utils::error::Result;
