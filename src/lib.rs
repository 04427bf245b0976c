pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;
pub use crate::config::{cli::LocalFiles, toml_config::TomlConfig};

pub use crate::core::classifier::{classify, classify_response};
pub use crate::core::client::ShopifyClient;
pub use crate::core::emptiness::has_values;
pub use crate::core::error_shape::ErrorShape;
pub use crate::domain::model::{
    ClassificationReport, ClassifiedResponse, ErrorEntry, FieldError, GraphqlRequest, OutcomeKind,
    RawApiResponse, SearchDiagnostic, SearchWarning,
};
pub use crate::utils::error::{Result, ShopifyError};
