use crate::domain::model::{GraphqlRequest, RawApiResponse};
use crate::utils::error::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// Reads captured responses and query documents relative to a base
/// directory.
#[derive(Debug, Clone)]
pub struct LocalFiles {
    base_path: PathBuf,
}

impl LocalFiles {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        self.base_path.join(path)
    }

    pub fn read_json(&self, path: &Path) -> Result<serde_json::Value> {
        let content = fs::read_to_string(self.resolve(path))?;
        Ok(serde_json::from_str(&content)?)
    }

    /// With `envelope`, the file holds `{"status": .., "body": ..}`;
    /// otherwise it is the bare body and `http_status` applies.
    pub fn read_response(
        &self,
        path: &Path,
        http_status: u16,
        envelope: bool,
    ) -> Result<RawApiResponse> {
        let value = self.read_json(path)?;
        if envelope {
            Ok(serde_json::from_value(value)?)
        } else {
            Ok(RawApiResponse::new(http_status, value))
        }
    }

    pub fn read_request(
        &self,
        query_file: &Path,
        variables_file: Option<&Path>,
        operation_name: Option<&str>,
    ) -> Result<GraphqlRequest> {
        let query = fs::read_to_string(self.resolve(query_file))?;
        let mut request = GraphqlRequest::new(query);

        if let Some(variables_file) = variables_file {
            request = request.with_variables(self.read_json(variables_file)?);
        }
        if let Some(name) = operation_name {
            request = request.with_operation_name(name);
        }

        Ok(request)
    }
}
