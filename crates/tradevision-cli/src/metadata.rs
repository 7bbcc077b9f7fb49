use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use tradevision_core::UtcDateTime;
use uuid::Uuid;

pub const SCHEMA_VERSION: &str = "v1.0.0";

/// Request identifier (UUID v4) stamped on every command output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(Uuid);

impl RequestId {
    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Display for RequestId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

/// Metadata block of the output envelope.
///
/// Field order is fixed to keep serialized output stable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvelopeMeta {
    pub request_id: RequestId,
    pub schema_version: String,
    pub source: String,
    pub generated_at: UtcDateTime,
    pub cache_hit: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl EnvelopeMeta {
    pub fn new(source: impl Into<String>, cache_hit: bool) -> Self {
        Self {
            request_id: RequestId::new_v4(),
            schema_version: SCHEMA_VERSION.to_owned(),
            source: source.into(),
            generated_at: UtcDateTime::now(),
            cache_hit,
            warnings: Vec::new(),
        }
    }

    pub fn push_warning(&mut self, warning: impl Into<String>) {
        self.warnings.push(warning.into());
    }
}

/// `{ "meta": ..., "data": ... }` wrapper for command output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub meta: EnvelopeMeta,
    pub data: T,
}
