use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// `get_config_info` takes no arguments.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct GetConfigInfoParams {}

/// `clear_cache` takes no arguments.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct ClearCacheParams {}
