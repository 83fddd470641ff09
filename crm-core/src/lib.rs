//! crm-core: framework-agnostic core for the lead CRM.

pub mod config;
pub mod errors;
#[cfg(feature = "tracing-basic")]
pub mod logging;
pub mod tenant;

pub use config::{load_env_config, CrmConfig, CrmConfigSnapshot};
pub use errors::{CrmError, CrmResult, ErrorKind};
#[cfg(feature = "tracing-basic")]
pub use logging::init_tracing;
pub use tenant::{TenantContext, TenantId};
