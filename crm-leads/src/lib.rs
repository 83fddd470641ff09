//! crm-leads: tenant-scoped access control for leads, categories and agents.
//!
//! Everything a principal can read or change goes through
//! [`AccessScopeResolver`], backed by a [`CrmStore`] and a [`Notifier`].
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use crm_leads::{AccessScopeResolver, LeadSettings, MemoryStore, TracingNotifier};
//!
//! let resolver = AccessScopeResolver::new(
//!     Arc::new(MemoryStore::new()),
//!     Arc::new(TracingNotifier),
//!     LeadSettings::default(),
//! );
//! # let _ = resolver;
//! ```

pub mod credentials;
pub mod error;
pub mod ids;
pub mod model;
pub mod notify;
pub mod principal;
pub mod resolver;
pub mod scope;
pub mod settings;
pub mod store;

pub use error::{AccessError, AccessResult};
pub use ids::{AgentId, CategoryId, LeadId, OrganisationId, UserId};
pub use model::{
    Agent, AgentCredentials, AgentProfile, Category, CategoryDetail, Lead, LeadDetails, LeadForm,
    Organisation, SignupForm, User, UserRole,
};
pub use notify::{Notification, NotificationKind, Notifier, RecordingNotifier, TracingNotifier};
pub use principal::Principal;
pub use resolver::AccessScopeResolver;
pub use scope::{AgentFilter, CategoryFilter, LeadScope};
pub use settings::LeadSettings;
pub use store::{CrmStore, LeadChange, MemoryStore, StoreError, StoreResult};
