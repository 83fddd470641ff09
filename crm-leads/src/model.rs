//! Records held by the store.
//!
//! Persistence is external; these types only fix shape and invariants.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{AgentId, CategoryId, LeadId, OrganisationId, UserId};

/// Exactly one role per user. Replaces a pair of mutually exclusive flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Organisor,
    Agent,
}

impl UserRole {
    pub fn is_organisor(&self) -> bool {
        matches!(self, UserRole::Organisor)
    }

    pub fn is_agent(&self) -> bool {
        matches!(self, UserRole::Agent)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organisation {
    pub id: OrganisationId,
    /// The organisor account this organisation was created for.
    pub owner: UserId,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    /// Set once at account creation.
    pub role: UserRole,
    #[serde(skip)]
    pub password_hash: Option<String>,
    pub date_joined: DateTime<Utc>,
}

impl User {
    pub fn is_organisor(&self) -> bool {
        self.role.is_organisor()
    }

    pub fn is_agent(&self) -> bool {
        self.role.is_agent()
    }
}

/// Links an agent user to the organisation that invited it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Agent {
    pub id: AgentId,
    pub user: UserId,
    pub organisation: OrganisationId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub organisation: OrganisationId,
    pub name: String,
}

/// Contact details captured by the lead form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadDetails {
    pub first_name: String,
    pub last_name: String,
    pub age: u32,
    pub description: String,
    pub phone_number: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lead {
    pub id: LeadId,
    pub organisation: OrganisationId,
    pub agent: Option<AgentId>,
    pub category: Option<CategoryId>,
    #[serde(flatten)]
    pub details: LeadDetails,
    pub date_added: DateTime<Utc>,
}

/// Input of lead create/update.
///
/// `organisation` is accepted so a submitted form deserializes as-is, but it
/// is never trusted: leads always land in the caller's organisation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadForm {
    #[serde(flatten)]
    pub details: LeadDetails,
    pub agent: Option<AgentId>,
    pub category: Option<CategoryId>,
    pub organisation: Option<OrganisationId>,
}

/// Fields an organisor supplies when inviting or editing an agent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentCredentials {
    pub username: String,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// Organisor self-registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignupForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// An agent joined with its user record, as listed to organisors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentProfile {
    pub agent: Agent,
    pub user: User,
}

/// A category with the leads of it the caller may see.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryDetail {
    pub category: Category,
    pub leads: Vec<Lead>,
}
