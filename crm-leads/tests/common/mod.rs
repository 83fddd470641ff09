#![allow(dead_code)]

use std::sync::Arc;

use crm_leads::{
    AccessScopeResolver, AgentCredentials, LeadDetails, LeadForm, LeadSettings, MemoryStore,
    Principal, RecordingNotifier, SignupForm,
};

/// A resolver wired to inspectable in-memory collaborators.
pub struct World {
    pub resolver: AccessScopeResolver,
    pub store: MemoryStore,
    pub notifier: RecordingNotifier,
}

pub fn world() -> World {
    let store = MemoryStore::new();
    let notifier = RecordingNotifier::new();
    let settings = LeadSettings {
        bcrypt_cost: 4,
        ..LeadSettings::default()
    };
    let resolver = AccessScopeResolver::new(
        Arc::new(store.clone()),
        Arc::new(notifier.clone()),
        settings,
    );
    World {
        resolver,
        store,
        notifier,
    }
}

pub async fn organisor(world: &World, name: &str) -> Principal {
    world
        .resolver
        .signup(SignupForm {
            username: name.to_string(),
            email: format!("{name}@example.com"),
            password: "correct horse".to_string(),
            first_name: None,
            last_name: None,
        })
        .await
        .unwrap()
}

pub fn agent_credentials(name: &str) -> AgentCredentials {
    AgentCredentials {
        username: name.to_string(),
        email: format!("{name}@example.com"),
        first_name: Some(name.to_string()),
        last_name: None,
    }
}

/// Invite an agent and log in as it.
pub async fn agent(world: &World, organisor: &Principal, name: &str) -> Principal {
    let profile = world
        .resolver
        .create_agent(organisor, agent_credentials(name))
        .await
        .unwrap();
    world
        .resolver
        .principal_for_user(profile.user.id)
        .await
        .unwrap()
}

pub fn lead_form(first_name: &str) -> LeadForm {
    LeadForm {
        details: LeadDetails {
            first_name: first_name.to_string(),
            last_name: "Doe".to_string(),
            age: 35,
            description: "met at the expo".to_string(),
            phone_number: "555-0100".to_string(),
            email: format!("{}@lead.example.com", first_name.to_lowercase()),
        },
        ..LeadForm::default()
    }
}
