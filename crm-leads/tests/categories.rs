mod common;

use common::{agent, lead_form, organisor, world};
use crm_leads::{AccessError, CategoryId, LeadForm};

#[tokio::test]
async fn categories_are_listed_per_organisation() {
    let w = world();
    let o1 = organisor(&w, "olivia").await;
    let o2 = organisor(&w, "oscar").await;
    let ag1 = agent(&w, &o1, "adam").await;
    w.resolver.create_category(&o1, "New").await.unwrap();
    w.resolver.create_category(&o1, "Contacted").await.unwrap();
    w.resolver.create_category(&o2, "Converted").await.unwrap();

    let names: Vec<_> = w
        .resolver
        .scoped_categories(&o1)
        .await
        .unwrap()
        .into_iter()
        .map(|c| c.name)
        .collect();
    assert_eq!(names, vec!["Contacted", "New"]);

    // agents read their organisation's categories too
    assert_eq!(w.resolver.scoped_categories(&ag1).await.unwrap().len(), 2);
    assert_eq!(w.resolver.scoped_categories(&o2).await.unwrap().len(), 1);
}

#[tokio::test]
async fn only_organisors_manage_categories() {
    let w = world();
    let o1 = organisor(&w, "olivia").await;
    let ag1 = agent(&w, &o1, "adam").await;
    let category = w.resolver.create_category(&o1, "New").await.unwrap();

    assert!(matches!(
        w.resolver.create_category(&ag1, "Mine").await,
        Err(AccessError::PermissionDenied { .. })
    ));
    assert!(matches!(
        w.resolver.delete_category(&ag1, category.id).await,
        Err(AccessError::PermissionDenied { .. })
    ));
}

#[tokio::test]
async fn uncategorized_count_follows_the_principal_scope() {
    let w = world();
    let o1 = organisor(&w, "olivia").await;
    let ag1 = agent(&w, &o1, "adam").await;
    let category = w.resolver.create_category(&o1, "Contacted").await.unwrap();

    let mine = w.resolver.create_lead(&o1, lead_form("Mine")).await.unwrap();
    w.resolver
        .assign_agent(&o1, mine.id, ag1.agent_id().unwrap())
        .await
        .unwrap();
    w.resolver.create_lead(&o1, lead_form("Loose")).await.unwrap();
    let form = LeadForm {
        category: Some(category.id),
        ..lead_form("Sorted")
    };
    w.resolver.create_lead(&o1, form).await.unwrap();

    assert_eq!(w.resolver.unassigned_lead_count(&o1).await.unwrap(), 2);
    assert_eq!(w.resolver.unassigned_lead_count(&ag1).await.unwrap(), 1);
}

#[tokio::test]
async fn category_detail_shows_only_visible_leads() {
    let w = world();
    let o1 = organisor(&w, "olivia").await;
    let ag1 = agent(&w, &o1, "adam").await;
    let category = w.resolver.create_category(&o1, "Contacted").await.unwrap();

    let mut ids = Vec::new();
    for name in ["A", "B"] {
        let form = LeadForm {
            category: Some(category.id),
            ..lead_form(name)
        };
        ids.push(w.resolver.create_lead(&o1, form).await.unwrap().id);
    }
    w.resolver
        .assign_agent(&o1, ids[0], ag1.agent_id().unwrap())
        .await
        .unwrap();

    let full = w.resolver.category_detail(&o1, category.id).await.unwrap();
    assert_eq!(full.leads.len(), 2);
    assert_eq!(full.category, category);

    let agents_view = w.resolver.category_detail(&ag1, category.id).await.unwrap();
    assert_eq!(agents_view.leads.len(), 1);
    assert_eq!(agents_view.leads[0].id, ids[0]);

    assert_eq!(
        w.resolver.category_detail(&o1, CategoryId::new()).await,
        Err(AccessError::not_found("category"))
    );
}

#[tokio::test]
async fn deleting_a_category_uncategorizes_its_leads() {
    let w = world();
    let o1 = organisor(&w, "olivia").await;
    let o2 = organisor(&w, "oscar").await;
    let category = w.resolver.create_category(&o1, "Contacted").await.unwrap();
    let form = LeadForm {
        category: Some(category.id),
        ..lead_form("L1")
    };
    let lead = w.resolver.create_lead(&o1, form).await.unwrap();

    assert_eq!(
        w.resolver.delete_category(&o2, category.id).await,
        Err(AccessError::not_found("category"))
    );

    let removed = w.resolver.delete_category(&o1, category.id).await.unwrap();
    assert_eq!(removed.id, category.id);
    assert_eq!(w.resolver.lead_detail(&o1, lead.id).await.unwrap().category, None);
    assert_eq!(w.resolver.unassigned_lead_count(&o1).await.unwrap(), 1);
    assert!(w.resolver.scoped_categories(&o1).await.unwrap().is_empty());
}
