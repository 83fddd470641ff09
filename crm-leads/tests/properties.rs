mod common;

use std::collections::BTreeSet;

use common::{agent, lead_form, organisor, world};
use crm_leads::{LeadId, Principal};
use proptest::prelude::*;
use proptest::test_runner::Config;

const AGENTS_PER_ORG: usize = 2;

/// (organisation index, optional agent index) per lead.
fn lead_plan() -> impl Strategy<Value = Vec<(usize, Option<usize>)>> {
    prop::collection::vec((0..2usize, prop::option::of(0..AGENTS_PER_ORG)), 0..12)
}

struct Populated {
    world: common::World,
    organisors: Vec<Principal>,
    agents: Vec<Vec<Principal>>,
}

async fn populate(plan: &[(usize, Option<usize>)]) -> Populated {
    let world = world();
    let mut organisors = Vec::new();
    let mut agents = Vec::new();
    for org in ["olivia", "oscar"] {
        let o = organisor(&world, org).await;
        let mut staff = Vec::new();
        for n in 0..AGENTS_PER_ORG {
            staff.push(agent(&world, &o, &format!("{org}-agent-{n}")).await);
        }
        organisors.push(o);
        agents.push(staff);
    }

    for (i, (org, assignee)) in plan.iter().enumerate() {
        let o = &organisors[*org];
        let lead = world
            .resolver
            .create_lead(o, lead_form(&format!("Lead{i}")))
            .await
            .unwrap();
        if let Some(a) = assignee {
            let agent_id = agents[*org][*a].agent_id().unwrap();
            world
                .resolver
                .assign_agent(o, lead.id, agent_id)
                .await
                .unwrap();
        }
    }

    Populated {
        world,
        organisors,
        agents,
    }
}

fn ids(leads: &[crm_leads::Lead]) -> BTreeSet<LeadId> {
    leads.iter().map(|l| l.id).collect()
}

proptest! {
    #![proptest_config(Config::with_cases(24))]

    #[test]
    fn scoped_leads_never_cross_organisations(plan in lead_plan()) {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let p = rt.block_on(populate(&plan));

        for (org, o) in p.organisors.iter().enumerate() {
            let visible = rt.block_on(p.world.resolver.scoped_leads(o, true)).unwrap();
            let expected = plan.iter().filter(|(lead_org, _)| *lead_org == org).count();
            prop_assert_eq!(visible.len(), expected);
            for lead in &visible {
                prop_assert_eq!(lead.organisation, o.organisation());
            }
        }
    }

    #[test]
    fn agent_scope_is_within_organisor_scope(plan in lead_plan()) {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let p = rt.block_on(populate(&plan));

        for (org, o) in p.organisors.iter().enumerate() {
            let everything = ids(&rt.block_on(p.world.resolver.scoped_leads(o, true)).unwrap());
            for a in &p.agents[org] {
                let mine = rt.block_on(p.world.resolver.scoped_leads(a, true)).unwrap();
                for lead in &mine {
                    prop_assert_eq!(lead.agent, a.agent_id());
                }
                prop_assert!(ids(&mine).is_subset(&everything));
            }
        }
    }

    #[test]
    fn assigned_and_unassigned_partition_the_organisation(plan in lead_plan()) {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let p = rt.block_on(populate(&plan));

        for o in &p.organisors {
            let resolver = &p.world.resolver;
            let all = ids(&rt.block_on(resolver.scoped_leads(o, true)).unwrap());
            let assigned = ids(&rt.block_on(resolver.scoped_leads(o, false)).unwrap());
            let unassigned = ids(&rt.block_on(resolver.unassigned_leads(o)).unwrap());

            prop_assert!(assigned.is_disjoint(&unassigned));
            let union: BTreeSet<_> = assigned.union(&unassigned).copied().collect();
            prop_assert_eq!(union, all);
        }
        prop_assert_eq!(p.world.store.lead_count(), plan.len());
    }
}
