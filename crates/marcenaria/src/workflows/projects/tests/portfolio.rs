use super::common::*;
use crate::workflows::projects::domain::{ProductionStatus, ProjectId, ProjectStatus};
use crate::workflows::projects::{classify_portfolio, AlertLevel, ProjectAlertService};
use crate::workflows::{OwnerId, RepositoryError};
use std::sync::Arc;

fn mixed_portfolio() -> Vec<crate::workflows::projects::ProjectSnapshot> {
    let green = snapshot(project("a-green"));

    let mut yellow = snapshot(project("b-yellow"));
    yellow.production = Some(production("b-yellow", ProductionStatus::EmAndamento, 10.0));

    let mut red = project("c-red");
    red.status = ProjectStatus::EmProducao;
    red.promised_delivery = Some(days_ago(3));

    let mut second_green = project("d-green");
    second_green.status = ProjectStatus::Entregue;

    vec![green, yellow, snapshot(red), snapshot(second_green)]
}

#[test]
fn portfolio_orders_by_urgency_and_counts_levels() {
    let portfolio = classify_portfolio(&classifier(), &mixed_portfolio(), today());

    let order: Vec<&str> = portfolio
        .alerts
        .iter()
        .map(|alert| alert.project_id.0.as_str())
        .collect();
    assert_eq!(order, vec!["c-red", "b-yellow", "a-green", "d-green"]);
    assert_eq!(portfolio.counts.red, 1);
    assert_eq!(portfolio.counts.yellow, 1);
    assert_eq!(portfolio.counts.green, 2);
    assert_eq!(portfolio.counts.total(), 4);
    assert_eq!(portfolio.needing_attention().count(), 2);
}

#[test]
fn empty_portfolio_has_no_alerts() {
    let portfolio = classify_portfolio(&classifier(), &[], today());
    assert!(portfolio.alerts.is_empty());
    assert_eq!(portfolio.counts.total(), 0);
}

#[test]
fn service_scopes_portfolio_to_owner() {
    let mut foreign = project("z-foreign");
    foreign.user_id = OwnerId("someone-else".to_string());
    let mut snapshots = mixed_portfolio();
    snapshots.push(snapshot(foreign));

    let service = service_with(snapshots);
    let portfolio = service.portfolio(&owner(), today()).expect("portfolio loads");

    assert_eq!(portfolio.counts.total(), 4);
    assert!(portfolio
        .alerts
        .iter()
        .all(|alert| alert.project_id.0 != "z-foreign"));
}

#[test]
fn service_reports_unknown_project() {
    let service = service_with(Vec::new());
    match service.alert_for(&ProjectId("missing".to_string()), today()) {
        Err(RepositoryError::NotFound) => {}
        other => panic!("expected not found, got {other:?}"),
    }
}

#[test]
fn service_classifies_single_project() {
    let service = service_with(mixed_portfolio());
    let alert = service
        .alert_for(&ProjectId("b-yellow".to_string()), today())
        .expect("alert computed");
    assert_eq!(alert.level, AlertLevel::Yellow);
    assert_eq!(alert.client_name, "Cliente b-yellow");
}

#[test]
fn service_propagates_store_failures() {
    let service = ProjectAlertService::new(Arc::new(OfflineProjects), classifier());
    assert!(matches!(
        service.portfolio(&owner(), today()),
        Err(RepositoryError::Unavailable(_))
    ));
}
