// File: tests/event_commands.rs
use chrono::{NaiveDate, NaiveDateTime};
use interntrack::command::{
    CommandResult, EventDeleteCommand, EventFindCommand, Index, ResultType, parse_command,
};
use interntrack::model::{Event, EventFilter, Internship, InternshipStatus};
use interntrack::store::ModelManager;

fn at(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap()
}

fn internship(company: &str) -> Internship {
    Internship::new(
        company,
        "SWE",
        InternshipStatus::Interviewing,
        NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
        "",
    )
    .unwrap()
}

fn run(model: &mut ModelManager, text: &str) -> CommandResult {
    parse_command(text)
        .unwrap_or_else(|e| panic!("'{}' failed to parse: {}", text, e))
        .execute(model)
        .unwrap_or_else(|e| panic!("'{}' failed: {}", text, e))
}

/// Two internships, each with two events.
fn populated() -> (ModelManager, Internship, Internship) {
    let acme = internship("Acme");
    let beta = internship("Beta");
    let mut model = ModelManager::default();
    model.add_internship(acme.clone()).unwrap();
    model.add_internship(beta.clone()).unwrap();

    run(&mut model, "select 1");
    run(&mut model, "event add na/Phone screen st/2024-02-01 09:00 en/2024-02-01 09:30");
    run(&mut model, "event add na/Onsite st/2024-03-10 13:00 en/2024-03-10 17:00");
    run(&mut model, "select 2");
    run(&mut model, "event add na/Coding test st/2024-02-15 10:00 en/2024-02-15 12:00");
    run(&mut model, "event add na/Offer call st/2024-04-01 16:00 en/2024-04-01 16:30");
    (model, acme, beta)
}

#[test]
fn test_event_delete_shows_selected_internship() {
    let (mut model, _acme, beta) = populated();
    let to_delete = model.filtered_event(0).cloned().unwrap();
    assert!(to_delete.belongs_to(beta.id()));

    let result = EventDeleteCommand {
        index: Index::from_one_based(1).unwrap(),
    }
    .execute(&mut model)
    .unwrap();

    let remaining: Vec<Event> = model.events_of(beta.id()).into_iter().cloned().collect();
    assert_eq!(
        result,
        CommandResult::new(format!("Deleted event: {}", to_delete), ResultType::ShowInfo)
            .with_selected(Some(beta.clone()))
            .with_events(remaining)
    );
    assert!(!model.has_event(&to_delete));
}

#[test]
fn test_event_delete_index_out_of_scope_fails() {
    let (mut model, _, _) = populated();
    // The view holds Beta's two events only.
    let err = parse_command("event delete 3")
        .unwrap()
        .execute(&mut model)
        .unwrap_err();
    assert!(err.message().starts_with("Invalid index"));
    assert_eq!(model.event_catalogue().len(), 4);
}

#[test]
fn test_event_find_spans_all_internships() {
    let (mut model, acme, beta) = populated();
    let filter = EventFilter {
        start: Some(at("2024-02-01 00:00")),
        end: Some(at("2024-02-28 23:59")),
        ..Default::default()
    };

    let result = EventFindCommand { filter }.execute(&mut model).unwrap();

    assert_eq!(result.kind, ResultType::FindEvents);
    assert_eq!(result.feedback, "Found events: 2");
    let events = result.events.unwrap();
    assert!(events[0].belongs_to(acme.id()));
    assert!(events[1].belongs_to(beta.id()));
}

#[test]
fn test_event_find_start_only() {
    let (mut model, _, _) = populated();
    let result = run(&mut model, "event find st/2024-03-01 00:00");
    let names: Vec<String> = result
        .events
        .unwrap()
        .iter()
        .map(|e| e.name().to_string())
        .collect();
    assert_eq!(names, vec!["Onsite", "Offer call"]);
}

#[test]
fn test_event_find_by_name_then_delete_from_results() {
    let (mut model, acme, _) = populated();
    model.update_selected_internship(None);
    run(&mut model, "event find na/onsite");
    assert_eq!(model.filtered_events().len(), 1);

    let result = run(&mut model, "event delete 1");

    // Without a selection the view falls back to the event's own internship.
    assert_eq!(result.selected, Some(acme.clone()));
    assert_eq!(model.events_of(acme.id()).len(), 1);
}

#[test]
fn test_event_edit_keeps_owner() {
    let (mut model, _, beta) = populated();
    let result = run(&mut model, "event edit 2 na/Offer call (HR)");
    assert_eq!(result.kind, ResultType::ShowInfo);
    let edited = model.filtered_event(1).unwrap();
    assert_eq!(edited.name(), "Offer call (HR)");
    assert!(edited.belongs_to(beta.id()));
}

#[test]
fn test_duplicate_event_rejected() {
    let (mut model, _, _) = populated();
    let err = parse_command("event add na/offer CALL st/2024-04-01 16:00 en/2024-04-01 16:30")
        .unwrap()
        .execute(&mut model)
        .unwrap_err();
    assert_eq!(err.message(), "This event already exists in the catalogue");
}

#[test]
fn test_event_delete_after_selected_internship_deleted() {
    let (mut model, acme, beta) = populated();
    run(&mut model, "select 1");
    run(&mut model, "delete 1");
    assert_eq!(model.selected_internship_id(), Some(acme.id()));
    assert!(model.selected_internship().is_none());

    let found = run(&mut model, "event find na/o");
    assert_eq!(found.feedback, "Found events: 2");

    let result = run(&mut model, "event delete 1");

    // The selection no longer exists, so the deleted event's internship is shown.
    assert_eq!(result.selected, Some(beta.clone()));
    let names: Vec<String> = result
        .events
        .unwrap()
        .iter()
        .map(|e| e.name().to_string())
        .collect();
    assert_eq!(names, vec!["Offer call"]);
}

#[test]
fn test_event_edit_after_selected_internship_deleted() {
    let (mut model, _, beta) = populated();
    run(&mut model, "select 1");
    run(&mut model, "delete 1");
    run(&mut model, "event find na/call");

    let result = run(&mut model, "event edit 1 na/Offer call (final)");

    assert_eq!(result.selected, Some(beta.clone()));
    assert_eq!(result.events.map(|e| e.len()), Some(2));
}
