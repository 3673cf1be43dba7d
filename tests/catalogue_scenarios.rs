// File: tests/catalogue_scenarios.rs
use chrono::NaiveDate;
use interntrack::command::{Command, CommandResult, ResultType, parse_command};
use interntrack::model::{Internship, InternshipStatus};
use interntrack::store::ModelManager;

fn internship(company: &str, role: &str) -> Internship {
    Internship::new(
        company,
        role,
        InternshipStatus::Applied,
        NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
        "",
    )
    .unwrap()
}

fn run(model: &mut ModelManager, text: &str) -> Result<CommandResult, String> {
    let cmd: Command = parse_command(text).map_err(|e| e.to_string())?;
    cmd.execute(model).map_err(|e| e.to_string())
}

#[test]
fn test_find_narrows_view() {
    let acme = internship("Acme", "SWE");
    let beta = internship("Beta", "PM");
    let mut model = ModelManager::default();
    model.add_internship(acme.clone()).unwrap();
    model.add_internship(beta).unwrap();

    let result = run(&mut model, "find na/Acme").unwrap();

    assert_eq!(result.feedback, "Found internships: 1");
    assert_eq!(result.kind, ResultType::ShowInternships);
    assert_eq!(model.filtered_internships(), vec![&acme]);
}

#[test]
fn test_delete_from_filtered_view_keeps_selection() {
    let acme = internship("Acme", "SWE");
    let beta = internship("Beta", "PM");
    let mut model = ModelManager::default();
    model.add_internship(acme.clone()).unwrap();
    model.add_internship(beta.clone()).unwrap();
    model.update_selected_internship(Some(&beta));

    run(&mut model, "find na/Acme").unwrap();
    let result = run(&mut model, "delete 1").unwrap();

    assert!(result.feedback.contains(&acme.to_string()));
    assert!(!model.has_internship(&acme));
    assert_eq!(model.internship_catalogue().as_slice(), &[beta.clone()]);
    assert_eq!(model.selected_internship_id(), Some(beta.id()));
}

#[test]
fn test_delete_past_end_of_view_fails() {
    let acme = internship("Acme", "SWE");
    let mut model = ModelManager::default();
    model.add_internship(acme.clone()).unwrap();
    model.add_internship(internship("Beta", "PM")).unwrap();
    run(&mut model, "find na/Acme").unwrap();

    let err = run(&mut model, "delete 2").unwrap_err();

    assert!(err.starts_with("Invalid index"), "got: {}", err);
    assert_eq!(model.internship_catalogue().len(), 2);
}

#[test]
fn test_view_follows_catalogue_changes() {
    let mut model = ModelManager::default();
    model.add_internship(internship("Acme", "SWE")).unwrap();
    run(&mut model, "find ro/swe").unwrap();
    assert_eq!(model.filtered_internships().len(), 1);

    // Editing the only match out of the filter resets the view to everything.
    run(&mut model, "edit 1 ro/Designer").unwrap();
    assert_eq!(model.filtered_internships().len(), 1);
    assert_eq!(model.filtered_internships()[0].role(), "Designer");

    run(&mut model, "find ro/swe").unwrap();
    assert!(model.filtered_internships().is_empty());
}

#[test]
fn test_delete_internship_removes_its_events() {
    let acme = internship("Acme", "SWE");
    let beta = internship("Beta", "PM");
    let mut model = ModelManager::default();
    model.add_internship(acme.clone()).unwrap();
    model.add_internship(beta.clone()).unwrap();

    run(&mut model, "select 1").unwrap();
    run(&mut model, "event add na/Interview st/2024-03-01 10:00 en/2024-03-01 11:00").unwrap();
    run(&mut model, "select 2").unwrap();
    run(&mut model, "event add na/Call st/2024-03-02 10:00 en/2024-03-02 10:30").unwrap();
    assert_eq!(model.event_catalogue().len(), 2);

    run(&mut model, "delete 1").unwrap();

    assert_eq!(model.event_catalogue().len(), 1);
    assert!(model.events_of(acme.id()).is_empty());
    assert_eq!(model.events_of(beta.id()).len(), 1);
}

#[test]
fn test_clear_empties_everything() {
    let mut model = ModelManager::default();
    model.add_internship(internship("Acme", "SWE")).unwrap();
    run(&mut model, "select 1").unwrap();
    run(&mut model, "event add na/Interview st/2024-03-01 10:00 en/2024-03-01 11:00").unwrap();

    let result = run(&mut model, "clear").unwrap();

    assert_eq!(result.feedback, "Internship catalogue has been cleared!");
    assert!(model.internship_catalogue().is_empty());
    assert!(model.event_catalogue().is_empty());
    assert_eq!(model.selected_internship_id(), None);
}
