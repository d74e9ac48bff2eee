use super::*;

fn record(id: i64, name: &str, age: f64, country: &str) -> UserRecord {
    UserRecord {
        id: RecordId(id),
        name: name.into(),
        age: AgeValue::Number(age),
        country: country.into(),
    }
}

fn loaded(records: Vec<UserRecord>) -> TableState {
    TableState::default().with_loaded(records)
}

fn draft(name: &str, age: &str, country: &str) -> RecordDraft {
    RecordDraft {
        name: name.into(),
        age: age.into(),
        country: country.into(),
    }
}

fn ids(state: &TableState) -> Vec<i64> {
    state.records.iter().map(|record| record.id.0).collect()
}

#[test]
fn starts_empty_and_loading() {
    let state = TableState::default();
    assert_eq!(state.phase, LoadPhase::Loading);
    assert!(state.records.is_empty());
    assert!(state.selected.is_empty());
    assert_eq!(state.sort_direction, SortDirection::Ascending);
}

#[test]
fn load_replaces_records_and_latches_ready() {
    let state = loaded(vec![record(1, "Ana", 30.0, "Peru")]);
    assert_eq!(state.phase, LoadPhase::Ready);
    assert_eq!(ids(&state), vec![1]);

    let reloaded = state
        .with_selection_toggled(RecordId(1))
        .with_loaded(vec![record(7, "Mia", 41.0, "Spain")]);
    assert_eq!(ids(&reloaded), vec![7]);
    assert!(reloaded.selected.is_empty(), "load clears the selection");
}

#[test]
fn generated_ids_are_unique_across_adds() {
    let mut state = loaded(vec![record(5, "Ana", 30.0, "Peru")]);
    for i in 0..20 {
        let (next, _) = state
            .with_record_added(&draft(&format!("user{i}"), "20", "Chile"))
            .expect("add");
        state = next;
    }

    let mut seen = std::collections::BTreeSet::new();
    for record in &state.records {
        assert!(seen.insert(record.id), "duplicate id {:?}", record.id);
    }
}

#[test]
fn id_counter_is_seeded_past_loaded_ids() {
    let state = loaded(vec![record(40, "Ana", 30.0, "Peru"), record(3, "Bo", 22.0, "Laos")]);
    let (state, id) = state.with_record_added(&draft("Lee", "25", "Chile")).expect("add");
    assert!(id.0 > 40, "generated id {} must not collide", id.0);
    assert_eq!(state.records.last().map(|r| r.id), Some(id));
}

#[test]
fn add_trims_inputs_and_appends_at_end() {
    let state = loaded(vec![record(1, "Ana", 30.0, "Peru")]);
    let (state, id) = state
        .with_record_added(&draft("  Lee  ", " 25 ", "  Chile "))
        .expect("add");

    let added = state.records.last().expect("appended");
    assert_eq!(added.id, id);
    assert_eq!(added.name, "Lee");
    assert_eq!(added.age, AgeValue::Number(25.0));
    assert_eq!(added.country, "Chile");
}

#[test]
fn add_requires_name_and_country_but_not_age() {
    let state = loaded(Vec::new());
    assert_eq!(
        state.with_record_added(&draft("   ", "25", "Chile")).unwrap_err(),
        AddRecordError::MissingName
    );
    assert_eq!(
        state.with_record_added(&draft("Lee", "25", "")).unwrap_err(),
        AddRecordError::MissingCountry
    );

    let (state, _) = state.with_record_added(&draft("Lee", "", "Chile")).expect("add");
    assert_eq!(state.records[0].age, AgeValue::Text(String::new()));
}

#[test]
fn remove_is_idempotent() {
    let state = loaded(vec![record(1, "Ana", 30.0, "Peru"), record(2, "Bo", 22.0, "Laos")]);
    let once = state.with_record_removed(RecordId(1));
    let twice = once.with_record_removed(RecordId(1));
    assert_eq!(ids(&once), vec![2]);
    assert_eq!(ids(&once), ids(&twice));

    let untouched = state.with_record_removed(RecordId(99));
    assert_eq!(ids(&untouched), ids(&state));
}

#[test]
fn remove_prunes_the_selection() {
    let state = loaded(vec![record(1, "Ana", 30.0, "Peru"), record(2, "Bo", 22.0, "Laos")])
        .with_selection_toggled(RecordId(1))
        .with_selection_toggled(RecordId(2));

    let state = state.with_record_removed(RecordId(1));
    assert!(!state.selected.contains(&RecordId(1)));
    assert!(state.selected.contains(&RecordId(2)));
}

#[test]
fn sort_is_stable_and_toggles_direction() {
    // Ages [30, 25, 30, 20]; the two 30s must keep their relative order.
    let state = loaded(vec![
        record(1, "Ana", 30.0, "Peru"),
        record(2, "Bo", 25.0, "Laos"),
        record(3, "Cy", 30.0, "Mali"),
        record(4, "Di", 20.0, "Peru"),
    ]);

    let ascending = state.with_sorted_by_age();
    assert_eq!(ids(&ascending), vec![4, 2, 1, 3]);
    assert_eq!(ascending.sort_direction, SortDirection::Descending);

    let descending = ascending.with_sorted_by_age();
    assert_eq!(ids(&descending), vec![1, 3, 2, 4]);
    assert_eq!(descending.sort_direction, SortDirection::Ascending);
}

#[test]
fn non_numeric_ages_sort_last_in_both_directions() {
    let state = loaded(vec![record(1, "Ana", 30.0, "Peru"), record(2, "Bo", 25.0, "Laos")])
        .with_field_updated(RecordId(1), EditableField::Age, Some("unknown"));

    let ascending = state.with_sorted_by_age();
    assert_eq!(ids(&ascending), vec![2, 1]);

    let descending = ascending.with_sorted_by_age();
    assert_eq!(ids(&descending), vec![2, 1], "text still sorts last descending");
}

#[test]
fn select_toggle_flips_membership_and_ignores_unknown_ids() {
    let state = loaded(vec![record(1, "Ana", 30.0, "Peru")]);

    let selected = state.with_selection_toggled(RecordId(1));
    assert!(selected.selected.contains(&RecordId(1)));

    let deselected = selected.with_selection_toggled(RecordId(1));
    assert!(deselected.selected.is_empty());

    let unknown = state.with_selection_toggled(RecordId(42));
    assert!(unknown.selected.is_empty());
}

#[test]
fn select_all_toggle_covers_then_clears() {
    let state = loaded(vec![record(1, "Ana", 30.0, "Peru"), record(2, "Bo", 22.0, "Laos")])
        .with_selection_toggled(RecordId(1));

    let all = state.with_select_all_toggled();
    assert_eq!(all.selected.len(), 2);
    assert!(all.snapshot().all_selected());

    let none = all.with_select_all_toggled();
    assert!(none.selected.is_empty());
}

#[test]
fn select_all_toggle_on_empty_collection_is_a_no_op() {
    let state = TableState::default().with_select_all_toggled();
    assert!(state.records.is_empty());
    assert!(state.selected.is_empty());

    let loaded_empty = loaded(Vec::new()).with_select_all_toggled();
    assert!(loaded_empty.selected.is_empty());
}

#[test]
fn id_counter_saturates_on_maximal_loaded_id() {
    // A hostile payload carrying i64::MAX must not overflow the counter.
    let state = loaded(vec![record(i64::MAX, "Ana", 30.0, "Peru")]);
    let (state, id) = state.with_record_added(&draft("Lee", "25", "Chile")).expect("add");
    assert_eq!(id, RecordId(i64::MAX));
    assert_eq!(state.records.len(), 2);

    let (state, _) = state.with_record_added(&draft("Mia", "41", "Spain")).expect("add");
    assert_eq!(state.records.len(), 3);
}

#[test]
fn remove_selected_drops_exactly_the_selection() {
    let state = loaded(vec![
        record(1, "Ana", 30.0, "Peru"),
        record(2, "Bo", 22.0, "Laos"),
        record(3, "Cy", 28.0, "Mali"),
    ])
    .with_selection_toggled(RecordId(1))
    .with_selection_toggled(RecordId(3));

    let state = state.with_selected_removed();
    assert_eq!(ids(&state), vec![2]);
    assert!(state.selected.is_empty());
}

#[test]
fn edit_trims_text_and_treats_absent_value_as_empty() {
    let state = loaded(vec![record(1, "Ana", 30.0, "Peru")]);

    let state = state.with_field_updated(RecordId(1), EditableField::Country, Some("  France  "));
    assert_eq!(state.records[0].country, "France");

    let state = state.with_field_updated(RecordId(1), EditableField::Country, None);
    assert_eq!(state.records[0].country, "");
}

#[test]
fn edit_parses_numeric_age_and_keeps_text_otherwise() {
    let state = loaded(vec![record(1, "Ana", 30.0, "Peru")]);

    let state = state.with_field_updated(RecordId(1), EditableField::Age, Some(" 42 "));
    assert_eq!(state.records[0].age, AgeValue::Number(42.0));

    let state = state.with_field_updated(RecordId(1), EditableField::Age, Some("forty"));
    assert_eq!(state.records[0].age, AgeValue::Text("forty".into()));
}

#[test]
fn edit_on_absent_id_is_a_no_op() {
    let state = loaded(vec![record(1, "Ana", 30.0, "Peru")]);
    let edited = state.with_field_updated(RecordId(9), EditableField::Name, Some("Ghost"));
    assert_eq!(edited.records[0].name, "Ana");
}

#[test]
fn compare_ages_is_deterministic_for_text_pairs() {
    let left = AgeValue::Text("abc".into());
    let right = AgeValue::Text("xyz".into());
    assert_eq!(
        compare_ages(&left, &right, SortDirection::Ascending),
        Ordering::Equal
    );
    assert_eq!(
        compare_ages(&left, &right, SortDirection::Descending),
        Ordering::Equal
    );
}
