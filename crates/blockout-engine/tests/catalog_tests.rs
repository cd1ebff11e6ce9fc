//! Tests for the slot catalog and inclusive time-range expansion.

use blockout_engine::catalog::{label_to_minutes, SlotCatalog, DEFAULT_SLOTS};

// ---------------------------------------------------------------------------
// Label → minutes-since-midnight (12-hour-clock rules)
// ---------------------------------------------------------------------------

#[test]
fn twelve_hour_clock_edge_rules() {
    assert_eq!(label_to_minutes("12:00 AM"), Some(0)); // midnight
    assert_eq!(label_to_minutes("12:00 PM"), Some(720)); // noon
    assert_eq!(label_to_minutes("1:00 PM"), Some(780));
    assert_eq!(label_to_minutes("11:30 AM"), Some(690));
    assert_eq!(label_to_minutes("11:59 PM"), Some(1439));
}

#[test]
fn label_parsing_is_case_insensitive_and_trims() {
    assert_eq!(label_to_minutes(" 1:00 pm "), Some(780));
    assert_eq!(label_to_minutes("8:00am"), Some(480));
}

#[test]
fn non_clock_labels_have_no_minute_value() {
    for raw in ["noon", "13:00 PM", "0:30 AM", "8:00", ""] {
        assert_eq!(label_to_minutes(raw), None, "input: {raw}");
    }
}

// ---------------------------------------------------------------------------
// Catalog construction
// ---------------------------------------------------------------------------

#[test]
fn default_catalog_is_the_hourly_booking_day() {
    let catalog = SlotCatalog::default();
    assert_eq!(catalog.len(), 9);
    assert_eq!(catalog.labels().first().map(String::as_str), Some("8:00 AM"));
    assert_eq!(catalog.labels().last().map(String::as_str), Some("4:00 PM"));
    assert_eq!(
        catalog.labels().iter().map(String::as_str).collect::<Vec<_>>(),
        DEFAULT_SLOTS
    );
}

#[test]
fn labels_that_are_not_clock_times_are_dropped_at_construction() {
    let catalog = SlotCatalog::new(["9:00 AM", "lunchtime", "1:00 PM"]);
    assert_eq!(catalog.len(), 2);
    assert!(catalog.contains("9:00 AM"));
    assert!(catalog.contains("1:00 PM"));
    assert!(!catalog.contains("lunchtime"));
}

#[test]
fn resolve_lands_on_the_canonical_catalog_label() {
    let catalog = SlotCatalog::default();
    assert_eq!(catalog.resolve("2:00 PM"), Some("2:00 PM"));
    assert_eq!(catalog.resolve("2:00 pm"), Some("2:00 PM"));
    assert_eq!(catalog.resolve("02:00 PM"), Some("2:00 PM"));
    assert_eq!(catalog.resolve("2:30 PM"), None); // between slots
    assert_eq!(catalog.resolve("not a time"), None);
}

// ---------------------------------------------------------------------------
// Range expansion
// ---------------------------------------------------------------------------

#[test]
fn expansion_is_inclusive_of_both_boundaries() {
    let catalog = SlotCatalog::default();
    assert_eq!(
        catalog.expand_range("9:00 AM", "12:00 PM"),
        vec!["9:00 AM", "10:00 AM", "11:00 AM", "12:00 PM"]
    );
}

#[test]
fn expansion_preserves_catalog_order() {
    let catalog = SlotCatalog::default();
    let slots = catalog.expand_range("8:00 AM", "4:00 PM");
    assert_eq!(slots.len(), catalog.len());
    assert_eq!(
        slots,
        catalog.labels().iter().map(String::as_str).collect::<Vec<_>>()
    );
}

#[test]
fn equal_boundaries_expand_to_a_single_slot() {
    let catalog = SlotCatalog::default();
    assert_eq!(catalog.expand_range("1:00 PM", "1:00 PM"), vec!["1:00 PM"]);
}

#[test]
fn boundaries_between_slots_only_cover_what_lies_inside() {
    let catalog = SlotCatalog::default();
    assert_eq!(
        catalog.expand_range("9:30 AM", "11:30 AM"),
        vec!["10:00 AM", "11:00 AM"]
    );
}

#[test]
fn inverted_range_covers_nothing() {
    let catalog = SlotCatalog::default();
    assert!(catalog.expand_range("2:00 PM", "9:00 AM").is_empty());
}

#[test]
fn unparsable_boundary_blocks_nothing() {
    let catalog = SlotCatalog::default();
    assert!(catalog.expand_range("dawn", "12:00 PM").is_empty());
    assert!(catalog.expand_range("9:00 AM", "dusk").is_empty());
}

#[test]
fn two_hourly_catalog_expands_on_its_own_grid() {
    let catalog = SlotCatalog::new(["8:00 AM", "10:00 AM", "12:00 PM", "2:00 PM", "4:00 PM"]);
    assert_eq!(
        catalog.expand_range("9:00 AM", "1:00 PM"),
        vec!["10:00 AM", "12:00 PM"]
    );
}
