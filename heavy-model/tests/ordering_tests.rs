use chrono::{TimeZone, Utc};
use heavy_model::{
    Category, Entity, ExchangeRate, Manufacturer, RecordId, SortOrder, by_text, newest_first,
};
use std::cmp::Ordering;

fn manufacturer(id: u64, name: &str) -> Manufacturer {
    Manufacturer {
        id: RecordId::new(id),
        name: name.to_string(),
        description: None,
        logo: None,
        created_at: None,
        updated_at: None,
    }
}

#[test]
fn by_text_ignores_case() {
    assert_eq!(by_text("alpha", "Beta"), Ordering::Less);
    assert_eq!(by_text("Zeta", "beta"), Ordering::Greater);
}

#[test]
fn by_text_is_total_for_case_variants() {
    assert_ne!(by_text("abc", "ABC"), Ordering::Equal);
    assert_eq!(by_text("abc", "abc"), Ordering::Equal);
}

#[test]
fn newest_first_puts_missing_last() {
    let early = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let late = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();

    assert_eq!(newest_first(Some(&late), Some(&early)), Ordering::Less);
    assert_eq!(newest_first(Some(&early), Some(&late)), Ordering::Greater);
    assert_eq!(newest_first(Some(&early), None), Ordering::Less);
    assert_eq!(newest_first(None, None), Ordering::Equal);
}

#[test]
fn manufacturers_sort_by_name() {
    let cmp = Manufacturer::sort_order().comparator().unwrap();
    let a = manufacturer(1, "Volvo");
    let b = manufacturer(2, "caterpillar");
    assert_eq!(cmp(&a, &b), Ordering::Greater);
}

#[test]
fn exchange_rates_sort_newest_first() {
    let cmp = ExchangeRate::sort_order().comparator().unwrap();
    let old = ExchangeRate {
        id: RecordId::new(1),
        rate: 3900.0,
        created_at: Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()),
        updated_at: None,
    };
    let new = ExchangeRate {
        id: RecordId::new(2),
        rate: 4100.0,
        created_at: Some(Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap()),
        updated_at: None,
    };
    assert_eq!(cmp(&new, &old), Ordering::Less);
}

#[test]
fn sort_order_debug_hides_comparator() {
    assert_eq!(format!("{:?}", SortOrder::<Category>::Server), "Server");
    assert_eq!(format!("{:?}", Category::sort_order()), "By(..)");
}
