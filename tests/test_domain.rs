use std::collections::HashSet;

use chrono::{Datelike, Utc};
use cinerate::domain::{
    collection::{
        entity::age_from_birth_year,
        value_objects::{
            BirthYear, Score, name_or_placeholder, production_year_or_default,
            title_or_placeholder,
        },
    },
    country::entity::{
        UNKNOWN_COUNTRY, iso_to_flag, next_available_iso_code, normalize_country_name,
    },
};

#[test]
fn iso_code_allocation_starts_at_aa() {
    let used = HashSet::new();
    assert_eq!(next_available_iso_code(&used), "AA");
}

#[test]
fn iso_code_allocation_skips_taken_codes() {
    let used: HashSet<String> = ["AA", "AB", "AD"].iter().map(|s| s.to_string()).collect();
    assert_eq!(next_available_iso_code(&used), "AC");
}

#[test]
fn iso_code_allocation_rolls_over_to_next_first_letter() {
    let mut used = HashSet::new();
    for second in b'A'..=b'Z' {
        used.insert(format!("A{}", second as char));
    }
    assert_eq!(next_available_iso_code(&used), "BA");
}

#[test]
fn iso_code_allocation_falls_back_when_space_is_exhausted() {
    let mut used = HashSet::new();
    for first in b'A'..=b'Z' {
        for second in b'A'..=b'Z' {
            used.insert(format!("{}{}", first as char, second as char));
        }
    }
    assert_eq!(next_available_iso_code(&used), "ZZ");
}

#[test]
fn flag_emoji_maps_to_regional_indicators() {
    assert_eq!(iso_to_flag("FR"), "\u{1F1EB}\u{1F1F7}");
    assert_eq!(iso_to_flag("us"), "\u{1F1FA}\u{1F1F8}");
}

#[test]
fn flag_emoji_rejects_non_alphabetic_codes() {
    assert_eq!(iso_to_flag("F1"), "");
    assert_eq!(iso_to_flag(""), "");
    assert_eq!(iso_to_flag("FRA"), "");
}

#[test]
fn country_name_is_trimmed_and_blank_becomes_unknown() {
    assert_eq!(normalize_country_name("  France  "), "France");
    assert_eq!(normalize_country_name(""), UNKNOWN_COUNTRY);
    assert_eq!(normalize_country_name("   "), UNKNOWN_COUNTRY);
}

#[test]
fn score_enforces_bounds() {
    assert!(Score::new(0.0).is_ok());
    assert!(Score::new(100.0).is_ok());
    assert!(Score::new(-0.1).is_err());
    assert!(Score::new(100.1).is_err());
    assert!(Score::new(f64::NAN).is_err());
}

#[test]
fn blank_score_defaults_to_zero() {
    let score = Score::parse_or_default("  ").unwrap();
    assert_eq!(score.value(), 0.0);
}

#[test]
fn non_numeric_score_is_rejected() {
    assert!(Score::parse_or_default("ten").is_err());
}

#[test]
fn birth_year_enforces_floor_and_current_year_ceiling() {
    let current = Utc::now().year();
    assert!(BirthYear::new(1900).is_ok());
    assert!(BirthYear::new(current).is_ok());
    assert!(BirthYear::new(1899).is_err());
    assert!(BirthYear::new(current + 1).is_err());
}

#[test]
fn blank_birth_year_defaults_to_current_year() {
    let year = BirthYear::parse_or_default("").unwrap();
    assert_eq!(year.value(), Utc::now().year());
}

#[test]
fn blank_production_year_defaults_to_current_year() {
    assert_eq!(production_year_or_default("").unwrap(), Utc::now().year());
    assert_eq!(production_year_or_default(" 1994 ").unwrap(), 1994);
    assert!(production_year_or_default("-5").is_err());
    assert!(production_year_or_default("soon").is_err());
}

#[test]
fn blank_title_and_name_fall_back_to_placeholders() {
    assert_eq!(title_or_placeholder("  "), "Untitled movie");
    assert_eq!(title_or_placeholder(" Alien "), "Alien");
    assert_eq!(name_or_placeholder(""), "Unknown actor");
    assert_eq!(name_or_placeholder(" Jodie Foster "), "Jodie Foster");
}

#[test]
fn age_is_derived_from_birth_year_and_never_negative() {
    assert_eq!(age_from_birth_year(1990, 2026), 36);
    assert_eq!(age_from_birth_year(2026, 2026), 0);
    assert_eq!(age_from_birth_year(2030, 2026), 0);
}
