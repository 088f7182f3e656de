//! Settings and results through serde (feature `serde`).
#![cfg(feature = "serde")]

use salat_base::{
    AsrConvention, CalculationMethod, CalendarDate, Location, PrayerSettings,
    compute_prayer_times,
};

#[test]
fn settings_from_json_with_defaults() {
    let s: PrayerSettings =
        serde_json::from_str(r#"{ "method": "mwl", "asr": "hanafi", "fajr_angle": 16.0 }"#)
            .unwrap();
    assert_eq!(s.method, CalculationMethod::Mwl);
    assert_eq!(s.asr, AsrConvention::Hanafi);
    assert_eq!(s.fajr_angle, Some(16.0));
    assert_eq!(s.hijri_correction, 0);
    assert_eq!(s.isha_interval, None);
}

#[test]
fn unknown_field_rejected() {
    let r = serde_json::from_str::<PrayerSettings>(r#"{ "methd": "mwl" }"#);
    assert!(r.is_err());
}

#[test]
fn result_serializes_times_as_hours() {
    let loc = Location::new(40.7128, -74.0060, 10.0);
    let date = CalendarDate::new(2025, 1, 1).unwrap();
    let r = compute_prayer_times(&loc, date, -5.0, &PrayerSettings::default()).unwrap();
    let v = serde_json::to_value(r).unwrap();
    let fajr = v["rounded"]["fajr"].as_f64().unwrap();
    assert!((fajr - (5.0 + 58.0 / 60.0)).abs() < 1e-9, "fajr = {fajr}");
    assert_eq!(v["date"]["year"], 2025);
}
