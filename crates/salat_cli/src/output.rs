//! Plain-text rendering of library results.

use std::fmt::{self, Write};

use salat_base::{
    CalculationMethod, DailyResult, EventTime, IshaRule, Location, Prayer, PrayerTimesResult,
    Qibla, ReverseResult, ReverseWarning, TwilightRule,
};
use salat_time::{CalendarDate, HijriDate};

/// `UTC+03:00`, `UTC-05:30`.
pub fn format_utc_offset(hours: f64) -> String {
    let minutes = (hours * 60.0).round() as i64;
    let sign = if minutes < 0 { '-' } else { '+' };
    let m = minutes.abs();
    format!("UTC{sign}{:02}:{:02}", m / 60, m % 60)
}

pub fn format_qibla(q: Qibla) -> String {
    match q {
        Qibla::Bearing(b) => format!("{b:.2}°"),
        Qibla::AtKaaba => "undefined (at the Kaaba)".to_string(),
        Qibla::Antipodal => "undefined (antipode of the Kaaba, any direction)".to_string(),
    }
}

fn format_rule(rule: TwilightRule) -> String {
    match rule {
        TwilightRule::Angle => "solar angle".to_string(),
        TwilightRule::NightFraction(reason) => format!("night fraction ({reason:?})"),
        TwilightRule::FixedInterval(m) => format!("{m} min after Maghrib"),
    }
}

fn format_time(t: EventTime, precise: bool) -> String {
    if precise {
        format!("{t:#}")
    } else {
        t.to_string()
    }
}

pub fn render_times(
    r: &PrayerTimesResult,
    location: &Location,
    method: CalculationMethod,
    precise: bool,
) -> Result<String, fmt::Error> {
    let mut out = String::new();
    writeln!(
        out,
        "Prayer times for {} at {:.4}, {:.4} ({})",
        r.date,
        location.latitude_deg,
        location.longitude_deg,
        format_utc_offset(r.utc_offset_hours)
    )?;
    writeln!(out, "Method:  {} ({})", method.name(), method.key())?;
    writeln!(out, "Hijri:   {}", r.hijri)?;
    writeln!(out, "Qibla:   {}", format_qibla(r.qibla))?;
    writeln!(out)?;
    let times = if precise { &r.precise } else { &r.rounded };
    for (prayer, t) in times.iter() {
        writeln!(out, "  {:<8} {}", prayer.name(), format_time(t, precise))?;
    }
    if r.fajr_rule != TwilightRule::Angle || r.isha_rule != TwilightRule::Angle {
        writeln!(out)?;
        writeln!(out, "Fajr by {}", format_rule(r.fajr_rule))?;
        writeln!(out, "Isha by {}", format_rule(r.isha_rule))?;
    }
    Ok(out)
}

pub fn render_month(days: &[DailyResult]) -> Result<String, fmt::Error> {
    let mut out = String::new();
    write!(out, "{:<12}", "Date")?;
    for p in Prayer::ALL {
        write!(out, "{:<9}", p.name())?;
    }
    writeln!(out, "Hijri")?;
    for (date, result) in days {
        write!(out, "{:<12}", date.to_string())?;
        match result {
            Ok(r) => {
                for (_, t) in r.rounded.iter() {
                    write!(out, "{:<9}", t.to_string())?;
                }
                writeln!(out, "{}", r.hijri)?;
            }
            Err(e) => {
                writeln!(out, "{e}")?;
            }
        }
    }
    Ok(out)
}

pub fn render_hijri(date: CalendarDate, hijri: HijriDate) -> String {
    let arabic = hijri
        .hijri_month()
        .map(|m| m.arabic_name())
        .unwrap_or_default();
    format!("{date} = {hijri} ({arabic})\n")
}

pub fn render_methods() -> Result<String, fmt::Error> {
    let mut out = String::new();
    writeln!(out, "{:<7}{:<8}{:<24}Name", "Key", "Fajr", "Isha")?;
    for &m in CalculationMethod::all() {
        let p = m.params();
        let isha = match p.isha {
            IshaRule::Angle(a) => format!("{a}°"),
            IshaRule::FixedInterval {
                normal_min,
                ramadan_min,
            } if normal_min == ramadan_min => format!("{normal_min} min"),
            IshaRule::FixedInterval {
                normal_min,
                ramadan_min,
            } => format!("{normal_min} min ({ramadan_min} Ramadan)"),
        };
        writeln!(
            out,
            "{:<7}{:<8}{:<24}{}",
            m.key(),
            format!("{}°", p.fajr_angle),
            isha,
            m.name()
        )?;
    }
    Ok(out)
}

fn format_warning(w: &ReverseWarning) -> String {
    match *w {
        ReverseWarning::HighLatitudeRule { latitude } => format!(
            "latitude {latitude:.1}° is beyond the threshold; angle follows the night-fraction rule"
        ),
        ReverseWarning::OutsideTypicalRange { angle, low, high } => {
            format!("{angle:.2}° is outside the typical range {low}-{high}°")
        }
        ReverseWarning::OutsideValidRange { angle } => {
            format!("{angle:.2}° is outside 0-30°, check the observed times")
        }
        ReverseWarning::LargeAngleDifference { difference } => {
            format!("Fajr and Isha angles differ by {difference:.2}°")
        }
    }
}

pub fn render_reverse(r: &ReverseResult) -> Result<String, fmt::Error> {
    let mut out = String::new();
    writeln!(
        out,
        "Solar noon {:#}, sunrise {:#}, declination {:.3}°",
        r.transit, r.sunrise, r.sun.declination
    )?;
    writeln!(
        out,
        "Fajr angle:  {:.2}° ({:?})",
        r.fajr.angle_deg, r.fajr.rule
    )?;
    writeln!(
        out,
        "Isha angle:  {:.2}° ({:?})",
        r.isha.angle_deg, r.isha.rule
    )?;
    writeln!(out, "Isha delay:  {:.1} min after Maghrib", r.isha_minutes)?;
    writeln!(out, "Valid:       {}", if r.is_valid() { "yes" } else { "no" })?;
    for w in r.all_warnings() {
        writeln!(out, "warning: {}", format_warning(w))?;
    }
    Ok(out)
}
