//! Japan Standard Time helpers.
//!
//! Layouts are `strftime`-style format strings (see [`chrono::format::strftime`]).

use std::fmt::Write as _;

use chrono::format::{self, ParseResult, Parsed, StrftimeItems};
use chrono::{DateTime, TimeZone, Utc};
use chrono_tz::Tz;
use once_cell::sync::Lazy;

use crate::error::TimeError;

pub const JST_LOCATION_NAME: &str = "Asia/Tokyo";

/// Fixed UTC+9 zone used when the named zone cannot be loaded.
/// (`Etc/GMT-9` is UTC+9; the IANA sign is inverted.)
pub const JST_FALLBACK: Tz = Tz::Etc__GMTMinus9;

/// Process-wide JST zone, loaded on first use.
static JST_LOCATION: Lazy<Tz> = Lazy::new(|| load_location(JST_LOCATION_NAME));

/// Load a named zone, falling back to [`JST_FALLBACK`] with a warning.
pub fn load_location(name: &str) -> Tz {
    match name.parse::<Tz>() {
        Ok(tz) => tz,
        Err(e) => {
            tracing::warn!(
                location = name,
                fallback = JST_FALLBACK.name(),
                error = %e,
                "Failed to load location, falling back to fixed UTC+9 zone"
            );
            JST_FALLBACK
        }
    }
}

/// The cached JST zone. Every call returns the same instance.
pub fn jst_location() -> &'static Tz {
    &JST_LOCATION
}

/// Current time in JST.
pub fn now_jst() -> DateTime<Tz> {
    Utc::now().with_timezone(jst_location())
}

/// The same instant as `t`, expressed in JST.
pub fn to_jst<T: TimeZone>(t: &DateTime<T>) -> DateTime<Tz> {
    t.with_timezone(jst_location())
}

/// Convert `t` to JST and format it with `layout`.
///
/// An invalid layout is logged and yields an empty string.
pub fn format_jst<T: TimeZone>(t: &DateTime<T>, layout: &str) -> String {
    let mut out = String::new();
    if write!(out, "{}", to_jst(t).format(layout)).is_err() {
        tracing::warn!("Invalid time format layout: {}", layout);
        out.clear();
    }
    out
}

/// Parse `text` as a JST wall-clock time and reformat it.
///
/// `text` is not expected to carry a zone. Each field the layout leaves out
/// is zero-filled on its own (year 1970, January, day 1, midnight), so
/// `"18"` with `%H` reads as 18:00 on 1970-01-01. If `parse_layout` reads an
/// offset, that offset wins over JST.
pub fn format_jst_string(text: &str, parse_layout: &str, format_layout: &str) -> Result<String, TimeError> {
    let t = parse_in_jst(text, parse_layout)?;
    Ok(format_jst(&t, format_layout))
}

fn parse_in_jst(text: &str, layout: &str) -> Result<DateTime<Tz>, TimeError> {
    let parse_err = |source| TimeError::Parse {
        input: text.to_string(),
        layout: layout.to_string(),
        source,
    };

    let mut parsed = Parsed::new();
    format::parse(&mut parsed, text, StrftimeItems::new(layout)).map_err(parse_err)?;

    if parsed.timestamp().is_some() {
        return parsed.to_datetime().map(|dt| to_jst(&dt)).map_err(parse_err);
    }

    fill_missing_fields(&mut parsed).map_err(parse_err)?;

    if parsed.offset().is_some() {
        return parsed.to_datetime().map(|dt| to_jst(&dt)).map_err(parse_err);
    }

    let date = parsed.to_naive_date().map_err(parse_err)?;
    let time = parsed.to_naive_time().map_err(parse_err)?;

    jst_location()
        .from_local_datetime(&date.and_time(time))
        .earliest()
        .ok_or_else(|| TimeError::NonexistentLocalTime {
            input: text.to_string(),
        })
}

/// Zero-fill the fields the layout did not provide: year 1970, January,
/// day 1, hour/minute 0. Parsed fields are left alone.
fn fill_missing_fields(parsed: &mut Parsed) -> ParseResult<()> {
    let has_year = parsed.year().is_some()
        || parsed.year_div_100().is_some()
        || parsed.year_mod_100().is_some()
        || parsed.isoyear().is_some();
    if !has_year {
        parsed.set_year(1970)?;
    }

    // Ordinal and week-based layouts locate the day themselves.
    let has_alt_day = parsed.ordinal().is_some()
        || parsed.week_from_sun().is_some()
        || parsed.week_from_mon().is_some()
        || parsed.isoweek().is_some();
    if !has_alt_day {
        if parsed.month().is_none() {
            parsed.set_month(1)?;
        }
        if parsed.day().is_none() {
            parsed.set_day(1)?;
        }
    }

    match (parsed.hour_div_12(), parsed.hour_mod_12()) {
        (None, None) => parsed.set_hour(0)?,
        // %I without %p reads as AM.
        (None, Some(_)) => parsed.set_ampm(false)?,
        (Some(_), None) => parsed.set_hour12(12)?,
        (Some(_), Some(_)) => {}
    }
    if parsed.minute().is_none() {
        parsed.set_minute(0)?;
    }
    Ok(())
}
