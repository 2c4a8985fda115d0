/// Format-version and media-type constants shared across crates
pub const VERSION_ICALENDAR: &str = "2.0";
pub const VERSION_VCALENDAR: &str = "1.0";

pub const MEDIA_TYPE_CALENDAR: &str = "text/calendar";
pub const MEDIA_TYPE_ICALENDAR: &str =
    const_str::concat!(MEDIA_TYPE_CALENDAR, "; version=", VERSION_ICALENDAR);
pub const MEDIA_TYPE_VCALENDAR: &str =
    const_str::concat!(MEDIA_TYPE_CALENDAR, "; version=", VERSION_VCALENDAR);
