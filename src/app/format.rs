use crate::domain::notification::NotificationKind;
use crate::domain::user::Avatar;

pub const AVATAR_SIZE: u32 = 40;

const AVATAR_FALLBACK_BASE: &str = "https://ui-avatars.com/api/";

const MINUTES_IN_DAY: i64 = 1_440;
const MINUTES_IN_MONTH: i64 = 43_200;
const MINUTES_IN_TWO_MONTHS: i64 = 86_400;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowIcon {
    UserPlus,
    Heart,
    Bell,
}

impl RowIcon {
    pub fn for_kind(kind: NotificationKind) -> Self {
        match kind {
            NotificationKind::FriendRequest => RowIcon::UserPlus,
            NotificationKind::Like => RowIcon::Heart,
            NotificationKind::Comment | NotificationKind::System => RowIcon::Bell,
        }
    }
}

/// Resolves an avatar to a displayable URL, falling back to a generated
/// initials image for `name`.
pub fn avatar_url(avatar: Option<&Avatar>, name: &str, size: u32) -> String {
    match avatar {
        Some(avatar) => avatar.url().to_string(),
        None => {
            let name: String = url::form_urlencoded::byte_serialize(name.as_bytes()).collect();
            format!(
                "{}?name={}&size={}&background=random",
                AVATAR_FALLBACK_BASE, name, size
            )
        }
    }
}

/// Human distance between two epoch-millisecond instants, e.g. "5 minutes ago"
/// or "in about 2 hours".
pub fn relative_time(at_millis: i64, now_millis: i64) -> String {
    let delta_seconds = (now_millis - at_millis) / 1_000;
    let distance = distance_words(delta_seconds.abs());
    if delta_seconds < 0 {
        format!("in {}", distance)
    } else {
        format!("{} ago", distance)
    }
}

fn distance_words(seconds: i64) -> String {
    let minutes = (seconds + 30) / 60;

    if minutes < 1 {
        return "less than a minute".to_string();
    }
    if minutes < 45 {
        return plural(minutes, "minute");
    }
    if minutes < 90 {
        return "about 1 hour".to_string();
    }
    if minutes < MINUTES_IN_DAY {
        let hours = (minutes + 30) / 60;
        return format!("about {}", plural(hours, "hour"));
    }
    if minutes < 2_520 {
        return "1 day".to_string();
    }
    if minutes < MINUTES_IN_MONTH {
        let days = (minutes + MINUTES_IN_DAY / 2) / MINUTES_IN_DAY;
        return plural(days, "day");
    }
    if minutes < MINUTES_IN_TWO_MONTHS {
        let months = (minutes + MINUTES_IN_MONTH / 2) / MINUTES_IN_MONTH;
        return format!("about {}", plural(months, "month"));
    }

    let months = minutes / MINUTES_IN_MONTH;
    if months < 12 {
        return plural(months, "month");
    }

    let years = months / 12;
    match months % 12 {
        0..=2 => format!("about {}", plural(years, "year")),
        3..=8 => format!("over {}", plural(years, "year")),
        _ => format!("almost {}", plural(years + 1, "year")),
    }
}

fn plural(count: i64, unit: &str) -> String {
    if count == 1 {
        format!("1 {}", unit)
    } else {
        format!("{} {}s", count, unit)
    }
}
