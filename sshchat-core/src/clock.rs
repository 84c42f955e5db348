use chrono::{DateTime, Utc};
use chrono_tz::Tz;

/// Source of "now" for the one time-dependent remote command (`date`).
///
/// Times carry a named zone so `%Z` renders an abbreviation (`CET`, `EST`)
/// rather than a bare offset.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Tz>;
}

/// Wall clock in the host's zone.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    zone: Tz,
}

impl SystemClock {
    pub fn new(zone: Tz) -> Self {
        Self { zone }
    }

    /// Zone reported by the host. Falls back to UTC when it can't be
    /// determined or isn't in the tz database.
    pub fn host_zone() -> Tz {
        match iana_time_zone::get_timezone() {
            Ok(name) => name.parse().unwrap_or_else(|_| {
                tracing::debug!("unknown time zone {:?}, using UTC", name);
                chrono_tz::UTC
            }),
            Err(e) => {
                tracing::debug!("host time zone unavailable ({}), using UTC", e);
                chrono_tz::UTC
            }
        }
    }

    pub fn zone(&self) -> Tz {
        self.zone
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new(Self::host_zone())
    }
}

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Tz> {
        Utc::now().with_timezone(&self.zone)
    }
}

/// Always reports the same instant. Used to keep `date` reproducible.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Tz>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Tz> {
        self.0
    }
}
