use chrono::{DateTime, NaiveDateTime, Utc};

/// Format used for every timestamp the app writes into a record
pub const DEFAULT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// UTC timestamp with the app's default textual format
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct FtrDateTime(DateTime<Utc>);

impl FtrDateTime {
    pub fn now() -> Self {
        Self(Utc::now())
    }

    pub fn from_utc(at: DateTime<Utc>) -> Self {
        Self(at)
    }

    /// Parse a timestamp previously written with [`FtrDateTime::default_format`]
    pub fn parse_default(s: &str) -> Option<Self> {
        NaiveDateTime::parse_from_str(s, DEFAULT_FORMAT)
            .ok()
            .map(|naive| Self(naive.and_utc()))
    }

    pub fn default_format(&self) -> String {
        self.0.format(DEFAULT_FORMAT).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_default_format() {
        let at = Utc.with_ymd_and_hms(2013, 9, 4, 17, 5, 9).unwrap();
        assert_eq!(FtrDateTime::from_utc(at).default_format(), "2013-09-04 17:05:09");
    }

    #[test]
    fn test_parse_default_round_trip() {
        let now = FtrDateTime::now();
        let parsed = FtrDateTime::parse_default(&now.default_format()).unwrap();
        assert_eq!(parsed.default_format(), now.default_format());
        assert!(FtrDateTime::parse_default("04/09/2013").is_none());
    }
}
