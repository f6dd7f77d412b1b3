//! Relative-day bucketing of sessions for the conversation sidebar.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Named time window a session falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RelativeDay {
    Today,
    Yesterday,
    #[serde(rename = "This week")]
    ThisWeek,
    Older,
}

impl RelativeDay {
    /// Display order for the sidebar, newest window first.
    pub const ALL: [RelativeDay; 4] = [
        RelativeDay::Today,
        RelativeDay::Yesterday,
        RelativeDay::ThisWeek,
        RelativeDay::Older,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RelativeDay::Today => "Today",
            RelativeDay::Yesterday => "Yesterday",
            RelativeDay::ThisWeek => "This week",
            RelativeDay::Older => "Older",
        }
    }
}

impl std::fmt::Display for RelativeDay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A conversation record as the session store hands it over.
///
/// Grouping only reads the timestamps; the record itself stays untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: String,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Conversation content the store owns; opaque here.
    #[serde(default)]
    pub metadata: serde_json::Value,
}

/// One sidebar bucket, produced fresh on every grouping call.
#[derive(Debug, Clone, Serialize)]
pub struct SessionGroup {
    pub group: RelativeDay,
    pub sessions: Vec<Session>,
}

/// Which window a timestamp falls into, by calendar-day difference in the
/// clock's own timezone.
///
/// Day boundaries count, not elapsed hours: 23:59 yesterday is already
/// "Yesterday" two minutes later. Exactly seven days back is still "This
/// week", eight and beyond is "Older". Future timestamps clamp to "Today".
pub fn relative_day<Tz: TimeZone>(now: &DateTime<Tz>, ts: DateTime<Utc>) -> RelativeDay {
    let ts = ts.with_timezone(&now.timezone());
    let days = (now.date_naive() - ts.date_naive()).num_days();
    match days {
        d if d <= 0 => RelativeDay::Today,
        1 => RelativeDay::Yesterday,
        2..=7 => RelativeDay::ThisWeek,
        _ => RelativeDay::Older,
    }
}

/// Bucket sessions into relative-day groups for the sidebar.
///
/// Groups come out in [`RelativeDay::ALL`] order with empty windows
/// skipped. Within a group sessions are newest first, ties keeping their
/// input order. The caller reads `now` once and passes it in, so a
/// grouping pass cannot straddle a day boundary mid-list.
pub fn group_sessions_by_day<Tz: TimeZone>(
    now: &DateTime<Tz>,
    sessions: &[Session],
) -> Vec<SessionGroup> {
    let mut ordered: Vec<Session> = sessions.to_vec();
    ordered.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));

    let mut groups: Vec<SessionGroup> = RelativeDay::ALL
        .iter()
        .map(|day| SessionGroup {
            group: *day,
            sessions: Vec::new(),
        })
        .collect();
    for session in ordered {
        let slot = relative_day(now, session.updated_at) as usize;
        groups[slot].sessions.push(session);
    }
    groups.retain(|group| !group.sessions.is_empty());
    groups
}
