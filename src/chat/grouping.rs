use chrono::NaiveDate;

use crate::api::models::ChatMessage;
use crate::chat::time::{format_date_label, format_timestamp, parse_timestamp};

pub const TODAY: &str = "Today";
pub const YESTERDAY: &str = "Yesterday";
pub const UNKNOWN_DATE: &str = "Unknown date";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateGroup {
    pub label: String,
    pub messages: Vec<ChatMessage>,
}

pub fn date_label(timestamp: &str, today: NaiveDate) -> String {
    let Some(date) = parse_timestamp(timestamp).map(|dt| dt.date_naive()) else {
        return UNKNOWN_DATE.to_string();
    };
    if date == today {
        TODAY.to_string()
    } else if Some(date) == today.pred_opt() {
        YESTERDAY.to_string()
    } else {
        format_date_label(date)
    }
}

/// Buckets messages by calendar day.
///
/// Buckets come out in order of first occurrence, not by date, and keep the
/// message order of the input.
pub fn group_by_date(messages: &[ChatMessage], today: NaiveDate) -> Vec<DateGroup> {
    let mut groups: Vec<DateGroup> = Vec::new();
    for message in messages {
        let label = date_label(&message.timestamp, today);
        match groups.iter_mut().find(|g| g.label == label) {
            Some(group) => group.messages.push(message.clone()),
            None => groups.push(DateGroup { label, messages: vec![message.clone()] }),
        }
    }
    groups
}

/// How one message is presented to a given viewer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageRow<'a> {
    pub text: &'a str,
    pub own: bool,
    pub author: &'a str,
    pub time: String,
}

impl<'a> MessageRow<'a> {
    pub fn new(message: &'a ChatMessage, viewer_first_name: &str) -> Self {
        let own = message.send_by == viewer_first_name;
        Self {
            text: &message.message,
            own,
            author: if own { "You" } else { message.send_by.as_str() },
            time: format_timestamp(&message.timestamp),
        }
    }

    pub fn caption(&self) -> String {
        format!("{}, {}", self.author, self.time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::testing::message;
    use chrono::{Duration, Local, TimeZone};

    fn at_noon(date: NaiveDate) -> String {
        let naive = date.and_hms_opt(12, 0, 0).unwrap();
        Local.from_local_datetime(&naive).earliest().unwrap().to_rfc3339()
    }

    #[test]
    fn three_buckets_in_first_seen_order() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
        let yesterday = today - Duration::days(1);
        let older = today - Duration::days(2);
        let messages = vec![
            message("a", &at_noon(today), "Ada"),
            message("b", &at_noon(yesterday), "Bob"),
            message("c", &at_noon(older), "Ada"),
            message("d", &at_noon(today), "Bob"),
        ];

        let groups = group_by_date(&messages, today);
        let labels: Vec<_> = groups.iter().map(|g| g.label.as_str()).collect();
        assert_eq!(labels, ["Today", "Yesterday", "October 16, 2026"]);

        let texts: Vec<Vec<_>> = groups
            .iter()
            .map(|g| g.messages.iter().map(|m| m.message.as_str()).collect())
            .collect();
        assert_eq!(texts, [vec!["a", "d"], vec!["b"], vec!["c"]]);
    }

    #[test]
    fn bucket_order_follows_arrival_not_date() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
        let messages = vec![
            message("late", &at_noon(today), "Ada"),
            message("early", &at_noon(today - Duration::days(1)), "Ada"),
        ];
        let labels: Vec<_> = group_by_date(&messages, today).into_iter().map(|g| g.label).collect();
        assert_eq!(labels, ["Today", "Yesterday"]);
    }

    #[test]
    fn unparseable_timestamps_share_a_bucket() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
        let messages = vec![message("x", "???", "Ada"), message("y", "", "Ada")];
        let groups = group_by_date(&messages, today);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].label, UNKNOWN_DATE);
    }

    #[test]
    fn empty_input_has_no_groups() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
        assert!(group_by_date(&[], today).is_empty());
    }

    #[test]
    fn own_messages_are_captioned_as_you() {
        let ts = Local.with_ymd_and_hms(2026, 10, 18, 9, 7, 0).unwrap().to_rfc3339();
        let mine = message("hi", &ts, "Ada");
        let theirs = message("hello", &ts, "Grace");

        let row = MessageRow::new(&mine, "Ada");
        assert!(row.own);
        assert_eq!(row.caption(), "You, 9:07 AM");

        let row = MessageRow::new(&theirs, "Ada");
        assert!(!row.own);
        assert_eq!(row.caption(), "Grace, 9:07 AM");
    }
}
