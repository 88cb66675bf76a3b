use crate::domain::message::Message;
use clap::ValueEnum;
use uuid::Uuid;

/// Placement strategy for the "seen" indicator. The product shipped two
/// divergent versions of this logic, so both are kept as named strategies
/// and the active one is chosen by configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ReadReceiptStyle {
    /// Only report a read message when the conversation's newest message was
    /// sent by the viewer.
    GateOnLastSender,
    /// Always report the viewer's most recent read message, regardless of
    /// who sent the newest message.
    ScanAll,
}

/// Returns the id of the most recent message authored by `viewer_id` that the
/// counterpart has already read, for seen-indicator placement.
///
/// `messages` must be ordered oldest-first. Scans backward and early-exits on
/// the first hit; no side effects.
#[must_use]
pub fn most_recent_read(messages: &[Message], viewer_id: Uuid, style: ReadReceiptStyle) -> Option<Uuid> {
    if style == ReadReceiptStyle::GateOnLastSender && messages.last().is_none_or(|m| m.sender_id != viewer_id) {
        return None;
    }

    messages.iter().rev().find(|m| m.read && m.sender_id == viewer_id).map(|m| m.id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::OffsetDateTime;

    fn msg(id: u128, sender: Uuid, read: bool) -> Message {
        Message {
            id: Uuid::from_u128(id),
            conversation_id: Uuid::from_u128(99),
            sender_id: sender,
            text: format!("message {id}"),
            read,
            created_at: OffsetDateTime::from_unix_timestamp(1_700_000_000 + id as i64).unwrap(),
        }
    }

    #[test]
    fn empty_sequence_yields_none() {
        let viewer = Uuid::from_u128(1);
        assert_eq!(most_recent_read(&[], viewer, ReadReceiptStyle::GateOnLastSender), None);
        assert_eq!(most_recent_read(&[], viewer, ReadReceiptStyle::ScanAll), None);
    }

    #[test]
    fn no_read_messages_from_viewer_yields_none() {
        let viewer = Uuid::from_u128(1);
        let other = Uuid::from_u128(2);
        let messages = [msg(1, viewer, false), msg(2, other, true), msg(3, viewer, false)];
        assert_eq!(most_recent_read(&messages, viewer, ReadReceiptStyle::GateOnLastSender), None);
        assert_eq!(most_recent_read(&messages, viewer, ReadReceiptStyle::ScanAll), None);
    }

    #[test]
    fn strategies_diverge_when_counterpart_sent_last() {
        // messages: A read, A unread, B unread; viewer A
        let viewer = Uuid::from_u128(1);
        let other = Uuid::from_u128(2);
        let messages = [msg(1, viewer, true), msg(2, viewer, false), msg(3, other, false)];

        assert_eq!(most_recent_read(&messages, viewer, ReadReceiptStyle::GateOnLastSender), None);
        assert_eq!(
            most_recent_read(&messages, viewer, ReadReceiptStyle::ScanAll),
            Some(Uuid::from_u128(1))
        );
    }

    #[test]
    fn both_strategies_agree_when_viewer_sent_last() {
        let viewer = Uuid::from_u128(1);
        let other = Uuid::from_u128(2);
        let messages = [msg(1, viewer, true), msg(2, other, true), msg(3, viewer, true), msg(4, viewer, false)];

        for style in [ReadReceiptStyle::GateOnLastSender, ReadReceiptStyle::ScanAll] {
            assert_eq!(most_recent_read(&messages, viewer, style), Some(Uuid::from_u128(3)));
        }
    }

    #[test]
    fn counterpart_read_messages_are_never_reported() {
        // The counterpart's own read messages must not attract the indicator.
        let viewer = Uuid::from_u128(1);
        let other = Uuid::from_u128(2);
        let messages = [msg(1, viewer, true), msg(2, other, true), msg(3, viewer, false)];

        assert_eq!(
            most_recent_read(&messages, viewer, ReadReceiptStyle::GateOnLastSender),
            Some(Uuid::from_u128(1))
        );
        assert_eq!(
            most_recent_read(&messages, viewer, ReadReceiptStyle::ScanAll),
            Some(Uuid::from_u128(1))
        );
    }
}
