//! Chat transcript model
//!
//! Every message gets a monotonically increasing id. A pending request is
//! represented by its "thinking" placeholder; when the request resolves, the
//! replies take the placeholder's position, so the transcript stays in the
//! order questions were asked even if answers arrive out of order.

use serde::Serialize;
use shared_types::ChatMessage;

pub type MessageId = u64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    pub id: MessageId,
    #[serde(flatten)]
    pub message: ChatMessage,
}

#[derive(Debug, Default)]
pub struct Transcript {
    entries: Vec<Entry>,
    next_id: MessageId,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message and return its id
    pub fn push(&mut self, message: ChatMessage) -> MessageId {
        let id = self.allocate();
        self.entries.push(Entry { id, message });
        id
    }

    /// Swap the placeholder `id` for `replies`.
    ///
    /// Returns the inserted entries. If the placeholder is gone the replies
    /// are appended at the end instead.
    pub fn resolve(&mut self, id: MessageId, replies: Vec<ChatMessage>) -> Vec<Entry> {
        let inserted: Vec<Entry> = replies
            .into_iter()
            .map(|message| Entry {
                id: self.allocate(),
                message,
            })
            .collect();

        match self.position(id) {
            Some(pos) => {
                self.entries.splice(pos..=pos, inserted.iter().cloned());
            }
            None => self.entries.extend(inserted.iter().cloned()),
        }

        inserted
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn pending(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| e.message.is_placeholder())
            .count()
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(&self.entries).unwrap_or_else(|_| "[]".to_string())
    }

    fn position(&self, id: MessageId) -> Option<usize> {
        self.entries.iter().position(|e| e.id == id)
    }

    fn allocate(&mut self) -> MessageId {
        self.next_id += 1;
        self.next_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn texts(transcript: &Transcript) -> Vec<&str> {
        transcript
            .entries()
            .iter()
            .map(|e| e.message.text.as_str())
            .collect()
    }

    #[test]
    fn test_ids_increase() {
        let mut transcript = Transcript::new();
        let a = transcript.push(ChatMessage::user("a"));
        let b = transcript.push(ChatMessage::user("b"));
        assert!(b > a);
        assert_eq!(transcript.entries().len(), 2);
    }

    #[test]
    fn test_resolve_replaces_placeholder() {
        let mut transcript = Transcript::new();
        transcript.push(ChatMessage::user("Hi"));
        let pending = transcript.push(ChatMessage::thinking());
        assert_eq!(transcript.pending(), 1);

        let inserted = transcript.resolve(
            pending,
            vec![ChatMessage::bot("Hello"), ChatMessage::sources("Sources: A")],
        );

        assert_eq!(inserted.len(), 2);
        assert!(transcript.entries().iter().all(|e| e.id != pending));
        assert_eq!(transcript.pending(), 0);
        assert_eq!(texts(&transcript), vec!["Hi", "Hello", "Sources: A"]);
    }

    #[test]
    fn test_out_of_order_replies_keep_call_order() {
        let mut transcript = Transcript::new();
        transcript.push(ChatMessage::user("first?"));
        let first = transcript.push(ChatMessage::thinking());
        transcript.push(ChatMessage::user("second?"));
        let second = transcript.push(ChatMessage::thinking());

        transcript.resolve(second, vec![ChatMessage::bot("second!")]);
        transcript.resolve(first, vec![ChatMessage::bot("first!")]);

        assert_eq!(
            texts(&transcript),
            vec!["first?", "first!", "second?", "second!"]
        );
    }

    #[test]
    fn test_resolve_unknown_placeholder_appends() {
        let mut transcript = Transcript::new();
        transcript.push(ChatMessage::user("Hi"));
        transcript.resolve(99, vec![ChatMessage::bot("late")]);
        assert_eq!(texts(&transcript), vec!["Hi", "late"]);
    }

    #[test]
    fn test_json_export() {
        let mut transcript = Transcript::new();
        transcript.push(ChatMessage::user("Hi"));
        assert_eq!(
            transcript.to_json(),
            r#"[{"id":1,"text":"Hi","sender":"user","style":"plain"}]"#
        );
    }
}
