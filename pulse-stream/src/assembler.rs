//! Folding envelopes into a renderable generation session.

use std::collections::BTreeMap;

use pulse_types::{StreamEnvelope, StreamHandler, Summary};
use tokio::sync::watch;
use tracing::debug;

/// How a generation ended.
#[derive(Debug, Clone, PartialEq)]
pub enum Terminal<S = Summary> {
    /// The backend delivered the stored summary.
    Completed(S),
    /// The generation failed with this reason.
    Failed(String),
}

/// Client-side state of one streamed generation.
///
/// Partial text stays in `accumulators` after a failure so it can still be
/// shown next to the error.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationSession<S = Summary> {
    /// Last progress percentage, 0–100.
    pub progress: u8,
    /// Last status text.
    pub message: String,
    /// Accumulated text per language tag.
    pub accumulators: BTreeMap<String, String>,
    /// Set once the generation has ended.
    pub terminal: Option<Terminal<S>>,
}

impl<S> Default for GenerationSession<S> {
    fn default() -> Self {
        Self {
            progress: 0,
            message: String::new(),
            accumulators: BTreeMap::new(),
            terminal: None,
        }
    }
}

impl<S> GenerationSession<S> {
    /// Text accumulated so far for `language`.
    #[must_use]
    pub fn text(&self, language: &str) -> Option<&str> {
        self.accumulators.get(language).map(String::as_str)
    }

    /// Whether the generation has ended.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.terminal.is_some()
    }
}

fn clamp_progress(progress: i64) -> u8 {
    // In range after the clamp.
    progress.clamp(0, 100) as u8
}

/// Fold one non-terminal envelope into `session`. Returns whether anything
/// changed.
fn advance<S>(session: &mut GenerationSession<S>, envelope: &StreamEnvelope<S>) -> bool {
    match envelope {
        StreamEnvelope::Start { message } => {
            session.progress = 0;
            session.message.clone_from(message);
        }
        StreamEnvelope::Progress { progress, message } => {
            session.progress = clamp_progress(*progress);
            session.message.clone_from(message);
        }
        StreamEnvelope::ContentStart { language, .. } => {
            session.accumulators.entry(language.clone()).or_default();
            session.message = format!("generating {language}");
        }
        StreamEnvelope::ContentChunk { language, content } => {
            session
                .accumulators
                .entry(language.clone())
                .or_default()
                .push_str(content);
        }
        StreamEnvelope::ContentEnd {
            language,
            message,
            progress,
        } => {
            session.message = message
                .clone()
                .unwrap_or_else(|| format!("{language} finished"));
            if let Some(progress) = progress {
                session.progress = clamp_progress(*progress);
            }
        }
        StreamEnvelope::Complete { .. } | StreamEnvelope::Error { .. } | StreamEnvelope::Unknown => {
            return false;
        }
    }
    true
}

/// Reducer over the envelope sequence of one generation.
///
/// Implements [`StreamHandler`], so it can be handed straight to a
/// [`StreamIngestor`](crate::StreamIngestor). Non-terminal envelopes are
/// applied from `on_progress`; terminal state comes from `on_complete` and
/// `on_error`, which also covers failures the ingestor synthesizes. After a
/// terminal state every further call is ignored.
///
/// Other tasks can watch the session through [`subscribe`](Self::subscribe).
#[derive(Debug)]
pub struct SummaryAssembler<S = Summary> {
    session: GenerationSession<S>,
    snapshots: watch::Sender<GenerationSession<S>>,
}

impl<S: Clone> Default for SummaryAssembler<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Clone> SummaryAssembler<S> {
    /// Start with an empty session.
    #[must_use]
    pub fn new() -> Self {
        let (snapshots, _) = watch::channel(GenerationSession::default());
        Self {
            session: GenerationSession::default(),
            snapshots,
        }
    }

    /// A receiver that sees a fresh session snapshot after every change.
    pub fn subscribe(&self) -> watch::Receiver<GenerationSession<S>> {
        self.snapshots.send_replace(self.session.clone());
        self.snapshots.subscribe()
    }

    /// Apply `update` to the published copy, which mirrors `session` while
    /// anyone is subscribed.
    fn publish(&self, update: impl FnOnce(&mut GenerationSession<S>)) {
        if self.snapshots.receiver_count() > 0 {
            self.snapshots.send_modify(update);
        }
    }

    /// Apply one envelope. Returns the terminal state if this envelope
    /// produced it.
    pub fn apply(&mut self, envelope: StreamEnvelope<S>) -> Option<Terminal<S>> {
        match envelope {
            StreamEnvelope::Complete { summary } => self.complete(summary),
            error @ StreamEnvelope::Error { .. } => {
                let reason = error.failure_reason().unwrap_or_default();
                self.fail(reason)
            }
            other => {
                self.step(&other);
                None
            }
        }
    }

    fn step(&mut self, envelope: &StreamEnvelope<S>) {
        if self.session.is_terminal() || !advance(&mut self.session, envelope) {
            return;
        }
        self.publish(|published| {
            advance(published, envelope);
        });
    }

    fn settle(&mut self, terminal: Terminal<S>) -> Option<Terminal<S>> {
        if self.session.is_terminal() {
            return None;
        }
        let completed = matches!(terminal, Terminal::Completed(_));
        debug!(completed, "generation session settled");
        let settle = |session: &mut GenerationSession<S>| {
            session.progress = 0;
            session.message.clear();
            session.terminal = Some(terminal.clone());
        };
        settle(&mut self.session);
        self.publish(settle);
        Some(terminal)
    }

    /// Move to [`Terminal::Completed`]. No-op if already terminal.
    pub fn complete(&mut self, summary: S) -> Option<Terminal<S>> {
        self.settle(Terminal::Completed(summary))
    }

    /// Move to [`Terminal::Failed`]. No-op if already terminal.
    pub fn fail(&mut self, reason: String) -> Option<Terminal<S>> {
        self.settle(Terminal::Failed(reason))
    }

    /// Discard the session and start a new one.
    pub fn reset(&mut self) {
        self.session = GenerationSession::default();
        self.publish(|published| *published = GenerationSession::default());
    }

    /// The current session.
    #[must_use]
    pub fn session(&self) -> &GenerationSession<S> {
        &self.session
    }

    /// Consume the assembler, keeping the session.
    #[must_use]
    pub fn into_session(self) -> GenerationSession<S> {
        self.session
    }

    /// Text accumulated so far for `language`.
    #[must_use]
    pub fn text(&self, language: &str) -> Option<&str> {
        self.session.text(language)
    }

    /// Last progress percentage.
    #[must_use]
    pub fn progress(&self) -> u8 {
        self.session.progress
    }

    /// Last status text.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.session.message
    }

    /// The terminal state, once reached.
    #[must_use]
    pub fn terminal(&self) -> Option<&Terminal<S>> {
        self.session.terminal.as_ref()
    }

    /// Whether the generation has ended.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.session.is_terminal()
    }

    /// Language tags seen so far, sorted.
    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.session.accumulators.keys().map(String::as_str)
    }
}

impl<S: Clone> StreamHandler<S> for SummaryAssembler<S> {
    fn on_progress(&mut self, envelope: &StreamEnvelope<S>) {
        // Terminal envelopes arrive again through on_complete/on_error.
        self.step(envelope);
    }

    fn on_complete(&mut self, summary: S) {
        self.complete(summary);
    }

    fn on_error(&mut self, message: String) {
        self.fail(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pulse_types::{CHINESE, ENGLISH};

    type Envelope = StreamEnvelope<u32>;

    fn chunk(language: &str, content: &str) -> Envelope {
        Envelope::ContentChunk {
            language: language.into(),
            content: content.into(),
        }
    }

    #[test]
    fn start_resets_progress_and_sets_message() {
        let mut a = SummaryAssembler::<u32>::new();
        a.apply(Envelope::Progress {
            progress: 60,
            message: "halfway".into(),
        });
        a.apply(Envelope::Start {
            message: "again".into(),
        });
        assert_eq!(a.progress(), 0);
        assert_eq!(a.message(), "again");
    }

    #[test]
    fn progress_is_clamped_not_rejected() {
        let mut a = SummaryAssembler::<u32>::new();
        a.apply(Envelope::Progress {
            progress: 140,
            message: "over".into(),
        });
        assert_eq!(a.progress(), 100);
        a.apply(Envelope::Progress {
            progress: -5,
            message: "under".into(),
        });
        assert_eq!(a.progress(), 0);
        assert_eq!(a.message(), "under");
    }

    #[test]
    fn progress_may_go_backwards() {
        let mut a = SummaryAssembler::<u32>::new();
        for p in [35, 60, 40] {
            a.apply(Envelope::Progress {
                progress: p,
                message: String::new(),
            });
        }
        assert_eq!(a.progress(), 40);
    }

    #[test]
    fn content_start_creates_empty_accumulator() {
        let mut a = SummaryAssembler::<u32>::new();
        a.apply(Envelope::ContentStart {
            language: ENGLISH.into(),
            message: None,
        });
        assert_eq!(a.text(ENGLISH), Some(""));
        assert_eq!(a.message(), "generating english");
    }

    #[test]
    fn chunks_accumulate_per_language() {
        let mut a = SummaryAssembler::<u32>::new();
        a.apply(chunk(CHINESE, "A"));
        a.apply(chunk(ENGLISH, "X"));
        a.apply(chunk(CHINESE, "B"));
        assert_eq!(a.text(CHINESE), Some("AB"));
        assert_eq!(a.text(ENGLISH), Some("X"));
        assert_eq!(a.languages().collect::<Vec<_>>(), vec![CHINESE, ENGLISH]);
    }

    #[test]
    fn content_end_updates_status_only() {
        let mut a = SummaryAssembler::<u32>::new();
        a.apply(chunk(CHINESE, "文本"));
        a.apply(Envelope::ContentEnd {
            language: CHINESE.into(),
            message: Some("chinese done".into()),
            progress: Some(75),
        });
        assert_eq!(a.text(CHINESE), Some("文本"));
        assert_eq!(a.progress(), 75);
        assert_eq!(a.message(), "chinese done");
    }

    #[test]
    fn complete_is_terminal_and_sticky() {
        let mut a = SummaryAssembler::<u32>::new();
        a.apply(chunk(ENGLISH, "partial"));
        let done = a.apply(Envelope::Complete { summary: 9 });
        assert_eq!(done, Some(Terminal::Completed(9)));
        assert_eq!(a.progress(), 0);
        assert_eq!(a.message(), "");

        assert_eq!(a.apply(chunk(ENGLISH, " late")), None);
        assert_eq!(
            a.apply(Envelope::Error {
                message: Some("late".into()),
                error: None
            }),
            None
        );
        assert_eq!(a.text(ENGLISH), Some("partial"));
        assert_eq!(a.terminal(), Some(&Terminal::Completed(9)));
    }

    #[test]
    fn failure_keeps_partial_text() {
        let mut a = SummaryAssembler::<u32>::new();
        a.on_progress(&chunk(CHINESE, "一半"));
        a.on_error("connection reset".into());
        assert_eq!(a.terminal(), Some(&Terminal::Failed("connection reset".into())));
        assert_eq!(a.text(CHINESE), Some("一半"));
    }

    #[test]
    fn handler_does_not_double_append() {
        let mut a = SummaryAssembler::<u32>::new();
        let env = chunk(ENGLISH, "once");
        a.on_progress(&env);
        a.on_content_chunk(ENGLISH, "once");
        assert_eq!(a.text(ENGLISH), Some("once"));
    }

    #[test]
    fn reset_starts_fresh_session() {
        let mut a = SummaryAssembler::<u32>::new();
        a.apply(chunk(ENGLISH, "x"));
        a.fail("boom".into());
        a.reset();
        assert!(!a.is_terminal());
        assert_eq!(a.session(), &GenerationSession::default());
        a.apply(chunk(ENGLISH, "y"));
        assert_eq!(a.into_session().text(ENGLISH), Some("y"));
    }

    #[test]
    fn subscribers_see_each_change() {
        let mut a = SummaryAssembler::<u32>::new();
        a.apply(chunk(ENGLISH, "a"));
        let mut rx = a.subscribe();
        assert_eq!(rx.borrow_and_update().text(ENGLISH), Some("a"));

        a.apply(chunk(ENGLISH, "b"));
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().text(ENGLISH), Some("ab"));

        a.complete(1);
        assert!(rx.borrow_and_update().is_terminal());
    }

    #[test]
    fn published_copy_matches_session_while_streaming() {
        let mut a = SummaryAssembler::<u32>::new();
        let rx = a.subscribe();
        a.apply(Envelope::ContentStart {
            language: CHINESE.into(),
            message: None,
        });
        for piece in ["本", "周", "发", "布"] {
            a.apply(chunk(CHINESE, piece));
            assert_eq!(*rx.borrow(), *a.session());
        }
        a.apply(Envelope::ContentEnd {
            language: CHINESE.into(),
            message: None,
            progress: Some(50),
        });
        assert_eq!(*rx.borrow(), *a.session());
        assert_eq!(rx.borrow().text(CHINESE), Some("本周发布"));

        // Changes made with nobody watching are picked up on the next subscribe.
        drop(rx);
        a.apply(chunk(ENGLISH, "This week"));
        let rx = a.subscribe();
        assert_eq!(rx.borrow().text(ENGLISH), Some("This week"));

        a.apply(chunk(ENGLISH, ": releases"));
        a.fail("stream ended".into());
        assert_eq!(*rx.borrow(), *a.session());
        assert_eq!(rx.borrow().text(ENGLISH), Some("This week: releases"));

        a.reset();
        assert_eq!(*rx.borrow(), GenerationSession::default());
    }
}
