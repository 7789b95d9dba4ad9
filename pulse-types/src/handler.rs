//! The callback interface a streamed generation reports to.

use crate::envelope::StreamEnvelope;
use crate::records::Summary;

/// Receives the ordered outcome of one streamed summary generation.
///
/// For every recognised envelope, `on_progress` is called first, followed by
/// the type-specific method when there is one (`content_chunk`, `complete`,
/// `error`). Exactly one of [`on_complete`](Self::on_complete) or
/// [`on_error`](Self::on_error) is called per generation, and nothing is
/// called after it. A cancelled generation calls neither.
///
/// Calls are made synchronously from the task reading the stream; a slow
/// handler delays the next read.
pub trait StreamHandler<S = Summary> {
    /// Called for each recognised envelope, in arrival order.
    fn on_progress(&mut self, envelope: &StreamEnvelope<S>);

    /// Called for each `content_chunk` envelope after `on_progress`.
    fn on_content_chunk(&mut self, language: &str, content: &str) {
        let _ = (language, content);
    }

    /// The generation completed with `summary`.
    fn on_complete(&mut self, summary: S);

    /// The generation failed. Covers transport failures, a non-success HTTP
    /// status, producer-reported errors and a stream that ended without a
    /// terminal envelope.
    fn on_error(&mut self, message: String);
}

impl<S, H: StreamHandler<S> + ?Sized> StreamHandler<S> for &mut H {
    fn on_progress(&mut self, envelope: &StreamEnvelope<S>) {
        (**self).on_progress(envelope);
    }

    fn on_content_chunk(&mut self, language: &str, content: &str) {
        (**self).on_content_chunk(language, content);
    }

    fn on_complete(&mut self, summary: S) {
        (**self).on_complete(summary);
    }

    fn on_error(&mut self, message: String) {
        (**self).on_error(message);
    }
}

impl<S, H: StreamHandler<S> + ?Sized> StreamHandler<S> for Box<H> {
    fn on_progress(&mut self, envelope: &StreamEnvelope<S>) {
        (**self).on_progress(envelope);
    }

    fn on_content_chunk(&mut self, language: &str, content: &str) {
        (**self).on_content_chunk(language, content);
    }

    fn on_complete(&mut self, summary: S) {
        (**self).on_complete(summary);
    }

    fn on_error(&mut self, message: String) {
        (**self).on_error(message);
    }
}

type ProgressFn<S> = Box<dyn FnMut(&StreamEnvelope<S>) + Send>;
type ChunkFn = Box<dyn FnMut(&str, &str) + Send>;
type CompleteFn<S> = Box<dyn FnMut(S) + Send>;
type ErrorFn = Box<dyn FnMut(String) + Send>;

/// A [`StreamHandler`] assembled from closures. Unset callbacks are no-ops.
///
/// ```
/// use pulse_types::{CallbackHandler, Summary};
///
/// let handler = CallbackHandler::<Summary>::new()
///     .content_chunk(|language, text| print!("[{language}] {text}"))
///     .complete(|summary| println!("\nstored summary #{}", summary.id))
///     .error(|message| eprintln!("generation failed: {message}"));
/// # let _ = handler;
/// ```
pub struct CallbackHandler<S = Summary> {
    progress: Option<ProgressFn<S>>,
    content_chunk: Option<ChunkFn>,
    complete: Option<CompleteFn<S>>,
    error: Option<ErrorFn>,
}

impl<S> CallbackHandler<S> {
    /// A handler that ignores everything.
    #[must_use]
    pub fn new() -> Self {
        Self {
            progress: None,
            content_chunk: None,
            complete: None,
            error: None,
        }
    }

    /// Set the progress callback.
    #[must_use]
    pub fn progress(mut self, f: impl FnMut(&StreamEnvelope<S>) + Send + 'static) -> Self {
        self.progress = Some(Box::new(f));
        self
    }

    /// Set the content-chunk callback.
    #[must_use]
    pub fn content_chunk(mut self, f: impl FnMut(&str, &str) + Send + 'static) -> Self {
        self.content_chunk = Some(Box::new(f));
        self
    }

    /// Set the completion callback.
    #[must_use]
    pub fn complete(mut self, f: impl FnMut(S) + Send + 'static) -> Self {
        self.complete = Some(Box::new(f));
        self
    }

    /// Set the error callback.
    #[must_use]
    pub fn error(mut self, f: impl FnMut(String) + Send + 'static) -> Self {
        self.error = Some(Box::new(f));
        self
    }
}

impl<S> Default for CallbackHandler<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> StreamHandler<S> for CallbackHandler<S> {
    fn on_progress(&mut self, envelope: &StreamEnvelope<S>) {
        if let Some(f) = self.progress.as_mut() {
            f(envelope);
        }
    }

    fn on_content_chunk(&mut self, language: &str, content: &str) {
        if let Some(f) = self.content_chunk.as_mut() {
            f(language, content);
        }
    }

    fn on_complete(&mut self, summary: S) {
        if let Some(f) = self.complete.as_mut() {
            f(summary);
        }
    }

    fn on_error(&mut self, message: String) {
        if let Some(f) = self.error.as_mut() {
            f(message);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn callback_handler_forwards_to_closures() {
        let seen = Arc::new(Mutex::new(Vec::new()));

        let progress = Arc::clone(&seen);
        let chunks = Arc::clone(&seen);
        let done = Arc::clone(&seen);
        let mut handler = CallbackHandler::<u32>::new()
            .progress(move |env| progress.lock().unwrap().push(env.kind().to_string()))
            .content_chunk(move |lang, text| chunks.lock().unwrap().push(format!("{lang}:{text}")))
            .complete(move |id| done.lock().unwrap().push(format!("done:{id}")));

        handler.on_progress(&StreamEnvelope::Start {
            message: "go".into(),
        });
        handler.on_content_chunk("english", "hi");
        handler.on_complete(5);
        handler.on_error("ignored".into());

        assert_eq!(
            *seen.lock().unwrap(),
            vec!["start".to_string(), "english:hi".into(), "done:5".into()]
        );
    }

    #[test]
    fn mut_ref_and_box_delegate() {
        struct Count(usize);
        impl StreamHandler<()> for Count {
            fn on_progress(&mut self, _: &StreamEnvelope<()>) {
                self.0 += 1;
            }
            fn on_complete(&mut self, _: ()) {
                self.0 += 10;
            }
            fn on_error(&mut self, _: String) {
                self.0 += 100;
            }
        }

        fn drive<H: StreamHandler<()>>(mut handler: H) {
            handler.on_progress(&StreamEnvelope::Unknown);
            handler.on_complete(());
        }

        let mut inner = Count(0);
        drive(&mut inner);
        assert_eq!(inner.0, 11);

        let mut boxed: Box<dyn StreamHandler<()>> = Box::new(Count(0));
        boxed.on_error("x".into());
        boxed.on_content_chunk("english", "default no-op");
    }
}
