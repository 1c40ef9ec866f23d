//! Mock Speech Service for testing.
//!
//! Scripted transcripts and audio payloads, consumed in order, with call
//! recording so tests can assert what was transcribed or spoken.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::ports::{SpeechError, SpeechService, SynthesizeRequest, TranscribeRequest};

/// Mock speech service.
///
/// Clones share the same queues and call history.
#[derive(Debug, Clone, Default)]
pub struct MockSpeechService {
    /// Scripted transcription outcomes (Err holds an unavailable-message).
    transcripts: Arc<Mutex<VecDeque<Result<String, String>>>>,
    /// Scripted synthesis outcomes.
    audio: Arc<Mutex<VecDeque<Result<Vec<u8>, String>>>>,
    /// Recorded transcription calls.
    transcribe_calls: Arc<Mutex<Vec<TranscribeRequest>>>,
    /// Recorded synthesis calls.
    synthesize_calls: Arc<Mutex<Vec<SynthesizeRequest>>>,
}

impl MockSpeechService {
    /// Creates a new mock with empty queues.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a transcription result.
    pub fn with_transcript(self, transcript: impl Into<String>) -> Self {
        self.transcripts
            .lock()
            .unwrap()
            .push_back(Ok(transcript.into()));
        self
    }

    /// Queues a transcription failure.
    pub fn with_transcribe_error(self, message: impl Into<String>) -> Self {
        self.transcripts
            .lock()
            .unwrap()
            .push_back(Err(message.into()));
        self
    }

    /// Queues a synthesis result.
    pub fn with_audio(self, audio: Vec<u8>) -> Self {
        self.audio.lock().unwrap().push_back(Ok(audio));
        self
    }

    /// Queues a synthesis failure.
    pub fn with_synthesize_error(self, message: impl Into<String>) -> Self {
        self.audio.lock().unwrap().push_back(Err(message.into()));
        self
    }

    /// Returns the number of transcription calls.
    pub fn transcribe_call_count(&self) -> usize {
        self.transcribe_calls.lock().unwrap().len()
    }

    /// Returns the number of synthesis calls.
    pub fn synthesize_call_count(&self) -> usize {
        self.synthesize_calls.lock().unwrap().len()
    }

    /// Returns the texts synthesis was asked to speak, in order.
    pub fn synthesized_texts(&self) -> Vec<String> {
        self.synthesize_calls
            .lock()
            .unwrap()
            .iter()
            .map(|call| call.text.clone())
            .collect()
    }
}

#[async_trait]
impl SpeechService for MockSpeechService {
    async fn transcribe(&self, request: TranscribeRequest) -> Result<String, SpeechError> {
        self.transcribe_calls.lock().unwrap().push(request);

        match self.transcripts.lock().unwrap().pop_front() {
            Some(Ok(transcript)) => Ok(transcript),
            Some(Err(message)) => Err(SpeechError::unavailable(message)),
            None => Ok("Mock transcript".to_string()),
        }
    }

    async fn synthesize(&self, request: SynthesizeRequest) -> Result<Vec<u8>, SpeechError> {
        self.synthesize_calls.lock().unwrap().push(request);

        match self.audio.lock().unwrap().pop_front() {
            Some(Ok(audio)) => Ok(audio),
            Some(Err(message)) => Err(SpeechError::unavailable(message)),
            None => Ok(b"mock-audio".to_vec()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn returns_scripted_transcripts_in_order() {
        let service = MockSpeechService::new()
            .with_transcript("first")
            .with_transcript("");

        let r1 = service.transcribe(TranscribeRequest::new(vec![1])).await.unwrap();
        let r2 = service.transcribe(TranscribeRequest::new(vec![2])).await.unwrap();
        let r3 = service.transcribe(TranscribeRequest::new(vec![3])).await.unwrap();

        assert_eq!(r1, "first");
        assert_eq!(r2, "");
        assert_eq!(r3, "Mock transcript");
        assert_eq!(service.transcribe_call_count(), 3);
    }

    #[tokio::test]
    async fn injects_transcription_errors() {
        let service = MockSpeechService::new().with_transcribe_error("stt down");

        let err = service
            .transcribe(TranscribeRequest::new(vec![]))
            .await
            .unwrap_err();
        assert!(matches!(err, SpeechError::Unavailable { .. }));
    }

    #[tokio::test]
    async fn records_synthesized_texts() {
        let service = MockSpeechService::new().with_audio(b"abc".to_vec());

        let audio = service
            .synthesize(SynthesizeRequest::new("Hello delegates"))
            .await
            .unwrap();

        assert_eq!(audio, b"abc");
        assert_eq!(service.synthesized_texts(), ["Hello delegates".to_string()]);
    }
}
