//! AI assistant chat — thin wrapper over `POST /api/ai/chat`.
//!
//! The assistant is an external collaborator; nothing about the model
//! is decided here. This module owns the conversation transcript, the
//! request/response shapes, and the keyword-based canned reply table
//! used when the AI service is unreachable. The fallback is a pure
//! function of the question text.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::{ApiClient, ApiError};
use crate::models::{ChatMessage, ChatSender};

/// Body of `POST /api/ai/chat`.
#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    message: &'a str,
    session_id: &'a str,
    patient_id: Option<&'a str>,
    language: &'a str,
}

/// Response of `POST /api/ai/chat`.
#[derive(Debug, Deserialize)]
struct ChatResponse {
    response: String,
    #[serde(default)]
    ai_model_used: Option<String>,
}

/// One assistant answer, live or canned.
#[derive(Debug, Clone)]
pub struct AssistantReply {
    pub text: String,
    /// False when the text came from the offline fallback table.
    pub live: bool,
    pub model: Option<String>,
}

/// A single assistant conversation: transcript plus session id.
///
/// One in-flight question at a time, matching the send-button flow of
/// the chat view. The greeting opens every transcript.
pub struct Conversation {
    session_id: String,
    patient_id: Option<String>,
    language: String,
    messages: Vec<ChatMessage>,
}

/// Opening message shown before the user asks anything.
pub const GREETING: &str = "Hello! I'm MedikalBot, your AI assistant. I can help you with \
medical diagnoses, drug interactions, treatment recommendations, and more. What would you \
like to know?";

impl Conversation {
    /// Start a conversation in the given language (IETF code, e.g. "en").
    pub fn new(language: impl Into<String>) -> Self {
        Self {
            session_id: Uuid::new_v4().to_string(),
            patient_id: None,
            language: language.into(),
            messages: vec![ChatMessage::from_assistant(GREETING, false)],
        }
    }

    /// Attach a patient so answers carry their context.
    pub fn with_patient(mut self, patient_id: impl Into<String>) -> Self {
        self.patient_id = Some(patient_id.into());
        self
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Full transcript, greeting included.
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Ask the live AI service. The question and the answer are both
    /// appended to the transcript; on failure nothing is appended and
    /// the error propagates for the caller to decide.
    pub async fn ask(&mut self, api: &ApiClient, text: &str) -> Result<AssistantReply, ApiError> {
        let request = ChatRequest {
            message: text,
            session_id: &self.session_id,
            patient_id: self.patient_id.as_deref(),
            language: &self.language,
        };
        let response: ChatResponse = api.post_json("/api/ai/chat", &request).await?;

        self.messages.push(ChatMessage::from_user(text));
        self.messages
            .push(ChatMessage::from_assistant(&response.response, true));
        Ok(AssistantReply {
            text: response.response,
            live: true,
            model: response.ai_model_used,
        })
    }

    /// Ask the live service, degrading to the canned reply table when
    /// the call fails. Never errors; the reply says whether it is live.
    pub async fn ask_with_fallback(&mut self, api: &ApiClient, text: &str) -> AssistantReply {
        match self.ask(api, text).await {
            Ok(reply) => reply,
            Err(err) => {
                tracing::warn!(%err, "AI service unavailable, using offline fallback");
                let canned = canned_reply(text);
                self.messages.push(ChatMessage::from_user(text));
                self.messages.push(ChatMessage::from_assistant(canned, false));
                AssistantReply {
                    text: canned.to_string(),
                    live: false,
                    model: Some("offline_fallback".to_string()),
                }
            }
        }
    }

    /// Offline marker: true when any reply in the transcript was canned
    /// besides the greeting.
    pub fn degraded(&self) -> bool {
        self.messages
            .iter()
            .skip(1)
            .any(|m| m.sender == ChatSender::Assistant && !m.live)
    }
}

// ═══════════════════════════════════════════════════════════
// Offline fallback table
// ═══════════════════════════════════════════════════════════

const FALLBACK_SYMPTOMS: &str = "Based on the symptoms described, the primary consideration \
is an upper respiratory tract infection. Recommended: paracetamol 500mg every 6-8 hours for \
fever, plenty of fluids, and a review if fever above 38.5°C persists beyond 3 days or \
breathing difficulties develop. This is offline guidance — please consult a clinician.";

const FALLBACK_DIAGNOSIS: &str = "Differential considerations for these findings include \
viral bronchitis, bacterial pneumonia, and allergic rhinitis. Red flags to monitor: \
persistent high fever beyond 48 hours and shortness of breath. This is offline guidance — \
a clinical examination is needed for a diagnosis.";

const FALLBACK_INTERACTIONS: &str = "I can't check drug interactions while offline. Do not \
combine prescription medicines without advice; ask your pharmacist or doctor, especially \
for antibiotics, blood thinners, and diabetes medication.";

const FALLBACK_DOSAGE: &str = "Common adult dosing: Amoxicillin 500mg three times daily for \
7 days; Paracetamol 500mg every 6-8 hours, maximum 4g per day. Always follow the dose on \
your prescription — this offline note cannot account for your history.";

const FALLBACK_DEFAULT: &str = "I'm currently offline and can only give general guidance. \
Please try again shortly, or contact your clinic directly for urgent questions.";

/// Keyword-routed canned reply, used when the AI service is down.
pub fn canned_reply(input: &str) -> &'static str {
    let q = input.to_lowercase();
    if q.contains("symptom") || q.contains("fever") || q.contains("cough") {
        FALLBACK_SYMPTOMS
    } else if q.contains("diagnos") || q.contains("differential") {
        FALLBACK_DIAGNOSIS
    } else if q.contains("interaction") {
        FALLBACK_INTERACTIONS
    } else if q.contains("dosage") || q.contains("dose") {
        FALLBACK_DOSAGE
    } else {
        FALLBACK_DEFAULT
    }
}
