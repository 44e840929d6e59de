//! Scripted farmer assistant.
//!
//! Replies come from a fixed phrase table. Input is lowercased and trimmed,
//! then checked for each phrase by substring containment; the first phrase in
//! table order wins. This sits outside the decision engine: it only reads text
//! and may hand back a pump command for the caller to apply.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PumpCommand {
    On,
    Off,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reply {
    pub text: String,
    pub pump_command: Option<PumpCommand>,
}

struct Phrase {
    pattern: &'static str,
    response: &'static str,
    pump: Option<PumpCommand>,
}

const PHRASES: [Phrase; 7] = [
    Phrase {
        pattern: "turn on pump",
        response: "User Pump Command: TURN ON - Activating irrigation pump now.",
        pump: Some(PumpCommand::On),
    },
    Phrase {
        pattern: "turn off pump",
        response: "User Pump Command: TURN OFF - Deactivating irrigation pump.",
        pump: Some(PumpCommand::Off),
    },
    Phrase {
        pattern: "pump on",
        response: "User Pump Command: TURN ON - Starting irrigation.",
        pump: Some(PumpCommand::On),
    },
    Phrase {
        pattern: "pump off",
        response: "User Pump Command: TURN OFF - Stopping irrigation.",
        pump: Some(PumpCommand::Off),
    },
    Phrase {
        pattern: "when to water",
        response: "Based on current soil moisture levels and crop type, I recommend watering \
                   in the early morning (6-8 AM) or late evening (6-8 PM) to minimize \
                   evaporation. Check the moisture sensor readings - if below the threshold, \
                   irrigate immediately.",
        pump: None,
    },
    Phrase {
        pattern: "help",
        response: "I can help you with:\n\
                   • Pump control (\"turn on pump\", \"turn off pump\")\n\
                   • Watering advice (\"when to water\")\n\
                   • Crop care tips\n\
                   • Understanding sensor readings\n\
                   • Pest and disease identification\n\
                   \n\
                   Just type your question!",
        pump: None,
    },
    Phrase {
        pattern: "crop tips",
        response: "Here are some general tips:\n\
                   1. Monitor soil moisture daily\n\
                   2. Water during cooler parts of the day\n\
                   3. Check for pests weekly\n\
                   4. Rotate crops seasonally\n\
                   5. Use mulching to retain moisture\n\
                   6. Adjust irrigation based on weather forecasts",
        pump: None,
    },
];

pub const GREETING: &str = "Hello! I'm your Smart Agriculture Assistant. Ask me about \
                            irrigation, crop care, or say \"turn on pump\" to control the \
                            system. Type \"help\" to see what I can do!";

/// Reply to a single message. Blank input gets no reply.
pub fn respond(input: &str) -> Option<Reply> {
    let normalized = input.trim().to_lowercase();
    if normalized.is_empty() {
        return None;
    }

    let reply = match PHRASES.iter().find(|p| normalized.contains(p.pattern)) {
        Some(phrase) => Reply {
            text: phrase.response.to_string(),
            pump_command: phrase.pump,
        },
        None => Reply {
            text: format!(
                "I understand you're asking about \"{}\". Based on your current sensor data \
                 and crop conditions, I recommend monitoring the situation closely. For \
                 specific guidance, try asking about:\n\
                 • Watering schedules\n\
                 • Crop health tips\n\
                 • Pest management\n\
                 • Weather preparation",
                input
            ),
            pump_command: None,
        },
    };

    Some(reply)
}

/// Conversation transcript, opened with a greeting.
pub struct Assistant {
    transcript: Vec<Message>,
}

impl Assistant {
    pub fn new() -> Self {
        Self {
            transcript: vec![Message {
                role: Role::Assistant,
                content: GREETING.to_string(),
            }],
        }
    }

    pub fn send(&mut self, input: &str) -> Option<Reply> {
        let reply = respond(input)?;

        self.transcript.push(Message {
            role: Role::User,
            content: input.to_string(),
        });
        self.transcript.push(Message {
            role: Role::Assistant,
            content: reply.text.clone(),
        });

        Some(reply)
    }

    pub fn transcript(&self) -> &[Message] {
        &self.transcript
    }
}

impl Default for Assistant {
    fn default() -> Self {
        Self::new()
    }
}
