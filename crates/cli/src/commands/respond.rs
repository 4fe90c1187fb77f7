//! `inboxpilot respond` — Run one request through the runtime in-process.
//!
//! Handy for poking at skill behavior without standing up the gateway.

use inboxpilot_core::{AgentContext, AgentMessage, AgentRequest};
use inboxpilot_runtime::AgentRuntime;
use std::collections::HashMap;

pub fn run(skill: &str, message: &str) -> Result<(), Box<dyn std::error::Error>> {
    let mut request = AgentRequest {
        version: "v1".into(),
        skill: skill.into(),
        request_id: uuid::Uuid::new_v4().to_string(),
        messages: vec![AgentMessage::user(message)],
        context: AgentContext::default(),
        allowed_actions: vec![],
        requested_action: None,
        requested_action_payload: HashMap::new(),
    };
    request.validate()?;

    let runtime = AgentRuntime::default();
    let response = runtime.respond(&request)?;

    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}
