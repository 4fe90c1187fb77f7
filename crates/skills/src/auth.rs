//! Auth skill — login, signup, password reset, and OTP guidance.
//!
//! All behavior lives in the data tables below; the control flow is the
//! shared [`crate::SkillPipeline`].

use crate::pipeline::{IntentRule, SkillProfile};
use inboxpilot_core::{AgentContext, SuggestedAction};

/// Auth skill profile. Rule order is the classification priority.
pub static AUTH: SkillProfile = SkillProfile {
    name: "auth",
    rules: &[
        IntentRule {
            triggers: &["forgot", "reset", "recover"],
            intent: "forgot_password",
            confidence: 0.92,
        },
        IntentRule {
            triggers: &["signup", "sign up", "register"],
            intent: "signup_help",
            confidence: 0.90,
        },
        IntentRule {
            triggers: &["otp", "verification code", "code not"],
            intent: "otp_help",
            confidence: 0.86,
        },
        IntentRule {
            triggers: &["can't login", "cannot login", "invalid password", "locked"],
            intent: "login_troubleshoot",
            confidence: 0.88,
        },
    ],
    default_intent: "general_auth_help",
    default_confidence: 0.75,
    template,
    action_candidate,
    secret_triggers: &["password is", "token"],
    secret_warning: "Avoid sharing passwords or token values in chat.",
};

fn template(intent: &str, _context: &AgentContext) -> String {
    match intent {
        "forgot_password" => {
            "I can help you reset your password. \
             Use the forgot-password flow and I can prefill your email."
        }
        "signup_help" => {
            "I can guide you through creating an account. \
             You can start signup and I will walk each step."
        }
        "otp_help" => {
            "I can help with OTP issues. \
             Please confirm your phone format and request a new code."
        }
        "login_troubleshoot" => {
            "I can help troubleshoot sign-in issues. \
             Let's verify email, password reset option, and lockout status."
        }
        _ => "I can help with login, registration, password reset, and OTP support.",
    }
    .to_string()
}

fn action_candidate(intent: &str, context: &AgentContext) -> Option<SuggestedAction> {
    match intent {
        "forgot_password" => Some(
            SuggestedAction::new("auth.forgot_password", "Send password reset link")
                .with_payload("email", context.email.clone().unwrap_or_default()),
        ),
        "signup_help" => Some(SuggestedAction::new(
            "auth.open_register",
            "Open registration flow",
        )),
        "otp_help" => Some(SuggestedAction::new("auth.send_signup_otp", "Request new OTP")),
        "login_troubleshoot" | "general_auth_help" => Some(SuggestedAction::new(
            "auth.open_login",
            "Return to login form",
        )),
        _ => None,
    }
}
