//! Skill registry — lazy construction and process-wide memoization.
//!
//! The name→constructor mapping is a closed enum dispatch table, so adding
//! a skill means adding a [`SkillKind`] variant and a match arm, not
//! open-ended registration. The instance cache lives for the process:
//! populated on first lookup, never evicted, never mutated after insertion
//! for a given key.

use inboxpilot_core::{Generator, RuleBasedGenerator, Skill, SkillError};
use inboxpilot_skills::SkillPipeline;
use inboxpilot_skills::{auth, inbox};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tracing::info;

/// Identifier for a concrete skill implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SkillKind {
    Auth,
    Inbox,
}

impl SkillKind {
    /// The fixed dispatch table. "auth-login" is a legacy alias that maps
    /// to the auth constructor.
    fn resolve(normalized: &str) -> Option<SkillKind> {
        match normalized {
            "auth" | "auth-login" => Some(SkillKind::Auth),
            "inbox" => Some(SkillKind::Inbox),
            _ => None,
        }
    }

    fn construct(self, generator: Arc<dyn Generator>) -> Arc<dyn Skill> {
        match self {
            SkillKind::Auth => Arc::new(SkillPipeline::new(&auth::AUTH, generator)),
            SkillKind::Inbox => Arc::new(SkillPipeline::new(&inbox::INBOX, generator)),
        }
    }
}

/// Dispatch-table keys, pre-sorted.
const REGISTERED_NAMES: &[&str] = &["auth", "auth-login", "inbox"];

/// In-memory skill registry with lazy skill creation.
///
/// The cache is keyed by the normalized (trimmed, lowercased) skill name.
/// Construction happens under the write lock, so concurrent first-time
/// lookups of the same key publish exactly one instance; every subsequent
/// caller observes that same instance.
pub struct SkillRegistry {
    generator: Arc<dyn Generator>,
    cache: RwLock<HashMap<String, Arc<dyn Skill>>>,
}

impl Default for SkillRegistry {
    fn default() -> Self {
        Self::new(Arc::new(RuleBasedGenerator))
    }
}

impl SkillRegistry {
    /// Create a registry whose skills use the given generation backend.
    pub fn new(generator: Arc<dyn Generator>) -> Self {
        Self {
            generator,
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Resolve a skill by name, constructing and caching it on first use.
    ///
    /// The name is trimmed and lowercased before lookup; the error for an
    /// unknown skill carries the name exactly as the caller supplied it.
    pub fn get(&self, name: &str) -> Result<Arc<dyn Skill>, SkillError> {
        let normalized = name.trim().to_lowercase();

        {
            let cache = self.cache.read().unwrap_or_else(|e| e.into_inner());
            if let Some(skill) = cache.get(&normalized) {
                return Ok(skill.clone());
            }
        }

        let kind = SkillKind::resolve(&normalized)
            .ok_or_else(|| SkillError::UnsupportedSkill(name.to_string()))?;

        let mut cache = self.cache.write().unwrap_or_else(|e| e.into_inner());
        // Another caller may have published while we waited for the lock;
        // entry() keeps whichever instance got there first.
        let skill = cache
            .entry(normalized)
            .or_insert_with(|| {
                info!(skill = name.trim(), "Constructed skill instance");
                kind.construct(self.generator.clone())
            })
            .clone();
        Ok(skill)
    }

    /// The sorted set of dispatch-table keys.
    pub fn registered_skills(&self) -> Vec<&'static str> {
        REGISTERED_NAMES.to_vec()
    }
}
