//! `inboxpilot skills` — List registered skill names.

use inboxpilot_runtime::AgentRuntime;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let runtime = AgentRuntime::default();

    println!("Registered skills:");
    for name in runtime.registered_skills() {
        println!("  {name}");
    }

    Ok(())
}
