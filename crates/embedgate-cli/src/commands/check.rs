//! Configuration check command.
//!
//! `embedgate check` - Load the environment configuration and report what
//! was found. Loading never fails; this surfaces what the server would
//! actually run with.

use embedgate_core::GateConfig;

pub fn run() -> anyhow::Result<()> {
    let config = GateConfig::from_env();

    println!("listen address: {}", config.server.bind_addr());
    println!(
        "signing secret: {}",
        if config.secret.is_some() {
            "present"
        } else {
            "MISSING (token endpoints will refuse requests)"
        }
    );
    println!("token ttl:      {}s", config.token_ttl_secs);
    println!("embeds:         {}", config.embeds.len());

    let mut ids: Vec<_> = config.embeds.keys().collect();
    ids.sort();
    for id in ids {
        let origins = &config.embeds[id];
        if origins.is_empty() {
            println!("  {id}: no origins (treated as unregistered)");
        } else {
            println!("  {id}: {}", origins.join(", "));
        }
    }

    Ok(())
}
