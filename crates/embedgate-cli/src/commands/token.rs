//! Token management commands.
//!
//! `embedgate token mint` - Mint a token for an (embed, origin) pair.
//! `embedgate token verify` - Verify a token and print its claims.

use anyhow::Context;
use clap::Subcommand;
use embedgate_token::TokenSigner;

#[derive(Subcommand, Debug)]
pub enum TokenCommand {
    /// Mint a token bound to an embed id and origin.
    Mint {
        /// Signing secret (defaults to EMBEDGATE_SECRET).
        #[arg(long)]
        secret: Option<String>,

        /// Embed identifier.
        #[arg(long = "embed-id")]
        embed_id: String,

        /// Origin the token is bound to, e.g. https://a.example.
        #[arg(long)]
        origin: String,

        /// Lifetime in seconds.
        #[arg(long, default_value_t = 90)]
        ttl: u64,
    },

    /// Verify a token and print its claims.
    Verify {
        /// Signing secret (defaults to EMBEDGATE_SECRET).
        #[arg(long)]
        secret: Option<String>,

        /// The token string.
        token: String,
    },
}

pub fn run(cmd: TokenCommand) -> anyhow::Result<()> {
    match cmd {
        TokenCommand::Mint {
            secret,
            embed_id,
            origin,
            ttl,
        } => mint(secret, &embed_id, &origin, ttl),
        TokenCommand::Verify { secret, token } => verify(secret, &token),
    }
}

/// Resolve the signing secret from the flag or the environment.
fn resolve_secret(secret: Option<String>) -> anyhow::Result<String> {
    secret
        .or_else(|| std::env::var("EMBEDGATE_SECRET").ok())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .context("Signing secret not provided. Pass --secret <value> or set EMBEDGATE_SECRET")
}

fn mint(secret: Option<String>, embed_id: &str, origin: &str, ttl: u64) -> anyhow::Result<()> {
    let secret = resolve_secret(secret)?;
    let signer = TokenSigner::new(&secret).context("Failed to create signer")?;

    let minted = signer.mint(embed_id, origin, ttl);
    let expires = chrono::DateTime::from_timestamp(minted.claims.exp, 0)
        .map(|t| t.to_rfc3339())
        .unwrap_or_else(|| minted.claims.exp.to_string());

    println!("{}", minted.token);
    eprintln!("expires at {expires} (exp={})", minted.claims.exp);
    Ok(())
}

fn verify(secret: Option<String>, token: &str) -> anyhow::Result<()> {
    let secret = resolve_secret(secret)?;
    let signer = TokenSigner::new(&secret).context("Failed to create signer")?;

    let claims = signer
        .verify(token)
        .map_err(|err| anyhow::anyhow!("token rejected: {err} ({})", err.reason_code()))?;

    println!("{}", serde_json::to_string_pretty(&claims)?);
    Ok(())
}
