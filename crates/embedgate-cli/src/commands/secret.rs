//! Secret generation command.
//!
//! `embedgate secret` - Generate a random hex-encoded signing secret.

use rand::RngCore;

pub fn run(bytes: usize) -> anyhow::Result<()> {
    anyhow::ensure!(bytes >= 16, "refusing to generate a secret shorter than 16 bytes");

    let mut rng = rand::rng();
    let mut buf = vec![0u8; bytes];
    rng.fill_bytes(&mut buf);

    let hex: String = buf.iter().map(|b| format!("{b:02x}")).collect();
    println!("{hex}");
    eprintln!("export EMBEDGATE_SECRET={hex}");
    Ok(())
}
