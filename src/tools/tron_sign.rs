//! Command-line driver: generate key pairs, sign message digests, verify
//! signatures against addresses.

use anyhow::anyhow;
use clap::{Parser, Subcommand};
use tron_secp::{secp, sha256, EncodeHex};

#[derive(Parser)]
#[command(about = "secp256k1 recoverable signatures and Tron addresses")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate a key pair and print its mainnet address.
    Keygen,
    /// Sign the SHA-256 digest of a message with a hex private key.
    Sign {
        message: String,
        private_key: String,
    },
    /// Verify a signature over a message against a claimed address.
    Verify {
        message: String,
        signature: String,
        address: String,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Keygen => {
            let pair = secp::generate_key_pair()?;
            println!("Private key: {}", pair.private_key);
            println!("Public key:  {}", pair.public_key);
            println!("Address:     {}", pair.address);
        }
        Command::Sign {
            message,
            private_key,
        } => {
            let digest = sha256(message.as_bytes()).hex();
            log::info!("digest: {digest}");
            let signature = secp::sign(&digest, &private_key)
                .map_err(|e| anyhow!("signing failed: {e}"))?;
            println!("{signature}");
        }
        Command::Verify {
            message,
            signature,
            address,
        } => {
            let digest = sha256(message.as_bytes()).hex();
            let valid = secp::verify(&digest, &signature, &address);
            println!("{valid}");
            if !valid {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
