//! Derivation path inspection command.

use clap::Args;
use colored::Colorize;
use hdwallet::{DerivationPath, PATH_LEVELS};

const LEVEL_NAMES: [&str; PATH_LEVELS] = ["Purpose", "Coin Type", "Account", "Change", "Index"];

/// Parse and normalize a five-level derivation path.
#[derive(Args)]
pub struct PathCommand {
    /// Path such as m/84'/0'/0'/0/0.
    path: String,

    /// Fall back to m/44'/0'/0'/0/0 on a wrong level count and read
    /// malformed levels as 0 instead of failing.
    #[arg(long)]
    lenient: bool,
}

impl PathCommand {
    /// Execute the path command.
    pub fn execute(self) -> Result<(), Box<dyn std::error::Error>> {
        let path = self.resolve()?;
        print_path(&path);
        Ok(())
    }

    fn resolve(&self) -> Result<DerivationPath, hdwallet::Error> {
        tracing::debug!(path = %self.path, lenient = self.lenient, "resolving path");
        if self.lenient {
            Ok(DerivationPath::parse_lenient(&self.path, DerivationPath::default()))
        } else {
            DerivationPath::parse(&self.path)
        }
    }
}

#[rustfmt::skip]
fn print_path(path: &DerivationPath) {
    println!();
    println!("      {}         {}", "Path".cyan().bold(), path.to_string().green());
    println!();
    for (name, index) in LEVEL_NAMES.iter().zip(path.child_indices()) {
        println!(
            "      {:<12} {:<12} {}",
            name.cyan().bold(),
            index.to_string(),
            format!("{:#010x}", index.to_u32()).dimmed()
        );
    }
    println!();
}
