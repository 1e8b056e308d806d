//! Account extended key command.

use clap::Args;
use colored::Colorize;
use hdwallet::ChildIndex;
use hdwallet_btc::{AddressFormat, ExtendedKey};

use super::{CliAddressFormat, KeySource, index_parser};

/// Show account-level extended keys (m/purpose'/coin_type'/account').
#[derive(Args)]
pub struct XpubCommand {
    #[command(flatten)]
    source: KeySource,

    /// Address format, which selects the BIP purpose.
    #[arg(short, long, value_enum, default_value = "native-segwit")]
    format: CliAddressFormat,

    /// Account index.
    #[arg(short, long, default_value = "0", value_parser = index_parser())]
    account: u32,

    /// Also print the extended private key.
    #[arg(long)]
    show_private: bool,
}

impl XpubCommand {
    /// Execute the xpub command.
    pub fn execute(self) -> Result<(), Box<dyn std::error::Error>> {
        let options = self.source.options();
        let master = ExtendedKey::from_options(&options)?;
        let path = account_path(
            AddressFormat::from(self.format),
            options.network.coin_type(),
            self.account,
        );
        let account = master.derive_path(path)?;
        tracing::debug!(depth = account.depth(), account = self.account, "derived account key");

        print_account(&master, &account, &path, self.show_private);
        Ok(())
    }

    #[cfg(test)]
    pub(super) const fn source(&self) -> &KeySource {
        &self.source
    }
}

fn account_path(format: AddressFormat, coin_type: u32, account: u32) -> [u32; 3] {
    [format.purpose(), coin_type, account].map(|index| ChildIndex::Hardened(index).to_u32())
}

#[rustfmt::skip]
fn print_account(master: &ExtendedKey, account: &ExtendedKey, path: &[u32], show_private: bool) {
    let path: String = path.iter().map(|&index| format!("/{}", ChildIndex::from(index))).collect();

    println!();
    println!("      {}      {}", "Network".cyan().bold(), account.network());
    println!("      {}  {}", "Fingerprint".cyan().bold(), hex::encode(master.fingerprint()));
    println!("      {}         m{}", "Path".cyan().bold(), path);
    println!("      {}         {}", "xpub".cyan().bold(), account.neuter().to_string().green());
    if show_private {
        println!("      {}         {}", "xprv".cyan().bold(), account);
    }
    println!();
}
