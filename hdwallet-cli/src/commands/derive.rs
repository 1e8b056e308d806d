//! Address derivation command.

use clap::Args;
use colored::Colorize;
use hdwallet_btc::{AddressFormat, DerivedAddress, Deriver};

use super::{CliAddressFormat, KeySource, index_parser};

/// Derive addresses and private keys from a mnemonic.
#[derive(Args)]
pub struct DeriveCommand {
    #[command(flatten)]
    source: KeySource,

    /// Address format to generate.
    #[arg(short, long, value_enum, default_value = "native-segwit")]
    format: CliAddressFormat,

    /// Account index.
    #[arg(short, long, default_value = "0", value_parser = index_parser())]
    account: u32,

    /// Derive change (internal) addresses.
    #[arg(long)]
    change: bool,

    /// First address index.
    #[arg(short, long, default_value = "0", value_parser = index_parser())]
    start: u32,

    /// Number of addresses to derive.
    #[arg(short, long, default_value = "1")]
    count: u32,
}

impl DeriveCommand {
    /// Execute the derive command.
    pub fn execute(self) -> Result<(), Box<dyn std::error::Error>> {
        let format = AddressFormat::from(self.format);
        tracing::debug!(
            %format,
            account = self.account,
            change = self.change,
            start = self.start,
            count = self.count,
            "deriving addresses"
        );
        let deriver = Deriver::from_options(&self.source.options())?;
        let addresses =
            deriver.derive_many(format, self.account, self.change, self.start, self.count)?;

        print_addresses(&deriver, format, self.source.has_passphrase(), &addresses);
        Ok(())
    }

    #[cfg(test)]
    pub(super) const fn source(&self) -> &KeySource {
        &self.source
    }
}

#[rustfmt::skip]
fn print_addresses(
    deriver: &Deriver,
    format: AddressFormat,
    has_passphrase: bool,
    addresses: &[DerivedAddress],
) {
    println!();
    println!("      {}      {}", "Network".cyan().bold(), deriver.network());
    println!("      {}       {}", "Format".cyan().bold(), format.name());
    if has_passphrase {
        println!("      {}   {}", "Passphrase".cyan().bold(), "(set)".dimmed());
    }
    println!();

    for (i, addr) in addresses.iter().enumerate() {
        if addresses.len() > 1 {
            println!("      {}        {}", "Index".cyan().bold(), format!("[{i}]").dimmed());
        }
        println!("      {}         {}", "Path".cyan().bold(), addr.path);
        println!("      {}      {}", "Address".cyan().bold(), addr.address.green());
        println!("      {}   {}", "Public Key".cyan().bold(), addr.public_key_hex.dimmed());
        println!("      {}  {}", "Private Key".cyan().bold(), addr.private_key_wif.as_str());
        if i + 1 < addresses.len() {
            println!();
        }
    }
    println!();
}
