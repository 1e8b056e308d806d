//! Cross-checks against the `bitcoin` crate.

use std::str::FromStr;

use bitcoin::bip32::{DerivationPath as BtcPath, Xpriv, Xpub};
use bitcoin::key::CompressedPublicKey;
use bitcoin::secp256k1::Secp256k1;

use hdwallet::{DerivationPath, Seed, Wordlist, seed_from_mnemonic};
use hdwallet_btc::{AddressFormat, AddressSpec, Deriver, ExtendedKey, Network, Wallet};

const TEST_MNEMONIC: &str = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

fn seeds() -> Vec<Seed> {
    vec![
        Seed::from_bytes(&hex_literal::hex!("000102030405060708090a0b0c0d0e0f")),
        Seed::from_bytes(&hex_literal::hex!(
            "fffcf9f6f3f0edeae7e4e1dedbd8d5d2cfccc9c6c3c0bdbab7b4b1aeaba8a5a29f9c999693908d8a8784817e7b7875726f6c696663605d5a5754514e4b484542"
        )),
        seed_from_mnemonic(TEST_MNEMONIC, "", Wordlist::English).unwrap(),
        seed_from_mnemonic(TEST_MNEMONIC, "TREZOR", Wordlist::English).unwrap(),
    ]
}

fn paths() -> Vec<DerivationPath> {
    vec![
        DerivationPath::default(),
        DerivationPath::bip44(49, 0, 0, 0, 3),
        DerivationPath::bip44(84, 0, 1, 1, 20),
        DerivationPath::bip44(86, 1, 0, 0, 0x7FFF_FFFF),
    ]
}

const fn btc_network(network: Network) -> bitcoin::Network {
    match network {
        Network::Mainnet => bitcoin::Network::Bitcoin,
        Network::Testnet => bitcoin::Network::Testnet,
        Network::Regtest => bitcoin::Network::Regtest,
    }
}

fn oracle_key(seed: &Seed, path: &DerivationPath, network: Network) -> Xpriv {
    let secp = Secp256k1::new();
    let master = Xpriv::new_master(btc_network(network), seed.as_bytes()).unwrap();
    let path = BtcPath::from_str(&path.to_string()).unwrap();
    master.derive_priv(&secp, &path).unwrap()
}

fn oracle_address(key: &Xpriv, format: AddressFormat, network: Network) -> String {
    let secp = Secp256k1::new();
    let network = btc_network(network);
    let public = CompressedPublicKey::from_private_key(&secp, &key.to_priv()).unwrap();

    match format {
        AddressFormat::Legacy => {
            bitcoin::Address::p2pkh(bitcoin::PublicKey::from(public), network).to_string()
        }
        AddressFormat::NestedSegwit => bitcoin::Address::p2shwpkh(&public, network).to_string(),
        AddressFormat::NativeSegwit => bitcoin::Address::p2wpkh(&public, network).to_string(),
        AddressFormat::Taproot => {
            let (internal, _) = public.0.x_only_public_key();
            bitcoin::Address::p2tr(&secp, internal, None, network).to_string()
        }
    }
}

#[test]
fn test_extended_keys_match_oracle() {
    let secp = Secp256k1::new();
    for network in [Network::Mainnet, Network::Testnet] {
        for seed in seeds() {
            for path in paths() {
                let ours = ExtendedKey::master(seed.as_bytes(), network)
                    .and_then(|m| m.derive_path(path))
                    .unwrap();
                let theirs = oracle_key(&seed, &path, network);

                assert_eq!(ours.to_string(), theirs.to_string(), "{path}");
                assert_eq!(
                    ours.neuter().to_string(),
                    Xpub::from_priv(&secp, &theirs).to_string(),
                    "{path}"
                );
            }
        }
    }
}

#[test]
fn test_addresses_match_oracle() {
    for network in [Network::Mainnet, Network::Testnet, Network::Regtest] {
        for seed in seeds() {
            let master = ExtendedKey::master(seed.as_bytes(), network).unwrap();
            for path in paths() {
                let key = master.derive_path(path).unwrap();
                let theirs = oracle_key(&seed, &path, network);
                for format in AddressFormat::ALL {
                    assert_eq!(
                        key.address_with_format(format).unwrap(),
                        oracle_address(&theirs, format, network),
                        "{network} {path} {format}"
                    );
                }
            }
        }
    }
}

#[test]
fn test_wallet_first_addresses_match_oracle() {
    let seed = seed_from_mnemonic(TEST_MNEMONIC, "", Wordlist::English).unwrap();
    let master = ExtendedKey::master(seed.as_bytes(), Network::Mainnet).unwrap();

    for format in AddressFormat::ALL {
        let spec = AddressSpec::bitcoin(format);
        let wallet = Wallet::from_master_key(&master, spec).unwrap();
        let theirs = oracle_key(&seed, &spec.default_path(), Network::Mainnet);
        assert_eq!(
            wallet.try_address().unwrap(),
            oracle_address(&theirs, format, Network::Mainnet)
        );
    }
}

#[test]
fn test_deriver_wif_matches_oracle() {
    let seed = seed_from_mnemonic(TEST_MNEMONIC, "", Wordlist::English).unwrap();
    for network in [Network::Mainnet, Network::Testnet] {
        let deriver = Deriver::new(&seed, network).unwrap();
        for derived in deriver
            .derive_many(AddressFormat::NativeSegwit, 0, false, 0, 3)
            .unwrap()
        {
            let theirs = oracle_key(&seed, &derived.path, network);
            assert_eq!(derived.private_key_wif.as_str(), theirs.to_priv().to_wif());
        }
    }
}

#[test]
fn test_parses_oracle_serialization() {
    let secp = Secp256k1::new();
    for seed in seeds() {
        let theirs = oracle_key(&seed, &DerivationPath::default(), Network::Mainnet);
        let ours: ExtendedKey = theirs.to_string().parse().unwrap();
        assert_eq!(ours.to_string(), theirs.to_string());

        let xpub = Xpub::from_priv(&secp, &theirs).to_string();
        let ours: ExtendedKey = xpub.parse().unwrap();
        assert!(!ours.is_private());
        assert_eq!(ours.to_string(), xpub);
    }
}
