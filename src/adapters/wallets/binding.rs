//! Wallet Bindings - Per-wallet Call Descriptors
//!
//! Each supported wallet exposes the same three actions (connect, sign,
//! disconnect) under different method names, argument shapes and
//! response fields. A `WalletBinding` records those differences as data
//! so a single engine (`BoundWalletAdapter`) can drive every wallet.

use serde_json::{Map, Value};

use crate::domain::wallet::{SignOptions, WalletInfo};

/// Where a string lives in a wallet's response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseField {
  /// The response itself is the string.
  Bare,
  /// The string is a field of the response object.
  Field(&'static str),
}

impl ResponseField {
  /// Pull a non-empty string out of a response.
  pub fn extract(self, response: &Value) -> Option<String> {
    let value = match self {
      ResponseField::Bare => response,
      ResponseField::Field(name) => response.get(name)?,
    };
    value
      .as_str()
      .filter(|s| !s.is_empty())
      .map(str::to_string)
  }

  /// Shape a string the way the wallet would return it.
  pub fn wrap(self, value: impl Into<String>) -> Value {
    match self {
      ResponseField::Bare => Value::String(value.into()),
      ResponseField::Field(name) => {
        let mut object = Map::new();
        object.insert(name.to_string(), Value::String(value.into()));
        Value::Object(object)
      }
    }
  }

  /// Human-readable description for error messages.
  pub fn describe(self) -> String {
    match self {
      ResponseField::Bare => "a non-empty string".to_string(),
      ResponseField::Field(name) => format!("a non-empty string field \"{name}\""),
    }
  }
}

/// Argument shape of a wallet's native signing call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignArgs {
  /// `method(xdr, options)` with the options object forwarded as-is.
  EnvelopeAndOptions,
  /// `method(xdr, networkPassphrase)`.
  EnvelopeAndPassphrase,
  /// `method({ <envelope>: xdr, <network>: passphrase, <account>: address })`.
  ///
  /// The account is the override if given, else the session key.
  /// Absent values are left out of the object.
  Structured {
    envelope: &'static str,
    network: &'static str,
    account: &'static str,
  },
}

impl SignArgs {
  /// Build the positional argument list for a signing call.
  pub fn build(self, xdr: &str, options: Option<&SignOptions>, session: Option<&str>) -> Vec<Value> {
    let passphrase = options.and_then(|o| o.network_passphrase.as_deref());
    match self {
      SignArgs::EnvelopeAndOptions => {
        let opts = options
          .and_then(|o| serde_json::to_value(o).ok())
          .unwrap_or(Value::Null);
        vec![Value::from(xdr), opts]
      }
      SignArgs::EnvelopeAndPassphrase => {
        vec![Value::from(xdr), passphrase.map(Value::from).unwrap_or(Value::Null)]
      }
      SignArgs::Structured {
        envelope,
        network,
        account,
      } => {
        let mut params = Map::new();
        params.insert(envelope.to_string(), Value::from(xdr));
        if let Some(passphrase) = passphrase {
          params.insert(network.to_string(), Value::from(passphrase));
        }
        let signer = options
          .and_then(|o| o.account_to_sign.as_deref())
          .or(session);
        if let Some(signer) = signer {
          params.insert(account.to_string(), Value::from(signer));
        }
        vec![Value::Object(params)]
      }
    }
  }

  /// Recover the envelope from arguments built by [`SignArgs::build`].
  pub fn envelope<'a>(self, args: &'a [Value]) -> Option<&'a str> {
    let first = args.first()?;
    match self {
      SignArgs::EnvelopeAndOptions | SignArgs::EnvelopeAndPassphrase => first.as_str(),
      SignArgs::Structured { envelope, .. } => first.get(envelope)?.as_str(),
    }
  }

  /// Recover the network passphrase, if one was passed.
  pub fn passphrase<'a>(self, args: &'a [Value]) -> Option<&'a str> {
    match self {
      SignArgs::EnvelopeAndOptions => args.get(1)?.get("networkPassphrase")?.as_str(),
      SignArgs::EnvelopeAndPassphrase => args.get(1)?.as_str(),
      SignArgs::Structured { network, .. } => args.first()?.get(network)?.as_str(),
    }
  }
}

/// Native connect call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectBinding {
  pub method: &'static str,
  /// Where the public key is in the response.
  pub key: ResponseField,
}

/// Native signing call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignBinding {
  pub method: &'static str,
  pub args: SignArgs,
  /// Where the signed envelope is in the response.
  pub signed: ResponseField,
}

/// Everything needed to drive one wallet through the common contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WalletBinding {
  pub id: &'static str,
  pub name: &'static str,
  pub icon: &'static str,
  pub description: &'static str,
  pub website: &'static str,
  pub mobile: Option<bool>,
  /// Name of the injected global object.
  pub global: &'static str,
  pub connect: ConnectBinding,
  pub sign: SignBinding,
  /// Native disconnect method, if the wallet has one.
  pub disconnect: Option<&'static str>,
  /// Refuse to sign unless a session key is held.
  pub requires_session_for_signing: bool,
}

impl WalletBinding {
  /// Descriptor for this wallet with the given installation snapshot.
  pub fn wallet_info(&self, installed: bool) -> WalletInfo {
    WalletInfo {
      id: self.id.to_string(),
      name: self.name.to_string(),
      icon: self.icon.to_string(),
      description: self.description.to_string(),
      website: self.website.to_string(),
      installed,
      mobile: self.mobile,
    }
  }

  /// Built-in binding by wallet id.
  pub fn builtin(id: &str) -> Option<&'static WalletBinding> {
    BUILTIN_BINDINGS.iter().find(|b| b.id == id)
  }
}

/// Freighter: `requestAccess()` returns the key as a bare string and
/// `signTransaction(xdr, options)` returns the signed envelope bare.
pub const FREIGHTER: WalletBinding = WalletBinding {
  id: "freighter",
  name: "Freighter",
  icon: "https://freighter.app/favicon.ico",
  description: "A browser extension for Stellar",
  website: "https://freighter.app",
  mobile: Some(false),
  global: "freighter",
  connect: ConnectBinding {
    method: "requestAccess",
    key: ResponseField::Bare,
  },
  sign: SignBinding {
    method: "signTransaction",
    args: SignArgs::EnvelopeAndOptions,
    signed: ResponseField::Bare,
  },
  disconnect: Some("disconnect"),
  requires_session_for_signing: true,
};

/// xBull: structured `sign({ xdr, network, address })`.
pub const XBULL: WalletBinding = WalletBinding {
  id: "xbull",
  name: "xBull",
  icon: "https://xbull.app/favicon.ico",
  description: "A browser extension for Stellar",
  website: "https://xbull.app",
  mobile: None,
  global: "xBullWalletConnect",
  connect: ConnectBinding {
    method: "connect",
    key: ResponseField::Field("address"),
  },
  sign: SignBinding {
    method: "sign",
    args: SignArgs::Structured {
      envelope: "xdr",
      network: "network",
      account: "address",
    },
    signed: ResponseField::Field("signedXDR"),
  },
  disconnect: Some("disconnect"),
  requires_session_for_signing: false,
};

/// Albedo: web-redirect wallet with no disconnect of its own.
pub const ALBEDO: WalletBinding = WalletBinding {
  id: "albedo",
  name: "Albedo",
  icon: "https://albedo.link/favicon.ico",
  description: "A web-based wallet for Stellar",
  website: "https://albedo.link",
  mobile: None,
  global: "albedo",
  connect: ConnectBinding {
    method: "publicKey",
    key: ResponseField::Field("pubkey"),
  },
  sign: SignBinding {
    method: "tx",
    args: SignArgs::Structured {
      envelope: "xdr",
      network: "network",
      account: "pubkey",
    },
    signed: ResponseField::Field("signed_envelope_xdr"),
  },
  disconnect: None,
  requires_session_for_signing: false,
};

/// Rabet: positional `sign(xdr, network)` returning `{ xdr }`.
pub const RABET: WalletBinding = WalletBinding {
  id: "rabet",
  name: "Rabet",
  icon: "https://rabet.io/favicon.ico",
  description: "A browser extension for Stellar",
  website: "https://rabet.io",
  mobile: None,
  global: "rabet",
  connect: ConnectBinding {
    method: "connect",
    key: ResponseField::Field("address"),
  },
  sign: SignBinding {
    method: "sign",
    args: SignArgs::EnvelopeAndPassphrase,
    signed: ResponseField::Field("xdr"),
  },
  disconnect: Some("disconnect"),
  requires_session_for_signing: false,
};

/// All built-in bindings, in default registration order.
pub const BUILTIN_BINDINGS: [WalletBinding; 4] = [FREIGHTER, XBULL, ALBEDO, RABET];

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  use crate::domain::network::TESTNET_PASSPHRASE;

  #[test]
  fn test_builtin_ids_are_distinct() {
    let mut ids: Vec<_> = BUILTIN_BINDINGS.iter().map(|b| b.id).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), BUILTIN_BINDINGS.len());
  }

  #[test]
  fn test_builtin_lookup() {
    assert_eq!(WalletBinding::builtin("albedo").map(|b| b.global), Some("albedo"));
    assert_eq!(
      WalletBinding::builtin("xbull").map(|b| b.global),
      Some("xBullWalletConnect")
    );
    assert!(WalletBinding::builtin("lobstr").is_none());
  }

  #[test]
  fn test_extract_bare_and_field() {
    assert_eq!(ResponseField::Bare.extract(&json!("GABC")), Some("GABC".to_string()));
    assert_eq!(
      ResponseField::Field("pubkey").extract(&json!({ "pubkey": "GABC" })),
      Some("GABC".to_string())
    );
    assert_eq!(ResponseField::Field("address").extract(&json!({ "pubkey": "GABC" })), None);
    assert_eq!(ResponseField::Bare.extract(&json!("")), None);
    assert_eq!(ResponseField::Bare.extract(&json!(42)), None);
  }

  #[test]
  fn test_freighter_forwards_options_object() {
    let opts = SignOptions::with_passphrase(TESTNET_PASSPHRASE).account("GACC");
    let args = SignArgs::EnvelopeAndOptions.build("XDR", Some(&opts), Some("GSESSION"));
    assert_eq!(
      args,
      vec![
        json!("XDR"),
        json!({ "networkPassphrase": TESTNET_PASSPHRASE, "accountToSign": "GACC" })
      ]
    );

    let bare = SignArgs::EnvelopeAndOptions.build("XDR", None, None);
    assert_eq!(bare, vec![json!("XDR"), Value::Null]);
  }

  #[test]
  fn test_rabet_passes_passphrase_positionally() {
    let opts = SignOptions::with_passphrase(TESTNET_PASSPHRASE);
    let args = RABET.sign.args.build("XDR", Some(&opts), Some("GSESSION"));
    assert_eq!(args, vec![json!("XDR"), json!(TESTNET_PASSPHRASE)]);
  }

  #[test]
  fn test_structured_account_falls_back_to_session() {
    let opts = SignOptions::with_passphrase(TESTNET_PASSPHRASE);
    let args = XBULL.sign.args.build("XDR", Some(&opts), Some("GSESSION"));
    assert_eq!(
      args,
      vec![json!({ "xdr": "XDR", "network": TESTNET_PASSPHRASE, "address": "GSESSION" })]
    );

    let overridden = ALBEDO
      .sign
      .args
      .build("XDR", Some(&SignOptions::default().account("GOTHER")), Some("GSESSION"));
    assert_eq!(overridden, vec![json!({ "xdr": "XDR", "pubkey": "GOTHER" })]);

    let minimal = ALBEDO.sign.args.build("XDR", None, None);
    assert_eq!(minimal, vec![json!({ "xdr": "XDR" })]);
  }

  #[test]
  fn test_envelope_recovery_matches_build() {
    for binding in BUILTIN_BINDINGS {
      let args = binding.sign.args.build("ENVELOPE", None, Some("GSESSION"));
      assert_eq!(binding.sign.args.envelope(&args), Some("ENVELOPE"), "{}", binding.id);
      assert_eq!(binding.sign.args.passphrase(&args), None, "{}", binding.id);

      let opts = SignOptions::with_passphrase(TESTNET_PASSPHRASE);
      let args = binding.sign.args.build("ENVELOPE", Some(&opts), None);
      assert_eq!(binding.sign.args.passphrase(&args), Some(TESTNET_PASSPHRASE), "{}", binding.id);
    }
  }
}
