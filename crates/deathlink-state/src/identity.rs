//! Computing our own [`ParticipantIdentity`].
//!
//! The stable part of the identity is a hash of the MAC address of the
//! first network interface that is up. It's read once per process and
//! cached, including a failed read: an unreadable interface list means
//! "no hash" for the rest of the run, and identity equality falls back
//! to the display name alone.

use std::fs;
use std::io;
use std::path::PathBuf;

use deathlink_protocol::{ParticipantIdentity, PeerInfo, SessionId};
use sha2::{Digest, Sha256};

/// Where the hardware address comes from.
pub trait HardwareSource: Send + Sync {
    /// MAC address of the first interface that is up, if any.
    fn first_up_address(&self) -> io::Result<Option<String>>;
}

/// Reads interfaces from Linux sysfs (`/sys/class/net/<iface>/...`).
///
/// Interfaces are visited in name order so the choice is deterministic
/// across runs. Loopback and all-zero addresses are skipped. Only
/// meaningful on Linux; [`IdentityProvider::for_host`] picks
/// [`UnsupportedPlatform`] elsewhere.
#[derive(Debug, Clone)]
pub struct SysfsInterfaces {
    root: PathBuf,
}

impl SysfsInterfaces {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl Default for SysfsInterfaces {
    fn default() -> Self {
        Self::new("/sys/class/net")
    }
}

impl HardwareSource for SysfsInterfaces {
    fn first_up_address(&self) -> io::Result<Option<String>> {
        let mut names: Vec<_> = fs::read_dir(&self.root)?
            .filter_map(Result::ok)
            .map(|entry| entry.file_name())
            .collect();
        names.sort();

        for name in names {
            if name == "lo" {
                continue;
            }
            let dir = self.root.join(&name);
            let Ok(state) = fs::read_to_string(dir.join("operstate")) else {
                continue;
            };
            if state.trim() != "up" {
                continue;
            }
            let Ok(address) = fs::read_to_string(dir.join("address")) else {
                continue;
            };
            let address = address.trim();
            if address.is_empty() || address == "00:00:00:00:00:00" {
                continue;
            }
            return Ok(Some(address.to_owned()));
        }
        Ok(None)
    }
}

/// Stand-in source for platforms without sysfs. Every read fails, so
/// identities there are name-only.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnsupportedPlatform;

impl HardwareSource for UnsupportedPlatform {
    fn first_up_address(&self) -> io::Result<Option<String>> {
        Err(io::Error::new(
            io::ErrorKind::Unsupported,
            "no interface source for this platform",
        ))
    }
}

/// Hashes a hardware address into the 32-bit value carried on the wire.
pub fn hash_address(address: &str) -> i32 {
    let digest = Sha256::digest(address.as_bytes());
    i32::from_le_bytes([digest[0], digest[1], digest[2], digest[3]])
}

/// Produces this process's identity on demand.
pub struct IdentityProvider {
    source: Option<Box<dyn HardwareSource>>,
    /// Outer `None`: not computed yet. Inner `None`: computed, unavailable.
    stable_hash: Option<Option<i32>>,
    last_known_name: String,
}

impl IdentityProvider {
    pub fn new(source: impl HardwareSource + 'static) -> Self {
        Self {
            source: Some(Box::new(source)),
            stable_hash: None,
            last_known_name: String::new(),
        }
    }

    /// The provider for the platform we were built for.
    pub fn for_host() -> Self {
        #[cfg(target_os = "linux")]
        let provider = Self::new(SysfsInterfaces::default());
        #[cfg(not(target_os = "linux"))]
        let provider = Self::new(UnsupportedPlatform);
        provider
    }

    /// A provider whose hash is already known (or known to be absent).
    pub fn with_fixed_hash(stable_hash: Option<i32>) -> Self {
        Self {
            source: None,
            stable_hash: Some(stable_hash),
            last_known_name: String::new(),
        }
    }

    /// The cached hardware hash, computing it on first use.
    pub fn stable_hash(&mut self) -> Option<i32> {
        if let Some(hash) = self.stable_hash {
            return hash;
        }

        let hash = match self.source.as_ref().map(|s| s.first_up_address()) {
            Some(Ok(Some(address))) => Some(hash_address(&address)),
            Some(Ok(None)) | None => {
                tracing::warn!("no network interface is up, identity has no hardware hash");
                None
            }
            Some(Err(e)) => {
                tracing::warn!(error = %e, "failed to read network interfaces, identity has no hardware hash");
                None
            }
        };
        self.stable_hash = Some(hash);
        hash
    }

    /// Builds the current identity from the cached hash and whatever the
    /// transport says about our connection right now.
    ///
    /// While disconnected the session id is [`SessionId::UNASSIGNED`] and
    /// the name is the last one we saw.
    pub fn current(&mut self, peer: Option<&PeerInfo>) -> ParticipantIdentity {
        if let Some(peer) = peer {
            if peer.name != self.last_known_name {
                self.last_known_name.clone_from(&peer.name);
            }
        }
        let session_id = peer.map_or(SessionId::UNASSIGNED, |p| p.session_id);
        ParticipantIdentity::new(
            self.stable_hash(),
            self.last_known_name.clone(),
            session_id,
        )
    }

    pub fn last_known_name(&self) -> &str {
        &self.last_known_name
    }
}
