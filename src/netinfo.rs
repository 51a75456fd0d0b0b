//! Address lookups and the OS network adapter panel.
//!
//! Lookups fail closed: any error is logged and reported as [`NOT_AVAILABLE`].

use crate::{Error, Result, NOT_AVAILABLE};
use log::{info, warn};
use std::io;
use std::net::{IpAddr, ToSocketAddrs};
use std::process::{Command, ExitStatus};
use std::thread;
use std::time::Duration;

pub const PUBLIC_IP_URL: &str = "https://api.ipify.org";
pub const PUBLIC_IP_TIMEOUT: Duration = Duration::from_secs(4);

/// Private and public address pair shown in the IP dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IpInfo {
    pub private_ip: String,
    pub public_ip: String,
}

impl IpInfo {
    /// Runs both lookups; blocks for up to [`PUBLIC_IP_TIMEOUT`].
    pub fn lookup() -> Self {
        Self {
            private_ip: private_ip(),
            public_ip: public_ip(),
        }
    }

    pub fn message(&self) -> String {
        format!(
            "IP privato: {}\nIP pubblico: {}",
            self.private_ip, self.public_ip
        )
    }
}

/// Address the local hostname resolves to.
pub fn private_ip() -> String {
    match resolve_hostname() {
        Ok(ip) => ip.to_string(),
        Err(e) => {
            warn!("Private IP lookup failed: {e}");
            NOT_AVAILABLE.to_string()
        }
    }
}

fn resolve_hostname() -> Result<IpAddr> {
    let host = sysinfo::System::host_name()
        .filter(|h| !h.is_empty())
        .ok_or_else(|| Error::invalid_data("hostname sconosciuto"))?;
    let addrs: Vec<IpAddr> = (host.as_str(), 0)
        .to_socket_addrs()?
        .map(|addr| addr.ip())
        .collect();
    pick_address(&addrs).ok_or_else(|| Error::invalid_data(format!("{host} non risolto")))
}

/// Prefers the first IPv4 address, falling back to the first one of any kind.
pub fn pick_address(addrs: &[IpAddr]) -> Option<IpAddr> {
    addrs
        .iter()
        .find(|ip| ip.is_ipv4())
        .or_else(|| addrs.first())
        .copied()
}

/// Address seen by the outside world, fetched over HTTPS.
pub fn public_ip() -> String {
    match fetch_public_ip(PUBLIC_IP_URL, PUBLIC_IP_TIMEOUT) {
        Ok(ip) => ip,
        Err(e) => {
            warn!("Public IP lookup failed: {e}");
            NOT_AVAILABLE.to_string()
        }
    }
}

fn fetch_public_ip(url: &str, timeout: Duration) -> Result<String> {
    let client = reqwest::blocking::Client::builder()
        .timeout(timeout)
        .build()?;
    let body = client.get(url).send()?.error_for_status()?.text()?;
    let ip = body.trim();
    ip.parse::<IpAddr>()
        .map_err(|_| Error::invalid_data(format!("risposta inattesa: {ip}")))?;
    info!("Public IP resolved");
    Ok(ip.to_string())
}

#[cfg(target_os = "windows")]
fn adapter_panel_command() -> Command {
    let mut cmd = Command::new("control");
    cmd.arg("ncpa.cpl");
    cmd
}

#[cfg(target_os = "macos")]
fn adapter_panel_command() -> Command {
    let mut cmd = Command::new("open");
    cmd.arg("/System/Library/PreferencePanes/Network.prefPane");
    cmd
}

#[cfg(not(any(target_os = "windows", target_os = "macos")))]
fn adapter_panel_command() -> Command {
    Command::new("nm-connection-editor")
}

/// Opens the OS network adapter settings without waiting for them to close.
pub fn open_network_adapters() -> Result<()> {
    launch_detached(adapter_panel_command())?;
    Ok(())
}

/// Spawns `cmd` and reaps it on a background thread once it exits.
fn launch_detached(mut cmd: Command) -> Result<thread::JoinHandle<io::Result<ExitStatus>>> {
    let program = cmd.get_program().to_string_lossy().into_owned();
    let mut child = cmd.spawn().map_err(|source| Error::Launch {
        program: program.clone(),
        source,
    })?;
    info!("Launched {program}");

    Ok(thread::spawn(move || {
        let status = child.wait();
        if let Err(e) = &status {
            warn!("Waiting for {program} failed: {e}");
        }
        status
    }))
}
