// ABOUTME: Control socket detection for the local container engine.
// ABOUTME: Honors explicit settings and DOCKER_HOST before probing well-known socket paths.

use super::settings::EngineSettings;
use std::path::{Path, PathBuf};

const DOCKER_SOCKET: &str = "/var/run/docker.sock";
const ROOTFUL_PODMAN: &str = "/run/podman/podman.sock";

/// Error during socket detection.
#[derive(Debug, thiserror::Error)]
pub enum DetectionError {
    #[error("no container engine socket found (checked DOCKER_HOST, Docker and Podman sockets)")]
    NoSocketFound,

    #[error("DOCKER_HOST must be a unix:// URL to be used here, got {0}")]
    UnsupportedDockerHost(String),
}

/// Resolve the engine control socket.
///
/// Resolution order:
/// 1. `settings.socket`, used as given
/// 2. `DOCKER_HOST`, when set to a `unix://` URL
/// 3. Docker socket (`/var/run/docker.sock`)
/// 4. Rootless Podman socket (`/run/user/$UID/podman/podman.sock`)
/// 5. Rootful Podman socket (`/run/podman/podman.sock`)
pub fn detect_socket(settings: &EngineSettings) -> Result<PathBuf, DetectionError> {
    if let Some(ref socket) = settings.socket {
        return Ok(socket.clone());
    }

    if let Some(host) = std::env::var("DOCKER_HOST").ok().filter(|h| !h.is_empty()) {
        return match host.strip_prefix("unix://") {
            Some(path) => Ok(PathBuf::from(path)),
            None => Err(DetectionError::UnsupportedDockerHost(host)),
        };
    }

    if Path::new(DOCKER_SOCKET).exists() {
        return Ok(PathBuf::from(DOCKER_SOCKET));
    }

    if let Some(uid) = get_uid() {
        let rootless = PathBuf::from(format!("/run/user/{uid}/podman/podman.sock"));
        if rootless.exists() {
            return Ok(rootless);
        }
    }

    if Path::new(ROOTFUL_PODMAN).exists() {
        return Ok(PathBuf::from(ROOTFUL_PODMAN));
    }

    Err(DetectionError::NoSocketFound)
}

fn get_uid() -> Option<String> {
    std::env::var("UID").ok().or_else(|| {
        // Fall back to reading /proc/self/status
        std::fs::read_to_string("/proc/self/status")
            .ok()
            .and_then(|s| {
                s.lines()
                    .find(|l| l.starts_with("Uid:"))
                    .and_then(|l| l.split_whitespace().nth(1))
                    .map(|s| s.to_string())
            })
    })
}
