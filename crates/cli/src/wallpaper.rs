//! Desktop background integration.
//!
//! Each platform is driven through its own command-line tool:
//!
//! - Windows: PowerShell calling `SystemParametersInfo(SPI_SETDESKWALLPAPER)`
//! - macOS: `osascript` telling System Events to update every desktop
//! - Linux and the BSDs: `gsettings` for the GNOME background keys
//!
//! On Windows and macOS the image path reaches the script through the
//! `APOD_WALLPAPER_PATH` environment variable so no quoting is involved.

use std::ffi::OsString;
use std::path::Path;

use apod_core::Error;
use async_trait::async_trait;
use tokio::process::Command;

#[cfg(any(target_os = "windows", target_os = "macos"))]
const PATH_ENV: &str = "APOD_WALLPAPER_PATH";

/// Something that can make a local image the desktop background.
#[async_trait]
pub trait WallpaperSetter: Send + Sync {
    async fn set(&self, path: &Path) -> Result<(), Error>;
}

/// One external command to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: &'static str,
    pub args: Vec<OsString>,
    pub envs: Vec<(&'static str, OsString)>,
    /// Failure is logged instead of returned.
    pub optional: bool,
}

/// Wallpaper setter for the platform this binary was built for.
#[derive(Debug, Default)]
pub struct DesktopWallpaper;

#[async_trait]
impl WallpaperSetter for DesktopWallpaper {
    async fn set(&self, path: &Path) -> Result<(), Error> {
        for invocation in invocations(path)? {
            let output = Command::new(invocation.program)
                .args(&invocation.args)
                .envs(invocation.envs.iter().map(|(k, v)| (*k, v)))
                .output()
                .await;

            let failure = match output {
                Ok(output) if output.status.success() => None,
                Ok(output) => Some(format!(
                    "{} exited with {}: {}",
                    invocation.program,
                    output.status,
                    String::from_utf8_lossy(&output.stderr).trim()
                )),
                Err(e) => Some(format!("failed to run {}: {e}", invocation.program)),
            };

            match failure {
                Some(reason) if invocation.optional => tracing::debug!("{reason}"),
                Some(reason) => return Err(Error::Wallpaper(reason)),
                None => {}
            }
        }

        tracing::info!(path = %path.display(), "desktop background updated");
        Ok(())
    }
}

/// Commands that set `path` as the background on this platform.
pub fn invocations(path: &Path) -> Result<Vec<Invocation>, Error> {
    if !path.is_absolute() {
        return Err(Error::Wallpaper(format!("wallpaper path '{}' must be absolute", path.display())));
    }
    platform_invocations(path)
}

#[cfg(target_os = "windows")]
fn platform_invocations(path: &Path) -> Result<Vec<Invocation>, Error> {
    const SCRIPT: &str = r#"
Add-Type -TypeDefinition @'
using System.Runtime.InteropServices;
public static class ApodWallpaper {
    [DllImport("user32.dll", CharSet = CharSet.Unicode, SetLastError = true)]
    public static extern bool SystemParametersInfo(int uAction, int uParam, string lpvParam, int fuWinIni);
}
'@
if (-not [ApodWallpaper]::SystemParametersInfo(20, 0, $env:APOD_WALLPAPER_PATH, 3)) { exit 1 }
"#;
    Ok(vec![Invocation {
        program: "powershell",
        args: vec!["-NoProfile".into(), "-NonInteractive".into(), "-Command".into(), SCRIPT.into()],
        envs: vec![(PATH_ENV, path.as_os_str().to_owned())],
        optional: false,
    }])
}

#[cfg(target_os = "macos")]
fn platform_invocations(path: &Path) -> Result<Vec<Invocation>, Error> {
    const SCRIPT: &str = r#"tell application "System Events" to tell every desktop to set picture to (system attribute "APOD_WALLPAPER_PATH")"#;
    Ok(vec![Invocation {
        program: "osascript",
        args: vec!["-e".into(), SCRIPT.into()],
        envs: vec![(PATH_ENV, path.as_os_str().to_owned())],
        optional: false,
    }])
}

#[cfg(all(unix, not(target_os = "macos")))]
fn platform_invocations(path: &Path) -> Result<Vec<Invocation>, Error> {
    let uri = url::Url::from_file_path(path)
        .map_err(|_| Error::Wallpaper(format!("cannot build file URI for '{}'", path.display())))?;

    let gsettings = |key: &str, optional: bool| Invocation {
        program: "gsettings",
        args: vec!["set".into(), "org.gnome.desktop.background".into(), key.into(), uri.as_str().into()],
        envs: Vec::new(),
        optional,
    };

    // picture-uri-dark only exists on GNOME 42 and later.
    Ok(vec![gsettings("picture-uri", false), gsettings("picture-uri-dark", true)])
}

#[cfg(not(any(unix, target_os = "windows")))]
fn platform_invocations(_path: &Path) -> Result<Vec<Invocation>, Error> {
    Err(Error::Wallpaper("setting the desktop background is not supported on this platform".into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_path_rejected() {
        let result = invocations(Path::new("images/moon.jpg"));
        assert!(matches!(result, Err(Error::Wallpaper(msg)) if msg.contains("absolute")));
    }

    #[cfg(all(unix, not(target_os = "macos")))]
    #[test]
    fn test_gsettings_invocations() {
        let invocations = invocations(Path::new("/var/cache/apod/Moon Rise.jpg")).unwrap();
        assert_eq!(invocations.len(), 2);

        let primary = &invocations[0];
        assert_eq!(primary.program, "gsettings");
        assert!(!primary.optional);
        assert_eq!(
            primary.args,
            vec![
                OsString::from("set"),
                OsString::from("org.gnome.desktop.background"),
                OsString::from("picture-uri"),
                OsString::from("file:///var/cache/apod/Moon%20Rise.jpg"),
            ]
        );

        assert_eq!(invocations[1].args[2], OsString::from("picture-uri-dark"));
        assert!(invocations[1].optional);
    }

    #[cfg(any(target_os = "macos", target_os = "windows"))]
    #[test]
    fn test_path_passed_through_env() {
        let path = Path::new(if cfg!(windows) { r"C:\apod\moon.jpg" } else { "/Users/me/apod/moon.jpg" });
        let invocations = invocations(path).unwrap();
        assert_eq!(invocations.len(), 1);
        assert_eq!(invocations[0].envs, vec![(PATH_ENV, path.as_os_str().to_owned())]);
    }
}
