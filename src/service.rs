use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use tracing::{instrument, trace};

/// Default supervision root.
pub const SERVICE_DIR: &str = "/etc/service";
const SUPERVISE_DIR: &str = "supervise";

/// A supervised unit, identified by its entry name under the supervision root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Service {
    pub name: String,
    pub root: PathBuf,
}

impl Service {
    pub fn new(root: impl Into<PathBuf>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            root: root.into(),
        }
    }

    /// `root/name`
    pub fn dir(&self) -> PathBuf {
        self.root.join(&self.name)
    }

    /// `root/name/supervise/file_name`
    pub fn control_file(&self, file_name: &str) -> PathBuf {
        self.dir().join(SUPERVISE_DIR).join(file_name)
    }
}

/// Lists the services under `root`.
///
/// Entries that are themselves directories are skipped. The entry's own file
/// type is used, so symlinks to service directories are listed. Names that are
/// not valid UTF-8 are skipped too, since they cannot round-trip into a path.
#[instrument]
pub fn list_services(root: &Path) -> Result<Vec<Service>> {
    let unreadable = |source| Error::DirectoryUnreadable {
        path: root.to_path_buf(),
        source,
    };

    let mut services = Vec::new();
    for entry in root.read_dir().map_err(unreadable)? {
        let entry = entry.map_err(unreadable)?;
        if entry.file_type().map_err(unreadable)?.is_dir() {
            trace!(entry = ?entry.file_name(), "Skipping directory");
            continue;
        }
        let name = match entry.file_name().into_string() {
            Ok(name) => name,
            Err(name) => {
                trace!(entry = ?name, "Skipping non UTF-8 name");
                continue;
            }
        };
        services.push(service(root, &name));
    }
    services.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(services)
}

/// Builds a [`Service`] without touching the filesystem.
pub fn service(root: &Path, name: &str) -> Service {
    Service::new(root, name)
}

/// Path of a control file under the service's `supervise/` directory. No I/O.
pub fn control_file_path(service: &Service, file_name: &str) -> PathBuf {
    service.control_file(file_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn control_file_layout() {
        let svc = service(Path::new("/etc/service"), "web");
        assert_eq!(svc.dir(), PathBuf::from("/etc/service/web"));
        assert_eq!(
            control_file_path(&svc, "status"),
            PathBuf::from("/etc/service/web/supervise/status")
        );
        assert_eq!(
            svc.control_file("ok"),
            PathBuf::from("/etc/service/web/supervise/ok")
        );
    }

    #[test]
    fn service_does_no_io() {
        let svc = service(Path::new("/does/not/exist"), "ghost");
        assert_eq!(svc.name, "ghost");
        assert_eq!(svc.root, PathBuf::from("/does/not/exist"));
    }

    #[test]
    fn list_skips_directories() {
        let root = tempdir().unwrap();
        fs::write(root.path().join("web"), "").unwrap();
        fs::write(root.path().join("db"), "").unwrap();
        fs::create_dir(root.path().join("skipped")).unwrap();

        let services = list_services(root.path()).unwrap();
        assert_eq!(services.len(), 2);
        let names: Vec<_> = services.iter().map(|s| s.name.as_str()).collect();
        assert!(names.contains(&"web"));
        assert!(names.contains(&"db"));
        assert!(services.iter().all(|s| s.root == root.path()));
    }

    #[cfg(unix)]
    #[test]
    fn list_includes_symlinked_services() {
        let root = tempdir().unwrap();
        let target = tempdir().unwrap();
        std::os::unix::fs::symlink(target.path(), root.path().join("linked")).unwrap();

        let services = list_services(root.path()).unwrap();
        assert_eq!(services, vec![service(root.path(), "linked")]);
    }

    #[cfg(unix)]
    #[test]
    fn list_skips_non_utf8_names() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let root = tempdir().unwrap();
        let target = tempdir().unwrap();
        fs::create_dir(target.path().join("supervise")).unwrap();
        let name = OsStr::from_bytes(b"we\xffb");
        std::os::unix::fs::symlink(target.path(), root.path().join(name)).unwrap();
        fs::write(root.path().join("web"), "").unwrap();

        let services = list_services(root.path()).unwrap();
        assert_eq!(services, vec![service(root.path(), "web")]);
    }

    #[test]
    fn list_empty_root() {
        let root = tempdir().unwrap();
        fs::create_dir(root.path().join("only-a-dir")).unwrap();
        assert!(list_services(root.path()).unwrap().is_empty());
    }

    #[test]
    fn list_missing_root() {
        let root = tempdir().unwrap();
        let missing = root.path().join("missing");
        let err = list_services(&missing).unwrap_err();
        assert!(matches!(err, Error::DirectoryUnreadable { ref path, .. } if *path == missing));
    }
}
