//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use std::cell::Cell;
use std::fs;
use std::io;
use std::os::unix::fs::symlink;
use std::path::{Path, PathBuf};

use procfind::{ProcFs, ProcLink};

/// Builds a `/proc/<pid>/stat` line with the given name, parent and start tick.
pub fn stat_line(pid: u32, name: &str, ppid: u32, start: u64) -> String {
    format!(
        "{} ({}) S {} {} {} 0 -1 4194560 0 0 0 0 0 0 0 0 20 0 1 0 {} 1000 10 0\n",
        pid, name, ppid, pid, pid, start
    )
}

/// One fake process.
#[derive(Debug, Clone)]
pub struct FakeProc {
    pub pid: u32,
    pub name: String,
    pub ppid: u32,
    pub start: u64,
    pub exe: Option<String>,
    pub cwd: Option<String>,
    /// Listed but stat missing, like a process that exited mid-scan.
    pub vanished: bool,
}

impl FakeProc {
    pub fn new(pid: u32, name: &str, ppid: u32, start: u64) -> Self {
        Self {
            pid,
            name: name.into(),
            ppid,
            start,
            exe: Some(format!("/usr/bin/{}", name)),
            cwd: Some("/".into()),
            vanished: false,
        }
    }

    pub fn exe(mut self, exe: Option<&str>) -> Self {
        self.exe = exe.map(String::from);
        self
    }

    pub fn cwd(mut self, cwd: Option<&str>) -> Self {
        self.cwd = cwd.map(String::from);
        self
    }

    pub fn vanished(mut self) -> Self {
        self.vanished = true;
        self
    }
}

/// A procfs-shaped directory tree on disk, for `HostProcFs`.
pub struct FakeTree {
    dir: tempfile::TempDir,
}

impl FakeTree {
    pub fn new(procs: &[FakeProc]) -> Self {
        let dir = tempfile::tempdir().expect("tempdir");
        for p in procs {
            let pdir = dir.path().join(p.pid.to_string());
            fs::create_dir(&pdir).expect("pid dir");
            if p.vanished {
                continue;
            }
            fs::write(pdir.join("stat"), stat_line(p.pid, &p.name, p.ppid, p.start))
                .expect("stat");
            if let Some(exe) = &p.exe {
                symlink(exe, pdir.join("exe")).expect("exe link");
            }
            if let Some(cwd) = &p.cwd {
                symlink(cwd, pdir.join("cwd")).expect("cwd link");
            }
        }
        // Non-process entries a real /proc also has
        fs::create_dir(dir.path().join("sys")).expect("sys dir");
        fs::write(dir.path().join("uptime"), "12345.67 54321.00\n").expect("uptime");
        Self { dir }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }
}

/// In-memory procfs with a fixed listing order and read counting.
pub struct MemProcFs {
    pub procs: Vec<FakeProc>,
    pub supported: bool,
    pub root_present: bool,
    pub reads: Cell<usize>,
}

impl MemProcFs {
    pub fn new(procs: Vec<FakeProc>) -> Self {
        Self {
            procs,
            supported: true,
            root_present: true,
            reads: Cell::new(0),
        }
    }

    fn get(&self, pid: u32) -> io::Result<&FakeProc> {
        self.procs
            .iter()
            .find(|p| p.pid == pid && !p.vanished)
            .ok_or_else(|| io::Error::from(io::ErrorKind::NotFound))
    }

    fn count(&self) {
        self.reads.set(self.reads.get() + 1);
    }
}

impl ProcFs for MemProcFs {
    fn os_supported(&self) -> bool {
        self.supported
    }

    fn root_exists(&self) -> bool {
        self.root_present
    }

    fn list_pids(&self) -> io::Result<Vec<u32>> {
        self.count();
        Ok(self.procs.iter().map(|p| p.pid).collect())
    }

    fn read_stat(&self, pid: u32) -> io::Result<String> {
        self.count();
        let p = self.get(pid)?;
        Ok(stat_line(p.pid, &p.name, p.ppid, p.start))
    }

    fn read_link(&self, pid: u32, link: ProcLink) -> io::Result<PathBuf> {
        self.count();
        let p = self.get(pid)?;
        let target = match link {
            ProcLink::Exe => &p.exe,
            ProcLink::Cwd => &p.cwd,
        };
        target
            .as_ref()
            .map(PathBuf::from)
            .ok_or_else(|| io::Error::from(io::ErrorKind::PermissionDenied))
    }
}
