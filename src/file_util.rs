use std::{
    collections::HashMap,
    fs::{self, File, OpenOptions},
    io::{BufRead, BufReader, BufWriter, IsTerminal, Read, Write},
    path::{Path, PathBuf},
    time::{Duration, SystemTime},
};

use regex::Regex;
use serde::{Serialize, de::DeserializeOwned};

/// Checks if a regular file (not a folder) exists at `path`.
pub fn file_exists(path: impl AsRef<Path>) -> bool {
    fs::metadata(path).map(|m| !m.is_dir()).unwrap_or(false)
}

pub fn folder_exists(path: impl AsRef<Path>) -> bool {
    fs::metadata(path).map(|m| m.is_dir()).unwrap_or(false)
}

/// Anything but a "not found" error counts as existing.
pub fn file_or_folder_exists(path: impl AsRef<Path>) -> bool {
    match fs::metadata(path) {
        Ok(_) => true,
        Err(err) => err.kind() != std::io::ErrorKind::NotFound,
    }
}

pub fn is_readable(path: impl AsRef<Path>) -> bool {
    File::open(path).is_ok()
}

pub fn is_writable(path: impl AsRef<Path>) -> bool {
    OpenOptions::new().write(true).open(path).is_ok()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Read,
    Write,
    ReadWrite,
}

/// Tries to open `path` with the requested access. A permission failure is `Ok(false)`;
/// any other failure (missing file, ...) is an error.
pub fn has_permission(path: impl AsRef<Path>, access: Access) -> std::io::Result<bool> {
    let mut options = OpenOptions::new();
    match access {
        Access::Read => options.read(true),
        Access::Write => options.write(true),
        Access::ReadWrite => options.read(true).write(true),
    };
    match options.open(path) {
        Ok(_) => Ok(true),
        Err(err) if err.kind() == std::io::ErrorKind::PermissionDenied => Ok(false),
        Err(err) => Err(err),
    }
}

/// Creates `path` and its parents, owner-only on unix.
pub fn create_folder(path: impl AsRef<Path>) -> std::io::Result<()> {
    mkdir(path, 0o700, true)
}

pub fn create_folders<P: AsRef<Path>>(paths: &[P]) -> std::io::Result<()> {
    for path in paths {
        create_folder(path)?;
    }
    Ok(())
}

/// `mode` only applies on unix.
pub fn mkdir(path: impl AsRef<Path>, mode: u32, recursive: bool) -> std::io::Result<()> {
    let mut builder = fs::DirBuilder::new();
    builder.recursive(recursive);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(mode);
    }
    #[cfg(not(unix))]
    let _ = mode;
    builder.create(path)
}

/// True when stdin is piped or redirected rather than attached to a terminal.
pub fn has_stdin() -> bool {
    !std::io::stdin().is_terminal()
}

/// Lazily yields the lines of a reader without their line terminator.
///
/// Bytes that are not valid UTF-8 are replaced with `U+FFFD`. The stream ends after the first
/// error. With a capacity set, a line longer than the capacity is reported as `InvalidData`.
/// Dropping the iterator closes the underlying reader.
pub struct Lines<R> {
    reader: R,
    capacity: Option<usize>,
    done: bool,
}

impl<R: BufRead> Lines<R> {
    fn read_next(&mut self) -> std::io::Result<Option<String>> {
        let mut buf = Vec::new();
        let read = match self.capacity {
            Some(capacity) => (&mut self.reader).take(capacity as u64 + 1).read_until(b'\n', &mut buf)?,
            None => self.reader.read_until(b'\n', &mut buf)?,
        };
        if read == 0 {
            return Ok(None);
        }
        if buf.ends_with(b"\n") {
            buf.pop();
            if buf.ends_with(b"\r") {
                buf.pop();
            }
        }
        if let Some(capacity) = self.capacity {
            if buf.len() > capacity {
                return Err(std::io::Error::new(
                    std::io::ErrorKind::InvalidData,
                    format!("line exceeds buffer capacity of {} bytes", capacity),
                ));
            }
        }
        Ok(Some(String::from_utf8_lossy(&buf).into_owned()))
    }
}

impl<R: BufRead> Iterator for Lines<R> {
    type Item = std::io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.read_next() {
            Ok(Some(line)) => Some(Ok(line)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(err) => {
                self.done = true;
                Some(Err(err))
            }
        }
    }
}

pub fn read_lines_from_reader<R: Read>(reader: R) -> Lines<BufReader<R>> {
    Lines {
        reader: BufReader::new(reader),
        capacity: None,
        done: false,
    }
}

pub fn read_lines_from_reader_with_capacity<R: Read>(reader: R, capacity: usize) -> Lines<BufReader<R>> {
    Lines {
        reader: BufReader::new(reader),
        capacity: Some(capacity),
        done: false,
    }
}

pub fn read_lines(path: impl AsRef<Path>) -> std::io::Result<Lines<BufReader<File>>> {
    Ok(read_lines_from_reader(open_existing(path.as_ref())?))
}

pub fn read_lines_with_capacity(path: impl AsRef<Path>, capacity: usize) -> std::io::Result<Lines<BufReader<File>>> {
    Ok(read_lines_from_reader_with_capacity(open_existing(path.as_ref())?, capacity))
}

fn open_existing(path: &Path) -> std::io::Result<File> {
    if !file_exists(path) {
        return Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("file doesn't exist: {}", path.display()),
        ));
    }
    File::open(path)
}

/// Returns a fresh, unused temporary path. The file itself is not left behind.
pub fn get_temp_file_name() -> std::io::Result<PathBuf> {
    let temp = tempfile::NamedTempFile::new()?.into_temp_path();
    let path = temp.to_path_buf();
    temp.close()?;
    Ok(path)
}

/// Copies `src` over `dst` and flushes `dst` to disk.
pub fn copy_file(src: impl AsRef<Path>, dst: impl AsRef<Path>) -> std::io::Result<()> {
    let src = src.as_ref();
    if !file_exists(src) {
        return Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("source file doesn't exist: {}", src.display()),
        ));
    }
    let mut src_file = File::open(src)?;
    let mut dst_file = File::create(dst)?;
    std::io::copy(&mut src_file, &mut dst_file)?;
    dst_file.sync_all()
}

type CustomCheck = Box<dyn Fn(&Path) -> bool>;
type Callback = Box<dyn FnMut(&Path) -> std::io::Result<()>>;

/// Selects the files [`delete_files_older_than`] acts on. Unset filters match everything.
#[derive(Default)]
pub struct FileFilters {
    pub older_than: Duration,
    pub prefix: Option<String>,
    pub suffix: Option<String>,
    pub regex_pattern: Option<String>,
    pub custom_check: Option<CustomCheck>,
    /// Called instead of deleting the file.
    pub callback: Option<Callback>,
}

impl FileFilters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn older_than(mut self, older_than: Duration) -> Self {
        self.older_than = older_than;
        self
    }

    pub fn prefix(mut self, prefix: &str) -> Self {
        self.prefix = Some(prefix.to_owned());
        self
    }

    pub fn suffix(mut self, suffix: &str) -> Self {
        self.suffix = Some(suffix.to_owned());
        self
    }

    pub fn regex_pattern(mut self, regex_pattern: &str) -> Self {
        self.regex_pattern = Some(regex_pattern.to_owned());
        self
    }

    pub fn custom_check(mut self, check: impl Fn(&Path) -> bool + 'static) -> Self {
        self.custom_check = Some(Box::new(check));
        self
    }

    pub fn callback(mut self, callback: impl FnMut(&Path) -> std::io::Result<()> + 'static) -> Self {
        self.callback = Some(Box::new(callback));
        self
    }
}

/// Walks `folder` recursively and deletes (or hands to the callback) every file that matches
/// `filter` and was last modified more than `older_than` before the scan started.
///
/// Unreadable entries are skipped. An invalid regex or a callback error stops the walk.
pub fn delete_files_older_than(folder: impl AsRef<Path>, mut filter: FileFilters) -> std::io::Result<()> {
    let start_scan = SystemTime::now();
    let regex = match &filter.regex_pattern {
        Some(pattern) => Some(Regex::new(pattern).map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?),
        None => None,
    };

    let mut pending = vec![folder.as_ref().to_path_buf()];
    while let Some(dir) = pending.pop() {
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(err) => {
                log::debug!("skipping {}: {}", dir.display(), err);
                continue;
            }
        };
        for entry in entries.flatten() {
            let path = entry.path();
            match entry.file_type() {
                Ok(file_type) if file_type.is_dir() => {
                    pending.push(path);
                    continue;
                }
                Ok(_) => {}
                Err(_) => continue,
            }
            let Ok(modified) = fs::metadata(&path).and_then(|m| m.modified()) else {
                continue;
            };

            let name = entry.file_name();
            let name = name.to_string_lossy();
            if filter.prefix.as_deref().is_some_and(|prefix| !name.starts_with(prefix)) {
                continue;
            }
            if filter.suffix.as_deref().is_some_and(|suffix| !name.ends_with(suffix)) {
                continue;
            }
            if regex.as_ref().is_some_and(|regex| !regex.is_match(&name)) {
                continue;
            }
            if filter.custom_check.as_ref().is_some_and(|check| !check(&path)) {
                continue;
            }

            let expired = modified.checked_add(filter.older_than).is_some_and(|t| t < start_scan);
            if !expired {
                continue;
            }
            match filter.callback.as_mut() {
                Some(callback) => callback(&path)?,
                None => {
                    log::debug!("removing {}", path.display());
                    if let Err(err) = fs::remove_file(&path) {
                        log::warn!("failed to remove {}: {}", path.display(), err);
                    }
                }
            }
        }
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodeType {
    Yaml,
    Json,
}

/// Decodes `data`, or the file it names when `data` is the path of an existing file.
pub fn unmarshal<T: DeserializeOwned>(encode_type: EncodeType, data: &[u8]) -> std::io::Result<T> {
    if let Ok(path) = std::str::from_utf8(data) {
        if file_exists(path) {
            return unmarshal_from_reader(encode_type, BufReader::new(File::open(path)?));
        }
    }
    unmarshal_from_reader(encode_type, data)
}

pub fn unmarshal_from_reader<T: DeserializeOwned, R: Read>(encode_type: EncodeType, reader: R) -> std::io::Result<T> {
    match encode_type {
        EncodeType::Yaml => serde_yaml::from_reader(reader).map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e)),
        EncodeType::Json => Ok(serde_json::from_reader(reader)?),
    }
}

pub fn marshal_to_writer<T: Serialize, W: Write>(encode_type: EncodeType, mut writer: W, obj: &T) -> std::io::Result<()> {
    match encode_type {
        EncodeType::Yaml => {
            serde_yaml::to_writer(&mut writer, obj).map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?
        }
        EncodeType::Json => {
            serde_json::to_writer(&mut writer, obj)?;
            writer.write_all(b"\n")?;
        }
    }
    writer.flush()
}

pub fn marshal_to_file<T: Serialize>(encode_type: EncodeType, path: impl AsRef<Path>, obj: &T) -> std::io::Result<()> {
    let file = File::create(path)?;
    marshal_to_writer(encode_type, BufWriter::new(file), obj)
}

/// Name of the running executable without its extension.
pub fn executable_name() -> String {
    let path = std::env::current_exe()
        .ok()
        .or_else(|| std::env::args_os().next().map(PathBuf::from))
        .unwrap_or_default();
    path.file_stem().map(|stem| stem.to_string_lossy().into_owned()).unwrap_or_default()
}

/// Removes files and folders, returning the paths that could not be removed.
/// Paths that do not exist are not an error.
pub fn remove_all<P: AsRef<Path>>(paths: &[P]) -> HashMap<PathBuf, std::io::Error> {
    let mut errored = HashMap::new();
    for path in paths {
        let path = path.as_ref();
        let removed = match fs::symlink_metadata(path) {
            Ok(meta) if meta.is_dir() => fs::remove_dir_all(path),
            Ok(_) => fs::remove_file(path),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err),
        };
        if let Err(err) = removed {
            errored.insert(path.to_path_buf(), err);
        }
    }
    errored
}

/// Last component of `filename`, with each of `suffixes` stripped once in order.
pub fn basename(filename: &str, suffixes: &[&str]) -> String {
    let name = Path::new(filename)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| filename.to_string());
    crate::strings_util::trim_suffix_any(&name, suffixes).to_string()
}

/// Everything but the last component of `path`; `.` when there is no directory part.
pub fn dirname(path: &str) -> PathBuf {
    match Path::new(path).parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        Some(_) => PathBuf::from("."),
        None => PathBuf::from(path),
    }
}

pub fn file_size(path: impl AsRef<Path>) -> std::io::Result<u64> {
    Ok(fs::metadata(path)?.len())
}

pub fn file_mtime(path: impl AsRef<Path>) -> std::io::Result<SystemTime> {
    fs::metadata(path)?.modified()
}

/// Changes the owner of `path` to `username`. Does nothing beyond the existence check outside linux.
pub fn chown(path: impl AsRef<Path>, username: &str) -> std::io::Result<()> {
    let path = path.as_ref();
    if !file_or_folder_exists(path) {
        return Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("{} doesn't exist", path.display()),
        ));
    }
    #[cfg(target_os = "linux")]
    crate::linux::chown(path, username)?;
    #[cfg(not(target_os = "linux"))]
    let _ = username;
    Ok(())
}
