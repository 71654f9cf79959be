use std::{fs, io, path::Path};

pub fn file_exists(file_name: &str) -> bool {
    Path::new(file_name).is_file()
}

/* Create the parent directories of a file path */
pub fn create_directories_if_needed(file_path: &str) -> io::Result<()> {
    match Path::new(file_path).parent() {
        Some(parent) if !parent.as_os_str().is_empty() && !parent.exists() => {
            fs::create_dir_all(parent)
        }
        _ => Ok(()),
    }
}
