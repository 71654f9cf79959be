use serde::Serialize;
use std::fs::{self, File};

use rmp_serde::Serializer;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::errors::IoError;
use crate::utils::{create_directories_if_needed, file_exists};

/* This trait allow us to persist data by serializing and deserializing msgpack files.
Structs are written as maps so renamed or flattened fields survive a reload. */
pub trait Persistable: Serialize + DeserializeOwned {
    const PATH: &'static str;

    /* Load the saved state from `path` (default PATH), or start empty when nothing was saved */
    fn new(path: Option<String>) -> Result<Self, IoError>
    where
        Self: Sized,
    {
        let path = path.unwrap_or(Self::PATH.to_string());
        if !file_exists(&path) {
            debug!(path = %path, "Nothing saved yet, starting empty");
            return Ok(Self::default_new(path, true));
        }
        let file = File::open(&path).map_err(|e| IoError::file(&path, e))?;
        let mut deserialized: Self = rmp_serde::from_read(file)?;
        deserialized.set_location(path, true);
        Ok(deserialized)
    }

    /* Memory only: never reads nor writes a file */
    fn new_non_persistent() -> Self
    where
        Self: Sized,
    {
        Self::default_new(Self::PATH.to_string(), false)
    }

    fn save(&self) -> Result<(), IoError> {
        let path = self.get_path();
        create_directories_if_needed(path).map_err(|e| IoError::file(path, e))?;
        let file = File::create(path).map_err(|e| IoError::file(path, e))?;
        let mut writer = Serializer::new(file).with_struct_map();
        self.serialize(&mut writer)?;
        debug!(path = %path, "State saved");
        Ok(())
    }

    fn delete(&self) -> Result<(), IoError> {
        let path = self.get_path();
        if file_exists(path) {
            fs::remove_file(path).map_err(|e| IoError::file(path, e))?;
        }
        Ok(())
    }

    /* Get the saved path or return the default */
    fn get_path(&self) -> &str;

    /* default value (new value): for instance Vec::new() */
    fn default_new(path: String, persist: bool) -> Self;

    /* Attach a loaded state to the file it came from */
    fn set_location(&mut self, path: String, persist: bool);

    /* Decide if it has to persist or not. This can be used in drop trait */
    fn is_persistent(&self) -> bool;
}
