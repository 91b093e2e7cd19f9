//! In-memory storage backend
//!
//! All state lives behind one `RwLock`, so every operation (including the
//! folder cascade delete) is a single critical section. Ids come from
//! monotonic counters and are never reused.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use parking_lot::RwLock;
use tracing::{debug, info};

use super::{
    Bookmark, BookmarkPatch, BookmarkWithFolder, Folder, NewBookmark, NewFolder, NewUser, Storage,
    User, missing_folder, validate_folder_name,
};
use crate::errors::{BookmarkError, Result};

#[derive(Debug)]
struct MemoryState {
    users: BTreeMap<i32, User>,
    folders: BTreeMap<i32, String>,
    bookmarks: BTreeMap<i32, Bookmark>,
    next_user_id: i32,
    next_folder_id: i32,
    next_bookmark_id: i32,
}

impl Default for MemoryState {
    fn default() -> Self {
        Self {
            users: BTreeMap::new(),
            folders: BTreeMap::new(),
            bookmarks: BTreeMap::new(),
            next_user_id: 1,
            next_folder_id: 1,
            next_bookmark_id: 1,
        }
    }
}

impl MemoryState {
    fn bookmark_counts(&self) -> HashMap<i32, u64> {
        let mut counts = HashMap::new();
        for folder_id in self.bookmarks.values().filter_map(|b| b.folder_id) {
            *counts.entry(folder_id).or_insert(0) += 1;
        }
        counts
    }

    fn folder(&self, id: i32, name: &str) -> Folder {
        let bookmark_count = self
            .bookmarks
            .values()
            .filter(|b| b.folder_id == Some(id))
            .count() as u64;
        Folder {
            id,
            name: name.to_string(),
            bookmark_count,
        }
    }

    fn with_folder(&self, bookmark: &Bookmark) -> BookmarkWithFolder {
        let folder_name = bookmark
            .folder_id
            .and_then(|id| self.folders.get(&id))
            .cloned();
        BookmarkWithFolder {
            bookmark: bookmark.clone(),
            folder_name,
        }
    }

    fn check_folder(&self, folder_id: Option<i32>) -> Result<()> {
        match folder_id {
            Some(id) if !self.folders.contains_key(&id) => Err(missing_folder(id)),
            _ => Ok(()),
        }
    }
}

/// Process-lifetime storage backend
#[derive(Debug, Default)]
pub struct MemoryStorage {
    state: RwLock<MemoryState>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        info!("MEMORY Storage initialized.");
        Self::default()
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn get_user(&self, id: i32) -> Result<Option<User>> {
        Ok(self.state.read().users.get(&id).cloned())
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        Ok(self
            .state
            .read()
            .users
            .values()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn create_user(&self, user: NewUser) -> Result<User> {
        let mut state = self.state.write();
        if state.users.values().any(|u| u.username == user.username) {
            return Err(BookmarkError::validation(format!(
                "Username already exists: {}",
                user.username
            )));
        }

        let id = state.next_user_id;
        state.next_user_id += 1;
        let user = User {
            id,
            username: user.username,
            password: user.password,
        };
        state.users.insert(id, user.clone());
        Ok(user)
    }

    async fn list_folders(&self) -> Result<Vec<Folder>> {
        let state = self.state.read();
        let counts = state.bookmark_counts();
        Ok(state
            .folders
            .iter()
            .map(|(id, name)| Folder {
                id: *id,
                name: name.clone(),
                bookmark_count: counts.get(id).copied().unwrap_or(0),
            })
            .collect())
    }

    async fn get_folder(&self, id: i32) -> Result<Option<Folder>> {
        let state = self.state.read();
        Ok(state.folders.get(&id).map(|name| state.folder(id, name)))
    }

    async fn create_folder(&self, folder: NewFolder) -> Result<Folder> {
        validate_folder_name(&folder.name)?;

        let mut state = self.state.write();
        let id = state.next_folder_id;
        state.next_folder_id += 1;
        state.folders.insert(id, folder.name.clone());

        debug!("Folder created: {} ({})", id, folder.name);
        Ok(Folder {
            id,
            name: folder.name,
            bookmark_count: 0,
        })
    }

    async fn update_folder(&self, id: i32, folder: NewFolder) -> Result<Option<Folder>> {
        validate_folder_name(&folder.name)?;

        let mut state = self.state.write();
        let Some(name) = state.folders.get_mut(&id) else {
            return Ok(None);
        };
        *name = folder.name;

        let name = name.clone();
        Ok(Some(state.folder(id, &name)))
    }

    async fn delete_folder(&self, id: i32) -> Result<bool> {
        let mut state = self.state.write();
        if state.folders.remove(&id).is_none() {
            return Ok(false);
        }

        let before = state.bookmarks.len();
        state.bookmarks.retain(|_, b| b.folder_id != Some(id));
        info!(
            "Folder deleted: {} (cascaded {} bookmarks)",
            id,
            before - state.bookmarks.len()
        );
        Ok(true)
    }

    async fn list_bookmarks(&self) -> Result<Vec<BookmarkWithFolder>> {
        let state = self.state.read();
        Ok(state
            .bookmarks
            .values()
            .map(|b| state.with_folder(b))
            .collect())
    }

    async fn list_bookmarks_by_folder(&self, folder_id: i32) -> Result<Vec<BookmarkWithFolder>> {
        let state = self.state.read();
        Ok(state
            .bookmarks
            .values()
            .filter(|b| b.folder_id == Some(folder_id))
            .map(|b| state.with_folder(b))
            .collect())
    }

    async fn get_bookmark(&self, id: i32) -> Result<Option<BookmarkWithFolder>> {
        let state = self.state.read();
        Ok(state.bookmarks.get(&id).map(|b| state.with_folder(b)))
    }

    async fn create_bookmark(&self, bookmark: NewBookmark) -> Result<Bookmark> {
        let mut state = self.state.write();
        state.check_folder(bookmark.folder_id)?;

        let id = state.next_bookmark_id;
        state.next_bookmark_id += 1;
        let bookmark = Bookmark {
            id,
            title: bookmark.title,
            url: bookmark.url,
            folder_id: bookmark.folder_id,
            favicon: bookmark.favicon,
        };
        state.bookmarks.insert(id, bookmark.clone());

        debug!("Bookmark created: {} -> {}", id, bookmark.url);
        Ok(bookmark)
    }

    async fn update_bookmark(&self, id: i32, patch: BookmarkPatch) -> Result<Option<Bookmark>> {
        let mut state = self.state.write();
        if !state.bookmarks.contains_key(&id) {
            return Ok(None);
        }
        state.check_folder(patch.target_folder())?;

        let Some(bookmark) = state.bookmarks.get_mut(&id) else {
            return Ok(None);
        };
        patch.apply(bookmark);
        Ok(Some(bookmark.clone()))
    }

    async fn delete_bookmark(&self, id: i32) -> Result<bool> {
        Ok(self.state.write().bookmarks.remove(&id).is_some())
    }

    async fn search_bookmarks(&self, term: &str) -> Result<Vec<BookmarkWithFolder>> {
        let state = self.state.read();
        Ok(state
            .bookmarks
            .values()
            .filter(|b| b.matches_search(term))
            .map(|b| state.with_folder(b))
            .collect())
    }

    fn backend_name(&self) -> &str {
        "memory"
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}
